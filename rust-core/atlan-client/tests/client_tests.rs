// SPDX-License-Identifier: PMPL-1.0-or-later
//! Integration tests for the Atlan client
//!
//! Every test runs against an in-process mock catalog bound to an ephemeral
//! port.

mod common;

use atlan_client::{AssetOps, AtlanClient, AtlanError, ClientConfig};
use atlan_model::{
    AnnouncementType, ApiObject, ApiQuery, AtlanTag, CertificateStatus, EntityStatus, GlossaryTerm,
};
use atlan_search::asset;
use axum::http::Method;
use common::MockCatalog;
use futures::TryStreamExt;
use std::time::{Duration, Instant};

const CONN: &str = "default/api/1700000000";

async fn create_object(client: &AtlanClient, name: &str) -> ApiObject {
    let object = ApiObject::creator(name, CONN)
        .unwrap()
        .description(format!("{name} description"))
        .build();
    let response = object.save(client).await.unwrap();
    response.result_for(&object).expect("object saved")
}

#[tokio::test]
async fn test_create_assigns_real_guid() {
    let catalog = MockCatalog::spawn().await;
    let client = catalog.client();

    let object = ApiObject::creator("orders", CONN).unwrap().build();
    let placeholder = object.guid().unwrap().to_string();
    let response = object.save(&client).await.unwrap();

    let assigned = response.assigned_guid(&placeholder).unwrap();
    assert!(atlan_model::is_guid(assigned));
    let saved = response.result_for(&object).unwrap();
    assert_eq!(saved.guid(), Some(assigned));
    assert_eq!(saved.common.connector_name.as_deref(), Some("api"));
}

#[tokio::test]
async fn test_get_by_guid_and_qualified_name() {
    let catalog = MockCatalog::spawn().await;
    let client = catalog.client();
    let created = create_object(&client, "orders").await;
    let guid = created.guid().unwrap();

    let by_guid = ApiObject::get(&client, guid, false).await.unwrap();
    assert_eq!(by_guid.qualified_name(), Some("default/api/1700000000/orders"));

    let by_qn = ApiObject::get(&client, "default/api/1700000000/orders", true).await.unwrap();
    assert_eq!(by_qn.guid(), Some(guid));
    assert_eq!(by_qn.common.description.as_deref(), Some("orders description"));

    assert_eq!(catalog.count_requests(Method::GET, &format!("/api/meta/entity/guid/{guid}")), 1);
    assert_eq!(
        catalog.count_requests(Method::GET, "/api/meta/entity/uniqueAttribute/type/APIObject"),
        1
    );
}

#[tokio::test]
async fn test_get_wrong_type_is_not_found() {
    let catalog = MockCatalog::spawn().await;
    let client = catalog.client();
    let created = create_object(&client, "orders").await;

    let err = ApiQuery::get(&client, created.guid().unwrap(), false).await.unwrap_err();
    assert!(err.is_not_found());
    let err = ApiQuery::get(&client, "default/api/1700000000/orders", false)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_get_with_attributes() {
    let catalog = MockCatalog::spawn().await;
    let client = catalog.client();
    let created = create_object(&client, "orders").await;

    let found = ApiObject::get_with_attributes(&client, "default/api/1700000000/orders", &["description"], &[])
        .await
        .unwrap();
    assert_eq!(found.guid(), created.guid());

    let err = ApiObject::get_with_attributes(&client, "default/api/1700000000/missing", &[], &[])
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_get_with_attributes_by_guid() {
    let catalog = MockCatalog::spawn().await;
    let client = catalog.client();
    let created = create_object(&client, "orders").await;
    let guid = created.guid().unwrap();

    let found = ApiObject::get_with_attributes(&client, guid, &["description"], &["name"])
        .await
        .unwrap();
    assert_eq!(found.qualified_name(), Some("default/api/1700000000/orders"));

    let err = ApiQuery::get_with_attributes(&client, guid, &[], &[]).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("not a APIQuery"));
}

#[tokio::test]
async fn test_get_with_attributes_skips_archived() {
    let catalog = MockCatalog::spawn().await;
    let client = catalog.client();
    let created = create_object(&client, "orders").await;
    let guid = created.guid().unwrap();
    ApiObject::delete(&client, guid).await.unwrap();

    let err = ApiObject::get_with_attributes(&client, guid, &[], &[]).await.unwrap_err();
    assert!(err.is_not_found());
    let err = ApiObject::get_with_attributes(&client, "default/api/1700000000/orders", &[], &[])
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_certificate_and_announcement_round() {
    let catalog = MockCatalog::spawn().await;
    let client = catalog.client();
    let created = create_object(&client, "orders").await;
    let qn = created.qualified_name().unwrap();

    let certified = ApiObject::update_certificate(&client, qn, CertificateStatus::Verified, Some("Reviewed"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(certified.common.certificate_status, Some(CertificateStatus::Verified));
    assert_eq!(certified.common.certificate_status_message.as_deref(), Some("Reviewed"));

    ApiObject::update_announcement(&client, qn, AnnouncementType::Warning, "Migrating", None)
        .await
        .unwrap();
    let removed = ApiObject::remove_certificate(&client, qn, "orders").await.unwrap().unwrap();
    assert!(removed.common.certificate_status.is_none());
    assert_eq!(removed.common.announcement_type, Some(AnnouncementType::Warning));

    let cleared = ApiObject::remove_announcement(&client, qn, "orders").await.unwrap().unwrap();
    assert!(cleared.common.announcement_title.is_none());
}

#[tokio::test]
async fn test_remove_description_and_owners() {
    let catalog = MockCatalog::spawn().await;
    let client = catalog.client();
    let object = ApiObject::creator("orders", CONN)
        .unwrap()
        .description("gone soon")
        .owner_users(["jsmith"])
        .build();
    object.save(&client).await.unwrap();
    let qn = object.qualified_name().unwrap();

    let updated = ApiObject::remove_description(&client, qn, "orders").await.unwrap().unwrap();
    assert!(updated.common.description.is_none());
    let updated = ApiObject::remove_owners(&client, qn, "orders").await.unwrap().unwrap();
    assert!(updated.common.owner_users.is_none());
}

#[tokio::test]
async fn test_delete_and_restore() {
    let catalog = MockCatalog::spawn().await;
    let client = catalog.client();
    let created = create_object(&client, "orders").await;
    let guid = created.guid().unwrap();
    let qn = created.qualified_name().unwrap();

    let response = ApiObject::delete(&client, guid).await.unwrap();
    assert_eq!(response.deleted().len(), 1);
    assert_eq!(catalog.entity(guid).unwrap().status, Some(EntityStatus::Deleted));

    assert!(ApiObject::restore(&client, qn).await.unwrap());
    assert_eq!(catalog.entity(guid).unwrap().status, Some(EntityStatus::Active));

    let saves_before = catalog.count_requests(Method::POST, "/api/meta/entity/bulk");
    assert!(ApiObject::restore(&client, qn).await.unwrap());
    assert_eq!(catalog.count_requests(Method::POST, "/api/meta/entity/bulk"), saves_before);
}

#[tokio::test]
async fn test_purge_removes_asset() {
    let catalog = MockCatalog::spawn().await;
    let client = catalog.client();
    let created = create_object(&client, "orders").await;
    let guid = created.guid().unwrap();

    ApiObject::purge(&client, guid).await.unwrap();
    assert!(catalog.entity(guid).is_none());
    let purge = catalog
        .requests()
        .into_iter()
        .find(|r| r.method == Method::DELETE)
        .unwrap();
    assert!(purge.query.contains("deleteType=PURGE"));
    assert!(ApiObject::get(&client, guid, false).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_terms_append_replace_remove() {
    let catalog = MockCatalog::spawn().await;
    let client = catalog.client();
    let created = create_object(&client, "orders").await;
    let qn = created.qualified_name().unwrap();
    let revenue = GlossaryTerm::ref_by_guid("11111111-1111-4111-8111-111111111111");
    let margin = GlossaryTerm::ref_by_guid("22222222-2222-4222-8222-222222222222");

    let appended = ApiObject::append_terms(&client, qn, vec![revenue.clone(), margin.clone()])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(appended.common.meanings.as_ref().map(Vec::len), Some(2));

    let trimmed = ApiObject::remove_terms(&client, qn, vec![revenue]).await.unwrap().unwrap();
    let left = trimmed.common.meanings.unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].guid, margin.guid);

    let replaced = ApiObject::replace_terms(&client, qn, "orders", Vec::new()).await.unwrap().unwrap();
    assert!(replaced.common.meanings.is_none());
}

#[tokio::test]
async fn test_atlan_tags() {
    let catalog = MockCatalog::spawn().await;
    let client = catalog.client();
    let created = create_object(&client, "orders").await;
    let qn = created.qualified_name().unwrap();

    let tagged = ApiObject::append_atlan_tags(
        &client,
        qn,
        vec![AtlanTag::new("PII"), AtlanTag::with_propagation("Finance", true, true, false)],
    )
    .await
    .unwrap();
    let names: Vec<&str> = tagged.header.atlan_tags.iter().map(|t| t.type_name.as_str()).collect();
    assert_eq!(names, vec!["PII", "Finance"]);

    ApiObject::remove_atlan_tag(&client, qn, "PII").await.unwrap();
    let err = ApiObject::remove_atlan_tag(&client, qn, "PII").await.unwrap_err();
    assert!(err.is_not_found());

    assert!(matches!(
        ApiObject::append_atlan_tags(&client, qn, Vec::new()).await,
        Err(AtlanError::Validation(_))
    ));
}

#[tokio::test]
async fn test_select_streams_every_page() {
    let catalog = MockCatalog::spawn().await;
    let client = catalog.client();
    for name in ["a", "b", "c", "d", "e"] {
        create_object(&client, name).await;
    }
    ApiQuery::creator("listOrders", CONN).unwrap().build().save(&client).await.unwrap();

    let search = ApiObject::select(&client, false).page_size(2);
    assert_eq!(search.count().await.unwrap(), 5);

    let before = catalog.count_requests(Method::POST, "/api/meta/search/indexsearch");
    let all = search.to_list(None).await.unwrap();
    let pages = catalog.count_requests(Method::POST, "/api/meta/search/indexsearch") - before;
    assert_eq!(all.len(), 5);
    assert_eq!(pages, 3);

    let mut guids: Vec<_> = all.iter().filter_map(|e| e.guid.clone()).collect();
    guids.dedup();
    assert_eq!(guids.len(), 5);

    assert_eq!(search.to_list(Some(3)).await.unwrap().len(), 3);

    let typed: Vec<ApiObject> = client
        .search()
        .where_(asset::CONNECTION_QUALIFIED_NAME.eq(CONN))
        .stream_assets()
        .try_collect()
        .await
        .unwrap();
    assert_eq!(typed.len(), 5);
}

#[tokio::test]
async fn test_archived_assets_only_when_asked() {
    let catalog = MockCatalog::spawn().await;
    let client = catalog.client();
    let kept = create_object(&client, "kept").await;
    let archived = create_object(&client, "archived").await;
    ApiObject::delete(&client, archived.guid().unwrap()).await.unwrap();

    let active = ApiObject::select(&client, false).to_list(None).await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].guid.as_deref(), kept.guid());
    assert_eq!(ApiObject::select(&client, true).count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_retries_unavailable_server() {
    let catalog = MockCatalog::spawn().await;
    let client = catalog.client();
    create_object(&client, "orders").await;

    catalog.set_unavailable(2);
    assert_eq!(ApiObject::select(&client, false).count().await.unwrap(), 1);

    let impatient = AtlanClient::from_config(ClientConfig {
        max_retries: 1,
        ..catalog.config()
    })
    .unwrap();
    catalog.set_unavailable(5);
    let err = ApiObject::select(&impatient, false).count().await.unwrap_err();
    assert!(matches!(err, AtlanError::Server { status: 503, .. }));
}

#[tokio::test]
async fn test_retries_refused_connection() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = AtlanClient::from_config(ClientConfig {
        max_retries: 2,
        retry_backoff_ms: 50,
        ..ClientConfig::new(format!("http://{addr}"))
    })
    .unwrap();

    let started = Instant::now();
    let err = ApiObject::get(&client, "default/api/1700000000/orders", false)
        .await
        .unwrap_err();
    assert!(matches!(err, AtlanError::Network(_)));
    assert!(started.elapsed() >= Duration::from_millis(150));
}

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let catalog = MockCatalog::spawn().await;
    let client = AtlanClient::from_config(catalog.config().with_token("secret-token")).unwrap();
    let _ = ApiObject::get(&client, "default/api/1700000000/none", false).await;

    let requests = catalog.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].authorization.as_deref(), Some("Bearer secret-token"));
}
