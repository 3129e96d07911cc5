// SPDX-License-Identifier: PMPL-1.0-or-later
//! In-process mock of the catalog's entity and search endpoints.
//!
//! Keeps entities in memory, assigns GUIDs for placeholders, honours explicit
//! nulls and relationship appends, and evaluates the `term` filters the
//! client sends. Every request is recorded for assertions.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use atlan_client::{AtlanClient, ClientConfig};
use atlan_model::{AtlanTag, Entity, EntityStatus};
use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Map, Value};

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: String,
    pub authorization: Option<String>,
}

#[derive(Default)]
pub struct CatalogState {
    pub entities: Vec<Entity>,
    pub requests: Vec<Recorded>,
    /// Responses to answer with 503 before serving normally.
    pub unavailable: u32,
    next_guid: u32,
}

impl CatalogState {
    fn mint_guid(&mut self) -> String {
        self.next_guid += 1;
        format!("00000000-0000-4000-8000-{:012}", self.next_guid)
    }

    fn find_by_guid(&self, guid: &str) -> Option<usize> {
        self.entities.iter().position(|e| e.guid.as_deref() == Some(guid))
    }

    fn find_by_qn(&self, type_name: &str, qualified_name: &str) -> Option<usize> {
        self.entities
            .iter()
            .position(|e| e.type_name == type_name && e.qualified_name() == Some(qualified_name))
    }
}

pub type Shared = Arc<Mutex<CatalogState>>;

#[derive(Clone)]
pub struct MockCatalog {
    pub state: Shared,
    pub base_url: String,
}

impl MockCatalog {
    pub async fn spawn() -> Self {
        let state: Shared = Arc::new(Mutex::new(CatalogState::default()));
        let app = Router::new()
            .route("/api/meta/entity/guid/{guid}", get(get_by_guid))
            .route("/api/meta/entity/uniqueAttribute/type/{type_name}", get(get_by_qn))
            .route(
                "/api/meta/entity/uniqueAttribute/type/{type_name}/classifications",
                post(add_tags),
            )
            .route(
                "/api/meta/entity/uniqueAttribute/type/{type_name}/classification/{tag}",
                delete(remove_tag),
            )
            .route("/api/meta/entity/bulk", post(bulk_save).delete(bulk_delete))
            .route("/api/meta/search/indexsearch", post(index_search))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            state,
            base_url: format!("http://{addr}"),
        }
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig {
            retry_backoff_ms: 1,
            ..ClientConfig::new(self.base_url.clone())
        }
    }

    pub fn client(&self) -> AtlanClient {
        AtlanClient::from_config(self.config()).unwrap()
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn count_requests(&self, method: Method, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn entity(&self, guid: &str) -> Option<Entity> {
        let state = self.state.lock().unwrap();
        state.find_by_guid(guid).map(|i| state.entities[i].clone())
    }

    pub fn set_unavailable(&self, times: u32) {
        self.state.lock().unwrap().unavailable = times;
    }
}

fn not_found(what: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "errorCode": "ATLAS-404-00-005", "errorMessage": format!("{what} not found") })),
    )
        .into_response()
}

fn record(state: &mut CatalogState, method: Method, uri: &Uri, headers: &HeaderMap) {
    state.requests.push(Recorded {
        method,
        path: uri.path().to_string(),
        query: uri.query().unwrap_or_default().to_string(),
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });
}

fn query_pairs(raw: &Option<String>) -> Vec<(String, String)> {
    url::form_urlencoded::parse(raw.as_deref().unwrap_or_default().as_bytes())
        .into_owned()
        .collect()
}

fn query_value(raw: &Option<String>, key: &str) -> Option<String> {
    query_pairs(raw).into_iter().find(|(k, _)| k == key).map(|(_, v)| v)
}

async fn get_by_guid(
    State(state): State<Shared>,
    Path(guid): Path<String>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let mut state = state.lock().unwrap();
    record(&mut state, Method::GET, &uri, &headers);
    match state.find_by_guid(&guid) {
        Some(i) => Json(json!({ "entity": state.entities[i] })).into_response(),
        None => not_found(&guid),
    }
}

async fn get_by_qn(
    State(state): State<Shared>,
    Path(type_name): Path<String>,
    RawQuery(raw): RawQuery,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let mut state = state.lock().unwrap();
    record(&mut state, Method::GET, &uri, &headers);
    let qn = query_value(&raw, "attr:qualifiedName").unwrap_or_default();
    match state.find_by_qn(&type_name, &qn) {
        Some(i) => Json(json!({ "entity": state.entities[i], "referredEntities": {} })).into_response(),
        None => not_found(&qn),
    }
}

fn apply_relationships(target: &mut Map<String, Value>, append: &Map<String, Value>, remove: &Map<String, Value>) {
    for (key, refs) in append {
        let entry = target.entry(key.clone()).or_insert_with(|| json!([]));
        if !entry.is_array() {
            *entry = json!([]);
        }
        if let (Some(items), Some(new)) = (entry.as_array_mut(), refs.as_array()) {
            items.extend(new.iter().cloned());
        }
    }
    for (key, refs) in remove {
        let guids: Vec<&Value> = refs.as_array().map(|r| r.iter().map(|v| &v["guid"]).collect()).unwrap_or_default();
        if let Some(items) = target.get_mut(key).and_then(Value::as_array_mut) {
            items.retain(|item| !guids.contains(&&item["guid"]));
        }
    }
}

async fn bulk_save(
    State(state): State<Shared>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    record(&mut state, Method::POST, &uri, &headers);
    let incoming: Vec<Entity> = serde_json::from_value(body["entities"].clone()).unwrap_or_default();

    let mut created = Vec::new();
    let mut updated = Vec::new();
    let mut assignments = Map::new();

    for entity in incoming {
        let sent_guid = entity.guid.clone().unwrap_or_default();
        let existing = state.find_by_guid(&sent_guid).or_else(|| {
            entity
                .qualified_name()
                .and_then(|qn| state.find_by_qn(&entity.type_name, qn))
        });

        let index = match existing {
            Some(i) => {
                let stored = &mut state.entities[i];
                for (key, value) in &entity.attributes {
                    if value.is_null() {
                        stored.attributes.remove(key);
                    } else {
                        stored.attributes.insert(key.clone(), value.clone());
                    }
                }
                if entity.status.is_some() {
                    stored.status = entity.status;
                }
                let (append, remove) = (
                    entity.append_relationship_attributes.clone(),
                    entity.remove_relationship_attributes.clone(),
                );
                apply_relationships(&mut stored.attributes, &append, &remove);
                updated.push(i);
                i
            }
            None => {
                let guid = state.mint_guid();
                let mut stored = Entity::new(entity.type_name.clone());
                stored.guid = Some(guid);
                stored.status = Some(EntityStatus::Active);
                stored.attributes = entity
                    .attributes
                    .iter()
                    .filter(|(_, v)| !v.is_null())
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect();
                stored.classifications = entity.classifications.clone();
                state.entities.push(stored);
                let i = state.entities.len() - 1;
                created.push(i);
                i
            }
        };

        let assigned = state.entities[index].guid.clone().unwrap_or_default();
        if sent_guid.starts_with('-') {
            assignments.insert(sent_guid, Value::String(assigned));
        }
    }

    let render = |indices: &[usize]| -> Vec<Value> {
        indices.iter().map(|i| json!(state.entities[*i])).collect()
    };
    let mut mutated = Map::new();
    if !created.is_empty() {
        mutated.insert("CREATE".to_string(), Value::Array(render(&created)));
    }
    if !updated.is_empty() {
        mutated.insert("UPDATE".to_string(), Value::Array(render(&updated)));
    }
    Json(json!({ "mutatedEntities": mutated, "guidAssignments": assignments })).into_response()
}

async fn bulk_delete(
    State(state): State<Shared>,
    RawQuery(raw): RawQuery,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let mut state = state.lock().unwrap();
    record(&mut state, Method::DELETE, &uri, &headers);
    let pairs = query_pairs(&raw);
    let delete_type = pairs
        .iter()
        .find(|(k, _)| k == "deleteType")
        .map(|(_, v)| v.clone())
        .unwrap_or_else(|| "SOFT".to_string());

    let mut deleted = Vec::new();
    for guid in pairs.iter().filter(|(k, _)| k == "guid").map(|(_, v)| v) {
        let Some(i) = state.find_by_guid(guid) else {
            return not_found(guid);
        };
        if delete_type == "SOFT" {
            state.entities[i].status = Some(EntityStatus::Deleted);
            deleted.push(json!(state.entities[i]));
        } else {
            let mut removed = state.entities.remove(i);
            removed.status = Some(EntityStatus::Purged);
            deleted.push(json!(removed));
        }
    }
    Json(json!({ "mutatedEntities": { "DELETE": deleted } })).into_response()
}

async fn add_tags(
    State(state): State<Shared>,
    Path(type_name): Path<String>,
    RawQuery(raw): RawQuery,
    uri: Uri,
    headers: HeaderMap,
    Json(tags): Json<Vec<AtlanTag>>,
) -> Response {
    let mut state = state.lock().unwrap();
    record(&mut state, Method::POST, &uri, &headers);
    let qn = query_value(&raw, "attr:qualifiedName").unwrap_or_default();
    match state.find_by_qn(&type_name, &qn) {
        Some(i) => {
            let entity = &mut state.entities[i];
            for mut tag in tags {
                tag.entity_guid = entity.guid.clone();
                entity.classifications.push(tag);
            }
            StatusCode::NO_CONTENT.into_response()
        }
        None => not_found(&qn),
    }
}

async fn remove_tag(
    State(state): State<Shared>,
    Path((type_name, tag)): Path<(String, String)>,
    RawQuery(raw): RawQuery,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let mut state = state.lock().unwrap();
    record(&mut state, Method::DELETE, &uri, &headers);
    let qn = query_value(&raw, "attr:qualifiedName").unwrap_or_default();
    let Some(i) = state.find_by_qn(&type_name, &qn) else {
        return not_found(&qn);
    };
    let entity = &mut state.entities[i];
    let before = entity.classifications.len();
    entity.classifications.retain(|t| t.type_name != tag);
    if entity.classifications.len() == before {
        return not_found(&tag);
    }
    StatusCode::NO_CONTENT.into_response()
}

/// Value of `field` on `entity` as the search index would see it.
fn indexed(entity: &Entity, field: &str) -> Value {
    match field {
        "__typeName.keyword" => json!(entity.type_name),
        "__guid" => json!(entity.guid),
        "__state" => json!(entity.status.unwrap_or(EntityStatus::Active)),
        other => entity
            .attributes
            .get(other.trim_end_matches(".keyword"))
            .cloned()
            .unwrap_or(Value::Null),
    }
}

fn matches(entity: &Entity, clause: &Value) -> bool {
    if let Some(term) = clause.get("term").and_then(Value::as_object) {
        return term
            .iter()
            .all(|(field, spec)| indexed(entity, field) == spec["value"]);
    }
    if let Some(inner) = clause.get("bool") {
        let all = |key: &str| {
            inner[key]
                .as_array()
                .map_or(true, |clauses| clauses.iter().all(|c| matches(entity, c)))
        };
        let none = inner["must_not"]
            .as_array()
            .map_or(true, |clauses| !clauses.iter().any(|c| matches(entity, c)));
        return all("must") && all("filter") && none;
    }
    clause.get("match_all").is_some()
}

async fn index_search(
    State(state): State<Shared>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    record(&mut state, Method::POST, &uri, &headers);
    if state.unavailable > 0 {
        state.unavailable -= 1;
        return (StatusCode::SERVICE_UNAVAILABLE, "busy").into_response();
    }

    let dsl = &body["dsl"];
    let from = dsl["from"].as_u64().unwrap_or(0) as usize;
    let size = dsl["size"].as_u64().unwrap_or(100) as usize;

    let mut hits: Vec<&Entity> = state
        .entities
        .iter()
        .filter(|e| matches(e, &dsl["query"]))
        .collect();
    hits.sort_by(|a, b| a.guid.cmp(&b.guid));
    let total = hits.len();
    let page: Vec<&Entity> = hits.into_iter().skip(from).take(size).collect();

    Json(json!({
        "queryType": "INDEX",
        "approximateCount": total,
        "entities": page,
    }))
    .into_response()
}
