// SPDX-License-Identifier: PMPL-1.0-or-later
//! Typed operations on assets.
//!
//! [`AssetOps`] is implemented once for every [`Asset<K>`], so each asset
//! type (`ApiObject::get`, `QlikSpace::restore`, ...) gets the same retrieve,
//! search and update helpers.

use async_trait::async_trait;
use atlan_model::{
    is_guid, AnnouncementType, Asset, AssetKind, AssetRef, AtlanTag, CertificateStatus, Entity,
    EntityStatus, ModelError,
};
use atlan_search::asset;
use tracing::{debug, instrument};

use crate::client::AtlanClient;
use crate::entity::{AssetMutationResponse, DeleteType};
use crate::error::{AtlanError, Result};
use crate::search::FluentSearch;

/// Retrieve, search and update helpers for one asset type.
#[async_trait]
pub trait AssetOps: Sized + Send + Sync {
    /// Search pre-filtered to this type, and to active assets unless
    /// `include_archived`.
    fn select(client: &AtlanClient, include_archived: bool) -> FluentSearch<'_>;

    /// Retrieve by GUID, or by qualified name when `id` is not a GUID.
    ///
    /// # Errors
    ///
    /// Returns [`AtlanError::NotFound`] when nothing matches or the match is
    /// of another type.
    async fn get(client: &AtlanClient, id: &str, include_relationships: bool) -> Result<Self>;

    /// Retrieve through search, with only the named attributes (and the named
    /// attributes of related assets) populated.
    /// Archived assets are not matched.
    async fn get_with_attributes(
        client: &AtlanClient,
        id: &str,
        attributes: &[&str],
        related_attributes: &[&str],
    ) -> Result<Self>;

    /// Create or update this asset.
    async fn save(&self, client: &AtlanClient) -> Result<AssetMutationResponse>;

    /// Archive the asset; it can be restored later.
    async fn delete(client: &AtlanClient, guid: &str) -> Result<AssetMutationResponse>;

    /// Remove the asset permanently.
    async fn purge(client: &AtlanClient, guid: &str) -> Result<AssetMutationResponse>;

    /// Re-activate an archived asset. Returns `true` straight away when the
    /// asset is already active.
    async fn restore(client: &AtlanClient, qualified_name: &str) -> Result<bool>;

    async fn remove_description(client: &AtlanClient, qualified_name: &str, name: &str) -> Result<Option<Self>>;

    async fn remove_user_description(client: &AtlanClient, qualified_name: &str, name: &str) -> Result<Option<Self>>;

    async fn remove_owners(client: &AtlanClient, qualified_name: &str, name: &str) -> Result<Option<Self>>;

    async fn update_certificate(
        client: &AtlanClient,
        qualified_name: &str,
        status: CertificateStatus,
        message: Option<&str>,
    ) -> Result<Option<Self>>;

    async fn remove_certificate(client: &AtlanClient, qualified_name: &str, name: &str) -> Result<Option<Self>>;

    async fn update_announcement(
        client: &AtlanClient,
        qualified_name: &str,
        kind: AnnouncementType,
        title: &str,
        message: Option<&str>,
    ) -> Result<Option<Self>>;

    async fn remove_announcement(client: &AtlanClient, qualified_name: &str, name: &str) -> Result<Option<Self>>;

    /// Assign exactly `terms`; an empty list removes every term.
    async fn replace_terms(
        client: &AtlanClient,
        qualified_name: &str,
        name: &str,
        terms: Vec<AssetRef>,
    ) -> Result<Option<Self>>;

    /// Assign `terms` in addition to those already assigned.
    async fn append_terms(client: &AtlanClient, qualified_name: &str, terms: Vec<AssetRef>) -> Result<Option<Self>>;

    /// Unassign `terms`, leaving any others assigned.
    async fn remove_terms(client: &AtlanClient, qualified_name: &str, terms: Vec<AssetRef>) -> Result<Option<Self>>;

    /// Attach Atlan tags and return the asset as it now stands.
    async fn append_atlan_tags(client: &AtlanClient, qualified_name: &str, tags: Vec<AtlanTag>) -> Result<Self>;

    async fn remove_atlan_tag(client: &AtlanClient, qualified_name: &str, tag_name: &str) -> Result<()>;
}

/// Cast a retrieved entity, reporting a type mismatch as not found.
fn cast<K: AssetKind>(entity: Entity, id: &str) -> Result<Asset<K>> {
    Asset::<K>::try_from_entity(entity).map_err(|e| match e {
        ModelError::TypeMismatch { actual, .. } => {
            AtlanError::NotFound(format!("{id} is a {actual}, not a {}", K::TYPE_NAME))
        }
        other => other.into(),
    })
}

/// The asset with only its identity populated.
async fn fetch_minimal<K: AssetKind>(client: &AtlanClient, qualified_name: &str) -> Result<Asset<K>> {
    let entity = client
        .get_entity_by_qualified_name(K::TYPE_NAME, qualified_name, true, true)
        .await?;
    cast(entity, qualified_name)
}

/// Save `asset` and return its saved counterpart.
async fn save_update<K: AssetKind>(client: &AtlanClient, asset: Asset<K>) -> Result<Option<Asset<K>>> {
    let response = client.save(&[asset.to_entity()?]).await?;
    Ok(response.result_for(&asset))
}

#[async_trait]
impl<K: AssetKind> AssetOps for Asset<K> {
    fn select(client: &AtlanClient, include_archived: bool) -> FluentSearch<'_> {
        let search = client.search().where_(asset::TYPE_NAME.eq(K::TYPE_NAME));
        if include_archived {
            search
        } else {
            search.where_(asset::STATUS.eq(EntityStatus::Active.to_string()))
        }
    }

    #[instrument(skip(client), fields(type_name = K::TYPE_NAME))]
    async fn get(client: &AtlanClient, id: &str, include_relationships: bool) -> Result<Self> {
        let minimal = !include_relationships;
        let entity = if is_guid(id) {
            client.get_entity_by_guid(id, minimal, minimal).await?
        } else {
            client
                .get_entity_by_qualified_name(K::TYPE_NAME, id, minimal, minimal)
                .await?
        };
        cast(entity, id)
    }

    #[instrument(skip(client), fields(type_name = K::TYPE_NAME))]
    async fn get_with_attributes(
        client: &AtlanClient,
        id: &str,
        attributes: &[&str],
        related_attributes: &[&str],
    ) -> Result<Self> {
        let mut search = if is_guid(id) {
            client
                .search()
                .where_(asset::GUID.eq(id))
                .where_(asset::STATUS.eq(EntityStatus::Active.to_string()))
        } else {
            Self::select(client, false).where_(asset::QUALIFIED_NAME.eq(id))
        };
        for name in attributes {
            search = search.include_attribute(*name);
        }
        for name in related_attributes {
            search = search.include_relation_attribute(*name);
        }

        let entity = search
            .page_size(1)
            .first()
            .await?
            .ok_or_else(|| AtlanError::NotFound(format!("{} {id}", K::TYPE_NAME)))?;
        cast(entity, id)
    }

    async fn save(&self, client: &AtlanClient) -> Result<AssetMutationResponse> {
        client.save(&[self.to_entity()?]).await
    }

    async fn delete(client: &AtlanClient, guid: &str) -> Result<AssetMutationResponse> {
        client.delete_by_guids(&[guid], DeleteType::Soft).await
    }

    async fn purge(client: &AtlanClient, guid: &str) -> Result<AssetMutationResponse> {
        client.delete_by_guids(&[guid], DeleteType::Purge).await
    }

    #[instrument(skip(client), fields(type_name = K::TYPE_NAME))]
    async fn restore(client: &AtlanClient, qualified_name: &str) -> Result<bool> {
        let existing = fetch_minimal::<K>(client, qualified_name).await?;
        if existing.status().map_or(true, |s| s == EntityStatus::Active) {
            debug!("asset already active");
            return Ok(true);
        }

        let guid = existing
            .guid()
            .ok_or_else(|| AtlanError::Validation(format!("{qualified_name} has no GUID")))?
            .to_string();
        let revived = existing
            .trim_to_required()?
            .guid(guid.as_str())
            .status(EntityStatus::Active)
            .build();
        let response = client.save(&[revived.to_entity()?]).await?;
        let restored = response.saved().any(|e| e.guid.as_deref() == Some(guid.as_str()));
        Ok(restored)
    }

    async fn remove_description(client: &AtlanClient, qualified_name: &str, name: &str) -> Result<Option<Self>> {
        let asset = Self::updater(qualified_name, name)?.remove_description().build();
        save_update(client, asset).await
    }

    async fn remove_user_description(client: &AtlanClient, qualified_name: &str, name: &str) -> Result<Option<Self>> {
        let asset = Self::updater(qualified_name, name)?.remove_user_description().build();
        save_update(client, asset).await
    }

    async fn remove_owners(client: &AtlanClient, qualified_name: &str, name: &str) -> Result<Option<Self>> {
        let asset = Self::updater(qualified_name, name)?.remove_owners().build();
        save_update(client, asset).await
    }

    #[instrument(skip(client, message), fields(type_name = K::TYPE_NAME))]
    async fn update_certificate(
        client: &AtlanClient,
        qualified_name: &str,
        status: CertificateStatus,
        message: Option<&str>,
    ) -> Result<Option<Self>> {
        let existing = fetch_minimal::<K>(client, qualified_name).await?;
        let asset = existing
            .trim_to_required()?
            .certificate(status, message.map(str::to_string))
            .build();
        save_update(client, asset).await
    }

    async fn remove_certificate(client: &AtlanClient, qualified_name: &str, name: &str) -> Result<Option<Self>> {
        let asset = Self::updater(qualified_name, name)?.remove_certificate().build();
        save_update(client, asset).await
    }

    #[instrument(skip(client, title, message), fields(type_name = K::TYPE_NAME))]
    async fn update_announcement(
        client: &AtlanClient,
        qualified_name: &str,
        kind: AnnouncementType,
        title: &str,
        message: Option<&str>,
    ) -> Result<Option<Self>> {
        let existing = fetch_minimal::<K>(client, qualified_name).await?;
        let asset = existing
            .trim_to_required()?
            .announcement(kind, title, message.map(str::to_string))
            .build();
        save_update(client, asset).await
    }

    async fn remove_announcement(client: &AtlanClient, qualified_name: &str, name: &str) -> Result<Option<Self>> {
        let asset = Self::updater(qualified_name, name)?.remove_announcement().build();
        save_update(client, asset).await
    }

    async fn replace_terms(
        client: &AtlanClient,
        qualified_name: &str,
        name: &str,
        terms: Vec<AssetRef>,
    ) -> Result<Option<Self>> {
        let asset = Self::updater(qualified_name, name)?.meanings(terms).build();
        save_update(client, asset).await
    }

    async fn append_terms(client: &AtlanClient, qualified_name: &str, terms: Vec<AssetRef>) -> Result<Option<Self>> {
        let existing = fetch_minimal::<K>(client, qualified_name).await?;
        let asset = existing.trim_to_required()?.append_meanings(terms).build();
        save_update(client, asset).await
    }

    async fn remove_terms(client: &AtlanClient, qualified_name: &str, terms: Vec<AssetRef>) -> Result<Option<Self>> {
        let existing = fetch_minimal::<K>(client, qualified_name).await?;
        let asset = existing.trim_to_required()?.remove_meanings(terms).build();
        save_update(client, asset).await
    }

    #[instrument(skip(client, tags), fields(type_name = K::TYPE_NAME, count = tags.len()))]
    async fn append_atlan_tags(client: &AtlanClient, qualified_name: &str, tags: Vec<AtlanTag>) -> Result<Self> {
        if tags.is_empty() {
            return Err(AtlanError::Validation("no Atlan tags to append".to_string()));
        }
        client.add_atlan_tags(K::TYPE_NAME, qualified_name, &tags).await?;
        fetch_minimal::<K>(client, qualified_name).await
    }

    async fn remove_atlan_tag(client: &AtlanClient, qualified_name: &str, tag_name: &str) -> Result<()> {
        client.remove_atlan_tag(K::TYPE_NAME, qualified_name, tag_name).await
    }
}
