// SPDX-License-Identifier: PMPL-1.0-or-later
//! Entity REST endpoints: retrieve, bulk save, delete and Atlan tags.

use std::collections::HashMap;
use std::fmt;

use atlan_model::{is_placeholder_guid, Asset, AssetKind, AtlanTag, Entity};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::client::AtlanClient;
use crate::error::{AtlanError, Result};

/// How hard a delete is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeleteType {
    /// Archive: the asset stays restorable.
    Soft,
    Hard,
    /// Remove the asset and its audit trail.
    Purge,
}

impl DeleteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeleteType::Soft => "SOFT",
            DeleteType::Hard => "HARD",
            DeleteType::Purge => "PURGE",
        }
    }
}

impl fmt::Display for DeleteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An entity together with the entities it refers to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntityWithExtInfo {
    pub entity: Entity,
    pub referred_entities: HashMap<String, Entity>,
}

/// Entities affected by a mutation, by kind of change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MutatedEntities {
    #[serde(rename = "CREATE", skip_serializing_if = "Vec::is_empty")]
    pub created: Vec<Entity>,
    #[serde(rename = "UPDATE", skip_serializing_if = "Vec::is_empty")]
    pub updated: Vec<Entity>,
    #[serde(rename = "PARTIAL_UPDATE", skip_serializing_if = "Vec::is_empty")]
    pub partially_updated: Vec<Entity>,
    #[serde(rename = "DELETE", skip_serializing_if = "Vec::is_empty")]
    pub deleted: Vec<Entity>,
}

/// Outcome of a save or delete.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssetMutationResponse {
    pub mutated_entities: MutatedEntities,
    /// Placeholder GUID sent by the client → GUID assigned by the server.
    pub guid_assignments: HashMap<String, String>,
}

impl AssetMutationResponse {
    /// Entities created or changed, in that order.
    pub fn saved(&self) -> impl Iterator<Item = &Entity> {
        let m = &self.mutated_entities;
        m.created.iter().chain(&m.updated).chain(&m.partially_updated)
    }

    pub fn deleted(&self) -> &[Entity] {
        &self.mutated_entities.deleted
    }

    pub fn is_empty(&self) -> bool {
        let m = &self.mutated_entities;
        m.created.is_empty() && m.updated.is_empty() && m.partially_updated.is_empty() && m.deleted.is_empty()
    }

    /// Server GUID for a placeholder the client sent.
    pub fn assigned_guid(&self, placeholder: &str) -> Option<&str> {
        self.guid_assignments.get(placeholder).map(String::as_str)
    }

    /// Every saved entity of type `K`, cast.
    pub fn assets<K: AssetKind>(&self) -> Vec<Asset<K>> {
        self.saved()
            .filter(|e| e.type_name == K::TYPE_NAME)
            .filter_map(|e| Asset::<K>::try_from_entity(e.clone()).ok())
            .collect()
    }

    /// The saved counterpart of `asset`, matched by GUID (following any
    /// placeholder assignment) or else by qualified name.
    pub fn result_for<K: AssetKind>(&self, asset: &Asset<K>) -> Option<Asset<K>> {
        let guid = asset.guid().map(|g| {
            if is_placeholder_guid(g) {
                self.assigned_guid(g).unwrap_or(g)
            } else {
                g
            }
        });
        let qualified_name = asset.qualified_name();

        let by_guid = guid.and_then(|g| self.saved().find(|e| e.guid.as_deref() == Some(g)));
        let found = by_guid.or_else(|| {
            qualified_name.and_then(|qn| {
                self.saved()
                    .find(|e| e.type_name == K::TYPE_NAME && e.qualified_name() == Some(qn))
            })
        })?;
        Asset::<K>::try_from_entity(found.clone()).ok()
    }
}

#[derive(Serialize)]
struct BulkEntities<'a> {
    entities: &'a [Entity],
}

const ENTITY: [&str; 3] = ["api", "meta", "entity"];

fn entity_path<'a>(rest: &[&'a str]) -> Vec<&'a str> {
    ENTITY.iter().copied().chain(rest.iter().copied()).collect()
}

fn qn_query(qualified_name: &str) -> (&'static str, String) {
    ("attr:qualifiedName", qualified_name.to_string())
}

impl AtlanClient {
    /// Retrieve an entity by GUID.
    ///
    /// With `min_ext_info` the referred entities are left out; with
    /// `ignore_relationships` so are relationship attributes.
    ///
    /// # Errors
    ///
    /// Returns [`AtlanError::NotFound`] if no entity has this GUID.
    #[instrument(skip(self))]
    pub async fn get_entity_by_guid(
        &self,
        guid: &str,
        min_ext_info: bool,
        ignore_relationships: bool,
    ) -> Result<Entity> {
        let url = self.endpoint(&entity_path(&["guid", guid]))?;
        let query = [
            ("minExtInfo", min_ext_info.to_string()),
            ("ignoreRelationships", ignore_relationships.to_string()),
        ];
        let found: EntityWithExtInfo = self.get(url, &query).await?;
        Ok(found.entity)
    }

    /// Retrieve an entity by type and qualified name.
    #[instrument(skip(self))]
    pub async fn get_entity_by_qualified_name(
        &self,
        type_name: &str,
        qualified_name: &str,
        min_ext_info: bool,
        ignore_relationships: bool,
    ) -> Result<Entity> {
        let url = self.endpoint(&entity_path(&["uniqueAttribute", "type", type_name]))?;
        let query = [
            qn_query(qualified_name),
            ("minExtInfo", min_ext_info.to_string()),
            ("ignoreRelationships", ignore_relationships.to_string()),
        ];
        let found: EntityWithExtInfo = self.get(url, &query).await?;
        Ok(found.entity)
    }

    /// Create or update entities in one request.
    ///
    /// Existing Atlan tags and custom metadata on the entities are left as
    /// they are.
    #[instrument(skip(self, entities), fields(count = entities.len()))]
    pub async fn save(&self, entities: &[Entity]) -> Result<AssetMutationResponse> {
        if entities.is_empty() {
            return Err(AtlanError::Validation("nothing to save".to_string()));
        }
        let url = self.endpoint(&entity_path(&["bulk"]))?;
        let query = [
            ("replaceClassifications", "false".to_string()),
            ("replaceBusinessAttributes", "false".to_string()),
            ("overwriteBusinessAttributes", "false".to_string()),
        ];
        let response: AssetMutationResponse =
            self.post(url, &query, &BulkEntities { entities }).await?;
        debug!(
            created = response.mutated_entities.created.len(),
            updated = response.mutated_entities.updated.len(),
            "entities saved"
        );
        Ok(response)
    }

    /// Delete entities by GUID.
    #[instrument(skip(self, guids), fields(count = guids.len()))]
    pub async fn delete_by_guids(
        &self,
        guids: &[&str],
        delete_type: DeleteType,
    ) -> Result<AssetMutationResponse> {
        if guids.is_empty() {
            return Err(AtlanError::Validation("no GUIDs to delete".to_string()));
        }
        let url = self.endpoint(&entity_path(&["bulk"]))?;
        let mut query: Vec<(&str, String)> = guids.iter().map(|g| ("guid", (*g).to_string())).collect();
        query.push(("deleteType", delete_type.as_str().to_string()));
        self.delete(url, &query).await
    }

    /// Attach Atlan tags to the asset with `qualified_name`, keeping the
    /// ones it already has.
    #[instrument(skip(self, tags), fields(count = tags.len()))]
    pub async fn add_atlan_tags(
        &self,
        type_name: &str,
        qualified_name: &str,
        tags: &[AtlanTag],
    ) -> Result<()> {
        let url = self.endpoint(&entity_path(&[
            "uniqueAttribute",
            "type",
            type_name,
            "classifications",
        ]))?;
        self.post_empty(url, &[qn_query(qualified_name)], tags).await
    }

    /// Detach one Atlan tag from the asset with `qualified_name`.
    #[instrument(skip(self))]
    pub async fn remove_atlan_tag(
        &self,
        type_name: &str,
        qualified_name: &str,
        tag_name: &str,
    ) -> Result<()> {
        let url = self.endpoint(&entity_path(&[
            "uniqueAttribute",
            "type",
            type_name,
            "classification",
            tag_name,
        ]))?;
        self.delete_empty(url, &[qn_query(qualified_name)]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlan_model::ApiObject;
    use serde_json::json;

    fn response() -> AssetMutationResponse {
        serde_json::from_value(json!({
            "mutatedEntities": {
                "CREATE": [{
                    "typeName": "APIObject",
                    "guid": "8b5e5c3a-1f0e-4d2b-9a57-2f0d6c1e9b44",
                    "status": "ACTIVE",
                    "attributes": { "qualifiedName": "default/api/1/orders", "name": "orders" }
                }],
                "PARTIAL_UPDATE": [{
                    "typeName": "APIObject",
                    "guid": "0f0e0d0c-0b0a-4909-8807-060504030201",
                    "attributes": { "qualifiedName": "default/api/1/users", "name": "users" }
                }]
            },
            "guidAssignments": { "-42": "8b5e5c3a-1f0e-4d2b-9a57-2f0d6c1e9b44" }
        }))
        .unwrap()
    }

    #[test]
    fn test_result_follows_guid_assignment() {
        let sent = ApiObject::updater("default/api/1/orders", "orders")
            .unwrap()
            .guid("-42")
            .build();
        let saved = response().result_for(&sent).unwrap();
        assert_eq!(saved.guid(), Some("8b5e5c3a-1f0e-4d2b-9a57-2f0d6c1e9b44"));
    }

    #[test]
    fn test_result_falls_back_to_qualified_name() {
        let sent = ApiObject::updater("default/api/1/users", "users").unwrap().build();
        let saved = response().result_for(&sent).unwrap();
        assert_eq!(saved.guid(), Some("0f0e0d0c-0b0a-4909-8807-060504030201"));

        let missing = ApiObject::updater("default/api/1/nope", "nope").unwrap().build();
        assert!(response().result_for(&missing).is_none());
    }

    #[test]
    fn test_assets_of_type() {
        let response = response();
        assert_eq!(response.assets::<atlan_model::assets::api::ApiObjectAttributes>().len(), 2);
        assert!(response.assets::<atlan_model::assets::api::ApiQueryAttributes>().is_empty());
        assert!(!response.is_empty());
        assert!(response.deleted().is_empty());
    }

    #[test]
    fn test_delete_type_wire_names() {
        assert_eq!(serde_json::to_value(DeleteType::Purge).unwrap(), json!("PURGE"));
        assert_eq!(DeleteType::Soft.to_string(), "SOFT");
    }
}
