// SPDX-License-Identifier: PMPL-1.0-or-later
//! The untyped wire form of a catalog entity.
//!
//! Every REST endpoint of the catalog speaks in terms of [`Entity`]: a type
//! name, a GUID, audit fields and free-form attribute maps. Typed assets
//! ([`crate::Asset`]) convert to and from this shape.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::enums::EntityStatus;
use crate::reference::UniqueAttributes;

/// An Atlan tag (classification) attached to an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtlanTag {
    /// Tag name. The catalog also accepts its internal hashed name here.
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_guid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_status: Option<EntityStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub propagate: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove_propagations_on_entity_delete: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restrict_propagation_through_lineage: Option<bool>,
}

impl AtlanTag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            type_name: name.into(),
            entity_guid: None,
            entity_status: None,
            propagate: None,
            remove_propagations_on_entity_delete: None,
            restrict_propagation_through_lineage: None,
        }
    }

    /// Tag with explicit propagation settings.
    pub fn with_propagation(
        name: impl Into<String>,
        propagate: bool,
        remove_propagations_on_delete: bool,
        restrict_lineage_propagation: bool,
    ) -> Self {
        Self {
            propagate: Some(propagate),
            remove_propagations_on_entity_delete: Some(remove_propagations_on_delete),
            restrict_propagation_through_lineage: Some(restrict_lineage_propagation),
            ..Self::new(name)
        }
    }
}

/// A catalog entity as sent to and received from the REST API.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Entity {
    pub type_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EntityStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    /// Epoch milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time: Option<i64>,
    /// Epoch milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_time: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub classifications: Vec<AtlanTag>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub meaning_names: Vec<String>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub attributes: Map<String, Value>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub relationship_attributes: Map<String, Value>,
    /// Relationships to add without replacing existing ones.
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub append_relationship_attributes: Map<String, Value>,
    /// Relationships to remove without replacing the rest.
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub remove_relationship_attributes: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_attributes: Option<UniqueAttributes>,
}

impl Entity {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            ..Default::default()
        }
    }

    /// Look up an attribute, falling back to relationship attributes.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes
            .get(name)
            .filter(|v| !v.is_null())
            .or_else(|| self.relationship_attributes.get(name))
    }

    pub fn qualified_name(&self) -> Option<&str> {
        self.attribute("qualifiedName")
            .and_then(Value::as_str)
            .or_else(|| {
                self.unique_attributes
                    .as_ref()
                    .and_then(|u| u.qualified_name.as_deref())
            })
    }

    pub fn name(&self) -> Option<&str> {
        self.attribute("name").and_then(Value::as_str)
    }

    /// Entities the server reports without a status are treated as active.
    pub fn is_active(&self) -> bool {
        matches!(self.status, None | Some(EntityStatus::Active))
    }
}
