// SPDX-License-Identifier: PMPL-1.0-or-later
//! Generic typed asset.
//!
//! [`Asset<K>`] pairs the attributes every asset has with the attribute set
//! `K` of one concrete asset type. Each concrete type (`ApiObject`,
//! `QlikSpace`, ...) is an alias of `Asset<K>` for its own `K`, so all of
//! the reference, cast and update plumbing lives here once.

use std::collections::BTreeSet;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::builder::AssetBuilder;
use crate::common::CommonAttributes;
use crate::entity::{AtlanTag, Entity};
use crate::enums::EntityStatus;
use crate::error::{require, ModelError, Result};
use crate::identity::{is_placeholder_guid, placeholder_guid};
use crate::reference::{AssetRef, UniqueAttributes};

/// Type-specific attribute set of one asset type.
pub trait AssetKind:
    Serialize + DeserializeOwned + Default + Clone + fmt::Debug + PartialEq + Send + Sync + 'static
{
    /// Catalog type name, e.g. `APIObject`.
    const TYPE_NAME: &'static str;
}

/// Entity-level fields that sit outside the attribute map.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EntityHeader {
    pub guid: Option<String>,
    pub status: Option<EntityStatus>,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    pub create_time: Option<i64>,
    pub update_time: Option<i64>,
    pub atlan_tags: Vec<AtlanTag>,
    pub meaning_names: Vec<String>,
}

/// A typed catalog asset.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Asset<K: AssetKind> {
    pub header: EntityHeader,
    pub common: CommonAttributes,
    pub attributes: K,
    /// Attributes to send as explicit `null` so the server clears them.
    pub(crate) null_fields: BTreeSet<String>,
    pub(crate) append_relationships: Map<String, Value>,
    pub(crate) remove_relationships: Map<String, Value>,
}

impl<K: AssetKind> Asset<K> {
    pub const TYPE_NAME: &'static str = K::TYPE_NAME;

    /// Start a new asset with a placeholder GUID.
    pub fn builder() -> AssetBuilder<K> {
        let mut asset = Self::default();
        asset.header.guid = Some(placeholder_guid());
        AssetBuilder::from_asset(asset)
    }

    /// Minimal asset for modifying an existing one, identified by its
    /// qualified name.
    pub fn updater(qualified_name: &str, name: &str) -> Result<AssetBuilder<K>> {
        require("qualifiedName", qualified_name)?;
        require("name", name)?;
        Ok(Self::builder().qualified_name(qualified_name).name(name))
    }

    pub fn ref_by_guid(guid: impl Into<String>) -> AssetRef {
        AssetRef::by_guid(K::TYPE_NAME, guid)
    }

    pub fn ref_by_qualified_name(qualified_name: impl Into<String>) -> AssetRef {
        AssetRef::by_qualified_name(K::TYPE_NAME, qualified_name)
    }

    /// Reference to this asset: by its real GUID when known, otherwise by
    /// qualified name.
    pub fn to_ref(&self) -> Result<AssetRef> {
        match (self.guid(), self.qualified_name()) {
            (Some(guid), _) if !is_placeholder_guid(guid) => Ok(Self::ref_by_guid(guid)),
            (_, Some(qn)) => Ok(Self::ref_by_qualified_name(qn)),
            (Some(guid), None) => Ok(Self::ref_by_guid(guid)),
            (None, None) => Err(ModelError::missing("guid or qualifiedName")),
        }
    }

    /// An updater carrying only this asset's qualified name and name.
    pub fn trim_to_required(&self) -> Result<AssetBuilder<K>> {
        let qualified_name = self
            .qualified_name()
            .ok_or_else(|| ModelError::missing("qualifiedName"))?;
        let name = self.name().ok_or_else(|| ModelError::missing("name"))?;
        Self::updater(qualified_name, name)
    }

    /// Continue building from this asset.
    pub fn into_builder(self) -> AssetBuilder<K> {
        AssetBuilder::from_asset(self)
    }

    pub fn type_name(&self) -> &'static str {
        K::TYPE_NAME
    }

    pub fn guid(&self) -> Option<&str> {
        self.header.guid.as_deref()
    }

    pub fn qualified_name(&self) -> Option<&str> {
        self.common.qualified_name.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.common.name.as_deref()
    }

    pub fn status(&self) -> Option<EntityStatus> {
        self.header.status
    }

    pub fn null_fields(&self) -> impl Iterator<Item = &str> {
        self.null_fields.iter().map(String::as_str)
    }

    /// Serialise to the wire form.
    pub fn to_entity(&self) -> Result<Entity> {
        let mut attributes = to_object(&self.common)?;
        attributes.extend(to_object(&self.attributes)?);
        for field in &self.null_fields {
            attributes.entry(field.clone()).or_insert(Value::Null);
        }

        Ok(Entity {
            type_name: K::TYPE_NAME.to_string(),
            guid: self.header.guid.clone(),
            status: self.header.status,
            created_by: self.header.created_by.clone(),
            updated_by: self.header.updated_by.clone(),
            create_time: self.header.create_time,
            update_time: self.header.update_time,
            classifications: self.header.atlan_tags.clone(),
            meaning_names: self.header.meaning_names.clone(),
            attributes,
            relationship_attributes: Map::new(),
            append_relationship_attributes: self.append_relationships.clone(),
            remove_relationship_attributes: self.remove_relationships.clone(),
            unique_attributes: None,
        })
    }

    /// Cast a wire entity to this type. Fails when the entity is of another
    /// type.
    pub fn try_from_entity(entity: Entity) -> Result<Self> {
        if entity.type_name != K::TYPE_NAME {
            debug!(
                expected = K::TYPE_NAME,
                actual = %entity.type_name,
                "entity type does not match requested asset type"
            );
            return Err(ModelError::TypeMismatch {
                expected: K::TYPE_NAME.to_string(),
                actual: entity.type_name,
            });
        }

        let Entity {
            guid,
            status,
            created_by,
            updated_by,
            create_time,
            update_time,
            classifications,
            meaning_names,
            mut attributes,
            relationship_attributes,
            unique_attributes,
            ..
        } = entity;

        for (key, value) in relationship_attributes {
            let absent = attributes.get(&key).map_or(true, Value::is_null);
            if absent {
                attributes.insert(key, value);
            }
        }
        if !attributes.contains_key("qualifiedName") {
            if let Some(UniqueAttributes {
                qualified_name: Some(qn),
            }) = unique_attributes
            {
                attributes.insert("qualifiedName".to_string(), Value::String(qn));
            }
        }

        let merged = Value::Object(attributes);
        let common: CommonAttributes = serde_json::from_value(merged.clone())?;
        let typed: K = serde_json::from_value(merged)?;

        Ok(Self {
            header: EntityHeader {
                guid,
                status,
                created_by,
                updated_by,
                create_time,
                update_time,
                atlan_tags: classifications,
                meaning_names,
            },
            common,
            attributes: typed,
            null_fields: BTreeSet::new(),
            append_relationships: Map::new(),
            remove_relationships: Map::new(),
        })
    }
}

impl<K: AssetKind> TryFrom<Entity> for Asset<K> {
    type Error = ModelError;

    fn try_from(entity: Entity) -> Result<Self> {
        Self::try_from_entity(entity)
    }
}

fn to_object<T: Serialize>(value: &T) -> Result<Map<String, Value>> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(ModelError::Serialization(serde::ser::Error::custom(format!(
            "attributes must serialise to an object, got {other}"
        )))),
    }
}
