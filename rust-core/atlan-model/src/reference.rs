// SPDX-License-Identifier: PMPL-1.0-or-later
//! Lightweight references between assets.

use serde::{Deserialize, Serialize};

use crate::enums::EntityStatus;

/// Server-side unique attributes of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniqueAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualified_name: Option<String>,
}

/// Pointer to another asset, by GUID or by qualified name.
///
/// Relationship attributes are written with these. When the server returns a
/// relationship it adds display and status fields, which are read but never
/// sent back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRef {
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_attributes: Option<UniqueAttributes>,
    #[serde(default, skip_serializing)]
    pub display_text: Option<String>,
    #[serde(default, skip_serializing)]
    pub relationship_status: Option<EntityStatus>,
}

impl AssetRef {
    pub fn by_guid(type_name: impl Into<String>, guid: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            guid: Some(guid.into()),
            unique_attributes: None,
            display_text: None,
            relationship_status: None,
        }
    }

    pub fn by_qualified_name(type_name: impl Into<String>, qualified_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            guid: None,
            unique_attributes: Some(UniqueAttributes {
                qualified_name: Some(qualified_name.into()),
            }),
            display_text: None,
            relationship_status: None,
        }
    }

    pub fn qualified_name(&self) -> Option<&str> {
        self.unique_attributes
            .as_ref()
            .and_then(|u| u.qualified_name.as_deref())
    }

    /// True for relationships the server reports as archived.
    pub fn is_archived(&self) -> bool {
        self.relationship_status == Some(EntityStatus::Deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ref_by_qualified_name_shape() {
        let r = AssetRef::by_qualified_name("APIObject", "default/api/1/orders");
        assert_eq!(
            serde_json::to_value(&r).unwrap(),
            json!({ "typeName": "APIObject", "uniqueAttributes": { "qualifiedName": "default/api/1/orders" } })
        );
    }

    #[test]
    fn test_read_only_fields_not_echoed() {
        let read: AssetRef = serde_json::from_value(json!({
            "typeName": "AtlasGlossaryTerm",
            "guid": "g-1",
            "displayText": "Revenue",
            "relationshipStatus": "DELETED",
            "relationshipGuid": "r-1"
        }))
        .unwrap();
        assert!(read.is_archived());
        assert_eq!(read.display_text.as_deref(), Some("Revenue"));
        assert_eq!(
            serde_json::to_value(&read).unwrap(),
            json!({ "typeName": "AtlasGlossaryTerm", "guid": "g-1" })
        );
    }
}
