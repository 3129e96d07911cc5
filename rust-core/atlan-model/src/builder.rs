// SPDX-License-Identifier: PMPL-1.0-or-later
//! Builder for typed assets.

use serde_json::Value;

use crate::asset::{Asset, AssetKind};
use crate::entity::AtlanTag;
use crate::enums::{AnnouncementType, CertificateStatus, EntityStatus};
use crate::reference::AssetRef;

const MEANINGS: &str = "meanings";

/// Fluent builder over an [`Asset<K>`].
///
/// Setters for attributes shared by every asset live here; type-specific
/// setters are added per asset type, and anything else can be reached with
/// [`with`](Self::with).
#[derive(Debug, Clone)]
pub struct AssetBuilder<K: AssetKind> {
    asset: Asset<K>,
}

impl<K: AssetKind> AssetBuilder<K> {
    pub(crate) fn from_asset(asset: Asset<K>) -> Self {
        Self { asset }
    }

    pub fn guid(mut self, guid: impl Into<String>) -> Self {
        self.asset.header.guid = Some(guid.into());
        self
    }

    pub fn status(mut self, status: EntityStatus) -> Self {
        self.asset.header.status = Some(status);
        self
    }

    pub fn qualified_name(mut self, qualified_name: impl Into<String>) -> Self {
        self.asset.common.qualified_name = Some(qualified_name.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.asset.common.name = Some(name.into());
        self
    }

    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.asset.common.display_name = Some(display_name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.asset.common.description = Some(description.into());
        self
    }

    pub fn user_description(mut self, description: impl Into<String>) -> Self {
        self.asset.common.user_description = Some(description.into());
        self
    }

    pub fn certificate(mut self, status: CertificateStatus, message: Option<String>) -> Self {
        self.asset.common.certificate_status = Some(status);
        self.asset.common.certificate_status_message = message;
        self
    }

    pub fn announcement(
        mut self,
        kind: AnnouncementType,
        title: impl Into<String>,
        message: Option<String>,
    ) -> Self {
        self.asset.common.announcement_type = Some(kind);
        self.asset.common.announcement_title = Some(title.into());
        self.asset.common.announcement_message = message;
        self
    }

    pub fn owner_users<I, S>(mut self, users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.asset.common.owner_users = Some(users.into_iter().map(Into::into).collect());
        self
    }

    pub fn owner_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.asset.common.owner_groups = Some(groups.into_iter().map(Into::into).collect());
        self
    }

    pub fn admin_users<I, S>(mut self, users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.asset.common.admin_users = Some(users.into_iter().map(Into::into).collect());
        self
    }

    pub fn admin_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.asset.common.admin_groups = Some(groups.into_iter().map(Into::into).collect());
        self
    }

    pub fn connection_qualified_name(mut self, qualified_name: impl Into<String>) -> Self {
        self.asset.common.connection_qualified_name = Some(qualified_name.into());
        self
    }

    pub fn connector_name(mut self, connector: impl Into<String>) -> Self {
        self.asset.common.connector_name = Some(connector.into());
        self
    }

    pub fn source_url(mut self, url: impl Into<String>) -> Self {
        self.asset.common.source_url = Some(url.into());
        self
    }

    pub fn atlan_tag(mut self, tag: AtlanTag) -> Self {
        self.asset.header.atlan_tags.push(tag);
        self
    }

    /// Replace all assigned terms. An empty list clears them.
    pub fn meanings(mut self, terms: impl IntoIterator<Item = AssetRef>) -> Self {
        let terms: Vec<AssetRef> = terms.into_iter().collect();
        if terms.is_empty() {
            self.asset.common.meanings = None;
            self.asset.null_fields.insert(MEANINGS.to_string());
        } else {
            self.asset.common.meanings = Some(terms);
        }
        self
    }

    /// Add terms, keeping any already assigned on the server.
    pub fn append_meanings(mut self, terms: impl IntoIterator<Item = AssetRef>) -> Self {
        push_relationships(&mut self.asset.append_relationships, MEANINGS, terms);
        self
    }

    /// Detach terms, keeping the others assigned on the server.
    pub fn remove_meanings(mut self, terms: impl IntoIterator<Item = AssetRef>) -> Self {
        push_relationships(&mut self.asset.remove_relationships, MEANINGS, terms);
        self
    }

    /// Send `field` as an explicit null, clearing it on the server.
    pub fn null_field(mut self, field: impl Into<String>) -> Self {
        self.asset.null_fields.insert(field.into());
        self
    }

    pub fn remove_description(self) -> Self {
        self.null_field("description")
    }

    pub fn remove_user_description(self) -> Self {
        self.null_field("userDescription")
    }

    pub fn remove_owners(self) -> Self {
        self.null_field("ownerUsers").null_field("ownerGroups")
    }

    pub fn remove_certificate(self) -> Self {
        self.null_field("certificateStatus")
            .null_field("certificateStatusMessage")
    }

    pub fn remove_announcement(self) -> Self {
        self.null_field("announcementType")
            .null_field("announcementTitle")
            .null_field("announcementMessage")
    }

    /// Edit type-specific attributes in place.
    pub fn with(mut self, edit: impl FnOnce(&mut K)) -> Self {
        edit(&mut self.asset.attributes);
        self
    }

    pub fn build(self) -> Asset<K> {
        self.asset
    }
}

fn push_relationships(
    target: &mut serde_json::Map<String, Value>,
    key: &str,
    refs: impl IntoIterator<Item = AssetRef>,
) {
    let entry = target
        .entry(key.to_string())
        .or_insert_with(|| Value::Array(Vec::new()));
    if let Value::Array(items) = entry {
        for r in refs {
            // AssetRef always serialises to an object.
            if let Ok(value) = serde_json::to_value(&r) {
                items.push(value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::assets::api::ApiObject;
    use crate::assets::glossary::GlossaryTerm;
    use serde_json::{json, Value};

    #[test]
    fn test_empty_meanings_clear_terms() {
        let object = ApiObject::updater("default/api/1/orders", "orders")
            .unwrap()
            .meanings(Vec::new())
            .build();
        let entity = object.to_entity().unwrap();
        assert_eq!(entity.attributes.get("meanings"), Some(&Value::Null));
    }

    #[test]
    fn test_append_and_remove_meanings() {
        let object = ApiObject::updater("default/api/1/orders", "orders")
            .unwrap()
            .append_meanings([GlossaryTerm::ref_by_guid("t-1")])
            .append_meanings([GlossaryTerm::ref_by_guid("t-2")])
            .remove_meanings([GlossaryTerm::ref_by_guid("t-3")])
            .build();
        let entity = object.to_entity().unwrap();
        assert_eq!(
            entity.append_relationship_attributes["meanings"],
            json!([
                { "typeName": "AtlasGlossaryTerm", "guid": "t-1" },
                { "typeName": "AtlasGlossaryTerm", "guid": "t-2" }
            ])
        );
        assert_eq!(
            entity.remove_relationship_attributes["meanings"],
            json!([{ "typeName": "AtlasGlossaryTerm", "guid": "t-3" }])
        );
        assert!(entity.attributes.get("meanings").is_none());
    }
}
