// SPDX-License-Identifier: PMPL-1.0-or-later
//! Qlik Sense spaces and apps.

use atlan_search::{BooleanField, KeywordField, RelationField};
use serde::{Deserialize, Serialize};

use crate::asset::{Asset, AssetKind};
use crate::assets::nested_in;
use crate::builder::AssetBuilder;
use crate::error::Result;
use crate::reference::AssetRef;

pub type QlikSpace = Asset<QlikSpaceAttributes>;
pub type QlikApp = Asset<QlikAppAttributes>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QlikCommon {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qlik_id: Option<String>,
    #[serde(default, rename = "qlikQRI", skip_serializing_if = "Option::is_none")]
    pub qlik_qri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qlik_space_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qlik_space_qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qlik_app_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qlik_app_qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qlik_owner_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qlik_is_published: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QlikSpaceAttributes {
    #[serde(flatten)]
    pub qlik: QlikCommon,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qlik_space_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qlik_datasets: Option<Vec<AssetRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qlik_apps: Option<Vec<AssetRef>>,
}

impl AssetKind for QlikSpaceAttributes {
    const TYPE_NAME: &'static str = "QlikSpace";
}

impl Asset<QlikSpaceAttributes> {
    pub const QLIK_SPACE_TYPE: KeywordField = KeywordField::new("qlikSpaceType", "qlikSpaceType");
    pub const QLIK_ID: KeywordField = KeywordField::new("qlikId", "qlikId");
    pub const QLIK_APPS: RelationField = RelationField::new("qlikApps");
    pub const QLIK_DATASETS: RelationField = RelationField::new("qlikDatasets");

    pub fn creator(name: &str, connection_qualified_name: &str) -> Result<AssetBuilder<QlikSpaceAttributes>> {
        nested_in(name, connection_qualified_name)
    }
}

impl AssetBuilder<QlikSpaceAttributes> {
    pub fn space_type(self, space_type: impl Into<String>) -> Self {
        let space_type = space_type.into();
        self.with(|a| a.qlik_space_type = Some(space_type))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QlikAppAttributes {
    #[serde(flatten)]
    pub qlik: QlikCommon,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qlik_has_section_access: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qlik_origin_app_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qlik_is_encrypted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qlik_is_direct_query_mode: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qlik_app_static_byte_size: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qlik_space: Option<AssetRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qlik_sheets: Option<Vec<AssetRef>>,
}

impl AssetKind for QlikAppAttributes {
    const TYPE_NAME: &'static str = "QlikApp";
}

impl Asset<QlikAppAttributes> {
    pub const QLIK_HAS_SECTION_ACCESS: BooleanField =
        BooleanField::new("qlikHasSectionAccess", "qlikHasSectionAccess");
    pub const QLIK_IS_DIRECT_QUERY_MODE: BooleanField =
        BooleanField::new("qlikIsDirectQueryMode", "qlikIsDirectQueryMode");
    pub const QLIK_SPACE_QUALIFIED_NAME: KeywordField =
        KeywordField::new("qlikSpaceQualifiedName", "qlikSpaceQualifiedName");
    pub const QLIK_SPACE: RelationField = RelationField::new("qlikSpace");
    pub const QLIK_SHEETS: RelationField = RelationField::new("qlikSheets");

    pub fn creator(name: &str, space_qualified_name: &str) -> Result<AssetBuilder<QlikAppAttributes>> {
        let space = space_qualified_name.to_string();
        Ok(nested_in::<QlikAppAttributes>(name, space_qualified_name)?.with(|a| {
            a.qlik_space = Some(QlikSpace::ref_by_qualified_name(space.clone()));
            a.qlik.qlik_space_qualified_name = Some(space);
        }))
    }
}
