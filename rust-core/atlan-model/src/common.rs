// SPDX-License-Identifier: PMPL-1.0-or-later
//! Attributes every asset type carries.

use serde::{Deserialize, Serialize};

use crate::enums::{AnnouncementType, CertificateStatus};
use crate::reference::AssetRef;

/// Attributes shared by all asset types.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Description crawled from the source system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Description written by a user in Atlan.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_status: Option<CertificateStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_status_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_updated_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_updated_at: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub announcement_type: Option<AnnouncementType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub announcement_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub announcement_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub announcement_updated_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub announcement_updated_at: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_users: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_groups: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_users: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_groups: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connector_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,

    /// Glossary terms assigned to the asset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meanings: Option<Vec<AssetRef>>,
}
