// SPDX-License-Identifier: PMPL-1.0-or-later
//! Connections: the root of every crawled or API-created asset tree.

use atlan_search::{BooleanField, KeywordField, NumericField, TextField};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::asset::{Asset, AssetKind};
use crate::builder::AssetBuilder;
use crate::error::{require, ModelError, Result};

pub type Connection = Asset<ConnectionAttributes>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_query: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_query_preview: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_timeout: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_credential_guid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_roles: Option<Vec<String>>,
}

impl AssetKind for ConnectionAttributes {
    const TYPE_NAME: &'static str = "Connection";
}

impl Asset<ConnectionAttributes> {
    pub const CATEGORY: KeywordField = KeywordField::new("category", "category");
    pub const HOST: KeywordField = KeywordField::new("host", "host");
    pub const PORT: NumericField = NumericField::new("port", "port");
    pub const ALLOW_QUERY: BooleanField = BooleanField::new("allowQuery", "allowQuery");
    pub const SOURCE_LOGO: TextField = TextField::new("sourceLogo", "sourceLogo");

    /// New connection for `connector`. At least one admin user or group is
    /// required; the qualified name is stamped with the current epoch second.
    pub fn creator<U, G>(
        name: &str,
        connector: &str,
        admin_users: U,
        admin_groups: G,
    ) -> Result<AssetBuilder<ConnectionAttributes>>
    where
        U: IntoIterator,
        U::Item: Into<String>,
        G: IntoIterator,
        G::Item: Into<String>,
    {
        require("name", name)?;
        require("connector", connector)?;
        let users: Vec<String> = admin_users.into_iter().map(Into::into).collect();
        let groups: Vec<String> = admin_groups.into_iter().map(Into::into).collect();
        if users.is_empty() && groups.is_empty() {
            return Err(ModelError::missing("at least one admin user or group"));
        }

        let qualified_name = format!("default/{connector}/{}", Utc::now().timestamp());
        let mut builder = Self::builder()
            .name(name)
            .qualified_name(qualified_name)
            .connector_name(connector);
        if !users.is_empty() {
            builder = builder.admin_users(users);
        }
        if !groups.is_empty() {
            builder = builder.admin_groups(groups);
        }
        Ok(builder)
    }
}

impl AssetBuilder<ConnectionAttributes> {
    pub fn category(self, category: impl Into<String>) -> Self {
        let category = category.into();
        self.with(|a| a.category = Some(category))
    }

    pub fn host(self, host: impl Into<String>, port: Option<i64>) -> Self {
        let host = host.into();
        self.with(|a| {
            a.host = Some(host);
            a.port = port;
        })
    }

    pub fn allow_query(self, allow: bool) -> Self {
        self.with(|a| {
            a.allow_query = Some(allow);
            a.allow_query_preview = Some(allow);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::{connection_qualified_name, connector_name};

    #[test]
    fn test_creator_stamps_qualified_name() {
        let conn = Connection::creator("petstore", "api", ["jsmith"], Vec::<String>::new())
            .unwrap()
            .category("API")
            .build();
        let qn = conn.qualified_name().unwrap().to_string();
        assert!(qn.starts_with("default/api/"));
        let epoch: i64 = qn.rsplit('/').next().unwrap().parse().unwrap();
        assert!(epoch > 1_600_000_000);
        assert_eq!(connection_qualified_name(&qn).as_deref(), Some(qn.as_str()));
        assert_eq!(connector_name(&qn).unwrap(), "api");
        assert_eq!(conn.common.admin_users, Some(vec!["jsmith".to_string()]));
        assert!(conn.common.admin_groups.is_none());
    }

    #[test]
    fn test_creator_requires_an_admin() {
        let err = Connection::creator("petstore", "api", Vec::<String>::new(), Vec::<String>::new())
            .unwrap_err();
        assert!(matches!(err, ModelError::MissingRequired(_)));
        assert!(Connection::creator("petstore", "api", Vec::<String>::new(), ["admins"]).is_ok());
    }
}
