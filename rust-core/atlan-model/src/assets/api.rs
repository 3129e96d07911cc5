// SPDX-License-Identifier: PMPL-1.0-or-later
//! REST API assets: specs, paths, objects, queries and their fields.
//!
//! An API connection holds specs (each with its paths) and objects/queries
//! (each with its fields). Fields are nested under either an object or a
//! query, and their qualified names extend the parent's.

use std::collections::BTreeMap;

use atlan_search::{BooleanField, KeywordField, KeywordTextField, NumericField, RelationField};
use serde::{Deserialize, Serialize};

use crate::asset::{Asset, AssetKind};
use crate::assets::nested_in;
use crate::builder::AssetBuilder;
use crate::error::{ModelError, Result};
use crate::reference::AssetRef;

pub type ApiSpec = Asset<ApiSpecAttributes>;
pub type ApiPath = Asset<ApiPathAttributes>;
pub type ApiObject = Asset<ApiObjectAttributes>;
pub type ApiQuery = Asset<ApiQueryAttributes>;
pub type ApiField = Asset<ApiFieldAttributes>;

/// Attributes common to all API assets.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCommon {
    #[serde(default, rename = "apiSpecName", skip_serializing_if = "Option::is_none")]
    pub spec_name: Option<String>,
    #[serde(default, rename = "apiSpecQualifiedName", skip_serializing_if = "Option::is_none")]
    pub spec_qualified_name: Option<String>,
    #[serde(default, rename = "apiSpecType", skip_serializing_if = "Option::is_none")]
    pub spec_type: Option<String>,
    #[serde(default, rename = "apiSpecVersion", skip_serializing_if = "Option::is_none")]
    pub spec_version: Option<String>,
    #[serde(default, rename = "apiIsAuthOptional", skip_serializing_if = "Option::is_none")]
    pub is_auth_optional: Option<bool>,
    #[serde(default, rename = "apiExternalDocs", skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<BTreeMap<String, String>>,
}

// ---------------------------------------------------------------------------
// APISpec
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSpecAttributes {
    #[serde(flatten)]
    pub api: ApiCommon,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_spec_terms_of_service_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_spec_contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_spec_contact_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_spec_license_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_spec_license_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_spec_service_alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_paths: Option<Vec<AssetRef>>,
}

impl AssetKind for ApiSpecAttributes {
    const TYPE_NAME: &'static str = "APISpec";
}

impl Asset<ApiSpecAttributes> {
    pub const API_SPEC_CONTACT_EMAIL: KeywordField =
        KeywordField::new("apiSpecContactEmail", "apiSpecContactEmail");
    pub const API_SPEC_SERVICE_ALIAS: KeywordTextField = KeywordTextField::new(
        "apiSpecServiceAlias",
        "apiSpecServiceAlias",
        "apiSpecServiceAlias.text",
    );
    pub const API_PATHS: RelationField = RelationField::new("apiPaths");

    /// New spec directly inside a connection.
    pub fn creator(name: &str, connection_qualified_name: &str) -> Result<AssetBuilder<ApiSpecAttributes>> {
        nested_in(name, connection_qualified_name)
    }
}

impl AssetBuilder<ApiSpecAttributes> {
    pub fn spec_version(self, version: impl Into<String>) -> Self {
        let version = version.into();
        self.with(|a| a.api.spec_version = Some(version))
    }

    pub fn contact_email(self, email: impl Into<String>) -> Self {
        let email = email.into();
        self.with(|a| a.api_spec_contact_email = Some(email))
    }
}

// ---------------------------------------------------------------------------
// APIPath
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPathAttributes {
    #[serde(flatten)]
    pub api: ApiCommon,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_path_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_path_raw_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_path_is_templated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_path_available_operations: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_path_available_response_codes: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_path_is_ingress_exposed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_spec: Option<AssetRef>,
}

impl AssetKind for ApiPathAttributes {
    const TYPE_NAME: &'static str = "APIPath";
}

impl Asset<ApiPathAttributes> {
    pub const API_PATH_RAW_URI: KeywordTextField =
        KeywordTextField::new("apiPathRawURI", "apiPathRawURI", "apiPathRawURI.text");
    pub const API_PATH_IS_TEMPLATED: BooleanField =
        BooleanField::new("apiPathIsTemplated", "apiPathIsTemplated");
    pub const API_PATH_AVAILABLE_OPERATIONS: KeywordField =
        KeywordField::new("apiPathAvailableOperations", "apiPathAvailableOperations");
    pub const API_SPEC: RelationField = RelationField::new("apiSpec");

    /// New path within a spec. The path URI becomes the name and is appended
    /// verbatim to the spec's qualified name.
    pub fn creator(path_uri: &str, spec_qualified_name: &str) -> Result<AssetBuilder<ApiPathAttributes>> {
        let spec = spec_qualified_name.to_string();
        let raw = path_uri.to_string();

        Ok(nested_in::<ApiPathAttributes>(path_uri, spec_qualified_name)?
            .qualified_name(format!("{spec_qualified_name}{path_uri}"))
            .with(|a| {
                a.api_path_raw_uri = Some(raw);
                a.api_path_is_templated = Some(path_uri.contains('{'));
                a.api.spec_qualified_name = Some(spec.clone());
                a.api_spec = Some(ApiSpec::ref_by_qualified_name(spec));
            }))
    }
}

impl AssetBuilder<ApiPathAttributes> {
    pub fn summary(self, summary: impl Into<String>) -> Self {
        let summary = summary.into();
        self.with(|a| a.api_path_summary = Some(summary))
    }

    pub fn available_operations<I, S>(self, operations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let operations: Vec<String> = operations.into_iter().map(Into::into).collect();
        self.with(|a| a.api_path_available_operations = Some(operations))
    }
}

// ---------------------------------------------------------------------------
// APIObject
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiObjectAttributes {
    #[serde(flatten)]
    pub api: ApiCommon,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_field_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_fields: Option<Vec<AssetRef>>,
}

impl AssetKind for ApiObjectAttributes {
    const TYPE_NAME: &'static str = "APIObject";
}

impl Asset<ApiObjectAttributes> {
    pub const API_FIELD_COUNT: NumericField = NumericField::new("apiFieldCount", "apiFieldCount");
    pub const API_FIELDS: RelationField = RelationField::new("apiFields");

    pub fn creator(name: &str, connection_qualified_name: &str) -> Result<AssetBuilder<ApiObjectAttributes>> {
        nested_in(name, connection_qualified_name)
    }
}

impl AssetBuilder<ApiObjectAttributes> {
    pub fn api_field_count(self, count: i64) -> Self {
        self.with(|a| a.api_field_count = Some(count))
    }
}

// ---------------------------------------------------------------------------
// APIQuery
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiQueryAttributes {
    #[serde(flatten)]
    pub api: ApiCommon,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_input_field_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_query_output_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_query_output_type_secondary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_is_object_reference: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_object_qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_fields: Option<Vec<AssetRef>>,
}

impl AssetKind for ApiQueryAttributes {
    const TYPE_NAME: &'static str = "APIQuery";
}

impl Asset<ApiQueryAttributes> {
    pub const API_INPUT_FIELD_COUNT: NumericField =
        NumericField::new("apiInputFieldCount", "apiInputFieldCount");
    pub const API_QUERY_OUTPUT_TYPE: KeywordField =
        KeywordField::new("apiQueryOutputType", "apiQueryOutputType");
    pub const API_IS_OBJECT_REFERENCE: BooleanField =
        BooleanField::new("apiIsObjectReference", "apiIsObjectReference");
    pub const API_FIELDS: RelationField = RelationField::new("apiFields");

    pub fn creator(name: &str, connection_qualified_name: &str) -> Result<AssetBuilder<ApiQueryAttributes>> {
        nested_in(name, connection_qualified_name)
    }
}

impl AssetBuilder<ApiQueryAttributes> {
    pub fn input_field_count(self, count: i64) -> Self {
        self.with(|a| a.api_input_field_count = Some(count))
    }

    /// Output type of the query; when it refers to an API object, pass that
    /// object's qualified name.
    pub fn output_type(self, output_type: impl Into<String>, object_qualified_name: Option<String>) -> Self {
        let output_type = output_type.into();
        self.with(|a| {
            a.api_query_output_type = Some(output_type);
            a.api_is_object_reference = Some(object_qualified_name.is_some());
            a.api_object_qualified_name = object_qualified_name;
        })
    }
}

// ---------------------------------------------------------------------------
// APIField
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiFieldAttributes {
    #[serde(flatten)]
    pub api: ApiCommon,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_field_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_field_type_secondary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_is_object_reference: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_object_qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_query_param_type_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_object: Option<AssetRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_query: Option<AssetRef>,
}

impl AssetKind for ApiFieldAttributes {
    const TYPE_NAME: &'static str = "APIField";
}

/// What an API field belongs to, by qualified name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiFieldParent<'a> {
    Object(&'a str),
    Query(&'a str),
}

impl ApiFieldParent<'_> {
    pub fn qualified_name(&self) -> &str {
        match self {
            ApiFieldParent::Object(qn) | ApiFieldParent::Query(qn) => qn,
        }
    }
}

impl Asset<ApiFieldAttributes> {
    pub const API_FIELD_TYPE: KeywordField = KeywordField::new("apiFieldType", "apiFieldType");
    pub const API_FIELD_TYPE_SECONDARY: KeywordField =
        KeywordField::new("apiFieldTypeSecondary", "apiFieldTypeSecondary");
    pub const API_IS_OBJECT_REFERENCE: BooleanField =
        BooleanField::new("apiIsObjectReference", "apiIsObjectReference");
    pub const API_OBJECT_QUALIFIED_NAME: KeywordField =
        KeywordField::new("apiObjectQualifiedName", "apiObjectQualifiedName");
    pub const API_OBJECT: RelationField = RelationField::new("apiObject");
    pub const API_QUERY: RelationField = RelationField::new("apiQuery");

    /// New field under an API object or query.
    pub fn creator(name: &str, parent: ApiFieldParent<'_>) -> Result<AssetBuilder<ApiFieldAttributes>> {
        let builder = nested_in::<ApiFieldAttributes>(name, parent.qualified_name())?;
        Ok(builder.with(|a| match parent {
            ApiFieldParent::Object(qn) => a.api_object = Some(ApiObject::ref_by_qualified_name(qn)),
            ApiFieldParent::Query(qn) => a.api_query = Some(ApiQuery::ref_by_qualified_name(qn)),
        }))
    }

    /// New field under an existing object, referenced by GUID when known.
    pub fn creator_for_object(name: &str, object: &ApiObject) -> Result<AssetBuilder<ApiFieldAttributes>> {
        let parent_qn = object
            .qualified_name()
            .ok_or_else(|| ModelError::missing("apiObject qualifiedName"))?;
        let parent_ref = object.to_ref()?;
        let builder = nested_in::<ApiFieldAttributes>(name, parent_qn)?;
        Ok(builder.with(|a| a.api_object = Some(parent_ref)))
    }
}

impl AssetBuilder<ApiFieldAttributes> {
    pub fn field_type(self, field_type: impl Into<String>) -> Self {
        let field_type = field_type.into();
        self.with(|a| a.api_field_type = Some(field_type))
    }

    /// Mark the field as holding another API object.
    pub fn object_reference(self, object_qualified_name: impl Into<String>) -> Self {
        let qn = object_qualified_name.into();
        self.with(|a| {
            a.api_is_object_reference = Some(true);
            a.api_object_qualified_name = Some(qn);
        })
    }
}
