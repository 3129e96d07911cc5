// SPDX-License-Identifier: PMPL-1.0-or-later
//! Concrete asset types.
//!
//! Each submodule defines the attribute sets for one family of assets, the
//! type aliases users work with (`ApiObject`, `QlikSpace`, ...), their search
//! fields and, where the catalog allows assets of that type to be created
//! client-side, a `creator`.

pub mod api;
pub mod business_policy;
pub mod connection;
pub mod fabric;
pub mod glossary;
pub mod qlik;
pub mod workflow;

use crate::asset::{Asset, AssetKind};
use crate::builder::AssetBuilder;
use crate::error::{require, ModelError, Result};
use crate::identity::{child_qualified_name, connection_qualified_name, connector_name};

/// Builder for an asset named `name` directly under `parent_qualified_name`,
/// with connection and connector derived from the parent.
pub(crate) fn nested_in<K: AssetKind>(
    name: &str,
    parent_qualified_name: &str,
) -> Result<AssetBuilder<K>> {
    require("name", name)?;
    require("parent qualifiedName", parent_qualified_name)?;
    let connection = connection_qualified_name(parent_qualified_name).ok_or_else(|| {
        ModelError::InvalidQualifiedName {
            qualified_name: parent_qualified_name.to_string(),
            reason: "not inside a connection".to_string(),
        }
    })?;
    let connector = connector_name(&connection)?;

    Ok(Asset::<K>::builder()
        .name(name)
        .qualified_name(child_qualified_name(parent_qualified_name, name))
        .connection_qualified_name(connection)
        .connector_name(connector))
}
