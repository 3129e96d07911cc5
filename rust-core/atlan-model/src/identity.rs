// SPDX-License-Identifier: PMPL-1.0-or-later
//! GUIDs and qualified names.
//!
//! Connection qualified names have the shape `default/<connector>/<epoch>`,
//! and every asset inside a connection extends its connection's qualified name
//! with further `/`-separated segments. The helpers here derive the connection
//! and connector from any such name.

use rand::Rng;

use crate::error::{ModelError, Result};

/// A throw-away GUID for an asset that does not exist on the server yet.
///
/// The leading `-` tells the catalog to assign a real GUID during a bulk save
/// and report the mapping back in the mutation response.
pub fn placeholder_guid() -> String {
    let n: i64 = rand::thread_rng().gen_range(0..i64::MAX - 1);
    format!("-{n}")
}

pub fn is_placeholder_guid(guid: &str) -> bool {
    guid.starts_with('-')
}

/// Whether `id` is a hyphenated UUID, i.e. a server-assigned GUID rather
/// than a qualified name.
pub fn is_guid(id: &str) -> bool {
    id.len() == 36 && uuid::Uuid::parse_str(id).is_ok()
}

/// The connection qualified name that `qualified_name` belongs to, if it has
/// at least the three leading segments of one.
pub fn connection_qualified_name(qualified_name: &str) -> Option<String> {
    let segments: Vec<&str> = qualified_name.splitn(4, '/').collect();
    match segments.as_slice() {
        [prefix, connector, epoch, ..]
            if !prefix.is_empty() && !connector.is_empty() && !epoch.is_empty() =>
        {
            Some(format!("{prefix}/{connector}/{epoch}"))
        }
        _ => None,
    }
}

/// Connector name (`api`, `qlik-sense`, ...) encoded in a connection
/// qualified name.
pub fn connector_name(connection_qualified_name: &str) -> Result<String> {
    let segments: Vec<&str> = connection_qualified_name.split('/').collect();
    match segments.as_slice() {
        [_, connector, _, ..] if !connector.is_empty() => Ok((*connector).to_string()),
        _ => Err(ModelError::InvalidQualifiedName {
            qualified_name: connection_qualified_name.to_string(),
            reason: "expected default/<connector>/<epoch>".to_string(),
        }),
    }
}

/// Qualified name of a child asset nested directly under `parent`.
pub fn child_qualified_name(parent: &str, name: &str) -> String {
    format!("{}/{}", parent.trim_end_matches('/'), name)
}
