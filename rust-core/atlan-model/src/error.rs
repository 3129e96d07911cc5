// SPDX-License-Identifier: PMPL-1.0-or-later
//! Errors raised while building or casting assets.

use thiserror::Error;

/// Asset model errors
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Missing required value: {0}")]
    MissingRequired(String),

    #[error("Invalid qualified name '{qualified_name}': {reason}")]
    InvalidQualifiedName {
        qualified_name: String,
        reason: String,
    },

    #[error("Asset is of type {actual}, not the requested {expected}")]
    TypeMismatch { expected: String, actual: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ModelError {
    pub(crate) fn missing(what: &str) -> Self {
        ModelError::MissingRequired(what.to_string())
    }
}

/// Crate-level result alias using [`ModelError`].
pub type Result<T> = std::result::Result<T, ModelError>;

/// Reject empty or whitespace-only required values.
pub(crate) fn require<'a>(what: &str, value: &'a str) -> Result<&'a str> {
    if value.trim().is_empty() {
        Err(ModelError::missing(what))
    } else {
        Ok(value)
    }
}
