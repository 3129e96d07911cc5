// SPDX-License-Identifier: PMPL-1.0-or-later
//! Error types for the Atlan client.
//!
//! All fallible operations in this crate return [`Result<T>`], an alias for
//! `std::result::Result<T, AtlanError>`. HTTP failures are classified by
//! status so callers can tell a missing asset from a rejected token or a
//! server that is shedding load.

use atlan_model::ModelError;
use serde::Deserialize;
use thiserror::Error;

/// Atlan client errors
#[derive(Error, Debug)]
pub enum AtlanError {
    /// No asset with the requested GUID or qualified name (or not of the
    /// requested type).
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// The API token is missing, expired or lacks permission.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Still throttled after all retries were spent.
    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Rejected client-side before any request was sent.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl AtlanError {
    /// Classify a non-2xx response.
    pub(crate) fn from_status(status: u16, message: String) -> Self {
        match status {
            404 => AtlanError::NotFound(message),
            401 | 403 => AtlanError::Unauthorized(message),
            409 => AtlanError::Conflict(message),
            429 => AtlanError::RateLimited(message),
            _ => AtlanError::Server { status, message },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AtlanError::NotFound(_))
    }
}

/// Error body returned by the catalog.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ErrorResponse {
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default, alias = "message")]
    pub error_message: Option<String>,
}

impl ErrorResponse {
    pub(crate) fn describe(self, status: u16) -> String {
        match (self.error_code, self.error_message) {
            (Some(code), Some(message)) => format!("{code}: {message}"),
            (None, Some(message)) => message,
            (Some(code), None) => code,
            (None, None) => format!("HTTP {status}"),
        }
    }
}

/// Crate-level result alias using [`AtlanError`].
pub type Result<T> = std::result::Result<T, AtlanError>;
