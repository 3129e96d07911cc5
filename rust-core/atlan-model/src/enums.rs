// SPDX-License-Identifier: PMPL-1.0-or-later
//! Enumerated attribute values shared across asset types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle state of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityStatus {
    Active,
    /// Soft-deleted (archived); can be restored.
    Deleted,
    Purged,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for EntityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            EntityStatus::Active => "ACTIVE",
            EntityStatus::Deleted => "DELETED",
            EntityStatus::Purged => "PURGED",
            EntityStatus::Unknown => "UNKNOWN",
        };
        f.write_str(text)
    }
}

/// Certification applied to an asset by a data steward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CertificateStatus {
    Verified,
    Draft,
    Deprecated,
}

impl CertificateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CertificateStatus::Verified => "VERIFIED",
            CertificateStatus::Draft => "DRAFT",
            CertificateStatus::Deprecated => "DEPRECATED",
        }
    }
}

impl fmt::Display for CertificateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CertificateStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "VERIFIED" => Ok(CertificateStatus::Verified),
            "DRAFT" => Ok(CertificateStatus::Draft),
            "DEPRECATED" => Ok(CertificateStatus::Deprecated),
            other => Err(format!(
                "Unknown certificate '{other}'. Valid values: VERIFIED, DRAFT, DEPRECATED"
            )),
        }
    }
}

/// Banner style of an announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnouncementType {
    Information,
    Warning,
    Issue,
}

impl FromStr for AnnouncementType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "information" => Ok(AnnouncementType::Information),
            "warning" => Ok(AnnouncementType::Warning),
            "issue" => Ok(AnnouncementType::Issue),
            other => Err(format!(
                "Unknown announcement type '{other}'. Valid values: information, warning, issue"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_status_tolerated() {
        let status: EntityStatus = serde_json::from_str("\"SHREDDED\"").unwrap();
        assert_eq!(status, EntityStatus::Unknown);
    }

    #[test]
    fn test_certificate_parse_ignores_case() {
        assert_eq!("verified".parse::<CertificateStatus>(), Ok(CertificateStatus::Verified));
        assert!("gold".parse::<CertificateStatus>().is_err());
    }
}
