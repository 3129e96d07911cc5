// SPDX-License-Identifier: PMPL-1.0-or-later
//! Search fields shared by every asset type.

use crate::fields::{KeywordField, KeywordTextField, NumericField, RelationField};

/// Index field holding the entity GUID. Used as the paging tie-breaker.
pub const GUID_INDEX_FIELD: &str = "__guid";

pub const TYPE_NAME: KeywordField = KeywordField::new("typeName", "__typeName.keyword");
pub const GUID: KeywordField = KeywordField::new("guid", GUID_INDEX_FIELD);
pub const STATUS: KeywordField = KeywordField::new("status", "__state");
pub const CREATED_BY: KeywordField = KeywordField::new("createdBy", "__createdBy");
pub const UPDATED_BY: KeywordField = KeywordField::new("updatedBy", "__modifiedBy");
pub const CREATE_TIME: NumericField = NumericField::new("createTime", "__timestamp");
pub const UPDATE_TIME: NumericField = NumericField::new("updateTime", "__modificationTimestamp");

pub const QUALIFIED_NAME: KeywordTextField =
    KeywordTextField::new("qualifiedName", "qualifiedName", "qualifiedName.text");
pub const NAME: KeywordTextField = KeywordTextField::new("name", "name.keyword", "name");
pub const DISPLAY_NAME: KeywordTextField =
    KeywordTextField::new("displayName", "displayName.keyword", "displayName");
pub const DESCRIPTION: KeywordTextField =
    KeywordTextField::new("description", "description.keyword", "description");
pub const USER_DESCRIPTION: KeywordTextField =
    KeywordTextField::new("userDescription", "userDescription.keyword", "userDescription");

pub const CERTIFICATE_STATUS: KeywordTextField =
    KeywordTextField::new("certificateStatus", "certificateStatus", "certificateStatus.text");
pub const CERTIFICATE_UPDATED_BY: KeywordField =
    KeywordField::new("certificateUpdatedBy", "certificateUpdatedBy");
pub const ANNOUNCEMENT_TYPE: KeywordField = KeywordField::new("announcementType", "announcementType");

pub const CONNECTION_QUALIFIED_NAME: KeywordTextField = KeywordTextField::new(
    "connectionQualifiedName",
    "connectionQualifiedName",
    "connectionQualifiedName.text",
);
pub const CONNECTOR_NAME: KeywordField = KeywordField::new("connectorName", "connectorName");

pub const OWNER_USERS: KeywordField = KeywordField::new("ownerUsers", "ownerUsers");
pub const OWNER_GROUPS: KeywordField = KeywordField::new("ownerGroups", "ownerGroups");

/// Directly-assigned Atlan tags.
pub const ATLAN_TAGS: KeywordTextField =
    KeywordTextField::new("classificationNames", "__traitNames", "__classificationsText");
/// Atlan tags received through propagation.
pub const PROPAGATED_ATLAN_TAGS: KeywordTextField =
    KeywordTextField::new("classificationNames", "__propagatedTraitNames", "__classificationsText");
/// Qualified names of assigned glossary terms.
pub const ASSIGNED_TERMS: KeywordTextField =
    KeywordTextField::new("meanings", "__meanings", "__meaningsText");
pub const MEANINGS: RelationField = RelationField::new("meanings");
