// SPDX-License-Identifier: PMPL-1.0-or-later
//! Business policies. These are created in the Atlan UI; the SDK only
//! updates and reads them.

use atlan_search::{KeywordField, KeywordTextField, NumericField, RelationField};
use serde::{Deserialize, Serialize};

use crate::asset::{Asset, AssetKind};
use crate::builder::AssetBuilder;
use crate::reference::AssetRef;

pub type BusinessPolicy = Asset<BusinessPolicyAttributes>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessPolicyAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_policy_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_policy_long_description: Option<String>,
    /// Epoch milliseconds from which the policy applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_policy_valid_from: Option<i64>,
    /// Epoch milliseconds until which the policy applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_policy_valid_till: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_policy_version: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_policy_filter_dsl: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_policy_base_parent_guid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_policy_selected_approach: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exceptions_for_business_policy: Option<Vec<AssetRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_business_policies: Option<Vec<AssetRef>>,
}

impl AssetKind for BusinessPolicyAttributes {
    const TYPE_NAME: &'static str = "BusinessPolicy";
}

impl Asset<BusinessPolicyAttributes> {
    pub const BUSINESS_POLICY_TYPE: KeywordField =
        KeywordField::new("businessPolicyType", "businessPolicyType");
    pub const BUSINESS_POLICY_LONG_DESCRIPTION: KeywordTextField = KeywordTextField::new(
        "businessPolicyLongDescription",
        "businessPolicyLongDescription.keyword",
        "businessPolicyLongDescription",
    );
    pub const BUSINESS_POLICY_VALID_FROM: NumericField =
        NumericField::new("businessPolicyValidFrom", "businessPolicyValidFrom");
    pub const BUSINESS_POLICY_VALID_TILL: NumericField =
        NumericField::new("businessPolicyValidTill", "businessPolicyValidTill");
    pub const BUSINESS_POLICY_VERSION: NumericField =
        NumericField::new("businessPolicyVersion", "businessPolicyVersion");
    pub const EXCEPTIONS_FOR_BUSINESS_POLICY: RelationField =
        RelationField::new("exceptionsForBusinessPolicy");
    pub const RELATED_BUSINESS_POLICIES: RelationField =
        RelationField::new("relatedBusinessPolicies");

    /// Whether the policy applies at `epoch_ms`. Open-ended bounds always
    /// match.
    pub fn is_valid_at(&self, epoch_ms: i64) -> bool {
        let from_ok = self
            .attributes
            .business_policy_valid_from
            .map_or(true, |from| epoch_ms >= from);
        let till_ok = self
            .attributes
            .business_policy_valid_till
            .map_or(true, |till| epoch_ms <= till);
        from_ok && till_ok
    }
}

impl AssetBuilder<BusinessPolicyAttributes> {
    pub fn validity(self, from_ms: Option<i64>, till_ms: Option<i64>) -> Self {
        self.with(|a| {
            a.business_policy_valid_from = from_ms;
            a.business_policy_valid_till = till_ms;
        })
    }

    pub fn long_description(self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.with(|a| a.business_policy_long_description = Some(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;
    use serde_json::json;

    #[test]
    fn test_validity_window() {
        let policy = BusinessPolicy::updater("policy-qn", "PII handling")
            .unwrap()
            .validity(Some(1_000), Some(2_000))
            .build();
        assert!(!policy.is_valid_at(999));
        assert!(policy.is_valid_at(1_000));
        assert!(policy.is_valid_at(2_000));
        assert!(!policy.is_valid_at(2_001));

        let open = BusinessPolicy::updater("policy-qn", "PII handling").unwrap().build();
        assert!(open.is_valid_at(0));
    }

    #[test]
    fn test_cast_from_server_entity() {
        let entity: Entity = serde_json::from_value(json!({
            "typeName": "BusinessPolicy",
            "guid": "c0a8012e-0000-4000-8000-000000000001",
            "attributes": {
                "qualifiedName": "policy-qn",
                "name": "PII handling",
                "businessPolicyType": "DATA_QUALITY",
                "businessPolicyVersion": 3
            },
            "relationshipAttributes": {
                "relatedBusinessPolicies": [
                    { "typeName": "BusinessPolicy", "guid": "c0a8012e-0000-4000-8000-000000000002" }
                ]
            }
        }))
        .unwrap();
        let policy = BusinessPolicy::try_from(entity).unwrap();
        assert_eq!(policy.attributes.business_policy_type.as_deref(), Some("DATA_QUALITY"));
        assert_eq!(policy.attributes.business_policy_version, Some(3));
        assert_eq!(policy.attributes.related_business_policies.map(|r| r.len()), Some(1));
    }
}
