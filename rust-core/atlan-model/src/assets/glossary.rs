// SPDX-License-Identifier: PMPL-1.0-or-later
//! Glossary terms, the targets of asset `meanings`.

use atlan_search::{KeywordTextField, RelationField};
use serde::{Deserialize, Serialize};

use crate::asset::{Asset, AssetKind};
use crate::builder::AssetBuilder;
use crate::error::{require, Result};
use crate::reference::AssetRef;

pub const GLOSSARY_TYPE_NAME: &str = "AtlasGlossary";

pub type GlossaryTerm = Asset<GlossaryTermAttributes>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlossaryTermAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
    /// Glossary the term lives in. Required on every write.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<AssetRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<AssetRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_entities: Option<Vec<AssetRef>>,
}

impl AssetKind for GlossaryTermAttributes {
    const TYPE_NAME: &'static str = "AtlasGlossaryTerm";
}

impl Asset<GlossaryTermAttributes> {
    pub const ABBREVIATION: KeywordTextField =
        KeywordTextField::new("abbreviation", "abbreviation.keyword", "abbreviation");
    pub const ANCHOR: RelationField = RelationField::new("anchor");
    pub const CATEGORIES: RelationField = RelationField::new("categories");
    pub const ASSIGNED_ENTITIES: RelationField = RelationField::new("assignedEntities");

    /// Minimal term for modifying an existing one. Terms cannot be saved
    /// without their glossary, so its GUID is required alongside the usual
    /// qualified name and name.
    pub fn anchored_updater(
        qualified_name: &str,
        name: &str,
        glossary_guid: &str,
    ) -> Result<AssetBuilder<GlossaryTermAttributes>> {
        require("glossary guid", glossary_guid)?;
        let anchor = AssetRef::by_guid(GLOSSARY_TYPE_NAME, glossary_guid);
        Ok(Self::updater(qualified_name, name)?.with(|a| a.anchor = Some(anchor)))
    }
}

impl AssetBuilder<GlossaryTermAttributes> {
    pub fn short_description(self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.with(|a| a.short_description = Some(text))
    }

    pub fn abbreviation(self, abbreviation: impl Into<String>) -> Self {
        let abbreviation = abbreviation.into();
        self.with(|a| a.abbreviation = Some(abbreviation))
    }
}
