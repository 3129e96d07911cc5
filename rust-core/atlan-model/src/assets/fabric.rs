// SPDX-License-Identifier: PMPL-1.0-or-later
//! Microsoft Fabric assets: workspace → report → page.

use atlan_search::{KeywordField, NumericField, RelationField};
use serde::{Deserialize, Serialize};

use crate::asset::{Asset, AssetKind};
use crate::assets::nested_in;
use crate::builder::AssetBuilder;
use crate::error::Result;
use crate::reference::AssetRef;

pub type FabricWorkspace = Asset<FabricWorkspaceAttributes>;
pub type FabricReport = Asset<FabricReportAttributes>;
pub type FabricPage = Asset<FabricPageAttributes>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FabricWorkspaceAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fabric_column_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fabric_reports: Option<Vec<AssetRef>>,
}

impl AssetKind for FabricWorkspaceAttributes {
    const TYPE_NAME: &'static str = "FabricWorkspace";
}

impl Asset<FabricWorkspaceAttributes> {
    pub const FABRIC_REPORTS: RelationField = RelationField::new("fabricReports");

    pub fn creator(name: &str, connection_qualified_name: &str) -> Result<AssetBuilder<FabricWorkspaceAttributes>> {
        nested_in(name, connection_qualified_name)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FabricReportAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fabric_workspace_qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fabric_workspace: Option<AssetRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fabric_pages: Option<Vec<AssetRef>>,
}

impl AssetKind for FabricReportAttributes {
    const TYPE_NAME: &'static str = "FabricReport";
}

impl Asset<FabricReportAttributes> {
    pub const FABRIC_WORKSPACE_QUALIFIED_NAME: KeywordField =
        KeywordField::new("fabricWorkspaceQualifiedName", "fabricWorkspaceQualifiedName");
    pub const FABRIC_WORKSPACE: RelationField = RelationField::new("fabricWorkspace");
    pub const FABRIC_PAGES: RelationField = RelationField::new("fabricPages");

    pub fn creator(name: &str, workspace_qualified_name: &str) -> Result<AssetBuilder<FabricReportAttributes>> {
        let workspace = workspace_qualified_name.to_string();
        Ok(nested_in::<FabricReportAttributes>(name, workspace_qualified_name)?.with(|a| {
            a.fabric_workspace = Some(FabricWorkspace::ref_by_qualified_name(workspace.clone()));
            a.fabric_workspace_qualified_name = Some(workspace);
        }))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FabricPageAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fabric_report_qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fabric_visual_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fabric_report: Option<AssetRef>,
}

impl AssetKind for FabricPageAttributes {
    const TYPE_NAME: &'static str = "FabricPage";
}

impl Asset<FabricPageAttributes> {
    pub const FABRIC_REPORT_QUALIFIED_NAME: KeywordField =
        KeywordField::new("fabricReportQualifiedName", "fabricReportQualifiedName");
    pub const FABRIC_VISUAL_COUNT: NumericField =
        NumericField::new("fabricVisualCount", "fabricVisualCount");
    pub const FABRIC_REPORT: RelationField = RelationField::new("fabricReport");

    pub fn creator(name: &str, report_qualified_name: &str) -> Result<AssetBuilder<FabricPageAttributes>> {
        let report = report_qualified_name.to_string();
        Ok(nested_in::<FabricPageAttributes>(name, report_qualified_name)?.with(|a| {
            a.fabric_report = Some(FabricReport::ref_by_qualified_name(report.clone()));
            a.fabric_report_qualified_name = Some(report);
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hierarchy_qualified_names() {
        let ws = FabricWorkspace::creator("Sales", "default/fabric/1700000000").unwrap().build();
        let ws_qn = ws.qualified_name().unwrap();
        let report = FabricReport::creator("Quarterly", ws_qn).unwrap().build();
        let report_qn = report.qualified_name().unwrap();
        let page = FabricPage::creator("Overview", report_qn).unwrap().build();

        assert_eq!(page.qualified_name(), Some("default/fabric/1700000000/Sales/Quarterly/Overview"));
        assert_eq!(page.common.connection_qualified_name.as_deref(), Some("default/fabric/1700000000"));
        assert_eq!(page.common.connector_name.as_deref(), Some("fabric"));
        assert_eq!(page.attributes.fabric_report_qualified_name.as_deref(), Some(report_qn));
        assert_eq!(
            report.attributes.fabric_workspace.as_ref().and_then(|r| r.qualified_name()),
            Some(ws_qn)
        );
    }
}
