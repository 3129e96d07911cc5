// SPDX-License-Identifier: PMPL-1.0-or-later
//! Workflows and their runs, as recorded in the catalog.

use std::fmt;

use atlan_search::{KeywordField, NumericField, RelationField};
use serde::{Deserialize, Serialize};

use crate::asset::{Asset, AssetKind};
use crate::builder::AssetBuilder;
use crate::reference::AssetRef;

pub type Workflow = Asset<WorkflowAttributes>;
pub type WorkflowRun = Asset<WorkflowRunAttributes>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_template_guid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_type: Option<String>,
    /// Workflow definition as serialised JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_config: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_run_expires_in: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_updated_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_deleted_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_runs: Option<Vec<AssetRef>>,
}

impl AssetKind for WorkflowAttributes {
    const TYPE_NAME: &'static str = "Workflow";
}

impl Asset<WorkflowAttributes> {
    pub const WORKFLOW_TEMPLATE_GUID: KeywordField =
        KeywordField::new("workflowTemplateGuid", "workflowTemplateGuid");
    pub const WORKFLOW_TYPE: KeywordField = KeywordField::new("workflowType", "workflowType");
    pub const WORKFLOW_STATUS: KeywordField = KeywordField::new("workflowStatus", "workflowStatus");
    pub const WORKFLOW_DELETED_AT: NumericField =
        NumericField::new("workflowDeletedAt", "workflowDeletedAt");
}

impl AssetBuilder<WorkflowAttributes> {
    pub fn config(self, config: impl Into<String>) -> Self {
        let config = config.into();
        self.with(|a| a.workflow_config = Some(config))
    }
}

/// Lifecycle state of a workflow run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkflowRunStatus {
    Pending,
    Approved,
    Rejected,
    Expired,
    Failed,
    Success,
    #[serde(other)]
    Unknown,
}

impl WorkflowRunStatus {
    /// Whether the run can no longer change state.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, WorkflowRunStatus::Pending | WorkflowRunStatus::Unknown)
    }
}

impl fmt::Display for WorkflowRunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WorkflowRunStatus::Pending => "PENDING",
            WorkflowRunStatus::Approved => "APPROVED",
            WorkflowRunStatus::Rejected => "REJECTED",
            WorkflowRunStatus::Expired => "EXPIRED",
            WorkflowRunStatus::Failed => "FAILED",
            WorkflowRunStatus::Success => "SUCCESS",
            WorkflowRunStatus::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowRunAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_run_workflow_guid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_run_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_run_action_choices: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_run_on_asset_guid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_run_comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_run_config: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_run_status: Option<WorkflowRunStatus>,
    /// Epoch milliseconds after which a pending run lapses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_run_expires_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_run_created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_run_updated_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_run_deleted_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow: Option<AssetRef>,
}

impl AssetKind for WorkflowRunAttributes {
    const TYPE_NAME: &'static str = "WorkflowRun";
}

impl Asset<WorkflowRunAttributes> {
    pub const WORKFLOW_RUN_WORKFLOW_GUID: KeywordField =
        KeywordField::new("workflowRunWorkflowGuid", "workflowRunWorkflowGuid");
    pub const WORKFLOW_RUN_ON_ASSET_GUID: KeywordField =
        KeywordField::new("workflowRunOnAssetGuid", "workflowRunOnAssetGuid");
    pub const WORKFLOW_RUN_STATUS: KeywordField =
        KeywordField::new("workflowRunStatus", "workflowRunStatus");
    pub const WORKFLOW_RUN_EXPIRES_AT: NumericField =
        NumericField::new("workflowRunExpiresAt", "workflowRunExpiresAt");
    pub const WORKFLOW: RelationField = RelationField::new("workflow");

    /// A pending run whose expiry has passed at `now_ms`.
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        let pending = matches!(
            self.attributes.workflow_run_status,
            None | Some(WorkflowRunStatus::Pending)
        );
        let lapsed = self
            .attributes
            .workflow_run_expires_at
            .is_some_and(|at| now_ms > at);
        match self.attributes.workflow_run_status {
            Some(WorkflowRunStatus::Expired) => true,
            _ => pending && lapsed,
        }
    }
}

impl AssetBuilder<WorkflowRunAttributes> {
    pub fn run_status(self, status: WorkflowRunStatus) -> Self {
        self.with(|a| a.workflow_run_status = Some(status))
    }

    pub fn comment(self, comment: impl Into<String>) -> Self {
        let comment = comment.into();
        self.with(|a| a.workflow_run_comment = Some(comment))
    }
}
