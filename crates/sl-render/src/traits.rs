//! Rendering service trait definition

use crate::error::RenderResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sl_core::{AccountId, AnalysisDocument, AnalysisId};

/// Reference to a created analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreatedAnalysis {
    pub arn: String,
    #[serde(default)]
    pub analysis_id: Option<String>,
    #[serde(default)]
    pub creation_status: Option<String>,
}

/// One dataset in the account's catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DataSetSummary {
    pub name: String,
    pub arn: String,
}

/// Sheets and filter groups of a published analysis, as the service reports them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PublishedAnalysis {
    #[serde(default)]
    pub sheets: Vec<serde_json::Value>,
    #[serde(default)]
    pub filter_groups: Vec<serde_json::Value>,
}

impl PublishedAnalysis {
    /// `SheetId` of every published sheet
    pub fn sheet_ids(&self) -> Vec<&str> {
        self.sheets
            .iter()
            .filter_map(|s| s.get("SheetId").and_then(|id| id.as_str()))
            .collect()
    }

    /// `FilterGroupId` of every published filter group
    pub fn filter_group_ids(&self) -> Vec<&str> {
        self.filter_groups
            .iter()
            .filter_map(|g| g.get("FilterGroupId").and_then(|id| id.as_str()))
            .collect()
    }
}

/// External rendering service abstraction
///
/// Implementations must be Send + Sync for async operation.
#[async_trait]
pub trait RenderingService: Send + Sync {
    /// Submit a compiled document; one call, no retries
    async fn create_analysis(&self, document: &AnalysisDocument) -> RenderResult<CreatedAnalysis>;

    /// Dataset catalog of an account
    async fn list_data_sets(&self, account_id: &AccountId) -> RenderResult<Vec<DataSetSummary>>;

    /// Currently published sheets and filter groups of an analysis
    async fn describe_analysis(
        &self,
        account_id: &AccountId,
        analysis_id: &AnalysisId,
    ) -> RenderResult<PublishedAnalysis>;

    /// Service type identifier for logging
    fn service_type(&self) -> &'static str;
}
