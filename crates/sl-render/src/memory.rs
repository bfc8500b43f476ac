//! In-memory rendering service
//!
//! Backs the `memory` service type and the test suites. Submitted documents
//! are recorded and published by analysis id, so `describe_analysis` reflects
//! the last successful submission.

use crate::error::{RenderError, RenderResult};
use crate::traits::{CreatedAnalysis, DataSetSummary, PublishedAnalysis, RenderingService};
use async_trait::async_trait;
use sl_core::{AccountId, AnalysisDocument, AnalysisId};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Service error code used when an analysis has never been published
pub const NOT_FOUND_CODE: &str = "ResourceNotFoundException";

#[derive(Debug, Default)]
struct MemoryState {
    submissions: Vec<AnalysisDocument>,
    published: HashMap<(String, String), AnalysisDocument>,
    data_sets: Vec<DataSetSummary>,
    next_failure: Option<(String, String)>,
    hang: bool,
}

/// Rendering service that keeps everything in process memory
#[derive(Debug, Default)]
pub struct InMemoryRenderingService {
    state: Mutex<MemoryState>,
}

impl InMemoryRenderingService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the dataset catalog returned by `list_data_sets`
    pub fn with_data_sets(self, data_sets: Vec<DataSetSummary>) -> Self {
        self.lock().data_sets = data_sets;
        self
    }

    /// Make the next `create_analysis` call fail with a service error
    pub fn fail_with(&self, code: &str, message: &str) {
        self.lock().next_failure = Some((code.to_string(), message.to_string()));
    }

    /// Make every `create_analysis` call wait forever
    pub fn hang(&self) {
        self.lock().hang = true;
    }

    /// Every document that reached the service, failed attempts included
    pub fn submissions(&self) -> Vec<AnalysisDocument> {
        self.lock().submissions.clone()
    }

    pub fn submission_count(&self) -> usize {
        self.lock().submissions.len()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn arn(account_id: &str, analysis_id: &str) -> String {
        format!("arn:sightline:memory:{}:analysis/{}", account_id, analysis_id)
    }
}

#[async_trait]
impl RenderingService for InMemoryRenderingService {
    async fn create_analysis(&self, document: &AnalysisDocument) -> RenderResult<CreatedAnalysis> {
        let hang = {
            let mut state = self.lock();
            state.submissions.push(document.clone());
            if let Some((code, message)) = state.next_failure.take() {
                return Err(RenderError::Service { code, message });
            }
            if !state.hang {
                state.published.insert(
                    (document.aws_account_id.clone(), document.analysis_id.clone()),
                    document.clone(),
                );
            }
            state.hang
        };

        if hang {
            std::future::pending::<()>().await;
        }

        Ok(CreatedAnalysis {
            arn: Self::arn(&document.aws_account_id, &document.analysis_id),
            analysis_id: Some(document.analysis_id.clone()),
            creation_status: Some("CREATION_SUCCESSFUL".to_string()),
        })
    }

    async fn list_data_sets(&self, _account_id: &AccountId) -> RenderResult<Vec<DataSetSummary>> {
        Ok(self.lock().data_sets.clone())
    }

    async fn describe_analysis(
        &self,
        account_id: &AccountId,
        analysis_id: &AnalysisId,
    ) -> RenderResult<PublishedAnalysis> {
        let state = self.lock();
        let key = (account_id.to_string(), analysis_id.to_string());
        let document = state.published.get(&key).ok_or_else(|| RenderError::Service {
            code: NOT_FOUND_CODE.to_string(),
            message: format!("Analysis {} not found in account {}", analysis_id, account_id),
        })?;

        Ok(PublishedAnalysis {
            sheets: to_values(&document.definition.sheets)?,
            filter_groups: to_values(&document.definition.filter_groups)?,
        })
    }

    fn service_type(&self) -> &'static str {
        "memory"
    }
}

fn to_values<T: serde::Serialize>(items: &[T]) -> RenderResult<Vec<serde_json::Value>> {
    items
        .iter()
        .map(|item| {
            serde_json::to_value(item).map_err(|e| RenderError::InvalidResponse(e.to_string()))
        })
        .collect()
}

#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;
