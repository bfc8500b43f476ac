//! Compile and submit a builder's draft.
//!
//! Compiling builds the document (attaching outstanding sheets and filter
//! groups), writes the audit record, then submits exactly once under a
//! bounded timeout. Precondition failures stop before anything is written.
//! The builder is left in place whatever the outcome.

use crate::audit::AuditWriter;
use crate::error::{RenderError, RenderResult};
use crate::traits::RenderingService;
use sl_core::AnalysisBuilder;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Default bound on the single submission attempt
pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(30);

/// Result of a successful submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOutcome {
    /// Reference of the created analysis
    pub arn: String,
    /// SHA-256 of the submitted document
    pub checksum: String,
    pub audit_path: Option<PathBuf>,
    /// An identical document had already been submitted from this builder
    pub repeated: bool,
}

/// Submits compiled documents to a rendering service
pub struct Compiler {
    service: Arc<dyn RenderingService>,
    audit: Option<AuditWriter>,
    timeout: Duration,
}

impl Compiler {
    pub fn new(service: Arc<dyn RenderingService>) -> Self {
        Self {
            service,
            audit: None,
            timeout: DEFAULT_SUBMIT_TIMEOUT,
        }
    }

    pub fn with_audit(mut self, audit: AuditWriter) -> Self {
        self.audit = Some(audit);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn service(&self) -> &Arc<dyn RenderingService> {
        &self.service
    }

    /// Build, audit and submit the builder's document
    pub async fn compile(&self, builder: &mut AnalysisBuilder) -> RenderResult<CompileOutcome> {
        let document = builder.build_document()?;
        let checksum = document.checksum()?;

        let audit_path = match &self.audit {
            Some(writer) => Some(writer.write(&document)?),
            None => None,
        };

        log::debug!(
            "Submitting analysis '{}' to {} service ({})",
            document.analysis_id,
            self.service.service_type(),
            checksum
        );

        let created = tokio::time::timeout(self.timeout, self.service.create_analysis(&document))
            .await
            .map_err(|_| RenderError::Timeout {
                seconds: self.timeout.as_secs(),
            })?
            .map_err(|e| {
                log::warn!("Submission of analysis '{}' failed: {}", document.analysis_id, e);
                e
            })?;

        let repeated = builder.record_submission(&checksum);
        log::info!(
            "Analysis '{}' created: {}",
            document.analysis_id,
            created.arn
        );

        Ok(CompileOutcome {
            arn: created.arn,
            checksum,
            audit_path,
            repeated,
        })
    }
}

#[cfg(test)]
#[path = "compiler_test.rs"]
mod tests;
