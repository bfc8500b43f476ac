//! Audit records of submitted documents

use crate::error::{RenderError, RenderResult};
use sl_core::AnalysisDocument;
use std::path::{Path, PathBuf};

/// Writes the pretty-printed document to `<dir>/<analysis_id>.json`
#[derive(Debug, Clone)]
pub struct AuditWriter {
    dir: PathBuf,
}

impl AuditWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Audit file location for an analysis.
    ///
    /// The id must name a single file inside the audit directory.
    pub fn path_for(&self, analysis_id: &str) -> RenderResult<PathBuf> {
        let path = self.dir.join(format!("{}.json", analysis_id));
        let escapes = analysis_id.is_empty()
            || analysis_id == "."
            || analysis_id.contains("..")
            || analysis_id.contains(['/', '\\']);
        if escapes {
            return Err(RenderError::Audit {
                path: path.display().to_string(),
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("analysis id '{}' is not a plain file name", analysis_id),
                ),
            });
        }
        Ok(path)
    }

    /// Write the document atomically (temp file + rename), replacing any previous record
    pub fn write(&self, document: &AnalysisDocument) -> RenderResult<PathBuf> {
        let path = self.path_for(&document.analysis_id)?;
        let json = document.to_pretty_json()?;

        let audit_err = |source: std::io::Error| RenderError::Audit {
            path: path.display().to_string(),
            source,
        };

        std::fs::create_dir_all(&self.dir).map_err(audit_err)?;
        let temp_path = path.with_extension("json.tmp");
        std::fs::write(&temp_path, json).map_err(audit_err)?;
        std::fs::rename(&temp_path, &path).map_err(audit_err)?;

        log::debug!("Audit record written to {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
#[path = "audit_test.rs"]
mod tests;
