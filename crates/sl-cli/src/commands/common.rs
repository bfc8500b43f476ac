//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use sl_core::{AnalysisDocument, Script, ScriptReport};
use std::fmt;
use std::path::Path;

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that RAII destructors run and cleanup happens properly.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Empty: main reports the underlying failure before returning this.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Load an operation script
pub(crate) fn load_script(path: &str) -> Result<Script> {
    Script::load(Path::new(path)).with_context(|| format!("Failed to load script '{}'", path))
}

/// Print each completed step and the failing one, if any
pub(crate) fn print_report(report: &ScriptReport) {
    for (index, outcome) in report.completed.iter().enumerate() {
        println!("  [{}] {}", index, outcome);
    }
    if let Some(failure) = &report.failure {
        println!("  [{}] {} FAILED: {}", failure.index, failure.op, failure.error);
    }
}

/// Summary line for a compiled document
pub(crate) fn summarize(document: &AnalysisDocument) -> String {
    let visuals: usize = document.definition.sheets.iter().map(|s| s.visuals.len()).sum();
    format!(
        "{} dataset(s), {} sheet(s), {} visual(s), {} filter group(s)",
        document.definition.data_set_identifier_declarations.len(),
        document.definition.sheets.len(),
        visuals,
        document.definition.filter_groups.len()
    )
}

/// Write the pretty-printed document, creating parent directories
pub(crate) fn write_document(document: &AnalysisDocument, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    let json = document.to_pretty_json()?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
