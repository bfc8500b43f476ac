//! Document construction and submission bookkeeping.
//!
//! Building the document is pure with respect to the draft's content: it
//! attaches outstanding sheets and filter groups, then renders. Submitting the
//! document is the rendering crate's job; the builder only records what was
//! submitted.

use super::AnalysisBuilder;
use crate::analysis::Definition;
use crate::document::{
    AnalysisDefinition, AnalysisDocument, FilterGroupDefinition, SheetDefinition,
};
use crate::error::{CoreError, CoreResult};
use crate::ids::DatasetIdentifier;
use std::collections::BTreeSet;

impl AnalysisBuilder {
    /// Render the draft into a create-analysis document.
    ///
    /// Requires the analysis and the definition. Sheets and filter groups not
    /// yet attached are attached first; every filter group is scoped to the
    /// first sheet and all visuals.
    pub fn build_document(&mut self) -> CoreResult<AnalysisDocument> {
        let analysis = self.analysis.as_ref().ok_or(CoreError::AnalysisMissing)?;
        if self.definition.is_none() {
            return Err(CoreError::DefinitionMissing);
        }
        if self.sheets.is_empty() {
            if let Some(group) = self.filter_groups.keys().next() {
                return Err(CoreError::NoSheetForScope {
                    group: group.to_string(),
                });
            }
        }
        let analysis_id = analysis.id().to_string();
        let name = analysis.name().to_string();
        let permissions = analysis.permissions().to_vec();

        self.finalize_definition()?;
        let definition = self.definition.as_ref().ok_or(CoreError::DefinitionMissing)?;
        self.warn_undeclared_datasets();

        let sheets: Vec<SheetDefinition> = definition
            .sheets()
            .iter()
            .filter_map(|id| self.sheets.get(id))
            .map(|sheet| {
                let visuals = sheet
                    .visuals()
                    .iter()
                    .filter_map(|id| self.visuals.get(id))
                    .map(|v| v.to_definition())
                    .collect();
                let controls = sheet
                    .controls()
                    .iter()
                    .filter_map(|id| self.controls.get(id))
                    .map(|c| c.to_definition())
                    .collect();
                sheet.to_definition(visuals, controls, self.options.canvas_width_px)
            })
            .collect();

        let filter_groups: Vec<FilterGroupDefinition> = match definition.sheets().first() {
            Some(scope_sheet) => definition
                .filter_groups()
                .iter()
                .filter_map(|id| self.filter_groups.get(id))
                .map(|group| {
                    let filters = group
                        .members()
                        .iter()
                        .filter_map(|id| self.filters.get(id));
                    group.to_definition(filters, scope_sheet, self.visuals.keys())
                })
                .collect(),
            None => Vec::new(),
        };

        log::debug!(
            "Built document for analysis '{}': {} dataset(s), {} sheet(s), {} filter group(s)",
            analysis_id,
            definition.dataset_count(),
            sheets.len(),
            filter_groups.len()
        );

        Ok(AnalysisDocument {
            aws_account_id: self.account_id.to_string(),
            analysis_id,
            name,
            permissions,
            definition: AnalysisDefinition {
                data_set_identifier_declarations: definition.declarations(),
                sheets,
                filter_groups,
                analysis_defaults: Some(Definition::analysis_defaults(
                    self.options.canvas_width_px,
                )),
            },
        })
    }

    /// Record a submitted document checksum.
    ///
    /// Returns true if an identical document was submitted before.
    pub fn record_submission(&mut self, checksum: &str) -> bool {
        let repeated = self.submissions.iter().any(|c| c == checksum);
        if repeated {
            log::warn!(
                "Analysis '{}' re-submitted with an unchanged document ({})",
                self.analysis_id,
                checksum
            );
        }
        self.submissions.push(checksum.to_string());
        repeated
    }

    /// Number of recorded submissions, repeats included
    pub fn submission_count(&self) -> usize {
        self.submissions.len()
    }

    /// Dataset identifiers referenced by visuals or filters but never declared
    pub fn undeclared_datasets(&self) -> BTreeSet<DatasetIdentifier> {
        let Some(definition) = self.definition.as_ref() else {
            return BTreeSet::new();
        };
        let from_visuals = self.visuals.values().flat_map(|v| {
            v.category()
                .iter()
                .chain(v.colors())
                .map(|f| &f.column().dataset)
                .chain(v.values().iter().map(|f| &f.column().dataset))
        });
        let from_filters = self.filters.values().map(|f| f.dataset());
        from_visuals
            .chain(from_filters)
            .filter(|id| !definition.is_declared(id))
            .cloned()
            .collect()
    }

    fn warn_undeclared_datasets(&self) {
        for id in self.undeclared_datasets() {
            log::warn!(
                "Dataset identifier '{}' is referenced but not declared in analysis '{}'",
                id,
                self.analysis_id
            );
        }
    }
}

#[cfg(test)]
#[path = "compile_test.rs"]
mod tests;
