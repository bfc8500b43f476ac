//! The analysis builder.
//!
//! One `AnalysisBuilder` holds one analysis draft. It owns every entity by id
//! (one ordered map per namespace), enforces the referential-integrity rules
//! on each mutation, and renders the whole tree into an
//! [`AnalysisDocument`](crate::document::AnalysisDocument) on demand.
//!
//! Every mutation either succeeds or leaves the builder unchanged. Operations
//! are split by concern:
//!
//! - `mod.rs`: analysis, datasets, sheets, definition
//! - `visuals.rs`: visual creation and field binding
//! - `filters.rs`: filters, filter controls, filter groups
//! - `layout.rs`: sheet attachment and grid placement
//! - `compile.rs`: document construction and submission bookkeeping
//! - `batch.rs`: loosely typed batch visual creation

mod batch;
mod compile;
mod filters;
mod layout;
mod visuals;

pub use batch::{BatchReport, SkippedVisual, VisualRequest, VisualSpec};
pub use visuals::{ChartVisualRequest, TableFields, TableVisualRequest};

use crate::analysis::{Analysis, Definition, PermissionMode};
use crate::control::FilterControl;
use crate::error::{CoreError, CoreResult};
use crate::filter::Filter;
use crate::filter_group::FilterGroup;
use crate::ids::{
    AccountId, AnalysisId, BuilderKey, DatasetIdentifier, FilterControlId, FilterGroupId,
    FilterId, SheetId, VisualId,
};
use crate::sheet::Sheet;
use crate::visual::Visual;
use indexmap::IndexMap;

/// Default grid canvas width in pixels
pub const DEFAULT_CANVAS_WIDTH_PX: u32 = 1600;

/// Settings applied to every builder created from one configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderOptions {
    /// Principal granted admin actions on CREATE
    pub principal: Option<String>,
    /// Canvas width used for grid sizing and free-form conversion
    pub canvas_width_px: u32,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            principal: None,
            canvas_width_px: DEFAULT_CANVAS_WIDTH_PX,
        }
    }
}

/// One in-progress analysis draft
#[derive(Debug, Clone)]
pub struct AnalysisBuilder {
    key: BuilderKey,
    account_id: AccountId,
    analysis_id: AnalysisId,
    options: BuilderOptions,
    analysis: Option<Analysis>,
    definition: Option<Definition>,
    sheets: IndexMap<SheetId, Sheet>,
    visuals: IndexMap<VisualId, Visual>,
    filters: IndexMap<FilterId, Filter>,
    controls: IndexMap<FilterControlId, FilterControl>,
    filter_groups: IndexMap<FilterGroupId, FilterGroup>,
    submissions: Vec<String>,
}

impl AnalysisBuilder {
    /// Create an empty builder for an (analysis, account) pair
    pub fn new(analysis_id: AnalysisId, account_id: AccountId, options: BuilderOptions) -> Self {
        Self {
            key: BuilderKey::derive(&analysis_id, &account_id),
            account_id,
            analysis_id,
            options,
            analysis: None,
            definition: None,
            sheets: IndexMap::new(),
            visuals: IndexMap::new(),
            filters: IndexMap::new(),
            controls: IndexMap::new(),
            filter_groups: IndexMap::new(),
            submissions: Vec::new(),
        }
    }

    pub fn key(&self) -> &BuilderKey {
        &self.key
    }

    pub fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    pub fn analysis_id(&self) -> &AnalysisId {
        &self.analysis_id
    }

    pub fn options(&self) -> &BuilderOptions {
        &self.options
    }

    pub fn analysis(&self) -> Option<&Analysis> {
        self.analysis.as_ref()
    }

    pub fn definition(&self) -> Option<&Definition> {
        self.definition.as_ref()
    }

    pub fn sheet(&self, id: &str) -> Option<&Sheet> {
        self.sheets.get(id)
    }

    /// Sheets in creation order
    pub fn sheets(&self) -> impl Iterator<Item = &Sheet> {
        self.sheets.values()
    }

    pub fn visual(&self, id: &str) -> Option<&Visual> {
        self.visuals.get(id)
    }

    /// Visuals in creation order
    pub fn visuals(&self) -> impl Iterator<Item = &Visual> {
        self.visuals.values()
    }

    pub fn filter(&self, id: &str) -> Option<&Filter> {
        self.filters.get(id)
    }

    pub fn filter_control(&self, id: &str) -> Option<&FilterControl> {
        self.controls.get(id)
    }

    pub fn filter_group(&self, id: &str) -> Option<&FilterGroup> {
        self.filter_groups.get(id)
    }

    /// Create the analysis.
    ///
    /// Calling again with the builder's analysis id is a no-op; any other id
    /// is rejected.
    pub fn create_analysis(
        &mut self,
        id: AnalysisId,
        name: &str,
        permission_mode: PermissionMode,
    ) -> CoreResult<()> {
        if id != self.analysis_id {
            return Err(CoreError::ConflictingId {
                kind: AnalysisId::KIND,
                id: id.to_string(),
                message: format!("a builder keyed to analysis '{}'", self.analysis_id),
            });
        }
        if self.analysis.is_some() {
            log::debug!("Analysis '{}' already exists; keeping it", id);
            return Ok(());
        }

        let analysis = Analysis::new(
            id,
            name,
            permission_mode,
            self.options.principal.as_deref(),
        )?;
        log::debug!(
            "Created analysis '{}' ({}) with {} permission grant(s)",
            analysis.id(),
            permission_mode,
            analysis.permissions().len()
        );
        self.analysis = Some(analysis);
        Ok(())
    }

    /// Bind a dataset arn to a logical identifier.
    ///
    /// Creates the definition on first use. A repeated arn replaces its
    /// identifier (last write wins).
    pub fn add_dataset(&mut self, arn: &str, identifier: DatasetIdentifier) -> CoreResult<()> {
        if self.analysis.is_none() {
            return Err(CoreError::AnalysisMissing);
        }
        if arn.trim().is_empty() {
            return Err(CoreError::InvalidConfiguration {
                kind: DatasetIdentifier::KIND,
                id: identifier.to_string(),
                message: "dataset arn must not be empty".to_string(),
            });
        }

        let definition = self.definition.get_or_insert_with(Definition::new);
        match definition.declare(arn, identifier.clone())? {
            Some(previous) if previous != identifier => log::debug!(
                "Dataset '{}' rebound from '{}' to '{}'",
                arn,
                previous,
                identifier
            ),
            _ => log::debug!("Declared dataset '{}' as '{}'", arn, identifier),
        }
        Ok(())
    }

    /// Return the sheet with this id, creating it in GRID mode if absent.
    ///
    /// An existing sheet keeps its name, layout mode and contents.
    pub fn create_or_select_sheet(&mut self, id: SheetId, name: &str) -> CoreResult<&Sheet> {
        if self.definition.is_none() {
            return Err(CoreError::DefinitionMissing);
        }
        if self.sheets.contains_key(&id) {
            log::debug!("Selected existing sheet '{}'", id);
        } else {
            log::debug!("Created sheet '{}' ({})", id, name);
        }
        let sheet = self
            .sheets
            .entry(id.clone())
            .or_insert_with(|| Sheet::new(id, name));
        Ok(sheet)
    }

    /// Attach every sheet and filter group to the definition.
    ///
    /// Safe to call repeatedly; already attached entities are skipped.
    pub fn finalize_definition(&mut self) -> CoreResult<()> {
        if self.analysis.is_none() {
            return Err(CoreError::AnalysisMissing);
        }
        let definition = self.definition.as_mut().ok_or(CoreError::DefinitionMissing)?;
        for id in self.sheets.keys() {
            if definition.attach_sheet(id) {
                log::debug!("Attached sheet '{}' to the definition", id);
            }
        }
        for id in self.filter_groups.keys() {
            if definition.attach_filter_group(id) {
                log::debug!("Attached filter group '{}' to the definition", id);
            }
        }
        Ok(())
    }

    fn require_sheet(&self, id: &str) -> CoreResult<&Sheet> {
        self.sheets
            .get(id)
            .ok_or_else(|| CoreError::not_found(SheetId::KIND, id))
    }

    fn require_visual(&self, id: &str) -> CoreResult<&Visual> {
        self.visuals
            .get(id)
            .ok_or_else(|| CoreError::not_found(VisualId::KIND, id))
    }

    fn require_filter(&self, id: &str) -> CoreResult<&Filter> {
        self.filters
            .get(id)
            .ok_or_else(|| CoreError::not_found(FilterId::KIND, id))
    }

    fn require_control(&self, id: &str) -> CoreResult<&FilterControl> {
        self.controls
            .get(id)
            .ok_or_else(|| CoreError::not_found(FilterControlId::KIND, id))
    }
}


#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
