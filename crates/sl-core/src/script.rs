//! Operation scripts.
//!
//! A script is a YAML document naming the analysis, its datasets and an ordered
//! list of steps. Each step maps onto one or more builder operations and
//! yields a human-readable outcome. Running stops at the first failing step;
//! the builder keeps everything applied before it.
//!
//! ```yaml
//! analysis:
//!   id: sales-overview
//!   name: Sales Overview
//!   permission: CREATE
//! datasets:
//!   - arn: "arn:aws:quicksight:us-east-1:123456789012:dataset/orders"
//!     identifier: orders
//! steps:
//!   - op: sheet
//!     sheet_id: s1
//!     name: Overview
//!   - op: visuals
//!     sheet_id: s1
//!     visuals:
//!       - visual_id: v1
//!         visual_type: BAR
//!         x_field: region
//!         x_field_type: DIMENSION
//!         x_dataset_identifier: orders
//!         y_field: revenue
//!         y_field_type: MEASURE
//!         y_dataset_identifier: orders
//!         width: 12
//!         height: 6
//! ```

use crate::analysis::PermissionMode;
use crate::builder::{AnalysisBuilder, VisualSpec};
use crate::control::ControlConfig;
use crate::error::{CoreError, CoreResult};
use crate::field::ColumnRef;
use crate::filter::FilterConfig;
use crate::ids::{
    AnalysisId, DatasetIdentifier, FilterControlId, FilterGroupId, FilterId, SheetId, VisualId,
};
use crate::sheet::{ControlSlot, GridPlacement, LayoutMode};
use crate::visual::Visibility;
use serde::Deserialize;
use std::path::Path;

/// A parsed operation script
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    pub analysis: AnalysisSpec,
    #[serde(default)]
    pub datasets: Vec<DatasetSpec>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisSpec {
    pub id: AnalysisId,
    pub name: String,
    #[serde(default = "default_permission")]
    pub permission: PermissionMode,
}

fn default_permission() -> PermissionMode {
    PermissionMode::Select
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetSpec {
    pub arn: String,
    pub identifier: DatasetIdentifier,
}

/// One script step, tagged by `op`
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Sheet(SheetStep),
    Layout(LayoutStep),
    Visuals(VisualsStep),
    Place(PlaceStep),
    Title(TitleStep),
    Filters(FiltersStep),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SheetStep {
    pub sheet_id: SheetId,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutStep {
    pub sheet_id: SheetId,
    pub mode: LayoutMode,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VisualsStep {
    pub sheet_id: SheetId,
    pub visuals: Vec<VisualSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlaceStep {
    pub sheet_id: SheetId,
    pub visual_id: VisualId,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TitleStep {
    pub visual_id: VisualId,
    pub title: String,
    #[serde(default = "default_visibility")]
    pub visibility: Visibility,
}

fn default_visibility() -> Visibility {
    Visibility::Visible
}

/// Filters, then controls placed on `sheet_id`, then groups.
///
/// Applied as a unit: on failure the builder is left as it was before the step.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FiltersStep {
    pub sheet_id: SheetId,
    #[serde(default)]
    pub filters: Vec<FilterSpec>,
    #[serde(default)]
    pub controls: Vec<ControlSpec>,
    #[serde(default)]
    pub groups: Vec<GroupSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterSpec {
    pub filter_id: FilterId,
    pub column: String,
    pub dataset_identifier: DatasetIdentifier,
    pub filter_type: String,
    #[serde(default)]
    pub config: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ControlSpec {
    pub control_id: FilterControlId,
    pub source_filter_id: FilterId,
    pub title: String,
    pub control_type: String,
    #[serde(default)]
    pub config: Option<serde_json::Value>,
    #[serde(default = "default_column_span")]
    pub column_span: u32,
    #[serde(default = "default_row_span")]
    pub row_span: u32,
}

fn default_column_span() -> u32 {
    6
}

fn default_row_span() -> u32 {
    1
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupSpec {
    pub group_id: FilterGroupId,
    pub dataset_identifier: DatasetIdentifier,
    #[serde(default)]
    pub filter_ids: Vec<FilterId>,
}

/// Result of one applied step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub op: &'static str,
    pub message: String,
}

impl std::fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.op, self.message)
    }
}

/// The step that stopped a run
#[derive(Debug)]
pub struct StepFailure {
    /// 0 for the setup, then 1-based step number
    pub index: usize,
    pub op: &'static str,
    pub error: CoreError,
}

/// Outcome of a whole script run
#[derive(Debug, Default)]
pub struct ScriptReport {
    pub completed: Vec<StepOutcome>,
    pub failure: Option<StepFailure>,
}

impl ScriptReport {
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

impl Script {
    /// Load a script from a YAML file
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parse a script from YAML text
    pub fn parse(content: &str) -> CoreResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Create the analysis and declare the datasets
    pub fn apply_setup(&self, builder: &mut AnalysisBuilder) -> CoreResult<StepOutcome> {
        builder.create_analysis(
            self.analysis.id.clone(),
            &self.analysis.name,
            self.analysis.permission,
        )?;
        for dataset in &self.datasets {
            builder.add_dataset(&dataset.arn, dataset.identifier.clone())?;
        }
        Ok(StepOutcome {
            op: "setup",
            message: format!(
                "analysis '{}' ready with {} dataset(s)",
                self.analysis.id,
                self.datasets.len()
            ),
        })
    }

    /// Apply the setup and every step in order, stopping at the first failure
    pub fn run(&self, builder: &mut AnalysisBuilder) -> ScriptReport {
        let mut report = ScriptReport::default();
        match self.apply_setup(builder) {
            Ok(outcome) => report.completed.push(outcome),
            Err(error) => {
                report.failure = Some(StepFailure {
                    index: 0,
                    op: "setup",
                    error,
                });
                return report;
            }
        }

        for (index, step) in self.steps.iter().enumerate() {
            match step.apply(builder) {
                Ok(outcome) => {
                    log::debug!("Step {} {}", index + 1, outcome);
                    report.completed.push(outcome);
                }
                Err(error) => {
                    log::debug!("Step {} ({}) failed: {}", index + 1, step.op(), error);
                    report.failure = Some(StepFailure {
                        index: index + 1,
                        op: step.op(),
                        error,
                    });
                    break;
                }
            }
        }
        report
    }
}

impl Step {
    pub fn op(&self) -> &'static str {
        match self {
            Step::Sheet(_) => "sheet",
            Step::Layout(_) => "layout",
            Step::Visuals(_) => "visuals",
            Step::Place(_) => "place",
            Step::Title(_) => "title",
            Step::Filters(_) => "filters",
        }
    }

    /// Apply this step to a builder
    pub fn apply(&self, builder: &mut AnalysisBuilder) -> CoreResult<StepOutcome> {
        let message = match self {
            Step::Sheet(step) => {
                let sheet = builder.create_or_select_sheet(step.sheet_id.clone(), &step.name)?;
                format!(
                    "sheet '{}' ({}) with {} visual(s)",
                    sheet.id(),
                    sheet.name(),
                    sheet.visuals().len()
                )
            }
            Step::Layout(step) => {
                builder.set_sheet_layout(&step.sheet_id, step.mode)?;
                format!("sheet '{}' layout set to {}", step.sheet_id, step.mode)
            }
            Step::Visuals(step) => builder.create_visuals(&step.sheet_id, &step.visuals)?.to_string(),
            Step::Place(step) => {
                let placement = GridPlacement::new(step.x, step.y, step.width, step.height);
                builder.place_visual(&step.sheet_id, &step.visual_id, placement)?;
                format!("visual '{}' placed on sheet '{}'", step.visual_id, step.sheet_id)
            }
            Step::Title(step) => {
                builder.set_visual_title(&step.visual_id, &step.title, step.visibility)?;
                format!("visual '{}' titled '{}'", step.visual_id, step.title)
            }
            Step::Filters(step) => {
                let mut draft = builder.clone();
                let message = apply_filters(&mut draft, step)?;
                *builder = draft;
                message
            }
        };
        Ok(StepOutcome {
            op: self.op(),
            message,
        })
    }
}

fn apply_filters(builder: &mut AnalysisBuilder, step: &FiltersStep) -> CoreResult<String> {
    if builder.sheet(&step.sheet_id).is_none() {
        return Err(CoreError::not_found(SheetId::KIND, step.sheet_id.as_str()));
    }

    for spec in &step.filters {
        let config = FilterConfig::from_parts(&spec.filter_type, spec.config.clone(), &spec.filter_id)?;
        let column = ColumnRef::new(spec.dataset_identifier.clone(), spec.column.clone());
        builder.create_filter(spec.filter_id.clone(), column, config)?;
    }
    for spec in &step.controls {
        let config =
            ControlConfig::from_parts(&spec.control_type, spec.config.clone(), &spec.control_id)?;
        builder.create_filter_control(
            spec.control_id.clone(),
            &spec.source_filter_id,
            &spec.title,
            config,
        )?;
        builder.place_filter_control(
            &step.sheet_id,
            &spec.control_id,
            ControlSlot::new(spec.column_span, spec.row_span),
        )?;
    }
    for spec in &step.groups {
        builder.create_filter_group(spec.group_id.clone(), spec.dataset_identifier.clone())?;
        builder.add_filters_to_group(&spec.group_id, &spec.filter_ids)?;
    }

    Ok(format!(
        "{} filter(s), {} control(s), {} group(s) on sheet '{}'",
        step.filters.len(),
        step.controls.len(),
        step.groups.len(),
        step.sheet_id
    ))
}

#[cfg(test)]
#[path = "script_test.rs"]
mod tests;
