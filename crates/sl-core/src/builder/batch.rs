//! Best-effort batch visual creation from loosely typed specs.
//!
//! Each spec is converted and applied on its own. A spec that fails is
//! reported in [`BatchReport::skipped`] and the rest of the batch still runs.

use super::visuals::{ChartVisualRequest, TableFields, TableVisualRequest};
use super::AnalysisBuilder;
use crate::error::{CoreError, CoreResult};
use crate::field::FieldInput;
use crate::ids::{DatasetIdentifier, SheetId, VisualId};
use crate::sheet::GridPlacement;
use crate::visual::VisualType;
use serde::{Deserialize, Serialize};

/// One visual as supplied by a script or caller.
///
/// Chart types (BAR, LINE, PIE) use the singular `x_field`/`y_field`/`color_field`
/// keys; TABLE uses the `x_fields`/`y_fields` lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VisualSpec {
    pub visual_id: String,
    pub visual_type: String,
    pub title: Option<String>,
    pub x_position: u32,
    pub y_position: u32,
    pub width: u32,
    pub height: u32,

    pub x_field: Option<String>,
    pub x_field_type: Option<String>,
    pub x_dataset_identifier: Option<String>,
    pub x_date_granularity: Option<String>,
    pub y_field: Option<String>,
    pub y_field_type: Option<String>,
    pub y_dataset_identifier: Option<String>,
    pub y_aggregation_function: Option<String>,
    pub color_field: Option<String>,
    pub color_field_type: Option<String>,
    pub color_dataset_identifier: Option<String>,
    pub color_date_granularity: Option<String>,

    pub x_fields: Vec<String>,
    pub x_field_types: Vec<String>,
    pub y_fields: Vec<String>,
    pub y_field_types: Vec<String>,
}

/// Typed request built from a [`VisualSpec`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisualRequest {
    Chart(ChartVisualRequest),
    Table(TableVisualRequest),
}

impl VisualSpec {
    /// Convert into a typed request for `sheet_id`
    pub fn to_request(&self, sheet_id: &SheetId) -> CoreResult<VisualRequest> {
        let visual_id = VisualId::parse(self.visual_id.clone())?;
        let visual_type = VisualType::parse(&self.visual_type)?;
        let placement = GridPlacement::new(self.x_position, self.y_position, self.width, self.height);

        if visual_type == VisualType::Table {
            return Ok(VisualRequest::Table(TableVisualRequest {
                sheet_id: sheet_id.clone(),
                title: self.title.clone(),
                fields: TableFields {
                    x_fields: self.x_fields.clone(),
                    x_field_types: self.x_field_types.clone(),
                    x_dataset: self.dataset(&visual_id, "x", &self.x_dataset_identifier)?,
                    x_date_granularity: self.x_date_granularity.clone(),
                    y_fields: self.y_fields.clone(),
                    y_field_types: self.y_field_types.clone(),
                    y_dataset: self.dataset(&visual_id, "y", &self.y_dataset_identifier)?,
                    y_aggregation: self.y_aggregation_function.clone(),
                },
                visual_id,
                placement,
            }));
        }

        let x = self.input(
            &visual_id,
            "x",
            [&self.x_field, &self.x_field_type, &self.x_dataset_identifier],
            &self.x_date_granularity,
        )?;
        let y = self.input(
            &visual_id,
            "y",
            [&self.y_field, &self.y_field_type, &self.y_dataset_identifier],
            &self.y_aggregation_function,
        )?;
        let color = match &self.color_field {
            Some(_) => Some(self.input(
                &visual_id,
                "color",
                [&self.color_field, &self.color_field_type, &self.color_dataset_identifier],
                &self.color_date_granularity,
            )?),
            None => None,
        };

        Ok(VisualRequest::Chart(ChartVisualRequest {
            sheet_id: sheet_id.clone(),
            visual_id,
            visual_type,
            title: self.title.clone(),
            x,
            y,
            color,
            placement,
        }))
    }

    /// `[field, field_type, dataset]` keys of one axis
    fn input(
        &self,
        visual_id: &VisualId,
        axis: &str,
        [field, field_type, dataset]: [&Option<String>; 3],
        extra: &Option<String>,
    ) -> CoreResult<FieldInput> {
        let field = field
            .as_deref()
            .ok_or_else(|| missing(visual_id, format!("{}_field", axis)))?;
        let field_type = field_type
            .as_deref()
            .ok_or_else(|| missing(visual_id, format!("{}_field_type", axis)))?;
        let dataset = self.dataset(visual_id, axis, dataset)?;
        let mut input = FieldInput::new(field, dataset, field_type);
        input.extra = extra.clone();
        Ok(input)
    }

    fn dataset(
        &self,
        visual_id: &VisualId,
        axis: &str,
        dataset: &Option<String>,
    ) -> CoreResult<DatasetIdentifier> {
        let dataset = dataset
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| missing(visual_id, format!("{}_dataset_identifier", axis)))?;
        DatasetIdentifier::parse(dataset)
    }
}

fn missing(visual_id: &VisualId, key: String) -> CoreError {
    CoreError::InvalidConfiguration {
        kind: VisualId::KIND,
        id: visual_id.to_string(),
        message: format!("missing '{}'", key),
    }
}

/// A spec that was not applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedVisual {
    pub visual_id: String,
    pub reason: String,
}

/// Outcome of a batch: what was created and what was skipped, in input order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub created: Vec<VisualId>,
    pub skipped: Vec<SkippedVisual>,
}

impl BatchReport {
    /// Some specs succeeded and some were skipped
    pub fn is_partial(&self) -> bool {
        !self.created.is_empty() && !self.skipped.is_empty()
    }

    /// No spec was skipped
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

impl std::fmt::Display for BatchReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let created: Vec<&str> = self.created.iter().map(|id| id.as_str()).collect();
        write!(
            f,
            "created {} visual(s) [{}], skipped {}",
            self.created.len(),
            created.join(", "),
            self.skipped.len()
        )?;
        if !self.skipped.is_empty() {
            let skipped: Vec<String> = self
                .skipped
                .iter()
                .map(|s| format!("{}: {}", s.visual_id, s.reason))
                .collect();
            write!(f, " [{}]", skipped.join("; "))?;
        }
        Ok(())
    }
}

impl AnalysisBuilder {
    /// Create or replace several visuals on one sheet.
    ///
    /// The sheet must exist. Each spec is applied independently and all-or-
    /// nothing; failures are reported rather than returned.
    pub fn create_visuals(&mut self, sheet_id: &str, specs: &[VisualSpec]) -> CoreResult<BatchReport> {
        let sheet_id = self.require_sheet(sheet_id)?.id().clone();
        let mut report = BatchReport::default();

        for spec in specs {
            let result = spec.to_request(&sheet_id).and_then(|request| match &request {
                VisualRequest::Chart(chart) => {
                    self.configure_chart_visual(chart).map(|_| chart.visual_id.clone())
                }
                VisualRequest::Table(table) => {
                    self.configure_table_visual(table).map(|_| table.visual_id.clone())
                }
            });
            match result {
                Ok(id) => report.created.push(id),
                Err(e) => {
                    log::debug!("Skipped visual '{}': {}", spec.visual_id, e);
                    report.skipped.push(SkippedVisual {
                        visual_id: spec.visual_id.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        if report.is_partial() {
            log::warn!(
                "Batch on sheet '{}' partially applied: {} created, {} skipped",
                sheet_id,
                report.created.len(),
                report.skipped.len()
            );
        }
        Ok(report)
    }
}

#[cfg(test)]
#[path = "batch_test.rs"]
mod tests;
