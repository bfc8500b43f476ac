//! Visual creation, field binding and composite visual configuration.

use super::AnalysisBuilder;
use crate::error::{CoreError, CoreResult};
use crate::field::{Axis, FieldInput};
use crate::ids::{DatasetIdentifier, SheetId, VisualId};
use crate::sheet::GridPlacement;
use crate::visual::{Visibility, Visual, VisualType};

/// Parallel field/type lists bound onto a table visual
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableFields {
    pub x_fields: Vec<String>,
    pub x_field_types: Vec<String>,
    pub x_dataset: DatasetIdentifier,
    /// Applied to every DATE column on x
    pub x_date_granularity: Option<String>,
    pub y_fields: Vec<String>,
    pub y_field_types: Vec<String>,
    pub y_dataset: DatasetIdentifier,
    /// Applied to every column on y
    pub y_aggregation: Option<String>,
}

impl TableFields {
    fn check_lengths(&self, visual: &VisualId) -> CoreResult<()> {
        for (axis, fields, types) in [
            (Axis::X, &self.x_fields, &self.x_field_types),
            (Axis::Y, &self.y_fields, &self.y_field_types),
        ] {
            if fields.len() != types.len() {
                return Err(CoreError::FieldListMismatch {
                    visual: visual.to_string(),
                    axis: axis.to_string(),
                    fields: fields.len(),
                    types: types.len(),
                });
            }
        }
        Ok(())
    }

    /// Bind every pair onto `visual`, x first
    fn apply(&self, visual: &mut Visual) -> CoreResult<()> {
        self.check_lengths(visual.id())?;
        for (column, semantic_type) in self.x_fields.iter().zip(&self.x_field_types) {
            let mut input = FieldInput::new(column, self.x_dataset.clone(), semantic_type);
            input.extra = self.x_date_granularity.clone();
            visual.bind_axis(Axis::X, &input)?;
        }
        for (column, semantic_type) in self.y_fields.iter().zip(&self.y_field_types) {
            let mut input = FieldInput::new(column, self.y_dataset.clone(), semantic_type);
            input.extra = self.y_aggregation.clone();
            visual.bind_axis(Axis::Y, &input)?;
        }
        Ok(())
    }
}

/// Full configuration of a bar, line or pie visual
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartVisualRequest {
    pub sheet_id: SheetId,
    pub visual_id: VisualId,
    pub visual_type: VisualType,
    pub title: Option<String>,
    pub x: FieldInput,
    pub y: FieldInput,
    pub color: Option<FieldInput>,
    pub placement: GridPlacement,
}

/// Full configuration of a table visual
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableVisualRequest {
    pub sheet_id: SheetId,
    pub visual_id: VisualId,
    pub title: Option<String>,
    pub fields: TableFields,
    pub placement: GridPlacement,
}

impl AnalysisBuilder {
    /// Create a visual, or select it if one with the same id and type exists
    pub fn create_visual(&mut self, id: VisualId, visual_type: VisualType) -> CoreResult<&Visual> {
        if let Some(existing) = self.visuals.get(&id) {
            if existing.visual_type() != visual_type {
                return Err(CoreError::ConflictingId {
                    kind: VisualId::KIND,
                    id: id.to_string(),
                    message: format!("type {}", existing.visual_type()),
                });
            }
            log::debug!("Selected existing visual '{}'", id);
        } else {
            log::debug!("Created {} visual '{}'", visual_type, id);
        }
        let visual = self
            .visuals
            .entry(id.clone())
            .or_insert_with(|| Visual::new(id, visual_type));
        Ok(visual)
    }

    /// Bind one field to an axis of an existing visual
    pub fn bind_axis(&mut self, visual_id: &str, axis: Axis, input: &FieldInput) -> CoreResult<()> {
        self.visuals
            .get_mut(visual_id)
            .ok_or_else(|| CoreError::not_found(VisualId::KIND, visual_id))?
            .bind_axis(axis, input)
    }

    /// Bind parallel field/type lists onto a table visual.
    ///
    /// List lengths are checked before anything is bound, and the call is
    /// all-or-nothing.
    pub fn bind_table_fields(&mut self, visual_id: &str, fields: &TableFields) -> CoreResult<()> {
        let mut staged = self.require_visual(visual_id)?.clone();
        if staged.visual_type() != VisualType::Table {
            return Err(not_a_table(&staged));
        }
        fields.apply(&mut staged)?;
        self.visuals.insert(staged.id().clone(), staged);
        Ok(())
    }

    /// Set a plain-text title on an existing visual
    pub fn set_visual_title(
        &mut self,
        visual_id: &str,
        title: &str,
        visibility: Visibility,
    ) -> CoreResult<()> {
        let visual = self
            .visuals
            .get_mut(visual_id)
            .ok_or_else(|| CoreError::not_found(VisualId::KIND, visual_id))?;
        visual.set_title(title, visibility);
        log::debug!("Set title of visual '{}'", visual_id);
        Ok(())
    }

    /// Create or replace a bar, line or pie visual and place it on a sheet.
    ///
    /// The visual is rebuilt from the request, so a previous configuration's
    /// field wells are discarded. Nothing is committed unless every binding
    /// and the placement are valid.
    pub fn configure_chart_visual(&mut self, request: &ChartVisualRequest) -> CoreResult<()> {
        if !request.visual_type.is_chart() {
            return Err(CoreError::InvalidConfiguration {
                kind: VisualId::KIND,
                id: request.visual_id.to_string(),
                message: format!(
                    "{} is not a chart type; configure it as a table",
                    request.visual_type
                ),
            });
        }
        self.check_configurable(&request.sheet_id, &request.visual_id, &request.placement)?;

        let mut visual = Visual::new(request.visual_id.clone(), request.visual_type);
        visual.bind_axis(Axis::X, &request.x)?;
        visual.bind_axis(Axis::Y, &request.y)?;
        if let Some(color) = &request.color {
            visual.bind_axis(Axis::Color, color)?;
        }
        self.commit_configured(visual, &request.sheet_id, request.title.as_deref(), request.placement);
        Ok(())
    }

    /// Create or replace a table visual and place it on a sheet
    pub fn configure_table_visual(&mut self, request: &TableVisualRequest) -> CoreResult<()> {
        self.check_configurable(&request.sheet_id, &request.visual_id, &request.placement)?;

        let mut visual = Visual::new(request.visual_id.clone(), VisualType::Table);
        request.fields.apply(&mut visual)?;
        self.commit_configured(visual, &request.sheet_id, request.title.as_deref(), request.placement);
        Ok(())
    }

    fn check_configurable(
        &self,
        sheet_id: &SheetId,
        visual_id: &VisualId,
        placement: &GridPlacement,
    ) -> CoreResult<()> {
        self.require_sheet(sheet_id)?;
        if let Some(other) = self.visuals.get(visual_id).and_then(Visual::sheet) {
            if other != sheet_id {
                return Err(CoreError::AlreadyPlaced {
                    kind: VisualId::KIND,
                    id: visual_id.to_string(),
                    sheet: other.to_string(),
                });
            }
        }
        placement.validate(visual_id)
    }

    fn commit_configured(
        &mut self,
        mut visual: Visual,
        sheet_id: &SheetId,
        title: Option<&str>,
        placement: GridPlacement,
    ) {
        if let Some(title) = title {
            visual.set_title(title, Visibility::Visible);
        }
        visual.set_sheet(sheet_id.clone());
        let id = visual.id().clone();
        log::debug!(
            "Configured {} visual '{}' on sheet '{}'",
            visual.visual_type(),
            id,
            sheet_id
        );
        self.visuals.insert(id.clone(), visual);
        if let Some(sheet) = self.sheets.get_mut(sheet_id) {
            sheet.attach_visual(&id);
            sheet.place_visual(&id, placement);
        }
    }
}

fn not_a_table(visual: &Visual) -> CoreError {
    CoreError::InvalidConfiguration {
        kind: VisualId::KIND,
        id: visual.id().to_string(),
        message: format!(
            "field lists bind onto TABLE visuals, not {}",
            visual.visual_type()
        ),
    }
}

#[cfg(test)]
#[path = "visuals_test.rs"]
mod tests;
