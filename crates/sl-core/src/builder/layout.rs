//! Sheet attachment and grid placement.

use super::AnalysisBuilder;
use crate::error::{CoreError, CoreResult};
use crate::ids::{FilterControlId, SheetId, VisualId};
use crate::sheet::{ControlSlot, GridPlacement, LayoutMode};

impl AnalysisBuilder {
    /// Switch a sheet between GRID and FREE_FORM rendering; placements are kept
    pub fn set_sheet_layout(&mut self, sheet_id: &str, mode: LayoutMode) -> CoreResult<()> {
        let sheet = self
            .sheets
            .get_mut(sheet_id)
            .ok_or_else(|| CoreError::not_found(SheetId::KIND, sheet_id))?;
        sheet.set_layout_mode(mode);
        log::debug!("Sheet '{}' layout set to {}", sheet_id, mode);
        Ok(())
    }

    /// Attach a visual to a sheet. Re-attaching to the same sheet is a no-op.
    pub fn attach_visual(&mut self, sheet_id: &str, visual_id: &str) -> CoreResult<()> {
        let sheet = self.require_sheet(sheet_id)?.id().clone();
        let visual = self.require_visual(visual_id)?;
        if let Some(other) = visual.sheet() {
            if *other != sheet {
                return Err(CoreError::AlreadyPlaced {
                    kind: VisualId::KIND,
                    id: visual_id.to_string(),
                    sheet: other.to_string(),
                });
            }
        }
        let id = visual.id().clone();

        if let Some(visual) = self.visuals.get_mut(visual_id) {
            visual.set_sheet(sheet.clone());
        }
        if let Some(sheet) = self.sheets.get_mut(sheet_id) {
            sheet.attach_visual(&id);
        }
        log::debug!("Attached visual '{}' to sheet '{}'", visual_id, sheet_id);
        Ok(())
    }

    /// Place a visual on a sheet's grid, attaching it first if needed.
    ///
    /// Placing the same visual again replaces its element.
    pub fn place_visual(
        &mut self,
        sheet_id: &str,
        visual_id: &str,
        placement: GridPlacement,
    ) -> CoreResult<()> {
        placement.validate(visual_id)?;
        self.attach_visual(sheet_id, visual_id)?;
        let id = self.require_visual(visual_id)?.id().clone();
        if let Some(sheet) = self.sheets.get_mut(sheet_id) {
            sheet.place_visual(&id, placement);
        }
        log::debug!(
            "Placed visual '{}' at ({}, {}) size {}x{} on sheet '{}'",
            visual_id,
            placement.x,
            placement.y,
            placement.width,
            placement.height,
            sheet_id
        );
        Ok(())
    }

    /// Attach a filter control to a sheet. Re-attaching to the same sheet is a no-op.
    pub fn attach_filter_control(&mut self, sheet_id: &str, control_id: &str) -> CoreResult<()> {
        let sheet = self.require_sheet(sheet_id)?.id().clone();
        let control = self.require_control(control_id)?;
        if let Some(other) = control.sheet() {
            if *other != sheet {
                return Err(CoreError::AlreadyPlaced {
                    kind: FilterControlId::KIND,
                    id: control_id.to_string(),
                    sheet: other.to_string(),
                });
            }
        }
        let id = control.id().clone();

        if let Some(control) = self.controls.get_mut(control_id) {
            control.set_sheet(sheet.clone());
        }
        if let Some(sheet) = self.sheets.get_mut(sheet_id) {
            sheet.attach_control(&id);
        }
        log::debug!("Attached filter control '{}' to sheet '{}'", control_id, sheet_id);
        Ok(())
    }

    /// Place a filter control in a sheet's control layout, attaching it first if needed
    pub fn place_filter_control(
        &mut self,
        sheet_id: &str,
        control_id: &str,
        slot: ControlSlot,
    ) -> CoreResult<()> {
        slot.validate(control_id)?;
        self.attach_filter_control(sheet_id, control_id)?;
        let id = self.require_control(control_id)?.id().clone();
        if let Some(sheet) = self.sheets.get_mut(sheet_id) {
            sheet.place_control(&id, slot);
        }
        log::debug!(
            "Placed filter control '{}' ({}x{}) on sheet '{}'",
            control_id,
            slot.column_span,
            slot.row_span,
            sheet_id
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "layout_test.rs"]
mod tests;
