//! Sheets and the layout engine.
//!
//! A sheet holds its visuals and filter controls by id and records one grid
//! placement per element. Placement is keyed by element id, so placing an
//! element again replaces its slot without changing its position in the
//! layout order. Overlap between siblings is not checked.

use crate::document::{
    CanvasSizeOptions, ElementType, FilterControlDefinition, FreeFormLayoutConfiguration,
    FreeFormLayoutElement, GridLayoutConfiguration, GridLayoutElement, Layout, LayoutConfiguration,
    SheetControlLayout, SheetControlLayoutConfiguration, SheetDefinition, VisualDefinition,
};
use crate::error::{CoreError, CoreResult};
use crate::ids::{FilterControlId, SheetId, VisualId};
use crate::keyword::keyword_enum;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Columns in the layout grid
pub const GRID_COLUMNS: u32 = 24;

/// Content type of every sheet
pub const SHEET_CONTENT_TYPE: &str = "INTERACTIVE";

keyword_enum! {
    /// How a sheet's visual layout is rendered
    pub enum LayoutMode("layout mode") {
        Grid => "GRID",
        FreeForm => "FREE_FORM",
    }
}

/// Visual position and size in grid units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPlacement {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl GridPlacement {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Width must be in 1..=24 and height at least 1
    pub fn validate(&self, element: &str) -> CoreResult<()> {
        if self.width == 0 || self.width > GRID_COLUMNS {
            return Err(CoreError::LayoutOutOfRange {
                element: element.to_string(),
                message: format!("width {} must be between 1 and {}", self.width, GRID_COLUMNS),
            });
        }
        if self.height == 0 {
            return Err(CoreError::LayoutOutOfRange {
                element: element.to_string(),
                message: "height must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Filter control slot in the sheet control layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlSlot {
    pub column_span: u32,
    pub row_span: u32,
}

impl ControlSlot {
    pub fn new(column_span: u32, row_span: u32) -> Self {
        Self {
            column_span,
            row_span,
        }
    }

    pub fn validate(&self, element: &str) -> CoreResult<()> {
        if self.column_span == 0 || self.column_span > GRID_COLUMNS {
            return Err(CoreError::LayoutOutOfRange {
                element: element.to_string(),
                message: format!(
                    "column span {} must be between 1 and {}",
                    self.column_span, GRID_COLUMNS
                ),
            });
        }
        if self.row_span == 0 {
            return Err(CoreError::LayoutOutOfRange {
                element: element.to_string(),
                message: "row span must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// A page of the analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    id: SheetId,
    name: String,
    layout_mode: LayoutMode,
    visuals: Vec<VisualId>,
    controls: Vec<FilterControlId>,
    visual_layout: IndexMap<VisualId, GridPlacement>,
    control_layout: IndexMap<FilterControlId, ControlSlot>,
}

impl Sheet {
    /// New sheet in GRID mode
    pub fn new(id: SheetId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            layout_mode: LayoutMode::Grid,
            visuals: Vec::new(),
            controls: Vec::new(),
            visual_layout: IndexMap::new(),
            control_layout: IndexMap::new(),
        }
    }

    pub fn id(&self) -> &SheetId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layout_mode(&self) -> LayoutMode {
        self.layout_mode
    }

    pub fn set_layout_mode(&mut self, mode: LayoutMode) {
        self.layout_mode = mode;
    }

    /// Attached visuals in attachment order
    pub fn visuals(&self) -> &[VisualId] {
        &self.visuals
    }

    /// Attached filter controls in attachment order
    pub fn controls(&self) -> &[FilterControlId] {
        &self.controls
    }

    pub fn visual_placement(&self, id: &VisualId) -> Option<&GridPlacement> {
        self.visual_layout.get(id)
    }

    pub fn control_slot(&self, id: &FilterControlId) -> Option<&ControlSlot> {
        self.control_layout.get(id)
    }

    pub(crate) fn attach_visual(&mut self, id: &VisualId) {
        if !self.visuals.contains(id) {
            self.visuals.push(id.clone());
        }
    }

    pub(crate) fn attach_control(&mut self, id: &FilterControlId) {
        if !self.controls.contains(id) {
            self.controls.push(id.clone());
        }
    }

    pub(crate) fn place_visual(&mut self, id: &VisualId, placement: GridPlacement) {
        self.visual_layout.insert(id.clone(), placement);
    }

    pub(crate) fn place_control(&mut self, id: &FilterControlId, slot: ControlSlot) {
        self.control_layout.insert(id.clone(), slot);
    }

    /// Render with the supplied visual and control definitions, which must be
    /// in the order of [`Sheet::visuals`] and [`Sheet::controls`].
    pub fn to_definition(
        &self,
        visuals: Vec<VisualDefinition>,
        filter_controls: Vec<FilterControlDefinition>,
        canvas_width_px: u32,
    ) -> SheetDefinition {
        let configuration = match self.layout_mode {
            LayoutMode::Grid => LayoutConfiguration::GridLayout(GridLayoutConfiguration {
                elements: self
                    .visual_layout
                    .iter()
                    .map(|(id, p)| GridLayoutElement {
                        element_id: id.to_string(),
                        element_type: ElementType::Visual,
                        column_index: Some(p.x),
                        column_span: p.width,
                        row_index: Some(p.y),
                        row_span: p.height,
                    })
                    .collect(),
                canvas_size_options: Some(CanvasSizeOptions::fixed(canvas_width_px)),
            }),
            LayoutMode::FreeForm => {
                let px = |units: u32| {
                    let value = u64::from(units) * u64::from(canvas_width_px) / u64::from(GRID_COLUMNS);
                    format!("{}px", value)
                };
                LayoutConfiguration::FreeFormLayout(FreeFormLayoutConfiguration {
                    elements: self
                        .visual_layout
                        .iter()
                        .map(|(id, p)| FreeFormLayoutElement {
                            element_id: id.to_string(),
                            element_type: ElementType::Visual,
                            x_axis_location: px(p.x),
                            y_axis_location: px(p.y),
                            width: px(p.width),
                            height: px(p.height),
                        })
                        .collect(),
                })
            }
        };

        let sheet_control_layouts = if self.control_layout.is_empty() {
            Vec::new()
        } else {
            vec![SheetControlLayout {
                configuration: SheetControlLayoutConfiguration {
                    grid_layout: GridLayoutConfiguration {
                        elements: self
                            .control_layout
                            .iter()
                            .map(|(id, slot)| GridLayoutElement {
                                element_id: id.to_string(),
                                element_type: ElementType::FilterControl,
                                column_index: None,
                                column_span: slot.column_span,
                                row_index: None,
                                row_span: slot.row_span,
                            })
                            .collect(),
                        canvas_size_options: None,
                    },
                },
            }]
        };

        SheetDefinition {
            sheet_id: self.id.to_string(),
            name: self.name.clone(),
            content_type: SHEET_CONTENT_TYPE.to_string(),
            visuals,
            filter_controls,
            layouts: vec![Layout { configuration }],
            sheet_control_layouts,
        }
    }
}

#[cfg(test)]
#[path = "sheet_test.rs"]
mod tests;
