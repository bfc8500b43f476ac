//! Visuals: one tagged type covering bar, line, pie and table charts.
//!
//! Every variant shares the same three wells (category, values, colors) and the
//! same [`Visual::bind_axis`] entry point; what differs per variant is which
//! axes exist and whether an axis holds one field or many.

use crate::document::{
    AggregatedFieldWells, ChartConfiguration, ChartVisual, DateDimensionField, DateMeasureField,
    DimensionFieldDefinition, FieldWells, FormatText, MeasureFieldDefinition,
    NumericalAggregationFunction, NumericalMeasureField, PlainField, TableAggregatedFieldWells,
    VisualDefinition, VisualTitle,
};
use crate::error::{CoreError, CoreResult};
use crate::field::{resolve_field, Axis, BoundField, DimensionField, FieldInput, MeasureField};
use crate::ids::{SheetId, VisualId};
use crate::keyword::keyword_enum;

keyword_enum! {
    /// Chart variant
    pub enum VisualType("visual type") {
        Bar => "BAR",
        Line => "LINE",
        Pie => "PIE",
        Table => "TABLE",
    }
}

keyword_enum! {
    /// Visibility of titles and select-all options
    pub enum Visibility("visibility") {
        Visible => "VISIBLE",
        Hidden => "HIDDEN",
    }
}

impl VisualType {
    /// Whether the variant has the given axis
    pub fn supports(&self, axis: Axis) -> bool {
        match axis {
            Axis::X | Axis::Y => true,
            Axis::Color => matches!(self, VisualType::Bar | VisualType::Line),
        }
    }

    /// Tables accumulate columns; charts hold one field per axis
    pub fn is_multi_field(&self) -> bool {
        matches!(self, VisualType::Table)
    }

    /// Bar, line and pie charts
    pub fn is_chart(&self) -> bool {
        !self.is_multi_field()
    }
}

/// Plain-text visual title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title {
    pub text: String,
    pub visibility: Visibility,
}

/// A chart or table in the draft
#[derive(Debug, Clone, PartialEq)]
pub struct Visual {
    id: VisualId,
    visual_type: VisualType,
    title: Option<Title>,
    category: Vec<DimensionField>,
    values: Vec<MeasureField>,
    colors: Vec<DimensionField>,
    sheet: Option<SheetId>,
}

impl Visual {
    /// Create an empty visual
    pub fn new(id: VisualId, visual_type: VisualType) -> Self {
        Self {
            id,
            visual_type,
            title: None,
            category: Vec::new(),
            values: Vec::new(),
            colors: Vec::new(),
            sheet: None,
        }
    }

    pub fn id(&self) -> &VisualId {
        &self.id
    }

    pub fn visual_type(&self) -> VisualType {
        self.visual_type
    }

    pub fn title(&self) -> Option<&Title> {
        self.title.as_ref()
    }

    /// Sheet the visual is attached to, if any
    pub fn sheet(&self) -> Option<&SheetId> {
        self.sheet.as_ref()
    }

    pub fn category(&self) -> &[DimensionField] {
        &self.category
    }

    pub fn values(&self) -> &[MeasureField] {
        &self.values
    }

    pub fn colors(&self) -> &[DimensionField] {
        &self.colors
    }

    pub fn set_title(&mut self, text: impl Into<String>, visibility: Visibility) {
        self.title = Some(Title {
            text: text.into(),
            visibility,
        });
    }

    pub(crate) fn set_sheet(&mut self, sheet: SheetId) {
        self.sheet = Some(sheet);
    }

    /// Validate and bind a field to an axis.
    ///
    /// On error the visual is unchanged.
    pub fn bind_axis(&mut self, axis: Axis, input: &FieldInput) -> CoreResult<()> {
        if !self.visual_type.supports(axis) {
            return Err(CoreError::UnsupportedAxis {
                visual_type: self.visual_type.to_string(),
                visual: self.id.to_string(),
                axis: axis.to_string(),
            });
        }

        let field = resolve_field(&self.id, axis, input)?;
        self.check_category_rule(axis, &field)?;

        match (axis, field) {
            (Axis::X, BoundField::Dimension(d)) => {
                if self.visual_type.is_multi_field() {
                    self.check_duplicate(axis, d.column().column.as_str(), &self.category)?;
                    self.category.push(d);
                } else {
                    self.category = vec![d];
                }
            }
            (Axis::Color, BoundField::Dimension(d)) => self.colors = vec![d],
            (Axis::Y, BoundField::Measure(m)) => {
                if self.visual_type.is_multi_field() {
                    let taken = self.values.iter().any(|v| v.column().column == input.column);
                    if taken {
                        return Err(self.duplicate(axis, &input.column));
                    }
                    self.values.push(m);
                } else {
                    self.values = vec![m];
                }
            }
            // resolve_field only yields measures for y and dimensions otherwise
            (axis, _) => {
                return Err(CoreError::InvalidAxisType {
                    axis: axis.to_string(),
                    field_type: input.semantic_type.to_uppercase(),
                    allowed: String::new(),
                })
            }
        }

        log::debug!(
            "Bound '{}' ({}) to {}-axis of visual '{}'",
            input.column,
            input.semantic_type.to_uppercase(),
            axis,
            self.id
        );
        Ok(())
    }

    /// At most one of x and color may carry a categorical field.
    fn check_category_rule(&self, axis: Axis, field: &BoundField) -> CoreResult<()> {
        if !field.is_categorical() {
            return Ok(());
        }
        let (other_axis, other_well) = match axis {
            Axis::X => (Axis::Color, &self.colors),
            Axis::Color => (Axis::X, &self.category),
            Axis::Y => return Ok(()),
        };
        if other_well.iter().any(DimensionField::is_categorical) {
            return Err(CoreError::CategoryConflict {
                visual: self.id.to_string(),
                axis: axis.to_string(),
                existing: other_axis.to_string(),
            });
        }
        Ok(())
    }

    fn check_duplicate(&self, axis: Axis, column: &str, well: &[DimensionField]) -> CoreResult<()> {
        if well.iter().any(|f| f.column().column == column) {
            return Err(self.duplicate(axis, column));
        }
        Ok(())
    }

    fn duplicate(&self, axis: Axis, column: &str) -> CoreError {
        CoreError::DuplicateField {
            visual: self.id.to_string(),
            axis: axis.to_string(),
            column: column.to_string(),
        }
    }

    /// Render into the wire representation
    pub fn to_definition(&self) -> VisualDefinition {
        let category: Vec<_> = self.category.iter().map(dimension_definition).collect();
        let values: Vec<_> = self.values.iter().map(measure_definition).collect();
        let colors: Vec<_> = self.colors.iter().map(dimension_definition).collect();

        let wells = AggregatedFieldWells {
            category,
            values,
            colors,
        };

        let configuration = match self.visual_type {
            VisualType::Bar => ChartConfiguration {
                field_wells: FieldWells::BarChartAggregatedFieldWells(wells),
                orientation: Some("VERTICAL".to_string()),
                bars_arrangement: Some("CLUSTERED".to_string()),
                chart_type: None,
            },
            VisualType::Line => ChartConfiguration {
                field_wells: FieldWells::LineChartAggregatedFieldWells(wells),
                orientation: None,
                bars_arrangement: None,
                chart_type: Some("LINE".to_string()),
            },
            VisualType::Pie => ChartConfiguration {
                field_wells: FieldWells::PieChartAggregatedFieldWells(wells),
                orientation: None,
                bars_arrangement: None,
                chart_type: None,
            },
            VisualType::Table => ChartConfiguration {
                field_wells: FieldWells::TableAggregatedFieldWells(TableAggregatedFieldWells {
                    group_by: wells.category,
                    values: wells.values,
                }),
                orientation: None,
                bars_arrangement: None,
                chart_type: None,
            },
        };

        let visual = ChartVisual {
            visual_id: self.id.to_string(),
            title: self.title.as_ref().map(|t| VisualTitle {
                visibility: t.visibility,
                format_text: FormatText {
                    plain_text: t.text.clone(),
                },
            }),
            chart_configuration: configuration,
        };

        match self.visual_type {
            VisualType::Bar => VisualDefinition::BarChartVisual(visual),
            VisualType::Line => VisualDefinition::LineChartVisual(visual),
            VisualType::Pie => VisualDefinition::PieChartVisual(visual),
            VisualType::Table => VisualDefinition::TableVisual(visual),
        }
    }
}

fn dimension_definition(field: &DimensionField) -> DimensionFieldDefinition {
    match field {
        DimensionField::Categorical { field_id, column } => {
            DimensionFieldDefinition::CategoricalDimensionField(PlainField {
                field_id: field_id.clone(),
                column: column.clone(),
            })
        }
        DimensionField::Date {
            field_id,
            column,
            granularity,
        } => DimensionFieldDefinition::DateDimensionField(DateDimensionField {
            field_id: field_id.clone(),
            column: column.clone(),
            date_granularity: *granularity,
        }),
        DimensionField::Numerical { field_id, column } => {
            DimensionFieldDefinition::NumericalDimensionField(PlainField {
                field_id: field_id.clone(),
                column: column.clone(),
            })
        }
    }
}

fn measure_definition(field: &MeasureField) -> MeasureFieldDefinition {
    match field {
        MeasureField::Numerical {
            field_id,
            column,
            aggregation,
        } => MeasureFieldDefinition::NumericalMeasureField(NumericalMeasureField {
            field_id: field_id.clone(),
            column: column.clone(),
            aggregation_function: aggregation.map(|a| NumericalAggregationFunction {
                simple_numerical_aggregation: a,
            }),
        }),
        MeasureField::Date {
            field_id,
            column,
            aggregation,
        } => MeasureFieldDefinition::DateMeasureField(DateMeasureField {
            field_id: field_id.clone(),
            column: column.clone(),
            aggregation_function: *aggregation,
        }),
    }
}

#[cfg(test)]
#[path = "visual_test.rs"]
mod tests;
