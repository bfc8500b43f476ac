//! Compiled analysis document.
//!
//! These types are the contract with the rendering service: the builder's
//! state is rendered into an [`AnalysisDocument`], which serializes to the
//! nested PascalCase JSON the service accepts. Union-shaped objects (visuals,
//! fields, filters, controls, layouts) are externally tagged enums, so a bar
//! chart serializes as `{"BarChartVisual": {...}}`.

use crate::checksum::compute_checksum;
use crate::control::{DateTimePickerType, SelectionType};
use crate::error::CoreResult;
use crate::field::{ColumnRef, DateAggregation, DateGranularity, NumericAggregation};
use crate::filter::{MatchOperator, NullOption, RangeBound};
use crate::visual::Visibility;
use serde::{Deserialize, Serialize};

/// Top-level create-analysis payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AnalysisDocument {
    pub aws_account_id: String,
    pub analysis_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<ResourcePermission>,
    pub definition: AnalysisDefinition,
}

impl AnalysisDocument {
    /// Pretty JSON used for the audit artifact and `--output`
    pub fn to_pretty_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// SHA-256 of the compact JSON form
    pub fn checksum(&self) -> CoreResult<String> {
        Ok(compute_checksum(&serde_json::to_string(self)?))
    }

    /// `(DataSetArn, Identifier)` pairs in declaration order
    pub fn dataset_pairs(&self) -> Vec<(&str, &str)> {
        self.definition
            .data_set_identifier_declarations
            .iter()
            .map(|d| (d.data_set_arn.as_str(), d.identifier.as_str()))
            .collect()
    }

    /// Find a compiled sheet by id
    pub fn sheet(&self, sheet_id: &str) -> Option<&SheetDefinition> {
        self.definition.sheets.iter().find(|s| s.sheet_id == sheet_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourcePermission {
    pub principal: String,
    pub actions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AnalysisDefinition {
    pub data_set_identifier_declarations: Vec<DataSetIdentifierDeclaration>,
    #[serde(default)]
    pub sheets: Vec<SheetDefinition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filter_groups: Vec<FilterGroupDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_defaults: Option<AnalysisDefaults>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DataSetIdentifierDeclaration {
    pub identifier: String,
    pub data_set_arn: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AnalysisDefaults {
    pub default_new_sheet_configuration: DefaultNewSheetConfiguration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DefaultNewSheetConfiguration {
    pub interactive_layout_configuration: InteractiveLayoutConfiguration,
    pub sheet_content_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InteractiveLayoutConfiguration {
    pub grid: GridCanvas,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GridCanvas {
    pub canvas_size_options: CanvasSizeOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CanvasSizeOptions {
    pub screen_canvas_size_options: ScreenCanvasSizeOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScreenCanvasSizeOptions {
    pub resize_option: String,
    pub optimized_view_port_width: String,
}

impl CanvasSizeOptions {
    /// Fixed-width canvas
    pub fn fixed(width_px: u32) -> Self {
        Self {
            screen_canvas_size_options: ScreenCanvasSizeOptions {
                resize_option: "FIXED".to_string(),
                optimized_view_port_width: format!("{}px", width_px),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Sheets and layouts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SheetDefinition {
    pub sheet_id: String,
    pub name: String,
    pub content_type: String,
    #[serde(default)]
    pub visuals: Vec<VisualDefinition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filter_controls: Vec<FilterControlDefinition>,
    #[serde(default)]
    pub layouts: Vec<Layout>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sheet_control_layouts: Vec<SheetControlLayout>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Layout {
    pub configuration: LayoutConfiguration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LayoutConfiguration {
    GridLayout(GridLayoutConfiguration),
    FreeFormLayout(FreeFormLayoutConfiguration),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GridLayoutConfiguration {
    pub elements: Vec<GridLayoutElement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canvas_size_options: Option<CanvasSizeOptions>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ElementType {
    Visual,
    FilterControl,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GridLayoutElement {
    pub element_id: String,
    pub element_type: ElementType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_index: Option<u32>,
    pub column_span: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_index: Option<u32>,
    pub row_span: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FreeFormLayoutConfiguration {
    pub elements: Vec<FreeFormLayoutElement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FreeFormLayoutElement {
    pub element_id: String,
    pub element_type: ElementType,
    pub x_axis_location: String,
    pub y_axis_location: String,
    pub width: String,
    pub height: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SheetControlLayout {
    pub configuration: SheetControlLayoutConfiguration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SheetControlLayoutConfiguration {
    pub grid_layout: GridLayoutConfiguration,
}

// ---------------------------------------------------------------------------
// Visuals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VisualDefinition {
    BarChartVisual(ChartVisual),
    LineChartVisual(ChartVisual),
    PieChartVisual(ChartVisual),
    TableVisual(ChartVisual),
}

impl VisualDefinition {
    /// The wrapped visual, whatever its variant
    pub fn inner(&self) -> &ChartVisual {
        match self {
            VisualDefinition::BarChartVisual(v)
            | VisualDefinition::LineChartVisual(v)
            | VisualDefinition::PieChartVisual(v)
            | VisualDefinition::TableVisual(v) => v,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChartVisual {
    pub visual_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<VisualTitle>,
    pub chart_configuration: ChartConfiguration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VisualTitle {
    pub visibility: Visibility,
    pub format_text: FormatText,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FormatText {
    pub plain_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChartConfiguration {
    pub field_wells: FieldWells,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bars_arrangement: Option<String>,
    #[serde(rename = "Type", default, skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldWells {
    BarChartAggregatedFieldWells(AggregatedFieldWells),
    LineChartAggregatedFieldWells(AggregatedFieldWells),
    PieChartAggregatedFieldWells(AggregatedFieldWells),
    TableAggregatedFieldWells(TableAggregatedFieldWells),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AggregatedFieldWells {
    #[serde(default)]
    pub category: Vec<DimensionFieldDefinition>,
    #[serde(default)]
    pub values: Vec<MeasureFieldDefinition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<DimensionFieldDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TableAggregatedFieldWells {
    #[serde(default)]
    pub group_by: Vec<DimensionFieldDefinition>,
    #[serde(default)]
    pub values: Vec<MeasureFieldDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DimensionFieldDefinition {
    CategoricalDimensionField(PlainField),
    DateDimensionField(DateDimensionField),
    NumericalDimensionField(PlainField),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlainField {
    pub field_id: String,
    pub column: ColumnRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DateDimensionField {
    pub field_id: String,
    pub column: ColumnRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_granularity: Option<DateGranularity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MeasureFieldDefinition {
    NumericalMeasureField(NumericalMeasureField),
    DateMeasureField(DateMeasureField),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NumericalMeasureField {
    pub field_id: String,
    pub column: ColumnRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation_function: Option<NumericalAggregationFunction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NumericalAggregationFunction {
    pub simple_numerical_aggregation: NumericAggregation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DateMeasureField {
    pub field_id: String,
    pub column: ColumnRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation_function: Option<DateAggregation>,
}

// ---------------------------------------------------------------------------
// Filters, controls and groups
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterDefinition {
    CategoryFilter(CategoryFilterDefinition),
    TimeRangeFilter(TimeRangeFilterDefinition),
}

impl FilterDefinition {
    /// Id of the wrapped filter
    pub fn filter_id(&self) -> &str {
        match self {
            FilterDefinition::CategoryFilter(f) => &f.filter_id,
            FilterDefinition::TimeRangeFilter(f) => &f.filter_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CategoryFilterDefinition {
    pub filter_id: String,
    pub column: ColumnRef,
    pub configuration: CategoryFilterConfiguration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CategoryFilterConfiguration {
    pub filter_list_configuration: FilterListConfiguration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FilterListConfiguration {
    pub match_operator: MatchOperator,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub category_values: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select_all_options: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub null_option: Option<NullOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TimeRangeFilterDefinition {
    pub filter_id: String,
    pub column: ColumnRef,
    pub null_option: NullOption,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_minimum: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_maximum: Option<bool>,
    pub range_minimum_value: RangeBound,
    pub range_maximum_value: RangeBound,
    pub time_granularity: DateGranularity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterControlDefinition {
    DateTimePicker(DateTimePickerControl),
    Dropdown(DropdownControl),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DateTimePickerControl {
    pub filter_control_id: String,
    pub title: String,
    pub source_filter_id: String,
    pub display_options: DateTimePickerDisplayOptions,
    #[serde(rename = "Type")]
    pub picker_type: DateTimePickerType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DateTimePickerDisplayOptions {
    pub date_time_format: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DropdownControl {
    pub filter_control_id: String,
    pub title: String,
    pub source_filter_id: String,
    pub display_options: DropdownDisplayOptions,
    #[serde(rename = "Type")]
    pub selection_type: SelectionType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DropdownDisplayOptions {
    pub select_all_options: SelectAllOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SelectAllOptions {
    pub visibility: Visibility,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FilterGroupDefinition {
    pub filter_group_id: String,
    pub filters: Vec<FilterDefinition>,
    pub scope_configuration: FilterScopeConfiguration,
    pub status: String,
    pub cross_dataset: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FilterScopeConfiguration {
    pub selected_sheets: SelectedSheets,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SelectedSheets {
    pub sheet_visual_scoping_configurations: Vec<SheetVisualScopingConfiguration>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SheetVisualScopingConfiguration {
    pub sheet_id: String,
    pub scope: String,
    pub visual_ids: Vec<String>,
}

#[cfg(test)]
#[path = "document_test.rs"]
mod tests;
