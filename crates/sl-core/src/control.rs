//! Filter controls: UI widgets exposing one source filter.

use crate::document::{
    DateTimePickerControl, DateTimePickerDisplayOptions, DropdownControl, DropdownDisplayOptions,
    FilterControlDefinition, SelectAllOptions,
};
use crate::error::{CoreError, CoreResult};
use crate::ids::{FilterControlId, FilterId, SheetId};
use crate::keyword::keyword_enum;
use crate::visual::Visibility;
use serde::Deserialize;

keyword_enum! {
    /// Control variant
    pub enum ControlType("filter control type") {
        DateTimePicker => "DateTimePicker",
        Dropdown => "Dropdown",
    }
}

keyword_enum! {
    /// Date picker mode
    pub enum DateTimePickerType("date time picker type") {
        SingleValued => "SINGLE_VALUED",
        DateRange => "DATE_RANGE",
    }
}

keyword_enum! {
    /// Dropdown selection mode
    pub enum SelectionType("selection type") {
        MultiSelect => "MULTI_SELECT",
        SingleSelect => "SINGLE_SELECT",
    }
}

/// Date picker configuration; both fields are required
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DateTimePickerConfig {
    pub date_time_format: String,
    #[serde(rename = "type")]
    pub picker_type: DateTimePickerType,
}

/// Dropdown configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "DropdownInput")]
pub struct DropdownConfig {
    pub selection_type: SelectionType,
    pub select_all_visibility: Visibility,
}

impl Default for DropdownConfig {
    fn default() -> Self {
        Self {
            selection_type: SelectionType::MultiSelect,
            select_all_visibility: Visibility::Visible,
        }
    }
}

// Accepts `{type, display_options: {select_all_options: {visibility}}}`
#[derive(Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct DropdownInput {
    #[serde(rename = "type")]
    selection_type: Option<SelectionType>,
    display_options: DropdownDisplayInput,
}

#[derive(Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct DropdownDisplayInput {
    select_all_options: SelectAllInput,
}

#[derive(Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SelectAllInput {
    visibility: Option<Visibility>,
}

impl From<DropdownInput> for DropdownConfig {
    fn from(input: DropdownInput) -> Self {
        let defaults = DropdownConfig::default();
        Self {
            selection_type: input.selection_type.unwrap_or(defaults.selection_type),
            select_all_visibility: input
                .display_options
                .select_all_options
                .visibility
                .unwrap_or(defaults.select_all_visibility),
        }
    }
}

/// Per-variant control configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlConfig {
    DateTimePicker(DateTimePickerConfig),
    Dropdown(DropdownConfig),
}

impl ControlConfig {
    /// Build a configuration from a type keyword and an optional loose object
    pub fn from_parts(
        control_type: &str,
        config: Option<serde_json::Value>,
        id: &FilterControlId,
    ) -> CoreResult<Self> {
        let control_type = ControlType::parse(control_type)?;
        let config = config.filter(|v| !v.is_null());
        let invalid = |message: String| CoreError::InvalidConfiguration {
            kind: FilterControlId::KIND,
            id: id.to_string(),
            message,
        };

        match (control_type, config) {
            (ControlType::DateTimePicker, None) => Err(invalid(
                "DateTimePicker requires 'date_time_format' and 'type'".to_string(),
            )),
            (ControlType::DateTimePicker, Some(v)) => {
                let cfg: DateTimePickerConfig =
                    serde_json::from_value(v).map_err(|e| invalid(e.to_string()))?;
                if cfg.date_time_format.trim().is_empty() {
                    return Err(invalid("'date_time_format' must not be empty".to_string()));
                }
                Ok(ControlConfig::DateTimePicker(cfg))
            }
            (ControlType::Dropdown, None) => Ok(ControlConfig::Dropdown(DropdownConfig::default())),
            (ControlType::Dropdown, Some(v)) => Ok(ControlConfig::Dropdown(
                serde_json::from_value(v).map_err(|e| invalid(e.to_string()))?,
            )),
        }
    }

    pub fn control_type(&self) -> ControlType {
        match self {
            ControlConfig::DateTimePicker(_) => ControlType::DateTimePicker,
            ControlConfig::Dropdown(_) => ControlType::Dropdown,
        }
    }
}

/// A UI control bound to one filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterControl {
    id: FilterControlId,
    source_filter: FilterId,
    title: String,
    config: ControlConfig,
    sheet: Option<SheetId>,
}

impl FilterControl {
    pub fn new(
        id: FilterControlId,
        source_filter: FilterId,
        title: impl Into<String>,
        config: ControlConfig,
    ) -> Self {
        Self {
            id,
            source_filter,
            title: title.into(),
            config,
            sheet: None,
        }
    }

    pub fn id(&self) -> &FilterControlId {
        &self.id
    }

    pub fn source_filter(&self) -> &FilterId {
        &self.source_filter
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn config(&self) -> &ControlConfig {
        &self.config
    }

    /// Sheet hosting the control, if attached
    pub fn sheet(&self) -> Option<&SheetId> {
        self.sheet.as_ref()
    }

    pub(crate) fn set_sheet(&mut self, sheet: SheetId) {
        self.sheet = Some(sheet);
    }

    pub fn to_definition(&self) -> FilterControlDefinition {
        match &self.config {
            ControlConfig::DateTimePicker(cfg) => {
                FilterControlDefinition::DateTimePicker(DateTimePickerControl {
                    filter_control_id: self.id.to_string(),
                    title: self.title.clone(),
                    source_filter_id: self.source_filter.to_string(),
                    display_options: DateTimePickerDisplayOptions {
                        date_time_format: cfg.date_time_format.clone(),
                    },
                    picker_type: cfg.picker_type,
                })
            }
            ControlConfig::Dropdown(cfg) => FilterControlDefinition::Dropdown(DropdownControl {
                filter_control_id: self.id.to_string(),
                title: self.title.clone(),
                source_filter_id: self.source_filter.to_string(),
                display_options: DropdownDisplayOptions {
                    select_all_options: SelectAllOptions {
                        visibility: cfg.select_all_visibility,
                    },
                },
                selection_type: cfg.selection_type,
            }),
        }
    }
}

#[cfg(test)]
#[path = "control_test.rs"]
mod tests;
