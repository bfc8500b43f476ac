//! Filter groups: single-dataset bundles of filters.

use crate::document::{
    FilterGroupDefinition, FilterScopeConfiguration, SelectedSheets,
    SheetVisualScopingConfiguration,
};
use crate::filter::Filter;
use crate::ids::{DatasetIdentifier, FilterGroupId, FilterId, SheetId, VisualId};

/// Scope applied to every compiled group
pub const GROUP_SCOPE: &str = "SELECTED_VISUALS";
/// Status applied to every compiled group
pub const GROUP_STATUS: &str = "ENABLED";
/// Groups never mix datasets
pub const GROUP_CROSS_DATASET: &str = "SINGLE_DATASET";

/// A named bundle of filters sharing one dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterGroup {
    id: FilterGroupId,
    dataset: DatasetIdentifier,
    members: Vec<FilterId>,
}

impl FilterGroup {
    pub fn new(id: FilterGroupId, dataset: DatasetIdentifier) -> Self {
        Self {
            id,
            dataset,
            members: Vec::new(),
        }
    }

    pub fn id(&self) -> &FilterGroupId {
        &self.id
    }

    pub fn dataset(&self) -> &DatasetIdentifier {
        &self.dataset
    }

    /// Member filter ids in insertion order
    pub fn members(&self) -> &[FilterId] {
        &self.members
    }

    /// Append ids not already present; returns how many were added
    pub(crate) fn extend_members<'a>(&mut self, ids: impl IntoIterator<Item = &'a FilterId>) -> usize {
        let mut added = 0;
        for id in ids {
            if !self.members.contains(id) {
                self.members.push(id.clone());
                added += 1;
            }
        }
        added
    }

    /// Render with the fixed scope over `sheet` and `visuals`.
    ///
    /// `filters` must yield the member filters in member order.
    pub fn to_definition<'a>(
        &self,
        filters: impl IntoIterator<Item = &'a Filter>,
        sheet: &SheetId,
        visuals: impl IntoIterator<Item = &'a VisualId>,
    ) -> FilterGroupDefinition {
        FilterGroupDefinition {
            filter_group_id: self.id.to_string(),
            filters: filters.into_iter().map(Filter::to_definition).collect(),
            scope_configuration: FilterScopeConfiguration {
                selected_sheets: SelectedSheets {
                    sheet_visual_scoping_configurations: vec![SheetVisualScopingConfiguration {
                        sheet_id: sheet.to_string(),
                        scope: GROUP_SCOPE.to_string(),
                        visual_ids: visuals.into_iter().map(|v| v.to_string()).collect(),
                    }],
                },
            },
            status: GROUP_STATUS.to_string(),
            cross_dataset: GROUP_CROSS_DATASET.to_string(),
        }
    }
}
