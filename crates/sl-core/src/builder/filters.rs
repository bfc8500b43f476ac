//! Filters, filter controls and filter groups.

use super::AnalysisBuilder;
use crate::control::{ControlConfig, FilterControl};
use crate::error::{CoreError, CoreResult};
use crate::field::ColumnRef;
use crate::filter::{Filter, FilterConfig};
use crate::filter_group::FilterGroup;
use crate::ids::{DatasetIdentifier, FilterControlId, FilterGroupId, FilterId};

impl AnalysisBuilder {
    /// Create a filter, or replace the column and configuration of an existing one.
    ///
    /// A filter that already belongs to a group cannot move to another dataset.
    pub fn create_filter(
        &mut self,
        id: FilterId,
        column: ColumnRef,
        config: FilterConfig,
    ) -> CoreResult<&Filter> {
        if column.column.trim().is_empty() {
            return Err(CoreError::InvalidConfiguration {
                kind: FilterId::KIND,
                id: id.to_string(),
                message: "column name must not be empty".to_string(),
            });
        }
        if let Some(group) = self
            .filter_groups
            .values()
            .find(|g| g.members().contains(&id) && *g.dataset() != column.dataset)
        {
            return Err(CoreError::DatasetMismatch {
                filter: id.to_string(),
                filter_dataset: column.dataset.to_string(),
                group: group.id().to_string(),
                group_dataset: group.dataset().to_string(),
            });
        }

        if self.filters.contains_key(&id) {
            log::debug!("Updated {} '{}'", config.filter_type(), id);
        } else {
            log::debug!(
                "Created {} '{}' on {}.{}",
                config.filter_type(),
                id,
                column.dataset,
                column.column
            );
        }
        let filter = Filter::new(id.clone(), column, config);
        self.filters.insert(id.clone(), filter);
        self.require_filter(&id)
    }

    /// Create a filter control bound to an existing filter, or replace one.
    ///
    /// A replaced control stays on the sheet it was attached to.
    pub fn create_filter_control(
        &mut self,
        id: FilterControlId,
        source_filter: &str,
        title: &str,
        config: ControlConfig,
    ) -> CoreResult<&FilterControl> {
        let source = self.require_filter(source_filter)?.id().clone();
        let mut control = FilterControl::new(id.clone(), source, title, config);
        match self.controls.get(&id).and_then(FilterControl::sheet) {
            Some(sheet) => {
                control.set_sheet(sheet.clone());
                log::debug!("Updated filter control '{}'", id);
            }
            None => log::debug!(
                "Created {} control '{}' for filter '{}'",
                control.config().control_type(),
                id,
                source_filter
            ),
        }
        self.controls.insert(id.clone(), control);
        self.require_control(&id)
    }

    /// Create a filter group for a dataset, or select it.
    ///
    /// The dataset of an existing group cannot change.
    pub fn create_filter_group(
        &mut self,
        id: FilterGroupId,
        dataset: DatasetIdentifier,
    ) -> CoreResult<&FilterGroup> {
        if let Some(existing) = self.filter_groups.get(&id) {
            if *existing.dataset() != dataset {
                return Err(CoreError::ConflictingId {
                    kind: FilterGroupId::KIND,
                    id: id.to_string(),
                    message: format!("dataset '{}'", existing.dataset()),
                });
            }
            log::debug!("Selected existing filter group '{}'", id);
        } else {
            log::debug!("Created filter group '{}' for dataset '{}'", id, dataset);
        }
        let group = self
            .filter_groups
            .entry(id.clone())
            .or_insert_with(|| FilterGroup::new(id, dataset));
        Ok(group)
    }

    /// Add filters to a group.
    ///
    /// Every filter must exist and share the group's dataset; otherwise the
    /// whole call fails and the membership is unchanged. Ids already in the
    /// group are skipped.
    pub fn add_filters_to_group(&mut self, group_id: &str, filter_ids: &[FilterId]) -> CoreResult<()> {
        let group = self
            .filter_groups
            .get(group_id)
            .ok_or_else(|| CoreError::not_found(FilterGroupId::KIND, group_id))?;

        for filter_id in filter_ids {
            let filter = self.require_filter(filter_id)?;
            if filter.dataset() != group.dataset() {
                return Err(CoreError::DatasetMismatch {
                    filter: filter_id.to_string(),
                    filter_dataset: filter.dataset().to_string(),
                    group: group_id.to_string(),
                    group_dataset: group.dataset().to_string(),
                });
            }
        }

        if let Some(group) = self.filter_groups.get_mut(group_id) {
            let added = group.extend_members(filter_ids);
            log::debug!(
                "Added {} filter(s) to group '{}' ({} member(s))",
                added,
                group_id,
                group.members().len()
            );
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "filters_test.rs"]
mod tests;
