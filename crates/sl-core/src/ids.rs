//! Identifiers for every named entity in an analysis draft.
//!
//! Each namespace gets its own type so a filter id can never be passed where a
//! sheet id is expected. Uniqueness is scoped to one builder: the builder keeps
//! one ordered map per namespace keyed by these types.

use crate::newtype_string::define_id;

define_id! {
    /// AWS-style account owning the analysis.
    pub struct AccountId => "Account";
}

define_id! {
    /// Id of the analysis resource being produced.
    pub struct AnalysisId => "Analysis";
}

define_id! {
    /// Logical dataset identifier: the join key every field binding and filter uses.
    pub struct DatasetIdentifier => "Dataset";
}

define_id! {
    /// Id of a sheet (page) in the analysis.
    pub struct SheetId => "Sheet";
}

define_id! {
    /// Id of a chart or table.
    pub struct VisualId => "Visual";
}

define_id! {
    /// Id of a filter predicate.
    pub struct FilterId => "Filter";
}

define_id! {
    /// Id of a UI control bound to a filter.
    pub struct FilterControlId => "Filter control";
}

define_id! {
    /// Id of a single-dataset bundle of filters.
    pub struct FilterGroupId => "Filter group";
}

/// Key of a builder in the [`BuilderRegistry`](crate::registry::BuilderRegistry).
///
/// The (analysis, account) pair itself; ids may contain `:`, so the string
/// form is for display only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BuilderKey {
    analysis_id: AnalysisId,
    account_id: AccountId,
}

impl BuilderKey {
    /// Derive the key for an (analysis, account) pair
    pub fn derive(analysis_id: &AnalysisId, account_id: &AccountId) -> Self {
        Self {
            analysis_id: analysis_id.clone(),
            account_id: account_id.clone(),
        }
    }

    pub fn analysis_id(&self) -> &AnalysisId {
        &self.analysis_id
    }

    pub fn account_id(&self) -> &AccountId {
        &self.account_id
    }
}

impl std::fmt::Display for BuilderKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.analysis_id, self.account_id)
    }
}

#[cfg(test)]
#[path = "ids_test.rs"]
mod tests;
