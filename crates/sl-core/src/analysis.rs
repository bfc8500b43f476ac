//! Analysis resource and its definition container.

use crate::document::{
    AnalysisDefaults, CanvasSizeOptions, DataSetIdentifierDeclaration,
    DefaultNewSheetConfiguration, GridCanvas, InteractiveLayoutConfiguration, ResourcePermission,
};
use crate::error::{CoreError, CoreResult};
use crate::ids::{AnalysisId, DatasetIdentifier, FilterGroupId, SheetId};
use crate::keyword::keyword_enum;
use crate::sheet::SHEET_CONTENT_TYPE;
use indexmap::IndexMap;

keyword_enum! {
    /// Whether the analysis is newly created (and granted to a principal) or selected
    pub enum PermissionMode("permission mode") {
        Create => "CREATE",
        Select => "SELECT",
    }
}

/// Actions granted to the principal when an analysis is created
pub const ADMIN_ACTIONS: &[&str] = &[
    "quicksight:RestoreAnalysis",
    "quicksight:UpdateAnalysisPermissions",
    "quicksight:DeleteAnalysis",
    "quicksight:QueryAnalysis",
    "quicksight:DescribeAnalysisPermissions",
    "quicksight:DescribeAnalysis",
    "quicksight:UpdateAnalysis",
];

/// The top-level resource being produced
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    id: AnalysisId,
    name: String,
    permission_mode: PermissionMode,
    permissions: Vec<ResourcePermission>,
}

impl Analysis {
    /// Create the analysis. CREATE requires a principal to grant [`ADMIN_ACTIONS`] to.
    pub fn new(
        id: AnalysisId,
        name: impl Into<String>,
        permission_mode: PermissionMode,
        principal: Option<&str>,
    ) -> CoreResult<Self> {
        let permissions = match (permission_mode, principal.filter(|p| !p.trim().is_empty())) {
            (PermissionMode::Create, Some(principal)) => vec![ResourcePermission {
                principal: principal.to_string(),
                actions: ADMIN_ACTIONS.iter().map(|a| a.to_string()).collect(),
            }],
            (PermissionMode::Create, None) => {
                return Err(CoreError::InvalidConfiguration {
                    kind: AnalysisId::KIND,
                    id: id.to_string(),
                    message: "CREATE permission mode requires a principal".to_string(),
                })
            }
            (PermissionMode::Select, _) => Vec::new(),
        };
        Ok(Self {
            id,
            name: name.into(),
            permission_mode,
            permissions,
        })
    }

    pub fn id(&self) -> &AnalysisId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn permission_mode(&self) -> PermissionMode {
        self.permission_mode
    }

    pub fn permissions(&self) -> &[ResourcePermission] {
        &self.permissions
    }
}

/// Datasets plus the sheets and filter groups attached for compilation.
///
/// Dataset declarations are keyed by arn; a repeated arn replaces its
/// identifier in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Definition {
    datasets: IndexMap<String, DatasetIdentifier>,
    sheets: Vec<SheetId>,
    filter_groups: Vec<FilterGroupId>,
}

impl Definition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a dataset. Returns the identifier the arn was previously bound to.
    ///
    /// An identifier already declared for a different arn is rejected.
    pub(crate) fn declare(
        &mut self,
        arn: &str,
        identifier: DatasetIdentifier,
    ) -> CoreResult<Option<DatasetIdentifier>> {
        if let Some((existing_arn, _)) = self
            .datasets
            .iter()
            .find(|(a, id)| **id == identifier && a.as_str() != arn)
        {
            return Err(CoreError::ConflictingId {
                kind: DatasetIdentifier::KIND,
                id: identifier.to_string(),
                message: format!("a different dataset arn '{}'", existing_arn),
            });
        }
        Ok(self.datasets.insert(arn.to_string(), identifier))
    }

    /// True if any declared dataset uses this identifier
    pub fn is_declared(&self, identifier: &DatasetIdentifier) -> bool {
        self.datasets.values().any(|id| id == identifier)
    }

    /// `(arn, identifier)` pairs in declaration order
    pub fn datasets(&self) -> impl Iterator<Item = (&str, &DatasetIdentifier)> {
        self.datasets.iter().map(|(arn, id)| (arn.as_str(), id))
    }

    pub fn dataset_count(&self) -> usize {
        self.datasets.len()
    }

    /// Sheets attached so far
    pub fn sheets(&self) -> &[SheetId] {
        &self.sheets
    }

    /// Filter groups attached so far
    pub fn filter_groups(&self) -> &[FilterGroupId] {
        &self.filter_groups
    }

    /// Attach a sheet; returns false if it was already attached
    pub(crate) fn attach_sheet(&mut self, id: &SheetId) -> bool {
        if self.sheets.contains(id) {
            return false;
        }
        self.sheets.push(id.clone());
        true
    }

    /// Attach a filter group; returns false if it was already attached
    pub(crate) fn attach_filter_group(&mut self, id: &FilterGroupId) -> bool {
        if self.filter_groups.contains(id) {
            return false;
        }
        self.filter_groups.push(id.clone());
        true
    }

    pub fn declarations(&self) -> Vec<DataSetIdentifierDeclaration> {
        self.datasets
            .iter()
            .map(|(arn, id)| DataSetIdentifierDeclaration {
                identifier: id.to_string(),
                data_set_arn: arn.clone(),
            })
            .collect()
    }

    /// Defaults for sheets created in the service's editor
    pub fn analysis_defaults(canvas_width_px: u32) -> AnalysisDefaults {
        AnalysisDefaults {
            default_new_sheet_configuration: DefaultNewSheetConfiguration {
                interactive_layout_configuration: InteractiveLayoutConfiguration {
                    grid: GridCanvas {
                        canvas_size_options: CanvasSizeOptions::fixed(canvas_width_px),
                    },
                },
                sheet_content_type: SHEET_CONTENT_TYPE.to_string(),
            },
        }
    }
}
