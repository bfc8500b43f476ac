//! Error types for sl-core

use thiserror::Error;

/// Broad classification of a [`CoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input or a referential-integrity violation; builder state is unchanged
    Validation,
    /// An operation was called before the state it depends on exists
    Precondition,
    /// Configuration could not be found, parsed or validated
    Config,
    /// Filesystem or serialization failure
    Io,
}

/// Core error type for Sightline
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Failed to parse configuration file
    #[error("[E002] Failed to parse config: {message}")]
    ConfigParseError { message: String },

    /// E003: Invalid configuration value
    #[error("[E003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// V001: Unrecognized enum value (semantic type, granularity, filter type, ...)
    #[error("[V001] Unknown {kind} '{value}'. Expected one of: {expected}")]
    UnknownValue {
        kind: &'static str,
        value: String,
        expected: String,
    },

    /// V002: Semantic type not accepted on an axis
    #[error("[V002] Invalid {axis}-axis field type '{field_type}'. Must be one of: {allowed}")]
    InvalidAxisType {
        axis: String,
        field_type: String,
        allowed: String,
    },

    /// V003: Second categorical attribution on a visual
    #[error("[V003] Visual '{visual}' already has a categorical field on the {existing} axis; cannot bind a categorical field to the {axis} axis")]
    CategoryConflict {
        visual: String,
        axis: String,
        existing: String,
    },

    /// V004: Referenced entity does not exist
    #[error("[V004] {kind} '{id}' does not exist")]
    NotFound { kind: &'static str, id: String },

    /// V005: Filter dataset differs from its filter group's dataset
    #[error("[V005] Filter '{filter}' (dataset: {filter_dataset}) does not match the dataset of group '{group}' (dataset: {group_dataset})")]
    DatasetMismatch {
        filter: String,
        filter_dataset: String,
        group: String,
        group_dataset: String,
    },

    /// V006: Layout coordinates or spans out of range
    #[error("[V006] Invalid layout for '{element}': {message}")]
    LayoutOutOfRange { element: String, message: String },

    /// V007: Parallel field/type lists of different length
    #[error("[V007] Visual '{visual}': {axis}-axis has {fields} fields but {types} field types")]
    FieldListMismatch {
        visual: String,
        axis: String,
        fields: usize,
        types: usize,
    },

    /// V008: Id already bound to something else
    #[error("[V008] {kind} '{id}' already exists with {message}")]
    ConflictingId {
        kind: &'static str,
        id: String,
        message: String,
    },

    /// V009: Required configuration missing or malformed
    #[error("[V009] Invalid configuration for {kind} '{id}': {message}")]
    InvalidConfiguration {
        kind: &'static str,
        id: String,
        message: String,
    },

    /// V010: Element already placed on another sheet
    #[error("[V010] {kind} '{id}' is already placed on sheet '{sheet}'")]
    AlreadyPlaced {
        kind: &'static str,
        id: String,
        sheet: String,
    },

    /// V011: Axis not available on the visual variant
    #[error("[V011] {visual_type} visual '{visual}' has no {axis} axis")]
    UnsupportedAxis {
        visual_type: String,
        visual: String,
        axis: String,
    },

    /// V012: Same column bound twice on one axis
    #[error("[V012] Visual '{visual}' already binds column '{column}' on the {axis} axis")]
    DuplicateField {
        visual: String,
        axis: String,
        column: String,
    },

    /// P001: Analysis missing
    #[error("[P001] Analysis must be created first")]
    AnalysisMissing,

    /// P002: Definition missing
    #[error("[P002] Definition must be created first (add at least one dataset)")]
    DefinitionMissing,

    /// P003: Filter group scope needs a sheet
    #[error("[P003] Filter group '{group}' cannot be scoped: the analysis has no sheets")]
    NoSheetForScope { group: String },

    /// E014: IO error
    #[error("[E014] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// E016: IO error with file path context
    #[error("[E016] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// E015: YAML parse error
    #[error("[E015] YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::ConfigNotFound { .. }
            | CoreError::ConfigParseError { .. }
            | CoreError::ConfigInvalid { .. } => ErrorKind::Config,
            CoreError::AnalysisMissing
            | CoreError::DefinitionMissing
            | CoreError::NoSheetForScope { .. } => ErrorKind::Precondition,
            CoreError::Io(_)
            | CoreError::IoWithPath { .. }
            | CoreError::YamlParse(_)
            | CoreError::Json(_) => ErrorKind::Io,
            _ => ErrorKind::Validation,
        }
    }

    /// Returns true for recoverable validation failures
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    /// Returns true for precondition failures
    pub fn is_precondition(&self) -> bool {
        self.kind() == ErrorKind::Precondition
    }

    pub(crate) fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        CoreError::NotFound {
            kind,
            id: id.into(),
        }
    }
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
