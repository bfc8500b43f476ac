//! sl-core - Core library for Sightline
//!
//! This crate provides the analysis object model, the `AnalysisBuilder` that
//! assembles a definition through validated mutations, the compiled document
//! types, the process-wide builder registry, configuration parsing and
//! operation scripts.

pub mod analysis;
pub mod builder;
pub mod checksum;
pub mod config;
pub mod control;
pub mod document;
pub mod error;
pub mod field;
pub mod filter;
pub mod filter_group;
pub mod ids;
mod keyword;
mod newtype_string;
pub mod registry;
pub mod script;
pub mod sheet;
pub mod visual;

pub use analysis::{Analysis, Definition, PermissionMode};
pub use builder::{AnalysisBuilder, BatchReport, BuilderOptions, VisualSpec};
pub use checksum::compute_checksum;
pub use config::{Config, ServiceType};
pub use document::AnalysisDocument;
pub use error::{CoreError, CoreResult, ErrorKind};
pub use field::{Axis, FieldInput, SemanticType};
pub use ids::{
    AccountId, AnalysisId, BuilderKey, DatasetIdentifier, FilterControlId, FilterGroupId,
    FilterId, SheetId, VisualId,
};
pub use registry::{BuilderHandle, BuilderRegistry};
pub use script::{Script, ScriptReport, StepOutcome};
pub use sheet::{GridPlacement, LayoutMode};
pub use visual::{Visibility, VisualType};
