//! sl-render - Rendering service layer for Sightline
//!
//! This crate provides the `RenderingService` trait with HTTP and in-memory
//! implementations, the audit writer, and the `Compiler` that submits a
//! builder's document.

pub mod audit;
pub mod compiler;
pub mod error;
pub mod http;
pub mod memory;
pub mod traits;

pub use audit::AuditWriter;
pub use compiler::{CompileOutcome, Compiler};
pub use error::{RenderError, RenderResult};
pub use http::HttpRenderingService;
pub use memory::InMemoryRenderingService;
pub use traits::{CreatedAnalysis, DataSetSummary, PublishedAnalysis, RenderingService};

#[cfg(test)]
pub(crate) mod fixtures;
