//! CLI command implementations

pub(crate) mod apply;
pub(crate) mod common;
pub(crate) mod datasets;
pub(crate) mod describe;
pub(crate) mod validate;
