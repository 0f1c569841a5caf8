//! CLI command implementations

pub mod build;
pub mod json_output;
pub mod rename;
