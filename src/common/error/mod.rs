//! Unified error types for the mapping pipeline.
//!
//! This module separates schema-declaration errors from per-object value
//! resolution faults, presenting a consistent API to users.

// Submodule declarations
pub mod types;

// Re-exports
pub use types::{Error, ResolutionFault, Result, SchemaError};
