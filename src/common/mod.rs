//! Common types and utilities shared across the mapping pipeline.
//!
//! This module carries the error taxonomy used by schema extraction, value
//! resolution and row projection, ensuring a consistent API for users.

// Submodule declarations
pub mod error;

// Re-exports for convenience
pub use error::{Error, ResolutionFault, Result, SchemaError};
