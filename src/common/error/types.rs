//! Unified error types for the mapping pipeline.
//!
//! Schema problems and value-resolution problems are deliberately separate
//! enums: the former abort extraction outright, while the latter are decided
//! by the projector's fault policy. The umbrella [`Error`] wraps both for
//! callers that drive the whole pipeline through one `Result` type.
use thiserror::Error;

/// Errors raised while extracting a column layout from schema declarations.
///
/// Every variant is a defect in the declared schema, not in the data, so all
/// of them abort extraction regardless of fault policy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A composite field references a type with no registered declaration.
    #[error("no schema declaration registered for type: {0}")]
    MissingDeclaration(String),

    /// A composite field chain led back to a type already being expanded.
    #[error("cyclic schema reference detected in type: {0}")]
    CyclicSchema(String),

    /// A declared ordinal falls outside the accepted `1..=max` range.
    #[error("invalid column ordinal {ordinal} for \"{header}\": must be between 1 and {max}")]
    InvalidOrdinal {
        header: String,
        ordinal: u32,
        max: u32,
    },

    /// Two columns ended up with the same ordinal.
    #[error("duplicate column ordinal {ordinal} for \"{header}\"")]
    DuplicateOrdinal { header: String, ordinal: u32 },
}

/// Faults raised while reading a single field off a runtime object.
///
/// Absent data is not a fault; it resolves to an absent value and ultimately
/// an empty cell. These variants only cover declarations that cannot be
/// applied to the object at hand.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionFault {
    /// No accessor strategy is populated for the field.
    #[error("field \"{field}\" is unreadable: no accessor strategy is populated")]
    Unreadable { field: String },

    /// The runtime object is not of the type the accessor was declared for.
    #[error("field \"{field}\" could not be read: runtime object is not a {expected}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
    },
}

/// Main error type for mapping operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Schema extraction failed.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Value resolution failed under the strict fault policy.
    #[error(transparent)]
    Resolution(#[from] ResolutionFault),
}

/// Result type for mapping operations.
pub type Result<T> = std::result::Result<T, Error>;
