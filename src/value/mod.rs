//! Resolved value model and cell text production.
//!
//! Field accessors surface everything they read as a [`Value`], a closed set
//! of shapes the rest of the pipeline understands. Conversion from concrete
//! Rust types happens in [`convert`] through the [`IntoValue`] trait;
//! rendering a `Value` into final cell text happens in [`flatten`].

// Submodule declarations
pub mod convert;
pub mod flatten;

// Re-exports
pub use convert::{CurrencyCode, IntoValue};
pub use flatten::{Flattener, ValueProcessor};

/// A value read from an object, reduced to the shapes a cell can carry.
///
/// Atomic and opaque values already carry their canonical text. Collections
/// keep their structure so the flattener can apply delimiters and the
/// absent-element placeholder; mapping entries preserve the source iteration
/// order. `Missing` marks absence anywhere in a value tree: a missing cell
/// value flattens to an empty cell, while a missing element inside a
/// collection flattens to the configured placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A single self-contained value in canonical text form.
    Atomic(String),
    /// An ordered collection of values.
    Sequence(Vec<Value>),
    /// A keyed collection of entries in source order.
    Mapping(Vec<(Value, Value)>),
    /// Absence of a value.
    Missing,
    /// A value carried through its display form only.
    Opaque(String),
}

impl Value {
    /// Build an atomic value from text.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use longan::Value;
    ///
    /// let v = Value::atomic("42");
    /// assert!(!v.is_missing());
    /// ```
    #[inline]
    pub fn atomic(text: impl Into<String>) -> Self {
        Value::Atomic(text.into())
    }

    /// Build an opaque value from anything displayable.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use longan::Value;
    ///
    /// let v = Value::opaque(std::net::Ipv4Addr::LOCALHOST);
    /// assert_eq!(v, Value::Opaque("127.0.0.1".to_string()));
    /// ```
    #[inline]
    pub fn opaque(display: impl std::fmt::Display) -> Self {
        Value::Opaque(display.to_string())
    }

    /// Whether this value marks absence.
    #[inline]
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_constructors() {
        assert_eq!(Value::atomic("x"), Value::Atomic("x".to_string()));
        assert_eq!(Value::opaque(7), Value::Opaque("7".to_string()));
        assert!(Value::Missing.is_missing());
        assert!(!Value::atomic("").is_missing());
    }
}
