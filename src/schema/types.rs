//! Declared type model for schema fields.
//!
//! Every field in a schema declares what shape of value its accessor yields.
//! The declared type drives two decisions: whether schema extraction expands
//! the field into child columns, and how introspection tooling labels the
//! column. Runtime flattening works off the resolved value itself, so the
//! declaration never has to be revisited per row.

use std::any::{Any, TypeId};
use std::fmt;

use serde::{Serialize, Serializer};

/// Identity of a Rust type participating in a schema.
///
/// Pairs the [`TypeId`] used for registry lookups and cycle detection with
/// the type's name for diagnostics. Two `TypeRef`s compare equal exactly when
/// they refer to the same Rust type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeRef {
    id: TypeId,
    name: &'static str,
}

impl TypeRef {
    /// Capture the identity of `T`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use longan::schema::TypeRef;
    ///
    /// let a = TypeRef::of::<u32>();
    /// let b = TypeRef::of::<u32>();
    /// assert_eq!(a, b);
    /// ```
    #[inline]
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The `TypeId` used as the registry key.
    #[inline]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The fully qualified type name, for diagnostics.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl Serialize for TypeRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name)
    }
}

/// Fine-grained classification of atomic cell values.
///
/// An atomic value occupies one cell as-is; the kind records which family of
/// Rust types produced it so layouts can be inspected or exported with type
/// information attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AtomicKind {
    /// `bool`, rendered as `true` / `false`.
    Bool,
    /// `char`, rendered as itself.
    Char,
    /// Signed machine integers.
    Int,
    /// Unsigned machine integers.
    Uint,
    /// Binary floating point numbers.
    Float,
    /// Arbitrary-precision decimal numbers.
    Decimal,
    /// Arbitrary-precision integers.
    BigInt,
    /// Strings and string-like types.
    Text,
    /// Calendar dates.
    Date,
    /// Wall-clock times.
    Time,
    /// Combined date and time values.
    DateTime,
    /// Currency codes.
    Currency,
    /// User enumerations rendered through their text form.
    Enum,
    /// UUIDs in hyphenated form.
    Uuid,
}

/// Declared shape of the value a field accessor yields.
///
/// Only [`DeclaredType::Composite`] causes schema extraction to recurse;
/// every other shape produces exactly one column whose content is flattened
/// at projection time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeclaredType {
    /// A single self-contained value occupying one cell.
    Atomic(AtomicKind),
    /// An ordered collection, flattened into one delimited cell.
    Sequence,
    /// A keyed collection, flattened into one cell of key/value lines.
    Mapping,
    /// A nested object whose own schema contributes child columns.
    Composite(TypeRef),
    /// A value with no structural interpretation beyond its text form.
    Opaque,
}

impl DeclaredType {
    /// Whether this declaration is atomic.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use longan::schema::{AtomicKind, DeclaredType};
    ///
    /// assert!(DeclaredType::Atomic(AtomicKind::Int).is_atomic());
    /// assert!(!DeclaredType::Sequence.is_atomic());
    /// ```
    #[inline]
    pub fn is_atomic(&self) -> bool {
        matches!(self, DeclaredType::Atomic(_))
    }

    /// Whether schema extraction expands this declaration into child columns.
    #[inline]
    pub fn is_composite(&self) -> bool {
        matches!(self, DeclaredType::Composite(_))
    }
}
