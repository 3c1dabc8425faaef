//! Extracted column descriptors.
//!
//! Schema extraction reduces a type's declaration graph to a flat list of
//! [`ColumnDescriptor`]s. Each descriptor pairs the column's presentation
//! (header text, 1-based ordinal) with the [`FieldPath`] the projector walks
//! to read the cell's value off a root object. Descriptors are immutable
//! once extraction finishes and are shared behind `Arc` by the caching
//! layers above.

use std::fmt;

use serde::{Serialize, Serializer};
use smallvec::SmallVec;

use crate::schema::declaration::AccessorChain;
use crate::schema::types::DeclaredType;

/// One step of a field path.
///
/// Carries the field identifier, the name of the type declaring it (for
/// diagnostics) and the accessor chain reading it off that type.
#[derive(Clone)]
pub struct PathSegment {
    name: &'static str,
    declaring_type: &'static str,
    chain: AccessorChain,
}

impl PathSegment {
    pub(crate) fn new(
        name: &'static str,
        declaring_type: &'static str,
        chain: AccessorChain,
    ) -> Self {
        Self {
            name,
            declaring_type,
            chain,
        }
    }

    /// The field identifier.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Name of the type this field is declared on.
    #[inline]
    pub fn declaring_type(&self) -> &'static str {
        self.declaring_type
    }

    /// The accessor strategies reading this field.
    #[inline]
    pub fn chain(&self) -> &AccessorChain {
        &self.chain
    }
}

impl fmt::Debug for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.declaring_type, self.name)
    }
}

/// Chain of segments from the root object to one leaf field.
///
/// Paths are short in practice; up to four segments live inline without
/// heap allocation.
#[derive(Clone, Default)]
pub struct FieldPath {
    segments: SmallVec<[PathSegment; 4]>,
}

impl FieldPath {
    pub(crate) fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    /// The segments, root first.
    #[inline]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Number of segments.
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the path has no segments.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Dot-joined identifiers, e.g. `address.city`.
    pub fn dotted(&self) -> String {
        let mut out = String::new();
        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                out.push('.');
            }
            out.push_str(segment.name());
        }
        out
    }
}

impl fmt::Debug for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dotted())
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dotted())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.dotted())
    }
}

/// One column of an extracted layout.
///
/// The ordinal is 1-based and unique within a layout once extraction has
/// validated it; [`cell_index`](ColumnDescriptor::cell_index) gives the
/// zero-based position writers use.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnDescriptor {
    path: FieldPath,
    header: String,
    ordinal: u32,
    declared: DeclaredType,
}

impl ColumnDescriptor {
    pub(crate) fn new(
        path: FieldPath,
        header: String,
        ordinal: u32,
        declared: DeclaredType,
    ) -> Self {
        Self {
            path,
            header,
            ordinal,
            declared,
        }
    }

    /// The field path resolved per row.
    #[inline]
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// The composed header text.
    #[inline]
    pub fn header(&self) -> &str {
        &self.header
    }

    /// The 1-based column ordinal, `0` before auto-assignment.
    #[inline]
    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }

    pub(crate) fn set_ordinal(&mut self, ordinal: u32) {
        self.ordinal = ordinal;
    }

    /// The declared shape of this column's values.
    #[inline]
    pub fn declared(&self) -> DeclaredType {
        self.declared
    }

    /// Zero-based cell index this column writes to.
    ///
    /// Only meaningful on validated layouts, where ordinals start at 1.
    #[inline]
    pub fn cell_index(&self) -> u32 {
        debug_assert!(self.ordinal >= 1);
        self.ordinal - 1
    }
}
