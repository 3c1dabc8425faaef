//! Schema extraction.
//!
//! Reduces a type's declaration graph to a flat, validated column layout.
//! The walk is depth-first in declaration order: atomic, collection and
//! opaque fields emit one [`ColumnDescriptor`] each, while composite fields
//! expand the referenced type's own schema in place, prefixing headers and
//! field paths. A stack of the types currently being expanded catches cyclic
//! references; the stack is popped on the way out, so the same type may
//! appear under any number of sibling branches.
//!
//! After the walk, columns without a declared ordinal receive the smallest
//! free ones, and the finished layout is validated for range and uniqueness.

use std::any::{Any, TypeId};
use std::collections::HashSet;

use crate::common::error::SchemaError;
use crate::config::DEFAULT_MAX_COLUMN_ORDER;
use crate::schema::descriptor::{ColumnDescriptor, FieldPath, PathSegment};
use crate::schema::header;
use crate::schema::registry::SchemaRegistry;
use crate::schema::types::{DeclaredType, TypeRef};
use crate::schema::validate::validate_ordinals;

/// Walks schema declarations into column layouts.
///
/// # Examples
///
/// ```rust
/// use longan::{Field, SchemaExtractor, SchemaRegistry, Tabular, TypeSchema};
///
/// struct Ticket {
///     code: String,
/// }
///
/// impl Tabular for Ticket {
///     fn schema() -> TypeSchema {
///         TypeSchema::builder::<Ticket>()
///             .field(Field::new("code").ordinal(1).get(|t: &Ticket| t.code.clone()))
///             .build()
///     }
/// }
///
/// let mut registry = SchemaRegistry::new();
/// registry.register::<Ticket>();
///
/// let columns = SchemaExtractor::new(&registry).extract_type::<Ticket>()?;
/// assert_eq!(columns[0].header(), "Code");
/// # Ok::<(), longan::SchemaError>(())
/// ```
pub struct SchemaExtractor<'r> {
    registry: &'r SchemaRegistry,
    max_column_order: u32,
}

impl<'r> SchemaExtractor<'r> {
    /// Create an extractor over `registry` with the default ordinal bound.
    pub fn new(registry: &'r SchemaRegistry) -> Self {
        Self {
            registry,
            max_column_order: DEFAULT_MAX_COLUMN_ORDER,
        }
    }

    /// Override the largest accepted column ordinal.
    #[inline]
    pub fn with_max_column_order(mut self, max: u32) -> Self {
        self.max_column_order = max;
        self
    }

    /// Extract the column layout for `T`.
    pub fn extract_type<T: Any>(&self) -> Result<Vec<ColumnDescriptor>, SchemaError> {
        self.extract(TypeRef::of::<T>())
    }

    /// Extract the column layout for the type identified by `root`.
    ///
    /// Descriptors come back in depth-first declaration order, each with a
    /// validated 1-based ordinal; the ordinal order is independent of the
    /// traversal order.
    pub fn extract(&self, root: TypeRef) -> Result<Vec<ColumnDescriptor>, SchemaError> {
        let mut columns = Vec::new();
        let mut visiting = Vec::new();
        self.walk(root, None, &FieldPath::default(), &mut visiting, &mut columns)?;
        assign_missing_ordinals(&mut columns);
        validate_ordinals(&columns, self.max_column_order)?;
        tracing::debug!(
            root = root.name(),
            columns = columns.len(),
            "column layout extracted"
        );
        Ok(columns)
    }

    fn walk(
        &self,
        ty: TypeRef,
        parent_header: Option<&str>,
        prefix: &FieldPath,
        visiting: &mut Vec<TypeId>,
        out: &mut Vec<ColumnDescriptor>,
    ) -> Result<(), SchemaError> {
        if visiting.contains(&ty.id()) {
            return Err(SchemaError::CyclicSchema(ty.name().to_string()));
        }
        let schema = self
            .registry
            .get(ty.id())
            .ok_or_else(|| SchemaError::MissingDeclaration(ty.name().to_string()))?;

        visiting.push(ty.id());
        for field in schema.fields() {
            if !field.participates(schema.include_all()) {
                continue;
            }
            let composed = header::compose(field.header(), parent_header, field.name());
            let mut path = prefix.clone();
            path.push(PathSegment::new(
                field.name(),
                ty.name(),
                field.chain().clone(),
            ));
            match field.declared() {
                DeclaredType::Composite(child) => {
                    self.walk(child, Some(&composed), &path, visiting, out)?;
                }
                declared => {
                    out.push(ColumnDescriptor::new(
                        path,
                        composed,
                        field.ordinal(),
                        declared,
                    ));
                }
            }
        }
        visiting.pop();
        Ok(())
    }
}

/// Give every unassigned column the smallest free ordinal.
///
/// Explicit ordinals are never moved. Unassigned columns are visited in
/// layout order and the probe for free slots only moves forward, so the
/// assigned ordinals are themselves in ascending order.
fn assign_missing_ordinals(descriptors: &mut [ColumnDescriptor]) {
    let taken: HashSet<u32> = descriptors
        .iter()
        .map(ColumnDescriptor::ordinal)
        .filter(|ordinal| *ordinal != 0)
        .collect();

    let mut next_free = 1u32;
    for descriptor in descriptors.iter_mut().filter(|d| d.ordinal() == 0) {
        while taken.contains(&next_free) {
            next_free += 1;
        }
        descriptor.set_ordinal(next_free);
        next_free += 1;
    }
}
