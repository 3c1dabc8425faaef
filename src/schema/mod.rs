//! Schema declaration, registration, and column-layout extraction.
//!
//! Types opt into mapping by implementing [`Tabular`] and describing their
//! fields through [`TypeSchema::builder`]. Registered schemas are walked by
//! [`SchemaExtractor`], which composes hierarchical headers, assigns column
//! ordinals, and yields the [`ColumnDescriptor`] layout that row projection
//! consumes.

pub mod declaration;
pub mod descriptor;
pub mod extractor;
pub mod header;
pub mod registry;
pub mod types;

mod validate;

pub use declaration::{
    AccessorChain, AccessorFn, Field, FieldDecl, Resolved, Tabular, TypeSchema, TypeSchemaBuilder,
};
pub use descriptor::{ColumnDescriptor, FieldPath, PathSegment};
pub use extractor::SchemaExtractor;
pub use registry::{default_registry, register_default, SchemaRegistry};
pub use types::{AtomicKind, DeclaredType, TypeRef};
