//! Longan - A Rust library for mapping object graphs onto spreadsheet rows
//!
//! This library turns plain Rust values into tabular data. Types declare
//! which fields become columns and how each field is read; the mapper then
//! produces sheet names, header rows, and cell text ready for any
//! spreadsheet or CSV writer.
//!
//! # Features
//!
//! - **Declarative schemas**: Columns are declared with ordinary typed closures
//! - **Hierarchical headers**: Nested objects contribute `Parent - Child` columns
//! - **Collection flattening**: Lists and maps render into a single cell
//! - **Ordinal control**: Explicit 1-based column positions, with auto-assignment
//!   filling the gaps
//! - **Parallel projection**: Slices of objects project to rows on a thread pool
//!
//! # Example - Mapping a flat type
//!
//! ```rust
//! use longan::{Field, SchemaRegistry, SheetMapper, Tabular, TypeSchema};
//!
//! struct Employee {
//!     id: u32,
//!     name: String,
//!     active: bool,
//! }
//!
//! impl Tabular for Employee {
//!     fn schema() -> TypeSchema {
//!         TypeSchema::builder::<Employee>()
//!             .sheet_name("Employees")
//!             .field(Field::new("employee_id").ordinal(1).get(|e: &Employee| e.id))
//!             .field(Field::new("name").ordinal(2).get(|e: &Employee| e.name.clone()))
//!             .field(Field::new("active").ordinal(3).get_bool(|e: &Employee| e.active))
//!             .build()
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut registry = SchemaRegistry::new();
//! registry.register::<Employee>();
//! let mapper = SheetMapper::new().with_registry(registry);
//!
//! assert_eq!(
//!     mapper.headers::<Employee>()?,
//!     vec!["Employee Id", "Name", "Active"]
//! );
//!
//! let staff = vec![Employee {
//!     id: 41,
//!     name: "Ada".to_string(),
//!     active: true,
//! }];
//! let sheet = mapper.sheet_data(&staff)?;
//! assert_eq!(sheet.name, "Employees");
//! assert_eq!(sheet.rows[0].clone().into_dense(), vec!["41", "Ada", "true"]);
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Nested objects
//!
//! ```rust
//! use longan::schema::register_default;
//! use longan::{Field, SheetMapper, Tabular, TypeSchema};
//!
//! struct Address {
//!     street: String,
//!     city: String,
//! }
//!
//! impl Tabular for Address {
//!     fn schema() -> TypeSchema {
//!         TypeSchema::builder::<Address>()
//!             .field(Field::new("street").ordinal(2).get(|a: &Address| a.street.clone()))
//!             .field(Field::new("city").ordinal(3).get(|a: &Address| a.city.clone()))
//!             .build()
//!     }
//! }
//!
//! struct Customer {
//!     name: String,
//!     address: Option<Address>,
//! }
//!
//! impl Tabular for Customer {
//!     fn schema() -> TypeSchema {
//!         TypeSchema::builder::<Customer>()
//!             .field(Field::new("name").ordinal(1).get(|c: &Customer| c.name.clone()))
//!             .field(Field::new("address").nested(|c: &Customer| c.address.as_ref()))
//!             .build()
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! register_default::<Address>();
//! register_default::<Customer>();
//! let mapper = SheetMapper::new();
//!
//! assert_eq!(
//!     mapper.headers::<Customer>()?,
//!     vec!["Name", "Address - Street", "Address - City"]
//! );
//!
//! let customers = vec![Customer {
//!     name: "Maya".to_string(),
//!     address: None,
//! }];
//! let rows = mapper.rows_slice(&customers)?;
//! // An absent nested object blanks out every child column.
//! assert_eq!(rows[0].get(0), Some("Maya"));
//! assert_eq!(rows[0].get(1), Some(""));
//! assert_eq!(rows[0].get(2), Some(""));
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Collections in a single cell
//!
//! ```rust
//! use std::collections::BTreeMap;
//!
//! use longan::{Field, SchemaRegistry, SheetMapper, Tabular, TypeSchema};
//!
//! struct Server {
//!     name: String,
//!     tags: Vec<String>,
//!     ports: BTreeMap<String, u16>,
//! }
//!
//! impl Tabular for Server {
//!     fn schema() -> TypeSchema {
//!         TypeSchema::builder::<Server>()
//!             .field(Field::new("name").ordinal(1).get(|s: &Server| s.name.clone()))
//!             .field(Field::new("tags").ordinal(2).get(|s: &Server| s.tags.clone()))
//!             .field(Field::new("ports").ordinal(3).get(|s: &Server| s.ports.clone()))
//!             .build()
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut registry = SchemaRegistry::new();
//! registry.register::<Server>();
//! let mapper = SheetMapper::new().with_registry(registry);
//!
//! let servers = vec![Server {
//!     name: "edge-1".to_string(),
//!     tags: vec!["prod".to_string(), "eu".to_string()],
//!     ports: BTreeMap::from([("http".to_string(), 80), ("ssh".to_string(), 22)]),
//! }];
//! let rows = mapper.rows_slice(&servers)?;
//! assert_eq!(rows[0].get(1), Some("prod, eu"));
//! assert_eq!(rows[0].get(2), Some("http : 80\nssh : 22"));
//! # Ok(())
//! # }
//! ```

/// Error types shared across the crate
///
/// Fallible operations return the crate-level [`Result`], whose [`Error`]
/// separates schema-time failures from row-time resolution faults.
pub mod common;

/// Mapping configuration
///
/// Delimiters, placeholder text, cell-length limits, and the layout
/// constants consulted by extraction and projection.
pub mod config;

/// High-level mapping facade
///
/// [`SheetMapper`] caches extracted column layouts per type and produces
/// sheet names, header rows, and data rows in one place.
pub mod mapper;

/// Row production
///
/// Resolves field paths against live objects and projects the resolved
/// values into sparse rows.
pub mod row;

/// Schema declaration and extraction
///
/// Field declarations, the schema registry, and the recursive walk that
/// turns registered schemas into a flat column layout.
pub mod schema;

/// Value model
///
/// The closed value shape produced by accessors, conversions into it, and
/// flattening of values into final cell text.
pub mod value;

// Re-export commonly used types for convenience
pub use common::error::{Error, ResolutionFault, Result, SchemaError};
pub use config::Config;
pub use mapper::{Rows, SheetData, SheetMapper};
pub use row::{FaultPolicy, Row, RowProjector, ValueResolver};
pub use schema::{
    AccessorChain, AccessorFn, AtomicKind, ColumnDescriptor, DeclaredType, Field, FieldDecl,
    FieldPath, PathSegment, Resolved, SchemaExtractor, SchemaRegistry, Tabular, TypeRef,
    TypeSchema, TypeSchemaBuilder,
};
pub use value::{CurrencyCode, Flattener, IntoValue, Value, ValueProcessor};
