//! Row projection.
//!
//! A [`RowProjector`] binds an extracted column layout to a configuration
//! and turns objects into [`Row`]s: each column's path is resolved, the
//! value is rendered to text by the installed [`ValueProcessor`], over-long
//! text is truncated, and the cell lands at the column's zero-based index.
//! Rows are sparse; layouts with ordinal gaps simply leave those cells
//! unoccupied.

use std::any::Any;
use std::collections::BTreeMap;
use std::sync::Arc;

use rayon::prelude::*;
use serde::Serialize;

use crate::common::error::Result;
use crate::config::Config;
use crate::row::resolver::ValueResolver;
use crate::schema::descriptor::ColumnDescriptor;
use crate::value::flatten::{Flattener, ValueProcessor};

/// How a projector reacts to resolution faults.
///
/// Absent data never reaches this policy; it always produces an empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FaultPolicy {
    /// Log the fault and write an empty cell.
    #[default]
    Lenient,
    /// Abort row projection with the fault.
    Strict,
}

/// One projected row: cell text keyed by zero-based cell index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Row {
    cells: BTreeMap<u32, String>,
}

impl Row {
    fn insert(&mut self, index: u32, text: String) {
        self.cells.insert(index, text);
    }

    /// Cell text at `index`, when the layout has a column there.
    #[inline]
    pub fn get(&self, index: u32) -> Option<&str> {
        self.cells.get(&index).map(String::as_str)
    }

    /// Occupied cells in ascending index order.
    pub fn cells(&self) -> impl Iterator<Item = (u32, &str)> {
        self.cells.iter().map(|(index, text)| (*index, text.as_str()))
    }

    /// Number of occupied cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the row has no occupied cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// One past the highest occupied index; `0` for an empty row.
    pub fn width(&self) -> u32 {
        self.cells.keys().next_back().map_or(0, |index| index + 1)
    }

    /// Dense cell vector, with empty strings filling ordinal gaps.
    pub fn into_dense(self) -> Vec<String> {
        let mut dense = vec![String::new(); self.width() as usize];
        for (index, text) in self.cells {
            dense[index as usize] = text;
        }
        dense
    }
}

/// Projects objects onto an extracted column layout.
///
/// # Examples
///
/// ```rust
/// use longan::{
///     Config, Field, RowProjector, SchemaExtractor, SchemaRegistry, Tabular, TypeSchema,
/// };
///
/// struct Reading {
///     sensor: String,
///     value: f64,
/// }
///
/// impl Tabular for Reading {
///     fn schema() -> TypeSchema {
///         TypeSchema::builder::<Reading>()
///             .field(Field::new("sensor").ordinal(1).get(|r: &Reading| r.sensor.clone()))
///             .field(Field::new("value").ordinal(2).get(|r: &Reading| r.value))
///             .build()
///     }
/// }
///
/// let mut registry = SchemaRegistry::new();
/// registry.register::<Reading>();
/// let columns = SchemaExtractor::new(&registry).extract_type::<Reading>()?;
///
/// let projector = RowProjector::new(columns, Config::default());
/// let row = projector.project(&Reading {
///     sensor: "t0".to_string(),
///     value: 21.5,
/// })?;
/// assert_eq!(row.get(0), Some("t0"));
/// assert_eq!(row.get(1), Some("21.5"));
/// # Ok::<(), longan::Error>(())
/// ```
pub struct RowProjector {
    descriptors: Arc<[ColumnDescriptor]>,
    config: Config,
    policy: FaultPolicy,
    resolver: ValueResolver,
    processor: Arc<dyn ValueProcessor>,
}

impl RowProjector {
    /// Bind a column layout to a configuration.
    pub fn new(descriptors: impl Into<Arc<[ColumnDescriptor]>>, config: Config) -> Self {
        Self {
            descriptors: descriptors.into(),
            config,
            policy: FaultPolicy::default(),
            resolver: ValueResolver,
            processor: Arc::new(Flattener),
        }
    }

    /// Set the fault policy.
    #[inline]
    pub fn with_fault_policy(mut self, policy: FaultPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Install a custom [`ValueProcessor`].
    #[inline]
    pub fn with_processor(mut self, processor: Arc<dyn ValueProcessor>) -> Self {
        self.processor = processor;
        self
    }

    /// The column layout this projector writes.
    #[inline]
    pub fn descriptors(&self) -> &[ColumnDescriptor] {
        &self.descriptors
    }

    /// The bound configuration.
    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Project one object into a row.
    pub fn project<T: Any>(&self, object: &T) -> Result<Row> {
        self.project_any(object)
    }

    /// Project one type-erased object into a row.
    pub fn project_any(&self, object: &dyn Any) -> Result<Row> {
        let mut row = Row::default();
        for descriptor in self.descriptors.iter() {
            let text = match self.resolver.resolve(object, descriptor.path()) {
                Ok(value) => self.processor.process(&value, &self.config),
                Err(fault) => match self.policy {
                    FaultPolicy::Lenient => {
                        tracing::warn!(
                            column = descriptor.header(),
                            path = %descriptor.path(),
                            %fault,
                            "cell resolution failed; writing empty cell"
                        );
                        String::new()
                    }
                    FaultPolicy::Strict => return Err(fault.into()),
                },
            };
            row.insert(descriptor.cell_index(), truncate_cell(text, &self.config));
        }
        Ok(row)
    }

    /// Project objects lazily, one row per pulled item.
    pub fn project_iter<'a, T, I>(&'a self, objects: I) -> impl Iterator<Item = Result<Row>> + 'a
    where
        T: Any,
        I: IntoIterator<Item = &'a T>,
        I::IntoIter: 'a,
    {
        objects.into_iter().map(move |object| self.project(object))
    }

    /// Project a slice in parallel, preserving input order.
    pub fn project_slice<T>(&self, objects: &[T]) -> Result<Vec<Row>>
    where
        T: Any + Sync,
    {
        objects.par_iter().map(|object| self.project(object)).collect()
    }
}

/// Cut over-long cell text down to the configured length.
///
/// The byte length gates the check, so cells within limits never pay for a
/// character count; the cut itself lands on a character boundary.
fn truncate_cell(text: String, config: &Config) -> String {
    if text.len() <= config.max_cell_len {
        return text;
    }
    let chars = text.chars().count();
    if chars <= config.max_cell_len {
        return text;
    }
    tracing::warn!(
        chars,
        limit = config.max_cell_len,
        "cell text over limit; truncating"
    );
    text.chars().take(config.truncate_len).collect()
}
