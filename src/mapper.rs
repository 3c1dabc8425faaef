//! High-level mapping facade.
//!
//! [`SheetMapper`] ties the pieces together: it holds a schema registry
//! snapshot, a [`Config`], and a fault policy, extracts column layouts on
//! first use per type, and hands out headers, projectors, and fully
//! projected sheets. Extracted layouts are cached per [`TypeId`], so the
//! schema walk happens once per type for the lifetime of the mapper.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;

use crate::common::error::Result;
use crate::config::Config;
use crate::row::projector::{FaultPolicy, Row, RowProjector};
use crate::schema::descriptor::ColumnDescriptor;
use crate::schema::extractor::SchemaExtractor;
use crate::schema::registry::{default_registry, SchemaRegistry};
use crate::value::flatten::{Flattener, ValueProcessor};

/// Maps registered object types onto spreadsheet-shaped output.
///
/// # Examples
///
/// ```rust
/// use longan::{Field, SchemaRegistry, SheetMapper, Tabular, TypeSchema};
///
/// struct Order {
///     id: u64,
///     item: String,
/// }
///
/// impl Tabular for Order {
///     fn schema() -> TypeSchema {
///         TypeSchema::builder::<Order>()
///             .sheet_name("Orders")
///             .field(Field::new("id").ordinal(1).get(|o: &Order| o.id))
///             .field(Field::new("item").ordinal(2).get(|o: &Order| o.item.clone()))
///             .build()
///     }
/// }
///
/// let mut registry = SchemaRegistry::new();
/// registry.register::<Order>();
/// let mapper = SheetMapper::new().with_registry(registry);
///
/// assert_eq!(mapper.sheet_name::<Order>(), "Orders");
/// assert_eq!(mapper.headers::<Order>()?, vec!["Id", "Item"]);
///
/// let orders = vec![Order {
///     id: 1,
///     item: "pencil".to_string(),
/// }];
/// let sheet = mapper.sheet_data(&orders)?;
/// assert_eq!(sheet.rows[0].get(0), Some("1"));
/// assert_eq!(sheet.rows[0].get(1), Some("pencil"));
/// # Ok::<(), longan::Error>(())
/// ```
pub struct SheetMapper {
    registry: SchemaRegistry,
    config: Config,
    policy: FaultPolicy,
    processor: Arc<dyn ValueProcessor>,
    layouts: RwLock<HashMap<TypeId, Arc<[ColumnDescriptor]>>>,
}

impl SheetMapper {
    /// Create a mapper over a snapshot of the process-wide default registry.
    ///
    /// Later registrations against the default registry do not show up in
    /// a mapper created before them.
    pub fn new() -> Self {
        Self {
            registry: default_registry().read().clone(),
            config: Config::default(),
            policy: FaultPolicy::default(),
            processor: Arc::new(Flattener),
            layouts: RwLock::new(HashMap::new()),
        }
    }

    /// Replace the registry snapshot.
    pub fn with_registry(mut self, registry: SchemaRegistry) -> Self {
        self.registry = registry;
        self.layouts.get_mut().clear();
        self
    }

    /// Replace the configuration.
    ///
    /// Cached layouts are dropped because the ordinal cap participates in
    /// extraction-time validation.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self.layouts.get_mut().clear();
        self
    }

    /// Set the fault policy applied to projected rows.
    #[inline]
    pub fn with_fault_policy(mut self, policy: FaultPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Install a custom [`ValueProcessor`] for cell rendering.
    #[inline]
    pub fn with_processor(mut self, processor: Arc<dyn ValueProcessor>) -> Self {
        self.processor = processor;
        self
    }

    /// The registry snapshot this mapper consults.
    #[inline]
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// The active configuration.
    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The column layout for `T`, extracting and caching it on first use.
    pub fn descriptors<T: Any>(&self) -> Result<Arc<[ColumnDescriptor]>> {
        let key = TypeId::of::<T>();
        if let Some(layout) = self.layouts.read().get(&key) {
            return Ok(Arc::clone(layout));
        }
        // Raced extractions produce identical layouts; the last insert wins.
        let columns = SchemaExtractor::new(&self.registry)
            .with_max_column_order(self.config.max_column_order)
            .extract_type::<T>()?;
        let layout: Arc<[ColumnDescriptor]> = columns.into();
        self.layouts.write().insert(key, Arc::clone(&layout));
        Ok(layout)
    }

    /// A projector bound to `T`'s layout and this mapper's settings.
    pub fn projector<T: Any>(&self) -> Result<RowProjector> {
        let descriptors = self.descriptors::<T>()?;
        Ok(RowProjector::new(descriptors, self.config.clone())
            .with_fault_policy(self.policy)
            .with_processor(Arc::clone(&self.processor)))
    }

    /// The sheet name for `T`: its declared name, else the configured default.
    pub fn sheet_name<T: Any>(&self) -> String {
        self.registry
            .get(TypeId::of::<T>())
            .and_then(|schema| schema.sheet_name())
            .unwrap_or(self.config.default_sheet_name.as_str())
            .to_string()
    }

    /// The dense header row for `T`, ordered by column ordinal.
    ///
    /// Ordinal gaps come back as empty strings so the vector lines up with
    /// dense row output.
    pub fn headers<T: Any>(&self) -> Result<Vec<String>> {
        let descriptors = self.descriptors::<T>()?;
        let width = descriptors
            .iter()
            .map(|descriptor| descriptor.cell_index() + 1)
            .max()
            .unwrap_or(0) as usize;
        let mut headers = vec![String::new(); width];
        for descriptor in descriptors.iter() {
            headers[descriptor.cell_index() as usize] = descriptor.header().to_string();
        }
        Ok(headers)
    }

    /// Project `objects` lazily, one row per pulled item.
    pub fn rows<'a, T, I>(&self, objects: I) -> Result<Rows<I::IntoIter>>
    where
        T: Any,
        I: IntoIterator<Item = &'a T>,
    {
        Ok(Rows {
            projector: self.projector::<T>()?,
            objects: objects.into_iter(),
        })
    }

    /// Project a slice in parallel, preserving input order.
    pub fn rows_slice<T>(&self, objects: &[T]) -> Result<Vec<Row>>
    where
        T: Any + Sync,
    {
        self.projector::<T>()?.project_slice(objects)
    }

    /// Project a whole sheet: name, header row, and data rows.
    pub fn sheet_data<T>(&self, objects: &[T]) -> Result<SheetData>
    where
        T: Any + Sync,
    {
        Ok(SheetData {
            name: self.sheet_name::<T>(),
            headers: self.headers::<T>()?,
            rows: self.rows_slice(objects)?,
        })
    }
}

impl Default for SheetMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SheetMapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetMapper")
            .field("config", &self.config)
            .field("policy", &self.policy)
            .field("registered_types", &self.registry.len())
            .finish_non_exhaustive()
    }
}

/// Lazy row iterator returned by [`SheetMapper::rows`].
pub struct Rows<I> {
    projector: RowProjector,
    objects: I,
}

impl<'a, T, I> Iterator for Rows<I>
where
    T: Any,
    I: Iterator<Item = &'a T>,
{
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        self.objects
            .next()
            .map(|object| self.projector.project(object))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.objects.size_hint()
    }
}

/// A fully projected sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetData {
    /// Sheet name, declared or defaulted.
    pub name: String,
    /// Dense header row in ordinal order.
    pub headers: Vec<String>,
    /// Data rows in input order.
    pub rows: Vec<Row>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::common::error::{Error, SchemaError};
    use crate::schema::declaration::{Field, Tabular, TypeSchema};
    use crate::value::Value;

    struct Roster {
        names: Vec<Option<String>>,
    }

    impl Tabular for Roster {
        fn schema() -> TypeSchema {
            TypeSchema::builder::<Roster>()
                .field(Field::new("names").ordinal(1).get(|r: &Roster| r.names.clone()))
                .build()
        }
    }

    struct Index {
        entries: HashMap<Option<String>, Option<String>>,
    }

    impl Tabular for Index {
        fn schema() -> TypeSchema {
            TypeSchema::builder::<Index>()
                .field(Field::new("entries").ordinal(1).get(|i: &Index| i.entries.clone()))
                .build()
        }
    }

    struct Office {
        street: String,
        city: String,
    }

    impl Tabular for Office {
        fn schema() -> TypeSchema {
            TypeSchema::builder::<Office>()
                .field(Field::new("street").ordinal(2).get(|o: &Office| o.street.clone()))
                .field(Field::new("city").ordinal(3).get(|o: &Office| o.city.clone()))
                .build()
        }
    }

    struct Company {
        name: String,
        office: Office,
    }

    impl Tabular for Company {
        fn schema() -> TypeSchema {
            TypeSchema::builder::<Company>()
                .sheet_name("Companies")
                .field(Field::new("name").ordinal(1).get(|c: &Company| c.name.clone()))
                .field(Field::new("office").nested(|c: &Company| Some(&c.office)))
                .build()
        }
    }

    fn mapper_for<T: Tabular>() -> SheetMapper {
        let mut registry = SchemaRegistry::new();
        registry.register::<T>();
        SheetMapper::new().with_registry(registry)
    }

    #[test]
    fn test_sequence_cell_uses_placeholder_for_absent_elements() {
        let mapper = mapper_for::<Roster>();
        let roster = Roster {
            names: vec![
                Some("A".to_string()),
                None,
                Some("C".to_string()),
            ],
        };
        let rows = mapper.rows_slice(std::slice::from_ref(&roster)).unwrap();
        assert_eq!(rows[0].get(0), Some("A, <empty>, C"));
    }

    #[test]
    fn test_mapping_cell_uses_placeholder_on_both_sides() {
        let mapper = mapper_for::<Index>();
        let mut entries = HashMap::new();
        entries.insert(None, Some("X".to_string()));
        entries.insert(Some("K".to_string()), None);
        let index = Index { entries };

        let rows = mapper.rows_slice(std::slice::from_ref(&index)).unwrap();
        let cell = rows[0].get(0).unwrap();
        assert!(cell.contains("<empty> : X"));
        assert!(cell.contains("K : <empty>"));
        assert_eq!(cell.matches('\n').count(), 1);
    }

    #[test]
    fn test_nested_composite_headers_and_cells() {
        let mut registry = SchemaRegistry::new();
        registry.register::<Company>().register::<Office>();
        let mapper = SheetMapper::new().with_registry(registry);

        assert_eq!(
            mapper.headers::<Company>().unwrap(),
            vec!["Name", "Office - Street", "Office - City"]
        );

        let company = Company {
            name: "Acme".to_string(),
            office: Office {
                street: "1 Main".to_string(),
                city: "Cork".to_string(),
            },
        };
        let rows = mapper.rows_slice(std::slice::from_ref(&company)).unwrap();
        assert_eq!(
            rows[0].clone().into_dense(),
            vec!["Acme", "1 Main", "Cork"]
                .into_iter()
                .map(str::to_string)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_layouts_are_cached_per_type() {
        let mapper = mapper_for::<Roster>();
        let first = mapper.descriptors::<Roster>().unwrap();
        let second = mapper.descriptors::<Roster>().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_with_config_drops_cached_layouts() {
        struct Wide {
            value: u32,
        }

        let mut registry = SchemaRegistry::new();
        registry.insert(
            TypeSchema::builder::<Wide>()
                .field(Field::new("value").ordinal(50).get(|w: &Wide| w.value))
                .build(),
        );
        let mapper = SheetMapper::new().with_registry(registry);
        assert!(mapper.descriptors::<Wide>().is_ok());

        let mapper = mapper.with_config(Config::new().with_max_column_order(10));
        let error = mapper.descriptors::<Wide>().unwrap_err();
        assert!(matches!(
            error,
            Error::Schema(SchemaError::InvalidOrdinal { ordinal: 50, .. })
        ));
    }

    #[test]
    fn test_headers_follow_ordinal_order_not_declaration_order() {
        struct Swapped {
            first: u32,
            second: u32,
        }

        let mut registry = SchemaRegistry::new();
        registry.insert(
            TypeSchema::builder::<Swapped>()
                .field(Field::new("second").ordinal(2).get(|s: &Swapped| s.second))
                .field(Field::new("first").ordinal(1).get(|s: &Swapped| s.first))
                .build(),
        );
        let mapper = SheetMapper::new().with_registry(registry);
        assert_eq!(mapper.headers::<Swapped>().unwrap(), vec!["First", "Second"]);
    }

    #[test]
    fn test_headers_blank_out_ordinal_gaps() {
        struct Gappy {
            tail: u32,
        }

        let mut registry = SchemaRegistry::new();
        registry.insert(
            TypeSchema::builder::<Gappy>()
                .field(Field::new("tail").ordinal(3).get(|g: &Gappy| g.tail))
                .build(),
        );
        let mapper = SheetMapper::new().with_registry(registry);
        assert_eq!(mapper.headers::<Gappy>().unwrap(), vec!["", "", "Tail"]);
    }

    #[test]
    fn test_sheet_name_declared_and_defaulted() {
        let mut registry = SchemaRegistry::new();
        registry.register::<Company>().register::<Office>();
        let mapper = SheetMapper::new().with_registry(registry);

        assert_eq!(mapper.sheet_name::<Company>(), "Companies");
        assert_eq!(mapper.sheet_name::<Office>(), "Sheet");
        assert_eq!(
            SheetMapper::new()
                .with_config(Config::new().with_default_sheet_name("Data"))
                .sheet_name::<Roster>(),
            "Data"
        );
    }

    #[test]
    fn test_rows_iterator_is_lazy_and_ordered() {
        let mapper = mapper_for::<Roster>();
        let rosters = vec![
            Roster {
                names: vec![Some("a".to_string())],
            },
            Roster { names: vec![] },
        ];

        let mut rows = mapper.rows(&rosters).unwrap();
        assert_eq!(rows.size_hint(), (2, Some(2)));
        assert_eq!(rows.next().unwrap().unwrap().get(0), Some("a"));
        assert_eq!(rows.next().unwrap().unwrap().get(0), Some(""));
        assert!(rows.next().is_none());
    }

    #[test]
    fn test_sheet_data_assembles_name_headers_and_rows() {
        let mut registry = SchemaRegistry::new();
        registry.register::<Company>().register::<Office>();
        let mapper = SheetMapper::new().with_registry(registry);

        let companies = vec![
            Company {
                name: "Acme".to_string(),
                office: Office {
                    street: "1 Main".to_string(),
                    city: "Cork".to_string(),
                },
            },
            Company {
                name: "Buro".to_string(),
                office: Office {
                    street: "2 High".to_string(),
                    city: "Kyoto".to_string(),
                },
            },
        ];
        let sheet = mapper.sheet_data(&companies).unwrap();

        assert_eq!(sheet.name, "Companies");
        assert_eq!(sheet.headers.len(), 3);
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[1].get(0), Some("Buro"));
        assert_eq!(sheet.rows[1].get(2), Some("Kyoto"));
    }

    #[test]
    fn test_custom_processor_flows_through_mapper() {
        struct Upper;

        impl ValueProcessor for Upper {
            fn process(&self, value: &Value, config: &Config) -> String {
                Flattener.flatten(value, config).to_uppercase()
            }
        }

        let mapper = mapper_for::<Roster>().with_processor(Arc::new(Upper));
        let roster = Roster {
            names: vec![Some("ab".to_string())],
        };
        let rows = mapper.rows_slice(std::slice::from_ref(&roster)).unwrap();
        assert_eq!(rows[0].get(0), Some("AB"));
    }

    #[test]
    fn test_missing_declaration_surfaces_as_schema_error() {
        struct Unregistered;

        let mapper = SheetMapper::new().with_registry(SchemaRegistry::new());
        let error = mapper.descriptors::<Unregistered>().unwrap_err();
        assert!(matches!(
            error,
            Error::Schema(SchemaError::MissingDeclaration(_))
        ));
    }
}
