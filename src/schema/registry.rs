//! Schema registry.
//!
//! Extraction resolves composite fields by looking the referenced type up in
//! a [`SchemaRegistry`]. Registries are plain values so tests and embedded
//! uses can build isolated ones; a process-wide default registry is provided
//! for the common case of registering every exportable type once at startup.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::schema::declaration::{Tabular, TypeSchema};

static DEFAULT_REGISTRY: Lazy<RwLock<SchemaRegistry>> =
    Lazy::new(|| RwLock::new(SchemaRegistry::new()));

/// The process-wide registry consulted by [`SheetMapper::new`](crate::SheetMapper::new).
pub fn default_registry() -> &'static RwLock<SchemaRegistry> {
    &DEFAULT_REGISTRY
}

/// Register `T`'s schema in the process-wide registry.
///
/// Replaces any earlier registration for the same type.
pub fn register_default<T: Tabular>() {
    DEFAULT_REGISTRY.write().register::<T>();
}

/// Collection of schema declarations keyed by type identity.
///
/// # Examples
///
/// ```rust
/// use longan::{Field, SchemaRegistry, Tabular, TypeSchema};
///
/// struct Device {
///     serial: String,
/// }
///
/// impl Tabular for Device {
///     fn schema() -> TypeSchema {
///         TypeSchema::builder::<Device>()
///             .field(Field::new("serial").ordinal(1).get(|d: &Device| d.serial.clone()))
///             .build()
///     }
/// }
///
/// let mut registry = SchemaRegistry::new();
/// registry.register::<Device>();
/// assert!(registry.contains::<Device>());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<TypeId, TypeSchema>,
}

impl SchemaRegistry {
    /// Create an empty registry.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `T`'s schema, replacing any earlier registration.
    pub fn register<T: Tabular>(&mut self) -> &mut Self {
        let schema = T::schema();
        debug_assert_eq!(
            schema.type_ref().id(),
            TypeId::of::<T>(),
            "schema declared for a different type"
        );
        self.insert(schema);
        self
    }

    /// Insert a schema built elsewhere, keyed by its declared type.
    ///
    /// Returns the schema it replaced, if any.
    pub fn insert(&mut self, schema: TypeSchema) -> Option<TypeSchema> {
        self.schemas.insert(schema.type_ref().id(), schema)
    }

    /// Look a schema up by type identity.
    #[inline]
    pub fn get(&self, id: TypeId) -> Option<&TypeSchema> {
        self.schemas.get(&id)
    }

    /// Whether a schema for `T` is registered.
    #[inline]
    pub fn contains<T: Any>(&self) -> bool {
        self.schemas.contains_key(&TypeId::of::<T>())
    }

    /// Number of registered schemas.
    #[inline]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Whether the registry is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
