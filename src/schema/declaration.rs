//! Schema declarations.
//!
//! A [`TypeSchema`] declares, for one Rust type, which fields become columns
//! and how each field is read off an instance. Accessors are written as
//! ordinary typed closures and erased here into [`AccessorFn`]s operating on
//! `&dyn Any`, so the rest of the pipeline can walk heterogeneous object
//! graphs without knowing any concrete type. Types expose their declaration
//! through the [`Tabular`] trait.

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::schema::types::{AtomicKind, DeclaredType, TypeRef};
use crate::value::{IntoValue, Value};

/// Outcome of applying one accessor to one object.
pub enum Resolved<'a> {
    /// A terminal value ready for flattening.
    Value(Value),
    /// A nested object to continue resolution into.
    Child(&'a dyn Any),
    /// The value is absent; resolution short-circuits to an absent cell.
    Missing,
}

impl fmt::Debug for Resolved<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolved::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Resolved::Child(_) => f.write_str("Child"),
            Resolved::Missing => f.write_str("Missing"),
        }
    }
}

/// Type-erased accessor applied to a parent object.
///
/// Returns `None` when the runtime object is not of the type the accessor
/// was declared for.
pub type AccessorFn = Arc<dyn for<'a> Fn(&'a dyn Any) -> Option<Resolved<'a>> + Send + Sync>;

/// The three accessor strategies a field may populate.
///
/// Mirrors the conventional accessor lookup on reflective platforms: a
/// getter, a boolean-style getter, and direct field access, tried in that
/// order.
#[derive(Clone, Default)]
pub struct AccessorChain {
    getter: Option<AccessorFn>,
    bool_getter: Option<AccessorFn>,
    direct: Option<AccessorFn>,
}

impl AccessorChain {
    /// The accessor that wins under the strategy order: getter first, then
    /// boolean-style getter, then direct field projection.
    #[inline]
    pub fn select(&self) -> Option<&AccessorFn> {
        self.getter
            .as_ref()
            .or(self.bool_getter.as_ref())
            .or(self.direct.as_ref())
    }

    /// Whether no strategy is populated.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.getter.is_none() && self.bool_getter.is_none() && self.direct.is_none()
    }
}

impl fmt::Debug for AccessorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        if self.getter.is_some() {
            list.entry(&"getter");
        }
        if self.bool_getter.is_some() {
            list.entry(&"bool_getter");
        }
        if self.direct.is_some() {
            list.entry(&"direct");
        }
        list.finish()
    }
}

fn wrap<F>(accessor: F) -> AccessorFn
where
    F: for<'a> Fn(&'a dyn Any) -> Option<Resolved<'a>> + Send + Sync + 'static,
{
    Arc::new(accessor)
}

fn erase_terminal<T, V, F>(accessor: F) -> AccessorFn
where
    T: Any,
    V: IntoValue,
    F: Fn(&T) -> V + Send + Sync + 'static,
{
    wrap(move |object: &dyn Any| {
        object
            .downcast_ref::<T>()
            .map(|target| Resolved::Value(accessor(target).into_value()))
    })
}

fn erase_child<T, C, F>(accessor: F) -> AccessorFn
where
    T: Any,
    C: Any,
    F: for<'a> Fn(&'a T) -> Option<&'a C> + Send + Sync + 'static,
{
    wrap(move |object: &dyn Any| {
        object
            .downcast_ref::<T>()
            .map(|target| match accessor(target) {
                Some(child) => Resolved::Child(child as &dyn Any),
                None => Resolved::Missing,
            })
    })
}

/// Builder for one field declaration on `T`.
///
/// A field participates as a column when any of [`column`](Field::column),
/// [`header`](Field::header) or [`ordinal`](Field::ordinal) marks it, or when
/// the surrounding schema opts into `include_all`. Accessor installers fix
/// the field's declared type from the closure's return type.
///
/// # Examples
///
/// ```rust
/// use longan::{Field, TypeSchema};
///
/// struct Employee {
///     id: u32,
/// }
///
/// let schema = TypeSchema::builder::<Employee>()
///     .field(Field::new("id").ordinal(1).get(|e: &Employee| e.id))
///     .build();
/// assert_eq!(schema.fields().len(), 1);
/// ```
pub struct Field<T> {
    name: &'static str,
    header: Option<String>,
    ordinal: u32,
    marked: bool,
    declared: Option<DeclaredType>,
    chain: AccessorChain,
    _parent: PhantomData<fn(&T)>,
}

impl<T: Any> Field<T> {
    /// Start a declaration for the field named `name`.
    ///
    /// # Panics
    ///
    /// Panics when `name` is empty or whitespace-only; every column needs an
    /// identifier to derive its header and path from.
    pub fn new(name: &'static str) -> Self {
        assert!(!name.trim().is_empty(), "field identifier must not be empty");
        Self {
            name,
            header: None,
            ordinal: 0,
            marked: false,
            declared: None,
            chain: AccessorChain::default(),
            _parent: PhantomData,
        }
    }

    /// Mark the field as a column without overriding header or ordinal.
    #[inline]
    pub fn column(mut self) -> Self {
        self.marked = true;
        self
    }

    /// Set an explicit header, overriding the humanized identifier.
    #[inline]
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self.marked = true;
        self
    }

    /// Declare the 1-based column ordinal. `0` leaves the ordinal for
    /// auto-assignment after extraction.
    #[inline]
    pub fn ordinal(mut self, ordinal: u32) -> Self {
        self.ordinal = ordinal;
        self.marked = true;
        self
    }

    /// Install the getter strategy.
    pub fn get<V, F>(mut self, accessor: F) -> Self
    where
        V: IntoValue,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        self.declare(V::declared_type());
        self.chain.getter = Some(erase_terminal(accessor));
        self
    }

    /// Install the boolean-style getter strategy.
    ///
    /// Consulted only when no plain getter is installed; intended for
    /// `is_*` predicates.
    pub fn get_bool<V, F>(mut self, accessor: F) -> Self
    where
        V: IntoValue,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        debug_assert!(
            matches!(V::declared_type(), DeclaredType::Atomic(AtomicKind::Bool)),
            "boolean-style getters must yield boolean values"
        );
        self.declare(V::declared_type());
        self.chain.bool_getter = Some(erase_terminal(accessor));
        self
    }

    /// Install the direct field projection strategy, the last resort in the
    /// accessor order.
    pub fn direct<V, F>(mut self, accessor: F) -> Self
    where
        V: IntoValue,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        self.declare(V::declared_type());
        self.chain.direct = Some(erase_terminal(accessor));
        self
    }

    /// Install a getter yielding a nested object of type `C`.
    ///
    /// The field becomes composite: extraction expands `C`'s own schema into
    /// child columns instead of emitting a column for this field. Returning
    /// `None` marks the nested object absent for the row at hand.
    pub fn nested<C, F>(mut self, accessor: F) -> Self
    where
        C: Any,
        F: for<'a> Fn(&'a T) -> Option<&'a C> + Send + Sync + 'static,
    {
        self.declare(DeclaredType::Composite(TypeRef::of::<C>()));
        self.chain.getter = Some(erase_child(accessor));
        self
    }

    /// Install a direct projection yielding a nested object of type `C`.
    pub fn nested_direct<C, F>(mut self, accessor: F) -> Self
    where
        C: Any,
        F: for<'a> Fn(&'a T) -> Option<&'a C> + Send + Sync + 'static,
    {
        self.declare(DeclaredType::Composite(TypeRef::of::<C>()));
        self.chain.direct = Some(erase_child(accessor));
        self
    }

    fn declare(&mut self, declared: DeclaredType) {
        debug_assert!(
            self.declared.map_or(true, |existing| existing == declared),
            "accessor strategies for \"{}\" disagree on the declared type",
            self.name
        );
        self.declared.get_or_insert(declared);
    }

    fn build(self) -> FieldDecl {
        FieldDecl {
            name: self.name,
            header: self.header,
            ordinal: self.ordinal,
            marked: self.marked,
            declared: self.declared.unwrap_or(DeclaredType::Opaque),
            chain: self.chain,
        }
    }
}

/// A finished field declaration inside a [`TypeSchema`].
#[derive(Debug, Clone)]
pub struct FieldDecl {
    name: &'static str,
    header: Option<String>,
    ordinal: u32,
    marked: bool,
    declared: DeclaredType,
    chain: AccessorChain,
}

impl FieldDecl {
    /// The field identifier.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The explicit header, when one was declared.
    #[inline]
    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    /// The declared 1-based ordinal, `0` when left for auto-assignment.
    #[inline]
    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }

    /// The declared value shape.
    #[inline]
    pub fn declared(&self) -> DeclaredType {
        self.declared
    }

    /// The accessor strategies.
    #[inline]
    pub fn chain(&self) -> &AccessorChain {
        &self.chain
    }

    /// Whether the field contributes columns under the given inclusion mode.
    #[inline]
    pub fn participates(&self, include_all: bool) -> bool {
        self.marked || include_all
    }
}

/// Schema declaration for one Rust type.
///
/// Built through [`TypeSchema::builder`] and registered in a
/// [`SchemaRegistry`](crate::SchemaRegistry), usually via the [`Tabular`]
/// trait.
#[derive(Debug, Clone)]
pub struct TypeSchema {
    type_ref: TypeRef,
    sheet_name: Option<String>,
    include_all: bool,
    fields: Vec<FieldDecl>,
}

impl TypeSchema {
    /// Start a schema declaration for `T`.
    pub fn builder<T: Any>() -> TypeSchemaBuilder<T> {
        TypeSchemaBuilder {
            schema: TypeSchema {
                type_ref: TypeRef::of::<T>(),
                sheet_name: None,
                include_all: false,
                fields: Vec::new(),
            },
            _target: PhantomData,
        }
    }

    /// Identity of the declared type.
    #[inline]
    pub fn type_ref(&self) -> TypeRef {
        self.type_ref
    }

    /// The declared sheet name, when one was given.
    #[inline]
    pub fn sheet_name(&self) -> Option<&str> {
        self.sheet_name.as_deref()
    }

    /// Whether unmarked fields participate as columns.
    #[inline]
    pub fn include_all(&self) -> bool {
        self.include_all
    }

    /// The declared fields, in declaration order.
    #[inline]
    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }
}

/// Builder for a [`TypeSchema`], typed over the declared type `T`.
pub struct TypeSchemaBuilder<T> {
    schema: TypeSchema,
    _target: PhantomData<fn(&T)>,
}

impl<T: Any> TypeSchemaBuilder<T> {
    /// Set the sheet name exports of this type should land on.
    #[inline]
    pub fn sheet_name(mut self, name: impl Into<String>) -> Self {
        self.schema.sheet_name = Some(name.into());
        self
    }

    /// Let unmarked fields participate as columns.
    #[inline]
    pub fn include_all(mut self, include: bool) -> Self {
        self.schema.include_all = include;
        self
    }

    /// Add a field declaration.
    ///
    /// # Panics
    ///
    /// Panics when a field with the same identifier was already added.
    pub fn field(mut self, field: Field<T>) -> Self {
        let decl = field.build();
        assert!(
            self.schema
                .fields
                .iter()
                .all(|existing| existing.name != decl.name),
            "duplicate field \"{}\" in schema for {}",
            decl.name,
            self.schema.type_ref
        );
        self.schema.fields.push(decl);
        self
    }

    /// Finish the declaration.
    #[inline]
    pub fn build(self) -> TypeSchema {
        self.schema
    }
}

/// Types that declare how their instances map onto spreadsheet columns.
///
/// # Examples
///
/// ```rust
/// use longan::{Field, Tabular, TypeSchema};
///
/// struct Account {
///     number: String,
///     active: bool,
/// }
///
/// impl Tabular for Account {
///     fn schema() -> TypeSchema {
///         TypeSchema::builder::<Account>()
///             .sheet_name("Accounts")
///             .field(Field::new("number").ordinal(1).get(|a: &Account| a.number.clone()))
///             .field(Field::new("active").ordinal(2).get_bool(|a: &Account| a.active))
///             .build()
///     }
/// }
/// ```
pub trait Tabular: Any {
    /// Build the schema declaration for this type.
    fn schema() -> TypeSchema
    where
        Self: Sized;
}
