//! Per-object value resolution.
//!
//! A [`ValueResolver`] walks one field path against one runtime object,
//! applying each segment's accessor chain and descending through nested
//! objects until the leaf yields a value. Absence anywhere along the path is
//! data, not an error: resolution short-circuits to an absent value and the
//! cell comes out empty. Faults are reserved for declarations that cannot be
//! applied to the object at hand.

use std::any::Any;

use crate::common::error::ResolutionFault;
use crate::schema::declaration::Resolved;
use crate::schema::descriptor::{FieldPath, PathSegment};
use crate::value::Value;

/// Resolves field paths against runtime objects.
///
/// Stateless; the accessor strategy order lives in each path segment's
/// chain, recorded at declaration time.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueResolver;

impl ValueResolver {
    /// Resolve `path` against `instance`.
    ///
    /// An empty path resolves to an absent value. Intermediate segments must
    /// yield nested objects and the leaf must yield a terminal value; a
    /// declaration violating that shape surfaces as a
    /// [`ResolutionFault::TypeMismatch`].
    pub fn resolve(
        &self,
        instance: &dyn Any,
        path: &FieldPath,
    ) -> Result<Value, ResolutionFault> {
        let Some((leaf, parents)) = path.segments().split_last() else {
            return Ok(Value::Missing);
        };

        let mut current = instance;
        for segment in parents {
            match self.apply(segment, current)? {
                Resolved::Child(child) => current = child,
                Resolved::Missing => return Ok(Value::Missing),
                Resolved::Value(_) => {
                    return Err(ResolutionFault::TypeMismatch {
                        field: segment.name().to_string(),
                        expected: "nested object",
                    });
                }
            }
        }

        match self.apply(leaf, current)? {
            Resolved::Value(value) => Ok(value),
            Resolved::Missing => Ok(Value::Missing),
            Resolved::Child(_) => Err(ResolutionFault::TypeMismatch {
                field: leaf.name().to_string(),
                expected: "leaf value",
            }),
        }
    }

    fn apply<'a>(
        &self,
        segment: &PathSegment,
        object: &'a dyn Any,
    ) -> Result<Resolved<'a>, ResolutionFault> {
        let accessor = segment
            .chain()
            .select()
            .ok_or_else(|| ResolutionFault::Unreadable {
                field: segment.name().to_string(),
            })?;
        accessor(object).ok_or_else(|| ResolutionFault::TypeMismatch {
            field: segment.name().to_string(),
            expected: segment.declaring_type(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::declaration::{Field, Tabular, TypeSchema};
    use crate::schema::descriptor::ColumnDescriptor;
    use crate::schema::extractor::SchemaExtractor;
    use crate::schema::registry::SchemaRegistry;

    struct Profile {
        display_name: Option<String>,
        verified: bool,
        score: u32,
    }

    impl Tabular for Profile {
        fn schema() -> TypeSchema {
            TypeSchema::builder::<Profile>()
                .field(
                    Field::new("display_name")
                        .ordinal(1)
                        .get(|p: &Profile| p.display_name.clone()),
                )
                .field(Field::new("verified").ordinal(2).get_bool(|p: &Profile| p.verified))
                .field(Field::new("score").ordinal(3).direct(|p: &Profile| p.score))
                .field(Field::new("note").ordinal(4))
                .build()
        }
    }

    struct Wrap {
        profile: Option<Profile>,
    }

    impl Tabular for Wrap {
        fn schema() -> TypeSchema {
            TypeSchema::builder::<Wrap>()
                .field(
                    Field::new("profile")
                        .column()
                        .nested(|w: &Wrap| w.profile.as_ref()),
                )
                .build()
        }
    }

    fn layout<T: Tabular>() -> Vec<ColumnDescriptor> {
        let mut registry = SchemaRegistry::new();
        registry.register::<T>();
        SchemaExtractor::new(&registry).extract_type::<T>().unwrap()
    }

    fn wrap_layout() -> Vec<ColumnDescriptor> {
        let mut registry = SchemaRegistry::new();
        registry.register::<Wrap>();
        registry.register::<Profile>();
        SchemaExtractor::new(&registry).extract_type::<Wrap>().unwrap()
    }

    fn profile(display_name: Option<&str>) -> Profile {
        Profile {
            display_name: display_name.map(str::to_string),
            verified: true,
            score: 88,
        }
    }

    #[test]
    fn test_getter_strategy_resolves() {
        let columns = layout::<Profile>();
        let value = ValueResolver
            .resolve(&profile(Some("Ada")), columns[0].path())
            .unwrap();
        assert_eq!(value, Value::Atomic("Ada".to_string()));
    }

    #[test]
    fn test_absent_value_is_not_a_fault() {
        let columns = layout::<Profile>();
        let value = ValueResolver
            .resolve(&profile(None), columns[0].path())
            .unwrap();
        assert!(value.is_missing());
    }

    #[test]
    fn test_bool_getter_and_direct_strategies() {
        let columns = layout::<Profile>();
        let subject = profile(Some("Ada"));

        let verified = ValueResolver.resolve(&subject, columns[1].path()).unwrap();
        assert_eq!(verified, Value::Atomic("true".to_string()));

        let score = ValueResolver.resolve(&subject, columns[2].path()).unwrap();
        assert_eq!(score, Value::Atomic("88".to_string()));
    }

    #[test]
    fn test_accessorless_field_is_unreadable() {
        let columns = layout::<Profile>();
        let fault = ValueResolver
            .resolve(&profile(Some("Ada")), columns[3].path())
            .unwrap_err();
        assert_eq!(
            fault,
            ResolutionFault::Unreadable {
                field: "note".to_string(),
            }
        );
    }

    #[test]
    fn test_wrong_runtime_type_is_a_mismatch() {
        let columns = layout::<Profile>();
        let not_a_profile = String::from("something else");
        let fault = ValueResolver
            .resolve(&not_a_profile, columns[0].path())
            .unwrap_err();
        match fault {
            ResolutionFault::TypeMismatch { field, expected } => {
                assert_eq!(field, "display_name");
                assert!(expected.contains("Profile"));
            }
            other => panic!("unexpected fault: {other:?}"),
        }
    }

    #[test]
    fn test_nested_path_descends_into_child() {
        let columns = wrap_layout();
        assert_eq!(columns[0].path().dotted(), "profile.display_name");

        let present = Wrap {
            profile: Some(profile(Some("Ada"))),
        };
        let value = ValueResolver.resolve(&present, columns[0].path()).unwrap();
        assert_eq!(value, Value::Atomic("Ada".to_string()));
    }

    #[test]
    fn test_absent_parent_short_circuits_whole_path() {
        let columns = wrap_layout();
        let absent = Wrap { profile: None };
        for column in &columns {
            let value = ValueResolver.resolve(&absent, column.path()).unwrap();
            assert!(value.is_missing());
        }
    }

    #[test]
    fn test_empty_path_resolves_to_absent() {
        let value = ValueResolver
            .resolve(&profile(None), &FieldPath::default())
            .unwrap();
        assert!(value.is_missing());
    }
}
