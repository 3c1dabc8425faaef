//! Conversion of concrete Rust types into the closed value model.
//!
//! Accessor closures return ordinary Rust values; [`IntoValue`] is the bridge
//! that reduces them to [`Value`] and, at declaration time, reports the
//! [`DeclaredType`] the schema should record for the field. Integer and float
//! text goes through `itoa`/`ryu` so the canonical form is produced without
//! intermediate formatting machinery.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::fmt;

use crate::schema::{AtomicKind, DeclaredType};
use crate::value::Value;

/// Types that can serve as field values.
///
/// `declared_type` is consulted once, when the field is declared; it decides
/// whether extraction treats the field as an atomic leaf, a collection leaf
/// or a composite to expand. `into_value` runs per row and must agree with
/// that declaration.
///
/// Implementations exist for the primitive types, strings, `chrono` date and
/// time types, `bigdecimal` numbers, [`uuid::Uuid`], [`CurrencyCode`],
/// `Option`, the standard sequence and map containers, and [`Value`] itself.
/// User enumerations with a `Display` form can opt in through the
/// [`atomic_display!`](crate::atomic_display) macro.
pub trait IntoValue {
    /// The declared shape of values this type contributes to a schema.
    fn declared_type() -> DeclaredType;

    /// Convert into the closed value model.
    fn into_value(self) -> Value;
}

/// Implement [`IntoValue`] for types rendered through their `Display` form.
///
/// The first argument names the [`AtomicKind`](crate::schema::AtomicKind)
/// variant recorded in the declaration; the remaining arguments are the types
/// to cover. This is how the crate's own `chrono`, `bigdecimal` and `uuid`
/// coverage is produced, and it is the intended opt-in for user enumerations.
///
/// # Examples
///
/// ```rust
/// use std::fmt;
/// use longan::atomic_display;
///
/// #[derive(Clone, Copy)]
/// enum Status {
///     Active,
///     Suspended,
/// }
///
/// impl fmt::Display for Status {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         f.write_str(match self {
///             Status::Active => "ACTIVE",
///             Status::Suspended => "SUSPENDED",
///         })
///     }
/// }
///
/// atomic_display!(Enum => Status);
///
/// use longan::{IntoValue, Value};
/// assert_eq!(Status::Active.into_value(), Value::Atomic("ACTIVE".to_string()));
/// ```
#[macro_export]
macro_rules! atomic_display {
    ($kind:ident => $($ty:ty),+ $(,)?) => {
        $(
            impl $crate::value::IntoValue for $ty {
                fn declared_type() -> $crate::schema::DeclaredType {
                    $crate::schema::DeclaredType::Atomic($crate::schema::AtomicKind::$kind)
                }

                fn into_value(self) -> $crate::value::Value {
                    $crate::value::Value::Atomic(self.to_string())
                }
            }
        )+
    };
}

macro_rules! atomic_int {
    ($kind:ident => $($ty:ty),+ $(,)?) => {
        $(
            impl IntoValue for $ty {
                fn declared_type() -> DeclaredType {
                    DeclaredType::Atomic(AtomicKind::$kind)
                }

                fn into_value(self) -> Value {
                    let mut buffer = itoa::Buffer::new();
                    Value::Atomic(buffer.format(self).to_string())
                }
            }
        )+
    };
}

atomic_int!(Int => i8, i16, i32, i64, i128, isize);
atomic_int!(Uint => u8, u16, u32, u64, u128, usize);

macro_rules! atomic_float {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl IntoValue for $ty {
                fn declared_type() -> DeclaredType {
                    DeclaredType::Atomic(AtomicKind::Float)
                }

                fn into_value(self) -> Value {
                    let mut buffer = ryu::Buffer::new();
                    Value::Atomic(buffer.format(self).to_string())
                }
            }
        )+
    };
}

atomic_float!(f32, f64);

impl IntoValue for bool {
    fn declared_type() -> DeclaredType {
        DeclaredType::Atomic(AtomicKind::Bool)
    }

    fn into_value(self) -> Value {
        Value::Atomic(if self { "true" } else { "false" }.to_string())
    }
}

impl IntoValue for char {
    fn declared_type() -> DeclaredType {
        DeclaredType::Atomic(AtomicKind::Char)
    }

    fn into_value(self) -> Value {
        Value::Atomic(String::from(self))
    }
}

impl IntoValue for String {
    fn declared_type() -> DeclaredType {
        DeclaredType::Atomic(AtomicKind::Text)
    }

    fn into_value(self) -> Value {
        Value::Atomic(self)
    }
}

impl IntoValue for &str {
    fn declared_type() -> DeclaredType {
        DeclaredType::Atomic(AtomicKind::Text)
    }

    fn into_value(self) -> Value {
        Value::Atomic(self.to_string())
    }
}

impl IntoValue for Cow<'_, str> {
    fn declared_type() -> DeclaredType {
        DeclaredType::Atomic(AtomicKind::Text)
    }

    fn into_value(self) -> Value {
        Value::Atomic(self.into_owned())
    }
}

atomic_display!(Date => chrono::NaiveDate);
atomic_display!(Time => chrono::NaiveTime);
atomic_display!(DateTime => chrono::NaiveDateTime);
atomic_display!(Decimal => bigdecimal::BigDecimal);
atomic_display!(BigInt => bigdecimal::num_bigint::BigInt);
atomic_display!(Uuid => uuid::Uuid);

impl<Tz: chrono::TimeZone> IntoValue for chrono::DateTime<Tz>
where
    Tz::Offset: fmt::Display,
{
    fn declared_type() -> DeclaredType {
        DeclaredType::Atomic(AtomicKind::DateTime)
    }

    fn into_value(self) -> Value {
        Value::Atomic(self.to_string())
    }
}

/// An ISO 4217 currency code carried as plain text.
///
/// The code is not validated against the ISO table; the type exists so
/// schemas can label currency columns distinctly from free-form text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Wrap a currency code.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use longan::CurrencyCode;
    ///
    /// let usd = CurrencyCode::new("USD");
    /// assert_eq!(usd.as_str(), "USD");
    /// ```
    #[inline]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The wrapped code.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

atomic_display!(Currency => CurrencyCode);

impl<V: IntoValue> IntoValue for Option<V> {
    fn declared_type() -> DeclaredType {
        V::declared_type()
    }

    fn into_value(self) -> Value {
        match self {
            Some(value) => value.into_value(),
            None => Value::Missing,
        }
    }
}

macro_rules! sequence_into_value {
    ($($container:ident),+ $(,)?) => {
        $(
            impl<V: IntoValue> IntoValue for $container<V> {
                fn declared_type() -> DeclaredType {
                    DeclaredType::Sequence
                }

                fn into_value(self) -> Value {
                    Value::Sequence(self.into_iter().map(IntoValue::into_value).collect())
                }
            }
        )+
    };
}

sequence_into_value!(Vec, VecDeque, LinkedList, BTreeSet, HashSet);

macro_rules! mapping_into_value {
    ($($container:ident),+ $(,)?) => {
        $(
            impl<K: IntoValue, V: IntoValue> IntoValue for $container<K, V> {
                fn declared_type() -> DeclaredType {
                    DeclaredType::Mapping
                }

                fn into_value(self) -> Value {
                    Value::Mapping(
                        self.into_iter()
                            .map(|(key, value)| (key.into_value(), value.into_value()))
                            .collect(),
                    )
                }
            }
        )+
    };
}

mapping_into_value!(BTreeMap, HashMap);

impl IntoValue for Value {
    fn declared_type() -> DeclaredType {
        DeclaredType::Opaque
    }

    fn into_value(self) -> Value {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_text_is_canonical() {
        assert_eq!(42i32.into_value(), Value::Atomic("42".to_string()));
        assert_eq!((-7i64).into_value(), Value::Atomic("-7".to_string()));
        assert_eq!(0u8.into_value(), Value::Atomic("0".to_string()));
        assert_eq!(
            340_282_366_920_938_463_463u128.into_value(),
            Value::Atomic("340282366920938463463".to_string())
        );
    }

    #[test]
    fn test_float_text_is_canonical() {
        assert_eq!(2.5f64.into_value(), Value::Atomic("2.5".to_string()));
        assert_eq!(1.0f64.into_value(), Value::Atomic("1.0".to_string()));
        assert_eq!(45.6f64.into_value(), Value::Atomic("45.6".to_string()));
        assert_eq!((-0.25f32).into_value(), Value::Atomic("-0.25".to_string()));
    }

    #[test]
    fn test_bool_char_and_strings() {
        assert_eq!(true.into_value(), Value::Atomic("true".to_string()));
        assert_eq!(false.into_value(), Value::Atomic("false".to_string()));
        assert_eq!('x'.into_value(), Value::Atomic("x".to_string()));
        assert_eq!("abc".into_value(), Value::Atomic("abc".to_string()));
        assert_eq!(
            String::from("abc").into_value(),
            Value::Atomic("abc".to_string())
        );
        assert_eq!(
            Cow::Borrowed("abc").into_value(),
            Value::Atomic("abc".to_string())
        );
    }

    #[test]
    fn test_option_maps_none_to_missing() {
        assert_eq!(Option::<u32>::None.into_value(), Value::Missing);
        assert_eq!(Some(5u32).into_value(), Value::Atomic("5".to_string()));
        assert_eq!(Option::<u32>::declared_type(), u32::declared_type());
    }

    #[test]
    fn test_sequence_preserves_order_and_absence() {
        let value = vec![Some("One"), None, Some("Three")].into_value();
        assert_eq!(
            value,
            Value::Sequence(vec![
                Value::Atomic("One".to_string()),
                Value::Missing,
                Value::Atomic("Three".to_string()),
            ])
        );
        assert_eq!(Vec::<u32>::declared_type(), DeclaredType::Sequence);
        assert_eq!(VecDeque::<u32>::declared_type(), DeclaredType::Sequence);
        assert_eq!(BTreeSet::<u32>::declared_type(), DeclaredType::Sequence);
    }

    #[test]
    fn test_mapping_preserves_iteration_order() {
        let mut map = BTreeMap::new();
        map.insert("b", 2u32);
        map.insert("a", 1u32);
        assert_eq!(
            map.into_value(),
            Value::Mapping(vec![
                (Value::Atomic("a".to_string()), Value::Atomic("1".to_string())),
                (Value::Atomic("b".to_string()), Value::Atomic("2".to_string())),
            ])
        );
        assert_eq!(
            HashMap::<String, u32>::declared_type(),
            DeclaredType::Mapping
        );
    }

    #[test]
    fn test_chrono_canonical_forms() {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(date.into_value(), Value::Atomic("2024-01-15".to_string()));

        let time = chrono::NaiveTime::from_hms_opt(10, 30, 0).unwrap();
        assert_eq!(time.into_value(), Value::Atomic("10:30:00".to_string()));

        let stamp = date.and_hms_opt(10, 30, 0).unwrap();
        assert_eq!(
            stamp.into_value(),
            Value::Atomic("2024-01-15 10:30:00".to_string())
        );
        assert_eq!(
            chrono::NaiveDate::declared_type(),
            DeclaredType::Atomic(AtomicKind::Date)
        );
    }

    #[test]
    fn test_bigdecimal_preserves_scale() {
        let amount: bigdecimal::BigDecimal = "1000.50".parse().unwrap();
        assert_eq!(amount.into_value(), Value::Atomic("1000.50".to_string()));
        assert_eq!(
            bigdecimal::BigDecimal::declared_type(),
            DeclaredType::Atomic(AtomicKind::Decimal)
        );
    }

    #[test]
    fn test_uuid_hyphenated() {
        let id = uuid::Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert_eq!(
            id.into_value(),
            Value::Atomic("550e8400-e29b-41d4-a716-446655440000".to_string())
        );
    }

    #[test]
    fn test_currency_code() {
        let usd = CurrencyCode::new("USD");
        assert_eq!(usd.to_string(), "USD");
        assert_eq!(
            usd.into_value(),
            Value::Atomic("USD".to_string())
        );
        assert_eq!(
            CurrencyCode::declared_type(),
            DeclaredType::Atomic(AtomicKind::Currency)
        );
    }

    #[test]
    fn test_value_passthrough_is_opaque() {
        let hand_built = Value::Sequence(vec![Value::Missing]);
        assert_eq!(hand_built.clone().into_value(), hand_built);
        assert_eq!(Value::declared_type(), DeclaredType::Opaque);
    }

    #[test]
    fn test_atomic_display_macro_for_enums() {
        #[derive(Clone, Copy)]
        enum Grade {
            Junior,
            Senior,
        }

        impl fmt::Display for Grade {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(match self {
                    Grade::Junior => "JUNIOR",
                    Grade::Senior => "SENIOR",
                })
            }
        }

        atomic_display!(Enum => Grade);

        assert_eq!(
            Grade::Senior.into_value(),
            Value::Atomic("SENIOR".to_string())
        );
        assert_eq!(
            Grade::declared_type(),
            DeclaredType::Atomic(AtomicKind::Enum)
        );
        let _ = Grade::Junior;
    }
}
