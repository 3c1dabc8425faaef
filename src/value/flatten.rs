//! Flattening of resolved values into single-cell text.
//!
//! A cell holds one string, so collection-shaped values are reduced here:
//! sequences join their elements with the configured list delimiter, mappings
//! become one `key : value` line per entry, and absent elements surface as
//! the configured placeholder. A value that is absent as a whole flattens to
//! an empty string instead, so the placeholder never leaks into scalar cells.

use std::borrow::Cow;

use crate::config::Config;
use crate::value::Value;

/// Separator between flattened mapping entries.
const ENTRY_SEPARATOR: char = '\n';

/// Strategy for rendering a resolved value into final cell text.
///
/// The default implementation is [`Flattener`]; custom implementations can be
/// installed on a [`SheetMapper`](crate::SheetMapper) or
/// [`RowProjector`](crate::RowProjector) to post-process cell text, for
/// example to mask sensitive columns or to localize collection rendering.
pub trait ValueProcessor: Send + Sync {
    /// Render `value` into the text written to a cell.
    ///
    /// Truncation to the configured cell limits is applied by the caller
    /// afterwards, so implementations may return text of any length.
    fn process(&self, value: &Value, config: &Config) -> String;
}

/// Default [`ValueProcessor`] reducing nested values to delimited text.
///
/// # Examples
///
/// ```rust
/// use longan::{Config, Flattener, Value};
///
/// let config = Config::default();
/// let flattener = Flattener::default();
///
/// let tags = Value::Sequence(vec![
///     Value::atomic("primary"),
///     Value::Missing,
///     Value::atomic("archived"),
/// ]);
/// assert_eq!(
///     flattener.flatten(&tags, &config),
///     "primary, <empty>, archived"
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Flattener;

impl Flattener {
    /// Reduce `value` to the text a single cell carries.
    pub fn flatten(&self, value: &Value, config: &Config) -> String {
        match value {
            Value::Missing => String::new(),
            Value::Atomic(text) | Value::Opaque(text) => text.clone(),
            Value::Sequence(items) => self.flatten_sequence(items, config),
            Value::Mapping(entries) => self.flatten_mapping(entries, config),
        }
    }

    fn flatten_sequence(&self, items: &[Value], config: &Config) -> String {
        if items.is_empty() {
            return String::new();
        }
        let mut out = String::new();
        for (index, item) in items.iter().enumerate() {
            if index > 0 {
                out.push_str(&config.list_delimiter);
            }
            out.push_str(&self.element_text(item, config));
        }
        out
    }

    fn flatten_mapping(&self, entries: &[(Value, Value)], config: &Config) -> String {
        if entries.is_empty() {
            return String::new();
        }
        let mut out = String::new();
        for (index, (key, value)) in entries.iter().enumerate() {
            if index > 0 {
                out.push(ENTRY_SEPARATOR);
            }
            out.push_str(&self.element_text(key, config));
            out.push_str(&config.map_delimiter);
            out.push_str(&self.element_text(value, config));
        }
        out
    }

    /// Text of one collection element or mapping side.
    ///
    /// Absence becomes the placeholder here, not the empty string: inside a
    /// delimited cell an empty element would be indistinguishable from the
    /// delimiters around it.
    fn element_text<'a>(&self, value: &'a Value, config: &'a Config) -> Cow<'a, str> {
        match value {
            Value::Missing => Cow::Borrowed(config.placeholder.as_str()),
            Value::Atomic(text) | Value::Opaque(text) => Cow::Borrowed(text.as_str()),
            nested => Cow::Owned(self.generic_text(nested, config)),
        }
    }

    /// Bracketed fallback for collections nested inside a collection.
    ///
    /// Delimiters apply one level deep only; anything deeper keeps the
    /// conventional `[a, b]` / `{k=v}` form.
    fn generic_text(&self, value: &Value, config: &Config) -> String {
        match value {
            Value::Missing => config.placeholder.clone(),
            Value::Atomic(text) | Value::Opaque(text) => text.clone(),
            Value::Sequence(items) => {
                let mut out = String::from("[");
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(&self.generic_text(item, config));
                }
                out.push(']');
                out
            }
            Value::Mapping(entries) => {
                let mut out = String::from("{");
                for (index, (key, value)) in entries.iter().enumerate() {
                    if index > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(&self.generic_text(key, config));
                    out.push('=');
                    out.push_str(&self.generic_text(value, config));
                }
                out.push('}');
                out
            }
        }
    }
}

impl ValueProcessor for Flattener {
    fn process(&self, value: &Value, config: &Config) -> String {
        self.flatten(value, config)
    }
}
