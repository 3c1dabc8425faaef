//! Mapping configuration.
//!
//! This module defines the tunable knobs shared by schema extraction and row
//! projection: delimiters for flattened collections, the placeholder written
//! for absent values, cell length limits and the column ordinal range.

use serde::{Deserialize, Serialize};

/// Row index reserved for the header row.
pub const HEADER_ROW: u32 = 0;

/// Row index at which data rows start.
pub const DATA_START_ROW: u32 = 1;

/// Largest column ordinal a schema may declare.
pub const DEFAULT_MAX_COLUMN_ORDER: u32 = 1_000;

/// Delimiter placed between flattened sequence elements.
pub const DEFAULT_LIST_DELIMITER: &str = ", ";

/// Delimiter placed between a flattened mapping key and its value.
pub const DEFAULT_MAP_DELIMITER: &str = " : ";

/// Placeholder written where a collection element or mapping side is absent.
pub const DEFAULT_PLACEHOLDER: &str = "<empty>";

/// Longest text a single cell may carry before truncation applies.
pub const DEFAULT_MAX_CELL_LEN: usize = 32_767;

/// Length, in characters, that over-long cell text is cut down to.
pub const DEFAULT_TRUNCATE_LEN: usize = 32_760;

/// Sheet name used when a schema does not declare one.
pub const DEFAULT_SHEET_NAME: &str = "Sheet";

/// Configuration options for schema extraction and row projection.
///
/// All values default to the conventional spreadsheet limits, so most callers
/// only ever touch the delimiters. Delimiters and the placeholder affect how
/// collection-typed values are flattened into a single cell; the cell length
/// pair bounds the text written per cell; `max_column_order` bounds the
/// ordinals a schema may declare.
///
/// # Examples
///
/// ```rust
/// use longan::Config;
///
/// // Create with defaults
/// let config = Config::default();
///
/// // Or customize
/// let config = Config::new()
///     .with_list_delimiter("; ")
///     .with_placeholder("-");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Row index reserved for the header row.
    pub header_row: u32,
    /// Row index at which data rows start.
    pub data_start_row: u32,
    /// Largest column ordinal a schema may declare (inclusive).
    pub max_column_order: u32,
    /// Delimiter placed between flattened sequence elements.
    pub list_delimiter: String,
    /// Delimiter placed between a flattened mapping key and its value.
    pub map_delimiter: String,
    /// Placeholder written where a collection element or mapping side is absent.
    pub placeholder: String,
    /// Longest text a single cell may carry before truncation applies.
    pub max_cell_len: usize,
    /// Length, in characters, that over-long cell text is cut down to.
    pub truncate_len: usize,
    /// Sheet name used when a schema does not declare one.
    pub default_sheet_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            header_row: HEADER_ROW,
            data_start_row: DATA_START_ROW,
            max_column_order: DEFAULT_MAX_COLUMN_ORDER,
            list_delimiter: DEFAULT_LIST_DELIMITER.to_string(),
            map_delimiter: DEFAULT_MAP_DELIMITER.to_string(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            max_cell_len: DEFAULT_MAX_CELL_LEN,
            truncate_len: DEFAULT_TRUNCATE_LEN,
            default_sheet_name: DEFAULT_SHEET_NAME.to_string(),
        }
    }
}

impl Config {
    /// Create a new `Config` with default values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use longan::Config;
    ///
    /// let config = Config::new();
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the delimiter placed between flattened sequence elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use longan::Config;
    ///
    /// let config = Config::new().with_list_delimiter("; ");
    /// ```
    #[inline]
    pub fn with_list_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.list_delimiter = delimiter.into();
        self
    }

    /// Set the delimiter placed between a flattened mapping key and its value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use longan::Config;
    ///
    /// let config = Config::new().with_map_delimiter(": ");
    /// ```
    #[inline]
    pub fn with_map_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.map_delimiter = delimiter.into();
        self
    }

    /// Set the placeholder written where a collection element or mapping side
    /// is absent.
    ///
    /// The placeholder only ever appears inside flattened collections; an
    /// absent value resolved for a whole cell yields an empty cell instead.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use longan::Config;
    ///
    /// let config = Config::new().with_placeholder("n/a");
    /// ```
    #[inline]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set the largest column ordinal a schema may declare.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use longan::Config;
    ///
    /// let config = Config::new().with_max_column_order(64);
    /// ```
    #[inline]
    pub fn with_max_column_order(mut self, max: u32) -> Self {
        self.max_column_order = max;
        self
    }

    /// Set the cell length bounds.
    ///
    /// Text longer than `max_cell_len` characters is cut down to
    /// `truncate_len` characters. `truncate_len` must not exceed
    /// `max_cell_len`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use longan::Config;
    ///
    /// let config = Config::new().with_cell_limits(120, 117);
    /// ```
    #[inline]
    pub fn with_cell_limits(mut self, max_cell_len: usize, truncate_len: usize) -> Self {
        debug_assert!(truncate_len <= max_cell_len);
        self.max_cell_len = max_cell_len;
        self.truncate_len = truncate_len;
        self
    }

    /// Set the sheet name used when a schema does not declare one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use longan::Config;
    ///
    /// let config = Config::new().with_default_sheet_name("Export");
    /// ```
    #[inline]
    pub fn with_default_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.default_sheet_name = name.into();
        self
    }
}
