//! Header text derivation.
//!
//! Column headers come from the field declaration when one is given;
//! otherwise the field identifier is humanized: `-` and `_` become word
//! breaks, camel-case humps and letter/digit transitions split words, and
//! each word is title-cased. Columns contributed by a nested object prefix
//! their parent's header so the hierarchy stays readable in a flat header
//! row.

/// Separator between a parent header and a nested column's own header.
pub const HEADER_SEPARATOR: &str = " - ";

/// Turn a field identifier into a human-readable header.
///
/// # Examples
///
/// ```rust
/// use longan::schema::header::humanize;
///
/// assert_eq!(humanize("employee_id"), "Employee Id");
/// assert_eq!(humanize("fieldName"), "Field Name");
/// assert_eq!(humanize("field1With2Numbers"), "Field 1 With 2 Numbers");
/// ```
pub fn humanize(identifier: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev: Option<char> = None;

    for ch in identifier.chars() {
        if ch == '-' || ch == '_' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev = None;
            continue;
        }
        if let Some(last) = prev {
            // Word boundaries: camel humps and letter/digit transitions.
            let boundary = (last.is_lowercase() && ch.is_uppercase())
                || (last.is_ascii_digit() && ch.is_alphabetic())
                || (last.is_alphabetic() && ch.is_ascii_digit());
            if boundary && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(ch);
        prev = Some(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }

    let mut out = String::with_capacity(identifier.len() + words.len());
    for (index, word) in words.iter().enumerate() {
        if index > 0 {
            out.push(' ');
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            for rest in chars {
                out.extend(rest.to_lowercase());
            }
        }
    }
    out
}

/// Compose the final header for one column.
///
/// An explicit non-empty header wins over the humanized identifier; a parent
/// header, when present, is prefixed with [`HEADER_SEPARATOR`]. An empty
/// identifier yields an empty header.
///
/// # Examples
///
/// ```rust
/// use longan::schema::header::compose;
///
/// assert_eq!(compose(None, None, "unitPrice"), "Unit Price");
/// assert_eq!(compose(Some("Price"), None, "unitPrice"), "Price");
/// assert_eq!(compose(None, Some("Office"), "street"), "Office - Street");
/// ```
pub fn compose(explicit: Option<&str>, parent: Option<&str>, identifier: &str) -> String {
    if identifier.is_empty() {
        return String::new();
    }
    let base = match explicit {
        Some(header) if !header.is_empty() => header.to_string(),
        _ => humanize(identifier),
    };
    match parent {
        Some(prefix) if !prefix.is_empty() => {
            let mut out =
                String::with_capacity(prefix.len() + HEADER_SEPARATOR.len() + base.len());
            out.push_str(prefix);
            out.push_str(HEADER_SEPARATOR);
            out.push_str(&base);
            out
        }
        _ => base,
    }
}
