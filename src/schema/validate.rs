//! Ordinal validation for extracted layouts.

use std::collections::HashSet;

use crate::common::error::SchemaError;
use crate::schema::descriptor::ColumnDescriptor;

/// Check that every ordinal is in `1..=max_column_order` and unique across
/// the layout.
///
/// Runs after auto-assignment, so an ordinal of `0` can only mean the caller
/// skipped assignment; it is rejected as out of range. All range checks run
/// before any duplicate check, each scanning in column order.
pub(crate) fn validate_ordinals(
    descriptors: &[ColumnDescriptor],
    max_column_order: u32,
) -> Result<(), SchemaError> {
    for descriptor in descriptors {
        let ordinal = descriptor.ordinal();
        if ordinal == 0 || ordinal > max_column_order {
            return Err(SchemaError::InvalidOrdinal {
                header: descriptor.header().to_string(),
                ordinal,
                max: max_column_order,
            });
        }
    }

    let mut seen = HashSet::with_capacity(descriptors.len());
    for descriptor in descriptors {
        if !seen.insert(descriptor.ordinal()) {
            return Err(SchemaError::DuplicateOrdinal {
                header: descriptor.header().to_string(),
                ordinal: descriptor.ordinal(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::descriptor::FieldPath;
    use crate::schema::types::{AtomicKind, DeclaredType};

    fn descriptor(header: &str, ordinal: u32) -> ColumnDescriptor {
        ColumnDescriptor::new(
            FieldPath::default(),
            header.to_string(),
            ordinal,
            DeclaredType::Atomic(AtomicKind::Text),
        )
    }

    #[test]
    fn test_valid_layouts_pass() {
        assert!(validate_ordinals(&[], 1_000).is_ok());
        let columns = [descriptor("A", 1), descriptor("B", 3), descriptor("C", 2)];
        assert!(validate_ordinals(&columns, 1_000).is_ok());
    }

    #[test]
    fn test_boundary_ordinal_is_accepted() {
        let columns = [descriptor("A", 1_000)];
        assert!(validate_ordinals(&columns, 1_000).is_ok());
    }

    #[test]
    fn test_out_of_range_ordinals_rejected() {
        let too_big = [descriptor("A", 1_001)];
        assert_eq!(
            validate_ordinals(&too_big, 1_000),
            Err(SchemaError::InvalidOrdinal {
                header: "A".to_string(),
                ordinal: 1_001,
                max: 1_000,
            })
        );

        let unassigned = [descriptor("A", 0)];
        assert!(matches!(
            validate_ordinals(&unassigned, 1_000),
            Err(SchemaError::InvalidOrdinal { ordinal: 0, .. })
        ));
    }

    #[test]
    fn test_duplicate_ordinals_rejected() {
        let columns = [descriptor("A", 2), descriptor("B", 2)];
        assert_eq!(
            validate_ordinals(&columns, 1_000),
            Err(SchemaError::DuplicateOrdinal {
                header: "B".to_string(),
                ordinal: 2,
            })
        );
    }

    #[test]
    fn test_range_errors_take_precedence_over_duplicates() {
        let columns = [descriptor("A", 5), descriptor("B", 5), descriptor("C", 2_000)];
        assert!(matches!(
            validate_ordinals(&columns, 1_000),
            Err(SchemaError::InvalidOrdinal { ordinal: 2_000, .. })
        ));
    }
}
