use std::cmp::Ordering;

use shared_types::{Row, SortDirection, SortKey};

/// Order `indices` (positions into `rows`) by `key`.
///
/// The sort is stable in both directions: descending reverses the cell
/// comparison rather than the result, so equal cells keep backing order.
pub(crate) fn sort_indices(rows: &[Row], indices: &mut [usize], key: SortKey) {
    indices.sort_by(|&a, &b| {
        let ordering = match (rows[a].get(key.column), rows[b].get(key.column)) {
            (Some(x), Some(y)) => x.compare(y),
            _ => Ordering::Equal,
        };
        match key.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}
