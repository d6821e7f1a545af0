//! Per-range row counting
//!
//! Counts are a plain filter over the rows the host fetched for this facet.
//! The open-bound semantics must match the resolver's output exactly: an open
//! `min` is −∞, an open `max` is +∞, and closed ends are inclusive.

use std::collections::HashSet;

use crate::model::{FactRow, ResolvedRange};

/// Number of rows with `min <= value <= max`, treating `None` as unbounded.
///
/// Duplicate rows each count; the result does not depend on row order.
#[must_use]
pub fn count(rows: &[FactRow], min: Option<f64>, max: Option<f64>) -> usize {
    rows.iter()
        .filter(|row| in_bounds(row.value, min, max))
        .count()
}

/// Like [`count`], restricted to rows whose post is in `scope` (when given).
#[must_use]
pub fn count_scoped(
    rows: &[FactRow],
    min: Option<f64>,
    max: Option<f64>,
    scope: Option<&HashSet<u64>>,
) -> usize {
    rows.iter()
        .filter(|row| scope.is_none_or(|ids| ids.contains(&row.post_id)))
        .filter(|row| in_bounds(row.value, min, max))
        .count()
}

/// Fill `count` on every range in place.
pub fn tally(ranges: &mut [ResolvedRange], rows: &[FactRow], scope: Option<&HashSet<u64>>) {
    for range in ranges.iter_mut() {
        range.count = count_scoped(rows, range.min, range.max, scope);
    }
    tracing::debug!(
        rows = rows.len(),
        ranges = ranges.len(),
        scoped = scope.is_some(),
        "tallied range counts"
    );
}

fn in_bounds(value: f64, min: Option<f64>, max: Option<f64>) -> bool {
    min.is_none_or(|min| value >= min) && max.is_none_or(|max| value <= max)
}
