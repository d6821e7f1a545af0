//! Multi-select range merging
//!
//! A checkbox facet lets users tick several ranges at once. Emitting one OR
//! branch per tick works, but ticks are frequently adjacent (`0-50`, `50-100`)
//! or redundant (`100+`, `200+`), so the selection is first collapsed into
//! the smallest set of disjoint intervals.
//!
//! The algorithm:
//! 1. Parse every token; tokens without a numeric lower bound are dropped.
//! 2. Stable-sort by `from`. Equal `from` values keep their input order; no
//!    secondary key exists.
//! 3. Walk the sorted intervals keeping one accumulating `current`:
//!    - an open `current` absorbs every later interval (it never ends);
//!    - **chain**: `current.to == next.from`, or `next` is open and starts at
//!      or below `current.to` → `{current.from, next.to}`;
//!    - **overlap**: both closed and `current.to > next.from` →
//!      `{min(from), max(to)}`;
//!    - otherwise `current` is finished and `next` becomes `current`.
//! 4. Emit the last `current`.
//!
//! ```text
//! 0-50, 50-100          -> 0-100
//! 0-20, 20-50, 50-80    -> 0-80
//! 100+, 200+            -> 100+
//! 0-60, 50              -> 0+
//! 0-80, 50-70           -> 0-80
//! 0-10, 20-30           -> 0-10, 20-30
//! ```

use serde::{Deserialize, Serialize};

use crate::model::Interval;
use crate::token::parse_token;

/// Whether a multi-select selection is collapsed before building SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeMode {
    /// Collapse into disjoint intervals (default).
    #[default]
    Reduce,
    /// One interval per parseable token, in input order.
    Passthrough,
}

impl MergeMode {
    /// Parse a mode name, accepting boolean spellings for `reduce`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "reduce" | "merge" | "1" | "true" | "yes" | "on" => Some(Self::Reduce),
            "passthrough" | "none" | "0" | "false" | "no" | "off" => Some(Self::Passthrough),
            _ => None,
        }
    }
}

/// Parse tokens into intervals, dropping (and logging) unparseable ones.
pub fn parse_selection<I, S>(tokens: I) -> Vec<Interval>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .filter_map(|token| match parse_token(token.as_ref()) {
            Ok(interval) => Some(interval),
            Err(err) => {
                tracing::warn!(token = token.as_ref(), error = %err, "skipping selection token");
                None
            }
        })
        .collect()
}

/// Parse and merge a checkbox selection into disjoint intervals.
pub fn merge<I, S>(tokens: I) -> Vec<Interval>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    merge_intervals(parse_selection(tokens))
}

/// Parse a checkbox selection, merging only when `mode` asks for it.
pub fn selection_intervals<I, S>(tokens: I, mode: MergeMode) -> Vec<Interval>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    match mode {
        MergeMode::Reduce => merge(tokens),
        MergeMode::Passthrough => parse_selection(tokens),
    }
}

/// Merge already-parsed intervals. Output is sorted by `from` and disjoint.
#[must_use]
pub fn merge_intervals(mut intervals: Vec<Interval>) -> Vec<Interval> {
    let input_len = intervals.len();
    // `sort_by` is stable: equal `from` values keep their input order.
    intervals.sort_by(|a, b| a.from.total_cmp(&b.from));

    let mut iter = intervals.into_iter();
    let Some(mut current) = iter.next() else {
        return Vec::new();
    };

    let mut merged = Vec::with_capacity(input_len);
    for next in iter {
        if let Some(joined) = join(current, next) {
            current = joined;
        } else {
            merged.push(current);
            current = next;
        }
    }
    merged.push(current);

    tracing::debug!(
        input = input_len,
        output = merged.len(),
        "merged range selection"
    );
    merged
}

/// Join `next` onto `current` if they touch or overlap. Requires
/// `current.from <= next.from`.
#[allow(clippy::float_cmp)]
fn join(current: Interval, next: Interval) -> Option<Interval> {
    match (current.to, next.to) {
        // Open intervals never terminate.
        (None, _) => Some(current),
        // Chain into an open interval: 0-60, 50 -> 0+ ; 0-50, 50+ -> 0+
        (Some(current_to), None) if current_to >= next.from => Some(Interval::open(current.from)),
        // Chain on an exact boundary touch: 0-50, 50-100 -> 0-100
        (Some(current_to), Some(next_to)) if current_to == next.from => {
            Some(Interval::closed(current.from, next_to.max(current_to)))
        }
        // Overlap: 0-80, 50-100 -> 0-100 ; 0-80, 50-70 -> 0-80
        (Some(current_to), Some(next_to)) if current_to > next.from => Some(Interval::closed(
            current.from.min(next.from),
            current_to.max(next_to),
        )),
        _ => None,
    }
}
