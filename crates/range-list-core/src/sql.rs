//! SQL fragment builder
//!
//! The host owns the connection and runs the statements; this module only
//! produces text. Every value interpolated here is either a parsed `f64`
//! (printed via [`format_number`]) or a facet name quoted as a string
//! literal, so selection tokens never reach the SQL verbatim.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::format::format_number;
use crate::model::Interval;

/// Column holding the numeric facet value in the index table.
pub const VALUE_COLUMN: &str = "facet_value";

/// Comparison operators used for interval bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundStyle {
    /// `>=` / `<=`; matches how counts are computed.
    #[default]
    Inclusive,
    /// `>` / `<`; the behaviour of the earliest releases.
    Exclusive,
}

impl BoundStyle {
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "inclusive" | "closed" => Some(Self::Inclusive),
            "exclusive" | "strict" => Some(Self::Exclusive),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inclusive => "inclusive",
            Self::Exclusive => "exclusive",
        }
    }

    const fn lower_op(self) -> &'static str {
        match self {
            Self::Inclusive => ">=",
            Self::Exclusive => ">",
        }
    }

    const fn upper_op(self) -> &'static str {
        match self {
            Self::Inclusive => "<=",
            Self::Exclusive => "<",
        }
    }
}

/// Quote `value` as a single-quoted SQL string literal.
#[must_use]
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// `facet_value >= X[ AND facet_value <= Y]` for one interval.
#[must_use]
pub fn interval_predicate(interval: &Interval, style: BoundStyle) -> String {
    let mut sql = format!(
        "{VALUE_COLUMN} {} {}",
        style.lower_op(),
        format_number(interval.from)
    );
    if let Some(to) = interval.to {
        let _ = write!(
            sql,
            " AND {VALUE_COLUMN} {} {}",
            style.upper_op(),
            format_number(to)
        );
    }
    sql
}

/// Predicate for a single-select facet. `None` when nothing is selected.
#[must_use]
pub fn radio_predicate(interval: Option<&Interval>, style: BoundStyle) -> Option<String> {
    interval.map(|interval| interval_predicate(interval, style))
}

/// `(branch) OR (branch) ...` for a multi-select facet.
///
/// `None` for an empty interval list, so callers never emit `()`.
#[must_use]
pub fn checkbox_predicate(intervals: &[Interval], style: BoundStyle) -> Option<String> {
    if intervals.is_empty() {
        return None;
    }
    let branches: Vec<String> = intervals
        .iter()
        .map(|interval| format!("({})", interval_predicate(interval, style)))
        .collect();
    Some(branches.join(" OR "))
}

/// Query fetching every `(facet_value, post_id)` row of one facet.
///
/// `extra_where` is appended verbatim and is expected to start with
/// `" AND "` (see [`post_id_in_clause`]).
#[must_use]
pub fn value_rows_query(table: &str, facet_name: &str, extra_where: &str) -> String {
    format!(
        "SELECT f.{VALUE_COLUMN}, f.post_id FROM {table} f WHERE f.facet_name = {}{extra_where}",
        quote_literal(facet_name)
    )
}

/// Query selecting the posts of one facet whose value matches `predicate`.
///
/// The predicate is parenthesised so top-level `OR` branches stay inside the
/// facet-name restriction.
#[must_use]
pub fn filter_query(table: &str, facet_name: &str, predicate: &str) -> String {
    format!(
        "SELECT DISTINCT post_id FROM {table} WHERE facet_name = {} AND ({predicate})",
        quote_literal(facet_name)
    )
}

/// ` AND post_id IN (...)`, using `(0)` for an empty set.
#[must_use]
pub fn post_id_in_clause(post_ids: &BTreeSet<u64>) -> String {
    if post_ids.is_empty() {
        return " AND post_id IN (0)".to_string();
    }
    let ids: Vec<String> = post_ids.iter().map(u64::to_string).collect();
    format!(" AND post_id IN ({})", ids.join(","))
}
