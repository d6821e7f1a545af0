//! Range list facet core
//!
//! A range list facet turns an admin-configured list of numeric levels into
//! selectable ranges with row counts, and turns the user's selection back
//! into SQL. This crate holds everything that does not touch HTML:
//! - [`resolver`]: fill in blank level boundaries from neighbouring levels
//! - [`counter`]: count index rows inside each resolved range
//! - [`token`] / [`merger`]: parse selections and collapse multi-selects
//! - [`sql`]: predicate and query text for the host to execute
//! - [`settings`] / [`config`]: per-facet settings and process config
//! - [`context`]: cross-facet post-id scoping
//!
//! Nothing here performs I/O or executes SQL.

#![forbid(unsafe_code)]

pub mod config;
pub mod context;
pub mod counter;
pub mod error;
pub mod format;
pub mod merger;
pub mod model;
pub mod resolver;
pub mod settings;
pub mod sql;
pub mod token;

#[cfg(test)]
mod proptest_generators;

// Re-export key types for convenience
pub use config::RangeListConfig;
pub use context::SelectionContext;
pub use counter::{count, count_scoped, tally};
pub use error::{RangeListError, RangeListResult};
pub use format::{PlainFormatter, ValueFormatter, format_number, parse_number};
pub use merger::{MergeMode, merge, merge_intervals, parse_selection, selection_intervals};
pub use model::{BoundSide, FactRow, Interval, Level, ResolvedRange};
pub use resolver::{resolve, resolve_bound};
pub use settings::{FacetSettings, InputMode, Operator, RANGE_LIST_TYPE};
pub use sql::BoundStyle;
pub use token::{SelectionToken, parse_token};
