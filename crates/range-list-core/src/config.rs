//! Process-level configuration
//!
//! Per-facet behaviour lives in [`FacetSettings`](crate::FacetSettings).
//! This covers the few knobs shared by every facet in a process, read from
//! the environment with fall-backs to defaults.

use serde::{Deserialize, Serialize};

use crate::merger::MergeMode;
use crate::sql::BoundStyle;

// ── Env var names ─────────────────────────────────────────────────────────

/// Env var naming the index table the SQL targets.
pub const INDEX_TABLE_ENV: &str = "RANGE_LIST_INDEX_TABLE";

/// Env var selecting `inclusive` or `exclusive` bound comparisons.
pub const BOUND_STYLE_ENV: &str = "RANGE_LIST_BOUND_STYLE";

/// Env var toggling merging of multi-select selections.
pub const REDUCE_QUERIES_ENV: &str = "RANGE_LIST_REDUCE_QUERIES";

// ── Defaults ──────────────────────────────────────────────────────────────

/// Default index table: the host's table prefix plus `facetwp_index`.
pub const DEFAULT_INDEX_TABLE: &str = "wp_facetwp_index";

/// Shared configuration for every range list facet in the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeListConfig {
    pub index_table: String,
    pub bound_style: BoundStyle,
    pub merge_mode: MergeMode,
}

impl Default for RangeListConfig {
    fn default() -> Self {
        Self {
            index_table: DEFAULT_INDEX_TABLE.to_string(),
            bound_style: BoundStyle::default(),
            merge_mode: MergeMode::default(),
        }
    }
}

impl RangeListConfig {
    /// Load from environment variables, falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` in place of the process environment.
    ///
    /// Unparseable values are logged and replaced by the default.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let index_table = lookup(INDEX_TABLE_ENV)
            .map(|table| table.trim().to_string())
            .filter(|table| is_table_name(table))
            .unwrap_or_else(|| DEFAULT_INDEX_TABLE.to_string());

        let bound_style = parse_or_default(&lookup, BOUND_STYLE_ENV, BoundStyle::parse);
        let merge_mode = parse_or_default(&lookup, REDUCE_QUERIES_ENV, MergeMode::parse);

        Self {
            index_table,
            bound_style,
            merge_mode,
        }
    }

    #[must_use]
    pub fn with_index_table(mut self, table: impl Into<String>) -> Self {
        self.index_table = table.into();
        self
    }

    #[must_use]
    pub const fn with_bound_style(mut self, bound_style: BoundStyle) -> Self {
        self.bound_style = bound_style;
        self
    }

    #[must_use]
    pub const fn with_merge_mode(mut self, merge_mode: MergeMode) -> Self {
        self.merge_mode = merge_mode;
        self
    }
}

fn parse_or_default<F, T>(lookup: &F, key: &str, parse: fn(&str) -> Option<T>) -> T
where
    F: Fn(&str) -> Option<String>,
    T: Default,
{
    let Some(raw) = lookup(key) else {
        return T::default();
    };
    parse(&raw).unwrap_or_else(|| {
        tracing::warn!(env = key, value = %raw, "ignoring unrecognised value");
        T::default()
    })
}

/// Table names are interpolated into SQL, so only identifier characters pass.
#[must_use]
pub fn is_table_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn config_defaults() {
        let config = RangeListConfig::default();
        assert_eq!(config.index_table, "wp_facetwp_index");
        assert_eq!(config.bound_style, BoundStyle::Inclusive);
        assert_eq!(config.merge_mode, MergeMode::Reduce);
    }

    #[test]
    fn empty_environment_uses_defaults() {
        assert_eq!(
            RangeListConfig::from_lookup(lookup(&[])),
            RangeListConfig::default()
        );
    }

    #[test]
    fn reads_every_variable() {
        let config = RangeListConfig::from_lookup(lookup(&[
            (INDEX_TABLE_ENV, "shop_facetwp_index"),
            (BOUND_STYLE_ENV, "exclusive"),
            (REDUCE_QUERIES_ENV, "0"),
        ]));
        assert_eq!(config.index_table, "shop_facetwp_index");
        assert_eq!(config.bound_style, BoundStyle::Exclusive);
        assert_eq!(config.merge_mode, MergeMode::Passthrough);
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = RangeListConfig::from_lookup(lookup(&[
            (INDEX_TABLE_ENV, "idx; DROP TABLE users"),
            (BOUND_STYLE_ENV, "sideways"),
            (REDUCE_QUERIES_ENV, "maybe"),
        ]));
        assert_eq!(config, RangeListConfig::default());
    }

    #[test]
    fn table_names_are_identifiers() {
        assert!(is_table_name("wp_facetwp_index"));
        assert!(is_table_name("shop.facet_index"));
        assert!(!is_table_name(""));
        assert!(!is_table_name("idx f; --"));
    }

    #[test]
    fn from_env_is_usable() {
        let config = RangeListConfig::from_env();
        assert!(!config.index_table.is_empty());
    }

    #[test]
    fn builders_override() {
        let config = RangeListConfig::default()
            .with_index_table("idx")
            .with_bound_style(BoundStyle::Exclusive)
            .with_merge_mode(MergeMode::Passthrough);
        assert_eq!(config.index_table, "idx");
        assert_eq!(config.bound_style, BoundStyle::Exclusive);
        assert_eq!(config.merge_mode, MergeMode::Passthrough);
    }

    #[test]
    fn env_var_names() {
        assert_eq!(INDEX_TABLE_ENV, "RANGE_LIST_INDEX_TABLE");
        assert_eq!(BOUND_STYLE_ENV, "RANGE_LIST_BOUND_STYLE");
        assert_eq!(REDUCE_QUERIES_ENV, "RANGE_LIST_REDUCE_QUERIES");
    }
}
