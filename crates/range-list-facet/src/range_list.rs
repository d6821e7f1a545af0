//! The `range_list` facet type.

use std::fmt;
use std::sync::Arc;

use range_list_core::sql::{checkbox_predicate, filter_query, radio_predicate, value_rows_query};
use range_list_core::{
    FacetSettings, InputMode, PlainFormatter, RANGE_LIST_TYPE, RangeListConfig, RangeListResult,
    ResolvedRange, SelectionContext, ValueFormatter, parse_token, resolve, selection_intervals,
    tally,
};
use range_list_render::{SelectionChoice, render_ranges, selection_choices};
use serde_json::json;

use crate::facet::{FacetType, FilterParams, FilterQuery, LoadParams, RenderParams};

/// Numeric range list: admin-defined levels shown as radio or checkbox
/// choices with per-range counts.
#[derive(Clone)]
pub struct RangeListFacet {
    config: RangeListConfig,
    formatter: Arc<dyn ValueFormatter>,
}

impl fmt::Debug for RangeListFacet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeListFacet")
            .field("config", &self.config)
            .field("formatter", &"dyn ValueFormatter")
            .finish()
    }
}

impl Default for RangeListFacet {
    fn default() -> Self {
        Self::new(RangeListConfig::default())
    }
}

impl RangeListFacet {
    #[must_use]
    pub fn new(config: RangeListConfig) -> Self {
        Self {
            config,
            formatter: Arc::new(PlainFormatter),
        }
    }

    /// Configured from `RANGE_LIST_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(RangeListConfig::from_env())
    }

    /// Use `formatter` for auto-generated labels.
    #[must_use]
    pub fn with_formatter(mut self, formatter: Arc<dyn ValueFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &RangeListConfig {
        &self.config
    }

    /// The single-select predicate: only the most recent token counts.
    fn radio_filter(&self, params: &FilterParams<'_>) -> Option<String> {
        let token = params.selected_values.last()?;
        let interval = match parse_token(token.as_str()) {
            Ok(interval) => interval,
            Err(err) => {
                tracing::warn!(
                    facet = %params.facet.name,
                    token = %token,
                    error = %err,
                    "ignoring radio selection"
                );
                return None;
            }
        };
        radio_predicate(Some(&interval), self.config.bound_style)
    }

    fn checkbox_filter(&self, params: &FilterParams<'_>) -> Option<String> {
        let intervals = selection_intervals(params.selected_values, self.config.merge_mode);
        checkbox_predicate(&intervals, self.config.bound_style)
    }
}

impl FacetType for RangeListFacet {
    fn type_name(&self) -> &'static str {
        RANGE_LIST_TYPE
    }

    fn label(&self) -> &'static str {
        "Range List"
    }

    fn values_query(&self, facet: &FacetSettings, context: Option<&SelectionContext>) -> String {
        let extra = context.map_or_else(String::new, |ctx| ctx.where_clause(&facet.name));
        value_rows_query(&self.config.index_table, &facet.name, &extra)
    }

    fn load_values(&self, params: &LoadParams<'_>) -> Vec<ResolvedRange> {
        let mut ranges = resolve(&params.facet.levels);
        let scope = params.context.map(|ctx| ctx.scope(&params.facet.name));
        tally(&mut ranges, params.rows, scope.as_ref());
        tracing::debug!(
            facet = %params.facet.name,
            ranges = ranges.len(),
            rows = params.rows.len(),
            "loaded range list values"
        );
        ranges
    }

    fn render(&self, params: &RenderParams<'_>) -> RangeListResult<String> {
        let html = render_ranges(
            params.values,
            params.facet.input_type,
            params.selected_values,
            self.formatter.as_ref(),
        )?;
        Ok(html)
    }

    fn filter_posts(&self, params: &FilterParams<'_>) -> Option<FilterQuery> {
        let predicate = match params.facet.input_type {
            InputMode::Radio => self.radio_filter(params),
            InputMode::Checkbox => self.checkbox_filter(params),
        }?;
        let sql = filter_query(&self.config.index_table, &params.facet.name, &predicate);
        tracing::debug!(
            facet = %params.facet.name,
            input_type = %params.facet.input_type,
            selected = params.selected_values.len(),
            "built range list filter"
        );
        Some(FilterQuery { predicate, sql })
    }

    fn settings_js(&self, facet: &FacetSettings) -> serde_json::Value {
        json!({ "input_type": facet.input_type.as_str() })
    }

    fn selection_choices(&self, params: &RenderParams<'_>) -> Vec<SelectionChoice> {
        selection_choices(
            params.values,
            params.selected_values,
            self.formatter.as_ref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use range_list_core::{
        BoundStyle, FactRow, Level, MergeMode, SelectionToken, format_number,
    };

    fn settings(mode: InputMode) -> FacetSettings {
        FacetSettings::new("price")
            .with_input_type(mode)
            .with_levels(vec![
                Level::new(None, Some(50.0)),
                Level::new(Some(50.0), Some(100.0)),
                Level::new(Some(100.0), None),
            ])
    }

    fn tokens(raw: &[&str]) -> Vec<SelectionToken> {
        raw.iter().copied().map(SelectionToken::from).collect()
    }

    fn filter(facet: &RangeListFacet, mode: InputMode, raw: &[&str]) -> Option<FilterQuery> {
        let settings = settings(mode);
        let selected = tokens(raw);
        facet.filter_posts(&FilterParams {
            facet: &settings,
            selected_values: &selected,
        })
    }

    #[test]
    fn identifies_as_range_list() {
        let facet = RangeListFacet::default();
        assert_eq!(facet.type_name(), "range_list");
        assert_eq!(facet.label(), "Range List");
    }

    #[test]
    fn values_query_without_context() {
        let facet = RangeListFacet::default();
        assert_eq!(
            facet.values_query(&settings(InputMode::Radio), None),
            "SELECT f.facet_value, f.post_id FROM wp_facetwp_index f WHERE f.facet_name = 'price'"
        );
    }

    #[test]
    fn values_query_scopes_to_eligible_posts() {
        let facet = RangeListFacet::default();
        let ctx = SelectionContext::new([1, 2, 3]).with_matches("color", [2, 3, 4]);
        assert!(
            facet
                .values_query(&settings(InputMode::Radio), Some(&ctx))
                .ends_with(" AND post_id IN (2,3)")
        );
    }

    #[test]
    fn load_values_resolves_and_counts() {
        let facet = RangeListFacet::default();
        let settings = settings(InputMode::Radio);
        let rows = vec![
            FactRow::new(10.0, 1),
            FactRow::new(75.0, 2),
            FactRow::new(500.0, 3),
        ];
        let ranges = facet.load_values(&LoadParams {
            facet: &settings,
            rows: &rows,
            context: None,
        });
        let counts: Vec<usize> = ranges.iter().map(|r| r.count).collect();
        assert_eq!(counts, vec![1, 1, 1]);
    }

    #[test]
    fn load_values_honours_context_scope() {
        let facet = RangeListFacet::default();
        let settings = settings(InputMode::Radio);
        let rows = vec![FactRow::new(10.0, 1), FactRow::new(20.0, 2)];
        let ctx = SelectionContext::new([1, 2]).with_matches("color", [2]);
        let ranges = facet.load_values(&LoadParams {
            facet: &settings,
            rows: &rows,
            context: Some(&ctx),
        });
        assert_eq!(ranges[0].count, 1);
    }

    #[test]
    fn radio_filter_uses_last_token() {
        let facet = RangeListFacet::default();
        let query = filter(&facet, InputMode::Radio, &["0-50", "10-20"]).unwrap();
        assert_eq!(query.predicate, "facet_value >= 10 AND facet_value <= 20");
        assert_eq!(
            query.sql,
            "SELECT DISTINCT post_id FROM wp_facetwp_index WHERE facet_name = 'price' \
             AND (facet_value >= 10 AND facet_value <= 20)"
        );
    }

    #[test]
    fn radio_filter_with_invalid_token_is_none() {
        let facet = RangeListFacet::default();
        assert!(filter(&facet, InputMode::Radio, &["cheap"]).is_none());
    }

    #[test]
    fn checkbox_filter_merges() {
        let facet = RangeListFacet::default();
        let query = filter(&facet, InputMode::Checkbox, &["0-50", "50-100"]).unwrap();
        assert_eq!(query.predicate, "(facet_value >= 0 AND facet_value <= 100)");
    }

    #[test]
    fn checkbox_passthrough_keeps_every_branch() {
        let facet = RangeListFacet::new(
            RangeListConfig::default().with_merge_mode(MergeMode::Passthrough),
        );
        let query = filter(&facet, InputMode::Checkbox, &["0-50", "50-100"]).unwrap();
        assert_eq!(
            query.predicate,
            "(facet_value >= 0 AND facet_value <= 50) OR (facet_value >= 50 AND facet_value <= 100)"
        );
    }

    #[test]
    fn exclusive_bounds_and_custom_table() {
        let facet = RangeListFacet::new(
            RangeListConfig::default()
                .with_bound_style(BoundStyle::Exclusive)
                .with_index_table("shop_index"),
        );
        let query = filter(&facet, InputMode::Radio, &["100+"]).unwrap();
        assert_eq!(query.predicate, "facet_value > 100");
        assert!(query.sql.starts_with("SELECT DISTINCT post_id FROM shop_index "));
    }

    #[test]
    fn empty_selection_does_not_filter() {
        let facet = RangeListFacet::default();
        assert!(filter(&facet, InputMode::Radio, &[]).is_none());
        assert!(filter(&facet, InputMode::Checkbox, &[]).is_none());
        assert!(filter(&facet, InputMode::Checkbox, &["x", ""]).is_none());
    }

    #[test]
    fn settings_js_exposes_input_type() {
        let facet = RangeListFacet::default();
        assert_eq!(
            facet.settings_js(&settings(InputMode::Checkbox)),
            json!({"input_type": "checkbox"})
        );
    }

    #[test]
    fn formatter_drives_labels() {
        let facet = RangeListFacet::default()
            .with_formatter(Arc::new(|value: f64| format!("{} EUR", format_number(value))));
        let settings = settings(InputMode::Radio);
        let values = facet.load_values(&LoadParams {
            facet: &settings,
            rows: &[],
            context: None,
        });
        let selected = tokens(&["100+"]);
        let choices = facet.selection_choices(&RenderParams {
            facet: &settings,
            values: &values,
            selected_values: &selected,
        });
        assert_eq!(choices[0].label, "100 EUR and up");
    }

    #[test]
    fn render_marks_selection() {
        let facet = RangeListFacet::default();
        let settings = settings(InputMode::Radio);
        let values = facet.load_values(&LoadParams {
            facet: &settings,
            rows: &[FactRow::new(60.0, 1)],
            context: None,
        });
        let selected = tokens(&["50-100"]);
        let html = facet
            .render(&RenderParams {
                facet: &settings,
                values: &values,
                selected_values: &selected,
            })
            .unwrap();
        assert!(html.contains(r#"facetwp-radio checked" data-value="50-100""#));
        assert!(html.contains(r#"facetwp-radio disabled" data-value="0-50""#));
    }
}
