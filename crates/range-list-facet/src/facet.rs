//! Facet type interface
//!
//! The host drives every facet type through the same four calls: fetch and
//! count values, render them, turn a selection into a post filter, and
//! expose front-end settings. The host owns the database; facet types only
//! produce the SQL text and consume the rows it returns.

use range_list_core::{
    FacetSettings, FactRow, RangeListResult, ResolvedRange, SelectionContext, SelectionToken,
};
use range_list_render::SelectionChoice;
use serde::{Deserialize, Serialize};

/// Inputs for [`FacetType::load_values`].
#[derive(Debug, Clone, Copy)]
pub struct LoadParams<'a> {
    pub facet: &'a FacetSettings,
    /// Rows returned by [`FacetType::values_query`].
    pub rows: &'a [FactRow],
    /// When given, rows outside the facet's eligible posts are not counted.
    pub context: Option<&'a SelectionContext>,
}

/// Inputs for [`FacetType::render`] and [`FacetType::selection_choices`].
#[derive(Debug, Clone, Copy)]
pub struct RenderParams<'a> {
    pub facet: &'a FacetSettings,
    /// Output of [`FacetType::load_values`].
    pub values: &'a [ResolvedRange],
    pub selected_values: &'a [SelectionToken],
}

/// Inputs for [`FacetType::filter_posts`].
#[derive(Debug, Clone, Copy)]
pub struct FilterParams<'a> {
    pub facet: &'a FacetSettings,
    pub selected_values: &'a [SelectionToken],
}

/// A post filter for the host to execute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterQuery {
    /// Condition on `facet_value` alone.
    pub predicate: String,
    /// Complete statement returning matching `post_id`s.
    pub sql: String,
}

/// A facet type the host can register.
pub trait FacetType: Send + Sync {
    /// Registry key stored in facet settings under `type`.
    fn type_name(&self) -> &'static str;

    /// Human-readable name for admin screens.
    fn label(&self) -> &'static str;

    /// SQL fetching the `(facet_value, post_id)` rows this facet counts.
    fn values_query(&self, facet: &FacetSettings, context: Option<&SelectionContext>) -> String;

    /// Build the facet's choices from fetched rows.
    fn load_values(&self, params: &LoadParams<'_>) -> Vec<ResolvedRange>;

    /// Render the facet's HTML fragment.
    ///
    /// # Errors
    /// Returns `RangeListError::Render` if the template fails.
    fn render(&self, params: &RenderParams<'_>) -> RangeListResult<String>;

    /// Filter for the current selection. `None` means the facet does not
    /// restrict results.
    fn filter_posts(&self, params: &FilterParams<'_>) -> Option<FilterQuery>;

    /// Settings the front-end script needs.
    fn settings_js(&self, facet: &FacetSettings) -> serde_json::Value;

    /// Labels for the active-selections bar.
    fn selection_choices(&self, params: &RenderParams<'_>) -> Vec<SelectionChoice>;
}
