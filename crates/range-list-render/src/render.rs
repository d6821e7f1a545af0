//! Facet markup and selection labels
//!
//! Each resolved range becomes one choice. The choice's `value` is the
//! range's selection token; the front end sends it back verbatim when the
//! user clicks, so it must stay in sync with [`range_list_core::parse_token`].

use range_list_core::{InputMode, ResolvedRange, ValueFormatter};
use serde::{Deserialize, Serialize};

use crate::error::RenderResult;
use crate::templates::{RANGE_LIST_TEMPLATE, render_template};

/// One rendered range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeChoice {
    /// Selection token, or empty for the unbounded "All" range.
    pub value: String,
    pub label: String,
    pub count: usize,
    pub checked: bool,
    pub disabled: bool,
}

/// An entry in the host's "active selections" bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionChoice {
    pub value: String,
    pub label: String,
}

#[derive(Serialize)]
struct RangeListView<'a> {
    input_type: &'static str,
    choices: &'a [RangeChoice],
}

/// Whether `token` is checked under `mode`.
///
/// Radio facets check only the most recent selection; checkbox facets check
/// every selected token.
fn is_checked<S: AsRef<str>>(token: Option<&str>, mode: InputMode, selected: &[S]) -> bool {
    let Some(token) = token else {
        return false;
    };
    match mode {
        InputMode::Radio => selected.last().is_some_and(|last| last.as_ref() == token),
        InputMode::Checkbox => selected.iter().any(|value| value.as_ref() == token),
    }
}

/// Build the view model for every range, in order.
#[must_use]
pub fn build_choices<S: AsRef<str>>(
    ranges: &[ResolvedRange],
    mode: InputMode,
    selected: &[S],
    formatter: &dyn ValueFormatter,
) -> Vec<RangeChoice> {
    ranges
        .iter()
        .map(|range| {
            let token = range.token();
            let checked = is_checked(token.as_deref(), mode, selected);
            RangeChoice {
                value: token.unwrap_or_default(),
                label: range.display_label(formatter),
                count: range.count,
                checked,
                disabled: range.count == 0 && !checked,
            }
        })
        .collect()
}

/// Render prepared choices to HTML.
pub fn render_choices(choices: &[RangeChoice], mode: InputMode) -> RenderResult<String> {
    let html = render_template(
        RANGE_LIST_TEMPLATE,
        RangeListView {
            input_type: mode.as_str(),
            choices,
        },
    )?;
    Ok(html)
}

/// Render resolved, counted ranges to the facet's HTML fragment.
pub fn render_ranges<S: AsRef<str>>(
    ranges: &[ResolvedRange],
    mode: InputMode,
    selected: &[S],
    formatter: &dyn ValueFormatter,
) -> RenderResult<String> {
    let choices = build_choices(ranges, mode, selected, formatter);
    tracing::debug!(
        choices = choices.len(),
        checked = choices.iter().filter(|c| c.checked).count(),
        input_type = %mode,
        "rendering range list"
    );
    render_choices(&choices, mode)
}

/// Labels for the currently selected tokens, without counters.
///
/// A token that matches no range (stale URL, edited settings) is labelled
/// with the token itself.
#[must_use]
pub fn selection_choices<S: AsRef<str>>(
    ranges: &[ResolvedRange],
    selected: &[S],
    formatter: &dyn ValueFormatter,
) -> Vec<SelectionChoice> {
    selected
        .iter()
        .map(|value| {
            let value = value.as_ref();
            let label = ranges
                .iter()
                .find(|range| range.token().as_deref() == Some(value))
                .map_or_else(|| value.to_string(), |range| range.display_label(formatter));
            SelectionChoice {
                value: value.to_string(),
                label,
            }
        })
        .collect()
}
