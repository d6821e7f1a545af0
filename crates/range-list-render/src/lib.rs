//! HTML rendering for range list facets
//!
//! Turns counted [`ResolvedRange`](range_list_core::ResolvedRange)s into the
//! facet's `<div>` markup, and selected tokens into labels for the host's
//! active-selections bar.

#![forbid(unsafe_code)]

pub mod error;
pub mod render;
pub mod templates;

pub use error::{RenderError, RenderResult};
pub use render::{
    RangeChoice, SelectionChoice, build_choices, render_choices, render_ranges, selection_choices,
};
pub use templates::{RANGE_LIST_TEMPLATE, render_template};
