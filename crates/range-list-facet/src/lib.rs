//! Host-facing range list facet
//!
//! - [`FacetType`]: the interface the host drives for every facet type
//! - [`RangeListFacet`]: the `range_list` implementation
//! - [`FacetTypeRegistry`]: lookup from a facet's `type` setting

#![forbid(unsafe_code)]

pub mod facet;
pub mod range_list;
pub mod registry;

pub use facet::{FacetType, FilterParams, FilterQuery, LoadParams, RenderParams};
pub use range_list::RangeListFacet;
pub use registry::FacetTypeRegistry;
