//! Facet type registry
//!
//! Maps the `type` key of facet settings to the [`FacetType`] that handles
//! it.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use range_list_core::{FacetSettings, RangeListConfig, RangeListError, RangeListResult};

use crate::facet::FacetType;
use crate::range_list::RangeListFacet;

pub struct FacetTypeRegistry {
    types: BTreeMap<&'static str, Arc<dyn FacetType>>,
}

impl fmt::Debug for FacetTypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FacetTypeRegistry")
            .field("types", &self.names())
            .finish()
    }
}

impl Default for FacetTypeRegistry {
    fn default() -> Self {
        Self::with_defaults(RangeListConfig::default())
    }
}

impl FacetTypeRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            types: BTreeMap::new(),
        }
    }

    /// A registry holding the built-in facet types.
    #[must_use]
    pub fn with_defaults(config: RangeListConfig) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(RangeListFacet::new(config)));
        registry
    }

    /// Register `facet_type`, returning the type it replaced (if any).
    pub fn register(&mut self, facet_type: Arc<dyn FacetType>) -> Option<Arc<dyn FacetType>> {
        let name = facet_type.type_name();
        let previous = self.types.insert(name, facet_type);
        if previous.is_some() {
            tracing::warn!(facet_type = name, "replacing registered facet type");
        }
        previous
    }

    /// Look up a facet type by name.
    pub fn get(&self, name: &str) -> RangeListResult<Arc<dyn FacetType>> {
        self.types
            .get(name)
            .cloned()
            .ok_or_else(|| RangeListError::UnknownFacetType(name.to_string()))
    }

    /// The facet type that handles `settings`.
    pub fn for_settings(&self, settings: &FacetSettings) -> RangeListResult<Arc<dyn FacetType>> {
        self.get(&settings.facet_type)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Registered type names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.types.keys().copied().collect()
    }
}
