//! Cross-facet selection state
//!
//! Counts for one facet are computed over the posts that the *other* facets
//! currently allow. The host passes that state in explicitly.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::sql::post_id_in_clause;

/// Post ids known to the host for the current request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionContext {
    /// Every post the query would return with no facet applied.
    #[serde(default)]
    pub unfiltered_post_ids: BTreeSet<u64>,
    /// Posts matched by each facet that has an active selection.
    #[serde(default)]
    pub facet_matches: BTreeMap<String, BTreeSet<u64>>,
}

impl SelectionContext {
    #[must_use]
    pub fn new(unfiltered_post_ids: impl IntoIterator<Item = u64>) -> Self {
        Self {
            unfiltered_post_ids: unfiltered_post_ids.into_iter().collect(),
            facet_matches: BTreeMap::new(),
        }
    }

    /// Record the posts matched by `facet_name`'s current selection.
    #[must_use]
    pub fn with_matches(
        mut self,
        facet_name: impl Into<String>,
        post_ids: impl IntoIterator<Item = u64>,
    ) -> Self {
        self.facet_matches
            .insert(facet_name.into(), post_ids.into_iter().collect());
        self
    }

    /// Posts whose values count toward `facet_name`'s ranges.
    ///
    /// The facet's own selection is ignored, so its counts show what picking
    /// a different range would return.
    #[must_use]
    pub fn eligible_post_ids(&self, facet_name: &str) -> BTreeSet<u64> {
        let mut others = self
            .facet_matches
            .iter()
            .filter(|(name, _)| name.as_str() != facet_name)
            .map(|(_, ids)| ids);

        let Some(first) = others.next() else {
            return self.unfiltered_post_ids.clone();
        };
        let mut eligible = first.clone();
        for ids in others {
            eligible.retain(|id| ids.contains(id));
        }
        eligible.retain(|id| self.unfiltered_post_ids.contains(id));
        eligible
    }

    /// [`eligible_post_ids`](Self::eligible_post_ids) as a lookup set for
    /// in-memory counting.
    #[must_use]
    pub fn scope(&self, facet_name: &str) -> HashSet<u64> {
        self.eligible_post_ids(facet_name).into_iter().collect()
    }

    /// ` AND post_id IN (...)` restricting a value query to eligible posts.
    #[must_use]
    pub fn where_clause(&self, facet_name: &str) -> String {
        post_id_in_clause(&self.eligible_post_ids(facet_name))
    }
}
