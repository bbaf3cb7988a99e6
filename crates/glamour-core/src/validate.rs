use crate::filters::{LevelRange, name_matches};
use crate::model::Bundle;

/// Visibility settings a rebuild is evaluated against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundleQuery {
    pub levels: LevelRange,
    pub search: String,
}

impl BundleQuery {
    pub fn new(levels: LevelRange, search: impl Into<String>) -> Self {
        Self {
            levels,
            search: search.into(),
        }
    }

    /// A bundle is visible when at least one item sits inside the level range
    /// and, for a non-blank search, its name or one of its item names matches.
    ///
    /// One in-range item is enough: a set may mix low-level base pieces with
    /// higher-level ones.
    pub fn accepts(&self, bundle: &Bundle) -> bool {
        self.level_matches(bundle) && self.search_matches(bundle)
    }

    fn level_matches(&self, bundle: &Bundle) -> bool {
        bundle
            .items
            .iter()
            .any(|item| self.levels.contains(item.level))
    }

    fn search_matches(&self, bundle: &Bundle) -> bool {
        if self.search.trim().is_empty() {
            return true;
        }
        name_matches(&bundle.name, &self.search)
            || bundle
                .items
                .iter()
                .any(|item| name_matches(&item.name, &self.search))
    }
}
