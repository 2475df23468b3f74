//! Stash configuration.

use stash_products::{Category, DEFAULT_SHELF_LIFE_MONTHS};

/// What to do with a loaded record whose stored category is not recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownCategoryPolicy {
    /// Leave the record out of the in-memory list and every bucket. The record
    /// stays in storage untouched.
    #[default]
    Exclude,
    /// Show the record under the given category.
    FallbackTo(Category),
}

/// Stash configuration.
#[derive(Debug, Clone)]
pub struct StashConfig {
    /// Months between adding a product and its default expiration date.
    pub shelf_life_months: u32,
    /// Handling of records with an unrecognised category.
    pub unknown_category: UnknownCategoryPolicy,
}

impl Default for StashConfig {
    fn default() -> Self {
        Self {
            shelf_life_months: DEFAULT_SHELF_LIFE_MONTHS,
            unknown_category: UnknownCategoryPolicy::default(),
        }
    }
}

impl StashConfig {
    pub fn with_shelf_life_months(mut self, months: u32) -> Self {
        self.shelf_life_months = months;
        self
    }

    pub fn with_unknown_category(mut self, policy: UnknownCategoryPolicy) -> Self {
        self.unknown_category = policy;
        self
    }
}
