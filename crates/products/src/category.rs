use core::str::FromStr;

use serde::{Deserialize, Serialize};

use stash_core::DomainError;

/// Section titles, in [`Category::ALL`] order.
pub const SECTION_TITLES: [&str; Category::COUNT] =
    ["Cleansers", "Actives", "Hydrators", "Occlusives", "Treatments"];

/// Classification bucket a product is displayed under.
///
/// The declaration order is the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Cleanser,
    #[default]
    Active,
    Hydrator,
    Occlusive,
    Treatment,
}

impl Category {
    pub const COUNT: usize = 5;

    pub const ALL: [Category; Category::COUNT] = [
        Category::Cleanser,
        Category::Active,
        Category::Hydrator,
        Category::Occlusive,
        Category::Treatment,
    ];

    /// Stored (persisted) spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Cleanser => "cleanser",
            Category::Active => "active",
            Category::Hydrator => "hydrator",
            Category::Occlusive => "occlusive",
            Category::Treatment => "treatment",
        }
    }

    /// Position of this category's section.
    pub fn index(self) -> usize {
        match self {
            Category::Cleanser => 0,
            Category::Active => 1,
            Category::Hydrator => 2,
            Category::Occlusive => 3,
            Category::Treatment => 4,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Display title of this category's section.
    pub fn section_title(self) -> &'static str {
        SECTION_TITLES[self.index()]
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    /// Exact match on the stored spelling. Anything else is an unknown category.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| DomainError::unknown_category(s))
    }
}
