//! Race categories and the category selection set.

use serde::{Deserialize, Serialize};

/// One of the three supported race disciplines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RaceCategory {
    Horses,
    Dogs,
    Trots,
}

impl RaceCategory {
    /// All known categories, in display order.
    pub const ALL: [RaceCategory; 3] =
        [RaceCategory::Horses, RaceCategory::Dogs, RaceCategory::Trots];

    /// The opaque identifier the upstream API uses for this category.
    pub const fn id(self) -> &'static str {
        match self {
            RaceCategory::Horses => "4a2788f8-e825-4d36-9894-efd4baf1cfae",
            RaceCategory::Dogs => "9daef0d7-bf3c-4f50-921d-8e818c60fe61",
            RaceCategory::Trots => "161d9be2-e909-4326-8c2c-35ed71fb460b",
        }
    }

    /// Reverse lookup from an upstream category identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.id() == id)
    }

    /// Display icon for this category.
    pub const fn icon(self) -> char {
        match self {
            RaceCategory::Horses => '🏇',
            RaceCategory::Dogs => '🐕',
            RaceCategory::Trots => '🛞',
        }
    }

    const fn bit(self) -> u8 {
        match self {
            RaceCategory::Horses => 0b001,
            RaceCategory::Dogs => 0b010,
            RaceCategory::Trots => 0b100,
        }
    }
}

/// The set of categories the consumer currently wants to see.
///
/// An empty selection is a valid state: the derived feed is simply empty.
/// The selection is a plain value; the presentation layer owns it and passes
/// it into each derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategorySelection {
    set: u8,
}

impl CategorySelection {
    /// Selection containing no categories.
    pub const fn none() -> Self {
        Self { set: 0 }
    }

    /// Selection containing all three categories.
    pub const fn all() -> Self {
        Self { set: 0b111 }
    }

    /// Selection containing exactly one category.
    pub const fn only(category: RaceCategory) -> Self {
        Self { set: category.bit() }
    }

    pub fn contains(&self, category: RaceCategory) -> bool {
        self.set & category.bit() != 0
    }

    /// Whether the selection covers the given upstream category identifier.
    pub fn contains_id(&self, id: &str) -> bool {
        RaceCategory::from_id(id).is_some_and(|category| self.contains(category))
    }

    pub fn insert(&mut self, category: RaceCategory) {
        self.set |= category.bit();
    }

    pub fn remove(&mut self, category: RaceCategory) {
        self.set &= !category.bit();
    }

    /// Flip a category's membership. Removing the last category is allowed;
    /// the feed then shows nothing until a category is selected again.
    pub fn toggle(&mut self, category: RaceCategory) {
        self.set ^= category.bit();
    }

    pub fn is_empty(&self) -> bool {
        self.set == 0
    }

    pub fn len(&self) -> usize {
        self.set.count_ones() as usize
    }

    /// Selected categories in display order.
    pub fn iter(&self) -> impl Iterator<Item = RaceCategory> + '_ {
        RaceCategory::ALL.into_iter().filter(|category| self.contains(*category))
    }

    /// Upstream identifiers of the selected categories, for the fetch query.
    pub fn ids(&self) -> Vec<&'static str> {
        self.iter().map(RaceCategory::id).collect()
    }
}

impl Default for CategorySelection {
    fn default() -> Self {
        Self::all()
    }
}

impl FromIterator<RaceCategory> for CategorySelection {
    fn from_iter<I: IntoIterator<Item = RaceCategory>>(iter: I) -> Self {
        let mut selection = Self::none();
        for category in iter {
            selection.insert(category);
        }
        selection
    }
}
