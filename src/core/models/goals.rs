//! Hour goal model

use super::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Hour targets per experience category
///
/// A category without an entry has no goal. At most one goal map exists per
/// student.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalMap {
    goals: BTreeMap<Category, u32>,
}

impl GoalMap {
    /// Create an empty goal map (no goals set)
    #[must_use]
    pub const fn new() -> Self {
        Self {
            goals: BTreeMap::new(),
        }
    }

    /// Set the hour target for a category, replacing any previous target
    pub fn set(&mut self, category: Category, hours: u32) {
        self.goals.insert(category, hours);
    }

    /// Builder-style variant of [`set`](Self::set)
    #[must_use]
    pub fn with(mut self, category: Category, hours: u32) -> Self {
        self.set(category, hours);
        self
    }

    /// Hour target for a category (0 when no goal is set)
    #[must_use]
    pub fn get(&self, category: Category) -> u32 {
        self.goals.get(&category).copied().unwrap_or(0)
    }

    /// Sum of every goal value, including categories with a zero goal
    #[must_use]
    pub fn total(&self) -> u64 {
        self.goals.values().map(|&h| u64::from(h)).sum()
    }

    /// Whether no goal has been set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    /// Iterate over `(category, hours)` pairs in category order
    pub fn iter(&self) -> impl Iterator<Item = (Category, u32)> + '_ {
        self.goals.iter().map(|(&c, &h)| (c, h))
    }
}

impl FromIterator<(Category, u32)> for GoalMap {
    fn from_iter<I: IntoIterator<Item = (Category, u32)>>(iter: I) -> Self {
        Self {
            goals: iter.into_iter().collect(),
        }
    }
}
