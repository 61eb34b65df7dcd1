//! Experience-hour totals and progress against goals

use crate::core::models::{Category, ExperienceRecord, GoalMap};

/// Hours logged in one category and progress toward its goal
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryProgress {
    /// Experience category
    pub category: Category,
    /// Sum of countable hours in this category
    pub hours: f64,
    /// Hour target (0 when no goal is set)
    pub goal: u32,
    /// Progress toward the goal as a percentage in `0..=100`
    pub percent: f64,
}

impl CategoryProgress {
    /// Whether the category has a goal and should be displayed individually
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.goal > 0
    }
}

/// Per-category and overall hour progress
#[derive(Debug, Clone, PartialEq)]
pub struct HoursSummary {
    /// One entry per category, in [`Category::ALL`] order
    pub categories: Vec<CategoryProgress>,
    /// Hours across every category
    pub total_hours: f64,
    /// Sum of every goal value, whether or not its category is displayed
    pub total_goal: u64,
    /// Overall progress as a percentage in `0..=100`
    pub total_percent: f64,
}

impl HoursSummary {
    /// Categories with a positive goal (the ones shown individually)
    pub fn active(&self) -> impl Iterator<Item = &CategoryProgress> {
        self.categories.iter().filter(|p| p.is_active())
    }

    /// Progress for a single category
    #[must_use]
    pub fn get(&self, category: Category) -> Option<&CategoryProgress> {
        self.categories.iter().find(|p| p.category == category)
    }
}

/// Progress toward a goal as a percentage, capped at 100.
///
/// Returns 0 when the goal is zero, negative, or not a number. Overage is
/// not reported: any `current >= goal` yields exactly 100.
#[must_use]
pub fn progress_percent(current: f64, goal: f64) -> f64 {
    if goal > 0.0 {
        (current / goal * 100.0).min(100.0)
    } else {
        0.0
    }
}

/// Aggregate experience hours per category and in total.
///
/// Categories come from the fixed [`Category::ALL`] list rather than from the
/// data, so every category appears even when nothing was logged. Hours that
/// are not positive count as zero. The total goal is the sum of every goal in
/// `goals`, including categories that are not active.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn aggregate_hours(records: &[ExperienceRecord], goals: &GoalMap) -> HoursSummary {
    let categories: Vec<CategoryProgress> = Category::ALL
        .into_iter()
        .map(|category| {
            let hours: f64 = records
                .iter()
                .filter(|r| r.category == category)
                .map(ExperienceRecord::countable_hours)
                .sum();
            let goal = goals.get(category);
            CategoryProgress {
                category,
                hours,
                goal,
                percent: progress_percent(hours, f64::from(goal)),
            }
        })
        .collect();

    let total_hours = categories.iter().map(|p| p.hours).sum();
    let total_goal = goals.total();

    crate::debug!(
        "Aggregated {} experience record(s): {total_hours} hours against a {total_goal} hour goal",
        records.len()
    );

    HoursSummary {
        categories,
        total_hours,
        total_goal,
        total_percent: progress_percent(total_hours, total_goal as f64),
    }
}
