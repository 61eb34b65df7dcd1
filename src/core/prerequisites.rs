//! Prerequisite requirement tables and course matching
//!
//! Each program track has an ordered list of requirement categories, and each
//! category an ordered list of requirements identified by keywords. Completed
//! courses are matched first-fit in table order, and a course is consumed by
//! the first requirement it fills.

use crate::core::models::{CourseRecord, Track};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Built-in requirement table compiled into the binary
const BUILTIN_REQUIREMENTS: &str = include_str!("../../assets/prerequisites.toml");

static BUILTIN_TABLE: LazyLock<RequirementTable> = LazyLock::new(|| {
    RequirementTable::from_toml(BUILTIN_REQUIREMENTS)
        .expect("Failed to parse compiled-in prerequisite table")
});

/// A single prerequisite slot (e.g., "Organic Chemistry I")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    /// Display name
    pub name: String,
    /// Substrings that identify a matching course
    pub keywords: Vec<String>,
}

impl Requirement {
    /// Create a requirement from a name and keywords
    #[must_use]
    pub fn new(name: &str, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
        }
    }

    /// Whether lowercased course text contains any non-empty keyword
    #[must_use]
    pub fn matches(&self, course_text: &str) -> bool {
        self.keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .any(|k| !k.is_empty() && course_text.contains(&k))
    }
}

/// An ordered group of requirements (e.g., "Chemistry")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementCategory {
    /// Display name
    pub name: String,
    /// Requirements in evaluation order
    #[serde(default)]
    pub requirements: Vec<Requirement>,
}

/// All requirement categories for one track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRequirements {
    /// Track the requirements apply to
    #[serde(rename = "name")]
    pub track: Track,
    /// Categories in evaluation order
    #[serde(rename = "category", default)]
    pub categories: Vec<RequirementCategory>,
}

impl TrackRequirements {
    /// Total number of requirement slots
    #[must_use]
    pub fn requirement_count(&self) -> usize {
        self.categories.iter().map(|c| c.requirements.len()).sum()
    }
}

/// Read-only requirement reference data for every track that has one
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementTable {
    #[serde(rename = "track", default)]
    tracks: Vec<TrackRequirements>,
}

impl RequirementTable {
    /// Parse a requirement table from TOML
    ///
    /// # Errors
    /// Returns an error if the TOML cannot be parsed or names an unknown track
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// The built-in table shipped with the crate
    ///
    /// # Panics
    /// Panics on first use if the embedded table is invalid. The table is
    /// compiled into the binary and covered by tests.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN_TABLE
    }

    /// Requirements for a track, or `None` if the track has none defined
    #[must_use]
    pub fn for_track(&self, track: Track) -> Option<&TrackRequirements> {
        self.tracks.iter().find(|t| t.track == track)
    }
}

impl From<Vec<TrackRequirements>> for RequirementTable {
    fn from(tracks: Vec<TrackRequirements>) -> Self {
        Self { tracks }
    }
}

/// A requirement and the course that satisfied it, if any
#[derive(Debug, Clone, PartialEq)]
pub struct RequirementMatch<'a> {
    /// The requirement slot
    pub requirement: &'a Requirement,
    /// The course consumed by this requirement
    pub satisfied_by: Option<&'a CourseRecord>,
}

impl RequirementMatch<'_> {
    /// Whether a course fills this requirement
    #[must_use]
    pub const fn is_satisfied(&self) -> bool {
        self.satisfied_by.is_some()
    }
}

/// Match results for one requirement category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryMatches<'a> {
    /// Category name
    pub name: &'a str,
    /// Results in requirement order
    pub requirements: Vec<RequirementMatch<'a>>,
}

/// Completion report for one track
#[derive(Debug, Clone, PartialEq)]
pub struct PrerequisiteReport<'a> {
    /// Track the report was computed for
    pub track: Track,
    /// Results grouped by category, in table order
    pub categories: Vec<CategoryMatches<'a>>,
    /// Number of requirement slots
    pub total: usize,
    /// Number of satisfied slots (never exceeds `total`)
    pub satisfied: usize,
}

impl<'a> PrerequisiteReport<'a> {
    /// Whether every requirement is satisfied
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.satisfied == self.total
    }

    /// Requirements not yet satisfied, in table order
    pub fn missing(&self) -> impl Iterator<Item = &'a Requirement> + '_ {
        self.categories
            .iter()
            .flat_map(|c| c.requirements.iter())
            .filter(|m| !m.is_satisfied())
            .map(|m| m.requirement)
    }
}

/// Outcome of matching a track's prerequisites
#[derive(Debug, Clone, PartialEq)]
pub enum PrerequisiteStatus<'a> {
    /// The track has no requirement table; distinct from "0 of 0 satisfied"
    NotApplicable(Track),
    /// The track's completion report
    Report(PrerequisiteReport<'a>),
}

/// Match completed courses against one track's requirements.
///
/// Requirements are visited in category order, then requirement order. For
/// each, the first course (in input order) that has not been consumed yet
/// and whose lowercased `name code` text contains one of the keywords is
/// taken. No search for a better fit is made.
#[must_use]
pub fn match_requirements<'a>(
    requirements: &'a TrackRequirements,
    completed: &'a [CourseRecord],
) -> PrerequisiteReport<'a> {
    let texts: Vec<String> = completed.iter().map(CourseRecord::match_text).collect();
    let mut consumed = vec![false; completed.len()];
    let mut satisfied = 0;

    let categories = requirements
        .categories
        .iter()
        .map(|category| {
            let matches = category
                .requirements
                .iter()
                .map(|requirement| {
                    let hit = texts
                        .iter()
                        .enumerate()
                        .find(|(idx, text)| !consumed[*idx] && requirement.matches(text))
                        .map(|(idx, _)| idx);
                    if let Some(idx) = hit {
                        consumed[idx] = true;
                        satisfied += 1;
                    }
                    RequirementMatch {
                        requirement,
                        satisfied_by: hit.map(|idx| &completed[idx]),
                    }
                })
                .collect();
            CategoryMatches {
                name: category.name.as_str(),
                requirements: matches,
            }
        })
        .collect();

    let total = requirements.requirement_count();
    crate::debug!(
        "{}: {satisfied} of {total} prerequisite(s) satisfied by {} course(s)",
        requirements.track,
        completed.len()
    );

    PrerequisiteReport {
        track: requirements.track,
        categories,
        total,
        satisfied,
    }
}

/// Look up a track in a requirement table and match completed courses.
///
/// # Returns
/// [`PrerequisiteStatus::NotApplicable`] when the table has no entry for the
/// track, otherwise the completion report.
#[must_use]
pub fn check_prerequisites<'a>(
    table: &'a RequirementTable,
    track: Track,
    completed: &'a [CourseRecord],
) -> PrerequisiteStatus<'a> {
    table.for_track(track).map_or(
        PrerequisiteStatus::NotApplicable(track),
        |requirements| PrerequisiteStatus::Report(match_requirements(requirements, completed)),
    )
}
