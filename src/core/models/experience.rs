//! Experience record model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Experience categories tracked for health-professional applications
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Hands-on patient care (e.g., EMT, CNA, scribe with patient contact)
    #[serde(rename = "Patient Care Experience")]
    PatientCare,
    /// Healthcare work without direct patient responsibility
    #[serde(rename = "Healthcare Experience")]
    Healthcare,
    /// Laboratory or clinical research
    #[serde(rename = "Research")]
    Research,
    /// Shadowing a licensed provider
    #[serde(rename = "Shadowing")]
    Shadowing,
    /// Volunteer service
    #[serde(rename = "Volunteer Work")]
    Volunteer,
    /// Anything else worth logging
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Self; 6] = [
        Self::PatientCare,
        Self::Healthcare,
        Self::Research,
        Self::Shadowing,
        Self::Volunteer,
        Self::Other,
    ];

    /// Human-readable category name, as stored in snapshots
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PatientCare => "Patient Care Experience",
            Self::Healthcare => "Healthcare Experience",
            Self::Research => "Research",
            Self::Shadowing => "Shadowing",
            Self::Volunteer => "Volunteer Work",
            Self::Other => "Other",
        }
    }

    /// Short form accepted on input (e.g., "Patient Care")
    #[must_use]
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::PatientCare => "Patient Care",
            Self::Healthcare => "Healthcare",
            Self::Volunteer => "Volunteer",
            other => other.name(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Accepts the full or short name in any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| {
                c.name().eq_ignore_ascii_case(wanted) || c.short_name().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| format!("Unknown experience category: '{s}'"))
    }
}

/// One logged activity session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceRecord {
    /// Experience category
    pub category: Category,

    /// Calendar date of the session
    pub date: NaiveDate,

    /// Hours spent; only positive values count toward totals
    pub hours: f64,

    /// Organization or site name
    pub location: String,

    /// Free-form notes
    pub notes: Option<String>,
}

impl ExperienceRecord {
    /// Create a new experience record without notes
    #[must_use]
    pub const fn new(category: Category, date: NaiveDate, hours: f64, location: String) -> Self {
        Self {
            category,
            date,
            hours,
            location,
            notes: None,
        }
    }

    /// Attach notes to the record
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Hours that count toward aggregates (non-positive and non-finite hours count as zero)
    #[must_use]
    pub fn countable_hours(&self) -> f64 {
        if self.hours.is_finite() && self.hours > 0.0 {
            self.hours
        } else {
            0.0
        }
    }
}
