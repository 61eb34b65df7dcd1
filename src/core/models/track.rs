//! Program track model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A student's chosen professional pathway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Track {
    /// Medical school (MD/DO)
    #[serde(rename = "Pre-Med")]
    PreMed,
    /// Physician assistant programs
    #[serde(rename = "Pre-PA")]
    PrePa,
    /// Dental school
    #[serde(rename = "Pre-Dental")]
    PreDental,
    /// Any other pathway; no prerequisite table applies
    #[serde(rename = "Other")]
    Other,
}

impl Track {
    /// All tracks in display order
    pub const ALL: [Self; 4] = [Self::PreMed, Self::PrePa, Self::PreDental, Self::Other];

    /// Display name (e.g., "Pre-Med")
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PreMed => "Pre-Med",
            Self::PrePa => "Pre-PA",
            Self::PreDental => "Pre-Dental",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Track {
    type Err = String;

    /// Accepts the display name in any case, with or without the hyphen
    /// (`Pre-Med`, `pre-med`, `premed`, `pre med`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let squash = |v: &str| {
            v.chars()
                .filter(char::is_ascii_alphanumeric)
                .collect::<String>()
                .to_ascii_lowercase()
        };
        let wanted = squash(s);
        Self::ALL
            .into_iter()
            .find(|t| squash(t.name()) == wanted)
            .ok_or_else(|| format!("Unknown track: '{s}'"))
    }
}
