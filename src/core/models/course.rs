//! Course record and letter-grade models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Letter grades recognized on a transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grade {
    /// A (4.0)
    A,
    /// A- (3.7)
    AMinus,
    /// B+ (3.3)
    BPlus,
    /// B (3.0)
    B,
    /// B- (2.7)
    BMinus,
    /// C+ (2.3)
    CPlus,
    /// C (2.0)
    C,
    /// C- (1.7)
    CMinus,
    /// D+ (1.3)
    DPlus,
    /// D (1.0)
    D,
    /// F (0.0)
    F,
    /// Pass (no grade points)
    Pass,
    /// No pass (no grade points)
    NoPass,
}

impl Grade {
    /// Every recognized grade, best first
    pub const ALL: [Self; 13] = [
        Self::A,
        Self::AMinus,
        Self::BPlus,
        Self::B,
        Self::BMinus,
        Self::CPlus,
        Self::C,
        Self::CMinus,
        Self::DPlus,
        Self::D,
        Self::F,
        Self::Pass,
        Self::NoPass,
    ];

    /// Grade points on the 4.0 scale
    ///
    /// Returns `None` for pass/no-pass grades, which carry no points and no
    /// GPA credits.
    #[must_use]
    pub const fn points(self) -> Option<f64> {
        match self {
            Self::A => Some(4.0),
            Self::AMinus => Some(3.7),
            Self::BPlus => Some(3.3),
            Self::B => Some(3.0),
            Self::BMinus => Some(2.7),
            Self::CPlus => Some(2.3),
            Self::C => Some(2.0),
            Self::CMinus => Some(1.7),
            Self::DPlus => Some(1.3),
            Self::D => Some(1.0),
            Self::F => Some(0.0),
            Self::Pass | Self::NoPass => None,
        }
    }

    /// Transcript notation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::AMinus => "A-",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::BMinus => "B-",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::CMinus => "C-",
            Self::DPlus => "D+",
            Self::D => "D",
            Self::F => "F",
            Self::Pass => "P",
            Self::NoPass => "NP",
        }
    }

    /// Whether the grade earns credit toward a requirement
    #[must_use]
    pub const fn is_passing(self) -> bool {
        !matches!(self, Self::F | Self::NoPass)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Unknown grade: '{s}'"))
    }
}

/// Represents one completed or planned academic course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    /// Course name (e.g., "General Chemistry I")
    pub name: String,

    /// Course code (e.g., "CHEM 101")
    pub code: String,

    /// Credit hours (can be fractional)
    pub credits: f64,

    /// Grade as recorded; empty for planned courses
    pub grade: String,

    /// Term name (e.g., "Fall", "Spring")
    pub semester: String,

    /// Academic year the term belongs to
    pub year: i32,

    /// Counts toward the science (BCPM) GPA
    pub is_science: bool,
}

impl CourseRecord {
    /// Create a new course record
    ///
    /// # Arguments
    /// * `name` - Full course name
    /// * `code` - Course code
    /// * `credits` - Credit hours
    /// * `grade` - Grade as written on the transcript
    #[must_use]
    pub fn new(name: &str, code: &str, credits: f64, grade: &str) -> Self {
        Self {
            name: name.to_string(),
            code: code.to_string(),
            credits,
            grade: grade.to_string(),
            semester: String::new(),
            year: 0,
            is_science: false,
        }
    }

    /// Set the term the course was taken in
    #[must_use]
    pub fn in_term(mut self, semester: &str, year: i32) -> Self {
        self.semester = semester.to_string();
        self.year = year;
        self
    }

    /// Mark the course as a science (BCPM) course
    #[must_use]
    pub const fn science(mut self) -> Self {
        self.is_science = true;
        self
    }

    /// Parsed grade, or `None` if the recorded grade is not recognized
    #[must_use]
    pub fn parsed_grade(&self) -> Option<Grade> {
        self.grade.parse().ok()
    }

    /// Whether the course has been finished with a passing grade
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.parsed_grade().is_some_and(Grade::is_passing)
    }

    /// Text searched when matching prerequisites (lowercased name and code)
    #[must_use]
    pub fn match_text(&self) -> String {
        format!("{} {}", self.name, self.code).to_lowercase()
    }
}
