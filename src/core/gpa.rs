//! Grade point average calculation
//!
//! Converts course records into credit-weighted GPA figures. Records that
//! cannot contribute (unrecognized or pass/no-pass grades, non-positive
//! credits) are skipped rather than reported as errors, so one malformed
//! record never hides a whole summary.

use crate::core::models::CourseRecord;
use std::fmt;

/// A computed GPA, or the sentinel for "nothing to average"
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gpa {
    /// Credit-weighted average, rounded to two decimal places
    Value(f64),
    /// No credit-bearing course was counted
    NotAvailable,
}

impl Gpa {
    /// The numeric value, if available
    #[must_use]
    pub const fn value(self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(v),
            Self::NotAvailable => None,
        }
    }
}

impl fmt::Display for Gpa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => f.pad(&format!("{v:.2}")),
            Self::NotAvailable => f.pad("N/A"),
        }
    }
}

/// Cumulative and science-only GPA side by side
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpaSummary {
    /// GPA over every counted course
    pub cumulative: Gpa,
    /// GPA over science (BCPM) courses only
    pub science: Gpa,
}

impl GpaSummary {
    /// Compute both GPA figures for a list of courses
    #[must_use]
    pub fn from_courses(courses: &[CourseRecord]) -> Self {
        Self {
            cumulative: calculate_gpa(courses, false),
            science: calculate_gpa(courses, true),
        }
    }
}

/// Compute the credit-weighted GPA for a collection of courses.
///
/// When `science_only` is set, only courses flagged `is_science` are
/// considered. Each remaining course contributes `points × credits` to the
/// point total and `credits` to the credit total, provided its grade carries
/// points and its credits are positive. The result is invariant to the order
/// of the input.
///
/// # Returns
/// [`Gpa::NotAvailable`] when no credits were accumulated, otherwise the
/// average rounded to two decimal places.
#[must_use]
pub fn calculate_gpa<'a, I>(courses: I, science_only: bool) -> Gpa
where
    I: IntoIterator<Item = &'a CourseRecord>,
{
    let mut points = 0.0;
    let mut credits = 0.0;
    let mut skipped = 0usize;

    for course in courses {
        if science_only && !course.is_science {
            continue;
        }
        let Some(grade_points) = course.parsed_grade().and_then(|g| g.points()) else {
            skipped += 1;
            continue;
        };
        if !(course.credits.is_finite() && course.credits > 0.0) {
            skipped += 1;
            continue;
        }
        points += grade_points * course.credits;
        credits += course.credits;
    }

    if skipped > 0 {
        crate::debug!("GPA: skipped {skipped} course(s) without grade points or credits");
    }

    if credits > 0.0 {
        Gpa::Value(round2(points / credits))
    } else {
        Gpa::NotAvailable
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Courses taken in the same `(year, semester)` term
#[derive(Debug, Clone, PartialEq)]
pub struct TermGroup<'a> {
    /// Academic year
    pub year: i32,
    /// Term name as first recorded (e.g., "Fall")
    pub semester: String,
    /// Courses in input order
    pub courses: Vec<&'a CourseRecord>,
}

impl TermGroup<'_> {
    /// GPA for this term alone
    #[must_use]
    pub fn gpa(&self, science_only: bool) -> Gpa {
        calculate_gpa(self.courses.iter().copied(), science_only)
    }

    /// Sum of positive credits in this term, regardless of grade
    #[must_use]
    pub fn credits(&self) -> f64 {
        self.courses
            .iter()
            .map(|c| c.credits)
            .filter(|c| c.is_finite() && *c > 0.0)
            .sum()
    }

    /// Display label (e.g., "Fall 2023")
    #[must_use]
    pub fn label(&self) -> String {
        if self.semester.is_empty() {
            self.year.to_string()
        } else {
            format!("{} {}", self.semester, self.year)
        }
    }
}

/// Ordering of term names within a year, latest first
fn semester_rank(semester: &str) -> u8 {
    match semester.to_ascii_lowercase().as_str() {
        "fall" | "autumn" => 0,
        "summer" => 1,
        "spring" => 2,
        "winter" => 3,
        _ => 4,
    }
}

/// Group courses by term for display.
///
/// Semester names are compared case-insensitively after trimming. Groups are
/// ordered newest year first; within a year Fall, Summer, Spring, Winter, then
/// any other term names alphabetically.
#[must_use]
pub fn group_by_term(courses: &[CourseRecord]) -> Vec<TermGroup<'_>> {
    let mut groups: Vec<TermGroup<'_>> = Vec::new();

    for course in courses {
        let semester = course.semester.trim();
        if let Some(group) = groups
            .iter_mut()
            .find(|g| g.year == course.year && g.semester.eq_ignore_ascii_case(semester))
        {
            group.courses.push(course);
        } else {
            groups.push(TermGroup {
                year: course.year,
                semester: semester.to_string(),
                courses: vec![course],
            });
        }
    }

    groups.sort_by(|a, b| {
        b.year
            .cmp(&a.year)
            .then_with(|| semester_rank(&a.semester).cmp(&semester_rank(&b.semester)))
            .then_with(|| {
                a.semester
                    .to_ascii_lowercase()
                    .cmp(&b.semester.to_ascii_lowercase())
            })
    });

    groups
}
