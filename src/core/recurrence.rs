//! Recurring experience entries
//!
//! A recurring entry is a one-time convenience: a template record plus a
//! recurrence rule is expanded into independent dated records that are saved
//! together. After expansion nothing links the records to each other.
//!
//! Bi-weekly recurrence is anchored to the template's start date. Weeks are
//! counted from that date, so moving the start date shifts which weeks are
//! on-cycle.

use crate::core::models::ExperienceRecord;
use chrono::{Datelike, NaiveDate, Weekday};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Date format accepted for start and end dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validation failures reported before any expansion happens
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecurrenceError {
    /// Recurrence was requested without an end date
    #[error("a recurring entry needs an end date")]
    MissingEndDate,
    /// The template's hours are zero, negative, or not a number
    #[error("hours must be greater than zero (got {0})")]
    NonPositiveHours(f64),
    /// A date string could not be parsed
    #[error("invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

/// How often a recurring entry repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Frequency {
    /// Every calendar day
    Daily,
    /// Selected weekdays every week
    #[default]
    Weekly,
    /// Selected weekdays every other week, counted from the start date
    BiWeekly,
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => write!(f, "daily"),
            Self::Weekly => write!(f, "weekly"),
            Self::BiWeekly => write!(f, "bi-weekly"),
        }
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "bi-weekly" | "biweekly" | "fortnightly" => Ok(Self::BiWeekly),
            _ => Err(format!("Unknown frequency: '{s}'")),
        }
    }
}

/// A set of weekdays
///
/// An empty set matches every day of the week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    /// The empty selection
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    fn bit(day: Weekday) -> u8 {
        1 << day.num_days_from_monday()
    }

    /// Add a weekday to the selection
    pub fn insert(&mut self, day: Weekday) {
        self.0 |= Self::bit(day);
    }

    /// Whether the weekday was explicitly selected
    #[must_use]
    pub fn contains(self, day: Weekday) -> bool {
        self.0 & Self::bit(day) != 0
    }

    /// Whether no weekday was selected
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether a day qualifies: selected, or nothing selected at all
    #[must_use]
    pub fn matches(self, day: Weekday) -> bool {
        self.is_empty() || self.contains(day)
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = Self::new();
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl FromStr for WeekdaySet {
    type Err = String;

    /// Parse a comma-separated list such as `mon,wed,fri`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<Weekday>()
                    .map_err(|_| format!("Unknown weekday: '{part}'"))
            })
            .collect()
    }
}

/// The recurrence rule attached to a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecurrenceRule {
    /// Last day of the series (inclusive); required
    pub end_date: Option<NaiveDate>,
    /// Repeat frequency
    pub frequency: Frequency,
    /// Weekday selection (ignored for daily recurrence)
    pub weekdays: WeekdaySet,
}

impl RecurrenceRule {
    /// Create a rule with an end date and frequency, matching every weekday
    #[must_use]
    pub const fn new(end_date: NaiveDate, frequency: Frequency) -> Self {
        Self {
            end_date: Some(end_date),
            frequency,
            weekdays: WeekdaySet::new(),
        }
    }

    /// Restrict the rule to the given weekdays
    #[must_use]
    pub fn on(mut self, days: impl IntoIterator<Item = Weekday>) -> Self {
        self.weekdays = days.into_iter().collect();
        self
    }

    /// Build a rule from raw form input.
    ///
    /// A missing or blank end date is reported as
    /// [`RecurrenceError::MissingEndDate`].
    ///
    /// # Errors
    /// Returns an error if the end date is missing or cannot be parsed
    pub fn from_input(
        end_date: Option<&str>,
        frequency: Frequency,
        weekdays: WeekdaySet,
    ) -> Result<Self, RecurrenceError> {
        let end = end_date
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(RecurrenceError::MissingEndDate)?;
        Ok(Self {
            end_date: Some(parse_date(end)?),
            frequency,
            weekdays,
        })
    }

    /// Whether `day` is part of a series starting on `start`
    #[must_use]
    pub fn includes(&self, start: NaiveDate, day: NaiveDate) -> bool {
        match self.frequency {
            Frequency::Daily => true,
            Frequency::Weekly => self.weekdays.matches(day.weekday()),
            Frequency::BiWeekly => {
                let weeks = (day - start).num_days().div_euclid(7);
                weeks % 2 == 0 && self.weekdays.matches(day.weekday())
            }
        }
    }
}

/// Parse a `YYYY-MM-DD` date
///
/// # Errors
/// Returns [`RecurrenceError::InvalidDate`] if the string is not a valid date
pub fn parse_date(value: &str) -> Result<NaiveDate, RecurrenceError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| RecurrenceError::InvalidDate(value.to_string()))
}

/// Validate a single (non-recurring) entry before it is saved
///
/// # Errors
/// Returns [`RecurrenceError::NonPositiveHours`] if the hours are not positive
pub fn validate_entry(template: &ExperienceRecord) -> Result<(), RecurrenceError> {
    if template.hours.is_finite() && template.hours > 0.0 {
        Ok(())
    } else {
        Err(RecurrenceError::NonPositiveHours(template.hours))
    }
}

/// Expand a template into one record per qualifying day.
///
/// Days run from the template's date through the rule's end date, both
/// inclusive, in ascending order. Each produced record copies the template's
/// category, hours, location, and notes and carries its own date. A start
/// date after the end date yields an empty list.
///
/// # Errors
/// Returns an error if the hours are not positive or the end date is missing.
/// Validation happens before any record is produced.
pub fn expand(
    template: &ExperienceRecord,
    rule: &RecurrenceRule,
) -> Result<Vec<ExperienceRecord>, RecurrenceError> {
    validate_entry(template)?;
    let end = rule.end_date.ok_or(RecurrenceError::MissingEndDate)?;
    let start = template.date;

    let records: Vec<ExperienceRecord> = start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| rule.includes(start, *day))
        .map(|date| ExperienceRecord {
            date,
            ..template.clone()
        })
        .collect();

    crate::debug!(
        "Expanded {} recurring entry from {start} to {end} into {} record(s)",
        rule.frequency,
        records.len()
    );

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Category;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn template(start: NaiveDate) -> ExperienceRecord {
        ExperienceRecord::new(Category::Volunteer, start, 3.0, "Free Clinic".to_string())
            .with_notes("Intake desk")
    }

    #[test]
    fn test_weekly_monday_wednesday_example() {
        let rule =
            RecurrenceRule::new(date(2024, 6, 17), Frequency::Weekly).on([Weekday::Mon, Weekday::Wed]);
        let records = expand(&template(date(2024, 6, 3)), &rule).unwrap();

        let dates: Vec<NaiveDate> = records.iter().map(|r| r.date).collect();
        assert_eq!(
            dates,
            vec![
                date(2024, 6, 3),
                date(2024, 6, 5),
                date(2024, 6, 10),
                date(2024, 6, 12),
                date(2024, 6, 17),
            ]
        );
    }

    #[test]
    fn test_daily_count_is_inclusive_day_span() {
        let start = date(2024, 2, 20);
        for end in [date(2024, 2, 20), date(2024, 2, 29), date(2024, 3, 31), date(2025, 1, 1)] {
            let rule = RecurrenceRule::new(end, Frequency::Daily);
            let records = expand(&template(start), &rule).unwrap();
            let expected = usize::try_from((end - start).num_days() + 1).unwrap();
            assert_eq!(records.len(), expected);
        }
    }

    #[test]
    fn test_daily_ignores_weekday_selection() {
        let rule = RecurrenceRule::new(date(2024, 6, 9), Frequency::Daily).on([Weekday::Tue]);
        let records = expand(&template(date(2024, 6, 3)), &rule).unwrap();
        assert_eq!(records.len(), 7);
    }

    #[test]
    fn test_start_after_end_is_empty() {
        for frequency in [Frequency::Daily, Frequency::Weekly, Frequency::BiWeekly] {
            let rule = RecurrenceRule::new(date(2024, 6, 1), frequency);
            let records = expand(&template(date(2024, 6, 2)), &rule).unwrap();
            assert!(records.is_empty());
        }
    }

    #[test]
    fn test_weekly_empty_selection_matches_daily() {
        let start = date(2024, 1, 1);
        let end = date(2024, 4, 15);
        let daily = expand(&template(start), &RecurrenceRule::new(end, Frequency::Daily)).unwrap();
        let weekly = expand(&template(start), &RecurrenceRule::new(end, Frequency::Weekly)).unwrap();
        assert_eq!(daily.len(), weekly.len());
        assert_eq!(daily, weekly);
    }

    #[test]
    fn test_biweekly_single_weekday_every_fourteen_days() {
        // Start on a Wednesday and on a Saturday; the first Friday on/after the
        // start is always in week 0 and every later hit is 14 days apart.
        for start in [date(2024, 6, 5), date(2024, 6, 8)] {
            let rule = RecurrenceRule::new(date(2024, 9, 30), Frequency::BiWeekly).on([Weekday::Fri]);
            let records = expand(&template(start), &rule).unwrap();

            let first_friday = start
                .iter_days()
                .find(|d| d.weekday() == Weekday::Fri)
                .unwrap();
            assert_eq!(records[0].date, first_friday);
            for pair in records.windows(2) {
                assert_eq!((pair[1].date - pair[0].date).num_days(), 14);
            }
            assert!(records.iter().all(|r| r.date.weekday() == Weekday::Fri));
        }
    }

    #[test]
    fn test_biweekly_is_anchored_to_start_date() {
        let rule = RecurrenceRule::new(date(2024, 7, 31), Frequency::BiWeekly).on([Weekday::Mon]);

        let from_june_3 = expand(&template(date(2024, 6, 3)), &rule).unwrap();
        let from_june_10 = expand(&template(date(2024, 6, 10)), &rule).unwrap();

        assert_eq!(from_june_3[0].date, date(2024, 6, 3));
        assert_eq!(from_june_3[1].date, date(2024, 6, 17));
        assert_eq!(from_june_10[0].date, date(2024, 6, 10));
        assert_eq!(from_june_10[1].date, date(2024, 6, 24));
    }

    #[test]
    fn test_biweekly_empty_selection_takes_whole_even_weeks() {
        let rule = RecurrenceRule::new(date(2024, 6, 30), Frequency::BiWeekly);
        let records = expand(&template(date(2024, 6, 3)), &rule).unwrap();
        // Weeks 0 and 2: June 3-9 and June 17-23
        assert_eq!(records.len(), 14);
        assert_eq!(records[7].date, date(2024, 6, 17));
    }

    #[test]
    fn test_records_copy_template_fields() {
        let rule = RecurrenceRule::new(date(2024, 6, 5), Frequency::Daily);
        let base = template(date(2024, 6, 3));
        let records = expand(&base, &rule).unwrap();

        for record in &records {
            assert_eq!(record.category, base.category);
            assert_eq!(record.location, base.location);
            assert_eq!(record.notes, base.notes);
            assert!((record.hours - base.hours).abs() < f64::EPSILON);
        }
        assert!(records.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_missing_end_date_is_rejected() {
        let rule = RecurrenceRule {
            end_date: None,
            frequency: Frequency::Weekly,
            weekdays: WeekdaySet::new(),
        };
        assert_eq!(
            expand(&template(date(2024, 6, 3)), &rule),
            Err(RecurrenceError::MissingEndDate)
        );

        assert_eq!(
            RecurrenceRule::from_input(None, Frequency::Daily, WeekdaySet::new()),
            Err(RecurrenceError::MissingEndDate)
        );
        assert_eq!(
            RecurrenceRule::from_input(Some("  "), Frequency::Daily, WeekdaySet::new()),
            Err(RecurrenceError::MissingEndDate)
        );
    }

    #[test]
    fn test_unparseable_end_date_is_rejected() {
        let result = RecurrenceRule::from_input(Some("06/17/2024"), Frequency::Daily, WeekdaySet::new());
        assert_eq!(
            result,
            Err(RecurrenceError::InvalidDate("06/17/2024".to_string()))
        );

        let ok = RecurrenceRule::from_input(Some("2024-06-17"), Frequency::Daily, WeekdaySet::new());
        assert_eq!(ok.unwrap().end_date, Some(date(2024, 6, 17)));
    }

    #[test]
    fn test_non_positive_hours_are_rejected() {
        let rule = RecurrenceRule::new(date(2024, 6, 17), Frequency::Daily);
        for hours in [0.0, -1.5] {
            let mut base = template(date(2024, 6, 3));
            base.hours = hours;
            assert_eq!(expand(&base, &rule), Err(RecurrenceError::NonPositiveHours(hours)));
            assert!(validate_entry(&base).is_err());
        }
        assert!(validate_entry(&template(date(2024, 6, 3))).is_ok());
    }

    #[test]
    fn test_weekday_set_parsing() {
        let set: WeekdaySet = "mon, Wednesday ,fri".parse().unwrap();
        assert!(set.contains(Weekday::Mon));
        assert!(set.contains(Weekday::Wed));
        assert!(set.contains(Weekday::Fri));
        assert!(!set.contains(Weekday::Tue));
        assert!(!set.matches(Weekday::Sun));

        let empty: WeekdaySet = "".parse().unwrap();
        assert!(empty.is_empty());
        assert!(empty.matches(Weekday::Sun));

        assert!("mon,someday".parse::<WeekdaySet>().is_err());
    }

    #[test]
    fn test_frequency_parsing() {
        assert_eq!("Daily".parse::<Frequency>(), Ok(Frequency::Daily));
        assert_eq!("bi-weekly".parse::<Frequency>(), Ok(Frequency::BiWeekly));
        assert_eq!("biweekly".parse::<Frequency>(), Ok(Frequency::BiWeekly));
        assert!("monthly".parse::<Frequency>().is_err());
        assert_eq!(Frequency::BiWeekly.to_string(), "bi-weekly");
    }
}
