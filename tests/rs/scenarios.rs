//! End-to-end scenarios: snapshots on disk through the aggregators, expander and matcher

use chrono::{Datelike, NaiveDate, Weekday};
use prehealth_tracker::core::gpa::{calculate_gpa, group_by_term, Gpa, GpaSummary};
use prehealth_tracker::core::hours::aggregate_hours;
use prehealth_tracker::core::models::{Category, CourseRecord, ExperienceRecord, GoalMap, Track};
use prehealth_tracker::core::prerequisites::{
    check_prerequisites, PrerequisiteStatus, RequirementTable,
};
use prehealth_tracker::core::recurrence::{expand, Frequency, RecurrenceError, RecurrenceRule};
use prehealth_tracker::core::store::{CsvStore, RecordStore, COURSES_FILE, EXPERIENCES_FILE};
use std::collections::HashSet;
use std::fs;
use tempfile::TempDir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn store_with(files: &[(&str, &str)]) -> (TempDir, CsvStore) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    for (name, contents) in files {
        fs::write(dir.path().join(name), contents).expect("Failed to write snapshot");
    }
    let store = CsvStore::new(dir.path());
    (dir, store)
}

#[test]
fn gpa_from_course_snapshot() {
    let (_dir, store) = store_with(&[(
        COURSES_FILE,
        "name,code,credits,grade,semester,year,is_science\n\
         General Chemistry I,CHEM 101,4,A,Fall,2023,true\n\
         Psychology 101,PSYC 101,3,B+,Fall,2023,false\n\
         Seminar,SEM 100,1,P,Spring,2024,false\n\
         Mystery,MYS 1,abc,A,Spring,2024,true\n",
    )]);

    let courses = store.courses().expect("courses should load");
    assert_eq!(courses.len(), 4);

    let summary = GpaSummary::from_courses(&courses);
    assert_eq!(summary.cumulative.to_string(), "3.70");
    assert_eq!(summary.science.to_string(), "4.00");

    // Spring 2024 only has a pass grade and a course with unreadable credits
    let terms = group_by_term(&courses);
    assert_eq!(terms[0].label(), "Spring 2024");
    assert_eq!(terms[0].gpa(false), Gpa::NotAvailable);
    assert_eq!(terms[1].label(), "Fall 2023");
    assert_eq!(terms[1].gpa(false).to_string(), "3.70");
}

#[test]
fn gpa_is_order_invariant_and_never_divides_by_zero() {
    let mut courses = vec![
        CourseRecord::new("Organic Chemistry I", "CHEM 201", 4.0, "B-").science(),
        CourseRecord::new("English Composition", "ENGL 101", 3.0, "A-"),
        CourseRecord::new("Physics I", "PHYS 101", 4.0, "C+").science(),
        CourseRecord::new("Statistics", "STAT 200", 3.0, "A"),
    ];
    let forward = calculate_gpa(&courses, false);
    courses.reverse();
    assert_eq!(calculate_gpa(&courses, false), forward);
    courses.rotate_left(1);
    assert_eq!(calculate_gpa(&courses, false), forward);

    let uncounted = vec![
        CourseRecord::new("Lab Safety", "LAB 1", 1.0, "P"),
        CourseRecord::new("Audit", "AUD 1", 0.0, "A"),
        CourseRecord::new("Typo", "TYP 1", 3.0, "Z"),
    ];
    assert_eq!(calculate_gpa(&uncounted, false), Gpa::NotAvailable);
    assert_eq!(calculate_gpa(&uncounted, false).to_string(), "N/A");
}

#[test]
fn hours_against_goals_from_snapshots() {
    let (_dir, store) = store_with(&[
        (
            EXPERIENCES_FILE,
            "category,date,hours,location,notes\n\
             Research,2024-01-10,25,Lab,\n\
             Research,2024-01-17,15,Lab,poster prep\n\
             Shadowing,2024-02-01,12,Clinic,\n\
             Volunteer,2024-02-03,lots,Food bank,\n\
             Gardening,2024-02-04,5,Park,\n",
        ),
        (
            "goals.toml",
            "\"Research\" = 150\n\"Shadowing\" = 10\n\"Patient Care Experience\" = 0\n",
        ),
    ]);

    let records = store.experiences().expect("experiences should load");
    // Unknown category rejected at the boundary
    assert_eq!(records.len(), 4);
    let goals = store.goals().expect("goals should load");
    let summary = aggregate_hours(&records, &goals);

    let research = summary.get(Category::Research).expect("research row");
    assert!((research.hours - 40.0).abs() < 1e-9);
    assert_eq!(format!("{:.2}", research.percent), "26.67");

    let shadowing = summary.get(Category::Shadowing).expect("shadowing row");
    assert!((shadowing.percent - 100.0).abs() < f64::EPSILON);

    let patient_care = summary.get(Category::PatientCare).expect("patient care row");
    assert!(patient_care.percent.abs() < f64::EPSILON);

    let active: Vec<Category> = summary.active().map(|p| p.category).collect();
    assert_eq!(active, vec![Category::Research, Category::Shadowing]);

    // Unparseable hours count as zero
    assert!((summary.total_hours - 52.0).abs() < 1e-9);
    assert_eq!(summary.total_goal, 160);
}

#[test]
fn weekly_series_is_expanded_and_saved_together() {
    let (dir, store) = store_with(&[]);
    let template = ExperienceRecord::new(
        Category::PatientCare,
        date(2024, 6, 3),
        4.0,
        "St. Mary's ED".to_string(),
    )
    .with_notes("scribe shift");
    let rule = RecurrenceRule::new(date(2024, 6, 17), Frequency::Weekly)
        .on([Weekday::Mon, Weekday::Wed]);

    let records = expand(&template, &rule).expect("valid template");
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

    assert_eq!(store.append_experiences(&records).expect("batch saves"), 5);
    let loaded = store.experiences().expect("experiences reload");
    assert_eq!(loaded, records);

    // A second batch lands after the first under a single header
    let more = expand(
        &ExperienceRecord::new(Category::Volunteer, date(2024, 7, 1), 2.0, "Shelter".to_string()),
        &RecurrenceRule::new(date(2024, 7, 2), Frequency::Daily),
    )
    .expect("valid template");
    store.append_experiences(&more).expect("second batch saves");
    assert_eq!(store.experiences().expect("reload").len(), 7);

    let raw = fs::read_to_string(dir.path().join(EXPERIENCES_FILE)).expect("snapshot exists");
    assert_eq!(raw.matches("category,date,hours,location,notes").count(), 1);
}

#[test]
fn invalid_series_saves_nothing() {
    let (dir, store) = store_with(&[]);
    let template = ExperienceRecord::new(Category::Research, date(2024, 6, 3), 0.0, String::new());
    let rule = RecurrenceRule::new(date(2024, 6, 30), Frequency::Daily);

    let result = expand(&template, &rule);
    assert_eq!(result, Err(RecurrenceError::NonPositiveHours(0.0)));
    assert!(RecurrenceRule::from_input(Some(" "), Frequency::Weekly, Default::default())
        .is_err_and(|e| e == RecurrenceError::MissingEndDate));

    assert!(store.experiences().expect("empty snapshot").is_empty());
    assert!(!dir.path().join(EXPERIENCES_FILE).exists());
}

#[test]
fn recurrence_counts() {
    let template =
        ExperienceRecord::new(Category::Shadowing, date(2024, 2, 26), 1.5, String::new());
    let end = date(2024, 3, 31);
    let span = usize::try_from((end - template.date).num_days() + 1).expect("positive span");

    let daily = expand(&template, &RecurrenceRule::new(end, Frequency::Daily)).expect("daily");
    let weekly_all =
        expand(&template, &RecurrenceRule::new(end, Frequency::Weekly)).expect("weekly");
    assert_eq!(daily.len(), span);
    assert_eq!(weekly_all.len(), span);

    let backwards = expand(
        &template,
        &RecurrenceRule::new(date(2024, 2, 1), Frequency::Daily),
    )
    .expect("empty is not an error");
    assert!(backwards.is_empty());

    // Start is a Monday; first Thursday is 2024-02-29, then every 14 days
    let biweekly = expand(
        &template,
        &RecurrenceRule::new(end, Frequency::BiWeekly).on([Weekday::Thu]),
    )
    .expect("bi-weekly");
    let dates: Vec<NaiveDate> = biweekly.iter().map(|r| r.date).collect();
    assert_eq!(dates, vec![date(2024, 2, 29), date(2024, 3, 14), date(2024, 3, 28)]);
    assert!(dates.iter().all(|d| d.weekday() == Weekday::Thu));
}

#[test]
fn prerequisites_from_completed_courses() {
    let courses = vec![
        CourseRecord::new("General Chemistry I", "CHEM 101", 4.0, "A").science(),
        CourseRecord::new("General Chemistry II", "CHEM 102", 4.0, "B+").science(),
        CourseRecord::new("Organic Chemistry I", "CHEM 201", 4.0, "F").science(),
        CourseRecord::new("Introduction to Psychology", "PSYC 101", 3.0, "A"),
        CourseRecord::new("Principles of Biology", "BIO 110", 4.0, "P").science(),
    ];
    let completed: Vec<CourseRecord> = courses
        .into_iter()
        .filter(CourseRecord::is_completed)
        .collect();

    let table = RequirementTable::builtin();
    let PrerequisiteStatus::Report(report) =
        check_prerequisites(table, Track::PreMed, &completed)
    else {
        panic!("Pre-Med has requirements");
    };

    assert!(report.satisfied <= report.total);
    assert_eq!(report.satisfied, 4);
    assert!(!report.is_complete());

    let mut used = HashSet::new();
    for slot in report.categories.iter().flat_map(|c| c.requirements.iter()) {
        if let Some(course) = slot.satisfied_by {
            assert!(used.insert(course.code.clone()), "{} used twice", course.code);
        }
    }
    assert!(!used.contains("CHEM 201"));

    assert_eq!(
        check_prerequisites(table, Track::Other, &completed),
        PrerequisiteStatus::NotApplicable(Track::Other)
    );
}

#[test]
fn goals_round_trip_through_store() {
    let (_dir, store) = store_with(&[]);
    let goals = GoalMap::new()
        .with(Category::PatientCare, 500)
        .with(Category::Volunteer, 100);

    store.save_goals(&goals).expect("goals save");
    assert_eq!(store.goals().expect("goals load"), goals);
}

#[test]
fn hours_summary_survives_damaged_snapshots() {
    let (dir, store) = store_with(&[(
        "goals.toml",
        "\"Research\" = 100\n\"Shadowing\" = 12.5\n",
    )]);
    fs::write(
        dir.path().join(EXPERIENCES_FILE),
        b"category,date,hours,location,notes\n\
          Research,2024-01-10,25,Lab,\n\
          Research,2024-01-11,5,Lab,\xff\xfe\n\
          Research,2024-01-17,25,Lab,\n",
    )
    .expect("Failed to write snapshot");

    let records = store.experiences().expect("damaged rows are skipped");
    let goals = store.goals().expect("non-integer goals are skipped");
    let summary = aggregate_hours(&records, &goals);

    let research = summary.get(Category::Research).expect("research row");
    assert!((research.hours - 50.0).abs() < 1e-9);
    assert!((research.percent - 50.0).abs() < 1e-9);
    assert_eq!(summary.total_goal, 100);
}
