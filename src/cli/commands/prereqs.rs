//! Prerequisites command handler

use super::load_or_exit;
use prehealth_tracker::core::models::{CourseRecord, Track};
use prehealth_tracker::core::prerequisites::{
    check_prerequisites, PrerequisiteReport, PrerequisiteStatus, RequirementTable,
};
use prehealth_tracker::core::store::RecordStore;
use prehealth_tracker::verbose;

/// Print prerequisite completion for `track` using completed courses
pub fn run(store: &impl RecordStore, track: Track) {
    let courses = load_or_exit(store.courses(), "courses");
    let completed: Vec<CourseRecord> = courses
        .into_iter()
        .filter(CourseRecord::is_completed)
        .collect();
    verbose!("{} completed course(s)", completed.len());

    match check_prerequisites(RequirementTable::builtin(), track, &completed) {
        PrerequisiteStatus::NotApplicable(track) => {
            println!("No prerequisite requirements are defined for the {track} track");
        }
        PrerequisiteStatus::Report(report) => print_report(&report),
    }
}

fn print_report(report: &PrerequisiteReport<'_>) {
    println!("\n=== {} Prerequisites ===", report.track);
    for category in &report.categories {
        println!("\n{}", category.name);
        for slot in &category.requirements {
            match slot.satisfied_by {
                Some(course) => println!(
                    "  ✓ {:<40} {} {}",
                    slot.requirement.name, course.code, course.name
                ),
                None => println!("  ✗ {}", slot.requirement.name),
            }
        }
    }

    println!(
        "\n{} of {} requirement(s) satisfied",
        report.satisfied, report.total
    );
    if report.is_complete() {
        println!("✓ All prerequisites complete");
    }
}
