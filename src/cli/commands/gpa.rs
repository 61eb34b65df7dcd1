//! GPA command handler

use super::load_or_exit;
use prehealth_tracker::core::gpa::{calculate_gpa, group_by_term, GpaSummary};
use prehealth_tracker::core::store::RecordStore;
use prehealth_tracker::verbose;

/// Print cumulative and science GPA, optionally broken down by term
pub fn run(store: &impl RecordStore, science_only: bool, by_term: bool) {
    let courses = load_or_exit(store.courses(), "courses");
    verbose!("Loaded {} course record(s)", courses.len());

    if by_term {
        println!("\n=== GPA by Term ===\n");
        for term in group_by_term(&courses) {
            println!(
                "{:<14} {:>5}  ({} course(s), {} credit(s))",
                term.label(),
                term.gpa(science_only),
                term.courses.len(),
                term.credits()
            );
        }
        println!();
    }

    if science_only {
        println!("Science GPA: {}", calculate_gpa(&courses, true));
        return;
    }

    let summary = GpaSummary::from_courses(&courses);
    println!("Cumulative GPA: {}", summary.cumulative);
    println!("Science GPA:    {}", summary.science);
}
