//! Hours command handler

use super::load_or_exit;
use prehealth_tracker::core::hours::{aggregate_hours, CategoryProgress};
use prehealth_tracker::core::store::RecordStore;
use prehealth_tracker::verbose;

/// Print per-category hours against goals and the overall total
pub fn run(store: &impl RecordStore, all: bool) {
    let records = load_or_exit(store.experiences(), "experiences");
    let goals = load_or_exit(store.goals(), "goals");
    verbose!("Loaded {} experience record(s)", records.len());

    let summary = aggregate_hours(&records, &goals);

    println!("\n=== Experience Hours ===\n");
    let rows: Vec<&CategoryProgress> = if all {
        summary.categories.iter().collect()
    } else {
        summary.active().collect()
    };
    if rows.is_empty() {
        println!("No hour goals set. Use `prehealth goals set <CATEGORY> <HOURS>`.");
    }
    for progress in rows {
        println!(
            "{:<24} {:>8.1} / {:<6} {:>6.1}%",
            progress.category.name(),
            progress.hours,
            progress.goal,
            progress.percent
        );
    }

    println!(
        "\n{:<24} {:>8.1} / {:<6} {:>6.1}%",
        "Total", summary.total_hours, summary.total_goal, summary.total_percent
    );
}
