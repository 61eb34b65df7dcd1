//! Goals command handler

use super::load_or_exit;
use crate::args::GoalsSubcommand;
use prehealth_tracker::core::models::GoalMap;
use prehealth_tracker::core::store::RecordStore;

/// List goals, or set/clear one category's goal
pub fn run(store: &impl RecordStore, subcommand: Option<GoalsSubcommand>) {
    let mut goals = load_or_exit(store.goals(), "goals");

    match subcommand {
        None => print_goals(&goals),
        Some(GoalsSubcommand::Set { category, hours }) => {
            goals.set(category, hours);
            save(store, &goals);
            println!("✓ Goal for {category} set to {hours} hour(s)");
        }
        Some(GoalsSubcommand::Unset { category }) => {
            goals.set(category, 0);
            save(store, &goals);
            println!("✓ Goal for {category} cleared");
        }
    }
}

fn print_goals(goals: &GoalMap) {
    println!("\n=== Hour Goals ===\n");
    if goals.is_empty() {
        println!("No goals set");
        return;
    }
    for (category, hours) in goals.iter() {
        println!("{:<24} {hours}", category.name());
    }
    println!("\n{:<24} {}", "Total", goals.total());
}

fn save(store: &impl RecordStore, goals: &GoalMap) {
    if let Err(e) = store.save_goals(goals) {
        eprintln!("✗ Failed to save goals: {e}");
        std::process::exit(1);
    }
}
