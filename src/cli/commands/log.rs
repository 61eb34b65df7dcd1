//! Log command handler

use crate::args::LogArgs;
use prehealth_tracker::core::models::ExperienceRecord;
use prehealth_tracker::core::recurrence::{
    expand, parse_date, validate_entry, RecurrenceError, RecurrenceRule,
};
use prehealth_tracker::core::store::RecordStore;
use prehealth_tracker::{verbose, warn};

/// Validate, expand and save one entry or a recurring series
pub fn run(store: &impl RecordStore, args: &LogArgs) {
    let records = match build_records(args) {
        Ok(records) => records,
        Err(e) => {
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    };

    if records.is_empty() {
        println!("✗ No dates fall between the start and end date; nothing saved");
        return;
    }

    for record in &records {
        verbose!(
            "  {} {} {}h {}",
            record.date,
            record.category,
            record.hours,
            record.location
        );
    }

    if args.dry_run {
        println!("Would save {} entr(ies) (dry run)", records.len());
        return;
    }

    match store.append_experiences(&records) {
        Ok(saved) => println!("✓ Saved {saved} {} entr(ies)", args.category),
        Err(e) => {
            eprintln!("✗ Failed to save entries, nothing was written: {e}");
            std::process::exit(1);
        }
    }
}

/// Turn the log arguments into the dated entries to save
pub(crate) fn build_records(
    args: &LogArgs,
) -> Result<Vec<ExperienceRecord>, RecurrenceError> {
    let date = parse_date(&args.date)?;
    let location = args.location.clone().unwrap_or_default();
    let mut template = ExperienceRecord::new(args.category, date, args.hours, location);
    if let Some(notes) = args.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        template = template.with_notes(notes);
    }

    let Some(frequency) = args.repeat else {
        if args.until.is_some() || args.on.is_some() {
            warn!("--until and --on only apply with --repeat; saving a single entry");
        }
        validate_entry(&template)?;
        return Ok(vec![template]);
    };

    let weekdays = args.on.unwrap_or_default();
    let rule = RecurrenceRule::from_input(args.until.as_deref(), frequency, weekdays)?;
    expand(&template, &rule)
}
