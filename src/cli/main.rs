//! Command-line interface entry point for `prehealth`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use prehealth_tracker::config::Config;
use prehealth_tracker::core::store::CsvStore;
use prehealth_tracker::info;
use prehealth_tracker::logger::{
    enable_debug, enable_verbose, init_file_logging, set_level, Level,
};

fn main() {
    let args = Cli::parse();

    // Overrides apply to this run only; `config` edits the stored values
    let stored = Config::load();
    let defaults = Config::from_defaults();
    let mut config = stored.clone();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config; fallback warn
    let mut level = Level::parse(&config.logging.level).unwrap_or(Level::Warn);
    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    if !config.logging.file.is_empty() {
        let log_path = std::path::PathBuf::from(&config.logging.file);
        let display_path = log_path.to_string_lossy();
        if init_file_logging(&log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    let store = CsvStore::new(config.data_dir());

    match args.command {
        Command::Config { subcommand } => {
            let mut stored = stored;
            commands::config::run(subcommand, &mut stored, &defaults);
        }
        Command::Gpa {
            science_only,
            by_term,
        } => commands::gpa::run(&store, science_only, by_term),
        Command::Hours { all } => commands::hours::run(&store, all),
        Command::Goals { subcommand } => commands::goals::run(&store, subcommand),
        Command::Log(log_args) => commands::log::run(&store, &log_args),
        Command::Prereqs => commands::prereqs::run(&store, config.track()),
    }
}
