//! CLI argument definitions for `prehealth`

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use prehealth_tracker::config::ConfigOverrides;
use prehealth_tracker::core::models::{Category, Track};
use prehealth_tracker::core::recurrence::{Frequency, WeekdaySet};
use prehealth_tracker::logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `logger::Level`
/// for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `track`, `data_dir`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum GoalsSubcommand {
    /// Set the hour goal for a category.
    Set {
        /// Experience category (e.g., "Patient Care")
        #[arg(value_name = "CATEGORY")]
        category: Category,
        /// Target hours
        #[arg(value_name = "HOURS")]
        hours: u32,
    },
    /// Clear the hour goal for a category.
    Unset {
        /// Experience category
        #[arg(value_name = "CATEGORY")]
        category: Category,
    },
}

/// Options for logging one experience entry, optionally recurring
#[derive(Debug, clap::Args)]
pub struct LogArgs {
    /// Experience category (Patient Care, Healthcare, Research, Shadowing, Volunteer, Other)
    #[arg(short, long)]
    pub category: Category,

    /// Date of the entry, or first date of a recurring series (YYYY-MM-DD)
    #[arg(short, long, value_name = "DATE")]
    pub date: String,

    /// Hours per entry (must be greater than zero)
    #[arg(long = "hours", value_name = "HOURS", allow_negative_numbers = true)]
    pub hours: f64,

    /// Where the experience took place
    #[arg(short, long)]
    pub location: Option<String>,

    /// Free-form notes
    #[arg(short, long)]
    pub notes: Option<String>,

    /// Repeat the entry (daily, weekly, bi-weekly)
    #[arg(long, value_name = "FREQUENCY")]
    pub repeat: Option<Frequency>,

    /// Last date of the series, inclusive (YYYY-MM-DD); required with --repeat
    #[arg(long, value_name = "DATE")]
    pub until: Option<String>,

    /// Weekdays for weekly and bi-weekly series (e.g., mon,wed,fri); all days when omitted
    #[arg(long, value_name = "DAYS")]
    pub on: Option<WeekdaySet>,

    /// Show the entries that would be saved without saving them
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Show cumulative and science (BCPM) GPA.
    Gpa {
        /// Only show the science GPA
        #[arg(long)]
        science_only: bool,

        /// Break the GPA down by term, newest first
        #[arg(long)]
        by_term: bool,
    },
    /// Show experience hours against goals.
    Hours {
        /// Include categories without a goal
        #[arg(long)]
        all: bool,
    },
    /// Show or edit hour goals.
    ///
    /// If no subcommand is provided, lists the current goals.
    Goals {
        #[command(subcommand)]
        subcommand: Option<GoalsSubcommand>,
    },
    /// Log an experience entry, optionally as a recurring series.
    Log(LogArgs),
    /// Show prerequisite completion for a program track.
    ///
    /// Uses the configured track unless `--track` is given.
    Prereqs,
}

#[derive(Parser, Debug)]
#[command(
    name = "prehealth",
    about = "Pre-health experience, GPA and prerequisite tracker",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override the data directory for this run
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Override the configured program track for this run
    #[arg(long = "track", value_name = "TRACK", global = true)]
    pub track: Option<Track>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.log_level.map(|lvl| lvl.to_string()),
            file: self
                .log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.verbose.then_some(true),
            track: self.track.map(|t| t.name().to_string()),
            data_dir: self
                .data_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
        }
    }
}
