//! CLI command handlers for `prehealth`.
//!
//! Each subcommand is implemented in its own submodule. Handlers print `✓`/`✗`
//! status lines and exit non-zero on failure.

pub mod config;
pub mod goals;
pub mod gpa;
pub mod hours;
pub mod log;
pub mod prereqs;

use prehealth_tracker::core::store::StoreError;

/// Unwrap a snapshot load, or report the failure and exit
pub fn load_or_exit<T>(result: Result<T, StoreError>, what: &str) -> T {
    result.unwrap_or_else(|e| {
        eprintln!("✗ Failed to load {what}: {e}");
        std::process::exit(1);
    })
}
