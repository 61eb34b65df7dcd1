//! Core domain: records, aggregations, recurrence expansion, prerequisite matching and storage

pub mod gpa;
pub mod hours;
pub mod models;
pub mod prerequisites;
pub mod recurrence;
pub mod store;

/// Returns the current version of the `prehealth-tracker` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
