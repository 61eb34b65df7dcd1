//! Library for `prehealth-tracker`
//! Tracks clinical experience hours, coursework GPA, recurring log entries
//! and prerequisite coverage for pre-health students.

pub mod config;
pub mod core;
pub mod logger;

pub use self::core::get_version;
