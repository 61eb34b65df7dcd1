//! Integration tests for logger behavior.

use prehealth_tracker::logger::{set_level, set_level_from_str, Level};
use prehealth_tracker::{debug, error, info, verbose, warn};

#[test]
fn level_parse_accepts_valid() {
    assert!(set_level_from_str("error"));
    assert!(set_level_from_str("warn"));
    assert!(set_level_from_str("INFO"));
    assert!(set_level_from_str("debug"));
}

#[test]
fn level_parse_rejects_invalid() {
    assert!(!set_level_from_str("invalid"));
    assert!(!set_level_from_str(""));
}

#[test]
fn logs_do_not_panic() {
    set_level(Level::Debug);
    info!("info integration");
    warn!("warn integration");
    error!("error integration");
    debug!("debug integration");
    verbose!("verbose integration");
}

#[cfg(feature = "file-logging")]
#[test]
fn file_logging_writes_tagged_lines() {
    use prehealth_tracker::logger::init_file_logging;
    use tempfile::TempDir;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("logs").join("prehealth.log");

    assert!(init_file_logging(&path));
    error!("written to file");

    let contents = std::fs::read_to_string(&path).expect("log file should exist");
    assert!(contents.contains("[ERROR] written to file"));
}
