//! Integration smoke tests for `prehealth_tracker`

use prehealth_tracker::core::prerequisites::RequirementTable;
use prehealth_tracker::core::models::Track;
use prehealth_tracker::get_version;

#[test]
fn version_is_not_empty() {
    let v = get_version();
    assert!(!v.trim().is_empty());
}

#[test]
fn builtin_requirement_table_loads() {
    let table = RequirementTable::builtin();
    for track in [Track::PreMed, Track::PrePa, Track::PreDental] {
        let requirements = table
            .for_track(track)
            .unwrap_or_else(|| panic!("{track} should have requirements"));
        assert!(requirements.requirement_count() > 0);
    }
    assert!(table.for_track(Track::Other).is_none());
}
