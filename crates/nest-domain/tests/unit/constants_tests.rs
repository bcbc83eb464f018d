//! Tests for domain constants

use nest_domain::constants::*;

#[test]
fn test_scorer_bounds_leave_room_for_parameter_counts() {
    assert_eq!(INJECT_CONSTRUCTOR_SCORE, i64::MAX);
    assert!(UNSATISFIABLE_CONSTRUCTOR_BASE + 1_000 < 1);
}

#[test]
fn test_default_depth_is_positive() {
    assert!(DEFAULT_MAX_RESOLUTION_DEPTH > 0);
    assert_eq!(ROOT_SCOPE_NAME, "root");
}
