//! Assertion helpers for swipe robot tests.

use swipedeck_foundation::{RowId, SwipeableList};

use crate::list::TestList;

/// Assert that a value is within `tolerance` of `expected`.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert that `row` sits at offset 0 and may be recycled.
pub fn assert_row_at_rest(list: &TestList, row: RowId) {
    assert_eq!(
        list.row_translation_x(row),
        0.0,
        "{row} should be back at offset 0"
    );
    assert!(list.is_recyclable(row), "{row} should be recyclable");
}

/// Assert that no sample exceeds `limit`.
pub fn assert_never_exceeds(samples: &[f32], limit: f32, msg: &str) {
    if let Some(worst) = samples.iter().cloned().reduce(f32::max) {
        assert!(worst <= limit, "{msg}: reached {worst}, limit {limit}");
    }
}

/// Assert that the list shows exactly `expected`, in order.
pub fn assert_labels(list: &TestList, expected: &[&str]) {
    let labels = list.labels();
    assert_eq!(labels, expected, "list contents");
}
