use swipedeck_foundation::prelude::*;
use swipedeck_testing::prelude::*;
use swipedeck_testing::robot_assertions::{assert_labels, assert_never_exceeds, assert_row_at_rest};

fn robot(items: usize) -> SwipeRobot {
    init_test_logging();
    SwipeRobot::new(TestList::with_items(items))
}

#[test]
fn strong_swipe_dismisses_row_and_removes_item() {
    let mut robot = robot(4);
    let row = robot.list().row_at(1).expect("row 1");

    assert!(robot.swipe_row(1, 200.0, 80));
    robot.wait_for_idle();

    assert_eq!(robot.dismissed(), vec![row]);
    assert_labels(robot.list(), &["item 0", "item 2", "item 3"]);
    assert_eq!(robot.list().removed(), vec!["item 1"]);
    assert_eq!(robot.manager().active_animation_count(), 0);
    assert!(robot.frame_requests() > 0);
}

#[test]
fn dismissal_fires_once_even_after_more_frames() {
    let mut robot = robot(2);
    robot.swipe_row(0, 220.0, 80);
    robot.wait_for_idle();
    robot.pump_frames(30);
    assert_eq!(robot.dismissed().len(), 1);
    assert_eq!(robot.list().item_count(), 1);
}

#[test]
fn weak_swipe_springs_back() {
    let mut robot = robot(3);
    let row = robot.list().row_at(0).expect("row 0");

    robot.swipe_row(0, 60.0, 90);
    assert_eq!(robot.manager().phase(row), SwipePhase::Flinging);
    robot.wait_for_idle();

    assert!(robot.dismissed().is_empty());
    assert_row_at_rest(robot.list(), row);
    assert_eq!(robot.list().item_count(), 3);
}

#[test]
fn fling_in_wider_container_is_capped_and_returns() {
    init_test_logging();
    let list = TestList::new(["a", "b"], 300.0, 400.0, 100.0);
    let mut robot = SwipeRobot::new(list);
    let row = robot.list().row_at(0).expect("row 0");

    robot.swipe_row(0, 250.0, 50);
    let mut fling = Vec::new();
    while robot.manager().phase(row) == SwipePhase::Flinging {
        robot.pump_frame();
        fling.push(robot.list().row_translation_x(row));
    }
    assert_never_exceeds(&fling, 300.0, "fling offset");
    assert_eq!(robot.manager().phase(row), SwipePhase::Settling);

    robot.wait_for_idle();
    assert!(robot.dismissed().is_empty());
    assert_row_at_rest(robot.list(), row);
}

#[test]
fn leftward_release_settles_without_dismissal() {
    let mut robot = robot(2);
    let row = robot.list().row_at(0).expect("row 0");
    let y = robot.list().row_center(0).y;

    robot.press(100.0, y);
    robot.move_to(130.0, y);
    robot.move_to(150.0, y);
    robot.move_to(130.0, y);
    robot.move_to(110.0, y);
    robot.release();
    assert_eq!(robot.manager().phase(row), SwipePhase::Settling);

    let samples = robot.record_translation(row);
    assert!(!samples.is_empty());
    assert!(robot.dismissed().is_empty());
    assert_row_at_rest(robot.list(), row);
}

#[test]
fn vertical_scroll_is_left_to_the_list() {
    let mut robot = robot(3);
    let consumed = robot.swipe(Point::new(150.0, 20.0), Point::new(152.0, 260.0), 8, 80);

    assert!(!consumed);
    assert_eq!(robot.list().scroll_moves(), 8);
    for index in 0..3 {
        let row = robot.list().row_at(index).expect("row");
        assert_row_at_rest(robot.list(), row);
    }
    assert!(!robot.runtime().has_frame_callbacks());
}

#[test]
fn swipe_over_empty_space_binds_nothing() {
    let mut robot = robot(1);
    let consumed = robot.swipe(Point::new(10.0, 250.0), Point::new(250.0, 250.0), 8, 80);
    assert!(!consumed);
    assert!(robot.dismissed().is_empty());
    assert_eq!(robot.manager().active_animation_count(), 0);
}

#[test]
fn removing_an_animating_row_resets_it() {
    let mut robot = robot(3);
    let row = robot.list().row_at(1).expect("row 1");
    robot.swipe_row(1, 60.0, 90);
    robot.pump_frames(3);
    assert!(robot.manager().phase(row).is_animating());

    assert!(robot.list().remove_item(1));

    assert_eq!(robot.list().row_translation_x(row), 0.0);
    assert_eq!(robot.manager().active_animation_count(), 0);
    robot.wait_for_idle();
    assert!(robot.dismissed().is_empty());
    assert!(!robot.list().remove_item(5));
}

#[test]
fn rebinding_an_animating_row_cancels_its_animation() {
    let mut robot = robot(2);
    let old = robot.list().row_at(0).expect("row 0");
    robot.swipe_row(0, 60.0, 90);
    robot.pump_frames(2);

    let new = robot.list().rebind_row(0).expect("rebound");

    assert_eq!(robot.manager().phase(old), SwipePhase::Idle);
    assert_eq!(robot.manager().active_animation_count(), 0);
    robot.wait_for_idle();
    assert_row_at_rest(robot.list(), new);
}

#[test]
fn consecutive_dismissals_remove_distinct_items() {
    let mut robot = robot(4);
    robot.swipe_row(0, 220.0, 80);
    robot.wait_for_idle();
    robot.swipe_row(0, 220.0, 80);
    robot.wait_for_idle();

    let dismissed = robot.dismissed();
    assert_eq!(dismissed.len(), 2);
    assert_ne!(dismissed[0], dismissed[1]);
    assert_labels(robot.list(), &["item 2", "item 3"]);
}

#[test]
fn two_rows_animate_at_once() {
    let mut robot = robot(3);
    robot.swipe_row(0, 60.0, 90);
    robot.swipe_row(2, 60.0, 90);
    assert_eq!(robot.manager().active_animation_count(), 2);
    robot.wait_for_idle();
    assert_eq!(robot.manager().active_animation_count(), 0);
    assert_eq!(robot.list().item_count(), 3);
}

#[test]
fn cancel_mid_drag_releases_like_up() {
    let mut robot = robot(2);
    let row = robot.list().row_at(0).expect("row 0");
    let y = robot.list().row_center(0).y;
    robot.press(10.0, y);
    robot.move_to(20.0, y);
    robot.move_to(30.0, y);
    assert!(robot.cancel());
    assert_eq!(robot.manager().phase(row), SwipePhase::Flinging);
    robot.wait_for_idle();
    assert!(robot.dismissed().is_empty());
    assert_row_at_rest(robot.list(), row);
}

#[test]
fn detach_mid_animation_stops_everything() {
    let mut robot = robot(2);
    let row = robot.list().row_at(0).expect("row 0");
    robot.swipe_row(0, 60.0, 90);
    robot.pump_frames(2);

    robot.manager().detach().expect("detach");

    assert!(!robot.runtime().has_frame_callbacks());
    assert_row_at_rest(robot.list(), row);
    assert_eq!(robot.list().touch_listener_count(), 0);
    assert_eq!(robot.list().attach_listener_count(), 0);
    assert!(!robot.swipe_row(0, 200.0, 80));
    assert_eq!(robot.manager().detach(), Err(SwipeError::NotAttached));
}

#[test]
fn manager_reattaches_after_detach() {
    let mut robot = robot(2);
    robot.manager().detach().expect("detach");
    let list = robot.list().clone();
    robot.manager().attach(&list).expect("reattach");
    assert_eq!(
        robot.manager().attach(&list),
        Err(SwipeError::AlreadyAttached)
    );

    robot.swipe_row(0, 220.0, 80);
    robot.wait_for_idle();
    assert_eq!(robot.dismissed().len(), 1);
}
