use super::*;
use crate::frame_clock::FrameCallbackRegistration;

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

fn runtime() -> Runtime {
    Runtime::new(Arc::new(DefaultScheduler))
}

#[test]
fn frame_callback_runs_once_with_frame_time() {
    let runtime = runtime();
    let seen = Rc::new(Cell::new(None));
    let seen_clone = Rc::clone(&seen);
    let _registration = runtime
        .frame_clock()
        .with_frame_nanos(move |time| seen_clone.set(Some(time)));

    assert!(runtime.needs_frame());
    runtime.drain_frame_callbacks(42);
    assert_eq!(seen.get(), Some(42));

    seen.set(None);
    runtime.drain_frame_callbacks(84);
    assert_eq!(seen.get(), None, "callbacks are one-shot");
    assert!(!runtime.needs_frame());
}

#[test]
fn dropping_registration_cancels_callback() {
    let runtime = runtime();
    let fired = Rc::new(Cell::new(false));
    let fired_clone = Rc::clone(&fired);
    let registration = runtime
        .frame_clock()
        .with_frame_nanos(move |_| fired_clone.set(true));

    drop(registration);
    runtime.drain_frame_callbacks(16);

    assert!(!fired.get());
    assert!(!runtime.has_frame_callbacks());
}

#[test]
fn callback_registered_during_drain_waits_for_next_frame() {
    let runtime = runtime();
    let clock = runtime.frame_clock();
    let times = Rc::new(RefCell::new(Vec::new()));
    let keep: Rc<RefCell<Vec<FrameCallbackRegistration>>> = Rc::new(RefCell::new(Vec::new()));

    let times_outer = Rc::clone(&times);
    let keep_outer = Rc::clone(&keep);
    let clock_inner = clock.clone();
    let registration = clock.with_frame_nanos(move |time| {
        times_outer.borrow_mut().push(time);
        let times_inner = Rc::clone(&times_outer);
        let next = clock_inner.with_frame_nanos(move |time| times_inner.borrow_mut().push(time));
        keep_outer.borrow_mut().push(next);
    });
    keep.borrow_mut().push(registration);

    runtime.drain_frame_callbacks(1);
    assert_eq!(times.borrow().as_slice(), &[1]);
    runtime.drain_frame_callbacks(2);
    assert_eq!(times.borrow().as_slice(), &[1, 2]);
}

#[test]
fn cancelling_a_dequeued_callback_in_the_same_frame_skips_it() {
    let runtime = runtime();
    let clock = runtime.frame_clock();
    let second_fired = Rc::new(Cell::new(false));
    let second_slot: Rc<RefCell<Option<FrameCallbackRegistration>>> = Rc::new(RefCell::new(None));

    let slot_for_first = Rc::clone(&second_slot);
    let _first = clock.with_frame_nanos(move |_| {
        if let Some(registration) = slot_for_first.borrow_mut().take() {
            registration.cancel();
        }
    });
    let fired = Rc::clone(&second_fired);
    *second_slot.borrow_mut() = Some(clock.with_frame_nanos(move |_| fired.set(true)));

    runtime.drain_frame_callbacks(16);

    assert!(!second_fired.get());
}

#[test]
fn handle_outliving_runtime_is_inert() {
    let runtime = runtime();
    let handle = runtime.handle();
    drop(runtime);

    assert!(!handle.is_alive());
    assert!(handle.register_frame_callback(|_| {}).is_none());
    let registration = handle.frame_clock().with_frame_nanos(|_| {});
    assert!(!registration.is_active());
}

#[test]
fn manual_scheduler_counts_frame_requests() {
    let scheduler = Arc::new(ManualScheduler::new());
    let runtime = Runtime::new(scheduler.clone());
    let _a = runtime.frame_clock().with_frame_nanos(|_| {});
    let _b = runtime.frame_clock().with_frame_millis(|_| {});
    assert_eq!(scheduler.frame_requests(), 2);
}
