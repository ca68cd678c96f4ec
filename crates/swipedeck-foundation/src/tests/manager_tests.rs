use super::*;

use std::sync::Arc;

use swipedeck_core::{DefaultScheduler, Runtime, FRAME_NANOS};

use crate::input::{ItemTouchDispatcher, RowAttachDispatcher};

const ROW_HEIGHT: f32 = 100.0;

/// Minimal list: rows stacked vertically, all attached.
struct FakeList {
    rows: RefCell<Vec<RowId>>,
    row_width: f32,
    container_width: f32,
    translations: RefCell<Vec<(RowId, f32)>>,
    non_recyclable: RefCell<Vec<RowId>>,
    touch: ItemTouchDispatcher,
    attach: RowAttachDispatcher,
}

impl FakeList {
    fn new(rows: u64, row_width: f32, container_width: f32) -> Rc<Self> {
        Rc::new(Self {
            rows: RefCell::new((1..=rows).map(RowId).collect()),
            row_width,
            container_width,
            translations: RefCell::new(Vec::new()),
            non_recyclable: RefCell::new(Vec::new()),
            touch: ItemTouchDispatcher::new(),
            attach: RowAttachDispatcher::new(),
        })
    }

    fn translation(&self, row: RowId) -> f32 {
        self.row_translation_x(row)
    }

    fn is_recyclable(&self, row: RowId) -> bool {
        !self.non_recyclable.borrow().contains(&row)
    }

    fn remove_row(&self, row: RowId) {
        self.rows.borrow_mut().retain(|attached| *attached != row);
        self.attach.row_detached(row);
    }
}

impl SwipeableList for FakeList {
    fn add_item_touch_listener(&self, listener: Rc<dyn ItemTouchListener>) -> ListenerId {
        self.touch.add_listener(listener)
    }

    fn remove_item_touch_listener(&self, id: ListenerId) -> bool {
        self.touch.remove_listener(id)
    }

    fn add_row_attach_listener(&self, listener: Rc<dyn RowAttachListener>) -> ListenerId {
        self.attach.add_listener(listener)
    }

    fn remove_row_attach_listener(&self, id: ListenerId) -> bool {
        self.attach.remove_listener(id)
    }

    fn find_row_under(&self, _x: f32, y: f32) -> Option<RowId> {
        let index = (y / ROW_HEIGHT).floor();
        if index < 0.0 {
            return None;
        }
        self.rows.borrow().get(index as usize).copied()
    }

    fn is_row_attached(&self, row: RowId) -> bool {
        self.rows.borrow().contains(&row)
    }

    fn row_width(&self, _row: RowId) -> f32 {
        self.row_width
    }

    fn container_width(&self) -> f32 {
        self.container_width
    }

    fn set_row_translation_x(&self, row: RowId, translation_x: f32) {
        let mut translations = self.translations.borrow_mut();
        translations.retain(|(entry, _)| *entry != row);
        translations.push((row, translation_x));
    }

    fn row_translation_x(&self, row: RowId) -> f32 {
        self.translations
            .borrow()
            .iter()
            .find(|(entry, _)| *entry == row)
            .map_or(0.0, |(_, translation)| *translation)
    }

    fn set_row_recyclable(&self, row: RowId, recyclable: bool) {
        let mut non_recyclable = self.non_recyclable.borrow_mut();
        non_recyclable.retain(|entry| *entry != row);
        if !recyclable {
            non_recyclable.push(row);
        }
    }
}

struct Fixture {
    runtime: Runtime,
    list: Rc<FakeList>,
    manager: ItemSwipeManager,
    dismissed: Rc<RefCell<Vec<RowId>>>,
    frame_time: Cell<u64>,
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

impl Fixture {
    fn new(row_width: f32, container_width: f32) -> Self {
        init_logging();
        let runtime = Runtime::new(Arc::new(DefaultScheduler));
        let list = FakeList::new(5, row_width, container_width);
        let dismissed = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&dismissed);
        let manager = ItemSwipeManager::new(
            runtime.frame_clock(),
            SwipeConfig::default().with_touch_slop(10.0),
            Rc::new(move |row: RowId| sink.borrow_mut().push(row)),
        );
        manager.attach(&list).expect("attach");
        Self {
            runtime,
            list,
            manager,
            dismissed,
            frame_time: Cell::new(0),
        }
    }

    fn dispatch(&self, event: PointerEvent) -> bool {
        self.list.touch.dispatch(&event)
    }

    /// Drags from `start_x` to `end_x` along `y` in 10 ms steps of `step` px.
    fn drag(&self, y: f32, start_x: f32, end_x: f32, step: f32) -> i64 {
        let mut time = 0;
        self.dispatch(PointerEvent::down(start_x, y, time));
        let mut x = start_x;
        while (end_x - x).abs() > f32::EPSILON {
            x = if end_x > x {
                (x + step).min(end_x)
            } else {
                (x - step).max(end_x)
            };
            time += 10;
            self.dispatch(PointerEvent::moved(x, y, time));
        }
        time
    }

    fn pump_until_idle(&self) -> usize {
        for frame in 0..2000 {
            if !self.runtime.has_frame_callbacks() {
                return frame;
            }
            self.frame_time.set(self.frame_time.get() + FRAME_NANOS);
            self.runtime.drain_frame_callbacks(self.frame_time.get());
        }
        2000
    }

    fn pump_frames(&self, frames: usize) {
        for _ in 0..frames {
            self.frame_time.set(self.frame_time.get() + FRAME_NANOS);
            self.runtime.drain_frame_callbacks(self.frame_time.get());
        }
    }
}

#[test]
fn attach_twice_and_detach_twice_are_errors() {
    let fixture = Fixture::new(300.0, 300.0);
    assert_eq!(
        fixture.manager.attach(&fixture.list),
        Err(SwipeError::AlreadyAttached)
    );
    assert_eq!(fixture.manager.detach(), Ok(()));
    assert_eq!(fixture.manager.detach(), Err(SwipeError::NotAttached));
    assert_eq!(fixture.list.touch.listener_count(), 0);
    assert_eq!(fixture.list.attach.listener_count(), 0);
}

#[test]
fn small_movement_never_intercepts() {
    let fixture = Fixture::new(300.0, 300.0);
    assert!(!fixture.dispatch(PointerEvent::down(20.0, 50.0, 0)));
    assert!(!fixture.dispatch(PointerEvent::moved(28.0, 50.0, 10)));
    assert!(!fixture.dispatch(PointerEvent::moved(24.0, 150.0, 20)));
    assert!(!fixture.dispatch(PointerEvent::up(24.0, 150.0, 30)));
    assert_eq!(fixture.list.translation(RowId(1)), 0.0);
    assert_eq!(fixture.manager.active_animation_count(), 0);
}

#[test]
fn drag_past_slop_claims_gesture_and_translates_row() {
    let fixture = Fixture::new(300.0, 300.0);
    fixture.dispatch(PointerEvent::down(0.0, 150.0, 0));
    assert!(!fixture.dispatch(PointerEvent::moved(6.0, 150.0, 10)));
    assert!(fixture.dispatch(PointerEvent::moved(12.0, 150.0, 20)));
    assert!(fixture.dispatch(PointerEvent::moved(50.0, 260.0, 30)));

    assert_eq!(fixture.list.translation(RowId(2)), 50.0);
    assert_eq!(fixture.list.translation(RowId(3)), 0.0);
    assert_eq!(
        fixture.manager.phase(RowId(2)),
        SwipePhase::Dragging { offset: 50.0 }
    );
}

#[test]
fn strong_fling_dismisses_exactly_once() {
    let fixture = Fixture::new(300.0, 300.0);
    let time = fixture.drag(50.0, 0.0, 200.0, 25.0);
    fixture.dispatch(PointerEvent::up(200.0, 50.0, time));

    assert_eq!(fixture.manager.phase(RowId(1)), SwipePhase::Flinging);
    assert!(!fixture.list.is_recyclable(RowId(1)));
    fixture.pump_until_idle();

    assert_eq!(fixture.dismissed.borrow().as_slice(), &[RowId(1)]);
    assert_eq!(fixture.list.translation(RowId(1)), 300.0);
    assert!(fixture.list.is_recyclable(RowId(1)));
    assert_eq!(fixture.manager.active_animation_count(), 0);
}

#[test]
fn fling_never_passes_row_width() {
    let fixture = Fixture::new(300.0, 400.0);
    let time = fixture.drag(50.0, 0.0, 250.0, 50.0);
    fixture.dispatch(PointerEvent::up(250.0, 50.0, time));

    let mut widest = 0.0f32;
    while fixture.manager.phase(RowId(1)) == SwipePhase::Flinging {
        fixture.pump_frames(1);
        widest = widest.max(fixture.list.translation(RowId(1)));
    }
    assert_eq!(widest, 300.0);
    assert_eq!(fixture.manager.phase(RowId(1)), SwipePhase::Settling);

    fixture.pump_until_idle();
    assert!(fixture.dismissed.borrow().is_empty());
    assert_eq!(fixture.list.translation(RowId(1)), 0.0);
    assert!(fixture.list.is_recyclable(RowId(1)));
}

#[test]
fn leftward_release_settles_back_without_dismissal() {
    let fixture = Fixture::new(300.0, 300.0);
    let mut time = fixture.drag(50.0, 0.0, 60.0, 20.0);
    for x in [50.0, 40.0, 30.0] {
        time += 10;
        fixture.dispatch(PointerEvent::moved(x, 50.0, time));
    }
    fixture.dispatch(PointerEvent::up(30.0, 50.0, time));

    assert_eq!(fixture.manager.phase(RowId(1)), SwipePhase::Settling);
    fixture.pump_until_idle();

    assert!(fixture.dismissed.borrow().is_empty());
    assert_eq!(fixture.list.translation(RowId(1)), 0.0);
    assert_eq!(fixture.manager.phase(RowId(1)), SwipePhase::Idle);
    assert!(fixture.list.is_recyclable(RowId(1)));
}

#[test]
fn rows_animate_independently() {
    let fixture = Fixture::new(300.0, 400.0);
    let time = fixture.drag(50.0, 0.0, 100.0, 20.0);
    fixture.dispatch(PointerEvent::up(100.0, 50.0, time));
    let time = fixture.drag(150.0, 0.0, 100.0, 20.0);
    fixture.dispatch(PointerEvent::up(100.0, 150.0, time));

    assert_eq!(fixture.manager.active_animation_count(), 2);
    fixture.pump_until_idle();
    assert_eq!(fixture.manager.active_animation_count(), 0);
}

#[test]
fn grabbing_an_animating_row_cancels_its_animation() {
    let fixture = Fixture::new(300.0, 400.0);
    let time = fixture.drag(50.0, 0.0, 150.0, 30.0);
    fixture.dispatch(PointerEvent::up(150.0, 50.0, time));
    fixture.pump_frames(3);
    assert!(fixture.manager.phase(RowId(1)).is_animating());

    fixture.drag(50.0, 100.0, 140.0, 20.0);

    assert_eq!(
        fixture.manager.phase(RowId(1)),
        SwipePhase::Dragging { offset: 40.0 }
    );
    assert_eq!(fixture.manager.active_animation_count(), 0);
    assert!(fixture.list.is_recyclable(RowId(1)));
    fixture.pump_frames(5);
    assert_eq!(fixture.list.translation(RowId(1)), 40.0);
}

#[test]
fn detaching_an_animating_row_resets_it() {
    let fixture = Fixture::new(300.0, 300.0);
    let time = fixture.drag(150.0, 0.0, 100.0, 20.0);
    fixture.dispatch(PointerEvent::up(100.0, 150.0, time));
    fixture.pump_frames(2);

    fixture.list.remove_row(RowId(2));

    assert_eq!(fixture.list.translation(RowId(2)), 0.0);
    assert!(fixture.list.is_recyclable(RowId(2)));
    assert_eq!(fixture.manager.active_animation_count(), 0);
    fixture.pump_until_idle();
    assert_eq!(fixture.list.translation(RowId(2)), 0.0);
    assert!(fixture.dismissed.borrow().is_empty());
}

#[test]
fn detach_cancels_animations_and_rests_rows() {
    let fixture = Fixture::new(300.0, 300.0);
    let time = fixture.drag(50.0, 0.0, 100.0, 20.0);
    fixture.dispatch(PointerEvent::up(100.0, 50.0, time));
    fixture.pump_frames(2);

    fixture.manager.detach().expect("detach");

    assert_eq!(fixture.list.translation(RowId(1)), 0.0);
    assert!(fixture.list.is_recyclable(RowId(1)));
    assert!(!fixture.runtime.has_frame_callbacks());
    assert!(!fixture.dispatch(PointerEvent::down(0.0, 50.0, 500)));
    assert!(!fixture.dispatch(PointerEvent::moved(80.0, 50.0, 510)));
}

#[test]
fn new_gesture_settles_a_row_left_mid_drag() {
    let fixture = Fixture::new(300.0, 300.0);
    fixture.drag(50.0, 0.0, 60.0, 20.0);

    fixture.dispatch(PointerEvent::down(10.0, 250.0, 100));

    assert_eq!(fixture.manager.phase(RowId(1)), SwipePhase::Settling);
    fixture.pump_until_idle();
    assert_eq!(fixture.list.translation(RowId(1)), 0.0);
}

#[test]
fn dropping_an_attached_manager_detaches_it() {
    let fixture = Fixture::new(300.0, 300.0);
    let Fixture { list, manager, .. } = fixture;
    drop(manager);
    assert_eq!(list.touch.listener_count(), 0);
    assert_eq!(list.attach.listener_count(), 0);
}

#[test]
fn dropping_a_manager_mid_fling_puts_the_row_back() {
    let fixture = Fixture::new(300.0, 300.0);
    let time = fixture.drag(50.0, 0.0, 60.0, 20.0);
    fixture.dispatch(PointerEvent::up(60.0, 50.0, time));
    fixture.pump_frames(2);
    assert_eq!(fixture.manager.phase(RowId(1)), SwipePhase::Flinging);

    let Fixture {
        runtime,
        list,
        manager,
        ..
    } = fixture;
    drop(manager);

    assert!(!runtime.has_frame_callbacks());
    assert_eq!(list.translation(RowId(1)), 0.0);
    assert!(list.is_recyclable(RowId(1)));
    assert_eq!(list.touch.listener_count(), 0);
}
