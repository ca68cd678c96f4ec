//! Robot-style driver for swipe gestures.
//!
//! A [`SwipeRobot`] owns a runtime, a [`TestList`] and an attached
//! [`ItemSwipeManager`]. It scripts pointer sequences with realistic
//! timestamps and pumps animation frames by hand.
//!
//! # Example
//!
//! ```
//! use swipedeck_testing::{SwipeRobot, TestList};
//!
//! let mut robot = SwipeRobot::new(TestList::with_items(3));
//! robot.swipe_row(0, 200.0, 80);
//! robot.wait_for_idle();
//! assert_eq!(robot.list().labels(), vec!["item 1", "item 2"]);
//! ```

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use swipedeck_core::{Clock, ManualScheduler, Runtime, FRAME_NANOS};
use swipedeck_foundation::{
    DismissListener, ItemSwipeManager, Point, PointerEvent, RemoveItemOnDismiss, RowId,
    SwipeConfig, SwipeableList,
};

use crate::clock::ManualClock;
use crate::list::TestList;

/// Frames pumped by [`SwipeRobot::wait_for_idle`] before giving up.
const MAX_IDLE_FRAMES: usize = 2000;

/// Time between scripted pointer moves.
const DEFAULT_STEP_MS: u64 = 10;

/// Installs `env_logger` for tests; safe to call more than once.
pub fn init_test_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .is_test(true)
        .try_init();
}

/// Records dismissals before removing the item.
struct RecordingDismissListener {
    dismissed: Rc<RefCell<Vec<RowId>>>,
    remove: RemoveItemOnDismiss<TestList>,
}

impl DismissListener for RecordingDismissListener {
    fn on_dismissed(&self, row: RowId) {
        self.dismissed.borrow_mut().push(row);
        self.remove.on_dismissed(row);
    }
}

pub struct SwipeRobot {
    runtime: Runtime,
    scheduler: Arc<ManualScheduler>,
    clock: ManualClock,
    list: Rc<TestList>,
    manager: ItemSwipeManager,
    dismissed: Rc<RefCell<Vec<RowId>>>,
    frame_time_nanos: u64,
    pointer: Option<Point>,
}

impl SwipeRobot {
    pub fn new(list: Rc<TestList>) -> Self {
        Self::with_config(list, SwipeConfig::default())
    }

    pub fn with_config(list: Rc<TestList>, config: SwipeConfig) -> Self {
        let scheduler = Arc::new(ManualScheduler::new());
        let runtime = Runtime::new(scheduler.clone());
        let dismissed = Rc::new(RefCell::new(Vec::new()));
        let listener = RecordingDismissListener {
            dismissed: Rc::clone(&dismissed),
            remove: RemoveItemOnDismiss::new(Rc::clone(&list)),
        };
        let manager = ItemSwipeManager::new(runtime.frame_clock(), config, Rc::new(listener));
        manager
            .attach(&list)
            .expect("a new swipe manager is not attached yet");
        Self {
            runtime,
            scheduler,
            clock: ManualClock::starting_at(1_000),
            list,
            manager,
            dismissed,
            frame_time_nanos: 0,
            pointer: None,
        }
    }

    pub fn list(&self) -> &Rc<TestList> {
        &self.list
    }

    pub fn manager(&self) -> &ItemSwipeManager {
        &self.manager
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    /// Rows reported to the dismiss listener, in order.
    pub fn dismissed(&self) -> Vec<RowId> {
        self.dismissed.borrow().clone()
    }

    pub fn frame_requests(&self) -> usize {
        self.scheduler.frame_requests()
    }

    pub fn now_ms(&self) -> i64 {
        self.clock.now() as i64
    }

    pub fn press(&mut self, x: f32, y: f32) -> bool {
        self.pointer = Some(Point::new(x, y));
        self.list.dispatch(&PointerEvent::down(x, y, self.now_ms()))
    }

    /// Moves the pressed pointer after `DEFAULT_STEP_MS`.
    pub fn move_to(&mut self, x: f32, y: f32) -> bool {
        self.move_after(x, y, DEFAULT_STEP_MS)
    }

    pub fn move_after(&mut self, x: f32, y: f32, delay_ms: u64) -> bool {
        self.clock.advance(delay_ms);
        self.pointer = Some(Point::new(x, y));
        let event = PointerEvent::moved(x, y, self.now_ms());
        self.list.dispatch(&event)
    }

    /// Lifts the pointer where it is, at the time of the last move.
    pub fn release(&mut self) -> bool {
        let Some(at) = self.pointer.take() else {
            log::warn!("release without a pressed pointer");
            return false;
        };
        let event = PointerEvent::up(at.x, at.y, self.now_ms());
        self.list.dispatch(&event)
    }

    pub fn cancel(&mut self) -> bool {
        let Some(at) = self.pointer.take() else {
            return false;
        };
        let event = PointerEvent::cancel(at.x, at.y, self.now_ms());
        self.list.dispatch(&event)
    }

    /// Press at `from`, move to `to` in `steps` evenly timed moves over
    /// `duration_ms`, then release. Returns true if any event was consumed.
    pub fn swipe(&mut self, from: Point, to: Point, steps: usize, duration_ms: u64) -> bool {
        let steps = steps.max(1);
        let step_ms = (duration_ms / steps as u64).max(1);
        let mut consumed = self.press(from.x, from.y);
        for step in 1..=steps {
            let fraction = step as f32 / steps as f32;
            let x = from.x + (to.x - from.x) * fraction;
            let y = from.y + (to.y - from.y) * fraction;
            consumed |= self.move_after(x, y, step_ms);
        }
        consumed |= self.release();
        consumed
    }

    /// Swipes the row at `index` rightward by `distance` px over `duration_ms`.
    pub fn swipe_row(&mut self, index: usize, distance: f32, duration_ms: u64) -> bool {
        let start = Point::new(10.0, self.list.row_center(index).y);
        let end = Point::new(start.x + distance, start.y);
        let steps = (duration_ms / DEFAULT_STEP_MS).max(1) as usize;
        self.swipe(start, end, steps, duration_ms)
    }

    /// Runs one frame at the next 60Hz frame time.
    pub fn pump_frame(&mut self) {
        self.frame_time_nanos += FRAME_NANOS;
        self.clock.advance(FRAME_NANOS / 1_000_000);
        self.runtime.drain_frame_callbacks(self.frame_time_nanos);
    }

    pub fn pump_frames(&mut self, frames: usize) {
        for _ in 0..frames {
            self.pump_frame();
        }
    }

    /// Pumps frames until no animation needs one. Returns the frames run.
    pub fn wait_for_idle(&mut self) -> usize {
        for frame in 0..MAX_IDLE_FRAMES {
            if !self.runtime.has_frame_callbacks() {
                return frame;
            }
            self.pump_frame();
        }
        log::warn!("still animating after {MAX_IDLE_FRAMES} frames");
        MAX_IDLE_FRAMES
    }

    /// Samples the translation of `row` on every frame until idle.
    pub fn record_translation(&mut self, row: RowId) -> Vec<f32> {
        let mut samples = Vec::new();
        for _ in 0..MAX_IDLE_FRAMES {
            if !self.runtime.has_frame_callbacks() {
                break;
            }
            self.pump_frame();
            samples.push(self.list.row_translation_x(row));
        }
        samples
    }
}
