//! Scripted touch sessions against the movie screen.

use std::rc::Rc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use swipedeck_core::{Clock, DefaultScheduler, Runtime, SystemClock, FRAME_NANOS};
use swipedeck_foundation::{Point, PointerEvent, PointerEventKind};
use web_time::Instant;

use crate::list_view::MovieListView;
use crate::options::{DemoOptions, Scenario};
use crate::screen::{MainScreen, ScreenError};

const MOVES_PER_SEGMENT: usize = 8;
const MAX_SETTLE_FRAMES: usize = 10_000;
const NANOS_PER_MS: u64 = 1_000_000;

/// One touch gesture, from press to release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Drags the item at `position` right by `distance` and lets go.
    Swipe {
        position: usize,
        distance: f32,
        duration_ms: u64,
    },
    /// Drags right by `out`, back to `back`, then lets go.
    SwipeBack {
        position: usize,
        out: f32,
        back: f32,
        duration_ms: u64,
    },
    /// Drags the content up by `distance`.
    Scroll { distance: f32, duration_ms: u64 },
}

impl Gesture {
    fn waypoints(&self, list: &MovieListView) -> (Vec<Point>, u64) {
        let start_x = 40.0;
        match *self {
            Gesture::Swipe {
                position,
                distance,
                duration_ms,
            } => {
                let y = list.item_center(position).y;
                (
                    vec![Point::new(start_x, y), Point::new(start_x + distance, y)],
                    duration_ms,
                )
            }
            Gesture::SwipeBack {
                position,
                out,
                back,
                duration_ms,
            } => {
                let y = list.item_center(position).y;
                (
                    vec![
                        Point::new(start_x, y),
                        Point::new(start_x + out, y),
                        Point::new(start_x + back, y),
                    ],
                    duration_ms,
                )
            }
            Gesture::Scroll {
                distance,
                duration_ms,
            } => {
                let geometry = list.geometry();
                let x = geometry.container_width / 2.0;
                let from = geometry.viewport_height * 0.75;
                (
                    vec![Point::new(x, from), Point::new(x, from - distance)],
                    duration_ms,
                )
            }
        }
    }
}

impl Scenario {
    pub fn gestures(self) -> Vec<Gesture> {
        let dismiss = |position| Gesture::Swipe {
            position,
            distance: 600.0,
            duration_ms: 120,
        };
        let settle = Gesture::Swipe {
            position: 1,
            distance: 150.0,
            duration_ms: 150,
        };
        let swipe_back = Gesture::SwipeBack {
            position: 2,
            out: 300.0,
            back: 120.0,
            duration_ms: 160,
        };
        let scroll = Gesture::Scroll {
            distance: 400.0,
            duration_ms: 200,
        };
        match self {
            Scenario::Full => vec![dismiss(0), settle, swipe_back, scroll, dismiss(4)],
            Scenario::Dismiss => vec![dismiss(0)],
            Scenario::Settle => vec![settle],
            Scenario::Return => vec![swipe_back],
            Scenario::Scroll => vec![scroll],
        }
    }
}

/// Where event and frame timestamps come from.
enum Pacer {
    Virtual {
        now_nanos: u64,
    },
    Realtime {
        clock: SystemClock,
        started: Instant,
    },
}

impl Pacer {
    fn now_nanos(&self) -> u64 {
        match self {
            Pacer::Virtual { now_nanos } => *now_nanos,
            Pacer::Realtime { clock, started } => clock.elapsed_millis(*started) * NANOS_PER_MS,
        }
    }

    fn now_ms(&self) -> i64 {
        (self.now_nanos() / NANOS_PER_MS) as i64
    }

    fn wait(&mut self, nanos: u64) {
        match self {
            Pacer::Virtual { now_nanos } => *now_nanos += nanos,
            Pacer::Realtime { .. } => thread::sleep(Duration::from_nanos(nanos)),
        }
    }
}

/// Outcome of a scripted session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub gestures: usize,
    pub frames: usize,
    pub dismissed: Vec<&'static str>,
    pub remaining: Vec<&'static str>,
}

/// Owns a runtime and a started [`MainScreen`] and feeds it gestures.
pub struct ScriptedSession {
    runtime: Runtime,
    screen: MainScreen,
    pacer: Pacer,
    frames: usize,
    gestures: usize,
}

impl ScriptedSession {
    pub fn new(options: &DemoOptions) -> Result<Self, ScreenError> {
        let runtime = Runtime::new(Arc::new(DefaultScheduler));
        let mut screen = MainScreen::new(
            runtime.frame_clock(),
            options.geometry(),
            options.swipe_config(),
        );
        screen.on_create();
        screen.on_start()?;
        let pacer = if options.realtime {
            let clock = SystemClock;
            Pacer::Realtime {
                started: clock.now(),
                clock,
            }
        } else {
            Pacer::Virtual { now_nanos: 0 }
        };
        Ok(Self {
            runtime,
            screen,
            pacer,
            frames: 0,
            gestures: 0,
        })
    }

    pub fn screen(&self) -> &MainScreen {
        &self.screen
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    /// Presses, moves through the gesture's waypoints and releases. Returns
    /// true if the swipe manager claimed the gesture.
    pub fn perform(&mut self, gesture: Gesture) -> Result<bool, ScreenError> {
        let list = Rc::clone(self.screen.list().ok_or(ScreenError::NotCreated)?);
        let (waypoints, duration_ms) = gesture.waypoints(&list);
        let Some((&first, rest)) = waypoints.split_first() else {
            return Ok(false);
        };
        log::debug!("performing {gesture:?}");
        self.gestures += 1;

        let moves = rest.len() * MOVES_PER_SEGMENT;
        let step_nanos = duration_ms * NANOS_PER_MS / moves.max(1) as u64;
        let mut claimed = list.dispatch_touch(&PointerEvent::down(
            first.x,
            first.y,
            self.pacer.now_ms(),
        ));
        let mut from = first;
        let mut last = first;
        for &to in rest {
            for step in 1..=MOVES_PER_SEGMENT {
                let t = step as f32 / MOVES_PER_SEGMENT as f32;
                last = Point::new(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t);
                self.pacer.wait(step_nanos);
                claimed |= list.dispatch_touch(&PointerEvent::new(
                    PointerEventKind::Move,
                    last,
                    self.pacer.now_ms(),
                ));
                self.pump_pending_frame();
            }
            from = to;
        }
        claimed |= list.dispatch_touch(&PointerEvent::up(last.x, last.y, self.pacer.now_ms()));
        Ok(claimed)
    }

    /// Runs frames until no animation is pending. Returns the frame count.
    pub fn settle(&mut self) -> usize {
        let mut frames = 0;
        while self.runtime.has_frame_callbacks() {
            if frames == MAX_SETTLE_FRAMES {
                log::warn!("animations still running after {frames} frames");
                break;
            }
            self.pacer.wait(FRAME_NANOS);
            self.pump_pending_frame();
            frames += 1;
        }
        frames
    }

    /// Plays every gesture to rest, stops the screen and reports what is left.
    pub fn run(&mut self, gestures: &[Gesture]) -> Result<SessionReport, ScreenError> {
        for &gesture in gestures {
            let claimed = self.perform(gesture)?;
            let frames = self.settle();
            log::info!(
                "{gesture:?} {} after {frames} frames",
                if claimed { "swiped" } else { "scrolled" }
            );
        }
        self.screen.on_stop()?;
        self.report()
    }

    pub fn report(&self) -> Result<SessionReport, ScreenError> {
        let list = self.screen.list().ok_or(ScreenError::NotCreated)?;
        Ok(SessionReport {
            gestures: self.gestures,
            frames: self.frames,
            dismissed: list.adapter().removed_titles(),
            remaining: list.adapter().titles(),
        })
    }

    fn pump_pending_frame(&mut self) {
        if self.runtime.has_frame_callbacks() {
            self.frames += 1;
            self.runtime.drain_frame_callbacks(self.pacer.now_nanos());
        }
    }
}
