//! Classifies a single-pointer event stream into swipe gestures.

use crate::config::SwipeConfig;
use crate::input::PointerEvent;
use crate::list::RowId;
use crate::velocity_tracker::VelocityTracker;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Binding {
    /// Still within the slop.
    Pending,
    Bound(RowId),
    /// Passed the slop over empty space; stays unbound until the next down.
    Unbound,
}

#[derive(Clone, Copy, Debug)]
struct TouchSession {
    origin_x: f32,
    binding: Binding,
}

/// What a pointer move means for the current gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureUpdate {
    /// No session is open; the event had no preceding pointer-down.
    Stale,
    /// The list keeps the gesture.
    NotASwipe,
    /// `row` follows the pointer at `offset` pixels from its rest position.
    Dragging { row: RowId, offset: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Release {
    pub row: RowId,
    /// Horizontal release velocity, clamped to the configured maximum.
    pub velocity: f32,
}

pub struct GestureTracker {
    touch_slop: f32,
    velocity_units_ms: i64,
    max_fling_velocity: f32,
    session: Option<TouchSession>,
    velocity_tracker: Option<VelocityTracker>,
}

impl GestureTracker {
    pub fn new(config: &SwipeConfig) -> Self {
        Self {
            touch_slop: config.touch_slop,
            velocity_units_ms: config.velocity_units_ms,
            max_fling_velocity: config.max_fling_velocity,
            session: None,
            velocity_tracker: None,
        }
    }

    /// Opens a new session, dropping whatever an unfinished one had bound.
    pub fn on_pointer_down(&mut self, event: &PointerEvent) {
        let tracker = self
            .velocity_tracker
            .get_or_insert_with(VelocityTracker::new);
        tracker.clear();
        tracker.add_movement(event);
        self.session = Some(TouchSession {
            origin_x: event.x(),
            binding: Binding::Pending,
        });
    }

    /// `find_row` is consulted once, on the first move past the slop.
    pub fn on_pointer_move(
        &mut self,
        event: &PointerEvent,
        find_row: impl FnOnce(f32, f32) -> Option<RowId>,
    ) -> GestureUpdate {
        let Some(session) = self.session.as_mut() else {
            return GestureUpdate::Stale;
        };
        if let Some(tracker) = self.velocity_tracker.as_mut() {
            tracker.add_movement(event);
        }

        let offset = event.x() - session.origin_x;
        if session.binding == Binding::Pending && offset > self.touch_slop {
            session.binding = match find_row(event.x(), event.y()) {
                Some(row) => Binding::Bound(row),
                None => Binding::Unbound,
            };
        }

        match session.binding {
            Binding::Bound(row) => GestureUpdate::Dragging { row, offset },
            Binding::Pending | Binding::Unbound => GestureUpdate::NotASwipe,
        }
    }

    /// Ends the session. Up and cancel are treated alike.
    pub fn on_pointer_up(&mut self, event: &PointerEvent) -> Option<Release> {
        let session = self.session.take()?;
        let tracker = self.velocity_tracker.as_mut()?;
        tracker.add_movement(event);
        let velocity =
            tracker.compute_current_velocity(self.velocity_units_ms, self.max_fling_velocity);
        tracker.clear();

        match session.binding {
            Binding::Bound(row) => Some(Release { row, velocity }),
            Binding::Pending | Binding::Unbound => None,
        }
    }

    pub fn on_pointer_cancel(&mut self, event: &PointerEvent) -> Option<Release> {
        self.on_pointer_up(event)
    }

    pub fn bound_row(&self) -> Option<RowId> {
        match self.session?.binding {
            Binding::Bound(row) => Some(row),
            Binding::Pending | Binding::Unbound => None,
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.session.is_some()
    }

    /// Drops the session and the velocity history.
    pub fn reset(&mut self) {
        self.session = None;
        self.velocity_tracker = None;
    }
}

#[cfg(test)]
#[path = "../tests/gesture_tracker_tests.rs"]
mod tests;
