//! Frame-driven physics animations.
//!
//! A [`PhysicsAnimation`] samples a decay or spring curve once per frame from
//! the runtime's frame clock, reports every sample to an update listener and
//! reports the terminal value and velocity to an end listener when the curve
//! comes to rest. Cancelling is synchronous and silent.

use std::cell::RefCell;
use std::rc::Rc;

use swipedeck_core::{FrameCallbackRegistration, FrameClock};

use crate::decay_spec::{FloatDecayAnimationSpec, FrictionDecaySpec};
use crate::spring_spec::SpringSpec;

/// Which curve an animation follows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationKind {
    /// Friction decay clamped to `[min, max]`. Reaching a bound ends the
    /// animation.
    Decay {
        spec: FrictionDecaySpec,
        min: f32,
        max: f32,
    },
    /// Spring toward `target`.
    Spring { spec: SpringSpec, target: f32 },
}

impl AnimationKind {
    /// Decay with an upper bound only.
    pub fn fling(spec: FrictionDecaySpec, max: f32) -> Self {
        AnimationKind::Decay {
            spec,
            min: f32::MIN,
            max,
        }
    }

    pub fn spring(spec: SpringSpec, target: f32) -> Self {
        AnimationKind::Spring { spec, target }
    }

    /// Returns `(value, velocity, finished)` after `play_time_nanos`.
    fn sample(
        &self,
        play_time_nanos: i64,
        initial_value: f32,
        initial_velocity: f32,
    ) -> (f32, f32, bool) {
        match *self {
            AnimationKind::Decay { spec, min, max } => {
                let value =
                    spec.get_value_from_nanos(play_time_nanos, initial_value, initial_velocity);
                let velocity =
                    spec.get_velocity_from_nanos(play_time_nanos, initial_value, initial_velocity);
                if value >= max {
                    (max, velocity, true)
                } else if value <= min {
                    (min, velocity, true)
                } else {
                    let stopped = velocity.abs() < spec.abs_velocity_threshold();
                    (value, velocity, stopped)
                }
            }
            AnimationKind::Spring { spec, target } => {
                let value = spec.get_value_from_nanos(
                    play_time_nanos,
                    initial_value,
                    target,
                    initial_velocity,
                );
                let velocity = spec.get_velocity_from_nanos(
                    play_time_nanos,
                    initial_value,
                    target,
                    initial_velocity,
                );
                if spec.is_at_rest(value, target, velocity) {
                    (target, 0.0, true)
                } else {
                    (value, velocity, false)
                }
            }
        }
    }
}

/// Value and velocity at the moment an animation finished on its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationEnd {
    pub value: f32,
    pub velocity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    Idle,
    Running,
    Finished,
    Cancelled,
}

type UpdateListener = Box<dyn FnMut(f32) + 'static>;
type EndListener = Box<dyn FnOnce(AnimationEnd) + 'static>;

struct PhysicsAnimationInner {
    frame_clock: FrameClock,
    kind: AnimationKind,
    state: AnimationState,
    initial_value: f32,
    initial_velocity: f32,
    value: f32,
    velocity: f32,
    start_time_nanos: Option<u64>,
    registration: Option<FrameCallbackRegistration>,
    on_update: Option<UpdateListener>,
    on_end: Option<EndListener>,
}

/// Handle to a frame-driven animation. Clones share the same animation; when
/// the last handle is dropped the pending frame callback becomes a no-op.
pub struct PhysicsAnimation {
    inner: Rc<RefCell<PhysicsAnimationInner>>,
}

impl PhysicsAnimation {
    pub fn new(frame_clock: FrameClock, kind: AnimationKind) -> Self {
        let inner = PhysicsAnimationInner {
            frame_clock,
            kind,
            state: AnimationState::Idle,
            initial_value: 0.0,
            initial_velocity: 0.0,
            value: 0.0,
            velocity: 0.0,
            start_time_nanos: None,
            registration: None,
            on_update: None,
            on_end: None,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// Listener invoked with the animated value on every frame.
    pub fn with_update_listener(self, listener: impl FnMut(f32) + 'static) -> Self {
        self.inner.borrow_mut().on_update = Some(Box::new(listener));
        self
    }

    /// Listener invoked once when the animation finishes without being cancelled.
    pub fn with_end_listener(self, listener: impl FnOnce(AnimationEnd) + 'static) -> Self {
        self.inner.borrow_mut().on_end = Some(Box::new(listener));
        self
    }

    /// Start from `initial_value` moving at `initial_velocity` units per second.
    ///
    /// The first frame fixes the start time; motion begins on the frame after.
    pub fn start(&self, initial_value: f32, initial_velocity: f32) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.state == AnimationState::Running {
                log::debug!("restarting running animation");
            }
            inner.registration = None;
            inner.state = AnimationState::Running;
            inner.initial_value = initial_value;
            inner.initial_velocity = initial_velocity;
            inner.value = initial_value;
            inner.velocity = initial_velocity;
            inner.start_time_nanos = None;
        }
        Self::schedule_frame(&self.inner);
    }

    /// Stop immediately. Neither listener fires after this returns.
    pub fn cancel(&self) {
        let registration = {
            let mut inner = self.inner.borrow_mut();
            match inner.state {
                AnimationState::Running => {}
                AnimationState::Finished if inner.on_end.is_some() => {}
                _ => return,
            }
            inner.state = AnimationState::Cancelled;
            inner.on_update = None;
            inner.on_end = None;
            inner.registration.take()
        };
        if let Some(registration) = registration {
            registration.cancel();
        }
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().state == AnimationState::Running
    }

    pub fn state(&self) -> AnimationState {
        self.inner.borrow().state
    }

    pub fn value(&self) -> f32 {
        self.inner.borrow().value
    }

    pub fn velocity(&self) -> f32 {
        self.inner.borrow().velocity
    }

    fn schedule_frame(this: &Rc<RefCell<PhysicsAnimationInner>>) {
        let frame_clock = {
            let inner = this.borrow();
            if inner.registration.is_some() {
                return;
            }
            inner.frame_clock.clone()
        };
        let weak = Rc::downgrade(this);
        let registration = frame_clock.with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, time);
            }
        });
        this.borrow_mut().registration = Some(registration);
    }

    fn on_frame(this: &Rc<RefCell<PhysicsAnimationInner>>, frame_time_nanos: u64) {
        let (value, velocity, finished) = {
            let mut inner = this.borrow_mut();
            inner.registration = None;
            if inner.state != AnimationState::Running {
                return;
            }
            let start_time = *inner.start_time_nanos.get_or_insert(frame_time_nanos);
            let play_time_nanos = frame_time_nanos.saturating_sub(start_time) as i64;
            let (value, velocity, finished) =
                inner
                    .kind
                    .sample(play_time_nanos, inner.initial_value, inner.initial_velocity);
            inner.value = value;
            inner.velocity = velocity;
            if finished {
                inner.state = AnimationState::Finished;
            }
            (value, velocity, finished)
        };

        log::trace!("animation frame value={value:.2} velocity={velocity:.2}");

        let update = this.borrow_mut().on_update.take();
        if let Some(mut update) = update {
            update(value);
            let mut inner = this.borrow_mut();
            if inner.state != AnimationState::Cancelled && inner.on_update.is_none() {
                inner.on_update = Some(update);
            }
        }

        if finished {
            let end = {
                let mut inner = this.borrow_mut();
                inner.on_update = None;
                inner.on_end.take()
            };
            if let Some(end) = end {
                end(AnimationEnd { value, velocity });
            }
        } else if this.borrow().state == AnimationState::Running {
            Self::schedule_frame(this);
        }
    }
}

impl Clone for PhysicsAnimation {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl std::fmt::Debug for PhysicsAnimation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("PhysicsAnimation")
            .field("kind", &inner.kind)
            .field("state", &inner.state)
            .field("value", &inner.value)
            .field("velocity", &inner.velocity)
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
