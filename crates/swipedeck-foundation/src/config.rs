use swipedeck_animation::{FrictionDecaySpec, SpringSpec};

use crate::gesture_constants::{MAX_FLING_VELOCITY, TOUCH_SLOP, VELOCITY_UNITS_MS};

/// Tuning for an [`ItemSwipeManager`](crate::swipe::ItemSwipeManager).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeConfig {
    /// Horizontal travel in pixels before a touch binds to a row.
    pub touch_slop: f32,
    /// Friction of the release fling; higher stops sooner.
    pub fling_friction: f32,
    /// Release velocities are clamped to this magnitude, in px/s.
    pub max_fling_velocity: f32,
    pub velocity_units_ms: i64,
    /// Spring that returns a row to rest.
    pub settle_spring: SpringSpec,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            touch_slop: TOUCH_SLOP,
            fling_friction: FrictionDecaySpec::DEFAULT_FRICTION,
            max_fling_velocity: MAX_FLING_VELOCITY,
            velocity_units_ms: VELOCITY_UNITS_MS,
            settle_spring: SpringSpec::low_bouncy(),
        }
    }
}

impl SwipeConfig {
    pub fn with_touch_slop(mut self, touch_slop: f32) -> Self {
        self.touch_slop = touch_slop.max(0.0);
        self
    }

    pub fn with_fling_friction(mut self, friction: f32) -> Self {
        self.fling_friction = friction;
        self
    }

    pub fn with_max_fling_velocity(mut self, max_fling_velocity: f32) -> Self {
        self.max_fling_velocity = max_fling_velocity.abs();
        self
    }

    pub fn with_settle_spring(mut self, spring: SpringSpec) -> Self {
        self.settle_spring = spring;
        self
    }

    pub fn with_spring_stiffness(mut self, stiffness: f32) -> Self {
        self.settle_spring = SpringSpec::new(self.settle_spring.damping_ratio, stiffness);
        self
    }

    pub fn with_spring_damping_ratio(mut self, damping_ratio: f32) -> Self {
        self.settle_spring = SpringSpec::new(damping_ratio, self.settle_spring.stiffness);
        self
    }

    pub fn with_velocity_units_ms(mut self, units_ms: i64) -> Self {
        self.velocity_units_ms = units_ms.max(1);
        self
    }

    pub fn decay_spec(&self) -> FrictionDecaySpec {
        FrictionDecaySpec::new(self.fling_friction)
    }
}
