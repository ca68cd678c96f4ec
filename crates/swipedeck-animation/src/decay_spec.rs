//! Decay animation specification for fling animations.
//!
//! A decay animation has no target. It starts with a velocity and slows down
//! under friction until the motion is no longer visible.

/// Scale applied to the user-facing friction coefficient.
const FRICTION_SCALE: f32 = 4.2;

/// Converts a minimum visible change (in value units) into the velocity below
/// which a fling is considered stopped: one visible change per 16ms frame.
pub const VELOCITY_THRESHOLD_MULTIPLIER: f32 = 1000.0 / 16.0;

/// Smallest translation change that is visible on screen, in pixels.
pub const MIN_VISIBLE_CHANGE_PIXELS: f32 = 1.0;

/// Trait for decay animation specifications.
///
/// A decay animation has no fixed target - it starts with a velocity and
/// decelerates to zero. The final position depends on the initial velocity.
pub trait FloatDecayAnimationSpec {
    /// Velocity threshold below which animation is considered finished.
    fn abs_velocity_threshold(&self) -> f32;

    /// Get position at a given time.
    fn get_value_from_nanos(
        &self,
        play_time_nanos: i64,
        initial_value: f32,
        initial_velocity: f32,
    ) -> f32;

    /// Get velocity at a given time.
    fn get_velocity_from_nanos(
        &self,
        play_time_nanos: i64,
        initial_value: f32,
        initial_velocity: f32,
    ) -> f32;

    /// Get total animation duration in nanoseconds.
    fn get_duration_nanos(&self, initial_value: f32, initial_velocity: f32) -> i64;

    /// Get the target value (final position) of the animation.
    fn get_target_value(&self, initial_value: f32, initial_velocity: f32) -> f32;
}

/// Exponential friction decay.
///
/// Velocity falls off as `v0 * e^(-k t)` with `k = 4.2 * friction`, so the
/// position approaches `x0 + v0 / k`. The fling stops once the velocity drops
/// under [`FrictionDecaySpec::abs_velocity_threshold`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrictionDecaySpec {
    friction: f32,
    velocity_threshold: f32,
}

impl FrictionDecaySpec {
    /// Friction used when none is configured.
    pub const DEFAULT_FRICTION: f32 = 1.0;

    /// Create a decay with the given friction coefficient.
    ///
    /// Non-positive or non-finite friction falls back to
    /// [`FrictionDecaySpec::DEFAULT_FRICTION`].
    pub fn new(friction: f32) -> Self {
        let friction = if friction.is_finite() && friction > 0.0 {
            friction
        } else {
            log::warn!("invalid fling friction {friction}, using default");
            Self::DEFAULT_FRICTION
        };
        Self {
            friction,
            velocity_threshold: MIN_VISIBLE_CHANGE_PIXELS * VELOCITY_THRESHOLD_MULTIPLIER,
        }
    }

    pub fn friction(&self) -> f32 {
        self.friction
    }

    fn rate(&self) -> f64 {
        (self.friction * FRICTION_SCALE) as f64
    }
}

impl Default for FrictionDecaySpec {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FRICTION)
    }
}

fn nanos_to_seconds(nanos: i64) -> f64 {
    nanos.max(0) as f64 / 1_000_000_000.0
}

impl FloatDecayAnimationSpec for FrictionDecaySpec {
    fn abs_velocity_threshold(&self) -> f32 {
        self.velocity_threshold
    }

    fn get_value_from_nanos(
        &self,
        play_time_nanos: i64,
        initial_value: f32,
        initial_velocity: f32,
    ) -> f32 {
        let k = self.rate();
        let t = nanos_to_seconds(play_time_nanos);
        let travelled = initial_velocity as f64 / k * (1.0 - (-k * t).exp());
        (initial_value as f64 + travelled) as f32
    }

    fn get_velocity_from_nanos(
        &self,
        play_time_nanos: i64,
        _initial_value: f32,
        initial_velocity: f32,
    ) -> f32 {
        let k = self.rate();
        let t = nanos_to_seconds(play_time_nanos);
        (initial_velocity as f64 * (-k * t).exp()) as f32
    }

    fn get_duration_nanos(&self, _initial_value: f32, initial_velocity: f32) -> i64 {
        let speed = initial_velocity.abs();
        if speed <= self.velocity_threshold {
            return 0;
        }
        let seconds = (speed as f64 / self.velocity_threshold as f64).ln() / self.rate();
        (seconds * 1_000_000_000.0).ceil() as i64
    }

    fn get_target_value(&self, initial_value: f32, initial_velocity: f32) -> f32 {
        let duration = self.get_duration_nanos(initial_value, initial_velocity);
        self.get_value_from_nanos(duration, initial_value, initial_velocity)
    }
}
