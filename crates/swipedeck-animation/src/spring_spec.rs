//! Damped spring physics.
//!
//! The spring is solved in closed form from the start of the animation, so a
//! sample only depends on the play time and never accumulates integration
//! error between frames.

use crate::decay_spec::{MIN_VISIBLE_CHANGE_PIXELS, VELOCITY_THRESHOLD_MULTIPLIER};

/// Fraction of the minimum visible change used as the rest distance.
const VALUE_THRESHOLD_MULTIPLIER: f32 = 0.75;

/// Spring animation configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// Damping ratio. 1.0 = critically damped, < 1.0 = under-damped (bouncy), > 1.0 = over-damped.
    pub damping_ratio: f32,
    /// Stiffness constant. Higher values = faster animation.
    pub stiffness: f32,
    /// Velocity threshold to stop animation.
    pub velocity_threshold: f32,
    /// Position threshold to stop animation.
    pub position_threshold: f32,
}

impl SpringSpec {
    pub const STIFFNESS_HIGH: f32 = 10_000.0;
    pub const STIFFNESS_MEDIUM: f32 = 1_500.0;
    pub const STIFFNESS_LOW: f32 = 200.0;
    pub const STIFFNESS_VERY_LOW: f32 = 50.0;

    pub const DAMPING_RATIO_HIGH_BOUNCY: f32 = 0.2;
    pub const DAMPING_RATIO_MEDIUM_BOUNCY: f32 = 0.5;
    pub const DAMPING_RATIO_LOW_BOUNCY: f32 = 0.75;
    pub const DAMPING_RATIO_NO_BOUNCY: f32 = 1.0;

    /// Smallest damping ratio a spring accepts. An undamped spring would
    /// oscillate forever and never come to rest.
    pub const MIN_DAMPING_RATIO: f32 = 0.05;

    /// Create a spring with the given damping ratio and stiffness, resting
    /// once it moves less than a visible pixel.
    ///
    /// Ratios below [`SpringSpec::MIN_DAMPING_RATIO`] (including zero and NaN)
    /// are raised to it.
    pub fn new(damping_ratio: f32, stiffness: f32) -> Self {
        let position_threshold = MIN_VISIBLE_CHANGE_PIXELS * VALUE_THRESHOLD_MULTIPLIER;
        Self {
            damping_ratio: damping_ratio.max(Self::MIN_DAMPING_RATIO),
            stiffness: stiffness.max(f32::EPSILON),
            velocity_threshold: position_threshold * VELOCITY_THRESHOLD_MULTIPLIER,
            position_threshold,
        }
    }

    /// Create a spring with default material design values.
    pub fn default_spring() -> Self {
        Self::new(Self::DAMPING_RATIO_NO_BOUNCY, Self::STIFFNESS_MEDIUM)
    }

    /// Soft, slightly bouncy spring used to settle swiped rows.
    pub fn low_bouncy() -> Self {
        Self::new(Self::DAMPING_RATIO_LOW_BOUNCY, Self::STIFFNESS_LOW)
    }

    /// Create a bouncy spring.
    pub fn bouncy() -> Self {
        Self::new(Self::DAMPING_RATIO_MEDIUM_BOUNCY, Self::STIFFNESS_MEDIUM)
    }

    /// Create a stiff spring (fast, no bounce).
    pub fn stiff() -> Self {
        Self::new(Self::DAMPING_RATIO_NO_BOUNCY, Self::STIFFNESS_HIGH)
    }

    fn natural_frequency(&self) -> f64 {
        (self.stiffness as f64).sqrt()
    }

    /// Displacement from `target` and velocity after `play_time_nanos`.
    fn solve(
        &self,
        play_time_nanos: i64,
        initial_value: f32,
        target: f32,
        initial_velocity: f32,
    ) -> (f64, f64) {
        let t = play_time_nanos.max(0) as f64 / 1_000_000_000.0;
        let x0 = (initial_value - target) as f64;
        let v0 = initial_velocity as f64;
        let omega = self.natural_frequency();
        let zeta = self.damping_ratio as f64;

        if zeta > 1.0 {
            let root = omega * (zeta * zeta - 1.0).sqrt();
            let gamma_plus = -zeta * omega + root;
            let gamma_minus = -zeta * omega - root;
            let coeff_b = (gamma_minus * x0 - v0) / (gamma_minus - gamma_plus);
            let coeff_a = x0 - coeff_b;
            let e_minus = (gamma_minus * t).exp();
            let e_plus = (gamma_plus * t).exp();
            (
                coeff_a * e_minus + coeff_b * e_plus,
                coeff_a * gamma_minus * e_minus + coeff_b * gamma_plus * e_plus,
            )
        } else if zeta == 1.0 {
            let coeff_a = x0;
            let coeff_b = v0 + omega * x0;
            let decay = (-omega * t).exp();
            let displacement = (coeff_a + coeff_b * t) * decay;
            (displacement, displacement * -omega + coeff_b * decay)
        } else {
            let damped = omega * (1.0 - zeta * zeta).sqrt();
            let cos_coeff = x0;
            let sin_coeff = (zeta * omega * x0 + v0) / damped;
            let decay = (-zeta * omega * t).exp();
            let (sin, cos) = (damped * t).sin_cos();
            let displacement = decay * (cos_coeff * cos + sin_coeff * sin);
            let velocity = displacement * (-zeta * omega)
                + decay * (-damped * cos_coeff * sin + damped * sin_coeff * cos);
            (displacement, velocity)
        }
    }

    /// Position after `play_time_nanos`.
    pub fn get_value_from_nanos(
        &self,
        play_time_nanos: i64,
        initial_value: f32,
        target: f32,
        initial_velocity: f32,
    ) -> f32 {
        let (displacement, _) =
            self.solve(play_time_nanos, initial_value, target, initial_velocity);
        (target as f64 + displacement) as f32
    }

    /// Velocity after `play_time_nanos`.
    pub fn get_velocity_from_nanos(
        &self,
        play_time_nanos: i64,
        initial_value: f32,
        target: f32,
        initial_velocity: f32,
    ) -> f32 {
        let (_, velocity) = self.solve(play_time_nanos, initial_value, target, initial_velocity);
        velocity as f32
    }

    /// Whether a spring at `value` moving at `velocity` has come to rest.
    pub fn is_at_rest(&self, value: f32, target: f32, velocity: f32) -> bool {
        velocity.abs() < self.velocity_threshold
            && (value - target).abs() < self.position_threshold
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::default_spring()
    }
}
