//! Shared gesture thresholds.

/// Distance in pixels the pointer must travel before a touch becomes a swipe.
pub const TOUCH_SLOP: f32 = 8.0;

/// Upper bound on a measured fling velocity, in pixels per second.
pub const MAX_FLING_VELOCITY: f32 = 8000.0;

/// Velocities are reported per this many milliseconds, so 1000 gives px/s.
pub const VELOCITY_UNITS_MS: i64 = 1000;
