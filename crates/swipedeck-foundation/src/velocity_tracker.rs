//! Pointer velocity estimation for flings.
//!
//! Velocity is estimated with the impulse strategy: each segment between
//! consecutive samples adds or removes kinetic energy, and the final energy
//! is turned back into a velocity. Only recent samples count, and a pause
//! between samples means the pointer stopped.

use crate::input::PointerEvent;

const HISTORY_SIZE: usize = 20;

/// Samples older than this relative to the newest one are ignored.
const HORIZON_MS: i64 = 100;

/// A gap this long between samples means the pointer had stopped.
pub const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy, Debug, Default)]
struct Sample {
    time_ms: i64,
    position: f32,
}

/// Velocity along one axis from absolute positions.
#[derive(Clone, Debug)]
pub struct AxisVelocityTracker {
    samples: [Option<Sample>; HISTORY_SIZE],
    newest: usize,
}

impl Default for AxisVelocityTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl AxisVelocityTracker {
    pub fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            newest: 0,
        }
    }

    pub fn add_position(&mut self, time_ms: i64, position: f32) {
        self.newest = (self.newest + 1) % HISTORY_SIZE;
        self.samples[self.newest] = Some(Sample { time_ms, position });
    }

    /// Velocity in units per millisecond, or 0.0 with fewer than two usable
    /// samples.
    pub fn velocity_per_ms(&self) -> f32 {
        let Some(newest) = self.samples[self.newest] else {
            return 0.0;
        };

        // Oldest first once collected.
        let mut window: Vec<(f32, f32)> = Vec::with_capacity(HISTORY_SIZE);
        let mut index = self.newest;
        while let Some(sample) = self.samples[index] {
            let age = newest.time_ms - sample.time_ms;
            if age > HORIZON_MS || age > ASSUME_STOPPED_MS {
                break;
            }
            window.push((-(age as f32), sample.position));
            if window.len() == HISTORY_SIZE {
                break;
            }
            index = (index + HISTORY_SIZE - 1) % HISTORY_SIZE;
        }
        window.reverse();

        if window.len() < 2 {
            return 0.0;
        }
        impulse_velocity(&window)
    }

    pub fn clear(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.newest = 0;
    }
}

/// `window` holds `(time, position)` pairs ordered oldest first.
fn impulse_velocity(window: &[(f32, f32)]) -> f32 {
    let mut work = 0.0f32;
    for (segment, pair) in window.windows(2).enumerate() {
        let (start_time, start_position) = pair[0];
        let (end_time, end_position) = pair[1];
        if start_time == end_time {
            continue;
        }
        let segment_velocity = (end_position - start_position) / (end_time - start_time);
        let previous_velocity = energy_to_velocity(work);
        work += (segment_velocity - previous_velocity) * segment_velocity.abs();
        if segment == 0 {
            work *= 0.5;
        }
    }
    energy_to_velocity(work)
}

/// `E = v^2 / 2` with unit mass, keeping the sign of the energy.
fn energy_to_velocity(energy: f32) -> f32 {
    energy.signum() * (2.0 * energy.abs()).sqrt()
}

/// Horizontal velocity of a pointer, fed with the events of one gesture.
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker {
    x: AxisVelocityTracker,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_movement(&mut self, event: &PointerEvent) {
        self.x.add_position(event.time_ms, event.x());
    }

    /// Horizontal velocity in pixels per `units_ms` milliseconds, clamped to
    /// `±max_velocity`.
    pub fn compute_current_velocity(&self, units_ms: i64, max_velocity: f32) -> f32 {
        let velocity = self.x.velocity_per_ms() * units_ms as f32;
        if !velocity.is_finite() {
            return 0.0;
        }
        let max_velocity = max_velocity.abs();
        velocity.clamp(-max_velocity, max_velocity)
    }

    pub fn clear(&mut self) {
        self.x.clear();
    }
}

#[cfg(test)]
#[path = "tests/velocity_tracker_tests.rs"]
mod tests;
