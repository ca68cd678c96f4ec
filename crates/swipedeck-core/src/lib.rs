//! Core runtime for swipedeck: a single-threaded frame-callback queue and the
//! platform traits a host implements to drive it.

pub mod collections;
pub mod frame_clock;
pub mod platform;
pub mod runtime;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use platform::{Clock, RuntimeScheduler, SystemClock};
pub use runtime::{DefaultScheduler, FrameCallbackId, ManualScheduler, Runtime, RuntimeHandle};

/// Nanoseconds in one 60Hz frame.
pub const FRAME_NANOS: u64 = 16_666_667;
