use std::sync::atomic::{AtomicU64, Ordering};

use swipedeck_core::Clock;

/// Millisecond clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: AtomicU64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(millis: u64) -> Self {
        Self {
            now_ms: AtomicU64::new(millis),
        }
    }

    pub fn advance(&self, millis: u64) -> u64 {
        self.now_ms.fetch_add(millis, Ordering::SeqCst) + millis
    }

    pub fn millis(&self) -> u64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}

impl Clock for ManualClock {
    type Instant = u64;

    fn now(&self) -> u64 {
        self.millis()
    }

    fn elapsed_millis(&self, since: u64) -> u64 {
        self.millis().saturating_sub(since)
    }
}
