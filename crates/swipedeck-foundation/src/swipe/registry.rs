//! One animation entry per row, keyed by row identity.

use swipedeck_animation::PhysicsAnimation;
use swipedeck_core::collections::map::HashMap;

use crate::list::RowId;
use crate::swipe::animator::SwipePhase;

/// A row's running animation and the phase it drives.
///
/// The generation is unique per registration; animation callbacks carry it
/// so a callback from a replaced or removed entry can be recognised.
#[derive(Debug)]
pub struct AnimationEntry {
    pub phase: SwipePhase,
    pub generation: u64,
    animation: PhysicsAnimation,
}

#[derive(Debug, Default)]
pub struct RowAnimationRegistry {
    entries: HashMap<RowId, AnimationEntry>,
    next_generation: u64,
}

impl RowAnimationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves the generation for the next [`register`](Self::register).
    pub fn next_generation(&mut self) -> u64 {
        self.next_generation += 1;
        self.next_generation
    }

    /// Stores `animation` for `row`, cancelling the entry it replaces.
    pub fn register(
        &mut self,
        row: RowId,
        phase: SwipePhase,
        generation: u64,
        animation: PhysicsAnimation,
    ) {
        let entry = AnimationEntry {
            phase,
            generation,
            animation,
        };
        if let Some(previous) = self.entries.insert(row, entry) {
            log::trace!("{row}: replacing {:?} animation", previous.phase);
            previous.animation.cancel();
        }
    }

    /// Returns false if the row had no entry.
    pub fn cancel_and_remove(&mut self, row: RowId) -> bool {
        match self.entries.remove(&row) {
            Some(entry) => {
                entry.animation.cancel();
                true
            }
            None => false,
        }
    }

    /// Cancels every animation and returns the rows that had one.
    pub fn cancel_all(&mut self) -> Vec<RowId> {
        let mut rows = Vec::with_capacity(self.entries.len());
        for (row, entry) in self.entries.drain() {
            entry.animation.cancel();
            rows.push(row);
        }
        rows.sort_unstable();
        rows
    }

    pub fn get(&self, row: RowId) -> Option<&AnimationEntry> {
        self.entries.get(&row)
    }

    pub fn phase(&self, row: RowId) -> Option<SwipePhase> {
        self.entries.get(&row).map(|entry| entry.phase)
    }

    /// Whether `generation` is still the live entry for `row`.
    pub fn is_current(&self, row: RowId, generation: u64) -> bool {
        self.entries
            .get(&row)
            .is_some_and(|entry| entry.generation == generation)
    }

    pub fn contains(&self, row: RowId) -> bool {
        self.entries.contains_key(&row)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use swipedeck_animation::{AnimationKind, AnimationState, SpringSpec};
    use swipedeck_core::{DefaultScheduler, Runtime};

    fn spring(runtime: &Runtime) -> PhysicsAnimation {
        let animation = PhysicsAnimation::new(
            runtime.frame_clock(),
            AnimationKind::spring(SpringSpec::low_bouncy(), 0.0),
        );
        animation.start(100.0, 0.0);
        animation
    }

    #[test]
    fn register_replaces_and_cancels_previous_entry() {
        let runtime = Runtime::new(Arc::new(DefaultScheduler));
        let mut registry = RowAnimationRegistry::new();
        let first = spring(&runtime);
        let second = spring(&runtime);

        let generation = registry.next_generation();
        registry.register(RowId(1), SwipePhase::Flinging, generation, first.clone());
        let replacement = registry.next_generation();
        registry.register(RowId(1), SwipePhase::Settling, replacement, second.clone());

        assert_eq!(registry.len(), 1);
        assert_eq!(first.state(), AnimationState::Cancelled);
        assert!(second.is_running());
        assert_eq!(registry.phase(RowId(1)), Some(SwipePhase::Settling));
        assert!(!registry.is_current(RowId(1), generation));
        assert!(registry.is_current(RowId(1), replacement));
    }

    #[test]
    fn cancel_and_remove_clears_only_that_row() {
        let runtime = Runtime::new(Arc::new(DefaultScheduler));
        let mut registry = RowAnimationRegistry::new();
        let a = spring(&runtime);
        let b = spring(&runtime);
        let generation = registry.next_generation();
        registry.register(RowId(1), SwipePhase::Settling, generation, a.clone());
        let generation = registry.next_generation();
        registry.register(RowId(2), SwipePhase::Settling, generation, b.clone());

        assert!(registry.cancel_and_remove(RowId(1)));
        assert!(!registry.cancel_and_remove(RowId(1)));
        assert_eq!(a.state(), AnimationState::Cancelled);
        assert!(b.is_running());
        assert!(registry.contains(RowId(2)));
    }

    #[test]
    fn cancel_all_empties_registry_and_reports_rows() {
        let runtime = Runtime::new(Arc::new(DefaultScheduler));
        let mut registry = RowAnimationRegistry::new();
        for row in [3, 1, 2] {
            let generation = registry.next_generation();
            registry.register(
                RowId(row),
                SwipePhase::Flinging,
                generation,
                spring(&runtime),
            );
        }

        let rows = registry.cancel_all();

        assert_eq!(rows, vec![RowId(1), RowId(2), RowId(3)]);
        assert!(registry.is_empty());
        assert!(!runtime.has_frame_callbacks());
    }
}
