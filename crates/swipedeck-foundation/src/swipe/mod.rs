//! Swipe-to-dismiss: gesture classification, the per-row phase machine, the
//! animation registry and the manager that ties them to a list.

pub mod animator;
pub mod gesture_tracker;
pub mod manager;
pub mod registry;

pub use animator::{RowGeometry, SwipeEffect, SwipeEffects, SwipeEvent, SwipePhase};
pub use gesture_tracker::{GestureTracker, GestureUpdate, Release};
pub use manager::ItemSwipeManager;
pub use registry::{AnimationEntry, RowAnimationRegistry};
