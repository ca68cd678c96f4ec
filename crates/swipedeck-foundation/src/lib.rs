//! Swipe-to-dismiss for scrolling lists: pointer input, velocity tracking,
//! list contracts and the item swipe manager.

pub mod config;
pub mod error;
pub mod geometry;
pub mod gesture_constants;
pub mod input;
pub mod list;
pub mod swipe;
pub mod velocity_tracker;

pub use config::SwipeConfig;
pub use error::SwipeError;
pub use geometry::{Point, Rect, Size};
pub use input::{
    ItemTouchDispatcher, ListenerId, ListenerList, PointerEvent, PointerEventKind,
    RowAttachDispatcher,
};
pub use list::{
    DismissListener, ItemTouchListener, ListAdapter, RemoveItemOnDismiss, RowAttachListener, RowId,
    SwipeableList,
};
pub use swipe::{ItemSwipeManager, SwipePhase};
pub use velocity_tracker::VelocityTracker;

pub mod prelude {
    pub use crate::config::SwipeConfig;
    pub use crate::error::SwipeError;
    pub use crate::geometry::{Point, Rect, Size};
    pub use crate::input::prelude::*;
    pub use crate::list::{
        DismissListener, ItemTouchListener, ListAdapter, RemoveItemOnDismiss, RowAttachListener,
        RowId, SwipeableList,
    };
    pub use crate::swipe::{ItemSwipeManager, SwipePhase};
}
