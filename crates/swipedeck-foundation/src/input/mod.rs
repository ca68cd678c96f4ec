//! Touch input: pointer events and the intercepting listener dispatcher.

pub mod dispatcher;
pub mod types;

pub use dispatcher::{ItemTouchDispatcher, ListenerId, ListenerList, RowAttachDispatcher};
pub use types::{PointerEvent, PointerEventKind};

pub mod prelude {
    pub use super::dispatcher::{ItemTouchDispatcher, RowAttachDispatcher};
    pub use super::types::{PointerEvent, PointerEventKind};
}
