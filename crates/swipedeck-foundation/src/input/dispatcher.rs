//! Listener plumbing for lists that host swipeable rows.
//!
//! A list owns one [`ItemTouchDispatcher`] and one [`RowAttachDispatcher`].
//! Listeners are held as `Rc<dyn ...>` and invoked from a snapshot, so a
//! listener may add or remove listeners (including itself) while it runs.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use smallvec::SmallVec;

use crate::input::types::{PointerEvent, PointerEventKind};
use crate::list::{ItemTouchListener, RowAttachListener, RowId};

/// Handle returned when a listener is registered; pass it back to unregister.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub struct ListenerList<T: ?Sized> {
    entries: RefCell<Vec<(ListenerId, Rc<T>)>>,
    next_id: Cell<u64>,
}

impl<T: ?Sized> ListenerList<T> {
    pub fn new() -> Self {
        Self {
            entries: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
        }
    }

    pub fn add(&self, listener: Rc<T>) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.entries.borrow_mut().push((id, listener));
        id
    }

    /// Returns false if `id` was not registered.
    pub fn remove(&self, id: ListenerId) -> bool {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        entries.len() != before
    }

    pub fn contains(&self, id: ListenerId) -> bool {
        self.entries
            .borrow()
            .iter()
            .any(|(entry_id, _)| *entry_id == id)
    }

    pub fn snapshot(&self) -> SmallVec<[(ListenerId, Rc<T>); 2]> {
        self.entries
            .borrow()
            .iter()
            .map(|(id, listener)| (*id, Rc::clone(listener)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl<T: ?Sized> Default for ListenerList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Routes touch events through item touch listeners.
///
/// While no listener owns the gesture every event is offered to
/// [`ItemTouchListener::on_intercept_touch_event`] in registration order.
/// The first listener that returns `true` owns the rest of the gesture and
/// receives [`ItemTouchListener::on_touch_event`] until up or cancel.
#[derive(Default)]
pub struct ItemTouchDispatcher {
    listeners: ListenerList<dyn ItemTouchListener>,
    intercepting: RefCell<Option<(ListenerId, Rc<dyn ItemTouchListener>)>>,
}

impl ItemTouchDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&self, listener: Rc<dyn ItemTouchListener>) -> ListenerId {
        self.listeners.add(listener)
    }

    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut intercepting = self.intercepting.borrow_mut();
        if intercepting.as_ref().is_some_and(|(owner, _)| *owner == id) {
            *intercepting = None;
        }
        drop(intercepting);
        self.listeners.remove(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Whether a listener currently owns the gesture.
    pub fn is_intercepting(&self) -> bool {
        self.intercepting.borrow().is_some()
    }

    /// Dispatches `event`. Returns true when a listener consumed it, in which
    /// case the list must not scroll or deliver it to its rows.
    pub fn dispatch(&self, event: &PointerEvent) -> bool {
        if event.kind == PointerEventKind::Down {
            self.intercepting.borrow_mut().take();
        }

        let owner = self.intercepting.borrow().clone();
        let consumed = match owner {
            Some((_, listener)) => {
                listener.on_touch_event(event);
                true
            }
            None => {
                let mut consumed = false;
                for (id, listener) in self.listeners.snapshot() {
                    if listener.on_intercept_touch_event(event) {
                        if !event.ends_gesture() && self.listeners.contains(id) {
                            *self.intercepting.borrow_mut() = Some((id, listener));
                        }
                        consumed = true;
                        break;
                    }
                }
                consumed
            }
        };

        if event.ends_gesture() {
            self.intercepting.borrow_mut().take();
        }
        consumed
    }
}

/// Fans row attach and detach notifications out to registered listeners.
#[derive(Default)]
pub struct RowAttachDispatcher {
    listeners: ListenerList<dyn RowAttachListener>,
}

impl RowAttachDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&self, listener: Rc<dyn RowAttachListener>) -> ListenerId {
        self.listeners.add(listener)
    }

    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn row_attached(&self, row: RowId) {
        for (_, listener) in self.listeners.snapshot() {
            listener.on_row_attached(row);
        }
    }

    pub fn row_detached(&self, row: RowId) {
        for (_, listener) in self.listeners.snapshot() {
            listener.on_row_detached(row);
        }
    }
}

#[cfg(test)]
#[path = "../tests/dispatcher_tests.rs"]
mod tests;
