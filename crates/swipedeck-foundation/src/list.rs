//! Contracts between the swipe manager and the list that hosts its rows.

use std::fmt;
use std::rc::Rc;

use crate::input::{ListenerId, PointerEvent};

/// Identity of an attached row.
///
/// Stable only while the row is attached; a row scrolled out and back in, or
/// rebound to another item, comes back with a new id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub u64);

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row#{}", self.0)
    }
}

pub trait ItemTouchListener {
    /// Offered every event until some listener claims the gesture. Returning
    /// true claims it and stops the list from scrolling.
    fn on_intercept_touch_event(&self, event: &PointerEvent) -> bool;

    /// Receives the rest of a claimed gesture.
    fn on_touch_event(&self, event: &PointerEvent);
}

pub trait RowAttachListener {
    fn on_row_attached(&self, _row: RowId) {}

    fn on_row_detached(&self, row: RowId);
}

/// A scrolling list of rows that supports per-row horizontal translation.
///
/// All methods take `&self`; implementations keep interior state in cells and
/// must not hold a borrow while notifying listeners, since listeners call
/// back into the list.
pub trait SwipeableList {
    fn add_item_touch_listener(&self, listener: Rc<dyn ItemTouchListener>) -> ListenerId;

    fn remove_item_touch_listener(&self, id: ListenerId) -> bool;

    fn add_row_attach_listener(&self, listener: Rc<dyn RowAttachListener>) -> ListenerId;

    fn remove_row_attach_listener(&self, id: ListenerId) -> bool;

    /// The attached row whose bounds contain the point, in list coordinates.
    fn find_row_under(&self, x: f32, y: f32) -> Option<RowId>;

    fn is_row_attached(&self, row: RowId) -> bool;

    fn row_width(&self, row: RowId) -> f32;

    /// Width of the list itself; a row translated this far is off screen.
    fn container_width(&self) -> f32;

    fn set_row_translation_x(&self, row: RowId, translation_x: f32);

    fn row_translation_x(&self, row: RowId) -> f32;

    /// A row that is not recyclable keeps its identity even if scrolled out.
    fn set_row_recyclable(&self, row: RowId, recyclable: bool);
}

/// Item storage behind a list.
pub trait ListAdapter {
    /// Current position of the item bound to `row`, if it still has one.
    fn adapter_position(&self, row: RowId) -> Option<usize>;

    /// Removes the item at `index`. Out-of-range indices are ignored and
    /// return false.
    fn remove_item(&self, index: usize) -> bool;

    fn item_count(&self) -> usize;
}

/// Notified once per row that was swiped off screen.
pub trait DismissListener {
    fn on_dismissed(&self, row: RowId);
}

impl<F> DismissListener for F
where
    F: Fn(RowId),
{
    fn on_dismissed(&self, row: RowId) {
        self(row)
    }
}

/// Dismiss listener that removes the dismissed row's item from an adapter.
pub struct RemoveItemOnDismiss<A: ?Sized> {
    adapter: Rc<A>,
}

impl<A: ListAdapter + ?Sized> RemoveItemOnDismiss<A> {
    pub fn new(adapter: Rc<A>) -> Self {
        Self { adapter }
    }
}

impl<A: ListAdapter + ?Sized> DismissListener for RemoveItemOnDismiss<A> {
    fn on_dismissed(&self, row: RowId) {
        match self.adapter.adapter_position(row) {
            Some(index) => {
                if self.adapter.remove_item(index) {
                    log::info!("removed item {index} dismissed by {row}");
                }
            }
            None => log::debug!("{row} dismissed with no adapter position"),
        }
    }
}
