//! A vertically scrolling list of movie rows.
//!
//! Only rows that intersect the viewport are attached. Each attached row is
//! bound to an adapter position; scrolling a row out detaches it and scrolling
//! an item back in binds it to a fresh [`RowId`].

use std::cell::RefCell;
use std::ops::Range;
use std::rc::{Rc, Weak};

use swipedeck_foundation::{
    ItemTouchDispatcher, ItemTouchListener, ListAdapter, ListenerId, Point, PointerEvent,
    PointerEventKind, Rect, RowAttachDispatcher, RowAttachListener, RowId, Size, SwipeableList,
};

use crate::adapter::{AdapterObserver, MovieAdapter};

/// Fixed dimensions of the list, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListGeometry {
    pub container_width: f32,
    pub row_width: f32,
    pub row_height: f32,
    pub viewport_height: f32,
}

impl ListGeometry {
    /// Rows span the full width of the container.
    pub fn full_width(container_width: f32, row_height: f32, viewport_height: f32) -> Self {
        Self {
            container_width,
            row_width: container_width,
            row_height,
            viewport_height,
        }
    }
}

/// What an attached row currently shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowSnapshot {
    pub id: RowId,
    pub position: usize,
    pub translation_x: f32,
    pub recyclable: bool,
}

#[derive(Debug, Default)]
struct ViewState {
    /// Sorted by position.
    rows: Vec<RowSnapshot>,
    scroll_y: f32,
    next_row_id: u64,
    last_touch_y: Option<f32>,
}

impl ViewState {
    fn row(&self, id: RowId) -> Option<&RowSnapshot> {
        self.rows.iter().find(|row| row.id == id)
    }

    fn row_mut(&mut self, id: RowId) -> Option<&mut RowSnapshot> {
        self.rows.iter_mut().find(|row| row.id == id)
    }
}

pub struct MovieListView {
    adapter: Rc<MovieAdapter>,
    geometry: ListGeometry,
    state: RefCell<ViewState>,
    touch: ItemTouchDispatcher,
    attach: RowAttachDispatcher,
}

impl MovieListView {
    pub fn new(adapter: Rc<MovieAdapter>, geometry: ListGeometry) -> Rc<Self> {
        let view = Rc::new(Self {
            adapter,
            geometry,
            state: RefCell::new(ViewState::default()),
            touch: ItemTouchDispatcher::new(),
            attach: RowAttachDispatcher::new(),
        });
        let weak = Rc::downgrade(&view);
        let observer: Weak<dyn AdapterObserver> = weak;
        view.adapter.set_observer(observer);
        view.layout();
        view
    }

    pub fn adapter(&self) -> &Rc<MovieAdapter> {
        &self.adapter
    }

    pub fn geometry(&self) -> ListGeometry {
        self.geometry
    }

    /// Routes a touch event to the item touch listeners first; events nobody
    /// claims scroll the list vertically.
    pub fn dispatch_touch(&self, event: &PointerEvent) -> bool {
        if self.touch.dispatch(event) {
            self.state.borrow_mut().last_touch_y = None;
            return true;
        }
        match event.kind {
            PointerEventKind::Down => {
                self.state.borrow_mut().last_touch_y = Some(event.y());
            }
            PointerEventKind::Move => {
                let last = self.state.borrow_mut().last_touch_y.replace(event.y());
                if let Some(last) = last {
                    self.scroll_by(last - event.y());
                }
            }
            PointerEventKind::Up | PointerEventKind::Cancel => {
                self.state.borrow_mut().last_touch_y = None;
            }
        }
        false
    }

    /// Scrolls the content by `dy` pixels, clamped to the content height.
    pub fn scroll_by(&self, dy: f32) {
        {
            let mut state = self.state.borrow_mut();
            let max_scroll = self.max_scroll();
            state.scroll_y = (state.scroll_y + dy).clamp(0.0, max_scroll);
        }
        self.layout();
    }

    pub fn scroll_y(&self) -> f32 {
        self.state.borrow().scroll_y
    }

    pub fn rows(&self) -> Vec<RowSnapshot> {
        self.state.borrow().rows.clone()
    }

    pub fn row_for_position(&self, position: usize) -> Option<RowId> {
        self.state
            .borrow()
            .rows
            .iter()
            .find(|row| row.position == position)
            .map(|row| row.id)
    }

    /// On-screen bounds of the item at `position`, whether or not it is attached.
    pub fn item_bounds(&self, position: usize) -> Rect {
        let top = position as f32 * self.geometry.row_height - self.state.borrow().scroll_y;
        Rect::from_origin_size(
            Point::new(0.0, top),
            Size::new(self.geometry.row_width, self.geometry.row_height),
        )
    }

    /// Centre of the item at `position` in viewport coordinates.
    pub fn item_center(&self, position: usize) -> Point {
        let bounds = self.item_bounds(position);
        Point::new(
            bounds.x + bounds.width / 2.0,
            bounds.y + bounds.height / 2.0,
        )
    }

    fn max_scroll(&self) -> f32 {
        let content = self.adapter.item_count() as f32 * self.geometry.row_height;
        (content - self.geometry.viewport_height).max(0.0)
    }

    fn visible_range(&self, scroll_y: f32) -> Range<usize> {
        let height = self.geometry.row_height;
        if height <= 0.0 {
            return 0..0;
        }
        let count = self.adapter.item_count();
        let first = (scroll_y / height).floor().max(0.0) as usize;
        let last = ((scroll_y + self.geometry.viewport_height) / height).ceil() as usize;
        first.min(count)..last.min(count)
    }

    /// Binds rows to the items inside the viewport and releases the others.
    fn layout(&self) {
        let (detached, attached) = {
            let mut state = self.state.borrow_mut();
            state.scroll_y = state.scroll_y.min(self.max_scroll());
            let range = self.visible_range(state.scroll_y);

            let mut detached = Vec::new();
            state.rows.retain(|row| {
                let keep = range.contains(&row.position);
                if !keep {
                    detached.push(row.id);
                }
                keep
            });

            let mut attached = Vec::new();
            for position in range {
                if state.rows.iter().any(|row| row.position == position) {
                    continue;
                }
                state.next_row_id += 1;
                let id = RowId(state.next_row_id);
                state.rows.push(RowSnapshot {
                    id,
                    position,
                    translation_x: 0.0,
                    recyclable: true,
                });
                attached.push(id);
            }
            state.rows.sort_by_key(|row| row.position);
            (detached, attached)
        };

        for row in detached {
            log::trace!("{row} scrolled out");
            self.attach.row_detached(row);
        }
        for row in attached {
            self.attach.row_attached(row);
        }
    }
}

impl AdapterObserver for MovieListView {
    fn on_item_removed(&self, index: usize) {
        let removed = {
            let mut state = self.state.borrow_mut();
            let slot = state.rows.iter().position(|row| row.position == index);
            let removed = slot.map(|slot| state.rows.remove(slot).id);
            for row in state.rows.iter_mut().filter(|row| row.position > index) {
                row.position -= 1;
            }
            removed
        };
        if let Some(row) = removed {
            self.attach.row_detached(row);
        }
        self.layout();
    }
}

impl SwipeableList for MovieListView {
    fn add_item_touch_listener(&self, listener: Rc<dyn ItemTouchListener>) -> ListenerId {
        self.touch.add_listener(listener)
    }

    fn remove_item_touch_listener(&self, id: ListenerId) -> bool {
        self.touch.remove_listener(id)
    }

    fn add_row_attach_listener(&self, listener: Rc<dyn RowAttachListener>) -> ListenerId {
        self.attach.add_listener(listener)
    }

    fn remove_row_attach_listener(&self, id: ListenerId) -> bool {
        self.attach.remove_listener(id)
    }

    fn find_row_under(&self, x: f32, y: f32) -> Option<RowId> {
        let state = self.state.borrow();
        let content_y = y + state.scroll_y;
        if content_y < 0.0 || self.geometry.row_height <= 0.0 {
            return None;
        }
        let position = (content_y / self.geometry.row_height) as usize;
        let row = state.rows.iter().find(|row| row.position == position)?;
        let top = position as f32 * self.geometry.row_height - state.scroll_y;
        let bounds = Rect::from_origin_size(
            Point::new(0.0, top),
            Size::new(self.geometry.row_width, self.geometry.row_height),
        );
        bounds.contains(x, y).then_some(row.id)
    }

    fn is_row_attached(&self, row: RowId) -> bool {
        self.state.borrow().row(row).is_some()
    }

    fn row_width(&self, _row: RowId) -> f32 {
        self.geometry.row_width
    }

    fn container_width(&self) -> f32 {
        self.geometry.container_width
    }

    fn set_row_translation_x(&self, row: RowId, translation_x: f32) {
        if let Some(row) = self.state.borrow_mut().row_mut(row) {
            row.translation_x = translation_x;
        }
    }

    fn row_translation_x(&self, row: RowId) -> f32 {
        self.state
            .borrow()
            .row(row)
            .map_or(0.0, |row| row.translation_x)
    }

    fn set_row_recyclable(&self, row: RowId, recyclable: bool) {
        if let Some(row) = self.state.borrow_mut().row_mut(row) {
            row.recyclable = recyclable;
        }
    }
}

/// Rows map to adapter positions through the view's bindings; removal is
/// forwarded to the adapter.
impl ListAdapter for MovieListView {
    fn adapter_position(&self, row: RowId) -> Option<usize> {
        self.state.borrow().row(row).map(|row| row.position)
    }

    fn remove_item(&self, index: usize) -> bool {
        self.adapter.remove_item(index)
    }

    fn item_count(&self) -> usize {
        self.adapter.item_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movie::movie_catalog;

    #[derive(Default)]
    struct AttachLog {
        attached: RefCell<Vec<RowId>>,
        detached: RefCell<Vec<RowId>>,
    }

    impl RowAttachListener for AttachLog {
        fn on_row_attached(&self, row: RowId) {
            self.attached.borrow_mut().push(row);
        }

        fn on_row_detached(&self, row: RowId) {
            self.detached.borrow_mut().push(row);
        }
    }

    fn view() -> Rc<MovieListView> {
        let adapter = Rc::new(MovieAdapter::new(movie_catalog()));
        MovieListView::new(adapter, ListGeometry::full_width(1080.0, 240.0, 1200.0))
    }

    #[test]
    fn only_visible_items_are_bound() {
        let view = view();
        let positions: Vec<usize> = view.rows().iter().map(|row| row.position).collect();
        assert_eq!(positions, vec![0, 1, 2, 3, 4]);
        assert_eq!(view.find_row_under(10.0, 250.0), view.row_for_position(1));
        assert_eq!(view.find_row_under(1080.0, 250.0), None);
    }

    #[test]
    fn scrolling_rebinds_rows_with_fresh_ids() {
        let view = view();
        let log = Rc::new(AttachLog::default());
        view.add_row_attach_listener(log.clone());
        let first = view.row_for_position(0).expect("row");
        let second = view.row_for_position(1).expect("row");

        view.scroll_by(480.0);
        assert_eq!(view.scroll_y(), 480.0);
        assert!(!view.is_row_attached(first));
        assert_eq!(log.detached.borrow().as_slice(), &[first, second]);
        let positions: Vec<usize> = view.rows().iter().map(|row| row.position).collect();
        assert_eq!(positions, vec![2, 3, 4, 5, 6]);
        assert_eq!(log.attached.borrow().len(), 2);

        // already at the bottom
        view.scroll_by(100.0);
        assert_eq!(view.scroll_y(), 480.0);

        view.scroll_by(-1000.0);
        assert_eq!(view.scroll_y(), 0.0);
        let again = view.row_for_position(0).expect("row");
        assert_ne!(again, first);
    }

    #[test]
    fn unclaimed_vertical_drag_scrolls() {
        let view = view();
        view.dispatch_touch(&PointerEvent::down(500.0, 900.0, 0));
        view.dispatch_touch(&PointerEvent::moved(500.0, 800.0, 10));
        view.dispatch_touch(&PointerEvent::moved(500.0, 700.0, 20));
        view.dispatch_touch(&PointerEvent::up(500.0, 700.0, 20));
        assert_eq!(view.scroll_y(), 200.0);
    }

    #[test]
    fn removal_detaches_the_row_and_shifts_positions() {
        let view = view();
        let log = Rc::new(AttachLog::default());
        view.add_row_attach_listener(log.clone());
        let second = view.row_for_position(1).expect("row");
        let third = view.row_for_position(2).expect("row");

        assert!(ListAdapter::remove_item(&*view, 1));
        assert_eq!(log.detached.borrow().as_slice(), &[second]);
        assert_eq!(view.adapter_position(third), Some(1));
        // the sixth movie slides into view
        assert_eq!(log.attached.borrow().len(), 1);
        assert_eq!(view.rows().len(), 5);
    }
}
