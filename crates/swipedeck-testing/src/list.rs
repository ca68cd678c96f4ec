//! An in-memory list of fixed-height rows for driving swipe tests.

use std::cell::RefCell;
use std::rc::Rc;

use swipedeck_foundation::{
    ItemTouchDispatcher, ItemTouchListener, ListAdapter, ListenerId, Point, PointerEvent,
    PointerEventKind, Rect, RowAttachDispatcher, RowAttachListener, RowId, Size, SwipeableList,
};

#[derive(Debug, Clone)]
struct TestRow {
    id: RowId,
    label: String,
    translation_x: f32,
    recyclable: bool,
}

#[derive(Debug, Default)]
struct TestListState {
    rows: Vec<TestRow>,
    next_row_id: u64,
    removed: Vec<String>,
    scroll_moves: usize,
}

impl TestListState {
    fn new_row_id(&mut self) -> RowId {
        self.next_row_id += 1;
        RowId(self.next_row_id)
    }

    fn row(&self, id: RowId) -> Option<&TestRow> {
        self.rows.iter().find(|row| row.id == id)
    }

    fn row_mut(&mut self, id: RowId) -> Option<&mut TestRow> {
        self.rows.iter_mut().find(|row| row.id == id)
    }
}

/// Every item is on screen: item `i` occupies `[i * row_height, (i + 1) * row_height)`.
///
/// Removing an item detaches its row and shifts the rows below it up. Moves
/// that no listener intercepts are counted as list scrolling.
pub struct TestList {
    row_width: f32,
    row_height: f32,
    container_width: f32,
    state: RefCell<TestListState>,
    touch: ItemTouchDispatcher,
    attach: RowAttachDispatcher,
}

impl TestList {
    pub fn new(
        labels: impl IntoIterator<Item = impl Into<String>>,
        row_width: f32,
        container_width: f32,
        row_height: f32,
    ) -> Rc<Self> {
        let mut state = TestListState::default();
        for label in labels {
            let id = state.new_row_id();
            state.rows.push(TestRow {
                id,
                label: label.into(),
                translation_x: 0.0,
                recyclable: true,
            });
        }
        Rc::new(Self {
            row_width,
            row_height,
            container_width,
            state: RefCell::new(state),
            touch: ItemTouchDispatcher::new(),
            attach: RowAttachDispatcher::new(),
        })
    }

    /// `count` items labelled "item 0", "item 1", ... in 300px rows filling a
    /// 300px container.
    pub fn with_items(count: usize) -> Rc<Self> {
        Self::new(
            (0..count).map(|index| format!("item {index}")),
            300.0,
            300.0,
            100.0,
        )
    }

    /// Feeds a pointer event through the list's touch dispatch. Returns true
    /// if a listener consumed it.
    pub fn dispatch(&self, event: &PointerEvent) -> bool {
        let consumed = self.touch.dispatch(event);
        if !consumed && event.kind == PointerEventKind::Move {
            self.state.borrow_mut().scroll_moves += 1;
        }
        consumed
    }

    pub fn row_at(&self, index: usize) -> Option<RowId> {
        self.state.borrow().rows.get(index).map(|row| row.id)
    }

    pub fn labels(&self) -> Vec<String> {
        self.state
            .borrow()
            .rows
            .iter()
            .map(|row| row.label.clone())
            .collect()
    }

    pub fn removed(&self) -> Vec<String> {
        self.state.borrow().removed.clone()
    }

    pub fn is_recyclable(&self, row: RowId) -> bool {
        self.state
            .borrow()
            .row(row)
            .map_or(true, |row| row.recyclable)
    }

    /// Moves that reached the list's own scroll handling.
    pub fn scroll_moves(&self) -> usize {
        self.state.borrow().scroll_moves
    }

    pub fn row_bounds(&self, index: usize) -> Rect {
        Rect::from_origin_size(
            Point::new(0.0, index as f32 * self.row_height),
            Size::new(self.row_width, self.row_height),
        )
    }

    /// Centre of the row at `index`, for aiming gestures.
    pub fn row_center(&self, index: usize) -> Point {
        let bounds = self.row_bounds(index);
        Point::new(
            bounds.x + bounds.width / 2.0,
            bounds.y + bounds.height / 2.0,
        )
    }

    /// Scrolls the row at `index` out and back in: the old row detaches and
    /// the item is bound to a fresh row. Returns the new row.
    pub fn rebind_row(&self, index: usize) -> Option<RowId> {
        let (old, new) = {
            let mut state = self.state.borrow_mut();
            let new = state.new_row_id();
            let row = state.rows.get_mut(index)?;
            let old = row.id;
            row.id = new;
            row.translation_x = 0.0;
            row.recyclable = true;
            (old, new)
        };
        self.attach.row_detached(old);
        self.attach.row_attached(new);
        Some(new)
    }

    pub fn touch_listener_count(&self) -> usize {
        self.touch.listener_count()
    }

    pub fn attach_listener_count(&self) -> usize {
        self.attach.listener_count()
    }
}

impl SwipeableList for TestList {
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
        if y < 0.0 {
            return None;
        }
        let index = (y / self.row_height) as usize;
        if !self.row_bounds(index).contains(x, y) {
            return None;
        }
        self.row_at(index)
    }

    fn is_row_attached(&self, row: RowId) -> bool {
        self.state.borrow().row(row).is_some()
    }

    fn row_width(&self, _row: RowId) -> f32 {
        self.row_width
    }

    fn container_width(&self) -> f32 {
        self.container_width
    }

    fn set_row_translation_x(&self, row: RowId, translation_x: f32) {
        match self.state.borrow_mut().row_mut(row) {
            Some(row) => row.translation_x = translation_x,
            None => log::trace!("translation for detached {row}"),
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

impl ListAdapter for TestList {
    fn adapter_position(&self, row: RowId) -> Option<usize> {
        self.state
            .borrow()
            .rows
            .iter()
            .position(|entry| entry.id == row)
    }

    fn remove_item(&self, index: usize) -> bool {
        let removed = {
            let mut state = self.state.borrow_mut();
            if index >= state.rows.len() {
                return false;
            }
            let row = state.rows.remove(index);
            state.removed.push(row.label);
            row.id
        };
        self.attach.row_detached(removed);
        true
    }

    fn item_count(&self) -> usize {
        self.state.borrow().rows.len()
    }
}
