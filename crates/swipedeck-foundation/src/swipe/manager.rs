//! Swipe-to-dismiss for the rows of a [`SwipeableList`].
//!
//! The manager listens to the list's touch stream, drags the row under a
//! rightward gesture, and on release either flings it off screen or springs
//! it back. A row that ends its fling at or beyond the container width is
//! reported to the [`DismissListener`].

use std::cell::{Cell, RefCell};
use std::mem;
use std::rc::{Rc, Weak};

use swipedeck_animation::{AnimationEnd, AnimationKind, PhysicsAnimation};
use swipedeck_core::FrameClock;

use crate::config::SwipeConfig;
use crate::error::SwipeError;
use crate::input::{ListenerId, PointerEvent, PointerEventKind};
use crate::list::{DismissListener, ItemTouchListener, RowAttachListener, RowId, SwipeableList};
use crate::swipe::animator::{RowGeometry, SwipeEffect, SwipeEvent, SwipePhase};
use crate::swipe::gesture_tracker::{GestureTracker, GestureUpdate, Release};
use crate::swipe::registry::RowAnimationRegistry;

struct Attachment {
    list: Weak<dyn SwipeableList>,
    touch_listener: ListenerId,
    attach_listener: ListenerId,
}

struct SwipeManagerInner {
    config: SwipeConfig,
    frame_clock: FrameClock,
    dismiss_listener: Rc<dyn DismissListener>,
    attachment: RefCell<Option<Attachment>>,
    tracker: RefCell<GestureTracker>,
    /// The row following the pointer and its offset.
    drag: Cell<Option<(RowId, f32)>>,
    registry: RefCell<RowAnimationRegistry>,
    self_ref: Weak<SwipeManagerInner>,
}

/// Attaches swipe-to-dismiss to a list.
///
/// Dropping an attached manager detaches it.
pub struct ItemSwipeManager {
    inner: Rc<SwipeManagerInner>,
}

impl ItemSwipeManager {
    pub fn new(
        frame_clock: FrameClock,
        config: SwipeConfig,
        dismiss_listener: Rc<dyn DismissListener>,
    ) -> Self {
        let inner = Rc::new_cyclic(|self_ref| SwipeManagerInner {
            config,
            frame_clock,
            dismiss_listener,
            attachment: RefCell::new(None),
            tracker: RefCell::new(GestureTracker::new(&config)),
            drag: Cell::new(None),
            registry: RefCell::new(RowAnimationRegistry::new()),
            self_ref: self_ref.clone(),
        });
        Self { inner }
    }

    /// Registers for the list's touch events and row attach notifications.
    pub fn attach<L>(&self, list: &Rc<L>) -> Result<(), SwipeError>
    where
        L: SwipeableList + 'static,
    {
        if self.inner.attachment.borrow().is_some() {
            return Err(SwipeError::AlreadyAttached);
        }
        let list: Rc<dyn SwipeableList> = list.clone();
        let touch_listener = list.add_item_touch_listener(self.inner.clone());
        let attach_listener = list.add_row_attach_listener(self.inner.clone());
        *self.inner.attachment.borrow_mut() = Some(Attachment {
            list: Rc::downgrade(&list),
            touch_listener,
            attach_listener,
        });
        log::debug!("swipe manager attached");
        Ok(())
    }

    /// Unregisters from the list, cancels every animation and puts the
    /// affected rows back at rest.
    pub fn detach(&self) -> Result<(), SwipeError> {
        let attachment = self
            .inner
            .attachment
            .borrow_mut()
            .take()
            .ok_or(SwipeError::NotAttached)?;
        let list = attachment.list.upgrade();
        if let Some(list) = &list {
            list.remove_item_touch_listener(attachment.touch_listener);
            list.remove_row_attach_listener(attachment.attach_listener);
        }

        let mut rows = self.inner.registry.borrow_mut().cancel_all();
        if let Some((row, _)) = self.inner.drag.take() {
            rows.push(row);
        }
        self.inner.tracker.borrow_mut().reset();

        if let Some(list) = &list {
            for &row in &rows {
                if list.is_row_attached(row) {
                    list.set_row_translation_x(row, 0.0);
                    list.set_row_recyclable(row, true);
                }
            }
        }
        log::debug!("swipe manager detached, reset {} rows", rows.len());
        Ok(())
    }

    pub fn is_attached(&self) -> bool {
        self.inner.attachment.borrow().is_some()
    }

    pub fn config(&self) -> &SwipeConfig {
        &self.inner.config
    }

    pub fn phase(&self, row: RowId) -> SwipePhase {
        self.inner.phase_of(row)
    }

    pub fn active_animation_count(&self) -> usize {
        self.inner.registry.borrow().len()
    }
}

impl Drop for ItemSwipeManager {
    fn drop(&mut self) {
        if self.is_attached() {
            log::warn!("swipe manager dropped while attached; detaching");
            if let Err(err) = self.detach() {
                log::error!("detaching a dropped swipe manager failed: {err}");
            }
        }
    }
}

impl std::fmt::Debug for ItemSwipeManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemSwipeManager")
            .field("attached", &self.is_attached())
            .field("drag", &self.inner.drag.get())
            .field("animations", &self.active_animation_count())
            .finish()
    }
}

impl SwipeManagerInner {
    fn list(&self) -> Option<Rc<dyn SwipeableList>> {
        self.attachment
            .borrow()
            .as_ref()
            .and_then(|attachment| attachment.list.upgrade())
    }

    fn phase_of(&self, row: RowId) -> SwipePhase {
        if let Some(phase) = self.registry.borrow().phase(row) {
            return phase;
        }
        match self.drag.get() {
            Some((dragged, offset)) if dragged == row => SwipePhase::Dragging { offset },
            _ => SwipePhase::Idle,
        }
    }

    fn begin_gesture(&self, event: &PointerEvent) {
        // A row left mid-drag by an unfinished gesture goes back to rest.
        if let Some((row, _)) = self.drag.get() {
            log::debug!("{row}: new gesture before release, settling");
            self.handle(row, SwipeEvent::Release { velocity: 0.0 });
        }
        self.tracker.borrow_mut().on_pointer_down(event);
    }

    /// Returns true while a row follows the pointer.
    fn track_move(&self, event: &PointerEvent) -> bool {
        let Some(list) = self.list() else {
            return false;
        };
        let update = self
            .tracker
            .borrow_mut()
            .on_pointer_move(event, |x, y| list.find_row_under(x, y));
        match update {
            GestureUpdate::Dragging { row, offset } => {
                if list.is_row_attached(row) {
                    self.handle(row, SwipeEvent::Drag { offset });
                }
                true
            }
            GestureUpdate::NotASwipe => false,
            GestureUpdate::Stale => {
                log::warn!(
                    "pointer move at {:?} without a pointer down",
                    event.position
                );
                false
            }
        }
    }

    fn finish_gesture(&self, event: &PointerEvent) {
        let release = {
            let mut tracker = self.tracker.borrow_mut();
            if !tracker.is_tracking() {
                log::warn!("{:?} without a pointer down", event.kind);
                return;
            }
            match event.kind {
                PointerEventKind::Cancel => tracker.on_pointer_cancel(event),
                _ => tracker.on_pointer_up(event),
            }
        };
        let Some(Release { row, velocity }) = release else {
            return;
        };
        match self.list() {
            Some(list) if list.is_row_attached(row) => {
                self.handle(row, SwipeEvent::Release { velocity });
            }
            _ => log::debug!("{row} went away before release"),
        }
    }

    /// Runs one transition for `row` and applies its effects. No borrow is
    /// held while the dismiss listener runs.
    fn handle(&self, row: RowId, event: SwipeEvent) {
        let Some(list) = self.list() else {
            self.registry.borrow_mut().cancel_and_remove(row);
            return;
        };
        let geometry = RowGeometry {
            row_width: list.row_width(row),
            container_width: list.container_width(),
        };
        let phase = self.phase_of(row);
        let (next, effects) = phase.transition(event, geometry);
        if mem::discriminant(&phase) != mem::discriminant(&next) {
            log::debug!("{row}: {phase:?} -> {next:?} on {event:?}");
        }

        match next {
            SwipePhase::Dragging { offset } => self.drag.set(Some((row, offset))),
            _ => {
                if matches!(self.drag.get(), Some((dragged, _)) if dragged == row) {
                    self.drag.set(None);
                }
            }
        }

        let mut dismissed = false;
        for effect in effects {
            match effect {
                SwipeEffect::ClearAnimation => {
                    self.registry.borrow_mut().cancel_and_remove(row);
                }
                SwipeEffect::Translate(offset) => list.set_row_translation_x(row, offset),
                SwipeEffect::StartFling {
                    from,
                    velocity,
                    max,
                } => {
                    let kind = AnimationKind::fling(self.config.decay_spec(), max);
                    self.start_animation(row, SwipePhase::Flinging, kind, from, velocity);
                }
                SwipeEffect::StartSettle { from, velocity } => {
                    let kind = AnimationKind::spring(self.config.settle_spring, 0.0);
                    self.start_animation(row, SwipePhase::Settling, kind, from, velocity);
                }
                SwipeEffect::SetRecyclable(recyclable) => list.set_row_recyclable(row, recyclable),
                SwipeEffect::Dismiss => dismissed = true,
            }
        }

        if dismissed {
            log::info!("{row} dismissed");
            self.dismiss_listener.on_dismissed(row);
        }
    }

    fn start_animation(
        &self,
        row: RowId,
        phase: SwipePhase,
        kind: AnimationKind,
        from: f32,
        velocity: f32,
    ) {
        let generation = self.registry.borrow_mut().next_generation();
        let frame_target = self.self_ref.clone();
        let end_target = self.self_ref.clone();
        let animation = PhysicsAnimation::new(self.frame_clock.clone(), kind)
            .with_update_listener(move |value| {
                if let Some(inner) = frame_target.upgrade() {
                    inner.on_animation_frame(row, generation, value);
                }
            })
            .with_end_listener(move |end| {
                if let Some(inner) = end_target.upgrade() {
                    inner.on_animation_end(row, generation, end);
                }
            });
        self.registry
            .borrow_mut()
            .register(row, phase, generation, animation.clone());
        log::debug!("{row}: start {phase:?} from {from:.1} at {velocity:.1} px/s");
        animation.start(from, velocity);
    }

    fn on_animation_frame(&self, row: RowId, generation: u64, value: f32) {
        if !self.registry.borrow().is_current(row, generation) {
            return;
        }
        if let Some(list) = self.list() {
            log::trace!("{row}: offset {value:.2}");
            list.set_row_translation_x(row, value);
        }
    }

    fn on_animation_end(&self, row: RowId, generation: u64, end: AnimationEnd) {
        let phase = {
            let registry = self.registry.borrow();
            if !registry.is_current(row, generation) {
                log::trace!("{row}: ignoring end of replaced animation {generation}");
                return;
            }
            registry.phase(row)
        };
        let event = match phase {
            Some(SwipePhase::Flinging) => SwipeEvent::FlingEnded {
                value: end.value,
                velocity: end.velocity,
            },
            Some(SwipePhase::Settling) => SwipeEvent::SettleEnded,
            _ => return,
        };
        self.handle(row, event);
    }
}

impl ItemTouchListener for SwipeManagerInner {
    fn on_intercept_touch_event(&self, event: &PointerEvent) -> bool {
        match event.kind {
            PointerEventKind::Down => {
                self.begin_gesture(event);
                false
            }
            PointerEventKind::Move => self.track_move(event),
            PointerEventKind::Up | PointerEventKind::Cancel => {
                self.finish_gesture(event);
                false
            }
        }
    }

    fn on_touch_event(&self, event: &PointerEvent) {
        match event.kind {
            PointerEventKind::Down => self.begin_gesture(event),
            PointerEventKind::Move => {
                self.track_move(event);
            }
            PointerEventKind::Up | PointerEventKind::Cancel => self.finish_gesture(event),
        }
    }
}

impl RowAttachListener for SwipeManagerInner {
    fn on_row_detached(&self, row: RowId) {
        self.handle(row, SwipeEvent::Detached);
    }
}

#[cfg(test)]
#[path = "../tests/manager_tests.rs"]
mod tests;
