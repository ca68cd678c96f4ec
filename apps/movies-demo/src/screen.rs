//! The movie list screen and its lifecycle.

use std::fmt;
use std::rc::Rc;

use swipedeck_core::FrameClock;
use swipedeck_foundation::{ItemSwipeManager, RemoveItemOnDismiss, SwipeConfig, SwipeError};

use crate::adapter::MovieAdapter;
use crate::list_view::{ListGeometry, MovieListView};
use crate::movie::movie_catalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenError {
    /// A lifecycle step ran before `on_create`.
    NotCreated,
    Swipe(SwipeError),
}

impl fmt::Display for ScreenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScreenError::NotCreated => write!(f, "screen has not been created"),
            ScreenError::Swipe(err) => write!(f, "swipe handling failed: {err}"),
        }
    }
}

impl std::error::Error for ScreenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScreenError::Swipe(err) => Some(err),
            ScreenError::NotCreated => None,
        }
    }
}

impl From<SwipeError> for ScreenError {
    fn from(err: SwipeError) -> Self {
        ScreenError::Swipe(err)
    }
}

struct Content {
    list: Rc<MovieListView>,
    swipe_manager: ItemSwipeManager,
}

/// Shows the movie catalog. Swipe-to-dismiss is live between `on_start` and
/// `on_stop`.
pub struct MainScreen {
    frame_clock: FrameClock,
    geometry: ListGeometry,
    config: SwipeConfig,
    content: Option<Content>,
}

impl MainScreen {
    pub fn new(frame_clock: FrameClock, geometry: ListGeometry, config: SwipeConfig) -> Self {
        Self {
            frame_clock,
            geometry,
            config,
            content: None,
        }
    }

    /// Builds the list and its swipe manager. Dismissed movies are removed
    /// from the adapter.
    pub fn on_create(&mut self) {
        if self.content.is_some() {
            log::warn!("on_create called twice, keeping the existing list");
            return;
        }
        let adapter = Rc::new(MovieAdapter::new(movie_catalog()));
        let list = MovieListView::new(adapter, self.geometry);
        let dismiss = RemoveItemOnDismiss::new(Rc::clone(&list));
        let swipe_manager =
            ItemSwipeManager::new(self.frame_clock.clone(), self.config, Rc::new(dismiss));
        log::debug!("created list of {} movies", list.adapter().item_count());
        self.content = Some(Content {
            list,
            swipe_manager,
        });
    }

    pub fn on_start(&mut self) -> Result<(), ScreenError> {
        let content = self.content.as_ref().ok_or(ScreenError::NotCreated)?;
        content.swipe_manager.attach(&content.list)?;
        Ok(())
    }

    pub fn on_stop(&mut self) -> Result<(), ScreenError> {
        let content = self.content.as_ref().ok_or(ScreenError::NotCreated)?;
        content.swipe_manager.detach()?;
        Ok(())
    }

    pub fn list(&self) -> Option<&Rc<MovieListView>> {
        self.content.as_ref().map(|content| &content.list)
    }

    pub fn swipe_manager(&self) -> Option<&ItemSwipeManager> {
        self.content.as_ref().map(|content| &content.swipe_manager)
    }

    pub fn is_started(&self) -> bool {
        self.swipe_manager()
            .map_or(false, ItemSwipeManager::is_attached)
    }
}
