//! A movie catalog whose rows can be swiped off screen.
//!
//! [`MainScreen`] wires a [`MovieListView`] to an
//! [`ItemSwipeManager`](swipedeck_foundation::ItemSwipeManager) that removes
//! dismissed movies from the [`MovieAdapter`]. [`ScriptedSession`] drives the
//! screen with synthetic touch gestures.

pub mod adapter;
pub mod list_view;
pub mod movie;
pub mod options;
pub mod screen;
pub mod session;

pub use adapter::{AdapterObserver, MovieAdapter};
pub use list_view::{ListGeometry, MovieListView, RowSnapshot};
pub use movie::{movie_catalog, Movie, PosterId};
pub use options::{DemoOptions, Scenario};
pub use screen::{MainScreen, ScreenError};
pub use session::{Gesture, ScriptedSession, SessionReport};
