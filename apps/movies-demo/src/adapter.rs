use std::cell::RefCell;
use std::rc::Weak;

use crate::movie::Movie;

/// Told about structural changes to an adapter's items.
pub trait AdapterObserver {
    fn on_item_removed(&self, index: usize);
}

/// Owns the movies shown by a [`MovieListView`](crate::list_view::MovieListView).
pub struct MovieAdapter {
    movies: RefCell<Vec<Movie>>,
    removed: RefCell<Vec<Movie>>,
    observer: RefCell<Option<Weak<dyn AdapterObserver>>>,
}

impl MovieAdapter {
    pub fn new(movies: Vec<Movie>) -> Self {
        Self {
            movies: RefCell::new(movies),
            removed: RefCell::new(Vec::new()),
            observer: RefCell::new(None),
        }
    }

    pub fn set_observer(&self, observer: Weak<dyn AdapterObserver>) {
        *self.observer.borrow_mut() = Some(observer);
    }

    pub fn item_count(&self) -> usize {
        self.movies.borrow().len()
    }

    pub fn movie(&self, index: usize) -> Option<Movie> {
        self.movies.borrow().get(index).copied()
    }

    pub fn titles(&self) -> Vec<&'static str> {
        self.movies
            .borrow()
            .iter()
            .map(|movie| movie.name)
            .collect()
    }

    /// Titles removed so far, oldest first.
    pub fn removed_titles(&self) -> Vec<&'static str> {
        self.removed
            .borrow()
            .iter()
            .map(|movie| movie.name)
            .collect()
    }

    /// Removes the movie at `index` and notifies the observer. Out-of-range
    /// indices are ignored.
    pub fn remove_item(&self, index: usize) -> bool {
        {
            let mut movies = self.movies.borrow_mut();
            if index >= movies.len() {
                log::debug!("ignoring removal of item {index} of {}", movies.len());
                return false;
            }
            let movie = movies.remove(index);
            log::info!("removed \"{}\"", movie.name);
            self.removed.borrow_mut().push(movie);
        }
        let observer = self.observer.borrow().as_ref().and_then(Weak::upgrade);
        if let Some(observer) = observer {
            observer.on_item_removed(index);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movie::movie_catalog;
    use std::cell::Cell;
    use std::rc::Rc;

    struct LastRemoved(Cell<Option<usize>>);

    impl AdapterObserver for LastRemoved {
        fn on_item_removed(&self, index: usize) {
            self.0.set(Some(index));
        }
    }

    #[test]
    fn catalog_has_seven_movies() {
        let adapter = MovieAdapter::new(movie_catalog());
        assert_eq!(adapter.item_count(), 7);
        assert_eq!(adapter.titles()[1], "The Matrix");
    }

    #[test]
    fn remove_item_notifies_observer() {
        let adapter = MovieAdapter::new(movie_catalog());
        let observer = Rc::new(LastRemoved(Cell::new(None)));
        let weak = Rc::downgrade(&observer);
        adapter.set_observer(weak);

        assert!(adapter.remove_item(2));
        assert_eq!(observer.0.get(), Some(2));
        assert_eq!(adapter.removed_titles(), vec!["How to Train Your Dragon"]);
        assert_eq!(adapter.item_count(), 6);
    }

    #[test]
    fn out_of_range_removal_is_a_no_op() {
        let adapter = MovieAdapter::new(movie_catalog());
        assert!(!adapter.remove_item(7));
        assert_eq!(adapter.item_count(), 7);
        assert!(adapter.removed_titles().is_empty());
    }
}
