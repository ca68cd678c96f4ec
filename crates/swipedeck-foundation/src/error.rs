use std::fmt;

/// Errors from attaching or detaching an item swipe manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeError {
    /// The manager is already attached to a list.
    AlreadyAttached,
    /// The manager is not attached to any list.
    NotAttached,
}

impl fmt::Display for SwipeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwipeError::AlreadyAttached => write!(f, "swipe manager is already attached to a list"),
            SwipeError::NotAttached => write!(f, "swipe manager is not attached to a list"),
        }
    }
}

impl std::error::Error for SwipeError {}
