//! Testing utilities and harness for swipedeck

pub mod clock;
pub mod list;
pub mod robot;
pub mod robot_assertions;

pub use clock::ManualClock;
pub use list::TestList;
pub use robot::{init_test_logging, SwipeRobot};

pub mod prelude {
    pub use crate::clock::ManualClock;
    pub use crate::list::TestList;
    pub use crate::robot::{init_test_logging, SwipeRobot};
    pub use crate::robot_assertions;
}
