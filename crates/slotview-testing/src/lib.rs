//! Testing utilities and harness for slotview

pub mod hooks;
pub mod items;
pub mod robot;
pub mod robot_assertions;

// Re-export testing utilities
pub use hooks::*;
pub use items::*;
pub use robot::*;

pub mod prelude {
    pub use crate::hooks::*;
    pub use crate::items::*;
    pub use crate::robot::*;
    pub use crate::robot_assertions;
    pub use crate::robot_assertions::linear_scan_range;
}
