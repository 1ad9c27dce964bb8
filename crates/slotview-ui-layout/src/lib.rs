//! Layout contracts & strategies for slotview lists and grids

mod axis;
mod geometry;
mod item_size;
mod padding;
mod range;
mod strategy;

pub use axis::*;
pub use geometry::*;
pub use item_size::*;
pub use padding::*;
pub use range::*;
pub use strategy::*;

pub mod prelude {
    pub use crate::axis::Axis;
    pub use crate::geometry::{Point, Rect, Size};
    pub use crate::item_size::{ContentExtent, ItemSize};
    pub use crate::padding::ContentPadding;
    pub use crate::range::VisibleRange;
    pub use crate::strategy::{LayoutKind, LayoutStrategy};
}
