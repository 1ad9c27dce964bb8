//! Animation support for slotview.
//!
//! Provides easing curves and explicit, tick-driven tween state used by the
//! list controller's animated `scroll_to`.

mod animation;
mod easing;

pub use animation::{AnimationFrame, AnimationSpec, ScrollAnimation};
pub use easing::{CubicBezier, Easing};
