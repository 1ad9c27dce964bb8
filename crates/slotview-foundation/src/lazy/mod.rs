//! Virtualized list and grid engine.
//!
//! Only the items inside the viewport (plus a small buffer) are bound to
//! visual slots; everything else exists only as a size in the index.
//!
//! # Architecture
//!
//! - [`ScrollController`] - orchestrates rebuilds, scrolling and slot diffing
//! - [`PrefixIndex`] - cumulative line offsets for variable-size items
//! - [`SlotPool`] - idle slots waiting to be rebound
//! - [`ActiveSlots`] - index to slot table for the current window
//! - [`SizeCache`] - LRU of measured item sizes (lookups count as use)
//! - [`ScrollState`] - normalized position shared with the host
//!
//! # Example
//!
//! ```rust,ignore
//! use slotview_foundation::lazy::{ScrollController, ScrollControllerConfig, ScrollState};
//! use slotview_ui_layout::{ItemSize, Size};
//!
//! let scroll = ScrollState::new(Size::new(320.0, 640.0));
//! let mut controller = ScrollController::builder()
//!     .config(ScrollControllerConfig::new().uniform(ItemSize::new(48.0, 320.0)))
//!     .hooks(my_hooks)
//!     .item_source(|| rows.len())
//!     .scroll_state(scroll.clone())
//!     .build()?;
//! controller.rebuild(true)?;
//!
//! // From the frame loop:
//! controller.tick(frame_time_nanos);
//! ```

mod active_slots;
mod config;
mod controller;
mod error;
mod item_provider;
mod prefix_index;
mod scroll_state;
mod size_cache;
mod slot_pool;
mod stats;
mod viewport;

pub use active_slots::*;
pub use config::*;
pub use controller::*;
pub use error::*;
pub use item_provider::*;
pub use prefix_index::*;
pub use scroll_state::*;
pub use size_cache::*;
pub use slot_pool::*;
pub use stats::*;
pub use viewport::*;
