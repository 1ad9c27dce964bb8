//! Viewport validation.
//!
//! Hosts sometimes report an unbounded main-axis size (a list placed inside an
//! unconstrained parent). Binding every item in that case would defeat
//! virtualization, so the handler substitutes an estimate worth a screenful of
//! items.

use slotview_ui_layout::{Axis, Size};

/// Main size assumed for items before anything has been measured.
pub const DEFAULT_ITEM_SIZE_ESTIMATE: f32 = 48.0;

/// Largest main-axis viewport taken at face value.
const MAX_REASONABLE_VIEWPORT: f32 = 100_000.0;

/// Items that fit in the substitute viewport.
const INFINITE_VIEWPORT_ITEM_COUNT: f32 = 20.0;

/// Effective viewport used for range queries.
#[derive(Clone, Copy, Debug)]
pub struct ViewportHandler {
    effective: Size,
    is_infinite: bool,
}

impl ViewportHandler {
    /// `average_item_main` is the running average from the size cache (or the
    /// uniform size); values below [`DEFAULT_ITEM_SIZE_ESTIMATE`] are raised
    /// to it.
    pub fn new(viewport: Size, axis: Axis, average_item_main: f32, spacing: f32) -> Self {
        let main = axis.main_of(viewport);
        let cross = axis.cross_of(viewport);
        let is_infinite = main.is_infinite() || main > MAX_REASONABLE_VIEWPORT;

        let effective_main = if is_infinite {
            let average = if average_item_main.is_finite() {
                average_item_main.max(DEFAULT_ITEM_SIZE_ESTIMATE)
            } else {
                DEFAULT_ITEM_SIZE_ESTIMATE
            };
            let estimated = (average + spacing) * INFINITE_VIEWPORT_ITEM_COUNT;
            log::warn!(
                "ScrollController: unbounded viewport ({main}), using fallback size {estimated}. \
                 Give the list a bounded main-axis size."
            );
            estimated
        } else if main.is_nan() || main < 0.0 {
            0.0
        } else {
            main
        };

        let cross = if cross.is_finite() { cross.max(0.0) } else { 0.0 };
        Self {
            effective: axis.size(effective_main, cross),
            is_infinite,
        }
    }

    #[inline]
    pub fn effective_size(&self) -> Size {
        self.effective
    }

    #[inline]
    pub fn is_infinite(&self) -> bool {
        self.is_infinite
    }
}
