//! Interfaces the lazy list consumes from its host.
//!
//! The engine never touches item data. It asks an [`ItemSource`] how many items
//! exist, an [`ItemSizeProvider`] how large each one is (variable sizing only),
//! and drives visual slots through [`SlotHooks`].

use super::error::{HookError, SizeError};
use super::slot_pool::SlotId;
use slotview_ui_layout::{ItemSize, LayoutStrategy, Point, Rect, Size};

/// Supplies the number of items in the collection.
///
/// Called on every rebuild; implementations should be cheap.
pub trait ItemSource {
    fn item_count(&self) -> usize;
}

impl<F> ItemSource for F
where
    F: Fn() -> usize,
{
    fn item_count(&self) -> usize {
        self()
    }
}

/// Measures individual items for variable-size layouts.
///
/// Must be fast: a rebuild calls it once per item not found in the size cache.
/// Errors and non-positive sizes are replaced with a fallback by the caller.
pub trait ItemSizeProvider {
    fn item_size(
        &self,
        index: usize,
        viewport: Size,
        layout: &LayoutStrategy,
    ) -> Result<ItemSize, SizeError>;
}

impl<F> ItemSizeProvider for F
where
    F: Fn(usize, Size, &LayoutStrategy) -> Result<ItemSize, SizeError>,
{
    fn item_size(
        &self,
        index: usize,
        viewport: Size,
        layout: &LayoutStrategy,
    ) -> Result<ItemSize, SizeError> {
        self(index, viewport, layout)
    }
}

/// Where a bound slot should be drawn, in content coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlotPlacement {
    pub index: usize,
    pub bounds: Rect,
}

impl SlotPlacement {
    pub fn origin(&self) -> Point {
        self.bounds.origin()
    }

    pub fn size(&self) -> Size {
        self.bounds.size()
    }
}

/// Lifecycle callbacks for visual slots.
///
/// Each callback fires at most once per transition: `create` when the pool is
/// empty, `bind` when a slot starts showing an index, `recycle` when it stops,
/// `destroy` when the pool is full or the controller is disposed. `position`
/// is called after every bind and on every refresh that keeps the slot.
pub trait SlotHooks {
    type Slot;

    fn create(&mut self, id: SlotId) -> Result<Self::Slot, HookError>;

    fn bind(&mut self, index: usize, slot: &mut Self::Slot) -> Result<(), HookError>;

    fn recycle(&mut self, index: usize, slot: &mut Self::Slot) -> Result<(), HookError>;

    fn position(&mut self, slot: &mut Self::Slot, placement: SlotPlacement);

    /// Final release of a slot. The default just drops it.
    fn destroy(&mut self, slot: Self::Slot) {
        drop(slot);
    }
}
