//! Mutable item collections backing test controllers.

use slotview_core::Shared;
use slotview_foundation::{ItemSizeProvider, ItemSource, SizeError};
use slotview_ui_layout::{ItemSize, LayoutStrategy, Size};

/// Main-axis sizes of a test collection. Clones share the same items, so a
/// test can edit the collection the controller reads from.
#[derive(Clone, Debug, Default)]
pub struct TestItems {
    mains: Shared<Vec<f32>>,
    cross: f32,
}

impl TestItems {
    pub fn new(mains: Vec<f32>) -> Self {
        Self {
            mains: Shared::new(mains),
            cross: 0.0,
        }
    }

    pub fn uniform(count: usize, main: f32) -> Self {
        Self::new(vec![main; count])
    }

    /// Cross size reported for every item.
    pub fn with_cross(mut self, cross: f32) -> Self {
        self.cross = cross;
        self
    }

    pub fn len(&self) -> usize {
        self.mains.with(|mains| mains.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn mains(&self) -> Vec<f32> {
        self.mains.with(|mains| mains.clone())
    }

    pub fn set_main(&self, index: usize, main: f32) {
        self.mains.update(|mains| {
            if let Some(slot) = mains.get_mut(index) {
                *slot = main;
            }
        });
    }

    pub fn push(&self, main: f32) {
        self.mains.update(|mains| mains.push(main));
    }

    pub fn truncate(&self, len: usize) {
        self.mains.update(|mains| mains.truncate(len));
    }

    pub fn item_source(&self) -> impl ItemSource + 'static {
        let items = self.clone();
        move || items.len()
    }

    /// Sizes come straight from the collection; indices past the end are
    /// reported as unavailable.
    pub fn size_provider(&self) -> impl ItemSizeProvider + 'static {
        let items = self.clone();
        move |index: usize, _: Size, _: &LayoutStrategy| {
            items
                .mains
                .with(|mains| mains.get(index).copied())
                .map(|main| ItemSize::new(main, items.cross))
                .ok_or(SizeError::Unavailable { index })
        }
    }
}
