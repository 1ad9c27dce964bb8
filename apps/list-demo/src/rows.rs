//! Text rows standing in for real widgets.

use slotview_foundation::{HookError, SlotHooks, SlotId, SlotPlacement};
use slotview_ui_layout::Rect;

/// Height of item `index`; every fifth row carries an extra detail line.
pub fn row_height(index: usize) -> f32 {
    48.0 + (index % 5) as f32 * 8.0
}

#[derive(Debug)]
pub struct Row {
    pub id: SlotId,
    pub label: String,
    pub bounds: Rect,
}

/// Slot hooks that format a label per item and count the work done.
#[derive(Debug, Default)]
pub struct RowHooks {
    pub created: usize,
    pub binds: usize,
    pub recycles: usize,
}

impl SlotHooks for RowHooks {
    type Slot = Row;

    fn create(&mut self, id: SlotId) -> Result<Row, HookError> {
        self.created += 1;
        Ok(Row {
            id,
            label: String::new(),
            bounds: Rect::default(),
        })
    }

    fn bind(&mut self, index: usize, slot: &mut Row) -> Result<(), HookError> {
        self.binds += 1;
        slot.label.clear();
        slot.label.push_str(&format!("Item {index}"));
        Ok(())
    }

    fn recycle(&mut self, _index: usize, slot: &mut Row) -> Result<(), HookError> {
        self.recycles += 1;
        slot.label.clear();
        Ok(())
    }

    fn position(&mut self, slot: &mut Row, placement: SlotPlacement) {
        slot.bounds = placement.bounds;
    }

    fn destroy(&mut self, slot: Row) {
        log::trace!("destroying row {}", slot.id);
    }
}
