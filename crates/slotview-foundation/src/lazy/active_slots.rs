//! Index → slot table for the currently bound window.

use super::slot_pool::SlotId;
use slotview_core::collections::map::{HashMap, HashSet};
use slotview_ui_layout::VisibleRange;
use smallvec::SmallVec;

/// How a refresh treats slots that stay inside the visible range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshMode {
    /// Scroll or geometry change: only move surviving slots.
    Reposition,
    /// Data changed: surviving slots are bound again.
    Rebind,
}

/// Indices leaving the window in one refresh. A scroll tick usually moves a
/// line or two, so this rarely spills.
pub type Outgoing = SmallVec<[usize; 16]>;

/// Active slots keyed by item index, plus indices whose bind failed.
///
/// Slots are moved in and out, so a slot can never be both active and pooled.
#[derive(Debug)]
pub struct ActiveSlots<S> {
    slots: HashMap<usize, (SlotId, S)>,
    failed: HashSet<usize>,
}

impl<S> Default for ActiveSlots<S> {
    fn default() -> Self {
        Self {
            slots: HashMap::default(),
            failed: HashSet::default(),
        }
    }
}

impl<S> ActiveSlots<S> {
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.slots.contains_key(&index)
    }

    pub fn get(&self, index: usize) -> Option<&S> {
        self.slots.get(&index).map(|(_, slot)| slot)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut S> {
        self.slots.get_mut(&index).map(|(_, slot)| slot)
    }

    pub fn slot_id(&self, index: usize) -> Option<SlotId> {
        self.slots.get(&index).map(|(id, _)| *id)
    }

    /// Inserts a freshly bound slot. Returns the previous occupant, which the
    /// caller must recycle (never happens in a correct diff).
    pub fn insert(&mut self, index: usize, id: SlotId, slot: S) -> Option<(SlotId, S)> {
        self.failed.remove(&index);
        self.slots.insert(index, (id, slot))
    }

    pub fn remove(&mut self, index: usize) -> Option<(SlotId, S)> {
        self.slots.remove(&index)
    }

    /// Active indices outside `range`, sorted.
    pub fn outgoing(&self, range: VisibleRange) -> Outgoing {
        let mut outgoing: Outgoing = self
            .slots
            .keys()
            .copied()
            .filter(|&index| !range.contains(index))
            .collect();
        outgoing.sort_unstable();
        outgoing
    }

    /// Active indices, sorted.
    pub fn indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self.slots.keys().copied().collect();
        indices.sort_unstable();
        indices
    }

    pub fn mark_failed(&mut self, index: usize) {
        self.failed.insert(index);
    }

    pub fn is_failed(&self, index: usize) -> bool {
        self.failed.contains(&index)
    }

    /// Clears the failure mark. Returns whether it was set.
    pub fn clear_failed(&mut self, index: usize) -> bool {
        self.failed.remove(&index)
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    /// Failures are only remembered while the index stays in the window.
    pub fn retain_failed_within(&mut self, range: VisibleRange) {
        self.failed.retain(|&index| range.contains(index));
    }

    pub fn clear_all_failed(&mut self) {
        self.failed.clear();
    }

    /// Removes every slot, sorted by index.
    pub fn drain(&mut self) -> Vec<(usize, SlotId, S)> {
        let mut drained: Vec<(usize, SlotId, S)> = self
            .slots
            .drain()
            .map(|(index, (id, slot))| (index, id, slot))
            .collect();
        drained.sort_unstable_by_key(|(index, _, _)| *index);
        self.failed.clear();
        drained
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outgoing_is_sorted_and_excludes_range() {
        let mut active = ActiveSlots::default();
        for index in [7usize, 2, 5, 9, 3] {
            active.insert(index, SlotId(index as u64), index);
        }
        let outgoing = active.outgoing(VisibleRange::new(3, 7));
        assert_eq!(outgoing.as_slice(), &[2, 9]);
        assert_eq!(active.outgoing(VisibleRange::EMPTY).len(), 5);
    }

    #[test]
    fn test_failed_marks() {
        let mut active: ActiveSlots<()> = ActiveSlots::default();
        active.mark_failed(4);
        active.mark_failed(12);
        assert!(active.is_failed(4));

        active.retain_failed_within(VisibleRange::new(0, 10));
        assert!(active.is_failed(4));
        assert!(!active.is_failed(12));

        active.insert(4, SlotId(1), ());
        assert!(!active.is_failed(4));
        assert_eq!(active.failed_count(), 0);
    }

    #[test]
    fn test_lookup_and_drain() {
        let mut active = ActiveSlots::default();
        active.insert(1, SlotId(10), "one");
        active.insert(0, SlotId(11), "zero");
        assert_eq!(active.get(1), Some(&"one"));
        assert_eq!(active.slot_id(0), Some(SlotId(11)));
        if let Some(slot) = active.get_mut(0) {
            *slot = "nil";
        }

        let drained = active.drain();
        assert_eq!(
            drained,
            vec![(0, SlotId(11), "nil"), (1, SlotId(10), "one")]
        );
        assert!(active.is_empty());
    }
}
