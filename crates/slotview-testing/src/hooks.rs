//! Slot hooks that record every lifecycle call.
//!
//! [`RecordingHooks`] keeps its log behind a [`Shared`] handle so a test can
//! keep reading it after the controller (and the hooks with it) is dropped.

use slotview_core::collections::map::HashSet;
use slotview_core::Shared;
use slotview_foundation::{HookError, SlotHooks, SlotId, SlotPlacement};

/// One call into [`RecordingHooks`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HookEvent {
    Create(SlotId),
    Bind { index: usize, slot: SlotId },
    Recycle { index: usize, slot: SlotId },
    Position { slot: SlotId, placement: SlotPlacement },
    Destroy(SlotId),
}

/// Shared, append-only record of hook calls.
#[derive(Clone, Debug, Default)]
pub struct HookLog {
    events: Shared<Vec<HookEvent>>,
}

impl HookLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: HookEvent) {
        self.events.update(|events| events.push(event));
    }

    pub fn events(&self) -> Vec<HookEvent> {
        self.events.with(|events| events.clone())
    }

    pub fn clear(&self) {
        self.events.update(|events| events.clear());
    }

    pub fn count(&self, pred: impl Fn(&HookEvent) -> bool) -> usize {
        self.events
            .with(|events| events.iter().filter(|event| pred(event)).count())
    }

    pub fn created(&self) -> usize {
        self.count(|event| matches!(event, HookEvent::Create(_)))
    }

    pub fn destroyed(&self) -> usize {
        self.count(|event| matches!(event, HookEvent::Destroy(_)))
    }

    pub fn recycled(&self) -> usize {
        self.count(|event| matches!(event, HookEvent::Recycle { .. }))
    }

    /// Bind attempts for `index`, failed ones included.
    pub fn binds_of(&self, index: usize) -> usize {
        self.count(|event| matches!(event, HookEvent::Bind { index: i, .. } if *i == index))
    }

    /// Indices bound since the last [`clear`](Self::clear), in call order.
    pub fn bound_indices(&self) -> Vec<usize> {
        self.events.with(|events| {
            events
                .iter()
                .filter_map(|event| match event {
                    HookEvent::Bind { index, .. } => Some(*index),
                    _ => None,
                })
                .collect()
        })
    }
}

/// Visual slot handed out by [`RecordingHooks`].
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedSlot {
    pub id: SlotId,
    pub bound_index: Option<usize>,
    pub placement: Option<SlotPlacement>,
    /// Successful binds over the slot's lifetime.
    pub bind_count: usize,
}

/// [`SlotHooks`] implementation for tests.
///
/// Every call is appended to the [`HookLog`]. Indices listed in `fail_bind`
/// and slot creation beyond `create_limit` report errors.
#[derive(Debug, Default)]
pub struct RecordingHooks {
    log: HookLog,
    fail_bind: HashSet<usize>,
    create_limit: Option<usize>,
    created: usize,
}

impl RecordingHooks {
    pub fn new(log: HookLog) -> Self {
        Self {
            log,
            ..Self::default()
        }
    }

    pub fn log(&self) -> &HookLog {
        &self.log
    }

    pub fn fail_bind(&mut self, index: usize) {
        self.fail_bind.insert(index);
    }

    pub fn heal(&mut self, index: usize) {
        self.fail_bind.remove(&index);
    }

    pub fn set_create_limit(&mut self, limit: Option<usize>) {
        self.create_limit = limit;
    }
}

impl SlotHooks for RecordingHooks {
    type Slot = RecordedSlot;

    fn create(&mut self, id: SlotId) -> Result<RecordedSlot, HookError> {
        if self.create_limit.is_some_and(|limit| self.created >= limit) {
            return Err(HookError::new("slot limit reached"));
        }
        self.created += 1;
        self.log.push(HookEvent::Create(id));
        Ok(RecordedSlot {
            id,
            bound_index: None,
            placement: None,
            bind_count: 0,
        })
    }

    fn bind(&mut self, index: usize, slot: &mut RecordedSlot) -> Result<(), HookError> {
        self.log.push(HookEvent::Bind {
            index,
            slot: slot.id,
        });
        if self.fail_bind.contains(&index) {
            log::debug!("RecordingHooks: failing bind of item {index}");
            return Err(HookError::new(format!("bind of item {index} rejected")));
        }
        slot.bound_index = Some(index);
        slot.bind_count += 1;
        Ok(())
    }

    fn recycle(&mut self, index: usize, slot: &mut RecordedSlot) -> Result<(), HookError> {
        self.log.push(HookEvent::Recycle {
            index,
            slot: slot.id,
        });
        slot.bound_index = None;
        slot.placement = None;
        Ok(())
    }

    fn position(&mut self, slot: &mut RecordedSlot, placement: SlotPlacement) {
        self.log.push(HookEvent::Position {
            slot: slot.id,
            placement,
        });
        slot.placement = Some(placement);
    }

    fn destroy(&mut self, slot: RecordedSlot) {
        self.log.push(HookEvent::Destroy(slot.id));
    }
}
