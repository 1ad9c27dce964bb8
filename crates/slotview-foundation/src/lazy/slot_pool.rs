//! Idle visual slots waiting to be rebound.
//!
//! The pool is a LIFO stack: the most recently recycled slot is handed out
//! first, since it is the one most likely to still be warm in the host's
//! caches. Slots beyond the capacity are handed back to the caller for
//! destruction instead of being retained.

/// Stable handle assigned to every slot the pool creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub u64);

impl SlotId {
    #[inline]
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Bounded stack of idle slots plus lifetime counters.
///
/// Every slot the pool creates is eventually counted as destroyed exactly once
/// (overflow on [`release`](Self::release), [`retire`](Self::retire) or
/// [`drain`](Self::drain)), so `created == active + idle + destroyed` holds
/// for any caller that keeps its active slots outside the pool.
#[derive(Debug)]
pub struct SlotPool<S> {
    idle: Vec<(SlotId, S)>,
    capacity: Option<usize>,
    next_id: u64,
    created: usize,
    destroyed: usize,
    reused: usize,
}

impl<S> Default for SlotPool<S> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<S> SlotPool<S> {
    /// `None` keeps every released slot.
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            idle: Vec::new(),
            capacity,
            next_id: 1,
            created: 0,
            destroyed: 0,
            reused: 0,
        }
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Changes the capacity. Slots over the new limit are returned for
    /// destruction, oldest first.
    pub fn set_capacity(&mut self, capacity: Option<usize>) -> Vec<(SlotId, S)> {
        self.capacity = capacity;
        let excess = match capacity {
            Some(limit) if self.idle.len() > limit => self.idle.len() - limit,
            _ => 0,
        };
        self.destroyed += excess;
        self.idle.drain(..excess).collect()
    }

    pub fn len(&self) -> usize {
        self.idle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.idle.is_empty()
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.idle.iter().any(|(idle_id, _)| *idle_id == id)
    }

    /// Total slots ever created.
    pub fn created(&self) -> usize {
        self.created
    }

    /// Total slots handed out for destruction.
    pub fn destroyed(&self) -> usize {
        self.destroyed
    }

    /// Acquisitions served from the idle stack.
    pub fn reused(&self) -> usize {
        self.reused
    }

    /// Pops an idle slot, or creates one with `create` when the pool is empty.
    pub fn acquire<E>(
        &mut self,
        create: impl FnOnce(SlotId) -> Result<S, E>,
    ) -> Result<(SlotId, S), E> {
        if let Some(entry) = self.idle.pop() {
            self.reused += 1;
            return Ok(entry);
        }
        let id = SlotId::new(self.next_id);
        self.next_id += 1;
        let slot = create(id)?;
        self.created += 1;
        Ok((id, slot))
    }

    /// Returns a slot to the pool. If the pool is full the slot comes back and
    /// must be destroyed by the caller.
    #[must_use = "overflow slots must be destroyed"]
    pub fn release(&mut self, id: SlotId, slot: S) -> Option<(SlotId, S)> {
        if self.capacity.is_some_and(|limit| self.idle.len() >= limit) {
            self.destroyed += 1;
            return Some((id, slot));
        }
        self.idle.push((id, slot));
        None
    }

    /// Records the destruction of a slot that never returns to the pool.
    pub fn retire(&mut self, id: SlotId, slot: S) -> (SlotId, S) {
        self.destroyed += 1;
        (id, slot)
    }

    /// Empties the pool; every slot is returned for destruction.
    pub fn drain(&mut self) -> Vec<(SlotId, S)> {
        self.destroyed += self.idle.len();
        std::mem::take(&mut self.idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(id: SlotId) -> Result<String, ()> {
        Ok(format!("slot-{}", id.raw()))
    }

    #[test]
    fn test_acquire_creates_lazily_and_reuses_lifo() {
        let mut pool = SlotPool::new(None);
        let (a, _) = pool.acquire(create).expect("create");
        let (b, _) = pool.acquire(create).expect("create");
        assert_eq!(pool.created(), 2);

        assert!(pool.release(a, "a".into()).is_none());
        assert!(pool.release(b, "b".into()).is_none());
        assert_eq!(pool.len(), 2);

        let (id, slot) = pool.acquire(create).expect("reuse");
        assert_eq!((id, slot.as_str()), (b, "b"));
        assert_eq!(pool.reused(), 1);
        assert_eq!(pool.created(), 2);
    }

    #[test]
    fn test_overflow_is_returned_for_destruction() {
        let mut pool = SlotPool::new(Some(1));
        let (a, sa) = pool.acquire(create).expect("create");
        let (b, sb) = pool.acquire(create).expect("create");
        assert!(pool.release(a, sa).is_none());
        let overflow = pool.release(b, sb);
        assert_eq!(overflow.map(|(id, _)| id), Some(b));
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.destroyed(), 1);
        assert!(pool.contains(a));
        assert!(!pool.contains(b));
    }

    #[test]
    fn test_zero_capacity_retains_nothing() {
        let mut pool = SlotPool::new(Some(0));
        let (a, sa) = pool.acquire(create).expect("create");
        assert!(pool.release(a, sa).is_some());
        assert!(pool.is_empty());
    }

    #[test]
    fn test_failed_create_is_not_counted() {
        let mut pool: SlotPool<String> = SlotPool::new(None);
        let result = pool.acquire(|_| Err("no template"));
        assert_eq!(result.map(|(id, _)| id), Err("no template"));
        assert_eq!(pool.created(), 0);
        let (id, _) = pool.acquire(create).expect("create");
        // Ids are never recycled, even after a failed create.
        assert_eq!(id, SlotId(2));
    }

    #[test]
    fn test_conservation_through_drain() {
        let mut pool = SlotPool::new(Some(2));
        let slots: Vec<_> = (0..4).map(|_| pool.acquire(create).expect("create")).collect();
        let mut overflow = 0;
        for (id, slot) in slots {
            overflow += usize::from(pool.release(id, slot).is_some());
        }
        assert_eq!(overflow, 2);

        let shrunk = pool.set_capacity(Some(1));
        assert_eq!(shrunk.len(), 1);
        let drained = pool.drain();
        assert_eq!(drained.len(), 1);
        assert_eq!(pool.created(), pool.destroyed());
    }
}
