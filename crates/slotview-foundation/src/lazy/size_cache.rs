//! Bounded memo of measured item sizes.

use slotview_core::collections::map::{Entry, HashMap};
use slotview_ui_layout::ItemSize;
use std::collections::VecDeque;

/// Default number of remembered sizes.
pub const DEFAULT_SIZE_CACHE_CAPACITY: usize = 1024;

/// LRU cache of measured sizes keyed by item index. Both [`get`](Self::get)
/// hits and re-inserts count as a use.
///
/// Also keeps a running average of every main size ever inserted; the average
/// survives [`clear`](Self::clear) and feeds viewport estimates.
#[derive(Debug, Clone)]
pub struct SizeCache {
    entries: HashMap<usize, ItemSize>,
    lru: VecDeque<usize>,
    capacity: usize,
    average_main: f32,
    total_measured: usize,
}

impl Default for SizeCache {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE_CACHE_CAPACITY)
    }
}

impl SizeCache {
    /// A capacity of zero disables caching (the average is still tracked).
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::default(),
            lru: VecDeque::new(),
            capacity,
            average_main: 0.0,
            total_measured: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&mut self, index: usize) -> Option<ItemSize> {
        let size = self.entries.get(&index).copied()?;
        self.touch(index);
        Some(size)
    }

    /// Moves `index` to the most recently used end.
    fn touch(&mut self, index: usize) {
        // Linear scan from the back, where hits cluster.
        if self.lru.back() == Some(&index) {
            return;
        }
        if let Some(pos) = self.lru.iter().rposition(|&k| k == index) {
            self.lru.remove(pos);
        }
        self.lru.push_back(index);
    }

    /// Running average of measured main sizes, if anything was measured.
    pub fn average_main(&self) -> Option<f32> {
        (self.total_measured > 0).then_some(self.average_main)
    }

    pub fn insert(&mut self, index: usize, size: ItemSize) {
        self.total_measured += 1;
        let n = self.total_measured as f32;
        self.average_main = self.average_main * ((n - 1.0) / n) + size.main / n;

        if self.capacity == 0 {
            return;
        }

        if let Entry::Occupied(mut entry) = self.entries.entry(index) {
            entry.insert(size);
            self.touch(index);
            return;
        }

        while self.entries.len() >= self.capacity {
            match self.lru.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }

        self.entries.insert(index, size);
        self.lru.push_back(index);
    }

    pub fn remove(&mut self, index: usize) -> Option<ItemSize> {
        let removed = self.entries.remove(&index);
        if removed.is_some() {
            if let Some(pos) = self.lru.iter().position(|&k| k == index) {
                self.lru.remove(pos);
            }
        }
        removed
    }

    /// Forgets every cached size (data or template changed).
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
    }
}
