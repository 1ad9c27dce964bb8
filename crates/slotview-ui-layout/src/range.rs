//! Closed index interval of items that need a bound slot.

use std::ops::RangeInclusive;

/// Closed interval `[first, last]` of visible item indices.
///
/// The empty range is represented as `(-1, -1)` so hosts that expose the pair
/// directly (for example to a scrollbar label) keep the conventional sentinel.
/// A non-empty range always satisfies `0 <= first <= last`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VisibleRange {
    first: isize,
    last: isize,
}

impl Default for VisibleRange {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl VisibleRange {
    pub const EMPTY: VisibleRange = VisibleRange { first: -1, last: -1 };

    /// Creates a non-empty range. The bounds are swapped if given out of order.
    pub fn new(first: usize, last: usize) -> Self {
        let (first, last) = if first <= last {
            (first, last)
        } else {
            (last, first)
        };
        Self {
            first: first as isize,
            last: last as isize,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.first < 0
    }

    /// First index, or -1 when empty.
    #[inline]
    pub fn first(&self) -> isize {
        self.first
    }

    /// Last index, or -1 when empty.
    #[inline]
    pub fn last(&self) -> isize {
        self.last
    }

    pub fn as_tuple(&self) -> (isize, isize) {
        (self.first, self.last)
    }

    pub fn contains(&self, index: usize) -> bool {
        !self.is_empty() && (index as isize) >= self.first && (index as isize) <= self.last
    }

    pub fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            (self.last - self.first + 1) as usize
        }
    }

    /// Iterable view of the indices; yields nothing when empty.
    pub fn indices(&self) -> RangeInclusive<usize> {
        if self.is_empty() {
            // An exhausted inclusive range.
            #[allow(clippy::reversed_empty_ranges)]
            return 1..=0;
        }
        self.first as usize..=self.last as usize
    }

    /// Maps a range over view order back to logical item indices for a
    /// reversed layout of `item_count` items.
    pub fn mirrored(&self, item_count: usize) -> Self {
        if self.is_empty() || item_count == 0 {
            return Self::EMPTY;
        }
        let last_index = item_count as isize - 1;
        let first = (last_index - self.last).max(0);
        let last = (last_index - self.first).max(0);
        Self::new(first as usize, last as usize)
    }
}

impl std::fmt::Display for VisibleRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.first, self.last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_range_sentinel() {
        let range = VisibleRange::EMPTY;
        assert!(range.is_empty());
        assert_eq!(range.as_tuple(), (-1, -1));
        assert_eq!(range.len(), 0);
        assert_eq!(range.indices().count(), 0);
        assert!(!range.contains(0));
    }

    #[test]
    fn test_new_orders_bounds() {
        let range = VisibleRange::new(9, 3);
        assert_eq!(range.as_tuple(), (3, 9));
        assert_eq!(range.len(), 7);
        assert!(range.contains(3));
        assert!(range.contains(9));
        assert!(!range.contains(10));
    }

    #[test]
    fn test_mirrored() {
        let natural = VisibleRange::new(0, 4);
        assert_eq!(natural.mirrored(10).as_tuple(), (5, 9));
        assert_eq!(VisibleRange::new(9, 9).mirrored(10).as_tuple(), (0, 0));
    }
}
