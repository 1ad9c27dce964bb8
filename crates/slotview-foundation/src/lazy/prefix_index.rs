//! Cumulative-offset index for variable-size items.
//!
//! Item main sizes are folded into per-line `starts`/`ends` tables (one line
//! per item in linear layouts, one per row/column in grids). Both tables are
//! sorted, so a visible-range query is two binary searches and never touches
//! the size provider. Tables are rebuilt only when the item count, the size
//! provider or the layout changes; a single resized item shifts the tail in
//! place.

use super::error::SizeError;
use slotview_ui_layout::{ContentExtent, ItemSize, LayoutStrategy, Rect, Size, VisibleRange};
use web_time::{Duration, Instant};

/// How much work one [`PrefixIndexBuilder::step`] may do.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildBudget {
    /// Items measured per step. `None` means no limit.
    pub max_items: Option<usize>,
    /// Wall-clock limit per step. At least one item is always measured.
    pub time_budget: Option<Duration>,
}

impl BuildBudget {
    pub const UNLIMITED: BuildBudget = BuildBudget {
        max_items: None,
        time_budget: None,
    };

    pub fn items(max_items: usize) -> Self {
        Self {
            max_items: Some(max_items.max(1)),
            time_budget: None,
        }
    }

    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }

    pub fn is_unlimited(&self) -> bool {
        self.max_items.is_none() && self.time_budget.is_none()
    }
}

/// Prefix-sum tables for one layout, viewport and item count.
#[derive(Clone, Debug, PartialEq)]
pub struct PrefixIndex {
    layout: LayoutStrategy,
    viewport: Size,
    /// Per logical index.
    mains: Vec<f32>,
    crosses: Vec<f32>,
    /// Per line, in view order.
    line_mains: Vec<f32>,
    starts: Vec<f32>,
    ends: Vec<f32>,
    max_cross: f32,
    extent: ContentExtent,
}

impl PrefixIndex {
    /// Measures every item in one pass.
    pub fn build<F>(
        layout: &LayoutStrategy,
        viewport: Size,
        item_count: usize,
        fallback_main: f32,
        measure: F,
    ) -> PrefixIndex
    where
        F: FnMut(usize) -> Result<ItemSize, SizeError>,
    {
        let mut builder =
            PrefixIndexBuilder::new(layout.clone(), viewport, item_count, fallback_main);
        builder.step(BuildBudget::UNLIMITED, measure);
        builder.finish_measured()
    }

    fn from_measurements(
        layout: LayoutStrategy,
        viewport: Size,
        mains: Vec<f32>,
        crosses: Vec<f32>,
    ) -> PrefixIndex {
        let item_count = mains.len();
        let lines = layout.line_count(item_count);
        let c = layout.constraint();

        let mut line_mains = vec![0.0f32; lines];
        for view in 0..item_count {
            let logical = layout.logical_index(view, item_count);
            let line = view / c;
            line_mains[line] = line_mains[line].max(mains[logical]);
        }
        let max_cross = crosses.iter().copied().fold(0.0f32, f32::max);

        let mut index = PrefixIndex {
            layout,
            viewport,
            mains,
            crosses,
            line_mains,
            starts: vec![0.0; lines],
            ends: vec![0.0; lines],
            max_cross,
            extent: ContentExtent::ZERO,
        };
        index.recompute_tail(0);
        index
    }

    /// Recomputes `starts`/`ends` from `from_line` onwards, plus the extent.
    fn recompute_tail(&mut self, from_line: usize) {
        let spacing = self.layout.spacing();
        let mut running = if from_line == 0 {
            self.layout.padding().before
        } else {
            self.ends[from_line - 1]
        };
        for line in from_line..self.line_mains.len() {
            if line > 0 {
                running += spacing;
            }
            self.starts[line] = running;
            running += self.line_mains[line];
            self.ends[line] = running;
        }
        let sum_main: f32 = self.line_mains.iter().sum();
        self.extent = ContentExtent::new(
            self.layout.main_extent(self.line_mains.len(), sum_main),
            self.layout.cross_extent(self.max_cross, self.viewport),
        );
    }

    pub fn layout(&self) -> &LayoutStrategy {
        &self.layout
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn item_count(&self) -> usize {
        self.mains.len()
    }

    pub fn line_count(&self) -> usize {
        self.line_mains.len()
    }

    pub fn extent(&self) -> ContentExtent {
        self.extent
    }

    /// Line start offsets in view order.
    pub fn starts(&self) -> &[f32] {
        &self.starts
    }

    /// Line end offsets in view order.
    pub fn ends(&self) -> &[f32] {
        &self.ends
    }

    pub fn item_size(&self, index: usize) -> Option<ItemSize> {
        Some(ItemSize::new(*self.mains.get(index)?, self.crosses[index]))
    }

    fn line_of(&self, index: usize) -> Option<usize> {
        if index >= self.item_count() {
            return None;
        }
        let view = self.layout.view_index(index, self.item_count());
        Some(view / self.layout.constraint())
    }

    /// Main-axis offset where the item's line starts.
    pub fn item_main_start(&self, index: usize) -> Option<f32> {
        self.line_of(index).map(|line| self.starts[line])
    }

    /// Main-axis start and end of the item's line.
    pub fn item_line_span(&self, index: usize) -> Option<(f32, f32)> {
        self.line_of(index).map(|line| (self.starts[line], self.ends[line]))
    }

    /// Rectangle of the item in content coordinates.
    pub fn item_rect(&self, index: usize) -> Option<Rect> {
        let line = self.line_of(index)?;
        let n = self.item_count();
        let column = self.layout.view_index(index, n) % self.layout.constraint();
        let cell_cross = self.layout.cell_cross_size(self.max_cross, self.viewport);
        let cross_offset = self.layout.cell_cross_offset(column, cell_cross);
        let cross_size = if self.layout.stretches_cross_axis() {
            cell_cross
        } else {
            self.crosses[index]
        };
        let axis = self.layout.axis();
        Some(Rect::from_origin_size(
            axis.point(self.starts[line], cross_offset),
            axis.size(self.mains[index], cross_size),
        ))
    }

    /// Visible range at `normalized` for a viewport of `viewport_main`.
    ///
    /// `first` is the first line ending after the window start, `last` the
    /// last line starting before the window end; both found by binary search.
    pub fn visible_range(&self, normalized: f32, viewport_main: f32) -> VisibleRange {
        let lines = self.line_count();
        if lines == 0 || !(viewport_main > 0.0) {
            return VisibleRange::EMPTY;
        }
        let (view_start, view_end) =
            self.layout.view_window(normalized, self.extent.main, viewport_main);

        let first = self
            .ends
            .partition_point(|&end| end <= view_start)
            .min(lines - 1);
        let last = self
            .starts
            .partition_point(|&start| start < view_end)
            .saturating_sub(1);

        self.layout.range_from_lines(first, last, self.item_count())
    }

    /// Replaces one item's size and shifts every later line. Returns the change
    /// of the line's main size.
    pub fn resize_item(&mut self, index: usize, size: ItemSize) -> Option<f32> {
        let line = self.line_of(index)?;
        let old_cross = self.crosses[index];
        if size.is_valid() {
            self.mains[index] = size.main;
        }
        self.crosses[index] = size.sanitized_cross();

        let n = self.item_count();
        let c = self.layout.constraint();
        let line_main = (line * c..((line + 1) * c).min(n))
            .map(|view| self.mains[self.layout.logical_index(view, n)])
            .fold(0.0f32, f32::max);
        let delta = line_main - self.line_mains[line];
        self.line_mains[line] = line_main;

        let new_cross = self.crosses[index];
        if new_cross > self.max_cross {
            self.max_cross = new_cross;
        } else if old_cross >= self.max_cross && new_cross < old_cross {
            self.max_cross = self.crosses.iter().copied().fold(0.0f32, f32::max);
        }

        self.recompute_tail(line);
        Some(delta)
    }
}

/// Incremental construction of a [`PrefixIndex`].
///
/// Measures items in logical order, a budgeted chunk per [`step`](Self::step),
/// so a very large collection can be indexed across several frames. The
/// tables are only assembled once every item is measured.
#[derive(Debug)]
pub struct PrefixIndexBuilder {
    layout: LayoutStrategy,
    viewport: Size,
    item_count: usize,
    fallback_main: f32,
    mains: Vec<f32>,
    crosses: Vec<f32>,
    failures: usize,
}

impl PrefixIndexBuilder {
    /// `fallback_main` replaces sizes the provider fails to deliver until the
    /// first valid measurement; after that the last valid main size is used.
    pub fn new(
        layout: LayoutStrategy,
        viewport: Size,
        item_count: usize,
        fallback_main: f32,
    ) -> Self {
        Self {
            layout,
            viewport,
            item_count,
            fallback_main,
            mains: Vec::with_capacity(item_count),
            crosses: Vec::with_capacity(item_count),
            failures: 0,
        }
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn measured(&self) -> usize {
        self.mains.len()
    }

    /// Items that fell back to an estimated size.
    pub fn failures(&self) -> usize {
        self.failures
    }

    pub fn is_complete(&self) -> bool {
        self.mains.len() >= self.item_count
    }

    /// Measures the next chunk. Returns true once every item is measured.
    pub fn step<F>(&mut self, budget: BuildBudget, mut measure: F) -> bool
    where
        F: FnMut(usize) -> Result<ItemSize, SizeError>,
    {
        let started = Instant::now();
        let mut processed = 0usize;

        while self.mains.len() < self.item_count {
            if budget.max_items.is_some_and(|max| processed >= max.max(1)) {
                break;
            }
            if processed > 0 && budget.time_budget.is_some_and(|limit| started.elapsed() > limit) {
                log::debug!(
                    "PrefixIndexBuilder: time budget reached after {processed} items ({}/{})",
                    self.mains.len(),
                    self.item_count
                );
                break;
            }

            let index = self.mains.len();
            let size = self.sanitize(index, measure(index));
            self.mains.push(size.main);
            self.crosses.push(size.sanitized_cross());
            processed += 1;
        }

        self.is_complete()
    }

    fn sanitize(&mut self, index: usize, measured: Result<ItemSize, SizeError>) -> ItemSize {
        match measured {
            Ok(size) if size.is_valid() => {
                self.fallback_main = size.main;
                size
            }
            Ok(size) => {
                self.failures += 1;
                log::warn!(
                    "PrefixIndexBuilder: item {index} reported main size {}, using {}",
                    size.main,
                    self.fallback_main
                );
                ItemSize::new(self.fallback_main, size.sanitized_cross())
            }
            Err(err) => {
                self.failures += 1;
                log::warn!("PrefixIndexBuilder: {err}, using main size {}", self.fallback_main);
                ItemSize::new(self.fallback_main, 0.0)
            }
        }
    }

    /// Assembles the tables, or hands the builder back if items remain.
    pub fn into_index(self) -> Result<PrefixIndex, PrefixIndexBuilder> {
        if self.is_complete() {
            Ok(self.finish_measured())
        } else {
            Err(self)
        }
    }

    fn finish_measured(self) -> PrefixIndex {
        PrefixIndex::from_measurements(self.layout, self.viewport, self.mains, self.crosses)
    }
}

#[cfg(test)]
#[path = "tests/prefix_index_tests.rs"]
mod tests;
