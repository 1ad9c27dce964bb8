//! Layout strategy for virtualized lists and grids.
//!
//! A [`LayoutStrategy`] turns list parameters (axis, spacing, padding, grid
//! constraint, reverse flag) into content extent, per-item anchored positions
//! and, for uniformly sized items, the visible index range by direct
//! arithmetic. Variable-size lists reuse the same scroll-offset conversion and
//! line-to-index mapping so both paths agree on edge behavior.
//!
//! # Normalized scroll position
//!
//! Scroll positions are normalized to `[0, 1]` with **1.0 at the start** of the
//! main axis and 0.0 at the end, matching conventional scrollbar values where
//! the thumb starts at the top.

use crate::axis::Axis;
use crate::geometry::{Point, Rect, Size};
use crate::item_size::{ContentExtent, ItemSize};
use crate::padding::ContentPadding;
use crate::range::VisibleRange;

/// Lines added on each side of the computed range so items entering the
/// viewport during the next tick are already bound.
pub const DEFAULT_BUFFER_LINES: usize = 1;

/// The shape of the layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutKind {
    /// One item per line.
    Linear,
    /// `constraint` items per line, filled row-major along the cross axis.
    Grid { constraint: usize },
}

/// Parameters and arithmetic for placing items along a scroll axis.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutStrategy {
    kind: LayoutKind,
    axis: Axis,
    spacing: f32,
    padding: ContentPadding,
    reverse: bool,
    stretch_cross_axis: bool,
    buffer_lines: usize,
}

impl Default for LayoutStrategy {
    fn default() -> Self {
        Self::linear(Axis::Vertical)
    }
}

impl LayoutStrategy {
    /// A single-column (or single-row) list.
    pub fn linear(axis: Axis) -> Self {
        Self {
            kind: LayoutKind::Linear,
            axis,
            spacing: 0.0,
            padding: ContentPadding::ZERO,
            reverse: false,
            stretch_cross_axis: true,
            buffer_lines: DEFAULT_BUFFER_LINES,
        }
    }

    /// A grid with `constraint` cells per line. A constraint of 1 behaves like
    /// a linear list; values below 1 are clamped to 1.
    pub fn grid(axis: Axis, constraint: usize) -> Self {
        if constraint < 1 {
            log::debug!("LayoutStrategy: grid constraint {constraint} clamped to 1");
        }
        Self {
            kind: LayoutKind::Grid {
                constraint: constraint.max(1),
            },
            ..Self::linear(axis)
        }
    }

    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = if spacing.is_finite() {
            spacing.max(0.0)
        } else {
            0.0
        };
        self
    }

    pub fn with_padding(mut self, padding: ContentPadding) -> Self {
        self.padding = padding;
        self
    }

    pub fn reversed(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// When true (the default) cells fill the viewport's cross extent.
    pub fn with_stretch_cross_axis(mut self, stretch: bool) -> Self {
        self.stretch_cross_axis = stretch;
        self
    }

    pub fn with_buffer_lines(mut self, lines: usize) -> Self {
        self.buffer_lines = lines;
        self
    }

    pub fn kind(&self) -> LayoutKind {
        self.kind
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn padding(&self) -> ContentPadding {
        self.padding
    }

    pub fn is_reverse(&self) -> bool {
        self.reverse
    }

    pub fn stretches_cross_axis(&self) -> bool {
        self.stretch_cross_axis
    }

    pub fn buffer_lines(&self) -> usize {
        self.buffer_lines
    }

    pub fn is_grid(&self) -> bool {
        matches!(self.kind, LayoutKind::Grid { constraint } if constraint > 1)
    }

    /// Items per line (1 for linear layouts).
    #[inline]
    pub fn constraint(&self) -> usize {
        match self.kind {
            LayoutKind::Linear => 1,
            LayoutKind::Grid { constraint } => constraint.max(1),
        }
    }

    /// Number of lines needed for `item_count` items.
    #[inline]
    pub fn line_count(&self, item_count: usize) -> usize {
        item_count.div_ceil(self.constraint())
    }

    /// Position in view order for a logical index. Reversal mirrors indices;
    /// the data itself is never reordered.
    #[inline]
    pub fn view_index(&self, index: usize, item_count: usize) -> usize {
        if self.reverse && index < item_count {
            item_count - 1 - index
        } else {
            index
        }
    }

    /// Inverse of [`view_index`](Self::view_index) (the mapping is its own inverse).
    #[inline]
    pub fn logical_index(&self, view_index: usize, item_count: usize) -> usize {
        self.view_index(view_index, item_count)
    }

    #[inline]
    pub fn viewport_main(&self, viewport: Size) -> f32 {
        self.axis.main_of(viewport)
    }

    #[inline]
    pub fn viewport_cross(&self, viewport: Size) -> f32 {
        self.axis.cross_of(viewport)
    }

    /// Main extent of `lines` lines whose main sizes sum to `sum_main`.
    pub fn main_extent(&self, lines: usize, sum_main: f32) -> f32 {
        let gaps = lines.saturating_sub(1) as f32 * self.spacing;
        self.padding.main_total() + sum_main + gaps
    }

    /// Cross extent for cells whose widest cross size is `max_cross`.
    pub fn cross_extent(&self, max_cross: f32, viewport: Size) -> f32 {
        if self.stretch_cross_axis {
            return self.viewport_cross(viewport).max(0.0);
        }
        let c = self.constraint() as f32;
        self.padding.cross_total() + c * max_cross + (c - 1.0) * self.spacing
    }

    /// Cross size given to each cell.
    pub fn cell_cross_size(&self, item_cross: f32, viewport: Size) -> f32 {
        if !self.stretch_cross_axis {
            return item_cross;
        }
        let c = self.constraint() as f32;
        let available = self.viewport_cross(viewport)
            - self.padding.cross_total()
            - (c - 1.0) * self.spacing;
        (available / c).max(0.0)
    }

    /// Cross offset of the cell in `column`.
    pub fn cell_cross_offset(&self, column: usize, cell_cross: f32) -> f32 {
        self.padding.cross_before + column as f32 * (cell_cross + self.spacing)
    }

    /// Total content size for uniformly sized items.
    pub fn compute_content_extent(
        &self,
        item_count: usize,
        uniform: ItemSize,
        viewport: Size,
    ) -> ContentExtent {
        let lines = self.line_count(item_count);
        let main = self.main_extent(lines, lines as f32 * uniform.main.max(0.0));
        let cross = self.cross_extent(uniform.sanitized_cross(), viewport);
        ContentExtent::new(main, cross)
    }

    /// Converts a normalized position into a pixel offset from the content start.
    pub fn scroll_offset_for(&self, normalized: f32, extent_main: f32, viewport_main: f32) -> f32 {
        let scrollable = (extent_main - viewport_main).max(0.0);
        let normalized = if normalized.is_nan() {
            1.0
        } else {
            normalized.clamp(0.0, 1.0)
        };
        (1.0 - normalized) * scrollable
    }

    /// Inverse of [`scroll_offset_for`](Self::scroll_offset_for).
    ///
    /// Content that fits in the viewport has nowhere to scroll; the start
    /// position (1.0) is returned.
    pub fn normalized_for(&self, offset: f32, extent_main: f32, viewport_main: f32) -> f32 {
        let scrollable = (extent_main - viewport_main).max(0.0);
        if scrollable <= 0.0 || !offset.is_finite() {
            return 1.0;
        }
        1.0 - (offset / scrollable).clamp(0.0, 1.0)
    }

    /// Start and end of the viewport in content coordinates.
    pub fn view_window(&self, normalized: f32, extent_main: f32, viewport_main: f32) -> (f32, f32) {
        let start = self.scroll_offset_for(normalized, extent_main, viewport_main);
        (start, start + viewport_main)
    }

    /// Turns an inclusive interval of lines (in view order) into the final item
    /// range: applies the buffer, clamps, expands to whole lines and mirrors
    /// for reversed layouts.
    pub fn range_from_lines(
        &self,
        first_line: usize,
        last_line: usize,
        item_count: usize,
    ) -> VisibleRange {
        let lines = self.line_count(item_count);
        if lines == 0 {
            return VisibleRange::EMPTY;
        }
        let last_line = last_line.min(lines - 1);
        let first_line = first_line.min(last_line);
        let first = first_line.saturating_sub(self.buffer_lines);
        let last = last_line.saturating_add(self.buffer_lines).min(lines - 1);

        let c = self.constraint();
        let first_item = first * c;
        let last_item = ((last + 1) * c - 1).min(item_count - 1);
        let natural = VisibleRange::new(first_item, last_item);
        if self.reverse {
            natural.mirrored(item_count)
        } else {
            natural
        }
    }

    /// Visible range for uniformly sized items, computed algebraically.
    pub fn visible_range(
        &self,
        normalized: f32,
        item_count: usize,
        viewport: Size,
        uniform: ItemSize,
    ) -> VisibleRange {
        let viewport_main = self.viewport_main(viewport);
        if item_count == 0 || !(viewport_main > 0.0) {
            return VisibleRange::EMPTY;
        }
        let stride = uniform.main + self.spacing;
        if !(stride > 0.0) || !stride.is_finite() {
            log::warn!("LayoutStrategy: non-positive item stride {stride}, no items visible");
            return VisibleRange::EMPTY;
        }

        let extent = self.compute_content_extent(item_count, uniform, viewport);
        let (view_start, view_end) = self.view_window(normalized, extent.main, viewport_main);
        let rel_start = view_start - self.padding.before;
        let rel_end = view_end - self.padding.before;

        let first_line = if rel_start <= 0.0 {
            0
        } else {
            (rel_start / stride).floor() as usize
        };
        let last_line = if rel_end <= 0.0 {
            0
        } else {
            ((rel_end / stride).ceil() as usize).saturating_sub(1)
        };

        self.range_from_lines(first_line, last_line, item_count)
    }

    /// Main/cross offset of an item, before it is mapped to x/y. Grid columns
    /// are spaced by the item's own cross size.
    pub fn item_offsets(&self, index: usize, item_count: usize, uniform: ItemSize) -> (f32, f32) {
        let view = self.view_index(index, item_count);
        let c = self.constraint();
        let line = view / c;
        let column = view % c;
        let main = self.padding.before + line as f32 * (uniform.main + self.spacing);
        let cross = self.cell_cross_offset(column, uniform.sanitized_cross());
        (main, cross)
    }

    /// Anchored position of an item in content coordinates.
    pub fn item_position(&self, index: usize, item_count: usize, uniform: ItemSize) -> Point {
        let (main, cross) = self.item_offsets(index, item_count, uniform);
        self.axis.point(main, cross)
    }

    /// Rectangle a slot occupies in content coordinates. Unlike
    /// [`item_position`](Self::item_position) this honors cross-axis
    /// stretching, so grid columns share the viewport's cross extent.
    pub fn item_placement(
        &self,
        index: usize,
        item_count: usize,
        uniform: ItemSize,
        viewport: Size,
    ) -> Rect {
        let view = self.view_index(index, item_count);
        let c = self.constraint();
        let (main, _) = self.item_offsets(index, item_count, uniform);
        let cell_cross = self.cell_cross_size(uniform.sanitized_cross(), viewport);
        let cross = self.cell_cross_offset(view % c, cell_cross);
        Rect::from_origin_size(
            self.axis.point(main, cross),
            self.axis.size(uniform.main.max(0.0), cell_cross),
        )
    }
}

#[cfg(test)]
#[path = "tests/strategy_tests.rs"]
mod tests;
