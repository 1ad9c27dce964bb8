//! Assertion utilities for robot testing
//!
//! This module provides assertion helpers and reference computations for
//! validating controller state in tests.

use slotview_foundation::LazyLayoutStats;
use slotview_ui_layout::{LayoutStrategy, Rect, VisibleRange};

/// Assert that a value is within an expected range.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert that a rectangle is approximately equal to another.
pub fn assert_rect_approx_eq(actual: Rect, expected: Rect, tolerance: f32, msg: &str) {
    assert_approx_eq(actual.x, expected.x, tolerance, &format!("{} - x", msg));
    assert_approx_eq(actual.y, expected.y, tolerance, &format!("{} - y", msg));
    assert_approx_eq(
        actual.width,
        expected.width,
        tolerance,
        &format!("{} - width", msg),
    );
    assert_approx_eq(
        actual.height,
        expected.height,
        tolerance,
        &format!("{} - height", msg),
    );
}

/// Assert that a collection has an expected count.
pub fn assert_count<T>(items: &[T], expected: usize, msg: &str) {
    assert_eq!(
        items.len(),
        expected,
        "{}: expected {} items, got {}",
        msg,
        expected,
        items.len()
    );
}

pub fn assert_range(actual: VisibleRange, first: isize, last: isize, msg: &str) {
    assert_eq!(
        actual.as_tuple(),
        (first, last),
        "{}: expected range ({}, {}), got {}",
        msg,
        first,
        last,
        actual
    );
}

pub fn assert_range_contains(range: VisibleRange, index: usize, msg: &str) {
    assert!(
        range.contains(index),
        "{}: item {} not in range {}",
        msg,
        index,
        range
    );
}

/// Assert that every slot the controller created is accounted for.
pub fn assert_conserved(stats: &LazyLayoutStats, msg: &str) {
    assert!(
        stats.is_conserved(),
        "{}: created {} != in use {} + pooled {} + destroyed {}",
        msg,
        stats.total_created,
        stats.items_in_use,
        stats.items_in_pool,
        stats.total_destroyed
    );
}

// ============================================================================
// Reference computations
// ============================================================================

/// Visible range found by walking every line from the start.
///
/// `mains` are the main sizes in logical order. The walk accumulates offsets
/// exactly like the prefix index does, so results can be compared with `==`.
pub fn linear_scan_range(
    mains: &[f32],
    layout: &LayoutStrategy,
    normalized: f32,
    viewport_main: f32,
) -> VisibleRange {
    let item_count = mains.len();
    let lines = layout.line_count(item_count);
    if lines == 0 || !(viewport_main > 0.0) {
        return VisibleRange::EMPTY;
    }

    let c = layout.constraint();
    let mut line_mains = vec![0.0f32; lines];
    for view in 0..item_count {
        let logical = layout.logical_index(view, item_count);
        line_mains[view / c] = line_mains[view / c].max(mains[logical]);
    }
    let sum_main: f32 = line_mains.iter().sum();
    let extent_main = layout.main_extent(lines, sum_main);
    let (view_start, view_end) = layout.view_window(normalized, extent_main, viewport_main);

    let mut first = None;
    let mut last = 0;
    let mut running = layout.padding().before;
    for (line, line_main) in line_mains.iter().enumerate() {
        if line > 0 {
            running += layout.spacing();
        }
        let start = running;
        running += line_main;
        if first.is_none() && running > view_start {
            first = Some(line);
        }
        if start < view_end {
            last = line;
        }
    }

    layout.range_from_lines(first.unwrap_or(lines - 1), last, item_count)
}
