use super::{LayoutKind, LayoutStrategy};
use crate::{Axis, ContentPadding, ItemSize, Point, Size, VisibleRange};

const VIEWPORT: Size = Size {
    width: 300.0,
    height: 500.0,
};

fn uniform(main: f32) -> ItemSize {
    ItemSize::new(main, 300.0)
}

#[test]
fn uniform_extent_matches_item_count() {
    let layout = LayoutStrategy::linear(Axis::Vertical);
    let extent = layout.compute_content_extent(1000, uniform(50.0), VIEWPORT);
    assert_eq!(extent.main, 50_000.0);
    assert_eq!(extent.cross, 300.0);
}

#[test]
fn extent_includes_spacing_and_padding() {
    let layout = LayoutStrategy::linear(Axis::Vertical)
        .with_spacing(10.0)
        .with_padding(ContentPadding::main(5.0, 15.0));
    let extent = layout.compute_content_extent(4, uniform(50.0), VIEWPORT);
    // 4 * 50 + 3 * 10 + 5 + 15
    assert_eq!(extent.main, 250.0);
}

#[test]
fn range_at_start_covers_first_page_plus_buffer() {
    let layout = LayoutStrategy::linear(Axis::Vertical);
    let range = layout.visible_range(1.0, 1000, VIEWPORT, uniform(50.0));
    assert_eq!(range.as_tuple(), (0, 10));
}

#[test]
fn range_at_end_reaches_last_item() {
    let layout = LayoutStrategy::linear(Axis::Vertical);
    let range = layout.visible_range(0.0, 1000, VIEWPORT, uniform(50.0));
    assert_eq!(range.as_tuple(), (989, 999));
}

#[test]
fn range_in_the_middle() {
    let layout = LayoutStrategy::linear(Axis::Vertical).with_buffer_lines(0);
    // offset = 0.5 * 49_500 = 24_750 -> lines 495..=504
    let range = layout.visible_range(0.5, 1000, VIEWPORT, uniform(50.0));
    assert_eq!(range.as_tuple(), (495, 504));
}

#[test]
fn empty_collection_or_viewport_yields_empty_range() {
    let layout = LayoutStrategy::linear(Axis::Vertical);
    assert_eq!(
        layout.visible_range(1.0, 0, VIEWPORT, uniform(50.0)),
        VisibleRange::EMPTY
    );
    assert_eq!(
        layout.visible_range(1.0, 10, Size::ZERO, uniform(50.0)),
        VisibleRange::EMPTY
    );
}

#[test]
fn short_list_is_fully_visible() {
    let layout = LayoutStrategy::linear(Axis::Vertical);
    let range = layout.visible_range(0.3, 3, VIEWPORT, uniform(50.0));
    assert_eq!(range.as_tuple(), (0, 2));
}

#[test]
fn reverse_mirrors_positions() {
    let forward = LayoutStrategy::linear(Axis::Vertical);
    let reversed = LayoutStrategy::linear(Axis::Vertical).reversed(true);
    let n = 20;
    for i in 0..n {
        assert_eq!(
            reversed.item_position(i, n, uniform(30.0)),
            forward.item_position(n - 1 - i, n, uniform(30.0))
        );
    }
}

#[test]
fn reverse_mirrors_visible_range() {
    let layout = LayoutStrategy::linear(Axis::Vertical)
        .reversed(true)
        .with_buffer_lines(0);
    let range = layout.visible_range(1.0, 100, Size::new(300.0, 50.0), uniform(10.0));
    assert_eq!(range.as_tuple(), (95, 99));
}

#[test]
fn grid_expands_to_full_rows() {
    let layout = LayoutStrategy::grid(Axis::Vertical, 3).with_buffer_lines(0);
    let viewport = Size::new(300.0, 250.0);
    let extent = layout.compute_content_extent(10, uniform(100.0), viewport);
    assert_eq!(extent.main, 400.0);

    // Rows 0..=2 are visible, the partial last row is not.
    let range = layout.visible_range(1.0, 10, viewport, uniform(100.0));
    assert_eq!(range.as_tuple(), (0, 8));

    // At the end the last row holds only item 9.
    let range = layout.visible_range(0.0, 10, viewport, uniform(100.0));
    assert_eq!(range.as_tuple(), (3, 9));
}

#[test]
fn grid_positions_are_row_major() {
    let layout = LayoutStrategy::grid(Axis::Vertical, 3).with_spacing(4.0);
    let size = ItemSize::new(20.0, 10.0);
    assert_eq!(layout.item_position(0, 9, size), Point::new(0.0, 0.0));
    assert_eq!(layout.item_position(2, 9, size), Point::new(28.0, 0.0));
    assert_eq!(layout.item_position(4, 9, size), Point::new(14.0, 24.0));
}

#[test]
fn grid_constraint_below_one_is_clamped() {
    let layout = LayoutStrategy::grid(Axis::Horizontal, 0);
    assert_eq!(layout.kind(), LayoutKind::Grid { constraint: 1 });
    assert_eq!(layout.constraint(), 1);
    assert!(!layout.is_grid());
    assert_eq!(layout.line_count(7), 7);
}

#[test]
fn horizontal_axis_uses_width() {
    let layout = LayoutStrategy::linear(Axis::Horizontal).with_buffer_lines(0);
    let viewport = Size::new(100.0, 40.0);
    let range = layout.visible_range(1.0, 50, viewport, ItemSize::new(25.0, 40.0));
    assert_eq!(range.as_tuple(), (0, 3));
    assert_eq!(
        layout.item_position(2, 50, ItemSize::new(25.0, 40.0)),
        Point::new(50.0, 0.0)
    );
}

#[test]
fn normalized_round_trip() {
    let layout = LayoutStrategy::linear(Axis::Vertical);
    let offset = layout.scroll_offset_for(0.25, 10_500.0, 500.0);
    assert_eq!(offset, 7_500.0);
    assert!((layout.normalized_for(offset, 10_500.0, 500.0) - 0.25).abs() < 1e-6);
    // Nothing to scroll: always the start position.
    assert_eq!(layout.normalized_for(30.0, 400.0, 500.0), 1.0);
    assert_eq!(layout.scroll_offset_for(f32::NAN, 10_500.0, 500.0), 0.0);
}

#[test]
fn stretched_cells_share_cross_axis() {
    let layout = LayoutStrategy::grid(Axis::Vertical, 4)
        .with_spacing(10.0)
        .with_padding(ContentPadding::ZERO.with_cross(5.0, 5.0));
    // 300 - 10 padding - 30 spacing = 260 / 4
    assert_eq!(layout.cell_cross_size(999.0, VIEWPORT), 65.0);
    assert_eq!(layout.cell_cross_offset(2, 65.0), 155.0);

    let fixed = layout.clone().with_stretch_cross_axis(false);
    assert_eq!(fixed.cell_cross_size(40.0, VIEWPORT), 40.0);
    // 10 padding + 4 * 40 + 3 * 10
    assert_eq!(fixed.cross_extent(40.0, VIEWPORT), 200.0);
}

#[test]
fn placement_stretches_grid_cells() {
    let layout = LayoutStrategy::grid(Axis::Vertical, 3);
    let viewport = Size::new(300.0, 500.0);
    let rect = layout.item_placement(4, 9, ItemSize::new(40.0, 10.0), viewport);
    assert_eq!(rect.origin(), Point::new(100.0, 40.0));
    assert_eq!(rect.size(), Size::new(100.0, 40.0));
}
