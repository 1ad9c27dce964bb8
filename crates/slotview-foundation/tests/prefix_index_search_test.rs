//! The binary-searched visible range must agree with a straightforward scan
//! over every line, for arbitrary sizes and positions.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use slotview_foundation::lazy::{PrefixIndex, SizeError};
use slotview_testing::prelude::*;
use slotview_testing::robot_assertions::assert_conserved;
use slotview_ui_layout::{Axis, ContentPadding, ItemSize, LayoutStrategy, Size};

const VIEWPORT: Size = Size {
    width: 320.0,
    height: 600.0,
};

fn random_mains(rng: &mut StdRng, count: usize) -> Vec<f32> {
    (0..count).map(|_| rng.gen_range(20.0f32..2000.0)).collect()
}

fn build_index(layout: &LayoutStrategy, mains: &[f32]) -> PrefixIndex {
    PrefixIndex::build(layout, VIEWPORT, mains.len(), 48.0, |index| {
        mains
            .get(index)
            .map(|&main| ItemSize::new(main, 320.0))
            .ok_or(SizeError::Unavailable { index })
    })
}

#[test]
fn test_controller_range_matches_linear_scan() {
    let mut rng = StdRng::seed_from_u64(0x5107);
    // Sizes 20, 40, ..., 2000 in shuffled order.
    let mut mains: Vec<f32> = (1..=100).map(|step| step as f32 * 20.0).collect();
    mains.shuffle(&mut rng);
    let items = TestItems::new(mains).with_cross(320.0);
    let mut robot = ListRobot::variable(items.clone(), VIEWPORT);
    let layout = robot.controller().layout().clone();

    for _ in 0..50 {
        let normalized: f32 = rng.gen_range(0.0..=1.0);
        robot.scroll_to_normalized(normalized);
        let expected = linear_scan_range(
            &items.mains(),
            &layout,
            robot.scroll_state().normalized(),
            VIEWPORT.height,
        );
        assert_eq!(robot.visible_range(), expected, "at {normalized}");
        assert_conserved(&robot.stats(), "random scroll");
    }
}

#[test]
fn test_index_matches_linear_scan_across_layouts() {
    let mut rng = StdRng::seed_from_u64(42);
    let layouts = [
        LayoutStrategy::linear(Axis::Vertical),
        LayoutStrategy::linear(Axis::Vertical)
            .with_spacing(8.0)
            .with_padding(ContentPadding::main(16.0, 24.0))
            .with_buffer_lines(0),
        LayoutStrategy::linear(Axis::Vertical).reversed(true),
        LayoutStrategy::grid(Axis::Vertical, 4).with_spacing(4.0),
        LayoutStrategy::grid(Axis::Vertical, 3).reversed(true),
    ];

    for layout in &layouts {
        let count = rng.gen_range(1..300);
        let mains = random_mains(&mut rng, count);
        let index = build_index(layout, &mains);
        for _ in 0..50 {
            let normalized: f32 = rng.gen_range(0.0..=1.0);
            assert_eq!(
                index.visible_range(normalized, VIEWPORT.height),
                linear_scan_range(&mains, layout, normalized, VIEWPORT.height),
                "{layout:?} with {count} items at {normalized}"
            );
        }
    }
}

#[test]
fn test_resized_index_matches_fresh_build() {
    let mut rng = StdRng::seed_from_u64(7);
    let layout = LayoutStrategy::linear(Axis::Vertical).with_spacing(2.0);
    let mut mains = random_mains(&mut rng, 120);
    let mut index = build_index(&layout, &mains);

    for _ in 0..20 {
        let target = rng.gen_range(0..mains.len());
        let main = rng.gen_range(20.0f32..2000.0);
        mains[target] = main;
        index.resize_item(target, ItemSize::new(main, 320.0));
    }

    let fresh = build_index(&layout, &mains);
    let tolerance = 0.01 * mains.len() as f32;
    assert!((index.extent().main - fresh.extent().main).abs() <= tolerance);
    for (patched, rebuilt) in index.starts().iter().zip(fresh.starts()) {
        assert!((patched - rebuilt).abs() <= tolerance, "{patched} vs {rebuilt}");
    }
}
