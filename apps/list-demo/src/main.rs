mod rows;

use anyhow::{bail, Context};
use rows::{row_height, RowHooks};
use slotview_animation::Easing;
use slotview_core::ManualFrameClock;
use slotview_foundation::lazy::{
    ControllerPhase, ScrollController, ScrollControllerConfig, ScrollOutcome, ScrollState,
    SizeError,
};
use slotview_ui_layout::{Axis, ItemSize, LayoutStrategy, Size};
use web_time::Duration;

const ITEM_COUNT: usize = 10_000;
const VIEWPORT: Size = Size {
    width: 360.0,
    height: 640.0,
};
const FRAME_MILLIS: u64 = 16;

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== slotview headless demo ===");
    println!("{ITEM_COUNT} variable-height rows in a {VIEWPORT:?} viewport");
    println!();

    run_list()?;
    println!();
    run_grid()?;
    Ok(())
}

fn frame(controller: &mut ScrollController<RowHooks>, clock: &ManualFrameClock) {
    let now = clock.advance_millis(FRAME_MILLIS);
    controller.tick(now);
}

fn run_list() -> anyhow::Result<()> {
    let scroll = ScrollState::new(VIEWPORT);
    let config = ScrollControllerConfig::new()
        .variable(48.0)
        .rebuild_chunk_items(Some(2_500))
        .default_scroll_easing(Easing::FastOutSlowIn)
        .default_scroll_duration(Duration::from_millis(400));
    let mut controller = ScrollController::builder()
        .config(config)
        .hooks(RowHooks::default())
        .item_source(|| ITEM_COUNT)
        .size_provider(|index: usize, viewport: Size, _: &LayoutStrategy| {
            if index >= ITEM_COUNT {
                return Err(SizeError::Unavailable { index });
            }
            Ok(ItemSize::new(row_height(index), viewport.width))
        })
        .scroll_state(scroll.clone())
        .build()
        .context("building the list controller")?;
    controller
        .visible_range_changed()
        .subscribe(|range| log::debug!("visible range now {range}"));

    let clock = ManualFrameClock::new();
    controller.rebuild(true)?;
    let mut build_frames = 0;
    while controller.phase() == ControllerPhase::Building {
        frame(&mut controller, &clock);
        build_frames += 1;
    }
    println!(
        "index built over {} frames, extent {:.0}px",
        build_frames + 1,
        controller.content_extent().main
    );

    // Drag the scrollbar from top to bottom.
    let steps = 120;
    for step in 0..=steps {
        scroll.set_normalized(1.0 - step as f32 / steps as f32);
        frame(&mut controller, &clock);
    }
    println!("after fling: range {}", controller.get_visible_range());

    let completion = controller.scroll_to(5_000, 0.5, true, None)?;
    let mut animation_frames = 0;
    while controller.is_animating() {
        frame(&mut controller, &clock);
        animation_frames += 1;
    }
    if completion.value() != Some(ScrollOutcome::Completed) {
        bail!("scroll to item 5000 ended with {:?}", completion.value());
    }
    let label = controller
        .try_get_active_slot(5_000)
        .map(|row| row.label.clone())
        .unwrap_or_default();
    println!(
        "animated to item 5000 in {animation_frames} frames, range {}, slot says {label:?}",
        controller.get_visible_range()
    );

    let stats = controller.stats();
    let hooks = controller.hooks();
    println!(
        "slots: {} in use, {} pooled, {} created, {} reused; hooks saw {} binds and {} recycles",
        stats.items_in_use,
        stats.items_in_pool,
        stats.total_created,
        stats.reuse_count,
        hooks.binds,
        hooks.recycles
    );
    if !stats.is_conserved() {
        bail!("slot accounting is off: {stats:?}");
    }

    controller.dispose();
    Ok(())
}

fn run_grid() -> anyhow::Result<()> {
    let scroll = ScrollState::new(VIEWPORT);
    let config = ScrollControllerConfig::new()
        .layout(LayoutStrategy::grid(Axis::Vertical, 3).with_spacing(4.0))
        .uniform(ItemSize::new(120.0, 120.0));
    let mut controller = ScrollController::builder()
        .config(config)
        .hooks(RowHooks::default())
        .item_source(|| ITEM_COUNT)
        .scroll_state(scroll.clone())
        .build()
        .context("building the grid controller")?;
    controller.rebuild(true)?;
    println!(
        "grid: extent {:.0}px, first page {}",
        controller.content_extent().main,
        controller.get_visible_range()
    );

    let clock = ManualFrameClock::new();
    scroll.set_viewport_size(Size::new(VIEWPORT.height, VIEWPORT.width));
    frame(&mut controller, &clock);
    println!(
        "grid rotated to landscape: range {}, {} slots in use",
        controller.get_visible_range(),
        controller.stats().items_in_use
    );

    controller.scroll_to(ITEM_COUNT - 1, 1.0, false, None)?;
    println!("grid end: range {}", controller.get_visible_range());
    Ok(())
}
