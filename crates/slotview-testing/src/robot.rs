//! Robot-style harness for driving a scroll controller headlessly.
//!
//! A [`ListRobot`] owns a controller wired to [`RecordingHooks`], a
//! [`ScrollState`] playing the host's scrollbar and a [`ManualFrameClock`].
//! Tests act like the host would: move the scrollbar, resize the window,
//! pump frames.
//!
//! # Example
//!
//! ```
//! use slotview_testing::robot::ListRobot;
//! use slotview_testing::items::TestItems;
//! use slotview_ui_layout::Size;
//!
//! let items = TestItems::uniform(1000, 50.0);
//! let mut robot = ListRobot::uniform(items, 50.0, Size::new(300.0, 500.0));
//!
//! robot.scroll_to_normalized(0.0);
//! assert_eq!(robot.visible_range().last(), 999);
//! ```

use crate::hooks::{HookLog, RecordedSlot, RecordingHooks};
use crate::items::TestItems;
use slotview_core::{Completion, FrameTimeSource, ManualFrameClock};
use slotview_foundation::lazy::{
    ControllerPhase, LazyLayoutStats, ScrollController, ScrollControllerConfig, ScrollOutcome,
    ScrollState,
};
use slotview_ui_layout::{ItemSize, Size, VisibleRange};

/// Frame interval used by [`ListRobot::frame`].
pub const FRAME_MILLIS: u64 = 16;

/// Upper bound on frames pumped by [`ListRobot::run_until_idle`].
pub const MAX_IDLE_FRAMES: usize = 1_000;

/// Headless driver around a [`ScrollController`].
pub struct ListRobot {
    controller: ScrollController<RecordingHooks>,
    scroll: ScrollState,
    clock: ManualFrameClock,
    items: TestItems,
    log: HookLog,
}

impl ListRobot {
    /// Builds a controller for `items` with `config` and runs the first
    /// rebuild. The builder must accept the configuration.
    pub fn new(items: TestItems, config: ScrollControllerConfig, viewport: Size) -> Self {
        let log = HookLog::new();
        let scroll = ScrollState::new(viewport);
        let controller = ScrollController::builder()
            .config(config)
            .hooks(RecordingHooks::new(log.clone()))
            .item_source(items.item_source())
            .size_provider(items.size_provider())
            .scroll_state(scroll.clone())
            .build()
            .unwrap_or_else(|err| panic!("ListRobot: invalid configuration: {err}"));
        let mut robot = Self {
            controller,
            scroll,
            clock: ManualFrameClock::new(),
            items,
            log,
        };
        robot.rebuild(true);
        robot
    }

    /// Fixed-size items of `main` along the scroll axis.
    pub fn uniform(items: TestItems, main: f32, viewport: Size) -> Self {
        let cross = viewport.width;
        Self::new(
            items,
            ScrollControllerConfig::new().uniform(ItemSize::new(main, cross)),
            viewport,
        )
    }

    /// Items measured through the collection's size provider.
    pub fn variable(items: TestItems, viewport: Size) -> Self {
        Self::new(items, ScrollControllerConfig::new(), viewport)
    }

    pub fn controller(&self) -> &ScrollController<RecordingHooks> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut ScrollController<RecordingHooks> {
        &mut self.controller
    }

    pub fn hooks_mut(&mut self) -> &mut RecordingHooks {
        self.controller.hooks_mut()
    }

    pub fn items(&self) -> &TestItems {
        &self.items
    }

    pub fn log(&self) -> &HookLog {
        &self.log
    }

    pub fn scroll_state(&self) -> &ScrollState {
        &self.scroll
    }

    pub fn now_nanos(&self) -> u64 {
        self.clock.frame_nanos()
    }

    pub fn visible_range(&self) -> VisibleRange {
        self.controller.get_visible_range()
    }

    pub fn stats(&self) -> LazyLayoutStats {
        self.controller.stats()
    }

    pub fn slot(&self, index: usize) -> Option<&RecordedSlot> {
        self.controller.try_get_active_slot(index)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Host actions
    // ─────────────────────────────────────────────────────────────────────

    pub fn rebuild(&mut self, reset_position: bool) {
        self.controller
            .rebuild(reset_position)
            .unwrap_or_else(|err| panic!("ListRobot: rebuild failed: {err}"));
    }

    pub fn notify_data_changed(&mut self) {
        self.controller
            .notify_data_changed()
            .unwrap_or_else(|err| panic!("ListRobot: data change failed: {err}"));
    }

    /// Moves the scrollbar and lets one frame observe it.
    pub fn scroll_to_normalized(&mut self, normalized: f32) {
        self.scroll.set_normalized(normalized);
        self.frame();
    }

    /// Resizes the viewport and lets one frame observe it.
    pub fn resize(&mut self, viewport: Size) {
        self.scroll.set_viewport_size(viewport);
        self.frame();
    }

    pub fn scroll_to_item(
        &mut self,
        index: usize,
        alignment: f32,
        animated: bool,
    ) -> Completion<ScrollOutcome> {
        self.controller
            .scroll_to(index, alignment, animated, None)
            .unwrap_or_else(|err| panic!("ListRobot: scroll_to failed: {err}"))
    }

    /// Advances the clock by one frame and ticks the controller.
    pub fn frame(&mut self) {
        let now = self.clock.advance_millis(FRAME_MILLIS);
        self.controller.tick(now);
    }

    /// Pumps frames until no build or animation is in flight. Returns the
    /// number of frames pumped.
    pub fn run_until_idle(&mut self) -> usize {
        for frames in 0..MAX_IDLE_FRAMES {
            let busy = self.controller.phase() == ControllerPhase::Building
                || self.controller.is_animating();
            if !busy {
                return frames;
            }
            self.frame();
        }
        log::warn!("ListRobot: still busy after {MAX_IDLE_FRAMES} frames");
        MAX_IDLE_FRAMES
    }

    pub fn dispose(&mut self) {
        self.controller.dispose();
    }
}
