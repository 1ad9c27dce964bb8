//! Scroll controller: the orchestrator of a virtualized list.
//!
//! The controller owns the slot pool, the active-slot table and (for variable
//! sizes) the prefix index. On every rebuild or scroll it computes the visible
//! range, recycles slots that left it, binds slots for indices that entered it
//! and repositions the rest.
//!
//! # Phases
//!
//! ```text
//! Uninitialized --rebuild--> Building --(index complete)--> Ready
//!                               ^                             |
//!                               +-----------rebuild-----------+
//! any --dispose--> Disposed
//! ```
//!
//! `Building` only lasts across frames when chunked rebuilds are configured.
//! While building, the last stable range is reported, scroll events and
//! `scroll_to` requests are deferred, and partial tables are never queried.
//!
//! Everything is driven from the host's frame loop: [`ScrollController::tick`]
//! advances chunked builds and scroll animations.

use super::active_slots::{ActiveSlots, RefreshMode};
use super::config::{ItemSizing, ScrollControllerConfig};
use super::error::{ConfigError, ControllerError, SizeError};
use super::item_provider::{ItemSizeProvider, ItemSource, SlotHooks, SlotPlacement};
use super::prefix_index::{PrefixIndex, PrefixIndexBuilder};
use super::scroll_state::{ScrollSignal, ScrollState};
use super::size_cache::SizeCache;
use super::slot_pool::{SlotId, SlotPool};
use super::stats::LazyLayoutStats;
use super::viewport::ViewportHandler;
use slotview_animation::{AnimationSpec, ScrollAnimation};
use slotview_core::{completion_pair, Completion, CompletionSource, Event, SubscriptionId};
use slotview_ui_layout::{ContentExtent, ItemSize, LayoutStrategy, Point, Rect, Size, VisibleRange};
use std::cell::Cell;
use std::rc::Rc;
use web_time::Duration;

/// Lifecycle phase of a [`ScrollController`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControllerPhase {
    Uninitialized,
    Building,
    Ready,
    Disposed,
}

/// How a `scroll_to` request ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollOutcome {
    /// The target position was reached.
    Completed,
    /// A newer `scroll_to` or a rebuild replaced the request.
    Superseded,
    /// The controller was disposed first.
    Cancelled,
    /// Nothing to scroll to (empty list).
    Skipped,
}

/// Arguments of a `scroll_to` call, kept while the request is deferred.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollRequest {
    pub index: usize,
    /// 0.0 aligns the item with the viewport start, 1.0 with its end.
    pub alignment: f32,
    pub animated: bool,
    /// `None` uses the configured default duration.
    pub duration: Option<Duration>,
}

struct ActiveScroll {
    animation: ScrollAnimation,
    source: CompletionSource<ScrollOutcome>,
}

struct DeferredScroll {
    request: ScrollRequest,
    source: CompletionSource<ScrollOutcome>,
}

/// Where the viewport lands once a rebuild completes.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Landing {
    /// Back to the start of the content.
    Start,
    /// Same pixel offset as before the rebuild, clamped to the new extent.
    Offset(f32),
    /// Whatever normalized position the scroll state holds.
    AsIs,
}

struct PendingBuild {
    builder: PrefixIndexBuilder,
    landing: Landing,
    mode: RefreshMode,
}

/// Scroll-state notifications recorded between ticks.
#[derive(Default)]
struct SignalFlags {
    position: Cell<bool>,
    viewport: Cell<bool>,
}

/// Virtualizing controller for one list or grid.
pub struct ScrollController<H: SlotHooks> {
    config: ScrollControllerConfig,
    hooks: H,
    items: Option<Box<dyn ItemSource>>,
    sizes: Option<Box<dyn ItemSizeProvider>>,
    scroll: ScrollState,
    scroll_subscription: Option<SubscriptionId>,
    signals: Rc<SignalFlags>,
    phase: ControllerPhase,

    item_count: usize,
    /// Viewport as reported by the host at the last rebuild.
    host_viewport: Size,
    /// Viewport after unbounded-size fallback.
    viewport: Size,
    extent: ContentExtent,
    index: Option<PrefixIndex>,
    pending_build: Option<PendingBuild>,
    deferred_resizes: Vec<usize>,
    size_cache: SizeCache,

    pool: SlotPool<H::Slot>,
    active: ActiveSlots<H::Slot>,
    range: VisibleRange,
    range_changed: Event<VisibleRange>,

    animation: Option<ActiveScroll>,
    deferred_scroll: Option<DeferredScroll>,
    scroll_pending: bool,
    rebuild_count: usize,
}

impl<H: SlotHooks> std::fmt::Debug for ScrollController<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollController")
            .field("phase", &self.phase)
            .field("item_count", &self.item_count)
            .field("range", &self.range)
            .field("extent", &self.extent)
            .field("active", &self.active.len())
            .field("pooled", &self.pool.len())
            .finish()
    }
}

impl<H: SlotHooks> ScrollController<H> {
    pub fn builder() -> ScrollControllerBuilder<H> {
        ScrollControllerBuilder::new()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    pub fn phase(&self) -> ControllerPhase {
        self.phase
    }

    pub fn config(&self) -> &ScrollControllerConfig {
        &self.config
    }

    pub fn layout(&self) -> &LayoutStrategy {
        &self.config.layout
    }

    pub fn scroll_state(&self) -> &ScrollState {
        &self.scroll
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    /// Item count seen by the last completed rebuild.
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Last stable visible range; `(-1, -1)` when nothing is visible.
    pub fn get_visible_range(&self) -> VisibleRange {
        self.range
    }

    pub fn content_extent(&self) -> ContentExtent {
        self.extent
    }

    /// Pixel offset of the viewport start in content coordinates.
    pub fn scroll_offset(&self) -> f32 {
        let viewport_main = self.config.layout.viewport_main(self.viewport);
        self.config
            .layout
            .scroll_offset_for(self.scroll.normalized(), self.extent.main, viewport_main)
    }

    pub fn try_get_active_slot(&self, index: usize) -> Option<&H::Slot> {
        self.active.get(index)
    }

    pub fn try_get_active_slot_mut(&mut self, index: usize) -> Option<&mut H::Slot> {
        self.active.get_mut(index)
    }

    pub fn active_slot_id(&self, index: usize) -> Option<SlotId> {
        self.active.slot_id(index)
    }

    /// Indices with a bound slot, sorted.
    pub fn active_indices(&self) -> Vec<usize> {
        self.active.indices()
    }

    /// True when the last bind of `index` failed and has not been retried.
    pub fn is_index_failed(&self, index: usize) -> bool {
        self.active.is_failed(index)
    }

    /// Fired with the new range whenever `(first, last)` changes.
    pub fn visible_range_changed(&mut self) -> &mut Event<VisibleRange> {
        &mut self.range_changed
    }

    /// Anchored position of an item in content coordinates.
    pub fn item_position(&self, index: usize) -> Option<Point> {
        self.placement(index).map(|placement| placement.origin())
    }

    pub fn item_bounds(&self, index: usize) -> Option<Rect> {
        self.placement(index).map(|placement| placement.bounds)
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn stats(&self) -> LazyLayoutStats {
        LazyLayoutStats {
            items_in_use: self.active.len(),
            items_in_pool: self.pool.len(),
            total_created: self.pool.created(),
            total_destroyed: self.pool.destroyed(),
            reuse_count: self.pool.reused(),
            failed_items: self.active.failed_count(),
            item_count: self.item_count,
            rebuild_count: self.rebuild_count,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Rebuild
    // ─────────────────────────────────────────────────────────────────────

    /// Re-reads the item count, re-measures (reusing cached sizes) and
    /// refreshes. Surviving slots are bound again. Without `reset_position`
    /// the viewport keeps its pixel offset. Supersedes a running scroll
    /// animation; a `scroll_to` deferred until ready runs once it completes.
    pub fn rebuild(&mut self, reset_position: bool) -> Result<(), ControllerError> {
        self.ensure_live()?;
        self.start_rebuild(reset_position, RefreshMode::Rebind);
        Ok(())
    }

    /// The viewport size or layout parameters changed: drops cached sizes and
    /// rebuilds, keeping the position. Surviving slots are only repositioned.
    pub fn notify_viewport_or_layout_changed(&mut self) -> Result<(), ControllerError> {
        self.ensure_live()?;
        self.size_cache.clear();
        self.start_rebuild(false, RefreshMode::Reposition);
        Ok(())
    }

    /// The collection changed: drops cached sizes and rebuilds.
    pub fn notify_data_changed(&mut self) -> Result<(), ControllerError> {
        self.ensure_live()?;
        self.size_cache.clear();
        self.start_rebuild(false, RefreshMode::Rebind);
        Ok(())
    }

    pub fn set_layout(&mut self, layout: LayoutStrategy) -> Result<(), ControllerError> {
        self.ensure_live()?;
        self.config.layout = layout;
        self.size_cache.clear();
        self.start_rebuild(false, RefreshMode::Reposition);
        Ok(())
    }

    /// Re-measures one item and shifts the tables in place. Content before the
    /// viewport keeps its on-screen position.
    pub fn invalidate_item_size(&mut self, index: usize) -> Result<(), ControllerError> {
        self.ensure_live()?;
        self.size_cache.remove(index);
        match self.phase {
            ControllerPhase::Building => self.deferred_resizes.push(index),
            ControllerPhase::Ready => self.resize_in_place(index),
            _ => {}
        }
        Ok(())
    }

    fn current_item_count(&self) -> usize {
        match (self.config.item_count_override, &self.items) {
            (Some(count), _) => count,
            (None, Some(items)) => items.item_count(),
            (None, None) => 0,
        }
    }

    fn start_rebuild(&mut self, reset_position: bool, mode: RefreshMode) {
        if let Some(active) = self.animation.take() {
            active.source.resolve(ScrollOutcome::Superseded);
        }
        self.deferred_resizes.clear();

        // A build restarted before completing keeps a pending reset. The
        // offset is measured against the last installed extent and viewport.
        let pending_landing = self.pending_build.as_ref().map(|pending| pending.landing);
        let landing = if reset_position || pending_landing == Some(Landing::Start) {
            Landing::Start
        } else if self.rebuild_count > 0 {
            Landing::Offset(self.scroll_offset())
        } else {
            pending_landing.unwrap_or(Landing::AsIs)
        };

        let item_count = self.current_item_count();
        self.host_viewport = self.scroll.viewport_size();
        self.signals.viewport.set(false);
        let average = match self.config.sizing {
            ItemSizing::Uniform(size) => size.main,
            ItemSizing::Variable { fallback } => self.size_cache.average_main().unwrap_or(fallback),
        };
        self.viewport = ViewportHandler::new(
            self.host_viewport,
            self.config.layout.axis(),
            average,
            self.config.layout.spacing(),
        )
        .effective_size();

        match self.config.sizing {
            ItemSizing::Uniform(size) => {
                self.pending_build = None;
                self.index = None;
                self.item_count = item_count;
                let layout = &self.config.layout;
                self.extent = layout.compute_content_extent(item_count, size, self.viewport);
                self.finish_rebuild(landing, mode);
            }
            ItemSizing::Variable { fallback } => {
                let builder = PrefixIndexBuilder::new(
                    self.config.layout.clone(),
                    self.viewport,
                    item_count,
                    fallback,
                );
                self.pending_build = Some(PendingBuild {
                    builder,
                    landing,
                    mode,
                });
                if self.phase != ControllerPhase::Building {
                    log::debug!("ScrollController: building index for {item_count} items");
                    self.phase = ControllerPhase::Building;
                }
                self.advance_build();
            }
        }
    }

    /// Runs one budgeted build step; installs the index when complete.
    fn advance_build(&mut self) {
        let Some(PendingBuild {
            mut builder,
            landing,
            mode,
        }) = self.pending_build.take()
        else {
            return;
        };

        let budget = self.config.build_budget();
        let sizes = self.sizes.as_deref();
        let cache = &mut self.size_cache;
        let layout = &self.config.layout;
        let viewport = self.viewport;
        builder.step(budget, |index| measure_item(sizes, cache, index, viewport, layout));

        match builder.into_index() {
            Ok(index) => {
                self.item_count = index.item_count();
                self.extent = index.extent();
                self.index = Some(index);
                self.finish_rebuild(landing, mode);
            }
            Err(builder) => {
                log::trace!(
                    "ScrollController: measured {}/{} items",
                    builder.measured(),
                    builder.item_count()
                );
                self.pending_build = Some(PendingBuild {
                    builder,
                    landing,
                    mode,
                });
            }
        }
    }

    fn finish_rebuild(&mut self, landing: Landing, mode: RefreshMode) {
        if self.phase != ControllerPhase::Ready {
            log::debug!("ScrollController: {:?} -> Ready", self.phase);
        }
        self.phase = ControllerPhase::Ready;
        self.rebuild_count += 1;

        match landing {
            Landing::Start => self.set_position(1.0),
            Landing::Offset(offset) => {
                let layout = &self.config.layout;
                let viewport_main = layout.viewport_main(self.viewport);
                let normalized = layout.normalized_for(offset, self.extent.main, viewport_main);
                self.set_position(normalized);
            }
            Landing::AsIs => {}
        }
        if mode == RefreshMode::Rebind {
            self.active.clear_all_failed();
        }
        self.scroll_pending = false;
        self.signals.position.set(false);
        self.refresh(mode);
        for index in std::mem::take(&mut self.deferred_resizes) {
            self.resize_in_place(index);
        }
        log::debug!(
            "ScrollController: rebuilt {} items, extent {:?}, range {}",
            self.item_count,
            self.extent,
            self.range
        );

        if let Some(DeferredScroll { request, source }) = self.deferred_scroll.take() {
            self.apply_scroll_request(request, source);
        }
    }

    fn resize_in_place(&mut self, index: usize) {
        if self.config.sizing.is_uniform() || index >= self.item_count {
            return;
        }
        let layout = &self.config.layout;
        let viewport_main = layout.viewport_main(self.viewport);
        let Some(prefix) = self.index.as_mut() else {
            return;
        };
        let Some((_, line_end)) = prefix.item_line_span(index) else {
            return;
        };

        let size = match measure_item(
            self.sizes.as_deref(),
            &mut self.size_cache,
            index,
            self.viewport,
            layout,
        ) {
            Ok(size) if size.is_valid() => size,
            Ok(size) => {
                log::warn!(
                    "ScrollController: item {index} resized to invalid main size {}, keeping the old size",
                    size.main
                );
                return;
            }
            Err(err) => {
                log::warn!("ScrollController: {err}, keeping the old size");
                return;
            }
        };

        let old_offset =
            layout.scroll_offset_for(self.scroll.normalized(), prefix.extent().main, viewport_main);
        let Some(delta) = prefix.resize_item(index, size) else {
            return;
        };
        self.extent = prefix.extent();

        // Lines wholly before the window push the window along with them.
        let new_offset = if line_end <= old_offset {
            old_offset + delta
        } else {
            old_offset
        };
        let normalized = layout.normalized_for(new_offset, self.extent.main, viewport_main);
        self.set_position(normalized);
        self.refresh(RefreshMode::Reposition);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Refresh
    // ─────────────────────────────────────────────────────────────────────

    /// Recomputes the visible range only. Deferred while building.
    pub fn on_scroll(&mut self) -> Result<(), ControllerError> {
        self.ensure_live()?;
        if self.phase == ControllerPhase::Ready {
            self.signals.position.set(false);
            self.refresh(RefreshMode::Reposition);
        } else {
            self.scroll_pending = true;
        }
        Ok(())
    }

    /// Binds `index` again if it is active, or retries a failed bind.
    /// Returns whether the index ends up bound.
    pub fn rebind_index(&mut self, index: usize) -> Result<bool, ControllerError> {
        self.ensure_live()?;
        if self.phase != ControllerPhase::Ready || !self.range.contains(index) {
            return Ok(false);
        }
        if self.active.contains(index) {
            let bound = self.rebind_active(index);
            if bound {
                self.position_active(index);
            }
            return Ok(bound);
        }
        self.active.clear_failed(index);
        Ok(self.bind_new(index))
    }

    fn compute_range(&self) -> VisibleRange {
        if self.item_count == 0 {
            return VisibleRange::EMPTY;
        }
        let normalized = self.scroll.normalized();
        let layout = &self.config.layout;
        match self.config.sizing {
            ItemSizing::Uniform(size) => {
                layout.visible_range(normalized, self.item_count, self.viewport, size)
            }
            ItemSizing::Variable { .. } => {
                let viewport_main = layout.viewport_main(self.viewport);
                self.index
                    .as_ref()
                    .map_or(VisibleRange::EMPTY, |index| {
                        index.visible_range(normalized, viewport_main)
                    })
            }
        }
    }

    fn refresh(&mut self, mode: RefreshMode) {
        if self.phase != ControllerPhase::Ready {
            return;
        }
        let range = self.compute_range();

        let outgoing = self.active.outgoing(range);
        for &index in &outgoing {
            if let Some((id, slot)) = self.active.remove(index) {
                self.recycle_slot(index, id, slot);
            }
        }
        self.active.retain_failed_within(range);

        let mut bound = 0usize;
        for index in range.indices() {
            if self.active.contains(index) {
                if mode == RefreshMode::Rebind && !self.rebind_active(index) {
                    continue;
                }
                self.position_active(index);
            } else if !self.active.is_failed(index) && self.bind_new(index) {
                bound += 1;
            }
        }

        if self.item_count == 0 {
            self.drain_pool();
        }

        log::trace!(
            "ScrollController: range {range}, recycled {}, bound {bound}, active {}, pooled {}",
            outgoing.len(),
            self.active.len(),
            self.pool.len()
        );
        self.set_range(range);
    }

    fn set_range(&mut self, range: VisibleRange) {
        if range != self.range {
            self.range = range;
            self.range_changed.emit(&range);
        }
    }

    fn placement(&self, index: usize) -> Option<SlotPlacement> {
        if index >= self.item_count {
            return None;
        }
        let bounds = match self.config.sizing {
            ItemSizing::Uniform(size) => {
                self.config
                    .layout
                    .item_placement(index, self.item_count, size, self.viewport)
            }
            ItemSizing::Variable { .. } => self.index.as_ref()?.item_rect(index)?,
        };
        Some(SlotPlacement { index, bounds })
    }

    /// Acquires, binds and positions a slot for a new index.
    fn bind_new(&mut self, index: usize) -> bool {
        let Some(placement) = self.placement(index) else {
            return false;
        };
        let hooks = &mut self.hooks;
        let (id, mut slot) = match self.pool.acquire(|id| hooks.create(id)) {
            Ok(entry) => entry,
            Err(err) => {
                log::warn!("ScrollController: creating a slot for item {index} failed: {err}");
                self.active.mark_failed(index);
                return false;
            }
        };

        if let Err(err) = self.hooks.bind(index, &mut slot) {
            log::warn!("ScrollController: binding item {index} to slot {id} failed: {err}");
            self.active.mark_failed(index);
            self.release_slot(id, slot);
            return false;
        }

        self.hooks.position(&mut slot, placement);
        self.active.insert(index, id, slot);
        true
    }

    /// Binds an active slot again. On failure the slot returns to the pool.
    fn rebind_active(&mut self, index: usize) -> bool {
        let Some(slot) = self.active.get_mut(index) else {
            return false;
        };
        match self.hooks.bind(index, slot) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("ScrollController: rebinding item {index} failed: {err}");
                if let Some((id, slot)) = self.active.remove(index) {
                    self.release_slot(id, slot);
                }
                self.active.mark_failed(index);
                false
            }
        }
    }

    fn position_active(&mut self, index: usize) {
        let Some(placement) = self.placement(index) else {
            return;
        };
        if let Some(slot) = self.active.get_mut(index) {
            self.hooks.position(slot, placement);
        }
    }

    fn recycle_slot(&mut self, index: usize, id: SlotId, mut slot: H::Slot) {
        if let Err(err) = self.hooks.recycle(index, &mut slot) {
            log::warn!("ScrollController: recycling item {index} from slot {id} failed: {err}");
        }
        self.release_slot(id, slot);
    }

    fn release_slot(&mut self, id: SlotId, slot: H::Slot) {
        if let Some((_, overflow)) = self.pool.release(id, slot) {
            self.hooks.destroy(overflow);
        }
    }

    fn drain_pool(&mut self) {
        for (_, slot) in self.pool.drain() {
            self.hooks.destroy(slot);
        }
    }

    /// Changes how many idle slots the pool keeps. Idle slots over the new
    /// limit are destroyed, oldest first; `None` lifts the limit.
    pub fn set_pool_capacity(&mut self, capacity: Option<usize>) -> Result<(), ControllerError> {
        self.ensure_live()?;
        self.config.pool_capacity = capacity;
        let overflow = self.pool.set_capacity(capacity);
        if !overflow.is_empty() {
            log::debug!(
                "ScrollController: pool capacity now {capacity:?}, destroying {} idle slots",
                overflow.len()
            );
        }
        for (_, slot) in overflow {
            self.hooks.destroy(slot);
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Scrolling
    // ─────────────────────────────────────────────────────────────────────

    /// Scrolls so that `index` sits at `alignment` within the viewport
    /// (0.0 = viewport start, 1.0 = viewport end).
    ///
    /// Animated scrolls are advanced by [`tick`](Self::tick). A newer
    /// `scroll_to` supersedes the request, as does a rebuild started while it
    /// animates; dispose cancels it. Requests made before the controller is
    /// ready run once it is.
    pub fn scroll_to(
        &mut self,
        index: usize,
        alignment: f32,
        animated: bool,
        duration: Option<Duration>,
    ) -> Result<Completion<ScrollOutcome>, ControllerError> {
        self.ensure_live()?;
        let (source, completion) = completion_pair();
        let request = ScrollRequest {
            index,
            alignment,
            animated,
            duration,
        };

        if self.phase != ControllerPhase::Ready {
            log::debug!("ScrollController: deferring scroll to {index} until ready");
            let deferred = DeferredScroll { request, source };
            if let Some(previous) = self.deferred_scroll.replace(deferred) {
                previous.source.resolve(ScrollOutcome::Superseded);
            }
            return Ok(completion);
        }

        self.apply_scroll_request(request, source);
        Ok(completion)
    }

    fn apply_scroll_request(
        &mut self,
        request: ScrollRequest,
        source: CompletionSource<ScrollOutcome>,
    ) {
        if let Some(previous) = self.animation.take() {
            previous.source.resolve(ScrollOutcome::Superseded);
        }
        let Some(target) = self.target_position(request.index, request.alignment) else {
            source.resolve(ScrollOutcome::Skipped);
            return;
        };

        let duration = request
            .duration
            .unwrap_or(self.config.default_scroll_duration);
        let current = self.scroll.normalized();
        if !request.animated || duration.is_zero() || (target - current).abs() <= f32::EPSILON {
            self.set_position(target);
            self.refresh(RefreshMode::Reposition);
            source.resolve(ScrollOutcome::Completed);
            return;
        }

        let spec = AnimationSpec::tween(duration, self.config.default_scroll_easing);
        log::debug!(
            "ScrollController: animating to item {} ({current} -> {target})",
            request.index
        );
        self.animation = Some(ActiveScroll {
            animation: ScrollAnimation::new(current, target, spec),
            source,
        });
    }

    /// Normalized position that places `index` at `alignment`.
    fn target_position(&self, index: usize, alignment: f32) -> Option<f32> {
        if self.item_count == 0 {
            return None;
        }
        let index = if index >= self.item_count {
            log::debug!(
                "ScrollController: scroll target {index} clamped to {}",
                self.item_count - 1
            );
            self.item_count - 1
        } else {
            index
        };
        let alignment = if alignment.is_nan() {
            0.0
        } else {
            alignment.clamp(0.0, 1.0)
        };

        let layout = &self.config.layout;
        let axis = layout.axis();
        let bounds = self.placement(index)?.bounds;
        let item_start = axis.main_offset(bounds.origin());
        let item_main = axis.main_of(bounds.size());
        let viewport_main = layout.viewport_main(self.viewport);

        let scrollable = self.extent.scrollable_distance(viewport_main);
        let offset = (item_start - alignment * (viewport_main - item_main)).clamp(0.0, scrollable);
        Some(layout.normalized_for(offset, self.extent.main, viewport_main))
    }

    fn set_position(&mut self, normalized: f32) {
        self.scroll.set_normalized(normalized);
        // Our own write; not a host scroll.
        self.signals.position.set(false);
    }

    /// Advances the controller by one frame: continues a chunked build,
    /// reacts to viewport changes, steps the scroll animation and consumes
    /// host scroll notifications.
    pub fn tick(&mut self, frame_time_nanos: u64) {
        if self.phase == ControllerPhase::Disposed {
            return;
        }
        if self.phase == ControllerPhase::Building {
            self.advance_build();
        }
        if self.phase != ControllerPhase::Ready {
            return;
        }

        if self.signals.viewport.replace(false) && self.scroll.viewport_size() != self.host_viewport
        {
            log::debug!(
                "ScrollController: viewport changed to {:?}",
                self.scroll.viewport_size()
            );
            self.size_cache.clear();
            self.start_rebuild(false, RefreshMode::Reposition);
            if self.phase != ControllerPhase::Ready {
                return;
            }
        }

        if let Some(mut active) = self.animation.take() {
            let frame = active.animation.tick(frame_time_nanos);
            self.set_position(frame.value);
            self.refresh(RefreshMode::Reposition);
            if frame.finished {
                active.source.resolve(ScrollOutcome::Completed);
            } else {
                self.animation = Some(active);
            }
        }

        let host_scrolled = self.signals.position.replace(false);
        if host_scrolled || std::mem::take(&mut self.scroll_pending) {
            self.refresh(RefreshMode::Reposition);
        }
    }

    fn resolve_scrolls(&mut self, outcome: ScrollOutcome) {
        if let Some(active) = self.animation.take() {
            active.source.resolve(outcome);
        }
        if let Some(deferred) = self.deferred_scroll.take() {
            deferred.source.resolve(outcome);
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Disposal
    // ─────────────────────────────────────────────────────────────────────

    fn ensure_live(&self) -> Result<(), ControllerError> {
        if self.phase == ControllerPhase::Disposed {
            Err(ControllerError::Disposed)
        } else {
            Ok(())
        }
    }

    /// Recycles and destroys every slot, cancels pending scrolls and detaches
    /// from the scroll state. Idempotent; also run on drop.
    pub fn dispose(&mut self) {
        if self.phase == ControllerPhase::Disposed {
            return;
        }
        self.resolve_scrolls(ScrollOutcome::Cancelled);
        self.pending_build = None;
        self.deferred_resizes.clear();

        let active = self.active.drain();
        let released = active.len();
        for (index, id, mut slot) in active {
            if let Err(err) = self.hooks.recycle(index, &mut slot) {
                log::warn!("ScrollController: recycling item {index} on dispose failed: {err}");
            }
            let (_, slot) = self.pool.retire(id, slot);
            self.hooks.destroy(slot);
        }
        self.drain_pool();

        if let Some(id) = self.scroll_subscription.take() {
            self.scroll.unsubscribe(id);
        }
        self.range_changed.clear();
        self.index = None;
        self.size_cache.clear();
        self.range = VisibleRange::EMPTY;
        self.phase = ControllerPhase::Disposed;
        log::debug!("ScrollController: disposed ({released} active slots released)");
    }
}

impl<H: SlotHooks> Drop for ScrollController<H> {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Size for `index`: the cache first, then the provider. Only valid sizes are
/// cached.
fn measure_item(
    sizes: Option<&dyn ItemSizeProvider>,
    cache: &mut SizeCache,
    index: usize,
    viewport: Size,
    layout: &LayoutStrategy,
) -> Result<ItemSize, SizeError> {
    if let Some(size) = cache.get(index) {
        return Ok(size);
    }
    let provider = sizes.ok_or(SizeError::Unavailable { index })?;
    let size = provider.item_size(index, viewport, layout)?;
    if size.is_valid() {
        cache.insert(index, size);
    }
    Ok(size)
}

/// Assembles a [`ScrollController`] and validates its configuration.
pub struct ScrollControllerBuilder<H: SlotHooks> {
    config: ScrollControllerConfig,
    hooks: Option<H>,
    items: Option<Box<dyn ItemSource>>,
    sizes: Option<Box<dyn ItemSizeProvider>>,
    scroll: Option<ScrollState>,
}

impl<H: SlotHooks> Default for ScrollControllerBuilder<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: SlotHooks> ScrollControllerBuilder<H> {
    pub fn new() -> Self {
        Self {
            config: ScrollControllerConfig::default(),
            hooks: None,
            items: None,
            sizes: None,
            scroll: None,
        }
    }

    pub fn config(mut self, config: ScrollControllerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn hooks(mut self, hooks: H) -> Self {
        self.hooks = Some(hooks);
        self
    }

    pub fn item_source(mut self, items: impl ItemSource + 'static) -> Self {
        self.items = Some(Box::new(items));
        self
    }

    pub fn size_provider(mut self, sizes: impl ItemSizeProvider + 'static) -> Self {
        self.sizes = Some(Box::new(sizes));
        self
    }

    /// Shares an existing scroll state. A fresh one is created otherwise.
    pub fn scroll_state(mut self, scroll: ScrollState) -> Self {
        self.scroll = Some(scroll);
        self
    }

    /// Validates the configuration. The controller starts `Uninitialized`;
    /// call [`ScrollController::rebuild`] to populate it.
    pub fn build(self) -> Result<ScrollController<H>, ConfigError> {
        self.config.validate()?;
        let hooks = self.hooks.ok_or(ConfigError::MissingHooks)?;
        if self.items.is_none() && self.config.item_count_override.is_none() {
            return Err(ConfigError::MissingItemSource);
        }
        if !self.config.sizing.is_uniform() && self.sizes.is_none() {
            return Err(ConfigError::MissingSizeProvider);
        }

        let scroll = self.scroll.unwrap_or_default();
        let signals = Rc::new(SignalFlags::default());
        let subscription = {
            let signals = Rc::clone(&signals);
            scroll.subscribe(move |signal| match signal {
                ScrollSignal::Position(_) => signals.position.set(true),
                ScrollSignal::Viewport(_) => signals.viewport.set(true),
            })
        };

        let pool = SlotPool::new(self.config.pool_capacity);
        let size_cache = SizeCache::new(self.config.size_cache_capacity);
        let viewport = scroll.viewport_size();
        Ok(ScrollController {
            config: self.config,
            hooks,
            items: self.items,
            sizes: self.sizes,
            scroll,
            scroll_subscription: Some(subscription),
            signals,
            phase: ControllerPhase::Uninitialized,
            item_count: 0,
            host_viewport: viewport,
            viewport,
            extent: ContentExtent::ZERO,
            index: None,
            pending_build: None,
            deferred_resizes: Vec::new(),
            size_cache,
            pool,
            active: ActiveSlots::default(),
            range: VisibleRange::EMPTY,
            range_changed: Event::new(),
            animation: None,
            deferred_scroll: None,
            scroll_pending: false,
            rebuild_count: 0,
        })
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
