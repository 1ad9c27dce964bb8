//! Foundation of the slotview virtualization engine: the scroll controller and
//! the data structures behind it.

pub mod lazy;

pub use lazy::{
    ConfigError, ControllerError, ControllerPhase, HookError, ItemSizeProvider, ItemSizing,
    ItemSource, LazyLayoutStats, ScrollController, ScrollControllerBuilder,
    ScrollControllerConfig, ScrollOutcome, ScrollState, SizeError, SlotHooks, SlotId,
    SlotPlacement,
};

pub mod prelude {
    pub use crate::lazy::*;
    pub use slotview_animation::{AnimationSpec, Easing};
    pub use slotview_ui_layout::{
        Axis, ContentExtent, ContentPadding, ItemSize, LayoutKind, LayoutStrategy, Point, Rect,
        Size, VisibleRange,
    };
}
