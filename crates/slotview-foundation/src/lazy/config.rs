//! Controller configuration.

use super::error::ConfigError;
use super::prefix_index::BuildBudget;
use super::size_cache::DEFAULT_SIZE_CACHE_CAPACITY;
use super::viewport::DEFAULT_ITEM_SIZE_ESTIMATE;
use slotview_animation::Easing;
use slotview_ui_layout::{ItemSize, LayoutStrategy};
use web_time::Duration;

/// Idle slots kept for reuse by default.
pub const DEFAULT_POOL_CAPACITY: usize = 32;

/// Duration of an animated `scroll_to` when the caller passes `None`.
pub const DEFAULT_SCROLL_DURATION: Duration = Duration::from_millis(300);

/// How item sizes are obtained.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ItemSizing {
    /// Every item has this size; ranges are computed algebraically.
    Uniform(ItemSize),
    /// Sizes come from an [`ItemSizeProvider`](super::ItemSizeProvider).
    /// `fallback` is the main size used until the first valid measurement.
    Variable { fallback: f32 },
}

impl Default for ItemSizing {
    fn default() -> Self {
        ItemSizing::Variable {
            fallback: DEFAULT_ITEM_SIZE_ESTIMATE,
        }
    }
}

impl ItemSizing {
    pub fn is_uniform(&self) -> bool {
        matches!(self, ItemSizing::Uniform(_))
    }
}

/// Tuning knobs for a scroll controller.
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollControllerConfig {
    pub layout: LayoutStrategy,
    pub sizing: ItemSizing,
    /// Idle slots retained for reuse. `None` keeps all of them.
    pub pool_capacity: Option<usize>,
    pub size_cache_capacity: usize,
    /// Used instead of the item source's count when set.
    pub item_count_override: Option<usize>,
    /// Items measured per frame while rebuilding a variable-size index.
    /// `None` (with no time budget) rebuilds synchronously.
    pub rebuild_chunk_items: Option<usize>,
    pub rebuild_time_budget: Option<Duration>,
    pub default_scroll_easing: Easing,
    pub default_scroll_duration: Duration,
}

impl Default for ScrollControllerConfig {
    fn default() -> Self {
        Self {
            layout: LayoutStrategy::default(),
            sizing: ItemSizing::default(),
            pool_capacity: Some(DEFAULT_POOL_CAPACITY),
            size_cache_capacity: DEFAULT_SIZE_CACHE_CAPACITY,
            item_count_override: None,
            rebuild_chunk_items: None,
            rebuild_time_budget: None,
            default_scroll_easing: Easing::FastOutSlowIn,
            default_scroll_duration: DEFAULT_SCROLL_DURATION,
        }
    }
}

impl ScrollControllerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layout(mut self, layout: LayoutStrategy) -> Self {
        self.layout = layout;
        self
    }

    pub fn uniform(mut self, size: ItemSize) -> Self {
        self.sizing = ItemSizing::Uniform(size);
        self
    }

    pub fn variable(mut self, fallback: f32) -> Self {
        self.sizing = ItemSizing::Variable { fallback };
        self
    }

    pub fn pool_capacity(mut self, capacity: Option<usize>) -> Self {
        self.pool_capacity = capacity;
        self
    }

    pub fn size_cache_capacity(mut self, capacity: usize) -> Self {
        self.size_cache_capacity = capacity;
        self
    }

    pub fn item_count_override(mut self, count: Option<usize>) -> Self {
        self.item_count_override = count;
        self
    }

    pub fn rebuild_chunk_items(mut self, items: Option<usize>) -> Self {
        self.rebuild_chunk_items = items;
        self
    }

    pub fn rebuild_time_budget(mut self, budget: Option<Duration>) -> Self {
        self.rebuild_time_budget = budget;
        self
    }

    pub fn default_scroll_easing(mut self, easing: Easing) -> Self {
        self.default_scroll_easing = easing;
        self
    }

    pub fn default_scroll_duration(mut self, duration: Duration) -> Self {
        self.default_scroll_duration = duration;
        self
    }

    /// Budget for one rebuild step.
    pub fn build_budget(&self) -> BuildBudget {
        BuildBudget {
            max_items: self.rebuild_chunk_items.map(|items| items.max(1)),
            time_budget: self.rebuild_time_budget,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.sizing {
            ItemSizing::Uniform(size) if !size.is_valid() => {
                Err(ConfigError::InvalidUniformSize(size))
            }
            ItemSizing::Variable { fallback } if !(fallback.is_finite() && fallback > 0.0) => {
                Err(ConfigError::InvalidFallbackSize(fallback))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotview_ui_layout::Axis;

    #[test]
    fn test_defaults() {
        let config = ScrollControllerConfig::default();
        assert_eq!(config.pool_capacity, Some(DEFAULT_POOL_CAPACITY));
        assert_eq!(
            config.sizing,
            ItemSizing::Variable {
                fallback: DEFAULT_ITEM_SIZE_ESTIMATE
            }
        );
        assert!(config.build_budget().is_unlimited());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_setters() {
        let config = ScrollControllerConfig::new()
            .layout(LayoutStrategy::grid(Axis::Horizontal, 3))
            .uniform(ItemSize::new(40.0, 40.0))
            .pool_capacity(None)
            .item_count_override(Some(7))
            .rebuild_chunk_items(Some(0));
        assert!(config.sizing.is_uniform());
        assert_eq!(config.layout.constraint(), 3);
        assert_eq!(config.item_count_override, Some(7));
        assert_eq!(config.build_budget().max_items, Some(1));
    }

    #[test]
    fn test_validation() {
        let bad_uniform = ScrollControllerConfig::new().uniform(ItemSize::new(0.0, 10.0));
        assert_eq!(
            bad_uniform.validate(),
            Err(ConfigError::InvalidUniformSize(ItemSize::new(0.0, 10.0)))
        );
        let bad_fallback = ScrollControllerConfig::new().variable(f32::INFINITY);
        assert!(matches!(
            bad_fallback.validate(),
            Err(ConfigError::InvalidFallbackSize(_))
        ));
    }
}
