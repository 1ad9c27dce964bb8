/// Statistics about slot lifecycle.
///
/// Used for testing and debugging virtualization behavior.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LazyLayoutStats {
    /// Slots currently bound to an index.
    pub items_in_use: usize,

    /// Idle slots waiting in the pool.
    pub items_in_pool: usize,

    /// Slots created over the controller's lifetime.
    pub total_created: usize,

    /// Slots destroyed (pool overflow, drain, dispose).
    pub total_destroyed: usize,

    /// Acquisitions served from the pool instead of `create`.
    pub reuse_count: usize,

    /// Indices in the window whose bind failed.
    pub failed_items: usize,

    pub item_count: usize,

    /// Completed rebuilds.
    pub rebuild_count: usize,
}

impl LazyLayoutStats {
    /// `created == in_use + in_pool + destroyed`.
    pub fn is_conserved(&self) -> bool {
        self.total_created == self.items_in_use + self.items_in_pool + self.total_destroyed
    }
}
