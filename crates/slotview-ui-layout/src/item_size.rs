//! Sizes expressed along the list axes.

/// Measured size of one item: main-axis extent and cross-axis extent.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ItemSize {
    pub main: f32,
    pub cross: f32,
}

impl ItemSize {
    pub const fn new(main: f32, cross: f32) -> Self {
        Self { main, cross }
    }

    /// A usable item size has a finite, strictly positive main extent.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.main.is_finite() && self.main > 0.0
    }

    /// Cross extent with non-finite or negative values treated as zero.
    #[inline]
    pub fn sanitized_cross(&self) -> f32 {
        if self.cross.is_finite() {
            self.cross.max(0.0)
        } else {
            0.0
        }
    }
}

/// Total scrollable content size along both axes.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ContentExtent {
    pub main: f32,
    pub cross: f32,
}

impl ContentExtent {
    pub const ZERO: ContentExtent = ContentExtent {
        main: 0.0,
        cross: 0.0,
    };

    pub const fn new(main: f32, cross: f32) -> Self {
        Self { main, cross }
    }

    /// Distance the viewport can travel along the main axis.
    #[inline]
    pub fn scrollable_distance(&self, viewport_main: f32) -> f32 {
        (self.main - viewport_main).max(0.0)
    }
}
