/// Content padding expressed in main/cross terms.
///
/// `before`/`after` pad the main axis (top/bottom for vertical lists);
/// `cross_before`/`cross_after` pad the cross axis.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ContentPadding {
    pub before: f32,
    pub after: f32,
    pub cross_before: f32,
    pub cross_after: f32,
}

impl ContentPadding {
    pub const ZERO: ContentPadding = ContentPadding {
        before: 0.0,
        after: 0.0,
        cross_before: 0.0,
        cross_after: 0.0,
    };

    /// Same padding on all four sides.
    pub fn all(value: f32) -> Self {
        Self {
            before: value,
            after: value,
            cross_before: value,
            cross_after: value,
        }
    }

    /// Padding on the main axis only.
    pub fn main(before: f32, after: f32) -> Self {
        Self {
            before,
            after,
            ..Self::ZERO
        }
    }

    pub fn with_cross(mut self, cross_before: f32, cross_after: f32) -> Self {
        self.cross_before = cross_before;
        self.cross_after = cross_after;
        self
    }

    #[inline]
    pub fn main_total(&self) -> f32 {
        self.before + self.after
    }

    #[inline]
    pub fn cross_total(&self) -> f32 {
        self.cross_before + self.cross_after
    }
}
