use crate::geometry::{Point, Size};

/// Primary scroll direction of a list or grid.
///
/// The main axis is the one items are laid end-to-end along; the cross axis is
/// perpendicular to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    /// Main axis: left to right.
    /// Cross axis: top to bottom.
    Horizontal,

    /// Main axis: top to bottom.
    /// Cross axis: left to right.
    #[default]
    Vertical,
}

impl Axis {
    /// Returns the opposite axis.
    #[inline]
    pub fn cross_axis(self) -> Self {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Axis::Horizontal)
    }

    #[inline]
    pub fn is_vertical(self) -> bool {
        matches!(self, Axis::Vertical)
    }

    /// Extent of `size` along this axis.
    #[inline]
    pub fn main_of(self, size: Size) -> f32 {
        match self {
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
        }
    }

    /// Extent of `size` across this axis.
    #[inline]
    pub fn cross_of(self, size: Size) -> f32 {
        match self {
            Axis::Horizontal => size.height,
            Axis::Vertical => size.width,
        }
    }

    /// Coordinate of `point` along this axis.
    #[inline]
    pub fn main_offset(self, point: Point) -> f32 {
        match self {
            Axis::Horizontal => point.x,
            Axis::Vertical => point.y,
        }
    }

    /// Builds a size from main/cross components.
    #[inline]
    pub fn size(self, main: f32, cross: f32) -> Size {
        match self {
            Axis::Horizontal => Size::new(main, cross),
            Axis::Vertical => Size::new(cross, main),
        }
    }

    /// Builds a point from main/cross offsets.
    #[inline]
    pub fn point(self, main: f32, cross: f32) -> Point {
        match self {
            Axis::Horizontal => Point::new(main, cross),
            Axis::Vertical => Point::new(cross, main),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_and_cross_components() {
        let size = Size::new(300.0, 40.0);
        assert_eq!(Axis::Vertical.main_of(size), 40.0);
        assert_eq!(Axis::Vertical.cross_of(size), 300.0);
        assert_eq!(Axis::Horizontal.main_of(size), 300.0);
    }

    #[test]
    fn test_point_and_size_round_trip() {
        let axis = Axis::Vertical;
        let size = axis.size(50.0, 200.0);
        assert_eq!(size, Size::new(200.0, 50.0));
        assert_eq!(axis.point(10.0, 2.0), Point::new(2.0, 10.0));
        assert_eq!(axis.main_offset(Point::new(2.0, 10.0)), 10.0);
        assert_eq!(axis.cross_axis(), Axis::Horizontal);
    }
}
