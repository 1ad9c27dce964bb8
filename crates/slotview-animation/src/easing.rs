//! Easing curves.

/// Easing applied to the linear progress of a tween.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    /// No easing.
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Material "standard" curve, the default for programmatic scrolls.
    #[default]
    FastOutSlowIn,
    LinearOutSlowIn,
    FastOutLinearIn,
    /// Arbitrary cubic bezier through (0,0), (x1,y1), (x2,y2), (1,1).
    Custom(CubicBezier),
}

impl Easing {
    /// Maps linear progress in `[0, 1]` to eased progress.
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::Linear => fraction.clamp(0.0, 1.0),
            Easing::EaseIn => CubicBezier::new(0.42, 0.0, 1.0, 1.0).solve(fraction),
            Easing::EaseOut => CubicBezier::new(0.0, 0.0, 0.58, 1.0).solve(fraction),
            Easing::EaseInOut => CubicBezier::new(0.42, 0.0, 0.58, 1.0).solve(fraction),
            Easing::FastOutSlowIn => CubicBezier::new(0.4, 0.0, 0.2, 1.0).solve(fraction),
            Easing::LinearOutSlowIn => CubicBezier::new(0.0, 0.0, 0.2, 1.0).solve(fraction),
            Easing::FastOutLinearIn => CubicBezier::new(0.4, 0.0, 1.0, 1.0).solve(fraction),
            Easing::Custom(curve) => curve.solve(fraction),
        }
    }
}

/// Cubic bezier timing curve with fixed end points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

impl CubicBezier {
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Polynomial coefficients `(a, b, c)` for one coordinate.
    fn coefficients(p1: f32, p2: f32) -> (f32, f32, f32) {
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        let a = 1.0 - c - b;
        (a, b, c)
    }

    fn sample((a, b, c): (f32, f32, f32), t: f32) -> f32 {
        ((a * t + b) * t + c) * t
    }

    fn slope((a, b, c): (f32, f32, f32), t: f32) -> f32 {
        (3.0 * a * t + 2.0 * b) * t + c
    }

    /// Eased value for progress `x`, clamped to `[0, 1]` at the ends.
    pub fn solve(&self, x: f32) -> f32 {
        if x.is_nan() || x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        let xs = Self::coefficients(self.x1, self.x2);
        let ys = Self::coefficients(self.y1, self.y2);

        // Newton-Raphson first, bisection when the slope flattens out.
        let mut t = x;
        for _ in 0..8 {
            let error = Self::sample(xs, t) - x;
            if error.abs() < 1e-6 {
                return Self::sample(ys, t);
            }
            let slope = Self::slope(xs, t);
            if slope.abs() < 1e-6 {
                break;
            }
            t = (t - error / slope).clamp(0.0, 1.0);
        }

        let (mut lo, mut hi) = (0.0f32, 1.0f32);
        t = x;
        for _ in 0..20 {
            let error = Self::sample(xs, t) - x;
            if error.abs() < 1e-6 {
                break;
            }
            if error > 0.0 {
                hi = t;
            } else {
                lo = t;
            }
            t = 0.5 * (lo + hi);
        }
        Self::sample(ys, t)
    }
}
