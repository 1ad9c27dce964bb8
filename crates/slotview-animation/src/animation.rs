//! Tick-driven tween animations.
//!
//! Nothing here owns a timer. The host's frame loop calls
//! [`ScrollAnimation::tick`] with the current frame time; the first tick
//! anchors the start time, later ticks sample the eased value.

use crate::easing::Easing;
use web_time::Duration;

/// Duration, easing and start delay of a tween.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    pub duration: Duration,
    pub easing: Easing,
    pub delay: Duration,
}

impl AnimationSpec {
    pub fn tween(duration: Duration, easing: Easing) -> Self {
        Self {
            duration,
            easing,
            delay: Duration::ZERO,
        }
    }

    pub fn linear(duration: Duration) -> Self {
        Self::tween(duration, Easing::Linear)
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(Duration::from_millis(300), Easing::FastOutSlowIn)
    }
}

/// Sample produced by one animation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationFrame {
    pub value: f32,
    pub finished: bool,
}

/// Explicit animation state between two scalar values (normalized scroll
/// positions for the list controller).
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollAnimation {
    from: f32,
    to: f32,
    spec: AnimationSpec,
    start_time_nanos: Option<u64>,
    progress: f32,
    value: f32,
    finished: bool,
}

impl ScrollAnimation {
    pub fn new(from: f32, to: f32, spec: AnimationSpec) -> Self {
        Self {
            from,
            to,
            spec,
            start_time_nanos: None,
            progress: 0.0,
            value: from,
            finished: false,
        }
    }

    pub fn from(&self) -> f32 {
        self.from
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn spec(&self) -> AnimationSpec {
        self.spec
    }

    /// Linear (un-eased) progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Value produced by the last tick.
    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advances the animation to `frame_time_nanos`.
    pub fn tick(&mut self, frame_time_nanos: u64) -> AnimationFrame {
        if self.finished {
            return AnimationFrame {
                value: self.to,
                finished: true,
            };
        }

        let start = *self.start_time_nanos.get_or_insert(frame_time_nanos);
        let elapsed = frame_time_nanos.saturating_sub(start);
        let delay = duration_nanos(self.spec.delay);
        if elapsed < delay {
            return AnimationFrame {
                value: self.value,
                finished: false,
            };
        }

        let duration = duration_nanos(self.spec.duration);
        let linear = if duration == 0 {
            1.0
        } else {
            ((elapsed - delay) as f64 / duration as f64).clamp(0.0, 1.0) as f32
        };
        self.progress = linear;

        if linear >= 1.0 {
            self.finished = true;
            self.value = self.to;
            log::trace!(
                "ScrollAnimation: reached {} after {}ms",
                self.to,
                elapsed / 1_000_000
            );
        } else {
            let eased = self.spec.easing.transform(linear);
            self.value = self.from + (self.to - self.from) * eased;
        }

        AnimationFrame {
            value: self.value,
            finished: self.finished,
        }
    }
}

fn duration_nanos(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX)
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
