//! Frame time sources.
//!
//! The controller never reads the wall clock itself. The host passes the
//! current frame time (in nanoseconds) into `tick`, for example from a
//! [`ManualFrameClock`] in tests and headless drivers.

use std::cell::Cell;
use web_time::Duration;

/// Something that can report the time of the current frame.
pub trait FrameTimeSource {
    /// Monotonic frame time in nanoseconds.
    fn frame_nanos(&self) -> u64;

    fn frame_millis(&self) -> u64 {
        self.frame_nanos() / 1_000_000
    }
}

/// Manually advanced clock for tests and headless drivers.
#[derive(Debug, Default)]
pub struct ManualFrameClock {
    now_nanos: Cell<u64>,
}

impl ManualFrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(nanos: u64) -> Self {
        Self {
            now_nanos: Cell::new(nanos),
        }
    }

    /// Moves the clock forward and returns the new frame time.
    pub fn advance(&self, delta: Duration) -> u64 {
        let delta = u64::try_from(delta.as_nanos()).unwrap_or(u64::MAX);
        let next = self.now_nanos.get().saturating_add(delta);
        self.now_nanos.set(next);
        next
    }

    pub fn advance_millis(&self, millis: u64) -> u64 {
        self.advance(Duration::from_millis(millis))
    }
}

impl FrameTimeSource for ManualFrameClock {
    fn frame_nanos(&self) -> u64 {
        self.now_nanos.get()
    }
}
