//! Monotonic time sources for the timer.
//!
//! A clock reports seconds since an arbitrary epoch. The timer reads it once
//! per `advance` and tolerates readings that go backwards.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// A source of monotonic time in seconds.
pub trait Clock {
    fn now(&mut self) -> f64;
}

impl<F> Clock for F
where
    F: FnMut() -> f64,
{
    fn now(&mut self) -> f64 {
        self()
    }
}

/// Wall clock backed by [`Instant`]. Reports seconds since the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&mut self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Hand-driven clock for tests and scripted replays.
///
/// Clones share the same reading, so a caller can keep one handle and give
/// another to the timer.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    seconds: Rc<Cell<f64>>,
}

impl ManualClock {
    /// Create a clock reading 0 seconds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock at a specific reading.
    pub fn starting_at(seconds: f64) -> Self {
        Self {
            seconds: Rc::new(Cell::new(seconds)),
        }
    }

    /// Current reading.
    pub fn get(&self) -> f64 {
        self.seconds.get()
    }

    /// Jump to an absolute reading. May move backwards.
    pub fn set(&self, seconds: f64) {
        self.seconds.set(seconds);
    }

    /// Move the reading by `delta` seconds. Negative deltas move it backwards.
    pub fn advance(&self, delta: f64) {
        self.seconds.set(self.seconds.get() + delta);
    }
}

impl Clock for ManualClock {
    fn now(&mut self) -> f64 {
        self.seconds.get()
    }
}
