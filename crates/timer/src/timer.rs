use serde::{Deserialize, Serialize};

use crate::clock::{Clock, MonotonicClock};
use crate::config::TimerConfig;
use crate::error::TimerError;

/// Per-frame outputs and running counters, captured after an `advance`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameStats {
    pub frame: u64,
    pub time: f64,
    pub ticks: u32,
    pub interpolation: f64,
    pub fps: f64,
    pub time_scale: f64,
    pub total_ticks: u64,
    pub dropped_seconds: f64,
}

/// Fixed-step timer owned by a single simulation loop.
///
/// Call [`Timer::advance`] once per loop iteration, then run
/// [`Timer::ticks_this_frame`] simulation steps and render with
/// [`Timer::interpolation`] as the blend factor between the last two states.
///
/// Time lost to a stall (debugger pause, minimized window) is dropped: each
/// call sees at most [`Timer::MAX_ELAPSED_SECONDS`] of real time and hands out
/// at most [`Timer::MAX_TICKS_PER_UPDATE`] ticks.
#[derive(Debug)]
pub struct Timer<C: Clock = MonotonicClock> {
    clock: C,
    ticks_per_second: f64,
    time_scale: f64,
    last_timestamp: f64,
    accumulated_ticks: f64,
    ticks_this_frame: u32,
    interpolation: f64,
    fps: f64,
    total_ticks: u64,
    frames: u64,
    dropped_seconds: f64,
}

impl Timer<MonotonicClock> {
    /// Create a timer on the process monotonic clock.
    pub fn new(ticks_per_second: f64) -> Result<Self, TimerError> {
        Self::with_clock(ticks_per_second, MonotonicClock::new())
    }
}

impl<C: Clock> Timer<C> {
    /// Upper bound on ticks handed out by a single `advance`.
    pub const MAX_TICKS_PER_UPDATE: u32 = 100;
    /// Upper bound on real time, in seconds, considered by a single `advance`.
    pub const MAX_ELAPSED_SECONDS: f64 = 1.0;

    /// Create a timer reading time from `clock`.
    pub fn with_clock(ticks_per_second: f64, mut clock: C) -> Result<Self, TimerError> {
        if !(ticks_per_second.is_finite() && ticks_per_second > 0.0) {
            return Err(TimerError::InvalidTickRate(ticks_per_second));
        }
        let last_timestamp = clock.now();
        tracing::debug!(ticks_per_second, start = last_timestamp, "timer created");
        Ok(Self {
            clock,
            ticks_per_second,
            time_scale: 1.0,
            last_timestamp,
            accumulated_ticks: 0.0,
            ticks_this_frame: 0,
            interpolation: 0.0,
            fps: 0.0,
            total_ticks: 0,
            frames: 0,
            dropped_seconds: 0.0,
        })
    }

    /// Create a timer from a validated config.
    pub fn from_config(config: &TimerConfig, clock: C) -> Result<Self, TimerError> {
        config.validate()?;
        let mut timer = Self::with_clock(config.ticks_per_second, clock)?;
        timer.time_scale = config.time_scale;
        Ok(timer)
    }

    /// Read the clock and work out how many ticks this frame should run.
    pub fn advance(&mut self) {
        let now = self.clock.now();
        let raw = now - self.last_timestamp;
        self.last_timestamp = now;

        let elapsed = if raw > Self::MAX_ELAPSED_SECONDS {
            let dropped = raw - Self::MAX_ELAPSED_SECONDS;
            self.dropped_seconds += dropped;
            tracing::debug!(elapsed = raw, dropped, "stall clamped");
            Self::MAX_ELAPSED_SECONDS
        } else if raw > 0.0 {
            raw
        } else {
            // Covers NaN readings too.
            if raw < 0.0 {
                tracing::trace!(elapsed = raw, "clock went backwards");
            }
            0.0
        };

        if elapsed > 0.0 {
            self.fps = Self::MAX_ELAPSED_SECONDS / elapsed;
        }

        let gained = elapsed * self.time_scale * self.ticks_per_second;
        if gained.is_finite() && gained > 0.0 {
            self.accumulated_ticks += gained;
        }

        // Whole ticks beyond the cap are dropped along with the rest.
        let whole = self.accumulated_ticks.floor();
        self.accumulated_ticks -= whole;
        let cap = f64::from(Self::MAX_TICKS_PER_UPDATE);
        self.ticks_this_frame = if whole > cap {
            tracing::debug!(wanted = whole, cap, "tick cap reached");
            Self::MAX_TICKS_PER_UPDATE
        } else {
            whole as u32
        };

        self.interpolation = self.accumulated_ticks;
        self.total_ticks += u64::from(self.ticks_this_frame);
        self.frames += 1;
    }

    /// Forget accumulated time and restart measuring from the current clock reading.
    ///
    /// Tick rate and time scale are kept.
    pub fn reset(&mut self) {
        self.last_timestamp = self.clock.now();
        self.accumulated_ticks = 0.0;
        self.ticks_this_frame = 0;
        self.interpolation = 0.0;
        self.fps = 0.0;
        self.total_ticks = 0;
        self.frames = 0;
        self.dropped_seconds = 0.0;
        tracing::debug!(start = self.last_timestamp, "timer reset");
    }

    /// Ticks to simulate for the frame measured by the last `advance`.
    pub fn ticks_this_frame(&self) -> u32 {
        self.ticks_this_frame
    }

    /// Fraction of a tick accumulated past the last whole tick, in `[0, 1)`.
    pub fn interpolation(&self) -> f64 {
        self.interpolation
    }

    /// Frame rate estimate from the last non-zero frame time.
    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Scale applied to real time. `0.0` pauses the simulation.
    pub fn set_time_scale(&mut self, time_scale: f64) {
        self.time_scale = time_scale;
    }

    /// Clock reading, in seconds, recorded by the last `advance` (or construction/reset).
    pub fn current_time(&self) -> f64 {
        self.last_timestamp
    }

    pub fn ticks_per_second(&self) -> f64 {
        self.ticks_per_second
    }

    /// Simulated seconds covered by one tick.
    pub fn tick_duration(&self) -> f64 {
        1.0 / self.ticks_per_second
    }

    /// Ticks handed out since construction or the last reset.
    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    /// Number of `advance` calls since construction or the last reset.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Real seconds discarded by the per-call elapsed clamp.
    pub fn dropped_seconds(&self) -> f64 {
        self.dropped_seconds
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Snapshot of the current frame outputs and counters.
    pub fn stats(&self) -> FrameStats {
        FrameStats {
            frame: self.frames,
            time: self.last_timestamp,
            ticks: self.ticks_this_frame,
            interpolation: self.interpolation,
            fps: self.fps,
            time_scale: self.time_scale,
            total_ticks: self.total_ticks,
            dropped_seconds: self.dropped_seconds,
        }
    }
}
