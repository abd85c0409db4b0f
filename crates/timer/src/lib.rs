//! Fixed-step timer: turns wall-clock deltas into a bounded number of
//! simulation ticks per frame, plus a render interpolation factor.
//!
//! # Invariants
//! - A single `advance` never hands out more than `Timer::MAX_TICKS_PER_UPDATE` ticks.
//! - Real time lost to a stall is dropped, never caught up.
//! - Interpolation is always in `[0, 1)`.

pub mod clock;
pub mod config;
pub mod error;
pub mod timer;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::TimerConfig;
pub use error::TimerError;
pub use timer::{FrameStats, Timer};
