//! Utility Module
//!
//! - [`time`]: playback clocks ([`Timer`] for wall time, [`ManualClock`] for
//!   scrubbing and tests) behind the [`PlaybackClock`] trait

pub mod time;

pub use time::{ManualClock, PlaybackClock, Timer};
