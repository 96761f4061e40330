use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{Duration, Instant};

/// Source of the playback position, in seconds.
///
/// The timeline follows whatever this reports, so an audio player's position
/// can drive it directly.
pub trait PlaybackClock: Send {
    fn current_time(&mut self) -> f32;
}

/// Wall-clock timer for frame timing and elapsed playback time.
#[derive(Debug, Clone)]
pub struct Timer {
    start_time: Instant,
    last_update: Instant,
    /// Time since last tick
    pub delta: Duration,
    /// Total elapsed time since creation
    pub elapsed: Duration,
    /// Total number of ticks
    pub frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Creates a new timer starting from now.
    #[must_use]
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_update: now,
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    pub fn tick(&mut self) {
        let now = Instant::now();
        self.delta = now - self.last_update;
        self.elapsed = now - self.start_time;
        self.last_update = now;
        self.frame_count += 1;
    }

    #[must_use]
    pub fn dt_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }
}

impl PlaybackClock for Timer {
    fn current_time(&mut self) -> f32 {
        self.tick();
        self.elapsed.as_secs_f32()
    }
}

/// Clock that only moves when told to.
///
/// Clones share the same position, so a test can keep one handle and move
/// the clock while another handle is owned by the animation thread.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    bits: Arc<AtomicU32>,
}

impl ManualClock {
    #[must_use]
    pub fn new(time: f32) -> Self {
        Self {
            bits: Arc::new(AtomicU32::new(time.to_bits())),
        }
    }

    pub fn set(&self, time: f32) {
        self.bits.store(time.to_bits(), Ordering::Release);
    }

    pub fn advance(&self, dt: f32) {
        let now = self.get();
        self.set(now + dt);
    }

    #[must_use]
    pub fn get(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Acquire))
    }
}

impl PlaybackClock for ManualClock {
    fn current_time(&mut self) -> f32 {
        self.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_clones_share_position() {
        let clock = ManualClock::new(1.5);
        let mut other = clock.clone();
        clock.advance(0.5);
        assert!((other.current_time() - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn timer_counts_ticks() {
        let mut timer = Timer::new();
        let a = timer.current_time();
        let b = timer.current_time();
        assert!(b >= a);
        assert_eq!(timer.frame_count, 2);
    }
}
