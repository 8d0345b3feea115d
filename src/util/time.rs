use std::thread;
use std::time::{Duration, Instant};

/// Millisecond tick counter used for all loop timing. Implementations must be
/// monotonic; the counter is allowed to wrap at `u32::MAX`, elapsed times go
/// through [`ticks_diff`].
pub trait TickSource {
    fn ticks_ms(&self) -> u32;
    fn delay_ms(&self, ms: u32);
}

/// Wraparound-safe elapsed milliseconds between two tick readings.
pub fn ticks_diff(now: u32, earlier: u32) -> u32 {
    now.wrapping_sub(earlier)
}

/// Tick source backed by the OS monotonic clock.
pub struct MonotonicTicks {
    started: Instant,
}

impl MonotonicTicks {
    pub fn new() -> Self {
        MonotonicTicks {
            started: Instant::now(),
        }
    }
}

impl Default for MonotonicTicks {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSource for MonotonicTicks {
    fn ticks_ms(&self) -> u32 {
        self.started.elapsed().as_millis() as u32
    }

    fn delay_ms(&self, ms: u32) {
        thread::sleep(Duration::from_millis(ms as u64));
    }
}
