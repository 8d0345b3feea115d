use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use crate::util::time::TickSource;

/// Simulated millisecond clock. Time advances only when someone sleeps on
/// it, so a control loop pacing itself at 10 ms per tick steps the clock
/// deterministically. Clones share the counter.
#[derive(Clone)]
pub struct SimTicks {
    now_ms: Arc<AtomicU32>,
}

impl SimTicks {
    pub fn new() -> Self {
        SimTicks {
            now_ms: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn set_ms(&self, ms: u32) {
        self.now_ms.store(ms, Ordering::Relaxed);
    }
}

impl Default for SimTicks {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSource for SimTicks {
    fn ticks_ms(&self) -> u32 {
        self.now_ms.load(Ordering::Relaxed)
    }

    fn delay_ms(&self, ms: u32) {
        self.now_ms.fetch_add(ms, Ordering::Relaxed);
    }
}
