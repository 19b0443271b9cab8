use std::time::Instant;

/// Monotonic millisecond time source.
///
/// Only differences between readings are meaningful; the epoch is arbitrary.
pub trait Clock: Send {
    /// Current reading in milliseconds.
    fn now_ms(&self) -> u64;
}

/// [`Clock`] backed by [`Instant`], anchored at construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Create a clock whose zero is now.
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
    fn now_ms(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}
