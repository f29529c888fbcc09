//! Wall-clock abstraction
//!
//! The second-hand scheduler aligns wake-ups to wall-clock second boundaries,
//! so the engine needs real time, not just a monotonic uptime counter.

/// Source of wall-clock time.
pub trait WallClock {
    /// Milliseconds since the Unix epoch (UTC).
    fn now_ms(&self) -> u64;
}

impl<C: WallClock + ?Sized> WallClock for &C {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

/// Wall clock derived from the Embassy uptime counter.
///
/// The host sets the epoch offset once it has synchronised time (RTC, phone
/// link, ...). Until then the clock reports uptime since boot, which still
/// produces correct second boundaries, just the wrong time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbassyClock {
    epoch_offset_ms: u64,
}

impl EmbassyClock {
    /// Create a clock whose `now_ms` is uptime plus `epoch_offset_ms`.
    pub const fn new(epoch_offset_ms: u64) -> Self {
        Self { epoch_offset_ms }
    }

    /// Re-anchor the clock after a time sync.
    pub fn set_epoch_offset_ms(&mut self, epoch_offset_ms: u64) {
        self.epoch_offset_ms = epoch_offset_ms;
    }

    /// Current epoch offset in milliseconds.
    pub fn epoch_offset_ms(&self) -> u64 {
        self.epoch_offset_ms
    }
}

impl WallClock for EmbassyClock {
    fn now_ms(&self) -> u64 {
        embassy_time::Instant::now()
            .as_millis()
            .saturating_add(self.epoch_offset_ms)
    }
}
