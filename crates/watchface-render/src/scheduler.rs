//! Second-hand animation scheduler.
//!
//! A pure, clock-agnostic state machine: the caller feeds it the current
//! wall-clock time and it answers whether a tick is due and how long to
//! sleep until the next one. Wake-ups land on whole-second boundaries.
//!
//! ```text
//!            start(now)                    poll(now >= due)
//!  Stopped ─────────────► Running{due} ───────────────────► Running{due'}
//!     ▲                        │                              (emits Tick)
//!     └────────── stop() ──────┘
//! ```
//!
//! Cancellation is synchronous: once [`SecondHandScheduler::stop`] returns,
//! `poll` yields nothing until the next `start`, so a timer that was already
//! sleeping on the old deadline fires into a no-op.

use watchface::{face_debug, millis_until_next_second};

/// One animation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tick {
    /// Deadline the tick was scheduled for.
    pub due_ms: u64,
    /// Time the tick was observed.
    pub fired_ms: u64,
    /// Deadline of the following tick.
    pub next_due_ms: u64,
}

impl Tick {
    /// How late the tick fired.
    pub fn lateness_ms(&self) -> u64 {
        self.fired_ms.saturating_sub(self.due_ms)
    }
}

/// Cancellable per-second wake-up schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SecondHandScheduler {
    due_ms: Option<u64>,
}

fn next_boundary(now_ms: u64) -> u64 {
    now_ms.saturating_add(millis_until_next_second(now_ms))
}

impl SecondHandScheduler {
    /// A stopped scheduler.
    pub const fn new() -> Self {
        Self { due_ms: None }
    }

    /// Start ticking at the next second boundary after `now_ms`.
    ///
    /// Returns `false` (and changes nothing) if already running.
    pub fn start(&mut self, now_ms: u64) -> bool {
        if self.due_ms.is_some() {
            return false;
        }
        let due = next_boundary(now_ms);
        self.due_ms = Some(due);
        face_debug!("second hand started, first tick at {}", due);
        true
    }

    /// Cancel the pending wake-up.
    ///
    /// Returns `false` if already stopped.
    pub fn stop(&mut self) -> bool {
        let was_running = self.due_ms.take().is_some();
        if was_running {
            face_debug!("second hand stopped");
        }
        was_running
    }

    /// Whether a wake-up is pending.
    pub fn is_running(&self) -> bool {
        self.due_ms.is_some()
    }

    /// Deadline of the pending wake-up.
    pub fn next_wake_ms(&self) -> Option<u64> {
        self.due_ms
    }

    /// Time left until the pending wake-up, `Some(0)` when overdue.
    pub fn delay_ms(&self, now_ms: u64) -> Option<u64> {
        self.due_ms.map(|due| due.saturating_sub(now_ms))
    }

    /// Fire the tick if it is due and schedule the next one.
    ///
    /// Early or stale wake-ups return `None`. A late wake-up fires once and
    /// re-aligns to the next boundary instead of replaying missed seconds.
    pub fn poll(&mut self, now_ms: u64) -> Option<Tick> {
        let due = self.due_ms?;
        if now_ms < due {
            return None;
        }
        let next = next_boundary(now_ms);
        self.due_ms = Some(next);
        Some(Tick {
            due_ms: due,
            fired_ms: now_ms,
            next_due_ms: next,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_aligns_to_boundary() {
        let mut s = SecondHandScheduler::new();
        assert!(s.start(12_345));
        assert_eq!(s.next_wake_ms(), Some(13_000));
        assert_eq!(s.delay_ms(12_345), Some(655));
    }

    #[test]
    fn test_start_twice_is_noop() {
        let mut s = SecondHandScheduler::new();
        assert!(s.start(100));
        assert!(!s.start(900));
        assert_eq!(s.next_wake_ms(), Some(1_000));
    }

    #[test]
    fn test_stop_twice_is_noop() {
        let mut s = SecondHandScheduler::new();
        assert!(!s.stop());
        s.start(0);
        assert!(s.stop());
        assert!(!s.stop());
        assert!(!s.is_running());
    }

    #[test]
    fn test_early_poll_does_nothing() {
        let mut s = SecondHandScheduler::new();
        s.start(500);
        assert_eq!(s.poll(999), None);
        assert_eq!(s.next_wake_ms(), Some(1_000));
    }

    #[test]
    fn test_poll_reschedules_one_second_later() {
        let mut s = SecondHandScheduler::new();
        s.start(500);
        let tick = s.poll(1_000).unwrap();
        assert_eq!(tick.due_ms, 1_000);
        assert_eq!(tick.next_due_ms, 2_000);
        assert_eq!(tick.lateness_ms(), 0);
    }

    #[test]
    fn test_late_poll_realigns() {
        let mut s = SecondHandScheduler::new();
        s.start(500);
        let tick = s.poll(3_250).unwrap();
        assert_eq!(tick.lateness_ms(), 2_250);
        assert_eq!(s.next_wake_ms(), Some(4_000));
    }

    #[test]
    fn test_poll_after_stop_is_none() {
        let mut s = SecondHandScheduler::new();
        s.start(0);
        s.stop();
        assert_eq!(s.poll(5_000), None);
    }
}
