//! Wall-clock time and hand angles.

// Operands are bounded by the modular reductions right before each step.
#![allow(clippy::arithmetic_side_effects)]

const MS_PER_SECOND: u64 = 1_000;
const MS_PER_DAY: i64 = 86_400_000;
const MS_PER_DAY_U64: u64 = 86_400_000;

/// Milliseconds from `now_ms` to the next whole-second boundary.
///
/// Always in `1..=1000`: a time exactly on a boundary waits a full second.
pub const fn millis_until_next_second(now_ms: u64) -> u64 {
    MS_PER_SECOND - now_ms % MS_PER_SECOND
}

/// Local time of day on a 12-hour dial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WatchTime {
    /// Hour on the dial, `0..12`.
    pub hour: u8,
    /// `0..60`.
    pub minute: u8,
    /// `0..60`.
    pub second: u8,
    /// `0..1000`.
    pub millis: u16,
}

impl WatchTime {
    /// Build from components. Out-of-range values wrap.
    pub fn new(hour: u8, minute: u8, second: u8, millis: u16) -> Self {
        Self {
            hour: hour % 12,
            minute: minute % 60,
            second: second % 60,
            millis: millis % 1_000,
        }
    }

    /// Local time for a Unix epoch instant shifted by `utc_offset_minutes`.
    ///
    /// Negative local instants wrap into the previous day.
    pub fn from_epoch_ms(epoch_ms: u64, utc_offset_minutes: i32) -> Self {
        let epoch = i64::try_from(epoch_ms % MS_PER_DAY_U64).unwrap_or(0);
        let local = epoch + i64::from(utc_offset_minutes) * 60_000;
        let of_day = local.rem_euclid(MS_PER_DAY);
        let millis = of_day % 1_000;
        let total_seconds = of_day / 1_000;
        let second = total_seconds % 60;
        let minute = (total_seconds / 60) % 60;
        let hour = (total_seconds / 3_600) % 12;
        Self {
            hour: u8::try_from(hour).unwrap_or(0),
            minute: u8::try_from(minute).unwrap_or(0),
            second: u8::try_from(second).unwrap_or(0),
            millis: u16::try_from(millis).unwrap_or(0),
        }
    }

    /// Dial angles for this time.
    pub fn angles(&self) -> HandAngles {
        HandAngles::from_time(self)
    }
}

/// Clockwise hand rotations in degrees from 12 o'clock.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HandAngles {
    /// Hour hand, moves half a degree per minute.
    pub hours: f32,
    /// Minute hand, whole-minute steps.
    pub minutes: f32,
    /// Second hand, sweeps with milliseconds.
    pub seconds: f32,
}

impl HandAngles {
    /// Angles for `time`.
    pub fn from_time(time: &WatchTime) -> Self {
        let seconds = (f32::from(time.second) + f32::from(time.millis) / 1_000.0) * 6.0;
        let minutes = f32::from(time.minute) * 6.0;
        let hours = f32::from(time.hour) * 30.0 + f32::from(time.minute) / 2.0;
        Self {
            hours,
            minutes,
            seconds,
        }
    }
}
