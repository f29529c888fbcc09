//! Touch input abstraction

use embedded_graphics::prelude::Point;

/// Kind of touch event delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TapType {
    /// Finger went down; may still become a tap or be cancelled.
    Touch,
    /// The touch turned into a swipe or was otherwise cancelled.
    TouchCancel,
    /// A completed tap.
    Tap,
}

impl TapType {
    /// Stable name for logging.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Touch => "touch",
            Self::TouchCancel => "touch-cancel",
            Self::Tap => "tap",
        }
    }
}

/// A single touch event in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TapEvent {
    /// Event kind.
    pub kind: TapType,
    /// Horizontal position in pixels.
    pub x: i32,
    /// Vertical position in pixels.
    pub y: i32,
    /// Host timestamp of the event in milliseconds.
    pub event_time_ms: u64,
}

impl TapEvent {
    /// A completed tap at `(x, y)`.
    pub const fn tap(x: i32, y: i32, event_time_ms: u64) -> Self {
        Self {
            kind: TapType::Tap,
            x,
            y,
            event_time_ms,
        }
    }

    /// Position as an `embedded-graphics` point.
    pub const fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}
