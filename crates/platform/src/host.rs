//! Host runtime abstraction
//!
//! The host owns the rendering surface. The watch face never draws on its
//! own initiative; it asks the host to schedule a frame and the host later
//! calls back into `on_draw`.

use thiserror_no_std::Error;

/// Calls the watch face makes back into its host runtime.
pub trait WatchFaceHost {
    /// Ask the host to schedule a redraw (no payload).
    ///
    /// A failed request is not retried; the next natural redraw trigger
    /// (animation tick, data update, ...) covers it.
    fn request_redraw(&mut self) -> Result<(), HostError>;
}

impl<H: WatchFaceHost + ?Sized> WatchFaceHost for &mut H {
    fn request_redraw(&mut self) -> Result<(), HostError> {
        (**self).request_redraw()
    }
}

/// Host-side failures.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostError {
    /// The rendering surface is gone (torn down or not yet created).
    #[error("rendering surface unavailable")]
    SurfaceUnavailable,
    /// The host refused the request because a frame is already pending.
    #[error("redraw request rejected by host")]
    Rejected,
}

impl HostError {
    /// Stable name for logging.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SurfaceUnavailable => "surface-unavailable",
            Self::Rejected => "rejected",
        }
    }
}

/// Do-not-disturb level reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptionFilter {
    /// Every notification interrupts.
    All,
    /// Only priority notifications interrupt.
    Priority,
    /// Only alarms interrupt.
    Alarms,
    /// Nothing interrupts; the face dims its hands.
    None,
    /// The host reported a level this crate does not know.
    Unknown,
}

impl InterruptionFilter {
    /// Whether the face should render muted.
    pub const fn mutes(self) -> bool {
        matches!(self, Self::None)
    }

    /// Stable name for logging.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Priority => "priority",
            Self::Alarms => "alarms",
            Self::None => "none",
            Self::Unknown => "unknown",
        }
    }
}
