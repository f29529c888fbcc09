//! Backend-neutral logging macros shared by the watch face crates.
//!
//! Forward to `defmt` on hardware builds and `tracing` on desktop builds.
//! The `feature` checks are evaluated in the calling crate, so every caller
//! declares its own optional `defmt` and `tracing` dependencies under those
//! feature names. With neither enabled the arguments are still type-checked
//! but nothing is emitted. Format arguments must be primitives or
//! `&'static str` so one format string is valid for both backends.

/// Debug-level log line.
#[macro_export]
macro_rules! face_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        defmt::debug!($($arg)*);
        #[cfg(feature = "tracing")]
        tracing::debug!($($arg)*);
        #[cfg(not(any(feature = "defmt", feature = "tracing")))]
        let _ = core::format_args!($($arg)*);
    }};
}

/// Info-level log line.
#[macro_export]
macro_rules! face_info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        defmt::info!($($arg)*);
        #[cfg(feature = "tracing")]
        tracing::info!($($arg)*);
        #[cfg(not(any(feature = "defmt", feature = "tracing")))]
        let _ = core::format_args!($($arg)*);
    }};
}

/// Warn-level log line.
#[macro_export]
macro_rules! face_warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        defmt::warn!($($arg)*);
        #[cfg(feature = "tracing")]
        tracing::warn!($($arg)*);
        #[cfg(not(any(feature = "defmt", feature = "tracing")))]
        let _ = core::format_args!($($arg)*);
    }};
}
