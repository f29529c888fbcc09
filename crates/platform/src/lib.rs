//! Host abstraction layer for the analog watch face
//!
//! The watch face engine never talks to a concrete runtime. Everything it
//! consumes from the outside world is expressed as a trait in this crate, so
//! the engine runs unchanged on hardware, in a desktop simulator, and in
//! host-side tests.
//!
//! # Architecture Layers
//!
//! ```text
//! Host glue (firmware crate: WatchFaceService, FaceRuntime)
//!         ↓
//! Renderer (watchface-render: mode state machine, frame pipeline)
//!         ↓
//! Model (watchface: styles, components, slots, geometry)
//!         ↓
//! Platform HAL (this crate - trait abstractions)
//! ```
//!
//! # Abstractions
//!
//! - [`WallClock`] - Milliseconds since the Unix epoch
//! - [`WatchFaceHost`] - "Please redraw" requests back to the host
//! - [`PreferenceStore`] - Read-only persisted key-value preferences
//! - [`ComplicationRenderable`] - Opaque drawable for one complication slot
//! - [`TapEvent`] - Touch input delivered by the host
//!
//! # Features
//!
//! - `std`: Enable standard library support (mocks for testing)
//! - `defmt`: Enable defmt logging derives
//!
//! # Example
//!
//! ```no_run
//! use platform::{HostError, WallClock, WatchFaceHost};
//!
//! fn tick<C: WallClock, H: WatchFaceHost>(clock: &C, host: &mut H) -> Result<(), HostError> {
//!     if clock.now_ms() % 1000 == 0 {
//!         host.request_redraw()?;
//!     }
//!     Ok(())
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![allow(clippy::must_use_candidate)] // accessors: callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod clock;
pub mod color;
pub mod complication;
pub mod host;
pub mod input;
pub mod preferences;

#[cfg(any(test, feature = "std"))]
pub mod mocks;

// Re-export main high-level traits
pub use clock::{EmbassyClock, WallClock};
pub use color::Color;
pub use complication::{
    ComplicationColors, ComplicationData, ComplicationRenderable, ComplicationType, RangedValue,
    RenderableError,
};
pub use host::{HostError, InterruptionFilter, WatchFaceHost};
pub use input::{TapEvent, TapType};
pub use preferences::{PreferenceError, PreferenceStore};
