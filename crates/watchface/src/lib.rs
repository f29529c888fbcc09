//! Analog watch face model: color styles, components, complication slots,
//! proportional geometry and the aggregate [`WatchFaceState`].
//!
//! This crate is `no_std`; it only uses `core`, `embedded-graphics` types and
//! `libm`. Nothing here draws or schedules: the renderer crate reads this
//! state to produce frames.
//!
//! # Data flow
//!
//! ```text
//! host callbacks ──► WatchFaceState mutators ──► Component / Background paints
//!                                             └─► ComplicationSlots renderables
//! ```
//!
//! Every mutator recomputes its dependents synchronously before returning.
//! There is no listener graph: a color change on a [`Component`] re-derives
//! that component's [`Paint`] in the same call.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![deny(clippy::expect_used)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

mod log;

pub mod background;
pub mod color_style;
pub mod complication;
pub mod component;
pub mod config;
pub mod geometry;
pub mod preferences;
pub mod state;
pub mod time;

pub use background::Background;
pub use color_style::{ColorStyle, Styled};
pub use complication::{ComplicationId, ComplicationSlot, ComplicationSlots, COMPLICATION_COUNT};
pub use component::{Component, Dimension, Paint, PaintStyle, Shadow};
pub use config::WatchFaceConfig;
pub use geometry::FaceGeometry;
pub use platform::Color;
pub use preferences::{PreferenceKeys, StylePreferences};
pub use state::WatchFaceState;
pub use time::{millis_until_next_second, HandAngles, WatchTime};
