//! Analog watch face renderer
//!
//! Turns a [`watchface::WatchFaceState`] into frames on any
//! `embedded-graphics` [`DrawTarget`](embedded_graphics::draw_target::DrawTarget)
//! and decides when frames are needed.
//!
//! # Pieces
//!
//! - [`Renderer`] - Hidden / VisibleActive / VisibleAmbient state machine,
//!   tap dispatch, unread-count bookkeeping
//! - [`SecondHandScheduler`] - Cancellable wake-ups on whole-second boundaries
//! - [`render_frame`] - Background, complications, indicator, ticks, hands
//!
//! Nothing here sleeps or spawns. The firmware crate owns the async loop and
//! feeds wall-clock time into [`Renderer::on_tick`].

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]


pub mod frame;
pub mod renderer;
pub mod scheduler;

pub use frame::{render_frame, FrameReport};
pub use renderer::{RenderMode, Renderer, TickOutcome, Transition};
pub use scheduler::{SecondHandScheduler, Tick};
