//! Analog watch face host glue
//!
//! Binds the watch face engine to a host runtime.
//!
//! # Architecture
//!
//! ```text
//! Host callbacks / display surface
//!         ↓
//! FaceRuntime (Embassy timers, single executor)
//!         ↓
//! WatchFaceService (callback mapping, redraw requests)
//!         ↓
//! Renderer (watchface-render)
//! ```
//!
//! # Features
//!
//! - `defmt` - Hardware logging
//! - `tracing` - Desktop logging
//! - `emulator` - Desktop build: `std`, `tracing`, embassy-time std driver
//! - `simulator` - Desktop window via `embedded-graphics-simulator`
//!
//! # Examples
//!
//! ```bash
//! RUST_LOG=debug cargo run -p firmware --example watchface_simulator --features simulator
//! ```

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Critical correctness: deny these
#![deny(clippy::await_holding_refcell_ref)] // a RefCell borrow across .await breaks callback exclusion
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]


pub mod runtime;
pub mod service;

pub use runtime::FaceRuntime;
pub use service::WatchFaceService;
