//! Panel Abstraction Layer for the e-paper status daemon
//!
//! This crate provides the trait-based boundary to e-paper panel drivers,
//! enabling development and testing without physical hardware.
//!
//! # Architecture Layers
//!
//! ```text
//! Application Layer (epaper-status: loop, rendering, refresh strategy)
//!         ↓
//! Screen model (ui: clock sample, addresses, layout)
//!         ↓
//! Panel HAL (this crate - Panel trait + Frame canvas)
//!         ↓
//! Vendor driver / snapshot backend
//! ```
//!
//! # Features
//!
//! - `mocks`: Export [`mocks::MockPanel`] for downstream tests
//!
//! # Example
//!
//! ```no_run
//! use platform::{Frame, Panel};
//!
//! async fn example<P: Panel>(panel: &mut P) {
//!     let info = panel.info();
//!     let frame = Frame::new(info.width, info.height);
//!     if let Ok(buffer) = panel.to_native_buffer(&frame) {
//!         let _ = panel.invoke("display", &buffer).await;
//!     }
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::print_stdout)] // prefer tracing over println! in lib code
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(async_fn_in_trait)] // single-threaded loop: Send bounds not needed

pub mod config;
pub mod display;
pub mod frame;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

pub use display::{DisplayInfo, Panel, PanelError, CLEAR_WHITE};
pub use frame::Frame;
