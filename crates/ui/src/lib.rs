//! Status screen layer — the data shown on the panel and where it goes.
//!
//! This crate holds no I/O: [`status`] describes one tick's content and
//! [`layout`] turns measured text extents into panel coordinates.

#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![deny(clippy::expect_used)]

pub mod layout;
pub mod status;

pub use layout::{LayoutEngine, StatusLayout};
pub use status::{AddressList, ClockSample, MAX_ADDRESSES};
