//! Panel backends for the status daemon
//!
//! Vendor SPI drivers live outside this crate and plug in through the
//! [`platform::Panel`] trait. The backend shipped here renders to PNG so
//! the daemon can run and be inspected on any host.

pub mod snapshot;

pub use snapshot::{SnapshotPanel, SNAPSHOT_FILE};
