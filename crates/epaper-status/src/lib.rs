//! E-paper status daemon
//!
//! Periodically renders the local time, date and up to three local network
//! addresses onto an e-paper panel.
//!
//! # Architecture
//!
//! ```text
//! main.rs (CLI, tracing, signals)
//!         ↓
//! update_loop  ── clock ─┐
//!         │     ── net ───┼─→ render (font + ui::LayoutEngine) ─→ Frame
//!         ↓               │
//! refresh (PanelDispatcher) ─→ platform::Panel (snapshot backend or vendor driver)
//! ```
//!
//! # Example
//!
//! ```no_run
//! use epaper_status::{FontSet, LoopConfig, SnapshotPanel};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let spec = eink_specs::displays::by_name("waveshare-2.13-v4").unwrap();
//! let panel = SnapshotPanel::open(spec, "./epaper-frames")?;
//! let config = LoopConfig::new(60, FontSet::builtin(48)).with_partial_refresh(true);
//! let report = epaper_status::run_until(panel, config, CancellationToken::new()).await?;
//! println!("{} ticks", report.ticks);
//! # Ok(())
//! # }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(unused_must_use)]
// ────────────────────────────────────────────────────────────────────────────
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(async_fn_in_trait)]

pub mod clock;
pub mod config;
pub mod display;
pub mod font;
pub mod net;
pub mod refresh;
pub mod render;
pub mod update_loop;

pub use clock::{Clock, SystemClock};
pub use config::{Args, ConfigError, LoopConfig};
pub use display::SnapshotPanel;
pub use font::{Font, FontError, FontLoader, FontSet, Typeface};
pub use net::{AddressProbe, AddressSource, ProbeError};
pub use refresh::{dispatch, DispatchOutcome, PanelDispatcher, SkipReason};
pub use render::{render_frame, render_status, RenderError};
pub use update_loop::{run_until, LoopReport, LoopState, StartupError, UpdateLoop};
