//! Command line and loop configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use eink_specs::{displays, DisplaySpec};
use platform::config::{APP_NAME, DEFAULT_FONT_SIZE, DEFAULT_INTERVAL_SECS};

use crate::font::{FontLoader, FontSet};

/// Panel used when `--panel` is not given.
pub const DEFAULT_PANEL: &str = "waveshare-2.13-v4";

/// Directory the snapshot panel writes into by default.
pub const DEFAULT_OUTPUT_DIR: &str = "./epaper-frames";

/// Shortest allowed update interval.
pub const MIN_INTERVAL_SECS: u64 = 1;

/// Clock, date and local address status panel for e-paper displays
#[derive(Debug, Clone, Parser)]
#[command(name = APP_NAME, version, about, long_about = None)]
pub struct Args {
    /// Seconds between panel updates (0 is treated as 1)
    #[arg(long, default_value_t = DEFAULT_INTERVAL_SECS)]
    pub interval: u64,

    /// TrueType font file; the system DejaVu Sans is used otherwise
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Pixel size of the time line; date and address lines scale from it
    #[arg(long, default_value_t = DEFAULT_FONT_SIZE, value_parser = clap::value_parser!(u32).range(1..))]
    pub font_size: u32,

    /// Leave the last frame on the panel at exit instead of clearing it
    #[arg(long)]
    pub no_clear: bool,

    /// Show seconds in the time line
    #[arg(long)]
    pub show_seconds: bool,

    /// Use partial refresh when the panel driver supports it
    #[arg(long)]
    pub partial: bool,

    /// Panel model, e.g. `waveshare-2.13-v4`
    #[arg(long, default_value = DEFAULT_PANEL)]
    pub panel: String,

    /// Where rendered frames are written
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Log filter used when `RUST_LOG` is unset
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `--panel` names no known panel
    #[error("unknown panel `{name}` (known panels: {known})")]
    UnknownPanel {
        /// Name given on the command line
        name: String,
        /// Comma separated list of accepted names
        known: String,
    },
}

impl Args {
    /// Resolve `--panel` to a panel specification.
    pub fn panel_spec(&self) -> Result<&'static DisplaySpec, ConfigError> {
        displays::by_name(&self.panel).ok_or_else(|| ConfigError::UnknownPanel {
            name: self.panel.clone(),
            known: displays::ALL
                .iter()
                .map(|spec| spec.id)
                .collect::<Vec<_>>()
                .join(", "),
        })
    }

    /// Build the loop configuration, loading fonts through `loader`.
    pub fn loop_config(&self, loader: &FontLoader) -> LoopConfig {
        let fonts = FontSet::load(loader, self.font.as_deref(), self.font_size);
        LoopConfig::new(self.interval, fonts)
            .with_show_seconds(self.show_seconds)
            .with_partial_refresh(self.partial)
            .with_clear_on_exit(!self.no_clear)
    }
}

/// Settings captured at startup and fixed for the loop's lifetime.
#[derive(Debug)]
pub struct LoopConfig {
    interval_secs: u64,
    fonts: FontSet,
    show_seconds: bool,
    partial_refresh: bool,
    clear_on_exit: bool,
}

impl LoopConfig {
    /// Defaults: no seconds, full refresh only, clear on exit.
    ///
    /// `interval_secs` below [`MIN_INTERVAL_SECS`] is clamped.
    pub fn new(interval_secs: u64, fonts: FontSet) -> Self {
        if interval_secs < MIN_INTERVAL_SECS {
            tracing::debug!(interval_secs, "interval clamped to {MIN_INTERVAL_SECS}s");
        }
        Self {
            interval_secs: interval_secs.max(MIN_INTERVAL_SECS),
            fonts,
            show_seconds: false,
            partial_refresh: false,
            clear_on_exit: true,
        }
    }

    /// Show `HH:MM:SS` instead of `HH:MM`.
    #[must_use]
    pub fn with_show_seconds(mut self, enabled: bool) -> Self {
        self.show_seconds = enabled;
        self
    }

    /// Request partial refresh.
    #[must_use]
    pub fn with_partial_refresh(mut self, enabled: bool) -> Self {
        self.partial_refresh = enabled;
        self
    }

    /// Clear the panel while draining.
    #[must_use]
    pub fn with_clear_on_exit(mut self, enabled: bool) -> Self {
        self.clear_on_exit = enabled;
        self
    }

    /// Seconds between ticks, at least one.
    pub fn interval_secs(&self) -> u64 {
        self.interval_secs
    }

    /// [`LoopConfig::interval_secs`] as a [`Duration`].
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// Time, date and address fonts.
    pub fn fonts(&self) -> &FontSet {
        &self.fonts
    }

    /// Whether the time line includes seconds.
    pub fn show_seconds(&self) -> bool {
        self.show_seconds
    }

    /// Whether partial refresh was requested.
    pub fn partial_refresh(&self) -> bool {
        self.partial_refresh
    }

    /// Whether the panel is cleared while draining.
    pub fn clear_on_exit(&self) -> bool {
        self.clear_on_exit
    }
}
