//! Application configuration and constants
//!
//! Central naming and default values shared by the library crates and
//! the binary. Reference these constants rather than hardcoding values.

/// The application name
pub const APP_NAME: &str = "epaper-status";

/// Human-readable title used in log banners
pub const APP_TITLE: &str = "E-Paper Status Panel";

/// Application version (synchronized with Cargo.toml)
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default update interval in seconds
pub const DEFAULT_INTERVAL_SECS: u64 = 60;

/// Default time font size in pixels
pub const DEFAULT_FONT_SIZE: u32 = 48;

/// Font used when `--font` is not given
pub const DEFAULT_FONT_PATH: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf";

/// Banner logged at startup
pub fn banner() -> String {
    format!("{APP_TITLE} v{APP_VERSION}")
}
