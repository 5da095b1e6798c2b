//! Display specification types

use core::time::Duration;

/// Static description of an e-paper panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySpec {
    /// Display name (e.g., "Waveshare 2.13\" V4")
    pub name: &'static str,

    /// Identifier accepted on the command line (e.g., `waveshare-2.13-v4`)
    pub id: &'static str,

    /// Width in pixels
    pub width: u32,

    /// Height in pixels
    pub height: u32,

    /// Display controller chip
    pub controller: Controller,

    /// E-ink panel type
    pub panel_type: PanelType,

    /// Full refresh duration in milliseconds (typical: 2000ms)
    pub full_refresh_ms: u32,

    /// Partial refresh duration in milliseconds, `None` when the panel
    /// has no usable partial update waveform.
    pub partial_refresh_ms: Option<u32>,
}

impl DisplaySpec {
    /// Whether the controller exposes a partial update mode.
    pub const fn supports_partial_refresh(&self) -> bool {
        self.partial_refresh_ms.is_some()
    }

    /// Get full refresh duration as Duration
    pub fn full_refresh_duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.full_refresh_ms))
    }

    /// Get partial refresh duration as Duration
    pub fn partial_refresh_duration(&self) -> Option<Duration> {
        self.partial_refresh_ms
            .map(|ms| Duration::from_millis(u64::from(ms)))
    }

    /// Size of a 1bpp framebuffer for this panel, rows padded to whole bytes.
    pub const fn buffer_len(&self) -> usize {
        (self.width as usize).div_ceil(8) * self.height as usize
    }
}

/// E-ink display controller chips
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Controller {
    /// Solomon Systech SSD1680 (common in Waveshare 2.13" V4)
    SSD1680,
    /// ImagEInk IL0373 / UltraChip UC8151 (Waveshare 2.9" V2)
    IL0373,
    /// Solomon Systech SSD1619 (Waveshare 4.2" V2)
    SSD1619,
    /// E Ink ED075TC1 (7.5" displays)
    ED075TC1,
    /// ACeP (Advanced Color ePaper) controller for Spectra 6
    ACeP,
}

/// E-ink panel technology types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelType {
    /// E Ink Carta 1000 (improved contrast)
    Carta1000,
    /// E Ink Carta 1200 (faster response)
    Carta1200,
    /// E Ink Spectra 6 (ACeP - Advanced Color ePaper)
    Spectra6,
}
