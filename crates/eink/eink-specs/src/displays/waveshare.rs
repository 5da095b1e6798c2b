//! Waveshare e-ink display specifications
//!
//! Pre-configured specs for common Waveshare displays based on official datasheets.

use crate::{Controller, DisplaySpec, PanelType};

/// Waveshare 2.13" V4 (250×122, SSD1680, Carta 1000)
///
/// Popular small display with fast refresh support.
/// - Full refresh: ~2s with 3 flashes
/// - Partial refresh: 300ms
pub const WAVESHARE_2_13_V4: DisplaySpec = DisplaySpec {
    name: "Waveshare 2.13\" V4",
    id: "waveshare-2.13-v4",
    width: 250,
    height: 122,
    controller: Controller::SSD1680,
    panel_type: PanelType::Carta1000,
    full_refresh_ms: 2000,
    partial_refresh_ms: Some(300),
};

/// Waveshare 2.9" V2 (296×128, IL0373, Carta 1000)
///
/// Medium-sized display with good contrast.
pub const WAVESHARE_2_9_V2: DisplaySpec = DisplaySpec {
    name: "Waveshare 2.9\" V2",
    id: "waveshare-2.9-v2",
    width: 296,
    height: 128,
    controller: Controller::IL0373,
    panel_type: PanelType::Carta1000,
    full_refresh_ms: 2000,
    partial_refresh_ms: Some(300),
};

/// Waveshare 4.2" V2 (400×300, SSD1619, Carta 1200)
///
/// Large display with improved Carta 1200 panel.
/// - Partial refresh: 800ms (larger area)
pub const WAVESHARE_4_2_V2: DisplaySpec = DisplaySpec {
    name: "Waveshare 4.2\" V2",
    id: "waveshare-4.2-v2",
    width: 400,
    height: 300,
    controller: Controller::SSD1619,
    panel_type: PanelType::Carta1200,
    full_refresh_ms: 2000,
    partial_refresh_ms: Some(800),
};

/// Waveshare 7.5" V2 (800×480, ED075TC1, Carta 1200)
///
/// - Full refresh: ~5s (large area)
/// - Partial refresh: 2s
pub const WAVESHARE_7_5_V2: DisplaySpec = DisplaySpec {
    name: "Waveshare 7.5\" V2",
    id: "waveshare-7.5-v2",
    width: 800,
    height: 480,
    controller: Controller::ED075TC1,
    panel_type: PanelType::Carta1200,
    full_refresh_ms: 5000,
    partial_refresh_ms: Some(2000),
};

/// Waveshare 5.65" Spectra 6 (600×448, ACeP, Spectra 6)
///
/// Full refresh only: partial updates leave colour ghosting, so the
/// driver does not expose them.
pub const WAVESHARE_5_65_SPECTRA6: DisplaySpec = DisplaySpec {
    name: "Waveshare 5.65\" Spectra 6",
    id: "waveshare-5.65-spectra6",
    width: 600,
    height: 448,
    controller: Controller::ACeP,
    panel_type: PanelType::Spectra6,
    full_refresh_ms: 15000,
    partial_refresh_ms: None,
};
