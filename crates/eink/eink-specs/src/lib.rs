//! E-Ink Panel Specifications
//!
//! Static descriptions of the e-paper panels the status daemon can drive:
//! resolution, controller chip, panel technology and refresh capabilities.
//!
//! # Example
//!
//! ```
//! use eink_specs::displays::WAVESHARE_2_13_V4;
//!
//! let spec = WAVESHARE_2_13_V4;
//! assert_eq!((spec.width, spec.height), (250, 122));
//! assert!(spec.supports_partial_refresh());
//! ```
//!
//! # Lookup by name
//!
//! ```
//! use eink_specs::displays;
//!
//! let spec = displays::by_name("Waveshare-2.9-V2").unwrap();
//! assert_eq!(spec.width, 296);
//! assert!(displays::by_name("unknown-panel").is_none());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

mod display_spec;
pub mod displays;

pub use display_spec::{Controller, DisplaySpec, PanelType};
