//! Pre-configured display specifications
//!
//! Common e-ink display templates for Waveshare panels.

pub mod waveshare;

pub use waveshare::*;

use crate::DisplaySpec;

/// Every built-in specification, in CLI listing order.
pub const ALL: &[&DisplaySpec] = &[
    &WAVESHARE_2_13_V4,
    &WAVESHARE_2_9_V2,
    &WAVESHARE_4_2_V2,
    &WAVESHARE_7_5_V2,
    &WAVESHARE_5_65_SPECTRA6,
];

/// Resolve a CLI identifier such as `waveshare-2.13-v4` (case-insensitive).
pub fn by_name(name: &str) -> Option<&'static DisplaySpec> {
    ALL.iter()
        .copied()
        .find(|spec| spec.id.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        for (i, a) in ALL.iter().enumerate() {
            for b in ALL.iter().skip(i + 1) {
                assert_ne!(a.id, b.id, "duplicate panel id");
            }
        }
    }

    #[test]
    fn test_by_name_ignores_case() {
        let spec = by_name("WAVESHARE-2.13-V4");
        assert_eq!(spec, Some(&WAVESHARE_2_13_V4));
    }

    #[test]
    fn test_by_name_unknown() {
        assert!(by_name("waveshare-9.9").is_none());
    }
}
