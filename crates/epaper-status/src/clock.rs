//! Wall-clock sampling.

use chrono::{DateTime, Local, TimeZone};
use ui::ClockSample;

/// `14:05`
pub const TIME_FORMAT: &str = "%H:%M";
/// `14:05:09`
pub const TIME_FORMAT_SECONDS: &str = "%H:%M:%S";
/// `2024-03-01`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Source of the time shown on the panel.
pub trait Clock {
    /// Capture the current time and date strings.
    fn sample(&self, show_seconds: bool) -> ClockSample;
}

/// Local wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn sample(&self, show_seconds: bool) -> ClockSample {
        sample_at(&Local::now(), show_seconds)
    }
}

/// Format `now` into a [`ClockSample`].
pub fn sample_at<Tz>(now: &DateTime<Tz>, show_seconds: bool) -> ClockSample
where
    Tz: TimeZone,
    Tz::Offset: core::fmt::Display,
{
    let time_format = if show_seconds {
        TIME_FORMAT_SECONDS
    } else {
        TIME_FORMAT
    };
    ClockSample::new(
        now.format(time_format).to_string(),
        now.format(DATE_FORMAT).to_string(),
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use chrono::Utc;

    #[test]
    fn test_sample_without_seconds() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 14, 5, 9).unwrap();
        let sample = sample_at(&now, false);
        assert_eq!(sample.time(), "14:05");
        assert_eq!(sample.date(), "2024-03-01");
    }

    #[test]
    fn test_sample_with_seconds() {
        let now = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 7).unwrap();
        assert_eq!(sample_at(&now, true).time(), "23:59:07");
    }

    #[test]
    fn test_system_clock_shape() {
        let sample = SystemClock.sample(false);
        assert_eq!(sample.time().len(), 5);
        assert_eq!(sample.date().len(), 10);
    }
}
