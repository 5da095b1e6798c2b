//! Per-tick screen content — clock strings and local addresses.

/// Maximum number of address lines shown on the panel.
pub const MAX_ADDRESSES: usize = 3;

/// Time and date strings captured once per tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockSample {
    time: String,
    date: String,
}

impl ClockSample {
    /// Build a sample from already formatted strings.
    pub fn new(time: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            date: date.into(),
        }
    }

    /// Time string, e.g. `14:05` or `14:05:09`.
    pub fn time(&self) -> &str {
        &self.time
    }

    /// Date string, e.g. `2024-03-01`.
    pub fn date(&self) -> &str {
        &self.date
    }
}

/// Ordered, de-duplicated address lines (`"eth0: 192.168.1.10"`).
///
/// Holds at most [`MAX_ADDRESSES`] entries. An empty list is valid and
/// means the address lines are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressList {
    entries: heapless::Vec<String, MAX_ADDRESSES>,
}

impl AddressList {
    /// Empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the first occurrence of each string, in order, up to the cap.
    pub fn from_candidates<I>(candidates: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut entries: heapless::Vec<String, MAX_ADDRESSES> = heapless::Vec::new();
        for candidate in candidates {
            if entries.iter().any(|seen| *seen == candidate) {
                continue;
            }
            if entries.push(candidate).is_err() {
                break;
            }
        }
        Self { entries }
    }

    /// Entries in display order.
    pub fn as_slice(&self) -> &[String] {
        &self.entries
    }

    /// Iterate entries in display order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
