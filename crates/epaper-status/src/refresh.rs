//! Refresh strategy: which panel operation receives each frame.
//!
//! Vendor drivers disagree on what their partial update entry point is
//! called. [`PanelDispatcher::negotiate`] reads the driver's
//! [`Panel::operations`] once and resolves an ordered candidate list for
//! each path, so per-tick dispatch is a plain walk over those candidates.
//!
//! Dispatch never returns an error. Every attempt that fails is logged and
//! the next candidate is tried; when nothing works the tick is reported as
//! [`DispatchOutcome::Skipped`] and the panel keeps its previous image.

use std::borrow::Cow;

use platform::{Frame, Panel};

/// Conventional full refresh operation.
pub const FULL_OPERATION: &str = "display";

/// Known names for a partial refresh operation, in preference order.
pub const PARTIAL_ALIASES: [&str; 5] = [
    "displayPartial",
    "display_partial",
    "DisplayPartial",
    "displayPart",
    "display_partial_update",
];

/// Why a tick did not reach the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Neither native conversion nor the raw frame fits the panel
    NoBuffer,
    /// The driver exposes no full refresh operation
    NoFullOperation,
    /// Every candidate operation failed
    AllFailed,
    /// The frame itself could not be rendered
    RenderFailed,
}

/// Result of one dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Partial refresh through the named operation
    Partial(&'static str),
    /// Full refresh through the named operation
    Full(&'static str),
    /// Nothing was sent
    Skipped(SkipReason),
}

impl DispatchOutcome {
    /// `true` when the panel accepted the frame.
    pub fn is_dispatched(&self) -> bool {
        !matches!(self, Self::Skipped(_))
    }
}

/// Refresh paths resolved from a driver's capabilities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelDispatcher {
    /// Full refresh only
    FullOnly {
        /// Full refresh candidates, tried in order
        full: Vec<&'static str>,
    },
    /// Partial refresh first, full refresh as fallback
    FullAndPartial {
        /// Partial refresh candidates, tried in order
        partial: Vec<&'static str>,
        /// Full refresh candidates, tried in order
        full: Vec<&'static str>,
    },
}

impl PanelDispatcher {
    /// Resolve refresh paths from `panel`'s advertised operations.
    ///
    /// Partial refresh is only negotiated when requested and the driver
    /// exposes at least one known alias.
    pub fn negotiate<P: Panel>(panel: &P, partial_requested: bool) -> Self {
        let operations = panel.operations();
        let full = full_candidates(operations);

        if !partial_requested {
            return Self::FullOnly { full };
        }

        let partial: Vec<&'static str> = PARTIAL_ALIASES
            .iter()
            .filter_map(|alias| operations.iter().copied().find(|op| op == alias))
            .collect();

        if partial.is_empty() {
            tracing::info!("partial refresh unsupported, falling back to full refresh");
            Self::FullOnly { full }
        } else {
            Self::FullAndPartial { partial, full }
        }
    }

    /// Whether partial refresh was negotiated.
    pub fn supports_partial(&self) -> bool {
        matches!(self, Self::FullAndPartial { .. })
    }

    /// Full refresh candidates.
    pub fn full_operations(&self) -> &[&'static str] {
        match self {
            Self::FullOnly { full } | Self::FullAndPartial { full, .. } => full,
        }
    }

    /// Partial refresh candidates, empty for [`PanelDispatcher::FullOnly`].
    pub fn partial_operations(&self) -> &[&'static str] {
        match self {
            Self::FullOnly { .. } => &[],
            Self::FullAndPartial { partial, .. } => partial,
        }
    }

    /// Send `frame` to `panel`.
    pub async fn dispatch<P: Panel>(&self, panel: &mut P, frame: &Frame) -> DispatchOutcome {
        let Some(buffer) = native_or_raw(panel, frame) else {
            tracing::warn!("no usable buffer for this panel, skipping refresh");
            return DispatchOutcome::Skipped(SkipReason::NoBuffer);
        };

        if let Self::FullAndPartial { partial, .. } = self {
            for &operation in partial {
                match panel.invoke(operation, &buffer).await {
                    Ok(()) => {
                        tracing::debug!(operation, "partial refresh");
                        return DispatchOutcome::Partial(operation);
                    }
                    Err(err) => tracing::debug!(operation, %err, "partial refresh attempt failed"),
                }
            }
            tracing::warn!("partial refresh unsupported, falling back");
        }

        let full = self.full_operations();
        if full.is_empty() {
            tracing::warn!("panel exposes no display operation, skipping refresh");
            return DispatchOutcome::Skipped(SkipReason::NoFullOperation);
        }
        for &operation in full {
            match panel.invoke(operation, &buffer).await {
                Ok(()) => {
                    tracing::debug!(operation, "full refresh");
                    return DispatchOutcome::Full(operation);
                }
                Err(err) => tracing::debug!(operation, %err, "full refresh attempt failed"),
            }
        }
        tracing::warn!(candidates = full.len(), "every display operation failed");
        DispatchOutcome::Skipped(SkipReason::AllFailed)
    }
}

/// Negotiate and dispatch in one call.
pub async fn dispatch<P: Panel>(
    panel: &mut P,
    frame: &Frame,
    partial_requested: bool,
) -> DispatchOutcome {
    PanelDispatcher::negotiate(panel, partial_requested)
        .dispatch(panel, frame)
        .await
}

/// `display` when exposed, otherwise every non-partial operation whose
/// name mentions "display".
fn full_candidates(operations: &[&'static str]) -> Vec<&'static str> {
    if operations.contains(&FULL_OPERATION) {
        return vec![FULL_OPERATION];
    }
    operations
        .iter()
        .copied()
        .filter(|op| !PARTIAL_ALIASES.contains(op))
        .filter(|op| op.to_lowercase().contains(FULL_OPERATION))
        .collect()
}

/// Native buffer, else the raw frame bytes when the geometry matches.
fn native_or_raw<'a, P: Panel>(panel: &P, frame: &'a Frame) -> Option<Cow<'a, [u8]>> {
    match panel.to_native_buffer(frame) {
        Ok(buffer) => Some(Cow::Owned(buffer)),
        Err(err) => {
            let info = panel.info();
            if frame.width() == info.width && frame.height() == info.height {
                tracing::debug!(%err, "native conversion failed, passing raw frame");
                Some(Cow::Borrowed(frame.as_bytes()))
            } else {
                tracing::debug!(%err, "native conversion failed");
                None
            }
        }
    }
}
