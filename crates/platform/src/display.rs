//! Panel abstraction layer

use crate::frame::Frame;

/// Fill byte that clears a 1bpp e-paper RAM to white.
pub const CLEAR_WHITE: u8 = 0xFF;

/// Panel driver trait for e-paper displays
///
/// Vendor drivers are heterogeneous: they agree on `init`, `clear` and
/// `sleep`, but name their update entry points differently (`display`,
/// `displayPartial`, `DisplayPartial`, ...). Instead of probing method
/// names at runtime, a driver lists the dispatch operations it supports
/// in [`Panel::operations`] and executes them through [`Panel::invoke`].
///
/// All calls may fail. Only [`Panel::init`] and the startup
/// [`Panel::clear`] are treated as fatal by the update loop.
pub trait Panel {
    /// Fixed panel geometry
    fn info(&self) -> DisplayInfo;

    /// Reset and configure the controller
    async fn init(&mut self) -> Result<(), PanelError>;

    /// Fill panel RAM with `fill` and run a full refresh
    async fn clear(&mut self, fill: u8) -> Result<(), PanelError>;

    /// Convert a rendered frame into the controller's RAM layout
    fn to_native_buffer(&self, frame: &Frame) -> Result<Vec<u8>, PanelError>;

    /// Dispatch operations this driver exposes, in driver order
    fn operations(&self) -> &[&'static str];

    /// Run one dispatch operation with a native buffer
    async fn invoke(&mut self, operation: &str, buffer: &[u8]) -> Result<(), PanelError>;

    /// Enter deep sleep mode
    async fn sleep(&mut self) -> Result<(), PanelError>;
}

/// Display geometry in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayInfo {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl DisplayInfo {
    /// Geometry of `spec`-less panels and tests
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Panel errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PanelError {
    /// Communication error
    #[error("panel communication error")]
    Communication,
    /// Display busy
    #[error("panel is busy")]
    Busy,
    /// Timeout
    #[error("panel operation timed out")]
    Timeout,
    /// Buffer does not match the panel geometry
    #[error("invalid buffer: expected {expected} bytes, got {actual}")]
    InvalidBuffer {
        /// Bytes the controller RAM holds
        expected: usize,
        /// Bytes supplied
        actual: usize,
    },
    /// Driver does not expose the requested operation
    #[error("unsupported panel operation `{0}`")]
    UnsupportedOperation(String),
    /// Host-side I/O failure (device node, output file)
    #[error("panel I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for PanelError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
