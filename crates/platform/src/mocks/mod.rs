//! Mock implementations for testing
//!
//! [`MockPanel`] stands in for a vendor driver: its operation set, failure
//! points and geometry are configured per test, and every call is recorded
//! so tests can assert exactly what the update loop asked of the panel.

use std::collections::HashSet;

use crate::display::{DisplayInfo, Panel, PanelError};
use crate::frame::Frame;

/// One recorded panel call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelCall {
    /// `init()`
    Init,
    /// `clear(fill)`
    Clear(u8),
    /// `invoke(operation, buffer)` with the buffer length
    Invoke(String, usize),
    /// `sleep()`
    Sleep,
}

/// Mock panel with configurable capabilities
#[derive(Debug, Clone)]
pub struct MockPanel {
    info: DisplayInfo,
    operations: Vec<&'static str>,
    failing: HashSet<String>,
    fail_init: bool,
    fail_clear: bool,
    fail_convert: bool,
    fail_sleep: bool,
    calls: Vec<PanelCall>,
}

impl MockPanel {
    /// Panel exposing exactly `operations`
    pub fn new(width: u32, height: u32, operations: &[&'static str]) -> Self {
        Self {
            info: DisplayInfo::new(width, height),
            operations: operations.to_vec(),
            failing: HashSet::new(),
            fail_init: false,
            fail_clear: false,
            fail_convert: false,
            fail_sleep: false,
            calls: Vec::new(),
        }
    }

    /// 250×122 panel with only the conventional `display` operation
    pub fn full_only() -> Self {
        Self::new(250, 122, &["display"])
    }

    /// Make `operation` exist but fail when invoked
    #[must_use]
    pub fn failing_operation(mut self, operation: &str) -> Self {
        self.failing.insert(operation.to_owned());
        self
    }

    /// Make `init()` fail
    #[must_use]
    pub fn failing_init(mut self) -> Self {
        self.fail_init = true;
        self
    }

    /// Make every `clear()` fail
    #[must_use]
    pub fn failing_clear(mut self) -> Self {
        self.fail_clear = true;
        self
    }

    /// Make `to_native_buffer()` fail
    #[must_use]
    pub fn failing_conversion(mut self) -> Self {
        self.fail_convert = true;
        self
    }

    /// Make `sleep()` fail
    #[must_use]
    pub fn failing_sleep(mut self) -> Self {
        self.fail_sleep = true;
        self
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> &[PanelCall] {
        &self.calls
    }

    /// Operation names passed to `invoke`, in order
    pub fn invoked(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                PanelCall::Invoke(op, _) => Some(op.as_str()),
                _ => None,
            })
            .collect()
    }

    /// How many times `operation` was invoked
    pub fn invoke_count(&self, operation: &str) -> usize {
        self.invoked().iter().filter(|op| **op == operation).count()
    }
}

impl Panel for MockPanel {
    fn info(&self) -> DisplayInfo {
        self.info
    }

    async fn init(&mut self) -> Result<(), PanelError> {
        self.calls.push(PanelCall::Init);
        if self.fail_init {
            return Err(PanelError::Communication);
        }
        Ok(())
    }

    async fn clear(&mut self, fill: u8) -> Result<(), PanelError> {
        self.calls.push(PanelCall::Clear(fill));
        if self.fail_clear {
            return Err(PanelError::Busy);
        }
        Ok(())
    }

    fn to_native_buffer(&self, frame: &Frame) -> Result<Vec<u8>, PanelError> {
        if self.fail_convert {
            return Err(PanelError::Communication);
        }
        let expected = (self.info.width as usize).div_ceil(8) * self.info.height as usize;
        if frame.as_bytes().len() != expected {
            return Err(PanelError::InvalidBuffer {
                expected,
                actual: frame.as_bytes().len(),
            });
        }
        Ok(frame.as_bytes().to_vec())
    }

    fn operations(&self) -> &[&'static str] {
        &self.operations
    }

    async fn invoke(&mut self, operation: &str, buffer: &[u8]) -> Result<(), PanelError> {
        if !self.operations.iter().any(|op| *op == operation) {
            return Err(PanelError::UnsupportedOperation(operation.to_owned()));
        }
        self.calls
            .push(PanelCall::Invoke(operation.to_owned(), buffer.len()));
        tracing::trace!(operation, bytes = buffer.len(), "mock panel invoke");
        if self.failing.contains(operation) {
            return Err(PanelError::Timeout);
        }
        Ok(())
    }

    async fn sleep(&mut self) -> Result<(), PanelError> {
        self.calls.push(PanelCall::Sleep);
        if self.fail_sleep {
            return Err(PanelError::Communication);
        }
        Ok(())
    }
}
