//! PNG snapshot panel
//!
//! Behaves like a 1bpp SSD16xx-style panel described by a
//! [`DisplaySpec`]: every refresh writes the panel RAM to
//! `<output_dir>/frame.png`, replacing the previous image atomically.

use std::path::{Path, PathBuf};

use eink_specs::DisplaySpec;
use image::{GrayImage, ImageFormat, Luma};
use platform::{DisplayInfo, Frame, Panel, PanelError};

use crate::refresh::{FULL_OPERATION, PARTIAL_ALIASES};

/// File name of the most recent frame.
pub const SNAPSHOT_FILE: &str = "frame.png";

const PAPER: u8 = 0xFF;
const INK: u8 = 0x00;

/// Software panel that writes each refresh to a PNG file.
#[derive(Debug)]
pub struct SnapshotPanel {
    spec: &'static DisplaySpec,
    output_dir: PathBuf,
    operations: Vec<&'static str>,
    refresh_count: u64,
}

impl SnapshotPanel {
    /// Open a panel for `spec` writing into `output_dir`.
    ///
    /// The directory is created if missing.
    pub fn open(
        spec: &'static DisplaySpec,
        output_dir: impl Into<PathBuf>,
    ) -> Result<Self, PanelError> {
        let output_dir = output_dir.into();
        std::fs::create_dir_all(&output_dir)?;

        let mut operations = vec![FULL_OPERATION];
        if spec.supports_partial_refresh() {
            operations.push(PARTIAL_ALIASES[0]);
        }

        tracing::debug!(
            panel = spec.name,
            width = spec.width,
            height = spec.height,
            dir = %output_dir.display(),
            "snapshot panel opened"
        );

        Ok(Self {
            spec,
            output_dir,
            operations,
            refresh_count: 0,
        })
    }

    /// Panel specification
    pub fn spec(&self) -> &'static DisplaySpec {
        self.spec
    }

    /// Path of the most recent frame.
    pub fn snapshot_path(&self) -> PathBuf {
        self.output_dir.join(SNAPSHOT_FILE)
    }

    /// Refreshes written so far, including clears.
    pub fn refresh_count(&self) -> u64 {
        self.refresh_count
    }

    fn check_len(&self, buffer: &[u8]) -> Result<(), PanelError> {
        let expected = self.spec.buffer_len();
        if buffer.len() != expected {
            return Err(PanelError::InvalidBuffer {
                expected,
                actual: buffer.len(),
            });
        }
        Ok(())
    }

    fn write_snapshot(&mut self, buffer: &[u8]) -> Result<(), PanelError> {
        self.check_len(buffer)?;
        let image = to_image(self.spec, buffer);

        let target = self.snapshot_path();
        let staging = self.output_dir.join(format!("{SNAPSHOT_FILE}.part"));
        image
            .save_with_format(&staging, ImageFormat::Png)
            .map_err(|err| PanelError::Io(err.to_string()))?;
        std::fs::rename(&staging, &target)?;

        self.refresh_count += 1;
        Ok(())
    }
}

/// Expand 1bpp panel RAM into an 8-bit grayscale image.
fn to_image(spec: &DisplaySpec, buffer: &[u8]) -> GrayImage {
    let bytes_per_row = (spec.width as usize).div_ceil(8);
    GrayImage::from_fn(spec.width, spec.height, |x, y| {
        let index = y as usize * bytes_per_row + x as usize / 8;
        let mask = 0x80u8 >> (x % 8);
        let paper = buffer.get(index).is_some_and(|byte| byte & mask != 0);
        Luma([if paper { PAPER } else { INK }])
    })
}

impl Panel for SnapshotPanel {
    fn info(&self) -> DisplayInfo {
        DisplayInfo::new(self.spec.width, self.spec.height)
    }

    async fn init(&mut self) -> Result<(), PanelError> {
        tracing::debug!(panel = self.spec.name, "initializing snapshot panel");
        Ok(())
    }

    async fn clear(&mut self, fill: u8) -> Result<(), PanelError> {
        let buffer = vec![fill; self.spec.buffer_len()];
        self.write_snapshot(&buffer)
    }

    fn to_native_buffer(&self, frame: &Frame) -> Result<Vec<u8>, PanelError> {
        if frame.width() != self.spec.width || frame.height() != self.spec.height {
            return Err(PanelError::InvalidBuffer {
                expected: self.spec.buffer_len(),
                actual: frame.as_bytes().len(),
            });
        }
        Ok(frame.as_bytes().to_vec())
    }

    fn operations(&self) -> &[&'static str] {
        &self.operations
    }

    async fn invoke(&mut self, operation: &str, buffer: &[u8]) -> Result<(), PanelError> {
        let duration = if operation == FULL_OPERATION {
            Some(self.spec.full_refresh_duration())
        } else if self.operations.iter().any(|op| *op == operation) {
            self.spec.partial_refresh_duration()
        } else {
            return Err(PanelError::UnsupportedOperation(operation.to_owned()));
        };
        self.write_snapshot(buffer)?;
        tracing::trace!(
            operation,
            simulated = ?duration,
            path = %self.snapshot_path().display(),
            "snapshot written"
        );
        Ok(())
    }

    async fn sleep(&mut self) -> Result<(), PanelError> {
        tracing::debug!(panel = self.spec.name, "snapshot panel sleeping");
        Ok(())
    }
}

/// Read back a snapshot as `(width, height, luma bytes)`.
pub fn load_snapshot(path: &Path) -> Result<(u32, u32, Vec<u8>), PanelError> {
    let image = image::open(path)
        .map_err(|err| PanelError::Io(err.to_string()))?
        .into_luma8();
    Ok((image.width(), image.height(), image.into_raw()))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use eink_specs::displays::{WAVESHARE_2_13_V4, WAVESHARE_5_65_SPECTRA6};
    use embedded_graphics::pixelcolor::BinaryColor;
    use embedded_graphics::prelude::*;

    #[test]
    fn test_operations_follow_spec() {
        let dir = tempfile::tempdir().unwrap();
        let partial = SnapshotPanel::open(&WAVESHARE_2_13_V4, dir.path()).unwrap();
        assert_eq!(partial.operations(), &["display", "displayPartial"]);

        let full = SnapshotPanel::open(&WAVESHARE_5_65_SPECTRA6, dir.path()).unwrap();
        assert_eq!(full.operations(), &["display"]);
    }

    #[test]
    fn test_open_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        SnapshotPanel::open(&WAVESHARE_2_13_V4, &nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_open_fails_on_file_path() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("occupied");
        std::fs::write(&file, b"x").unwrap();
        assert!(matches!(
            SnapshotPanel::open(&WAVESHARE_2_13_V4, &file),
            Err(PanelError::Io(_))
        ));
    }

    #[tokio::test]
    async fn test_display_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let mut panel = SnapshotPanel::open(&WAVESHARE_2_13_V4, dir.path()).unwrap();

        let mut frame = Frame::new(250, 122);
        Pixel(Point::new(9, 2), BinaryColor::On)
            .draw(&mut frame)
            .unwrap();
        let buffer = panel.to_native_buffer(&frame).unwrap();
        panel.invoke("display", &buffer).await.unwrap();

        let (width, height, luma) = load_snapshot(&panel.snapshot_path()).unwrap();
        assert_eq!((width, height), (250, 122));
        assert_eq!(luma[2 * 250 + 9], INK);
        assert_eq!(luma[0], PAPER);
        assert_eq!(panel.refresh_count(), 1);
        assert!(!dir.path().join("frame.png.part").exists());
    }

    #[tokio::test]
    async fn test_clear_fills_panel() {
        let dir = tempfile::tempdir().unwrap();
        let mut panel = SnapshotPanel::open(&WAVESHARE_2_13_V4, dir.path()).unwrap();
        panel.clear(0x00).await.unwrap();
        let (_, _, luma) = load_snapshot(&panel.snapshot_path()).unwrap();
        assert!(luma.iter().all(|&v| v == INK));
    }

    #[tokio::test]
    async fn test_rejects_unknown_operation_and_bad_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let mut panel = SnapshotPanel::open(&WAVESHARE_5_65_SPECTRA6, dir.path()).unwrap();
        assert!(matches!(
            panel.invoke("displayPartial", &[]).await,
            Err(PanelError::UnsupportedOperation(_))
        ));
        assert!(matches!(
            panel.invoke("display", &[0xFF; 4]).await,
            Err(PanelError::InvalidBuffer { .. })
        ));
        assert!(panel.to_native_buffer(&Frame::new(250, 122)).is_err());
        assert_eq!(panel.refresh_count(), 0);
    }
}
