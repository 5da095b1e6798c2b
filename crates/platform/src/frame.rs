//! 1-bit frame canvas
//!
//! A [`Frame`] is created fresh for every render and handed to the panel
//! driver for conversion into its RAM layout.
//!
//! # Memory layout
//!
//! Row-major, 1 bit per pixel, MSB-first, rows padded to whole bytes. A set
//! bit is white (paper), a cleared bit is black (ink), matching the B/W RAM
//! of the SSD16xx controller family:
//!
//! ```text
//! byte = row * bytes_per_row + x / 8
//! bit  = 7 - (x % 8)
//! ```

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

/// Monochrome bitmap sized to the panel.
///
/// Drawing [`BinaryColor::On`] lays down ink; [`BinaryColor::Off`] restores
/// paper. Pixels outside the frame are clipped.
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    bytes_per_row: usize,
    buffer: Vec<u8>,
}

impl Frame {
    /// Create a white frame.
    pub fn new(width: u32, height: u32) -> Self {
        let bytes_per_row = (width as usize).div_ceil(8);
        Self {
            width,
            height,
            bytes_per_row,
            buffer: vec![0xFF; bytes_per_row * height as usize],
        }
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Packed row stride in bytes
    pub fn bytes_per_row(&self) -> usize {
        self.bytes_per_row
    }

    /// Packed pixel data
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Colour at `(x, y)`, `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<BinaryColor> {
        let (index, mask) = self.locate(x, y)?;
        let byte = self.buffer.get(index)?;
        Some(if byte & mask == 0 {
            BinaryColor::On
        } else {
            BinaryColor::Off
        })
    }

    /// Number of inked pixels.
    pub fn ink_count(&self) -> usize {
        (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| (x, y)))
            .filter(|&(x, y)| self.pixel(x, y) == Some(BinaryColor::On))
            .count()
    }

    /// Whether any pixel inside the rectangle carries ink.
    pub fn has_ink_in(&self, top_left: Point, size: Size) -> bool {
        let x0 = top_left.x.max(0).unsigned_abs();
        let y0 = top_left.y.max(0).unsigned_abs();
        let x1 = x0.saturating_add(size.width).min(self.width);
        let y1 = y0.saturating_add(size.height).min(self.height);
        (y0..y1).any(|y| (x0..x1).any(|x| self.pixel(x, y) == Some(BinaryColor::On)))
    }

    fn locate(&self, x: u32, y: u32) -> Option<(usize, u8)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = y as usize * self.bytes_per_row + x as usize / 8;
        let mask = 0x80u8 >> (x % 8);
        Some((index, mask))
    }

    fn set(&mut self, x: u32, y: u32, color: BinaryColor) {
        let Some((index, mask)) = self.locate(x, y) else {
            return;
        };
        if let Some(byte) = self.buffer.get_mut(index) {
            match color {
                BinaryColor::On => *byte &= !mask,
                BinaryColor::Off => *byte |= mask,
            }
        }
    }
}

impl core::fmt::Debug for Frame {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Frame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.buffer.len())
            .finish()
    }
}

impl OriginDimensions for Frame {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for Frame {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let (Ok(x), Ok(y)) = (u32::try_from(point.x), u32::try_from(point.y)) {
                self.set(x, y, color);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

    #[test]
    fn test_new_frame_is_white() {
        let frame = Frame::new(250, 122);
        assert_eq!(frame.bytes_per_row(), 32);
        assert_eq!(frame.as_bytes().len(), 32 * 122);
        assert!(frame.as_bytes().iter().all(|&b| b == 0xFF));
        assert_eq!(frame.ink_count(), 0);
    }

    #[test]
    fn test_pixel_bit_order_is_msb_first() {
        let mut frame = Frame::new(16, 2);
        Pixel(Point::new(1, 1), BinaryColor::On)
            .draw(&mut frame)
            .unwrap();
        // row 1, byte 0, bit 6
        assert_eq!(frame.as_bytes()[2], 0b1011_1111);
        assert_eq!(frame.pixel(1, 1), Some(BinaryColor::On));
        assert_eq!(frame.pixel(0, 1), Some(BinaryColor::Off));
    }

    #[test]
    fn test_out_of_bounds_pixels_are_clipped() {
        let mut frame = Frame::new(8, 8);
        Rectangle::new(Point::new(-4, -4), Size::new(20, 20))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut frame)
            .unwrap();
        assert_eq!(frame.ink_count(), 64);
        assert_eq!(frame.pixel(8, 0), None);
    }

    #[test]
    fn test_has_ink_in_region() {
        let mut frame = Frame::new(40, 20);
        Rectangle::new(Point::new(30, 10), Size::new(2, 2))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut frame)
            .unwrap();
        assert!(frame.has_ink_in(Point::new(25, 5), Size::new(10, 10)));
        assert!(!frame.has_ink_in(Point::zero(), Size::new(20, 20)));
    }

    #[test]
    fn test_off_restores_paper() {
        let mut frame = Frame::new(8, 1);
        Pixel(Point::new(3, 0), BinaryColor::On)
            .draw(&mut frame)
            .unwrap();
        Pixel(Point::new(3, 0), BinaryColor::Off)
            .draw(&mut frame)
            .unwrap();
        assert_eq!(frame.as_bytes(), &[0xFF]);
    }
}
