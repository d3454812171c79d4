//! 1-bit framebuffer for the face
//!
//! Rows of packed bytes, most significant bit first, the same layout a
//! monochrome memory LCD or e-paper panel expects. Implements
//! `embedded-graphics`' `DrawTarget` so the renderer never needs to know
//! whether it is drawing into RAM, a panel driver or a test double.

use core::convert::Infallible;
use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

/// Packed monochrome framebuffer
pub struct FrameBuffer {
    width: u32,
    height: u32,
    buffer: Vec<u8>,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        // Each row has (width+7)/8 bytes
        let bytes_per_row = width.div_ceil(8);
        Self {
            width,
            height,
            buffer: vec![0x00; (bytes_per_row * height) as usize],
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn fill(&mut self, color: BinaryColor) {
        let byte = if color.is_on() { 0xFF } else { 0x00 };
        self.buffer.fill(byte);
    }

    /// Pixel at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<BinaryColor> {
        let (index, mask) = self.locate(x, y)?;
        Some(BinaryColor::from(self.buffer[index] & mask != 0))
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: BinaryColor) {
        let Some((index, mask)) = self.locate(x, y) else {
            return;
        };
        if color.is_on() {
            self.buffer[index] |= mask;
        } else {
            self.buffer[index] &= !mask;
        }
    }

    /// Number of lit pixels.
    pub fn count_on(&self) -> u32 {
        self.buffer.iter().map(|byte| byte.count_ones()).sum()
    }

    /// Terminal preview, two pixel rows per line using half blocks.
    pub fn to_ascii(&self) -> String {
        let lit = |x: u32, y: u32| self.pixel(x, y).is_some_and(BinaryColor::is_on);
        let mut out = String::with_capacity(((self.width + 1) * self.height.div_ceil(2)) as usize);
        for y in (0..self.height).step_by(2) {
            for x in 0..self.width {
                out.push(match (lit(x, y), lit(x, y + 1)) {
                    (true, true) => '█',
                    (true, false) => '▀',
                    (false, true) => '▄',
                    (false, false) => ' ',
                });
            }
            out.push('\n');
        }
        out
    }

    fn locate(&self, x: u32, y: u32) -> Option<(usize, u8)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let bytes_per_row = self.width.div_ceil(8);
        let index = (y * bytes_per_row + x / 8) as usize;
        Some((index, 0x80 >> (x % 8)))
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            // Negative coordinates are off-screen
            if let (Ok(x), Ok(y)) = (u32::try_from(point.x), u32::try_from(point.y)) {
                self.set_pixel(x, y, color);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

    #[test]
    fn test_new_buffer_is_dark() {
        let fb = FrameBuffer::new(10, 3);
        assert_eq!(fb.as_bytes().len(), 6);
        assert_eq!(fb.count_on(), 0);
    }

    #[test]
    fn test_set_and_read_pixel() {
        let mut fb = FrameBuffer::new(16, 2);
        fb.set_pixel(9, 1, BinaryColor::On);
        assert_eq!(fb.pixel(9, 1), Some(BinaryColor::On));
        assert_eq!(fb.pixel(8, 1), Some(BinaryColor::Off));
        assert_eq!(fb.as_bytes()[3], 0b0100_0000);

        fb.set_pixel(9, 1, BinaryColor::Off);
        assert_eq!(fb.count_on(), 0);
    }

    #[test]
    fn test_out_of_bounds_is_clipped() {
        let mut fb = FrameBuffer::new(4, 4);
        fb.set_pixel(4, 0, BinaryColor::On);
        fb.set_pixel(0, 4, BinaryColor::On);
        assert_eq!(fb.pixel(4, 0), None);
        assert_eq!(fb.count_on(), 0);

        Rectangle::new(Point::new(-2, -2), Size::new(4, 4))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut fb)
            .unwrap();
        assert_eq!(fb.count_on(), 4);
    }

    #[test]
    fn test_fill() {
        let mut fb = FrameBuffer::new(8, 2);
        fb.fill(BinaryColor::On);
        assert_eq!(fb.count_on(), 16);
    }

    #[test]
    fn test_ascii_preview_uses_half_blocks() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.set_pixel(0, 0, BinaryColor::On);
        fb.set_pixel(1, 1, BinaryColor::On);
        fb.set_pixel(2, 0, BinaryColor::On);
        fb.set_pixel(2, 1, BinaryColor::On);
        assert_eq!(fb.to_ascii(), "▀▄█\n");
    }
}
