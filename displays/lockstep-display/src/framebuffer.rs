//! 1-bit framebuffer
//!
//! Organised the way SSD1306/SH1106 controllers store GRAM: eight 128-byte
//! pages, each byte a vertical strip of 8 pixels with bit 0 at the top.

use core::convert::Infallible;

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};

use crate::backend::{DisplayError, PixelDisplay};

/// Panel width in pixels
pub const WIDTH: usize = 128;
/// Panel height in pixels
pub const HEIGHT: usize = 64;
/// Number of 8-pixel pages
pub const PAGES: usize = HEIGHT / 8;

/// In-RAM monochrome frame
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    pages: [[u8; WIDTH]; PAGES],
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Framebuffer {
    /// Create a blank frame
    pub const fn new() -> Self {
        Self {
            pages: [[0; WIDTH]; PAGES],
        }
    }

    /// Blank every pixel
    pub fn clear(&mut self) {
        for page in self.pages.iter_mut() {
            page.fill(0);
        }
    }

    /// Set or clear a pixel, ignoring coordinates outside the frame
    pub fn put(&mut self, x: u16, y: u16, on: bool) {
        let (x, y) = (x as usize, y as usize);
        if x >= WIDTH || y >= HEIGHT {
            return;
        }
        let mask = 1 << (y % 8);
        let cell = &mut self.pages[y / 8][x];
        if on {
            *cell |= mask;
        } else {
            *cell &= !mask;
        }
    }

    /// Read back a pixel; out-of-frame pixels read as off
    pub fn pixel(&self, x: u16, y: u16) -> bool {
        let (x, y) = (x as usize, y as usize);
        if x >= WIDTH || y >= HEIGHT {
            return false;
        }
        self.pages[y / 8][x] & (1 << (y % 8)) != 0
    }

    /// Raw bytes of one page, in column order
    pub fn page(&self, page: usize) -> &[u8; WIDTH] {
        &self.pages[page]
    }

    /// Render text in the 6x10 font with its top-left corner at (x, y)
    pub fn text(&mut self, x: u16, y: u16, text: &str) {
        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        let origin = Point::new(i32::from(x), i32::from(y));
        // Drawing into RAM cannot fail
        let _ = Text::with_baseline(text, origin, style, Baseline::Top).draw(self);
    }

    /// Count of lit pixels
    pub fn lit_pixels(&self) -> u32 {
        self.pages
            .iter()
            .flat_map(|page| page.iter())
            .map(|b| b.count_ones())
            .sum()
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for Framebuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let (Ok(x), Ok(y)) = (u16::try_from(point.x), u16::try_from(point.y)) {
                self.put(x, y, color.is_on());
            }
        }
        Ok(())
    }
}

/// A bare framebuffer is a display whose flush is a no-op
impl PixelDisplay for Framebuffer {
    fn clear(&mut self) -> Result<(), DisplayError> {
        Framebuffer::clear(self);
        Ok(())
    }

    fn set_pixel(&mut self, x: u16, y: u16, on: bool) -> Result<(), DisplayError> {
        if x as usize >= WIDTH || y as usize >= HEIGHT {
            return Err(DisplayError::InvalidCoordinates);
        }
        self.put(x, y, on);
        Ok(())
    }

    fn draw_text(&mut self, x: u16, y: u16, text: &str) -> Result<(), DisplayError> {
        self.text(x, y, text);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }

    fn dimensions(&self) -> (u16, u16) {
        (WIDTH as u16, HEIGHT as u16)
    }
}
