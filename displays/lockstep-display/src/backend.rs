//! Display backend trait
//!
//! Defines the interface the plot renderer draws through.

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Invalid coordinates or dimensions
    InvalidCoordinates,
    /// Display not initialized
    NotInitialized,
}

/// Pixel-addressable monochrome display
///
/// Drawing calls only change the local frame; [`PixelDisplay::flush`]
/// presents it.
pub trait PixelDisplay {
    /// Clear the whole frame
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Set or clear a single pixel
    fn set_pixel(&mut self, x: u16, y: u16, on: bool) -> Result<(), DisplayError>;

    /// Draw text with its top-left corner at the given pixel position
    ///
    /// Glyphs falling outside the panel are clipped.
    fn draw_text(&mut self, x: u16, y: u16, text: &str) -> Result<(), DisplayError>;

    /// Send the composed frame to the panel
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// Panel size in pixels as (width, height)
    fn dimensions(&self) -> (u16, u16);
}

impl<T: PixelDisplay + ?Sized> PixelDisplay for &mut T {
    fn clear(&mut self) -> Result<(), DisplayError> {
        (**self).clear()
    }

    fn set_pixel(&mut self, x: u16, y: u16, on: bool) -> Result<(), DisplayError> {
        (**self).set_pixel(x, y, on)
    }

    fn draw_text(&mut self, x: u16, y: u16, text: &str) -> Result<(), DisplayError> {
        (**self).draw_text(x, y, text)
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        (**self).flush()
    }

    fn dimensions(&self) -> (u16, u16) {
        (**self).dimensions()
    }
}
