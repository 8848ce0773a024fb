//! Plot rendering
//!
//! Draws one pixel per cycle slot, scaled so the expected accumulator range
//! fills the band below the status line, then the status text on top.
//! Frames are composed in full before `flush`, so the panel only ever shows
//! complete frames.

use lockstep_display::{DisplayError, PixelDisplay};

use crate::config::PlotConfig;
use crate::cycle::CycleBuffer;

/// Vertical position of a plotted value
///
/// `height - (value - baseline) / v_scale`, clamped to
/// `[config.top, height - 1]`. Division truncates toward zero.
pub fn plot_y(value: i32, height: u16, config: &PlotConfig) -> u16 {
    let scale = if config.v_scale == 0 { 1 } else { config.v_scale };
    let offset = value.saturating_sub(config.baseline) / scale;
    let y = i32::from(height).saturating_sub(offset);
    let bottom = i32::from(height) - 1;
    let top = i32::from(config.top).min(bottom);
    y.clamp(top, bottom) as u16
}

/// Renders the cycle plot and status line
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    config: PlotConfig,
}

impl Renderer {
    /// Create a renderer with the given scaling
    pub fn new(config: PlotConfig) -> Self {
        Self { config }
    }

    /// Scaling in use
    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    /// Render a complete frame: clear, plot every slot, status, flush
    pub fn render<D: PixelDisplay + ?Sized>(
        &self,
        display: &mut D,
        status: &str,
        buffer: &CycleBuffer,
    ) -> Result<(), DisplayError> {
        self.begin(display)?;
        for (index, value) in buffer.iter().enumerate() {
            self.plot_sample(display, index, value)?;
        }
        self.finish(display, status)
    }

    /// Start a new frame
    pub fn begin<D: PixelDisplay + ?Sized>(&self, display: &mut D) -> Result<(), DisplayError> {
        display.clear()
    }

    /// Plot a single slot value at column `index`
    pub fn plot_sample<D: PixelDisplay + ?Sized>(
        &self,
        display: &mut D,
        index: usize,
        value: i32,
    ) -> Result<(), DisplayError> {
        let (width, height) = display.dimensions();
        if index >= width as usize {
            return Err(DisplayError::InvalidCoordinates);
        }
        let y = plot_y(value, height, &self.config);
        display.set_pixel(index as u16, y, true)
    }

    /// Draw the status line and present the frame
    pub fn finish<D: PixelDisplay + ?Sized>(
        &self,
        display: &mut D,
        status: &str,
    ) -> Result<(), DisplayError> {
        display.draw_text(0, 0, status)?;
        display.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CYCLE_LEN, PLOT_TOP, V_SCALE};
    use lockstep_display::{Framebuffer, HEIGHT};

    const H: u16 = HEIGHT as u16;

    /// Framebuffer that records what the panel would show
    struct MockPanel {
        frame: Framebuffer,
        shown: Option<Framebuffer>,
        flushes: u32,
        fail_flush: bool,
    }

    impl MockPanel {
        fn new() -> Self {
            Self {
                frame: Framebuffer::new(),
                shown: None,
                flushes: 0,
                fail_flush: false,
            }
        }
    }

    impl PixelDisplay for MockPanel {
        fn clear(&mut self) -> Result<(), DisplayError> {
            self.frame.clear();
            Ok(())
        }

        fn set_pixel(&mut self, x: u16, y: u16, on: bool) -> Result<(), DisplayError> {
            PixelDisplay::set_pixel(&mut self.frame, x, y, on)
        }

        fn draw_text(&mut self, x: u16, y: u16, text: &str) -> Result<(), DisplayError> {
            self.frame.text(x, y, text);
            Ok(())
        }

        fn flush(&mut self) -> Result<(), DisplayError> {
            if self.fail_flush {
                return Err(DisplayError::Communication);
            }
            self.flushes += 1;
            self.shown = Some(self.frame.clone());
            Ok(())
        }

        fn dimensions(&self) -> (u16, u16) {
            self.frame.dimensions()
        }
    }

    #[test]
    fn test_zero_clamps_to_bottom() {
        assert_eq!(plot_y(0, H, &PlotConfig::default()), H - 1);
    }

    #[test]
    fn test_large_value_clamps_to_top() {
        assert_eq!(plot_y(1_000_000, H, &PlotConfig::default()), PLOT_TOP);
        assert_eq!(plot_y(i32::MAX, H, &PlotConfig::default()), PLOT_TOP);
    }

    #[test]
    fn test_negative_value_clamps_to_bottom() {
        assert_eq!(plot_y(-5_000, H, &PlotConfig::default()), H - 1);
        assert_eq!(plot_y(i32::MIN, H, &PlotConfig::default()), H - 1);
    }

    #[test]
    fn test_in_band_passes_through() {
        let config = PlotConfig::default();
        assert_eq!(V_SCALE, 42);
        // 10 rows up from the bottom edge
        assert_eq!(plot_y(420, H, &config), 54);
        assert_eq!(plot_y(42 * 48, H, &config), 16);
        assert_eq!(plot_y(42, H, &config), 63);
        // Truncation toward zero: 83 / 42 = 1
        assert_eq!(plot_y(83, H, &config), 63);
    }

    #[test]
    fn test_band_edges() {
        let config = PlotConfig::default();
        for value in 0..(42 * 60) {
            let y = plot_y(value, H, &config);
            assert!(y >= PLOT_TOP && y <= H - 1);
        }
    }

    #[test]
    fn test_render_plots_one_pixel_per_slot() {
        let mut buffer = CycleBuffer::new();
        for i in 0..CYCLE_LEN {
            buffer.push((i as i32) * 20);
        }
        let renderer = Renderer::default();
        let mut panel = MockPanel::new();

        renderer.render(&mut panel, "", &buffer).unwrap();

        let shown = panel.shown.unwrap();
        assert_eq!(panel.flushes, 1);
        for (i, value) in buffer.iter().enumerate() {
            let y = plot_y(value, H, renderer.config());
            assert!(shown.pixel(i as u16, y));
        }
        // Nothing right of the plot columns
        for x in CYCLE_LEN as u16..128 {
            for y in 0..H {
                assert!(!shown.pixel(x, y));
            }
        }
    }

    #[test]
    fn test_render_replaces_previous_frame() {
        let renderer = Renderer::default();
        let mut panel = MockPanel::new();
        panel.frame.put(100, 40, true);

        renderer.render(&mut panel, "", &CycleBuffer::new()).unwrap();

        let shown = panel.shown.unwrap();
        assert!(!shown.pixel(100, 40));
        assert_eq!(shown.lit_pixels(), CYCLE_LEN as u32);
    }

    #[test]
    fn test_status_drawn_top_left() {
        let renderer = Renderer::default();
        let mut panel = MockPanel::new();
        renderer
            .render(&mut panel, "Q0 A1 M2 3ms", &CycleBuffer::new())
            .unwrap();

        let shown = panel.shown.unwrap();
        let text_pixels = (0..10u16)
            .flat_map(|y| (0..128u16).map(move |x| (x, y)))
            .filter(|&(x, y)| shown.pixel(x, y))
            .count();
        assert!(text_pixels > 0);
    }

    #[test]
    fn test_flush_error_propagates() {
        let renderer = Renderer::default();
        let mut panel = MockPanel::new();
        panel.fail_flush = true;
        assert_eq!(
            renderer.render(&mut panel, "", &CycleBuffer::new()),
            Err(DisplayError::Communication)
        );
        assert!(panel.shown.is_none());
    }
}
