//! SSD1306 / SH1106 OLED driver
//!
//! Driver for 128x64 monochrome OLED panels over I2C. Both controllers
//! accept the same page-mode command set; the SH1106 maps its 132-column
//! RAM with a 2-column offset.

use lockstep_display::{DisplayError, Framebuffer, PixelDisplay, PAGES, WIDTH};
use lockstep_hal::I2cBus;

/// Usual I2C address (0x3D with the address jumper moved)
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// Control byte: following bytes are commands
const CONTROL_COMMAND: u8 = 0x00;
/// Control byte: following bytes are display RAM data
const CONTROL_DATA: u8 = 0x40;

#[allow(dead_code)]
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_INVERSE: u8 = 0xA7;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_MEMORY_MODE: u8 = 0x20;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

/// Panel controller variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Controller {
    #[default]
    Ssd1306,
    Sh1106,
}

impl Controller {
    /// First RAM column of the visible area
    pub fn column_offset(&self) -> u8 {
        match self {
            Controller::Ssd1306 => 0,
            Controller::Sh1106 => 2,
        }
    }
}

/// Buffered OLED panel
///
/// Drawing calls only touch the framebuffer; `flush` streams it to the
/// panel one page at a time.
pub struct Oled<I2C> {
    i2c: I2C,
    address: u8,
    controller: Controller,
    frame: Framebuffer,
    initialized: bool,
}

impl<I2C: I2cBus> Oled<I2C> {
    /// Create a driver for an SSD1306 at the default address
    pub fn new(i2c: I2C) -> Self {
        Self::with_controller(i2c, DEFAULT_ADDRESS, Controller::Ssd1306)
    }

    /// Create a driver for a specific controller and address
    pub fn with_controller(i2c: I2C, address: u8, controller: Controller) -> Self {
        Self {
            i2c,
            address,
            controller,
            frame: Framebuffer::new(),
            initialized: false,
        }
    }

    /// Run the power-up sequence and blank the panel
    pub fn init(&mut self) -> Result<(), DisplayError> {
        let init_cmds: &[u8] = &[
            cmd::DISPLAY_OFF,
            cmd::SET_CLOCK_DIV,
            0x80,
            cmd::SET_MUX_RATIO,
            0x3F, // 64 lines
            cmd::SET_DISPLAY_OFFSET,
            0x00,
            cmd::SET_START_LINE,
            cmd::SET_CHARGE_PUMP,
            0x14, // Internal charge pump on
            cmd::SET_SEG_REMAP,
            cmd::SET_COM_SCAN_DEC,
            cmd::SET_COM_PINS,
            0x12,
            cmd::SET_CONTRAST,
            0xCF,
            cmd::SET_PRECHARGE,
            0xF1,
            cmd::SET_VCOM_DETECT,
            0x40,
            cmd::SET_NORMAL,
        ];

        for &c in init_cmds {
            self.command(c)?;
        }
        // SH1106 has no addressing-mode register and is always page mode
        if self.controller == Controller::Ssd1306 {
            self.command(cmd::SET_MEMORY_MODE)?;
            self.command(0x02)?;
        }

        self.initialized = true;
        self.frame.clear();
        self.flush()?;
        self.command(cmd::DISPLAY_ON)
    }

    /// Panel has been initialised
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Controller variant in use
    pub fn controller(&self) -> Controller {
        self.controller
    }

    /// Frame as it will appear on the next flush
    pub fn frame(&self) -> &Framebuffer {
        &self.frame
    }

    fn command(&mut self, c: u8) -> Result<(), DisplayError> {
        self.i2c
            .write(self.address, &[CONTROL_COMMAND, c])
            .map_err(|_| DisplayError::Communication)
    }
}

impl<I2C: I2cBus> PixelDisplay for Oled<I2C> {
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
        if !self.initialized {
            return Err(DisplayError::NotInitialized);
        }

        let offset = self.controller.column_offset();
        let mut data = [0u8; WIDTH + 1];
        data[0] = CONTROL_DATA;

        for page in 0..PAGES {
            self.command(cmd::SET_PAGE_ADDR | page as u8)?;
            self.command(cmd::SET_LOW_COLUMN | (offset & 0x0F))?;
            self.command(cmd::SET_HIGH_COLUMN | (offset >> 4))?;

            data[1..].copy_from_slice(self.frame.page(page));
            self.i2c
                .write(self.address, &data)
                .map_err(|_| DisplayError::Communication)?;
        }

        Ok(())
    }

    fn dimensions(&self) -> (u16, u16) {
        self.frame.dimensions()
    }
}
