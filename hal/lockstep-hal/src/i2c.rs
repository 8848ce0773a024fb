//! I2C master
//!
//! The OLED is the only device on the bus and it is never read back, so
//! the trait carries just the write transaction.

/// Write-only I2C master
pub trait I2cBus {
    type Error;

    /// Send `data` to the 7-bit `address` as one transaction
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;
}

/// Bus clock settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// SCL rate in Hz
    pub frequency: u32,
}

impl I2cConfig {
    /// 400 kHz; SSD1306 and SH1106 panels accept it
    pub const FAST: Self = Self::new(400_000);

    pub const fn new(frequency: u32) -> Self {
        Self { frequency }
    }
}
