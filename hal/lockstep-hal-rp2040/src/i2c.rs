//! Blocking I2C

use embassy_rp::i2c;
use embedded_hal::i2c::I2c;
use lockstep_hal::i2c::I2cConfig;
use lockstep_hal::I2cBus;

/// Translate a bus configuration into embassy-rp's I2C config
pub fn to_rp_config(config: &I2cConfig) -> i2c::Config {
    let mut rp = i2c::Config::default();
    rp.frequency = config.frequency;
    rp
}

/// I2C master over any blocking embedded-hal bus
pub struct BlockingI2c<B> {
    bus: B,
}

impl<B: I2c> BlockingI2c<B> {
    /// Wrap a configured bus
    pub fn new(bus: B) -> Self {
        Self { bus }
    }
}

impl<B: I2c> I2cBus for BlockingI2c<B> {
    type Error = B::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.bus.write(address, data)
    }
}
