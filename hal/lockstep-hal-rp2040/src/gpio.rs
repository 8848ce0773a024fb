//! GPIO outputs

use embassy_rp::gpio::Output;
use lockstep_hal::OutputPin;

/// Maximum number of GPIO pins on RP2040
pub const GPIO_COUNT: u8 = 30;

/// Push-pull GPIO output
pub struct GpioOutput<'d> {
    pin: Output<'d>,
}

impl<'d> GpioOutput<'d> {
    /// Wrap a configured output pin
    pub fn new(pin: Output<'d>) -> Self {
        Self { pin }
    }
}

impl OutputPin for GpioOutput<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}
