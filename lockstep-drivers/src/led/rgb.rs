//! RGB flicker LED
//!
//! Three PWM channels driven to the same duty, giving a white flash.

use lockstep_core::traits::StimulusOutput;
use lockstep_hal::PwmChannel;

/// RGB LED on three PWM channels
pub struct RgbLed<R, G, B> {
    red: R,
    green: G,
    blue: B,
    level: u8,
    /// Duty writes rejected by the PWM hardware
    errors: u32,
}

impl<R, G, B> RgbLed<R, G, B>
where
    R: PwmChannel,
    G: PwmChannel,
    B: PwmChannel,
{
    /// Create the LED with every channel off
    pub fn new(red: R, green: G, blue: B) -> Self {
        let mut led = Self {
            red,
            green,
            blue,
            level: 0,
            errors: 0,
        };
        led.set_intensity(0);
        led
    }

    /// Number of failed duty updates since start
    pub fn errors(&self) -> u32 {
        self.errors
    }
}

impl<R, G, B> StimulusOutput for RgbLed<R, G, B>
where
    R: PwmChannel,
    G: PwmChannel,
    B: PwmChannel,
{
    fn set_intensity(&mut self, level: u8) {
        self.level = level;
        let results = [
            self.red.set_duty(level).is_ok(),
            self.green.set_duty(level).is_ok(),
            self.blue.set_duty(level).is_ok(),
        ];
        let failed = results.iter().filter(|ok| !**ok).count() as u32;
        self.errors = self.errors.wrapping_add(failed);
    }

    fn intensity(&self) -> u8 {
        self.level
    }
}
