//! PWM channels
//!
//! Each RP2040 slice exposes two outputs (A/B); after `Pwm::split` each
//! half implements `embedded_hal::pwm::SetDutyCycle`, which is all the
//! adapter needs.

use embedded_hal::pwm::SetDutyCycle;
use lockstep_hal::pwm::DUTY_MAX;
use lockstep_hal::PwmChannel;

/// Counter top used for the stimulus slices
///
/// 125 MHz / (TOP + 1) gives a carrier near 488 kHz, far above anything
/// visible, so the LED reads as steady at any duty.
pub const PWM_TOP: u16 = 0xFF;

/// Hardware PWM slice (0-7) driving a GPIO, and whether it is output B
pub const fn gpio_to_slice(gpio: u8) -> (u8, bool) {
    ((gpio / 2) % 8, gpio % 2 == 1)
}

/// 8-bit duty adapter over any embedded-hal PWM output
pub struct DutyChannel<P> {
    out: P,
}

impl<P: SetDutyCycle> DutyChannel<P> {
    /// Wrap a PWM output
    pub fn new(out: P) -> Self {
        Self { out }
    }
}

impl<P: SetDutyCycle> PwmChannel for DutyChannel<P> {
    type Error = P::Error;

    fn set_duty(&mut self, duty: u8) -> Result<(), Self::Error> {
        self.out
            .set_duty_cycle_fraction(u16::from(duty), u16::from(DUTY_MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpio_to_slice() {
        assert_eq!(gpio_to_slice(0), (0, false));
        assert_eq!(gpio_to_slice(3), (1, true));
        assert_eq!(gpio_to_slice(16), (0, false));
        assert_eq!(gpio_to_slice(29), (6, true));
    }
}
