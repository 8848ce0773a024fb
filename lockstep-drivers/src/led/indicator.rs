//! GPIO quality indicator
//!
//! Single LED on a GPIO pin (directly or via a transistor).

use lockstep_core::traits::Indicator;
use lockstep_hal::OutputPin;

/// Signal-quality LED on a GPIO pin
///
/// The pin can be configured as active-high (default) or active-low.
pub struct GpioIndicator<P> {
    pin: P,
    /// If true, LED ON = pin LOW
    inverted: bool,
    /// Current logical state (true = good signal shown)
    good: bool,
}

impl<P: OutputPin> GpioIndicator<P> {
    /// Create a new indicator, initially showing bad signal
    ///
    /// # Arguments
    /// - `pin`: The GPIO pin to control
    /// - `inverted`: If true, the LED is lit when the pin is LOW
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut indicator = Self {
            pin,
            inverted,
            good: false,
        };
        indicator.set_good(false);
        indicator
    }

    /// Create an indicator with active-high output
    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    /// Create an indicator with active-low output
    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }
}

impl<P: OutputPin> Indicator for GpioIndicator<P> {
    fn set_good(&mut self, good: bool) {
        self.good = good;
        // Lit when good: active-high drives high, active-low drives low
        self.pin.set_state(good != self.inverted);
    }

    fn is_good(&self) -> bool {
        self.good
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mock GPIO pin for testing
    struct MockPin {
        high: bool,
    }

    impl MockPin {
        fn new() -> Self {
            Self { high: true }
        }
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            self.high = true;
        }

        fn set_low(&mut self) {
            self.high = false;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    #[test]
    fn test_active_high_indicator() {
        let mut led = GpioIndicator::new_active_high(MockPin::new());

        // Starts dark
        assert!(!led.is_good());
        assert!(!led.pin.is_set_high());

        led.set_good(true);
        assert!(led.is_good());
        assert!(led.pin.is_set_high());

        led.set_good(false);
        assert!(!led.pin.is_set_high());
    }

    #[test]
    fn test_active_low_indicator() {
        let mut led = GpioIndicator::new_active_low(MockPin::new());

        // Dark means pin high for active-low
        assert!(!led.is_good());
        assert!(led.pin.is_set_high());

        led.set_good(true);
        assert!(!led.pin.is_set_high());
    }
}
