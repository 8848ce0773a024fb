//! PWM output abstractions
//!
//! The flicker stimulus drives each LED colour through its own channel.

/// Full-scale duty value
pub const DUTY_MAX: u8 = u8::MAX;

/// A single PWM output channel with 8-bit duty resolution
///
/// Implementations scale the 8-bit duty onto whatever counter range the
/// hardware slice is configured with.
pub trait PwmChannel {
    /// Error type for duty updates
    type Error;

    /// Set duty cycle (0 = off, 255 = fully on)
    fn set_duty(&mut self, duty: u8) -> Result<(), Self::Error>;
}
