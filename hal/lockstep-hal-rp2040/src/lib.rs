//! RP2040-specific HAL for the Lockstep firmware
//!
//! Thin adapters from embassy-rp peripherals (and anything else speaking
//! the embedded-hal / embedded-io traits) onto `lockstep-hal`:
//!
//! - GPIO outputs
//! - PWM slices for the RGB stimulus
//! - Buffered UART halves for the headset and host links
//! - Blocking I2C for the OLED
//! - embassy-time as the millisecond clock
//!
//! Also carries the RP2040 pin-to-peripheral tables used to check the
//! board wiring at compile time.

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod i2c;
pub mod pwm;
pub mod time;
pub mod uart;

pub use gpio::GpioOutput;
pub use i2c::BlockingI2c;
pub use pwm::DutyChannel;
pub use time::EmbassyClock;
pub use uart::{to_rp_config, IoRx, IoTx};
