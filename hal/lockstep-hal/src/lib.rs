//! Lockstep Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the bridge logic is written
//! against. Chip-specific crates implement them; host tests implement them
//! with mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (lockstep-firmware)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  lockstep-drivers (LEDs, OLED, link)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  lockstep-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ lockstep-hal- │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Digital output
//! - [`pwm::PwmChannel`] - Intensity-controllable output
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial communication
//! - [`i2c::I2cBus`] - I2C bus operations
//! - [`time::Clock`] - Millisecond wall clock

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod i2c;
pub mod pwm;
pub mod time;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use gpio::OutputPin;
pub use i2c::I2cBus;
pub use pwm::PwmChannel;
pub use time::Clock;
pub use uart::{UartRx, UartTx};
