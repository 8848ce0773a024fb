//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the output traits
//! defined in lockstep-core and the display trait from lockstep-display,
//! built on the lockstep-hal bus and pin traits:
//!
//! - LEDs (GPIO quality indicator, PWM RGB stimulus)
//! - OLED panels (SSD1306 / SH1106 over I2C)
//! - Host serial link as a `core::fmt::Write` sink

#![no_std]
#![deny(unsafe_code)]

pub mod display;
pub mod led;
pub mod link;

pub use display::{Controller, Oled};
pub use led::{GpioIndicator, RgbLed};
pub use link::HostLink;
