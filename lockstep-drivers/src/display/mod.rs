//! OLED panel drivers

pub mod ssd1306;

pub use ssd1306::{Controller, Oled, DEFAULT_ADDRESS};
