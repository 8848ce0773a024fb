//! LED drivers

pub mod indicator;
pub mod rgb;

pub use indicator::GpioIndicator;
pub use rgb::RgbLed;
