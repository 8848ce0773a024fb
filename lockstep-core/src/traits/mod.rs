//! Hardware abstraction traits
//!
//! These traits define the interface between the bridge logic and the
//! LED drivers.

pub mod output;

pub use output::{Indicator, StimulusOutput};
