//! Board-agnostic core logic for the EEG bridge firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Output traits for the quality LED and flicker stimulus
//! - Cycle buffer and sample aggregation
//! - Flicker timing and signal-quality indication
//! - Plot rendering onto any `PixelDisplay`
//! - The `Bridge` context tying decoder, aggregator and outputs together
//! - Compile-time configuration constants

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod aggregator;
pub mod bridge;
pub mod config;
pub mod cycle;
pub mod render;
pub mod stimulus;
pub mod traits;

pub use aggregator::{CycleEvent, SampleAggregator};
pub use bridge::{Bridge, ReportError, ReportSummary};
pub use cycle::{round_for_report, CycleBuffer};
pub use render::{plot_y, Renderer};
pub use stimulus::{Flicker, QualityIndicator};
