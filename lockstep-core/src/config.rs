//! Compile-time configuration
//!
//! Every parameter of the bridge is fixed at build time. The structs below
//! only group the constants so tests can exercise other values.

/// Samples per stimulus cycle (slots in the cycle buffer)
pub const CYCLE_LEN: usize = 64;

/// Completed cycles between reports (2048 samples, ~4 s at 512 Hz)
pub const REPS_PER_REPORT: u8 = 32;

/// Flicker on-time after each cycle boundary
pub const FLICKER_MS: u32 = 20;

/// Duty applied to each LED colour while the flicker is on
pub const FLICKER_INTENSITY: u8 = u8::MAX;

/// Plot value mapped to the bottom row
pub const BASELINE: i32 = 0;

/// Accumulator units per pixel row
pub const V_SCALE: i32 = 2048 / 48;

/// Topmost plot row; rows above belong to the status line
pub const PLOT_TOP: u16 = 16;

/// Plot scaling parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PlotConfig {
    /// Value drawn on the bottom edge
    pub baseline: i32,
    /// Accumulator units per pixel row (must be non-zero)
    pub v_scale: i32,
    /// Highest row the plot may use
    pub top: u16,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            baseline: BASELINE,
            v_scale: V_SCALE,
            top: PLOT_TOP,
        }
    }
}

/// Flicker stimulus parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlickerConfig {
    /// On-time after each trigger in milliseconds
    pub duration_ms: u32,
    /// Intensity while on
    pub intensity: u8,
}

impl Default for FlickerConfig {
    fn default() -> Self {
        Self {
            duration_ms: FLICKER_MS,
            intensity: FLICKER_INTENSITY,
        }
    }
}
