//! Output traits for the two LEDs

/// Binary signal-quality indicator
pub trait Indicator {
    /// Show good (`true`) or bad (`false`) signal
    fn set_good(&mut self, good: bool);

    /// Currently showing good signal
    fn is_good(&self) -> bool;
}

/// Visual stimulus source with controllable intensity
///
/// Implementations drive every colour channel to the same level.
pub trait StimulusOutput {
    /// Set intensity (0 = off, 255 = full)
    fn set_intensity(&mut self, level: u8);

    /// Turn the stimulus off
    fn off(&mut self) {
        self.set_intensity(0);
    }

    /// Current intensity
    fn intensity(&self) -> u8;
}
