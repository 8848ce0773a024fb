//! Flicker stimulus and signal-quality indicator
//!
//! The flicker is switched on from the packet path at each cycle boundary
//! and switched off from the poll loop once its window has elapsed.

use lockstep_protocol::packet::SensorPacket;

use crate::config::FlickerConfig;
use crate::traits::{Indicator, StimulusOutput};

/// Millisecond delta tolerant of clock wraparound
#[inline]
fn elapsed_ms(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}

/// Phase-locked flicker driver
pub struct Flicker<S> {
    output: S,
    config: FlickerConfig,
    /// Trigger timestamp while the stimulus is on
    started_at: Option<u32>,
    /// Number of triggers since start
    triggers: u32,
}

impl<S: StimulusOutput> Flicker<S> {
    /// Create a flicker driver with the output forced off
    pub fn new(output: S, config: FlickerConfig) -> Self {
        let mut flicker = Self {
            output,
            config,
            started_at: None,
            triggers: 0,
        };
        flicker.output.off();
        flicker
    }

    /// Start a flash at `now_ms`
    ///
    /// A trigger while already on restarts the window.
    pub fn trigger(&mut self, now_ms: u32) {
        self.output.set_intensity(self.config.intensity);
        self.started_at = Some(now_ms);
        self.triggers = self.triggers.wrapping_add(1);
    }

    /// Turn the stimulus off once its window has elapsed
    ///
    /// Returns `true` if this call switched it off. A late poll simply
    /// leaves the stimulus on longer.
    pub fn poll(&mut self, now_ms: u32) -> bool {
        match self.started_at {
            Some(start) if elapsed_ms(now_ms, start) >= self.config.duration_ms => {
                self.output.off();
                self.started_at = None;
                true
            }
            _ => false,
        }
    }

    /// Stimulus currently on
    pub fn is_on(&self) -> bool {
        self.started_at.is_some()
    }

    /// Number of flashes triggered
    pub fn triggers(&self) -> u32 {
        self.triggers
    }

    /// Access the underlying output
    pub fn output(&self) -> &S {
        &self.output
    }
}

/// Good/bad signal LED
pub struct QualityIndicator<O> {
    output: O,
}

impl<O: Indicator> QualityIndicator<O> {
    /// Create an indicator showing bad signal until the first packet
    pub fn new(output: O) -> Self {
        let mut indicator = Self { output };
        indicator.output.set_good(false);
        indicator
    }

    /// Update from a quality code: good iff the code is zero
    pub fn update(&mut self, quality: u8) {
        self.output.set_good(quality == 0);
    }

    /// Update from a decoded packet
    pub fn update_from(&mut self, packet: &SensorPacket) {
        self.output.set_good(packet.has_good_signal());
    }

    /// Currently showing good signal
    pub fn is_good(&self) -> bool {
        self.output.is_good()
    }

    /// Access the underlying output
    pub fn output(&self) -> &O {
        &self.output
    }
}
