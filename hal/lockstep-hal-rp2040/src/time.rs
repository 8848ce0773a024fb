//! embassy-time clock

use embassy_time::Instant;
use lockstep_hal::Clock;

/// Milliseconds since boot from the embassy time driver
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u32 {
        // Truncation gives the documented wrap at u32::MAX
        Instant::now().as_millis() as u32
    }
}
