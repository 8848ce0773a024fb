//! Wall-clock time source
//!
//! Timestamps are milliseconds since boot, wrapping at `u32::MAX`
//! (about 49 days). Consumers compare them with `wrapping_sub`.

/// Monotonic millisecond clock
pub trait Clock {
    /// Milliseconds since boot, wrapping
    fn now_ms(&self) -> u32;
}
