//! Cycle buffer
//!
//! A fixed ring of accumulators indexed by position within the stimulus
//! cycle. Each slot sums every sample that arrived at that position since
//! the buffer was last drained.

use crate::config::CYCLE_LEN;

/// Scale an accumulated slot for transmission
///
/// Divides by 8 rounding to nearest: bias by 4, then arithmetic shift.
/// Negative values round toward negative infinity after the bias, which
/// differs from `(v + 4) / 8` for negatives.
#[inline]
pub fn round_for_report(value: i32) -> i32 {
    // Widened so the bias cannot overflow near i32::MAX
    ((i64::from(value) + 4) >> 3) as i32
}

/// Fixed-capacity accumulator ring with a wrapping cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleBuffer {
    slots: [i32; CYCLE_LEN],
    cursor: usize,
}

impl Default for CycleBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl CycleBuffer {
    /// Create an empty buffer with the cursor at slot 0
    pub const fn new() -> Self {
        Self {
            slots: [0; CYCLE_LEN],
            cursor: 0,
        }
    }

    /// Add a sample at the cursor and advance it
    ///
    /// Returns `true` when the cursor wrapped from the last slot back to 0.
    pub fn push(&mut self, sample: i32) -> bool {
        debug_assert!(self.cursor < CYCLE_LEN);
        let slot = &mut self.slots[self.cursor];
        *slot = slot.saturating_add(sample);
        self.cursor = (self.cursor + 1) % CYCLE_LEN;
        self.cursor == 0
    }

    /// Slot the next sample will land in
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Accumulated value of a slot
    pub fn get(&self, index: usize) -> Option<i32> {
        self.slots.get(index).copied()
    }

    /// All slots in cycle order
    pub fn slots(&self) -> &[i32; CYCLE_LEN] {
        &self.slots
    }

    /// Iterate over slots in cycle order
    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.slots.iter().copied()
    }

    /// True when every slot is zero
    pub fn is_clear(&self) -> bool {
        self.slots.iter().all(|&v| v == 0)
    }

    /// Read and zero each slot in order
    ///
    /// Slots are cleared as they are yielded, so a consumer that stops
    /// early leaves the remaining slots intact. The cursor is untouched.
    pub fn drain(&mut self) -> Drain<'_> {
        Drain {
            slots: &mut self.slots,
            index: 0,
        }
    }
}

/// Draining iterator returned by [`CycleBuffer::drain`]
pub struct Drain<'a> {
    slots: &'a mut [i32; CYCLE_LEN],
    index: usize,
}

impl Iterator for Drain<'_> {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        let slot = self.slots.get_mut(self.index)?;
        self.index += 1;
        Some(core::mem::take(slot))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = CYCLE_LEN - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Drain<'_> {}
