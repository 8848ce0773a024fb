//! Sample aggregator
//!
//! Folds the raw sample stream into the cycle buffer and keeps the report
//! cadence. Phase is defined purely by sample count, so the flicker, the
//! buffer slots and the reports all stay aligned without timestamps.

use lockstep_protocol::{PacketSink, SensorPacket};

use crate::config::REPS_PER_REPORT;
use crate::cycle::CycleBuffer;

/// Outcome of accumulating one sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleEvent {
    /// Sample stored, still inside the cycle
    Accumulated,
    /// Sample completed a cycle; position is back at 0
    Wrapped,
    /// Sample completed the cycle that made a report due
    ReportReady,
}

impl CycleEvent {
    /// True if the cycle boundary was crossed
    pub fn is_wrap(&self) -> bool {
        matches!(self, CycleEvent::Wrapped | CycleEvent::ReportReady)
    }
}

/// Cycle accumulator with report cadence
#[derive(Debug, Clone)]
pub struct SampleAggregator {
    buffer: CycleBuffer,
    /// Completed cycles since the last report
    rep_count: u8,
    /// Cycles per report
    reps_per_report: u8,
    /// A report is waiting to be consumed
    report_ready: bool,
    /// Total samples accumulated
    samples: u32,
}

impl Default for SampleAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleAggregator {
    /// Create an aggregator reporting every `REPS_PER_REPORT` cycles
    pub fn new() -> Self {
        Self::with_reps(REPS_PER_REPORT)
    }

    /// Create an aggregator with a custom cadence (at least one cycle)
    pub fn with_reps(reps_per_report: u8) -> Self {
        Self {
            buffer: CycleBuffer::new(),
            rep_count: 0,
            reps_per_report: reps_per_report.max(1),
            report_ready: false,
            samples: 0,
        }
    }

    /// Add one raw sample at the current cycle position
    pub fn accumulate(&mut self, sample: i16) -> CycleEvent {
        self.samples = self.samples.wrapping_add(1);

        if !self.buffer.push(i32::from(sample)) {
            return CycleEvent::Accumulated;
        }

        self.rep_count += 1;
        if self.rep_count >= self.reps_per_report {
            self.rep_count = 0;
            self.report_ready = true;
            CycleEvent::ReportReady
        } else {
            CycleEvent::Wrapped
        }
    }

    /// Accumulate the raw sample of a decoded packet, if it carried one
    ///
    /// Summary-only packets repeat the previous raw value and are skipped.
    pub fn ingest(&mut self, packet: &SensorPacket) -> Option<CycleEvent> {
        packet
            .raw_updated
            .then(|| self.accumulate(packet.raw_sample))
    }

    /// Hand out the buffer for reporting, if a report is due
    ///
    /// The consumer is expected to drain the buffer while reading it.
    pub fn take_report(&mut self) -> Option<&mut CycleBuffer> {
        if self.report_ready {
            self.report_ready = false;
            Some(&mut self.buffer)
        } else {
            None
        }
    }

    /// A report is waiting
    pub fn is_report_ready(&self) -> bool {
        self.report_ready
    }

    /// Current position within the cycle (0..CYCLE_LEN)
    pub fn position(&self) -> usize {
        self.buffer.position()
    }

    /// Completed cycles since the last report
    pub fn rep_count(&self) -> u8 {
        self.rep_count
    }

    /// Total samples accumulated since start
    pub fn samples(&self) -> u32 {
        self.samples
    }

    /// Read-only view of the accumulators
    pub fn buffer(&self) -> &CycleBuffer {
        &self.buffer
    }
}

/// Lets the aggregator hang directly off a decoder when no per-packet
/// fan-out is needed; the report cadence is read back with
/// [`SampleAggregator::is_report_ready`].
impl PacketSink for SampleAggregator {
    fn on_packet(&mut self, packet: &SensorPacket) {
        self.ingest(packet);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CYCLE_LEN;
    use lockstep_protocol::{PacketBuilder, PacketDecoder};

    fn raw_packet(sample: i16) -> SensorPacket {
        SensorPacket {
            raw_sample: sample,
            raw_updated: true,
            ..SensorPacket::default()
        }
    }

    #[test]
    fn test_position_wraps_at_cycle_len() {
        let mut agg = SampleAggregator::new();
        for i in 0..CYCLE_LEN - 1 {
            assert_eq!(agg.accumulate(1), CycleEvent::Accumulated);
            assert_eq!(agg.position(), i + 1);
        }
        assert_eq!(agg.accumulate(1), CycleEvent::Wrapped);
        assert_eq!(agg.position(), 0);
        assert_eq!(agg.rep_count(), 1);
    }

    #[test]
    fn test_rep_count_once_per_wrap() {
        let mut agg = SampleAggregator::new();
        let mut wraps = 0u32;
        for _ in 0..CYCLE_LEN * 10 {
            if agg.accumulate(0).is_wrap() {
                wraps += 1;
            }
        }
        assert_eq!(wraps, 10);
        assert_eq!(agg.rep_count(), 10);
    }

    #[test]
    fn test_report_every_32_cycles() {
        let mut agg = SampleAggregator::new();
        let mut reports = 0;
        for n in 1..=(CYCLE_LEN * REPS_PER_REPORT as usize * 3) {
            if agg.accumulate(1) == CycleEvent::ReportReady {
                reports += 1;
                assert_eq!(n % (CYCLE_LEN * REPS_PER_REPORT as usize), 0);
                assert_eq!(agg.rep_count(), 0);
                let buffer = agg.take_report().unwrap();
                buffer.drain().for_each(drop);
            }
        }
        assert_eq!(reports, 3);
    }

    #[test]
    fn test_take_report_is_one_shot() {
        let mut agg = SampleAggregator::with_reps(1);
        for _ in 0..CYCLE_LEN {
            agg.accumulate(3);
        }
        assert!(agg.is_report_ready());
        assert!(agg.take_report().is_some());
        assert!(agg.take_report().is_none());
        assert!(!agg.is_report_ready());
    }

    #[test]
    fn test_constant_input_sums_per_slot() {
        let mut agg = SampleAggregator::new();
        for _ in 0..CYCLE_LEN * REPS_PER_REPORT as usize {
            agg.accumulate(80);
        }
        let buffer = agg.take_report().unwrap();
        assert!(buffer.iter().all(|v| v == 2560));
        buffer.drain().for_each(drop);
        assert!(agg.buffer().is_clear());
    }

    #[test]
    fn test_summary_packets_not_accumulated() {
        let mut agg = SampleAggregator::new();
        let summary = SensorPacket {
            raw_sample: 500,
            raw_updated: false,
            ..SensorPacket::default()
        };
        assert_eq!(agg.ingest(&summary), None);
        assert_eq!(agg.samples(), 0);

        agg.on_packet(&raw_packet(42));
        assert_eq!(agg.samples(), 1);
        assert_eq!(agg.buffer().get(0), Some(42));
    }

    #[test]
    fn test_decoder_feeds_aggregator_as_sink() {
        let mut decoder = PacketDecoder::new();
        let mut agg = SampleAggregator::with_reps(1);

        let summary = PacketBuilder::new().quality(0).attention(10).encode().unwrap();
        for &b in summary.iter() {
            decoder.process_byte(b, &mut agg);
        }
        assert_eq!(agg.samples(), 0);

        let raw = PacketBuilder::new().raw(-8).encode().unwrap();
        for _ in 0..CYCLE_LEN {
            for &b in raw.iter() {
                decoder.process_byte(b, &mut agg);
            }
        }

        assert_eq!(agg.samples(), CYCLE_LEN as u32);
        assert!(agg.is_report_ready());
        let buffer = agg.take_report().unwrap();
        assert!(buffer.iter().all(|v| v == -8));
    }

    #[test]
    fn test_zero_cadence_clamped() {
        let mut agg = SampleAggregator::with_reps(0);
        for _ in 0..CYCLE_LEN - 1 {
            agg.accumulate(0);
        }
        assert_eq!(agg.accumulate(0), CycleEvent::ReportReady);
    }
}
