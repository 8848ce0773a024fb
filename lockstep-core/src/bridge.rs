//! Bridge context
//!
//! Owns every piece of mutable state the firmware needs: decoder,
//! aggregator, both LEDs and the report clock. The poll loop calls
//! [`Bridge::feed_byte`] for each received byte and [`Bridge::poll`] once
//! per iteration. Packet handling runs synchronously inside `feed_byte`.

use core::fmt::{self, Write};

use lockstep_display::{DisplayError, PixelDisplay};
use lockstep_protocol::report::LINE_END;
use lockstep_protocol::{
    DecoderStats, PacketDecoder, PacketSink, ReportHeader, SensorPacket, ValueLine,
};

use crate::aggregator::SampleAggregator;
use crate::config::{FlickerConfig, PlotConfig};
use crate::cycle::{round_for_report, CycleBuffer};
use crate::render::Renderer;
use crate::stimulus::{Flicker, QualityIndicator};
use crate::traits::{Indicator, StimulusOutput};

/// Errors from the report pass
///
/// The buffer is drained regardless, so a failed report never leaks into
/// the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReportError {
    /// Drawing or flushing the display failed
    Display(DisplayError),
    /// Writing to the host link failed
    Host,
}

impl From<DisplayError> for ReportError {
    fn from(e: DisplayError) -> Self {
        ReportError::Display(e)
    }
}

impl From<fmt::Error> for ReportError {
    fn from(_: fmt::Error) -> Self {
        ReportError::Host
    }
}

/// What a completed report contained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReportSummary {
    /// Header fields sent to the host
    pub header: ReportHeader,
    /// Smallest transmitted value
    pub min: i32,
    /// Largest transmitted value
    pub max: i32,
    /// Reports sent since start, including this one
    pub sequence: u32,
}

/// Per-packet fan-out handed to the decoder as its sink
struct Dispatch<'a, Q, S> {
    aggregator: &'a mut SampleAggregator,
    quality: &'a mut QualityIndicator<Q>,
    flicker: &'a mut Flicker<S>,
    now_ms: u32,
}

impl<Q: Indicator, S: StimulusOutput> PacketSink for Dispatch<'_, Q, S> {
    fn on_packet(&mut self, packet: &SensorPacket) {
        self.quality.update_from(packet);
        if let Some(event) = self.aggregator.ingest(packet) {
            if event.is_wrap() {
                self.flicker.trigger(self.now_ms);
            }
        }
    }
}

/// Explicit context for the acquisition and report loop
pub struct Bridge<Q, S> {
    decoder: PacketDecoder,
    aggregator: SampleAggregator,
    quality: QualityIndicator<Q>,
    flicker: Flicker<S>,
    renderer: Renderer,
    last_report_ms: u32,
    reports: u32,
}

impl<Q: Indicator, S: StimulusOutput> Bridge<Q, S> {
    /// Create a bridge with the default compile-time configuration
    pub fn new(quality_led: Q, stimulus: S, now_ms: u32) -> Self {
        Self::with_config(
            quality_led,
            stimulus,
            PlotConfig::default(),
            FlickerConfig::default(),
            now_ms,
        )
    }

    /// Create a bridge with explicit plot and flicker settings
    pub fn with_config(
        quality_led: Q,
        stimulus: S,
        plot: PlotConfig,
        flicker: FlickerConfig,
        now_ms: u32,
    ) -> Self {
        Self {
            decoder: PacketDecoder::new(),
            aggregator: SampleAggregator::new(),
            quality: QualityIndicator::new(quality_led),
            flicker: Flicker::new(stimulus, flicker),
            renderer: Renderer::new(plot),
            last_report_ms: now_ms,
            reports: 0,
        }
    }

    /// Feed one byte from the headset link
    ///
    /// If it completes a packet, the quality LED, the aggregator and (on a
    /// cycle boundary) the flicker are all updated before this returns.
    pub fn feed_byte(&mut self, byte: u8, now_ms: u32) {
        let mut dispatch = Dispatch {
            aggregator: &mut self.aggregator,
            quality: &mut self.quality,
            flicker: &mut self.flicker,
            now_ms,
        };
        self.decoder.process_byte(byte, &mut dispatch);
    }

    /// Service timers and run a report if one is due
    ///
    /// Returns `Ok(Some(_))` after a report was sent, `Ok(None)` when none
    /// was due. On error the buffer has still been cleared.
    pub fn poll<D, W>(
        &mut self,
        now_ms: u32,
        display: &mut D,
        host: &mut W,
    ) -> Result<Option<ReportSummary>, ReportError>
    where
        D: PixelDisplay + ?Sized,
        W: Write + ?Sized,
    {
        self.flicker.poll(now_ms);

        let Some(buffer) = self.aggregator.take_report() else {
            return Ok(None);
        };

        let packet = self.decoder.packet();
        let header = ReportHeader {
            quality: packet.quality,
            attention: packet.attention,
            meditation: packet.meditation,
            interval_ms: now_ms.wrapping_sub(self.last_report_ms),
        };
        self.last_report_ms = now_ms;
        self.reports = self.reports.wrapping_add(1);

        stream_report(&self.renderer, buffer, header, self.reports, display, host).map(Some)
    }

    /// Last decoded headset fields
    pub fn packet(&self) -> &SensorPacket {
        self.decoder.packet()
    }

    /// Decoder link statistics
    pub fn decoder_stats(&self) -> &DecoderStats {
        self.decoder.stats()
    }

    /// Aggregation state
    pub fn aggregator(&self) -> &SampleAggregator {
        &self.aggregator
    }

    /// Flicker state
    pub fn flicker(&self) -> &Flicker<S> {
        &self.flicker
    }

    /// Quality LED state
    pub fn quality(&self) -> &QualityIndicator<Q> {
        &self.quality
    }

    /// Reports sent since start
    pub fn reports(&self) -> u32 {
        self.reports
    }
}

/// One pass over the buffer: stream, plot and clear every slot
///
/// Every slot is drained even after a failure; the first display error
/// wins over a host error.
fn stream_report<D, W>(
    renderer: &Renderer,
    buffer: &mut CycleBuffer,
    header: ReportHeader,
    sequence: u32,
    display: &mut D,
    host: &mut W,
) -> Result<ReportSummary, ReportError>
where
    D: PixelDisplay + ?Sized,
    W: Write + ?Sized,
{
    let status = header.to_line();

    let mut display_result = renderer.begin(display);
    let mut host_result = host
        .write_str(&status)
        .and_then(|_| host.write_str(LINE_END));

    let mut values = ValueLine::new(host);
    let mut min = i32::MAX;
    let mut max = i32::MIN;
    for (index, accumulated) in buffer.drain().enumerate() {
        if display_result.is_ok() {
            display_result = renderer.plot_sample(display, index, accumulated);
        }
        let value = round_for_report(accumulated);
        min = min.min(value);
        max = max.max(value);
        if host_result.is_ok() {
            host_result = values.push(value);
        }
    }
    if host_result.is_ok() {
        host_result = values.finish();
    }
    if display_result.is_ok() {
        display_result = renderer.finish(display, &status);
    }

    display_result?;
    host_result?;

    Ok(ReportSummary {
        header,
        min,
        max,
        sequence,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CYCLE_LEN, REPS_PER_REPORT};
    use crate::render::plot_y;
    use lockstep_display::{Framebuffer, HEIGHT};
    use lockstep_protocol::PacketBuilder;

    const SAMPLES_PER_REPORT: usize = CYCLE_LEN * REPS_PER_REPORT as usize;

    #[derive(Default)]
    struct MockRgb {
        level: u8,
    }

    impl StimulusOutput for MockRgb {
        fn set_intensity(&mut self, level: u8) {
            self.level = level;
        }

        fn intensity(&self) -> u8 {
            self.level
        }
    }

    #[derive(Default)]
    struct MockLed {
        good: bool,
        history: Vec<bool>,
    }

    impl Indicator for MockLed {
        fn set_good(&mut self, good: bool) {
            self.good = good;
            self.history.push(good);
        }

        fn is_good(&self) -> bool {
            self.good
        }
    }

    /// Host link that refuses every write
    struct BrokenLink;

    impl Write for BrokenLink {
        fn write_str(&mut self, _: &str) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    fn bridge() -> Bridge<MockLed, MockRgb> {
        Bridge::new(MockLed::default(), MockRgb::default(), 0)
    }

    fn feed_packet(bridge: &mut Bridge<MockLed, MockRgb>, builder: PacketBuilder, now_ms: u32) {
        for &b in builder.encode().unwrap().iter() {
            bridge.feed_byte(b, now_ms);
        }
    }

    fn feed_raw(bridge: &mut Bridge<MockLed, MockRgb>, sample: i16, now_ms: u32) {
        feed_packet(bridge, PacketBuilder::new().raw(sample), now_ms);
    }

    #[test]
    fn test_end_to_end_constant_input() {
        let mut bridge = bridge();
        let mut fb = Framebuffer::new();
        let mut host = String::new();
        let mut reports = Vec::new();

        feed_packet(
            &mut bridge,
            PacketBuilder::new().quality(0).attention(55).meditation(44),
            0,
        );

        for n in 0..SAMPLES_PER_REPORT {
            // 512 Hz is just under 2 ms per sample
            let now = (n as u32 * 2) + 2;
            feed_raw(&mut bridge, 80, now);
            if let Some(summary) = bridge.poll(now, &mut fb, &mut host).unwrap() {
                reports.push(summary);
            }
        }

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].min, 320);
        assert_eq!(reports[0].max, 320);
        assert_eq!(reports[0].header.attention, 55);
        assert_eq!(reports[0].header.interval_ms, 4096);
        assert!(bridge.aggregator().buffer().is_clear());

        let mut lines = host.split("\r\n");
        assert_eq!(lines.next(), Some("Q0 A55 M44 4096ms"));
        let values: Vec<i32> = lines
            .next()
            .unwrap()
            .split(',')
            .map(|v| v.parse().unwrap())
            .collect();
        assert_eq!(values.len(), CYCLE_LEN);
        assert!(values.iter().all(|&v| v == 320));
        assert_eq!(lines.next(), Some(""));
    }

    #[test]
    fn test_single_cycle_rounding_per_slot() {
        let mut bridge = bridge();
        let mut fb = Framebuffer::new();
        let mut host = String::new();

        // One cycle of 80 then 31 cycles of 0: each slot holds 80
        for n in 0..SAMPLES_PER_REPORT {
            let sample = if n < CYCLE_LEN { 80 } else { 0 };
            feed_raw(&mut bridge, sample, 0);
        }
        let summary = bridge.poll(0, &mut fb, &mut host).unwrap().unwrap();
        assert_eq!((summary.min, summary.max), (10, 10));
    }

    #[test]
    fn test_flicker_on_each_cycle_boundary() {
        let mut bridge = bridge();

        for _ in 0..CYCLE_LEN - 1 {
            feed_raw(&mut bridge, 1, 100);
        }
        assert!(!bridge.flicker().is_on());

        feed_raw(&mut bridge, 1, 100);
        assert!(bridge.flicker().is_on());
        assert_eq!(bridge.flicker().output().intensity(), 255);
        assert_eq!(bridge.aggregator().position(), 0);
        assert_eq!(bridge.aggregator().rep_count(), 1);

        let mut fb = Framebuffer::new();
        let mut host = String::new();
        bridge.poll(119, &mut fb, &mut host).unwrap();
        assert!(bridge.flicker().is_on());
        bridge.poll(120, &mut fb, &mut host).unwrap();
        assert!(!bridge.flicker().is_on());
        assert_eq!(bridge.flicker().output().intensity(), 0);
        assert!(host.is_empty());
    }

    #[test]
    fn test_quality_updates_per_packet() {
        let mut bridge = bridge();
        for q in [0u8, 5, 0] {
            feed_packet(&mut bridge, PacketBuilder::new().quality(q), 0);
        }
        assert_eq!(
            bridge.quality().output().history.as_slice(),
            &[false, true, false, true]
        );
        // No raw samples, so nothing accumulated
        assert_eq!(bridge.aggregator().samples(), 0);
    }

    #[test]
    fn test_corrupt_packet_ignored() {
        let mut bridge = bridge();
        let mut bytes = PacketBuilder::new().raw(1000).encode().unwrap();
        let last = bytes.len() - 1;
        bytes[last] = bytes[last].wrapping_add(1);
        for &b in bytes.iter() {
            bridge.feed_byte(b, 0);
        }
        assert_eq!(bridge.aggregator().samples(), 0);
        assert_eq!(bridge.decoder_stats().checksum_errors, 1);
    }

    #[test]
    fn test_report_renders_frame() {
        let mut bridge = bridge();
        let mut fb = Framebuffer::new();
        let mut host = String::new();
        for _ in 0..SAMPLES_PER_REPORT {
            feed_raw(&mut bridge, 0, 0);
        }
        bridge.poll(10, &mut fb, &mut host).unwrap().unwrap();
        // Zero plots on the bottom row of every column
        for x in 0..CYCLE_LEN as u16 {
            assert!(fb.pixel(x, 63));
        }
    }

    #[test]
    fn test_host_failure_still_clears_buffer() {
        let mut bridge = bridge();
        let mut fb = Framebuffer::new();
        for _ in 0..SAMPLES_PER_REPORT {
            feed_raw(&mut bridge, 12, 0);
        }
        let result = bridge.poll(0, &mut fb, &mut BrokenLink);
        assert_eq!(result, Err(ReportError::Host));
        assert!(bridge.aggregator().buffer().is_clear());
        assert!(!bridge.aggregator().is_report_ready());
        // The display still got its frame: 32 reps of 12 per slot
        let y = plot_y(12 * 32, HEIGHT as u16, &PlotConfig::default());
        assert_eq!(y, 55);
        assert!(fb.pixel(0, y));
        assert!(!fb.pixel(0, 63));
    }

    #[test]
    fn test_interval_measured_between_reports() {
        let mut bridge = bridge();
        let mut fb = Framebuffer::new();
        let mut host = String::new();

        let mut intervals = Vec::new();
        for report in 1..=2u32 {
            for _ in 0..SAMPLES_PER_REPORT {
                feed_raw(&mut bridge, 1, 0);
            }
            let summary = bridge
                .poll(report * 4000, &mut fb, &mut host)
                .unwrap()
                .unwrap();
            intervals.push(summary.header.interval_ms);
            assert_eq!(summary.sequence, report);
        }
        assert_eq!(intervals, [4000, 4000]);
    }
}
