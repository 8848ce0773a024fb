//! Byte-at-a-time ThinkGear packet decoder.
//!
//! Frame format:
//! - SYNC SYNC (2 bytes): 0xAA 0xAA
//! - PLENGTH (1 byte): payload length (0-169)
//! - PAYLOAD (0-169 bytes): data rows
//! - CHECKSUM (1 byte): one's complement of the low byte of the payload sum
//!
//! Bad bytes never reach the caller. The decoder drops the frame in progress
//! and waits for the next sync pair.

use heapless::Vec;

use crate::packet::{code, EegPower, SensorPacket, EXCODE, MAX_PAYLOAD_LEN, SYNC};

/// Reasons a frame was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// PLENGTH above the protocol maximum
    InvalidLength,
    /// Checksum mismatch
    InvalidChecksum,
    /// A data row ran past the end of the payload
    TruncatedRow,
    /// A known row carried a value of the wrong size
    InvalidRow,
}

/// Receiver of completed packets
///
/// Called synchronously from [`PacketDecoder::process_byte`], once per valid
/// packet, before that call returns.
pub trait PacketSink {
    /// Handle a freshly decoded packet
    fn on_packet(&mut self, packet: &SensorPacket);
}

impl<T: PacketSink + ?Sized> PacketSink for &mut T {
    fn on_packet(&mut self, packet: &SensorPacket) {
        (**self).on_packet(packet);
    }
}

/// Running counters for link diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecoderStats {
    /// Packets delivered to the sink
    pub packets: u32,
    /// Frames dropped on checksum mismatch
    pub checksum_errors: u32,
    /// Frames dropped for bad length or malformed rows
    pub format_errors: u32,
}

impl DecoderStats {
    fn record(&mut self, error: DecodeError) {
        match error {
            DecodeError::InvalidChecksum => {
                self.checksum_errors = self.checksum_errors.wrapping_add(1)
            }
            DecodeError::InvalidLength | DecodeError::TruncatedRow | DecodeError::InvalidRow => {
                self.format_errors = self.format_errors.wrapping_add(1)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Waiting for the first SYNC byte
    WaitingForSync,
    /// Got one SYNC, waiting for the second
    WaitingForSecondSync,
    /// Got SYNC SYNC, waiting for PLENGTH
    WaitingForLength,
    /// Reading payload bytes
    ReadingPayload,
    /// Waiting for CHECKSUM
    WaitingForChecksum,
}

/// State machine for decoding the headset stream
#[derive(Debug, Clone)]
pub struct PacketDecoder {
    state: ParseState,
    buffer: Vec<u8, MAX_PAYLOAD_LEN>,
    expected_length: u8,
    packet: SensorPacket,
    stats: DecoderStats,
}

impl Default for PacketDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PacketDecoder {
    /// Create a new decoder with all fields zeroed
    pub fn new() -> Self {
        Self {
            state: ParseState::WaitingForSync,
            buffer: Vec::new(),
            expected_length: 0,
            packet: SensorPacket::default(),
            stats: DecoderStats::default(),
        }
    }

    /// Drop any frame in progress
    ///
    /// Last-known field values and statistics are kept.
    pub fn reset(&mut self) {
        self.state = ParseState::WaitingForSync;
        self.buffer.clear();
        self.expected_length = 0;
    }

    /// Advance the decoder by one byte
    ///
    /// When the byte completes a valid packet the sink is invoked exactly
    /// once before this returns. Errors are absorbed into [`DecoderStats`].
    pub fn process_byte<S: PacketSink + ?Sized>(&mut self, byte: u8, sink: &mut S) {
        match self.feed(byte) {
            Ok(Some(packet)) => {
                self.stats.packets = self.stats.packets.wrapping_add(1);
                sink.on_packet(&packet);
            }
            Ok(None) => {}
            Err(e) => self.stats.record(e),
        }
    }

    /// Feed a single byte to the decoder
    ///
    /// Returns `Ok(Some(packet))` when a complete valid packet was decoded,
    /// `Ok(None)` when more bytes are needed, or `Err` when the frame in
    /// progress was dropped.
    pub fn feed(&mut self, byte: u8) -> Result<Option<SensorPacket>, DecodeError> {
        match self.state {
            ParseState::WaitingForSync => {
                if byte == SYNC {
                    self.state = ParseState::WaitingForSecondSync;
                }
                // Silently ignore non-SYNC bytes while hunting
                Ok(None)
            }
            ParseState::WaitingForSecondSync => {
                self.state = if byte == SYNC {
                    ParseState::WaitingForLength
                } else {
                    ParseState::WaitingForSync
                };
                Ok(None)
            }
            ParseState::WaitingForLength => {
                if byte == SYNC {
                    // Extra sync bytes are legal padding
                    return Ok(None);
                }
                if byte as usize > MAX_PAYLOAD_LEN {
                    self.reset();
                    return Err(DecodeError::InvalidLength);
                }
                self.expected_length = byte;
                self.buffer.clear();
                self.state = if byte == 0 {
                    ParseState::WaitingForChecksum
                } else {
                    ParseState::ReadingPayload
                };
                Ok(None)
            }
            ParseState::ReadingPayload => {
                // Cannot fail: PLENGTH was bounded by the buffer capacity
                let _ = self.buffer.push(byte);
                if self.buffer.len() == self.expected_length as usize {
                    self.state = ParseState::WaitingForChecksum;
                }
                Ok(None)
            }
            ParseState::WaitingForChecksum => {
                let expected = checksum(&self.buffer);
                if byte != expected {
                    self.reset();
                    return Err(DecodeError::InvalidChecksum);
                }

                // Decode into a copy so a malformed row leaves the last-known
                // fields untouched
                let mut next = self.packet;
                next.raw_updated = false;
                let result = parse_payload(&self.buffer, &mut next);
                self.reset();
                result?;

                self.packet = next;
                Ok(Some(next))
            }
        }
    }

    /// Last decoded field set
    pub fn packet(&self) -> &SensorPacket {
        &self.packet
    }

    /// Last raw EEG sample
    pub fn raw_sample(&self) -> i16 {
        self.packet.raw_sample
    }

    /// Last attention level (0-100)
    pub fn attention(&self) -> u8 {
        self.packet.attention
    }

    /// Last meditation level (0-100)
    pub fn meditation(&self) -> u8 {
        self.packet.meditation
    }

    /// Last signal quality code (0 = good)
    pub fn quality(&self) -> u8 {
        self.packet.quality
    }

    /// Last blink strength
    pub fn blink_strength(&self) -> u8 {
        self.packet.blink_strength
    }

    /// Last EEG band power report
    pub fn eeg_power(&self) -> &EegPower {
        &self.packet.eeg_power
    }

    /// Link diagnostics
    pub fn stats(&self) -> &DecoderStats {
        &self.stats
    }
}

/// ThinkGear checksum: inverted low byte of the payload sum
pub fn checksum(payload: &[u8]) -> u8 {
    !payload.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}

/// Walk the data rows of a payload, updating `packet` in place
fn parse_payload(payload: &[u8], packet: &mut SensorPacket) -> Result<(), DecodeError> {
    let mut i = 0;
    while i < payload.len() {
        let mut excode_level = 0u8;
        while payload[i] == EXCODE {
            excode_level = excode_level.saturating_add(1);
            i += 1;
            if i >= payload.len() {
                return Err(DecodeError::TruncatedRow);
            }
        }

        let row_code = payload[i];
        i += 1;

        let len = if row_code >= 0x80 {
            let len = *payload.get(i).ok_or(DecodeError::TruncatedRow)? as usize;
            i += 1;
            len
        } else {
            1
        };

        let value = payload.get(i..i + len).ok_or(DecodeError::TruncatedRow)?;
        i += len;

        // Extended-code rows are not defined for this headset
        if excode_level == 0 {
            apply_row(row_code, value, packet)?;
        }
    }
    Ok(())
}

fn apply_row(row_code: u8, value: &[u8], packet: &mut SensorPacket) -> Result<(), DecodeError> {
    match row_code {
        code::POOR_SIGNAL => packet.quality = value[0],
        code::ATTENTION => packet.attention = value[0],
        code::MEDITATION => packet.meditation = value[0],
        code::BLINK_STRENGTH => packet.blink_strength = value[0],
        code::RAW_WAVE => {
            let bytes: [u8; 2] = value.try_into().map_err(|_| DecodeError::InvalidRow)?;
            packet.raw_sample = i16::from_be_bytes(bytes);
            packet.raw_updated = true;
        }
        code::ASIC_EEG_POWER => {
            packet.eeg_power = EegPower::from_bytes(value).ok_or(DecodeError::InvalidRow)?;
        }
        // Unknown rows were already skipped by length
        _ => {}
    }
    Ok(())
}
