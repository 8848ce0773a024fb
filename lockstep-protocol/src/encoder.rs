//! ThinkGear packet encoding.
//!
//! The firmware never transmits ThinkGear packets; this builder exists for
//! test fixtures and headset simulators that feed the decoder.

use heapless::Vec;

use crate::decoder::{checksum, DecodeError};
use crate::packet::{code, EEG_POWER_LEN, MAX_PACKET_LEN, MAX_PAYLOAD_LEN, SYNC};

/// Incremental builder for a single packet's data rows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PacketBuilder {
    payload: Vec<u8, MAX_PAYLOAD_LEN>,
    overflow: bool,
}

impl PacketBuilder {
    /// Start an empty packet
    pub fn new() -> Self {
        Self::default()
    }

    fn row(mut self, row: &[u8]) -> Self {
        if self.payload.extend_from_slice(row).is_err() {
            self.overflow = true;
        }
        self
    }

    /// Add a poor-signal row
    pub fn quality(self, quality: u8) -> Self {
        self.row(&[code::POOR_SIGNAL, quality])
    }

    /// Add an attention row
    pub fn attention(self, level: u8) -> Self {
        self.row(&[code::ATTENTION, level])
    }

    /// Add a meditation row
    pub fn meditation(self, level: u8) -> Self {
        self.row(&[code::MEDITATION, level])
    }

    /// Add a blink-strength row
    pub fn blink(self, strength: u8) -> Self {
        self.row(&[code::BLINK_STRENGTH, strength])
    }

    /// Add a raw-wave row
    pub fn raw(self, sample: i16) -> Self {
        let [hi, lo] = sample.to_be_bytes();
        self.row(&[code::RAW_WAVE, 2, hi, lo])
    }

    /// Add an ASIC EEG power row from its 24-byte wire value
    pub fn eeg_power(self, value: &[u8; EEG_POWER_LEN]) -> Self {
        self.row(&[code::ASIC_EEG_POWER, EEG_POWER_LEN as u8])
            .row(value)
    }

    /// Payload built so far
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Encode the complete packet into a byte buffer
    ///
    /// Returns the number of bytes written.
    pub fn encode_into(&self, buffer: &mut [u8]) -> Result<usize, DecodeError> {
        if self.overflow {
            return Err(DecodeError::InvalidLength);
        }
        let len = self.payload.len();
        let frame_len = 4 + len; // SYNC + SYNC + PLENGTH + payload + CHECKSUM
        if buffer.len() < frame_len {
            return Err(DecodeError::InvalidLength);
        }

        buffer[0] = SYNC;
        buffer[1] = SYNC;
        buffer[2] = len as u8;
        buffer[3..3 + len].copy_from_slice(&self.payload);
        buffer[3 + len] = checksum(&self.payload);

        Ok(frame_len)
    }

    /// Encode the complete packet into a heapless Vec
    pub fn encode(&self) -> Result<Vec<u8, MAX_PACKET_LEN>, DecodeError> {
        let mut buffer = [0u8; MAX_PACKET_LEN];
        let len = self.encode_into(&mut buffer)?;
        let mut vec = Vec::new();
        vec.extend_from_slice(&buffer[..len])
            .map_err(|_| DecodeError::InvalidLength)?;
        Ok(vec)
    }
}
