//! ThinkGear packet constants and the decoded field set.
//!
//! Payload layout is a sequence of data rows:
//! - EXCODE (0..n bytes): 0x55 extended-code level markers
//! - CODE (1 byte): row type
//! - VLENGTH (1 byte): present only for CODE >= 0x80
//! - VALUE (1 or VLENGTH bytes)

/// Frame synchronization byte (sent twice)
pub const SYNC: u8 = 0xAA;

/// Extended-code level marker
pub const EXCODE: u8 = 0x55;

/// Largest legal PLENGTH; 170 would collide with SYNC
pub const MAX_PAYLOAD_LEN: usize = 169;

/// Maximum complete packet size (SYNC + SYNC + PLENGTH + PAYLOAD + CHECKSUM)
pub const MAX_PACKET_LEN: usize = 2 + 1 + MAX_PAYLOAD_LEN + 1;

/// Row codes understood by the decoder
pub mod code {
    /// Signal quality, 0 = good contact, 200 = off-head
    pub const POOR_SIGNAL: u8 = 0x02;
    /// eSense attention, 0-100
    pub const ATTENTION: u8 = 0x04;
    /// eSense meditation, 0-100
    pub const MEDITATION: u8 = 0x05;
    /// Blink strength, 1-255
    pub const BLINK_STRENGTH: u8 = 0x16;
    /// Raw wave sample, 2 bytes big-endian signed
    pub const RAW_WAVE: u8 = 0x80;
    /// ASIC EEG band powers, 8 x 3 bytes big-endian unsigned
    pub const ASIC_EEG_POWER: u8 = 0x83;
}

/// Length of the ASIC EEG power row value
pub const EEG_POWER_LEN: usize = 24;

/// Relative EEG band powers from the headset ASIC
///
/// Values are unitless 24-bit magnitudes, only meaningful relative to each
/// other and over time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EegPower {
    pub delta: u32,
    pub theta: u32,
    pub low_alpha: u32,
    pub high_alpha: u32,
    pub low_beta: u32,
    pub high_beta: u32,
    pub low_gamma: u32,
    pub mid_gamma: u32,
}

impl EegPower {
    /// Parse the 24-byte ASIC_EEG_POWER value
    pub fn from_bytes(value: &[u8]) -> Option<Self> {
        if value.len() != EEG_POWER_LEN {
            return None;
        }
        let band = |i: usize| {
            let b = &value[i * 3..i * 3 + 3];
            (u32::from(b[0]) << 16) | (u32::from(b[1]) << 8) | u32::from(b[2])
        };
        Some(Self {
            delta: band(0),
            theta: band(1),
            low_alpha: band(2),
            high_alpha: band(3),
            low_beta: band(4),
            high_beta: band(5),
            low_gamma: band(6),
            mid_gamma: band(7),
        })
    }

    /// Bands in wire order
    pub fn bands(&self) -> [u32; 8] {
        [
            self.delta,
            self.theta,
            self.low_alpha,
            self.high_alpha,
            self.low_beta,
            self.high_beta,
            self.low_gamma,
            self.mid_gamma,
        ]
    }
}

/// Last-known field set of the headset
///
/// Each packet overwrites only the fields it carries; everything else keeps
/// its previous value. All fields read zero before the first packet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorPacket {
    /// Raw EEG sample, roughly -2048..=2047
    pub raw_sample: i16,
    /// eSense attention 0-100
    pub attention: u8,
    /// eSense meditation 0-100
    pub meditation: u8,
    /// Signal quality, 0 = good, larger = worse
    pub quality: u8,
    /// Strength of the last detected blink
    pub blink_strength: u8,
    /// Last ASIC band power report
    pub eeg_power: EegPower,
    /// Whether the most recent packet carried a raw sample
    pub raw_updated: bool,
}

impl SensorPacket {
    /// True when the headset reports good skin contact
    pub fn has_good_signal(&self) -> bool {
        self.quality == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eeg_power_parse() {
        let mut value = [0u8; EEG_POWER_LEN];
        value[0..3].copy_from_slice(&[0x01, 0x02, 0x03]);
        value[21..24].copy_from_slice(&[0xFF, 0xFF, 0xFF]);

        let power = EegPower::from_bytes(&value).unwrap();
        assert_eq!(power.delta, 0x010203);
        assert_eq!(power.mid_gamma, 0xFF_FFFF);
        assert_eq!(power.theta, 0);
    }

    #[test]
    fn test_eeg_power_bands_in_wire_order() {
        // Low byte of band n holds n + 1
        let mut value = [0u8; EEG_POWER_LEN];
        for band in 0..8 {
            value[band * 3 + 2] = band as u8 + 1;
        }
        let power = EegPower::from_bytes(&value).unwrap();
        assert_eq!(power.bands(), [1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_eeg_power_wrong_length() {
        assert_eq!(EegPower::from_bytes(&[0u8; 23]), None);
    }

    #[test]
    fn test_default_packet_is_zeroed() {
        let packet = SensorPacket::default();
        assert_eq!(packet.raw_sample, 0);
        assert_eq!(packet.quality, 0);
        assert!(!packet.raw_updated);
    }
}
