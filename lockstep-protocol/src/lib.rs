//! Lockstep wire formats
//!
//! Two streams cross the board boundary:
//!
//! - **Inbound**: the ThinkGear packet stream from the EEG headset. Every
//!   packet is framed as
//!   ```text
//!   ┌──────┬──────┬─────────┬──────────────┬──────────┐
//!   │ SYNC │ SYNC │ PLENGTH │ PAYLOAD      │ CHECKSUM │
//!   │ 0xAA │ 0xAA │ 1B      │ 0–169B       │ 1B       │
//!   └──────┴──────┴─────────┴──────────────┴──────────┘
//!   ```
//!   and decoded by [`PacketDecoder`] into the last-known [`SensorPacket`].
//! - **Outbound**: plain-text report lines for the host computer, built by
//!   the [`report`] module.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod decoder;
pub mod encoder;
pub mod packet;
pub mod report;

pub use decoder::{DecodeError, DecoderStats, PacketDecoder, PacketSink};
pub use encoder::PacketBuilder;
pub use packet::{EegPower, SensorPacket, MAX_PAYLOAD_LEN, SYNC};
pub use report::{ReportHeader, ValueLine};
