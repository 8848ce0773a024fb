//! Serial links
//!
//! The headset stream is read one byte per poll without blocking; the host
//! link is written in blocking fashion from the report pass.

/// Byte sink toward the host
pub trait UartTx {
    type Error;

    /// Queue all of `data`, blocking while the FIFO is full
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Block until every queued byte has left the wire
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Byte source from the headset
pub trait UartRx {
    type Error;

    /// Take one byte from the receive queue if one is waiting
    ///
    /// Never blocks: returns `Ok(None)` when the queue is empty.
    fn try_read_byte(&mut self) -> Result<Option<u8>, Self::Error>;
}

/// Line settings for one serial link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    pub baudrate: u32,
    pub data_bits: DataBits,
    pub parity: Parity,
    pub stop_bits: StopBits,
}

impl UartConfig {
    /// ThinkGear headset link
    pub const HEADSET: Self = Self::new_8n1(57_600);

    /// Host diagnostic link
    pub const HOST: Self = Self::new_8n1(115_200);

    /// 8 data bits, no parity, one stop bit
    pub const fn new_8n1(baudrate: u32) -> Self {
        Self {
            baudrate,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }

    /// Time for one frame on the wire, in microseconds
    ///
    /// Start bit, data bits, optional parity bit, stop bits.
    pub const fn frame_time_us(&self) -> u32 {
        let data = match self.data_bits {
            DataBits::Seven => 7,
            DataBits::Eight => 8,
        };
        let parity = match self.parity {
            Parity::None => 0,
            Parity::Even | Parity::Odd => 1,
        };
        let stop = match self.stop_bits {
            StopBits::One => 1,
            StopBits::Two => 2,
        };
        (1 + data + parity + stop) * 1_000_000 / self.baudrate
    }
}

impl Default for UartConfig {
    fn default() -> Self {
        Self::HOST
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}
