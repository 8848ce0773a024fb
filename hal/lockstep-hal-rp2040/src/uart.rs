//! UART adapters
//!
//! The headset is read through the receive half of a buffered UART so
//! bytes arriving between polls are queued by the interrupt handler. The
//! host link is written with blocking writes.
//!
//! RP2040 has two UART peripherals (UART0 and UART1) with fixed pin
//! options; [`gpio_to_uart`] lets the board wiring be checked at compile
//! time.

use embassy_rp::uart;
use embedded_io::{Read, ReadReady, Write};
use lockstep_hal::uart::{DataBits, Parity, StopBits, UartConfig};
use lockstep_hal::{UartRx, UartTx};

/// UART peripheral identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartId {
    Uart0,
    Uart1,
}

/// Determine which UART can use a given GPIO pin
pub const fn gpio_to_uart(gpio: u8) -> Option<UartId> {
    // UART0: GPIO 0/1, 12/13, 16/17, 28/29
    // UART1: GPIO 4/5, 8/9, 20/21, 24/25
    match gpio {
        0 | 1 | 12 | 13 | 16 | 17 | 28 | 29 => Some(UartId::Uart0),
        4 | 5 | 8 | 9 | 20 | 21 | 24 | 25 => Some(UartId::Uart1),
        _ => None,
    }
}

/// Pin carries the TX function of its UART
pub const fn is_tx_pin(gpio: u8) -> bool {
    gpio % 4 == 0
}

/// Pin carries the RX function of its UART
pub const fn is_rx_pin(gpio: u8) -> bool {
    gpio % 4 == 1
}

/// Translate a link configuration into embassy-rp's UART config
pub fn to_rp_config(config: &UartConfig) -> uart::Config {
    let mut rp = uart::Config::default();
    rp.baudrate = config.baudrate;
    rp.data_bits = match config.data_bits {
        DataBits::Seven => uart::DataBits::DataBits7,
        DataBits::Eight => uart::DataBits::DataBits8,
    };
    rp.parity = match config.parity {
        Parity::None => uart::Parity::ParityNone,
        Parity::Even => uart::Parity::ParityEven,
        Parity::Odd => uart::Parity::ParityOdd,
    };
    rp.stop_bits = match config.stop_bits {
        StopBits::One => uart::StopBits::STOP1,
        StopBits::Two => uart::StopBits::STOP2,
    };
    rp
}

/// Non-blocking byte reader over an embedded-io receiver
pub struct IoRx<R> {
    rx: R,
}

impl<R: Read + ReadReady> IoRx<R> {
    /// Wrap a receiver
    pub fn new(rx: R) -> Self {
        Self { rx }
    }
}

impl<R: Read + ReadReady> UartRx for IoRx<R> {
    type Error = R::Error;

    fn try_read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        if !self.rx.read_ready()? {
            return Ok(None);
        }
        let mut byte = [0u8; 1];
        match self.rx.read(&mut byte)? {
            0 => Ok(None),
            _ => Ok(Some(byte[0])),
        }
    }
}

/// Blocking writer over an embedded-io transmitter
pub struct IoTx<W> {
    tx: W,
}

impl<W: Write> IoTx<W> {
    /// Wrap a transmitter
    pub fn new(tx: W) -> Self {
        Self { tx }
    }
}

impl<W: Write> UartTx for IoTx<W> {
    type Error = W::Error;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.tx.write_all(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.tx.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpio_to_uart() {
        assert_eq!(gpio_to_uart(0), Some(UartId::Uart0));
        assert_eq!(gpio_to_uart(5), Some(UartId::Uart1));
        assert_eq!(gpio_to_uart(2), None);
    }

    #[test]
    fn test_pin_functions() {
        assert!(is_tx_pin(0) && is_rx_pin(1));
        assert!(is_tx_pin(4) && is_rx_pin(5));
        assert!(!is_tx_pin(5));
    }
}
