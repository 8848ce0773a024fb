//! Host serial link
//!
//! Adapts a blocking UART transmitter to `core::fmt::Write` so reports can
//! be formatted straight onto the wire without an intermediate buffer.

use core::fmt;

use lockstep_hal::UartTx;

/// Text sink over a UART transmitter
pub struct HostLink<T> {
    tx: T,
    /// Bytes written since start
    written: u32,
    /// Failed writes since start
    errors: u32,
}

impl<T: UartTx> HostLink<T> {
    /// Wrap a transmitter
    pub fn new(tx: T) -> Self {
        Self {
            tx,
            written: 0,
            errors: 0,
        }
    }

    /// Wait for queued bytes to leave the UART
    pub fn flush(&mut self) -> Result<(), T::Error> {
        self.tx.flush()
    }

    /// Bytes successfully queued
    pub fn written(&self) -> u32 {
        self.written
    }

    /// Write failures seen
    pub fn errors(&self) -> u32 {
        self.errors
    }
}

impl<T: UartTx> fmt::Write for HostLink<T> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        match self.tx.write_blocking(s.as_bytes()) {
            Ok(()) => {
                self.written = self.written.wrapping_add(s.len() as u32);
                Ok(())
            }
            Err(_) => {
                self.errors = self.errors.wrapping_add(1);
                Err(fmt::Error)
            }
        }
    }
}
