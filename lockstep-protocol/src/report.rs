//! Host report format.
//!
//! Each report is two text lines:
//!
//! ```text
//! Q<quality%> A<attention> M<meditation> <interval>ms\r\n
//! v0,v1,...,v63\r\n
//! ```
//!
//! The first line doubles as the OLED status line.

use core::fmt::{self, Write};

use heapless::String;

/// Line terminator used on the host link
pub const LINE_END: &str = "\r\n";

/// Capacity of a formatted header line
pub const HEADER_LEN: usize = 32;

/// Scale a 0-255 quality code to a percentage
pub fn quality_percent(quality: u8) -> u8 {
    (u16::from(quality) * 100 / 255) as u8
}

/// Summary fields printed at the head of each report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReportHeader {
    /// Raw quality code (0 = good)
    pub quality: u8,
    /// eSense attention
    pub attention: u8,
    /// eSense meditation
    pub meditation: u8,
    /// Milliseconds since the previous report
    pub interval_ms: u32,
}

impl ReportHeader {
    /// Render into a fixed-capacity string
    pub fn to_line(&self) -> String<HEADER_LEN> {
        let mut line = String::new();
        // Longest rendering is 27 chars, well inside the capacity
        let _ = write!(line, "{}", self);
        line
    }
}

impl fmt::Display for ReportHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Q{} A{} M{} {}ms",
            quality_percent(self.quality),
            self.attention,
            self.meditation,
            self.interval_ms
        )
    }
}

/// Streams comma-separated values to a writer, one at a time
pub struct ValueLine<'a, W: Write + ?Sized> {
    out: &'a mut W,
    count: usize,
}

impl<'a, W: Write + ?Sized> ValueLine<'a, W> {
    /// Start a new value line
    pub fn new(out: &'a mut W) -> Self {
        Self { out, count: 0 }
    }

    /// Append one value
    pub fn push(&mut self, value: i32) -> fmt::Result {
        if self.count > 0 {
            self.out.write_char(',')?;
        }
        self.count += 1;
        write!(self.out, "{}", value)
    }

    /// Number of values written so far
    pub fn count(&self) -> usize {
        self.count
    }

    /// Terminate the line
    pub fn finish(self) -> fmt::Result {
        self.out.write_str(LINE_END)
    }
}
