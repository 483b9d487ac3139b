//! Core trait for the modem transport.
//!
//! Defines the `Transport` trait that allows both the real serial port and
//! a mock implementation to be used interchangeably by the AT engine.

use super::error::TransportError;
use std::time::Duration;

/// Settings applied when opening the serial device.
///
/// The modem link is fixed 8-N-1 with no flow control, so only the baud
/// rate and the per-read ceiling are configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortSettings {
    /// Baud rate (bits per second).
    pub baud_rate: u32,

    /// Upper bound on how long a single read may block.
    ///
    /// Response collection polls the transport in a deadline loop; a
    /// bounded per-read window keeps each iteration short so deadlines
    /// are honored to within one poll.
    pub read_timeout: Duration,
}

impl Default for PortSettings {
    fn default() -> Self {
        Self {
            baud_rate: 115_200,
            read_timeout: Duration::from_millis(100),
        }
    }
}

/// Trait for duplex byte-stream I/O with the modem.
///
/// Read contract:
/// - `Ok(n)` with `n > 0`: data was received.
/// - `Ok(0)`: clean end-of-stream.
/// - `Err(e)` where `e.is_empty_poll()`: the bounded read window elapsed
///   with nothing to deliver; the caller may retry.
/// - any other error: transport failure.
pub trait Transport: Send + std::fmt::Debug {
    /// Write bytes to the modem.
    ///
    /// Returns the number of bytes actually written.
    fn write_bytes(&mut self, data: &[u8]) -> Result<usize, TransportError>;

    /// Read bytes from the modem into the provided buffer.
    ///
    /// Returns the number of bytes actually read.
    fn read_bytes(&mut self, buffer: &mut [u8]) -> Result<usize, TransportError>;

    /// Get the device path/name of this transport.
    fn name(&self) -> &str;
}
