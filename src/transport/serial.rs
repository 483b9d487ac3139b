//! Real serial transport implementation.
//!
//! Wraps the `serialport` crate behind the `Transport` trait for
//! dependency injection and testing.

use super::error::TransportError;
use super::traits::{PortSettings, Transport};
use std::io::{Read, Write};

/// Serial transport wrapping `serialport::SerialPort`.
///
/// Opens with 8 data bits, no parity, one stop bit, no flow control (the
/// `serialport` defaults), which is what cellular modem UARTs expect.
pub struct SerialTransport {
    /// The underlying serial port implementation.
    port: Box<dyn serialport::SerialPort>,
    /// The device path for identification.
    name: String,
}

impl SerialTransport {
    /// Open the serial device with the given settings.
    ///
    /// # Example
    /// ```no_run
    /// use sms_gateway::transport::{PortSettings, SerialTransport};
    ///
    /// let port = SerialTransport::open("/dev/mhi_DUN", PortSettings::default())?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn open(device: &str, settings: PortSettings) -> Result<Self, TransportError> {
        let port = serialport::new(device, settings.baud_rate)
            .timeout(settings.read_timeout)
            .open()
            .map_err(|e| match e.kind() {
                serialport::ErrorKind::NoDevice => TransportError::not_found(device),
                serialport::ErrorKind::InvalidInput => TransportError::config(e.to_string()),
                _ => TransportError::Serial(e),
            })?;

        Ok(Self {
            port,
            name: device.to_string(),
        })
    }
}

impl Transport for SerialTransport {
    fn write_bytes(&mut self, data: &[u8]) -> Result<usize, TransportError> {
        self.port.write(data).map_err(TransportError::Io)
    }

    fn read_bytes(&mut self, buffer: &mut [u8]) -> Result<usize, TransportError> {
        self.port.read(buffer).map_err(TransportError::Io)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for SerialTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialTransport")
            .field("name", &self.name)
            .field("baud_rate", &self.port.baud_rate())
            .finish()
    }
}
