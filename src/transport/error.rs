//! Transport-specific error types.

use thiserror::Error;

/// Errors that can occur on the serial transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The specified serial device was not found on the system.
    #[error("Serial device not found: {0}")]
    NotFound(String),

    /// An I/O error occurred during a read or write.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Port configuration was rejected.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A serialport-specific error occurred.
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),
}

impl TransportError {
    /// Create a NotFound error from a device path.
    pub fn not_found(device: impl Into<String>) -> Self {
        Self::NotFound(device.into())
    }

    /// Create a Config error from a message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether this error is a bounded read elapsing with no data, as
    /// opposed to a real transport failure. The read loop polls through
    /// these; everything else aborts the operation.
    pub fn is_empty_poll(&self) -> bool {
        matches!(
            self,
            Self::Io(e) if matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut
                    | std::io::ErrorKind::WouldBlock
                    | std::io::ErrorKind::Interrupted
            )
        )
    }
}
