//! Transport abstraction layer for the modem's serial link.
//!
//! Provides the `Transport` trait plus a real `serialport`-backed
//! implementation and a scriptable mock, enabling dependency injection
//! and hardware-free testing.

pub mod error;
pub mod mock;
pub mod serial;
pub mod traits;

pub use error::TransportError;
pub use mock::MockTransport;
pub use serial::SerialTransport;
pub use traits::{PortSettings, Transport};
