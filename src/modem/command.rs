//! Command execution over the transport.

use super::response::{self, Response};
use crate::transport::{Transport, TransportError};
use std::time::Duration;
use tracing::debug;

/// Line terminator appended to every command.
const COMMAND_TERMINATOR: &str = "\r";

/// Write `command` plus the line terminator, then collect the modem's
/// response under `timeout`.
///
/// Exactly one write and one collection per call. A write failure is
/// surfaced to the caller without retry.
pub fn execute(
    port: &mut dyn Transport,
    command: &str,
    timeout: Duration,
) -> Result<Response, TransportError> {
    debug!("Issuing command: {}", command);

    let mut line = String::with_capacity(command.len() + COMMAND_TERMINATOR.len());
    line.push_str(command);
    line.push_str(COMMAND_TERMINATOR);
    port.write_bytes(line.as_bytes())?;

    response::collect(port, timeout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;

    #[test]
    fn test_terminator_appended() {
        let mut port = MockTransport::new("MOCK0");
        port.enqueue_read(b"OK\r\n");

        execute(&mut port, "AT+CMGF=1", Duration::from_secs(1)).unwrap();

        assert_eq!(port.write_log(), vec![b"AT+CMGF=1\r".to_vec()]);
    }

    #[test]
    fn test_response_returned() {
        let mut port = MockTransport::new("MOCK0");
        port.enqueue_read(b"\r\nOK\r\n");

        let response = execute(&mut port, "AT", Duration::from_secs(1)).unwrap();
        assert_eq!(response.text(), "\r\nOK\r\n");
    }

    #[test]
    fn test_write_failure_propagates_without_read() {
        let mut port = MockTransport::new("MOCK0");
        port.fail_write_at(0);
        port.enqueue_read(b"OK\r\n");

        let result = execute(&mut port, "AT", Duration::from_secs(1));
        assert!(result.is_err());
        // The response collector never ran.
        assert_eq!(port.remaining_reads(), 1);
    }
}
