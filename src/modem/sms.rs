//! SMS submission sequencing.
//!
//! Drives the text-mode submission exchange: mode-set, address line,
//! payload with the end-of-input byte, final status. Four linear steps,
//! no branching except on terminal failure, no retries.

use super::command;
use super::response;
use crate::transport::{Transport, TransportError};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Timeout for the text-mode acknowledgement.
pub const TEXT_MODE_TIMEOUT: Duration = Duration::from_secs(3);

/// Timeout for the final submission response. Generous because the modem
/// transmits over the air before acknowledging.
pub const SEND_RESPONSE_TIMEOUT: Duration = Duration::from_secs(10);

/// End-of-payload signal recognized by modem firmware (Ctrl+Z).
const PAYLOAD_TERMINATOR: u8 = 0x1A;

/// Errors from the SMS submission exchange, tagged by the step that
/// failed. Every failure is terminal; there is no partial-success state.
#[derive(Debug, Error)]
pub enum SmsError {
    /// The text-mode command could not be issued.
    #[error("error setting text mode: {0}")]
    SetTextMode(#[source] TransportError),

    /// The address line could not be written.
    #[error("error writing SMS address: {0}")]
    SubmitAddress(#[source] TransportError),

    /// The message body could not be written.
    #[error("error writing SMS payload: {0}")]
    SubmitPayload(#[source] TransportError),

    /// The final response could not be collected.
    #[error("error reading SMS send response: {0}")]
    ReadResponse(#[source] TransportError),

    /// The final response contained an ERROR marker.
    #[error("modem returned error sending SMS")]
    ModemReportedError,
}

/// Submit one SMS over the modem link.
///
/// The caller must hold exclusive access to the transport for the whole
/// exchange; the protocol has no transaction IDs, so interleaved
/// exchanges would corrupt each other.
pub fn send(port: &mut dyn Transport, phone: &str, message: &str) -> Result<(), SmsError> {
    info!("Sending SMS to {}", phone);

    // Firmwares vary their acknowledgement text here, so the response is
    // logged but OK is not required to proceed.
    let reply = command::execute(port, "AT+CMGF=1", TEXT_MODE_TIMEOUT)
        .map_err(SmsError::SetTextMode)?;
    debug!("Text mode response: {}", reply.text().trim());

    // The modem answers the address line with a payload prompt rather
    // than a status line; nothing is collected until the payload is in.
    let address = format!("AT+CMGS=\"{}\"\r", phone);
    port.write_bytes(address.as_bytes())
        .map_err(SmsError::SubmitAddress)?;

    // Body and end-of-input byte in a single write, no line terminator.
    let mut payload = Vec::with_capacity(message.len() + 1);
    payload.extend_from_slice(message.as_bytes());
    payload.push(PAYLOAD_TERMINATOR);
    port.write_bytes(&payload).map_err(SmsError::SubmitPayload)?;

    let reply = response::collect(port, SEND_RESPONSE_TIMEOUT).map_err(SmsError::ReadResponse)?;
    debug!("SMS send response: {}", reply.text().trim());

    // Absence of ERROR is the success signal. Firmwares are inconsistent
    // about emitting OK for this command, so its presence is not checked.
    if reply.is_error() {
        return Err(SmsError::ModemReportedError);
    }

    Ok(())
}
