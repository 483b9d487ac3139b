//! End-to-end tests for the SMS submission flow.
//!
//! Drives the public API (`SmsService` over a `MockTransport`) through
//! the full AT exchange: mode-set, address line, payload, final status.
//! Wire-level assertions are bit-exact against the modem's expected
//! input.

use pretty_assertions::assert_eq;
use sms_gateway::modem::{self, SmsError};
use sms_gateway::service::{ServiceError, SmsService};
use sms_gateway::transport::MockTransport;
use std::time::{Duration, Instant};

// ============================================================================
// Happy path
// ============================================================================

#[test]
fn successful_send_produces_exact_wire_traffic() {
    let mut port = MockTransport::new("MODEM0");
    port.enqueue_read(b"\r\nOK\r\n");
    port.enqueue_read(b"+CMGS: 12\r\nOK\r\n");
    let observer = port.clone();

    let service = SmsService::with_transport(port);
    service.send("+15551234567", "hello").unwrap();

    assert_eq!(
        observer.write_log(),
        vec![
            b"AT+CMGF=1\r".to_vec(),
            b"AT+CMGS=\"+15551234567\"\r".to_vec(),
            b"hello\x1a".to_vec(),
        ]
    );
}

#[test]
fn send_is_not_deduplicated() {
    let mut port = MockTransport::new("MODEM0");
    for _ in 0..2 {
        port.enqueue_read(b"OK\r\n");
        port.enqueue_read(b"+CMGS: 1\r\nOK\r\n");
    }
    let observer = port.clone();

    let service = SmsService::with_transport(port);
    service.send("+15551234567", "hello").unwrap();
    service.send("+15551234567", "hello").unwrap();

    // Two identical requests mean two full transmissions.
    assert_eq!(observer.write_log().len(), 6);
}

// ============================================================================
// Failure scenarios
// ============================================================================

#[test]
fn modem_error_in_final_response_is_reported() {
    let mut port = MockTransport::new("MODEM0");
    port.enqueue_read(b"\r\nOK\r\n");
    port.enqueue_read(b"+CMS ERROR: 500\r\n");

    let service = SmsService::with_transport(port);
    let err = service.send("+15551234567", "hello").unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Sms(SmsError::ModemReportedError)
    ));
    assert_eq!(err.to_string(), "modem returned error sending SMS");
}

#[test]
fn payload_write_failure_aborts_before_final_read() {
    let mut port = MockTransport::new("MODEM0");
    port.enqueue_read(b"OK\r\n");
    // Write 0 is the mode command, write 1 the address line, write 2 the
    // payload.
    port.fail_write_at(2);
    port.enqueue_read(b"+CMGS: 1\r\nOK\r\n");
    let observer = port.clone();

    let service = SmsService::with_transport(port);
    let err = service.send("+15551234567", "hello").unwrap_err();

    assert!(matches!(err, ServiceError::Sms(SmsError::SubmitPayload(_))));
    // The final response was never collected.
    assert_eq!(observer.remaining_reads(), 1);
}

#[test]
fn transport_failure_during_final_read_is_tagged() {
    let mut port = MockTransport::new("MODEM0");
    port.enqueue_read(b"OK\r\n");
    port.enqueue_read_error(std::io::ErrorKind::BrokenPipe);

    let service = SmsService::with_transport(port);
    let err = service.send("+15551234567", "hello").unwrap_err();

    assert!(matches!(err, ServiceError::Sms(SmsError::ReadResponse(_))));
    assert!(err
        .to_string()
        .starts_with("error reading SMS send response"));
}

// ============================================================================
// Permissive classification
// ============================================================================

#[test]
fn partial_final_response_without_error_counts_as_sent() {
    let mut port = MockTransport::new("MODEM0");
    port.enqueue_read(b"OK\r\n");
    // The modem got cut off mid-acknowledgement; no ERROR marker means
    // the send is reported as successful.
    port.enqueue_read(b"+CMGS:");
    port.eof_when_drained();

    let service = SmsService::with_transport(port);
    service.send("+15551234567", "hello").unwrap();
}

#[test]
fn mode_set_acknowledgement_is_not_required() {
    let mut port = MockTransport::new("MODEM0");
    port.eof_when_drained();

    let service = SmsService::with_transport(port);
    service.send("+15551234567", "hello").unwrap();
}

// ============================================================================
// Collector timing properties
// ============================================================================

#[test]
fn silent_transport_never_blocks_past_deadline() {
    let mut port = MockTransport::new("MODEM0");

    let timeout = Duration::from_millis(300);
    let started = Instant::now();
    let response = modem::collect(&mut port, timeout).unwrap();

    assert!(response.is_empty());
    assert!(started.elapsed() >= timeout);
    assert!(started.elapsed() < timeout + 2 * modem::POLL_INTERVAL);
}

#[test]
fn terminal_marker_short_circuits_the_deadline() {
    let mut port = MockTransport::new("MODEM0");
    port.enqueue_read(b"\r\nOK\r\n");

    let started = Instant::now();
    let response = modem::collect(&mut port, Duration::from_secs(30)).unwrap();

    assert!(started.elapsed() < Duration::from_secs(1));
    assert_eq!(response.text(), "\r\nOK\r\n");
}

#[test]
fn end_of_stream_yields_partial_data_without_error() {
    let mut port = MockTransport::new("MODEM0");
    port.enqueue_read(b"+CMGS: 4");
    port.eof_when_drained();

    let response = modem::collect(&mut port, Duration::from_secs(30)).unwrap();
    assert_eq!(response.text(), "+CMGS: 4");
}
