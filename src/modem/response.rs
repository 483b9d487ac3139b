//! Response collection and classification.
//!
//! Modems terminate responses with a status token, but line framing is
//! unreliable across firmwares: status lines arrive partial, merged, or
//! glued to echoed input. The only robust framing rule is to scan the
//! whole accumulated buffer for a terminal marker, which is what
//! `classify` does. It is the single place in the crate that interprets
//! response text; swapping in stricter line-based framing later means
//! changing only this module.

use crate::transport::{Transport, TransportError};
use memchr::memmem;
use std::borrow::Cow;
use std::time::{Duration, Instant};
use tracing::trace;

/// Pause between polls when the transport has no data to deliver.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Scratch buffer size for a single bounded read.
const READ_CHUNK: usize = 1024;

/// Terminal status token found in accumulated modem output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    /// The buffer contains `OK`.
    Ok,
    /// The buffer contains `ERROR`.
    Error,
}

/// Classify accumulated modem output by terminal marker.
///
/// `ERROR` anywhere in the buffer wins over `OK` (a `+CMS ERROR` line may
/// well be preceded by echoed text containing `OK`). Returns `None` while
/// no marker has arrived yet.
pub fn classify(raw: &[u8]) -> Option<ResponseStatus> {
    if memmem::find(raw, b"ERROR").is_some() {
        Some(ResponseStatus::Error)
    } else if memmem::find(raw, b"OK").is_some() {
        Some(ResponseStatus::Ok)
    } else {
        None
    }
}

/// Everything read from the transport since a command was issued.
///
/// Not delimited into frames; a raw, possibly multi-line accumulation
/// snapshot. May be partial if collection ended on the deadline or on
/// end-of-stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    raw: Vec<u8>,
}

impl Response {
    fn new(raw: Vec<u8>) -> Self {
        Self { raw }
    }

    /// The accumulated bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// The accumulated text, lossily decoded.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.raw)
    }

    /// The terminal marker present in the response, if any.
    pub fn status(&self) -> Option<ResponseStatus> {
        classify(&self.raw)
    }

    /// Whether the modem reported an error.
    pub fn is_error(&self) -> bool {
        matches!(self.status(), Some(ResponseStatus::Error))
    }

    /// Whether nothing was read at all.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

/// Read from the transport until a terminal marker appears or the
/// deadline expires, whichever comes first.
///
/// The deadline is computed once at entry. Expiry is a normal
/// termination, not a failure: whatever accumulated so far is returned
/// and the caller decides what it means. End-of-stream likewise returns
/// the partial accumulation. Only a real transport failure aborts, in
/// which case the accumulated text is discarded and the error surfaced.
///
/// The transport's own bounded read is the wait primitive; a fixed
/// [`POLL_INTERVAL`] sleep pads out polls that return immediately, so
/// the loop never spins against a source with nothing to say.
pub fn collect(port: &mut dyn Transport, timeout: Duration) -> Result<Response, TransportError> {
    let deadline = Instant::now() + timeout;
    let mut accumulated: Vec<u8> = Vec::new();
    let mut buf = [0u8; READ_CHUNK];

    loop {
        if Instant::now() >= deadline {
            trace!("Deadline expired with {} bytes accumulated", accumulated.len());
            break;
        }

        let poll_started = Instant::now();
        match port.read_bytes(&mut buf) {
            // Clean end-of-stream: keep what we have.
            Ok(0) => {
                trace!("End of stream after {} bytes", accumulated.len());
                break;
            }
            Ok(n) => {
                accumulated.extend_from_slice(&buf[..n]);
                if classify(&accumulated).is_some() {
                    break;
                }
            }
            Err(e) if e.is_empty_poll() => {
                let elapsed = poll_started.elapsed();
                if elapsed < POLL_INTERVAL {
                    std::thread::sleep(POLL_INTERVAL - elapsed);
                }
            }
            Err(e) => return Err(e),
        }
    }

    Ok(Response::new(accumulated))
}
