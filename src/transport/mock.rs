//! Mock transport implementation for testing.
//!
//! Simulates the modem's side of an AT exchange without hardware. Reads
//! follow a script of chunks so partial and merged response lines can be
//! reproduced, and individual read/write operations can be made to fail.

use super::error::TransportError;
use super::traits::Transport;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// One scripted read outcome.
#[derive(Debug)]
enum ReadStep {
    /// Deliver these bytes (split across reads if the buffer is smaller).
    Data(Vec<u8>),
    /// Fail the read with this I/O error kind.
    Error(std::io::ErrorKind),
}

/// Inner state of the mock, protected by a mutex for interior mutability.
#[derive(Debug, Default)]
struct MockState {
    /// Scripted read outcomes, consumed front to back.
    read_script: VecDeque<ReadStep>,
    /// Log of all successfully written byte sequences.
    write_log: Vec<Vec<u8>>,
    /// Write indices (0-based, counting every attempt) that must fail.
    failing_writes: Vec<usize>,
    /// Number of write attempts so far.
    write_attempts: usize,
    /// When the script is drained: report end-of-stream instead of an
    /// empty poll.
    eof_when_drained: bool,
}

/// Mock transport for exercising the AT engine in tests.
///
/// Clones share state, so a test can hand one handle to the code under
/// test and keep another for assertions.
///
/// # Example
/// ```
/// use sms_gateway::transport::{MockTransport, Transport};
///
/// let mut modem = MockTransport::new("MOCK0");
/// modem.enqueue_read(b"OK\r\n");
///
/// let mut buffer = [0u8; 16];
/// let n = modem.read_bytes(&mut buffer).unwrap();
/// assert_eq!(&buffer[..n], b"OK\r\n");
///
/// modem.write_bytes(b"AT\r").unwrap();
/// assert_eq!(modem.write_log(), vec![b"AT\r".to_vec()]);
/// ```
#[derive(Clone)]
pub struct MockTransport {
    name: String,
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    /// Create a new mock transport with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// Append a chunk of bytes to be delivered by a future read.
    ///
    /// Each chunk is delivered by its own read call, so enqueueing
    /// `b"O"` then `b"K"` exercises a marker split across reads.
    pub fn enqueue_read(&mut self, data: &[u8]) {
        let mut state = self.state.lock().unwrap();
        state.read_script.push_back(ReadStep::Data(data.to_vec()));
    }

    /// Append a read failure with the given I/O error kind.
    pub fn enqueue_read_error(&mut self, kind: std::io::ErrorKind) {
        let mut state = self.state.lock().unwrap();
        state.read_script.push_back(ReadStep::Error(kind));
    }

    /// Report end-of-stream once the read script is drained, instead of
    /// the default empty-poll behavior.
    pub fn eof_when_drained(&mut self) {
        let mut state = self.state.lock().unwrap();
        state.eof_when_drained = true;
    }

    /// Make the write attempt at `index` (0-based) fail.
    pub fn fail_write_at(&mut self, index: usize) {
        let mut state = self.state.lock().unwrap();
        state.failing_writes.push(index);
    }

    /// Get a copy of all successfully written byte sequences.
    pub fn write_log(&self) -> Vec<Vec<u8>> {
        let state = self.state.lock().unwrap();
        state.write_log.clone()
    }

    /// Number of scripted read steps not yet consumed.
    pub fn remaining_reads(&self) -> usize {
        let state = self.state.lock().unwrap();
        state.read_script.len()
    }
}

impl Transport for MockTransport {
    fn write_bytes(&mut self, data: &[u8]) -> Result<usize, TransportError> {
        let mut state = self.state.lock().unwrap();

        let index = state.write_attempts;
        state.write_attempts += 1;

        if state.failing_writes.contains(&index) {
            return Err(TransportError::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "simulated write failure",
            )));
        }

        state.write_log.push(data.to_vec());
        Ok(data.len())
    }

    fn read_bytes(&mut self, buffer: &mut [u8]) -> Result<usize, TransportError> {
        let mut state = self.state.lock().unwrap();

        match state.read_script.pop_front() {
            Some(ReadStep::Data(mut chunk)) => {
                let n = chunk.len().min(buffer.len());
                buffer[..n].copy_from_slice(&chunk[..n]);
                if n < chunk.len() {
                    // Remainder stays at the front for the next read.
                    chunk.drain(..n);
                    state.read_script.push_front(ReadStep::Data(chunk));
                }
                Ok(n)
            }
            Some(ReadStep::Error(kind)) => Err(TransportError::Io(std::io::Error::new(
                kind,
                "simulated read failure",
            ))),
            None => {
                if state.eof_when_drained {
                    Ok(0)
                } else {
                    Err(TransportError::Io(std::io::Error::new(
                        std::io::ErrorKind::TimedOut,
                        "no data within read window",
                    )))
                }
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport")
            .field("name", &self.name)
            .field("remaining_reads", &self.remaining_reads())
            .finish()
    }
}
