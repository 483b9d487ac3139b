//! AT-command protocol engine.
//!
//! This is the heart of the gateway: issuing a command over the byte
//! stream, collecting a terminated response under a deadline, and
//! sequencing the multi-step SMS submission exchange.
//!
//! The engine is deliberately synchronous. The AT protocol is strictly
//! request/response on a single non-shareable link, so one blocking
//! exchange at a time (serialized by the service layer) is the whole
//! concurrency story.

pub mod command;
pub mod response;
pub mod sms;

pub use response::{classify, collect, Response, ResponseStatus, POLL_INTERVAL};
pub use sms::{send, SmsError, SEND_RESPONSE_TIMEOUT, TEXT_MODE_TIMEOUT};
