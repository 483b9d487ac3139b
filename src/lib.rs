//! SMS Gateway Library
//!
//! Bridges HTTP requests to a cellular modem's AT-command interface over a
//! serial transport. The protocol engine lives in `modem`; everything else
//! is plumbing around it.
//!
//! # Modules
//!
//! - `config`: JSON configuration with file resolution and env overrides
//! - `error`: Unified application error for the HTTP boundary
//! - `transport`: Serial transport abstraction (real port + mock)
//! - `modem`: AT-command engine (response collection, command execution,
//!   SMS submission sequencing)
//! - `service`: Business logic layer owning the exclusive modem handle
//! - `rest_api`: Axum router and handlers

pub mod config;
pub mod error;
pub mod modem;
pub mod rest_api;
pub mod service;
pub mod transport;

// Re-export commonly used types for convenience
pub use config::{Config, ConfigError, ConfigLoader, ConfigResult};
pub use error::{AppError, AppResult};
pub use modem::{Response, ResponseStatus, SmsError};
pub use service::{ModemHandle, ServiceError, SmsService};
pub use transport::{MockTransport, PortSettings, SerialTransport, Transport, TransportError};
