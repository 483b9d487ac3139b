//! Service layer for SMS submission.
//!
//! Decouples the HTTP handlers from the modem protocol and owns the
//! single modem handle. The AT protocol is strictly request/response
//! with no multiplexing or transaction IDs, so interleaving two
//! exchanges on one link would corrupt both; the mutex here makes the
//! exclusive-access discipline a property of the type rather than a
//! convention callers must remember.

use crate::modem::{self, SmsError};
use crate::transport::Transport;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// The single owned modem resource.
pub type ModemHandle = Arc<Mutex<Box<dyn Transport>>>;

/// Service-level errors for SMS submission.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The modem lock is poisoned (a previous exchange panicked).
    #[error("modem lock is poisoned")]
    ModemLockPoisoned,

    /// The submission exchange failed.
    #[error(transparent)]
    Sms(#[from] SmsError),
}

/// Business logic for SMS submission over the exclusive modem handle.
#[derive(Clone)]
pub struct SmsService {
    modem: ModemHandle,
}

impl SmsService {
    /// Create a service over an existing modem handle.
    pub fn new(modem: ModemHandle) -> Self {
        Self { modem }
    }

    /// Wrap a transport into a service, taking sole ownership of it.
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self::new(Arc::new(Mutex::new(Box::new(transport))))
    }

    /// Submit one SMS.
    ///
    /// Holds the modem lock for the whole exchange and blocks until the
    /// modem answers or the protocol timeouts expire (up to ~13 s), so
    /// this must run on a blocking-capable thread, not an async task.
    /// Two calls with identical inputs perform two independent
    /// transmissions; there is no deduplication.
    pub fn send(&self, phone: &str, message: &str) -> Result<(), ServiceError> {
        let mut port = self
            .modem
            .lock()
            .map_err(|_| ServiceError::ModemLockPoisoned)?;
        modem::sms::send(&mut **port, phone, message)?;
        Ok(())
    }
}
