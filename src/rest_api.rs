//! REST surface for the gateway. Two routes: a liveness probe and the
//! SMS submission endpoint. Returns JSON responses with a stable shape.
//!
//! Input validation lives here, at the request boundary: an empty phone
//! or message is rejected with 400 before any modem activity happens.
//! The modem exchange itself is synchronous and can take on the order of
//! ten seconds, so handlers run it on the blocking pool.

use axum::{
    extract::{Form, State as AxumState},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::error;

use crate::error::{AppError, AppResult};
use crate::service::SmsService;

#[derive(Clone)]
pub struct RestContext {
    pub service: SmsService,
}

// ---------- DTOs ----------

/// Form-encoded SMS submission request.
///
/// Fields default to empty so that "missing" and "present but empty"
/// are rejected identically.
#[derive(Debug, Deserialize)]
pub struct SendSmsRequest {
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub message: String,
}

// ---------- Router Builder ----------

pub fn build_router(ctx: RestContext) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/send-sms", post(send_sms))
        .with_state(ctx)
}

// ---------- Handlers ----------

async fn ping() -> &'static str {
    "pong"
}

async fn send_sms(
    AxumState(ctx): AxumState<RestContext>,
    Form(req): Form<SendSmsRequest>,
) -> AppResult<Json<Value>> {
    if req.phone.is_empty() {
        return Err(AppError::InvalidPayload("missing phone".to_string()));
    }
    if req.message.is_empty() {
        return Err(AppError::InvalidPayload("missing message".to_string()));
    }

    let service = ctx.service.clone();
    let outcome = tokio::task::spawn_blocking(move || service.send(&req.phone, &req.message))
        .await
        .map_err(|e| AppError::Internal(format!("send task failed: {e}")))?;

    match outcome {
        Ok(()) => Ok(Json(json!({ "status": "ok", "message": "SMS sent" }))),
        Err(e) => {
            error!("Send SMS error: {}", e);
            Err(AppError::from(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;

    fn context_with(mock: MockTransport) -> RestContext {
        RestContext {
            service: SmsService::with_transport(mock),
        }
    }

    #[tokio::test]
    async fn test_empty_phone_rejected_before_modem_touched() {
        let mock = MockTransport::new("MOCK0");
        let observer = mock.clone();
        let ctx = context_with(mock);

        let result = send_sms(
            AxumState(ctx),
            Form(SendSmsRequest {
                phone: String::new(),
                message: "hello".to_string(),
            }),
        )
        .await;

        assert!(matches!(result, Err(AppError::InvalidPayload(_))));
        // No transport activity occurred.
        assert!(observer.write_log().is_empty());
    }

    #[tokio::test]
    async fn test_empty_message_rejected() {
        let mock = MockTransport::new("MOCK0");
        let observer = mock.clone();
        let ctx = context_with(mock);

        let result = send_sms(
            AxumState(ctx),
            Form(SendSmsRequest {
                phone: "+15551234567".to_string(),
                message: String::new(),
            }),
        )
        .await;

        assert!(matches!(result, Err(AppError::InvalidPayload(_))));
        assert!(observer.write_log().is_empty());
    }

    #[tokio::test]
    async fn test_valid_request_drives_the_modem() {
        let mut mock = MockTransport::new("MOCK0");
        mock.enqueue_read(b"OK\r\n");
        mock.enqueue_read(b"+CMGS: 7\r\nOK\r\n");
        let observer = mock.clone();
        let ctx = context_with(mock);

        let result = send_sms(
            AxumState(ctx),
            Form(SendSmsRequest {
                phone: "+15551234567".to_string(),
                message: "hello".to_string(),
            }),
        )
        .await;

        assert!(result.is_ok());
        assert_eq!(observer.write_log().len(), 3);
    }

    #[tokio::test]
    async fn test_modem_failure_maps_to_send_failed() {
        let mut mock = MockTransport::new("MOCK0");
        mock.enqueue_read(b"OK\r\n");
        mock.enqueue_read(b"+CMS ERROR: 500\r\n");
        let ctx = context_with(mock);

        let result = send_sms(
            AxumState(ctx),
            Form(SendSmsRequest {
                phone: "+15551234567".to_string(),
                message: "hello".to_string(),
            }),
        )
        .await;

        assert!(matches!(result, Err(AppError::SendFailed(_))));
    }
}
