//! Webhook endpoint handlers.
//!
//! These handlers are designed to be extremely fast - they only:
//! 1. Echo the handshake challenge, or
//! 2. Spawn the reply task and return immediately
//!
//! Slack retries callbacks that are not acknowledged within three seconds, so
//! nothing here waits on the outbound API.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::reply::manage_payload;
use crate::slack::{Challenge, ChallengeResponse, EventPayload, MessageSender};
use crate::Config;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sender: Arc<dyn MessageSender>,
}

impl AppState {
    pub fn new(config: Config, sender: Arc<dyn MessageSender>) -> Self {
        Self {
            config: Arc::new(config),
            sender,
        }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Slack Events API
// =============================================================================

/// Turn a raw request body into the response body.
///
/// A handshake is answered with `{"challenge": ...}`. Anything else is handed
/// to a detached reply task and answered with an empty body.
pub fn handle_body(state: &AppState, input: &[u8]) -> Vec<u8> {
    let challenge = Challenge::from_body(input);

    if challenge.is_handshake() {
        info!(challenge_type = %challenge.kind, "slack_challenge_accepted");
        return serde_json::to_vec(&ChallengeResponse::from(&challenge)).unwrap_or_default();
    }

    let payload = EventPayload::from_body(input);
    info!(
        event_id = %payload.event_id,
        event_type = %payload.event.kind,
        "slack_event_received"
    );

    let config = state.config.clone();
    let sender = state.sender.clone();
    tokio::spawn(async move {
        manage_payload(payload, &config, sender.as_ref()).await;
    });

    Vec::new()
}

/// Slack Events API endpoint.
///
/// Always answers `200`. A body that cannot be read is treated as empty.
pub async fn slack_webhook(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let input = match body {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, "slack_webhook_body_unreadable");
            Bytes::new()
        }
    };

    info!(body_length = input.len(), "slack_webhook_received");

    let output = handle_body(&state, &input);

    if output.is_empty() {
        StatusCode::OK.into_response()
    } else {
        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            output,
        )
            .into_response()
    }
}
