//! Web server module for the Slack Events API endpoint.
//!
//! This module provides a thin, fast web server that:
//! - Answers Slack's `url_verification` handshake
//! - Spawns a detached reply task for event callbacks
//! - Returns 200 OK without waiting on Slack's Web API

pub mod handlers;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

pub use handlers::{handle_body, health, slack_webhook, AppState, HealthResponse};

/// Build the router: `/health` plus the webhook on every other path and method.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .fallback(slack_webhook)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
