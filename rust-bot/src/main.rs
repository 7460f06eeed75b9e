//! BenBot web server - Slack Events API receiver.
//!
//! Answers Slack's handshake and replies to mentions of the bot. Every reply
//! is sent from a detached task so Slack gets its 200 right away.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use benbot::{router, AppState, Config, SlackClient};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = Config::from_env();
    log_config(&config);

    let slack = SlackClient::new(&config).context("Failed to create Slack client")?;
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = router(AppState::new(config, Arc::new(slack)));

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!(address = %addr, "benbot_listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // Reply tasks still in flight are dropped with the runtime.
    info!("benbot_stopped");
    Ok(())
}

/// JSON logs, filtered by `RUST_LOG` (default `info`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();
}

/// Log the effective configuration without leaking the token.
fn log_config(config: &Config) {
    info!(
        port = config.port,
        bot_username = %config.bot_username,
        slack_api_base = %config.slack_api_base,
        request_timeout_ms = config.request_timeout_ms,
        accept_invalid_certs = config.accept_invalid_certs,
        "config_loaded"
    );

    if config.bot_token.is_empty() {
        warn!("BOT_TOKEN is not set, replies will be rejected by Slack");
    }
    if config.author_id.is_empty() {
        warn!("AUTHOR_ID is not set");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!(signal = "SIGINT", "benbot_shutting_down"),
        _ = terminate => info!(signal = "SIGTERM", "benbot_shutting_down"),
    }
}
