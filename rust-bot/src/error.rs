//! Error types for outbound Slack and joke API calls.

use thiserror::Error;

/// Errors raised by the outbound HTTP layer.
///
/// None of these ever reach the inbound webhook caller; the reply task logs
/// them and stops.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("invalid API base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BotError>;
