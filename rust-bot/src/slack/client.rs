//! Outbound Slack Web API client.
//!
//! Messages go out through `chat.postMessage` as a GET request with every
//! argument in the query string. The response body is returned untouched.

use std::time::Duration;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Client;
use tracing::{error, info, warn};
use url::Url;

use crate::config::Config;
use crate::error::{BotError, Result};
use crate::slack::types::PostMessageResponse;

/// Everything except RFC 3986 unreserved characters is escaped.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Destination for composed replies.
///
/// The production implementation is [`SlackClient`]; tests swap in a recorder.
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Post `text` to `channel`, returning the raw response body.
    async fn send_message(&self, channel: &str, text: &str) -> Result<Vec<u8>>;
}

/// Build the full `chat.postMessage` URL for a message.
pub fn build_post_message_url(
    api_base: &Url,
    token: &str,
    channel: &str,
    text: &str,
) -> String {
    format!(
        "{}/chat.postMessage?token={}&channel={}&text={}",
        api_base.as_str().trim_end_matches('/'),
        utf8_percent_encode(token, QUERY_VALUE),
        utf8_percent_encode(channel, QUERY_VALUE),
        utf8_percent_encode(text, QUERY_VALUE),
    )
}

/// Replace the token query value so URLs can be logged.
fn redact_token(url: &str, token: &str) -> String {
    if token.is_empty() {
        return url.to_string();
    }
    let encoded = utf8_percent_encode(token, QUERY_VALUE).to_string();
    url.replacen(&format!("token={}", encoded), "token=[REDACTED]", 1)
}

/// Slack Web API client backed by a shared `reqwest::Client`.
#[derive(Clone)]
pub struct SlackClient {
    client: Client,
    api_base: Url,
    token: String,
}

impl SlackClient {
    /// Create a client from configuration.
    ///
    /// Certificate validation stays on unless `accept_invalid_certs` is set.
    pub fn new(config: &Config) -> Result<Self> {
        if config.accept_invalid_certs {
            warn!("slack_client_tls_verification_disabled");
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(BotError::ClientBuild)?;

        Self::with_client(client, &config.slack_api_base, &config.bot_token)
    }

    /// Create a client around an existing `reqwest::Client`.
    pub fn with_client(client: Client, api_base: &str, token: &str) -> Result<Self> {
        let api_base = Url::parse(api_base).map_err(|source| BotError::InvalidBaseUrl {
            url: api_base.to_string(),
            source,
        })?;

        Ok(Self {
            client,
            api_base,
            token: token.to_string(),
        })
    }

    /// Issue a GET request and return the raw body.
    async fn get(&self, url: &str) -> Result<Vec<u8>> {
        let logged_url = redact_token(url, &self.token);
        info!(url = %logged_url, "slack_get_starting");

        let transport = |source| BotError::Transport {
            endpoint: logged_url.clone(),
            source,
        };

        let resp = self.client.get(url).send().await.map_err(transport)?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await.map_err(transport)?;

        info!(
            url = %logged_url,
            status_code = status,
            body_length = body.len(),
            "slack_get_complete"
        );

        Ok(body.to_vec())
    }
}

#[async_trait]
impl MessageSender for SlackClient {
    async fn send_message(&self, channel: &str, text: &str) -> Result<Vec<u8>> {
        let url = build_post_message_url(&self.api_base, &self.token, channel, text);
        info!(channel = %channel, text_length = text.len(), "slack_message_sending");

        match self.get(&url).await {
            Ok(body) => {
                let parsed: Option<PostMessageResponse> = serde_json::from_slice(&body).ok();
                info!(
                    channel = %channel,
                    ok = parsed.as_ref().map(|r| r.ok),
                    api_error = parsed.as_ref().and_then(|r| r.error.as_deref()),
                    response = %String::from_utf8_lossy(&body),
                    "slack_message_sent"
                );
                Ok(body)
            }
            Err(e) => {
                error!(channel = %channel, error = %e, "slack_message_send_failed");
                Err(e)
            }
        }
    }
}
