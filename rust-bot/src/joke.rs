//! Dad joke lookup.
//!
//! Not wired into the webhook; kept as an extension point for replies that
//! want something fresher than the canned list.

use reqwest::Client;
use serde::Deserialize;
use tracing::info;

use crate::error::{BotError, Result};

/// Endpoint returning a joke already shaped as a Slack message.
pub const JOKE_URL: &str = "https://icanhazdadjoke.com/slack";

/// Joke as returned by the Slack flavoured endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Joke {
    pub attachments: Vec<JokeAttachment>,
    pub response_type: String,
    pub username: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JokeAttachment {
    pub fallback: String,
    pub footer: String,
    pub text: String,
}

impl Joke {
    /// Text of the first attachment, if any.
    pub fn text(&self) -> Option<&str> {
        self.attachments.first().map(|a| a.text.as_str())
    }
}

/// Parse a joke response body.
pub fn parse_joke(body: &[u8]) -> Result<Joke> {
    Ok(serde_json::from_slice(body)?)
}

/// Fetch a joke from `url`.
pub async fn fetch_joke(client: &Client, url: &str) -> Result<Joke> {
    info!(url = url, "joke_fetch_starting");

    let transport = |source| BotError::Transport {
        endpoint: url.to_string(),
        source,
    };

    let body = client
        .get(url)
        .send()
        .await
        .map_err(transport)?
        .bytes()
        .await
        .map_err(transport)?;

    let joke = parse_joke(&body)?;
    info!(url = url, attachments = joke.attachments.len(), "joke_fetch_complete");
    Ok(joke)
}
