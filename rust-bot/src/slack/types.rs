//! Slack Events API payload types.
//!
//! This module defines the message formats for:
//! - `url_verification` handshakes (`Challenge` / `ChallengeResponse`)
//! - `event_callback` notifications (`EventPayload`)
//! - `chat.postMessage` responses (`PostMessageResponse`)
//!
//! Inbound fields default when missing, `null` or of the wrong type, so one
//! odd field never costs the rest of the payload.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Event type Slack sends when someone mentions the bot.
pub const APP_MENTION: &str = "app_mention";

/// Deserialize a field, falling back to its default when the value does not fit.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// Parse a JSON object body. Anything else yields the default record.
fn from_object_body<T: DeserializeOwned + Default>(body: &[u8]) -> T {
    match serde_json::from_slice::<Value>(body) {
        Ok(value @ Value::Object(_)) => T::deserialize(value).unwrap_or_default(),
        _ => T::default(),
    }
}

// =============================================================================
// Handshake
// =============================================================================

/// URL verification handshake sent by Slack when the endpoint is registered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Challenge {
    /// Deprecated verification token
    #[serde(deserialize_with = "lenient")]
    pub token: String,
    /// Value to echo back; empty for every other kind of request
    #[serde(deserialize_with = "lenient")]
    pub challenge: String,
    /// Request type, `url_verification` for handshakes
    #[serde(rename = "type", deserialize_with = "lenient")]
    pub kind: String,
}

impl Challenge {
    /// Parse a request body, yielding an empty challenge on malformed input.
    pub fn from_body(body: &[u8]) -> Self {
        from_object_body(body)
    }

    /// Whether this request is a handshake that must be echoed.
    pub fn is_handshake(&self) -> bool {
        !self.challenge.is_empty()
    }
}

/// Body returned to Slack to complete the handshake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeResponse {
    pub challenge: String,
}

impl From<&Challenge> for ChallengeResponse {
    fn from(c: &Challenge) -> Self {
        Self {
            challenge: c.challenge.clone(),
        }
    }
}

// =============================================================================
// Event callbacks
// =============================================================================

/// Outer envelope of an `event_callback` request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventPayload {
    #[serde(deserialize_with = "lenient")]
    pub token: String,
    #[serde(deserialize_with = "lenient")]
    pub team_id: String,
    #[serde(deserialize_with = "lenient")]
    pub api_app_id: String,
    #[serde(deserialize_with = "lenient")]
    pub event: Event,
    #[serde(rename = "type", deserialize_with = "lenient")]
    pub kind: String,
    #[serde(deserialize_with = "lenient")]
    pub event_id: String,
    #[serde(deserialize_with = "lenient")]
    pub event_time: i64,
    #[serde(deserialize_with = "lenient")]
    pub authed_users: Vec<String>,
}

impl EventPayload {
    /// Parse a request body, yielding an empty payload on malformed input.
    pub fn from_body(body: &[u8]) -> Self {
        from_object_body(body)
    }
}

/// The inner event describing what happened in the workspace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    #[serde(deserialize_with = "lenient")]
    pub client_msg_id: String,
    /// Event type, e.g. `app_mention`
    #[serde(rename = "type", deserialize_with = "lenient")]
    pub kind: String,
    /// Raw message text, mentions included
    #[serde(deserialize_with = "lenient")]
    pub text: String,
    /// Slack user ID of the author
    #[serde(deserialize_with = "lenient")]
    pub user: String,
    /// Display name, only present for bot-authored messages
    #[serde(deserialize_with = "lenient")]
    pub username: String,
    #[serde(deserialize_with = "lenient")]
    pub ts: String,
    /// Channel the message was posted in
    #[serde(deserialize_with = "lenient")]
    pub channel: String,
    #[serde(deserialize_with = "lenient")]
    pub event_ts: String,
    #[serde(deserialize_with = "lenient")]
    pub channel_type: String,
}

impl Event {
    /// Whether the event is a mention of the bot.
    pub fn is_mention(&self) -> bool {
        self.kind == APP_MENTION
    }
}

// =============================================================================
// chat.postMessage
// =============================================================================

/// Response of `chat.postMessage`.
///
/// Kept for logging; the reply path never checks `ok`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PostMessageResponse {
    pub ok: bool,
    pub channel: String,
    pub ts: String,
    pub error: Option<String>,
    pub message: Option<PostedMessage>,
}

/// Message echoed back by `chat.postMessage`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PostedMessage {
    pub text: String,
    pub username: String,
    pub bot_id: String,
    pub attachments: Vec<PostedAttachment>,
    #[serde(rename = "type")]
    pub kind: String,
    pub subtype: String,
    pub ts: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PostedAttachment {
    pub text: String,
    pub id: i64,
    pub fallback: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_challenge_from_body() {
        let c = Challenge::from_body(
            br#"{"token":"t","challenge":"abc123","type":"url_verification"}"#,
        );
        assert_eq!(c.challenge, "abc123");
        assert_eq!(c.kind, "url_verification");
        assert!(c.is_handshake());
    }

    #[test]
    fn test_challenge_malformed_body_is_empty() {
        assert_eq!(Challenge::from_body(b"not json"), Challenge::default());
        assert_eq!(Challenge::from_body(b""), Challenge::default());
        assert!(!Challenge::from_body(b"[1,2,3]").is_handshake());
    }

    #[test]
    fn test_challenge_response_serializes() {
        let c = Challenge {
            challenge: "abc123".to_string(),
            ..Default::default()
        };
        let body = serde_json::to_string(&ChallengeResponse::from(&c)).unwrap();
        assert_eq!(body, r#"{"challenge":"abc123"}"#);
    }

    #[test]
    fn test_event_payload_full() {
        let body = br#"{
            "token": "tok",
            "team_id": "T1",
            "api_app_id": "A1",
            "event": {
                "client_msg_id": "m1",
                "type": "app_mention",
                "text": "<@UBOT> hello",
                "user": "U1",
                "ts": "1.0",
                "channel": "C1",
                "event_ts": "1.0",
                "channel_type": "channel"
            },
            "type": "event_callback",
            "event_id": "Ev1",
            "event_time": 1234567890,
            "authed_users": ["UBOT"]
        }"#;

        let p = EventPayload::from_body(body);
        assert_eq!(p.kind, "event_callback");
        assert_eq!(p.event_time, 1234567890);
        assert_eq!(p.authed_users, vec!["UBOT".to_string()]);
        assert!(p.event.is_mention());
        assert_eq!(p.event.channel, "C1");
        assert_eq!(p.event.user, "U1");
        assert!(p.event.username.is_empty());
    }

    #[test]
    fn test_event_payload_partial_and_malformed() {
        let p = EventPayload::from_body(br#"{"event":{"type":"message"}}"#);
        assert_eq!(p.event.kind, "message");
        assert!(!p.event.is_mention());

        assert_eq!(EventPayload::from_body(b"{oops"), EventPayload::default());
    }

    #[test]
    fn test_event_null_field_keeps_the_rest() {
        let p = EventPayload::from_body(
            br#"{"event":{"type":"app_mention","text":"hi","user":"U1","username":null,"channel":"C1"}}"#,
        );
        assert!(p.event.is_mention());
        assert_eq!(p.event.user, "U1");
        assert_eq!(p.event.channel, "C1");
        assert_eq!(p.event.text, "hi");
        assert!(p.event.username.is_empty());
    }

    #[test]
    fn test_challenge_null_token_still_echoed() {
        let c = Challenge::from_body(
            br#"{"token":null,"challenge":"abc","type":"url_verification"}"#,
        );
        assert_eq!(c.challenge, "abc");
        assert!(c.token.is_empty());
        assert!(c.is_handshake());
    }

    #[test]
    fn test_wrong_typed_fields_default_individually() {
        let p = EventPayload::from_body(
            br#"{
                "team_id": 42,
                "event": {"type":"app_mention","user":"U1","channel":"C1","ts":1.5},
                "event_time": 1.5e9,
                "authed_users": "UBOT",
                "event_id": "Ev1"
            }"#,
        );
        assert_eq!(p.event_time, 0);
        assert!(p.authed_users.is_empty());
        assert!(p.team_id.is_empty());
        assert_eq!(p.event_id, "Ev1");
        assert!(p.event.is_mention());
        assert_eq!(p.event.user, "U1");
        assert!(p.event.ts.is_empty());
    }

    #[test]
    fn test_wrong_typed_event_defaults() {
        let p = EventPayload::from_body(br#"{"event":"app_mention","event_id":"Ev2"}"#);
        assert_eq!(p.event, Event::default());
        assert_eq!(p.event_id, "Ev2");
    }

    #[test]
    fn test_post_message_response_tolerates_errors() {
        let r: PostMessageResponse =
            serde_json::from_str(r#"{"ok":false,"error":"not_authed"}"#).unwrap();
        assert!(!r.ok);
        assert_eq!(r.error.as_deref(), Some("not_authed"));
        assert!(r.message.is_none());
    }
}
