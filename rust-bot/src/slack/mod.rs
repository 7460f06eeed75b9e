//! Slack module for the Events API and Web API.
//!
//! This module provides:
//! - Inbound payload types (handshake and event callbacks)
//! - An outbound client for `chat.postMessage`

pub mod client;
pub mod types;

pub use client::{build_post_message_url, MessageSender, SlackClient};
pub use types::{
    Challenge, ChallengeResponse, Event, EventPayload, PostMessageResponse, APP_MENTION,
};
