//! BenBot - Slack mention responder.
//!
//! This library provides the modules behind the `benbot` binary:
//! - `web`: the Events API endpoint (handshake echo and event dispatch)
//! - `reply`: deciding what to answer to a mention
//! - `slack`: payload types and the outbound Web API client
//!
//! ## Architecture
//!
//! ```text
//! Slack → web (200 OK) ─spawn→ reply → SlackClient → chat.postMessage
//! ```

pub mod config;
pub mod error;
pub mod joke;
pub mod reply;
pub mod slack;
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use error::BotError;
pub use reply::{compose_reply, manage_payload, OutboundReply};
pub use slack::{Challenge, EventPayload, MessageSender, SlackClient};
pub use web::{router, AppState};
