//! Mention reply logic.
//!
//! ## Processing Flow
//!
//! ```text
//! EventPayload → compose_reply() → OutboundReply → MessageSender
//! ```
//!
//! Composition is pure; only `manage_payload` touches the network.

pub mod responses;

use rand::Rng;
use tracing::{debug, info};

use crate::config::Config;
use crate::slack::{EventPayload, MessageSender};

pub use responses::{
    candidate_responses, mentions_design, pick_response, wall_clock_rng, DESIGN_REBUKE,
    RESPONSE_COUNT,
};

/// A message ready to be posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundReply {
    pub channel: String,
    pub text: String,
}

/// Slack mention markup for a user ID.
fn mention(user: &str) -> String {
    format!("<@{}>", user)
}

/// Decide what, if anything, to answer to an event.
///
/// Returns `None` for the bot's own messages and for anything that is not an
/// `app_mention`.
pub fn compose_reply<R: Rng>(
    payload: &EventPayload,
    config: &Config,
    rng: &mut R,
) -> Option<OutboundReply> {
    let event = &payload.event;

    if event.username == config.bot_username || !event.is_mention() {
        debug!(
            event_type = %event.kind,
            username = %event.username,
            "reply_skipped"
        );
        return None;
    }

    if event.user == config.author_id {
        // Reserved for the distinguished user; nothing special happens yet.
        debug!(user = %event.user, "reply_distinguished_user");
    }

    let text = if mentions_design(&event.text) {
        format!("{}{}", mention(&event.user), DESIGN_REBUKE)
    } else {
        format!(
            "{}{}",
            mention(&event.user),
            pick_response(&config.author_id, rng)
        )
    };

    Some(OutboundReply {
        channel: event.channel.clone(),
        text,
    })
}

/// Compose and send the reply for one event.
///
/// Runs detached from the HTTP response. Send failures are already logged by
/// the sender and end the task.
pub async fn manage_payload(payload: EventPayload, config: &Config, sender: &dyn MessageSender) {
    info!(
        event_id = %payload.event_id,
        event_type = %payload.event.kind,
        channel = %payload.event.channel,
        text_length = payload.event.text.len(),
        "reply_task_start"
    );
    debug!(text = %payload.event.text, "reply_task_text");

    let Some(reply) = compose_reply(&payload, config, &mut wall_clock_rng()) else {
        return;
    };

    if sender.send_message(&reply.channel, &reply.text).await.is_ok() {
        info!(channel = %reply.channel, "reply_task_complete");
    }
}
