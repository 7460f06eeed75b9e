//! Configuration module for environment variable parsing.
//!
//! Every value is read once and then handed around explicitly; nothing here is
//! global. Missing credentials are not fatal, they simply become empty strings.

use std::env;
use tracing::warn;

/// Name the bot posts under. Events authored by it are ignored.
pub const DEFAULT_BOT_USERNAME: &str = "ben-bot";

/// Slack Web API base URL.
pub const DEFAULT_SLACK_API_BASE: &str = "https://slack.com/api";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Slack bot token used for `chat.postMessage`
    pub bot_token: String,

    /// Distinguished user identifier (Slack user ID)
    pub author_id: String,

    /// The bot's own username, used to avoid answering itself
    pub bot_username: String,

    /// Base URL of the Slack Web API
    pub slack_api_base: String,

    /// Skip TLS certificate validation on outbound calls
    pub accept_invalid_certs: bool,

    /// HTTP request timeout in milliseconds
    pub request_timeout_ms: u64,

    /// Port for the web server to listen on
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bot_token: String::new(),
            author_id: String::new(),
            bot_username: DEFAULT_BOT_USERNAME.to_string(),
            slack_api_base: DEFAULT_SLACK_API_BASE.to_string(),
            accept_invalid_certs: false,
            request_timeout_ms: 8000,
            port: 8080,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Config::default();

        Config {
            bot_token: env::var("BOT_TOKEN").unwrap_or_default(),

            author_id: env::var("AUTHOR_ID").unwrap_or_default(),

            bot_username: non_empty_var("BOT_USERNAME").unwrap_or(defaults.bot_username),

            slack_api_base: non_empty_var("SLACK_API_BASE").unwrap_or(defaults.slack_api_base),

            accept_invalid_certs: parse_bool(
                "SLACK_ACCEPT_INVALID_CERTS",
                defaults.accept_invalid_certs,
            ),

            request_timeout_ms: parse_number("REQUEST_TIMEOUT_MS", defaults.request_timeout_ms),

            port: parse_number("PORT", defaults.port),
        }
    }
}

/// Read a variable, treating blank values as unset.
fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a numeric variable, falling back to `default` when unset or invalid.
fn parse_number<T: std::str::FromStr + Copy>(name: &str, default: T) -> T {
    let raw = match env::var(name) {
        Ok(v) => v,
        Err(_) => return default,
    };

    match raw.trim().parse::<T>() {
        Ok(v) => v,
        Err(_) => {
            warn!(env_var = name, value = %raw, "Invalid number, using default");
            default
        }
    }
}

/// Parse a boolean flag such as "true", "1", "yes", "off".
fn parse_bool(name: &str, default: bool) -> bool {
    let raw = match env::var(name) {
        Ok(v) => v,
        Err(_) => return default,
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" | "" => false,
        _ => {
            warn!(env_var = name, value = %raw, "Invalid boolean, using default");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_valid() {
        env::set_var("TEST_BENBOT_NUMBER", " 1500 ");
        let result: u64 = parse_number("TEST_BENBOT_NUMBER", 0);
        assert_eq!(result, 1500);
        env::remove_var("TEST_BENBOT_NUMBER");
    }

    #[test]
    fn test_parse_number_invalid_uses_default() {
        env::set_var("TEST_BENBOT_BAD_NUMBER", "soon");
        let result: u16 = parse_number("TEST_BENBOT_BAD_NUMBER", 8080);
        assert_eq!(result, 8080);
        env::remove_var("TEST_BENBOT_BAD_NUMBER");
    }

    #[test]
    fn test_parse_bool() {
        env::set_var("TEST_BENBOT_BOOL_ON", "TRUE");
        env::set_var("TEST_BENBOT_BOOL_OFF", "0");
        env::set_var("TEST_BENBOT_BOOL_BAD", "maybe");
        assert!(parse_bool("TEST_BENBOT_BOOL_ON", false));
        assert!(!parse_bool("TEST_BENBOT_BOOL_OFF", true));
        assert!(parse_bool("TEST_BENBOT_BOOL_BAD", true));
        assert!(!parse_bool("NONEXISTENT_BENBOT_BOOL", false));
        env::remove_var("TEST_BENBOT_BOOL_ON");
        env::remove_var("TEST_BENBOT_BOOL_OFF");
        env::remove_var("TEST_BENBOT_BOOL_BAD");
    }

    #[test]
    fn test_non_empty_var_blank_is_unset() {
        env::set_var("TEST_BENBOT_BLANK", "   ");
        assert_eq!(non_empty_var("TEST_BENBOT_BLANK"), None);
        env::remove_var("TEST_BENBOT_BLANK");
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.bot_username, "ben-bot");
        assert_eq!(config.slack_api_base, "https://slack.com/api");
        assert!(config.bot_token.is_empty());
        assert!(config.author_id.is_empty());
        assert!(!config.accept_invalid_certs);
    }
}
