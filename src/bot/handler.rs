//! Turns incoming chat text into reply text.

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::application::services::ShortenerService;

pub const MSG_HELP: &str = "Hello! I am a URL Shortener bot.
Just send me a valid URL and I will shorten it for you.
For example: https://google.com";
pub const MSG_UNKNOWN_COMMAND: &str = "I don't know this command.";
pub const MSG_INVALID_URL: &str = "Please send me a valid URL. Example: https://google.com";
pub const MSG_SHORTEN_FAILED: &str = "Sorry, I could not shorten this URL. Please try again later.";

/// Success reply; the link is wrapped in backticks for Markdown.
pub fn success_message(short_url: &str) -> String {
    format!("Here is your shortened link: `{}`", short_url)
}

/// Allocation entry point for the chat transport.
#[derive(Clone)]
pub struct MessageHandler {
    shortener: Arc<ShortenerService>,
    base_url: String,
}

impl MessageHandler {
    pub fn new(shortener: Arc<ShortenerService>, base_url: impl Into<String>) -> Self {
        Self {
            shortener,
            base_url: base_url.into(),
        }
    }

    /// Computes the reply for one message.
    ///
    /// - `/start` → help text, any other command → [`MSG_UNKNOWN_COMMAND`]
    /// - text that is not an absolute URI, or carries control characters,
    ///   → [`MSG_INVALID_URL`]
    /// - otherwise the text is shortened; failures answer [`MSG_SHORTEN_FAILED`]
    pub async fn reply_to(&self, text: &str) -> String {
        let text = text.trim();

        if let Some(command) = parse_command(text) {
            return match command {
                "start" => MSG_HELP.to_string(),
                _ => MSG_UNKNOWN_COMMAND.to_string(),
            };
        }

        if !is_absolute_url(text) {
            debug!("Message is not a valid URL");
            return MSG_INVALID_URL.to_string();
        }

        match self.shortener.shorten(text).await {
            Ok(mapping) => {
                info!(alias = %mapping.alias, "Shortened URL");
                success_message(&mapping.short_url(&self.base_url))
            }
            Err(e) => {
                error!(error = %e, "Failed to shorten URL");
                MSG_SHORTEN_FAILED.to_string()
            }
        }
    }
}

/// URL parsing drops embedded tabs and newlines, so they are rejected first;
/// a stored target must be usable verbatim as a `Location` header.
fn is_absolute_url(text: &str) -> bool {
    !text.chars().any(|c| c.is_ascii_control()) && url::Url::parse(text).is_ok()
}

/// Extracts the command name from `/command@botname args`.
fn parse_command(text: &str) -> Option<&str> {
    let rest = text.strip_prefix('/')?;
    let word = rest.split_whitespace().next().unwrap_or("");
    let name = word.split('@').next().unwrap_or("");
    Some(name)
}
