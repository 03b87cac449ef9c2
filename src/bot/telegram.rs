//! Minimal Telegram Bot API client.
//!
//! Only the three methods the bot needs are implemented: `getMe`,
//! `getUpdates` (long polling) and `sendMessage`.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

/// Errors talking to the Bot API.
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("telegram request failed: {0}")]
    Http(reqwest::Error),
    #[error("telegram api error: {0}")]
    Api(String),
}

impl From<reqwest::Error> for BotError {
    fn from(e: reqwest::Error) -> Self {
        // The request URL embeds the bot token.
        Self::Http(e.without_url())
    }
}

/// An incoming update. Only message updates are requested.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    #[serde(default)]
    pub from: Option<User>,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

/// Chat transport used by [`crate::bot::Bot`].
///
/// # Implementations
///
/// - [`TelegramClient`] - HTTPS client for the Telegram Bot API
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Returns the bot's own account; doubles as a token check.
    async fn get_me(&self) -> Result<User, BotError>;

    /// Long-polls for updates with `update_id >= offset`.
    async fn get_updates(&self, offset: i64, timeout: Duration) -> Result<Vec<Update>, BotError>;

    /// Sends a Markdown-formatted text message.
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), BotError>;
}

/// HTTPS client for the Telegram Bot API.
pub struct TelegramClient {
    http: reqwest::Client,
    endpoint: String,
}

impl TelegramClient {
    /// Creates a client for `api_url` authenticated with `token`.
    ///
    /// The HTTP timeout is set slightly above `poll_timeout` so long polls
    /// are not cut short.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::Http`] if the HTTP client cannot be built.
    pub fn new(api_url: &str, token: &str, poll_timeout: Duration) -> Result<Self, BotError> {
        let http = reqwest::Client::builder()
            .timeout(poll_timeout + Duration::from_secs(10))
            .build()?;

        Ok(Self {
            http,
            endpoint: format!("{}/bot{}", api_url.trim_end_matches('/'), token),
        })
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, body: Value) -> Result<T, BotError> {
        let response: ApiResponse<T> = self
            .http
            .post(format!("{}/{}", self.endpoint, method))
            .json(&body)
            .send()
            .await?
            .json()
            .await?;

        match response {
            ApiResponse {
                ok: true,
                result: Some(result),
                ..
            } => Ok(result),
            ApiResponse { description, .. } => Err(BotError::Api(
                description.unwrap_or_else(|| format!("{method} failed")),
            )),
        }
    }
}

#[async_trait]
impl ChatApi for TelegramClient {
    async fn get_me(&self) -> Result<User, BotError> {
        self.call("getMe", json!({})).await
    }

    async fn get_updates(&self, offset: i64, timeout: Duration) -> Result<Vec<Update>, BotError> {
        self.call(
            "getUpdates",
            json!({
                "offset": offset,
                "timeout": timeout.as_secs(),
                "allowed_updates": ["message"],
            }),
        )
        .await
    }

    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), BotError> {
        self.call::<Value>(
            "sendMessage",
            json!({
                "chat_id": chat_id,
                "text": text,
                "parse_mode": "Markdown",
            }),
        )
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_message_update() {
        let raw = r#"{
            "update_id": 1001,
            "message": {
                "message_id": 7,
                "from": {"id": 5, "is_bot": false, "first_name": "Ann", "username": "ann"},
                "chat": {"id": 42, "type": "private"},
                "date": 1700000000,
                "text": "https://example.com/page"
            }
        }"#;

        let update: Update = serde_json::from_str(raw).unwrap();
        let message = update.message.unwrap();

        assert_eq!(update.update_id, 1001);
        assert_eq!(message.chat.id, 42);
        assert_eq!(message.from.unwrap().username.as_deref(), Some("ann"));
        assert_eq!(message.text.as_deref(), Some("https://example.com/page"));
    }

    #[test]
    fn test_deserialize_update_without_message() {
        let update: Update =
            serde_json::from_str(r#"{"update_id": 5, "edited_message": {}}"#).unwrap();

        assert!(update.message.is_none());
    }

    #[test]
    fn test_deserialize_error_response() {
        let response: ApiResponse<Vec<Update>> = serde_json::from_str(
            r#"{"ok": false, "error_code": 401, "description": "Unauthorized"}"#,
        )
        .unwrap();

        assert!(!response.ok);
        assert!(response.result.is_none());
        assert_eq!(response.description.as_deref(), Some("Unauthorized"));
    }

    #[test]
    fn test_client_endpoint_embeds_token() {
        let client =
            TelegramClient::new("https://api.telegram.org/", "123:abc", Duration::from_secs(1))
                .unwrap();

        assert_eq!(client.endpoint, "https://api.telegram.org/bot123:abc");
    }
}
