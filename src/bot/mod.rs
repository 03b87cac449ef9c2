//! Telegram bot transport.
//!
//! The bot long-polls the Bot API and handles every message on its own task,
//! so allocations for different chats run concurrently.
//!
//! # Modules
//!
//! - [`telegram`] - Bot API client and wire types
//! - [`handler`] - Reply logic (commands, URL check, allocation)

pub mod handler;
pub mod telegram;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinSet;
use tracing::{Instrument, error, info, info_span};

pub use handler::MessageHandler;
pub use telegram::{BotError, ChatApi, TelegramClient, Update};

/// Pause before polling again after a failed `getUpdates`.
const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Long-polling bot loop.
#[derive(Clone)]
pub struct Bot {
    api: Arc<dyn ChatApi>,
    handler: MessageHandler,
    poll_timeout: Duration,
}

impl Bot {
    pub fn new(api: Arc<dyn ChatApi>, handler: MessageHandler, poll_timeout: Duration) -> Self {
        Self {
            api,
            handler,
            poll_timeout,
        }
    }

    /// Polls for updates until `shutdown` flips to `true`.
    ///
    /// Messages still being handled when shutdown arrives are awaited before
    /// returning.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!("Starting bot");

        let mut offset = 0;
        let mut in_flight = JoinSet::new();

        loop {
            let result = tokio::select! {
                _ = stop_requested(&mut shutdown) => break,
                result = self.api.get_updates(offset, self.poll_timeout) => result,
            };

            match result {
                Ok(updates) => {
                    for update in updates {
                        offset = offset.max(update.update_id + 1);
                        let bot = self.clone();
                        in_flight.spawn(async move { bot.handle_update(update).await });
                    }
                }
                Err(e) => {
                    error!(error = %e, "Failed to fetch updates");
                    tokio::select! {
                        _ = stop_requested(&mut shutdown) => break,
                        _ = tokio::time::sleep(RETRY_DELAY) => {}
                    }
                }
            }

            while in_flight.try_join_next().is_some() {}
        }

        info!("Stopping bot...");
        while in_flight.join_next().await.is_some() {}
    }

    /// Handles a single update and sends the reply.
    pub async fn handle_update(&self, update: Update) {
        let Some(message) = update.message else {
            return;
        };

        let chat_id = message.chat.id;
        let username = message
            .from
            .as_ref()
            .and_then(|user| user.username.clone())
            .unwrap_or_default();
        let text = message.text.unwrap_or_default();

        let span = info_span!("message", username = %username, chat_id);
        async {
            info!(text = %text, "Received message");

            let reply = self.handler.reply_to(&text).await;

            if let Err(e) = self.api.send_message(chat_id, &reply).await {
                error!(error = %e, "Failed to send message");
            }
        }
        .instrument(span)
        .await
    }
}

/// Resolves once shutdown is requested or the sender is gone.
async fn stop_requested(shutdown: &mut watch::Receiver<bool>) {
    let _ = shutdown.wait_for(|stop| *stop).await;
}
