use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::watch;
use url_shortener_bot::application::services::ShortenerService;
use url_shortener_bot::bot::{Bot, ChatApi, MessageHandler, TelegramClient};
use url_shortener_bot::config;
use url_shortener_bot::domain::repositories::UrlRepository;
use url_shortener_bot::infrastructure::persistence::MemoryUrlRepository;
use url_shortener_bot::server;
use url_shortener_bot::state::AppState;
use url_shortener_bot::telemetry;
use url_shortener_bot::utils::code_generator::RandomAliasGenerator;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_from_env()?;
    telemetry::init(&config.log_level, &config.log_format)?;

    tracing::info!(env = %config.env, "Starting application");
    config.print_summary();

    let repository: Arc<dyn UrlRepository> = Arc::new(MemoryUrlRepository::new());
    let shortener = Arc::new(ShortenerService::new(
        repository,
        Arc::new(RandomAliasGenerator),
        config.shortener_config(),
    ));

    let client = TelegramClient::new(
        &config.telegram_api_url,
        &config.telegram_token,
        config.telegram_poll_timeout,
    )
    .context("Failed to create Telegram client")?;
    let me = client
        .get_me()
        .await
        .context("Failed to initialize bot")?;
    tracing::info!(
        username = me.username.as_deref().unwrap_or(""),
        "Authorized on account"
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let bot = Bot::new(
        Arc::new(client),
        MessageHandler::new(shortener.clone(), config.base_url.clone()),
        config.telegram_poll_timeout,
    );
    let bot_task = tokio::spawn(bot.run(shutdown_rx.clone()));

    let listen_addr = config.listen_addr.clone();
    let request_timeout = config.request_timeout;
    let mut server_task = tokio::spawn(async move {
        server::run(
            &listen_addr,
            request_timeout,
            AppState::new(shortener),
            shutdown_rx,
        )
        .await
    });

    let server_result = tokio::select! {
        _ = server::shutdown_signal() => None,
        result = &mut server_task => {
            tracing::error!("HTTP server exited, shutting down");
            Some(result)
        }
    };

    let _ = shutdown_tx.send(true);

    let server_result = match server_result {
        Some(result) => result,
        None => server_task.await,
    };
    bot_task.await.context("Bot task panicked")?;
    server_result.context("HTTP server task panicked")??;

    tracing::info!("Application shut down gracefully");
    Ok(())
}
