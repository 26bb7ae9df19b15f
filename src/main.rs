use std::sync::Arc;

use anyhow::Context;

use mushaf_bot::assets::{AssetResolver, FsAssetStore};
use mushaf_bot::bot::Bot;
use mushaf_bot::channels::{Channel, CliChannel, TelegramChannel};
use mushaf_bot::config::{Config, Transport};
use mushaf_bot::dispatch::Dispatcher;
use mushaf_bot::health;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    // A missing token stops startup before anything is served.
    let config = Config::from_env()
        .context("invalid configuration (set TOKEN, or BOT_CONSOLE=1 to chat locally)")?;

    eprintln!("📖 Mushaf bot v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Pages: {}", config.pages_dir.display());
    eprintln!("   Health: http://0.0.0.0:{}/", config.port);

    // ── Liveness sidecar ────────────────────────────────────────────────
    let health_handle = health::spawn_health_server(config.port);
    let health_watch = tokio::spawn(async move {
        match health_handle.await {
            Ok(Ok(())) => tracing::warn!("Health server exited"),
            Ok(Err(e)) => tracing::error!(error = %e, "Health server failed"),
            Err(e) => tracing::error!(error = %e, "Health server task panicked"),
        }
    });

    // ── Dispatcher + channel ────────────────────────────────────────────
    let assets: Arc<dyn AssetResolver> = Arc::new(FsAssetStore::new(config.pages_dir.clone()));
    let dispatcher = Arc::new(Dispatcher::standard(assets));
    tracing::info!(rules = dispatcher.rules().len(), "Rule table loaded");

    let channel: Arc<dyn Channel> = match &config.transport {
        Transport::Telegram { token } => Arc::new(TelegramChannel::new(token.clone())),
        Transport::Console => Arc::new(CliChannel::new()),
    };
    eprintln!("   Channel: {}\n", channel.name());
    let bot = Bot::new(dispatcher, channel);

    let bot_task = async {
        match bot.run().await {
            Ok(()) => tracing::warn!("Bot stopped"),
            Err(e) => tracing::error!(error = %e, "Bot failed"),
        }
    };

    // Either side may stop on its own; the process lives until both have.
    let _ = tokio::join!(bot_task, health_watch);

    Ok(())
}
