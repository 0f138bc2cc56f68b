use anyhow::{Context, Result};
use colored::Colorize;
use sathi_ai::{LlmClient, OpenAIClient};
use sathi_core::channel::{Channel, TelegramChannel, TelegramConfig};
use sathi_core::runtime::MessageHandlerConfig;
use sathi_core::{ChatDispatcher, MemoryStore, PromptAssembler, start_message_handler};
use std::sync::Arc;
use tracing::info;

use crate::config::{BotConfig, Secrets};

/// Start the bot and serve until Ctrl-C.
pub async fn run_bot(config: &BotConfig) -> Result<()> {
    let secrets = Secrets::from_env()?;

    let llm = OpenAIClient::new(&secrets.openrouter_api_key)?
        .with_model(&config.llm.model)
        .with_base_url(&config.llm.base_url)
        .with_timeout(config.llm.timeout())?;
    info!(
        "Using {} model {} at {}",
        llm.provider(),
        llm.model(),
        config.llm.base_url
    );

    let telegram = Arc::new(TelegramChannel::new(
        TelegramConfig::new(&secrets.telegram_token)
            .with_polling_timeout(config.telegram.polling_timeout)
            .with_api_base(&config.telegram.api_base),
    ));
    let me = telegram
        .test_connection()
        .await
        .context("Telegram token check failed")?;
    info!(
        "Connected to Telegram as @{}",
        me.username.as_deref().unwrap_or("unknown")
    );

    let channel: Arc<dyn Channel> = telegram.clone();
    let dispatcher = Arc::new(ChatDispatcher::new(
        Arc::new(llm),
        Arc::new(MemoryStore::new(config.memory.clone())),
        PromptAssembler::new(config.persona.clone()),
        channel,
        config.dispatcher_config(),
    ));

    let handler = start_message_handler(dispatcher, MessageHandlerConfig::default());

    println!(
        "{}",
        "🤖✨ Enhanced Multilingual Emotional Bot is now running...".green()
    );
    println!("Features: Emotion Detection 🎭 | All Languages 🌍 | Memory 🧠");

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;

    info!("Shutting down");
    handler.abort();
    telegram.stop_polling();
    Ok(())
}
