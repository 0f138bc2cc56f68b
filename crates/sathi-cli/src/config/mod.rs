mod bot_config;
mod secrets;

pub use bot_config::{BotConfig, LlmConfig, LoggingConfig, TelegramSettings};
pub use secrets::{OPENROUTER_API_KEY_ENV, Secrets, TELEGRAM_TOKEN_ENV};
