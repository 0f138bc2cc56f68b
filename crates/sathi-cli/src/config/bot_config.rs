//! Bot configuration file support
//!
//! Loads configuration from ~/.config/sathi/config.toml. Every section and
//! field is optional; secrets never live here.

use anyhow::{Context, Result, bail};
use sathi_ai::llm::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT};
use sathi_core::channel::telegram::DEFAULT_TELEGRAM_API_BASE;
use sathi_core::{ChatDispatcherConfig, MemoryConfig, Persona};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Bot configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BotConfig {
    /// Completion API settings
    #[serde(default)]
    pub llm: LlmConfig,
    /// Telegram transport settings
    #[serde(default)]
    pub telegram: TelegramSettings,
    /// Conversation memory limits
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Bot identity
    #[serde(default)]
    pub persona: Persona,
    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Completion API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Request timeout in seconds; 0 disables the timeout.
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        let chat = ChatDispatcherConfig::default();
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: chat.temperature,
            max_tokens: chat.max_tokens,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl LlmConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

/// Telegram transport settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramSettings {
    /// Long-polling timeout in seconds
    pub polling_timeout: u32,
    /// Show "typing..." while waiting for the model
    pub typing_indicator: bool,
    /// Bot API base URL
    pub api_base: String,
}

impl Default for TelegramSettings {
    fn default() -> Self {
        Self {
            polling_timeout: 30,
            typing_indicator: true,
            api_base: DEFAULT_TELEGRAM_API_BASE.to_string(),
        }
    }
}

/// Log output settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write daily-rotated log files here instead of stderr
    pub dir: Option<PathBuf>,
    /// Default filter when RUST_LOG is unset (e.g. "info", "sathi_core=debug")
    pub level: Option<String>,
}

impl BotConfig {
    /// Load from `path`, or from the default path when `None`.
    ///
    /// An explicit path must exist. A missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    bail!("Config file not found: {}", path.display());
                }
                Self::load_from_path(path)
            }
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_from_path(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Parse a config file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Get the default configuration file path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("sathi").join("config.toml"))
    }

    /// Dispatcher settings derived from this config
    pub fn dispatcher_config(&self) -> ChatDispatcherConfig {
        ChatDispatcherConfig {
            temperature: self.llm.temperature,
            max_tokens: self.llm.max_tokens,
            send_typing_indicator: self.telegram.typing_indicator,
            ..ChatDispatcherConfig::default()
        }
    }
}
