//! Telegram Channel Implementation
//!
//! Implements bidirectional communication with Telegram via Bot API.
//! Messages are received via long-polling and replies are sent as plain text.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use futures::Stream;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::chunk::chunk_text;
use super::traits::Channel;
use super::types::{ChannelType, InboundMessage, OutboundMessage};

pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";
/// Default timeout for Telegram API calls (seconds)
const API_TIMEOUT_SECS: u64 = 30;
/// Delay before polling again after a failed `getUpdates`
#[cfg(not(test))]
const POLL_ERROR_BACKOFF: Duration = Duration::from_secs(5);
#[cfg(test)]
const POLL_ERROR_BACKOFF: Duration = Duration::from_millis(20);

/// Telegram channel configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot token from @BotFather
    pub bot_token: String,
    /// Polling timeout in seconds (default: 30)
    #[serde(default = "default_polling_timeout")]
    pub polling_timeout: u32,
    /// Bot API base URL, without the `/bot<token>` suffix
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_polling_timeout() -> u32 {
    30
}

fn default_api_base() -> String {
    DEFAULT_TELEGRAM_API_BASE.to_string()
}

impl TelegramConfig {
    /// Create a new config with just the bot token
    pub fn new(bot_token: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            polling_timeout: default_polling_timeout(),
            api_base: default_api_base(),
        }
    }

    /// Set polling timeout
    pub fn with_polling_timeout(mut self, timeout: u32) -> Self {
        self.polling_timeout = timeout;
        self
    }

    /// Point the channel at another Bot API server
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }
}

/// Telegram channel implementation
pub struct TelegramChannel {
    config: TelegramConfig,
    client: Client,
    /// Whether polling is active
    polling_active: Arc<AtomicBool>,
    /// Last update ID for long-polling
    last_update_id: Arc<AtomicI64>,
}

impl TelegramChannel {
    /// Create a new Telegram channel
    pub fn new(config: TelegramConfig) -> Self {
        Self {
            config,
            client: build_client(),
            polling_active: Arc::new(AtomicBool::new(false)),
            last_update_id: Arc::new(AtomicI64::new(0)),
        }
    }

    /// Create with just bot token
    pub fn with_token(bot_token: impl Into<String>) -> Self {
        Self::new(TelegramConfig::new(bot_token))
    }

    /// Return current last processed update ID.
    pub fn last_update_id(&self) -> i64 {
        self.last_update_id.load(Ordering::SeqCst)
    }

    /// Whether a polling task is running
    pub fn is_polling(&self) -> bool {
        self.polling_active.load(Ordering::SeqCst)
    }

    /// Ask the polling task to exit after its current request.
    pub fn stop_polling(&self) {
        self.polling_active.store(false, Ordering::SeqCst);
    }

    /// Get the API URL for a method
    fn api_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.config.api_base, self.config.bot_token, method
        )
    }

    /// Send message via Telegram API
    async fn send_message(
        &self,
        chat_id: &str,
        text: &str,
        parse_mode: Option<&str>,
    ) -> Result<TelegramMessageResponse> {
        let url = self.api_url("sendMessage");

        let mut params = serde_json::json!({
            "chat_id": chat_id,
            "text": text,
        });

        if let Some(mode) = parse_mode {
            params["parse_mode"] = serde_json::Value::String(mode.to_string());
        }

        let response = self
            .client
            .post(&url)
            .json(&params)
            .timeout(Duration::from_secs(API_TIMEOUT_SECS))
            .send()
            .await?;

        if response.status().is_success() {
            let api_response: TelegramResponse<TelegramMessageResponse> = response.json().await?;
            if api_response.ok {
                Ok(api_response
                    .result
                    .ok_or_else(|| anyhow!("Telegram returned ok but no result"))?)
            } else {
                Err(anyhow!(
                    "Telegram API error: {}",
                    api_response.description.unwrap_or_default()
                ))
            }
        } else {
            let error = response.text().await.unwrap_or_default();
            Err(anyhow!("Telegram HTTP error: {}", error))
        }
    }

    /// Poll for updates using long-polling. The offset is advanced by the
    /// caller once each update has been handed off.
    async fn poll_updates(&self) -> Result<Vec<TelegramUpdate>> {
        let url = self.api_url("getUpdates");

        let offset = self.last_update_id.load(Ordering::SeqCst);
        let params = serde_json::json!({
            "offset": if offset > 0 { offset + 1 } else { 0 },
            "timeout": self.config.polling_timeout,
            "allowed_updates": ["message"],
        });

        let response = self
            .client
            .post(&url)
            .json(&params)
            .timeout(Duration::from_secs(self.config.polling_timeout as u64 + 10))
            .send()
            .await?;

        let body: TelegramResponse<Vec<TelegramUpdate>> = response.json().await?;

        if !body.ok {
            return Err(anyhow!(
                "Telegram API error: {:?}",
                body.description.unwrap_or_default()
            ));
        }

        Ok(body.result.unwrap_or_default())
    }

    /// Convert Telegram update to InboundMessage. Only text messages with a
    /// sender are kept.
    fn convert_update(update: TelegramUpdate) -> Option<InboundMessage> {
        let message = update.message?;
        let from = message.from?;
        let text = message.text?;

        let full_name = format!(
            "{}{}",
            from.first_name.as_deref().unwrap_or(""),
            from.last_name
                .as_ref()
                .map(|l| format!(" {}", l))
                .unwrap_or_default()
        );
        let sender_name = from
            .username
            .clone()
            .or(Some(full_name))
            .filter(|s| !s.trim().is_empty());

        let metadata = serde_json::json!({
            "chat_type": message.chat.r#type,
            "chat_title": message.chat.title,
            "update_id": update.update_id,
        });

        let mut inbound = InboundMessage::new(
            format!("tg_{}", message.message_id),
            ChannelType::Telegram,
            from.id.to_string(),
            message.chat.id.to_string(),
            text,
        )
        .with_metadata(metadata);

        if let Some(name) = sender_name {
            inbound = inbound.with_sender_name(name);
        }
        if let Some(first_name) = from.first_name {
            inbound = inbound.with_first_name(first_name);
        }

        Some(inbound)
    }

    /// Test the connection by calling getMe
    pub async fn test_connection(&self) -> Result<TelegramUser> {
        let url = self.api_url("getMe");
        let response = self
            .client
            .get(&url)
            .timeout(Duration::from_secs(API_TIMEOUT_SECS))
            .send()
            .await?;

        let body: TelegramResponse<TelegramUser> = response.json().await?;

        if body.ok {
            Ok(body
                .result
                .ok_or_else(|| anyhow!("Telegram returned ok but no result"))?)
        } else {
            Err(anyhow!(
                "Telegram API error: {}",
                body.description.unwrap_or_default()
            ))
        }
    }

    /// Send typing indicator (chat action) to show the bot is processing
    async fn send_typing_action(&self, chat_id: &str) -> Result<()> {
        let url = self.api_url("sendChatAction");

        let params = serde_json::json!({
            "chat_id": chat_id,
            "action": "typing",
        });

        let response = self
            .client
            .post(&url)
            .json(&params)
            .timeout(Duration::from_secs(API_TIMEOUT_SECS))
            .send()
            .await?;

        if response.status().is_success() {
            let api_response: TelegramResponse<bool> = response.json().await?;
            if api_response.ok {
                debug!("Sent typing indicator to {}", chat_id);
                Ok(())
            } else {
                Err(anyhow!(
                    "Telegram API error: {}",
                    api_response.description.unwrap_or_default()
                ))
            }
        } else {
            let error = response.text().await.unwrap_or_default();
            Err(anyhow!("Telegram HTTP error: {}", error))
        }
    }
}

fn build_client() -> Client {
    let mut builder = Client::builder();
    if cfg!(test) || std::env::var_os("SATHI_DISABLE_SYSTEM_PROXY").is_some() {
        builder = builder.no_proxy();
    }
    builder.build().unwrap_or_else(|e| {
        warn!("Falling back to default Telegram HTTP client: {}", e);
        Client::new()
    })
}

#[async_trait]
impl Channel for TelegramChannel {
    fn channel_type(&self) -> ChannelType {
        ChannelType::Telegram
    }

    fn is_configured(&self) -> bool {
        !self.config.bot_token.is_empty()
    }

    async fn send(&self, message: OutboundMessage) -> Result<()> {
        let parse_mode = message.parse_mode.as_deref();

        for chunk in chunk_text(&message.content, None) {
            self.send_message(&message.conversation_id, &chunk, parse_mode)
                .await?;
        }

        Ok(())
    }

    async fn send_typing(&self, conversation_id: &str) -> Result<()> {
        self.send_typing_action(conversation_id).await
    }

    fn start_receiving(&self) -> Option<Pin<Box<dyn Stream<Item = InboundMessage> + Send>>> {
        if !self.is_configured() {
            return None;
        }
        if self.is_polling() {
            warn!("Telegram polling already running");
            return None;
        }

        let (tx, rx) = mpsc::unbounded_channel();
        let polling_active = self.polling_active.clone();
        let channel = TelegramChannel {
            config: self.config.clone(),
            client: self.client.clone(),
            polling_active: polling_active.clone(),
            last_update_id: self.last_update_id.clone(),
        };

        polling_active.store(true, Ordering::SeqCst);
        tokio::spawn(async move {
            info!("Starting Telegram polling");

            while polling_active.load(Ordering::SeqCst) {
                match channel.poll_updates().await {
                    Ok(updates) => {
                        for update in updates {
                            let update_id = update.update_id;
                            if let Some(message) = Self::convert_update(update) {
                                debug!(
                                    "Received Telegram message: {} from {}",
                                    message.id, message.sender_id
                                );
                                // Unforwarded updates keep the offset so the next poll redelivers them.
                                if tx.send(message).is_err() {
                                    warn!("Message receiver dropped, stopping polling");
                                    polling_active.store(false, Ordering::SeqCst);
                                    break;
                                }
                            }
                            channel.last_update_id.store(update_id, Ordering::SeqCst);
                        }
                    }
                    Err(e) => {
                        error!("Telegram polling error: {}", e);
                        tokio::time::sleep(POLL_ERROR_BACKOFF).await;
                    }
                }
            }

            info!("Telegram polling stopped");
        });

        Some(Box::pin(
            tokio_stream::wrappers::UnboundedReceiverStream::new(rx),
        ))
    }
}

// ============================================================================
// Telegram API Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct TelegramResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TelegramUpdate {
    update_id: i64,
    message: Option<TelegramMessage>,
}

#[derive(Debug, Deserialize)]
struct TelegramMessage {
    message_id: i64,
    from: Option<TelegramUser>,
    chat: TelegramChat,
    text: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelegramUser {
    pub id: i64,
    pub is_bot: bool,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TelegramChat {
    id: i64,
    r#type: String,
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TelegramMessageResponse {
    #[allow(dead_code)]
    message_id: i64,
}

// ============================================================================
// Tests
// ============================================================================
