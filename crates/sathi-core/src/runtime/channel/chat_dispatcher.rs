//! Chat Dispatcher - Handles natural language messages via the completion API.
//!
//! For each message: detect the language, assemble the system prompt with the
//! user's recent memory, call the model, then reply. Memory is written only
//! when the model answered.

use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::channel::{Channel, InboundMessage, OutboundMessage};
use crate::language;
use crate::memory::MemoryStore;
use crate::prompt::PromptAssembler;
use sathi_ai::llm::FinishReason;
use sathi_ai::{AiError, CompletionRequest, LlmClient};

/// Configuration for the ChatDispatcher.
#[derive(Debug, Clone)]
pub struct ChatDispatcherConfig {
    /// Sampling temperature sent with every request.
    pub temperature: f32,
    /// Maximum tokens the model may generate.
    pub max_tokens: u32,
    /// Whether to send typing indicator while processing.
    pub send_typing_indicator: bool,
    /// Display name used when the sender has no first name.
    pub fallback_name: String,
}

impl Default for ChatDispatcherConfig {
    fn default() -> Self {
        Self {
            temperature: 0.8,
            max_tokens: 500,
            send_typing_indicator: true,
            fallback_name: "Friend".to_string(),
        }
    }
}

/// Error types for chat operations.
#[derive(Debug)]
pub enum ChatError {
    /// The provider answered with a non-success status.
    Http { status: u16, body: String },
    /// Transport failure or unusable response.
    Failed(String),
}

impl ChatError {
    /// Reply text shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Http { status, body } => format!("⚠️ Error: {} - {}", status, body),
            Self::Failed(msg) => format!("🚫 Failed: {}", msg),
        }
    }
}

impl From<AiError> for ChatError {
    fn from(err: AiError) -> Self {
        match err {
            AiError::LlmHttp {
                status, message, ..
            } => Self::Http {
                status,
                body: message,
            },
            other => Self::Failed(other.to_string()),
        }
    }
}

impl std::fmt::Display for ChatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http { status, body } => write!(f, "HTTP {}: {}", status, body),
            Self::Failed(msg) => write!(f, "Completion failed: {}", msg),
        }
    }
}

impl std::error::Error for ChatError {}

/// Dispatcher for natural language messages.
pub struct ChatDispatcher {
    llm: Arc<dyn LlmClient>,
    memory: Arc<MemoryStore>,
    assembler: PromptAssembler,
    channel: Arc<dyn Channel>,
    config: ChatDispatcherConfig,
}

impl ChatDispatcher {
    /// Create a new ChatDispatcher.
    pub fn new(
        llm: Arc<dyn LlmClient>,
        memory: Arc<MemoryStore>,
        assembler: PromptAssembler,
        channel: Arc<dyn Channel>,
        config: ChatDispatcherConfig,
    ) -> Self {
        Self {
            llm,
            memory,
            assembler,
            channel,
            config,
        }
    }

    pub fn config(&self) -> &ChatDispatcherConfig {
        &self.config
    }

    pub fn assembler(&self) -> &PromptAssembler {
        &self.assembler
    }

    pub fn memory(&self) -> &Arc<MemoryStore> {
        &self.memory
    }

    pub fn channel(&self) -> &Arc<dyn Channel> {
        &self.channel
    }

    /// System prompt for `message`, reading the sender's memory.
    pub fn system_prompt_for(&self, message: &InboundMessage) -> String {
        let tag = language::detect(&message.content);
        let name = message.display_name(&self.config.fallback_name);
        let context = self.memory.recent_context(&message.sender_id);

        debug!(
            "Detected language {} for message {} from {}",
            tag, message.id, message.sender_id
        );

        self.assembler.build(name, &tag.instruction(), &context)
    }

    /// Send one system prompt plus user turn and return the model's text.
    pub async fn complete_chat(
        &self,
        system_prompt: &str,
        user_text: &str,
    ) -> std::result::Result<String, ChatError> {
        let request = CompletionRequest::system_and_user(system_prompt, user_text)
            .with_temperature(self.config.temperature)
            .with_max_tokens(self.config.max_tokens);

        let response = self.llm.complete(request).await?;

        if let Some(usage) = &response.usage {
            debug!(
                "Token usage (model: {}): prompt {}, completion {}, total {}",
                self.llm.model(),
                usage.prompt_tokens,
                usage.completion_tokens,
                usage.total_tokens
            );
        }
        if response.finish_reason == FinishReason::MaxTokens {
            warn!(
                "Reply hit the {} token limit and may be cut off",
                self.config.max_tokens
            );
        }

        Ok(response.into_text()?)
    }

    /// Run the chat pipeline for a message and send the reply.
    ///
    /// Completion failures become reply text; only channel send errors are
    /// returned.
    pub async fn dispatch(&self, message: &InboundMessage) -> Result<()> {
        let system_prompt = self.system_prompt_for(message);

        if self.config.send_typing_indicator {
            debug!("Sending typing indicator to {}", message.conversation_id);
            if let Err(e) = self.channel.send_typing(&message.conversation_id).await {
                warn!("Failed to send typing indicator: {}", e);
            }
        }

        let reply = match self.complete_chat(&system_prompt, &message.content).await {
            Ok(text) => {
                self.memory
                    .record(&message.sender_id, &message.content, &text);
                info!(
                    "Chat response ready for {} (model: {}, output length: {} chars)",
                    message.sender_id,
                    self.llm.model(),
                    text.chars().count()
                );
                text
            }
            Err(e) => {
                warn!("Completion failed for {}: {}", message.sender_id, e);
                e.user_message()
            }
        };

        let response = OutboundMessage::new(&message.conversation_id, reply);
        self.channel.send(response).await
    }
}
