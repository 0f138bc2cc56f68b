//! Sathi AI - chat-completion client layer
//!
//! This crate provides:
//! - The `LlmClient` trait and request/response types
//! - `OpenAIClient` for OpenAI-compatible endpoints (OpenRouter by default)
//! - A scripted `MockLlmClient` behind the `test-utils` feature

pub mod error;
mod http_client;
pub mod llm;

// Re-export commonly used types
pub use error::{AiError, Result};
pub use llm::{CompletionRequest, CompletionResponse, LlmClient, Message, OpenAIClient, Role};
