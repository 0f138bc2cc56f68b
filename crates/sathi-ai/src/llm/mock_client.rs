//! Deterministic mock LLM client for dispatcher and pipeline tests.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::{AiError, Result};

use super::{CompletionRequest, CompletionResponse, FinishReason, LlmClient};

/// Scripted outcome for one completion call.
#[derive(Debug, Clone)]
pub enum MockStep {
    /// Return a plain assistant message.
    Text(String),
    /// Return a provider HTTP error with the given status and body.
    HttpError { status: u16, body: String },
    /// Return a generic LLM error.
    Error(String),
}

impl MockStep {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    pub fn http_error(status: u16, body: impl Into<String>) -> Self {
        Self::HttpError {
            status,
            body: body.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }
}

/// A deterministic mock LLM client driven by scripted steps.
///
/// Every request is captured so tests can assert on the prompt that was sent.
#[derive(Debug, Clone, Default)]
pub struct MockLlmClient {
    model: String,
    script: Arc<Mutex<VecDeque<MockStep>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockLlmClient {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    pub fn from_steps(model: impl Into<String>, steps: Vec<MockStep>) -> Self {
        Self {
            model: model.into(),
            script: Arc::new(Mutex::new(VecDeque::from(steps))),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub async fn push_step(&self, step: MockStep) {
        self.script.lock().await.push_back(step);
    }

    /// All requests received so far, oldest first.
    pub async fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    fn provider(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        self.requests.lock().await.push(request);

        let step = self
            .script
            .lock()
            .await
            .pop_front()
            .ok_or_else(|| AiError::Llm("mock script exhausted".to_string()))?;

        match step {
            MockStep::Text(content) => Ok(CompletionResponse {
                content: Some(content),
                finish_reason: FinishReason::Stop,
                usage: None,
            }),
            MockStep::HttpError { status, body } => Err(AiError::LlmHttp {
                provider: "mock".to_string(),
                status,
                message: body,
            }),
            MockStep::Error(message) => Err(AiError::Llm(message)),
        }
    }
}
