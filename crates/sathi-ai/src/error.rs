//! Error types for the AI module

use thiserror::Error;

/// AI module error types
#[derive(Error, Debug)]
pub enum AiError {
    #[error("LLM error: {0}")]
    Llm(String),

    #[error("{provider} API error ({status}): {message}")]
    LlmHttp {
        provider: String,
        status: u16,
        message: String,
    },

    #[error("Invalid response format: {0}")]
    InvalidFormat(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AiError {
    /// HTTP status code returned by the provider, if the request got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::LlmHttp { status, .. } => Some(*status),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for AI operations
pub type Result<T> = std::result::Result<T, AiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_http_display_includes_status_and_body() {
        let err = AiError::LlmHttp {
            provider: "OpenRouter".to_string(),
            status: 401,
            message: "invalid key".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("401"));
        assert!(text.contains("invalid key"));
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_non_http_errors_have_no_status() {
        assert_eq!(AiError::Llm("boom".to_string()).status(), None);
        assert_eq!(
            AiError::InvalidFormat("no choices".to_string()).status(),
            None
        );
    }
}
