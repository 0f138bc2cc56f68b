//! Conversation Memory
//!
//! Per-user rolling log of (user message, bot response) exchanges kept for the
//! lifetime of the process. Nothing is persisted.

mod store;

pub use store::{ConversationLog, Exchange, MemoryConfig, MemoryStore};

/// Default number of exchanges kept per user
pub const DEFAULT_MAX_EXCHANGES: usize = 10;

/// Default number of exchanges rendered into the prompt
pub const DEFAULT_CONTEXT_EXCHANGES: usize = 3;
