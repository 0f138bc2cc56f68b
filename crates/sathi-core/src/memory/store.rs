use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{DEFAULT_CONTEXT_EXCHANGES, DEFAULT_MAX_EXCHANGES};

/// One recorded exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub timestamp: DateTime<Utc>,
    pub user_message: String,
    pub bot_response: String,
}

impl Exchange {
    pub fn new(user_message: impl Into<String>, bot_response: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            user_message: user_message.into(),
            bot_response: bot_response.into(),
        }
    }
}

/// Exchanges for one user, oldest first
#[derive(Debug, Clone, Default)]
pub struct ConversationLog {
    exchanges: VecDeque<Exchange>,
    /// Store-wide sequence number of the latest write, used for user eviction.
    last_seq: u64,
}

impl ConversationLog {
    /// Append and drop from the front until at most `max` exchanges remain.
    fn push(&mut self, exchange: Exchange, max: usize, seq: u64) {
        self.exchanges.push_back(exchange);
        while self.exchanges.len() > max {
            self.exchanges.pop_front();
        }
        self.last_seq = seq;
    }

    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Exchange> {
        self.exchanges.iter()
    }

    /// The last `n` exchanges in chronological order
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &Exchange> {
        self.exchanges
            .iter()
            .skip(self.exchanges.len().saturating_sub(n))
    }
}

/// Memory limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Exchanges kept per user (FIFO)
    pub max_exchanges: usize,
    /// Exchanges rendered by `recent_context`
    pub context_exchanges: usize,
    /// Users kept at once; `None` keeps every user for the process lifetime.
    pub max_users: Option<usize>,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            max_exchanges: DEFAULT_MAX_EXCHANGES,
            context_exchanges: DEFAULT_CONTEXT_EXCHANGES,
            max_users: None,
        }
    }
}

/// In-process mapping from user id to conversation log.
///
/// Writes for one user are serialised by the map's shard lock, so the
/// per-user length bound holds even with concurrent handlers.
#[derive(Debug, Default)]
pub struct MemoryStore {
    logs: DashMap<String, ConversationLog>,
    config: MemoryConfig,
    seq: AtomicU64,
}

impl MemoryStore {
    pub fn new(config: MemoryConfig) -> Self {
        Self {
            logs: DashMap::new(),
            config,
            seq: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    /// Record an exchange for `user_id`, creating the log on first use.
    pub fn record(&self, user_id: &str, user_message: &str, bot_response: &str) {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let max = self.config.max_exchanges.max(1);
        {
            let mut log = self.logs.entry(user_id.to_string()).or_default();
            log.push(Exchange::new(user_message, bot_response), max, seq);
        }
        self.evict_idle_users(user_id);
    }

    /// Transcript of the most recent exchanges, or an empty string for an unknown user.
    pub fn recent_context(&self, user_id: &str) -> String {
        let Some(log) = self.logs.get(user_id) else {
            return String::new();
        };

        let mut context = String::from("\nPrevious conversation:\n");
        for exchange in log.recent(self.config.context_exchanges) {
            context.push_str(&format!("User: {}\n", exchange.user_message));
            context.push_str(&format!("You: {}\n", exchange.bot_response));
        }
        context
    }

    /// Copy of a user's log, oldest first
    pub fn history(&self, user_id: &str) -> Vec<Exchange> {
        self.logs
            .get(user_id)
            .map(|log| log.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self, user_id: &str) -> usize {
        self.logs.get(user_id).map(|log| log.len()).unwrap_or(0)
    }

    pub fn user_count(&self) -> usize {
        self.logs.len()
    }

    /// Drop everything remembered about a user. Returns whether a log existed.
    pub fn forget(&self, user_id: &str) -> bool {
        self.logs.remove(user_id).is_some()
    }

    fn evict_idle_users(&self, keep: &str) {
        let Some(max_users) = self.config.max_users else {
            return;
        };

        while self.logs.len() > max_users.max(1) {
            let oldest = self
                .logs
                .iter()
                .filter(|entry| entry.key() != keep)
                .min_by_key(|entry| entry.value().last_seq)
                .map(|entry| entry.key().clone());

            let Some(user_id) = oldest else {
                break;
            };
            self.logs.remove(&user_id);
            debug!("Evicted conversation memory for idle user {}", user_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> MemoryStore {
        MemoryStore::new(MemoryConfig::default())
    }

    #[test]
    fn test_unknown_user_has_empty_context() {
        let store = store();
        assert_eq!(store.recent_context("nobody"), "");
        assert_eq!(store.len("nobody"), 0);
        assert!(store.history("nobody").is_empty());
    }

    #[test]
    fn test_record_creates_log() {
        let store = store();
        store.record("42", "hi", "hello!");

        assert_eq!(store.len("42"), 1);
        assert_eq!(store.user_count(), 1);
        let history = store.history("42");
        assert_eq!(history[0].user_message, "hi");
        assert_eq!(history[0].bot_response, "hello!");
    }

    #[test]
    fn test_eleven_records_keep_ten_most_recent() {
        let store = store();
        for i in 0..11 {
            store.record("42", &format!("msg {i}"), &format!("reply {i}"));
        }

        let history = store.history("42");
        assert_eq!(history.len(), 10);
        assert_eq!(history.first().unwrap().user_message, "msg 1");
        assert_eq!(history.last().unwrap().user_message, "msg 10");
    }

    #[test]
    fn test_recent_context_returns_last_three_in_order() {
        let store = store();
        for i in 1..=5 {
            store.record("42", &format!("msg {i}"), &format!("reply {i}"));
        }

        assert_eq!(
            store.recent_context("42"),
            "\nPrevious conversation:\n\
             User: msg 3\nYou: reply 3\n\
             User: msg 4\nYou: reply 4\n\
             User: msg 5\nYou: reply 5\n"
        );
    }

    #[test]
    fn test_recent_context_with_fewer_exchanges() {
        let store = store();
        store.record("7", "only", "one");
        assert_eq!(
            store.recent_context("7"),
            "\nPrevious conversation:\nUser: only\nYou: one\n"
        );
    }

    #[test]
    fn test_recent_context_does_not_mutate() {
        let store = store();
        store.record("7", "a", "b");
        let _ = store.recent_context("7");
        let _ = store.recent_context("8");
        assert_eq!(store.len("7"), 1);
        assert_eq!(store.user_count(), 1);
    }

    #[test]
    fn test_users_are_isolated() {
        let store = store();
        store.record("a", "from a", "to a");
        store.record("b", "from b", "to b");

        assert!(store.recent_context("a").contains("from a"));
        assert!(!store.recent_context("a").contains("from b"));
    }

    #[test]
    fn test_forget_removes_user() {
        let store = store();
        store.record("a", "x", "y");
        assert!(store.forget("a"));
        assert!(!store.forget("a"));
        assert_eq!(store.recent_context("a"), "");
    }

    #[test]
    fn test_max_users_evicts_least_recently_active() {
        let store = MemoryStore::new(MemoryConfig {
            max_users: Some(2),
            ..MemoryConfig::default()
        });
        store.record("a", "1", "1");
        store.record("b", "2", "2");
        // touch "a" so that "b" becomes the idle one
        store.record("a", "3", "3");
        store.record("c", "4", "4");

        assert_eq!(store.user_count(), 2);
        assert_eq!(store.len("a"), 2);
        assert_eq!(store.len("b"), 0);
        assert_eq!(store.len("c"), 1);
    }

    #[test]
    fn test_concurrent_writes_respect_bound() {
        let store = std::sync::Arc::new(store());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for i in 0..50 {
                        store.record("shared", &format!("{t}-{i}"), "ok");
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len("shared"), DEFAULT_MAX_EXCHANGES);
    }
}
