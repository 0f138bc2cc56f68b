//! Channel Trait Definitions

use anyhow::Result;
use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;

use super::types::{ChannelType, InboundMessage, OutboundMessage};

/// Communication channel that can send and optionally receive messages
#[async_trait]
pub trait Channel: Send + Sync {
    /// Get channel type
    fn channel_type(&self) -> ChannelType;

    /// Get channel display name
    fn name(&self) -> &str {
        self.channel_type().display_name()
    }

    /// Check if channel is properly configured
    fn is_configured(&self) -> bool;

    /// Send a message to the channel
    async fn send(&self, message: OutboundMessage) -> Result<()>;

    /// Send a plain text message
    async fn send_text(&self, conversation_id: &str, text: &str) -> Result<()> {
        self.send(OutboundMessage::new(conversation_id, text)).await
    }

    /// Show a "typing" indicator. Channels without one do nothing.
    async fn send_typing(&self, conversation_id: &str) -> Result<()> {
        let _ = conversation_id;
        Ok(())
    }

    /// Start receiving messages (returns None if channel doesn't support receiving)
    ///
    /// Each call starts a fresh receiver; the message handler calls it again
    /// when the previous stream ends.
    fn start_receiving(&self) -> Option<Pin<Box<dyn Stream<Item = InboundMessage> + Send>>>;
}

/// Test/mock channel for unit testing
#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// A mock channel recording everything sent through it
    pub struct MockChannel {
        configured: AtomicBool,
        sent_messages: Arc<tokio::sync::Mutex<Vec<OutboundMessage>>>,
        typing: Arc<tokio::sync::Mutex<Vec<String>>>,
    }

    impl MockChannel {
        pub fn new() -> Self {
            Self {
                configured: AtomicBool::new(true),
                sent_messages: Arc::new(tokio::sync::Mutex::new(Vec::new())),
                typing: Arc::new(tokio::sync::Mutex::new(Vec::new())),
            }
        }

        pub fn unconfigured() -> Self {
            let channel = Self::new();
            channel.configured.store(false, Ordering::SeqCst);
            channel
        }

        /// Get all sent messages
        pub async fn get_sent_messages(&self) -> Vec<OutboundMessage> {
            self.sent_messages.lock().await.clone()
        }

        /// Conversations that received a typing indicator
        pub async fn get_typing(&self) -> Vec<String> {
            self.typing.lock().await.clone()
        }
    }

    #[async_trait]
    impl Channel for MockChannel {
        fn channel_type(&self) -> ChannelType {
            ChannelType::Telegram
        }

        fn is_configured(&self) -> bool {
            self.configured.load(Ordering::SeqCst)
        }

        async fn send(&self, message: OutboundMessage) -> Result<()> {
            self.sent_messages.lock().await.push(message);
            Ok(())
        }

        async fn send_typing(&self, conversation_id: &str) -> Result<()> {
            self.typing.lock().await.push(conversation_id.to_string());
            Ok(())
        }

        fn start_receiving(&self) -> Option<Pin<Box<dyn Stream<Item = InboundMessage> + Send>>> {
            None
        }
    }
}
