//! Channel Message Handler
//!
//! Consumes the channel's inbound stream and routes each message to a command
//! reply or the chat dispatcher. Messages are handled one at a time.

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tokio_stream::StreamExt;
use tracing::{debug, error, info, warn};

use crate::channel::InboundMessage;

use super::chat_dispatcher::ChatDispatcher;
use super::commands::handle_command;
use super::router::{MessageRouter, RouteDecision};

#[cfg(test)]
const STREAM_RECONNECT_DELAY: Duration = Duration::from_millis(20);
#[cfg(not(test))]
const STREAM_RECONNECT_DELAY: Duration = Duration::from_secs(2);

/// Message handler configuration
#[derive(Debug, Clone)]
pub struct MessageHandlerConfig {
    /// Command prefix (default: "/")
    pub command_prefix: String,
}

impl Default for MessageHandlerConfig {
    fn default() -> Self {
        Self {
            command_prefix: "/".to_string(),
        }
    }
}

/// Start the message handler loop.
///
/// Spawns one task that listens on the dispatcher's channel and restarts the
/// stream whenever it ends. Abort the returned handle to stop it.
pub fn start_message_handler(
    dispatcher: Arc<ChatDispatcher>,
    config: MessageHandlerConfig,
) -> JoinHandle<()> {
    let msg_router = MessageRouter::new(&config.command_prefix);
    let channel = dispatcher.channel().clone();

    info!("Starting channel message handler on {}", channel.name());

    tokio::spawn(async move {
        loop {
            let Some(mut stream) = channel.start_receiving() else {
                warn!(
                    "Failed to start message stream for {}, retrying in {:?}",
                    channel.name(),
                    STREAM_RECONNECT_DELAY
                );
                sleep(STREAM_RECONNECT_DELAY).await;
                continue;
            };

            while let Some(message) = stream.next().await {
                debug!(
                    "Handler received message {} from {}",
                    message.id, message.conversation_id
                );

                match handle_message_routed(&msg_router, &dispatcher, &message).await {
                    Ok(()) => {
                        debug!("Message {} handled successfully", message.id);
                    }
                    Err(e) => {
                        error!(
                            "Error handling message {} from {}: {}",
                            message.id, message.conversation_id, e
                        );
                    }
                }
            }

            warn!(
                "Message stream ended for {}, restarting in {:?}",
                channel.name(),
                STREAM_RECONNECT_DELAY
            );
            sleep(STREAM_RECONNECT_DELAY).await;
        }
    })
}

/// Process a single inbound message using the router
pub async fn handle_message_routed(
    msg_router: &MessageRouter,
    dispatcher: &ChatDispatcher,
    message: &InboundMessage,
) -> Result<()> {
    match msg_router.route(message) {
        RouteDecision::HandleCommand { command, args } => {
            debug!("Routing to command: /{} {:?}", command.name(), args);
            handle_command(
                dispatcher.channel().as_ref(),
                dispatcher.assembler().persona(),
                &dispatcher.config().fallback_name,
                message,
                command,
            )
            .await
        }

        RouteDecision::DispatchToChat => {
            debug!("Routing to chat dispatcher");
            dispatcher.dispatch(message).await
        }

        RouteDecision::Ignore => {
            debug!("Ignoring message {}", message.id);
            Ok(())
        }
    }
}
