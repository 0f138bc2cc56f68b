//! Message dispatch for inbound channel messages.
//!
//! ```text
//! InboundMessage ──► MessageRouter ──┬─► commands (canned replies)
//!                                    └─► ChatDispatcher
//!                                          detect → prompt → complete
//!                                          → record → reply
//! ```

mod chat_dispatcher;
mod commands;
mod handler;
mod router;

pub use chat_dispatcher::{ChatDispatcher, ChatDispatcherConfig, ChatError};
pub use commands::{handle_command, owner_text, welcome_text};
pub use handler::{MessageHandlerConfig, handle_message_routed, start_message_handler};
pub use router::{BotCommand, MessageRouter, RouteDecision};
