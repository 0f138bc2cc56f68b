pub mod channel;

pub use channel::{
    BotCommand, ChatDispatcher, ChatDispatcherConfig, ChatError, MessageHandlerConfig,
    MessageRouter, RouteDecision, start_message_handler,
};
