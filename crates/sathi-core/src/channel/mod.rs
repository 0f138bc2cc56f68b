//! Communication Channel Layer
//!
//! Transport abstraction between the chat pipeline and a messaging platform.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         trait Channel                   │
//! │  - send(message) / send_typing()        │
//! │  - start_receiving() -> Stream          │
//! └─────────────────────────────────────────┘
//!              │
//!              ▼
//!          Telegram (long-polling getUpdates)
//! ```

mod chunk;
pub mod telegram;
mod traits;
mod types;

pub use chunk::{TELEGRAM_MAX_LEN, chunk_text};
pub use telegram::{TelegramChannel, TelegramConfig, TelegramUser};
pub use traits::Channel;
pub use types::{ChannelType, InboundMessage, OutboundMessage};

#[cfg(test)]
pub use traits::mock;
