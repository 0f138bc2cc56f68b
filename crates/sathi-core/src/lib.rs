pub mod channel;
pub mod language;
pub mod memory;
pub mod prompt;
pub mod runtime;

pub use language::{Language, LanguageTag, detect};
pub use memory::{MemoryConfig, MemoryStore};
pub use prompt::{Persona, PromptAssembler};
pub use runtime::{ChatDispatcher, ChatDispatcherConfig, start_message_handler};
