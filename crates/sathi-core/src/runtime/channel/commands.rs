//! Channel Command Handler
//!
//! Canned replies for `/start`, `/hello` and `/who_is_owner`. Commands never
//! touch conversation memory and never call the model.

use crate::channel::{Channel, InboundMessage, OutboundMessage};
use crate::prompt::Persona;
use anyhow::Result;
use tracing::debug;

use super::router::BotCommand;

/// Handle a routed command by replying on the originating conversation.
pub async fn handle_command(
    channel: &dyn Channel,
    persona: &Persona,
    fallback_name: &str,
    message: &InboundMessage,
    command: BotCommand,
) -> Result<()> {
    debug!(
        "Handling command: /{} from {}",
        command.name(),
        message.sender_id
    );

    match command {
        BotCommand::Start | BotCommand::Hello => {
            cmd_welcome(channel, message, message.display_name(fallback_name)).await
        }
        BotCommand::WhoIsOwner => cmd_who_is_owner(channel, persona, message).await,
    }
}

/// Greeting sent for `/start` and `/hello`.
pub fn welcome_text(user_name: &str) -> String {
    format!(
        "🤖✨ Hello {user_name}!

I'm your emotionally intelligent AI companion! I can:

🎭 **Understand your emotions** - I'll respond with empathy and care
🌍 **Speak any language** - Talk to me in your preferred language!
🧠 **Remember our conversations** - I'll build a relationship with you over time
💝 **Provide emotional support** - Whether you're happy, sad, or excited!

Just start chatting with me in any language, and I'll understand and respond appropriately! 😊"
    )
}

/// Attribution sent for `/who_is_owner`.
pub fn owner_text(owner_name: &str) -> String {
    format!(
        "🤖 I am an advanced AI assistant powered by technology and knowledge!

My owner is **{owner_name}**, and I strive to be one of the best AIs, comparable to ChatGPT!
I can help you with various tasks, answer questions, and engage in meaningful conversations.
Feel free to ask me anything! 😊"
    )
}

async fn cmd_welcome(channel: &dyn Channel, message: &InboundMessage, name: &str) -> Result<()> {
    let response = OutboundMessage::new(&message.conversation_id, welcome_text(name));
    channel.send(response).await
}

async fn cmd_who_is_owner(
    channel: &dyn Channel,
    persona: &Persona,
    message: &InboundMessage,
) -> Result<()> {
    let response = OutboundMessage::new(&message.conversation_id, owner_text(&persona.owner_name));
    channel.send(response).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::ChannelType;
    use crate::channel::mock::MockChannel;

    fn create_message(content: &str) -> InboundMessage {
        InboundMessage::new("msg-1", ChannelType::Telegram, "user-1", "chat-1", content)
    }

    #[tokio::test]
    async fn test_start_greets_by_first_name() {
        let channel = MockChannel::new();
        let message = create_message("/start").with_first_name("Priya");

        handle_command(&channel, &Persona::default(), "Friend", &message, BotCommand::Start)
            .await
            .unwrap();

        let sent = channel.get_sent_messages().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].conversation_id, "chat-1");
        assert!(sent[0].content.starts_with("🤖✨ Hello Priya!"));
        assert!(sent[0].content.contains("Remember our conversations"));
    }

    #[tokio::test]
    async fn test_hello_without_first_name_uses_fallback() {
        let channel = MockChannel::new();
        let message = create_message("/hello");

        handle_command(&channel, &Persona::default(), "Friend", &message, BotCommand::Hello)
            .await
            .unwrap();

        let sent = channel.get_sent_messages().await;
        assert!(sent[0].content.starts_with("🤖✨ Hello Friend!"));
    }

    #[tokio::test]
    async fn test_who_is_owner_names_owner() {
        let channel = MockChannel::new();
        let message = create_message("/who_is_owner");

        handle_command(
            &channel,
            &Persona::default(),
            "Friend",
            &message,
            BotCommand::WhoIsOwner,
        )
        .await
        .unwrap();

        let sent = channel.get_sent_messages().await;
        assert_eq!(sent.len(), 1);
        assert!(sent[0].content.contains("My owner is **Mr. Tapas Kumar Bal**"));
        assert_eq!(sent[0].parse_mode, None);
    }

    #[tokio::test]
    async fn test_who_is_owner_uses_configured_owner() {
        let channel = MockChannel::new();
        handle_command(
            &channel,
            &Persona::new("Ada Lovelace"),
            "Friend",
            &create_message("/who_is_owner"),
            BotCommand::WhoIsOwner,
        )
        .await
        .unwrap();

        assert!(
            channel.get_sent_messages().await[0]
                .content
                .contains("**Ada Lovelace**")
        );
    }

    #[test]
    fn test_welcome_text_layout() {
        let text = welcome_text("X");
        assert!(text.starts_with("🤖✨ Hello X!\n\nI'm your emotionally intelligent AI companion!"));
        assert_eq!(text.lines().filter(|l| l.starts_with(['🎭', '🌍', '🧠', '💝'])).count(), 4);
        assert!(text.ends_with("😊"));
    }
}
