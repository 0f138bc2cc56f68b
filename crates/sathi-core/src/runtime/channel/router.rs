//! Message Router - Routes inbound messages to appropriate handlers.
//!
//! Known commands get a canned reply. Everything else with text, unknown
//! `/commands` included, goes to the chat pipeline.

use crate::channel::InboundMessage;

/// Commands answered without calling the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    Start,
    Hello,
    WhoIsOwner,
}

impl BotCommand {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "start" => Some(Self::Start),
            "hello" => Some(Self::Hello),
            "who_is_owner" => Some(Self::WhoIsOwner),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Hello => "hello",
            Self::WhoIsOwner => "who_is_owner",
        }
    }
}

/// Routing decision for an inbound message.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteDecision {
    /// Handle as a known command.
    HandleCommand {
        command: BotCommand,
        args: Vec<String>,
    },
    /// Dispatch to AI chat for natural language processing.
    DispatchToChat,
    /// Ignore the message (no action needed).
    Ignore,
}

/// Message router that determines how to handle inbound messages.
pub struct MessageRouter {
    command_prefix: String,
}

impl Default for MessageRouter {
    fn default() -> Self {
        Self::new("/")
    }
}

impl MessageRouter {
    /// Create a new MessageRouter.
    pub fn new(command_prefix: impl Into<String>) -> Self {
        Self {
            command_prefix: command_prefix.into(),
        }
    }

    /// Route an inbound message to the appropriate handler.
    pub fn route(&self, message: &InboundMessage) -> RouteDecision {
        if message.content.trim().is_empty() {
            return RouteDecision::Ignore;
        }

        if let Some((name, args)) = self.parse_command(&message.content)
            && let Some(command) = BotCommand::from_name(&name)
        {
            return RouteDecision::HandleCommand { command, args };
        }

        RouteDecision::DispatchToChat
    }

    /// Parse a command message into command name and arguments.
    ///
    /// The name is lower-cased and a trailing `@botname` is dropped.
    fn parse_command(&self, content: &str) -> Option<(String, Vec<String>)> {
        let trimmed = content.trim_start().strip_prefix(&self.command_prefix)?;
        let parts: Vec<&str> = trimmed.split_whitespace().collect();

        let first = parts.first()?;
        let name = first.split('@').next().unwrap_or(first);
        if name.is_empty() {
            return None;
        }

        let command = name.to_lowercase();
        let args: Vec<String> = parts[1..].iter().map(|s| s.to_string()).collect();

        Some((command, args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::ChannelType;

    fn create_message(content: &str) -> InboundMessage {
        InboundMessage::new("msg-1", ChannelType::Telegram, "user-1", "chat-1", content)
    }

    #[test]
    fn test_route_known_commands() {
        let router = MessageRouter::default();

        for (text, expected) in [
            ("/start", BotCommand::Start),
            ("/hello", BotCommand::Hello),
            ("/who_is_owner", BotCommand::WhoIsOwner),
            ("/START", BotCommand::Start),
        ] {
            let decision = router.route(&create_message(text));
            assert!(
                matches!(decision, RouteDecision::HandleCommand { command, .. } if command == expected),
                "text: {text}"
            );
        }
    }

    #[test]
    fn test_route_command_with_bot_suffix() {
        let router = MessageRouter::default();
        let decision = router.route(&create_message("/start@SathiBot"));
        assert_eq!(
            decision,
            RouteDecision::HandleCommand {
                command: BotCommand::Start,
                args: vec![],
            }
        );
    }

    #[test]
    fn test_route_command_with_args() {
        let router = MessageRouter::default();
        let decision = router.route(&create_message("/hello there friend"));
        assert!(matches!(
            decision,
            RouteDecision::HandleCommand { command: BotCommand::Hello, args }
            if args == vec!["there", "friend"]
        ));
    }

    #[test]
    fn test_route_natural_language_to_chat() {
        let router = MessageRouter::default();
        let decision = router.route(&create_message("Namaste, kaise ho?"));
        assert_eq!(decision, RouteDecision::DispatchToChat);
    }

    #[test]
    fn test_unknown_command_goes_to_chat() {
        let router = MessageRouter::default();
        assert_eq!(
            router.route(&create_message("/help")),
            RouteDecision::DispatchToChat
        );
        assert_eq!(
            router.route(&create_message("/")),
            RouteDecision::DispatchToChat
        );
    }

    #[test]
    fn test_blank_message_is_ignored() {
        let router = MessageRouter::default();
        assert_eq!(router.route(&create_message("")), RouteDecision::Ignore);
        assert_eq!(router.route(&create_message("  \n ")), RouteDecision::Ignore);
    }

    #[test]
    fn test_parse_command() {
        let router = MessageRouter::default();

        assert_eq!(
            router.parse_command("/status"),
            Some(("status".to_string(), vec![]))
        );
        assert_eq!(
            router.parse_command("/Who_Is_Owner@bot extra"),
            Some(("who_is_owner".to_string(), vec!["extra".to_string()]))
        );
        assert_eq!(router.parse_command("/"), None);
        assert_eq!(router.parse_command("/@bot"), None);
        assert_eq!(router.parse_command("no prefix"), None);
    }

    #[test]
    fn test_command_names_round_trip() {
        for command in [BotCommand::Start, BotCommand::Hello, BotCommand::WhoIsOwner] {
            assert_eq!(BotCommand::from_name(command.name()), Some(command));
        }
    }
}
