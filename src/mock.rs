//! Fixed data the dashboard starts from.

use crate::state::{Conversation, ConversationId, Message, MessageId, Sender};

pub const CANNED_REPLY: &str =
    "I'm a demo AI assistant. This is a mock response to show the chat interface design.";

pub const NEW_CHAT_TITLE: &str = "New Chat";
pub const NEW_CHAT_PREVIEW: &str = "Start a new conversation";
pub const NEW_CHAT_TIMESTAMP: &str = "Just now";

fn conversation(id: i64, title: &str, last_message: &str, timestamp: &str) -> Conversation {
    Conversation {
        id: ConversationId(id),
        title: title.to_owned(),
        last_message: last_message.to_owned(),
        timestamp: timestamp.to_owned(),
    }
}

fn message(id: i64, sender: Sender, text: &str, timestamp: &str) -> Message {
    Message {
        id: MessageId(id),
        text: text.to_owned(),
        sender,
        timestamp: timestamp.to_owned(),
    }
}

pub fn conversations() -> Vec<Conversation> {
    vec![
        conversation(1, "Welcome Chat", "Hello! How can I help you today?", "2 min ago"),
        conversation(2, "Project Discussion", "Let me help you with that project", "1 hour ago"),
        conversation(3, "Code Review", "The code looks good overall", "3 hours ago"),
        conversation(4, "Design Ideas", "Here are some design suggestions", "Yesterday"),
    ]
}

/// Seeded threads, keyed by conversation. Every seeded conversation has an
/// entry, the last two are empty.
pub fn messages() -> Vec<(ConversationId, Vec<Message>)> {
    vec![
        (
            ConversationId(1),
            vec![
                message(1, Sender::Assistant, "Hello! How can I help you today?", "10:30 AM"),
                message(2, Sender::User, "I need help with a project", "10:31 AM"),
                message(
                    3,
                    Sender::Assistant,
                    "I'd be happy to help you with your project! Could you tell me more about what you're working on?",
                    "10:31 AM",
                ),
            ],
        ),
        (
            ConversationId(2),
            vec![
                message(1, Sender::User, "Can you review my code?", "9:15 AM"),
                message(
                    2,
                    Sender::Assistant,
                    "Of course! Please share the code you'd like me to review.",
                    "9:15 AM",
                ),
            ],
        ),
        (ConversationId(3), vec![]),
        (ConversationId(4), vec![]),
    ]
}
