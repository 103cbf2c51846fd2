//! Append-only chat transcript.

use crate::types::{Message, Role, RoleTaggedMessage};

/// Ordered, append-only log of chat messages for one session.
///
/// Messages are never reordered, edited or removed after insertion.
#[derive(Debug, Clone)]
pub struct TranscriptStore {
    assistant: String,
    messages: Vec<Message>,
}

impl TranscriptStore {
    /// Create a transcript seeded with the assistant's welcome message.
    pub fn seeded(assistant: impl Into<String>, welcome: impl Into<String>) -> Self {
        let assistant = assistant.into();
        let welcome = Message::incoming(welcome, assistant.clone());
        Self {
            assistant,
            messages: vec![welcome],
        }
    }

    /// Append a message to the end of the transcript.
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Convert the transcript into dialogue-service context, in order.
    ///
    /// Messages sent by the assistant identity become `assistant`; every
    /// other sender becomes `user`.
    pub fn as_role_tagged_sequence(&self) -> Vec<RoleTaggedMessage> {
        self.messages
            .iter()
            .map(|m| {
                let role = if m.sender == self.assistant {
                    Role::Assistant
                } else {
                    Role::User
                };
                RoleTaggedMessage::new(role, m.text.clone())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;

    fn store() -> TranscriptStore {
        TranscriptStore::seeded("PixelSeeker", "Welcome!")
    }

    #[test]
    fn test_seeded_with_single_welcome() {
        let t = store();
        assert_eq!(t.messages().len(), 1);
        let welcome = &t.messages()[0];
        assert_eq!(welcome.text, "Welcome!");
        assert_eq!(welcome.direction, Direction::Incoming);
        assert_eq!(welcome.sender, "PixelSeeker");
    }

    #[test]
    fn test_append_preserves_order() {
        let mut t = store();
        t.append(Message::outgoing("first"));
        t.append(Message::incoming("second", "PixelSeeker"));
        t.append(Message::outgoing("third"));

        let texts: Vec<&str> = t.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["Welcome!", "first", "second", "third"]);
        assert_eq!(t.last().unwrap().text, "third");
    }

    #[test]
    fn test_role_tagged_sequence_alternating() {
        let mut t = store();
        t.append(Message::outgoing("what is a roguelike"));
        t.append(Message::incoming("A genre with permadeath.", "PixelSeeker"));
        t.append(Message::outgoing("name one"));

        let seq = t.as_role_tagged_sequence();
        assert_eq!(
            seq,
            vec![
                RoleTaggedMessage::new(Role::Assistant, "Welcome!"),
                RoleTaggedMessage::new(Role::User, "what is a roguelike"),
                RoleTaggedMessage::new(Role::Assistant, "A genre with permadeath."),
                RoleTaggedMessage::new(Role::User, "name one"),
            ]
        );
    }

    #[test]
    fn test_role_mapping_uses_sender_not_direction() {
        let mut t = store();
        // An incoming message from some other sender is still context from the user side.
        t.append(Message::incoming("relayed", "SomeoneElse"));
        let seq = t.as_role_tagged_sequence();
        assert_eq!(seq[1].role, Role::User);
    }

    #[test]
    fn test_role_tagged_sequence_does_not_include_system() {
        let t = store();
        assert!(t
            .as_role_tagged_sequence()
            .iter()
            .all(|m| m.role != Role::System));
    }
}
