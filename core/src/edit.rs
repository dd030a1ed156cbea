//! Edit target: the message being edited plus the composer state for it.

use std::sync::Arc;

use chatview_types::{Message, TextInputState};

/// The message under edit and its in-progress input.
///
/// Equality compares the target's id and the input snapshot; the rest of the
/// message record is ignored so server-side churn on the target does not look
/// like an edit change.
#[derive(Debug, Clone)]
pub struct EditSnapshot {
    message: Arc<Message>,
    input: TextInputState,
}

impl EditSnapshot {
    /// Start editing `message`, seeding the input from its text and entities
    /// with the caret after the last character.
    #[must_use]
    pub fn new(message: Arc<Message>) -> Self {
        let input = TextInputState::from_entities(message.text.clone(), &message.entities);
        Self { message, input }
    }

    #[must_use]
    pub fn with_input(message: Arc<Message>, input: TextInputState) -> Self {
        Self { message, input }
    }

    #[must_use]
    pub fn message(&self) -> &Arc<Message> {
        &self.message
    }

    #[must_use]
    pub fn input(&self) -> &TextInputState {
        &self.input
    }

    #[must_use]
    pub fn with_updated_input(&self, input: TextInputState) -> Self {
        Self {
            message: Arc::clone(&self.message),
            input,
        }
    }
}

impl PartialEq for EditSnapshot {
    fn eq(&self, other: &Self) -> bool {
        self.message.id == other.message.id && self.input == other.input
    }
}
