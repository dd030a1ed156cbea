//! Durable per-conversation interface state.
//!
//! This is the only part of the presentation snapshot expected to outlive the
//! view, so it serializes. Every update is a pure `with_updated_*` transform.

use serde::{Deserialize, Serialize};

use crate::ids::MessageId;
use crate::input::TextInputState;

/// Bookkeeping for the reply keyboard of the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MessageActionsState {
    /// Keyboard the user dismissed; it stays hidden until another one arrives.
    pub closed_button_keyboard_message_id: Option<MessageId>,
    /// Latest keyboard-bearing message already set up in a group-like chat.
    pub processed_setup_reply_message_id: Option<MessageId>,
}

impl MessageActionsState {
    #[must_use]
    pub fn with_updated_closed_button_keyboard_message_id(self, id: Option<MessageId>) -> Self {
        Self {
            closed_button_keyboard_message_id: id,
            ..self
        }
    }

    #[must_use]
    pub fn with_updated_processed_setup_reply_message_id(self, id: MessageId) -> Self {
        Self {
            processed_setup_reply_message_id: Some(id),
            ..self
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChatInterfaceState {
    #[serde(default)]
    pub input_state: TextInputState,
    #[serde(default)]
    pub forward_message_ids: Vec<MessageId>,
    #[serde(default)]
    pub reply_message_id: Option<MessageId>,
    #[serde(default)]
    pub message_actions_state: MessageActionsState,
}

impl ChatInterfaceState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_updated_input_state(&self, input_state: TextInputState) -> Self {
        Self {
            input_state,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_updated_forward_message_ids(&self, ids: Vec<MessageId>) -> Self {
        Self {
            forward_message_ids: ids,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_updated_reply_message_id(&self, id: Option<MessageId>) -> Self {
        Self {
            reply_message_id: id,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_updated_message_actions_state(
        &self,
        f: impl FnOnce(MessageActionsState) -> MessageActionsState,
    ) -> Self {
        Self {
            message_actions_state: f(self.message_actions_state),
            ..self.clone()
        }
    }
}
