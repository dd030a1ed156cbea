//! Composer input state: text, caret/selection and formatting attributes.
//!
//! Offsets are character offsets into `text`, not byte offsets.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::ids::PeerId;
use crate::message::{TextEntity, TextEntityKind};

/// Formatting attribute over a character range of the input text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextInputAttribute {
    Bold(Range<usize>),
    Italic(Range<usize>),
    Code(Range<usize>),
    Pre(Range<usize>),
    Url { range: Range<usize>, url: String },
    Mention { range: Range<usize>, peer_id: PeerId },
}

impl TextInputAttribute {
    #[must_use]
    pub fn range(&self) -> &Range<usize> {
        match self {
            Self::Bold(range) | Self::Italic(range) | Self::Code(range) | Self::Pre(range) => {
                range
            }
            Self::Url { range, .. } | Self::Mention { range, .. } => range,
        }
    }

    /// Translate a message entity into the input attribute model.
    ///
    /// Entities the composer renders as plain text (auto-detected mentions,
    /// hashtags, commands, bare urls, emails) have no attribute.
    #[must_use]
    pub fn from_entity(entity: &TextEntity) -> Option<Self> {
        let range = entity.range.clone();
        match &entity.kind {
            TextEntityKind::Bold => Some(Self::Bold(range)),
            TextEntityKind::Italic => Some(Self::Italic(range)),
            TextEntityKind::Code => Some(Self::Code(range)),
            TextEntityKind::Pre => Some(Self::Pre(range)),
            TextEntityKind::TextUrl { url } => Some(Self::Url {
                range,
                url: url.clone(),
            }),
            TextEntityKind::TextMention { peer_id } => Some(Self::Mention {
                range,
                peer_id: *peer_id,
            }),
            TextEntityKind::Mention
            | TextEntityKind::Hashtag
            | TextEntityKind::BotCommand
            | TextEntityKind::Url
            | TextEntityKind::Email => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextInputState {
    text: String,
    selection: Range<usize>,
    attributes: Vec<TextInputAttribute>,
}

impl TextInputState {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        selection: Range<usize>,
        attributes: Vec<TextInputAttribute>,
    ) -> Self {
        let text = text.into();
        let len = text.chars().count();
        let start = selection.start.min(len);
        let end = selection.end.clamp(start, len);
        Self {
            text,
            selection: start..end,
            attributes,
        }
    }

    /// Plain text with the caret placed after the last character.
    #[must_use]
    pub fn with_caret_at_end(text: impl Into<String>) -> Self {
        let text = text.into();
        let len = text.chars().count();
        Self::new(text, len..len, Vec::new())
    }

    #[must_use]
    pub fn from_entities(text: impl Into<String>, entities: &[TextEntity]) -> Self {
        let text = text.into();
        let len = text.chars().count();
        let attributes = entities
            .iter()
            .filter_map(TextInputAttribute::from_entity)
            .collect();
        Self::new(text, len..len, attributes)
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }

    #[must_use]
    pub fn attributes(&self) -> &[TextInputAttribute] {
        &self.attributes
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Caret position when the selection is collapsed.
    #[must_use]
    pub fn caret(&self) -> Option<usize> {
        (self.selection.start == self.selection.end).then_some(self.selection.end)
    }
}
