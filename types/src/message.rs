//! Message surface inspected by the presentation core.
//!
//! Only the parts the chat screen needs are modeled: identity and stable
//! version, text with entities, attached media and the reply keyboard.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::ids::{MediaId, MessageId, PeerId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Webpage {
    pub id: MediaId,
    pub url: String,
    pub title: Option<String>,
}

/// Media attached to a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Media {
    /// Link preview generated from the message text.
    Webpage(Webpage),
    Photo { id: MediaId },
    Video { id: MediaId, duration_secs: u32 },
    File { id: MediaId, mime_type: String },
}

impl Media {
    /// Link previews don't count as user-attached media.
    #[must_use]
    pub fn is_webpage(&self) -> bool {
        matches!(self, Media::Webpage(_))
    }
}

/// Kind of formatting or link carried by a text entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextEntityKind {
    Bold,
    Italic,
    Code,
    Pre,
    TextUrl { url: String },
    TextMention { peer_id: PeerId },
    Mention,
    Hashtag,
    BotCommand,
    Url,
    Email,
}

/// Entity over a character range of the message text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEntity {
    pub range: Range<usize>,
    pub kind: TextEntityKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardButton {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeyboardRow {
    pub buttons: Vec<KeyboardButton>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReplyMarkupFlags {
    pub once: bool,
    pub personal: bool,
    pub fit: bool,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReplyMarkup {
    pub rows: Vec<KeyboardRow>,
    pub flags: ReplyMarkupFlags,
}

impl ReplyMarkup {
    #[must_use]
    pub fn has_buttons(&self) -> bool {
        self.rows.iter().any(|row| !row.buttons.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    /// Bumped by the server whenever the message content is edited.
    pub stable_version: u32,
    pub text: String,
    #[serde(default)]
    pub entities: Vec<TextEntity>,
    #[serde(default)]
    pub media: Vec<Media>,
    #[serde(default)]
    pub reply_markup: Option<ReplyMarkup>,
}

impl Message {
    #[must_use]
    pub fn new(id: MessageId, text: impl Into<String>) -> Self {
        Self {
            id,
            stable_version: 0,
            text: text.into(),
            entities: Vec::new(),
            media: Vec::new(),
            reply_markup: None,
        }
    }

    #[must_use]
    pub fn with_stable_version(mut self, stable_version: u32) -> Self {
        self.stable_version = stable_version;
        self
    }

    #[must_use]
    pub fn with_entities(mut self, entities: Vec<TextEntity>) -> Self {
        self.entities = entities;
        self
    }

    #[must_use]
    pub fn with_media(mut self, media: Vec<Media>) -> Self {
        self.media = media;
        self
    }

    #[must_use]
    pub fn with_reply_markup(mut self, reply_markup: ReplyMarkup) -> Self {
        self.reply_markup = Some(reply_markup);
        self
    }

    /// True if anything other than a link preview is attached.
    #[must_use]
    pub fn has_attached_media(&self) -> bool {
        self.media.iter().any(|media| !media.is_webpage())
    }

    /// Identity used for change detection: id plus stable version.
    #[must_use]
    pub fn version_key(&self) -> (MessageId, u32) {
        (self.id, self.stable_version)
    }
}
