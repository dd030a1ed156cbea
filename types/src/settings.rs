//! Small orthogonal values carried by the presentation snapshot.

use serde::{Deserialize, Serialize};

use crate::ids::MessageId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MuteState {
    #[default]
    Unmuted,
    /// Muted until the given unix timestamp.
    MutedUntil(i32),
    MutedForever,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NotificationSettings {
    pub mute: MuteState,
}

impl NotificationSettings {
    #[must_use]
    pub const fn new(mute: MuteState) -> Self {
        Self { mute }
    }

    #[must_use]
    pub const fn is_muted(&self) -> bool {
        !matches!(self.mute, MuteState::Unmuted)
    }
}

/// Whether the "report spam" bar applies to this peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReportStatus {
    #[default]
    Unknown,
    CanReport,
    DidReport,
    None,
}

/// Action requested when the conversation was opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InitialAction {
    /// Bot deep link: `/start <parameter>`.
    Start { parameter: String },
    InputText(String),
    Forward(Vec<MessageId>),
}

impl InitialAction {
    #[must_use]
    pub fn is_start(&self) -> bool {
        matches!(self, InitialAction::Start { .. })
    }
}

/// Window split state; the sidebar only fits in the dual-pane layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitLayout {
    #[default]
    None,
    Single,
    Dual,
    Minimized,
}

/// Tab shown first in the emoji/sticker/gif panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntertainmentSection {
    #[default]
    Emoji,
    Stickers,
    Gifs,
}
