//! Domain surfaces for the chat presentation core.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies:
//! peers, messages, composer input, the durable interface state and the small
//! values the presentation snapshot carries. The core only inspects these.

mod ids;
mod input;
mod interface;
mod message;
mod peer;
mod query;
mod settings;

pub use ids::{MediaId, MessageId, MessageNamespace, PeerId, PeerNamespace};
pub use input::{TextInputAttribute, TextInputState};
pub use interface::{ChatInterfaceState, MessageActionsState};
pub use message::{
    KeyboardButton, KeyboardRow, Media, Message, ReplyMarkup, ReplyMarkupFlags, TextEntity,
    TextEntityKind, Webpage,
};
pub use peer::{
    AdminRights, BAN_FOREVER, BannedRights, BannedRightsFlags, BotInfo, Channel, ChannelKind,
    ChannelParticipation, Group, GroupMembership, Peer, SecretChat, SecretChatState, User,
};
pub use query::{
    ContextResult, ContextResultCollection, EmojiClue, InputQuery, InputQueryResult, PeerCommand,
    StickerItem, same_peer,
};
pub use settings::{
    EntertainmentSection, InitialAction, MuteState, NotificationSettings, ReportStatus,
    SplitLayout,
};
