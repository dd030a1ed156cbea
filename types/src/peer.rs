//! Peer records: channels, basic groups, users and secret chats.
//!
//! The presentation core never mutates these; it only asks the handful of
//! questions below (participation, bans, ability to post, bot flag).

use serde::{Deserialize, Serialize};

use crate::ids::{PeerId, PeerNamespace};

/// Ban expiry sentinel meaning "never expires".
pub const BAN_FOREVER: i32 = i32::MAX;

/// Bit set of banned rights on a channel member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BannedRightsFlags(u32);

impl BannedRightsFlags {
    pub const VIEW_MESSAGES: Self = Self(1 << 0);
    pub const SEND_MESSAGES: Self = Self(1 << 1);
    pub const SEND_MEDIA: Self = Self(1 << 2);
    pub const SEND_STICKERS: Self = Self(1 << 3);
    pub const EMBED_LINKS: Self = Self(1 << 4);

    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BannedRights {
    pub flags: BannedRightsFlags,
    /// Unix timestamp the ban lifts at; [`BAN_FOREVER`] for permanent bans.
    pub until_date: i32,
}

impl BannedRights {
    #[must_use]
    pub const fn new(flags: BannedRightsFlags, until_date: i32) -> Self {
        Self { flags, until_date }
    }

    #[must_use]
    pub const fn is_permanent(&self) -> bool {
        self.until_date == BAN_FOREVER
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AdminRights {
    pub post_messages: bool,
    pub pin_messages: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelKind {
    /// One-to-many broadcast; only the creator and posting admins can write.
    Broadcast,
    /// Supergroup; any member without a send ban can write.
    Megagroup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelParticipation {
    Member,
    Left,
    Kicked,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: PeerId,
    pub title: String,
    pub kind: ChannelKind,
    pub participation: ChannelParticipation,
    pub is_creator: bool,
    pub admin_rights: Option<AdminRights>,
    pub banned_rights: Option<BannedRights>,
}

impl Channel {
    #[must_use]
    pub fn has_banned_rights(&self, flags: BannedRightsFlags) -> bool {
        self.banned_rights
            .is_some_and(|rights| rights.flags.contains(flags))
    }

    #[must_use]
    pub fn can_send_message(&self) -> bool {
        match self.kind {
            ChannelKind::Broadcast => {
                self.is_creator || self.admin_rights.is_some_and(|rights| rights.post_messages)
            }
            ChannelKind::Megagroup => {
                self.participation == ChannelParticipation::Member
                    && !self.has_banned_rights(BannedRightsFlags::SEND_MESSAGES)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupMembership {
    Member,
    Left,
    Removed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: PeerId,
    pub title: String,
    pub membership: GroupMembership,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotInfo {
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: PeerId,
    pub name: String,
    pub bot_info: Option<BotInfo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SecretChatState {
    Handshake,
    Active,
    Terminated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretChat {
    pub id: PeerId,
    pub regular_peer_id: PeerId,
    pub embedded_state: SecretChatState,
}

/// A conversation partner.
///
/// This is a real sum type: each variant only carries the fields its kind of
/// chat actually has.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Peer {
    Channel(Channel),
    Group(Group),
    User(User),
    SecretChat(SecretChat),
}

impl Peer {
    #[must_use]
    pub fn id(&self) -> PeerId {
        match self {
            Peer::Channel(channel) => channel.id,
            Peer::Group(group) => group.id,
            Peer::User(user) => user.id,
            Peer::SecretChat(chat) => chat.id,
        }
    }

    #[must_use]
    pub fn namespace(&self) -> PeerNamespace {
        self.id().namespace()
    }

    #[must_use]
    pub fn display_title(&self) -> &str {
        match self {
            Peer::Channel(channel) => &channel.title,
            Peer::Group(group) => &group.title,
            Peer::User(user) => &user.name,
            Peer::SecretChat(_) => "Secret chat",
        }
    }

    #[must_use]
    pub fn can_send_message(&self) -> bool {
        match self {
            Peer::Channel(channel) => channel.can_send_message(),
            Peer::Group(group) => group.membership == GroupMembership::Member,
            Peer::User(_) => true,
            Peer::SecretChat(chat) => chat.embedded_state == SecretChatState::Active,
        }
    }

    #[must_use]
    pub fn is_bot(&self) -> bool {
        matches!(self, Peer::User(User { bot_info: Some(_), .. }))
    }

    #[must_use]
    pub fn as_channel(&self) -> Option<&Channel> {
        match self {
            Peer::Channel(channel) => Some(channel),
            _ => None,
        }
    }
}
