//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chatview_types::{
    BannedRights, BannedRightsFlags, BotInfo, Channel, ChannelKind, ChannelParticipation, Group,
    GroupMembership, KeyboardButton, KeyboardRow, Media, MediaId, Message, MessageId, Peer,
    PeerId, PeerNamespace, ReplyMarkup, SecretChat, SecretChatState, User, Webpage,
};

pub fn user_id(id: i64) -> PeerId {
    PeerId::new(PeerNamespace::CloudUser, id)
}

pub fn message_id(peer_id: PeerId, id: i32) -> MessageId {
    MessageId::cloud(peer_id, id)
}

pub fn user(id: i64) -> Arc<Peer> {
    Arc::new(Peer::User(User {
        id: user_id(id),
        name: format!("user{id}"),
        bot_info: None,
    }))
}

pub fn bot(id: i64) -> Arc<Peer> {
    Arc::new(Peer::User(User {
        id: user_id(id),
        name: format!("bot{id}"),
        bot_info: Some(BotInfo {
            description: "test bot".to_string(),
        }),
    }))
}

pub fn channel(kind: ChannelKind, participation: ChannelParticipation) -> Channel {
    Channel {
        id: PeerId::new(PeerNamespace::CloudChannel, 100),
        title: "channel".to_string(),
        kind,
        participation,
        is_creator: false,
        admin_rights: None,
        banned_rights: None,
    }
}

pub fn send_banned_channel(until_date: i32) -> Arc<Peer> {
    let mut channel = channel(ChannelKind::Megagroup, ChannelParticipation::Member);
    channel.banned_rights = Some(BannedRights::new(
        BannedRightsFlags::SEND_MESSAGES,
        until_date,
    ));
    Arc::new(Peer::Channel(channel))
}

pub fn group(membership: GroupMembership) -> Arc<Peer> {
    Arc::new(Peer::Group(Group {
        id: PeerId::new(PeerNamespace::CloudGroup, 200),
        title: "group".to_string(),
        membership,
    }))
}

pub fn secret_chat(state: SecretChatState) -> Arc<Peer> {
    Arc::new(Peer::SecretChat(SecretChat {
        id: PeerId::new(PeerNamespace::SecretChat, 300),
        regular_peer_id: user_id(300),
        embedded_state: state,
    }))
}

pub fn text_message(peer_id: PeerId, id: i32, text: &str) -> Arc<Message> {
    Arc::new(Message::new(message_id(peer_id, id), text))
}

pub fn photo_message(peer_id: PeerId, id: i32, caption: &str) -> Arc<Message> {
    Arc::new(
        Message::new(message_id(peer_id, id), caption).with_media(vec![Media::Photo {
            id: MediaId::new(i64::from(id)),
        }]),
    )
}

pub fn link_message(peer_id: PeerId, id: i32, text: &str) -> Arc<Message> {
    Arc::new(
        Message::new(message_id(peer_id, id), text).with_media(vec![Media::Webpage(Webpage {
            id: MediaId::new(i64::from(id)),
            url: "https://example.com".to_string(),
            title: Some("Example".to_string()),
        })]),
    )
}

pub fn keyboard_message(peer_id: PeerId, id: i32, version: u32) -> Arc<Message> {
    Arc::new(
        Message::new(message_id(peer_id, id), "choose")
            .with_stable_version(version)
            .with_reply_markup(ReplyMarkup {
                rows: vec![KeyboardRow {
                    buttons: vec![
                        KeyboardButton {
                            title: "A".to_string(),
                        },
                        KeyboardButton {
                            title: "B".to_string(),
                        },
                    ],
                }],
                ..ReplyMarkup::default()
            }),
    )
}
