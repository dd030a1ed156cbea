//! The single active composer affordance, derived from a snapshot.
//!
//! Rules are evaluated in a fixed order and the first match wins. See
//! [`resolve`].

use std::fmt;

use chatview_types::{
    BAN_FOREVER, BannedRightsFlags, ChannelParticipation, GroupMembership, InitialAction, Peer,
    SecretChatState,
};

use crate::labels::Localizer;
use crate::recording::RecordingCapability;
use crate::snapshot::PresentationSnapshot;

/// Label shown on the inline action button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionLabel {
    Join,
    Delete,
    Mute,
    Unmute,
    Return,
    WaitingOnline,
    Unblock,
    StartBot,
}

impl ActionLabel {
    /// Localization key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            ActionLabel::Join => "join",
            ActionLabel::Delete => "delete",
            ActionLabel::Mute => "mute",
            ActionLabel::Unmute => "unmute",
            ActionLabel::Return => "return",
            ActionLabel::WaitingOnline => "waitingOnline",
            ActionLabel::Unblock => "unblock",
            ActionLabel::StartBot => "startBot",
        }
    }
}

impl fmt::Display for ActionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// What pressing the action button does. Dispatched by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionEffect {
    JoinChannel,
    RemoveAndCloseChat,
    ToggleNotifications,
    ReturnGroup,
    Noop,
    Unblock,
    InvokeInitialAction,
    StartBot,
}

impl ActionEffect {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ActionEffect::JoinChannel => "join_channel",
            ActionEffect::RemoveAndCloseChat => "remove_and_close_chat",
            ActionEffect::ToggleNotifications => "toggle_notifications",
            ActionEffect::ReturnGroup => "return_group",
            ActionEffect::Noop => "noop",
            ActionEffect::Unblock => "unblock",
            ActionEffect::InvokeInitialAction => "invoke_initial_action",
            ActionEffect::StartBot => "start_bot",
        }
    }
}

/// Inline action button. Two actions are equal only when both the label and
/// the effect match, so `Start` for a deep link and `Start` for an empty bot
/// chat are distinct modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModeAction {
    pub label: ActionLabel,
    pub effect: ActionEffect,
}

impl ModeAction {
    #[must_use]
    pub const fn new(label: ActionLabel, effect: ActionEffect) -> Self {
        Self { label, effect }
    }
}

/// Send ban on the current channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Restriction {
    /// Lifted at the given unix timestamp.
    Until(i32),
    Forever,
}

impl Restriction {
    #[must_use]
    pub fn from_until_date(until_date: i32) -> Self {
        if until_date == BAN_FOREVER {
            Restriction::Forever
        } else {
            Restriction::Until(until_date)
        }
    }

    #[must_use]
    pub fn text(&self, localizer: &dyn Localizer) -> String {
        match *self {
            Restriction::Until(until_date) => localizer.restricted_until(until_date),
            Restriction::Forever => localizer.restricted_forever(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Normal,
    Selecting,
    Editing,
    Recording(RecordingCapability),
    Action(ModeAction),
    Restricted(Restriction),
}

impl Mode {
    #[must_use]
    pub fn is_normal(&self) -> bool {
        matches!(self, Mode::Normal)
    }

    #[must_use]
    pub fn is_editing(&self) -> bool {
        matches!(self, Mode::Editing)
    }

    #[must_use]
    pub fn action(&self) -> Option<ModeAction> {
        match self {
            Mode::Action(action) => Some(*action),
            _ => None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Normal => "normal",
            Mode::Selecting => "selecting",
            Mode::Editing => "editing",
            Mode::Recording(_) => "recording",
            Mode::Action(_) => "action",
            Mode::Restricted(_) => "restricted",
        }
    }
}

fn action(label: ActionLabel, effect: ActionEffect) -> Mode {
    Mode::Action(ModeAction::new(label, effect))
}

/// Decide the active mode. Total and pure; only reads the snapshot.
#[must_use]
pub fn resolve(snapshot: &PresentationSnapshot) -> Mode {
    if snapshot.selection().is_some() {
        return Mode::Selecting;
    }
    if snapshot.edit().is_some() {
        return Mode::Editing;
    }

    if let Some(peer) = snapshot.peer()
        && let Some(mode) = peer_mode(peer, snapshot)
    {
        return mode;
    }

    if snapshot.is_blocked() == Some(true) {
        return action(ActionLabel::Unblock, ActionEffect::Unblock);
    }
    // Duplicate of the first edit check. Unreachable, kept in rule order.
    if snapshot.edit().is_some() {
        return Mode::Editing;
    }
    if let Some(recording) = snapshot.recording() {
        return Mode::Recording(recording.clone());
    }
    if snapshot
        .initial_action()
        .is_some_and(InitialAction::is_start)
    {
        return action(ActionLabel::StartBot, ActionEffect::InvokeInitialAction);
    }
    if let Some(peer) = snapshot.peer()
        && peer.is_bot()
        && snapshot.history_count() == Some(0)
    {
        return action(ActionLabel::StartBot, ActionEffect::StartBot);
    }
    Mode::Normal
}

/// Peer-kind rules. `None` falls through to the remaining checks.
fn peer_mode(peer: &Peer, snapshot: &PresentationSnapshot) -> Option<Mode> {
    match peer {
        Peer::Channel(channel) => {
            if channel.participation == ChannelParticipation::Left {
                return Some(action(ActionLabel::Join, ActionEffect::JoinChannel));
            }
            if channel.participation == ChannelParticipation::Kicked {
                return Some(action(ActionLabel::Delete, ActionEffect::RemoveAndCloseChat));
            }
            if channel.has_banned_rights(BannedRightsFlags::SEND_MESSAGES)
                && let Some(rights) = channel.banned_rights
            {
                return Some(Mode::Restricted(Restriction::from_until_date(
                    rights.until_date,
                )));
            }
            if !channel.can_send_message()
                && let Some(settings) = snapshot.notification_settings()
            {
                let label = if settings.is_muted() {
                    ActionLabel::Unmute
                } else {
                    ActionLabel::Mute
                };
                return Some(action(label, ActionEffect::ToggleNotifications));
            }
            None
        }
        Peer::Group(group) => match group.membership {
            GroupMembership::Left => Some(action(ActionLabel::Return, ActionEffect::ReturnGroup)),
            GroupMembership::Removed => {
                Some(action(ActionLabel::Delete, ActionEffect::RemoveAndCloseChat))
            }
            GroupMembership::Member => None,
        },
        Peer::SecretChat(chat) => match chat.embedded_state {
            SecretChatState::Terminated => {
                Some(action(ActionLabel::Delete, ActionEffect::RemoveAndCloseChat))
            }
            SecretChatState::Handshake => {
                Some(action(ActionLabel::WaitingOnline, ActionEffect::Noop))
            }
            SecretChatState::Active => None,
        },
        Peer::User(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::labels::EnglishLocalizer;
    use crate::recording::mock::MockAudioRecorder;
    use crate::recording::RecordingOptions;
    use crate::snapshot::SnapshotDefaults;
    use chatview_types::{
        BannedRights, BotInfo, Channel, ChannelKind, Group, Message, MessageId,
        MuteState, NotificationSettings, PeerId, PeerNamespace, SecretChat, User,
    };

    fn snapshot() -> PresentationSnapshot {
        PresentationSnapshot::new(SnapshotDefaults::default())
    }

    fn megagroup(participation: ChannelParticipation) -> Channel {
        Channel {
            id: PeerId::new(PeerNamespace::CloudChannel, 5),
            title: "dev".to_string(),
            kind: ChannelKind::Megagroup,
            participation,
            is_creator: false,
            admin_rights: None,
            banned_rights: None,
        }
    }

    fn with_peer(snapshot: &PresentationSnapshot, peer: Peer) -> PresentationSnapshot {
        let peer = Arc::new(peer);
        snapshot.updated_peer(|_| Some(peer))
    }

    fn edit_target() -> Arc<Message> {
        Arc::new(Message::new(
            MessageId::cloud(PeerId::new(PeerNamespace::CloudUser, 1), 9),
            "draft",
        ))
    }

    fn recording() -> RecordingCapability {
        RecordingCapability::audio(
            Arc::new(MockAudioRecorder::new(None)),
            &RecordingOptions::default(),
        )
    }

    fn bot() -> Peer {
        Peer::User(User {
            id: PeerId::new(PeerNamespace::CloudUser, 77),
            name: "helper".to_string(),
            bot_info: Some(BotInfo {
                description: "helps".to_string(),
            }),
        })
    }

    #[test]
    fn default_snapshot_is_normal() {
        assert_eq!(resolve(&snapshot()), Mode::Normal);
    }

    #[test]
    fn resolve_is_pure() {
        let state = with_peer(&snapshot(), Peer::Channel(megagroup(ChannelParticipation::Left)));
        assert_eq!(resolve(&state), resolve(&state));
    }

    #[test]
    fn selection_dominates_everything() {
        let state = with_peer(&snapshot(), Peer::Channel(megagroup(ChannelParticipation::Kicked)))
            .with_edit_target(edit_target())
            .with_recording(recording())
            .with_updated_blocked(true)
            .with_selection();
        assert_eq!(resolve(&state), Mode::Selecting);
    }

    #[test]
    fn edit_beats_peer_rules() {
        let state = with_peer(&snapshot(), Peer::Channel(megagroup(ChannelParticipation::Left)))
            .with_updated_blocked(true)
            .with_edit_target(edit_target());
        assert_eq!(resolve(&state), Mode::Editing);
    }

    #[test]
    fn left_channel_offers_join() {
        let state = with_peer(&snapshot(), Peer::Channel(megagroup(ChannelParticipation::Left)));
        assert_eq!(
            resolve(&state).action(),
            Some(ModeAction::new(ActionLabel::Join, ActionEffect::JoinChannel))
        );
    }

    #[test]
    fn kicked_channel_beats_recording() {
        let state = with_peer(&snapshot(), Peer::Channel(megagroup(ChannelParticipation::Kicked)))
            .with_recording(recording());
        assert_eq!(
            resolve(&state),
            Mode::Action(ModeAction::new(
                ActionLabel::Delete,
                ActionEffect::RemoveAndCloseChat
            ))
        );
    }

    #[test]
    fn send_ban_is_restricted_until_or_forever() {
        let localizer = EnglishLocalizer::new("%Y-%m-%d");
        let mut channel = megagroup(ChannelParticipation::Member);
        channel.banned_rights = Some(BannedRights::new(
            BannedRightsFlags::SEND_MESSAGES,
            1_700_000_000,
        ));
        let state = with_peer(&snapshot(), Peer::Channel(channel.clone()));
        let Mode::Restricted(restriction) = resolve(&state) else {
            panic!("expected restricted mode");
        };
        assert_eq!(restriction, Restriction::Until(1_700_000_000));
        assert_eq!(
            restriction.text(&localizer),
            "You are restricted from sending messages until 2023-11-14"
        );

        channel.banned_rights = Some(BannedRights::new(
            BannedRightsFlags::SEND_MESSAGES,
            BAN_FOREVER,
        ));
        let state = with_peer(&snapshot(), Peer::Channel(channel));
        assert_eq!(resolve(&state), Mode::Restricted(Restriction::Forever));
        assert_eq!(
            Restriction::Forever.text(&localizer),
            "You are restricted from sending messages"
        );
    }

    #[test]
    fn read_only_broadcast_toggles_notifications_once_settings_known() {
        let mut channel = megagroup(ChannelParticipation::Member);
        channel.kind = ChannelKind::Broadcast;
        let state = with_peer(&snapshot(), Peer::Channel(channel));
        assert_eq!(resolve(&state), Mode::Normal);

        let unmuted = state.updated_notification_settings(Some(NotificationSettings::default()));
        assert_eq!(
            resolve(&unmuted).action(),
            Some(ModeAction::new(
                ActionLabel::Mute,
                ActionEffect::ToggleNotifications
            ))
        );

        let muted = state.updated_notification_settings(Some(NotificationSettings::new(
            MuteState::MutedForever,
        )));
        assert_eq!(
            resolve(&muted).action().map(|action| action.label),
            Some(ActionLabel::Unmute)
        );
    }

    #[test]
    fn group_membership_rules() {
        let group = |membership| {
            Peer::Group(Group {
                id: PeerId::new(PeerNamespace::CloudGroup, 3),
                title: "friends".to_string(),
                membership,
            })
        };
        let left = with_peer(&snapshot(), group(GroupMembership::Left));
        assert_eq!(
            resolve(&left).action().map(|action| action.effect),
            Some(ActionEffect::ReturnGroup)
        );
        let removed = with_peer(&snapshot(), group(GroupMembership::Removed));
        assert_eq!(
            resolve(&removed).action().map(|action| action.label),
            Some(ActionLabel::Delete)
        );
        let member = with_peer(&snapshot(), group(GroupMembership::Member));
        assert_eq!(resolve(&member), Mode::Normal);
    }

    #[test]
    fn secret_chat_rules() {
        let secret = |embedded_state| {
            Peer::SecretChat(SecretChat {
                id: PeerId::new(PeerNamespace::SecretChat, 8),
                regular_peer_id: PeerId::new(PeerNamespace::CloudUser, 8),
                embedded_state,
            })
        };
        let handshake = with_peer(&snapshot(), secret(SecretChatState::Handshake));
        assert_eq!(
            resolve(&handshake).action(),
            Some(ModeAction::new(ActionLabel::WaitingOnline, ActionEffect::Noop))
        );
        let terminated = with_peer(&snapshot(), secret(SecretChatState::Terminated));
        assert_eq!(
            resolve(&terminated).action().map(|action| action.effect),
            Some(ActionEffect::RemoveAndCloseChat)
        );
    }

    #[test]
    fn blocked_beats_recording() {
        let state = snapshot()
            .with_recording(recording())
            .with_updated_blocked(true);
        assert_eq!(
            resolve(&state).action().map(|action| action.label),
            Some(ActionLabel::Unblock)
        );
        assert!(matches!(
            resolve(&state.with_updated_blocked(false)),
            Mode::Recording(_)
        ));
    }

    #[test]
    fn recording_mode_carries_the_attached_session() {
        let capability = recording();
        let state = snapshot().with_recording(capability.clone());
        assert_eq!(resolve(&state), Mode::Recording(capability));
    }

    #[test]
    fn start_initial_action_offers_start_bot() {
        let state = snapshot().updated_initial_action(Some(InitialAction::Start {
            parameter: "ref42".to_string(),
        }));
        assert_eq!(
            resolve(&state).action(),
            Some(ModeAction::new(
                ActionLabel::StartBot,
                ActionEffect::InvokeInitialAction
            ))
        );

        let text = snapshot().updated_initial_action(Some(InitialAction::InputText("hi".into())));
        assert_eq!(resolve(&text), Mode::Normal);
    }

    #[test]
    fn empty_bot_history_offers_start_bot() {
        let state = with_peer(&snapshot(), bot());
        assert_eq!(state.history_count(), Some(0));
        assert_eq!(
            resolve(&state).action(),
            Some(ModeAction::new(ActionLabel::StartBot, ActionEffect::StartBot))
        );

        assert_eq!(resolve(&state.updated_history_count(None)), Mode::Normal);
        assert_eq!(resolve(&state.updated_history_count(Some(3))), Mode::Normal);
    }

    #[test]
    fn action_equality_includes_effect() {
        let deep_link = Mode::Action(ModeAction::new(
            ActionLabel::StartBot,
            ActionEffect::InvokeInitialAction,
        ));
        let empty_chat =
            Mode::Action(ModeAction::new(ActionLabel::StartBot, ActionEffect::StartBot));
        assert_ne!(deep_link, empty_chat);
        assert_eq!(
            empty_chat,
            Mode::Action(ModeAction::new(ActionLabel::StartBot, ActionEffect::StartBot))
        );
    }

    #[test]
    fn label_keys() {
        assert_eq!(ActionLabel::WaitingOnline.key(), "waitingOnline");
        assert_eq!(ActionLabel::StartBot.to_string(), "startBot");
        assert_eq!(ActionEffect::ReturnGroup.as_str(), "return_group");
    }
}
