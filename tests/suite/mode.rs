//! Mode precedence and derived properties through the public snapshot API.

use std::sync::Arc;

use chatview_core::recording::mock::MockAudioRecorder;
use chatview_core::{
    ActionEffect, ActionLabel, EnglishLocalizer, MAX_CAPTION_LENGTH, MAX_MESSAGE_LENGTH, Mode,
    ModeAction, PresentationSnapshot, RecordingCapability, RecordingOptions, Restriction,
};
use chatview_types::{
    BAN_FOREVER, ChannelKind, ChannelParticipation, GroupMembership, InitialAction, MuteState,
    NotificationSettings, Peer, SecretChatState, TextInputState,
};

use crate::common::{
    bot, channel, group, link_message, message_id, photo_message, secret_chat,
    send_banned_channel, text_message, user, user_id,
};

fn with_peer(peer: Arc<Peer>) -> PresentationSnapshot {
    PresentationSnapshot::default().updated_peer(|_| Some(peer))
}

fn audio() -> RecordingCapability {
    RecordingCapability::audio(
        Arc::new(MockAudioRecorder::new(None)),
        &RecordingOptions::default(),
    )
}

/// A snapshot where almost every rule would fire.
fn loaded() -> PresentationSnapshot {
    with_peer(Arc::new(Peer::Channel(channel(
        ChannelKind::Megagroup,
        ChannelParticipation::Kicked,
    ))))
    .with_updated_blocked(true)
    .with_recording(audio())
    .updated_initial_action(Some(InitialAction::Start {
        parameter: "p".to_string(),
    }))
}

#[test]
fn mode_is_deterministic() {
    let state = loaded();
    let first = state.mode();
    for _ in 0..3 {
        assert_eq!(state.mode(), first);
    }
}

#[test]
fn selection_beats_every_other_rule() {
    let state = loaded()
        .with_edit_target(text_message(user_id(1), 1, "x"))
        .with_selected_message(message_id(user_id(1), 1));
    assert_eq!(state.mode(), Mode::Selecting);
}

#[test]
fn edit_beats_everything_but_selection() {
    let state = loaded().with_edit_target(text_message(user_id(1), 1, "x"));
    assert_eq!(state.mode(), Mode::Editing);
}

#[test]
fn kicked_channel_beats_recording() {
    assert_eq!(
        loaded().mode(),
        Mode::Action(ModeAction::new(
            ActionLabel::Delete,
            ActionEffect::RemoveAndCloseChat
        ))
    );
}

#[test]
fn restriction_until_date_and_forever() {
    let localizer = EnglishLocalizer::new("%Y-%m-%d %H:%M");
    let until = with_peer(send_banned_channel(1_000_000_000));
    assert_eq!(until.mode(), Mode::Restricted(Restriction::Until(1_000_000_000)));
    let Mode::Restricted(restriction) = until.mode() else {
        unreachable!()
    };
    assert_eq!(
        restriction.text(&localizer),
        "You are restricted from sending messages until 2001-09-09 01:46"
    );

    let forever = with_peer(send_banned_channel(BAN_FOREVER));
    assert_eq!(forever.mode(), Mode::Restricted(Restriction::Forever));
}

#[test]
fn broadcast_reader_gets_mute_toggle() {
    let reader = with_peer(Arc::new(Peer::Channel(channel(
        ChannelKind::Broadcast,
        ChannelParticipation::Member,
    ))))
    .updated_notification_settings(Some(NotificationSettings::new(MuteState::MutedUntil(5))));
    let action = reader.mode().action().unwrap();
    assert_eq!(action.label, ActionLabel::Unmute);
    assert_eq!(action.effect, ActionEffect::ToggleNotifications);
}

#[test]
fn group_and_secret_chat_actions() {
    let cases = [
        (group(GroupMembership::Left), ActionLabel::Return),
        (group(GroupMembership::Removed), ActionLabel::Delete),
        (secret_chat(SecretChatState::Terminated), ActionLabel::Delete),
        (secret_chat(SecretChatState::Handshake), ActionLabel::WaitingOnline),
    ];
    for (peer, label) in cases {
        let state = with_peer(peer);
        assert_eq!(state.mode().action().map(|action| action.label), Some(label));
    }
    assert_eq!(
        with_peer(secret_chat(SecretChatState::Active)).mode(),
        Mode::Normal
    );
}

#[test]
fn bot_start_flows() {
    let fresh_bot = with_peer(bot(9)).updated_history_count(Some(0));
    assert_eq!(
        fresh_bot.mode().action().map(|action| action.effect),
        Some(ActionEffect::StartBot)
    );

    let deep_link = fresh_bot.updated_initial_action(Some(InitialAction::Start {
        parameter: "ref".to_string(),
    }));
    assert_eq!(
        deep_link.mode().action().map(|action| action.effect),
        Some(ActionEffect::InvokeInitialAction)
    );

    let unknown_history = with_peer(bot(9)).updated_history_count(None);
    assert_eq!(unknown_history.mode(), Mode::Normal);
}

#[test]
fn fresh_snapshot_offers_start_for_bots() {
    let state = with_peer(bot(9));
    assert_eq!(state.history_count(), Some(0));
    assert_eq!(
        state.mode().action(),
        Some(ModeAction::new(ActionLabel::StartBot, ActionEffect::StartBot))
    );
}

#[test]
fn can_send_with_forwards_only() {
    let state = with_peer(user(1)).updated_interface_state(|interface| {
        interface.with_updated_forward_message_ids(vec![message_id(user_id(2), 3)])
    });
    assert!(state.effective_input().is_empty());
    assert!(state.can_send());
}

#[test]
fn cannot_send_with_nothing_or_in_action_mode() {
    assert!(!with_peer(user(1)).can_send());
    let left = with_peer(group(GroupMembership::Left))
        .with_updated_effective_input(TextInputState::with_caret_at_end("hello"));
    assert!(!left.can_send());
    assert_eq!(left.max_input_length(), 0);
}

#[test]
fn max_input_length_treats_link_previews_as_text() {
    let link = with_peer(user(1)).with_edit_target(link_message(user_id(1), 4, "see this"));
    assert_eq!(link.max_input_length(), MAX_MESSAGE_LENGTH);

    let photo = with_peer(user(1)).with_edit_target(photo_message(user_id(1), 5, ""));
    assert_eq!(photo.max_input_length(), MAX_CAPTION_LENGTH);
    assert!(photo.can_send());
}

#[test]
fn edit_round_trip_is_equal_to_start() {
    let start = with_peer(user(1))
        .with_updated_effective_input(TextInputState::with_caret_at_end("draft"));
    let round_trip = start
        .with_edit_target(text_message(user_id(1), 2, "original"))
        .with_updated_effective_input(TextInputState::with_caret_at_end("changed"))
        .without_edit_target();
    assert_eq!(round_trip, start);
    assert_eq!(round_trip.effective_input().text(), "draft");
}
