//! Session behavior: re-render decisions, recording policy and actions.

use std::mem;
use std::sync::{Arc, Mutex};

use futures_util::StreamExt;

use chatview_core::recording::mock::MockAudioRecorder;
use chatview_core::recording::RecordedAudio;
use chatview_engine::{
    ActionEffect, ChatInteraction, ChatSession, Mode, SessionError, SessionSettings,
    UpdateOutcome,
};
use chatview_types::{
    GroupMembership, InitialAction, MuteState, NotificationSettings, Peer, SplitLayout,
    TextInputState,
};

use crate::common::{bot, group, keyboard_message, user};

#[derive(Default)]
struct Calls(Mutex<Vec<&'static str>>);

impl Calls {
    fn push(&self, call: &'static str) {
        self.0.lock().unwrap().push(call);
    }

    fn take(&self) -> Vec<&'static str> {
        mem::take(&mut *self.0.lock().unwrap())
    }
}

impl ChatInteraction for Calls {
    fn join_channel(&self, _peer: &Peer) {
        self.push("join_channel");
    }
    fn remove_and_close_chat(&self, _peer: &Peer) {
        self.push("remove_and_close_chat");
    }
    fn toggle_notifications(&self, _peer: &Peer) {
        self.push("toggle_notifications");
    }
    fn return_group(&self, _peer: &Peer) {
        self.push("return_group");
    }
    fn unblock(&self, _peer: &Peer) {
        self.push("unblock");
    }
    fn invoke_initial_action(&self, _action: &InitialAction) {
        self.push("invoke_initial_action");
    }
    fn start_bot(&self, _peer: &Peer) {
        self.push("start_bot");
    }
}

fn session() -> ChatSession {
    ChatSession::new(SessionSettings::default())
}

#[test]
fn only_contract_changes_wake_subscribers() {
    let mut session = session();
    let peer = user(1);
    session.update(|s| s.updated_peer(|_| Some(peer)));
    let rx = session.subscribe();

    // Same record in a new allocation: same identity under the contract.
    let same = user(1);
    assert_eq!(
        session.update(|s| s.updated_peer(|_| Some(same))),
        UpdateOutcome::Unchanged
    );
    assert_eq!(
        session.update(|s| {
            s.updated_notification_settings(Some(NotificationSettings::new(MuteState::MutedForever)))
        }),
        UpdateOutcome::Unchanged
    );
    assert!(!rx.has_changed().unwrap());

    assert_eq!(
        session.update(|s| {
            s.with_sidebar_enabled(Some(true))
                .with_sidebar_shown(Some(true))
                .with_updated_layout(Some(SplitLayout::Dual))
        }),
        UpdateOutcome::Changed
    );
    assert!(rx.has_changed().unwrap());
    assert!(session.view().sidebar_visible);
}

#[test]
fn keyboard_side_channel_in_groups() {
    let mut session = session();
    let peer = group(GroupMembership::Member);
    let peer_id = peer.id();
    session.update(|s| s.updated_peer(|_| Some(peer)));
    session.update(|s| s.updated_keyboard_message(Some(keyboard_message(peer_id, 10, 0))));

    let snapshot = session.snapshot();
    assert_eq!(
        snapshot
            .interface_state()
            .message_actions_state
            .processed_setup_reply_message_id
            .map(|id| id.id()),
        Some(10)
    );
    assert!(session.view().keyboard_shown);
}

#[test]
fn actions_dispatch_by_effect() {
    let calls = Calls::default();
    let mut session = session();

    let left = group(GroupMembership::Left);
    session.update(|s| s.updated_peer(|_| Some(left)));
    assert_eq!(session.invoke_action(&calls).unwrap(), ActionEffect::ReturnGroup);

    let fresh_bot = bot(5);
    session.update(|s| s.updated_peer(|_| Some(fresh_bot)).updated_history_count(Some(0)));
    assert_eq!(session.invoke_action(&calls).unwrap(), ActionEffect::StartBot);

    session.update(|s| s.with_updated_blocked(true));
    assert_eq!(session.invoke_action(&calls).unwrap(), ActionEffect::Unblock);

    assert_eq!(calls.take(), vec!["return_group", "start_bot", "unblock"]);

    session.update(|s| s.with_updated_blocked(false).updated_history_count(Some(4)));
    assert!(matches!(
        session.invoke_action(&calls),
        Err(SessionError::NoAction { .. })
    ));
}

#[tokio::test]
async fn recording_lifecycle_through_session() {
    let mut session = session();
    session.update(|s| {
        s.updated_peer(|_| Some(user(1)))
            .with_updated_effective_input(TextInputState::with_caret_at_end("typing"))
    });
    assert!(session.view().can_send);

    let recorder = Arc::new(MockAudioRecorder::new(Some(RecordedAudio {
        path: "/tmp/chatview-session.ogg".into(),
        duration: 0.3,
        waveform: None,
    })));
    let capability = session.start_audio_recording(recorder).unwrap();
    assert_eq!(session.mode(), Mode::Recording(capability));
    assert!(!session.view().can_send);
    assert_eq!(session.view().recording, Some("audio"));

    let payloads = session.finish_recording().await.unwrap();
    assert!(payloads.is_empty());
    assert_eq!(session.mode(), Mode::Normal);
    assert_eq!(session.snapshot().effective_input().text(), "typing");
}

#[tokio::test]
async fn snapshot_stream_sees_published_changes() {
    let mut session = session();
    let mut snapshots = session.snapshots();
    assert!(!snapshots.next().await.unwrap().is_search_mode());

    session.update(|s| s.updated_search_mode(true));
    assert!(snapshots.next().await.unwrap().is_search_mode());
}
