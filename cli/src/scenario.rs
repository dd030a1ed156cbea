//! JSON scenario replay.
//!
//! A scenario is a JSON array of events. Each event is applied to a
//! [`ChatSession`] and produces one [`StepReport`] with the derived view
//! after the step. Recording events drive the mock capture pipelines.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use chatview_core::recording::mock::{MockAudioRecorder, MockVideoPipeline};
use chatview_core::recording::{RecordedAudio, VideoPipeline};
use chatview_core::{MediaPayload, UrlPreview};
use chatview_engine::{ChatInteraction, ChatSession, UpdateOutcome, ViewSummary};
use chatview_types::{
    InitialAction, Message, MessageId, NotificationSettings, Peer, ReportStatus, SplitLayout,
    TextInputState, Webpage,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScenarioEvent {
    Peer {
        peer: Option<Peer>,
    },
    Input {
        text: String,
    },
    Forward {
        ids: Vec<MessageId>,
    },
    NotificationSettings {
        settings: Option<NotificationSettings>,
    },
    HistoryCount {
        count: Option<usize>,
    },
    Search {
        enabled: bool,
    },
    InitialAction {
        action: Option<InitialAction>,
    },
    KeyboardMessage {
        message: Option<Message>,
    },
    CloseKeyboard {
        id: Option<MessageId>,
    },
    Edit {
        message: Message,
    },
    EndEdit,
    Blocked {
        blocked: bool,
    },
    Pinned {
        id: Option<MessageId>,
    },
    ReportStatus {
        status: ReportStatus,
    },
    UrlPreview {
        url: String,
        webpage: Webpage,
    },
    ClearUrlPreview,
    Select {
        id: MessageId,
    },
    ToggleSelection {
        id: MessageId,
    },
    SelectAll {
        ids: Vec<MessageId>,
    },
    EnterSelection,
    ClearSelection,
    Sidebar {
        enabled: Option<bool>,
        shown: Option<bool>,
        layout: Option<SplitLayout>,
    },
    ContactAdding {
        can_add: Option<bool>,
    },
    EmojiSection {
        enabled: bool,
    },
    /// Start a voice note whose recorder will report `duration` seconds.
    StartVoice {
        duration: f64,
    },
    StartVideo,
    VideoProgress {
        power: f32,
        duration: f64,
    },
    FinishRecording,
    CancelRecording,
    InvokeAction,
}

impl ScenarioEvent {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioEvent::Peer { .. } => "peer",
            ScenarioEvent::Input { .. } => "input",
            ScenarioEvent::Forward { .. } => "forward",
            ScenarioEvent::NotificationSettings { .. } => "notification_settings",
            ScenarioEvent::HistoryCount { .. } => "history_count",
            ScenarioEvent::Search { .. } => "search",
            ScenarioEvent::InitialAction { .. } => "initial_action",
            ScenarioEvent::KeyboardMessage { .. } => "keyboard_message",
            ScenarioEvent::CloseKeyboard { .. } => "close_keyboard",
            ScenarioEvent::Edit { .. } => "edit",
            ScenarioEvent::EndEdit => "end_edit",
            ScenarioEvent::Blocked { .. } => "blocked",
            ScenarioEvent::Pinned { .. } => "pinned",
            ScenarioEvent::ReportStatus { .. } => "report_status",
            ScenarioEvent::UrlPreview { .. } => "url_preview",
            ScenarioEvent::ClearUrlPreview => "clear_url_preview",
            ScenarioEvent::Select { .. } => "select",
            ScenarioEvent::ToggleSelection { .. } => "toggle_selection",
            ScenarioEvent::SelectAll { .. } => "select_all",
            ScenarioEvent::EnterSelection => "enter_selection",
            ScenarioEvent::ClearSelection => "clear_selection",
            ScenarioEvent::Sidebar { .. } => "sidebar",
            ScenarioEvent::ContactAdding { .. } => "contact_adding",
            ScenarioEvent::EmojiSection { .. } => "emoji_section",
            ScenarioEvent::StartVoice { .. } => "start_voice",
            ScenarioEvent::StartVideo => "start_video",
            ScenarioEvent::VideoProgress { .. } => "video_progress",
            ScenarioEvent::FinishRecording => "finish_recording",
            ScenarioEvent::CancelRecording => "cancel_recording",
            ScenarioEvent::InvokeAction => "invoke_action",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayloadSummary {
    pub kind: &'static str,
    pub path: PathBuf,
    pub duration: f64,
}

impl From<&MediaPayload> for PayloadSummary {
    fn from(payload: &MediaPayload) -> Self {
        let kind = match payload {
            MediaPayload::Voice { .. } => "voice",
            MediaPayload::VideoMessage { .. } => "video_message",
        };
        Self {
            kind,
            path: payload.path().to_path_buf(),
            duration: payload.duration(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepReport {
    pub step: usize,
    pub event: &'static str,
    pub changed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payloads: Option<Vec<PayloadSummary>>,
    pub view: ViewSummary,
}

/// Parse a scenario document.
pub fn parse(json: &str) -> Result<Vec<ScenarioEvent>> {
    serde_json::from_str(json).context("invalid scenario JSON")
}

/// Applies scenario events to a session.
pub struct Replayer<'a> {
    session: ChatSession,
    interaction: &'a dyn ChatInteraction,
    video: Option<Arc<MockVideoPipeline>>,
    voice_notes: usize,
    step: usize,
}

impl<'a> Replayer<'a> {
    #[must_use]
    pub fn new(session: ChatSession, interaction: &'a dyn ChatInteraction) -> Self {
        Self {
            session,
            interaction,
            video: None,
            voice_notes: 0,
            step: 0,
        }
    }

    pub async fn apply(&mut self, event: ScenarioEvent) -> Result<StepReport> {
        self.step += 1;
        let name = event.name();
        tracing::debug!(step = self.step, event = name, "applying scenario event");

        let mut effect = None;
        let mut payloads = None;
        let outcome = match event {
            ScenarioEvent::Peer { peer } => {
                let peer = peer.map(Arc::new);
                self.session.update(|s| s.updated_peer(|_| peer))
            }
            ScenarioEvent::Input { text } => self
                .session
                .update(|s| s.with_updated_effective_input(TextInputState::with_caret_at_end(text))),
            ScenarioEvent::Forward { ids } => self.session.update(|s| {
                s.updated_interface_state(|state| state.with_updated_forward_message_ids(ids))
            }),
            ScenarioEvent::NotificationSettings { settings } => self
                .session
                .update(|s| s.updated_notification_settings(settings)),
            ScenarioEvent::HistoryCount { count } => {
                self.session.update(|s| s.updated_history_count(count))
            }
            ScenarioEvent::Search { enabled } => {
                self.session.update(|s| s.updated_search_mode(enabled))
            }
            ScenarioEvent::InitialAction { action } => {
                self.session.update(|s| s.updated_initial_action(action))
            }
            ScenarioEvent::KeyboardMessage { message } => {
                let message = message.map(Arc::new);
                self.session.update(|s| s.updated_keyboard_message(message))
            }
            ScenarioEvent::CloseKeyboard { id } => self.session.update(|s| {
                s.updated_interface_state(|state| {
                    state.with_updated_message_actions_state(|actions| {
                        actions.with_updated_closed_button_keyboard_message_id(id)
                    })
                })
            }),
            ScenarioEvent::Edit { message } => {
                let message = Arc::new(message);
                self.session.update(|s| s.with_edit_target(message))
            }
            ScenarioEvent::EndEdit => self.session.update(|s| s.without_edit_target()),
            ScenarioEvent::Blocked { blocked } => {
                self.session.update(|s| s.with_updated_blocked(blocked))
            }
            ScenarioEvent::Pinned { id } => {
                self.session.update(|s| s.with_updated_pinned_message_id(id))
            }
            ScenarioEvent::ReportStatus { status } => {
                self.session.update(|s| s.with_updated_report_status(status))
            }
            ScenarioEvent::UrlPreview { url, webpage } => {
                let preview = UrlPreview::new(url, Arc::new(webpage));
                self.session.update(|s| s.updated_url_preview(Some(preview)))
            }
            ScenarioEvent::ClearUrlPreview => self.session.update(|s| s.updated_url_preview(None)),
            ScenarioEvent::Select { id } => self.session.update(|s| s.with_selected_message(id)),
            ScenarioEvent::ToggleSelection { id } => {
                self.session.update(|s| s.with_selection_toggled(id))
            }
            ScenarioEvent::SelectAll { ids } => self
                .session
                .update(|s| s.with_selected_messages(ids.into_iter().collect())),
            ScenarioEvent::EnterSelection => self.session.update(|s| s.with_selection()),
            ScenarioEvent::ClearSelection => self.session.update(|s| s.with_selection_cleared()),
            ScenarioEvent::Sidebar {
                enabled,
                shown,
                layout,
            } => self.session.update(|s| {
                s.with_sidebar_enabled(enabled)
                    .with_sidebar_shown(shown)
                    .with_updated_layout(layout)
            }),
            ScenarioEvent::ContactAdding { can_add } => {
                self.session.update(|s| s.with_updated_contact_adding(can_add))
            }
            ScenarioEvent::EmojiSection { enabled } => {
                self.session.update(|s| s.with_updated_emoji_section(enabled))
            }
            ScenarioEvent::StartVoice { duration } => {
                self.voice_notes += 1;
                let path = self
                    .session
                    .settings()
                    .recording
                    .temp_dir
                    .join(format!("voice_note{}.ogg", self.voice_notes));
                let recorder = Arc::new(MockAudioRecorder::new(Some(RecordedAudio {
                    path,
                    duration,
                    waveform: None,
                })));
                self.session.start_audio_recording(recorder)?;
                UpdateOutcome::Changed
            }
            ScenarioEvent::StartVideo => {
                let mut built = None;
                self.session.start_video_recording(|path| {
                    let pipeline = Arc::new(MockVideoPipeline::new(path));
                    built = Some(pipeline.clone());
                    pipeline as Arc<dyn VideoPipeline>
                })?;
                self.video = built;
                UpdateOutcome::Changed
            }
            ScenarioEvent::VideoProgress { power, duration } => {
                match &self.video {
                    Some(pipeline) => pipeline.set_power_and_duration(power, duration),
                    None => tracing::warn!("video_progress without an active video recording"),
                }
                UpdateOutcome::Unchanged
            }
            ScenarioEvent::FinishRecording => {
                let finished = self.session.finish_recording().await?;
                self.video = None;
                payloads = Some(finished.iter().map(PayloadSummary::from).collect());
                UpdateOutcome::Changed
            }
            ScenarioEvent::CancelRecording => {
                let cleanup = self.session.cancel_recording()?;
                self.video = None;
                if let Some(cleanup) = cleanup {
                    cleanup.await.context("recording cleanup task failed")?;
                }
                UpdateOutcome::Changed
            }
            ScenarioEvent::InvokeAction => {
                effect = Some(self.session.invoke_action(self.interaction)?.as_str());
                UpdateOutcome::Unchanged
            }
        };

        Ok(StepReport {
            step: self.step,
            event: name,
            changed: outcome.is_changed(),
            effect,
            payloads,
            view: self.session.view(),
        })
    }

    pub async fn run(&mut self, events: Vec<ScenarioEvent>) -> Result<Vec<StepReport>> {
        let mut reports = Vec::with_capacity(events.len());
        for event in events {
            let name = event.name();
            let report = self
                .apply(event)
                .await
                .with_context(|| format!("step {} ({name}) failed", self.step))?;
            reports.push(report);
        }
        Ok(reports)
    }

    /// Close the session, waiting for any recording cleanup.
    pub async fn finish(self) -> Result<()> {
        if let Some(cleanup) = self.session.close() {
            cleanup.await.context("recording cleanup task failed")?;
        }
        Ok(())
    }
}
