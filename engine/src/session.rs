//! Single owner of a chat view's presentation state.

use std::path::Path;
use std::sync::Arc;

use futures_util::stream::{BoxStream, StreamExt};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::WatchStream;

use chatview_core::recording::{AudioRecorder, VideoPipeline};
use chatview_core::{ActionEffect, MediaPayload, Mode, PresentationSnapshot, RecordingCapability};

use crate::error::SessionError;
use crate::interaction::{ChatInteraction, dispatch};
use crate::settings::SessionSettings;
use crate::view::ViewSummary;

/// Whether a transform produced a snapshot that needs a re-render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Changed,
    Unchanged,
}

impl UpdateOutcome {
    #[must_use]
    pub fn is_changed(self) -> bool {
        self == UpdateOutcome::Changed
    }
}

/// Owns the current [`PresentationSnapshot`] of one conversation view.
///
/// Every change goes through [`ChatSession::update`]. The new snapshot always
/// replaces the old one, but subscribers are only woken when the two differ
/// under the snapshot's equality. At most one recording is attached at a time.
pub struct ChatSession {
    settings: SessionSettings,
    publisher: watch::Sender<PresentationSnapshot>,
}

impl ChatSession {
    #[must_use]
    pub fn new(settings: SessionSettings) -> Self {
        let publisher = watch::Sender::new(PresentationSnapshot::new(settings.defaults));
        Self {
            settings,
            publisher,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Current snapshot. Cheap: heavy parts are shared.
    #[must_use]
    pub fn snapshot(&self) -> PresentationSnapshot {
        self.publisher.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<PresentationSnapshot> {
        self.publisher.subscribe()
    }

    /// Snapshots as they are published, starting with the current one.
    #[must_use]
    pub fn snapshots(&self) -> BoxStream<'static, PresentationSnapshot> {
        WatchStream::new(self.publisher.subscribe()).boxed()
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.publisher.borrow().mode()
    }

    #[must_use]
    pub fn view(&self) -> ViewSummary {
        ViewSummary::of(&self.publisher.borrow(), &self.settings.localizer)
    }

    pub fn update(
        &mut self,
        transform: impl FnOnce(&PresentationSnapshot) -> PresentationSnapshot,
    ) -> UpdateOutcome {
        let changed = self.publisher.send_if_modified(|current| {
            let next = transform(current);
            let changed = next != *current;
            *current = next;
            changed
        });
        if changed {
            tracing::debug!(mode = self.mode().name(), "snapshot changed");
            UpdateOutcome::Changed
        } else {
            tracing::trace!("snapshot unchanged");
            UpdateOutcome::Unchanged
        }
    }

    // ========================================================================
    // Recording
    // ========================================================================

    pub fn start_audio_recording(
        &mut self,
        recorder: Arc<dyn AudioRecorder>,
    ) -> Result<RecordingCapability, SessionError> {
        self.ensure_no_recording()?;
        let capability = RecordingCapability::audio(recorder, &self.settings.recording);
        Ok(self.attach(capability))
    }

    pub fn start_video_recording(
        &mut self,
        pipeline: impl FnOnce(&Path) -> Arc<dyn VideoPipeline>,
    ) -> Result<RecordingCapability, SessionError> {
        self.ensure_no_recording()?;
        let capability = RecordingCapability::video(&self.settings.recording, pipeline);
        Ok(self.attach(capability))
    }

    /// Stop the attached capture, wait for its payloads and detach it.
    pub async fn finish_recording(&mut self) -> Result<Vec<MediaPayload>, SessionError> {
        let capability = self.attached_recording()?;
        capability.stop();
        let payloads = capability.result_payloads().await;
        self.update(PresentationSnapshot::without_recording);
        tracing::info!(
            kind = %capability.kind(),
            payloads = payloads.len(),
            "recording finished"
        );
        Ok(payloads)
    }

    /// Detach and dispose the attached capture, discarding its output.
    pub fn cancel_recording(&mut self) -> Result<Option<JoinHandle<()>>, SessionError> {
        let capability = self.attached_recording()?;
        self.update(PresentationSnapshot::without_recording);
        tracing::info!(kind = %capability.kind(), "recording cancelled");
        Ok(capability.dispose())
    }

    fn attached_recording(&self) -> Result<RecordingCapability, SessionError> {
        self.publisher
            .borrow()
            .recording()
            .cloned()
            .ok_or(SessionError::NoRecording)
    }

    fn ensure_no_recording(&self) -> Result<(), SessionError> {
        match self.publisher.borrow().recording() {
            Some(existing) => Err(SessionError::RecordingActive {
                kind: existing.kind(),
            }),
            None => Ok(()),
        }
    }

    fn attach(&mut self, capability: RecordingCapability) -> RecordingCapability {
        capability.start();
        self.update(|snapshot| snapshot.with_recording(capability.clone()));
        tracing::info!(kind = %capability.kind(), "recording started");
        capability
    }

    // ========================================================================
    // Actions
    // ========================================================================

    /// Perform the current mode's action through `interaction`.
    pub fn invoke_action(
        &self,
        interaction: &dyn ChatInteraction,
    ) -> Result<ActionEffect, SessionError> {
        let snapshot = self.snapshot();
        let mode = snapshot.mode();
        let Some(action) = mode.action() else {
            return Err(SessionError::NoAction { mode: mode.name() });
        };
        let performed = dispatch(
            action.effect,
            snapshot.peer().map(Arc::as_ref),
            snapshot.initial_action(),
            interaction,
        );
        tracing::debug!(
            label = action.label.key(),
            effect = action.effect.as_str(),
            performed,
            "mode action invoked"
        );
        Ok(action.effect)
    }

    /// Restriction banner text when the mode is `Restricted`.
    #[must_use]
    pub fn restriction_text(&self) -> Option<String> {
        match self.mode() {
            Mode::Restricted(restriction) => Some(restriction.text(&self.settings.localizer)),
            _ => None,
        }
    }

    /// Tear the view down, disposing any attached recording.
    pub fn close(mut self) -> Option<JoinHandle<()>> {
        self.cancel_recording().ok().flatten()
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        if let Some(capability) = self.publisher.borrow().recording() {
            tracing::debug!(kind = %capability.kind(), "disposing recording on drop");
            if let Some(cleanup) = capability.dispose() {
                tracing::debug!(
                    kind = %capability.kind(),
                    finished = cleanup.is_finished(),
                    "recording cleanup task detached"
                );
            }
        }
    }
}
