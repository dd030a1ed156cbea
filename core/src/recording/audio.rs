use std::io;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::FutureExt;
use futures_util::stream::{BoxStream, StreamExt};
use tokio::fs;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::WatchStream;

use super::pipeline::AudioRecorder;
use super::{
    CaptureLifecycle, CapturePhase, MediaPayload, PayloadFuture, RecordingKind, RecordingStatus,
};

/// Voice note capture over a microphone [`AudioRecorder`].
pub struct AudioRecording {
    recorder: Arc<dyn AudioRecorder>,
    payloads: PayloadFuture,
    lifecycle: CaptureLifecycle,
}

impl AudioRecording {
    pub(super) fn new(recorder: Arc<dyn AudioRecorder>, min_duration: Duration) -> Self {
        let min_secs = min_duration.as_secs_f64();
        let recorded = recorder.take_recorded_data();
        let payloads = async move {
            match recorded.await {
                Some(audio) if audio.duration > min_secs => vec![MediaPayload::Voice {
                    path: audio.path,
                    duration: audio.duration,
                    waveform: audio.waveform,
                }],
                Some(audio) => {
                    tracing::debug!(
                        duration = audio.duration,
                        min = min_secs,
                        "voice note too short, discarding"
                    );
                    Vec::new()
                }
                None => Vec::new(),
            }
        }
        .boxed()
        .shared();

        Self {
            recorder,
            payloads,
            lifecycle: CaptureLifecycle::new(RecordingKind::Audio),
        }
    }

    pub fn mic_level(&self) -> BoxStream<'static, f32> {
        WatchStream::new(self.recorder.mic_level()).boxed()
    }

    pub fn status(&self) -> BoxStream<'static, RecordingStatus> {
        WatchStream::new(self.recorder.recording_state())
            .map(RecordingStatus::from)
            .boxed()
    }

    pub fn result_payloads(&self) -> PayloadFuture {
        self.payloads.clone()
    }

    pub fn phase(&self) -> CapturePhase {
        self.lifecycle.phase()
    }

    pub fn phase_changes(&self) -> watch::Receiver<CapturePhase> {
        self.lifecycle.subscribe()
    }

    pub fn start(&self) {
        if self.lifecycle.start() {
            self.recorder.start();
        }
    }

    pub fn stop(&self) {
        if self.lifecycle.stop() {
            self.recorder.stop();
        }
    }

    /// Stop the recorder if needed and delete whatever files it produced.
    ///
    /// Returns `None` when already disposed or when called outside a tokio runtime.
    pub fn dispose(&self) -> Option<JoinHandle<()>> {
        let previous = self.lifecycle.dispose()?;
        if previous != CapturePhase::Stopping {
            self.recorder.stop();
        }

        let payloads = self.payloads.clone();
        let Ok(handle) = Handle::try_current() else {
            tracing::warn!("No tokio runtime; recorded voice files were not cleaned up");
            return None;
        };
        Some(handle.spawn(async move {
            for payload in payloads.await {
                remove_payload_file(&payload).await;
            }
        }))
    }
}

async fn remove_payload_file(payload: &MediaPayload) {
    let path = payload.path();
    match fs::remove_file(path).await {
        Ok(()) => tracing::debug!("Removed discarded recording {:?}", path),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => tracing::warn!("Failed to remove discarded recording {:?}: {}", path, err),
    }
}
