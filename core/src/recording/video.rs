use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures_util::future::FutureExt;
use futures_util::stream::{BoxStream, StreamExt};
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use uuid::Uuid;

use super::pipeline::{VideoPipeline, VideoPipelineState};
use super::{
    CaptureLifecycle, CapturePhase, MediaPayload, PayloadFuture, RecordingKind, RecordingOptions,
    RecordingStatus,
};

/// Round video message capture over a camera [`VideoPipeline`].
pub struct VideoRecording {
    pipeline: Arc<dyn VideoPipeline>,
    path: PathBuf,
    payloads: PayloadFuture,
    lifecycle: CaptureLifecycle,
}

impl VideoRecording {
    pub(super) fn new(
        options: &RecordingOptions,
        build_pipeline: impl FnOnce(&Path) -> Arc<dyn VideoPipeline>,
    ) -> Self {
        let path = options
            .temp_dir
            .join(format!("video_message{}.mp4", Uuid::new_v4().simple()));
        let pipeline = build_pipeline(&path);
        let side = options.video_message_side;
        let state = pipeline.state();
        let payloads = finished_payload(state, side).boxed().shared();

        tracing::debug!("Video message will be written to {:?}", path);
        Self {
            pipeline,
            path,
            payloads,
            lifecycle: CaptureLifecycle::new(RecordingKind::Video),
        }
    }

    /// Temp file the pipeline writes into.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mic_level(&self) -> BoxStream<'static, f32> {
        WatchStream::new(self.pipeline.power_and_duration())
            .map(|(power, _)| power)
            .boxed()
    }

    pub fn status(&self) -> BoxStream<'static, RecordingStatus> {
        WatchStream::new(self.pipeline.power_and_duration())
            .map(|(_, duration)| RecordingStatus::Recording { duration })
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
            self.pipeline.start();
        }
    }

    pub fn stop(&self) {
        if self.lifecycle.stop() {
            self.pipeline.stop();
        }
    }

    pub fn dispose(&self) {
        let Some(previous) = self.lifecycle.dispose() else {
            return;
        };
        if previous == CapturePhase::Capturing {
            self.pipeline.stop();
        }
        self.pipeline.dispose();
    }
}

/// Wait for the pipeline to report `Finished`. A stopped or dropped pipeline
/// yields no payload.
async fn finished_payload(
    mut state: watch::Receiver<VideoPipelineState>,
    side: u32,
) -> Vec<MediaPayload> {
    loop {
        let finished = match &*state.borrow_and_update() {
            VideoPipelineState::Finished { path, duration } => Some(MediaPayload::VideoMessage {
                path: path.clone(),
                duration: *duration,
                width: side,
                height: side,
            }),
            VideoPipelineState::Stopped => return Vec::new(),
            VideoPipelineState::Idle | VideoPipelineState::Recording => None,
        };
        if let Some(payload) = finished {
            return vec![payload];
        }
        if state.changed().await.is_err() {
            return Vec::new();
        }
    }
}
