//! Voice and video-message capture sessions.
//!
//! [`RecordingCapability`] is the one surface the rest of the crate sees. Each
//! variant wraps a live capture pipeline and exposes its level and status as
//! streams plus a single-shot, multi-subscriber result.

mod audio;
pub mod mock;
mod pipeline;
mod video;

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::{BoxFuture, Shared};
use futures_util::stream::BoxStream;
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub use audio::AudioRecording;
pub use pipeline::{AudioRecorder, RecordedAudio, RecorderState, VideoPipeline, VideoPipelineState};
pub use video::VideoRecording;

const DEFAULT_MIN_VOICE_DURATION: Duration = Duration::from_millis(500);
const DEFAULT_VIDEO_MESSAGE_SIDE: u32 = 200;

/// Finalized result, resolved once and shared by every subscriber.
pub type PayloadFuture = Shared<BoxFuture<'static, Vec<MediaPayload>>>;

/// Knobs injected by whoever starts a capture; see `chatview-config`.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingOptions {
    /// Voice notes must be strictly longer than this to produce a payload.
    pub min_voice_duration: Duration,
    pub video_message_side: u32,
    pub temp_dir: PathBuf,
}

impl Default for RecordingOptions {
    fn default() -> Self {
        Self {
            min_voice_duration: DEFAULT_MIN_VOICE_DURATION,
            video_message_side: DEFAULT_VIDEO_MESSAGE_SIDE,
            temp_dir: env::temp_dir(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecordingStatus {
    Paused,
    Recording { duration: f64 },
}

impl From<RecorderState> for RecordingStatus {
    fn from(state: RecorderState) -> Self {
        match state {
            RecorderState::Paused => RecordingStatus::Paused,
            RecorderState::Recording { duration } => RecordingStatus::Recording { duration },
        }
    }
}

/// Sendable media produced by a finished capture.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaPayload {
    Voice {
        path: PathBuf,
        duration: f64,
        waveform: Option<Vec<u8>>,
    },
    VideoMessage {
        path: PathBuf,
        duration: f64,
        width: u32,
        height: u32,
    },
}

impl MediaPayload {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            MediaPayload::Voice { path, .. } | MediaPayload::VideoMessage { path, .. } => path,
        }
    }

    #[must_use]
    pub fn duration(&self) -> f64 {
        match self {
            MediaPayload::Voice { duration, .. } | MediaPayload::VideoMessage { duration, .. } => {
                *duration
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordingKind {
    Audio,
    Video,
}

impl RecordingKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            RecordingKind::Audio => "audio",
            RecordingKind::Video => "video",
        }
    }
}

impl fmt::Display for RecordingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a capture session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CapturePhase {
    #[default]
    Idle,
    Capturing,
    Stopping,
    Disposed,
}

/// Watch-published lifecycle phase shared by both capture variants.
#[derive(Debug)]
struct CaptureLifecycle {
    kind: RecordingKind,
    phase: watch::Sender<CapturePhase>,
}

impl CaptureLifecycle {
    fn new(kind: RecordingKind) -> Self {
        let (phase, _) = watch::channel(CapturePhase::Idle);
        Self { kind, phase }
    }

    fn phase(&self) -> CapturePhase {
        *self.phase.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<CapturePhase> {
        self.phase.subscribe()
    }

    /// Move to `to` from any phase in `from`. Any other current phase leaves
    /// the state untouched.
    fn advance(&self, from: &[CapturePhase], to: CapturePhase) -> bool {
        let mut observed = CapturePhase::Idle;
        let moved = self.phase.send_if_modified(|phase| {
            observed = *phase;
            if from.contains(phase) {
                *phase = to;
                true
            } else {
                false
            }
        });
        if moved {
            tracing::debug!(kind = %self.kind, from = ?observed, ?to, "recording phase changed");
        } else {
            tracing::debug!(
                kind = %self.kind,
                phase = ?observed,
                requested = ?to,
                "ignoring out-of-order recording call"
            );
        }
        moved
    }

    /// Mark disposed, returning the phase it left. `None` if already disposed.
    fn start(&self) -> bool {
        self.advance(&[CapturePhase::Idle], CapturePhase::Capturing)
    }

    /// Finalization may be requested before capture started.
    fn stop(&self) -> bool {
        self.advance(
            &[CapturePhase::Idle, CapturePhase::Capturing],
            CapturePhase::Stopping,
        )
    }

    fn dispose(&self) -> Option<CapturePhase> {
        let mut previous = CapturePhase::Disposed;
        self.phase.send_if_modified(|phase| {
            previous = *phase;
            *phase = CapturePhase::Disposed;
            previous != CapturePhase::Disposed
        });
        if previous == CapturePhase::Disposed {
            tracing::debug!(kind = %self.kind, "recording already disposed");
            None
        } else {
            tracing::debug!(kind = %self.kind, from = ?previous, "recording disposed");
            Some(previous)
        }
    }
}

/// A live capture session attached to the chat view.
///
/// Cloning shares the session. Two capabilities are equal only when they are
/// handles to the same session.
#[derive(Clone)]
pub enum RecordingCapability {
    Audio(Arc<AudioRecording>),
    Video(Arc<VideoRecording>),
}

impl RecordingCapability {
    /// Voice capture over `recorder`.
    #[must_use]
    pub fn audio(recorder: Arc<dyn AudioRecorder>, options: &RecordingOptions) -> Self {
        RecordingCapability::Audio(Arc::new(AudioRecording::new(
            recorder,
            options.min_voice_duration,
        )))
    }

    /// Video-message capture. `pipeline` is built for the generated temp file path.
    #[must_use]
    pub fn video(
        options: &RecordingOptions,
        pipeline: impl FnOnce(&Path) -> Arc<dyn VideoPipeline>,
    ) -> Self {
        RecordingCapability::Video(Arc::new(VideoRecording::new(options, pipeline)))
    }

    #[must_use]
    pub fn kind(&self) -> RecordingKind {
        match self {
            RecordingCapability::Audio(_) => RecordingKind::Audio,
            RecordingCapability::Video(_) => RecordingKind::Video,
        }
    }

    #[must_use]
    pub fn mic_level(&self) -> BoxStream<'static, f32> {
        match self {
            RecordingCapability::Audio(audio) => audio.mic_level(),
            RecordingCapability::Video(video) => video.mic_level(),
        }
    }

    #[must_use]
    pub fn status(&self) -> BoxStream<'static, RecordingStatus> {
        match self {
            RecordingCapability::Audio(audio) => audio.status(),
            RecordingCapability::Video(video) => video.status(),
        }
    }

    #[must_use]
    pub fn result_payloads(&self) -> PayloadFuture {
        match self {
            RecordingCapability::Audio(audio) => audio.result_payloads(),
            RecordingCapability::Video(video) => video.result_payloads(),
        }
    }

    #[must_use]
    pub fn phase(&self) -> CapturePhase {
        match self {
            RecordingCapability::Audio(audio) => audio.phase(),
            RecordingCapability::Video(video) => video.phase(),
        }
    }

    #[must_use]
    pub fn phase_changes(&self) -> watch::Receiver<CapturePhase> {
        match self {
            RecordingCapability::Audio(audio) => audio.phase_changes(),
            RecordingCapability::Video(video) => video.phase_changes(),
        }
    }

    pub fn start(&self) {
        match self {
            RecordingCapability::Audio(audio) => audio.start(),
            RecordingCapability::Video(video) => video.start(),
        }
    }

    pub fn stop(&self) {
        match self {
            RecordingCapability::Audio(audio) => audio.stop(),
            RecordingCapability::Video(video) => video.stop(),
        }
    }

    /// Tear the session down, stopping an in-flight capture first.
    ///
    /// Audio sessions return the handle of the spawned file cleanup task.
    pub fn dispose(&self) -> Option<JoinHandle<()>> {
        match self {
            RecordingCapability::Audio(audio) => audio.dispose(),
            RecordingCapability::Video(video) => {
                video.dispose();
                None
            }
        }
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RecordingCapability::Audio(lhs), RecordingCapability::Audio(rhs)) => {
                Arc::ptr_eq(lhs, rhs)
            }
            (RecordingCapability::Video(lhs), RecordingCapability::Video(rhs)) => {
                Arc::ptr_eq(lhs, rhs)
            }
            _ => false,
        }
    }
}

impl PartialEq for RecordingCapability {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for RecordingCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingCapability")
            .field("kind", &self.kind())
            .field("phase", &self.phase())
            .finish_non_exhaustive()
    }
}
