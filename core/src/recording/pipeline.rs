//! Capture pipeline surfaces the recording capabilities drive.
//!
//! Real microphone and camera pipelines live outside this workspace; they
//! publish their live state on `watch` channels and the capabilities only
//! subscribe.

use std::path::PathBuf;

use futures_util::future::BoxFuture;
use tokio::sync::watch;

/// Driver-level state of a microphone recorder.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RecorderState {
    #[default]
    Paused,
    Recording {
        duration: f64,
    },
}

/// Finalized output of a microphone recorder.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedAudio {
    pub path: PathBuf,
    pub duration: f64,
    pub waveform: Option<Vec<u8>>,
}

pub trait AudioRecorder: Send + Sync {
    fn start(&self);
    fn stop(&self);
    fn mic_level(&self) -> watch::Receiver<f32>;
    fn recording_state(&self) -> watch::Receiver<RecorderState>;
    /// Resolves once after [`AudioRecorder::stop`]; `None` when nothing was captured.
    ///
    /// Called exactly once per recorder, when the capability is built.
    fn take_recorded_data(&self) -> BoxFuture<'static, Option<RecordedAudio>>;
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum VideoPipelineState {
    #[default]
    Idle,
    Recording,
    /// The file at `path` is complete.
    Finished {
        path: PathBuf,
        duration: f64,
    },
    /// Torn down without producing a file.
    Stopped,
}

pub trait VideoPipeline: Send + Sync {
    fn start(&self);
    fn stop(&self);
    fn dispose(&self);
    /// Microphone power and elapsed seconds.
    fn power_and_duration(&self) -> watch::Receiver<(f32, f64)>;
    fn state(&self) -> watch::Receiver<VideoPipelineState>;
}
