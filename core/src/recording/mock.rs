//! Scriptable in-memory pipelines for tests and scenario replay.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use futures_util::future::{self, BoxFuture, FutureExt};
use tokio::sync::{oneshot, watch};

use super::pipeline::{
    AudioRecorder, RecordedAudio, RecorderState, VideoPipeline, VideoPipelineState,
};

/// Microphone recorder that hands back a preset [`RecordedAudio`] on `stop`.
pub struct MockAudioRecorder {
    level: watch::Sender<f32>,
    state: watch::Sender<RecorderState>,
    recorded: Mutex<Option<RecordedAudio>>,
    result_tx: Mutex<Option<oneshot::Sender<Option<RecordedAudio>>>>,
    result_rx: Mutex<Option<oneshot::Receiver<Option<RecordedAudio>>>>,
    start_calls: AtomicUsize,
    stop_calls: AtomicUsize,
}

impl MockAudioRecorder {
    #[must_use]
    pub fn new(recorded: Option<RecordedAudio>) -> Self {
        let (result_tx, result_rx) = oneshot::channel();
        Self {
            level: watch::Sender::new(0.0),
            state: watch::Sender::new(RecorderState::Paused),
            recorded: Mutex::new(recorded),
            result_tx: Mutex::new(Some(result_tx)),
            result_rx: Mutex::new(Some(result_rx)),
            start_calls: AtomicUsize::new(0),
            stop_calls: AtomicUsize::new(0),
        }
    }

    pub fn set_level(&self, level: f32) {
        self.level.send_replace(level);
    }

    pub fn set_state(&self, state: RecorderState) {
        self.state.send_replace(state);
    }

    #[must_use]
    pub fn start_calls(&self) -> usize {
        self.start_calls.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn stop_calls(&self) -> usize {
        self.stop_calls.load(Ordering::SeqCst)
    }
}

impl AudioRecorder for MockAudioRecorder {
    fn start(&self) {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        self.state
            .send_replace(RecorderState::Recording { duration: 0.0 });
    }

    fn stop(&self) {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
        self.state.send_replace(RecorderState::Paused);
        let sender = self
            .result_tx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(sender) = sender {
            let recorded = self
                .recorded
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take();
            let _ = sender.send(recorded);
        }
    }

    fn mic_level(&self) -> watch::Receiver<f32> {
        self.level.subscribe()
    }

    fn recording_state(&self) -> watch::Receiver<RecorderState> {
        self.state.subscribe()
    }

    fn take_recorded_data(&self) -> BoxFuture<'static, Option<RecordedAudio>> {
        let receiver = self
            .result_rx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match receiver {
            Some(receiver) => async move { receiver.await.ok().flatten() }.boxed(),
            None => future::ready(None).boxed(),
        }
    }
}

/// Camera pipeline that reports `Finished` at the last published duration on `stop`.
pub struct MockVideoPipeline {
    path: PathBuf,
    power_and_duration: watch::Sender<(f32, f64)>,
    state: watch::Sender<VideoPipelineState>,
    start_calls: AtomicUsize,
    stop_calls: AtomicUsize,
    dispose_calls: AtomicUsize,
}

impl MockVideoPipeline {
    #[must_use]
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            power_and_duration: watch::Sender::new((0.0, 0.0)),
            state: watch::Sender::new(VideoPipelineState::Idle),
            start_calls: AtomicUsize::new(0),
            stop_calls: AtomicUsize::new(0),
            dispose_calls: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn set_power_and_duration(&self, power: f32, duration: f64) {
        self.power_and_duration.send_replace((power, duration));
    }

    #[must_use]
    pub fn start_calls(&self) -> usize {
        self.start_calls.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn stop_calls(&self) -> usize {
        self.stop_calls.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn dispose_calls(&self) -> usize {
        self.dispose_calls.load(Ordering::SeqCst)
    }
}

impl VideoPipeline for MockVideoPipeline {
    fn start(&self) {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        self.state.send_replace(VideoPipelineState::Recording);
    }

    fn stop(&self) {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
        let (_, duration) = *self.power_and_duration.borrow();
        self.state.send_replace(VideoPipelineState::Finished {
            path: self.path.clone(),
            duration,
        });
    }

    fn dispose(&self) {
        self.dispose_calls.fetch_add(1, Ordering::SeqCst);
        self.state.send_if_modified(|state| {
            if matches!(state, VideoPipelineState::Finished { .. }) {
                false
            } else {
                *state = VideoPipelineState::Stopped;
                true
            }
        });
    }

    fn power_and_duration(&self) -> watch::Receiver<(f32, f64)> {
        self.power_and_duration.subscribe()
    }

    fn state(&self) -> watch::Receiver<VideoPipelineState> {
        self.state.subscribe()
    }
}
