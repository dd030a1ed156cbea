//! Recording capabilities across both variants.

use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;

use chatview_core::recording::mock::{MockAudioRecorder, MockVideoPipeline};
use chatview_core::recording::{RecordedAudio, RecorderState, VideoPipeline};
use chatview_core::{
    CapturePhase, MediaPayload, RecordingCapability, RecordingKind, RecordingOptions,
    RecordingStatus,
};

fn options(min_voice: Duration) -> RecordingOptions {
    RecordingOptions {
        min_voice_duration: min_voice,
        ..RecordingOptions::default()
    }
}

fn voice(duration: f64) -> (RecordingCapability, Arc<MockAudioRecorder>) {
    let recorder = Arc::new(MockAudioRecorder::new(Some(RecordedAudio {
        path: "/tmp/chatview-voice.ogg".into(),
        duration,
        waveform: None,
    })));
    let capability =
        RecordingCapability::audio(recorder.clone(), &options(Duration::from_millis(500)));
    (capability, recorder)
}

#[tokio::test]
async fn voice_threshold_is_strict() {
    for (duration, expected) in [(0.3, 0), (0.5, 0), (0.6, 1)] {
        let (capability, _) = voice(duration);
        capability.start();
        capability.stop();
        assert_eq!(
            capability.result_payloads().await.len(),
            expected,
            "duration {duration}"
        );
    }
}

#[tokio::test]
async fn late_subscribers_see_the_same_result() {
    let (capability, recorder) = voice(2.0);
    capability.start();
    capability.stop();
    let early = capability.result_payloads().await;
    let late = capability.result_payloads().await;
    assert_eq!(early, late);
    assert_eq!(recorder.stop_calls(), 1);
}

#[tokio::test]
async fn voice_streams_follow_the_recorder() {
    let (capability, recorder) = voice(1.0);
    let mut level = capability.mic_level();
    let mut status = capability.status();
    assert_eq!(capability.kind(), RecordingKind::Audio);

    recorder.set_level(0.25);
    assert_eq!(level.next().await, Some(0.25));

    assert_eq!(status.next().await, Some(RecordingStatus::Paused));
    recorder.set_state(RecorderState::Recording { duration: 0.75 });
    assert_eq!(
        status.next().await,
        Some(RecordingStatus::Recording { duration: 0.75 })
    );
}

#[tokio::test]
async fn video_result_uses_configured_side() {
    let dir = tempfile::tempdir().unwrap();
    let options = RecordingOptions {
        temp_dir: dir.path().to_path_buf(),
        video_message_side: 320,
        ..RecordingOptions::default()
    };
    let mut pipeline = None;
    let capability = RecordingCapability::video(&options, |path| {
        let mock = Arc::new(MockVideoPipeline::new(path));
        pipeline = Some(mock.clone());
        mock as Arc<dyn VideoPipeline>
    });
    let pipeline = pipeline.unwrap();

    capability.start();
    pipeline.set_power_and_duration(0.5, 6.0);
    capability.stop();

    let payloads = capability.result_payloads().await;
    let [MediaPayload::VideoMessage {
        path,
        duration,
        width,
        height,
    }] = payloads.as_slice()
    else {
        panic!("expected one video message, got {payloads:?}");
    };
    assert!(path.starts_with(dir.path()));
    assert!((duration - 6.0).abs() < f64::EPSILON);
    assert_eq!((*width, *height), (320, 320));
}

#[tokio::test]
async fn phase_changes_are_published() {
    let (capability, _) = voice(1.0);
    let mut phases = capability.phase_changes();
    assert_eq!(*phases.borrow_and_update(), CapturePhase::Idle);

    capability.start();
    phases.changed().await.unwrap();
    assert_eq!(*phases.borrow_and_update(), CapturePhase::Capturing);

    capability.start();
    assert!(!phases.has_changed().unwrap());

    let _ = capability.dispose();
    phases.changed().await.unwrap();
    assert_eq!(*phases.borrow(), CapturePhase::Disposed);
}
