use std::path::PathBuf;

use chatview_config::ChatViewConfig;
use chatview_core::{EnglishLocalizer, RecordingOptions, SnapshotDefaults};

/// Everything a session takes from the environment, resolved up front.
#[derive(Debug, Clone, Default)]
pub struct SessionSettings {
    pub defaults: SnapshotDefaults,
    pub recording: RecordingOptions,
    pub localizer: EnglishLocalizer,
}

impl SessionSettings {
    #[must_use]
    pub fn from_config(config: &ChatViewConfig) -> Self {
        let recording = RecordingOptions {
            min_voice_duration: config.recording.min_voice_duration(),
            video_message_side: config.recording.video_message_side,
            temp_dir: config
                .recording
                .temp_dir
                .clone()
                .unwrap_or_else(|| RecordingOptions::default().temp_dir),
        };
        Self {
            defaults: SnapshotDefaults::from_entertainment(config.composer.entertainment),
            recording,
            localizer: EnglishLocalizer::new(config.display.restriction_date_format.clone()),
        }
    }

    #[must_use]
    pub fn with_temp_dir(mut self, temp_dir: PathBuf) -> Self {
        self.recording.temp_dir = temp_dir;
        self
    }
}
