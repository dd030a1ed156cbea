//! Configuration loading and parsing for chatview.
//!
//! The file lives at `~/.chatview/config.toml`. Every section is optional and
//! every field has a default, so an empty or missing file is valid.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use chatview_types::EntertainmentSection;

const DEFAULT_MIN_VOICE_DURATION_SECS: f64 = 0.5;
const DEFAULT_VIDEO_MESSAGE_SIDE: u32 = 200;
const DEFAULT_RESTRICTION_DATE_FORMAT: &str = "%b %-d, %Y %H:%M";
const DEFAULT_LOG_FILTER: &str = "info";

fn default_min_voice_duration_secs() -> f64 {
    DEFAULT_MIN_VOICE_DURATION_SECS
}

fn default_video_message_side() -> u32 {
    DEFAULT_VIDEO_MESSAGE_SIDE
}

fn default_restriction_date_format() -> String {
    DEFAULT_RESTRICTION_DATE_FORMAT.to_string()
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

#[derive(Debug, Default, Deserialize)]
pub struct ChatViewConfig {
    #[serde(default)]
    pub composer: ComposerConfig,
    #[serde(default)]
    pub recording: RecordingConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ComposerConfig {
    /// Panel tab opened first; `emoji` starts new conversations in the emoji section.
    #[serde(default)]
    pub entertainment: EntertainmentSection,
}

#[derive(Debug, Deserialize)]
pub struct RecordingConfig {
    /// Voice notes at or below this length are discarded.
    #[serde(default = "default_min_voice_duration_secs")]
    pub min_voice_duration_secs: f64,
    /// Edge length of round video messages, in points.
    #[serde(default = "default_video_message_side")]
    pub video_message_side: u32,
    /// Directory for in-progress video files. Defaults to the OS temp dir.
    pub temp_dir: Option<PathBuf>,
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            min_voice_duration_secs: DEFAULT_MIN_VOICE_DURATION_SECS,
            video_message_side: DEFAULT_VIDEO_MESSAGE_SIDE,
            temp_dir: None,
        }
    }
}

impl RecordingConfig {
    /// Minimum voice duration, clamped to a non-negative finite value.
    #[must_use]
    pub fn min_voice_duration(&self) -> Duration {
        let secs = self.min_voice_duration_secs;
        if secs.is_finite() && secs > 0.0 {
            Duration::from_secs_f64(secs)
        } else {
            Duration::ZERO
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DisplayConfig {
    /// `chrono` format string for the "restricted until" banner.
    #[serde(default = "default_restriction_date_format")]
    pub restriction_date_format: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            restriction_date_format: default_restriction_date_format(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Fallback `EnvFilter` directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl ChatViewConfig {
    /// Load the config from its default location.
    ///
    /// Returns `Ok(None)` when no home directory is known or the file is absent.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let Some(path) = config_path() else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(config),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".chatview").join("config.toml"))
}
