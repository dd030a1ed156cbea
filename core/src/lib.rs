//! Presentation core for a single chat view.
//!
//! [`PresentationSnapshot`] is the immutable state the chat screen renders
//! from. [`Mode`] is derived from it on every read and decides which composer
//! affordance is active. [`RecordingCapability`] wraps a live voice or video
//! capture attached to the snapshot.

mod edit;
mod input_context;
mod labels;
pub mod mode;
pub mod recording;
mod selection;
mod snapshot;

pub use edit::EditSnapshot;
pub use input_context::input_context_query;
pub use labels::{EnglishLocalizer, Localizer};
pub use mode::{ActionEffect, ActionLabel, Mode, ModeAction, Restriction};
pub use recording::{
    CapturePhase, MediaPayload, RecordingCapability, RecordingKind, RecordingOptions,
    RecordingStatus,
};
pub use selection::SelectionSnapshot;
pub use snapshot::{
    MAX_CAPTION_LENGTH, MAX_MESSAGE_LENGTH, PresentationSnapshot, SnapshotDefaults, UrlPreview,
};
