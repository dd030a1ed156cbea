//! Session layer for chatview.
//!
//! A [`ChatSession`] owns the presentation snapshot of one conversation view,
//! publishes it to subscribers, enforces the one-recording policy and turns
//! mode actions into [`ChatInteraction`] calls.

mod error;
mod interaction;
mod session;
mod settings;
mod view;

pub use error::SessionError;
pub use interaction::{ChatInteraction, LoggingInteraction};
pub use session::{ChatSession, UpdateOutcome};
pub use settings::SessionSettings;
pub use view::{ActionSummary, ViewSummary};

pub use chatview_core::{
    ActionEffect, ActionLabel, EditSnapshot, Mode, PresentationSnapshot, RecordingCapability,
    SnapshotDefaults, UrlPreview,
};
