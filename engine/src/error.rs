use chatview_core::RecordingKind;

/// Lifecycle policy violations reported by [`crate::ChatSession`].
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("A {kind} recording is already attached")]
    RecordingActive { kind: RecordingKind },
    #[error("No recording is attached")]
    NoRecording,
    #[error("Mode `{mode}` has no action to invoke")]
    NoAction { mode: &'static str },
}
