//! Flattened, serializable read of everything derived from a snapshot.

use serde::Serialize;

use chatview_core::{Localizer, Mode, PresentationSnapshot};
use chatview_types::InputQuery;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionSummary {
    pub label: &'static str,
    pub title: String,
    pub effect: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewSummary {
    pub mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restriction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recording: Option<&'static str>,
    pub input_context: InputQuery,
    pub can_send: bool,
    pub max_input_length: usize,
    pub keyboard_active: bool,
    pub keyboard_shown: bool,
    pub sidebar_visible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<usize>,
}

impl ViewSummary {
    #[must_use]
    pub fn of(snapshot: &PresentationSnapshot, localizer: &dyn Localizer) -> Self {
        let mode = snapshot.mode();
        let action = mode.action().map(|action| ActionSummary {
            label: action.label.key(),
            title: localizer.action_label(action.label),
            effect: action.effect.as_str(),
        });
        let restriction = match &mode {
            Mode::Restricted(restriction) => Some(restriction.text(localizer)),
            _ => None,
        };
        let recording = match &mode {
            Mode::Recording(capability) => Some(capability.kind().as_str()),
            _ => None,
        };
        Self {
            mode: mode.name(),
            action,
            restriction,
            recording,
            input_context: snapshot.input_context(),
            can_send: snapshot.can_send(),
            max_input_length: snapshot.max_input_length(),
            keyboard_active: snapshot.is_keyboard_active(),
            keyboard_shown: snapshot.is_keyboard_shown(),
            sidebar_visible: snapshot.is_sidebar_visible(),
            selected: snapshot.selection().map(|selection| selection.len()),
        }
    }
}
