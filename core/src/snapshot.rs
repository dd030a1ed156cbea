//! Immutable presentation state of one chat view.
//!
//! A [`PresentationSnapshot`] is never mutated: every transform borrows the
//! current value and returns the next one, copying everything it does not
//! touch. Heavy sub-objects sit behind `Arc`, so a copy is cheap.
//!
//! Equality is the re-render contract, not structural equality. Peers compare
//! by identity, keyboard messages by `(id, stable_version)`, URL previews by
//! `(url, webpage id)`, recordings by session, and the derived input query and
//! mode take part too. Notification settings only matter through the mode.

use std::collections::HashSet;
use std::sync::Arc;

use chatview_types::{
    ChatInterfaceState, EntertainmentSection, InitialAction, InputQuery, InputQueryResult,
    Message, MessageId, NotificationSettings, Peer, ReportStatus, SplitLayout, TextInputState,
    Webpage, same_peer,
};

use crate::edit::EditSnapshot;
use crate::input_context::input_context_query;
use crate::mode::{self, Mode};
use crate::recording::RecordingCapability;
use crate::selection::SelectionSnapshot;

/// Input limit for plain messages.
pub const MAX_MESSAGE_LENGTH: usize = 10_000;
/// Input limit for media captions.
pub const MAX_CAPTION_LENGTH: usize = 200;

/// Link preview shown above the composer.
#[derive(Debug, Clone)]
pub struct UrlPreview {
    pub url: String,
    pub webpage: Arc<Webpage>,
}

impl UrlPreview {
    #[must_use]
    pub fn new(url: impl Into<String>, webpage: Arc<Webpage>) -> Self {
        Self {
            url: url.into(),
            webpage,
        }
    }
}

impl PartialEq for UrlPreview {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url && self.webpage.id == other.webpage.id
    }
}

/// Values a fresh snapshot starts from, supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotDefaults {
    pub is_emoji_section: bool,
}

impl SnapshotDefaults {
    #[must_use]
    pub fn from_entertainment(section: EntertainmentSection) -> Self {
        Self {
            is_emoji_section: section == EntertainmentSection::Emoji,
        }
    }
}

impl Default for SnapshotDefaults {
    fn default() -> Self {
        Self::from_entertainment(EntertainmentSection::default())
    }
}

#[derive(Debug, Clone)]
pub struct PresentationSnapshot {
    interface_state: ChatInterfaceState,
    peer: Option<Arc<Peer>>,
    notification_settings: Option<NotificationSettings>,
    input_query_result: Option<InputQueryResult>,
    keyboard_message: Option<Arc<Message>>,
    initial_action: Option<InitialAction>,
    history_count: Option<usize>,
    is_search_mode: bool,
    edit: Option<EditSnapshot>,
    recording: Option<RecordingCapability>,
    is_blocked: Option<bool>,
    report_status: ReportStatus,
    pinned_message_id: Option<MessageId>,
    url_preview: Option<UrlPreview>,
    selection: Option<SelectionSnapshot>,
    sidebar_enabled: Option<bool>,
    sidebar_shown: Option<bool>,
    layout: Option<SplitLayout>,
    can_add_contact: Option<bool>,
    is_emoji_section: bool,
}

impl PresentationSnapshot {
    #[must_use]
    pub fn new(defaults: SnapshotDefaults) -> Self {
        Self {
            interface_state: ChatInterfaceState::new(),
            peer: None,
            notification_settings: None,
            input_query_result: None,
            keyboard_message: None,
            initial_action: None,
            history_count: Some(0),
            is_search_mode: false,
            edit: None,
            recording: None,
            is_blocked: None,
            report_status: ReportStatus::Unknown,
            pinned_message_id: None,
            url_preview: None,
            selection: None,
            sidebar_enabled: None,
            sidebar_shown: None,
            layout: None,
            can_add_contact: None,
            is_emoji_section: defaults.is_emoji_section,
        }
    }

    /// Copy `self`, apply `update` to the copy and return it.
    fn rebuild(&self, update: impl FnOnce(&mut Self)) -> Self {
        let mut next = self.clone();
        update(&mut next);
        next
    }

    // Accessors

    #[must_use]
    pub fn interface_state(&self) -> &ChatInterfaceState {
        &self.interface_state
    }

    #[must_use]
    pub fn peer(&self) -> Option<&Arc<Peer>> {
        self.peer.as_ref()
    }

    #[must_use]
    pub fn notification_settings(&self) -> Option<&NotificationSettings> {
        self.notification_settings.as_ref()
    }

    #[must_use]
    pub fn input_query_result(&self) -> Option<&InputQueryResult> {
        self.input_query_result.as_ref()
    }

    #[must_use]
    pub fn keyboard_message(&self) -> Option<&Arc<Message>> {
        self.keyboard_message.as_ref()
    }

    #[must_use]
    pub fn initial_action(&self) -> Option<&InitialAction> {
        self.initial_action.as_ref()
    }

    #[must_use]
    pub fn history_count(&self) -> Option<usize> {
        self.history_count
    }

    #[must_use]
    pub fn is_search_mode(&self) -> bool {
        self.is_search_mode
    }

    #[must_use]
    pub fn edit(&self) -> Option<&EditSnapshot> {
        self.edit.as_ref()
    }

    #[must_use]
    pub fn recording(&self) -> Option<&RecordingCapability> {
        self.recording.as_ref()
    }

    #[must_use]
    pub fn is_blocked(&self) -> Option<bool> {
        self.is_blocked
    }

    #[must_use]
    pub fn report_status(&self) -> ReportStatus {
        self.report_status
    }

    #[must_use]
    pub fn pinned_message_id(&self) -> Option<MessageId> {
        self.pinned_message_id
    }

    #[must_use]
    pub fn url_preview(&self) -> Option<&UrlPreview> {
        self.url_preview.as_ref()
    }

    #[must_use]
    pub fn selection(&self) -> Option<&SelectionSnapshot> {
        self.selection.as_ref()
    }

    #[must_use]
    pub fn sidebar_enabled(&self) -> Option<bool> {
        self.sidebar_enabled
    }

    #[must_use]
    pub fn sidebar_shown(&self) -> Option<bool> {
        self.sidebar_shown
    }

    #[must_use]
    pub fn layout(&self) -> Option<SplitLayout> {
        self.layout
    }

    #[must_use]
    pub fn can_add_contact(&self) -> Option<bool> {
        self.can_add_contact
    }

    #[must_use]
    pub fn is_emoji_section(&self) -> bool {
        self.is_emoji_section
    }

    // Transforms

    #[must_use]
    pub fn updated_interface_state(
        &self,
        f: impl FnOnce(&ChatInterfaceState) -> ChatInterfaceState,
    ) -> Self {
        let interface_state = f(&self.interface_state);
        self.rebuild(|s| s.interface_state = interface_state)
    }

    /// Replace the reply keyboard message.
    ///
    /// In channels and groups a newly seen keyboard (different id or stable
    /// version) is also recorded as the processed setup reply.
    #[must_use]
    pub fn updated_keyboard_message(&self, message: Option<Arc<Message>>) -> Self {
        let previous = self.keyboard_message.as_ref().map(|m| m.version_key());
        let mark_processed = match (&self.peer, &message) {
            (Some(peer), Some(message)) => {
                previous != Some(message.version_key()) && peer.id().is_group_like()
            }
            _ => false,
        };
        let processed_id = message.as_ref().map(|m| m.id);

        let next = self.rebuild(|s| s.keyboard_message = message);
        match processed_id {
            Some(id) if mark_processed => next.updated_interface_state(|state| {
                state.with_updated_message_actions_state(|actions| {
                    actions.with_updated_processed_setup_reply_message_id(id)
                })
            }),
            _ => next,
        }
    }

    #[must_use]
    pub fn updated_peer(&self, f: impl FnOnce(Option<&Arc<Peer>>) -> Option<Arc<Peer>>) -> Self {
        let peer = f(self.peer.as_ref());
        self.rebuild(|s| s.peer = peer)
    }

    #[must_use]
    pub fn updated_notification_settings(&self, settings: Option<NotificationSettings>) -> Self {
        self.rebuild(|s| s.notification_settings = settings)
    }

    #[must_use]
    pub fn updated_history_count(&self, count: Option<usize>) -> Self {
        self.rebuild(|s| s.history_count = count)
    }

    #[must_use]
    pub fn updated_search_mode(&self, is_search_mode: bool) -> Self {
        self.rebuild(|s| s.is_search_mode = is_search_mode)
    }

    #[must_use]
    pub fn updated_input_query_result(
        &self,
        f: impl FnOnce(Option<&InputQueryResult>) -> Option<InputQueryResult>,
    ) -> Self {
        let result = f(self.input_query_result.as_ref());
        self.rebuild(|s| s.input_query_result = result)
    }

    #[must_use]
    pub fn updated_initial_action(&self, action: Option<InitialAction>) -> Self {
        self.rebuild(|s| s.initial_action = action)
    }

    /// Start editing `message`, replacing any edit in progress.
    #[must_use]
    pub fn with_edit_target(&self, message: Arc<Message>) -> Self {
        self.rebuild(|s| s.edit = Some(EditSnapshot::new(message)))
    }

    #[must_use]
    pub fn without_edit_target(&self) -> Self {
        self.rebuild(|s| s.edit = None)
    }

    #[must_use]
    pub fn with_recording(&self, recording: RecordingCapability) -> Self {
        self.rebuild(|s| s.recording = Some(recording))
    }

    #[must_use]
    pub fn without_recording(&self) -> Self {
        self.rebuild(|s| s.recording = None)
    }

    #[must_use]
    pub fn with_updated_blocked(&self, is_blocked: bool) -> Self {
        self.rebuild(|s| s.is_blocked = Some(is_blocked))
    }

    #[must_use]
    pub fn with_updated_pinned_message_id(&self, id: Option<MessageId>) -> Self {
        self.rebuild(|s| s.pinned_message_id = id)
    }

    #[must_use]
    pub fn with_updated_report_status(&self, status: ReportStatus) -> Self {
        self.rebuild(|s| s.report_status = status)
    }

    /// Write the composer input: into the edit when editing, otherwise into
    /// the interface state draft.
    #[must_use]
    pub fn with_updated_effective_input(&self, input: TextInputState) -> Self {
        match &self.edit {
            Some(edit) => {
                let edit = edit.with_updated_input(input);
                self.rebuild(|s| s.edit = Some(edit))
            }
            None => self.updated_interface_state(|state| state.with_updated_input_state(input)),
        }
    }

    #[must_use]
    pub fn updated_url_preview(&self, preview: Option<UrlPreview>) -> Self {
        self.rebuild(|s| s.url_preview = preview)
    }

    #[must_use]
    pub fn with_selected_message(&self, id: MessageId) -> Self {
        let selection = self
            .selection
            .as_ref()
            .map_or_else(|| [id].into_iter().collect(), |sel| sel.with_inserted(id));
        self.rebuild(|s| s.selection = Some(selection))
    }

    #[must_use]
    pub fn with_selected_messages(&self, ids: HashSet<MessageId>) -> Self {
        self.rebuild(|s| s.selection = Some(SelectionSnapshot::new(ids)))
    }

    #[must_use]
    pub fn with_selection_toggled(&self, id: MessageId) -> Self {
        let selection = self
            .selection
            .as_ref()
            .map_or_else(|| [id].into_iter().collect(), |sel| sel.with_toggled(id));
        self.rebuild(|s| s.selection = Some(selection))
    }

    #[must_use]
    pub fn with_selection(&self) -> Self {
        self.rebuild(|s| s.selection = Some(SelectionSnapshot::default()))
    }

    #[must_use]
    pub fn with_selection_cleared(&self) -> Self {
        self.rebuild(|s| s.selection = None)
    }

    #[must_use]
    pub fn with_sidebar_enabled(&self, enabled: Option<bool>) -> Self {
        self.rebuild(|s| s.sidebar_enabled = enabled)
    }

    #[must_use]
    pub fn with_sidebar_shown(&self, shown: Option<bool>) -> Self {
        self.rebuild(|s| s.sidebar_shown = shown)
    }

    #[must_use]
    pub fn with_updated_layout(&self, layout: Option<SplitLayout>) -> Self {
        self.rebuild(|s| s.layout = layout)
    }

    #[must_use]
    pub fn with_updated_contact_adding(&self, can_add_contact: Option<bool>) -> Self {
        self.rebuild(|s| s.can_add_contact = can_add_contact)
    }

    #[must_use]
    pub fn with_updated_emoji_section(&self, is_emoji_section: bool) -> Self {
        self.rebuild(|s| s.is_emoji_section = is_emoji_section)
    }

    // Derived

    /// Input being typed: the edit's when editing, else the draft.
    #[must_use]
    pub fn effective_input(&self) -> &TextInputState {
        match &self.edit {
            Some(edit) => edit.input(),
            None => &self.interface_state.input_state,
        }
    }

    #[must_use]
    pub fn input_context(&self) -> InputQuery {
        input_context_query(self.effective_input(), true)
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        mode::resolve(self)
    }

    #[must_use]
    pub fn is_keyboard_active(&self) -> bool {
        self.keyboard_message
            .as_ref()
            .and_then(|message| message.reply_markup.as_ref())
            .is_some_and(|markup| !markup.rows.is_empty())
    }

    #[must_use]
    pub fn is_keyboard_shown(&self) -> bool {
        let Some(message) = &self.keyboard_message else {
            return false;
        };
        let closed = self
            .interface_state
            .message_actions_state
            .closed_button_keyboard_message_id;
        closed != Some(message.id)
            && message
                .reply_markup
                .as_ref()
                .is_some_and(|markup| markup.has_buttons())
            && self.mode().is_normal()
    }

    #[must_use]
    pub fn is_sidebar_visible(&self) -> bool {
        self.sidebar_enabled == Some(true)
            && self.sidebar_shown == Some(true)
            && self.layout == Some(SplitLayout::Dual)
            && self.peer.as_ref().is_some_and(|peer| peer.can_send_message())
    }

    #[must_use]
    pub fn can_send(&self) -> bool {
        let has_text = !self.effective_input().is_empty();
        match self.mode() {
            Mode::Normal => has_text || !self.interface_state.forward_message_ids.is_empty(),
            Mode::Editing => self.edit_has_attached_media() || has_text,
            _ => false,
        }
    }

    #[must_use]
    pub fn max_input_length(&self) -> usize {
        match self.mode() {
            Mode::Normal => MAX_MESSAGE_LENGTH,
            Mode::Editing if self.edit_has_attached_media() => MAX_CAPTION_LENGTH,
            Mode::Editing => MAX_MESSAGE_LENGTH,
            _ => 0,
        }
    }

    #[must_use]
    pub fn is_selected(&self, id: MessageId) -> bool {
        self.selection
            .as_ref()
            .is_some_and(|selection| selection.contains(id))
    }

    fn edit_has_attached_media(&self) -> bool {
        self.edit
            .as_ref()
            .is_some_and(|edit| edit.message().has_attached_media())
    }
}

impl Default for PresentationSnapshot {
    fn default() -> Self {
        Self::new(SnapshotDefaults::default())
    }
}

fn same_optional_peer(lhs: Option<&Arc<Peer>>, rhs: Option<&Arc<Peer>>) -> bool {
    match (lhs, rhs) {
        (None, None) => true,
        (Some(lhs), Some(rhs)) => same_peer(lhs, rhs),
        _ => false,
    }
}

fn same_keyboard_message(lhs: Option<&Arc<Message>>, rhs: Option<&Arc<Message>>) -> bool {
    lhs.map(|message| message.version_key()) == rhs.map(|message| message.version_key())
}

impl PartialEq for PresentationSnapshot {
    fn eq(&self, other: &Self) -> bool {
        self.interface_state == other.interface_state
            && same_optional_peer(self.peer.as_ref(), other.peer.as_ref())
            && self.is_search_mode == other.is_search_mode
            && self.sidebar_enabled == other.sidebar_enabled
            && self.sidebar_shown == other.sidebar_shown
            && self.layout == other.layout
            && self.can_add_contact == other.can_add_contact
            && self.recording == other.recording
            && self.edit == other.edit
            && self.input_query_result == other.input_query_result
            && self.initial_action == other.initial_action
            && self.history_count == other.history_count
            && self.is_blocked == other.is_blocked
            && self.report_status == other.report_status
            && self.selection == other.selection
            && self.pinned_message_id == other.pinned_message_id
            && self.is_emoji_section == other.is_emoji_section
            && self.url_preview == other.url_preview
            && same_keyboard_message(self.keyboard_message.as_ref(), other.keyboard_message.as_ref())
            && self.input_context() == other.input_context()
            && self.mode() == other.mode()
    }
}
