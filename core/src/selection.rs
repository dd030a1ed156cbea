//! Message selection set.

use std::collections::HashSet;

use chatview_types::MessageId;

/// Selected message ids. Membership only; no ordering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionSnapshot {
    selected_ids: HashSet<MessageId>,
}

impl SelectionSnapshot {
    #[must_use]
    pub fn new(selected_ids: HashSet<MessageId>) -> Self {
        Self { selected_ids }
    }

    #[must_use]
    pub fn selected_ids(&self) -> &HashSet<MessageId> {
        &self.selected_ids
    }

    #[must_use]
    pub fn contains(&self, id: MessageId) -> bool {
        self.selected_ids.contains(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.selected_ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected_ids.is_empty()
    }

    #[must_use]
    pub fn with_inserted(&self, id: MessageId) -> Self {
        let mut selected_ids = self.selected_ids.clone();
        selected_ids.insert(id);
        Self { selected_ids }
    }

    /// Copy-on-write toggle: removes `id` if selected, otherwise adds it.
    #[must_use]
    pub fn with_toggled(&self, id: MessageId) -> Self {
        let mut selected_ids = self.selected_ids.clone();
        if !selected_ids.remove(&id) {
            selected_ids.insert(id);
        }
        Self { selected_ids }
    }
}

impl FromIterator<MessageId> for SelectionSnapshot {
    fn from_iter<I: IntoIterator<Item = MessageId>>(iter: I) -> Self {
        Self {
            selected_ids: iter.into_iter().collect(),
        }
    }
}
