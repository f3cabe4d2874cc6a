use chrono::Utc;
use thiserror::Error;

use crate::models::{Category, CoverImage, Entry, EntryId, PendingInput};

const ENABLE_LOGS: bool = true;

use crate::log_debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    #[error("entry title must not be empty")]
    EmptyTitle,
}

/// Append-only list of entries for one category plus its draft input.
#[derive(Debug, Clone)]
pub struct EntryStore {
    category: Category,
    entries: Vec<Entry>,
    pending: PendingInput,
}

impl EntryStore {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            entries: Vec::new(),
            pending: PendingInput::default(),
        }
    }

    /// Stored verbatim; trimming happens on add.
    pub fn set_pending_title(&mut self, title: impl Into<String>) {
        self.pending.title = title.into();
    }

    pub fn set_pending_cover_image(&mut self, cover: CoverImage) {
        self.pending.cover_image = Some(cover);
    }

    pub fn pending(&self) -> &PendingInput {
        &self.pending
    }

    pub fn add_entry(&mut self) -> Result<Entry, EntryError> {
        let title = self.pending.title.trim();
        if title.is_empty() {
            return Err(EntryError::EmptyTitle);
        }

        let entry = Entry {
            id: EntryId::new(),
            category: self.category,
            title: title.to_string(),
            cover_image: self.pending.cover_image.take(),
            created_at: Utc::now(),
        };

        self.entries.push(entry.clone());
        self.pending.clear();

        log_debug!(
            "added {} entry {} ({} total)",
            self.category,
            entry.id,
            self.entries.len()
        );

        Ok(entry)
    }

    pub fn list_entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
