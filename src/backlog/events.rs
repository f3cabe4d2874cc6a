use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Category, CoverImage, Entry, PendingInput};
use crate::settings::CategoryLabels;

/// Published after every state change, in the order changes were applied.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum BacklogEvent {
    PendingTitleChanged {
        category: Category,
        title: String,
    },
    PendingCoverChanged {
        category: Category,
        cover: CoverImage,
    },
    EntryAdded {
        entry: Entry,
    },
    PickOpened {
        category: Category,
        session_id: Uuid,
        opened_at: DateTime<Utc>,
    },
    PickClosed {
        category: Category,
        session_id: Uuid,
        cancelled: bool,
    },
    CategorySelected {
        category: Category,
    },
    /// Labels or the placeholder glyph changed; re-read the snapshot.
    SettingsApplied,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryView {
    #[serde(flatten)]
    pub entry: Entry,
    /// Set when the entry has no cover, so the host can draw a stand-in.
    pub placeholder_glyph: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySnapshot {
    pub category: Category,
    #[serde(flatten)]
    pub labels: CategoryLabels,
    pub pending: PendingInput,
    pub entries: Vec<EntryView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BacklogSnapshot {
    pub selected: Category,
    /// Backlog title of the selected category.
    pub title: String,
    pub active_pick: Option<Category>,
    pub categories: Vec<CategorySnapshot>,
}

impl BacklogSnapshot {
    pub fn category(&self, category: Category) -> Option<&CategorySnapshot> {
        self.categories.iter().find(|view| view.category == category)
    }
}
