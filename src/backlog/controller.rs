use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, oneshot, Mutex};
use uuid::Uuid;

use crate::{
    models::{Category, CategoryMap, Entry, PendingInput},
    picker::{ImageAcquisition, ImageSource, PickError, PickOutcome},
    settings::{BacklogSettings, CategoryLabels},
};

use super::{
    events::{BacklogEvent, BacklogSnapshot, CategorySnapshot, EntryView},
    store::{EntryError, EntryStore},
};

const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_info};

const EVENT_BUFFER: usize = 64;

struct BacklogState {
    stores: CategoryMap<EntryStore>,
    picker: ImageAcquisition,
    selected: Category,
    labels: CategoryMap<CategoryLabels>,
    placeholder_glyph: String,
}

/// Handle to an in-flight image pick.
#[derive(Debug)]
pub struct PickTicket {
    session_id: Uuid,
    category: Category,
    opened_at: DateTime<Utc>,
    outcome: oneshot::Receiver<PickOutcome>,
}

impl PickTicket {
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    /// Resolves once the terminal event has been applied to the backlog.
    /// A session closed before its result arrived resolves to `Cancelled`.
    pub async fn outcome(self) -> PickOutcome {
        self.outcome.await.unwrap_or(PickOutcome::Cancelled)
    }
}

#[derive(Clone)]
pub struct BacklogController {
    state: Arc<Mutex<BacklogState>>,
    source: Arc<dyn ImageSource>,
    events: broadcast::Sender<BacklogEvent>,
}

impl BacklogController {
    pub fn new(source: Arc<dyn ImageSource>, settings: BacklogSettings) -> Self {
        let (events, _) = broadcast::channel(EVENT_BUFFER);

        Self {
            state: Arc::new(Mutex::new(BacklogState {
                stores: CategoryMap::from_fn(EntryStore::new),
                picker: ImageAcquisition::new(),
                selected: settings.initial_category,
                labels: settings.labels.to_map(),
                placeholder_glyph: settings.placeholder_glyph,
            })),
            source,
            events,
        }
    }

    /// Swap in reloaded labels and placeholder glyph. The selected category
    /// is only taken from settings at startup.
    pub async fn apply_settings(&self, settings: &BacklogSettings) {
        let mut state = self.state.lock().await;
        state.labels = settings.labels.to_map();
        state.placeholder_glyph = settings.placeholder_glyph.clone();
        self.emit(BacklogEvent::SettingsApplied);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BacklogEvent> {
        self.events.subscribe()
    }

    pub async fn set_pending_title(&self, category: Category, title: impl Into<String>) {
        let title = title.into();
        let mut state = self.state.lock().await;
        state.stores[category].set_pending_title(title.clone());
        self.emit(BacklogEvent::PendingTitleChanged { category, title });
    }

    pub async fn add_entry(&self, category: Category) -> Result<Entry, EntryError> {
        let mut state = self.state.lock().await;
        let entry = state.stores[category].add_entry()?;
        log_info!("Added \"{}\" to the {} backlog", entry.title, category);
        self.emit(BacklogEvent::EntryAdded {
            entry: entry.clone(),
        });
        Ok(entry)
    }

    pub async fn list_entries(&self, category: Category) -> Vec<Entry> {
        self.state.lock().await.stores[category].list_entries().to_vec()
    }

    pub async fn pending(&self, category: Category) -> PendingInput {
        self.state.lock().await.stores[category].pending().clone()
    }

    pub async fn select_category(&self, category: Category) {
        let mut state = self.state.lock().await;
        if state.selected != category {
            state.selected = category;
            self.emit(BacklogEvent::CategorySelected { category });
        }
    }

    pub async fn selected_category(&self) -> Category {
        self.state.lock().await.selected
    }

    /// Category that owns the open pick, if any.
    pub async fn active_pick(&self) -> Option<Category> {
        self.state.lock().await.picker.owner()
    }

    /// Open the image source on behalf of `category`. The result is applied
    /// to that category's draft even if the selection changes meanwhile.
    pub async fn begin_image_pick(&self, category: Category) -> Result<PickTicket, PickError> {
        let session = {
            let mut state = self.state.lock().await;
            let session = state.picker.open(category).map_err(|err| {
                log_debug!("Rejected {category} pick: {err}");
                err
            })?;
            self.emit(BacklogEvent::PickOpened {
                category,
                session_id: session.id,
                opened_at: session.opened_at,
            });
            session
        };

        let (reply, outcome) = oneshot::channel();
        let cancel_token = session.cancel_token();
        let session_id = session.id;
        let opened_at = session.opened_at;
        let controller = self.clone();

        tokio::spawn(async move {
            let outcome = tokio::select! {
                outcome = controller.source.request_image(category) => outcome,
                _ = cancel_token.cancelled() => PickOutcome::Cancelled,
            };
            let applied = controller.complete_image_pick(session_id, outcome).await;
            let _ = reply.send(applied);
        });

        Ok(PickTicket {
            session_id,
            category,
            opened_at,
            outcome,
        })
    }

    /// Abort the open pick, if any. Pending input is left as it was.
    pub async fn close_image_pick(&self) -> Option<Category> {
        let mut state = self.state.lock().await;
        let session = state.picker.close()?;
        log_info!("Closed {} pick {} before completion", session.category, session.id);
        self.emit(BacklogEvent::PickClosed {
            category: session.category,
            session_id: session.id,
            cancelled: true,
        });
        Some(session.category)
    }

    pub async fn snapshot(&self) -> BacklogSnapshot {
        let state = self.state.lock().await;

        let categories = state
            .stores
            .iter()
            .map(|(category, store)| CategorySnapshot {
                category,
                labels: state.labels[category].clone(),
                pending: store.pending().clone(),
                entries: store
                    .list_entries()
                    .iter()
                    .map(|entry| EntryView {
                        placeholder_glyph: entry
                            .cover_image
                            .is_none()
                            .then(|| state.placeholder_glyph.clone()),
                        entry: entry.clone(),
                    })
                    .collect(),
            })
            .collect();

        BacklogSnapshot {
            selected: state.selected,
            title: state.labels[state.selected].backlog_title.clone(),
            active_pick: state.picker.owner(),
            categories,
        }
    }

    async fn complete_image_pick(&self, session_id: Uuid, outcome: PickOutcome) -> PickOutcome {
        let mut state = self.state.lock().await;
        let Some(session) = state.picker.finish(session_id) else {
            log_debug!("Discarding result of closed pick {session_id}");
            return PickOutcome::Cancelled;
        };

        let category = session.category;
        if let PickOutcome::Selected(cover) = &outcome {
            state.stores[category].set_pending_cover_image(cover.clone());
            self.emit(BacklogEvent::PendingCoverChanged {
                category,
                cover: cover.clone(),
            });
        }

        self.emit(BacklogEvent::PickClosed {
            category,
            session_id,
            cancelled: outcome.is_cancelled(),
        });
        outcome
    }

    fn emit(&self, event: BacklogEvent) {
        // No subscribers is fine; snapshots can still be polled.
        let _ = self.events.send(event);
    }
}
