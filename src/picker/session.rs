use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::models::Category;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PickError {
    #[error("image source is busy with a pick for {owner}")]
    SourceBusy { owner: Category },
}

#[derive(Debug, Clone)]
pub struct ActiveSession {
    pub id: Uuid,
    /// Captured at open time; results are routed here no matter what the
    /// user has selected since.
    pub category: Category,
    pub opened_at: DateTime<Utc>,
    cancel: CancellationToken,
}

impl ActiveSession {
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }
}

/// Exclusive-use bookkeeping for the single external image source.
/// Two states: idle, or open for one category.
#[derive(Debug, Default)]
pub struct ImageAcquisition {
    active: Option<ActiveSession>,
}

impl ImageAcquisition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn owner(&self) -> Option<Category> {
        self.active.as_ref().map(|session| session.category)
    }

    pub fn open(&mut self, category: Category) -> Result<ActiveSession, PickError> {
        if let Some(active) = &self.active {
            return Err(PickError::SourceBusy {
                owner: active.category,
            });
        }

        let session = ActiveSession {
            id: Uuid::new_v4(),
            category,
            opened_at: Utc::now(),
            cancel: CancellationToken::new(),
        };
        self.active = Some(session.clone());
        Ok(session)
    }

    /// Release the source for a terminal event. Returns the owning session
    /// only if `session_id` is still the open one; stale results get `None`.
    pub fn finish(&mut self, session_id: Uuid) -> Option<ActiveSession> {
        match &self.active {
            Some(active) if active.id == session_id => self.active.take(),
            _ => None,
        }
    }

    /// Abort whatever is open and signal its in-flight request.
    pub fn close(&mut self) -> Option<ActiveSession> {
        let session = self.active.take()?;
        session.cancel.cancel();
        Some(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_open_reports_current_owner() {
        let mut picker = ImageAcquisition::new();
        picker.open(Category::Game).unwrap();

        let err = picker.open(Category::Book).unwrap_err();
        assert_eq!(
            err,
            PickError::SourceBusy {
                owner: Category::Game
            }
        );
        assert_eq!(picker.owner(), Some(Category::Game));
    }

    #[test]
    fn finish_ignores_stale_sessions() {
        let mut picker = ImageAcquisition::new();
        let stale = picker.open(Category::Movie).unwrap();
        picker.close();
        let fresh = picker.open(Category::Book).unwrap();

        assert!(picker.finish(stale.id).is_none());
        assert_eq!(picker.owner(), Some(Category::Book));
        assert_eq!(picker.finish(fresh.id).map(|s| s.category), Some(Category::Book));
        assert_eq!(picker.owner(), None);
    }

    #[test]
    fn close_cancels_token_and_frees_source() {
        let mut picker = ImageAcquisition::new();
        let session = picker.open(Category::Game).unwrap();
        let token = session.cancel_token();

        assert!(!token.is_cancelled());
        assert_eq!(picker.close().map(|s| s.id), Some(session.id));
        assert!(token.is_cancelled());
        assert!(picker.owner().is_none());
        assert!(picker.close().is_none());
        assert!(picker.open(Category::Book).is_ok());
    }
}
