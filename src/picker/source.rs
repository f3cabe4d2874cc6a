use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::{mpsc, oneshot};

use crate::models::{Category, CoverImage};

const ENABLE_LOGS: bool = true;

use crate::log_warn;

/// How a pick ended. Failures of the underlying source (permission denied,
/// picker crashed) are reported as `Cancelled`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "cover")]
pub enum PickOutcome {
    Selected(CoverImage),
    Cancelled,
}

impl PickOutcome {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, PickOutcome::Cancelled)
    }
}

/// The host's modal image picker.
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Present the picker and wait for the user. `category` is informational;
    /// routing of the result is handled by the caller.
    async fn request_image(&self, category: Category) -> PickOutcome;
}

/// A pick forwarded to the host UI by [`ChannelImageSource`].
#[derive(Debug)]
pub struct PickRequest {
    pub category: Category,
    reply: oneshot::Sender<PickOutcome>,
}

impl PickRequest {
    /// True once the requester has gone away, e.g. the pick was closed.
    /// A host should skip or dismiss such requests.
    pub fn is_cancelled(&self) -> bool {
        self.reply.is_closed()
    }

    /// Resolves when the requester stops waiting for this pick.
    pub async fn cancelled(&mut self) {
        self.reply.closed().await
    }

    pub fn select(self, cover: CoverImage) {
        let _ = self.reply.send(PickOutcome::Selected(cover));
    }

    pub fn cancel(self) {
        let _ = self.reply.send(PickOutcome::Cancelled);
    }
}

/// Message-passing [`ImageSource`]: every request becomes a [`PickRequest`]
/// on the host's receiver. Dropping the request, or the receiver, cancels.
#[derive(Debug, Clone)]
pub struct ChannelImageSource {
    requests: mpsc::Sender<PickRequest>,
}

impl ChannelImageSource {
    pub fn new(buffer: usize) -> (Self, mpsc::Receiver<PickRequest>) {
        let (requests, receiver) = mpsc::channel(buffer.max(1));
        (Self { requests }, receiver)
    }
}

#[async_trait]
impl ImageSource for ChannelImageSource {
    async fn request_image(&self, category: Category) -> PickOutcome {
        let (reply, response) = oneshot::channel();
        if self
            .requests
            .send(PickRequest { category, reply })
            .await
            .is_err()
        {
            log_warn!("image picker host is gone; treating {category} pick as cancelled");
            return PickOutcome::Cancelled;
        }

        response.await.unwrap_or(PickOutcome::Cancelled)
    }
}
