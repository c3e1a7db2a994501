//! # Layer Service
//!
//! Runs [`LayerClient`] calls on tokio tasks and hands the results back
//! through a channel, so the console keeps accepting input while a request
//! is in flight.
//!
//! Only the newest read-all matters: dispatching one aborts the task of
//! the previous read. Writes are never aborted.

use crate::console::error::Result;
use crate::console::models::Layer;
use crate::console::services::layer_client::{LayerClient, ReadAllResponse};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Sequence number of a read-all; only the latest one is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReadTicket(pub u64);

/// Result of a dispatched call
#[derive(Debug)]
pub enum LayerResponseMessage {
    ReadAll {
        ticket: ReadTicket,
        result: Result<ReadAllResponse>,
    },
    Added {
        staged: Layer,
        result: Result<Option<Layer>>,
    },
    Saved {
        staged: Layer,
        result: Result<Option<Layer>>,
    },
    Deleted {
        wms_id: String,
        result: Result<()>,
    },
}

pub struct LayerService<C> {
    client: Arc<C>,
    /// Channel for receiving async responses
    response_receiver: mpsc::Receiver<LayerResponseMessage>,
    /// Channel sender for async tasks to send responses
    response_sender: mpsc::Sender<LayerResponseMessage>,
    /// Task of the read-all currently in flight
    read_task: Option<JoinHandle<()>>,
}

impl<C: LayerClient + 'static> LayerService<C> {
    pub fn new(client: C) -> Self {
        let (response_sender, response_receiver) = mpsc::channel(10);
        Self {
            client: Arc::new(client),
            response_receiver,
            response_sender,
            read_task: None,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Start a read-all, aborting any older one still running
    pub fn dispatch_read_all(&mut self, ticket: ReadTicket) {
        if let Some(previous) = self.read_task.take() {
            if !previous.is_finished() {
                tracing::debug!("Aborting stale read-all before {:?}", ticket);
                previous.abort();
            }
        }

        let client = Arc::clone(&self.client);
        let sender = self.response_sender.clone();
        self.read_task = Some(tokio::spawn(async move {
            let result = client.read_all().await;
            // Ignore send errors (receiver might have been dropped)
            let _ = sender
                .send(LayerResponseMessage::ReadAll { ticket, result })
                .await;
        }));
    }

    pub fn dispatch_add(&self, staged: Layer) {
        let client = Arc::clone(&self.client);
        let sender = self.response_sender.clone();
        tokio::spawn(async move {
            let result = client.add(&staged).await;
            let _ = sender
                .send(LayerResponseMessage::Added { staged, result })
                .await;
        });
    }

    pub fn dispatch_save(&self, staged: Layer) {
        let client = Arc::clone(&self.client);
        let sender = self.response_sender.clone();
        tokio::spawn(async move {
            let result = client.save(&staged).await;
            let _ = sender
                .send(LayerResponseMessage::Saved { staged, result })
                .await;
        });
    }

    pub fn dispatch_delete(&self, wms_id: String) {
        let client = Arc::clone(&self.client);
        let sender = self.response_sender.clone();
        tokio::spawn(async move {
            let result = client.delete(&wms_id).await;
            let _ = sender
                .send(LayerResponseMessage::Deleted { wms_id, result })
                .await;
        });
    }

    /// Check if there are any pending responses (non-blocking)
    pub fn poll_response(&mut self) -> Option<LayerResponseMessage> {
        self.response_receiver.try_recv().ok()
    }

    /// Wait for the next response
    pub async fn next_response(&mut self) -> Option<LayerResponseMessage> {
        self.response_receiver.recv().await
    }
}
