//! # Layer Management
//!
//! CRUD against the backend. Each operation comes in two halves:
//! `begin_*` validates and records what is in flight without doing any I/O,
//! `apply_*` folds the client's result back into the state. The async
//! `read_all`/`add_layer`/`save_layer`/`delete_layer` methods chain both
//! halves around a direct client call; the console controller dispatches the
//! call through [`crate::console::services::LayerService`] instead.

use crate::console::error::{LayerError, Result};
use crate::console::events::{ModelEvent, ViewEvent};
use crate::console::models::{Layer, LayerCollection};
use crate::console::services::{
    LayerClient, LayerResponseMessage, Payload, ReadAllResponse, ReadTicket,
};
use crate::console::view_models::core::{PendingWrite, ViewModel, WriteKind};
use crate::console::widgets::PanelId;

impl ViewModel {
    // === Read All ===

    /// Issue a new read ticket; any older read still in flight becomes stale
    pub fn begin_read_all(&mut self) -> ReadTicket {
        self.latest_read = ReadTicket(self.latest_read.0 + 1);
        self.read_in_flight = true;
        self.status_line.set_executing(true);
        tracing::debug!("Read-all {:?} started", self.latest_read);
        self.latest_read
    }

    /// Apply a read-all result. Returns `Ok(false)` when the ticket is stale
    /// and the result was discarded.
    pub fn apply_read_all(
        &mut self,
        ticket: ReadTicket,
        result: Result<ReadAllResponse>,
    ) -> Result<bool> {
        if ticket != self.latest_read {
            tracing::debug!(
                "Discarding stale read-all {:?} (latest {:?})",
                ticket,
                self.latest_read
            );
            return Ok(false);
        }
        self.read_in_flight = false;
        self.status_line.set_executing(self.has_pending_work());

        let response = result.map_err(|error| self.fail(error))?;
        self.status_line.set_http_status(response.status);

        match Self::layers_from_payload(response.data) {
            Some(layers) => {
                let count = layers.len();
                self.layers = layers;
                self.layers_loaded = true;
                self.emit_model_event(ModelEvent::LayersReplaced { count });
                self.emit_panel_redraw(PanelId::Layers);
                self.report(format!("Loaded {count} layers"));
            }
            None => {
                tracing::debug!("Read-all payload is not a layer collection, keeping list");
                self.emit_view_event(ViewEvent::StatusBarUpdateRequired);
            }
        }
        Ok(true)
    }

    fn layers_from_payload(data: Payload) -> Option<Vec<Layer>> {
        match data {
            Payload::Structured(value) => serde_json::from_value::<LayerCollection>(value)
                .map(|collection| collection.objects)
                .map_err(|e| tracing::debug!("Payload has no usable 'objects': {e}"))
                .ok(),
            Payload::Text(_) => None,
        }
    }

    pub async fn read_all(&mut self, client: &impl LayerClient) -> Result<()> {
        let ticket = self.begin_read_all();
        let result = client.read_all().await;
        self.apply_read_all(ticket, result).map(|_| ())
    }

    // === Add ===

    /// Validate the selection and mark the add as pending.
    /// Returns the copy to send.
    pub fn begin_add(&mut self) -> Result<Layer> {
        self.ensure_no_pending_write()?;
        self.validate_selection()?;
        if self.find_layer(&self.selected.wms_id).is_some() {
            let error = LayerError::validation(format!(
                "layer '{}' already exists",
                self.selected.wms_id
            ));
            return Err(self.fail(error));
        }

        let staged = self.selected.clone();
        self.set_pending_write(Some(PendingWrite {
            kind: WriteKind::Add,
            wms_id: staged.wms_id.clone(),
        }));
        Ok(staged)
    }

    /// Store the created layer, or the staged copy when the backend only
    /// acknowledged. A read-all that landed first may already list it, in
    /// which case that entry is replaced.
    pub fn apply_add(&mut self, staged: Layer, result: Result<Option<Layer>>) -> Result<()> {
        self.set_pending_write(None);
        let created = result.map_err(|error| self.fail(error))?.unwrap_or(staged);

        let wms_id = created.wms_id.clone();
        match self.find_layer(&wms_id) {
            Some(index) => {
                tracing::debug!("Layer '{wms_id}' already listed, replacing entry");
                self.layers[index] = created.clone();
            }
            None => self.layers.push(created.clone()),
        }
        self.selected = created;
        self.is_editing = true;

        self.emit_model_event(ModelEvent::LayerAdded {
            wms_id: wms_id.clone(),
        });
        self.emit_panel_redraw(PanelId::Layers);
        self.emit_panel_redraw(PanelId::Selection);
        self.report(format!("Layer '{wms_id}' added"));
        Ok(())
    }

    pub async fn add_layer(&mut self, client: &impl LayerClient) -> Result<()> {
        let staged = self.begin_add()?;
        let result = client.add(&staged).await;
        self.apply_add(staged, result)
    }

    // === Save ===

    fn not_found(&mut self, wms_id: &str) -> LayerError {
        self.fail(LayerError::NotFound(wms_id.to_string()))
    }

    pub fn begin_save(&mut self) -> Result<Layer> {
        self.ensure_no_pending_write()?;
        self.validate_selection()?;
        if self.find_layer(&self.selected.wms_id).is_none() {
            let wms_id = self.selected.wms_id.clone();
            return Err(self.not_found(&wms_id));
        }

        let staged = self.selected.clone();
        self.set_pending_write(Some(PendingWrite {
            kind: WriteKind::Save,
            wms_id: staged.wms_id.clone(),
        }));
        Ok(staged)
    }

    /// Replace the list entry of the staged layer. An echo carrying another
    /// id is ignored in favour of the staged copy.
    pub fn apply_save(&mut self, staged: Layer, result: Result<Option<Layer>>) -> Result<()> {
        self.set_pending_write(None);
        let echoed = result.map_err(|error| self.fail(error))?;

        let wms_id = staged.wms_id.clone();
        let saved = match echoed {
            Some(layer) if layer.wms_id == wms_id => layer,
            Some(layer) => {
                tracing::warn!(
                    "Save of '{wms_id}' echoed layer '{}', keeping the sent copy",
                    layer.wms_id
                );
                staged
            }
            None => staged,
        };

        let Some(index) = self.find_layer(&wms_id) else {
            return Err(self.not_found(&wms_id));
        };
        self.layers[index] = saved;

        self.emit_model_event(ModelEvent::LayerSaved {
            wms_id: wms_id.clone(),
        });
        self.emit_panel_redraw(PanelId::Layers);
        self.report(format!("Layer '{wms_id}' saved"));
        Ok(())
    }

    pub async fn save_layer(&mut self, client: &impl LayerClient) -> Result<()> {
        let staged = self.begin_save()?;
        let result = client.save(&staged).await;
        self.apply_save(staged, result)
    }

    // === Delete ===

    pub fn begin_delete(&mut self, wms_id: &str) -> Result<String> {
        self.ensure_no_pending_write()?;
        if self.find_layer(wms_id).is_none() {
            return Err(self.not_found(wms_id));
        }

        self.set_pending_write(Some(PendingWrite {
            kind: WriteKind::Delete,
            wms_id: wms_id.to_string(),
        }));
        Ok(wms_id.to_string())
    }

    /// Remove exactly the entry with `wms_id`. The entry may already be gone
    /// when a read-all landed first; the delete still succeeded.
    pub fn apply_delete(&mut self, wms_id: &str, result: Result<()>) -> Result<()> {
        self.set_pending_write(None);
        result.map_err(|error| self.fail(error))?;

        match self.find_layer(wms_id) {
            Some(index) => {
                self.layers.remove(index);
            }
            None => tracing::debug!("Layer '{wms_id}' already gone from the list"),
        }

        if self.is_editing && self.selected.wms_id == wms_id {
            self.selected = Layer::default();
            self.is_editing = false;
            self.emit_panel_redraw(PanelId::Selection);
        }

        self.emit_model_event(ModelEvent::LayerDeleted {
            wms_id: wms_id.to_string(),
        });
        self.emit_panel_redraw(PanelId::Layers);
        self.report(format!("Layer '{wms_id}' deleted"));
        Ok(())
    }

    pub async fn delete_layer(&mut self, client: &impl LayerClient, wms_id: &str) -> Result<()> {
        let wms_id = self.begin_delete(wms_id)?;
        let result = client.delete(&wms_id).await;
        self.apply_delete(&wms_id, result)
    }

    // === Dispatch ===

    /// Fold a response from the layer service into the state
    pub fn apply_response(&mut self, message: LayerResponseMessage) -> Result<()> {
        match message {
            LayerResponseMessage::ReadAll { ticket, result } => {
                self.apply_read_all(ticket, result).map(|_| ())
            }
            LayerResponseMessage::Added { staged, result } => self.apply_add(staged, result),
            LayerResponseMessage::Saved { staged, result } => self.apply_save(staged, result),
            LayerResponseMessage::Deleted { wms_id, result } => self.apply_delete(&wms_id, result),
        }
    }
}
