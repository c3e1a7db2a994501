//! # Core ViewModel Structure
//!
//! Contains the main ViewModel struct and the plumbing shared by the
//! selection and layer managers: event emission and failure reporting.

use crate::console::error::LayerError;
use crate::console::events::{EventBus, ModelEvent, ViewEvent};
use crate::console::models::{Layer, StatusLine};
use crate::console::services::ReadTicket;
use crate::console::widgets::PanelId;

/// Type alias for event bus option to reduce complexity
type EventBusOption = Option<Box<dyn EventBus>>;

/// Kind of write currently in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    Add,
    Save,
    Delete,
}

impl WriteKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WriteKind::Add => "add",
            WriteKind::Save => "save",
            WriteKind::Delete => "delete",
        }
    }
}

/// Write awaiting its backend response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingWrite {
    pub kind: WriteKind,
    pub wms_id: String,
}

/// UI-facing state of the layer console
pub struct ViewModel {
    pub(super) layers: Vec<Layer>,
    pub(super) selected: Layer,
    pub(super) is_editing: bool,
    pub(super) layers_loaded: bool,
    pub(super) layers_panel_visible: bool,

    /// Ticket of the newest read-all issued
    pub(super) latest_read: ReadTicket,
    pub(super) read_in_flight: bool,
    pub(super) pending_write: Option<PendingWrite>,

    pub(super) status_line: StatusLine,
    event_bus: EventBusOption,
    pending_view_events: Vec<ViewEvent>,
}

impl ViewModel {
    pub fn new() -> Self {
        Self {
            layers: Vec::new(),
            selected: Layer::default(),
            is_editing: false,
            layers_loaded: false,
            layers_panel_visible: false,
            latest_read: ReadTicket(0),
            read_in_flight: false,
            pending_write: None,
            status_line: StatusLine::new(),
            event_bus: None,
            pending_view_events: Vec::new(),
        }
    }

    /// Start from an already known layer list
    pub fn with_layers(layers: Vec<Layer>) -> Self {
        let mut view_model = Self::new();
        view_model.layers = layers;
        view_model
    }

    pub fn set_event_bus(&mut self, event_bus: Box<dyn EventBus>) {
        self.event_bus = Some(event_bus);
        tracing::debug!("Event bus set for ViewModel");
    }

    // === State Accessors ===

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn selected(&self) -> &Layer {
        &self.selected
    }

    pub fn is_editing(&self) -> bool {
        self.is_editing
    }

    pub fn layers_loaded(&self) -> bool {
        self.layers_loaded
    }

    pub fn is_layers_panel_visible(&self) -> bool {
        self.layers_panel_visible
    }

    pub fn pending_write(&self) -> Option<&PendingWrite> {
        self.pending_write.as_ref()
    }

    /// Whether a backend response is still expected
    pub fn has_pending_work(&self) -> bool {
        self.read_in_flight || self.pending_write.is_some()
    }

    pub fn status_line(&self) -> &StatusLine {
        &self.status_line
    }

    pub fn status_line_mut(&mut self) -> &mut StatusLine {
        &mut self.status_line
    }

    /// Position of the layer with `wms_id` in the list
    pub fn find_layer(&self, wms_id: &str) -> Option<usize> {
        self.layers.iter().position(|layer| layer.wms_id == wms_id)
    }

    // === Event Emission ===

    pub(super) fn emit_model_event(&mut self, event: ModelEvent) {
        tracing::debug!("Model event: {:?}", event);
        if let Some(bus) = self.event_bus.as_mut() {
            bus.publish_model_event(event);
        }
    }

    pub(super) fn emit_view_event(&mut self, event: ViewEvent) {
        if let Some(bus) = self.event_bus.as_mut() {
            bus.publish_view_event(event.clone());
        }
        self.pending_view_events.push(event);
    }

    pub(super) fn emit_panel_redraw(&mut self, panel: PanelId) {
        self.emit_view_event(ViewEvent::PanelRedrawRequired { panel });
    }

    /// Collect and clear pending view events
    pub fn collect_pending_view_events(&mut self) -> Vec<ViewEvent> {
        std::mem::take(&mut self.pending_view_events)
    }

    // === Status Reporting ===

    pub(super) fn report(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!("{message}");
        self.status_line.set_status_message(message);
        self.emit_view_event(ViewEvent::StatusBarUpdateRequired);
    }

    /// Surface a failure on the status line and hand it back to the caller
    pub(super) fn fail(&mut self, error: LayerError) -> LayerError {
        tracing::warn!("{error}");
        self.status_line.set_error_message(error.to_string());
        self.emit_view_event(ViewEvent::StatusBarUpdateRequired);
        error
    }

    /// Edits and new writes wait for the pending write to resolve
    pub(super) fn ensure_no_pending_write(&mut self) -> Result<(), LayerError> {
        match &self.pending_write {
            Some(pending) => {
                let error = LayerError::WritePending {
                    action: pending.kind.as_str(),
                    wms_id: pending.wms_id.clone(),
                };
                Err(self.fail(error))
            }
            None => Ok(()),
        }
    }

    pub(super) fn set_pending_write(&mut self, pending: Option<PendingWrite>) {
        self.pending_write = pending;
        self.status_line.set_executing(self.has_pending_work());
        self.emit_view_event(ViewEvent::StatusBarUpdateRequired);
    }
}

impl Default for ViewModel {
    fn default() -> Self {
        Self::new()
    }
}
