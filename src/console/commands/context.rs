//! # Command Context
//!
//! Read-only view of the state commands may consult while parsing.

use crate::console::view_models::ViewModel;

/// Read-only snapshot of ViewModel state for commands
#[derive(Debug, Clone, Default)]
pub struct ViewModelSnapshot {
    pub layer_count: usize,
    pub selected_wms_id: String,
    pub is_editing: bool,
}

impl ViewModelSnapshot {
    /// Create snapshot from current ViewModel state
    pub fn from_view_model(view_model: &ViewModel) -> Self {
        Self {
            layer_count: view_model.layers().len(),
            selected_wms_id: view_model.selected().wms_id.clone(),
            is_editing: view_model.is_editing(),
        }
    }
}

/// Base context available to all commands
pub struct CommandContext {
    pub state: ViewModelSnapshot,
}

impl CommandContext {
    pub fn new(state: ViewModelSnapshot) -> Self {
        Self { state }
    }
}
