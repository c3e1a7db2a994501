//! # Command Events
//!
//! Events produced by commands that describe what should happen.
//! Commands produce these events, and the controller applies them to the ViewModel.

use crate::console::models::{FeatureField, LayerField};
use crate::console::widgets::PanelId;

/// Events that commands can produce to request changes
#[derive(Debug, Clone, PartialEq)]
pub enum CommandEvent {
    /// Print the layer list
    ListRequested,

    /// Reload the layer list from the backend
    ReloadRequested,

    /// Collapse or expand a panel
    PanelToggleRequested { panel: PanelId },

    /// Stage a copy of the layer at `index`
    SelectRequested { index: usize },

    /// Stage an empty layer
    NewLayerRequested,

    SelectionFieldEditRequested { field: LayerField, value: String },

    FeatureAddRequested,

    FeatureRemoveRequested { index: usize },

    FeatureFieldEditRequested {
        index: usize,
        field: FeatureField,
        value: String,
    },

    AddLayerRequested,

    SaveLayerRequested,

    DeleteLayerRequested { wms_id: String },

    /// Request to show profile information in status bar
    ShowProfileRequested,

    HelpRequested,

    /// Request to quit application
    QuitRequested,
}
