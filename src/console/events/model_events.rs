//! # Model Events
//!
//! Events emitted when the layer list or the staged selection changes.

/// Events emitted when models change
#[derive(Debug, Clone, PartialEq)]
pub enum ModelEvent {
    /// Layer list replaced by a read-all
    LayersReplaced { count: usize },

    /// Layer appended after a successful add
    LayerAdded { wms_id: String },

    /// Layer replaced in place after a successful save
    LayerSaved { wms_id: String },

    /// Layer removed after a successful delete
    LayerDeleted { wms_id: String },

    /// Selection replaced (select or start new)
    SelectionChanged {
        wms_id: String,
        is_editing: bool,
    },

    /// Staged selection edited in place
    SelectionEdited,

    FeatureAdded { index: usize },

    FeatureRemoved { index: usize },

    /// Layers panel shown or hidden
    LayersPanelToggled { visible: bool },
}
