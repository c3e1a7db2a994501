//! # Selection Management
//!
//! Staging of the layer being created or edited. The selection is always an
//! owned clone, so edits never reach the layer list until a save succeeds.

use crate::console::error::{LayerError, Result};
use crate::console::events::{ModelEvent, ViewEvent};
use crate::console::models::{Feature, FeatureField, Layer, LayerField};
use crate::console::view_models::core::ViewModel;
use crate::console::widgets::PanelId;

impl ViewModel {
    /// Stage a copy of `layers[index]` for editing
    pub fn select(&mut self, index: usize) -> Result<()> {
        self.ensure_no_pending_write()?;
        let Some(layer) = self.layers.get(index) else {
            let error = LayerError::IndexOutOfRange {
                index,
                len: self.layers.len(),
            };
            return Err(self.fail(error));
        };

        self.selected = layer.clone();
        self.is_editing = true;
        self.selection_changed();
        Ok(())
    }

    /// Stage an empty layer for creation
    pub fn start_new(&mut self) -> Result<()> {
        self.ensure_no_pending_write()?;
        self.selected = Layer::default();
        self.is_editing = false;
        self.selection_changed();
        Ok(())
    }

    pub fn add_feature_to_selection(&mut self) -> Result<()> {
        self.ensure_no_pending_write()?;
        self.selected.features.push(Feature::empty());
        let index = self.selected.features.len() - 1;
        self.emit_model_event(ModelEvent::FeatureAdded { index });
        self.emit_panel_redraw(PanelId::Selection);
        Ok(())
    }

    pub fn remove_feature_from_selection(&mut self, index: usize) -> Result<()> {
        self.ensure_no_pending_write()?;
        let len = self.selected.features.len();
        if index >= len {
            return Err(self.fail(LayerError::IndexOutOfRange { index, len }));
        }

        self.selected.features.remove(index);
        self.emit_model_event(ModelEvent::FeatureRemoved { index });
        self.emit_panel_redraw(PanelId::Selection);
        Ok(())
    }

    /// Edit a scalar field of the staged layer
    pub fn set_selection_field(&mut self, field: LayerField, value: &str) -> Result<()> {
        self.ensure_no_pending_write()?;
        if let Err(error) = self.selected.set_field(field, value) {
            return Err(self.fail(error));
        }
        self.emit_model_event(ModelEvent::SelectionEdited);
        self.emit_panel_redraw(PanelId::Selection);
        Ok(())
    }

    /// Edit a field of one of the staged layer's features
    pub fn set_feature_field(&mut self, index: usize, field: FeatureField, value: &str) -> Result<()> {
        self.ensure_no_pending_write()?;
        let len = self.selected.features.len();
        if index >= len {
            return Err(self.fail(LayerError::IndexOutOfRange { index, len }));
        }

        let feature = &mut self.selected.features[index];
        match field {
            FeatureField::WmsId => feature.wms_id = value.to_string(),
            FeatureField::Name => feature.name = value.to_string(),
        }
        self.emit_model_event(ModelEvent::SelectionEdited);
        self.emit_panel_redraw(PanelId::Selection);
        Ok(())
    }

    /// Required-field check run before add and save
    pub fn validate_selection(&mut self) -> Result<()> {
        if let Err(error) = self.selected.validate() {
            return Err(self.fail(error));
        }
        Ok(())
    }

    /// Flip the layers panel. Returns `true` when the panel was just revealed,
    /// in which case the caller should reload the layer list.
    pub fn toggle_load_layers(&mut self) -> bool {
        self.layers_panel_visible = !self.layers_panel_visible;
        let visible = self.layers_panel_visible;
        self.emit_model_event(ModelEvent::LayersPanelToggled { visible });
        self.emit_view_event(ViewEvent::PanelToggleRequested {
            panel: PanelId::Layers,
        });
        visible
    }

    fn selection_changed(&mut self) {
        let event = ModelEvent::SelectionChanged {
            wms_id: self.selected.wms_id.clone(),
            is_editing: self.is_editing,
        };
        self.emit_model_event(event);
        self.emit_panel_redraw(PanelId::Selection);
    }
}
