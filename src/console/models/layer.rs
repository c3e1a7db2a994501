//! # Layer Model
//!
//! Map layer records as exchanged with the `layer-handler` endpoint.
//! Feature lists are always present; a missing or `null` list on the wire
//! is normalized to an empty one.

use crate::console::error::{LayerError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

/// A sub-element of a layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    #[serde(default)]
    pub wms_id: String,
    #[serde(default)]
    pub name: String,
}

impl Feature {
    /// Blank feature appended by "add feature"
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(wms_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            wms_id: wms_id.into(),
            name: name.into(),
        }
    }

    /// Short label for list display: the id, else the name
    pub fn label(&self) -> &str {
        if self.wms_id.is_empty() {
            &self.name
        } else {
            &self.wms_id
        }
    }
}

/// A map layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    #[serde(default)]
    pub wms_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub features: Vec<Feature>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<Feature>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Feature>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Editable scalar fields of a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerField {
    WmsId,
    Name,
    Style,
    Opacity,
}

impl LayerField {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "wmsId" | "wmsid" | "id" => Some(Self::WmsId),
            "name" => Some(Self::Name),
            "style" => Some(Self::Style),
            "opacity" => Some(Self::Opacity),
            _ => None,
        }
    }
}

/// Editable fields of a feature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureField {
    WmsId,
    Name,
}

impl FeatureField {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "wmsId" | "wmsid" | "id" => Some(Self::WmsId),
            "name" => Some(Self::Name),
            _ => None,
        }
    }
}

impl Layer {
    pub fn new(wms_id: impl Into<String>) -> Self {
        Self {
            wms_id: wms_id.into(),
            ..Self::default()
        }
    }

    pub fn with_features(mut self, features: Vec<Feature>) -> Self {
        self.features = features;
        self
    }

    /// Layer ids must be non-empty, trimmed and single-line
    pub fn is_valid_id(wms_id: &str) -> bool {
        !wms_id.is_empty() && wms_id == wms_id.trim() && !wms_id.contains('\n')
    }

    /// Check the fields the backend would reject
    pub fn validate(&self) -> Result<()> {
        if self.wms_id.is_empty() {
            return Err(LayerError::validation("wmsId is required"));
        }
        if !Self::is_valid_id(&self.wms_id) {
            return Err(LayerError::validation(format!(
                "wmsId '{}' must not contain surrounding whitespace or line breaks",
                self.wms_id.escape_debug()
            )));
        }
        if let Some(opacity) = self.opacity {
            if !(0.0..=1.0).contains(&opacity) {
                return Err(LayerError::validation(format!(
                    "opacity {opacity} must be between 0.0 and 1.0"
                )));
            }
        }

        let mut seen = HashSet::new();
        for feature in self.features.iter().filter(|f| !f.wms_id.is_empty()) {
            if !seen.insert(feature.wms_id.as_str()) {
                return Err(LayerError::validation(format!(
                    "feature wmsId '{}' is repeated",
                    feature.wms_id
                )));
            }
        }
        Ok(())
    }

    /// Set a scalar field from its textual form
    pub fn set_field(&mut self, field: LayerField, value: &str) -> Result<()> {
        let optional = |value: &str| (!value.is_empty()).then(|| value.to_string());
        match field {
            LayerField::WmsId => self.wms_id = value.to_string(),
            LayerField::Name => self.name = optional(value),
            LayerField::Style => self.style = optional(value),
            LayerField::Opacity => {
                self.opacity = if value.is_empty() {
                    None
                } else {
                    Some(value.parse::<f64>().map_err(|_| {
                        LayerError::validation(format!("opacity '{value}' is not a number"))
                    })?)
                };
            }
        }
        Ok(())
    }
}

/// Wire shape of a successful read-all: `{"objects": [Layer, ...]}`
#[derive(Debug, Clone, Deserialize)]
pub struct LayerCollection {
    pub objects: Vec<Layer>,
}
