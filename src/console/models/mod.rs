//! # Models
//!
//! Pure data models without business logic or UI concerns.

pub mod layer;
pub mod profile;
pub mod status_line;

pub use layer::{Feature, FeatureField, Layer, LayerCollection, LayerField};
pub use profile::{ConnectionProfile, IniProfileStore, DEFAULT_ENDPOINT};
pub use status_line::{MessageKind, StatusLine};
