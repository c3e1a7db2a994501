//! # Widgets
//!
//! Console display behaviours that carry no layer data.

pub mod panels;
pub mod slide_toggle;

pub use panels::{PanelId, PanelLayout};
pub use slide_toggle::{
    ElementId, ElementKind, ElementTree, SlideState, SlideToggle, SLIDE_DURATION,
};
