//! # View Events
//!
//! Events that tell the renderer which parts of the console are stale.

use crate::console::widgets::PanelId;

/// Events emitted when view updates are needed
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// Everything needs redrawing
    FullRedrawRequired,

    /// A single panel needs redrawing
    PanelRedrawRequired { panel: PanelId },

    /// Panel visibility toggled and is sliding
    PanelToggleRequested { panel: PanelId },

    /// Status line needs updating
    StatusBarUpdateRequired,
}
