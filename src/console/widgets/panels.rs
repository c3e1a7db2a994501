//! # Console Panels
//!
//! The two collapsible panels of the console, each with a heading that
//! carries a [`SlideToggle`].

use super::slide_toggle::{ElementKind, ElementTree, SlideToggle};
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelId {
    /// List of layers loaded from the backend
    Layers,
    /// Staged copy of the layer being created or edited
    Selection,
}

impl PanelId {
    pub const ALL: [PanelId; 2] = [PanelId::Layers, PanelId::Selection];

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "layers" => Some(Self::Layers),
            "selection" | "selected" => Some(Self::Selection),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Layers => "Layers",
            Self::Selection => "Selection",
        }
    }
}

/// Element tree holding the console panels and their toggles
#[derive(Debug, Clone)]
pub struct PanelLayout {
    tree: ElementTree,
    toggles: Vec<(PanelId, SlideToggle)>,
}

impl PanelLayout {
    /// Build the layout with the layers panel collapsed and the selection
    /// panel open
    pub fn new() -> Self {
        let mut tree = ElementTree::new();
        let root = tree.add_root(ElementKind::Item);
        let mut toggles = Vec::new();

        for id in PanelId::ALL {
            let panel = tree.add_child(root, ElementKind::Panel);
            let heading = tree.add_child(panel, ElementKind::Heading);
            tree.add_child(panel, ElementKind::PanelBody);
            if let Some(toggle) = SlideToggle::attach(&tree, heading) {
                toggles.push((id, toggle));
            }
        }

        let mut layout = Self { tree, toggles };
        if let Some(slide) = layout
            .toggle_for(PanelId::Layers)
            .and_then(|toggle| layout.tree.slide_mut(toggle.body()))
        {
            *slide = super::SlideState::hidden();
        }
        layout
    }

    fn toggle_for(&self, panel: PanelId) -> Option<SlideToggle> {
        self.toggles
            .iter()
            .find(|(id, _)| *id == panel)
            .map(|(_, toggle)| *toggle)
    }

    /// Click the panel's heading
    pub fn toggle(&mut self, panel: PanelId, now: Instant) {
        if let Some(toggle) = self.toggle_for(panel) {
            toggle.click(&mut self.tree, now);
        }
    }

    /// Whether the panel is open or opening
    pub fn is_shown(&self, panel: PanelId) -> bool {
        self.toggle_for(panel)
            .and_then(|toggle| self.tree.slide(toggle.body()))
            .is_some_and(|slide| slide.is_shown())
    }

    /// Visible fraction of the panel body at `now`
    pub fn body_fraction(&self, panel: PanelId, now: Instant) -> f32 {
        self.toggle_for(panel)
            .and_then(|toggle| self.tree.slide(toggle.body()))
            .map_or(0.0, |slide| slide.fraction(now))
    }

    /// Time until every running slide has settled
    pub fn settle_delay(&self, now: Instant) -> Duration {
        self.toggles
            .iter()
            .filter_map(|(_, toggle)| self.tree.slide(toggle.body()))
            .map(|slide| slide.remaining(now))
            .max()
            .unwrap_or(Duration::ZERO)
    }
}

impl Default for PanelLayout {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::widgets::SLIDE_DURATION;

    #[test]
    fn layout_should_start_with_layers_collapsed() {
        let layout = PanelLayout::new();
        let now = Instant::now();
        assert!(!layout.is_shown(PanelId::Layers));
        assert_eq!(layout.body_fraction(PanelId::Layers, now), 0.0);
        assert!(layout.is_shown(PanelId::Selection));
        assert_eq!(layout.settle_delay(now), Duration::ZERO);
    }

    #[test]
    fn toggle_should_only_affect_named_panel() {
        let mut layout = PanelLayout::new();
        let now = Instant::now();
        layout.toggle(PanelId::Layers, now);

        assert!(layout.is_shown(PanelId::Layers));
        assert!(layout.is_shown(PanelId::Selection));
        assert_eq!(layout.settle_delay(now), SLIDE_DURATION);
        assert_eq!(layout.body_fraction(PanelId::Layers, now + SLIDE_DURATION), 1.0);
    }

    #[test]
    fn panel_names_should_parse() {
        assert_eq!(PanelId::parse("layers"), Some(PanelId::Layers));
        assert_eq!(PanelId::parse("selection"), Some(PanelId::Selection));
        assert_eq!(PanelId::parse("status"), None);
    }
}
