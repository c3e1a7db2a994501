//! # Slide Toggle
//!
//! Click-to-collapse behaviour for panels. A [`SlideToggle`] is attached to
//! any element inside a panel; it resolves the nearest enclosing
//! [`ElementKind::Panel`] and that panel's first [`ElementKind::PanelBody`],
//! and each click slides the body in or out over [`SLIDE_DURATION`].
//!
//! The toggle itself keeps no state beyond element ids. Visibility and
//! animation progress live on the body element in the [`ElementTree`].

use std::time::Duration;
use tokio::time::Instant;

/// Length of one slide transition
pub const SLIDE_DURATION: Duration = Duration::from_millis(400);

/// Handle to an element in an [`ElementTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Panel,
    PanelBody,
    Heading,
    Item,
}

/// Visibility of an element, possibly mid-slide
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideState {
    shown: bool,
    from: f32,
    started: Option<Instant>,
}

impl SlideState {
    pub fn shown() -> Self {
        Self {
            shown: true,
            from: 1.0,
            started: None,
        }
    }

    pub fn hidden() -> Self {
        Self {
            shown: false,
            from: 0.0,
            started: None,
        }
    }

    /// Visibility the element is heading towards
    pub fn is_shown(&self) -> bool {
        self.shown
    }

    /// Visible fraction in `0.0..=1.0` at `now`
    pub fn fraction(&self, now: Instant) -> f32 {
        let target = if self.shown { 1.0 } else { 0.0 };
        match self.started {
            None => target,
            Some(start) => {
                let elapsed = now.saturating_duration_since(start).as_secs_f32();
                let progress = (elapsed / SLIDE_DURATION.as_secs_f32()).clamp(0.0, 1.0);
                self.from + (target - self.from) * progress
            }
        }
    }

    pub fn is_visible(&self, now: Instant) -> bool {
        self.fraction(now) > 0.0
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        !self.remaining(now).is_zero()
    }

    /// Time left until the current slide settles
    pub fn remaining(&self, now: Instant) -> Duration {
        self.started.map_or(Duration::ZERO, |start| {
            SLIDE_DURATION.saturating_sub(now.saturating_duration_since(start))
        })
    }

    /// Reverse direction, starting from wherever the slide currently is
    pub fn toggle(&mut self, now: Instant) {
        self.from = self.fraction(now);
        self.shown = !self.shown;
        self.started = Some(now);
    }
}

impl Default for SlideState {
    fn default() -> Self {
        Self::shown()
    }
}

#[derive(Debug, Clone)]
struct Element {
    kind: ElementKind,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    slide: SlideState,
}

/// Arena of elements with parent links.
///
/// Ids are only meaningful for the tree that issued them.
#[derive(Debug, Clone, Default)]
pub struct ElementTree {
    elements: Vec<Element>,
}

impl ElementTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_root(&mut self, kind: ElementKind) -> ElementId {
        self.push(kind, None)
    }

    /// Append a child of `parent`. An id this tree did not issue leaves the
    /// child detached.
    pub fn add_child(&mut self, parent: ElementId, kind: ElementKind) -> ElementId {
        let known_parent = self.elements.get(parent.0).map(|_| parent);
        let id = self.push(kind, known_parent);
        if let Some(element) = self.elements.get_mut(parent.0) {
            element.children.push(id);
        }
        id
    }

    fn push(&mut self, kind: ElementKind, parent: Option<ElementId>) -> ElementId {
        let id = ElementId(self.elements.len());
        self.elements.push(Element {
            kind,
            parent,
            children: Vec::new(),
            slide: SlideState::shown(),
        });
        id
    }

    fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    pub fn kind(&self, id: ElementId) -> Option<ElementKind> {
        self.element(id).map(|element| element.kind)
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.element(id)?.parent
    }

    /// Nearest element of `kind`, starting with `id` itself and walking up
    pub fn closest(&self, id: ElementId, kind: ElementKind) -> Option<ElementId> {
        let mut current = Some(id);
        while let Some(candidate) = current {
            if self.kind(candidate)? == kind {
                return Some(candidate);
            }
            current = self.parent(candidate);
        }
        None
    }

    /// First descendant of `kind` in document order, excluding `id`
    pub fn find_first(&self, id: ElementId, kind: ElementKind) -> Option<ElementId> {
        let mut stack: Vec<ElementId> = self.element(id)?.children.iter().rev().copied().collect();
        while let Some(candidate) = stack.pop() {
            let element = self.element(candidate)?;
            if element.kind == kind {
                return Some(candidate);
            }
            stack.extend(element.children.iter().rev().copied());
        }
        None
    }

    pub fn slide(&self, id: ElementId) -> Option<&SlideState> {
        self.element(id).map(|element| &element.slide)
    }

    pub fn slide_mut(&mut self, id: ElementId) -> Option<&mut SlideState> {
        self.elements.get_mut(id.0).map(|element| &mut element.slide)
    }
}

/// Toggle bound to a trigger element and the body it collapses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideToggle {
    trigger: ElementId,
    panel: ElementId,
    body: ElementId,
}

impl SlideToggle {
    /// Bind to `trigger`. Returns `None` when the trigger is not inside a
    /// panel or the panel has no body.
    pub fn attach(tree: &ElementTree, trigger: ElementId) -> Option<Self> {
        let panel = tree.closest(trigger, ElementKind::Panel)?;
        let body = tree.find_first(panel, ElementKind::PanelBody)?;
        Some(Self {
            trigger,
            panel,
            body,
        })
    }

    pub fn trigger(&self) -> ElementId {
        self.trigger
    }

    pub fn panel(&self) -> ElementId {
        self.panel
    }

    pub fn body(&self) -> ElementId {
        self.body
    }

    /// Handle a click on the trigger
    pub fn click(&self, tree: &mut ElementTree, now: Instant) {
        let Some(slide) = tree.slide_mut(self.body) else {
            tracing::debug!("Slide toggle body {:?} is not in this tree", self.body);
            return;
        };
        slide.toggle(now);
        tracing::debug!(
            "Slide toggle on {:?}: body {:?} now {}",
            self.trigger,
            self.body,
            if slide.is_shown() { "opening" } else { "closing" }
        );
    }
}
