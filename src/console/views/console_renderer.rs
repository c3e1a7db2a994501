//! # Console Renderer
//!
//! Prints the layer console as plain text blocks: one block per panel and
//! a status line. A collapsed panel prints only its heading; a panel caught
//! mid-slide prints the leading share of its body lines.

use crate::console::events::ViewEvent;
use crate::console::models::{Layer, MessageKind};
use crate::console::view_models::ViewModel;
use crate::console::widgets::{PanelId, PanelLayout};
use crate::console::io::RenderStream;
use anyhow::Result;
use std::io::Write;
use tokio::time::Instant;

/// Trait for rendering views
pub trait ViewRenderer {
    /// Print the banner shown once at start-up
    fn initialize(&mut self, view_model: &ViewModel) -> Result<()>;

    /// Render every panel and the status line
    fn render_full(&mut self, view_model: &ViewModel, layout: &PanelLayout, now: Instant)
        -> Result<()>;

    /// Render a single panel
    fn render_panel(
        &mut self,
        view_model: &ViewModel,
        layout: &PanelLayout,
        panel: PanelId,
        now: Instant,
    ) -> Result<()>;

    fn render_status_bar(&mut self, view_model: &ViewModel) -> Result<()>;

    /// Print free text such as help or profile details
    fn render_text(&mut self, text: &str) -> Result<()>;

    /// Handle view events
    fn handle_view_event(
        &mut self,
        event: &ViewEvent,
        view_model: &ViewModel,
        layout: &PanelLayout,
        now: Instant,
    ) -> Result<()>;

    fn cleanup(&mut self) -> Result<()>;
}

pub struct ConsoleRenderer<W: RenderStream> {
    stream: W,
    use_color: bool,
}

impl<W: RenderStream> ConsoleRenderer<W> {
    /// Create a renderer writing to `stream`; ANSI colors only when `use_color`
    pub fn with_render_stream(stream: W, use_color: bool) -> Self {
        Self { stream, use_color }
    }

    pub fn stream(&self) -> &W {
        &self.stream
    }

    /// Print the layer list whether or not its panel is open
    pub fn render_layer_list(&mut self, view_model: &ViewModel) -> Result<()> {
        self.write_lines(&Self::layers_body(view_model))
    }

    pub fn render_prompt(&mut self) -> Result<()> {
        write!(self.stream, "layerdesk> ")?;
        self.stream.flush()?;
        Ok(())
    }

    fn panel_heading(panel: PanelId, shown: bool) -> String {
        let marker = if shown { "▾" } else { "▸" };
        format!("{marker} {}", panel.title())
    }

    fn layers_body(view_model: &ViewModel) -> Vec<String> {
        let layers = view_model.layers();
        if layers.is_empty() {
            let note = if view_model.layers_loaded() {
                "(no layers)"
            } else {
                "(not loaded, use 'load')"
            };
            return vec![format!("  {note}")];
        }

        let editing = view_model
            .is_editing()
            .then(|| view_model.selected().wms_id.as_str());
        layers
            .iter()
            .enumerate()
            .map(|(index, layer)| {
                let marker = if editing == Some(layer.wms_id.as_str()) {
                    '*'
                } else {
                    ' '
                };
                format!(" {marker}[{index}] {}", Self::layer_summary(layer))
            })
            .collect()
    }

    fn layer_summary(layer: &Layer) -> String {
        let mut summary = layer.wms_id.clone();
        if let Some(name) = &layer.name {
            summary.push_str(&format!(" \"{name}\""));
        }
        let count = layer.features.len();
        let noun = if count == 1 { "feature" } else { "features" };
        summary.push_str(&format!(" ({count} {noun})"));
        summary
    }

    fn selection_body(view_model: &ViewModel) -> Vec<String> {
        let selected = view_model.selected();
        let mode = if view_model.is_editing() {
            format!("editing '{}'", selected.wms_id)
        } else {
            "new layer".to_string()
        };
        let optional = |value: Option<&str>| value.unwrap_or("-").to_string();

        let mut lines = vec![
            format!("  {mode}"),
            format!("  wmsId:   {}", selected.wms_id),
            format!("  name:    {}", optional(selected.name.as_deref())),
            format!("  style:   {}", optional(selected.style.as_deref())),
            format!(
                "  opacity: {}",
                selected
                    .opacity
                    .map_or_else(|| "-".to_string(), |o| o.to_string())
            ),
        ];
        if selected.features.is_empty() {
            lines.push("  features: none".to_string());
        } else {
            lines.push("  features:".to_string());
            lines.extend(selected.features.iter().enumerate().map(|(index, feature)| {
                format!(
                    "    [{index}] wmsId={} name={}",
                    feature.wms_id, feature.name
                )
            }));
        }
        lines
    }

    /// Body lines of `panel` visible at `now`
    fn visible_body(
        view_model: &ViewModel,
        layout: &PanelLayout,
        panel: PanelId,
        now: Instant,
    ) -> Vec<String> {
        let body = match panel {
            PanelId::Layers => Self::layers_body(view_model),
            PanelId::Selection => Self::selection_body(view_model),
        };
        let fraction = layout.body_fraction(panel, now);
        let visible = (body.len() as f32 * fraction).ceil() as usize;
        body.into_iter().take(visible).collect()
    }

    fn status_text(&self, view_model: &ViewModel) -> String {
        let status = view_model.status_line();
        let mut parts = Vec::new();

        if status.is_executing() {
            parts.push(self.paint("33", "●", "Executing..."));
        } else if let Some(code) = status.http_status() {
            let color = match code {
                200..=299 => "32",
                400..=599 => "31",
                _ => "0",
            };
            parts.push(self.paint(color, "●", &format!("HTTP {code}")));
        }

        if let Some(message) = status.status_message() {
            match status.message_kind() {
                Some(MessageKind::Error) => parts.push(self.paint("31", "error:", message)),
                _ => parts.push(message.to_string()),
            }
        }

        parts.push(format!("profile {}", status.profile_name()));
        parts.join(" | ")
    }

    fn paint(&self, color: &str, mark: &str, text: &str) -> String {
        if self.use_color {
            format!("\x1b[{color}m{mark}\x1b[0m {text}")
        } else {
            format!("{mark} {text}")
        }
    }

    fn write_lines(&mut self, lines: &[String]) -> Result<()> {
        for line in lines {
            writeln!(self.stream, "{line}")?;
        }
        self.stream.flush()?;
        Ok(())
    }
}

impl<W: RenderStream> ViewRenderer for ConsoleRenderer<W> {
    fn initialize(&mut self, view_model: &ViewModel) -> Result<()> {
        let endpoint = view_model
            .status_line()
            .endpoint_url()
            .unwrap_or("no host configured")
            .to_string();
        self.write_lines(&[format!("layerdesk: {endpoint} (type 'help' for commands)")])
    }

    fn render_full(
        &mut self,
        view_model: &ViewModel,
        layout: &PanelLayout,
        now: Instant,
    ) -> Result<()> {
        for panel in PanelId::ALL {
            self.render_panel(view_model, layout, panel, now)?;
        }
        self.render_status_bar(view_model)
    }

    fn render_panel(
        &mut self,
        view_model: &ViewModel,
        layout: &PanelLayout,
        panel: PanelId,
        now: Instant,
    ) -> Result<()> {
        let mut lines = vec![Self::panel_heading(panel, layout.is_shown(panel))];
        lines.extend(Self::visible_body(view_model, layout, panel, now));
        self.write_lines(&lines)
    }

    fn render_status_bar(&mut self, view_model: &ViewModel) -> Result<()> {
        let text = self.status_text(view_model);
        let text = if self.use_color {
            // Dark gray (240)
            format!("\x1b[38;5;240m{text}\x1b[0m")
        } else {
            text
        };
        self.write_lines(&[text])
    }

    fn render_text(&mut self, text: &str) -> Result<()> {
        let lines: Vec<String> = text.lines().map(str::to_string).collect();
        self.write_lines(&lines)
    }

    fn handle_view_event(
        &mut self,
        event: &ViewEvent,
        view_model: &ViewModel,
        layout: &PanelLayout,
        now: Instant,
    ) -> Result<()> {
        match event {
            ViewEvent::FullRedrawRequired => self.render_full(view_model, layout, now),
            ViewEvent::PanelRedrawRequired { panel }
            | ViewEvent::PanelToggleRequested { panel } => {
                self.render_panel(view_model, layout, *panel, now)
            }
            ViewEvent::StatusBarUpdateRequired => self.render_status_bar(view_model),
        }
    }

    fn cleanup(&mut self) -> Result<()> {
        self.stream.flush()?;
        Ok(())
    }
}
