//! # Console Application Controller
//!
//! The controller orchestrates the console components and manages the event
//! loop. It maps command lines to [`CommandEvent`]s, applies them to the
//! view model, dispatches backend calls through the [`LayerService`] and
//! folds their responses back in on its own loop turn.
//!
//! Interactive sessions race the next input line against backend responses.
//! Scripted (non-interactive) input waits for every outstanding response
//! before reading the next line, so a script runs one command at a time.

use crate::console::{
    commands::{CommandContext, CommandEvent, CommandRegistry, ViewModelSnapshot, HELP_TEXT},
    error::LayerError,
    events::{EventBus, ModelEvent, SimpleEventBus, ViewEvent},
    io::{InputStream, RenderStream, StdinStream},
    models::{ConnectionProfile, IniProfileStore},
    services::{HttpLayerClient, LayerClient, LayerResponseMessage, LayerService},
    view_models::ViewModel,
    views::{ConsoleRenderer, ViewRenderer},
    widgets::{PanelId, PanelLayout},
};
use crate::{cmd_args::CommandLineArgs, config};
use anyhow::Result;
use tokio::time::Instant;

/// What woke the event loop
enum LoopInput {
    Line(Option<String>),
    Response(LayerResponseMessage),
}

/// Audit trail of backend-confirmed changes
fn log_model_event(event: &ModelEvent) {
    match event {
        ModelEvent::LayerAdded { wms_id } => tracing::info!("Added layer '{}'", wms_id),
        ModelEvent::LayerSaved { wms_id } => tracing::info!("Saved layer '{}'", wms_id),
        ModelEvent::LayerDeleted { wms_id } => tracing::info!("Deleted layer '{}'", wms_id),
        _ => {}
    }
}

/// The main application controller that orchestrates the MVVM pattern
pub struct AppController<I: InputStream, W: RenderStream, C: LayerClient + 'static> {
    view_model: ViewModel,
    view_renderer: ConsoleRenderer<W>,
    command_registry: CommandRegistry,
    layout: PanelLayout,
    service: LayerService<C>,
    input: I,
    should_quit: bool,
}

impl AppController<StdinStream, std::io::Stdout, HttpLayerClient> {
    /// Create the controller for a terminal session
    pub fn new(cmd_args: &CommandLineArgs) -> Result<Self> {
        let profile_name = cmd_args.profile();
        let profile_path = config::get_profile_path();
        let profile = Self::load_profile(profile_name, &profile_path, cmd_args)?;
        let client = HttpLayerClient::new(&profile)?;
        let endpoint_url = client.endpoint().map(|url| url.to_string());

        let mut controller = Self::with_io_streams(client, StdinStream::new(), std::io::stdout());
        let status_line = controller.view_model.status_line_mut();
        status_line.set_profile(profile_name.to_string(), profile_path);
        status_line.set_endpoint_url(endpoint_url);
        Ok(controller)
    }

    /// Load profile from INI file or return blank profile if not found,
    /// then apply the command line overrides
    fn load_profile(
        profile_name: &str,
        profile_path: &str,
        cmd_args: &CommandLineArgs,
    ) -> Result<ConnectionProfile> {
        tracing::debug!("Loading profile '{}' from '{}'", profile_name, profile_path);

        let ini_store = IniProfileStore::new(profile_path);
        let mut profile = match ini_store.get_profile(profile_name)? {
            Some(profile) => {
                tracing::debug!("Profile loaded successfully, host: {:?}", profile.host());
                profile
            }
            None => {
                tracing::debug!("Profile '{}' not found, using blank profile", profile_name);
                ConnectionProfile::blank()
            }
        };

        if let Some(host) = cmd_args.host() {
            profile.set_host(host);
        }
        if let Some(endpoint) = cmd_args.endpoint() {
            profile.set_endpoint(endpoint);
        }
        Ok(profile)
    }
}

impl<I: InputStream, W: RenderStream, C: LayerClient + 'static> AppController<I, W, C> {
    /// Create a controller with injected client and I/O streams
    pub fn with_io_streams(client: C, input: I, render_stream: W) -> Self {
        let mut event_bus = SimpleEventBus::new();
        event_bus.subscribe_to_model_events(Box::new(log_model_event));
        let mut view_model = ViewModel::new();
        view_model.set_event_bus(Box::new(event_bus));
        let use_color = input.is_interactive();

        Self {
            view_model,
            view_renderer: ConsoleRenderer::with_render_stream(render_stream, use_color),
            command_registry: CommandRegistry::new(),
            layout: PanelLayout::new(),
            service: LayerService::new(client),
            input,
            should_quit: false,
        }
    }

    pub fn view_model(&self) -> &ViewModel {
        &self.view_model
    }

    pub fn layout(&self) -> &PanelLayout {
        &self.layout
    }

    /// Run the main application loop until `quit` or end of input
    pub async fn run(&mut self) -> Result<()> {
        self.view_renderer.initialize(&self.view_model)?;
        self.view_renderer
            .render_full(&self.view_model, &self.layout, Instant::now())?;

        while !self.should_quit {
            if !self.input.is_interactive() {
                self.drain_responses().await?;
            } else {
                self.view_renderer.render_prompt()?;
            }

            let next = tokio::select! {
                line = self.input.next_line() => LoopInput::Line(line?),
                Some(message) = self.service.next_response(), if self.view_model.has_pending_work() => {
                    LoopInput::Response(message)
                }
            };

            match next {
                LoopInput::Line(Some(line)) => self.handle_line(&line).await?,
                LoopInput::Line(None) => {
                    tracing::debug!("End of input");
                    self.should_quit = true;
                }
                LoopInput::Response(message) => self.handle_response(message)?,
            }
        }

        self.drain_responses().await?;
        self.view_renderer.cleanup()?;
        Ok(())
    }

    async fn handle_line(&mut self, line: &str) -> Result<()> {
        let context = CommandContext::new(ViewModelSnapshot::from_view_model(&self.view_model));

        match self.command_registry.execute_command(line, &context) {
            Ok(events) => {
                tracing::debug!("Command events generated: {:?}", events);
                for event in events {
                    self.apply_command_event(event).await?;
                }
            }
            Err(e) => {
                self.view_model
                    .status_line_mut()
                    .set_error_message(e.to_string());
                self.view_renderer.render_status_bar(&self.view_model)?;
            }
        }

        if !self.should_quit {
            self.process_view_events()?;
        }
        Ok(())
    }

    fn handle_response(&mut self, message: LayerResponseMessage) -> Result<()> {
        tracing::debug!("Applying backend response");
        Self::settle(self.view_model.apply_response(message));
        self.process_view_events()
    }

    /// Wait for every outstanding backend response and apply it
    async fn drain_responses(&mut self) -> Result<()> {
        while self.view_model.has_pending_work() {
            match self.service.next_response().await {
                Some(message) => self.handle_response(message)?,
                None => break,
            }
        }
        Ok(())
    }

    /// View model failures are already on the status line; only log them
    fn settle(result: std::result::Result<(), LayerError>) {
        if let Err(e) = result {
            tracing::debug!("Operation failed: {}", e);
        }
    }

    fn dispatch_read_all(&mut self) {
        let ticket = self.view_model.begin_read_all();
        self.service.dispatch_read_all(ticket);
    }

    /// Apply a command event to the view model
    async fn apply_command_event(&mut self, event: CommandEvent) -> Result<()> {
        match event {
            CommandEvent::ListRequested => {
                self.view_renderer.render_layer_list(&self.view_model)?;
            }
            CommandEvent::ReloadRequested => self.dispatch_read_all(),
            CommandEvent::PanelToggleRequested { panel } => {
                self.toggle_panel(panel).await?;
            }
            CommandEvent::SelectRequested { index } => {
                Self::settle(self.view_model.select(index));
            }
            CommandEvent::NewLayerRequested => Self::settle(self.view_model.start_new()),
            CommandEvent::SelectionFieldEditRequested { field, value } => {
                Self::settle(self.view_model.set_selection_field(field, &value));
            }
            CommandEvent::FeatureAddRequested => {
                Self::settle(self.view_model.add_feature_to_selection());
            }
            CommandEvent::FeatureRemoveRequested { index } => {
                Self::settle(self.view_model.remove_feature_from_selection(index));
            }
            CommandEvent::FeatureFieldEditRequested {
                index,
                field,
                value,
            } => {
                Self::settle(self.view_model.set_feature_field(index, field, &value));
            }
            CommandEvent::AddLayerRequested => match self.view_model.begin_add() {
                Ok(staged) => self.service.dispatch_add(staged),
                Err(e) => Self::settle(Err(e)),
            },
            CommandEvent::SaveLayerRequested => match self.view_model.begin_save() {
                Ok(staged) => self.service.dispatch_save(staged),
                Err(e) => Self::settle(Err(e)),
            },
            CommandEvent::DeleteLayerRequested { wms_id } => {
                match self.view_model.begin_delete(&wms_id) {
                    Ok(wms_id) => self.service.dispatch_delete(wms_id),
                    Err(e) => Self::settle(Err(e)),
                }
            }
            CommandEvent::ShowProfileRequested => self.handle_show_profile()?,
            CommandEvent::HelpRequested => self.view_renderer.render_text(HELP_TEXT)?,
            CommandEvent::QuitRequested => {
                self.should_quit = true;
            }
        }

        Ok(())
    }

    /// Slide a panel and let the animation settle before it is redrawn
    async fn toggle_panel(&mut self, panel: PanelId) -> Result<()> {
        self.layout.toggle(panel, Instant::now());

        let reload = match panel {
            PanelId::Layers => self.view_model.toggle_load_layers(),
            PanelId::Selection => false,
        };
        if reload {
            self.dispatch_read_all();
        }

        let delay = self.layout.settle_delay(Instant::now());
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        // The view model only announces the layers panel
        if panel == PanelId::Selection {
            self.view_renderer.render_panel(
                &self.view_model,
                &self.layout,
                panel,
                Instant::now(),
            )?;
        }
        Ok(())
    }

    fn handle_show_profile(&mut self) -> Result<()> {
        let status_line = self.view_model.status_line();
        let text = format!(
            "profile: {} ({})\nendpoint: {}",
            status_line.profile_name(),
            status_line.profile_path(),
            status_line.endpoint_url().unwrap_or("not configured"),
        );
        self.view_renderer.render_text(&text)
    }

    /// Render whatever the view model marked stale
    fn process_view_events(&mut self) -> Result<()> {
        let mut events: Vec<ViewEvent> = Vec::new();
        for event in self.view_model.collect_pending_view_events() {
            if !events.contains(&event) {
                events.push(event);
            }
        }

        let now = Instant::now();
        if events.contains(&ViewEvent::FullRedrawRequired) {
            return self
                .view_renderer
                .render_full(&self.view_model, &self.layout, now);
        }

        // Status line last, below any redrawn panel
        events.sort_by_key(|event| matches!(event, ViewEvent::StatusBarUpdateRequired));
        for event in &events {
            self.view_renderer
                .handle_view_event(event, &self.view_model, &self.layout, now)?;
        }
        Ok(())
    }
}
