// Collapsible panel step definitions

use crate::common::world::LayerWorld;
use anyhow::{anyhow, ensure, Result};
use cucumber::{given, then, when};
use layerdesk::console::widgets::PanelId;
use std::time::Duration;
use tokio::time::Instant;

fn panel(name: &str) -> Result<PanelId> {
    PanelId::parse(name).ok_or_else(|| anyhow!("Unknown panel '{name}'"))
}

fn toggle_started(world: &LayerWorld) -> Result<Instant> {
    world
        .toggled_at
        .ok_or_else(|| anyhow!("No panel has been toggled yet"))
}

#[given(regex = r"^the (\w+) panel is (shown|hidden)$")]
async fn the_panel_is(world: &mut LayerWorld, name: String, state: String) -> Result<()> {
    let shown = world.layout.is_shown(panel(&name)?);
    ensure!(shown == (state == "shown"), "Expected the {name} panel {state}");
    Ok(())
}

#[when(regex = r"^I toggle the (\w+) panel$")]
async fn i_toggle_the_panel(world: &mut LayerWorld, name: String) -> Result<()> {
    let id = panel(&name)?;
    let now = Instant::now();
    world.layout.toggle(id, now);
    world.toggled_at = Some(now);
    world.reload_requested = id == PanelId::Layers && world.view_model.toggle_load_layers();
    Ok(())
}

#[when(regex = r"^I toggle the (\w+) panel again after (\d+) ms$")]
async fn i_toggle_again_after(world: &mut LayerWorld, name: String, ms: u64) -> Result<()> {
    let id = panel(&name)?;
    let at = toggle_started(world)? + Duration::from_millis(ms);
    world.layout.toggle(id, at);
    world.toggled_at = Some(at);
    world.reload_requested = id == PanelId::Layers && world.view_model.toggle_load_layers();
    Ok(())
}

#[then("a layer reload is requested")]
async fn a_reload_is_requested(world: &mut LayerWorld) -> Result<()> {
    ensure!(world.reload_requested, "Expected a reload request");
    ensure!(world.view_model.is_layers_panel_visible());
    Ok(())
}

#[then("no layer reload is requested")]
async fn no_reload_is_requested(world: &mut LayerWorld) -> Result<()> {
    ensure!(!world.reload_requested, "Expected no reload request");
    Ok(())
}

#[then(regex = r"^after (\d+) ms the (\w+) panel is (hidden|partly visible|fully visible)$")]
async fn after_ms_the_panel_is(
    world: &mut LayerWorld,
    ms: u64,
    name: String,
    state: String,
) -> Result<()> {
    let at = toggle_started(world)? + Duration::from_millis(ms);
    let fraction = world.layout.body_fraction(panel(&name)?, at);
    let ok = match state.as_str() {
        "hidden" => fraction == 0.0,
        "fully visible" => fraction == 1.0,
        _ => fraction > 0.0 && fraction < 1.0,
    };
    ensure!(ok, "Expected the {name} panel {state}, fraction is {fraction}");
    Ok(())
}
