// Backend CRUD step definitions

use crate::common::world::{layer_json, local_layer, parse_list, LayerWorld};
use anyhow::{ensure, Result};
use cucumber::gherkin::Step;
use cucumber::{given, then, when};
use layerdesk::console::error::LayerError;
use layerdesk::console::events::SimpleEventBus;
use layerdesk::console::view_models::ViewModel;
use serde_json::{json, Value};

// ===== BACKEND SETUP STEPS =====

#[given("the backend holds layers:")]
async fn the_backend_holds_layers(world: &mut LayerWorld, step: &Step) -> Result<()> {
    let mut objects = Vec::new();
    if let Some(table) = &step.table {
        for row in table.rows.iter().skip(1) {
            let wms_id = row.first().map_or("", String::as_str);
            let features = row.get(1).map_or("", String::as_str);
            objects.push(layer_json(wms_id, features));
        }
    }
    world.mount_read_all(json!({ "objects": objects })).await
}

#[given(regex = r#"^the backend answers read-all with plain text "([^"]*)"$"#)]
async fn the_backend_answers_with_text(world: &mut LayerWorld, body: String) -> Result<()> {
    world.mount_read_all_text(&body).await
}

#[given(regex = r#"^the backend answers read-all with JSON '(.*)'$"#)]
async fn the_backend_answers_with_json(world: &mut LayerWorld, body: String) -> Result<()> {
    let value: Value = serde_json::from_str(&body)?;
    world.mount_read_all(value).await
}

#[given("the backend accepts writes")]
async fn the_backend_accepts_writes(world: &mut LayerWorld) -> Result<()> {
    world.mount_writes(200).await
}

#[given(regex = r"^the backend fails writes with status (\d+)$")]
async fn the_backend_fails_writes(world: &mut LayerWorld, status: u16) -> Result<()> {
    world.mount_writes(status).await
}

#[given(regex = r#"^the console holds layers "([^"]*)"$"#)]
async fn the_console_holds_layers(world: &mut LayerWorld, ids: String) -> Result<()> {
    let layers = parse_list(&ids)
        .iter()
        .map(|wms_id| local_layer(wms_id, ""))
        .collect();
    world.view_model = ViewModel::with_layers(layers);
    world
        .view_model
        .set_event_bus(Box::new(SimpleEventBus::new()));
    Ok(())
}

// ===== OPERATION STEPS =====

#[when("I load the layers")]
async fn i_load_the_layers(world: &mut LayerWorld) -> Result<()> {
    let client = world.client()?;
    let result = world.view_model.read_all(&client).await;
    world.record(result);
    Ok(())
}

#[when("I add the selection")]
async fn i_add_the_selection(world: &mut LayerWorld) -> Result<()> {
    world.setup_mock_server().await?;
    let client = world.client()?;
    let result = world.view_model.add_layer(&client).await;
    world.record(result);
    Ok(())
}

#[when("I save the selection")]
async fn i_save_the_selection(world: &mut LayerWorld) -> Result<()> {
    world.setup_mock_server().await?;
    let client = world.client()?;
    let result = world.view_model.save_layer(&client).await;
    world.record(result);
    Ok(())
}

#[when(regex = r#"^I delete layer "([^"]*)"$"#)]
async fn i_delete_layer(world: &mut LayerWorld, wms_id: String) -> Result<()> {
    world.setup_mock_server().await?;
    let client = world.client()?;
    let result = world.view_model.delete_layer(&client, &wms_id).await;
    world.record(result);
    Ok(())
}

// ===== VERIFICATION STEPS =====

#[then(regex = r#"^the layer list is "([^"]*)"$"#)]
async fn the_layer_list_is(world: &mut LayerWorld, ids: String) -> Result<()> {
    let expected = parse_list(&ids);
    let actual = world.layer_ids();
    ensure!(actual == expected, "Expected layers {expected:?}, got {actual:?}");
    Ok(())
}

#[then("the layer list is empty")]
async fn the_layer_list_is_empty(world: &mut LayerWorld) -> Result<()> {
    let actual = world.layer_ids();
    ensure!(actual.is_empty(), "Expected no layers, got {actual:?}");
    Ok(())
}

#[then("the layers are marked as loaded")]
async fn the_layers_are_marked_loaded(world: &mut LayerWorld) -> Result<()> {
    ensure!(world.view_model.layers_loaded(), "Expected layers to be loaded");
    Ok(())
}

#[then("the layers are not marked as loaded")]
async fn the_layers_are_not_marked_loaded(world: &mut LayerWorld) -> Result<()> {
    ensure!(!world.view_model.layers_loaded(), "Expected layers not to be loaded");
    Ok(())
}

#[then("the operation succeeds")]
async fn the_operation_succeeds(world: &mut LayerWorld) -> Result<()> {
    ensure!(
        world.last_error.is_none(),
        "Expected success, got {:?}",
        world.last_error
    );
    Ok(())
}

#[then(regex = r"^the operation fails with a (validation|not found|network) error$")]
async fn the_operation_fails_with(world: &mut LayerWorld, kind: String) -> Result<()> {
    let matches = match (kind.as_str(), &world.last_error) {
        ("validation", Some(LayerError::Validation(_))) => true,
        ("not found", Some(LayerError::NotFound(_))) => true,
        ("network", Some(LayerError::Network(_))) => true,
        _ => false,
    };
    ensure!(matches, "Expected a {kind} error, got {:?}", world.last_error);
    ensure!(
        world.view_model.status_line().is_error(),
        "Expected the failure on the status line"
    );
    Ok(())
}

#[then(regex = r#"^the backend received (\d+) "([^"]*)" requests?$"#)]
async fn the_backend_received(world: &mut LayerWorld, count: usize, action: String) -> Result<()> {
    let actual = world.requests_for(&action).await?;
    ensure!(
        actual == count,
        "Expected {count} '{action}' requests, got {actual}"
    );
    Ok(())
}

#[then(regex = r#"^layer (\d+) in the list has (\d+) features?$"#)]
async fn layer_in_list_has_features(world: &mut LayerWorld, index: usize, count: usize) -> Result<()> {
    let layer = world
        .view_model
        .layers()
        .get(index)
        .ok_or_else(|| anyhow::anyhow!("No layer at index {index}"))?;
    ensure!(
        layer.features.len() == count,
        "Expected {count} features on '{}', got {}",
        layer.wms_id,
        layer.features.len()
    );
    Ok(())
}

#[then(regex = r#"^layer "([^"]*)" is named "([^"]*)"$"#)]
async fn layer_is_named(world: &mut LayerWorld, wms_id: String, name: String) -> Result<()> {
    let index = world
        .view_model
        .find_layer(&wms_id)
        .ok_or_else(|| anyhow::anyhow!("Layer '{wms_id}' not in list"))?;
    let actual = world.view_model.layers()[index].name.clone();
    ensure!(
        actual.as_deref() == Some(name.as_str()),
        "Expected name '{name}', got {actual:?}"
    );
    Ok(())
}
