// Selection staging step definitions

use crate::common::world::LayerWorld;
use anyhow::{anyhow, ensure, Result};
use cucumber::{then, when};
use layerdesk::console::models::{FeatureField, LayerField};

#[when(regex = r"^I select layer (\d+)$")]
async fn i_select_layer(world: &mut LayerWorld, index: usize) -> Result<()> {
    let result = world.view_model.select(index);
    world.record(result);
    Ok(())
}

#[when("I start a new layer")]
async fn i_start_a_new_layer(world: &mut LayerWorld) -> Result<()> {
    let result = world.view_model.start_new();
    world.record(result);
    Ok(())
}

#[when(regex = r#"^I set the selection's (\S+) to "([^"]*)"$"#)]
async fn i_set_selection_field(world: &mut LayerWorld, field: String, value: String) -> Result<()> {
    let field = LayerField::parse(&field).ok_or_else(|| anyhow!("Unknown field '{field}'"))?;
    let result = world.view_model.set_selection_field(field, &value);
    world.record(result);
    Ok(())
}

#[when("I add a feature")]
async fn i_add_a_feature(world: &mut LayerWorld) -> Result<()> {
    let result = world.view_model.add_feature_to_selection();
    world.record(result);
    Ok(())
}

#[when(regex = r"^I remove feature (\d+)$")]
async fn i_remove_feature(world: &mut LayerWorld, index: usize) -> Result<()> {
    let result = world.view_model.remove_feature_from_selection(index);
    world.record(result);
    Ok(())
}

#[when(regex = r#"^I set feature (\d+)'s (\S+) to "([^"]*)"$"#)]
async fn i_set_feature_field(
    world: &mut LayerWorld,
    index: usize,
    field: String,
    value: String,
) -> Result<()> {
    let field =
        FeatureField::parse(&field).ok_or_else(|| anyhow!("Unknown feature field '{field}'"))?;
    let result = world.view_model.set_feature_field(index, field, &value);
    world.record(result);
    Ok(())
}

#[then(regex = r"^the selection has (\d+) features?$")]
async fn the_selection_has_features(world: &mut LayerWorld, count: usize) -> Result<()> {
    let actual = world.view_model.selected().features.len();
    ensure!(actual == count, "Expected {count} staged features, got {actual}");
    Ok(())
}

#[then(regex = r#"^feature (\d+) of the selection has wmsId "([^"]*)"$"#)]
async fn feature_of_selection_has_id(
    world: &mut LayerWorld,
    index: usize,
    wms_id: String,
) -> Result<()> {
    let feature = world
        .view_model
        .selected()
        .features
        .get(index)
        .ok_or_else(|| anyhow!("No staged feature at index {index}"))?;
    ensure!(
        feature.wms_id == wms_id,
        "Expected wmsId '{wms_id}', got '{}'",
        feature.wms_id
    );
    Ok(())
}

#[then(regex = r#"^the console is editing "([^"]*)"$"#)]
async fn the_console_is_editing(world: &mut LayerWorld, wms_id: String) -> Result<()> {
    ensure!(world.view_model.is_editing(), "Expected edit mode");
    let actual = &world.view_model.selected().wms_id;
    ensure!(*actual == wms_id, "Expected to edit '{wms_id}', got '{actual}'");
    Ok(())
}

#[then("the console is not editing")]
async fn the_console_is_not_editing(world: &mut LayerWorld) -> Result<()> {
    ensure!(!world.view_model.is_editing(), "Expected create mode");
    Ok(())
}
