//! `repl::inventory` module
//!
//! Contains repl loop handlers for commands that affect player inventory.

use crate::entity_search::{SearchError, SearchScope, find_object_match};
use crate::helpers::shout;
use crate::object::{GameObject, ObjectHolder};
use crate::repl::ReplControl;
use crate::view::{View, ViewItem};
use crate::world::CabanaWorld;

use anyhow::{Result, anyhow};
use log::info;

/// Put an object into the player's inventory, marking an NPC trophy as collected.
pub(crate) fn receive_item(world: &mut CabanaWorld, item: GameObject) {
    if let Some(npc) = world.npc_for_trophy_mut(&item.name) {
        npc.collect_trophy();
    }
    info!("\"{}\" ({}) added to inventory", item.name, item.id);
    world.player.add_object(item);
}

/// Removes an object from the current scenario and adds it to inventory.
///
/// # Errors
/// - if the player's current scenario cannot be resolved
pub fn take_handler(world: &mut CabanaWorld, view: &mut View, thing: &str) -> Result<()> {
    let id = match find_object_match(world, thing, SearchScope::Scenario) {
        Ok((_, id)) => id,
        Err(SearchError::Unknown(err)) => return Err(err),
        Err(err) => {
            view.push(ViewItem::ActionFailure(err.to_string()));
            return Ok(());
        },
    };

    let scenario = world.player_scenario_mut()?;
    if !scenario.objects.iter().any(|o| o.id == id && o.storable) {
        info!("player tried to take non-storable object {id}");
        view.push(ViewItem::ActionFailure("Você não pode pegar isso.".to_string()));
        return Ok(());
    }
    let item = scenario
        .remove_object(id)
        .ok_or_else(|| anyhow!("object {id} vanished while being taken"))?;
    view.push(ViewItem::ActionSuccess(format!("Você pegou \"{}\".", shout(&item.name))));
    receive_item(world, item);
    Ok(())
}

/// Drops an item from inventory in the current scenario, then checks the drop hooks.
///
/// # Errors
/// - if the player's current scenario cannot be resolved
pub fn drop_handler(world: &mut CabanaWorld, view: &mut View, thing: &str) -> Result<ReplControl> {
    let id = match find_object_match(world, thing, SearchScope::Inventory) {
        Ok((_, id)) => id,
        Err(SearchError::Unknown(err)) => return Err(err),
        Err(err) => {
            view.push(ViewItem::ActionFailure(err.to_string()));
            return Ok(ReplControl::Continue);
        },
    };

    let item = world
        .player
        .remove_object(id)
        .ok_or_else(|| anyhow!("object {id} vanished while being dropped"))?;
    let name = item.name.clone();
    let scenario = world.player_scenario_mut()?;
    info!("\"{name}\" ({id}) dropped in \"{}\"", scenario.name);
    scenario.add_object(item);
    view.push(ViewItem::ActionSuccess(format!("Você soltou \"{}\".", shout(&name))));

    if let Some(hook) = world.drop_hook_for(&name) {
        info!("drop hook fired: \"{name}\" in \"{}\"", hook.scenario);
        view.push(ViewItem::Victory(hook.message.clone()));
        return Ok(ReplControl::Quit);
    }
    Ok(ReplControl::Continue)
}

/// Show the contents of the player's inventory.
pub fn inv_handler(world: &CabanaWorld, view: &mut View) {
    view.push(ViewItem::Inventory(world.player.inventory_names()));
}
