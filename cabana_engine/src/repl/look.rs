//! Observation command handlers.
//!
//! - [`look_handler`] - describe the current scenario (objects included)
//! - [`look_at_handler`] - describe one object in the current scenario
//!
//! Neither handler changes world state.

use crate::entity_search::{SearchError, SearchScope, find_object_match};
use crate::view::{View, ViewItem};
use crate::world::CabanaWorld;

use anyhow::{Result, anyhow};
use log::info;

/// Push the full description of a scenario.
pub(crate) fn push_scenario(world: &CabanaWorld, view: &mut View) -> Result<()> {
    let scenario = world.player_scenario()?;
    view.push(ViewItem::ScenarioDescription {
        name: scenario.name.clone(),
        text: scenario.describe(),
    });
    Ok(())
}

/// Shows description of surroundings.
///
/// # Errors
/// Returns an error if the player's current scenario cannot be resolved.
pub fn look_handler(world: &CabanaWorld, view: &mut View) -> Result<()> {
    push_scenario(world, view)?;
    info!("player looked around \"{}\"", world.player.location);
    Ok(())
}

/// Shows the description of an object in the current scenario.
///
/// # Errors
/// Returns an error if the player's current scenario cannot be resolved.
pub fn look_at_handler(world: &CabanaWorld, view: &mut View, thing: &str) -> Result<()> {
    match find_object_match(world, thing, SearchScope::Scenario) {
        Ok((_, id)) => {
            let object = world
                .player_scenario()?
                .objects
                .iter()
                .find(|o| o.id == id)
                .ok_or_else(|| anyhow!("object {id} vanished during look"))?;
            info!("player looked at \"{}\" ({id})", object.name);
            view.push(ViewItem::ObjectDescription(object.description.clone()));
        },
        Err(SearchError::Unknown(err)) => return Err(err),
        Err(err) => view.push(ViewItem::ActionFailure(err.to_string())),
    }
    Ok(())
}
