//! effect.rs -- `ActionEffect` Module
//!
//! World-level consequences of an executed `ObjectAction`, applied by the engine once the action
//! has been put back on its object.

use anyhow::Result;
use log::{info, warn};

use crate::idgen::ObjectId;
use crate::object::{GameObject, ObjectHolder};
use crate::world::CabanaWorld;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionEffect {
    /// Mark the named NPC as dead.
    KillNpc(String),
    /// Create a new object in the player's current scenario.
    SpawnObject {
        name: String,
        description: String,
        storable: bool,
    },
    /// Reset the remaining uses of another object's action (and reactivate it).
    RefillAction { target: ObjectId, uses: u32 },
}

/// Apply effects in order.
///
/// # Errors
/// - if the player's current scenario can't be found when spawning an object
pub fn apply_effects(world: &mut CabanaWorld, effects: Vec<ActionEffect>) -> Result<()> {
    for effect in effects {
        match effect {
            ActionEffect::KillNpc(name) => match world.npcs.get_mut(&name) {
                Some(npc) => npc.kill(),
                None => warn!("KillNpc effect: no npc named \"{name}\""),
            },
            ActionEffect::SpawnObject {
                name,
                description,
                storable,
            } => {
                let id = world.ids.allocate();
                let mut object = GameObject::new(id, name, description);
                object.storable = storable;
                let scenario = world.player_scenario_mut()?;
                info!("spawned \"{}\" ({id}) in \"{}\"", object.name, scenario.name);
                scenario.add_object(object);
            },
            ActionEffect::RefillAction { target, uses } => {
                let found = if world.player.contains_object(target) {
                    world.player.object_by_id_mut(target)
                } else {
                    world.player_scenario_mut()?.object_by_id_mut(target)
                };
                match found.and_then(|object| object.action.as_mut()) {
                    Some(action) => {
                        action.uses = uses;
                        action.active = true;
                        info!("refilled action on {target} to {uses} uses");
                    },
                    None => warn!("RefillAction effect: {target} not found or has no action"),
                }
            },
        }
    }
    Ok(())
}
