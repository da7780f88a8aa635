//! `repl::object` module
//!
//! Contains repl loop handlers for commands that change object state: opening and locking with
//! keys, and using objects (running their action or emptying a container).

use crate::action::apply_effects;
use crate::entity_search::{SearchError, SearchScope, find_object_match};
use crate::helpers::shout;
use crate::idgen::ObjectId;
use crate::object::{GameObject, LockError, ObjectHolder};
use crate::repl::inventory::receive_item;
use crate::view::{View, ViewItem};
use crate::world::CabanaWorld;

use anyhow::{Result, anyhow};
use log::info;

/// Resolve `thing` in `scope`, pushing the player-facing failure if it isn't there.
fn resolve(
    world: &CabanaWorld,
    view: &mut View,
    thing: &str,
    scope: SearchScope,
) -> Result<Option<(crate::world::Holder, ObjectId)>> {
    match find_object_match(world, thing, scope) {
        Ok(found) => Ok(Some(found)),
        Err(SearchError::Unknown(err)) => Err(err),
        Err(err) => {
            view.push(ViewItem::ActionFailure(err.to_string()));
            Ok(None)
        },
    }
}

#[derive(Clone, Copy)]
enum LockOp {
    Unlock,
    Lock,
}

fn lock_or_unlock(world: &mut CabanaWorld, view: &mut View, thing: &str, op: LockOp) -> Result<()> {
    let Some((_, id)) = resolve(world, view, thing, SearchScope::Scenario)? else {
        return Ok(());
    };
    let (scenario, inventory) = world.scenario_and_inventory()?;
    let object = scenario
        .object_by_id_mut(id)
        .ok_or_else(|| anyhow!("object {id} vanished during lock check"))?;
    let result: Result<Option<String>, LockError> = match op {
        LockOp::Unlock => object.unlock(inventory),
        LockOp::Lock => object.lock(inventory),
    };
    let name = shout(&object.name);
    match (op, result) {
        (LockOp::Unlock, Ok(Some(key))) => {
            view.push(ViewItem::ActionSuccess(format!("Você abriu \"{name}\" com \"{}\"!", shout(&key))));
        },
        (LockOp::Unlock, Ok(None)) => view.push(ViewItem::ActionSuccess(format!("Você abriu \"{name}\"."))),
        (LockOp::Lock, Ok(Some(key))) => {
            view.push(ViewItem::ActionSuccess(format!("Você trancou \"{name}\" com \"{}\"!", shout(&key))));
        },
        (LockOp::Lock, Ok(None)) => view.push(ViewItem::ActionSuccess(format!("Você fechou \"{name}\"."))),
        (_, Err(err)) => {
            info!("lock/unlock of {id} refused: {err:?}");
            view.push(ViewItem::ActionFailure(err.to_string()));
        },
    }
    Ok(())
}

/// Open (unlock) an object in the current scenario with a key from inventory.
///
/// # Errors
/// - if the player's current scenario cannot be resolved
pub fn unlock_handler(world: &mut CabanaWorld, view: &mut View, thing: &str) -> Result<()> {
    lock_or_unlock(world, view, thing, LockOp::Unlock)
}

/// Close (lock) an object in the current scenario with a key from inventory.
///
/// # Errors
/// - if the player's current scenario cannot be resolved
pub fn lock_handler(world: &mut CabanaWorld, view: &mut View, thing: &str) -> Result<()> {
    lock_or_unlock(world, view, thing, LockOp::Lock)
}

/// Use an object nearby: run its action, or else take everything stored inside it.
///
/// # Errors
/// - if the player's current scenario cannot be resolved
pub fn use_handler(world: &mut CabanaWorld, view: &mut View, thing: &str) -> Result<()> {
    let Some((holder, id)) = resolve(world, view, thing, SearchScope::Nearby)? else {
        return Ok(());
    };

    let taken = world.object_mut(holder, id)?.and_then(|o| o.action.take());
    if let Some(mut action) = taken {
        let outcome = world.run_action(&mut action);
        if outcome.fired && !action.repeatable {
            action.deactivate();
        }
        if let Some(object) = world.object_mut(holder, id)? {
            info!("used \"{}\" ({id}): fired = {}", object.name, outcome.fired);
            object.action = Some(action);
        }
        for line in outcome.lines {
            view.push(ViewItem::ActionText(line));
        }
        return apply_effects(world, outcome.effects);
    }

    let object = world
        .object_mut(holder, id)?
        .ok_or_else(|| anyhow!("object {id} vanished during use"))?;
    if !object.is_storage() {
        view.push(ViewItem::ActionFailure("Esse item não pode ser usado.".to_string()));
        return Ok(());
    }
    let container = shout(&object.name);
    let items: Vec<GameObject> = match object.take_contents() {
        Ok(items) => items,
        Err(err) => {
            view.push(ViewItem::ActionFailure(err.to_string()));
            return Ok(());
        },
    };
    for item in items {
        view.push(ViewItem::ActionSuccess(format!(
            "Você pegou \"{}\" de \"{container}\".",
            shout(&item.name)
        )));
        receive_item(world, item);
    }
    Ok(())
}
