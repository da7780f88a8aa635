//! `repl::movement` module
//!
//! Contains repl loop handlers for commands that change player location.
//!
//! A move token is either a cardinal direction or the name of an object (usually a door). Exits
//! reached through an object are gated by that object: it must be openable and currently open.
//! Every refusal leaves the player where they were.

use crate::helpers::shout;
use crate::object::ObjectHolder;
use crate::repl::look::push_scenario;
use crate::scenario::{Scenario, is_cardinal};
use crate::view::{View, ViewItem};
use crate::world::CabanaWorld;

use anyhow::{Result, bail};
use log::info;
use thiserror::Error;

/// Reasons the player can't move.
#[derive(Debug, Error)]
pub enum MoveError {
    #[error("Não posso ir ali.")]
    NoExit,
    #[error("Não há caminho para essa direção.")]
    NoPath,
    #[error("Não é possível atravessar \"{}\".", shout(.0))]
    NotTraversable(String),
    #[error("Esse caminho está fechado.")]
    Closed,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Work out where `token` leads from the player's scenario, without moving.
///
/// # Errors
/// - a `MoveError` describing why the move is refused
pub fn plan_move(world: &CabanaWorld, token: &str) -> Result<String, MoveError> {
    let scenario = world.player_scenario()?;
    if is_cardinal(token) {
        let exit = scenario.exit(token).ok_or(MoveError::NoExit)?;
        check_gate(scenario, exit.gate.as_deref())?;
        return Ok(exit.to.clone());
    }

    let object = scenario.find_object(token).ok_or(MoveError::NoExit)?;
    let exit = scenario.exit(&object.name).ok_or(MoveError::NoPath)?;
    check_gate(scenario, Some(exit.gate.as_deref().unwrap_or(&object.name)))?;
    Ok(exit.to.clone())
}

fn check_gate(scenario: &Scenario, gate: Option<&str>) -> Result<(), MoveError> {
    let Some(gate) = gate else {
        return Ok(());
    };
    let Some(object) = scenario.find_object(gate) else {
        return Err(MoveError::Closed);
    };
    if !object.openable {
        return Err(MoveError::NotTraversable(object.name.clone()));
    }
    if !object.open {
        return Err(MoveError::Closed);
    }
    Ok(())
}

/// Move the player to a neighboring scenario, if all exit conditions are met.
///
/// # Errors
/// - if the player's scenario or the exit's destination is missing from the world
pub fn move_to_handler(world: &mut CabanaWorld, view: &mut View, token: &str) -> Result<()> {
    match plan_move(world, token) {
        Ok(destination) => {
            if !world.scenarios.contains_key(&destination) {
                bail!("exit \"{token}\" leads to unknown scenario \"{destination}\"");
            }
            world.player.move_to(destination);
            view.push(ViewItem::ActionSuccess(format!(
                "Você chegou em \"{}\".",
                world.player.location
            )));
            push_scenario(world, view)?;
        },
        Err(MoveError::Internal(err)) => return Err(err),
        Err(err) => {
            info!("move \"{token}\" from \"{}\" refused: {err}", world.player.location);
            view.push(ViewItem::ActionFailure(err.to_string()));
        },
    }
    Ok(())
}

/// Return to the previously visited scenario.
///
/// # Errors
/// - if the restored scenario is missing from the world
pub fn go_back_handler(world: &mut CabanaWorld, view: &mut View) -> Result<()> {
    match world.player.go_back() {
        Some(name) => {
            let message = format!("Você voltou a \"{}\".", shout(name));
            view.push(ViewItem::ActionSuccess(message));
            push_scenario(world, view)?;
        },
        None => view.push(ViewItem::ActionFailure("Não há lugar para retornar.".to_string())),
    }
    Ok(())
}
