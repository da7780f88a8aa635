//! REPL and command handling utilities.
//!
//! The game runs in a read-eval-print loop. This module and its submodules
//! implement the various command handlers that manipulate the [`CabanaWorld`].

mod input;
pub mod inventory;
pub mod look;
pub mod movement;
pub mod object;
pub mod system;

pub use inventory::*;
pub use look::*;
pub use movement::*;
pub use object::*;
pub use system::*;

use std::sync::{Arc, RwLock};

use crate::ambient::{Notifier, publish};
use crate::command::{Command, parse_command};
use crate::config::Config;
use crate::helpers::shout;
use crate::style::GameStyle;
use crate::view::{View, ViewItem};
use crate::world::CabanaWorld;

use anyhow::Result;
use log::{info, warn};

use input::{InputEvent, InputManager};

/// Control flow signal used by handlers to exit the REPL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplControl {
    Continue,
    Quit,
}

/// Blocking yes/no prompt used by the quit command. Returns the raw answer.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> String;
}

impl<F: FnMut(&str) -> String> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> String {
        self(prompt)
    }
}

/// Parse and execute one line of player input.
///
/// Everything the player should see is pushed to `view`. Returns `Quit` after a confirmed quit
/// or a victory.
///
/// # Errors
/// - Propagates failures from handlers, such as a missing scenario for the player.
pub fn process_line(
    world: &mut CabanaWorld,
    view: &mut View,
    line: &str,
    confirm: &mut dyn Confirm,
) -> Result<ReplControl> {
    #[allow(clippy::enum_glob_use)]
    use Command::*;

    let command = parse_command(line);
    if !command.is_noop() {
        info!("command in \"{}\": {command:?}", world.player.location);
    }
    match command {
        Noop => {},
        Look => look_handler(world, view)?,
        LookAt(thing) => look_at_handler(world, view, &thing)?,
        MoveTo(token) => move_to_handler(world, view, &token)?,
        Back => go_back_handler(world, view)?,
        Take(thing) => take_handler(world, view, &thing)?,
        Drop(thing) => return drop_handler(world, view, &thing),
        Unlock(thing) => unlock_handler(world, view, &thing)?,
        Lock(thing) => lock_handler(world, view, &thing)?,
        UseObject(thing) => use_handler(world, view, &thing)?,
        Inventory => inv_handler(world, view),
        Help => help_handler(view),
        Quit => return Ok(quit_handler(world, view, confirm)),
        Save(slot) => save_handler(world, view, &slot),
        Load(slot) => load_handler(world, view, &slot)?,
        MissingTarget(verb) => view.push(ViewItem::ActionFailure(format!("\"{}\" o quê?", shout(&verb)))),
        Unknown => view.push(ViewItem::Error("Não entendo isso.".to_string())),
    }
    Ok(ReplControl::Continue)
}

/// Run the main read–eval–print loop until the player quits or wins.
///
/// Starts the ambient hint notifier (if enabled) and publishes a fresh world snapshot for it
/// after every turn. The notifier is stopped before returning.
///
/// # Errors
/// - Propagates failures from handlers, such as a missing scenario for the player.
pub fn run_repl(world: &mut CabanaWorld, config: &Config) -> Result<()> {
    let mut view = View::new();
    let mut input_manager = InputManager::new();

    let snapshot = Arc::new(RwLock::new(world.snapshot()));
    let mut notifier = if config.ambient.enabled && !world.hints.is_empty() {
        match Notifier::spawn(
            Arc::clone(&snapshot),
            world.hints.clone(),
            config.ambient.interval(),
            input_manager.hint_sink(),
        ) {
            Ok(notifier) => Some(notifier),
            Err(err) => {
                warn!("ambient hints disabled: {err:#}");
                None
            },
        }
    } else {
        info!("ambient hints disabled");
        None
    };

    let mut turn: u64 = 0;
    let result = loop {
        let prompt = "\n> ".prompt_style().to_string();
        let line = match input_manager.read_line(&prompt) {
            Ok(InputEvent::Line(line)) => line,
            Ok(InputEvent::Eof) => {
                info!("input closed, leaving the game");
                break Ok(());
            },
            Ok(InputEvent::Interrupted) => {
                view.push(ViewItem::EngineMessage("Comando cancelado.".to_string()));
                view.flush();
                continue;
            },
            Err(err) => {
                warn!("failed to read input: {err}");
                view.push(ViewItem::Error("Falha ao ler a entrada. Tente novamente.".to_string()));
                view.flush();
                continue;
            },
        };

        turn += 1;
        info!("================> BEGIN TURN {turn} <================");
        let control = match process_line(world, &mut view, &line, &mut input_manager) {
            Ok(control) => control,
            Err(err) => break Err(err),
        };
        view.flush();
        publish(&snapshot, world.snapshot());
        if control == ReplControl::Quit {
            break Ok(());
        }
    };

    if let Some(notifier) = notifier.as_mut() {
        notifier.shutdown();
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::GameObject;
    use crate::scenario::{Exit, Scenario};

    fn world() -> CabanaWorld {
        let mut world = CabanaWorld::new_empty().with_seed(1);
        world.register_scenario(Scenario::new("Floresta", "Uma floresta."));
        world.register_scenario(Scenario::new("Exterior da Cabana", "Em frente à cabana."));
        world.add_exit("Floresta", "norte", Exit::new("Exterior da Cabana")).unwrap();
        world.set_current_scenario("Floresta").unwrap();
        world.add_object("Floresta", "galho", "Um galho seco.", GameObject::storable).unwrap();
        world
    }

    fn run(world: &mut CabanaWorld, line: &str) -> (ReplControl, Vec<String>) {
        let mut view = View::new();
        let mut never = |_: &str| "não".to_string();
        let control = process_line(world, &mut view, line, &mut never).unwrap();
        (control, view.lines())
    }

    #[test]
    fn blank_lines_do_nothing() {
        let mut world = world();
        assert_eq!(run(&mut world, "   "), (ReplControl::Continue, Vec::new()));
    }

    #[test]
    fn unknown_verbs_change_nothing() {
        let mut world = world();
        let (control, lines) = run(&mut world, "dançar galho");
        assert_eq!(control, ReplControl::Continue);
        assert_eq!(lines, vec!["Não entendo isso."]);
        assert!(world.player.inventory.is_empty());
        assert_eq!(world.player.location, "Floresta");
    }

    #[test]
    fn verbs_are_case_sensitive() {
        let mut world = world();
        assert_eq!(run(&mut world, "PEGAR galho").1, vec!["Não entendo isso."]);
    }

    #[test]
    fn missing_target_asks_what() {
        let mut world = world();
        assert_eq!(run(&mut world, "pegar").1, vec!["\"PEGAR\" o quê?"]);
        assert_eq!(run(&mut world, "ir").1, vec!["\"IR\" o quê?"]);
    }

    #[test]
    fn qualified_targets_and_movement() {
        let mut world = world();
        assert_eq!(run(&mut world, "ver :galho").1, vec!["Um galho seco."]);
        assert_eq!(run(&mut world, "pegar seco:galho").1, vec!["Você pegou \"GALHO\"."]);
        let (_, lines) = run(&mut world, "ir norte");
        assert_eq!(lines[0], "Você chegou em \"Exterior da Cabana\".");
        assert_eq!(world.player.location, "Exterior da Cabana");
    }

    #[test]
    fn quit_needs_confirmation() {
        let mut world = world();
        let mut view = View::new();
        let mut yes = |prompt: &str| {
            assert_eq!(prompt, "Deseja fechar o jogo?");
            "sim".to_string()
        };
        assert_eq!(run(&mut world, "sair").0, ReplControl::Continue);
        let control = process_line(&mut world, &mut view, "sair", &mut yes).unwrap();
        assert_eq!(control, ReplControl::Quit);
    }
}
