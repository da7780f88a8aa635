//! `repl::system` module
//!
//! Contains repl loop handlers for commands that are for system utilities.

use std::mem;

use crate::repl::look::push_scenario;
use crate::repl::{Confirm, ReplControl};
use crate::save_files::{active_save_dir, load_save_file, save_world, slot_path};
use crate::view::{HelpLine, View, ViewItem};
use crate::world::CabanaWorld;

use anyhow::Result;
use log::{error, info, warn};

const HELP: &[(&str, &str)] = &[
    ("ver / olhar / observar", "descreve o cenário atual"),
    ("ver <objeto>", "descreve um objeto do cenário"),
    ("ir / entrar <direção|objeto>", "vai para outro cenário (norte, sul, leste, oeste ou uma porta)"),
    ("voltar", "retorna ao cenário anterior"),
    ("pegar <objeto>", "coloca um objeto no inventário"),
    ("largar / soltar <objeto>", "deixa um objeto do inventário no cenário"),
    ("abrir <objeto>", "abre ou destranca um objeto"),
    ("fechar <objeto>", "fecha ou tranca um objeto"),
    ("usar <objeto>", "usa um objeto próximo"),
    ("i / inventário", "lista os itens que você carrega"),
    ("salvar <nome>", "salva o jogo"),
    ("carregar <nome>", "carrega um jogo salvo"),
    ("ajuda", "mostra esta lista"),
    ("sair", "fecha o jogo"),
];

/// Ask for confirmation and quit only on "sim" (any case).
pub fn quit_handler(world: &CabanaWorld, view: &mut View, confirm: &mut dyn Confirm) -> ReplControl {
    let answer = confirm.confirm("Deseja fechar o jogo?");
    if answer.trim().to_lowercase() == "sim" {
        info!("player quit in \"{}\"", world.player.location);
        info!("ending inventory:");
        world
            .player
            .inventory
            .iter()
            .for_each(|i| info!("- {} ({})", i.name, i.id));
        view.push(ViewItem::EngineMessage("Fechando jogo...".to_string()));
        ReplControl::Quit
    } else {
        view.push(ViewItem::EngineMessage("Ok. Continue a jogar!".to_string()));
        ReplControl::Continue
    }
}

/// Show available commands.
pub fn help_handler(view: &mut View) {
    let lines = HELP
        .iter()
        .map(|(command, description)| HelpLine {
            command: (*command).to_string(),
            description: (*description).to_string(),
        })
        .collect();
    view.push(ViewItem::Help(lines));
}

/// Save the game to a slot in the active save directory.
pub fn save_handler(world: &CabanaWorld, view: &mut View, slot: &str) {
    match save_world(world, &active_save_dir(), slot) {
        Ok(path) => {
            info!("player saved game \"{slot}\" to {}", path.display());
            view.push(ViewItem::EngineMessage(format!("Jogo salvo com sucesso em \"{slot}\".")));
        },
        Err(err) => {
            error!("saving \"{slot}\" failed: {err:#}");
            view.push(ViewItem::Error(format!("Erro ao salvar o jogo: {err}")));
        },
    }
}

/// Load a saved game, replacing the current world. The session's RNG is kept.
///
/// # Errors
/// - if the loaded world places the player in an unknown scenario
pub fn load_handler(world: &mut CabanaWorld, view: &mut View, slot: &str) -> Result<()> {
    let path = slot_path(&active_save_dir(), slot);
    if !path.is_file() {
        info!("no save file at {}", path.display());
        view.push(ViewItem::ActionFailure(
            "Não há jogo salvo. Por favor, salve um jogo primeiro.".to_string(),
        ));
        return Ok(());
    }
    match load_save_file(&path) {
        Ok(file) => {
            let mut loaded = file.world;
            if !loaded.scenarios.contains_key(&loaded.player.location) {
                warn!("save \"{slot}\" places the player in unknown scenario, load refused");
                view.push(ViewItem::Error(format!(
                    "Erro ao carregar o jogo: cenário \"{}\" desconhecido.",
                    loaded.player.location
                )));
                return Ok(());
            }
            mem::swap(&mut loaded.rng, &mut world.rng);
            *world = loaded;
            info!("player reloaded world from {}", path.display());
            view.push(ViewItem::EngineMessage("O jogo carregou com sucesso.".to_string()));
            push_scenario(world, view)?;
        },
        Err(err) => {
            warn!("loading \"{slot}\" failed: {err:#}");
            view.push(ViewItem::Error(format!("Erro ao carregar o jogo: {err}")));
        },
    }
    Ok(())
}
