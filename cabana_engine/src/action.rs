//! Action module --
//!
//! Scripted behavior bound to a `GameObject` and fired by "usar". Executing an action only ever
//! mutates the action itself; anything it does to the rest of the world comes back as a list of
//! `ActionEffect`s which the engine applies afterwards (see [`effect::apply_effects`]).

pub mod condition;
pub mod effect;

pub use condition::*;
pub use effect::*;

use std::collections::HashMap;

use log::{info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use variantly::Variantly;

use crate::npc::Npc;
use crate::object::GameObject;

pub const CONDITION_NOT_MET: &str = "A condição para executar esta ação não foi satisfeita.";
pub const INACTIVE_DEFAULT: &str = "Ação inativa.";
pub const ACTIVE_DEFAULT: &str = "Nada acontece.";
pub const WRONG_PLACE: &str = "Não devo usar isso aqui.";

/// Behavior variants. `Bait` behaves like `Generic` with its own flavor text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Variantly)]
pub enum ActionKind {
    Generic,
    /// Hunt the named NPC.
    Rifle { npc: String },
    /// Reload a carried weapon (matched by name) to `refill` rounds.
    Ammo { weapon: String, refill: u32 },
    Bait,
}

/// An action bound to a `GameObject`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectAction {
    pub kind: ActionKind,
    pub active: bool,
    pub active_text: Option<String>,
    pub inactive_text: Option<String>,
    pub repeatable: bool,
    /// Remaining uses (rounds, for a rifle). Only meaningful when `repeatable`.
    pub uses: u32,
    pub condition: Option<ObjectCondition>,
}

/// Read-only view of the world an action runs against.
pub struct ActionContext<'a> {
    pub location: &'a str,
    pub inventory: &'a [GameObject],
    pub npcs: &'a HashMap<String, Npc>,
}

/// What happened when an action was executed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionOutcome {
    pub lines: Vec<String>,
    /// The action's behavior actually ran (as opposed to a refusal or an inactive message).
    pub fired: bool,
    pub effects: Vec<ActionEffect>,
}

impl ActionOutcome {
    fn refused(line: impl Into<String>) -> Self {
        Self {
            lines: vec![line.into()],
            ..Self::default()
        }
    }

    fn fired(lines: Vec<String>) -> Self {
        Self {
            lines,
            fired: true,
            effects: Vec::new(),
        }
    }

    #[must_use]
    fn with_effect(mut self, effect: ActionEffect) -> Self {
        self.effects.push(effect);
        self
    }
}

impl ObjectAction {
    /// A new active, non-repeatable action with no texts and no condition.
    pub fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            active: true,
            active_text: None,
            inactive_text: None,
            repeatable: false,
            uses: 0,
            condition: None,
        }
    }

    #[must_use]
    pub fn with_texts(mut self, active: impl Into<String>, inactive: impl Into<String>) -> Self {
        self.active_text = Some(active.into());
        self.inactive_text = Some(inactive.into());
        self
    }

    #[must_use]
    pub fn repeatable(mut self, uses: u32) -> Self {
        self.repeatable = true;
        self.uses = uses;
        self
    }

    #[must_use]
    pub fn with_condition(mut self, condition: ObjectCondition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    fn active_line(&self) -> String {
        self.active_text.clone().unwrap_or_else(|| ACTIVE_DEFAULT.to_string())
    }

    fn inactive_line(&self) -> String {
        self.inactive_text.clone().unwrap_or_else(|| INACTIVE_DEFAULT.to_string())
    }

    /// Execute this action. Refusals come back as a single message with `fired == false` and
    /// leave the action untouched (apart from the condition's cached result).
    pub fn execute<R: Rng + ?Sized>(&mut self, ctx: &ActionContext<'_>, rng: &mut R) -> ActionOutcome {
        if let Some(condition) = self.condition.as_mut()
            && !condition.evaluate(ctx.location, ctx.inventory)
        {
            info!("action refused: condition not met at \"{}\"", ctx.location);
            return ActionOutcome::refused(CONDITION_NOT_MET);
        }
        if !self.active {
            return ActionOutcome::refused(self.inactive_line());
        }
        match self.kind.clone() {
            ActionKind::Generic | ActionKind::Bait => self.run_generic(),
            ActionKind::Rifle { npc } => self.fire_at(&npc, ctx, rng),
            ActionKind::Ammo { weapon, refill } => self.reload(&weapon, refill, ctx),
        }
    }

    fn run_generic(&mut self) -> ActionOutcome {
        if self.repeatable {
            if self.uses == 0 {
                return ActionOutcome::refused(self.inactive_line());
            }
            self.uses -= 1;
        }
        ActionOutcome::fired(vec![self.active_line()])
    }

    fn fire_at<R: Rng + ?Sized>(&mut self, npc_name: &str, ctx: &ActionContext<'_>, rng: &mut R) -> ActionOutcome {
        let Some(npc) = ctx.npcs.get(npc_name) else {
            warn!("rifle action targets unknown npc \"{npc_name}\"");
            return ActionOutcome::refused(WRONG_PLACE);
        };
        if npc.home != ctx.location {
            return ActionOutcome::refused(WRONG_PLACE);
        }
        if !npc.alive {
            return ActionOutcome::refused(format!("O {} já está morto.", npc.name));
        }
        if self.repeatable {
            if self.uses == 0 {
                return ActionOutcome::refused(self.inactive_line());
            }
            self.uses -= 1;
        }

        if npc.roll_kill(rng) {
            info!("shot at \"{}\": killed ({} rounds left)", npc.name, self.uses);
            ActionOutcome::fired(vec![
                "Você mirou e atirou!".to_string(),
                format!("O {} foi morto.", npc.name),
                npc.trophy_hint(),
            ])
            .with_effect(ActionEffect::KillNpc(npc.name.clone()))
            .with_effect(ActionEffect::SpawnObject {
                name: npc.trophy.name.clone(),
                description: npc.trophy.description.clone(),
                storable: true,
            })
        } else {
            info!("shot at \"{}\": missed ({} rounds left)", npc.name, self.uses);
            ActionOutcome::fired(vec![format!("Você mirou e atirou, mas o {} escapou!", npc.name)])
        }
    }

    fn reload(&mut self, weapon: &str, refill: u32, ctx: &ActionContext<'_>) -> ActionOutcome {
        if self.repeatable && self.uses == 0 {
            return ActionOutcome::refused(self.inactive_line());
        }
        let Some(target) = ctx.inventory.iter().find(|item| item.matches(weapon)) else {
            return ActionOutcome::refused(format!("Preciso do {weapon} para usar isso."));
        };
        if self.repeatable {
            self.uses -= 1;
        }
        info!("reloading \"{}\" to {refill}", target.name);
        ActionOutcome::fired(vec![format!(
            "{} recarregado com {} balas.",
            capitalize(weapon),
            count_in_words(refill)
        )])
        .with_effect(ActionEffect::RefillAction {
            target: target.id,
            uses: refill,
        })
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Portuguese number words for small counts, digits otherwise.
fn count_in_words(n: u32) -> String {
    const WORDS: [&str; 11] = [
        "zero", "uma", "duas", "três", "quatro", "cinco", "seis", "sete", "oito", "nove", "dez",
    ];
    WORDS
        .get(n as usize)
        .map_or_else(|| n.to_string(), |w| (*w).to_string())
}
