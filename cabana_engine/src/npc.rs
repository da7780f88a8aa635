//! NPC Module
//!
//! Huntable NPCs. An NPC never appears as an object in a scenario; it lives in its home scenario
//! and is only affected by the rifle action and by the player picking up its trophy.

use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const DEFAULT_KILL_CHANCE: f64 = 0.6;

/// Template for the object left behind when the NPC is killed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trophy {
    pub name: String,
    pub description: String,
    pub hint: Option<String>,
}

/// A huntable, non-playable character.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Npc {
    pub name: String,
    /// Name of the scenario where the NPC can be hunted.
    pub home: String,
    pub alive: bool,
    pub trophy_collected: bool,
    pub kill_chance: f64,
    pub trophy: Trophy,
}

impl Npc {
    pub fn new(name: impl Into<String>, home: impl Into<String>, trophy: Trophy) -> Self {
        Self {
            name: name.into(),
            home: home.into(),
            alive: true,
            trophy_collected: false,
            kill_chance: DEFAULT_KILL_CHANCE,
            trophy,
        }
    }

    #[must_use]
    pub fn with_kill_chance(mut self, chance: f64) -> Self {
        self.kill_chance = chance;
        self
    }

    /// Roll one shot against this NPC. Never succeeds against a dead NPC.
    pub fn roll_kill<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        if !self.alive {
            return false;
        }
        let chance = if self.kill_chance.is_finite() {
            self.kill_chance.clamp(0.0, 1.0)
        } else {
            0.0
        };
        rng.random_bool(chance)
    }

    pub fn kill(&mut self) {
        self.alive = false;
        info!("npc \"{}\" killed", self.name);
    }

    pub fn collect_trophy(&mut self) {
        if !self.trophy_collected {
            self.trophy_collected = true;
            info!("trophy \"{}\" collected from npc \"{}\"", self.trophy.name, self.name);
        }
    }

    /// Line shown after a successful kill.
    pub fn trophy_hint(&self) -> String {
        self.trophy
            .hint
            .clone()
            .unwrap_or_else(|| format!("(Devo coletar \"{}\".)", self.trophy.name))
    }
}
