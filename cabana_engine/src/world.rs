//! Data structures representing the game world.
//!
//! This module defines [`CabanaWorld`], the complete runtime state of a game: the scenario graph,
//! the huntable NPCs, the player and the world-owned id allocator.

use std::collections::{HashMap, HashSet};

use anyhow::{Context, Result, anyhow, bail};
use log::info;
use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::CABANA_VERSION;
use crate::action::{ActionContext, ActionOutcome, ObjectAction};
use crate::ambient::{AmbientHint, AmbientQuery, AmbientSnapshot};
use crate::idgen::{IdAllocator, ObjectId};
use crate::npc::Npc;
use crate::object::{GameObject, ObjectHolder};
use crate::player::Player;
use crate::scenario::{Exit, Scenario};

/// Win condition: dropping an item whose name contains `item` while in `scenario` ends the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropHook {
    pub item: String,
    pub scenario: String,
    pub message: String,
}
impl DropHook {
    pub fn matches(&self, item_name: &str, scenario: &str) -> bool {
        scenario == self.scenario && item_name.to_lowercase().contains(&self.item.to_lowercase())
    }
}

/// Which collection an object currently lives in, as seen from the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Holder {
    Scenario,
    Inventory,
}

/// Complete state of the running game.
///
/// Created by the loader and then mutated only by the REPL. The RNG is not saved; a reloaded
/// world keeps the generator of the session it is loaded into.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CabanaWorld {
    pub version: String,
    pub title: String,
    pub slug: String,
    pub intro: Vec<String>,
    pub scenarios: HashMap<String, Scenario>,
    pub npcs: HashMap<String, Npc>,
    pub player: Player,
    pub ids: IdAllocator,
    pub drop_hooks: Vec<DropHook>,
    pub hints: Vec<AmbientHint>,
    #[serde(skip, default = "entropy_rng")]
    pub rng: StdRng,
}

fn entropy_rng() -> StdRng {
    StdRng::from_os_rng()
}

impl Default for CabanaWorld {
    fn default() -> Self {
        Self::new_empty()
    }
}

impl CabanaWorld {
    /// Create a new empty world with a default player and an OS-seeded RNG.
    pub fn new_empty() -> CabanaWorld {
        let world = Self {
            version: CABANA_VERSION.to_string(),
            title: String::new(),
            slug: String::new(),
            intro: Vec::new(),
            scenarios: HashMap::new(),
            npcs: HashMap::new(),
            player: Player::default(),
            ids: IdAllocator::new(),
            drop_hooks: Vec::new(),
            hints: Vec::new(),
            rng: entropy_rng(),
        };
        info!("new, empty 'CabanaWorld' created");
        world
    }

    /// Replace the RNG with a deterministic one.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Add a scenario to the graph. A scenario with the same name is replaced.
    pub fn register_scenario(&mut self, scenario: Scenario) {
        info!("registered scenario \"{}\"", scenario.name);
        self.scenarios.insert(scenario.name.clone(), scenario);
    }

    pub fn register_npc(&mut self, npc: Npc) {
        self.npcs.insert(npc.name.clone(), npc);
    }

    /// Add a one-way exit from scenario `from`.
    ///
    /// # Errors
    /// - if either end of the exit isn't a registered scenario
    pub fn add_exit(&mut self, from: &str, token: impl Into<String>, exit: Exit) -> Result<()> {
        if !self.scenarios.contains_key(&exit.to) {
            bail!("exit from \"{from}\" leads to unknown scenario \"{}\"", exit.to);
        }
        self.scenarios
            .get_mut(from)
            .with_context(|| format!("adding exit to unknown scenario \"{from}\""))?
            .add_exit(token, exit);
        Ok(())
    }

    /// Create a new object with a fresh id, let `build` shape it, and place it in `scenario`.
    ///
    /// # Errors
    /// - if `scenario` isn't registered
    pub fn add_object<F>(&mut self, scenario: &str, name: &str, description: &str, build: F) -> Result<ObjectId>
    where
        F: FnOnce(GameObject) -> GameObject,
    {
        if !self.scenarios.contains_key(scenario) {
            bail!("adding object \"{name}\" to unknown scenario \"{scenario}\"");
        }
        let id = self.ids.allocate();
        let object = build(GameObject::new(id, name, description));
        if let Some(target) = self.scenarios.get_mut(scenario) {
            target.add_object(object);
        }
        Ok(id)
    }

    /// Set the player's location without recording history.
    ///
    /// # Errors
    /// - if `name` isn't a registered scenario
    pub fn set_current_scenario(&mut self, name: &str) -> Result<()> {
        if !self.scenarios.contains_key(name) {
            bail!("cannot start in unknown scenario \"{name}\"");
        }
        self.player.set_start(name);
        Ok(())
    }

    /// Get reference to the scenario the player occupies.
    ///
    /// # Errors
    /// - if the player's location doesn't name a registered scenario
    pub fn player_scenario(&self) -> Result<&Scenario> {
        self.scenarios
            .get(&self.player.location)
            .ok_or_else(|| anyhow!("player is in unknown scenario \"{}\"", self.player.location))
    }

    /// Get mutable reference to the scenario the player occupies.
    ///
    /// # Errors
    /// - if the player's location doesn't name a registered scenario
    pub fn player_scenario_mut(&mut self) -> Result<&mut Scenario> {
        let location = &self.player.location;
        self.scenarios
            .get_mut(location)
            .ok_or_else(|| anyhow!("player is in unknown scenario \"{location}\""))
    }

    /// The player's scenario (mutable) alongside the inventory, for lock and key checks.
    ///
    /// # Errors
    /// - if the player's location doesn't name a registered scenario
    pub fn scenario_and_inventory(&mut self) -> Result<(&mut Scenario, &[GameObject])> {
        let Self { scenarios, player, .. } = self;
        let scenario = scenarios
            .get_mut(&player.location)
            .ok_or_else(|| anyhow!("player is in unknown scenario \"{}\"", player.location))?;
        Ok((scenario, &player.inventory))
    }

    /// Find an object the player can reach: scenario first, then inventory.
    ///
    /// # Errors
    /// - if the player's scenario can't be found
    pub fn locate_nearby(&self, pattern: &str) -> Result<Option<(Holder, ObjectId)>> {
        if let Some(object) = self.player_scenario()?.find_object(pattern) {
            return Ok(Some((Holder::Scenario, object.id)));
        }
        Ok(self
            .player
            .find_object(pattern)
            .map(|object| (Holder::Inventory, object.id)))
    }

    /// Mutable access to an object located by [`Self::locate_nearby`].
    ///
    /// # Errors
    /// - if the player's scenario can't be found
    pub fn object_mut(&mut self, holder: Holder, id: ObjectId) -> Result<Option<&mut GameObject>> {
        Ok(match holder {
            Holder::Scenario => self.player_scenario_mut()?.object_by_id_mut(id),
            Holder::Inventory => self.player.object_by_id_mut(id),
        })
    }

    /// Execute an action against the current state, using the world's RNG.
    pub fn run_action(&mut self, action: &mut ObjectAction) -> ActionOutcome {
        let ctx = ActionContext {
            location: &self.player.location,
            inventory: &self.player.inventory,
            npcs: &self.npcs,
        };
        action.execute(&ctx, &mut self.rng)
    }

    /// The NPC whose trophy is named `item_name`, if any.
    pub fn npc_for_trophy_mut(&mut self, item_name: &str) -> Option<&mut Npc> {
        self.npcs.values_mut().find(|npc| npc.trophy.name == item_name)
    }

    /// First drop hook that fires for `item_name` dropped in the current scenario.
    pub fn drop_hook_for(&self, item_name: &str) -> Option<&DropHook> {
        self.drop_hooks
            .iter()
            .find(|hook| hook.matches(item_name, &self.player.location))
    }

    /// Copy what the ambient notifier needs.
    pub fn snapshot(&self) -> AmbientSnapshot {
        AmbientSnapshot {
            location: self.player.location.clone(),
            inventory: self.player.inventory_names(),
            living_npcs: self
                .npcs
                .values()
                .filter(|npc| npc.alive)
                .map(|npc| npc.name.clone())
                .collect::<HashSet<_>>(),
        }
    }
}

impl AmbientQuery for CabanaWorld {
    fn current_location_name(&self) -> &str {
        &self.player.location
    }

    fn has_in_inventory(&self, pattern: &str) -> bool {
        self.player.find_object(pattern).is_some()
    }

    fn is_alive(&self, npc: &str) -> bool {
        self.npcs.get(npc).is_some_and(|n| n.alive)
    }
}
