use serde::{Deserialize, Serialize};

/// Stable identifier used across `WorldDef` references.
pub type Id = String;

/// Top-level world data loaded by the engine.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WorldDef {
    pub game: GameDef,
    #[serde(default)]
    pub scenarios: Vec<ScenarioDef>,
    #[serde(default)]
    pub objects: Vec<ObjectDef>,
    #[serde(default)]
    pub npcs: Vec<NpcDef>,
    #[serde(default)]
    pub drop_hooks: Vec<DropHookDef>,
    #[serde(default)]
    pub hints: Vec<HintDef>,
}

/// Game-level metadata and startup configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GameDef {
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub intro: Vec<String>,
    pub start: Id,
}

/// A location node of the world graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioDef {
    pub id: Id,
    /// Display name; must be unique across the world since the engine keys scenarios by name.
    pub name: String,
    pub desc: String,
    #[serde(default)]
    pub exits: Vec<ExitDef>,
}

/// A one-way edge out of a scenario.
///
/// `token` is either a cardinal direction or the name of the object the exit passes through.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExitDef {
    pub token: String,
    pub to: Id,
    /// Object (by id) that must be open for the exit to be traversable.
    #[serde(default)]
    pub gate: Option<Id>,
}

/// Where an object starts the game.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum LocationDef {
    Scenario(Id),
    Object(Id),
    Inventory,
}

/// An interactable object: item, container, or fixture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectDef {
    pub id: Id,
    pub name: String,
    pub desc: String,
    pub location: LocationDef,
    #[serde(default)]
    pub storable: bool,
    #[serde(default)]
    pub storage: bool,
    #[serde(default)]
    pub openable: bool,
    #[serde(default)]
    pub open: bool,
    /// Object (by id) that unlocks this one.
    #[serde(default)]
    pub key: Option<Id>,
    #[serde(default)]
    pub action: Option<ActionDef>,
}

/// Scripted behavior bound to an object and fired by "use".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionDef {
    pub kind: ActionKindDef,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub active_text: Option<String>,
    #[serde(default)]
    pub inactive_text: Option<String>,
    #[serde(default)]
    pub repeatable: bool,
    #[serde(default)]
    pub uses: u32,
    #[serde(default)]
    pub condition: Option<ConditionDef>,
}

/// Behavior variants an action may take.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ActionKindDef {
    Generic,
    Rifle { npc: Id },
    Ammo { weapon: String, refill: u32 },
    Bait,
}

/// Precondition gating an action.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConditionDef {
    #[serde(default)]
    pub location: Option<Id>,
    #[serde(default)]
    pub required_items: Vec<Id>,
    #[serde(default)]
    pub required_name: Option<String>,
}

/// A huntable NPC.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NpcDef {
    pub id: Id,
    pub name: String,
    pub home: Id,
    #[serde(default = "default_kill_chance")]
    pub kill_chance: f64,
    pub trophy: TrophyDef,
}

/// The object left behind when a huntable NPC is killed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrophyDef {
    pub name: String,
    pub desc: String,
    /// Line shown after the kill, nudging the player to pick the trophy up.
    #[serde(default)]
    pub hint: Option<String>,
}

/// Win condition fired when an item matching `item` is dropped in `scenario`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropHookDef {
    pub item: String,
    pub scenario: Id,
    pub message: String,
}

/// Ambient hint shown while `npc` lives, the player is in `scenario` and carries `item`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HintDef {
    pub npc: Id,
    pub scenario: Id,
    pub item: String,
    pub message: String,
}

fn default_true() -> bool {
    true
}

fn default_kill_chance() -> f64 {
    0.6
}
