//! WorldDef loader and conversion helpers.
//!
//! Converts the serialized `WorldDef` data model into runtime engine structs. Definitions refer
//! to each other by string id; at runtime scenarios and NPCs are keyed by name and objects by
//! `ObjectId`, so every reference is translated here.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use log::info;

use cabana_data::{ActionDef, ActionKindDef, ConditionDef, LocationDef, NpcDef, ObjectDef, WorldDef};

use crate::action::{ActionKind, ObjectAction, ObjectCondition};
use crate::ambient::AmbientHint;
use crate::idgen::ObjectId;
use crate::npc::{Npc, Trophy};
use crate::object::{GameObject, ObjectHolder};
use crate::scenario::{Exit, Scenario};
use crate::slug::sanitize_slug;
use crate::world::{CabanaWorld, DropHook};

/// Load a `WorldDef` from a RON file.
///
/// # Errors
/// - if the file can't be read or isn't a valid `WorldDef`
pub fn load_worlddef(path: &Path) -> Result<WorldDef> {
    let text = fs::read_to_string(path).with_context(|| format!("reading worlddef from '{}'", path.display()))?;
    ron::from_str(&text).with_context(|| format!("parsing worlddef RON from '{}'", path.display()))
}

/// Id-to-runtime lookup tables built while converting a `WorldDef`.
struct Symbols<'a> {
    scenarios: HashMap<&'a str, &'a str>,
    npcs: HashMap<&'a str, &'a str>,
    objects: HashMap<&'a str, ObjectId>,
}

impl<'a> Symbols<'a> {
    fn scenario(&self, id: &str) -> Result<String> {
        self.scenarios
            .get(id)
            .map(|name| (*name).to_string())
            .ok_or_else(|| anyhow!("unknown scenario id '{id}'"))
    }

    fn npc(&self, id: &str) -> Result<String> {
        self.npcs
            .get(id)
            .map(|name| (*name).to_string())
            .ok_or_else(|| anyhow!("unknown npc id '{id}'"))
    }

    fn object(&self, id: &str) -> Result<ObjectId> {
        self.objects
            .get(id)
            .copied()
            .ok_or_else(|| anyhow!("unknown object id '{id}'"))
    }

    fn object_name(&self, def: &'a WorldDef, id: &str) -> Result<String> {
        def.objects
            .iter()
            .find(|o| o.id == id)
            .map(|o| o.name.clone())
            .ok_or_else(|| anyhow!("unknown object id '{id}'"))
    }
}

/// Convert a `WorldDef` into a populated `CabanaWorld` with the player at the start scenario.
///
/// # Errors
/// - on any dangling reference, or an object that can't be placed
pub fn build_world_from_def(def: &WorldDef) -> Result<CabanaWorld> {
    let mut world = CabanaWorld::new_empty();
    world.title.clone_from(&def.game.title);
    world.slug = if def.game.slug.trim().is_empty() {
        sanitize_slug(&def.game.title)
    } else {
        sanitize_slug(&def.game.slug)
    };
    world.intro.clone_from(&def.game.intro);

    let mut symbols = Symbols {
        scenarios: def.scenarios.iter().map(|s| (s.id.as_str(), s.name.as_str())).collect(),
        npcs: def.npcs.iter().map(|n| (n.id.as_str(), n.name.as_str())).collect(),
        objects: HashMap::new(),
    };
    for object in &def.objects {
        symbols.objects.insert(object.id.as_str(), world.ids.allocate());
    }

    for scenario in &def.scenarios {
        world.register_scenario(Scenario::new(&scenario.name, &scenario.desc));
    }
    for scenario in &def.scenarios {
        for exit in &scenario.exits {
            let to = symbols.scenario(&exit.to)?;
            let exit_value = match &exit.gate {
                Some(gate) => Exit::gated(to, symbols.object_name(def, gate)?),
                None => Exit::new(to),
            };
            world
                .add_exit(&scenario.name, exit.token.clone(), exit_value)
                .with_context(|| format!("scenario '{}' exit '{}'", scenario.id, exit.token))?;
        }
    }

    for npc_def in &def.npcs {
        world.register_npc(npc_from_def(npc_def, &symbols)?);
    }

    place_objects(&mut world, def, &symbols)?;

    let start = symbols.scenario(&def.game.start).context("game start scenario")?;
    world.set_current_scenario(&start)?;

    for hook in &def.drop_hooks {
        world.drop_hooks.push(DropHook {
            item: hook.item.clone(),
            scenario: symbols.scenario(&hook.scenario)?,
            message: hook.message.clone(),
        });
    }
    for hint in &def.hints {
        world.hints.push(AmbientHint {
            npc: symbols.npc(&hint.npc)?,
            scenario: symbols.scenario(&hint.scenario)?,
            item: hint.item.clone(),
            message: hint.message.clone(),
        });
    }

    Ok(world)
}

fn npc_from_def(def: &NpcDef, symbols: &Symbols<'_>) -> Result<Npc> {
    let trophy = Trophy {
        name: def.trophy.name.clone(),
        description: def.trophy.desc.clone(),
        hint: def.trophy.hint.clone(),
    };
    let home = symbols.scenario(&def.home).with_context(|| format!("npc '{}' home", def.id))?;
    Ok(Npc::new(&def.name, home, trophy).with_kill_chance(def.kill_chance))
}

/// Build every object and move it to its starting place. Contained objects are built into their
/// container before the container itself is placed.
fn place_objects(world: &mut CabanaWorld, def: &WorldDef, symbols: &Symbols<'_>) -> Result<()> {
    let mut children: HashMap<&str, Vec<&ObjectDef>> = HashMap::new();
    for object in &def.objects {
        if let LocationDef::Object(parent) = &object.location {
            children.entry(parent.as_str()).or_default().push(object);
        }
    }

    let mut placed = 0;
    for object in &def.objects {
        match &object.location {
            LocationDef::Scenario(scenario_id) => {
                let built = build_tree(object, &children, symbols, &mut placed)?;
                let name = symbols.scenario(scenario_id)?;
                world
                    .scenarios
                    .get_mut(&name)
                    .ok_or_else(|| anyhow!("object '{}' placed in unknown scenario '{name}'", object.id))?
                    .add_object(built);
            },
            LocationDef::Inventory => {
                let built = build_tree(object, &children, symbols, &mut placed)?;
                world.player.add_object(built);
            },
            LocationDef::Object(_) => {},
        }
    }

    if placed != def.objects.len() {
        bail!(
            "{} object(s) are never reachable from a scenario or the inventory (containment cycle?)",
            def.objects.len() - placed
        );
    }
    info!("{placed} objects placed");
    Ok(())
}

fn build_tree(
    def: &ObjectDef,
    children: &HashMap<&str, Vec<&ObjectDef>>,
    symbols: &Symbols<'_>,
    placed: &mut usize,
) -> Result<GameObject> {
    let mut object = object_from_def(def, symbols)?;
    *placed += 1;
    for child in children.get(def.id.as_str()).into_iter().flatten() {
        let built = build_tree(child, children, symbols, placed)?;
        if object.insert(built).is_err() {
            bail!("object '{}' is placed inside '{}', which is not storage", child.id, def.id);
        }
    }
    Ok(object)
}

fn object_from_def(def: &ObjectDef, symbols: &Symbols<'_>) -> Result<GameObject> {
    let id = symbols.object(&def.id)?;
    let mut object = GameObject::new(id, &def.name, &def.desc);
    if def.storable {
        object = object.storable();
    }
    if def.storage {
        object = object.as_storage();
    }
    if def.openable {
        let key = def.key.as_deref().map(|k| symbols.object(k)).transpose()?;
        object = object.with_lock(key, def.open);
    }
    if let Some(action) = &def.action {
        let action = action_from_def(action, symbols).with_context(|| format!("object '{}' action", def.id))?;
        object = object.with_action(action);
    }
    Ok(object)
}

fn action_from_def(def: &ActionDef, symbols: &Symbols<'_>) -> Result<ObjectAction> {
    let kind = match &def.kind {
        ActionKindDef::Generic => ActionKind::Generic,
        ActionKindDef::Bait => ActionKind::Bait,
        ActionKindDef::Rifle { npc } => ActionKind::Rifle { npc: symbols.npc(npc)? },
        ActionKindDef::Ammo { weapon, refill } => ActionKind::Ammo {
            weapon: weapon.clone(),
            refill: *refill,
        },
    };
    let mut action = ObjectAction::new(kind);
    action.active = def.active;
    action.active_text.clone_from(&def.active_text);
    action.inactive_text.clone_from(&def.inactive_text);
    if def.repeatable {
        action = action.repeatable(def.uses);
    }
    if let Some(condition) = &def.condition {
        action = action.with_condition(condition_from_def(condition, symbols)?);
    }
    Ok(action)
}

fn condition_from_def(def: &ConditionDef, symbols: &Symbols<'_>) -> Result<ObjectCondition> {
    Ok(ObjectCondition {
        location: def.location.as_deref().map(|id| symbols.scenario(id)).transpose()?,
        required_items: def
            .required_items
            .iter()
            .map(|id| symbols.object(id))
            .collect::<Result<Vec<_>>>()?,
        required_name: def.required_name.clone(),
        satisfied: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cabana_data::{ExitDef, GameDef, ScenarioDef, TrophyDef};

    fn scenario(id: &str, name: &str) -> ScenarioDef {
        ScenarioDef {
            id: id.into(),
            name: name.into(),
            desc: format!("{name}."),
            exits: Vec::new(),
        }
    }

    fn object(id: &str, name: &str, location: LocationDef) -> ObjectDef {
        ObjectDef {
            id: id.into(),
            name: name.into(),
            desc: String::new(),
            location,
            storable: false,
            storage: false,
            openable: false,
            open: false,
            key: None,
            action: None,
        }
    }

    fn cabin_def() -> WorldDef {
        let mut front = scenario("front", "Exterior da Cabana");
        front.exits.push(ExitDef {
            token: "porta".into(),
            to: "inside".into(),
            gate: Some("door".into()),
        });
        let mut forest = scenario("forest", "Floresta");
        forest.exits.push(ExitDef {
            token: "norte".into(),
            to: "front".into(),
            gate: None,
        });

        let mut pot = object("pot", "pote", LocationDef::Scenario("front".into()));
        pot.storage = true;
        let mut key = object("key", "chave da cabana", LocationDef::Object("pot".into()));
        key.storable = true;
        let mut door = object("door", "porta", LocationDef::Scenario("front".into()));
        door.openable = true;
        door.key = Some("key".into());
        let mut rifle = object("rifle", "rifle de caça", LocationDef::Inventory);
        rifle.action = Some(ActionDef {
            kind: ActionKindDef::Rifle { npc: "stag".into() },
            active: true,
            active_text: None,
            inactive_text: Some("A munição acabou.".into()),
            repeatable: true,
            uses: 0,
            condition: Some(ConditionDef {
                location: Some("forest".into()),
                ..ConditionDef::default()
            }),
        });

        WorldDef {
            game: GameDef {
                title: "Caçador".into(),
                start: "forest".into(),
                ..GameDef::default()
            },
            scenarios: vec![forest, front, scenario("inside", "Interior da Cabana")],
            objects: vec![key, pot, door, rifle],
            npcs: vec![NpcDef {
                id: "stag".into(),
                name: "veado".into(),
                home: "forest".into(),
                kill_chance: 0.6,
                trophy: TrophyDef {
                    name: "chifres do veado".into(),
                    desc: "Troféu.".into(),
                    hint: None,
                },
            }],
            ..WorldDef::default()
        }
    }

    #[test]
    fn references_become_names_and_ids() {
        let world = build_world_from_def(&cabin_def()).unwrap();
        assert_eq!(world.player.location, "Floresta");
        assert_eq!(world.slug, "cacador");

        let front = &world.scenarios["Exterior da Cabana"];
        let exit = front.exit("porta").unwrap();
        assert_eq!(exit.to, "Interior da Cabana");
        assert_eq!(exit.gate.as_deref(), Some("porta"));

        let pot = front.find_object("pote").unwrap();
        let key = &pot.contents.as_ref().unwrap()[0];
        assert_eq!(key.name, "chave da cabana");
        assert_eq!(front.find_object("porta").unwrap().key, Some(key.id));

        let rifle = world.player.find_object("rifle").unwrap();
        let action = rifle.action.as_ref().unwrap();
        assert_eq!(action.kind, ActionKind::Rifle { npc: "veado".into() });
        assert_eq!(action.condition.as_ref().unwrap().location.as_deref(), Some("Floresta"));
        assert!(world.npcs["veado"].alive);
        assert_eq!(world.npcs["veado"].home, "Floresta");
    }

    #[test]
    fn ids_are_unique_and_allocator_advances() {
        let world = build_world_from_def(&cabin_def()).unwrap();
        assert_eq!(world.ids.peek(), ObjectId(5));
    }

    #[test]
    fn containment_cycles_are_rejected() {
        let mut def = cabin_def();
        let mut a = object("a", "caixa a", LocationDef::Object("b".into()));
        a.storage = true;
        let mut b = object("b", "caixa b", LocationDef::Object("a".into()));
        b.storage = true;
        def.objects.push(a);
        def.objects.push(b);
        let err = build_world_from_def(&def).unwrap_err();
        assert!(err.to_string().contains("never reachable"));
    }
}
