use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::*;

/// Validation error for malformed or missing references in a `WorldDef`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    DuplicateId { kind: &'static str, id: String },
    DuplicateName { kind: &'static str, name: String },
    MissingReference { kind: &'static str, id: String, context: String },
    InvalidValue { context: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicateId { kind, id } => {
                write!(f, "duplicate {kind} id '{id}'")
            },
            ValidationError::DuplicateName { kind, name } => {
                write!(f, "duplicate {kind} name '{name}'")
            },
            ValidationError::MissingReference { kind, id, context } => {
                write!(f, "missing {kind} '{id}' ({context})")
            },
            ValidationError::InvalidValue { context } => {
                write!(f, "invalid value ({context})")
            },
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate cross-references and basic invariants in a `WorldDef`.
///
/// ```
/// use cabana_data::{GameDef, ScenarioDef, WorldDef, validate_world};
///
/// let world = WorldDef {
///     game: GameDef {
///         title: "Demo".into(),
///         start: "forest".into(),
///         ..GameDef::default()
///     },
///     scenarios: vec![ScenarioDef {
///         id: "forest".into(),
///         name: "Floresta".into(),
///         desc: "Uma floresta.".into(),
///         exits: Vec::new(),
///     }],
///     ..WorldDef::default()
/// };
/// assert!(validate_world(&world).is_empty());
/// ```
pub fn validate_world(world: &WorldDef) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let mut scenarios = HashSet::new();
    let mut objects = HashSet::new();
    let mut npcs = HashSet::new();

    track_ids(
        "scenario",
        world.scenarios.iter().map(|s| s.id.as_str()),
        &mut scenarios,
        &mut errors,
    );
    track_ids(
        "object",
        world.objects.iter().map(|o| o.id.as_str()),
        &mut objects,
        &mut errors,
    );
    track_ids("npc", world.npcs.iter().map(|n| n.id.as_str()), &mut npcs, &mut errors);

    // the engine keys scenarios by display name, so names must be unique too
    let mut names = HashSet::new();
    for scenario in &world.scenarios {
        if !names.insert(scenario.name.as_str()) {
            errors.push(ValidationError::DuplicateName {
                kind: "scenario",
                name: scenario.name.clone(),
            });
        }
    }

    if world.game.start.trim().is_empty() {
        errors.push(ValidationError::InvalidValue {
            context: "game start scenario missing".to_string(),
        });
    } else {
        check_ref(
            "scenario",
            &world.game.start,
            &scenarios,
            "game start scenario".to_string(),
            &mut errors,
        );
    }

    for scenario in &world.scenarios {
        for exit in &scenario.exits {
            let context = format!("scenario '{}' exit '{}'", scenario.id, exit.token);
            check_ref("scenario", &exit.to, &scenarios, context.clone(), &mut errors);
            if let Some(gate) = &exit.gate {
                check_ref("object", gate, &objects, context, &mut errors);
            }
        }
    }

    let storage: HashMap<&str, bool> = world.objects.iter().map(|o| (o.id.as_str(), o.storage)).collect();
    for object in &world.objects {
        let context = format!("object '{}'", object.id);
        match &object.location {
            LocationDef::Scenario(id) => check_ref("scenario", id, &scenarios, context.clone(), &mut errors),
            LocationDef::Object(id) => {
                check_ref("object", id, &objects, context.clone(), &mut errors);
                if id == &object.id {
                    errors.push(ValidationError::InvalidValue {
                        context: format!("{context} is placed inside itself"),
                    });
                } else if storage.get(id.as_str()) == Some(&false) {
                    errors.push(ValidationError::InvalidValue {
                        context: format!("{context} is placed inside '{id}', which is not storage"),
                    });
                }
            },
            LocationDef::Inventory => {},
        }
        if let Some(key) = &object.key {
            check_ref("object", key, &objects, format!("{context} key"), &mut errors);
            if !object.openable {
                errors.push(ValidationError::InvalidValue {
                    context: format!("{context} has a key but is not openable"),
                });
            }
        }
        if let Some(action) = &object.action {
            validate_action(action, &context, &scenarios, &objects, &npcs, &mut errors);
        }
    }

    for npc in &world.npcs {
        let context = format!("npc '{}'", npc.id);
        check_ref("scenario", &npc.home, &scenarios, context.clone(), &mut errors);
        if !(0.0..=1.0).contains(&npc.kill_chance) {
            errors.push(ValidationError::InvalidValue {
                context: format!("{context} kill chance out of range ({})", npc.kill_chance),
            });
        }
    }

    for hook in &world.drop_hooks {
        check_ref(
            "scenario",
            &hook.scenario,
            &scenarios,
            format!("drop hook for '{}'", hook.item),
            &mut errors,
        );
    }

    for hint in &world.hints {
        let context = format!("hint '{}'", hint.message);
        check_ref("npc", &hint.npc, &npcs, context.clone(), &mut errors);
        check_ref("scenario", &hint.scenario, &scenarios, context, &mut errors);
    }

    errors
}

fn validate_action(
    action: &ActionDef,
    context: &str,
    scenarios: &HashSet<String>,
    objects: &HashSet<String>,
    npcs: &HashSet<String>,
    errors: &mut Vec<ValidationError>,
) {
    match &action.kind {
        ActionKindDef::Rifle { npc } => {
            check_ref("npc", npc, npcs, format!("{context} rifle action"), errors);
        },
        ActionKindDef::Ammo { weapon, .. } if weapon.trim().is_empty() => {
            errors.push(ValidationError::InvalidValue {
                context: format!("{context} ammo action names no weapon"),
            });
        },
        _ => {},
    }
    if let Some(condition) = &action.condition {
        if let Some(location) = &condition.location {
            check_ref("scenario", location, scenarios, format!("{context} condition"), errors);
        }
        for item in &condition.required_items {
            check_ref("object", item, objects, format!("{context} condition"), errors);
        }
    }
}

fn track_ids<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
    set: &mut HashSet<String>,
    errors: &mut Vec<ValidationError>,
) {
    for id in ids {
        if !set.insert(id.to_string()) {
            errors.push(ValidationError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
}

fn check_ref(kind: &'static str, id: &str, set: &HashSet<String>, context: String, errors: &mut Vec<ValidationError>) {
    if !set.contains(id) {
        errors.push(ValidationError::MissingReference {
            kind,
            id: id.to_string(),
            context,
        });
    }
}
