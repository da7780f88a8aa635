//! Entity Search Module
//!
//! Handlers need to turn a word typed by the player into an object nearby. Which objects are
//! eligible depends on the verb: "pegar" only looks at the scenario, "largar" only at the
//! inventory, "usar" at both (scenario first). Failures carry the message shown to the player.

use thiserror::Error;

use crate::helpers::shout;
use crate::idgen::ObjectId;
use crate::object::ObjectHolder;
use crate::world::{CabanaWorld, Holder};

/// Represents the scope of a requested search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    /// Objects in the player's current scenario.
    Scenario,
    /// Only items in inventory.
    Inventory,
    /// Scenario first, then inventory.
    Nearby,
}

/// Possible reasons for a failed search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Não entendo \"{}\".", shout(.0))]
    NotInScenario(String),
    #[error("Você não tem \"{}\".", shout(.0))]
    NotInInventory(String),
    #[error("Parece não haver \"{}\" ao redor.", shout(.0))]
    NotNearby(String),
    #[error("unknown error: {0}")]
    Unknown(#[from] anyhow::Error),
}

/// Find an object with name matching `pattern` in the given `SearchScope`.
///
/// # Errors
/// - no object in scope matches, or the player's scenario is missing
pub fn find_object_match(
    world: &CabanaWorld,
    pattern: &str,
    scope: SearchScope,
) -> Result<(Holder, ObjectId), SearchError> {
    match scope {
        SearchScope::Scenario => world
            .player_scenario()?
            .find_object(pattern)
            .map(|o| (Holder::Scenario, o.id))
            .ok_or_else(|| SearchError::NotInScenario(pattern.to_string())),
        SearchScope::Inventory => world
            .player
            .find_object(pattern)
            .map(|o| (Holder::Inventory, o.id))
            .ok_or_else(|| SearchError::NotInInventory(pattern.to_string())),
        SearchScope::Nearby => world
            .locate_nearby(pattern)?
            .ok_or_else(|| SearchError::NotNearby(pattern.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::GameObject;
    use crate::scenario::Scenario;

    fn world() -> CabanaWorld {
        let mut world = CabanaWorld::new_empty();
        world.register_scenario(Scenario::new("Interior da Cabana", "Dentro."));
        world.set_current_scenario("Interior da Cabana").unwrap();
        world.add_object("Interior da Cabana", "lareira", "", |o| o).unwrap();
        let id = world.ids.allocate();
        world.player.add_object(GameObject::new(id, "rifle de caça", "").storable());
        world
    }

    #[test]
    fn scopes_limit_where_we_look() {
        let world = world();
        assert!(matches!(
            find_object_match(&world, "lareira", SearchScope::Scenario),
            Ok((Holder::Scenario, _))
        ));
        assert!(find_object_match(&world, "rifle", SearchScope::Scenario).is_err());
        assert!(matches!(
            find_object_match(&world, "rifle", SearchScope::Inventory),
            Ok((Holder::Inventory, _))
        ));
        assert!(matches!(
            find_object_match(&world, "rifle", SearchScope::Nearby),
            Ok((Holder::Inventory, _))
        ));
    }

    #[test]
    fn errors_render_player_messages() {
        let world = world();
        let err = find_object_match(&world, "pote", SearchScope::Scenario).unwrap_err();
        assert_eq!(err.to_string(), "Não entendo \"POTE\".");
        let err = find_object_match(&world, "pote", SearchScope::Inventory).unwrap_err();
        assert_eq!(err.to_string(), "Você não tem \"POTE\".");
        let err = find_object_match(&world, "pote", SearchScope::Nearby).unwrap_err();
        assert_eq!(err.to_string(), "Parece não haver \"POTE\" ao redor.");
    }

    #[test]
    fn missing_scenario_is_an_internal_error() {
        let mut world = world();
        world.player.location = "Lugar Nenhum".into();
        assert!(matches!(
            find_object_match(&world, "lareira", SearchScope::Scenario),
            Err(SearchError::Unknown(_))
        ));
    }
}
