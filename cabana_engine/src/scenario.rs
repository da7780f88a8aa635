//! Scenario definitions and world-graph edges.
//!
//! Any location the player can stand in is a "Scenario", whether it's a forest or the inside of a
//! cabin. Scenarios are keyed by their unique name.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::object::{GameObject, ObjectHolder};

/// Cardinal directions recognized by the move command.
pub const CARDINALS: [&str; 4] = ["norte", "sul", "leste", "oeste"];

/// Returns true if `token` is one of the cardinal directions.
pub fn is_cardinal(token: &str) -> bool {
    CARDINALS.contains(&token)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
/// A one-way edge from one scenario to another.
///
/// An exit may be gated by an object in the source scenario, which must be open to pass.
pub struct Exit {
    pub to: String,
    pub gate: Option<String>,
}
impl Exit {
    /// Create an ungated exit leading to the named scenario.
    pub fn new(to: impl Into<String>) -> Self {
        Self { to: to.into(), gate: None }
    }

    /// Create an exit that can only be used while the named object is open.
    pub fn gated(to: impl Into<String>, gate: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            gate: Some(gate.into()),
        }
    }
}

/// A location node in the world graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: String,
    pub exits: HashMap<String, Exit>,
    pub objects: Vec<GameObject>,
}

impl ObjectHolder for Scenario {
    fn objects(&self) -> &[GameObject] {
        &self.objects
    }

    fn objects_mut(&mut self) -> &mut Vec<GameObject> {
        &mut self.objects
    }
}

impl Scenario {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            exits: HashMap::new(),
            objects: Vec::new(),
        }
    }

    /// Register a one-way exit keyed by a direction or object name. Last write wins.
    pub fn add_exit(&mut self, token: impl Into<String>, exit: Exit) {
        self.exits.insert(token.into(), exit);
    }

    pub fn exit(&self, token: &str) -> Option<&Exit> {
        self.exits.get(token)
    }

    /// Base description plus a listing of the objects present right now.
    pub fn describe(&self) -> String {
        let mut text = self.description.clone();
        if !self.objects.is_empty() {
            text.push_str("\nItens neste cenário:");
            for object in &self.objects {
                text.push_str("\n- ");
                text.push_str(&object.name);
            }
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::idgen::ObjectId;

    fn cabin_front() -> Scenario {
        let mut scenario = Scenario::new("Exterior da Cabana", "Você está em frente à cabana.");
        scenario.add_object(GameObject::new(ObjectId(1), "pote", "Um pote de planta."));
        scenario.add_object(GameObject::new(ObjectId(2), "chave da cabana", "Uma chave."));
        scenario.add_object(GameObject::new(ObjectId(3), "chave do baú", "Outra chave."));
        scenario
    }

    #[test]
    fn describe_recomputes_object_listing() {
        let mut scenario = cabin_front();
        let before = scenario.describe();
        assert!(before.starts_with("Você está em frente à cabana."));
        assert!(before.contains("Itens neste cenário:\n- pote"));

        scenario.remove_object(ObjectId(1));
        assert!(!scenario.describe().contains("- pote"));

        scenario.objects.clear();
        assert_eq!(scenario.describe(), "Você está em frente à cabana.");
    }

    #[test]
    fn lookup_is_case_insensitive_substring_first_match() {
        let scenario = cabin_front();
        assert_eq!(scenario.find_object("chave").unwrap().id, ObjectId(2));
        assert_eq!(scenario.find_object("CHAVE DO").unwrap().id, ObjectId(3));
        assert_eq!(scenario.find_object("Pote").unwrap().id, ObjectId(1));
        assert!(scenario.find_object("rifle").is_none());
    }

    #[test]
    fn remove_by_name_takes_only_first_match() {
        let mut scenario = cabin_front();
        let removed = scenario.remove_object_by_name("chave").unwrap();
        assert_eq!(removed.id, ObjectId(2));
        assert!(scenario.contains_object(ObjectId(3)));
    }

    #[test]
    fn exits_are_last_write_wins() {
        let mut scenario = Scenario::new("Floresta", "Uma floresta.");
        scenario.add_exit("norte", Exit::new("Exterior da Cabana"));
        scenario.add_exit("norte", Exit::new("Lago"));
        assert_eq!(scenario.exit("norte"), Some(&Exit::new("Lago")));
        assert!(scenario.exit("sul").is_none());
    }

    #[test]
    fn cardinals_are_exact_matches() {
        assert!(is_cardinal("norte"));
        assert!(!is_cardinal("Norte"));
        assert!(!is_cardinal("porta"));
    }
}
