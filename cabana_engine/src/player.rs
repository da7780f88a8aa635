//! Player -- module for the player in Cabana
use crate::object::{GameObject, ObjectHolder};

use log::info;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Player {
    /// Name of the scenario the player is in.
    pub location: String,
    pub inventory: Vec<GameObject>,
    /// Previously visited scenarios, most recent last.
    pub history: Vec<String>,
}

impl Player {
    /// Place the player somewhere without recording history (game start, reload).
    pub fn set_start(&mut self, scenario: impl Into<String>) {
        self.location = scenario.into();
        self.history.clear();
    }

    /// Move to a new scenario, pushing the current one onto the history stack.
    pub fn move_to(&mut self, scenario: impl Into<String>) {
        let scenario = scenario.into();
        let previous = std::mem::replace(&mut self.location, scenario);
        if !previous.is_empty() {
            self.history.push(previous);
        }
        info!("player moved to \"{}\"", self.location);
    }

    /// Return to the most recently visited scenario. Returns its name, or `None` if there's nowhere
    /// to go back to. Going back does not push onto the history.
    pub fn go_back(&mut self) -> Option<&str> {
        let previous = self.history.pop()?;
        self.location = previous;
        info!("player went back to \"{}\"", self.location);
        Some(&self.location)
    }

    pub fn has_previous(&self) -> bool {
        !self.history.is_empty()
    }

    /// Names of the items carried, in pickup order.
    pub fn inventory_names(&self) -> Vec<String> {
        self.inventory.iter().map(|o| o.name.clone()).collect()
    }
}

impl ObjectHolder for Player {
    fn objects(&self) -> &[GameObject] {
        &self.inventory
    }

    fn objects_mut(&mut self) -> &mut Vec<GameObject> {
        &mut self.inventory
    }
}
