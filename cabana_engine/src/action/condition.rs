//! condition.rs -- `ObjectCondition` Module
//!
//! A precondition that gates an `ObjectAction`. Every part that is specified must hold.

use serde::{Deserialize, Serialize};

use crate::idgen::ObjectId;
use crate::object::GameObject;

/// Predicate over the player's location and inventory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectCondition {
    /// Scenario the player must be standing in.
    pub location: Option<String>,
    /// The player must carry at least one of these (any-of). Empty means no requirement.
    pub required_items: Vec<ObjectId>,
    /// The player must carry an item whose name contains this text.
    pub required_name: Option<String>,
    /// Result of the most recent evaluation.
    #[serde(default)]
    pub satisfied: bool,
}

impl ObjectCondition {
    pub fn at(location: impl Into<String>) -> Self {
        Self {
            location: Some(location.into()),
            ..Self::default()
        }
    }

    pub fn holding(id: ObjectId) -> Self {
        Self {
            required_items: vec![id],
            ..Self::default()
        }
    }

    pub fn holding_named(pattern: impl Into<String>) -> Self {
        Self {
            required_name: Some(pattern.into()),
            ..Self::default()
        }
    }

    /// Re-evaluate against the current player state, caching and returning the result.
    pub fn evaluate(&mut self, location: &str, inventory: &[GameObject]) -> bool {
        let in_place = self.location.as_deref().is_none_or(|loc| loc == location);
        let has_item = self.required_items.is_empty()
            || inventory.iter().any(|item| self.required_items.contains(&item.id));
        let has_named = self
            .required_name
            .as_deref()
            .is_none_or(|pattern| inventory.iter().any(|item| item.matches(pattern)));
        self.satisfied = in_place && has_item && has_named;
        self.satisfied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rifle() -> GameObject {
        GameObject::new(ObjectId(10), "rifle de caça", "Um rifle.").storable()
    }

    #[test]
    fn empty_condition_is_always_satisfied() {
        let mut cond = ObjectCondition::default();
        assert!(cond.evaluate("Floresta", &[]));
        assert!(cond.satisfied);
    }

    #[test]
    fn location_must_match_exactly() {
        let mut cond = ObjectCondition::at("Floresta");
        assert!(cond.evaluate("Floresta", &[]));
        assert!(!cond.evaluate("Interior da Cabana", &[]));
        assert!(!cond.satisfied);
    }

    #[test]
    fn required_items_are_any_of_by_id() {
        let mut cond = ObjectCondition {
            required_items: vec![ObjectId(3), ObjectId(10)],
            ..ObjectCondition::default()
        };
        assert!(!cond.evaluate("Floresta", &[]));
        assert!(cond.evaluate("Floresta", &[rifle()]));

        let mut by_id = ObjectCondition::holding(ObjectId(11));
        assert!(!by_id.evaluate("Floresta", &[rifle()]));
    }

    #[test]
    fn required_name_is_substring() {
        let mut cond = ObjectCondition::holding_named("rifle");
        assert!(cond.evaluate("Floresta", &[rifle()]));
        assert!(!cond.evaluate("Floresta", &[]));
    }

    #[test]
    fn all_parts_must_hold() {
        let mut cond = ObjectCondition {
            location: Some("Floresta".into()),
            required_name: Some("rifle".into()),
            ..ObjectCondition::default()
        };
        assert!(!cond.evaluate("Exterior da Cabana", &[rifle()]));
        assert!(cond.evaluate("Floresta", &[rifle()]));
    }
}
