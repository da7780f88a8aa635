//! Helpers Module
//!
//! This module contains helper / simplifier functions that don't clearly belong in another module.

/// Uppercase a name the way player-facing messages quote objects and places.
pub fn shout(name: &str) -> String {
    name.to_uppercase()
}
