#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

pub const CABANA_VERSION: &str = env!("CARGO_PKG_VERSION");

// Core modules
pub mod action;
pub mod ambient;
pub mod command;
pub mod config;
pub mod data_paths;
pub mod entity_search;
pub mod helpers;
pub mod idgen;
pub mod loader;
pub mod npc;
pub mod object;
pub mod player;
pub mod repl;
pub mod save_files;
pub mod scenario;
pub mod slug;
pub mod style;
pub mod view;
pub mod world;

// Re-exports for convenience
pub use config::{Config, load_config};
pub use idgen::ObjectId;
pub use loader::load_world;
pub use object::{GameObject, ObjectHolder};
pub use player::Player;
pub use repl::{Confirm, ReplControl, process_line, run_repl};
pub use scenario::{Exit, Scenario};
pub use view::{View, ViewItem};
pub use world::CabanaWorld;
