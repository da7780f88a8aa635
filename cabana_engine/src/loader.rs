//! Loader utilities for building a `CabanaWorld` from serialized data.
//!
//! World content is loaded from a `WorldDef` (RON); engine settings come from `cabana.toml`
//! (see [`crate::config`]).

pub mod worlddef;

use std::path::Path;

use crate::loader::worlddef::{build_world_from_def, load_worlddef};
use crate::world::CabanaWorld;

use anyhow::{Context, Result, bail};
use cabana_data::WorldDef;
use log::info;

/// Load, validate and build the `CabanaWorld` described by the RON file at `path`.
///
/// # Errors
/// Errors bubble up from file IO, deserialization, or missing references.
pub fn load_world(path: &Path) -> Result<CabanaWorld> {
    let worlddef = load_worlddef(path).context("while loading worlddef from file")?;
    validate_worlddef(&worlddef)?;
    let world = build_world_from_def(&worlddef).context("while building world from worlddef")?;
    info!("{} scenarios added to CabanaWorld", world.scenarios.len());
    info!("{} NPCs added to CabanaWorld", world.npcs.len());
    info!("{} drop hooks added to CabanaWorld", world.drop_hooks.len());
    info!("{} ambient hints added to CabanaWorld", world.hints.len());
    info!("player starts in \"{}\"", world.player.location);
    Ok(world)
}

/// Validate the WorldDef and return a single aggregated error.
fn validate_worlddef(def: &WorldDef) -> Result<()> {
    let errors = cabana_data::validate_world(def);
    if errors.is_empty() {
        return Ok(());
    }
    let details = errors
        .into_iter()
        .map(|err| format!("- {err}"))
        .collect::<Vec<_>>()
        .join("\n");
    bail!("worlddef validation failed:\n{details}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn invalid_definitions_are_rejected_with_every_problem() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("world.ron");
        fs::write(
            &path,
            r#"(
                game: (title: "x", start: "nowhere"),
                scenarios: [(id: "a", name: "A", desc: "", exits: [(token: "norte", to: "b")])],
            )"#,
        )
        .unwrap();
        let err = format!("{:#}", load_world(&path).unwrap_err());
        assert!(err.contains("missing scenario 'nowhere'"));
        assert!(err.contains("missing scenario 'b'"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(load_world(&dir.path().join("none.ron")).is_err());
    }
}
