//! Save-game serialization helpers.
//!
//! A save slot is a RON file holding the whole `CabanaWorld` (player included) plus the engine
//! version and the time it was written.

use crate::CABANA_VERSION;
use crate::slug::sanitize_slug;
use crate::world::CabanaWorld;

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, RwLock};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

pub const SAVE_DIR: &str = "saved_games";

static ACTIVE_SAVE_DIR: LazyLock<RwLock<PathBuf>> = LazyLock::new(|| RwLock::new(PathBuf::from(SAVE_DIR)));

/// On-disk shape of a save slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveFile {
    pub version: String,
    pub saved_at: String,
    pub world: CabanaWorld,
}

impl SaveFile {
    pub fn version_matches(&self) -> bool {
        self.version == CABANA_VERSION
    }
}

/// Return the active save directory used for save operations.
pub fn active_save_dir() -> PathBuf {
    ACTIVE_SAVE_DIR
        .read()
        .map(|guard| guard.clone())
        .unwrap_or_else(|_| PathBuf::from(SAVE_DIR))
}

/// Set the active save directory.
pub fn set_active_save_dir(path: PathBuf) {
    if let Ok(mut guard) = ACTIVE_SAVE_DIR.write() {
        *guard = path;
    }
}

/// Path of the file backing `slot` inside `dir`.
pub fn slot_path(dir: &Path, slot: &str) -> PathBuf {
    dir.join(format!("cabana-{}.ron", sanitize_slug(slot)))
}

/// Write the world to `slot` in `dir`, creating the directory if needed.
///
/// # Errors
/// - on failure to serialize, create the directory, or write the file
pub fn save_world(world: &CabanaWorld, dir: &Path, slot: &str) -> Result<PathBuf> {
    let saved_at = OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .format(&Rfc3339)
        .context("formatting save timestamp")?;
    let file = SaveFile {
        version: CABANA_VERSION.to_string(),
        saved_at,
        world: world.clone(),
    };
    let text = ron::ser::to_string_pretty(&file, ron::ser::PrettyConfig::default())
        .context("error converting CabanaWorld to 'ron' format")?;

    fs::create_dir_all(dir).with_context(|| format!("creating save directory {}", dir.display()))?;
    let path = slot_path(dir, slot);
    fs::write(&path, text).with_context(|| format!("writing save file {}", path.display()))?;
    info!("game saved to \"{}\"", path.display());
    Ok(path)
}

/// Load a save file from disk. A version mismatch is logged but not refused.
///
/// # Errors
/// - if the file cannot be read or deserialized
pub fn load_save_file(path: &Path) -> Result<SaveFile> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading save file {}", path.display()))?;
    let file = ron::from_str::<SaveFile>(&raw).with_context(|| format!("parsing save file {}", path.display()))?;
    if !file.version_matches() {
        warn!(
            "save file {} was written by v{} (current v{CABANA_VERSION})",
            path.display(),
            file.version
        );
    }
    info!("loaded save file \"{}\" from {}", path.display(), file.saved_at);
    Ok(file)
}

/// Slot names with a save file in `dir`, sorted. A missing directory has no slots.
///
/// # Errors
/// - if `dir` exists but cannot be read
pub fn list_save_slots(dir: &Path) -> Result<Vec<String>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut slots = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("reading save directory {}", dir.display()))? {
        let entry = entry.with_context(|| format!("reading entry in {}", dir.display()))?;
        let file_name = entry.file_name();
        if let Some(slot) = file_name
            .to_str()
            .and_then(|name| name.strip_prefix("cabana-"))
            .and_then(|name| name.strip_suffix(".ron"))
        {
            slots.push(slot.to_string());
        }
    }
    slots.sort_unstable();
    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ObjectHolder;
    use crate::scenario::{Exit, Scenario};
    use tempfile::tempdir;

    fn small_world() -> CabanaWorld {
        let mut world = CabanaWorld::new_empty();
        world.register_scenario(Scenario::new("Floresta", "Uma floresta."));
        world.register_scenario(Scenario::new("Exterior da Cabana", "A cabana."));
        world
            .add_exit("Floresta", "norte", Exit::new("Exterior da Cabana"))
            .unwrap();
        world.set_current_scenario("Floresta").unwrap();
        world.add_object("Floresta", "galho", "Um galho.", |o| o.storable()).unwrap();
        world
    }

    #[test]
    fn save_and_load_restore_player_and_world() {
        let dir = tempdir().unwrap();
        let mut world = small_world();
        let galho = world.player_scenario_mut().unwrap().remove_object_by_name("galho").unwrap();
        world.player.add_object(galho);
        world.player.move_to("Exterior da Cabana");

        let path = save_world(&world, dir.path(), "Minha Caçada").unwrap();
        assert!(path.ends_with("cabana-minha-cacada.ron"));

        let loaded = load_save_file(&path).unwrap();
        assert!(loaded.version_matches());
        assert!(!loaded.saved_at.is_empty());
        assert_eq!(loaded.world.player.location, "Exterior da Cabana");
        assert_eq!(loaded.world.player.history, vec!["Floresta".to_string()]);
        assert!(loaded.world.player.find_object("galho").is_some());
        assert_eq!(loaded.world.ids.peek(), world.ids.peek());
    }

    #[test]
    fn loading_missing_or_garbage_files_fails() {
        let dir = tempdir().unwrap();
        assert!(load_save_file(&dir.path().join("nope.ron")).is_err());
        let junk = dir.path().join("junk.ron");
        fs::write(&junk, "not ron at all (").unwrap();
        assert!(load_save_file(&junk).is_err());
    }

    #[test]
    fn slots_are_listed_by_slug() {
        let dir = tempdir().unwrap();
        assert!(list_save_slots(&dir.path().join("missing")).unwrap().is_empty());
        save_world(&small_world(), dir.path(), "tarde").unwrap();
        save_world(&small_world(), dir.path(), "Manhã").unwrap();
        fs::write(dir.path().join("notas.txt"), "x").unwrap();
        assert_eq!(list_save_slots(dir.path()).unwrap(), vec!["manha", "tarde"]);
    }

    #[test]
    fn old_versions_still_load() {
        let dir = tempdir().unwrap();
        let path = save_world(&small_world(), dir.path(), "velho").unwrap();
        let mut file = load_save_file(&path).unwrap();
        file.version = "0.0.1".into();
        fs::write(&path, ron::to_string(&file).unwrap()).unwrap();
        let reloaded = load_save_file(&path).unwrap();
        assert!(!reloaded.version_matches());
        assert_eq!(reloaded.world.player.location, "Floresta");
    }
}
