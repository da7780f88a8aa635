//! Engine configuration.
//!
//! Settings live in `cabana.toml` inside the data directory. Every key is optional; a missing or
//! malformed file falls back to the defaults below.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Default delay between ambient hint checks.
pub const DEFAULT_HINT_INTERVAL_SECS: u64 = 10;

/// Engine settings read from `cabana.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// World definition, relative to the data directory.
    pub world_file: PathBuf,
    pub save_dir: PathBuf,
    /// Fixed seed for the hunting RNG. Entropy-seeded when absent.
    pub rng_seed: Option<u64>,
    pub ambient: AmbientConfig,
}

/// The `[ambient]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbientConfig {
    pub enabled: bool,
    pub interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            world_file: PathBuf::from("world.ron"),
            save_dir: PathBuf::from(crate::save_files::SAVE_DIR),
            rng_seed: None,
            ambient: AmbientConfig::default(),
        }
    }
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: DEFAULT_HINT_INTERVAL_SECS,
        }
    }
}

impl AmbientConfig {
    /// Interval between checks; never zero.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}

/// Load the configuration, falling back to defaults on error.
///
/// # Logging
/// - `info!` on successful load
/// - `warn!` if the file cannot be read or parsed
pub fn load_config(toml_path: &Path) -> Config {
    match try_load_config(toml_path) {
        Ok(config) => {
            info!("engine configuration loaded from '{}'", toml_path.display());
            config
        },
        Err(e) => {
            warn!(
                "Could not load configuration from '{}': {e:#}. Using defaults.",
                toml_path.display()
            );
            Config::default()
        },
    }
}

fn try_load_config(toml_path: &Path) -> Result<Config> {
    let text =
        fs::read_to_string(toml_path).with_context(|| format!("reading configuration from '{}'", toml_path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing configuration from '{}'", toml_path.display()))
}
