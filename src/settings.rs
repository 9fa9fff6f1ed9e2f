//! Game settings and preferences
//!
//! Persisted as JSON, separately from the high score table. Every field has a
//! default so partial files load.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::persistence::{DEFAULT_SCORES_FILE, PersistenceError, read_json, write_json};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Storage ===
    /// High score file
    pub scores_path: PathBuf,

    // === Run ===
    /// Fixed RNG seed (random per run when unset)
    pub seed: Option<u64>,
    /// Length of the headless demo run in seconds
    pub demo_seconds: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            scores_path: PathBuf::from(DEFAULT_SCORES_FILE),

            seed: None,
            demo_seconds: 30,
        }
    }
}

impl Settings {
    /// Load settings from `path`, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match read_json::<Settings>(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::info!("Using default settings ({e})");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        write_json(path, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}
