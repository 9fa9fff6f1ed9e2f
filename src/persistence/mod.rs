//! Save/load of the high score table
//!
//! Features:
//! - JSON file on disk
//! - Atomic replace (write tmp, then rename over the save)
//! - Missing or corrupt files fall back to an empty table

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::highscores::HighScores;

/// Default score file name, next to the working directory
pub const DEFAULT_SCORES_FILE: &str = "scores.json";

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read and parse a JSON file
pub(crate) fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, PersistenceError> {
    let text = fs::read_to_string(path).map_err(|source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| PersistenceError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize to JSON and atomically replace `path`
pub(crate) fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), PersistenceError> {
    let json = serde_json::to_string_pretty(value).map_err(|source| PersistenceError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let io_err = |source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(io_err)?;
    }
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json).map_err(io_err)?;
    fs::rename(&tmp, path).map_err(io_err)?;
    Ok(())
}

/// File-backed score table
#[derive(Debug, Clone)]
pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the table, propagating I/O and parse errors
    pub fn try_load(&self) -> Result<HighScores, PersistenceError> {
        let mut scores: HighScores = read_json(&self.path)?;
        scores.normalize();
        Ok(scores)
    }

    /// Load the table, starting fresh if it can't be read
    pub fn load(&self) -> HighScores {
        match self.try_load() {
            Ok(scores) => {
                log::info!("Loaded {} high scores", scores.len());
                scores
            }
            Err(PersistenceError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                log::info!("No high scores found, starting fresh");
                HighScores::new()
            }
            Err(e) => {
                log::warn!("{e}; starting with an empty leaderboard");
                HighScores::new()
            }
        }
    }

    pub fn save(&self, scores: &HighScores) -> Result<(), PersistenceError> {
        write_json(&self.path, scores)?;
        log::info!("High scores saved ({} entries)", scores.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn temp_path(name: &str) -> PathBuf {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!("maze-chase-{}-{}-{}.json", std::process::id(), n, name))
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("roundtrip");
        let store = ScoreStore::new(&path);
        let mut scores = HighScores::new();
        scores.add_score("ANA", 900);
        scores.add_score("BOB", 1200);

        store.save(&scores).unwrap();
        let loaded = store.try_load().unwrap();
        assert_eq!(loaded, scores);
        assert!(!path.with_extension("tmp").exists());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let store = ScoreStore::new(temp_path("missing"));
        assert!(store.load().is_empty());
        assert!(matches!(store.try_load(), Err(PersistenceError::Io { .. })));
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let path = temp_path("corrupt");
        fs::write(&path, "{ not json").unwrap();
        let store = ScoreStore::new(&path);
        assert!(matches!(store.try_load(), Err(PersistenceError::Json { .. })));
        assert!(store.load().is_empty());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_loaded_table_is_normalized() {
        let path = temp_path("unsorted");
        fs::write(
            &path,
            r#"{"entries":[{"name":"LOW","score":1},{"name":"HIGH","score":99}]}"#,
        )
        .unwrap();
        let loaded = ScoreStore::new(&path).try_load().unwrap();
        assert_eq!(loaded.entries[0].name, "HIGH");
        assert_eq!(loaded.capacity(), crate::highscores::MAX_HIGH_SCORES);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_saved_capacity_cannot_grow_the_table() {
        let path = temp_path("capacity");
        fs::write(&path, r#"{"entries":[],"capacity":50}"#).unwrap();
        let mut loaded = ScoreStore::new(&path).load();
        for s in 0..20 {
            loaded.add_score("P", s * 10);
        }
        assert_eq!(loaded.capacity(), crate::highscores::MAX_HIGH_SCORES);
        assert_eq!(loaded.len(), crate::highscores::MAX_HIGH_SCORES);
        let _ = fs::remove_file(&path);
    }
}
