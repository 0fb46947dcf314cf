//! High-score persistence for presentation layers.
//!
//! The high score is a single named integer in a key-value store. The
//! session never touches it; front ends read it for the title screen and
//! record the final score on the game-over screen.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::SessionResult;

/// Key the high score is stored under.
pub const HIGH_SCORE_KEY: &str = "HighScore";

/// Storage for the persisted high score.
pub trait ScoreStore {
    /// The stored high score, or 0 if none has been saved.
    fn load(&self) -> u32;

    /// Persist `score` as the high score.
    fn save(&mut self, score: u32) -> SessionResult<()>;
}

/// In-process score store.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    value: u32,
}

impl MemoryScoreStore {
    /// Create a store holding `value`.
    pub fn new(value: u32) -> Self {
        Self { value }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> u32 {
        self.value
    }

    fn save(&mut self, score: u32) -> SessionResult<()> {
        self.value = score;
        Ok(())
    }
}

/// Score store backed by a JSON object file (`{"HighScore": 12}`).
///
/// Other keys in the file are preserved on save. A file that is not a JSON
/// object is left untouched and the save fails.
#[derive(Debug, Clone)]
pub struct JsonScoreStore {
    path: PathBuf,
    key: String,
}

impl JsonScoreStore {
    /// Store the high score in `path` under [`HIGH_SCORE_KEY`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            key: HIGH_SCORE_KEY.to_string(),
        }
    }

    /// Use a different key inside the file.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> SessionResult<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let source = std::fs::read_to_string(&self.path)?;
        if source.trim().is_empty() {
            return Ok(Map::new());
        }
        Ok(serde_json::from_str(&source)?)
    }
}

impl ScoreStore for JsonScoreStore {
    fn load(&self) -> u32 {
        match self.read_entries() {
            Ok(entries) => entries
                .get(&self.key)
                .and_then(Value::as_u64)
                .and_then(|score| u32::try_from(score).ok())
                .unwrap_or(0),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "unreadable score store, using 0");
                0
            }
        }
    }

    fn save(&mut self, score: u32) -> SessionResult<()> {
        let mut entries = self.read_entries()?;
        entries.insert(self.key.clone(), Value::from(score));
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;
        tracing::debug!(path = %self.path.display(), score, "high score saved");
        Ok(())
    }
}

/// Result of comparing a final score against the stored high score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighScore {
    /// The high score after the comparison.
    pub value: u32,
    /// Whether the final score set a new high score.
    pub is_new: bool,
}

impl HighScore {
    /// Compare `score` with the stored high score and save it if strictly higher.
    pub fn record(store: &mut impl ScoreStore, score: u32) -> SessionResult<Self> {
        let current = store.load();
        if score > current {
            store.save(score)?;
            tracing::info!(score, previous = current, "new high score");
            Ok(Self {
                value: score,
                is_new: true,
            })
        } else {
            Ok(Self {
                value: current,
                is_new: false,
            })
        }
    }

    /// Reset the stored high score to 0.
    pub fn reset(store: &mut impl ScoreStore) -> SessionResult<()> {
        store.save(0)
    }
}
