//! Persistence layer.
//!
//! Rankings are handed verbatim to a document store keyed by user id.
//! The JSON file store is the shipping implementation; the in-memory
//! store backs tests. Loads run the normalization pass so documents
//! written by older builds (missing tiers, stale ranks) come back
//! usable.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::types::{Ranking, WarchestError};
use crate::valuation::tiers::CATCH_ALL_TIER;

/// On-disk document shape: the asset list plus a save timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredRanking {
    saved_at: DateTime<Utc>,
    ranking: Ranking,
}

/// Where user rankings live.
pub trait RankingStore {
    fn save(&self, user_id: &str, ranking: &Ranking) -> Result<(), WarchestError>;
    /// Returns None if the user has no saved ranking (fresh start).
    fn load(&self, user_id: &str) -> Result<Option<Ranking>, WarchestError>;
    fn delete(&self, user_id: &str) -> Result<(), WarchestError>;
}

// ---------------------------------------------------------------------------
// JSON file store
// ---------------------------------------------------------------------------

/// One JSON file per user under a base directory.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        JsonFileStore { dir: dir.into() }
    }

    fn path_for(&self, user_id: &str) -> PathBuf {
        // Keep file names tame regardless of what the id contains
        let safe: String = user_id
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }
}

impl RankingStore for JsonFileStore {
    fn save(&self, user_id: &str, ranking: &Ranking) -> Result<(), WarchestError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            WarchestError::Storage(format!("failed to create {}: {e}", self.dir.display()))
        })?;

        let doc = StoredRanking {
            saved_at: Utc::now(),
            ranking: ranking.clone(),
        };
        let json = serde_json::to_string_pretty(&doc)
            .map_err(|e| WarchestError::Storage(format!("failed to serialise ranking: {e}")))?;

        let path = self.path_for(user_id);
        std::fs::write(&path, &json).map_err(|e| {
            WarchestError::Storage(format!("failed to write {}: {e}", path.display()))
        })?;

        debug!(user_id, assets = ranking.len(), path = %path.display(), "Ranking saved");
        Ok(())
    }

    fn load(&self, user_id: &str) -> Result<Option<Ranking>, WarchestError> {
        let path = self.path_for(user_id);
        if !Path::new(&path).exists() {
            info!(user_id, "No saved ranking found, starting fresh");
            return Ok(None);
        }

        let json = std::fs::read_to_string(&path).map_err(|e| {
            WarchestError::Storage(format!("failed to read {}: {e}", path.display()))
        })?;
        let doc: StoredRanking = serde_json::from_str(&json).map_err(|e| {
            WarchestError::Storage(format!("failed to parse {}: {e}", path.display()))
        })?;

        let mut ranking = doc.ranking;
        ranking.normalize(CATCH_ALL_TIER);

        info!(
            user_id,
            assets = ranking.len(),
            saved_at = %doc.saved_at,
            "Ranking loaded from disk"
        );
        Ok(Some(ranking))
    }

    fn delete(&self, user_id: &str) -> Result<(), WarchestError> {
        let path = self.path_for(user_id);
        if path.exists() {
            std::fs::remove_file(&path).map_err(|e| {
                WarchestError::Storage(format!("failed to delete {}: {e}", path.display()))
            })?;
            debug!(user_id, "Saved ranking deleted");
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// Map-backed store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStore {
    rankings: Mutex<HashMap<String, Ranking>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RankingStore for MemoryStore {
    fn save(&self, user_id: &str, ranking: &Ranking) -> Result<(), WarchestError> {
        let mut map = self
            .rankings
            .lock()
            .map_err(|_| WarchestError::Storage("store lock poisoned".to_string()))?;
        map.insert(user_id.to_string(), ranking.clone());
        Ok(())
    }

    fn load(&self, user_id: &str) -> Result<Option<Ranking>, WarchestError> {
        let map = self
            .rankings
            .lock()
            .map_err(|_| WarchestError::Storage("store lock poisoned".to_string()))?;
        Ok(map.get(user_id).map(|r| {
            let mut ranking = r.clone();
            ranking.normalize(CATCH_ALL_TIER);
            ranking
        }))
    }

    fn delete(&self, user_id: &str) -> Result<(), WarchestError> {
        let mut map = self
            .rankings
            .lock()
            .map_err(|_| WarchestError::Storage("store lock poisoned".to_string()))?;
        map.remove(user_id);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
