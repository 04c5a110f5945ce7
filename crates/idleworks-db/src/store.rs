//! Database store wrapper.

use crate::error::{Error, Result};
use crate::models::*;
use chrono::{DateTime, Utc};
use idleworks_core::{ActionKey, LevelStore};
use native_db::*;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

// Static models for the database
static MODELS: LazyLock<Models> = LazyLock::new(|| {
    let mut models = Models::new();
    models
        .define::<StoredLevel>()
        .expect("StoredLevel model definition");
    models
        .define::<StoredSession>()
        .expect("StoredSession model definition");
    models
});

/// Database store for levels and session time.
pub struct Store {
    pub(crate) db: Database<'static>,
}

impl Store {
    /// Open or create a database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let db = Builder::new()
            .create(&MODELS, path)
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(Self { db })
    }

    /// Create an in-memory database.
    pub fn in_memory() -> Result<Self> {
        let db = Builder::new()
            .create_in_memory(&MODELS)
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(Self { db })
    }

    /// Save the level of an action.
    pub fn save_level(&self, key: &ActionKey, level: u32) -> Result<()> {
        let rw = self.db.rw_transaction()?;
        rw.upsert(StoredLevel::new(key, level))?;
        rw.commit()?;
        debug!(%key, level, "Level saved");
        Ok(())
    }

    /// Load the level of an action; 0 if never saved.
    pub fn load_level(&self, key: &ActionKey) -> Result<u32> {
        let r = self.db.r_transaction()?;
        let stored: Option<StoredLevel> = r.get().primary(key.save_key())?;
        Ok(stored.map(|s| s.level).unwrap_or(0))
    }

    /// Delete the saved level of an action.
    pub fn forget_level(&self, key: &ActionKey) -> Result<()> {
        let rw = self.db.rw_transaction()?;
        let stored: Option<StoredLevel> = rw.get().primary(key.save_key())?;
        let Some(stored) = stored else {
            return Err(Error::NotFound(key.save_key()));
        };
        rw.remove(stored)?;
        rw.commit()?;
        Ok(())
    }

    /// Load every saved level.
    pub fn all_levels(&self) -> Result<Vec<StoredLevel>> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().primary::<StoredLevel>()?;
        let iter = scan.all()?;
        let levels: std::result::Result<Vec<StoredLevel>, _> = iter.collect();
        levels.map_err(|e| Error::Database(e.to_string()))
    }

    /// Record when the player was last active.
    pub fn save_last_active(&self, at: DateTime<Utc>) -> Result<()> {
        let rw = self.db.rw_transaction()?;
        rw.upsert(StoredSession::new(at.timestamp_millis()))?;
        rw.commit()?;
        Ok(())
    }

    /// When the player was last active, if ever.
    pub fn load_last_active(&self) -> Result<Option<DateTime<Utc>>> {
        let r = self.db.r_transaction()?;
        let stored: Option<StoredSession> = r.get().primary(SESSION_ID.to_string())?;
        stored
            .map(|s| {
                DateTime::from_timestamp_millis(s.last_active_ms).ok_or_else(|| {
                    Error::Serialization(format!("invalid timestamp {}", s.last_active_ms))
                })
            })
            .transpose()
    }

    /// Seconds between the last active time and `now`.
    ///
    /// Never negative (a clock set backwards yields 0) and 0 when no
    /// session was recorded.
    pub fn offline_seconds(&self, now: DateTime<Utc>) -> Result<f64> {
        let Some(last) = self.load_last_active()? else {
            return Ok(0.0);
        };
        let millis = (now - last).num_milliseconds().max(0);
        Ok(millis as f64 / 1000.0)
    }

    /// Clear all data.
    pub fn clear(&self) -> Result<()> {
        let levels = self.all_levels()?;

        let rw = self.db.rw_transaction()?;
        for level in levels {
            rw.remove(level)?;
        }
        if let Some(session) = rw.get().primary::<StoredSession>(SESSION_ID.to_string())? {
            rw.remove(session)?;
        }
        rw.commit()?;
        Ok(())
    }
}

impl LevelStore for Store {
    fn load_level(&self, key: &ActionKey) -> idleworks_core::Result<u32> {
        Ok(Store::load_level(self, key)?)
    }

    fn save_level(&mut self, key: &ActionKey, level: u32) -> idleworks_core::Result<()> {
        Ok(Store::save_level(self, key, level)?)
    }
}
