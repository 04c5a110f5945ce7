//! Session bookkeeping.

use native_db::*;
use native_model::{native_model, Model};
use serde::{Deserialize, Serialize};

/// Primary key of the single session row.
pub const SESSION_ID: &str = "session";

/// When the player was last active.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 2, version = 1)]
#[native_db]
pub struct StoredSession {
    /// Always "session" - single row.
    #[primary_key]
    pub id: String,
    /// Last active time, milliseconds since the Unix epoch.
    pub last_active_ms: i64,
}

impl StoredSession {
    pub fn new(last_active_ms: i64) -> Self {
        Self {
            id: SESSION_ID.to_string(),
            last_active_ms,
        }
    }
}
