//! Purchased action levels.

use idleworks_core::ActionKey;
use native_db::*;
use native_model::{native_model, Model};
use serde::{Deserialize, Serialize};

/// Stored level of one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[native_model(id = 1, version = 1)]
#[native_db]
pub struct StoredLevel {
    /// Primary key - the action's save key.
    #[primary_key]
    pub key: String,
    /// Category the action belongs to.
    #[secondary_key]
    pub category: String,
    /// Action id within the category.
    pub action: String,
    /// Purchased level.
    pub level: u32,
}

impl StoredLevel {
    /// Create a row for an action key.
    pub fn new(key: &ActionKey, level: u32) -> Self {
        Self {
            key: key.save_key(),
            category: key.category.as_str().to_string(),
            action: key.action.as_str().to_string(),
            level,
        }
    }

    /// The action this row belongs to.
    pub fn action_key(&self) -> ActionKey {
        ActionKey::new(self.category.clone(), self.action.clone())
    }
}
