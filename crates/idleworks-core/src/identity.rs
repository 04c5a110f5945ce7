//! Identity types for categories, actions and definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a definition (category, action, resource) loaded from scripts
///
/// Uses a string-based ID for easy reference from RON scripts
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DefId(pub String);

impl DefId {
    /// Create a new definition ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if the ID is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DefId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for DefId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Key of an idle action: the category it lives in plus its own id
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActionKey {
    pub category: DefId,
    pub action: DefId,
}

impl ActionKey {
    /// Create a new action key
    pub fn new(category: impl Into<DefId>, action: impl Into<DefId>) -> Self {
        Self {
            category: category.into(),
            action: action.into(),
        }
    }

    /// Key under which the action's level is persisted
    ///
    /// The first `_` separates category from action, which is why valid
    /// category ids never contain one.
    pub fn save_key(&self) -> String {
        format!("{}_{}_level", self.category, self.action)
    }

    /// Empty ids and category ids containing `_` cannot be registered
    pub fn is_valid(&self) -> bool {
        !self.category.is_empty()
            && !self.action.is_empty()
            && !self.category.as_str().contains('_')
    }
}

impl fmt::Display for ActionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.action)
    }
}
