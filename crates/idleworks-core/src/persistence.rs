//! Level persistence contract
//!
//! The core only needs to load and save one integer per action. Keys are
//! derived with [`ActionKey::save_key`]; how they are stored is up to the
//! implementation.

use crate::error::Result;
use crate::ActionKey;
use indexmap::IndexMap;

/// Storage for purchased action levels
pub trait LevelStore {
    /// Load a level; a key never saved loads as 0
    fn load_level(&self, key: &ActionKey) -> Result<u32>;

    /// Save a level
    fn save_level(&mut self, key: &ActionKey, level: u32) -> Result<()>;
}

/// In-process store, mostly for tests and tools
#[derive(Debug, Clone, Default)]
pub struct MemoryLevelStore {
    levels: IndexMap<String, u32>,
}

impl MemoryLevelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Saved levels by save key
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.levels.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl LevelStore for MemoryLevelStore {
    fn load_level(&self, key: &ActionKey) -> Result<u32> {
        Ok(self.levels.get(&key.save_key()).copied().unwrap_or(0))
    }

    fn save_level(&mut self, key: &ActionKey, level: u32) -> Result<()> {
        self.levels.insert(key.save_key(), level);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryLevelStore::new();
        let key = ActionKey::new("farm", "wheat");

        assert_eq!(store.load_level(&key).unwrap(), 0);
        store.save_level(&key, 4).unwrap();
        store.save_level(&key, 5).unwrap();

        assert_eq!(store.load_level(&key).unwrap(), 5);
        assert_eq!(store.iter().collect::<Vec<_>>(), vec![("farm_wheat_level", 5)]);
    }
}
