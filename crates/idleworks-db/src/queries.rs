//! Common query patterns for the database.

use crate::error::{Error, Result};
use crate::models::*;
use crate::store::Store;

impl Store {
    /// Get all saved levels of one category.
    pub fn levels_in_category(&self, category: &str) -> Result<Vec<StoredLevel>> {
        let r = self.db.r_transaction()?;
        let scan = r
            .scan()
            .secondary::<StoredLevel>(StoredLevelKey::category)?;
        let iter = scan.start_with(category)?;
        let levels: std::result::Result<Vec<StoredLevel>, _> = iter.collect();
        let levels = levels.map_err(|e| Error::Database(e.to_string()))?;
        // start_with is a prefix match; "farm" must not pick up "farmstead"
        Ok(levels
            .into_iter()
            .filter(|l| l.category == category)
            .collect())
    }

    /// Sum of all saved levels, a rough progress measure.
    pub fn total_levels(&self) -> Result<u64> {
        Ok(self
            .all_levels()?
            .iter()
            .map(|l| u64::from(l.level))
            .sum())
    }
}
