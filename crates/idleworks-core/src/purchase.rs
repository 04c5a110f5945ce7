//! Buying levels of an action
//!
//! A [`Producer`] tracks the owned level of one configured action. Buying
//! the next level pays the price for the level currently owned, bumps the
//! level, re-registers the action (its timer carries over) and saves the
//! new level.

use crate::config::PurchaseCurveConfig;
use crate::error::Result;
use crate::persistence::LevelStore;
use crate::{ActionKey, Costs, Ledger, Model};
use std::sync::Arc;
use tracing::{debug, info};

/// Outcome of a purchase attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseOutcome {
    /// The level was bought; carries the new level
    Purchased { level: u32 },
    /// The ledger could not cover the price; nothing changed
    InsufficientFunds,
}

/// An owned, upgradeable action
#[derive(Debug, Clone)]
pub struct Producer {
    config: Arc<PurchaseCurveConfig>,
    level: u32,
}

impl Producer {
    pub fn new(config: Arc<PurchaseCurveConfig>, level: u32) -> Self {
        Self { config, level }
    }

    /// Create a producer at its saved level
    pub fn load(config: Arc<PurchaseCurveConfig>, store: &dyn LevelStore) -> Result<Self> {
        let level = store.load_level(config.key())?;
        Ok(Self::new(config, level))
    }

    pub fn key(&self) -> &ActionKey {
        self.config.key()
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn config(&self) -> &Arc<PurchaseCurveConfig> {
        &self.config
    }

    /// Price of the next level
    pub fn current_costs(&self) -> Costs {
        self.config.costs_for_level(self.level)
    }

    pub fn can_afford(&self, ledger: &Ledger) -> bool {
        ledger.can_afford_all(&self.current_costs())
    }

    /// Production per cycle at the owned level, before the global multiplier
    pub fn production_per_cycle(&self) -> f64 {
        self.config.production_for_level(self.level)
    }

    /// Register the action at the owned level
    pub fn activate(&self, model: &mut Model) -> bool {
        let key = self.config.key();
        model.registry.register_or_update_action(
            key.category.clone(),
            key.action.clone(),
            self.config.produces().clone(),
            self.config.clone(),
            self.level,
        )
    }

    /// Buy the next level
    ///
    /// Affordability is checked against the live ledger at the moment of
    /// spending. A store failure is returned after the level has already
    /// been bought and registered.
    pub fn purchase(
        &mut self,
        model: &mut Model,
        store: &mut dyn LevelStore,
    ) -> Result<PurchaseOutcome> {
        let costs = self.current_costs();
        if !model.ledger.spend_multiple(&costs) {
            debug!(key = %self.key(), level = self.level, "Cannot afford next level");
            return Ok(PurchaseOutcome::InsufficientFunds);
        }

        self.level += 1;
        self.activate(model);
        info!(key = %self.key(), level = self.level, "Level purchased");

        store.save_level(self.config.key(), self.level)?;
        Ok(PurchaseOutcome::Purchased { level: self.level })
    }
}
