//! Action registry: categories of idle actions and the active set
//!
//! Actions are indexed by category, then by action id. The registry also
//! keeps the *active set*, the keys of every action with a level above
//! zero, in registration order. Only active actions are advanced by the
//! runtime; an action dropped to level 0 keeps its record and its timer.

use crate::config::PurchaseCurveConfig;
use crate::error::{Error, Result};
use crate::{ActionKey, Costs, DefId, ResourceKind};
use indexmap::{IndexMap, IndexSet};
use std::sync::Arc;
use tracing::{debug, warn};

/// Simulation state of one upgradeable action
#[derive(Debug, Clone)]
pub struct IdleAction {
    pub(crate) key: ActionKey,
    pub(crate) level: u32,
    /// Seconds accumulated towards the next cycle
    pub(crate) timer: f64,
    pub(crate) resource: ResourceKind,
    pub(crate) config: Arc<PurchaseCurveConfig>,
}

impl IdleAction {
    fn new(
        key: ActionKey,
        resource: ResourceKind,
        config: Arc<PurchaseCurveConfig>,
        level: u32,
    ) -> Self {
        Self {
            key,
            level,
            timer: 0.0,
            resource,
            config,
        }
    }

    pub fn key(&self) -> &ActionKey {
        &self.key
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn timer(&self) -> f64 {
        self.timer
    }

    /// Resource credited when a cycle completes
    pub fn resource(&self) -> &ResourceKind {
        &self.resource
    }

    pub fn config(&self) -> &Arc<PurchaseCurveConfig> {
        &self.config
    }

    /// Whether the runtime advances this action
    pub fn is_active(&self) -> bool {
        self.level > 0
    }

    /// Cycle duration at the current level
    pub fn duration(&self) -> f64 {
        self.config.duration_for_level(self.level)
    }

    /// Amount credited per completed cycle
    pub fn production_per_cycle(&self, global_multiplier: f64) -> f64 {
        self.config.production_for_level(self.level) * global_multiplier
    }

    pub fn production_per_second(&self, global_multiplier: f64) -> f64 {
        self.production_per_cycle(global_multiplier) / self.duration()
    }

    /// Fraction of the current cycle completed, in `[0, 1]`
    pub fn progress(&self) -> f64 {
        (self.timer / self.duration()).clamp(0.0, 1.0)
    }
}

/// A named group of actions
#[derive(Debug, Clone)]
pub struct IdleCategory {
    id: DefId,
    actions: IndexMap<DefId, IdleAction>,
}

impl IdleCategory {
    fn new(id: DefId) -> Self {
        Self {
            id,
            actions: IndexMap::new(),
        }
    }

    pub fn id(&self) -> &DefId {
        &self.id
    }

    /// Look up an action by its id within this category
    pub fn get(&self, action: &DefId) -> Option<&IdleAction> {
        self.actions.get(action)
    }

    pub fn actions(&self) -> impl Iterator<Item = &IdleAction> {
        self.actions.values()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Every registered action, plus the set the runtime advances
#[derive(Debug, Clone, Default)]
pub struct Registry {
    categories: IndexMap<DefId, IdleCategory>,
    active: IndexSet<ActionKey>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a category, creating it empty on first use
    ///
    /// Returns `None` for an empty id.
    pub fn get_or_create_category(&mut self, id: impl Into<DefId>) -> Option<&mut IdleCategory> {
        let id = id.into();
        if id.is_empty() {
            warn!("Rejected category with empty id");
            return None;
        }
        Some(
            self.categories
                .entry(id.clone())
                .or_insert_with(|| IdleCategory::new(id)),
        )
    }

    /// Register a new action or update an existing one in place
    ///
    /// A new action starts with an empty timer. An existing action keeps
    /// its timer while resource, config and level are replaced. Active-set
    /// membership follows the new level. Returns false if the key was
    /// rejected.
    pub fn register_or_update_action(
        &mut self,
        category: impl Into<DefId>,
        action: impl Into<DefId>,
        resource: ResourceKind,
        config: Arc<PurchaseCurveConfig>,
        level: u32,
    ) -> bool {
        let key = ActionKey::new(category, action);
        if !key.is_valid() {
            warn!(%key, "Rejected action with an invalid category or action id");
            return false;
        }

        let Some(category) = self.get_or_create_category(key.category.clone()) else {
            return false;
        };
        match category.actions.get_mut(&key.action) {
            Some(existing) => {
                existing.resource = resource;
                existing.config = config;
                existing.level = level;
                debug!(%key, level, "Action updated");
            }
            None => {
                category.actions.insert(
                    key.action.clone(),
                    IdleAction::new(key.clone(), resource, config, level),
                );
                debug!(%key, level, "Action registered");
            }
        }

        self.sync_active(&key, level);
        true
    }

    /// Change the level of a registered action, keeping its timer
    pub fn upgrade_action(&mut self, key: &ActionKey, level: u32) -> Result<()> {
        let action = self
            .get_action_mut(key)
            .ok_or_else(|| Error::ActionNotFound(key.to_string()))?;
        action.level = level;
        debug!(%key, level, "Action level changed");
        self.sync_active(key, level);
        Ok(())
    }

    pub fn get_action(&self, key: &ActionKey) -> Option<&IdleAction> {
        self.categories.get(&key.category)?.get(&key.action)
    }

    pub fn get_action_mut(&mut self, key: &ActionKey) -> Option<&mut IdleAction> {
        self.categories
            .get_mut(&key.category)?
            .actions
            .get_mut(&key.action)
    }

    /// Remove an action from its category and the active set
    ///
    /// Returns false if nothing was registered under the key.
    pub fn remove_action(&mut self, key: &ActionKey) -> bool {
        self.active.shift_remove(key);
        let removed = self
            .categories
            .get_mut(&key.category)
            .and_then(|c| c.actions.shift_remove(&key.action))
            .is_some();
        if removed {
            debug!(%key, "Action removed");
        }
        removed
    }

    pub fn category(&self, id: &DefId) -> Option<&IdleCategory> {
        self.categories.get(id)
    }

    pub fn categories(&self) -> impl Iterator<Item = &IdleCategory> {
        self.categories.values()
    }

    /// All registered actions, active or not
    pub fn actions(&self) -> impl Iterator<Item = &IdleAction> {
        self.categories.values().flat_map(|c| c.actions())
    }

    /// Active actions in activation order
    pub fn active_actions(&self) -> impl Iterator<Item = &IdleAction> {
        self.active.iter().filter_map(|key| self.get_action(key))
    }

    pub fn is_active(&self, key: &ActionKey) -> bool {
        self.active.contains(key)
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    /// Per-second production of active actions, summed per resource
    ///
    /// `category` restricts the sum to one category; `None` covers all.
    pub fn total_production_per_second(
        &self,
        category: Option<&DefId>,
        global_multiplier: f64,
    ) -> Costs {
        let mut totals = Costs::new();
        for action in self.active_actions() {
            if category.is_some_and(|c| c != &action.key.category) {
                continue;
            }
            *totals.entry(action.resource.clone()).or_insert(0.0) +=
                action.production_per_second(global_multiplier);
        }
        totals
    }

    /// Run `f` on every active action in activation order
    pub(crate) fn for_each_active_mut(&mut self, mut f: impl FnMut(&mut IdleAction)) {
        for key in &self.active {
            if let Some(action) = self
                .categories
                .get_mut(&key.category)
                .and_then(|c| c.actions.get_mut(&key.action))
            {
                f(action);
            }
        }
    }

    fn sync_active(&mut self, key: &ActionKey, level: u32) {
        if level > 0 {
            self.active.insert(key.clone());
        } else {
            self.active.shift_remove(key);
        }
    }
}
