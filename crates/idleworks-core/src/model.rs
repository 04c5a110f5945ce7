//! Session state

use crate::{Clock, Costs, DefId, Ledger, Registry};

/// Everything the runtime advances: balances, actions and time
///
/// Built explicitly and passed to the runtime; there is no global
/// instance, so several sessions can live side by side.
#[derive(Debug)]
pub struct Model {
    /// Resource balances
    pub ledger: Ledger,
    /// Registered actions
    pub registry: Registry,
    /// Simulation clock
    pub clock: Clock,
    /// Multiplier applied to all production
    pub global_multiplier: f64,
}

impl Model {
    /// Create an empty model with a global multiplier of 1
    pub fn new() -> Self {
        Self::with_multiplier(1.0)
    }

    /// A negative or non-finite multiplier makes every pass produce nothing
    pub fn with_multiplier(global_multiplier: f64) -> Self {
        Self {
            ledger: Ledger::new(),
            registry: Registry::new(),
            clock: Clock::new(),
            global_multiplier,
        }
    }

    /// Per-second production of active actions, per resource
    pub fn production_per_second(&self, category: Option<&DefId>) -> Costs {
        self.registry
            .total_production_per_second(category, self.global_multiplier)
    }

    /// Get the current tick
    pub fn current_tick(&self) -> u64 {
        self.clock.tick
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ActionKey, CurveParams, PurchaseCurveConfig, ResourceCost, ResourceKind};
    use std::sync::Arc;

    #[test]
    fn test_production_uses_global_multiplier() {
        let gold = ResourceKind::new("gold", "Gold");
        let config = PurchaseCurveConfig::new(
            ActionKey::new("farm", "wheat"),
            gold.clone(),
            vec![ResourceCost::new(gold.clone(), 10.0)],
            CurveParams::default(),
        )
        .unwrap();

        let mut model = Model::with_multiplier(3.0);
        model
            .registry
            .register_or_update_action("farm", "wheat", gold.clone(), Arc::new(config), 1);

        assert_eq!(model.production_per_second(None)[&gold], 3.0);
        assert_eq!(model.current_tick(), 0);
    }
}
