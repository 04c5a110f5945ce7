//! Purchase and runtime configuration
//!
//! A [`PurchaseCurveConfig`] is immutable once built: content loaders
//! construct it through [`PurchaseCurveConfig::new`], which validates the
//! curve parameters, and share it behind an `Arc`.

use crate::curve::CurveParams;
use crate::error::{Error, Result};
use crate::{ActionKey, Costs, ResourceKind};
use serde::{Deserialize, Serialize};

/// Base cost of an upgrade in one resource
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceCost {
    pub resource: ResourceKind,
    pub base_cost: f64,
}

impl ResourceCost {
    pub fn new(resource: ResourceKind, base_cost: f64) -> Self {
        Self {
            resource,
            base_cost,
        }
    }
}

/// A resource that only becomes part of the price from `unlock_level` on
#[derive(Debug, Clone, PartialEq)]
pub struct LevelRequirement {
    pub resource: ResourceKind,
    /// First level at which the resource is charged
    pub unlock_level: u32,
    /// Flat amount per level for resources without a base cost
    pub amount_per_level: f64,
}

/// Everything needed to price and simulate one upgradeable action
#[derive(Debug, Clone)]
pub struct PurchaseCurveConfig {
    key: ActionKey,
    produces: ResourceKind,
    costs: Vec<ResourceCost>,
    requirements: Vec<LevelRequirement>,
    params: CurveParams,
}

impl PurchaseCurveConfig {
    /// Build a config, validating every parameter
    pub fn new(
        key: ActionKey,
        produces: ResourceKind,
        costs: Vec<ResourceCost>,
        params: CurveParams,
    ) -> Result<Self> {
        if !key.is_valid() {
            return Err(Error::invalid_config(
                "key",
                format!("ids must be non-empty and the category free of `_`, got `{}`", key),
            ));
        }
        if costs.is_empty() {
            return Err(Error::invalid_config(
                "costs",
                format!("`{}` needs at least one resource cost", key),
            ));
        }
        for cost in &costs {
            if !cost.base_cost.is_finite() || cost.base_cost < 0.0 {
                return Err(Error::invalid_config(
                    "costs.base_cost",
                    format!("{} costs {} {}", key, cost.base_cost, cost.resource),
                ));
            }
        }

        Ok(Self {
            key,
            produces,
            costs,
            requirements: Vec::new(),
            params: params.validated()?,
        })
    }

    /// Attach level requirements
    pub fn with_requirements(mut self, requirements: Vec<LevelRequirement>) -> Result<Self> {
        for requirement in &requirements {
            if !requirement.amount_per_level.is_finite() || requirement.amount_per_level < 0.0 {
                return Err(Error::invalid_config(
                    "requirements.amount_per_level",
                    format!(
                        "{} requires {} {} per level",
                        self.key, requirement.amount_per_level, requirement.resource
                    ),
                ));
            }
        }
        self.requirements = requirements;
        Ok(self)
    }

    pub fn key(&self) -> &ActionKey {
        &self.key
    }

    /// Resource credited on every completed cycle
    pub fn produces(&self) -> &ResourceKind {
        &self.produces
    }

    pub fn costs(&self) -> &[ResourceCost] {
        &self.costs
    }

    pub fn requirements(&self) -> &[LevelRequirement] {
        &self.requirements
    }

    pub fn params(&self) -> &CurveParams {
        &self.params
    }

    pub fn production_for_level(&self, level: u32) -> f64 {
        self.params.production_for_level(level)
    }

    pub fn duration_for_level(&self, level: u32) -> f64 {
        self.params.duration_for_level(level)
    }

    pub fn target_payback(&self, level: u32) -> f64 {
        self.params.target_payback(level)
    }

    pub fn cost_for_level(&self, cost: &ResourceCost, level: u32) -> f64 {
        self.params.cost_for_level(cost.base_cost, level)
    }

    pub fn payback_time(&self, cost: &ResourceCost, level: u32) -> f64 {
        self.params.payback_for_level(cost.base_cost, level)
    }

    pub fn roi(&self, cost: &ResourceCost, level: u32) -> f64 {
        self.params.roi(cost.base_cost, level)
    }

    /// Find the base cost entry for a resource
    pub fn cost_entry(&self, resource: &ResourceKind) -> Option<&ResourceCost> {
        self.costs.iter().find(|c| &c.resource == resource)
    }

    /// Full price of buying the next level while at `level`
    ///
    /// Costs gated by a requirement are left out until the requirement's
    /// unlock level. A requirement on a resource without a base cost is
    /// charged `amount_per_level` for every level since unlocking.
    pub fn costs_for_level(&self, level: u32) -> Costs {
        let mut result = Costs::new();

        for cost in &self.costs {
            let locked = self
                .requirements
                .iter()
                .any(|r| r.resource == cost.resource && level < r.unlock_level);
            if !locked {
                *result.entry(cost.resource.clone()).or_insert(0.0) +=
                    self.cost_for_level(cost, level);
            }
        }

        for requirement in &self.requirements {
            if level < requirement.unlock_level || self.cost_entry(&requirement.resource).is_some()
            {
                continue;
            }
            let levels = (level - requirement.unlock_level + 1) as f64;
            *result.entry(requirement.resource.clone()).or_insert(0.0) +=
                requirement.amount_per_level * levels;
        }

        result
    }
}

/// Runtime settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Live updates are batched until this many seconds have accumulated
    pub tick_interval: f64,
    /// Multiplier applied to all production
    pub global_multiplier: f64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tick_interval: 0.1,
            global_multiplier: 1.0,
        }
    }
}

impl RuntimeConfig {
    /// Check the settings are usable
    pub fn validated(self) -> Result<Self> {
        if !self.tick_interval.is_finite() || self.tick_interval < 0.0 {
            return Err(Error::invalid_config(
                "tick_interval",
                format!("must be a non-negative number, got {}", self.tick_interval),
            ));
        }
        if !self.global_multiplier.is_finite() || self.global_multiplier < 0.0 {
            return Err(Error::invalid_config(
                "global_multiplier",
                format!("must be a non-negative number, got {}", self.global_multiplier),
            ));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    fn resources() -> (ResourceKind, ResourceKind, ResourceKind) {
        (
            ResourceKind::new("gold", "Gold"),
            ResourceKind::new("wood", "Wood"),
            ResourceKind::new("gems", "Gems"),
        )
    }

    #[test]
    fn test_new_rejects_missing_costs_and_bad_keys() {
        let (gold, _, _) = resources();
        let empty = PurchaseCurveConfig::new(
            ActionKey::new("farm", "wheat"),
            gold.clone(),
            Vec::new(),
            CurveParams::default(),
        );
        assert!(matches!(empty, Err(Error::InvalidConfig { field: "costs", .. })));

        let bad_key = PurchaseCurveConfig::new(
            ActionKey::new("", "wheat"),
            gold.clone(),
            vec![ResourceCost::new(gold.clone(), 10.0)],
            CurveParams::default(),
        );
        assert!(bad_key.is_err());

        let negative = PurchaseCurveConfig::new(
            ActionKey::new("farm", "wheat"),
            gold.clone(),
            vec![ResourceCost::new(gold, -1.0)],
            CurveParams::default(),
        );
        assert!(negative.is_err());
    }

    #[test]
    fn test_costs_for_level_with_requirements() {
        let (gold, wood, gems) = resources();
        let config = PurchaseCurveConfig::new(
            ActionKey::new("farm", "mill"),
            gold.clone(),
            vec![
                ResourceCost::new(gold.clone(), 10.0),
                ResourceCost::new(wood.clone(), 5.0),
            ],
            CurveParams::default(),
        )
        .unwrap()
        .with_requirements(vec![
            LevelRequirement {
                resource: wood.clone(),
                unlock_level: 5,
                amount_per_level: 0.0,
            },
            LevelRequirement {
                resource: gems.clone(),
                unlock_level: 3,
                amount_per_level: 2.0,
            },
        ])
        .unwrap();

        let at_two = config.costs_for_level(2);
        assert_eq!(at_two.len(), 1);
        assert!(approx(at_two[&gold], config.params().cost_for_level(10.0, 2)));

        let at_four = config.costs_for_level(4);
        assert!(!at_four.contains_key(&wood));
        assert!(approx(at_four[&gems], 4.0));

        let at_five = config.costs_for_level(5);
        assert_eq!(at_five.len(), 3);
        assert!(approx(at_five[&wood], config.params().cost_for_level(5.0, 5)));
        assert!(approx(at_five[&gems], 6.0));
    }

    #[test]
    fn test_delegates_to_params() {
        let (gold, _, _) = resources();
        let cost = ResourceCost::new(gold.clone(), 10.0);
        let config = PurchaseCurveConfig::new(
            ActionKey::new("farm", "wheat"),
            gold,
            vec![cost.clone()],
            CurveParams::default(),
        )
        .unwrap();

        assert!(approx(config.cost_for_level(&cost, 1), 345.0));
        assert!(approx(config.roi(&cost, 1), 1.0 / 345.0));
        assert!(approx(config.payback_time(&cost, 1), 345.0));
        assert!(approx(config.duration_for_level(1), 1.0));
    }

    #[test]
    fn test_runtime_config() {
        let config: RuntimeConfig = ron::from_str("(global_multiplier: 2.0)").unwrap();
        assert!(approx(config.tick_interval, 0.1));
        assert!(approx(config.global_multiplier, 2.0));
        assert!(config.validated().is_ok());

        let broken = RuntimeConfig {
            tick_interval: f64::NAN,
            ..RuntimeConfig::default()
        };
        assert!(broken.validated().is_err());
    }
}
