//! Purchase definition schema
//!
//! One entry per upgradeable action. Curve parameters fall back to their
//! defaults field by field, so a definition only lists what it tunes.

use idleworks_core::{ActionKey, CurveParams, DefId};
use serde::{Deserialize, Serialize};

/// Base cost in one resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostDef {
    pub resource: DefId,
    pub base_cost: f64,
}

/// A resource charged only from `unlock_level` on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequirementDef {
    pub resource: DefId,
    #[serde(default = "default_unlock_level")]
    pub unlock_level: u32,
    #[serde(default = "default_amount_per_level")]
    pub amount_per_level: f64,
}

fn default_unlock_level() -> u32 {
    1
}

fn default_amount_per_level() -> f64 {
    1.0
}

/// Definition of an upgradeable idle action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseDef {
    /// Category the action is grouped under
    pub category: DefId,
    /// Action id, unique within its category
    pub action: DefId,
    /// Display name
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Resource produced every cycle
    pub produces: DefId,
    /// Base costs, at least one
    #[serde(default)]
    pub costs: Vec<CostDef>,
    /// Extra resources unlocked at later levels
    #[serde(default)]
    pub requirements: Vec<RequirementDef>,
    /// Curve tuning
    #[serde(default)]
    pub curve: CurveParams,
}

impl PurchaseDef {
    pub fn key(&self) -> ActionKey {
        ActionKey::new(self.category.clone(), self.action.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purchase_def_ron() {
        let ron_str = r#"
        (
            category: "farm",
            action: "mill",
            name: "Windmill",
            produces: "flour",
            costs: [(resource: "gold", base_cost: 25.0)],
            requirements: [(resource: "wood", unlock_level: 5)],
            curve: (base_duration: 4.0, cost_multiplier: 1.2),
        )
        "#;

        let def: PurchaseDef = ron::from_str(ron_str).unwrap();
        assert_eq!(def.key(), ActionKey::new("farm", "mill"));
        assert_eq!(def.costs.len(), 1);
        assert_eq!(def.requirements[0].unlock_level, 5);
        assert_eq!(def.requirements[0].amount_per_level, 1.0);
        assert_eq!(def.curve.base_duration, 4.0);
        assert_eq!(def.curve.production_multiplier, 1.2);
        assert_eq!(def.curve.payback.late_level, 150);
    }
}
