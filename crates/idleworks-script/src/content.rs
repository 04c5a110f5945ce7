//! Resolved content: definitions turned into engine types
//!
//! Resolution mints exactly one [`ResourceKind`] per resource definition,
//! so every config and starting balance that names a resource shares the
//! same identity.

use crate::error::{Error, Result};
use crate::loader::GameDefs;
use crate::schema::PurchaseDef;
use idleworks_core::{
    ActionKey, DefId, Ledger, LevelRequirement, PurchaseCurveConfig, ResourceCatalog,
    ResourceCost, ResourceKind, RuntimeConfig,
};
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Engine-ready content
#[derive(Debug, Clone)]
pub struct Content {
    catalog: ResourceCatalog,
    configs: IndexMap<ActionKey, Arc<PurchaseCurveConfig>>,
    starting: Vec<(ResourceKind, f64)>,
    runtime: RuntimeConfig,
}

impl Content {
    /// Look up a resource kind by ID
    pub fn resource(&self, id: &str) -> Option<&ResourceKind> {
        self.catalog.get(&DefId::new(id))
    }

    pub fn catalog(&self) -> &ResourceCatalog {
        &self.catalog
    }

    /// Config of one action
    pub fn config(&self, key: &ActionKey) -> Option<&Arc<PurchaseCurveConfig>> {
        self.configs.get(key)
    }

    /// All configs in load order
    pub fn configs(&self) -> impl Iterator<Item = &Arc<PurchaseCurveConfig>> {
        self.configs.values()
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        self.runtime
    }

    /// Credit the starting balances of a fresh session
    pub fn seed_ledger(&self, ledger: &mut Ledger) {
        for (kind, amount) in &self.starting {
            ledger.add(kind, *amount);
        }
    }
}

impl GameDefs {
    /// Resolve names into identities and build validated configs
    pub fn resolve(&self) -> Result<Content> {
        let mut catalog = ResourceCatalog::new();
        for def in self.resources.values() {
            catalog.define(def.id.clone(), def.name.clone());
        }

        let mut configs = IndexMap::new();
        for (key, def) in &self.purchases {
            let config = resolve_purchase(&catalog, def)?;
            debug!(%key, "Purchase config resolved");
            configs.insert(key.clone(), Arc::new(config));
        }

        let mut starting = Vec::with_capacity(self.starting_resources.len());
        for (id, amount) in &self.starting_resources {
            let kind = lookup(&catalog, id, "starting_resources")?;
            starting.push((kind, *amount));
        }

        let runtime = self.settings.unwrap_or_default().validated()?;

        info!(
            resources = catalog.len(),
            purchases = configs.len(),
            "Content resolved"
        );
        Ok(Content {
            catalog,
            configs,
            starting,
            runtime,
        })
    }
}

fn resolve_purchase(catalog: &ResourceCatalog, def: &PurchaseDef) -> Result<PurchaseCurveConfig> {
    let key = def.key();
    let referrer = key.to_string();

    let produces = lookup(catalog, &def.produces, &referrer)?;
    let costs = def
        .costs
        .iter()
        .map(|c| Ok(ResourceCost::new(lookup(catalog, &c.resource, &referrer)?, c.base_cost)))
        .collect::<Result<Vec<_>>>()?;
    let requirements = def
        .requirements
        .iter()
        .map(|r| {
            Ok(LevelRequirement {
                resource: lookup(catalog, &r.resource, &referrer)?,
                unlock_level: r.unlock_level,
                amount_per_level: r.amount_per_level,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(PurchaseCurveConfig::new(key, produces, costs, def.curve)?.with_requirements(requirements)?)
}

fn lookup(catalog: &ResourceCatalog, id: &DefId, referrer: &str) -> Result<ResourceKind> {
    catalog
        .get(id)
        .cloned()
        .ok_or_else(|| Error::UnknownResource {
            resource: id.to_string(),
            referrer: referrer.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Loader;

    const FARM: &str = r#"
    (
        resources: [
            (id: "gold", name: "Gold"),
            (id: "wood", name: "Wood"),
        ],
        purchases: [
            (
                category: "farm",
                action: "wheat",
                produces: "gold",
                costs: [(resource: "gold", base_cost: 10.0)],
            ),
            (
                category: "forest",
                action: "saw",
                produces: "wood",
                costs: [(resource: "gold", base_cost: 50.0)],
                requirements: [(resource: "wood", unlock_level: 3, amount_per_level: 2.0)],
                curve: (base_duration: 2.0),
            ),
        ],
        starting_resources: [(resource: "gold", amount: 500.0)],
        settings: (global_multiplier: 1.5),
    )
    "#;

    fn load(content: &str) -> GameDefs {
        let mut loader = Loader::new();
        loader.load_str(content).unwrap();
        loader.finish()
    }

    #[test]
    fn test_resolve_shares_identities() {
        let content = load(FARM).resolve().unwrap();
        let gold = content.resource("gold").unwrap();
        let wood = content.resource("wood").unwrap();

        let wheat = content.config(&ActionKey::new("farm", "wheat")).unwrap();
        assert_eq!(wheat.produces(), gold);

        let saw = content.config(&ActionKey::new("forest", "saw")).unwrap();
        assert_eq!(saw.produces(), wood);
        assert_eq!(saw.costs()[0].resource, *gold);
        assert_eq!(saw.requirements()[0].resource, *wood);
        assert_eq!(saw.duration_for_level(1), 2.0);
        assert_eq!(content.configs().count(), 2);
        assert_eq!(content.runtime_config().global_multiplier, 1.5);
    }

    #[test]
    fn test_seed_ledger() {
        let content = load(FARM).resolve().unwrap();
        let mut ledger = Ledger::new();
        content.seed_ledger(&mut ledger);

        assert_eq!(ledger.get(content.resource("gold").unwrap()), 500.0);
        assert!(!ledger.has(content.resource("wood").unwrap()));
    }

    #[test]
    fn test_unknown_resource() {
        let defs = load(
            r#"(
                resources: [(id: "gold", name: "Gold")],
                purchases: [(
                    category: "farm",
                    action: "wheat",
                    produces: "grain",
                    costs: [(resource: "gold", base_cost: 10.0)],
                )],
            )"#,
        );
        match defs.resolve() {
            Err(Error::UnknownResource { resource, referrer }) => {
                assert_eq!(resource, "grain");
                assert_eq!(referrer, "farm/wheat");
            }
            other => panic!("expected unknown resource, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_curve_fails_resolution() {
        let defs = load(
            r#"(
                resources: [(id: "gold", name: "Gold")],
                purchases: [(
                    category: "farm",
                    action: "wheat",
                    produces: "gold",
                    costs: [(resource: "gold", base_cost: 10.0)],
                    curve: (base_duration: 0.0),
                )],
            )"#,
        );
        assert!(matches!(defs.resolve(), Err(Error::Core(_))));
    }
}
