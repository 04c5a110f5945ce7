//! Deferred resource credits
//!
//! A tick pass never touches the ledger while it walks the active set.
//! Each completed action pushes a [`Grant`] into a [`GrantSet`], and the
//! set is applied once the walk is over. This keeps the read phase (timers
//! and curves) separate from the write phase (ledger credits) and gives
//! offline catch-up a place to merge credits per resource.

use crate::{ActionKey, Costs, Ledger, ResourceKind};

/// Production earned by one action during one pass
#[derive(Debug, Clone, PartialEq)]
pub struct Grant {
    /// The action that completed
    pub key: ActionKey,
    /// Resource to credit
    pub resource: ResourceKind,
    /// Whole cycles completed during the pass
    pub cycles: f64,
    /// Amount to credit (already multiplied)
    pub amount: f64,
}

/// Grants collected during a pass, in activation order
#[derive(Debug, Clone, Default)]
pub struct GrantSet {
    grants: Vec<Grant>,
}

impl GrantSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, grant: Grant) {
        self.grants.push(grant);
    }

    pub fn len(&self) -> usize {
        self.grants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Grant> {
        self.grants.iter()
    }

    /// Consume the set and return the grants
    pub fn into_grants(self) -> Vec<Grant> {
        self.grants
    }

    /// Sum of all grants per resource, in first-granted order
    pub fn totals(&self) -> Costs {
        let mut totals = Costs::new();
        for grant in &self.grants {
            *totals.entry(grant.resource.clone()).or_insert(0.0) += grant.amount;
        }
        totals
    }

    /// Credit every grant individually
    pub fn apply(&self, ledger: &mut Ledger) {
        for grant in &self.grants {
            ledger.add(&grant.resource, grant.amount);
        }
    }

    /// Credit each resource once with its merged total
    pub fn apply_merged(&self, ledger: &mut Ledger) -> Costs {
        let totals = self.totals();
        for (resource, amount) in &totals {
            ledger.add(resource, *amount);
        }
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LedgerEvent;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn grant(action: &str, resource: &ResourceKind, amount: f64) -> Grant {
        Grant {
            key: ActionKey::new("farm", action),
            resource: resource.clone(),
            cycles: 1.0,
            amount,
        }
    }

    #[test]
    fn test_apply_merged_credits_once_per_resource() {
        let gold = ResourceKind::new("gold", "Gold");
        let wood = ResourceKind::new("wood", "Wood");
        let mut set = GrantSet::new();
        set.push(grant("wheat", &gold, 3.0));
        set.push(grant("saw", &wood, 1.5));
        set.push(grant("corn", &gold, 2.0));

        let mut ledger = Ledger::new();
        ledger.add(&gold, 1.0);
        let changes = Rc::new(RefCell::new(0));
        let counter = changes.clone();
        ledger.subscribe(move |e| {
            if matches!(e, LedgerEvent::Changed { .. }) {
                *counter.borrow_mut() += 1;
            }
        });

        let totals = set.apply_merged(&mut ledger);
        assert_eq!(totals.len(), 2);
        assert_eq!(ledger.get(&gold), 6.0);
        assert_eq!(ledger.get(&wood), 1.5);
        assert_eq!(*changes.borrow(), 2);
    }

    #[test]
    fn test_apply_individually() {
        let gold = ResourceKind::new("gold", "Gold");
        let mut set = GrantSet::new();
        set.push(grant("wheat", &gold, 3.0));
        set.push(grant("corn", &gold, 2.0));

        let mut ledger = Ledger::new();
        set.apply(&mut ledger);
        assert_eq!(ledger.get(&gold), 5.0);
        assert_eq!(set.into_grants().len(), 2);
    }
}
