//! Resource ledger: current quantity of every resource
//!
//! Quantities never go below zero. A resource that was never added is
//! reported as zero but is not *present*; the first add or set of a
//! resource raises [`LedgerEvent::Added`] so views can create a row for it.
//! Every mutation goes through this type and is announced synchronously to
//! subscribers.

use crate::event::{SubscriptionId, Subscribers};
use crate::format;
use crate::{Costs, ResourceKind};
use indexmap::IndexMap;
use tracing::{debug, warn};

/// A change to the ledger
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerEvent {
    /// A resource was seen for the first time
    Added { kind: ResourceKind, amount: f64 },
    /// A quantity changed
    Changed {
        kind: ResourceKind,
        current: f64,
        previous: f64,
    },
    /// A resource entry was deleted
    Removed { kind: ResourceKind },
}

/// Quantities of all resources in a session
#[derive(Debug, Default)]
pub struct Ledger {
    balances: IndexMap<ResourceKind, f64>,
    subscribers: Subscribers<LedgerEvent>,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Current quantity (0 if absent)
    pub fn get(&self, kind: &ResourceKind) -> f64 {
        self.balances.get(kind).copied().unwrap_or(0.0)
    }

    /// Check if the resource has an entry
    pub fn has(&self, kind: &ResourceKind) -> bool {
        self.balances.contains_key(kind)
    }

    /// Iterate over all entries in first-seen order
    pub fn all(&self) -> impl Iterator<Item = (&ResourceKind, f64)> {
        self.balances.iter().map(|(kind, amount)| (kind, *amount))
    }

    /// Copy of all entries
    pub fn snapshot(&self) -> Costs {
        self.balances.clone()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.balances.len()
    }

    /// Check if the ledger has no entries
    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }

    /// Credit a resource; non-positive amounts are ignored
    ///
    /// Balances saturate at `f64::MAX` instead of overflowing to infinity.
    pub fn add(&mut self, kind: &ResourceKind, amount: f64) {
        if !amount.is_finite() {
            warn!(%kind, amount, "Rejected non-finite add");
            return;
        }
        if amount <= 0.0 {
            return;
        }

        match self.balances.get_mut(kind) {
            Some(balance) => {
                let previous = *balance;
                let sum = previous + amount;
                if !sum.is_finite() {
                    warn!(%kind, amount, "Balance saturated");
                }
                *balance = sum.min(f64::MAX);
                let current = *balance;
                debug!(
                    %kind,
                    added = %format::smart(amount),
                    total = %format::smart(current),
                    "Resource added"
                );
                self.subscribers.emit(&LedgerEvent::Changed {
                    kind: kind.clone(),
                    current,
                    previous,
                });
            }
            None => self.insert_new(kind, amount),
        }
    }

    /// Debit a resource
    ///
    /// Fails without side effects when the amount is not positive or the
    /// balance is short. Always checks the live balance.
    pub fn spend(&mut self, kind: &ResourceKind, amount: f64) -> bool {
        if !amount.is_finite() || amount <= 0.0 {
            warn!(%kind, amount, "Rejected spend of non-positive amount");
            return false;
        }

        let Some(balance) = self.balances.get_mut(kind) else {
            debug!(%kind, required = %format::smart(amount), "Cannot spend absent resource");
            return false;
        };
        if *balance < amount {
            debug!(
                %kind,
                required = %format::smart(amount),
                available = %format::smart(*balance),
                "Insufficient resource"
            );
            return false;
        }

        let previous = *balance;
        *balance -= amount;
        let current = *balance;
        debug!(
            %kind,
            spent = %format::smart(amount),
            left = %format::smart(current),
            "Resource spent"
        );
        self.subscribers.emit(&LedgerEvent::Changed {
            kind: kind.clone(),
            current,
            previous,
        });
        true
    }

    /// Overwrite a quantity; negative amounts are stored as 0
    pub fn set(&mut self, kind: &ResourceKind, amount: f64) {
        if amount.is_nan() || amount == f64::INFINITY {
            warn!(%kind, amount, "Rejected non-finite set");
            return;
        }
        let amount = if amount < 0.0 {
            warn!(%kind, amount, "Negative quantity set to zero");
            0.0
        } else {
            amount
        };

        match self.balances.get_mut(kind) {
            Some(balance) => {
                let previous = *balance;
                *balance = amount;
                debug!(%kind, total = %format::smart(amount), "Resource set");
                self.subscribers.emit(&LedgerEvent::Changed {
                    kind: kind.clone(),
                    current: amount,
                    previous,
                });
            }
            None => self.insert_new(kind, amount),
        }
    }

    /// Check a single resource can cover `amount`
    ///
    /// A non-positive amount costs nothing and is always affordable.
    pub fn can_afford(&self, kind: &ResourceKind, amount: f64) -> bool {
        if !amount.is_finite() {
            return false;
        }
        amount <= 0.0 || self.get(kind) >= amount
    }

    /// Check every resource in `costs` can be covered at once
    pub fn can_afford_all(&self, costs: &Costs) -> bool {
        costs
            .iter()
            .all(|(kind, amount)| self.can_afford(kind, *amount))
    }

    /// Spend all of `costs` or nothing
    pub fn spend_multiple(&mut self, costs: &Costs) -> bool {
        if !self.can_afford_all(costs) {
            return false;
        }
        for (kind, amount) in costs {
            if *amount > 0.0 {
                let spent = self.spend(kind, *amount);
                debug_assert!(spent, "affordability was checked for {}", kind);
            }
        }
        true
    }

    /// Delete a resource entry; returns false if it was absent
    pub fn remove(&mut self, kind: &ResourceKind) -> bool {
        if self.balances.shift_remove(kind).is_none() {
            return false;
        }
        debug!(%kind, "Resource removed");
        self.subscribers
            .emit(&LedgerEvent::Removed { kind: kind.clone() });
        true
    }

    /// Register a change handler
    pub fn subscribe(&mut self, handler: impl FnMut(&LedgerEvent) + 'static) -> SubscriptionId {
        self.subscribers.subscribe(handler)
    }

    /// Remove a change handler
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    fn insert_new(&mut self, kind: &ResourceKind, amount: f64) {
        self.balances.insert(kind.clone(), amount);
        debug!(%kind, amount = %format::smart(amount), "New resource");
        self.subscribers.emit(&LedgerEvent::Added {
            kind: kind.clone(),
            amount,
        });
        self.subscribers.emit(&LedgerEvent::Changed {
            kind: kind.clone(),
            current: amount,
            previous: 0.0,
        });
    }
}
