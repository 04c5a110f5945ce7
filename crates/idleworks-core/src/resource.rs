//! Resource identities
//!
//! A [`ResourceKind`] is compared by identity, not by value: two kinds
//! minted separately are different resources even if they share an id.
//! Kinds are minted once when content is loaded and cloned freely after.

use crate::DefId;
use indexmap::IndexMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

#[derive(Debug)]
struct ResourceInfo {
    id: DefId,
    name: String,
}

/// Identity handle for a resource type (gold, wood, goblins, ...)
#[derive(Clone)]
pub struct ResourceKind(Arc<ResourceInfo>);

impl ResourceKind {
    /// Mint a new, distinct resource kind
    pub fn new(id: impl Into<DefId>, name: impl Into<String>) -> Self {
        Self(Arc::new(ResourceInfo {
            id: id.into(),
            name: name.into(),
        }))
    }

    /// The definition ID this kind was minted from
    pub fn id(&self) -> &DefId {
        &self.0.id
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.0.name
    }
}

impl PartialEq for ResourceKind {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for ResourceKind {}

impl Hash for ResourceKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.0), state);
    }
}

impl fmt::Debug for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResourceKind({})", self.0.id)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.id)
    }
}

/// Amount of each resource, e.g. the price of an upgrade
pub type Costs = IndexMap<ResourceKind, f64>;

/// The set of resource kinds known to a session, looked up by ID
#[derive(Debug, Clone, Default)]
pub struct ResourceCatalog {
    kinds: IndexMap<DefId, ResourceKind>,
}

impl ResourceCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a resource; defining an existing ID returns the existing kind
    pub fn define(&mut self, id: impl Into<DefId>, name: impl Into<String>) -> ResourceKind {
        let id = id.into();
        self.kinds
            .entry(id.clone())
            .or_insert_with(|| ResourceKind::new(id, name))
            .clone()
    }

    /// Look up a kind by ID
    pub fn get(&self, id: &DefId) -> Option<&ResourceKind> {
        self.kinds.get(id)
    }

    /// Iterate over all kinds in definition order
    pub fn iter(&self) -> impl Iterator<Item = &ResourceKind> {
        self.kinds.values()
    }

    /// Number of defined kinds
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
