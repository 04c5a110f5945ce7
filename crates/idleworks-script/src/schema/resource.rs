//! Resource definition schema

use idleworks_core::DefId;
use serde::{Deserialize, Serialize};

/// Definition of a resource type (e.g., gold, wood, goblins)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceDef {
    /// Unique identifier for this resource
    pub id: DefId,
    /// Display name
    pub name: String,
    /// Description
    #[serde(default)]
    pub description: String,
    /// Icon identifier for UI
    #[serde(default)]
    pub icon: Option<String>,
}

impl ResourceDef {
    /// Create a new resource definition
    pub fn new(id: impl Into<DefId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            icon: None,
        }
    }
}

/// Amount of a resource granted when a session starts fresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartingResource {
    pub resource: DefId,
    pub amount: f64,
}
