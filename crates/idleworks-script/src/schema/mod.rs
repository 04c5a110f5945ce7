//! Schema definitions for RON content files

pub mod purchase;
pub mod resource;

pub use purchase::{CostDef, PurchaseDef, RequirementDef};
pub use resource::{ResourceDef, StartingResource};
