//! Idleworks Script - RON content loader and schema definitions
//!
//! Loads game content from RON files. A file may hold any of these
//! sections:
//! - `resources` - resource definitions
//! - `purchases` - upgradeable actions with their costs and curves
//! - `starting_resources` - balances of a fresh session
//! - `settings` - runtime settings
//!
//! [`GameDefs::resolve`] then turns the definitions into engine types.

mod content;
mod error;
mod loader;
mod schema;

pub use content::Content;
pub use error::{Error, Result};
pub use loader::{GameDefs, Loader};
pub use schema::{CostDef, PurchaseDef, RequirementDef, ResourceDef, StartingResource};
