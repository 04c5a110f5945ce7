//! Idleworks Core - Idle production simulation engine
//!
//! This crate provides the in-process engine of an idle game:
//! - Purchase curves (production, cost, duration, payback, ROI per level)
//! - A resource ledger with synchronous change notifications
//! - An action registry grouped by category, with an active set
//! - A tick runtime that resolves whole production cycles by division
//! - Offline catch-up through the same pass as live ticking
//! - Level purchases and the level persistence contract
//!
//! ## Model / Runtime split
//!
//! State lives in a [`Model`] (ledger, registry, clock, global
//! multiplier). A [`Runtime`] owns the live tick accumulator and the cycle
//! handlers and drives the model forward:
//!
//! ```
//! use idleworks_core::{ActionKey, CurveParams, Model, PurchaseCurveConfig, ResourceCost, ResourceKind, Runtime};
//! use std::sync::Arc;
//!
//! let gold = ResourceKind::new("gold", "Gold");
//! let config = PurchaseCurveConfig::new(
//!     ActionKey::new("farm", "wheat"),
//!     gold.clone(),
//!     vec![ResourceCost::new(gold.clone(), 10.0)],
//!     CurveParams::default(),
//! )
//! .unwrap();
//!
//! let mut model = Model::new();
//! model
//!     .registry
//!     .register_or_update_action("farm", "wheat", gold.clone(), Arc::new(config), 1);
//!
//! let mut runtime = Runtime::default();
//! runtime.advance(&mut model, 3.0);
//! assert_eq!(model.ledger.get(&gold), 3.0);
//! ```

pub mod config;
pub mod curve;
mod error;
pub mod event;
pub mod format;
pub mod grant;
mod identity;
pub mod ledger;
mod model;
pub mod persistence;
pub mod purchase;
pub mod registry;
mod resource;
pub mod runtime;
pub mod time;

pub use config::{LevelRequirement, PurchaseCurveConfig, ResourceCost, RuntimeConfig};
pub use curve::{CurveParams, PaybackCurve};
pub use error::{Error, Result};
pub use event::SubscriptionId;
pub use grant::{Grant, GrantSet};
pub use identity::{ActionKey, DefId};
pub use ledger::{Ledger, LedgerEvent};
pub use model::Model;
pub use persistence::{LevelStore, MemoryLevelStore};
pub use purchase::{Producer, PurchaseOutcome};
pub use registry::{IdleAction, IdleCategory, Registry};
pub use resource::{Costs, ResourceCatalog, ResourceKind};
pub use runtime::{CycleComplete, OfflineReport, Runtime, TickReport};
pub use time::{Clock, Speed, Tick};
