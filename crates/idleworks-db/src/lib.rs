//! Idleworks DB - Database layer using native_db
//!
//! Provides persistent storage for:
//! - Purchased action levels (implements [`idleworks_core::LevelStore`])
//! - The last active time of a session, used for offline catch-up

mod error;
mod models;
mod queries;
mod store;

pub use error::{Error, Result};
pub use models::{StoredLevel, StoredSession};
pub use store::Store;
