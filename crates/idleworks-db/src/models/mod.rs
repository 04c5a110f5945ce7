//! Database models for persistent storage.

mod level;
mod session;

pub use level::*;
pub use session::*;
