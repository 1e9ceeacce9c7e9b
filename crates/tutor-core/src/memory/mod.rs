//! Memory - Per-user conversation sessions
//!
//! - `SessionContext`: bounded conversation history for one user
//! - `SessionStore`: storage backend trait
//! - `MemoryStore`: in-process store with TTL expiry

mod session;
mod store;

pub use session::{SessionContext, DEFAULT_MAX_MESSAGES};
pub use store::{MemoryStore, SessionStore};
