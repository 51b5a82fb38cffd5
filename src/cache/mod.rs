//! Local fallback storage for offline support.
//!
//! Holds a serialized snapshot of the record list under a fixed key. It is
//! written when a remote update/delete fails and read when the initial load
//! cannot reach the remote store.

mod storage;
mod traits;

pub use storage::{MemoryStorage, SqliteStorage};
pub use traits::{DataSource, FallbackCache, FALLBACK_KEY};
