//! Core trait for the local fallback store.

use chrono::{DateTime, Utc};
use color_eyre::Result;

/// Key under which the full record-list snapshot is kept
pub const FALLBACK_KEY: &str = "tong_motor_db";

/// Durable key-value slot local to this machine and user.
///
/// Values are opaque serialized strings. Both operations are synchronous;
/// they are only touched on the failure paths of remote calls.
pub trait FallbackCache: Send + Sync {
  /// Stored value for `key`, if any
  fn read(&self, key: &str) -> Result<Option<String>>;

  /// Replace the value stored for `key`
  fn write(&self, key: &str, value: &str) -> Result<()>;

  /// When `key` was last written, for backends that track it
  fn written_at(&self, _key: &str) -> Result<Option<DateTime<Utc>>> {
    Ok(None)
  }
}

/// Where the current in-memory list came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataSource {
  /// Nothing loaded yet, or the remote failed with no snapshot available
  #[default]
  Empty,
  /// Loaded from the remote store
  Remote,
  /// Remote unavailable, adopted the local snapshot
  Snapshot {
    written_at: Option<DateTime<Utc>>,
  },
}
