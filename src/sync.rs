//! Keeps the in-memory record list in step with the remote store.
//!
//! Each operation is split in two so the UI can run the remote call on a
//! background task and apply the result when it comes back:
//!
//! ```ignore
//! let pending = controller.request_update(record);
//! tokio::spawn(async move {
//!     let outcome = pending.await;
//!     let _ = tx.send(Event::Sync(outcome));
//! });
//!
//! // later, on the UI thread
//! controller.apply(outcome);
//! ```
//!
//! Outcomes are applied in the order they resolve. Nothing serializes
//! operations against each other.
//!
//! Failure handling differs per operation:
//! - load falls back to the local snapshot
//! - create is dropped (there is no id to show it under)
//! - update/delete are applied locally anyway and the resulting list is
//!   written to the local snapshot

use futures::future::{BoxFuture, FutureExt};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::cache::{DataSource, FallbackCache, FALLBACK_KEY};
use crate::inventory::{Motorcycle, MotorcycleDraft, RecordStore};

/// Result of a remote call, ready to be applied to the controller
#[derive(Debug)]
pub enum SyncOutcome {
  Loaded(color_eyre::Result<Vec<Motorcycle>>),
  Created(color_eyre::Result<Motorcycle>),
  Updated {
    record: Motorcycle,
    result: color_eyre::Result<()>,
  },
  Deleted {
    id: String,
    result: color_eyre::Result<()>,
  },
}

/// What applying an outcome did to the list
#[derive(Debug, Clone, PartialEq)]
pub enum Reconciled {
  Loaded { source: DataSource, count: usize },
  /// The stored record, or None if the backend rejected it
  Created(Option<Motorcycle>),
  Updated { id: String, remote_ok: bool },
  Deleted { id: String, remote_ok: bool },
}

pub struct SyncController {
  store: Arc<dyn RecordStore>,
  cache: Arc<dyn FallbackCache>,
  records: Vec<Motorcycle>,
  loading: bool,
  editing: Option<String>,
  source: DataSource,
}

impl SyncController {
  pub fn new(store: Arc<dyn RecordStore>, cache: Arc<dyn FallbackCache>) -> Self {
    Self {
      store,
      cache,
      records: Vec::new(),
      loading: false,
      editing: None,
      source: DataSource::Empty,
    }
  }

  /// Current records, newest first
  pub fn records(&self) -> &[Motorcycle] {
    &self.records
  }

  pub fn is_loading(&self) -> bool {
    self.loading
  }

  pub fn source(&self) -> DataSource {
    self.source
  }

  pub fn find(&self, id: &str) -> Option<&Motorcycle> {
    self.records.iter().find(|r| r.id == id)
  }

  /// Id of the record currently open for editing
  pub fn editing(&self) -> Option<&str> {
    self.editing.as_deref()
  }

  pub fn begin_edit(&mut self, id: &str) {
    self.editing = Some(id.to_string());
  }

  pub fn cancel_edit(&mut self) {
    self.editing = None;
  }

  // --------------------------------------------------------------------------
  // Operations as request + apply
  // --------------------------------------------------------------------------

  /// Start a full reload. Sets the loading flag until the outcome is applied.
  pub fn request_load(&mut self) -> BoxFuture<'static, SyncOutcome> {
    self.loading = true;
    let store = Arc::clone(&self.store);
    async move { SyncOutcome::Loaded(store.list().await) }.boxed()
  }

  pub fn request_create(&self, draft: MotorcycleDraft) -> BoxFuture<'static, SyncOutcome> {
    let store = Arc::clone(&self.store);
    let draft = draft.with_defaults();
    async move { SyncOutcome::Created(store.insert(&draft).await) }.boxed()
  }

  pub fn request_update(&self, record: Motorcycle) -> BoxFuture<'static, SyncOutcome> {
    let store = Arc::clone(&self.store);
    async move {
      let result = store.update(&record).await;
      SyncOutcome::Updated { record, result }
    }
    .boxed()
  }

  /// The caller must have confirmed the deletion with the user already.
  pub fn request_delete(&self, id: String) -> BoxFuture<'static, SyncOutcome> {
    let store = Arc::clone(&self.store);
    async move {
      let result = store.delete(&id).await;
      SyncOutcome::Deleted { id, result }
    }
    .boxed()
  }

  /// Fold a finished remote call into the in-memory list.
  pub fn apply(&mut self, outcome: SyncOutcome) -> Reconciled {
    match outcome {
      SyncOutcome::Loaded(result) => self.finish_load(result),
      SyncOutcome::Created(result) => self.finish_create(result),
      SyncOutcome::Updated { record, result } => self.finish_update(record, result),
      SyncOutcome::Deleted { id, result } => self.finish_delete(id, result),
    }
  }

  fn finish_load(&mut self, result: color_eyre::Result<Vec<Motorcycle>>) -> Reconciled {
    match result {
      Ok(records) => {
        info!(count = records.len(), "loaded motorcycles from backend");
        self.records = records;
        self.source = DataSource::Remote;
      }
      Err(e) => {
        warn!(error = %e, "failed to load motorcycles, trying local snapshot");
        if let Some(records) = self.read_snapshot() {
          let written_at = self.cache.written_at(FALLBACK_KEY).unwrap_or_else(|e| {
            warn!(error = %e, "failed to read snapshot timestamp");
            None
          });
          info!(count = records.len(), "adopted local snapshot");
          self.records = records;
          self.source = DataSource::Snapshot { written_at };
        } else {
          self.records.clear();
          self.source = DataSource::Empty;
        }
      }
    }

    self.loading = false;
    Reconciled::Loaded {
      source: self.source,
      count: self.records.len(),
    }
  }

  fn finish_create(&mut self, result: color_eyre::Result<Motorcycle>) -> Reconciled {
    match result {
      Ok(record) => {
        info!(id = %record.id, "created motorcycle");
        self.records.insert(0, record.clone());
        Reconciled::Created(Some(record))
      }
      Err(e) => {
        error!(error = %e, "failed to create motorcycle");
        Reconciled::Created(None)
      }
    }
  }

  fn finish_update(&mut self, record: Motorcycle, result: color_eyre::Result<()>) -> Reconciled {
    let id = record.id.clone();
    if let Some(slot) = self.records.iter_mut().find(|r| r.id == id) {
      *slot = record;
    }
    // A late completion must not end an edit opened on another record
    if self.editing.as_deref() == Some(id.as_str()) {
      self.editing = None;
    }

    let remote_ok = match result {
      Ok(()) => {
        info!(%id, "updated motorcycle");
        true
      }
      Err(e) => {
        warn!(%id, error = %e, "failed to update motorcycle, keeping local change");
        self.write_snapshot();
        false
      }
    };

    Reconciled::Updated { id, remote_ok }
  }

  fn finish_delete(&mut self, id: String, result: color_eyre::Result<()>) -> Reconciled {
    self.records.retain(|r| r.id != id);

    let remote_ok = match result {
      Ok(()) => {
        info!(%id, "deleted motorcycle");
        true
      }
      Err(e) => {
        warn!(%id, error = %e, "failed to delete motorcycle, keeping local change");
        self.write_snapshot();
        false
      }
    };

    Reconciled::Deleted { id, remote_ok }
  }

  // --------------------------------------------------------------------------
  // Operations awaited in place
  // --------------------------------------------------------------------------

  pub async fn load(&mut self) -> Reconciled {
    let outcome = self.request_load().await;
    self.apply(outcome)
  }

  pub async fn create(&mut self, draft: MotorcycleDraft) -> Reconciled {
    let outcome = self.request_create(draft).await;
    self.apply(outcome)
  }

  pub async fn update(&mut self, record: Motorcycle) -> Reconciled {
    let outcome = self.request_update(record).await;
    self.apply(outcome)
  }

  pub async fn delete(&mut self, id: &str) -> Reconciled {
    let outcome = self.request_delete(id.to_string()).await;
    self.apply(outcome)
  }

  // --------------------------------------------------------------------------
  // Snapshot
  // --------------------------------------------------------------------------

  fn read_snapshot(&self) -> Option<Vec<Motorcycle>> {
    let raw = match self.cache.read(FALLBACK_KEY) {
      Ok(Some(raw)) => raw,
      Ok(None) => return None,
      Err(e) => {
        warn!(error = %e, "failed to read local snapshot");
        return None;
      }
    };

    match serde_json::from_str(&raw) {
      Ok(records) => Some(records),
      Err(e) => {
        warn!(error = %e, "local snapshot is unreadable, ignoring it");
        None
      }
    }
  }

  fn write_snapshot(&self) {
    let raw = match serde_json::to_string(&self.records) {
      Ok(raw) => raw,
      Err(e) => {
        warn!(error = %e, "failed to serialize local snapshot");
        return;
      }
    };

    if let Err(e) = self.cache.write(FALLBACK_KEY, &raw) {
      warn!(error = %e, "failed to write local snapshot");
    }
  }
}
