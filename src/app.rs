use crate::cache::{DataSource, FallbackCache, MemoryStorage, SqliteStorage};
use crate::config::Config;
use crate::event::{Event, EventHandler};
use crate::inventory::{RecordStore, RestClient};
use crate::sync::{Reconciled, SyncController, SyncOutcome};
use crate::ui::components::{StatusKind, StatusLine};
use crate::ui::view::{FormSubmission, View, ViewAction, ViewContext};
use crate::ui::views::{RecordFormView, RecordListView};
use crate::ui::{self, Screen};
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{
  disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use futures::future::BoxFuture;
use ratatui::prelude::*;
use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

/// Main application state
pub struct App {
  /// Owns the record list; the only thing that talks to the backend
  controller: SyncController,

  /// Root view
  list: RecordListView,

  /// Add/edit form, drawn over the list while open
  form: Option<RecordFormView>,

  /// Header title
  title: String,

  /// Latest non-blocking message for the footer
  status: Option<StatusLine>,

  /// Event sender for async tasks
  event_tx: mpsc::UnboundedSender<Event>,

  /// Whether to quit
  should_quit: bool,
}

impl App {
  /// Wire the REST client and fallback storage described by `config`.
  pub fn from_config(config: &Config) -> Result<Self> {
    let store: Arc<dyn RecordStore> = Arc::new(RestClient::new(config)?);

    let cache: Arc<dyn FallbackCache> = if !config.cache.enabled {
      Arc::new(MemoryStorage::new())
    } else if let Some(path) = &config.cache.path {
      Arc::new(SqliteStorage::open_at(path)?)
    } else {
      Arc::new(SqliteStorage::open()?)
    };

    Ok(Self::new(
      SyncController::new(store, cache),
      config.display_title(),
    ))
  }

  pub fn new(controller: SyncController, title: String) -> Self {
    let (tx, _rx) = mpsc::unbounded_channel();

    Self {
      controller,
      list: RecordListView::new(),
      form: None,
      title,
      status: None,
      event_tx: tx,
      should_quit: false,
    }
  }

  /// Route finished background work to `tx`
  pub fn with_event_sender(mut self, tx: mpsc::UnboundedSender<Event>) -> Self {
    self.event_tx = tx;
    self
  }

  pub async fn run(&mut self) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    // Create event handler
    let mut events = EventHandler::new(Duration::from_millis(250));
    self.event_tx = events.sender();

    // Initial data load
    self.reload();

    let result = self.event_loop(&mut terminal, &mut events).await;

    // Cleanup terminal, even if the loop failed
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
  }

  async fn event_loop<B: Backend>(
    &mut self,
    terminal: &mut Terminal<B>,
    events: &mut EventHandler,
  ) -> Result<()> {
    while !self.should_quit {
      terminal.draw(|frame| ui::draw(frame, self.screen()))?;

      match events.next().await {
        Some(event) => self.handle_event(event),
        None => break,
      }
    }
    Ok(())
  }

  fn screen(&mut self) -> Screen<'_> {
    let breadcrumb = self.breadcrumb();
    let ctx = ViewContext {
      records: self.controller.records(),
      loading: self.controller.is_loading(),
      source: self.controller.source(),
    };
    let view: &mut dyn View = match &mut self.form {
      Some(form) => form,
      None => &mut self.list,
    };

    Screen {
      title: &self.title,
      ctx,
      view,
      breadcrumb,
      status: self.status.as_ref(),
    }
  }

  fn breadcrumb(&self) -> Vec<String> {
    let mut crumbs = vec![self.list.breadcrumb_label()];
    if let Some(form) = &self.form {
      crumbs.push(form.breadcrumb_label());
    }
    crumbs
  }

  fn handle_event(&mut self, event: Event) {
    match event {
      Event::Key(key) => self.handle_key(key),
      Event::Tick => {} // UI refresh happens automatically
      Event::Sync(outcome) => {
        let reconciled = self.controller.apply(outcome);
        self.on_reconciled(reconciled);
      }
    }
  }

  fn handle_key(&mut self, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
      self.should_quit = true;
      return;
    }

    let ctx = ViewContext {
      records: self.controller.records(),
      loading: self.controller.is_loading(),
      source: self.controller.source(),
    };
    let action = match &mut self.form {
      Some(form) => form.handle_key(key, &ctx),
      None => self.list.handle_key(key, &ctx),
    };

    self.perform(action);
  }

  fn perform(&mut self, action: ViewAction) {
    match action {
      ViewAction::None => {}
      ViewAction::Quit => self.should_quit = true,
      ViewAction::Reload => self.reload(),
      ViewAction::NewRecord => {
        self.form = Some(RecordFormView::new_record());
      }
      ViewAction::EditRecord(id) => {
        if let Some(record) = self.controller.find(&id).cloned() {
          self.controller.begin_edit(&id);
          self.form = Some(RecordFormView::edit(record));
        }
      }
      ViewAction::DeleteRecord(id) => {
        self.set_status(StatusKind::Info, "Deleting...");
        self.spawn(self.controller.request_delete(id));
      }
      ViewAction::Submit(FormSubmission::Create(draft)) => {
        self.set_status(StatusKind::Info, "Saving...");
        self.spawn(self.controller.request_create(draft));
      }
      ViewAction::Submit(FormSubmission::Update(record)) => {
        self.set_status(StatusKind::Info, "Saving...");
        self.spawn(self.controller.request_update(record));
      }
      ViewAction::CloseForm => {
        self.form = None;
        self.controller.cancel_edit();
      }
    }
  }

  fn reload(&mut self) {
    let pending = self.controller.request_load();
    self.spawn(pending);
  }

  /// Run a remote call in the background; its outcome comes back as an event.
  fn spawn(&self, pending: BoxFuture<'static, SyncOutcome>) {
    let tx = self.event_tx.clone();
    tokio::spawn(async move {
      let outcome = pending.await;
      if tx.send(Event::Sync(outcome)).is_err() {
        debug!("event loop gone, dropping sync outcome");
      }
    });
  }

  fn on_reconciled(&mut self, reconciled: Reconciled) {
    match reconciled {
      Reconciled::Loaded { source, count } => match source {
        DataSource::Remote => {
          self.set_status(StatusKind::Info, format!("Loaded {} motorcycles", count));
        }
        DataSource::Snapshot { .. } => self.set_status(
          StatusKind::Warning,
          format!("Backend unreachable, showing {} from local snapshot", count),
        ),
        DataSource::Empty => self.set_status(
          StatusKind::Error,
          "Backend unreachable and no local snapshot",
        ),
      },
      Reconciled::Created(Some(record)) => {
        if self.form.as_ref().is_some_and(|f| f.record_id().is_none()) {
          self.form = None;
        }
        self.set_status(
          StatusKind::Success,
          format!("Saved {}", record.details.title()),
        );
      }
      Reconciled::Created(None) => {
        if let Some(form) = self.form.as_mut().filter(|f| f.record_id().is_none()) {
          form.save_failed();
        }
        self.set_status(
          StatusKind::Error,
          "Could not save the new motorcycle (see log)",
        );
      }
      Reconciled::Updated { id, remote_ok } => {
        if self.form.as_ref().and_then(|f| f.record_id()) == Some(id.as_str()) {
          self.form = None;
        }
        self.report_local_change("Updated", remote_ok);
      }
      Reconciled::Deleted { remote_ok, .. } => {
        self.report_local_change("Deleted", remote_ok);
      }
    }
  }

  fn report_local_change(&mut self, verb: &str, remote_ok: bool) {
    if remote_ok {
      self.set_status(StatusKind::Success, verb);
    } else {
      self.set_status(
        StatusKind::Warning,
        format!("{} on this machine only, backend unreachable", verb),
      );
    }
  }

  fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
    self.status = Some(StatusLine::new(kind, text));
  }
}
