use crate::cache::DataSource;
use crate::inventory::{Motorcycle, MotorcycleDraft};
use crossterm::event::KeyEvent;
use ratatui::prelude::*;

/// A keyboard shortcut hint for display in the header
#[derive(Debug, Clone)]
pub struct ShortcutInfo {
  pub key: &'static str,
  pub label: &'static str,
  pub priority: u8, // Lower = shown first
}

impl ShortcutInfo {
  pub const fn new(key: &'static str, label: &'static str) -> Self {
    Self {
      key,
      label,
      priority: 100,
    }
  }

  pub const fn with_priority(mut self, priority: u8) -> Self {
    self.priority = priority;
    self
  }
}

/// Read-only state views render from
#[derive(Debug, Clone, Copy)]
pub struct ViewContext<'a> {
  pub records: &'a [Motorcycle],
  pub loading: bool,
  pub source: DataSource,
}

/// What the form hands back when the user saves
#[derive(Debug, Clone, PartialEq)]
pub enum FormSubmission {
  Create(MotorcycleDraft),
  Update(Motorcycle),
}

/// Actions that a view can request in response to user input
#[derive(Debug, Clone, PartialEq)]
pub enum ViewAction {
  /// No action needed
  None,
  Quit,
  Reload,
  /// Open an empty form
  NewRecord,
  /// Open the form on an existing record
  EditRecord(String),
  /// Delete a record the user has already confirmed
  DeleteRecord(String),
  Submit(FormSubmission),
  CloseForm,
}

/// Trait for view behavior
///
/// Views handle their own input modes (editing, confirmation) and return
/// actions for the App to execute. They never talk to the backend.
pub trait View {
  /// Handle a key event, returning an action for App to execute
  fn handle_key(&mut self, key: KeyEvent, ctx: &ViewContext) -> ViewAction;

  /// Render the view to the frame
  fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &ViewContext);

  /// Get the breadcrumb label for this view
  fn breadcrumb_label(&self) -> String;

  /// Get keyboard shortcuts to display in the header
  fn shortcuts(&self) -> Vec<ShortcutInfo> {
    vec![ShortcutInfo::new("q", "quit").with_priority(90)]
  }
}
