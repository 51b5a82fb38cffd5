use crate::inventory::fields::{Field, FieldKind, FormTab};
use crate::inventory::{CarStatus, Motorcycle, MotorcycleDraft, VehicleDetails};
use crate::ui::components::{InputResult, TextInput};
use crate::ui::renderfns::{status_color, truncate};
use crate::ui::view::{FormSubmission, ShortcutInfo, View, ViewAction, ViewContext};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs};

/// Tabbed form for adding a new vehicle or editing an existing one
pub struct RecordFormView {
  /// Set when editing an existing record
  id: Option<String>,
  created_at: Option<String>,
  status: CarStatus,
  details: VehicleDetails,
  tab: usize,
  list_state: ListState,
  /// Text field currently being typed into
  input: Option<TextInput>,
  saving: bool,
}

impl RecordFormView {
  /// Empty form for a vehicle the shop just bought
  pub fn new_record() -> Self {
    Self::build(None, None, CarStatus::Available, VehicleDetails::for_new_intake())
  }

  pub fn edit(record: Motorcycle) -> Self {
    Self::build(
      Some(record.id),
      record.created_at,
      record.status,
      record.details,
    )
  }

  fn build(
    id: Option<String>,
    created_at: Option<String>,
    status: CarStatus,
    details: VehicleDetails,
  ) -> Self {
    let mut list_state = ListState::default();
    list_state.select(Some(0));
    Self {
      id,
      created_at,
      status,
      details,
      tab: 0,
      list_state,
      input: None,
      saving: false,
    }
  }

  /// Id of the record being edited, None for a new record
  pub fn record_id(&self) -> Option<&str> {
    self.id.as_deref()
  }

  /// The backend rejected the save; allow another attempt
  pub fn save_failed(&mut self) {
    self.saving = false;
  }

  fn current_tab(&self) -> FormTab {
    FormTab::ALL[self.tab]
  }

  fn current_field(&self) -> Option<Field> {
    let idx = self.list_state.selected()?;
    self.current_tab().fields().get(idx).copied()
  }

  fn switch_tab(&mut self, forward: bool) {
    let count = FormTab::ALL.len();
    self.tab = if forward {
      (self.tab + 1) % count
    } else {
      (self.tab + count - 1) % count
    };
    self.list_state.select(Some(0));
  }

  fn move_selection(&mut self, down: bool) {
    let len = self.current_tab().fields().len();
    let idx = self.list_state.selected().unwrap_or(0);
    let next = if down {
      (idx + 1).min(len - 1)
    } else {
      idx.saturating_sub(1)
    };
    self.list_state.select(Some(next));
  }

  /// Enter on a field: toggle choices, start typing into text
  fn activate_field(&mut self) {
    let Some(field) = self.current_field() else {
      return;
    };
    match field {
      Field::Status => self.status = self.status.toggled(),
      Field::TransferType => {
        self.details.transfer_type = self.details.transfer_type.toggled();
      }
      _ => {
        let current = field.text(&self.details).unwrap_or_default();
        self.input = Some(TextInput::with_value(current));
      }
    }
  }

  fn display_value(&self, field: Field) -> String {
    match field {
      Field::Status => self.status.label().to_string(),
      Field::TransferType => self.details.transfer_type.label().to_string(),
      _ => field.text(&self.details).unwrap_or_default().to_string(),
    }
  }

  fn submission(&self) -> FormSubmission {
    match &self.id {
      Some(id) => FormSubmission::Update(Motorcycle {
        id: id.clone(),
        status: self.status,
        details: self.details.clone(),
        created_at: self.created_at.clone(),
      }),
      None => FormSubmission::Create(MotorcycleDraft {
        status: Some(self.status),
        details: self.details.clone(),
      }),
    }
  }

  fn commit_input(&mut self, value: String) {
    if let Some(field) = self.current_field() {
      field.set_text(&mut self.details, value);
    }
    self.input = None;
  }

  fn save(&mut self) -> ViewAction {
    self.saving = true;
    ViewAction::Submit(self.submission())
  }

  fn handle_input_key(&mut self, key: KeyEvent) -> ViewAction {
    let Some(input) = self.input.as_mut() else {
      return ViewAction::None;
    };
    match input.handle_key(key) {
      InputResult::Submitted(value) => self.commit_input(value),
      InputResult::Cancelled => self.input = None,
      InputResult::Consumed | InputResult::NotHandled => {}
    }
    ViewAction::None
  }

  fn render_fields(&mut self, frame: &mut Frame, area: Rect) {
    let tab = self.current_tab();
    let items: Vec<ListItem> = tab
      .fields()
      .iter()
      .map(|field| {
        let value = self.display_value(*field);
        let value_span = match field {
          Field::Status => Span::styled(value, Style::default().fg(status_color(self.status))),
          _ if value.is_empty() && field.kind() == FieldKind::Date => {
            Span::styled("YYYY-MM-DD", Style::default().fg(Color::DarkGray))
          }
          _ if value.is_empty() => Span::styled("-", Style::default().fg(Color::DarkGray)),
          _ => Span::raw(truncate(&value, 60)),
        };
        let line = Line::from(vec![
          Span::styled(
            format!("{:<20}", field.label()),
            Style::default().fg(Color::Cyan),
          ),
          value_span,
        ]);
        ListItem::new(line)
      })
      .collect();

    let title = if self.saving {
      " Saving... ".to_string()
    } else {
      format!(" {} ", tab.label())
    };

    let list = List::new(items)
      .block(
        Block::default()
          .title(title)
          .borders(Borders::ALL)
          .border_style(Style::default().fg(Color::Green)),
      )
      .highlight_style(
        Style::default()
          .bg(Color::DarkGray)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut self.list_state);
  }

  fn render_input(&self, frame: &mut Frame, area: Rect) {
    let (Some(input), Some(field)) = (&self.input, self.current_field()) else {
      let hint = Paragraph::new(" enter: edit/toggle   tab: next section   ctrl-s: save   esc: close")
        .style(Style::default().fg(Color::DarkGray));
      frame.render_widget(hint, area);
      return;
    };

    let prefix = format!(" {}: ", field.label());
    let paragraph = Paragraph::new(Line::from(vec![
      Span::styled(prefix.clone(), Style::default().fg(Color::Yellow)),
      Span::raw(input.value().to_string()),
    ]));
    frame.render_widget(paragraph, area);

    let cursor_x = area.x + (prefix.chars().count() + input.cursor_position()) as u16;
    frame.set_cursor_position((cursor_x.min(area.right().saturating_sub(1)), area.y));
  }
}

impl View for RecordFormView {
  fn handle_key(&mut self, key: KeyEvent, _ctx: &ViewContext) -> ViewAction {
    let save = key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL);

    // Saving mid-edit keeps what has been typed so far
    if let Some(input) = &self.input {
      if !save {
        return self.handle_input_key(key);
      }
      let value = input.value().to_string();
      self.commit_input(value);
    }

    match key.code {
      _ if save => return self.save(),
      KeyCode::Esc | KeyCode::Char('q') => return ViewAction::CloseForm,
      KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => self.switch_tab(true),
      KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => self.switch_tab(false),
      KeyCode::Char('j') | KeyCode::Down => self.move_selection(true),
      KeyCode::Char('k') | KeyCode::Up => self.move_selection(false),
      KeyCode::Enter | KeyCode::Char(' ') => self.activate_field(),
      _ => {}
    }
    ViewAction::None
  }

  fn render(&mut self, frame: &mut Frame, area: Rect, _ctx: &ViewContext) {
    let chunks = Layout::default()
      .direction(Direction::Vertical)
      .constraints([
        Constraint::Length(1), // Tabs
        Constraint::Min(3),    // Fields
        Constraint::Length(1), // Input line
      ])
      .split(area);

    let titles: Vec<Line> = FormTab::ALL
      .iter()
      .enumerate()
      .map(|(i, t)| Line::from(format!(" {}. {} ", i + 1, t.label())))
      .collect();
    let tabs = Tabs::new(titles)
      .select(self.tab)
      .style(Style::default().fg(Color::DarkGray))
      .highlight_style(Style::default().fg(Color::Green).bold())
      .divider("│");
    frame.render_widget(tabs, chunks[0]);

    self.render_fields(frame, chunks[1]);
    self.render_input(frame, chunks[2]);
  }

  fn breadcrumb_label(&self) -> String {
    match &self.id {
      Some(_) => format!("Edit {}", self.details.title()),
      None => "New motorcycle".to_string(),
    }
  }

  fn shortcuts(&self) -> Vec<ShortcutInfo> {
    vec![
      ShortcutInfo::new("enter", "edit").with_priority(10),
      ShortcutInfo::new("tab", "section").with_priority(20),
      ShortcutInfo::new("ctrl-s", "save").with_priority(30),
      ShortcutInfo::new("esc", "close").with_priority(90),
    ]
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::cache::DataSource;
  use crate::inventory::TransferType;

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
  }

  fn ctrl_s() -> KeyEvent {
    KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)
  }

  fn ctx() -> ViewContext<'static> {
    ViewContext {
      records: &[],
      loading: false,
      source: DataSource::Remote,
    }
  }

  fn press(form: &mut RecordFormView, code: KeyCode) -> ViewAction {
    form.handle_key(key(code), &ctx())
  }

  fn type_str(form: &mut RecordFormView, s: &str) {
    for c in s.chars() {
      press(form, KeyCode::Char(c));
    }
  }

  #[test]
  fn test_new_record_defaults() {
    let mut form = RecordFormView::new_record();
    let ViewAction::Submit(FormSubmission::Create(draft)) = form.handle_key(ctrl_s(), &ctx()) else {
      panic!("expected a create submission");
    };
    assert_eq!(draft.status, Some(CarStatus::Available));
    assert_eq!(draft.details.nationality, "ไทย");
    assert_eq!(draft.details.transfer_type, TransferType::Shop);
  }

  #[test]
  fn test_typing_into_field() {
    let mut form = RecordFormView::new_record();
    // Status, Image, Purchase date, Brand
    for _ in 0..3 {
      press(&mut form, KeyCode::Down);
    }
    assert_eq!(form.current_field(), Some(Field::Brand));

    press(&mut form, KeyCode::Enter);
    type_str(&mut form, "Honda");
    press(&mut form, KeyCode::Enter);

    assert!(form.input.is_none());
    assert_eq!(form.details.brand, "Honda");
  }

  #[test]
  fn test_save_while_typing_keeps_typed_text() {
    let mut form = RecordFormView::new_record();
    for _ in 0..3 {
      press(&mut form, KeyCode::Down);
    }
    press(&mut form, KeyCode::Enter);
    type_str(&mut form, "Suzuki");

    let ViewAction::Submit(FormSubmission::Create(draft)) = form.handle_key(ctrl_s(), &ctx()) else {
      panic!("expected a create submission");
    };
    assert_eq!(draft.details.brand, "Suzuki");
    assert!(form.input.is_none());
    assert!(form.saving);
  }

  #[test]
  fn test_cancelled_edit_keeps_value() {
    let mut form = RecordFormView::new_record();
    form.switch_tab(true);
    press(&mut form, KeyCode::Enter);
    type_str(&mut form, "Somchai");
    press(&mut form, KeyCode::Esc);

    assert_eq!(form.details.original_owner_name, "");
    // Esc leaves input mode but not the form
    assert!(form.input.is_none());
  }

  #[test]
  fn test_toggle_choices() {
    let mut form = RecordFormView::new_record();
    press(&mut form, KeyCode::Enter);
    assert_eq!(form.status, CarStatus::Sold);

    press(&mut form, KeyCode::BackTab);
    assert_eq!(form.current_tab(), FormTab::Sale);
    for _ in 0..4 {
      press(&mut form, KeyCode::Down);
    }
    assert_eq!(form.current_field(), Some(Field::TransferType));
    press(&mut form, KeyCode::Char(' '));
    assert_eq!(form.details.transfer_type, TransferType::SelfTransfer);
  }

  #[test]
  fn test_edit_submits_update_with_same_id() {
    let record = Motorcycle {
      id: "42".to_string(),
      status: CarStatus::Available,
      details: VehicleDetails::default(),
      created_at: Some("2024-05-01T00:00:00+00:00".to_string()),
    };
    let mut form = RecordFormView::edit(record.clone());
    press(&mut form, KeyCode::Enter);

    let action = form.handle_key(ctrl_s(), &ctx());
    let expected = Motorcycle {
      status: CarStatus::Sold,
      ..record
    };
    assert_eq!(action, ViewAction::Submit(FormSubmission::Update(expected)));
    assert_eq!(form.record_id(), Some("42"));
  }

  #[test]
  fn test_escape_closes_form() {
    let mut form = RecordFormView::new_record();
    assert_eq!(press(&mut form, KeyCode::Esc), ViewAction::CloseForm);
  }

  #[test]
  fn test_selection_stays_in_tab() {
    let mut form = RecordFormView::new_record();
    press(&mut form, KeyCode::Up);
    assert_eq!(form.current_field(), Some(Field::Status));

    form.switch_tab(true);
    for _ in 0..20 {
      press(&mut form, KeyCode::Down);
    }
    assert_eq!(form.current_field(), Some(Field::OriginalOwnerAddress));
  }
}
