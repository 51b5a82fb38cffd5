use crate::inventory::{CarStatus, Motorcycle, StatusFilter};
use crate::ui::renderfns::{ensure_valid_selection, format_price, status_color, truncate};
use crate::ui::view::{ShortcutInfo, View, ViewAction, ViewContext};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap};

/// Deletion waiting for a yes/no answer
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingDelete {
  id: String,
  label: String,
}

/// Inventory list with a status filter and a card for the selected record
#[derive(Default)]
pub struct RecordListView {
  filter: StatusFilter,
  list_state: ListState,
  pending_delete: Option<PendingDelete>,
}

impl RecordListView {
  pub fn new() -> Self {
    let mut view = Self::default();
    view.list_state.select(Some(0));
    view
  }

  pub fn filter(&self) -> StatusFilter {
    self.filter
  }

  fn set_filter(&mut self, filter: StatusFilter) {
    self.filter = filter;
    self.list_state.select(Some(0));
  }

  fn selected<'a>(&self, ctx: &ViewContext<'a>) -> Option<&'a Motorcycle> {
    let idx = self.list_state.selected()?;
    self.filter.apply(ctx.records).get(idx).copied()
  }

  fn handle_confirm_key(&mut self, key: KeyEvent) -> ViewAction {
    let Some(pending) = self.pending_delete.take() else {
      return ViewAction::None;
    };
    match key.code {
      KeyCode::Char('y') | KeyCode::Char('Y') => ViewAction::DeleteRecord(pending.id),
      _ => ViewAction::None,
    }
  }

  fn render_filter_tabs(&self, frame: &mut Frame, area: Rect, ctx: &ViewContext) {
    let titles: Vec<Line> = StatusFilter::ALL
      .iter()
      .map(|f| Line::from(format!(" {} ({}) ", f.label(), f.count(ctx.records))))
      .collect();
    let selected = StatusFilter::ALL
      .iter()
      .position(|f| *f == self.filter)
      .unwrap_or(0);

    let tabs = Tabs::new(titles)
      .select(selected)
      .style(Style::default().fg(Color::DarkGray))
      .highlight_style(Style::default().fg(Color::Cyan).bold())
      .divider("│");
    frame.render_widget(tabs, area);
  }

  fn render_list(&mut self, frame: &mut Frame, area: Rect, ctx: &ViewContext) {
    let visible = self.filter.apply(ctx.records);
    ensure_valid_selection(&mut self.list_state, visible.len());

    let title = if ctx.loading {
      " Motorcycles (loading...) ".to_string()
    } else {
      format!(" Motorcycles ({}) ", visible.len())
    };

    let block = Block::default()
      .title(title)
      .title_alignment(Alignment::Center)
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Blue));

    if visible.is_empty() {
      let content = if ctx.loading {
        "Loading inventory from the database..."
      } else {
        "No motorcycles in this category. Press 'a' to add one."
      };
      let paragraph = Paragraph::new(content)
        .block(block)
        .style(Style::default().fg(Color::DarkGray));
      frame.render_widget(paragraph, area);
      return;
    }

    let items: Vec<ListItem> = visible
      .iter()
      .map(|bike| {
        let d = &bike.details;
        let line = Line::from(vec![
          Span::styled(
            format!("{:<10}", bike.status.label()),
            Style::default().fg(status_color(bike.status)),
          ),
          Span::raw(" "),
          Span::styled(
            format!("{:<28}", truncate(&d.title(), 28)),
            Style::default().fg(Color::White).bold(),
          ),
          Span::raw(" "),
          Span::styled(
            format!(
              "{:<24}",
              truncate(&format!("{} {}", d.reg_number, d.reg_province), 24)
            ),
            Style::default().fg(Color::Cyan),
          ),
          Span::raw(" "),
          Span::raw(format_price(&d.sale_price)),
        ]);
        ListItem::new(line)
      })
      .collect();

    let list = List::new(items)
      .block(block)
      .highlight_style(
        Style::default()
          .bg(Color::DarkGray)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut self.list_state);
  }

  fn render_card(&self, frame: &mut Frame, area: Rect, ctx: &ViewContext) {
    let block = Block::default()
      .title(" Registration book ")
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Green));

    let Some(bike) = self.selected(ctx) else {
      frame.render_widget(block, area);
      return;
    };
    let d = &bike.details;

    let dash = |s: &str| if s.is_empty() { "-".to_string() } else { s.to_string() };
    let label = |s: &'static str| Span::styled(s, Style::default().fg(Color::DarkGray));

    let lines = vec![
      Line::from(vec![
        Span::styled(d.title(), Style::default().fg(Color::White).bold()),
        Span::raw("  "),
        Span::styled(
          bike.status.label(),
          Style::default().fg(status_color(bike.status)),
        ),
      ]),
      Line::from(vec![
        label("Registration: "),
        Span::raw(dash(format!("{} {}", d.reg_number, d.reg_province).trim())),
      ]),
      Line::from(vec![
        label("Chassis no.: "),
        Span::raw(dash(&d.chassis_number)),
        Span::raw("   "),
        label("Engine no.: "),
        Span::raw(dash(&d.engine_number)),
      ]),
      Line::from(vec![
        label("Color: "),
        Span::raw(dash(&d.color)),
        Span::raw("   "),
        label("Sale price: "),
        Span::styled(format_price(&d.sale_price), Style::default().fg(Color::Cyan)),
      ]),
      Line::from(vec![
        label("Image: "),
        Span::raw(dash(d.image_url.as_deref().unwrap_or(""))),
      ]),
    ];

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
  }

  fn render_confirm(&self, frame: &mut Frame, area: Rect) {
    let Some(pending) = &self.pending_delete else {
      return;
    };

    let width = area.width.min(60);
    let popup = Rect {
      x: area.x + (area.width.saturating_sub(width)) / 2,
      y: area.y + area.height.saturating_sub(5) / 2,
      width,
      height: 5.min(area.height),
    };

    let text = vec![
      Line::from(format!("Delete {}?", pending.label)),
      Line::from(""),
      Line::from(vec![
        Span::styled("<y>", Style::default().fg(Color::Red).bold()),
        Span::raw(" delete   "),
        Span::styled("<any key>", Style::default().fg(Color::Cyan)),
        Span::raw(" keep"),
      ]),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(
      Block::default()
        .title(" Confirm ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red)),
    );

    frame.render_widget(Clear, popup);
    frame.render_widget(paragraph, popup);
  }
}

impl View for RecordListView {
  fn handle_key(&mut self, key: KeyEvent, ctx: &ViewContext) -> ViewAction {
    if self.pending_delete.is_some() {
      return self.handle_confirm_key(key);
    }

    match key.code {
      KeyCode::Char('j') | KeyCode::Down => {
        self.list_state.select_next();
      }
      KeyCode::Char('k') | KeyCode::Up => {
        self.list_state.select_previous();
      }
      KeyCode::Tab | KeyCode::Char('f') => self.set_filter(self.filter.next()),
      KeyCode::Char('1') => self.set_filter(StatusFilter::All),
      KeyCode::Char('2') => self.set_filter(StatusFilter::Only(CarStatus::Available)),
      KeyCode::Char('3') => self.set_filter(StatusFilter::Only(CarStatus::Sold)),
      KeyCode::Char('a') | KeyCode::Char('n') => return ViewAction::NewRecord,
      KeyCode::Enter | KeyCode::Char('e') => {
        if let Some(bike) = self.selected(ctx) {
          return ViewAction::EditRecord(bike.id.clone());
        }
      }
      KeyCode::Char('d') => {
        if let Some(bike) = self.selected(ctx) {
          self.pending_delete = Some(PendingDelete {
            id: bike.id.clone(),
            label: bike.details.title(),
          });
        }
      }
      KeyCode::Char('r') => return ViewAction::Reload,
      KeyCode::Char('q') | KeyCode::Esc => return ViewAction::Quit,
      _ => {}
    }
    ViewAction::None
  }

  fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &ViewContext) {
    let chunks = Layout::default()
      .direction(Direction::Vertical)
      .constraints([
        Constraint::Length(1), // Filter tabs
        Constraint::Min(3),    // List
        Constraint::Length(7), // Card
      ])
      .split(area);

    self.render_filter_tabs(frame, chunks[0], ctx);
    self.render_list(frame, chunks[1], ctx);
    self.render_card(frame, chunks[2], ctx);
    self.render_confirm(frame, area);
  }

  fn breadcrumb_label(&self) -> String {
    format!("Inventory [{}]", self.filter.label())
  }

  fn shortcuts(&self) -> Vec<ShortcutInfo> {
    vec![
      ShortcutInfo::new("a", "add").with_priority(10),
      ShortcutInfo::new("enter", "edit").with_priority(20),
      ShortcutInfo::new("d", "delete").with_priority(30),
      ShortcutInfo::new("tab", "filter").with_priority(40),
      ShortcutInfo::new("r", "reload").with_priority(50),
      ShortcutInfo::new("q", "quit").with_priority(90),
    ]
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::cache::DataSource;
  use crate::inventory::VehicleDetails;
  use crossterm::event::KeyModifiers;

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
  }

  fn bike(id: &str, brand: &str, status: CarStatus) -> Motorcycle {
    Motorcycle {
      id: id.to_string(),
      status,
      details: VehicleDetails {
        brand: brand.to_string(),
        ..VehicleDetails::default()
      },
      created_at: None,
    }
  }

  fn records() -> Vec<Motorcycle> {
    vec![
      bike("1", "Honda", CarStatus::Available),
      bike("2", "Yamaha", CarStatus::Sold),
      bike("3", "Suzuki", CarStatus::Available),
    ]
  }

  fn ctx(records: &[Motorcycle]) -> ViewContext<'_> {
    ViewContext {
      records,
      loading: false,
      source: DataSource::Remote,
    }
  }

  #[test]
  fn test_delete_needs_confirmation() {
    let records = records();
    let mut view = RecordListView::new();
    view.list_state.select(Some(0));

    assert_eq!(view.handle_key(key(KeyCode::Char('d')), &ctx(&records)), ViewAction::None);
    assert_eq!(
      view.handle_key(key(KeyCode::Char('y')), &ctx(&records)),
      ViewAction::DeleteRecord("1".to_string())
    );
  }

  #[test]
  fn test_delete_declined() {
    let records = records();
    let mut view = RecordListView::new();
    view.list_state.select(Some(0));

    view.handle_key(key(KeyCode::Char('d')), &ctx(&records));
    assert_eq!(view.handle_key(key(KeyCode::Char('n')), &ctx(&records)), ViewAction::None);
    assert!(view.pending_delete.is_none());

    // Back to normal handling afterwards
    assert_eq!(view.handle_key(key(KeyCode::Char('a')), &ctx(&records)), ViewAction::NewRecord);
  }

  #[test]
  fn test_edit_uses_filtered_selection() {
    let records = records();
    let mut view = RecordListView::new();

    view.handle_key(key(KeyCode::Char('3')), &ctx(&records));
    assert_eq!(view.filter(), StatusFilter::Only(CarStatus::Sold));
    assert_eq!(
      view.handle_key(key(KeyCode::Enter), &ctx(&records)),
      ViewAction::EditRecord("2".to_string())
    );
  }

  #[test]
  fn test_filter_cycles_with_tab() {
    let records = records();
    let mut view = RecordListView::new();
    view.handle_key(key(KeyCode::Tab), &ctx(&records));
    assert_eq!(view.filter(), StatusFilter::Only(CarStatus::Available));
    view.handle_key(key(KeyCode::Tab), &ctx(&records));
    view.handle_key(key(KeyCode::Tab), &ctx(&records));
    assert_eq!(view.filter(), StatusFilter::All);
  }

  #[test]
  fn test_no_selection_on_empty_list() {
    let mut view = RecordListView::new();
    assert_eq!(view.handle_key(key(KeyCode::Enter), &ctx(&[])), ViewAction::None);
    assert_eq!(view.handle_key(key(KeyCode::Char('d')), &ctx(&[])), ViewAction::None);
    assert!(view.pending_delete.is_none());
  }

  #[test]
  fn test_reload_and_quit() {
    let mut view = RecordListView::new();
    assert_eq!(view.handle_key(key(KeyCode::Char('r')), &ctx(&[])), ViewAction::Reload);
    assert_eq!(view.handle_key(key(KeyCode::Char('q')), &ctx(&[])), ViewAction::Quit);
  }
}
