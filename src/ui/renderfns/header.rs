use crate::cache::DataSource;
use crate::ui::view::ShortcutInfo;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Draw the header bar with title, connection state, and shortcuts
pub fn draw_header(
  frame: &mut Frame,
  area: Rect,
  title: &str,
  source: DataSource,
  loading: bool,
  shortcuts: &[ShortcutInfo],
) {
  let (state, state_color) = if loading {
    ("loading…".to_string(), Color::Yellow)
  } else {
    source_label(source)
  };

  let mut spans = vec![
    Span::styled(" tongmotor ", Style::default().fg(Color::Cyan).bold()),
    Span::styled("│", Style::default().fg(Color::DarkGray)),
    Span::styled(format!(" {} ", title), Style::default().fg(Color::White)),
    Span::styled("│", Style::default().fg(Color::DarkGray)),
    Span::styled(format!(" {} ", state), Style::default().fg(state_color).bold()),
    Span::raw(" "),
  ];

  // Shortcuts - keys and brackets highlighted, descriptions dimmed
  let mut sorted: Vec<&ShortcutInfo> = shortcuts.iter().collect();
  sorted.sort_by_key(|s| s.priority);
  for shortcut in sorted {
    spans.push(Span::raw("  "));
    spans.push(Span::styled(
      format!("<{}>", shortcut.key),
      Style::default().fg(Color::Cyan),
    ));
    spans.push(Span::styled(
      format!(" {}", shortcut.label),
      Style::default().fg(Color::DarkGray),
    ));
  }

  let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));

  frame.render_widget(paragraph, area);
}

/// Short description of where the list came from
fn source_label(source: DataSource) -> (String, Color) {
  match source {
    DataSource::Remote => ("online".to_string(), Color::Green),
    DataSource::Snapshot {
      written_at: Some(at),
    } => (
      format!("offline · snapshot {}", at.format("%Y-%m-%d %H:%M")),
      Color::Yellow,
    ),
    DataSource::Snapshot { written_at: None } => ("offline · snapshot".to_string(), Color::Yellow),
    DataSource::Empty => ("offline".to_string(), Color::Red),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{TimeZone, Utc};

  #[test]
  fn test_source_label() {
    assert_eq!(source_label(DataSource::Remote).0, "online");
    assert_eq!(source_label(DataSource::Empty).0, "offline");

    let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
    assert_eq!(
      source_label(DataSource::Snapshot {
        written_at: Some(at)
      })
      .0,
      "offline · snapshot 2024-05-01 09:30"
    );
  }
}
