use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Tone of a status line message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
  Info,
  Success,
  Warning,
  Error,
}

/// One-line, non-blocking message shown in the footer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
  pub text: String,
  pub kind: StatusKind,
}

impl StatusLine {
  pub fn new(kind: StatusKind, text: impl Into<String>) -> Self {
    Self {
      text: text.into(),
      kind,
    }
  }

  fn color(&self) -> Color {
    match self.kind {
      StatusKind::Info => Color::White,
      StatusKind::Success => Color::Green,
      StatusKind::Warning => Color::Yellow,
      StatusKind::Error => Color::Red,
    }
  }
}

/// Draw the footer bar with view breadcrumb and the latest status message
pub fn draw_footer(frame: &mut Frame, area: Rect, breadcrumb: &[String], status: Option<&StatusLine>) {
  let mut spans = Vec::new();

  spans.push(Span::raw(" "));

  for (i, part) in breadcrumb.iter().enumerate() {
    if i > 0 {
      spans.push(Span::styled(" > ", Style::default().fg(Color::DarkGray)));
    }

    let style = if i == breadcrumb.len() - 1 {
      // Current view - highlighted
      Style::default().fg(Color::Cyan).bold()
    } else {
      Style::default().fg(Color::White)
    };

    spans.push(Span::styled(part.clone(), style));
  }

  if let Some(status) = status {
    spans.push(Span::styled("   │ ", Style::default().fg(Color::DarkGray)));
    spans.push(Span::styled(
      status.text.clone(),
      Style::default().fg(status.color()),
    ));
  }

  let line = Line::from(spans);
  let paragraph = Paragraph::new(line).style(Style::default().bg(Color::Black));

  frame.render_widget(paragraph, area);
}
