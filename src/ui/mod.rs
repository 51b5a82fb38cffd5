pub mod components;
pub mod renderfns;
pub mod view;
pub mod views;

use crate::ui::components::{draw_footer, StatusLine};
use crate::ui::renderfns::draw_header;
use crate::ui::view::{View, ViewContext};
use ratatui::prelude::*;

/// Everything one frame needs, borrowed from the app
pub struct Screen<'a> {
  pub title: &'a str,
  pub ctx: ViewContext<'a>,
  pub view: &'a mut dyn View,
  pub breadcrumb: Vec<String>,
  pub status: Option<&'a StatusLine>,
}

/// Main draw function
pub fn draw(frame: &mut Frame, mut screen: Screen) {
  let chunks = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // Header
      Constraint::Min(1),    // Main content
      Constraint::Length(1), // Footer
    ])
    .split(frame.area());

  let shortcuts = screen.view.shortcuts();
  draw_header(
    frame,
    chunks[0],
    screen.title,
    screen.ctx.source,
    screen.ctx.loading,
    &shortcuts,
  );

  screen.view.render(frame, chunks[1], &screen.ctx);

  draw_footer(frame, chunks[2], &screen.breadcrumb, screen.status);
}
