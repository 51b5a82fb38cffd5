use crate::inventory::CarStatus;
use ratatui::prelude::Color;
use ratatui::widgets::ListState;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max_len: usize) -> String {
  if s.chars().count() <= max_len {
    s.to_string()
  } else {
    let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", kept)
  }
}

/// Get the display color for a sale status
pub fn status_color(status: CarStatus) -> Color {
  match status {
    CarStatus::Available => Color::Green,
    CarStatus::Sold => Color::Red,
  }
}

/// Show a price string with thousands separators.
///
/// Prices are stored as free text; anything that isn't a plain number is
/// shown as typed.
pub fn format_price(raw: &str) -> String {
  let trimmed = raw.trim().replace(',', "");
  if trimmed.is_empty() {
    return "not set".to_string();
  }

  let (int_part, frac_part) = match trimmed.split_once('.') {
    Some((i, f)) => (i, f),
    None => (trimmed.as_str(), ""),
  };

  let is_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
  if int_part.is_empty() || !is_digits(int_part) || !is_digits(frac_part) {
    return raw.trim().to_string();
  }

  let int_part = int_part.trim_start_matches('0');
  let int_part = if int_part.is_empty() { "0" } else { int_part };

  let mut grouped = String::new();
  for (i, c) in int_part.chars().enumerate() {
    if i > 0 && (int_part.len() - i) % 3 == 0 {
      grouped.push(',');
    }
    grouped.push(c);
  }

  let frac_part = frac_part.trim_end_matches('0');
  if frac_part.is_empty() {
    format!("{} ฿", grouped)
  } else {
    format!("{}.{} ฿", grouped, frac_part)
  }
}

/// Keep a list selection inside `0..len`, selecting the first item when
/// there is something to select.
pub fn ensure_valid_selection(state: &mut ListState, len: usize) {
  match state.selected() {
    _ if len == 0 => state.select(None),
    Some(idx) if idx >= len => state.select(Some(len - 1)),
    None => state.select(Some(0)),
    Some(_) => {}
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_truncate_short_string() {
    assert_eq!(truncate("hello", 10), "hello");
  }

  #[test]
  fn test_truncate_exact_length() {
    assert_eq!(truncate("hello", 5), "hello");
  }

  #[test]
  fn test_truncate_long_string() {
    assert_eq!(truncate("hello world", 8), "hello...");
  }

  #[test]
  fn test_truncate_thai() {
    assert_eq!(truncate("ขอนแก่นเมือง", 6), "ขอน...");
  }

  #[test]
  fn test_status_color() {
    assert_eq!(status_color(CarStatus::Available), Color::Green);
    assert_eq!(status_color(CarStatus::Sold), Color::Red);
  }

  #[test]
  fn test_format_price() {
    assert_eq!(format_price("45000"), "45,000 ฿");
    assert_eq!(format_price("1234567"), "1,234,567 ฿");
    assert_eq!(format_price("999"), "999 ฿");
    assert_eq!(format_price("12500.50"), "12,500.5 ฿");
    assert_eq!(format_price("30,000"), "30,000 ฿");
  }

  #[test]
  fn test_format_price_unset_or_text() {
    assert_eq!(format_price(""), "not set");
    assert_eq!(format_price("  "), "not set");
    assert_eq!(format_price("call us"), "call us");
  }

  #[test]
  fn test_ensure_valid_selection() {
    let mut state = ListState::default();
    ensure_valid_selection(&mut state, 3);
    assert_eq!(state.selected(), Some(0));

    state.select(Some(5));
    ensure_valid_selection(&mut state, 3);
    assert_eq!(state.selected(), Some(2));

    ensure_valid_selection(&mut state, 0);
    assert_eq!(state.selected(), None);
  }
}
