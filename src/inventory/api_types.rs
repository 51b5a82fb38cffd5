//! Request/response shapes for the PostgREST table endpoint.
//!
//! Kept apart from the domain types so the wire details (query syntax,
//! headers, error bodies) stay in one place.

use serde::{Deserialize, Serialize};
use url::Url;

use super::types::{CarStatus, Motorcycle, VehicleDetails};

/// Column the backend fills in on insert, used for newest-first ordering
pub const CREATED_AT_COLUMN: &str = "created_at";

/// Header asking PostgREST to echo the written rows back
pub const RETURN_REPRESENTATION: &str = "return=representation";

/// PATCH body for one row: every writable column, never the key or the
/// server-managed timestamp.
///
/// PostgREST leaves omitted columns untouched, so unset values must go out
/// as explicit nulls.
#[derive(Debug, Serialize)]
pub struct RowPatch<'a> {
  pub status: CarStatus,
  #[serde(flatten)]
  pub details: &'a VehicleDetails,
}

impl<'a> From<&'a Motorcycle> for RowPatch<'a> {
  fn from(record: &'a Motorcycle) -> Self {
    Self {
      status: record.status,
      details: &record.details,
    }
  }
}

/// Error body PostgREST sends with non-2xx responses
#[derive(Debug, Default, Deserialize)]
pub struct ApiError {
  #[serde(default)]
  pub message: String,
  pub code: Option<String>,
  pub details: Option<String>,
  pub hint: Option<String>,
}

impl ApiError {
  /// Best-effort description of a failed response body.
  pub fn describe(body: &str) -> String {
    match serde_json::from_str::<ApiError>(body) {
      Ok(err) if !err.message.is_empty() => {
        let mut text = err.message;
        if let Some(code) = err.code {
          text = format!("{} ({})", text, code);
        }
        if let Some(details) = err.details.filter(|d| !d.is_empty()) {
          text = format!("{}: {}", text, details);
        }
        if let Some(hint) = err.hint.filter(|h| !h.is_empty()) {
          text = format!("{} [hint: {}]", text, hint);
        }
        text
      }
      _ => body.trim().to_string(),
    }
  }
}

/// Endpoint for one table: `{base}/rest/v1/{table}`
pub fn table_url(base: &Url, table: &str) -> Result<Url, url::ParseError> {
  let mut root = base.clone();
  if !root.path().ends_with('/') {
    let path = format!("{}/", root.path());
    root.set_path(&path);
  }
  root.join("rest/v1/")?.join(table)
}

/// All rows, newest first
pub fn list_url(table: &Url) -> Url {
  let mut url = table.clone();
  url
    .query_pairs_mut()
    .append_pair("select", "*")
    .append_pair("order", &format!("{}.desc", CREATED_AT_COLUMN));
  url
}

/// Filter selecting exactly the row with the given id
pub fn row_url(table: &Url, id: &str) -> Url {
  let mut url = table.clone();
  url.query_pairs_mut().append_pair("id", &format!("eq.{}", id));
  url
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::inventory::fields::Field;

  fn base() -> Url {
    Url::parse("https://shop.supabase.co").unwrap()
  }

  #[test]
  fn test_table_url() {
    let url = table_url(&base(), "motorcycles").unwrap();
    assert_eq!(url.as_str(), "https://shop.supabase.co/rest/v1/motorcycles");
  }

  #[test]
  fn test_table_url_keeps_base_path() {
    let base = Url::parse("http://localhost:54321/proxy").unwrap();
    let url = table_url(&base, "motorcycles").unwrap();
    assert_eq!(url.as_str(), "http://localhost:54321/proxy/rest/v1/motorcycles");
  }

  #[test]
  fn test_list_url_orders_newest_first() {
    let table = table_url(&base(), "motorcycles").unwrap();
    let url = list_url(&table);
    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert_eq!(
      pairs,
      vec![
        ("select".to_string(), "*".to_string()),
        ("order".to_string(), "created_at.desc".to_string()),
      ]
    );
  }

  #[test]
  fn test_row_url() {
    let table = table_url(&base(), "motorcycles").unwrap();
    let url = row_url(&table, "abc-123");
    assert_eq!(url.query(), Some("id=eq.abc-123"));
  }

  #[test]
  fn test_describe_error_body() {
    let body = r#"{"message":"null value in column \"brand\"","code":"23502","details":null,"hint":null}"#;
    assert_eq!(
      ApiError::describe(body),
      "null value in column \"brand\" (23502)"
    );
  }

  #[test]
  fn test_describe_non_json_body() {
    assert_eq!(ApiError::describe("  Bad Gateway \n"), "Bad Gateway");
  }

  #[test]
  fn test_row_patch_sends_cleared_image_as_null() {
    let mut record = Motorcycle {
      id: "7".to_string(),
      status: CarStatus::Sold,
      details: VehicleDetails {
        image_url: Some("https://img/7.jpg".to_string()),
        brand: "Honda".to_string(),
        ..VehicleDetails::default()
      },
      created_at: Some("2024-05-01T10:00:00+00:00".to_string()),
    };
    Field::ImageUrl.set_text(&mut record.details, String::new());

    let body = serde_json::to_value(RowPatch::from(&record)).unwrap();

    assert_eq!(body.get("image_url"), Some(&serde_json::Value::Null));
    assert_eq!(body["status"], "ขายแล้ว");
    assert_eq!(body["brand"], "Honda");
    assert!(body.get("id").is_none());
    assert!(body.get("created_at").is_none());
  }
}
