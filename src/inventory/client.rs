use crate::config::Config;
use crate::inventory::api_types::{self, ApiError, RowPatch, RETURN_REPRESENTATION};
use crate::inventory::types::{Motorcycle, MotorcycleDraft};
use async_trait::async_trait;
use color_eyre::{eyre::eyre, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{RequestBuilder, Response};
use std::time::Duration;
use url::Url;

/// Remote CRUD over the vehicle collection.
///
/// Every call may fail for any reason (transport, rejected by the backend);
/// callers are expected to treat all failures alike.
#[async_trait]
pub trait RecordStore: Send + Sync {
  /// All records, newest first
  async fn list(&self) -> Result<Vec<Motorcycle>>;

  /// Store a new record; the backend assigns its id
  async fn insert(&self, draft: &MotorcycleDraft) -> Result<Motorcycle>;

  /// Overwrite the stored record with the same id
  async fn update(&self, record: &Motorcycle) -> Result<()>;

  async fn delete(&self, id: &str) -> Result<()>;
}

/// PostgREST (Supabase) table client
#[derive(Clone)]
pub struct RestClient {
  http: reqwest::Client,
  table: Url,
}

impl RestClient {
  pub fn new(config: &Config) -> Result<Self> {
    let api_key = Config::get_api_key()?;
    Self::with_key(config, &api_key)
  }

  pub fn with_key(config: &Config, api_key: &str) -> Result<Self> {
    let base = Url::parse(&config.backend.url)
      .map_err(|e| eyre!("Invalid backend url {}: {}", config.backend.url, e))?;
    let table = api_types::table_url(&base, &config.backend.table)
      .map_err(|e| eyre!("Invalid table name {}: {}", config.backend.table, e))?;

    let mut headers = HeaderMap::new();
    let key = HeaderValue::from_str(api_key).map_err(|e| eyre!("Invalid API key: {}", e))?;
    let bearer = HeaderValue::from_str(&format!("Bearer {}", api_key))
      .map_err(|e| eyre!("Invalid API key: {}", e))?;
    headers.insert("apikey", key);
    headers.insert(AUTHORIZATION, bearer);

    let http = reqwest::Client::builder()
      .default_headers(headers)
      .timeout(Duration::from_secs(config.backend.timeout_secs))
      .build()
      .map_err(|e| eyre!("Failed to create HTTP client: {}", e))?;

    Ok(Self { http, table })
  }

  /// Send a request and turn non-2xx responses into errors with the
  /// backend's message attached.
  async fn send(&self, request: RequestBuilder, what: &str) -> Result<Response> {
    let response = request
      .send()
      .await
      .map_err(|e| eyre!("Failed to {}: {}", what, e))?;

    let status = response.status();
    if status.is_success() {
      return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(eyre!(
      "Failed to {}: {} {}",
      what,
      status,
      ApiError::describe(&body)
    ))
  }
}

#[async_trait]
impl RecordStore for RestClient {
  async fn list(&self) -> Result<Vec<Motorcycle>> {
    let request = self.http.get(api_types::list_url(&self.table));
    let response = self.send(request, "list motorcycles").await?;

    response
      .json::<Vec<Motorcycle>>()
      .await
      .map_err(|e| eyre!("Failed to parse motorcycles: {}", e))
  }

  async fn insert(&self, draft: &MotorcycleDraft) -> Result<Motorcycle> {
    let request = self
      .http
      .post(self.table.clone())
      .header("Prefer", RETURN_REPRESENTATION)
      .json(&[draft]);
    let response = self.send(request, "insert motorcycle").await?;

    let mut rows = response
      .json::<Vec<Motorcycle>>()
      .await
      .map_err(|e| eyre!("Failed to parse inserted motorcycle: {}", e))?;

    if rows.is_empty() {
      return Err(eyre!("Insert returned no rows"));
    }
    Ok(rows.swap_remove(0))
  }

  async fn update(&self, record: &Motorcycle) -> Result<()> {
    let request = self
      .http
      .patch(api_types::row_url(&self.table, &record.id))
      .json(&RowPatch::from(record));
    self
      .send(request, &format!("update motorcycle {}", record.id))
      .await?;
    Ok(())
  }

  async fn delete(&self, id: &str) -> Result<()> {
    let request = self.http.delete(api_types::row_url(&self.table, id));
    self
      .send(request, &format!("delete motorcycle {}", id))
      .await?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn config(url: &str) -> Config {
    serde_yaml::from_str(&format!("backend:\n  url: {}\n", url)).unwrap()
  }

  #[test]
  fn test_client_targets_configured_table() {
    let client = RestClient::with_key(&config("https://shop.supabase.co"), "anon-key").unwrap();
    assert_eq!(
      client.table.as_str(),
      "https://shop.supabase.co/rest/v1/motorcycles"
    );
  }

  #[test]
  fn test_invalid_url_rejected() {
    assert!(RestClient::with_key(&config("not a url"), "anon-key").is_err());
  }

  #[test]
  fn test_invalid_key_rejected() {
    assert!(RestClient::with_key(&config("https://shop.supabase.co"), "bad\nkey").is_err());
  }
}
