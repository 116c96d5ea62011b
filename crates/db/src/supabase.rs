//! HTTP client for the hosted backend: PostgREST tables under `/rest/v1`
//! and the storage API under `/storage/v1`.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;

use crate::client::{ObjectStorage, PersistenceClient, SelectQuery, Table};
use crate::error::PersistenceError;

/// Endpoint and public API key of the hosted project.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
}

/// Client for one hosted project. Cheap to clone.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    client: reqwest::Client,
    base_url: String,
}

impl SupabaseClient {
    /// Build a client that sends `apikey` and bearer headers on every request.
    pub fn new(config: &SupabaseConfig) -> Result<Self, PersistenceError> {
        let mut headers = HeaderMap::new();
        let key = header_value(&config.anon_key)?;
        let bearer = header_value(&format!("Bearer {}", config.anon_key))?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    fn table_url(&self, table: Table) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn object_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url,
            bucket,
            path.trim_start_matches('/')
        )
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. PostgREST and the
    /// storage API both put a readable `message` in their error bodies.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, PersistenceError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| {
                v.get("message")
                    .or_else(|| v.get("error"))
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .unwrap_or(body);
        Err(PersistenceError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, PersistenceError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn check_status(response: reqwest::Response) -> Result<(), PersistenceError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

fn header_value(value: &str) -> Result<HeaderValue, PersistenceError> {
    HeaderValue::from_str(value).map_err(|_| {
        PersistenceError::InvalidHeader("API key contains characters not allowed in a header".into())
    })
}

/// PostgREST query parameters for a select.
fn select_params(query: &SelectQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![("select", query.columns.unwrap_or("*").to_string())];
    if let Some(order) = query.order {
        let direction = if order.ascending { "asc" } else { "desc" };
        params.push(("order", format!("{}.{direction}", order.column)));
    }
    if let Some(limit) = query.limit {
        params.push(("limit", limit.to_string()));
    }
    params
}

/// Total from a `Content-Range` header such as `0-9/42` or `*/0`.
fn parse_content_range_total(value: &str) -> Option<u64> {
    value.rsplit_once('/').and_then(|(_, total)| total.parse().ok())
}

#[async_trait]
impl PersistenceClient for SupabaseClient {
    async fn select(&self, table: Table, query: &SelectQuery) -> Result<Vec<Value>, PersistenceError> {
        let response = self
            .client
            .get(self.table_url(table))
            .query(&select_params(query))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn insert(&self, table: Table, row: Value) -> Result<Value, PersistenceError> {
        let response = self
            .client
            .post(self.table_url(table))
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await?;

        let rows: Vec<Value> = Self::parse_response(response).await?;
        rows.into_iter()
            .next()
            .ok_or(PersistenceError::MissingRow(table.as_str()))
    }

    async fn update(&self, table: Table, id: &str, patch: Value) -> Result<(), PersistenceError> {
        let response = self
            .client
            .patch(self.table_url(table))
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=minimal")
            .json(&patch)
            .send()
            .await?;

        Self::check_status(response).await
    }

    async fn delete(&self, table: Table, id: &str) -> Result<(), PersistenceError> {
        let response = self
            .client
            .delete(self.table_url(table))
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await?;

        Self::check_status(response).await
    }

    async fn count(&self, table: Table) -> Result<u64, PersistenceError> {
        let response = self
            .client
            .head(self.table_url(table))
            .query(&[("select", "id")])
            .header("Prefer", "count=exact")
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        response
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range_total)
            .ok_or(PersistenceError::MissingRow(table.as_str()))
    }
}

#[async_trait]
impl ObjectStorage for SupabaseClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, PersistenceError> {
        tracing::debug!(bucket, path, size = bytes.len(), "Uploading object");

        let response = self
            .client
            .post(self.object_url(bucket, path))
            .header(CONTENT_TYPE, content_type)
            .header("cache-control", "max-age=3600")
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await?;

        Self::check_status(response).await?;
        Ok(path.to_string())
    }

    async fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), PersistenceError> {
        let response = self
            .client
            .delete(format!("{}/storage/v1/object/{}", self.base_url, bucket))
            .json(&serde_json::json!({ "prefixes": paths }))
            .send()
            .await?;

        Self::check_status(response).await
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn client() -> SupabaseClient {
        SupabaseClient::new(&SupabaseConfig {
            url: "https://proj.supabase.co/".into(),
            anon_key: "anon".into(),
        })
        .unwrap()
    }

    #[test]
    fn urls() {
        let c = client();
        assert_eq!(c.table_url(Table::Planifruits), "https://proj.supabase.co/rest/v1/planifruits");
        assert_eq!(
            c.object_url("images", "/uploads/a.jpg"),
            "https://proj.supabase.co/storage/v1/object/images/uploads/a.jpg"
        );
        assert_eq!(
            c.public_url("images", "uploads/a.jpg"),
            "https://proj.supabase.co/storage/v1/object/public/images/uploads/a.jpg"
        );
    }

    #[test]
    fn select_parameters() {
        let params = select_params(&SelectQuery::all().newest_first().limit(1));
        assert_eq!(
            params,
            vec![
                ("select", "*".to_string()),
                ("order", "created_at.desc".to_string()),
                ("limit", "1".to_string()),
            ]
        );
        let params = select_params(&SelectQuery::all().columns("id"));
        assert_eq!(params, vec![("select", "id".to_string())]);
    }

    #[test]
    fn key_with_control_characters_is_rejected() {
        let result = SupabaseClient::new(&SupabaseConfig {
            url: "https://proj.supabase.co".into(),
            anon_key: "anon\nkey".into(),
        });
        assert_matches!(result, Err(PersistenceError::InvalidHeader(_)));
    }

    #[test]
    fn content_range() {
        assert_eq!(parse_content_range_total("0-9/42"), Some(42));
        assert_eq!(parse_content_range_total("*/0"), Some(0));
        assert_eq!(parse_content_range_total("0-9/*"), None);
    }
}
