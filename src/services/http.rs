//! HTTP DataSource
//!
//! Fetches a whole collection with one large page request:
//! `GET {base_url}/api/{collection}?limit={fetch_limit}`.

use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use super::{Credential, DataSource};
use crate::config::ApiConfig;
use crate::domain::{EntityType, Record, RecordSet};
use crate::error::{Error, Result};

/// CRM REST API client
#[derive(Debug, Clone)]
pub struct HttpDataSource {
    client: Client,
    base_url: String,
    fetch_limit: usize,
}

impl HttpDataSource {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .user_agent(concat!("crm-browser/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            fetch_limit: config.fetch_limit.max(1),
        })
    }

    /// Collection endpoint for `entity`
    pub fn collection_url(&self, entity: EntityType) -> String {
        format!("{}/api/{}", self.base_url, entity.collection())
    }

    /// Extract records from a response body.
    ///
    /// Accepts a bare array, `{"data": [...]}` or `{"<collection>": [...]}`.
    /// Non-object items are skipped.
    pub fn parse_records(entity: EntityType, body: Value) -> Result<Vec<Record>> {
        let (items, total) = match body {
            Value::Array(items) => (items, None),
            Value::Object(mut map) => {
                let total = reported_total(&map);
                let items = match map.remove("data") {
                    Some(Value::Array(items)) => items,
                    _ => match map.remove(entity.collection()) {
                        Some(Value::Array(items)) => items,
                        _ => {
                            return Err(Error::Invalid {
                                message: format!("No {} array in response", entity.collection()),
                            });
                        }
                    },
                };
                (items, total)
            }
            other => {
                return Err(Error::Invalid {
                    message: format!("Unexpected response body: {}", type_name(&other)),
                });
            }
        };

        let received = items.len();
        let records: Vec<Record> = items.into_iter().filter_map(|item| Record::try_from(item).ok()).collect();
        if records.len() < received {
            tracing::warn!(
                entity = %entity,
                skipped = received - records.len(),
                "Skipped non-object items in response"
            );
        }
        if let Some(total) = total.filter(|&t| t > received) {
            tracing::warn!(
                entity = %entity,
                total,
                received,
                "Collection truncated at fetch limit"
            );
        }
        Ok(records)
    }
}

impl DataSource for HttpDataSource {
    async fn fetch_all(&self, entity: EntityType, credential: &Credential) -> Result<RecordSet> {
        let url = self.collection_url(entity);
        tracing::info!(entity = %entity, url = %url, limit = self.fetch_limit, "Fetching records");

        let mut request = self.client.get(&url).query(&[("limit", self.fetch_limit)]);
        if let Some(token) = credential.token() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message: api_error_message(&body, status.canonical_reason()),
            });
        }

        let body: Value = response.json().await?;
        let records = Self::parse_records(entity, body)?;
        tracing::info!(entity = %entity, count = records.len(), "Fetched records");
        Ok(Arc::new(records))
    }
}

/// Total count reported next to the items, if any
fn reported_total(map: &serde_json::Map<String, Value>) -> Option<usize> {
    let from = |value: Option<&Value>| value.and_then(Value::as_u64).map(|n| n as usize);
    from(map.get("total"))
        .or_else(|| from(map.get("totalCount")))
        .or_else(|| from(map.get("pagination").and_then(|p| p.get("total"))))
        .or_else(|| from(map.get("meta").and_then(|m| m.get("total"))))
}

/// Best message from an error body: `message`, `error`, raw text, or the reason phrase
fn api_error_message(body: &str, reason: Option<&str>) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error"] {
            if let Some(text) = value.get(key).and_then(Value::as_str) {
                return text.to_string();
            }
        }
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    reason.unwrap_or("Request failed").to_string()
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn source(base_url: &str) -> HttpDataSource {
        let config = ApiConfig {
            base_url: base_url.to_string(),
            ..ApiConfig::default()
        };
        HttpDataSource::new(&config).expect("client")
    }

    #[test]
    fn test_collection_url() {
        let source = source("https://crm.example.com/");
        assert_eq!(
            source.collection_url(EntityType::Company),
            "https://crm.example.com/api/companies"
        );
        assert_eq!(source.fetch_limit, crate::constants::FETCH_ALL_LIMIT);
    }

    #[test]
    fn test_parse_bare_array() {
        let records = HttpDataSource::parse_records(
            EntityType::Contact,
            json!([{"id": "1"}, {"id": "2"}, "junk"]),
        )
        .expect("parse");
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_parse_data_envelope() {
        let body = json!({"data": [{"id": "d1"}], "pagination": {"total": 5000}});
        let records = HttpDataSource::parse_records(EntityType::Deal, body).expect("parse");
        assert_eq!(records[0].id().as_deref(), Some("d1"));
    }

    #[test]
    fn test_parse_collection_key() {
        let body = json!({"leads": [{"id": 7}], "total": 1});
        let records = HttpDataSource::parse_records(EntityType::Lead, body).expect("parse");
        assert_eq!(records[0].id().as_deref(), Some("7"));
    }

    #[test]
    fn test_parse_rejects_unknown_shape() {
        assert!(HttpDataSource::parse_records(EntityType::Task, json!({"items": []})).is_err());
        assert!(HttpDataSource::parse_records(EntityType::Task, json!("nope")).is_err());
    }

    #[test]
    fn test_reported_total() {
        let map = |v: Value| v.as_object().cloned().unwrap_or_default();
        assert_eq!(reported_total(&map(json!({"total": 12}))), Some(12));
        assert_eq!(reported_total(&map(json!({"meta": {"total": 3}}))), Some(3));
        assert_eq!(reported_total(&map(json!({"data": []}))), None);
    }

    #[test]
    fn test_api_error_message() {
        assert_eq!(api_error_message(r#"{"message":"Token expired"}"#, Some("Unauthorized")), "Token expired");
        assert_eq!(api_error_message(r#"{"error":"Forbidden"}"#, None), "Forbidden");
        assert_eq!(api_error_message("gateway down", None), "gateway down");
        assert_eq!(api_error_message("", Some("Not Found")), "Not Found");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_http_error() {
        let config = ApiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 2,
            ..ApiConfig::default()
        };
        let source = HttpDataSource::new(&config).expect("client");
        let result = source.fetch_all(EntityType::Contact, &Credential::anonymous()).await;
        assert!(matches!(result, Err(Error::Http { .. })));
    }
}
