//! Catalog fetcher.
//!
//! Reads the list of downloadable documents from `[remote].catalog_url`.
//! The endpoint is expected to answer `200` with a JSON array of objects,
//! each carrying `file_id` and `filename`. A degraded server sometimes returns
//! a flat array of strings instead; that shape is reported as
//! [`CatalogError::Malformed`] rather than guessed at.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::config::RemoteConfig;
use crate::models::CatalogEntry;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("catalog endpoint returned HTTP {0}")]
    Status(StatusCode),

    #[error("catalog payload is malformed: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone)]
pub struct CatalogFetcher {
    client: reqwest::Client,
    url: String,
}

impl CatalogFetcher {
    pub fn new(client: reqwest::Client, config: &RemoteConfig) -> Self {
        Self {
            client,
            url: config.catalog_url.clone(),
        }
    }

    /// Fetches the catalog.
    ///
    /// `Ok` with an empty vector means the catalog is reachable but lists
    /// nothing; every failure is an `Err`.
    pub async fn fetch(&self) -> Result<Vec<CatalogEntry>, CatalogError> {
        tracing::debug!(url = %self.url, "fetching catalog");
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(CatalogError::Status(status));
        }

        let body = response.bytes().await?;
        let entries = parse_catalog(&body)?;
        tracing::debug!(entries = entries.len(), "catalog fetched");
        Ok(entries)
    }

    /// Like [`fetch`](Self::fetch), but any failure becomes an empty catalog.
    pub async fn fetch_or_empty(&self) -> Vec<CatalogEntry> {
        match self.fetch().await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(error = %e, "catalog unavailable, reporting no documents");
                Vec::new()
            }
        }
    }
}

/// Parses a catalog body: a JSON array in which every element is an object.
pub fn parse_catalog(body: &[u8]) -> Result<Vec<CatalogEntry>, CatalogError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| CatalogError::Malformed(e.to_string()))?;

    let Value::Array(items) = value else {
        return Err(CatalogError::Malformed(format!(
            "expected a JSON array, got {}",
            json_kind(&value)
        )));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(map) => Ok(CatalogEntry::from_object(map)),
            other => Err(CatalogError::Malformed(format!(
                "element {} is {}, expected an object",
                i,
                json_kind(&other)
            ))),
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
