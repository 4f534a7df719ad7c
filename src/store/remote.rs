//! HTTP client for the hosted record database.

use crate::store::{Collection, RecordStore, StoreError, StoreResult};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Header carrying the project credential on every request.
const API_KEY_HEADER: &str = "X-API-Key";

/// Connection settings for the hosted record database.
///
/// Supplied explicitly at construction (or through the `[remote]` table
/// of the config file); the library never reads credentials from
/// ambient state.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the hosted record database.
    pub base_url: String,

    /// Project credential, sent as the `X-API-Key` header.
    pub project_key: String,
}

/// Client for the hosted record database.
///
/// The wire protocol is a key-addressed collection API:
///
/// - `GET  {base}/{collection}/items/{key}` returns the stored JSON
///   value, 404 when absent
/// - `PUT  {base}/{collection}/items/{key}` stores the request body
/// - `GET  {base}/{collection}/items` returns `{"items": [...]}`
///
/// There is no retry and no timeout beyond the client defaults; a
/// pending call cannot be aborted.
pub struct RemoteStore {
    client: reqwest::Client,
    base_url: String,
    project_key: String,
}

impl RemoteStore {
    /// Creates a client from explicit connection settings.
    pub fn new(config: RemoteConfig) -> Self {
        debug!(base_url = %config.base_url, "configured hosted record store");
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            project_key: config.project_key,
        }
    }

    fn items_url(&self, collection: Collection) -> String {
        format!("{}/{}/items", self.base_url, collection.key())
    }

    fn item_url(&self, collection: Collection, key: &str) -> String {
        format!("{}/{}/items/{}", self.base_url, collection.key(), key)
    }
}

#[async_trait]
impl RecordStore for RemoteStore {
    async fn get(&self, collection: Collection, key: &str) -> StoreResult<Option<Value>> {
        let response = self
            .client
            .get(self.item_url(collection, key))
            .header(API_KEY_HEADER, &self.project_key)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(StoreError::Status {
                code: response.status().as_u16(),
            });
        }

        Ok(Some(response.json().await?))
    }

    async fn put(&self, collection: Collection, key: &str, value: Value) -> StoreResult<()> {
        let response = self
            .client
            .put(self.item_url(collection, key))
            .header(API_KEY_HEADER, &self.project_key)
            .json(&value)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StoreError::Status {
                code: response.status().as_u16(),
            });
        }
        Ok(())
    }

    async fn fetch(&self, collection: Collection) -> StoreResult<Option<Value>> {
        let response = self
            .client
            .get(self.items_url(collection))
            .header(API_KEY_HEADER, &self.project_key)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(StoreError::Status {
                code: response.status().as_u16(),
            });
        }

        let body: Value = response.json().await?;
        match body.get("items") {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Array(items)) if items.is_empty() => Ok(None),
            // Pass anything else through raw; the adapter validates the
            // shape on read.
            Some(items) => Ok(Some(items.clone())),
        }
    }
}
