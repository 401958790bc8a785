//! Apify dataset store client
//!
//! Wraps the two dataset endpoints the connector needs: dataset metadata and
//! paged item listing.

use crate::error::{ConnectorError, ConnectorResult};
use crate::pagination::Page;
use crate::types::SensitiveString;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

/// Default Apify API base URL
pub const APIFY_BASE_URL: &str = "https://api.apify.com/v2";

/// Access to a remote dataset store
#[async_trait]
pub trait DatasetStore: Send + Sync {
    /// Fetch dataset metadata, including the total item count.
    ///
    /// A dataset that does not exist is a [`ConnectorError::NotFound`] whose
    /// message names the dataset id.
    async fn get_dataset(&self, dataset_id: &str) -> ConnectorResult<DatasetMetadata>;

    /// Fetch one page of dataset items.
    ///
    /// `clean` restricts the listing to non-empty items with hidden fields
    /// stripped, as the remote defines it.
    async fn list_items(
        &self,
        dataset_id: &str,
        clean: bool,
        offset: u64,
        limit: u64,
    ) -> ConnectorResult<Page>;
}

/// Dataset metadata returned by the store
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetMetadata {
    /// Dataset id
    pub id: String,

    /// Optional human-readable name
    #[serde(default)]
    pub name: Option<String>,

    /// Total number of items
    #[serde(default)]
    pub item_count: u64,

    /// Number of items in the clean view, when the remote reports it
    #[serde(default)]
    pub clean_item_count: Option<u64>,
}

impl DatasetMetadata {
    /// Item count for the requested view.
    ///
    /// The clean view can be smaller than the raw one; fall back to the raw
    /// count when the remote does not report a clean count.
    pub fn count_for(&self, clean: bool) -> u64 {
        if clean {
            self.clean_item_count.unwrap_or(self.item_count)
        } else {
            self.item_count
        }
    }
}

/// Apify wraps single objects in a `data` envelope
#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

/// HTTP client for the Apify dataset API
pub struct ApifyClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<SensitiveString>,
}

impl ApifyClient {
    /// Create a client against the public Apify API
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: APIFY_BASE_URL.to_string(),
            token: None,
        }
    }

    /// Override the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Attach an API token, sent as the `token` query parameter
    pub fn with_token(mut self, token: impl Into<SensitiveString>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn apply_token(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => req.query(&[("token", token.expose_secret())]),
            None => req,
        }
    }
}

impl Default for ApifyClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DatasetStore for ApifyClient {
    async fn get_dataset(&self, dataset_id: &str) -> ConnectorResult<DatasetMetadata> {
        let url = format!("{}/datasets/{}", self.base_url, dataset_id);
        let resp = self
            .apply_token(self.http.get(&url))
            .send()
            .await
            .map_err(transport_error)?;

        let status = resp.status();
        if status.is_success() {
            let envelope: DataEnvelope<DatasetMetadata> = resp
                .json()
                .await
                .map_err(|e| ConnectorError::Serialization(e.to_string()))?;
            return Ok(envelope.data);
        }
        Err(status_error(
            status,
            &format!("dataset {dataset_id} does not exist or is not accessible"),
        ))
    }

    async fn list_items(
        &self,
        dataset_id: &str,
        clean: bool,
        offset: u64,
        limit: u64,
    ) -> ConnectorResult<Page> {
        let url = format!("{}/datasets/{}/items", self.base_url, dataset_id);
        let resp = self
            .apply_token(self.http.get(&url).query(&[
                ("format", "json".to_string()),
                ("clean", clean.to_string()),
                ("offset", offset.to_string()),
                ("limit", limit.to_string()),
            ]))
            .send()
            .await
            .map_err(transport_error)?;

        let status = resp.status();
        if status.is_success() {
            let items: Vec<serde_json::Value> = resp
                .json()
                .await
                .map_err(|e| ConnectorError::Serialization(e.to_string()))?;
            return Ok(Page::new(offset, items));
        }
        Err(status_error(
            status,
            &format!("dataset {dataset_id} items at offset {offset}"),
        ))
    }
}

fn transport_error(err: reqwest::Error) -> ConnectorError {
    if err.is_timeout() {
        ConnectorError::Timeout(err.to_string())
    } else {
        ConnectorError::Connection(err.to_string())
    }
}

fn status_error(status: StatusCode, resource: &str) -> ConnectorError {
    match status {
        StatusCode::NOT_FOUND => ConnectorError::not_found(resource.to_string()),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ConnectorError::Auth(format!("{status}: {resource}"))
        }
        StatusCode::TOO_MANY_REQUESTS => ConnectorError::RateLimited(resource.to_string()),
        _ => ConnectorError::Connection(format!("{status}: {resource}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_metadata_count_for() {
        let meta = DatasetMetadata {
            id: "abc".to_string(),
            name: None,
            item_count: 100,
            clean_item_count: Some(80),
        };
        assert_eq!(meta.count_for(false), 100);
        assert_eq!(meta.count_for(true), 80);

        let no_clean = DatasetMetadata {
            clean_item_count: None,
            ..meta
        };
        assert_eq!(no_clean.count_for(true), 100);
    }

    #[test]
    fn test_metadata_deserialization() {
        let envelope: DataEnvelope<DatasetMetadata> = serde_json::from_value(json!({
            "data": {
                "id": "WkzbQMuFYuamGv3YF",
                "name": "d7b9MDYsbtX5L7XAj",
                "itemCount": 51500,
                "cleanItemCount": 41000
            }
        }))
        .unwrap();

        assert_eq!(envelope.data.id, "WkzbQMuFYuamGv3YF");
        assert_eq!(envelope.data.item_count, 51_500);
        assert_eq!(envelope.data.clean_item_count, Some(41_000));
    }

    #[test]
    fn test_status_error_taxonomy() {
        assert!(matches!(
            status_error(StatusCode::NOT_FOUND, "dataset abc"),
            ConnectorError::NotFound(_)
        ));
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, "dataset abc"),
            ConnectorError::Auth(_)
        ));
        assert!(matches!(
            status_error(StatusCode::TOO_MANY_REQUESTS, "dataset abc"),
            ConnectorError::RateLimited(_)
        ));
        assert!(matches!(
            status_error(StatusCode::INTERNAL_SERVER_ERROR, "dataset abc"),
            ConnectorError::Connection(_)
        ));
    }
}
