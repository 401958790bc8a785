//! Smartsheet sheet client
//!
//! One endpoint matters here: fetching a sheet with its columns and rows.
//! The Smartsheet API reports failures in a JSON envelope with an
//! `errorCode`; code 1006 is "not found" and is mapped accordingly.

use crate::error::{ConnectorError, ConnectorResult};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

/// Default Smartsheet API base URL
pub const SMARTSHEET_BASE_URL: &str = "https://api.smartsheet.com/2.0";

/// Smartsheet error code for a missing sheet
const ERROR_CODE_NOT_FOUND: i64 = 1006;

/// Smartsheet error codes for invalid or expired tokens
const ERROR_CODES_AUTH: [i64; 3] = [1002, 1003, 1004];

/// Access to a remote sheet store
#[async_trait]
pub trait SheetStore: Send + Sync {
    /// Fetch a sheet with its columns and rows.
    async fn get_sheet(&self, access_token: &str, spreadsheet_id: &str) -> ConnectorResult<Sheet>;
}

/// A spreadsheet with columns and rows
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sheet {
    /// Sheet id
    #[serde(default)]
    pub id: Option<u64>,

    /// Sheet name, used as the stream name
    pub name: String,

    /// Total number of rows
    #[serde(default)]
    pub total_row_count: u64,

    /// Column definitions, in sheet order
    #[serde(default)]
    pub columns: Vec<Column>,

    /// Rows, in sheet order
    #[serde(default)]
    pub rows: Vec<Row>,
}

/// A column definition
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Column id, referenced by cells
    pub id: u64,

    /// Column title, used as the record field name
    pub title: String,

    /// Declared column type (e.g., `TEXT_NUMBER`, `DATE`)
    #[serde(rename = "type")]
    pub column_type: String,
}

/// A row of cells
///
/// Row metadata (`id`, `rowNumber`, `createdAt`, ...) is kept as raw values
/// so the connector can append whichever fields are configured without the
/// model enumerating all of them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Row {
    /// Cells, one per populated column
    #[serde(default)]
    pub cells: Vec<Cell>,

    /// Remaining row fields (metadata)
    #[serde(flatten)]
    pub meta: serde_json::Map<String, serde_json::Value>,
}

/// A single cell
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    /// Column this cell belongs to
    pub column_id: u64,

    /// Cell value; absent for empty cells
    #[serde(default)]
    pub value: Option<serde_json::Value>,
}

impl Cell {
    /// Cell value with empty cells collapsed to an empty string,
    /// matching what downstream consumers expect for blank spreadsheet cells.
    pub fn value_or_empty(&self) -> serde_json::Value {
        self.value
            .clone()
            .unwrap_or_else(|| serde_json::Value::String(String::new()))
    }
}

/// Smartsheet API error envelope
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiError {
    #[serde(default)]
    error_code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client for the Smartsheet API
pub struct SmartsheetClient {
    http: reqwest::Client,
    base_url: String,
}

impl SmartsheetClient {
    /// Create a client against the public Smartsheet API
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: SMARTSHEET_BASE_URL.to_string(),
        }
    }

    /// Override the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for SmartsheetClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SheetStore for SmartsheetClient {
    async fn get_sheet(&self, access_token: &str, spreadsheet_id: &str) -> ConnectorResult<Sheet> {
        let url = format!("{}/sheets/{}", self.base_url, spreadsheet_id);
        let resp = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(transport_error)?;

        let status = resp.status();
        if status.is_success() {
            return resp
                .json()
                .await
                .map_err(|e| ConnectorError::Serialization(e.to_string()));
        }

        let api_error: Option<ApiError> = resp.json().await.ok();
        Err(api_error_to_connector_error(
            status,
            api_error,
            spreadsheet_id,
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

fn api_error_to_connector_error(
    status: StatusCode,
    api_error: Option<ApiError>,
    spreadsheet_id: &str,
) -> ConnectorError {
    let detail = api_error
        .as_ref()
        .and_then(|e| e.message.clone())
        .unwrap_or_else(|| status.to_string());
    let code = api_error.and_then(|e| e.error_code);

    if code == Some(ERROR_CODE_NOT_FOUND) || status == StatusCode::NOT_FOUND {
        return ConnectorError::not_found(format!(
            "sheet {spreadsheet_id}: {detail} | Check your spreadsheet ID."
        ));
    }
    if code.is_some_and(|c| ERROR_CODES_AUTH.contains(&c))
        || status == StatusCode::UNAUTHORIZED
        || status == StatusCode::FORBIDDEN
    {
        return ConnectorError::Auth(format!("sheet {spreadsheet_id}: {detail}"));
    }
    if status == StatusCode::TOO_MANY_REQUESTS {
        return ConnectorError::RateLimited(format!("sheet {spreadsheet_id}: {detail}"));
    }
    ConnectorError::Connection(format!("sheet {spreadsheet_id}: {status}: {detail}"))
}
