//! Smartsheet source connector
//!
//! Exposes one stream per spreadsheet, named after the sheet, with a schema
//! derived from the declared column types. Rows are read in sheet order;
//! there is no pagination (the sheet endpoint returns all rows).

use crate::clients::smartsheet::{Row, Sheet, SheetStore, SmartsheetClient};
use crate::error::{ConnectError, ConnectorError, ConnectorResult, Result};
use crate::traits::catalog::{Catalog, ConfiguredCatalog, Stream, SyncMode};
use crate::traits::event::SourceEvent;
use crate::traits::registry::{AnySource, SourceFactory};
use crate::traits::source::{CheckResult, Source};
use crate::traits::spec::ConnectorSpec;
use crate::traits::state::State;
use crate::types::SensitiveString;
use async_trait::async_trait;
use futures::stream::BoxStream;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use validator::Validate;

/// Row metadata fields appended to records when `include_metadata` is set
pub const METADATA_FIELDS: [&str; 9] = [
    "id",
    "parentId",
    "sheetId",
    "rowNumber",
    "version",
    "expanded",
    "accessLevel",
    "createdAt",
    "modifiedAt",
];

/// Smartsheet source configuration
#[derive(Debug, Clone, Deserialize, Serialize, Validate, JsonSchema)]
pub struct SmartsheetsConfig {
    /// API access token
    pub access_token: SensitiveString,

    /// Id of the spreadsheet to read
    #[validate(length(min = 1))]
    pub spreadsheet_id: String,

    /// Append row metadata fields to each record
    #[serde(default)]
    pub include_metadata: bool,
}

/// Schema fragment for a declared column type.
///
/// Unknown types fall back to a plain string.
fn column_prop(column_type: &str) -> serde_json::Value {
    match column_type {
        "TEXT_NUMBER" => serde_json::json!({"type": "string"}),
        "DATE" => serde_json::json!({"type": "string", "format": "date"}),
        "DATETIME" => serde_json::json!({"type": "string", "format": "date-time"}),
        _ => serde_json::json!({"type": "string"}),
    }
}

/// Build the stream's JSON schema from the sheet's columns
fn sheet_json_schema(sheet: &Sheet, include_metadata: bool) -> serde_json::Value {
    let mut properties = serde_json::Map::new();
    for column in &sheet.columns {
        properties.insert(column.title.clone(), column_prop(&column.column_type));
    }
    if include_metadata {
        // Metadata fields are assumed string for now
        for field in METADATA_FIELDS {
            properties.insert(field.to_string(), serde_json::json!({"type": "string"}));
        }
    }

    serde_json::json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "properties": properties,
    })
}

/// Map one row to a record: cell values keyed by column title, empty cells
/// as empty strings, metadata appended when configured.
fn row_to_record(
    row: &Row,
    id_to_title: &HashMap<u64, String>,
    include_metadata: bool,
) -> ConnectorResult<serde_json::Value> {
    let mut record = serde_json::Map::new();
    for cell in &row.cells {
        let title = id_to_title.get(&cell.column_id).ok_or_else(|| {
            ConnectorError::schema(format!(
                "row references unknown column id {}",
                cell.column_id
            ))
        })?;
        record.insert(title.clone(), cell.value_or_empty());
    }

    if include_metadata {
        for field in METADATA_FIELDS {
            record.insert(
                field.to_string(),
                row.meta.get(field).cloned().unwrap_or(serde_json::Value::Null),
            );
        }
    }

    Ok(serde_json::Value::Object(record))
}

/// Smartsheet source implementation
pub struct SmartsheetsSource {
    store: Arc<dyn SheetStore>,
}

impl SmartsheetsSource {
    /// Create a source backed by the public Smartsheet API
    pub fn new() -> Self {
        Self::with_store(Arc::new(SmartsheetClient::new()))
    }

    /// Create a source backed by a custom sheet store
    pub fn with_store(store: Arc<dyn SheetStore>) -> Self {
        Self { store }
    }
}

impl Default for SmartsheetsSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Source for SmartsheetsSource {
    type Config = SmartsheetsConfig;

    fn spec() -> ConnectorSpec {
        ConnectorSpec::builder("smartsheets", env!("CARGO_PKG_VERSION"))
            .description("Reads a Smartsheet spreadsheet, one record per row")
            .documentation_url("https://smartsheet.redoc.ly/")
            .config_schema::<SmartsheetsConfig>()
            .build()
    }

    async fn check(&self, config: &Self::Config) -> Result<CheckResult> {
        match self
            .store
            .get_sheet(config.access_token.expose_secret(), &config.spreadsheet_id)
            .await
        {
            Ok(_) => Ok(CheckResult::success()),
            Err(e) => {
                tracing::error!(error = %e, "connection check failed");
                Ok(CheckResult::failure(e.to_string()))
            }
        }
    }

    async fn discover(&self, config: &Self::Config) -> Result<Catalog> {
        let sheet = self
            .store
            .get_sheet(config.access_token.expose_secret(), &config.spreadsheet_id)
            .await
            .map_err(|e| {
                ConnectError::source("smartsheets", format!("could not run discovery: {e}"))
            })?;

        tracing::info!(
            sheet = %sheet.name,
            spreadsheet_id = %config.spreadsheet_id,
            "running discovery on sheet"
        );

        let schema = sheet_json_schema(&sheet, config.include_metadata);
        let stream = Stream::new(&sheet.name, schema).sync_modes(vec![SyncMode::FullRefresh]);

        Ok(Catalog::new().add_stream(stream))
    }

    async fn read(
        &self,
        config: &Self::Config,
        catalog: &ConfiguredCatalog,
        _state: Option<State>,
    ) -> Result<BoxStream<'static, Result<SourceEvent>>> {
        let store = Arc::clone(&self.store);
        let access_token = config.access_token.clone();
        let spreadsheet_id = config.spreadsheet_id.clone();
        let include_metadata = config.include_metadata;
        let stream_names: Vec<String> = catalog
            .streams
            .iter()
            .map(|s| s.stream.name.clone())
            .collect();

        let stream = async_stream::stream! {
            for name in stream_names {
                let sheet = match store
                    .get_sheet(access_token.expose_secret(), &spreadsheet_id)
                    .await
                {
                    Ok(sheet) => sheet,
                    Err(e) => {
                        tracing::error!(stream = %name, error = %e, "could not read sheet");
                        yield Err(e.into());
                        return;
                    }
                };

                tracing::info!(sheet = %sheet.name, "starting spreadsheet sync");
                tracing::info!(rows = sheet.total_row_count, "row count");

                let id_to_title: HashMap<u64, String> = sheet
                    .columns
                    .iter()
                    .map(|c| (c.id, c.title.clone()))
                    .collect();

                for row in &sheet.rows {
                    match row_to_record(row, &id_to_title, include_metadata) {
                        Ok(record) => yield Ok(SourceEvent::record(name.clone(), record)),
                        Err(e) => {
                            tracing::error!(error = %e, "unable to encode row, aborting");
                            yield Err(e.into());
                            return;
                        }
                    }
                }
            }
            tracing::info!(spreadsheet_id = %spreadsheet_id, "finished syncing spreadsheet");
        };

        Ok(Box::pin(stream))
    }
}

/// Factory for creating SmartsheetsSource instances
pub struct SmartsheetsSourceFactory;

impl SourceFactory for SmartsheetsSourceFactory {
    fn spec(&self) -> ConnectorSpec {
        SmartsheetsSource::spec()
    }

    fn create(&self) -> Box<dyn AnySource> {
        Box::new(SmartsheetsSourceWrapper(SmartsheetsSource::new()))
    }
}

/// Wrapper for type-erased source operations
pub struct SmartsheetsSourceWrapper(SmartsheetsSource);

crate::impl_any_source!(SmartsheetsSourceWrapper, SmartsheetsSource, SmartsheetsConfig);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::smartsheet::Cell;
    use serde_json::json;

    #[test]
    fn test_config_defaults() {
        let config: SmartsheetsConfig = serde_json::from_value(json!({
            "access_token": "tok-123",
            "spreadsheet_id": "sheet-1"
        }))
        .unwrap();
        assert!(!config.include_metadata);
        assert_eq!(config.access_token.expose_secret(), "tok-123");
    }

    #[test]
    fn test_column_prop_mapping() {
        assert_eq!(column_prop("TEXT_NUMBER"), json!({"type": "string"}));
        assert_eq!(
            column_prop("DATE"),
            json!({"type": "string", "format": "date"})
        );
        assert_eq!(
            column_prop("DATETIME"),
            json!({"type": "string", "format": "date-time"})
        );
        assert_eq!(column_prop("PICKLIST"), json!({"type": "string"}));
    }

    #[test]
    fn test_row_to_record_empty_cell_becomes_empty_string() {
        let id_to_title: HashMap<u64, String> =
            [(1, "sku".to_string()), (2, "note".to_string())].into();
        let row = Row {
            cells: vec![
                Cell {
                    column_id: 1,
                    value: Some(json!("A-100")),
                },
                Cell {
                    column_id: 2,
                    value: None,
                },
            ],
            meta: serde_json::Map::new(),
        };

        let record = row_to_record(&row, &id_to_title, false).unwrap();
        assert_eq!(record["sku"], json!("A-100"));
        assert_eq!(record["note"], json!(""));
    }

    #[test]
    fn test_row_to_record_unknown_column_is_schema_error() {
        let id_to_title: HashMap<u64, String> = [(1, "sku".to_string())].into();
        let row = Row {
            cells: vec![Cell {
                column_id: 99,
                value: Some(json!("x")),
            }],
            meta: serde_json::Map::new(),
        };

        let err = row_to_record(&row, &id_to_title, false).unwrap_err();
        assert!(matches!(err, ConnectorError::Schema(_)));
        assert!(err.to_string().contains("99"));
    }

    #[test]
    fn test_row_to_record_metadata_append() {
        let id_to_title: HashMap<u64, String> = [(1, "sku".to_string())].into();
        let mut meta = serde_json::Map::new();
        meta.insert("rowNumber".to_string(), json!(7));
        meta.insert("createdAt".to_string(), json!("2026-08-01T09:00:00Z"));
        let row = Row {
            cells: vec![Cell {
                column_id: 1,
                value: Some(json!("A-100")),
            }],
            meta,
        };

        let record = row_to_record(&row, &id_to_title, true).unwrap();
        assert_eq!(record["rowNumber"], json!(7));
        assert_eq!(record["createdAt"], json!("2026-08-01T09:00:00Z"));
        // Fields the row does not carry come through as null
        assert_eq!(record["parentId"], serde_json::Value::Null);
    }
}
