//! Smartsheet connector integration tests
//!
//! Drives check/discover/read through an in-memory sheet store.

use serde_json::json;
use shoal_connect::clients::smartsheet::{Cell, Column, Row, Sheet};
use shoal_connect::connectors::smartsheets::{SmartsheetsConfig, SmartsheetsSource};
use shoal_connect::prelude::*;
use std::sync::Arc;

fn sample_sheet() -> Sheet {
    let mut meta_first = serde_json::Map::new();
    meta_first.insert("id".to_string(), json!(10));
    meta_first.insert("rowNumber".to_string(), json!(1));
    meta_first.insert("createdAt".to_string(), json!("2026-08-01T09:00:00Z"));

    Sheet {
        id: Some(4583173393803140),
        name: "inventory".to_string(),
        total_row_count: 2,
        columns: vec![
            Column {
                id: 1,
                title: "sku".to_string(),
                column_type: "TEXT_NUMBER".to_string(),
            },
            Column {
                id: 2,
                title: "restocked_on".to_string(),
                column_type: "DATE".to_string(),
            },
            Column {
                id: 3,
                title: "last_audit".to_string(),
                column_type: "DATETIME".to_string(),
            },
            Column {
                id: 4,
                title: "status".to_string(),
                column_type: "PICKLIST".to_string(),
            },
        ],
        rows: vec![
            Row {
                cells: vec![
                    Cell {
                        column_id: 1,
                        value: Some(json!("A-100")),
                    },
                    Cell {
                        column_id: 2,
                        value: Some(json!("2026-08-01")),
                    },
                    Cell {
                        column_id: 3,
                        value: Some(json!("2026-08-01T09:30:00Z")),
                    },
                    Cell {
                        column_id: 4,
                        value: Some(json!("in_stock")),
                    },
                ],
                meta: meta_first,
            },
            Row {
                cells: vec![
                    Cell {
                        column_id: 1,
                        value: Some(json!("A-101")),
                    },
                    Cell {
                        column_id: 2,
                        value: None,
                    },
                ],
                meta: serde_json::Map::new(),
            },
        ],
    }
}

fn config(spreadsheet_id: &str, include_metadata: bool) -> SmartsheetsConfig {
    serde_json::from_value(json!({
        "access_token": "tok-123",
        "spreadsheet_id": spreadsheet_id,
        "include_metadata": include_metadata,
    }))
    .unwrap()
}

fn source() -> SmartsheetsSource {
    SmartsheetsSource::with_store(Arc::new(MockSheetStore::new("sheet-1", sample_sheet())))
}

async fn configured_catalog(
    source: &SmartsheetsSource,
    config: &SmartsheetsConfig,
) -> ConfiguredCatalog {
    let catalog = source.discover(config).await.unwrap();
    ConfiguredCatalog::from_catalog(&catalog)
}

#[tokio::test]
async fn test_discover_derives_schema_per_column() {
    let source = source();
    let catalog = source.discover(&config("sheet-1", false)).await.unwrap();

    let stream = catalog.find_stream("inventory").unwrap();
    let props = &stream.json_schema["properties"];

    assert_eq!(props["sku"], json!({"type": "string"}));
    assert_eq!(
        props["restocked_on"],
        json!({"type": "string", "format": "date"})
    );
    assert_eq!(
        props["last_audit"],
        json!({"type": "string", "format": "date-time"})
    );
    // Unrecognized column types default to string
    assert_eq!(props["status"], json!({"type": "string"}));
}

#[tokio::test]
async fn test_discover_is_idempotent() {
    let source = source();
    let cfg = config("sheet-1", true);

    let first = source.discover(&cfg).await.unwrap();
    let second = source.discover(&cfg).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_discover_appends_metadata_properties() {
    let source = source();
    let catalog = source.discover(&config("sheet-1", true)).await.unwrap();

    let stream = catalog.find_stream("inventory").unwrap();
    let props = stream.json_schema["properties"].as_object().unwrap();
    for field in ["id", "rowNumber", "createdAt", "modifiedAt", "accessLevel"] {
        assert_eq!(props[field], json!({"type": "string"}), "{field}");
    }
}

#[tokio::test]
async fn test_discover_failure_propagates_with_context() {
    let store = MockSheetStore::new("sheet-1", sample_sheet()).fail_with("boom");
    let source = SmartsheetsSource::with_store(Arc::new(store));

    let err = source
        .discover(&config("sheet-1", false))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("could not run discovery"));
}

#[tokio::test]
async fn test_read_maps_rows_to_records() {
    let source = source();
    let cfg = config("sheet-1", false);
    let catalog = configured_catalog(&source, &cfg).await;

    let stream = source.read(&cfg, &catalog, None).await.unwrap();
    let records: Vec<SourceEvent> = events::drain(stream)
        .await
        .into_iter()
        .map(|r| r.unwrap())
        .collect();

    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|e| e.stream == "inventory"));

    assert_eq!(records[0].data["sku"], json!("A-100"));
    assert_eq!(records[0].data["restocked_on"], json!("2026-08-01"));
    // Empty cells come through as empty strings
    assert_eq!(records[1].data["sku"], json!("A-101"));
    assert_eq!(records[1].data["restocked_on"], json!(""));
    // Metadata stays off unless configured
    assert!(records[0].data.get("rowNumber").is_none());
}

#[tokio::test]
async fn test_read_appends_metadata_when_configured() {
    let source = source();
    let cfg = config("sheet-1", true);
    let catalog = configured_catalog(&source, &cfg).await;

    let stream = source.read(&cfg, &catalog, None).await.unwrap();
    let records: Vec<SourceEvent> = events::drain(stream)
        .await
        .into_iter()
        .map(|r| r.unwrap())
        .collect();

    assert_eq!(records[0].data["rowNumber"], json!(1));
    assert_eq!(records[0].data["createdAt"], json!("2026-08-01T09:00:00Z"));
    // Fields the row does not carry are null, not missing
    assert_eq!(records[1].data["rowNumber"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_read_aborts_on_unknown_column() {
    let mut sheet = sample_sheet();
    sheet.rows.push(Row {
        cells: vec![Cell {
            column_id: 999,
            value: Some(json!("stray")),
        }],
        meta: serde_json::Map::new(),
    });
    let source = SmartsheetsSource::with_store(Arc::new(MockSheetStore::new("sheet-1", sheet)));
    let cfg = config("sheet-1", false);
    let catalog = configured_catalog(&source, &cfg).await;

    let stream = source.read(&cfg, &catalog, None).await.unwrap();
    let results = events::drain(stream).await;

    // Two good rows, then the error; nothing after it
    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert!(results[1].is_ok());
    assert!(results[2].is_err());
}

#[tokio::test]
async fn test_check_failure_mentions_spreadsheet_id() {
    let source = source();

    let result = source.check(&config("wrong-sheet", false)).await.unwrap();
    assert!(!result.is_success());
    assert!(result.message.as_deref().unwrap().contains("wrong-sheet"));
}

#[tokio::test]
async fn test_check_never_errors_on_connection_failure() {
    let store = MockSheetStore::new("sheet-1", sample_sheet()).fail_with("connection reset");
    let source = SmartsheetsSource::with_store(Arc::new(store));

    let result = source.check(&config("sheet-1", false)).await.unwrap();
    assert!(!result.is_success());
    assert!(result.message.as_deref().unwrap().contains("connection reset"));
}
