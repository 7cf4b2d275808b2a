//! Where the rows for a run come from: a local JSON export or the spreadsheet.

use std::path::Path;

use anyhow::Context;
use dropshelf_catalog::RawRow;
use dropshelf_core::AppConfig;
use dropshelf_sheets::{row_from_record, SheetsClient};
use serde_json::{Map, Value};

/// Loads rows from `input` when given, otherwise from the configured sheet.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, if the sheet
/// credentials are not configured, or if the fetch fails.
pub(crate) async fn load_rows(
    input: Option<&Path>,
    config: &AppConfig,
) -> anyhow::Result<Vec<RawRow>> {
    match input {
        Some(path) => rows_from_file(path),
        None => rows_from_sheet(config).await,
    }
}

fn rows_from_file(path: &Path) -> anyhow::Result<Vec<RawRow>> {
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let rows = parse_row_file(&body)
        .with_context(|| format!("failed to parse rows from {}", path.display()))?;
    tracing::info!(path = %path.display(), rows = rows.len(), "loaded rows from file");
    Ok(rows)
}

/// Parses a row export: `{"items": [...]}` as served by the catalog
/// endpoint, or a bare array of header-keyed records.
///
/// Cells go through the same normalization as sheet cells. A record that is
/// not an object becomes an empty row, which the catalog build skips.
///
/// # Errors
///
/// Returns an error if the body is not JSON or has neither accepted shape.
pub(crate) fn parse_row_file(body: &str) -> anyhow::Result<Vec<RawRow>> {
    let items = match serde_json::from_str::<Value>(body)? {
        Value::Array(items) => items,
        Value::Object(mut envelope) => match envelope.remove("items") {
            Some(Value::Array(items)) => items,
            _ => anyhow::bail!("expected an \"items\" array"),
        },
        _ => anyhow::bail!("expected an array of rows or an object with \"items\""),
    };

    Ok(items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| {
            let record = match item {
                Value::Object(record) => record,
                other => {
                    tracing::warn!(
                        item = idx + 1,
                        kind = json_kind(&other),
                        "row is not an object"
                    );
                    Map::new()
                }
            };
            row_from_record(record).unwrap_or_else(|e| {
                tracing::warn!(item = idx + 1, error = %e, "row does not fit, using empty row");
                RawRow::default()
            })
        })
        .collect())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

async fn rows_from_sheet(config: &AppConfig) -> anyhow::Result<Vec<RawRow>> {
    let (api_key, spreadsheet_id) = config
        .sheet_credentials()
        .context("sheet credentials are not configured (or pass --input)")?;

    let client = SheetsClient::with_base_url(
        api_key,
        config.request_timeout_secs,
        &config.user_agent,
        config.max_retries,
        config.retry_backoff_base_ms,
        &config.sheets_base_url,
    )?;

    let range = config.sheet_range();
    let fetched = client
        .fetch_rows(spreadsheet_id, &range)
        .await
        .with_context(|| format!("failed to fetch rows for range {range}"))?;
    tracing::debug!(
        range = %fetched.range,
        fetched_at = %fetched.fetched_at.to_rfc3339(),
        "sheet fetch complete"
    );
    Ok(fetched.rows)
}
