//! HTTP client for the Google Sheets `values.get` endpoint.

use std::time::Duration;

use chrono::{DateTime, Utc};
use dropshelf_catalog::RawRow;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, StatusCode, Url};

use crate::error::SheetsError;
use crate::retry::retry_with_backoff;
use crate::table::rows_from_values;
use crate::types::{ApiErrorEnvelope, ValueRange};

const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com/";

/// Characters left as-is in a path segment; everything else is escaped.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Rows read from one spreadsheet range.
#[derive(Debug, Clone)]
pub struct SheetRows {
    /// The range the API reports, or the requested one when it omits it.
    pub range: String,
    pub fetched_at: DateTime<Utc>,
    pub rows: Vec<RawRow>,
}

/// Client for reading a spreadsheet range through the Sheets REST API.
///
/// Use [`SheetsClient::new`] for production or
/// [`SheetsClient::with_base_url`] to point at a mock server in tests.
///
/// Transient errors (429, 5xx, network failures) are retried with
/// exponential backoff up to `max_retries` additional attempts.
pub struct SheetsClient {
    client: Client,
    api_key: String,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl SheetsClient {
    /// Creates a client pointed at the production Sheets API.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, SheetsError> {
        Self::with_base_url(
            api_key,
            timeout_secs,
            user_agent,
            max_retries,
            backoff_base_ms,
            DEFAULT_BASE_URL,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SheetsError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
        base_url: &str,
    ) -> Result<Self, SheetsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| SheetsError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url: parsed,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Reads `range` of `spreadsheet_id` and keys every data row by the
    /// header row.
    ///
    /// # Errors
    ///
    /// - [`SheetsError::RateLimited`]: HTTP 429 after all retries exhausted.
    /// - [`SheetsError::NotFound`]: HTTP 404 (not retried).
    /// - [`SheetsError::Api`]: non-2xx with the API error envelope (5xx retried).
    /// - [`SheetsError::UnexpectedStatus`]: any other non-2xx status.
    /// - [`SheetsError::Http`]: network or TLS failure after all retries exhausted.
    /// - [`SheetsError::Deserialize`]: body or a row does not have the expected shape.
    pub async fn fetch_rows(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> Result<SheetRows, SheetsError> {
        let display_url = self.values_url(spreadsheet_id, range)?;
        let mut request_url = display_url.clone();
        request_url
            .query_pairs_mut()
            .append_pair("key", &self.api_key);

        let value_range = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let request_url = request_url.clone();
            let display_url = display_url.clone();
            async move { self.get_value_range(request_url, &display_url).await }
        })
        .await?;

        let reported_range = value_range.range.unwrap_or_else(|| range.to_owned());
        if value_range.values.is_empty() {
            tracing::warn!(range = %reported_range, "sheet range returned no values");
        }

        let rows = rows_from_values(value_range.values)?;
        tracing::info!(range = %reported_range, rows = rows.len(), "fetched sheet rows");

        Ok(SheetRows {
            range: reported_range,
            fetched_at: Utc::now(),
            rows,
        })
    }

    /// Builds the `values.get` URL without the API key.
    fn values_url(&self, spreadsheet_id: &str, range: &str) -> Result<Url, SheetsError> {
        let path = format!(
            "v4/spreadsheets/{}/values/{}",
            utf8_percent_encode(spreadsheet_id, PATH_SEGMENT),
            utf8_percent_encode(range, PATH_SEGMENT),
        );
        self.base_url
            .join(&path)
            .map_err(|e| SheetsError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    /// One attempt at the request. `display_url` carries no key and is the
    /// only URL that may appear in errors or logs.
    async fn get_value_range(
        &self,
        request_url: Url,
        display_url: &Url,
    ) -> Result<ValueRange, SheetsError> {
        let response = self
            .client
            .get(request_url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| SheetsError::Http(e.without_url()))?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.trim().parse::<u64>().ok());
            return Err(SheetsError::RateLimited { retry_after_secs });
        }

        if status == StatusCode::NOT_FOUND {
            return Err(SheetsError::NotFound {
                url: display_url.to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SheetsError::Http(e.without_url()))?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<ApiErrorEnvelope>(&body) {
                Ok(envelope) if !envelope.error.message.is_empty() => SheetsError::Api {
                    status: status.as_u16(),
                    message: envelope.error.message,
                },
                _ => SheetsError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: display_url.to_string(),
                },
            });
        }

        serde_json::from_str::<ValueRange>(&body).map_err(|e| SheetsError::Deserialize {
            context: format!("values from {display_url}"),
            source: e,
        })
    }
}
