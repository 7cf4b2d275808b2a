use thiserror::Error;

/// Failures retrieving rows from the spreadsheet. Any of these ends the
/// refresh: no partial catalog is built from an incomplete fetch.
#[derive(Debug, Error)]
pub enum SheetsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by Sheets API (retry after {retry_after_secs:?}s)")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("spreadsheet not found: {url}")]
    NotFound { url: String },

    /// The API answered with its JSON error envelope.
    #[error("Sheets API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
