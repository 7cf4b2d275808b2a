//! Response types for the Sheets API `values.get` endpoint.
//!
//! ## Observed shape
//!
//! ```json
//! {
//!   "range": "'Shopify product import'!A1:Z412",
//!   "majorDimension": "ROWS",
//!   "values": [["Handle", "Title", ...], ["boxy-tee", "Boxy Tee", ...]]
//! }
//! ```
//!
//! - With the default `FORMATTED_VALUE` rendering every cell is a string,
//!   numbers included (`"12"`). Unformatted rendering yields JSON numbers and
//!   booleans, so cells are kept as raw [`serde_json::Value`]s.
//! - Trailing empty cells are trimmed from each row, so rows may be shorter
//!   than the header row.
//! - `values` is omitted entirely when the range is empty.

use serde::Deserialize;

/// Body of a successful `GET .../values/{range}` call.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    /// The range actually returned, in A1 notation.
    #[serde(default)]
    pub range: Option<String>,

    #[serde(default)]
    pub major_dimension: Option<String>,

    /// Row-major cell grid; the first row holds the column headers.
    #[serde(default)]
    pub values: Vec<Vec<serde_json::Value>>,
}

/// Error envelope returned on non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
}
