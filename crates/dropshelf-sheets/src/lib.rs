pub mod client;
pub mod error;
mod retry;
pub mod table;
pub mod types;

pub use client::{SheetRows, SheetsClient};
pub use error::SheetsError;
pub use table::{row_from_record, rows_from_values};
pub use types::ValueRange;
