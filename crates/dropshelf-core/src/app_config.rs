use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl Environment {
    /// Log filter used when `DROPSHELF_LOG_LEVEL` is unset.
    #[must_use]
    pub fn default_log_level(&self) -> &'static str {
        match self {
            Environment::Development | Environment::Test => "info",
            Environment::Production => "warn",
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Google Sheets API key. Only required when rows are fetched remotely.
    pub sheets_api_key: Option<String>,
    /// Only required when rows are fetched remotely.
    pub spreadsheet_id: Option<String>,
    pub sheet_name: String,
    /// Column span appended to the sheet name, e.g. `"A:Z"`.
    pub sheet_columns: String,
    pub sheets_base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
}

impl AppConfig {
    /// The A1-notation range read from the spreadsheet, e.g.
    /// `"Shopify product import!A:Z"`.
    #[must_use]
    pub fn sheet_range(&self) -> String {
        format!("{}!{}", self.sheet_name, self.sheet_columns)
    }

    /// API key and spreadsheet id, both needed to read the sheet.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] naming the first unset variable.
    pub fn sheet_credentials(&self) -> Result<(&str, &str), ConfigError> {
        let api_key = self
            .sheets_api_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("SHEETS_API_KEY".to_string()))?;
        let spreadsheet_id = self
            .spreadsheet_id
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("DROPSHELF_SPREADSHEET_ID".to_string()))?;
        Ok((api_key, spreadsheet_id))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field(
                "sheets_api_key",
                &self.sheets_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("sheet_name", &self.sheet_name)
            .field("sheet_columns", &self.sheet_columns)
            .field("sheets_base_url", &self.sheets_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .finish()
    }
}
