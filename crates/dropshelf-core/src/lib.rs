mod app_config;
mod catalog;
mod cell;
mod config;

pub use app_config::{AppConfig, Environment};
pub use catalog::{Catalog, DropGroup, DropIndex, Product, Variant};
pub use cell::CellValue;
pub use config::{load_app_config, load_app_config_from_env};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
