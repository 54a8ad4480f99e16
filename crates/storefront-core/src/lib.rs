pub mod app_config;
pub mod config;
pub mod lenient;
pub mod products;

use thiserror::Error;

pub use app_config::{AppConfig, Environment, StoreCredentials};
pub use config::{load_app_config, load_app_config_from_env, MAX_PER_PAGE};
pub use products::{PageEnvelope, ProductRecord, StockFragment, PLACEHOLDER_IMAGE};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
