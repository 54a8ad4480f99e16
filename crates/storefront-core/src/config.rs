use crate::app_config::{AppConfig, Environment, StoreCredentials};
use crate::ConfigError;

/// Largest page size the upstream catalog accepts.
pub const MAX_PER_PAGE: u32 = 100;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Store credentials are optional here: a server without them still starts
/// and answers every catalog request with a configuration error.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let bind_addr = or_default("STOREFRONT_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("STOREFRONT_BIND_ADDR", e.to_string()))?;

    let default_per_page = or_default("STOREFRONT_DEFAULT_PER_PAGE", "12")
        .parse::<u32>()
        .map_err(|e| invalid("STOREFRONT_DEFAULT_PER_PAGE", e.to_string()))?;
    if !(1..=MAX_PER_PAGE).contains(&default_per_page) {
        return Err(invalid(
            "STOREFRONT_DEFAULT_PER_PAGE",
            format!("must be between 1 and {MAX_PER_PAGE}, got {default_per_page}"),
        ));
    }

    let request_timeout_secs = or_default("STOREFRONT_REQUEST_TIMEOUT_SECS", "30")
        .parse::<u64>()
        .map_err(|e| invalid("STOREFRONT_REQUEST_TIMEOUT_SECS", e.to_string()))?;

    let env = parse_environment(&or_default("STOREFRONT_ENV", "development"));
    let log_level = or_default("STOREFRONT_LOG_LEVEL", "info");
    let user_agent = or_default("STOREFRONT_USER_AGENT", "storefront/0.1 (catalog-proxy)");

    let store = StoreCredentials {
        api_url: or_default("WC_API_URL", ""),
        consumer_key: or_default("WC_CONSUMER_KEY", ""),
        consumer_secret: or_default("WC_CONSUMER_SECRET", ""),
    };

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        store,
        default_per_page,
        request_timeout_secs,
        user_agent,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
