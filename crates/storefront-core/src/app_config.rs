use std::net::SocketAddr;

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

/// Connection settings for the upstream WooCommerce REST API.
///
/// Values are carried as read from the environment; emptiness is checked when
/// the catalog service is constructed, not here.
#[derive(Clone, Default)]
pub struct StoreCredentials {
    /// Store root, e.g. `"https://shop.example.com"`.
    pub api_url: String,
    pub consumer_key: String,
    pub consumer_secret: String,
}

impl StoreCredentials {
    /// Returns `true` when any of the three values is blank.
    #[must_use]
    pub fn is_incomplete(&self) -> bool {
        self.api_url.trim().is_empty()
            || self.consumer_key.trim().is_empty()
            || self.consumer_secret.trim().is_empty()
    }
}

impl std::fmt::Debug for StoreCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreCredentials")
            .field("api_url", &self.api_url)
            .field("consumer_key", &redact(&self.consumer_key))
            .field("consumer_secret", &redact(&self.consumer_secret))
            .finish()
    }
}

fn redact(value: &str) -> &'static str {
    if value.is_empty() {
        "[empty]"
    } else {
        "[redacted]"
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub store: StoreCredentials,
    /// Page size used when a caller does not supply `per_page`.
    pub default_per_page: u32,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}
