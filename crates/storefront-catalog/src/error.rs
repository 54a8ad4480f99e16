use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Store URL or consumer credentials are missing or unusable.
    #[error("{0}")]
    Configuration(String),

    /// Caller input rejected before any upstream request is made.
    #[error("{0}")]
    Validation(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Product not found")]
    NotFound,

    /// Non-2xx response. `message` is the upstream's own error text when the
    /// body carried one, otherwise the canonical status reason.
    #[error("upstream returned HTTP {status}: {message}")]
    UnexpectedStatus { status: u16, message: String },
}
