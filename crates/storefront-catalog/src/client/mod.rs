//! HTTP client for the WooCommerce `wc/v3` REST API.

mod endpoint;

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use storefront_core::StoreCredentials;

use crate::error::CatalogError;
use crate::types::{RawCatalog, RawProduct};

/// HTTP client for a single WooCommerce store.
///
/// Authenticates every request with the consumer key/secret pair as HTTP
/// basic auth. Non-2xx responses become [`CatalogError::UnexpectedStatus`]
/// (404 becomes [`CatalogError::NotFound`]). Nothing is retried.
pub struct WooClient {
    client: Client,
    api_root: Url,
    consumer_key: String,
    consumer_secret: String,
}

impl WooClient {
    /// Creates a client for the store described by `credentials`.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Configuration`] if any credential is blank or the
    ///   store URL cannot be parsed.
    /// - [`CatalogError::Http`] if the underlying `reqwest::Client` cannot be
    ///   constructed.
    pub fn new(
        credentials: &StoreCredentials,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, CatalogError> {
        if credentials.is_incomplete() {
            return Err(CatalogError::Configuration(
                "WooCommerce API credentials are not configured properly.".to_string(),
            ));
        }

        let api_root = endpoint::api_root(&credentials.api_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            api_root,
            consumer_key: credentials.consumer_key.trim().to_owned(),
            consumer_secret: credentials.consumer_secret.trim().to_owned(),
        })
    }

    /// Fetches one page of the product list.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::UnexpectedStatus`] for any non-2xx status other than 404.
    /// - [`CatalogError::NotFound`] for 404 (e.g. the REST API is disabled).
    /// - [`CatalogError::Http`] on network or TLS failure.
    /// - [`CatalogError::Deserialize`] if the body is neither a JSON array nor object.
    pub async fn fetch_products_page(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<RawCatalog, CatalogError> {
        let url = self.products_url(page, per_page)?;
        let body = self.get(url).await?;
        serde_json::from_str::<RawCatalog>(&body).map_err(|e| CatalogError::Deserialize {
            context: format!("products page {page}"),
            source: e,
        })
    }

    /// Fetches a single product by ID.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::NotFound`] on 404, or when the body is empty, `null`,
    ///   or an empty object.
    /// - [`CatalogError::UnexpectedStatus`] / [`CatalogError::Http`] as for
    ///   [`Self::fetch_products_page`].
    pub async fn fetch_product(&self, product_id: i64) -> Result<RawProduct, CatalogError> {
        let url = self.product_url(product_id)?;
        let body = self.get(url).await?;
        if body.trim().is_empty() {
            return Err(CatalogError::NotFound);
        }

        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| CatalogError::Deserialize {
                context: format!("product {product_id}"),
                source: e,
            })?;
        match value {
            serde_json::Value::Object(ref map) if !map.is_empty() => {
                Ok(RawProduct::from_value(value))
            }
            _ => Err(CatalogError::NotFound),
        }
    }

    fn products_url(&self, page: u32, per_page: u32) -> Result<Url, CatalogError> {
        let mut url = self.join("products")?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("per_page", &per_page.to_string());
        Ok(url)
    }

    fn product_url(&self, product_id: i64) -> Result<Url, CatalogError> {
        self.join(&format!("products/{product_id}"))
    }

    fn join(&self, path: &str) -> Result<Url, CatalogError> {
        self.api_root.join(path).map_err(|e| {
            CatalogError::Configuration(format!(
                "cannot build endpoint \"{path}\" from {}: {e}",
                self.api_root
            ))
        })
    }

    async fn get(&self, url: Url) -> Result<String, CatalogError> {
        tracing::debug!(url = %url, "requesting WooCommerce endpoint");

        let response = self
            .client
            .get(url)
            .basic_auth(&self.consumer_key, Some(&self.consumer_secret))
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound);
        }

        if !status.is_success() {
            let message = endpoint::upstream_message(&body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            });
            return Err(CatalogError::UnexpectedStatus {
                status: status.as_u16(),
                message,
            });
        }

        Ok(body)
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
