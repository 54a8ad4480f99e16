//! Catalog fetch service: the only entry point the HTTP boundary talks to.

use storefront_core::{AppConfig, PageEnvelope, StockFragment, StoreCredentials};

use crate::client::WooClient;
use crate::error::CatalogError;
use crate::normalize::normalize_records;
use crate::pagination::estimate_total_pages;
use crate::stock::stock_fragment;

/// Tunables for [`CatalogService`] that are not credentials.
#[derive(Debug, Clone)]
pub struct CatalogOptions {
    /// Page size used when the caller passes `None`.
    pub default_per_page: u32,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl CatalogOptions {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            default_per_page: config.default_per_page,
            timeout_secs: config.request_timeout_secs,
            user_agent: config.user_agent.clone(),
        }
    }
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            default_per_page: 12,
            timeout_secs: 30,
            user_agent: "storefront/0.1 (catalog-proxy)".to_string(),
        }
    }
}

/// Fetches catalog pages and single-product inventory from WooCommerce.
pub struct CatalogService {
    client: WooClient,
    default_per_page: u32,
}

impl CatalogService {
    /// # Errors
    ///
    /// Returns [`CatalogError::Configuration`] if the base URL, consumer key,
    /// or consumer secret is blank, or [`CatalogError::Http`] if the HTTP
    /// client cannot be built.
    pub fn new(
        credentials: &StoreCredentials,
        options: &CatalogOptions,
    ) -> Result<Self, CatalogError> {
        let client = WooClient::new(credentials, options.timeout_secs, &options.user_agent)?;
        Ok(Self {
            client,
            default_per_page: options.default_per_page,
        })
    }

    #[must_use]
    pub fn default_per_page(&self) -> u32 {
        self.default_per_page
    }

    /// Fetches and normalizes one catalog page.
    ///
    /// `page` and `per_page` are trusted to be in range; the HTTP boundary
    /// clamps them. A supplied `per_page` always wins over the configured
    /// default.
    ///
    /// Never fails: upstream problems come back as a failure envelope.
    pub async fn fetch_page(&self, page: u32, per_page: Option<u32>) -> PageEnvelope {
        let per_page = per_page.unwrap_or(self.default_per_page);

        match self.client.fetch_products_page(page, per_page).await {
            Ok(catalog) => {
                let products = normalize_records(catalog);
                let total_pages = estimate_total_pages(page, per_page, products.len());
                tracing::info!(
                    page,
                    per_page,
                    returned = products.len(),
                    total_pages,
                    "fetched catalog page"
                );
                PageEnvelope::page(products, page, per_page, total_pages)
            }
            Err(e) => {
                tracing::warn!(page, per_page, error = %e, "catalog page fetch failed");
                PageEnvelope::failure(format!("Failed to fetch products: {e}"))
            }
        }
    }

    /// Looks up live inventory for one product and renders its stock badge.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Validation`] if `product_id` is not positive.
    /// - [`CatalogError::NotFound`] if the upstream has no such product.
    /// - Any other [`CatalogError`] from the upstream request.
    pub async fn fetch_stock(&self, product_id: i64) -> Result<StockFragment, CatalogError> {
        if product_id <= 0 {
            return Err(CatalogError::Validation(
                "Product ID must be a positive integer".to_string(),
            ));
        }

        let raw = self.client.fetch_product(product_id).await?;
        let fragment = stock_fragment(product_id, &raw);
        tracing::debug!(
            product_id,
            stock_status = %fragment.stock_status,
            stock_quantity = fragment.stock_quantity,
            "fetched inventory"
        );
        Ok(fragment)
    }
}
