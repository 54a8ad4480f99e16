use reqwest::Url;

use crate::error::CatalogError;

/// REST namespace appended to the store root.
const API_PREFIX: &str = "wp-json/wc/v3/";

/// Resolves the `wc/v3` API root for a store URL.
///
/// The store root keeps any sub-path (`https://example.com/shop` →
/// `https://example.com/shop/wp-json/wc/v3/`) and always ends in a slash so
/// relative joins append rather than replace the last segment.
pub(super) fn api_root(store_url: &str) -> Result<Url, CatalogError> {
    let normalised = format!("{}/{API_PREFIX}", store_url.trim().trim_end_matches('/'));
    let url = Url::parse(&normalised).map_err(|e| {
        CatalogError::Configuration(format!("invalid WooCommerce API URL \"{store_url}\": {e}"))
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(CatalogError::Configuration(format!(
            "invalid WooCommerce API URL \"{store_url}\": unsupported scheme \"{}\"",
            url.scheme()
        )));
    }
    Ok(url)
}

/// Extracts the `message` field from a WooCommerce error body
/// (`{"code": "...", "message": "...", "data": {...}}`).
pub(super) fn upstream_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_owned)
}
