//! `stock` command: live inventory badge for one product.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct StockReply {
    success: bool,
    #[serde(default)]
    stock_html: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Calls the inventory endpoint and returns the rendered stock badge.
///
/// # Errors
///
/// Fails on transport errors, a non-JSON body, or a `success: false` reply
/// (carrying the server's `error` text).
pub(crate) async fn fetch_stock_html(endpoint: &str, product_id: i64) -> anyhow::Result<String> {
    let response = reqwest::Client::new()
        .get(endpoint)
        .query(&[("product_id", product_id)])
        .send()
        .await?;
    let status = response.status();
    let body = response.text().await?;

    let reply: StockReply = serde_json::from_str(&body)
        .map_err(|e| anyhow::anyhow!("inventory endpoint returned HTTP {status} without JSON: {e}"))?;

    if !reply.success {
        let error = reply.error.unwrap_or_else(|| "Unknown error".to_string());
        anyhow::bail!("inventory lookup for product {product_id} failed: {error}");
    }

    reply
        .stock_html
        .ok_or_else(|| anyhow::anyhow!("inventory reply for product {product_id} has no stock_html"))
}
