//! Stock badge markup for the inventory fragment endpoint.

use storefront_core::StockFragment;

use crate::types::RawProduct;

/// Status assumed when the upstream record carries none.
const DEFAULT_STOCK_STATUS: &str = "outofstock";

/// Builds the inventory fragment for `product_id` from its upstream record.
#[must_use]
pub fn stock_fragment(product_id: i64, raw: &RawProduct) -> StockFragment {
    let stock_quantity = raw.stock_quantity.unwrap_or(0);
    let stock_status = raw
        .stock_status
        .clone()
        .unwrap_or_else(|| DEFAULT_STOCK_STATUS.to_string());
    let stock_html = stock_html(&stock_status, stock_quantity);

    StockFragment {
        product_id,
        stock_quantity,
        stock_status,
        stock_html,
    }
}

/// Renders the `<span>` badge. Only `"instock"` counts as available.
#[must_use]
pub fn stock_html(stock_status: &str, stock_quantity: i64) -> String {
    if stock_status == "instock" {
        let unit = if stock_quantity == 1 { "item" } else { "items" };
        format!(
            r#"<span class="product-stock stock-instock">✓ In Stock ({stock_quantity} {unit})</span>"#
        )
    } else {
        r#"<span class="product-stock stock-outofstock">✗ Out of Stock</span>"#.to_string()
    }
}
