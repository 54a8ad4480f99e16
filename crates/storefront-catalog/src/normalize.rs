//! Mapping from raw WooCommerce records to [`ProductRecord`].
//!
//! Normalization is total: every raw record produces a record, with the
//! fallbacks from [`ProductRecord::default`] filling whatever is missing.

use storefront_core::{ProductRecord, PLACEHOLDER_IMAGE};

use crate::types::{RawCatalog, RawProduct};

/// Normalizes a whole catalog body, preserving upstream order.
#[must_use]
pub fn normalize_records(catalog: RawCatalog) -> Vec<ProductRecord> {
    catalog
        .into_records()
        .into_iter()
        .map(normalize_product)
        .collect()
}

/// Normalizes a single raw record into a fully-populated [`ProductRecord`].
#[must_use]
pub fn normalize_product(raw: RawProduct) -> ProductRecord {
    let defaults = ProductRecord::default();
    let featured_image = featured_image(&raw);

    ProductRecord {
        id: raw.id,
        name: raw.name.unwrap_or(defaults.name),
        price: raw.price.unwrap_or(defaults.price),
        regular_price: raw.regular_price.unwrap_or(defaults.regular_price),
        sale_price: raw.sale_price,
        stock_status: raw.stock_status.unwrap_or(defaults.stock_status),
        stock_quantity: raw.stock_quantity.unwrap_or(defaults.stock_quantity),
        featured_image,
        url: raw.permalink.unwrap_or(defaults.url),
    }
}

/// First gallery image, or the inline placeholder when the gallery is empty
/// or its first entry has no `src`.
fn featured_image(raw: &RawProduct) -> String {
    raw.images
        .first()
        .and_then(|image| image.src.as_deref())
        .filter(|src| !src.trim().is_empty())
        .map_or_else(|| PLACEHOLDER_IMAGE.to_string(), str::to_owned)
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
