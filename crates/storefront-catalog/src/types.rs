//! WooCommerce `wc/v3` product payloads as they arrive on the wire.
//!
//! ## Observed shape
//!
//! ### Prices
//! `price`, `regular_price`, and `sale_price` are decimal strings. `sale_price`
//! is `""` (not `null`) when no sale is active. Some plugins emit numbers
//! instead of strings, so string fields also accept JSON numbers.
//!
//! ### `stock_quantity`
//! `null` unless the product manages stock.
//!
//! ### Collection body
//! Normally a JSON array. Some caching proxies and plugins re-encode the
//! list as an object keyed by index (`{"0": {...}, "1": {...}}`); both are
//! accepted by [`RawCatalog`].
//!
//! Every field is lenient: a missing, `null`, or wrongly-typed value decodes
//! to `None` rather than failing the record.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use storefront_core::lenient;

/// Body of `GET /products`, in either of its observed shapes.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawCatalog {
    List(Vec<Value>),
    Keyed(Map<String, Value>),
}

impl RawCatalog {
    /// Flattens either shape into records in wire order.
    ///
    /// Entries that are not JSON objects decode to an empty [`RawProduct`].
    #[must_use]
    pub fn into_records(self) -> Vec<RawProduct> {
        let values: Vec<Value> = match self {
            RawCatalog::List(values) => values,
            RawCatalog::Keyed(map) => map.into_iter().map(|(_, v)| v).collect(),
        };
        values.into_iter().map(RawProduct::from_value).collect()
    }
}

/// A single product record with every field optional.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawProduct {
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub price: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub regular_price: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub sale_price: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub stock_status: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub stock_quantity: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub permalink: Option<String>,
    #[serde(default, deserialize_with = "lenient_images")]
    pub images: Vec<RawImage>,
}

impl RawProduct {
    /// Decodes one record, falling back to an all-`None` record when `value`
    /// is not an object.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }
}

/// An entry of a product's `images` gallery.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawImage {
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub src: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub alt: Option<String>,
}

fn lenient_images<'de, D>(deserializer: D) -> Result<Vec<RawImage>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap_or_default())
            .collect(),
        _ => Vec::new(),
    })
}
