use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::lenient;

/// Inline SVG shown when a product has no usable image. A data URI, so it
/// never triggers a network fetch.
pub const PLACEHOLDER_IMAGE: &str = "data:image/svg+xml,%3Csvg xmlns=%22http://www.w3.org/2000/svg%22 width=%22200%22 height=%22200%22%3E%3Crect fill=%22%23ddd%22 width=%22200%22 height=%22200%22/%3E%3Ctext x=%2250%25%22 y=%2250%25%22 dominant-baseline=%22middle%22 text-anchor=%22middle%22 font-family=%22Arial%22 font-size=%2214%22 fill=%22%23999%22%3ENo Image%3C/text%3E%3C/svg%3E";

/// A catalog product in the fixed shape served to the renderer.
///
/// Every field always has a value. [`ProductRecord::default`] is the single
/// table of fallbacks used both when normalizing upstream records and when
/// decoding an envelope: a missing, `null`, or wrongly-typed field takes its
/// default instead of failing the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireRecord")]
pub struct ProductRecord {
    /// Upstream numeric product ID, `null` when the upstream omitted it.
    pub id: Option<i64>,
    pub name: String,
    /// Current selling price as a decimal string, e.g. `"19.99"`.
    pub price: String,
    pub regular_price: String,
    /// Sale price as sent upstream. WooCommerce sends `""` when no sale is
    /// active, so presence alone does not mean "on sale"; see [`Self::is_on_sale`].
    pub sale_price: Option<String>,
    /// `"instock"`, `"outofstock"`, or whatever else upstream reports.
    pub stock_status: String,
    pub stock_quantity: i64,
    pub featured_image: String,
    /// Storefront permalink.
    pub url: String,
}

impl Default for ProductRecord {
    fn default() -> Self {
        Self {
            id: None,
            name: "No name".to_string(),
            price: "0".to_string(),
            regular_price: "0".to_string(),
            sale_price: None,
            stock_status: "unknown".to_string(),
            stock_quantity: 0,
            featured_image: PLACEHOLDER_IMAGE.to_string(),
            url: "#".to_string(),
        }
    }
}

/// Decode-side shape of [`ProductRecord`] with every field optional.
#[derive(Deserialize)]
struct WireRecord {
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    price: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    regular_price: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    sale_price: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    stock_status: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    stock_quantity: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    featured_image: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    url: Option<String>,
}

impl From<WireRecord> for ProductRecord {
    fn from(wire: WireRecord) -> Self {
        let defaults = Self::default();
        Self {
            id: wire.id,
            name: wire.name.unwrap_or(defaults.name),
            price: wire.price.unwrap_or(defaults.price),
            regular_price: wire.regular_price.unwrap_or(defaults.regular_price),
            sale_price: wire.sale_price,
            stock_status: wire.stock_status.unwrap_or(defaults.stock_status),
            stock_quantity: wire.stock_quantity.unwrap_or(defaults.stock_quantity),
            featured_image: wire.featured_image.unwrap_or(defaults.featured_image),
            url: wire.url.unwrap_or(defaults.url),
        }
    }
}

/// Decodes `products`, turning each non-object entry into a default record
/// and anything other than an array into an empty list.
fn lenient_records<'de, D>(deserializer: D) -> Result<Vec<ProductRecord>, D::Error>
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

impl ProductRecord {
    #[must_use]
    pub fn is_in_stock(&self) -> bool {
        self.stock_status == "instock"
    }

    /// `true` when `sale_price` holds a non-empty value.
    #[must_use]
    pub fn is_on_sale(&self) -> bool {
        self.sale_price.as_deref().is_some_and(|s| !s.is_empty())
    }
}

/// One page of catalog results, or a failure, as served by the list endpoint.
///
/// On failure only `success`, `error`, and an empty `products` are present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageEnvelope {
    pub success: bool,
    #[serde(default, deserialize_with = "lenient_records")]
    pub products: Vec<ProductRecord>,
    /// Number of records on this page, not a catalog-wide count.
    #[serde(
        default,
        deserialize_with = "lenient::opt_usize",
        skip_serializing_if = "Option::is_none"
    )]
    pub total: Option<usize>,
    #[serde(
        rename = "currentPage",
        default,
        deserialize_with = "lenient::opt_u32",
        skip_serializing_if = "Option::is_none"
    )]
    pub current_page: Option<u32>,
    #[serde(
        rename = "perPage",
        default,
        deserialize_with = "lenient::opt_u32",
        skip_serializing_if = "Option::is_none"
    )]
    pub per_page: Option<u32>,
    #[serde(
        rename = "totalPages",
        default,
        deserialize_with = "lenient::opt_u32",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_pages: Option<u32>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub error: Option<String>,
}

impl PageEnvelope {
    /// Builds a successful page envelope. `total` is taken from `products`.
    #[must_use]
    pub fn page(products: Vec<ProductRecord>, page: u32, per_page: u32, total_pages: u32) -> Self {
        Self {
            success: true,
            total: Some(products.len()),
            products,
            current_page: Some(page),
            per_page: Some(per_page),
            total_pages: Some(total_pages),
            error: None,
        }
    }

    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            products: Vec::new(),
            total: None,
            current_page: None,
            per_page: None,
            total_pages: None,
            error: Some(error.into()),
        }
    }
}

/// Live inventory for a single product plus its rendered badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockFragment {
    pub product_id: i64,
    pub stock_quantity: i64,
    pub stock_status: String,
    /// `<span class="product-stock ...">...</span>` ready to drop into a card.
    pub stock_html: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_record_matches_fallback_table() {
        let record = ProductRecord::default();
        assert_eq!(record.id, None);
        assert_eq!(record.name, "No name");
        assert_eq!(record.price, "0");
        assert_eq!(record.regular_price, "0");
        assert_eq!(record.sale_price, None);
        assert_eq!(record.stock_status, "unknown");
        assert_eq!(record.stock_quantity, 0);
        assert_eq!(record.featured_image, PLACEHOLDER_IMAGE);
        assert_eq!(record.url, "#");
    }

    #[test]
    fn empty_sale_price_is_not_on_sale() {
        let mut record = ProductRecord {
            sale_price: Some(String::new()),
            ..ProductRecord::default()
        };
        assert!(!record.is_on_sale());
        record.sale_price = Some("9.99".to_string());
        assert!(record.is_on_sale());
    }

    #[test]
    fn page_envelope_uses_camel_case_pagination_keys() {
        let envelope = PageEnvelope::page(vec![ProductRecord::default()], 2, 12, 2);
        let json = serde_json::to_value(&envelope).expect("serialize");
        assert_eq!(json["success"], true);
        assert_eq!(json["total"], 1);
        assert_eq!(json["currentPage"], 2);
        assert_eq!(json["perPage"], 12);
        assert_eq!(json["totalPages"], 2);
        assert!(json.get("error").is_none());
        assert!(json["products"][0]["id"].is_null());
    }

    #[test]
    fn failure_envelope_carries_only_error_and_empty_products() {
        let json = serde_json::to_value(PageEnvelope::failure("boom")).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"success": false, "products": [], "error": "boom"})
        );
    }

    #[test]
    fn decoding_fills_missing_product_fields_with_defaults() {
        let envelope: PageEnvelope = serde_json::from_str(
            r#"{"success":true,"products":[{"id":3,"name":"Mug"}],"currentPage":1,"totalPages":1}"#,
        )
        .expect("decode");
        let product = &envelope.products[0];
        assert_eq!(product.id, Some(3));
        assert_eq!(product.name, "Mug");
        assert_eq!(product.price, "0");
        assert_eq!(product.url, "#");
    }

    #[test]
    fn decoding_tolerates_null_and_wrongly_typed_fields() {
        let envelope: PageEnvelope = serde_json::from_value(serde_json::json!({
            "success": true,
            "products": [
                {"id": 1, "name": null, "price": 5.5, "stock_quantity": "4"},
                null,
                {"id": "2", "name": "Ok", "url": false}
            ],
            "total": "3",
            "currentPage": 1,
            "totalPages": "1"
        }))
        .expect("decode");

        assert_eq!(envelope.products.len(), 3);
        let first = &envelope.products[0];
        assert_eq!(first.name, "No name");
        assert_eq!(first.price, "5.5");
        assert_eq!(first.stock_quantity, 4);
        assert_eq!(envelope.products[1], ProductRecord::default());
        assert_eq!(envelope.products[2].id, Some(2));
        assert_eq!(envelope.products[2].url, "#");
        assert_eq!(envelope.total, Some(3));
        assert_eq!(envelope.total_pages, Some(1));
    }

    #[test]
    fn serialized_record_decodes_to_itself() {
        let record = ProductRecord {
            id: Some(9),
            name: "Lamp".to_string(),
            sale_price: Some("8.00".to_string()),
            ..ProductRecord::default()
        };
        let json = serde_json::to_value(&record).expect("serialize");
        let back: ProductRecord = serde_json::from_value(json).expect("decode");
        assert_eq!(back, record);
    }
}
