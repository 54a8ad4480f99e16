pub mod client;
pub mod error;
pub mod normalize;
pub mod pagination;
pub mod service;
pub mod stock;
pub mod types;

pub use client::WooClient;
pub use error::CatalogError;
pub use normalize::{normalize_product, normalize_records};
pub use service::{CatalogOptions, CatalogService};
pub use types::{RawCatalog, RawImage, RawProduct};
