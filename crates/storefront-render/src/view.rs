//! Askama templates for every panel the content region can show.
//!
//! Templates live in `templates/` and are HTML-escaped by default, so any
//! product text reaching them is neutralized.

use askama::Template;
use storefront_core::{ProductRecord, PLACEHOLDER_IMAGE};

use crate::format::format_price;
use crate::pagination::PaginationState;

/// Shown when the pipeline fails before a classified response exists.
/// Plain markup so it cannot itself fail to render.
pub const CONNECTIVITY_PANEL: &str = r#"<div class="error-message">
    <strong>Error:</strong> Failed to fetch products. Please check your connection and try again.
</div>"#;

#[derive(Template)]
#[template(path = "loading.html")]
pub struct LoadingPanel;

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPanel<'a> {
    pub message: &'a str,
    /// Adds a pointer to the logs; used for transport errors.
    pub show_hint: bool,
}

#[derive(Template)]
#[template(path = "empty.html")]
pub struct EmptyPanel;

#[derive(Template)]
#[template(path = "grid.html")]
pub struct ProductGrid {
    pub cards: Vec<ProductCard>,
    pub pagination: PaginationView,
    pub placeholder: &'static str,
}

impl ProductGrid {
    #[must_use]
    pub fn new(products: &[ProductRecord], state: PaginationState, on_page: usize) -> Self {
        Self {
            cards: products.iter().map(ProductCard::from_record).collect(),
            pagination: PaginationView::new(state, on_page),
            placeholder: PLACEHOLDER_IMAGE,
        }
    }
}

/// Display-ready fields for one product card.
pub struct ProductCard {
    pub name: String,
    pub image_url: String,
    pub price: String,
    /// Struck-through regular price; only rendered when `on_sale`.
    pub regular_price: String,
    pub on_sale: bool,
    pub stock_class: &'static str,
    pub stock_text: &'static str,
}

impl ProductCard {
    #[must_use]
    pub fn from_record(record: &ProductRecord) -> Self {
        let (stock_class, stock_text) = if record.is_in_stock() {
            ("stock-instock", "✓ In Stock")
        } else {
            ("stock-outofstock", "✗ Out of Stock")
        };
        Self {
            name: record.name.clone(),
            image_url: record.featured_image.clone(),
            price: format_price(&record.price),
            regular_price: format_price(&record.regular_price),
            on_sale: record.is_on_sale(),
            stock_class,
            stock_text,
        }
    }
}

pub struct PageButton {
    pub number: u32,
    pub active: bool,
}

/// Pagination controls derived from a [`PaginationState`].
pub struct PaginationView {
    pub has_previous: bool,
    pub previous: u32,
    pub buttons: Vec<PageButton>,
    pub has_next: bool,
    pub next: u32,
    pub last: u32,
    pub show_summary: bool,
    pub summary: String,
}

impl PaginationView {
    #[must_use]
    pub fn new(state: PaginationState, on_page: usize) -> Self {
        let buttons = state
            .window()
            .map(|number| PageButton {
                number,
                active: number == state.current_page,
            })
            .collect();
        Self {
            has_previous: state.has_previous(),
            previous: state.current_page.saturating_sub(1),
            buttons,
            has_next: state.has_next(),
            next: state.current_page.saturating_add(1),
            last: state.total_pages,
            show_summary: state.total_pages > 1,
            summary: format!(
                "Page {} of {} ({on_page} products on this page)",
                state.current_page, state.total_pages
            ),
        }
    }
}
