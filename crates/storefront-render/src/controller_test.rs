use std::collections::HashMap;
use std::sync::Mutex;

use storefront_core::ProductRecord;

use super::*;
use crate::region::MemoryRegion;
use crate::source::RawResponse;

/// Canned responses keyed by page; pages without an entry fail to connect.
#[derive(Default)]
struct StubSource {
    pages: HashMap<u32, RawResponse>,
    requests: Mutex<Vec<(u32, u32)>>,
}

impl StubSource {
    fn with_page(mut self, page: u32, response: RawResponse) -> Self {
        self.pages.insert(page, response);
        self
    }

    fn with_envelope(self, page: u32, envelope: &PageEnvelope) -> Self {
        let body = serde_json::to_string(envelope).expect("serialize envelope");
        self.with_page(page, RawResponse::new(200, body))
    }
}

impl PageSource for StubSource {
    async fn fetch(&self, page: u32, per_page: u32) -> Result<RawResponse, RenderError> {
        self.requests
            .lock()
            .expect("requests lock")
            .push((page, per_page));
        self.pages
            .get(&page)
            .cloned()
            .ok_or_else(|| RenderError::InvalidEndpoint {
                endpoint: "stub".to_owned(),
                reason: format!("connection refused for page {page}"),
            })
    }
}

fn product(id: i64) -> ProductRecord {
    ProductRecord {
        id: Some(id),
        name: format!("Product {id}"),
        price: "10".to_owned(),
        regular_price: "12.5".to_owned(),
        sale_price: Some(String::new()),
        stock_status: "instock".to_owned(),
        stock_quantity: 3,
        featured_image: format!("https://cdn.example.com/{id}.jpg"),
        url: format!("https://shop.example.com/product/{id}/"),
    }
}

fn products(count: i64) -> Vec<ProductRecord> {
    (1..=count).map(product).collect()
}

fn view(source: StubSource) -> CatalogView<StubSource, MemoryRegion> {
    CatalogView::new(source, MemoryRegion::recording(), 12)
}

fn page_buttons(html: &str) -> Vec<u32> {
    html.match_indices("data-page=\"")
        .filter_map(|(idx, _)| {
            let rest = &html[idx + "data-page=\"".len()..];
            let end = rest.find('"')?;
            let tag_end = rest.find("</button>")?;
            let label = &rest[rest.find('>')? + 1..tag_end];
            // Numbered buttons are labelled with their own page number.
            (label == &rest[..end]).then(|| rest[..end].parse().ok()).flatten()
        })
        .collect()
}

// -----------------------------------------------------------------------
// Terminal states
// -----------------------------------------------------------------------

#[tokio::test]
async fn full_first_page_renders_grid_with_next_and_last_only() {
    let envelope = PageEnvelope::page(products(12), 1, 12, 2);
    let mut view = view(StubSource::default().with_envelope(1, &envelope));

    let outcome = view.render(1).await;

    assert_eq!(outcome, RenderOutcome::Rendered);
    let html = view.region().current();
    assert_eq!(html.matches("class=\"product-card\"").count(), 12);
    assert_eq!(page_buttons(html), vec![1, 2]);
    assert!(html.contains("Next ›"));
    assert!(html.contains("Last »"));
    assert!(!html.contains("« First"));
    assert!(!html.contains("‹ Previous"));
    assert!(html.contains(r#"data-page="1" class="active">1</button>"#));
    assert!(html.contains("Page 1 of 2 (12 products on this page)"));
    assert_eq!(
        view.state(),
        PaginationState {
            current_page: 1,
            total_pages: 2
        }
    );
}

#[tokio::test]
async fn loading_panel_is_written_before_the_result() {
    let envelope = PageEnvelope::page(products(1), 1, 12, 1);
    let mut view = view(StubSource::default().with_envelope(1, &envelope));

    view.render(1).await;

    let history = view.region().history();
    assert_eq!(history.len(), 2);
    assert!(history[0].contains("Loading products..."));
    assert!(!history[1].contains("Loading products..."));
}

#[tokio::test]
async fn middle_page_shows_window_and_all_navigation() {
    let envelope = PageEnvelope::page(products(12), 5, 12, 10);
    let mut view = view(StubSource::default().with_envelope(5, &envelope));

    assert_eq!(view.render(5).await, RenderOutcome::Rendered);

    let html = view.region().current();
    assert_eq!(page_buttons(html), vec![3, 4, 5, 6, 7]);
    assert!(html.contains("« First"));
    assert!(html.contains(r#"data-page="4">‹ Previous"#));
    assert!(html.contains(r#"data-page="6">Next ›"#));
    assert!(html.contains(r#"data-page="10">Last »"#));
    assert!(html.contains(r#"data-page="5" class="active">5</button>"#));
}

#[tokio::test]
async fn single_page_has_no_summary_line() {
    let envelope = PageEnvelope::page(products(3), 1, 12, 1);
    let mut view = view(StubSource::default().with_envelope(1, &envelope));

    view.render(1).await;

    let html = view.region().current();
    assert_eq!(page_buttons(html), vec![1]);
    assert!(!html.contains("pagination-info"));
    assert!(!html.contains("Next ›"));
}

#[tokio::test]
async fn empty_page_renders_empty_state_without_pagination() {
    let envelope = PageEnvelope::page(Vec::new(), 1, 12, 1);
    let mut view = view(StubSource::default().with_envelope(1, &envelope));

    assert_eq!(view.render(1).await, RenderOutcome::EmptyResult);

    let html = view.region().current();
    assert!(html.contains("No Products Found"));
    assert!(!html.contains("pagination"));
    assert!(!html.contains("error-message"));
}

#[tokio::test]
async fn html_500_is_reported_by_title_without_parsing() {
    let body = "<html><head><title>Internal Server Error</title></head><body>{}</body></html>";
    let source = StubSource::default().with_page(1, RawResponse::new(500, body));
    let mut view = view(source);

    assert_eq!(view.render(1).await, RenderOutcome::ErrorTransport);

    let html = view.region().current();
    assert!(html.contains("Server Error: Internal Server Error"));
    assert!(html.contains("Check the logs for details."));
}

#[tokio::test]
async fn failure_envelope_shows_escaped_error() {
    let envelope = PageEnvelope::failure("Failed to fetch products: <b>401</b>");
    let mut view = view(StubSource::default().with_envelope(1, &envelope));

    assert_eq!(view.render(1).await, RenderOutcome::ErrorApplication);

    let html = view.region().current();
    assert!(html.contains("Failed to fetch products: &lt;b&gt;401&lt;/b&gt;"));
    assert!(!html.contains("<b>401</b>"));
    assert!(!html.contains("Check the logs"));
}

#[tokio::test]
async fn failure_envelope_without_message_says_unknown_error() {
    let source =
        StubSource::default().with_page(1, RawResponse::new(200, r#"{"success":false}"#));
    let mut view = view(source);

    assert_eq!(view.render(1).await, RenderOutcome::ErrorApplication);
    assert!(view.region().current().contains("Unknown error"));
}

#[tokio::test]
async fn malformed_json_falls_back_to_connectivity_panel() {
    let source = StubSource::default().with_page(1, RawResponse::new(200, "{\"success\": tru"));
    let mut view = view(source);

    assert_eq!(view.render(1).await, RenderOutcome::ErrorTransport);
    assert_eq!(view.region().current(), CONNECTIVITY_PANEL);
}

#[tokio::test]
async fn null_and_numeric_fields_still_render_every_card() {
    let body = r#"{
        "success": true,
        "products": [
            {"id": 1, "name": null, "price": "5"},
            {"id": 2, "name": "Ok", "price": 5.5, "stock_status": "instock", "stock_quantity": "2"}
        ],
        "total": 2,
        "currentPage": 1,
        "perPage": 12,
        "totalPages": 1
    }"#;
    let mut view = view(StubSource::default().with_page(1, RawResponse::new(200, body)));

    assert_eq!(view.render(1).await, RenderOutcome::Rendered);
    let html = view.region().current();
    assert_eq!(html.matches("class=\"product-card\"").count(), 2);
    assert!(html.contains("No name"));
    assert!(html.contains(">5.00</div>"));
    assert!(html.contains(">5.50</div>"));
    assert!(html.contains("✓ In Stock"));
}

#[tokio::test]
async fn unreachable_source_falls_back_to_connectivity_panel() {
    let mut view = view(StubSource::default());

    assert_eq!(view.render(1).await, RenderOutcome::ErrorTransport);
    assert_eq!(view.region().current(), CONNECTIVITY_PANEL);
    assert_eq!(view.region().history().len(), 2);
}

// -----------------------------------------------------------------------
// Card content
// -----------------------------------------------------------------------

#[tokio::test]
async fn card_text_is_escaped() {
    let mut record = product(1);
    record.name = "<script>alert('x')</script>".to_owned();
    let envelope = PageEnvelope::page(vec![record], 1, 12, 1);
    let mut view = view(StubSource::default().with_envelope(1, &envelope));

    view.render(1).await;

    let html = view.region().current();
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
}

#[tokio::test]
async fn sale_price_shows_struck_regular_price() {
    let mut on_sale = product(1);
    on_sale.price = "9.5".to_owned();
    on_sale.sale_price = Some("9.5".to_owned());
    let regular = product(2);
    let envelope = PageEnvelope::page(vec![on_sale, regular], 1, 12, 1);
    let mut view = view(StubSource::default().with_envelope(1, &envelope));

    view.render(1).await;

    let html = view.region().current();
    assert!(html.contains(r#"<span class="original">12.50</span>9.50"#));
    assert_eq!(html.matches("class=\"original\"").count(), 1);
}

#[tokio::test]
async fn unparsable_price_and_unknown_stock() {
    let mut record = product(1);
    record.price = "call us".to_owned();
    record.stock_status = "onbackorder".to_owned();
    let envelope = PageEnvelope::page(vec![record], 1, 12, 1);
    let mut view = view(StubSource::default().with_envelope(1, &envelope));

    view.render(1).await;

    let html = view.region().current();
    assert!(html.contains(">N/A</div>"));
    assert!(html.contains("stock-outofstock"));
    assert!(html.contains("✗ Out of Stock"));
}

#[tokio::test]
async fn image_has_placeholder_fallback() {
    let envelope = PageEnvelope::page(products(1), 1, 12, 1);
    let mut view = view(StubSource::default().with_envelope(1, &envelope));

    view.render(1).await;

    let html = view.region().current();
    assert!(html.contains(r#"src="https://cdn.example.com/1.jpg""#));
    assert!(html.contains("onerror=\"this.src='data:image/svg+xml,"));
}

#[tokio::test]
async fn rendering_the_same_envelope_twice_is_identical() {
    let envelope = PageEnvelope::page(products(12), 2, 12, 3);
    let mut view = view(StubSource::default().with_envelope(2, &envelope));

    view.render(2).await;
    view.render(2).await;

    let history = view.region().history();
    assert_eq!(history.len(), 4);
    assert_eq!(history[1], history[3]);
}

// -----------------------------------------------------------------------
// Pagination state and navigation
// -----------------------------------------------------------------------

#[tokio::test]
async fn failed_render_keeps_previous_state() {
    let envelope = PageEnvelope::page(products(12), 2, 12, 3);
    let source = StubSource::default()
        .with_envelope(2, &envelope)
        .with_page(3, RawResponse::new(502, ""));
    let mut view = view(source);

    view.render(2).await;
    assert_eq!(view.next().await, Some(RenderOutcome::ErrorTransport));

    assert_eq!(
        view.state(),
        PaginationState {
            current_page: 2,
            total_pages: 3
        }
    );
    assert!(view
        .region()
        .current()
        .contains("Failed to fetch products (HTTP 502)"));
}

#[tokio::test]
async fn navigation_is_a_no_op_at_the_boundaries() {
    let envelope = PageEnvelope::page(products(3), 1, 12, 1);
    let mut view = view(StubSource::default().with_envelope(1, &envelope));

    view.render(1).await;

    assert_eq!(view.first().await, None);
    assert_eq!(view.previous().await, None);
    assert_eq!(view.next().await, None);
    assert_eq!(view.last().await, None);
    assert_eq!(view.region().history().len(), 2);
}

#[tokio::test]
async fn navigation_requests_the_expected_pages() {
    let source = StubSource::default()
        .with_envelope(1, &PageEnvelope::page(products(12), 1, 12, 2))
        .with_envelope(2, &PageEnvelope::page(products(12), 2, 12, 3))
        .with_envelope(3, &PageEnvelope::page(products(4), 3, 12, 3));
    let mut view = view(source);

    view.render(1).await;
    assert_eq!(view.next().await, Some(RenderOutcome::Rendered));
    assert_eq!(view.last().await, Some(RenderOutcome::Rendered));
    assert_eq!(view.previous().await, Some(RenderOutcome::Rendered));
    assert_eq!(view.first().await, Some(RenderOutcome::Rendered));

    let requests = view.source.requests.lock().expect("requests lock").clone();
    assert_eq!(
        requests,
        vec![(1, 12), (2, 12), (3, 12), (2, 12), (1, 12)]
    );
}

#[tokio::test]
async fn page_zero_is_treated_as_page_one() {
    let envelope = PageEnvelope::page(products(1), 1, 12, 1);
    let mut view = view(StubSource::default().with_envelope(1, &envelope));

    assert_eq!(view.render(0).await, RenderOutcome::Rendered);
}

#[tokio::test]
async fn saved_state_enables_navigation_before_first_render() {
    let envelope = PageEnvelope::page(products(12), 4, 12, 5);
    let mut view = view(StubSource::default().with_envelope(4, &envelope)).with_state(
        PaginationState {
            current_page: 3,
            total_pages: 5,
        },
    );

    assert_eq!(view.next().await, Some(RenderOutcome::Rendered));
    assert_eq!(view.state().current_page, 4);
}
