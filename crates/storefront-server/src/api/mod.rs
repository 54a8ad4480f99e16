mod inventory;
mod products;

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, FromRequestParts, Query, State},
    http::{header, request::Parts, HeaderName, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use storefront_catalog::{CatalogOptions, CatalogService};
use storefront_core::AppConfig;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer, cors::CorsLayer, set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::middleware::{capture_diagnostics, handle_panic, request_id};

/// Fixed message returned while store credentials are missing.
pub(super) const CREDENTIALS_MISSING: &str = "API credentials not configured.";

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

#[derive(Clone)]
pub struct AppState {
    /// `None` when the store credentials are missing or unusable; every
    /// catalog request then answers with a configuration error.
    pub catalog: Option<Arc<CatalogService>>,
}

impl AppState {
    /// Builds the catalog service from config, logging rather than failing
    /// when the credentials are not usable.
    pub fn from_config(config: &AppConfig) -> Self {
        let options = CatalogOptions::from_app_config(config);
        let catalog = match CatalogService::new(&config.store, &options) {
            Ok(service) => Some(Arc::new(service)),
            Err(e) => {
                tracing::error!(error = %e, "catalog service unavailable");
                None
            }
        };
        Self { catalog }
    }
}

/// Body of every non-list error response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub success: bool,
    pub error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            success: false,
            error: error.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self)).into_response()
    }
}

/// Query string pairs where a repeated key resolves to its last value
/// (`?page=1&page=2` reads as page 2).
#[derive(Debug, Default)]
pub(super) struct LastValueQuery(Vec<(String, String)>);

impl LastValueQuery {
    pub(super) fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl<S: Send + Sync> FromRequestParts<S> for LastValueQuery {
    type Rejection = QueryRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)?;
        Ok(Self(pairs))
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    catalog: &'static str,
}

/// Parses a query value the way a loose integer cast does: optional sign,
/// leading digits, anything after ignored. No digits yields `0`; overflow
/// saturates.
pub(super) fn parse_int_lenient(raw: &str) -> i64 {
    let s = raw.trim_start();
    let (negative, unsigned) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..end];
    if digits.is_empty() {
        return 0;
    }
    match digits.parse::<i64>() {
        Ok(n) if negative => -n,
        Ok(n) => n,
        Err(_) if negative => i64::MIN,
        Err(_) => i64::MAX,
    }
}

/// `page` query value: defaults to 1, never below 1.
pub(super) fn normalize_page(raw: Option<&str>) -> u32 {
    raw.map_or(1, |r| {
        let n = parse_int_lenient(r).clamp(1, i64::from(u32::MAX));
        u32::try_from(n).unwrap_or(u32::MAX)
    })
}

/// `per_page` query value clamped to `1..=100`; `None` when absent so the
/// service default applies.
pub(super) fn normalize_per_page(raw: Option<&str>) -> Option<u32> {
    raw.map(|r| {
        let n = parse_int_lenient(r).clamp(1, i64::from(storefront_core::MAX_PER_PAGE));
        u32::try_from(n).unwrap_or(storefront_core::MAX_PER_PAGE)
    })
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

pub fn build_app(state: AppState) -> Router {
    let routes = Router::new()
        .route("/api/health", get(health))
        .route("/api/products", get(products::list_products))
        .route(
            "/api/inventory-fragment",
            get(inventory::inventory_fragment),
        )
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state);

    with_json_layers(routes)
}

/// Wraps routes with the JSON-only response stack: tracing, request IDs,
/// diagnostic capture, a forced JSON content type, and panic recovery.
pub(crate) fn with_json_layers(routes: Router) -> Router {
    routes.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(build_cors())
            .layer(axum::middleware::from_fn(request_id))
            .layer(axum::middleware::from_fn(capture_diagnostics))
            .layer(SetResponseHeaderLayer::overriding(
                header::CONTENT_TYPE,
                HeaderValue::from_static(JSON_CONTENT_TYPE),
            ))
            .layer(CatchPanicLayer::custom(handle_panic)),
    )
}

async fn not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "Not found")
}

async fn method_not_allowed() -> ApiError {
    ApiError::new(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let catalog = if state.catalog.is_some() {
        "configured"
    } else {
        "unconfigured"
    };
    (
        StatusCode::OK,
        Json(HealthData {
            status: "ok",
            catalog,
        }),
    )
}
