use axum::{
    extract::{rejection::QueryRejection, State},
    http::StatusCode,
    Extension, Json,
};
use storefront_core::PageEnvelope;

use super::{normalize_page, normalize_per_page, AppState, LastValueQuery, CREDENTIALS_MISSING};
use crate::middleware::Diagnostics;

/// `page` and `per_page` are parsed leniently so `?page=abc` behaves like
/// page 1 instead of a 400.
pub(super) async fn list_products(
    State(state): State<AppState>,
    Extension(diagnostics): Extension<Diagnostics>,
    query: Result<LastValueQuery, QueryRejection>,
) -> (StatusCode, Json<PageEnvelope>) {
    let Some(catalog) = state.catalog.as_ref() else {
        diagnostics.record("product list requested without store credentials");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(PageEnvelope::failure(CREDENTIALS_MISSING)),
        );
    };

    let params = match query {
        Ok(params) => params,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(PageEnvelope::failure(rejection.body_text())),
            );
        }
    };

    let page = normalize_page(params.get("page"));
    let per_page = normalize_per_page(params.get("per_page"));

    let envelope = catalog.fetch_page(page, per_page).await;
    if let Some(error) = envelope.error.as_deref() {
        diagnostics.record(format!("page {page}: {error}"));
    }

    (StatusCode::OK, Json(envelope))
}
