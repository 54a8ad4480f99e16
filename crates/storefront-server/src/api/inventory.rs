use axum::{
    extract::{rejection::QueryRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Serialize;
use storefront_catalog::CatalogError;
use storefront_core::StockFragment;

use super::{parse_int_lenient, ApiError, AppState, LastValueQuery, CREDENTIALS_MISSING};
use crate::middleware::Diagnostics;

#[derive(Debug, Serialize)]
struct InventoryResponse {
    success: bool,
    #[serde(flatten)]
    fragment: StockFragment,
}

/// Maps a catalog error to its HTTP status. Only configuration problems are
/// server faults; everything upstream is reported to the caller as a 400.
fn error_status(error: &CatalogError) -> StatusCode {
    match error {
        CatalogError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_REQUEST,
    }
}

pub(super) async fn inventory_fragment(
    State(state): State<AppState>,
    Extension(diagnostics): Extension<Diagnostics>,
    query: Result<LastValueQuery, QueryRejection>,
) -> Response {
    let Some(catalog) = state.catalog.as_ref() else {
        diagnostics.record("inventory requested without store credentials");
        return ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, CREDENTIALS_MISSING)
            .into_response();
    };

    let params = match query {
        Ok(params) => params,
        Err(rejection) => {
            return ApiError::new(StatusCode::BAD_REQUEST, rejection.body_text()).into_response();
        }
    };

    let product_id = params.get("product_id").map_or(0, parse_int_lenient);
    if product_id == 0 {
        return ApiError::new(StatusCode::BAD_REQUEST, "Product ID is required").into_response();
    }

    match catalog.fetch_stock(product_id).await {
        Ok(fragment) => (
            StatusCode::OK,
            Json(InventoryResponse {
                success: true,
                fragment,
            }),
        )
            .into_response(),
        Err(e) => {
            let status = error_status(&e);
            diagnostics.record(format!("inventory for product {product_id}: {e}"));
            tracing::warn!(product_id, error = %e, "inventory lookup failed");
            ApiError::new(status, e.to_string()).into_response()
        }
    }
}
