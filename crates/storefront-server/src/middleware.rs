use std::any::Any;
use std::sync::{Arc, Mutex, PoisonError};

use axum::{
    extract::Request,
    http::{HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use storefront_core::PageEnvelope;
use uuid::Uuid;

/// Newtype wrapping a request ID string, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Per-request buffer for diagnostic notes.
///
/// Handlers record what went wrong while serving a request. The notes never
/// reach the response body: they are logged when the response is a server
/// fault and dropped otherwise.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics(Arc<Mutex<Vec<String>>>);

impl Diagnostics {
    pub fn record(&self, note: impl Into<String>) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(note.into());
    }

    fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

/// Axum middleware that extracts or generates a request ID.
///
/// If the incoming request has an `x-request-id` header, that value is used.
/// Otherwise a new `UUIDv4` is generated. The ID is:
/// - Inserted into request extensions as [`RequestId`]
/// - Set on the response as the `x-request-id` header
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert("x-request-id", val);
    }

    res
}

/// Installs a fresh [`Diagnostics`] buffer for the request and flushes it to
/// the log only if the response is a 5xx.
pub async fn capture_diagnostics(mut req: Request, next: Next) -> Response {
    let diagnostics = Diagnostics::default();
    req.extensions_mut().insert(diagnostics.clone());
    let request_id = req
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_default();

    let res = next.run(req).await;

    let notes = diagnostics.drain();
    if res.status().is_server_error() {
        for note in &notes {
            tracing::error!(
                request_id = %request_id,
                status = res.status().as_u16(),
                diagnostic = %note,
                "request failed"
            );
        }
    } else if !notes.is_empty() {
        tracing::debug!(
            request_id = %request_id,
            discarded = notes.len(),
            "discarding diagnostics for handled request"
        );
    }

    res
}

/// Converts a handler panic into the standard 500 failure envelope.
#[allow(clippy::needless_pass_by_value)]
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = %detail, "handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(PageEnvelope::failure("Internal server error")),
    )
        .into_response()
}
