//! The catalog rendering/pagination controller.

use askama::Template;
use storefront_core::PageEnvelope;

use crate::classify::transport_error;
use crate::error::RenderError;
use crate::pagination::PaginationState;
use crate::region::ContentRegion;
use crate::source::PageSource;
use crate::view::{EmptyPanel, ErrorPanel, LoadingPanel, ProductGrid, CONNECTIVITY_PANEL};

/// Terminal state of one [`CatalogView::render`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Non-2xx status, non-JSON body, or no usable response at all.
    ErrorTransport,
    /// A well-formed envelope with `success: false`.
    ErrorApplication,
    /// A successful envelope with no products.
    EmptyResult,
    /// Product grid and pagination controls are showing.
    Rendered,
}

/// Drives one content region from a [`PageSource`].
///
/// Holds the pagination state that the navigation methods read. The state is
/// only updated after a successful envelope, so a failed render leaves the
/// previous position intact.
pub struct CatalogView<S, R> {
    source: S,
    region: R,
    per_page: u32,
    state: PaginationState,
}

impl<S: PageSource, R: ContentRegion> CatalogView<S, R> {
    pub fn new(source: S, region: R, per_page: u32) -> Self {
        Self {
            source,
            region,
            per_page,
            state: PaginationState::default(),
        }
    }

    /// Starts from a previously saved position instead of page 1 of 1.
    #[must_use]
    pub fn with_state(mut self, state: PaginationState) -> Self {
        self.state = state;
        self
    }

    pub fn state(&self) -> PaginationState {
        self.state
    }

    pub fn region(&self) -> &R {
        &self.region
    }

    pub fn into_region(self) -> R {
        self.region
    }

    /// Renders `page` into the region.
    ///
    /// The loading panel is written before the fetch starts. Whatever
    /// happens afterwards, exactly one terminal panel replaces it.
    pub async fn render(&mut self, page: u32) -> RenderOutcome {
        let page = page.max(1);
        match LoadingPanel.render() {
            Ok(html) => self.region.replace(html),
            Err(e) => tracing::warn!(page, error = %e, "loading panel failed to render"),
        }

        match self.load(page).await {
            Ok((outcome, html)) => {
                self.region.replace(html);
                outcome
            }
            Err(e) => {
                tracing::error!(page, error = %e, "catalog render failed");
                self.region.replace(CONNECTIVITY_PANEL.to_string());
                RenderOutcome::ErrorTransport
            }
        }
    }

    /// Renders page 1; `None` when already on the first page.
    pub async fn first(&mut self) -> Option<RenderOutcome> {
        if !self.state.has_previous() {
            return None;
        }
        Some(self.render(1).await)
    }

    pub async fn previous(&mut self) -> Option<RenderOutcome> {
        if !self.state.has_previous() {
            return None;
        }
        Some(self.render(self.state.current_page - 1).await)
    }

    /// Renders the following page; `None` when on the last known page.
    pub async fn next(&mut self) -> Option<RenderOutcome> {
        if !self.state.has_next() {
            return None;
        }
        Some(self.render(self.state.current_page + 1).await)
    }

    pub async fn last(&mut self) -> Option<RenderOutcome> {
        if !self.state.has_next() {
            return None;
        }
        Some(self.render(self.state.total_pages).await)
    }

    async fn load(&mut self, page: u32) -> Result<(RenderOutcome, String), RenderError> {
        let response = self.source.fetch(page, self.per_page).await?;

        if let Some(message) = transport_error(&response) {
            tracing::warn!(
                page,
                status = response.status,
                body_len = response.body.len(),
                "catalog endpoint returned a non-envelope response"
            );
            let html = ErrorPanel {
                message: &message,
                show_hint: true,
            }
            .render()?;
            return Ok((RenderOutcome::ErrorTransport, html));
        }

        let envelope: PageEnvelope =
            serde_json::from_str(&response.body).map_err(|e| RenderError::Deserialize {
                context: format!("catalog page {page}"),
                source: e,
            })?;

        if !envelope.success {
            let message = envelope.error.as_deref().unwrap_or("Unknown error");
            let html = ErrorPanel {
                message,
                show_hint: false,
            }
            .render()?;
            return Ok((RenderOutcome::ErrorApplication, html));
        }

        let current_page = envelope.current_page.unwrap_or(page);
        let state = PaginationState {
            current_page,
            total_pages: envelope.total_pages.unwrap_or(current_page),
        };

        if envelope.products.is_empty() {
            let html = EmptyPanel.render()?;
            self.state = state;
            return Ok((RenderOutcome::EmptyResult, html));
        }

        let on_page = envelope.total.unwrap_or(envelope.products.len());
        let html = ProductGrid::new(&envelope.products, state, on_page).render()?;
        self.state = state;
        Ok((RenderOutcome::Rendered, html))
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
