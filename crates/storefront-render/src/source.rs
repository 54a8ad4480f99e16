//! Where catalog pages come from.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::RenderError;

/// An HTTP response kept as raw text so a non-JSON body can be diagnosed
/// instead of failing a parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// `true` for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Fetches one page of the catalog list endpoint.
pub trait PageSource {
    /// # Errors
    ///
    /// Returns a [`RenderError`] only when no response was received at all;
    /// any status code, including 5xx, is an `Ok` [`RawResponse`].
    fn fetch(
        &self,
        page: u32,
        per_page: u32,
    ) -> impl Future<Output = Result<RawResponse, RenderError>> + Send;
}

/// [`PageSource`] backed by the server's `GET /api/products` endpoint.
pub struct HttpPageSource {
    client: Client,
    endpoint: Url,
}

impl HttpPageSource {
    /// # Errors
    ///
    /// - [`RenderError::InvalidEndpoint`] if `endpoint` is not an absolute URL.
    /// - [`RenderError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(endpoint: &str, timeout_secs: u64) -> Result<Self, RenderError> {
        let endpoint = Url::parse(endpoint).map_err(|e| RenderError::InvalidEndpoint {
            endpoint: endpoint.to_owned(),
            reason: e.to_string(),
        })?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { client, endpoint })
    }

    fn page_url(&self, page: u32, per_page: u32) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("per_page", &per_page.to_string());
        url
    }
}

impl PageSource for HttpPageSource {
    async fn fetch(&self, page: u32, per_page: u32) -> Result<RawResponse, RenderError> {
        let url = self.page_url(page, per_page);
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }
}
