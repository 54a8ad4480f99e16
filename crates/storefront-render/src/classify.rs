//! Triage of a raw list-endpoint response before any JSON parsing.
//!
//! Proxies and crashed FastCGI backends answer with HTML error pages,
//! sometimes with a 200 status. Such bodies are reported as transport errors
//! with the page's `<title>` when one exists.

use std::sync::LazyLock;

use regex::Regex;

use crate::source::RawResponse;

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("valid title regex"));

/// Returns the transport-error message for `response`, or `None` when the
/// body looks like a JSON envelope and should be parsed.
///
/// A response is a transport error when its status is not 2xx or its first
/// non-whitespace character is not `{`.
#[must_use]
pub fn transport_error(response: &RawResponse) -> Option<String> {
    let looks_like_json = response.body.trim_start().starts_with('{');
    if response.is_success() && looks_like_json {
        return None;
    }
    Some(transport_error_message(response))
}

fn transport_error_message(response: &RawResponse) -> String {
    extract_title(&response.body).map_or_else(
        || format!("Failed to fetch products (HTTP {})", response.status),
        |title| format!("Server Error: {title}"),
    )
}

fn extract_title(html: &str) -> Option<String> {
    let cap = TITLE_RE.captures(html)?;
    let title = cap.get(1)?.as_str().trim();
    if title.is_empty() {
        None
    } else {
        Some(title.to_owned())
    }
}
