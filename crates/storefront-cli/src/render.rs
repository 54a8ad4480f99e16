//! `render` command: one catalog page to HTML.

use std::io::Write;
use std::path::Path;

use storefront_render::{CatalogView, HttpPageSource, MemoryRegion, RenderOutcome};

/// Renders `page` and returns the final markup with its outcome.
pub(crate) async fn render_page(
    endpoint: &str,
    page: u32,
    per_page: u32,
    timeout_secs: u64,
) -> anyhow::Result<(RenderOutcome, String)> {
    let source = HttpPageSource::new(endpoint, timeout_secs)?;
    let mut view = CatalogView::new(source, MemoryRegion::new(), per_page);
    let outcome = view.render(page).await;
    let state = view.state();
    tracing::info!(
        ?outcome,
        current_page = state.current_page,
        total_pages = state.total_pages,
        "rendered catalog page"
    );
    Ok((outcome, view.into_region().current().to_string()))
}

/// Writes the rendered page to `out` or stdout. Error panels are still
/// written; the command then fails so scripts can tell.
pub(crate) async fn run_render(
    endpoint: &str,
    page: u32,
    per_page: u32,
    timeout_secs: u64,
    out: Option<&Path>,
) -> anyhow::Result<()> {
    let (outcome, html) = render_page(endpoint, page, per_page, timeout_secs).await?;

    match out {
        Some(path) => std::fs::write(path, &html)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(html.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    match outcome {
        RenderOutcome::Rendered | RenderOutcome::EmptyResult => Ok(()),
        RenderOutcome::ErrorTransport | RenderOutcome::ErrorApplication => {
            anyhow::bail!("catalog page {page} did not render ({outcome:?})")
        }
    }
}
