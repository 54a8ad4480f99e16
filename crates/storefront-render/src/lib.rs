//! Server-side rendering of catalog pages from the list endpoint's JSON.
//!
//! [`CatalogView`] drives one content region: it shows a loading panel,
//! fetches a page through a [`PageSource`], classifies the response, and
//! replaces the region with exactly one of the error, empty-state, or product
//! grid panels.

pub mod classify;
pub mod controller;
pub mod error;
pub mod format;
pub mod pagination;
pub mod region;
pub mod source;
pub mod view;

pub use controller::{CatalogView, RenderOutcome};
pub use error::RenderError;
pub use pagination::PaginationState;
pub use region::{ContentRegion, MemoryRegion};
pub use source::{HttpPageSource, PageSource, RawResponse};
