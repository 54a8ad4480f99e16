//! Page-count estimation for the catalog list endpoint.
//!
//! WooCommerce reports a true total in the `X-WP-TotalPages` header, but the
//! proxy deliberately does not rely on it: the boundary is discovered one page
//! at a time. A full page implies at least one more page exists; a short page
//! (including an empty one) is the last.
//!
//! The estimate is off by one when the catalog size is an exact multiple of
//! `per_page`: the final full page advertises a next page that comes back
//! empty.

/// Returns the `totalPages` value to advertise for `page`, given how many
/// records the upstream returned for it.
#[must_use]
pub fn estimate_total_pages(page: u32, per_page: u32, returned: usize) -> u32 {
    if is_last_page(per_page, returned) {
        page
    } else {
        page.saturating_add(1)
    }
}

/// `true` when fewer than `per_page` records came back.
#[must_use]
pub fn is_last_page(per_page: u32, returned: usize) -> bool {
    // per_page is at most 100, so the widening is lossless.
    returned < per_page as usize
}
