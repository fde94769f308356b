//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope. Use [`DataResponse`]
//! instead of ad-hoc `serde_json::json!({ "data": ... })` to get
//! compile-time type safety and consistent serialization.

use chatdesk_core::pagination::Page;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// One page of a keyset-paginated listing.
///
/// `next_cursor` is `null` on the last page; otherwise pass it back as
/// `?cursor=` to fetch the following page.
#[derive(Debug, Serialize)]
pub struct CursorPage<T: Serialize> {
    pub items: Vec<T>,
    pub next_cursor: Option<String>,
}

impl<T: Serialize> From<Page<T>> for CursorPage<T> {
    fn from(page: Page<T>) -> Self {
        let next_cursor = page.next_token();
        Self {
            items: page.items,
            next_cursor,
        }
    }
}
