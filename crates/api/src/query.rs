//! Shared query parameter types for API handlers.

use chatdesk_core::pagination::{clamp_limit, decode, Cursor, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use serde::Deserialize;

use crate::error::AppResult;

/// Keyset pagination parameters (`?limit=&cursor=`).
///
/// A non-numeric `limit` is rejected by the `Query` extractor with 400.
#[derive(Debug, Default, Deserialize)]
pub struct CursorParams {
    pub limit: Option<i64>,
    pub cursor: Option<String>,
}

impl CursorParams {
    /// Page size clamped to `[1, 200]`, defaulting to 50.
    pub fn limit(&self) -> i64 {
        clamp_limit(self.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT)
    }

    /// The decoded cursor. A blank `cursor=` means "first page".
    pub fn cursor(&self) -> AppResult<Option<Cursor>> {
        match self.cursor.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(token) => Ok(Some(decode(token)?)),
        }
    }
}
