//! Keyset (cursor) pagination over `(created_at DESC, id DESC)` ordered
//! collections.
//!
//! `created_at` alone is not unique, so the row id breaks ties and gives a
//! strict total order. A cursor names the last row of the previous page;
//! the next page holds rows strictly older than it in that order, so pages
//! never overlap.
//!
//! Tokens are `base64url_nopad("<RFC 3339 UTC, nanoseconds>|<id>")`. They
//! are opaque to clients and live for one request/response pair.

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Page size used when the caller passes no limit, or a non-positive one.
pub const DEFAULT_PAGE_LIMIT: i64 = 50;

/// Smallest page size accepted from clients.
pub const MIN_PAGE_LIMIT: i64 = 1;

/// Largest page size accepted from clients.
pub const MAX_PAGE_LIMIT: i64 = 200;

/// Separates the timestamp from the id inside a token. Ids never contain it.
const DELIMITER: char = '|';

/// Resume position inside a `(created_at DESC, id DESC)` ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    pub created_at: Timestamp,
    pub id: String,
}

impl Cursor {
    pub fn new(created_at: Timestamp, id: impl Into<String>) -> Self {
        Self {
            created_at,
            id: id.into(),
        }
    }
}

/// Encode a cursor into an opaque, URL-safe token.
pub fn encode(cursor: &Cursor) -> String {
    let raw = format!(
        "{}{DELIMITER}{}",
        cursor.created_at.to_rfc3339_opts(SecondsFormat::Nanos, true),
        cursor.id
    );
    URL_SAFE_NO_PAD.encode(raw.as_bytes())
}

/// Decode a token produced by [`encode`].
///
/// Every malformed input maps to [`CoreError::InvalidCursor`].
pub fn decode(token: &str) -> Result<Cursor, CoreError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(CoreError::InvalidCursor);
    }

    let bytes = URL_SAFE_NO_PAD
        .decode(token)
        .map_err(|_| CoreError::InvalidCursor)?;
    let raw = String::from_utf8(bytes).map_err(|_| CoreError::InvalidCursor)?;

    let (ts, id) = raw
        .split_once(DELIMITER)
        .ok_or(CoreError::InvalidCursor)?;

    let created_at = DateTime::parse_from_rfc3339(ts)
        .map_err(|_| CoreError::InvalidCursor)?
        .with_timezone(&Utc);

    let id = id.trim();
    if id.is_empty() {
        return Err(CoreError::InvalidCursor);
    }

    Ok(Cursor::new(created_at, id))
}

/// Clamp a client-supplied page size into `[MIN_PAGE_LIMIT, max]`, using
/// `default` when absent.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(MIN_PAGE_LIMIT).min(max)
}

/// One page of results plus the position to resume from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(skip)]
    pub next_cursor: Option<Cursor>,
}

impl<T> Page<T> {
    /// The encoded next-page token, if any.
    pub fn next_token(&self) -> Option<String> {
        self.next_cursor.as_ref().map(encode)
    }
}

/// Entities that can be positioned in the keyset ordering.
pub trait Keyed {
    fn cursor_key(&self) -> Cursor;
}

/// A collection that can be read in `(created_at DESC, id DESC)` order.
#[async_trait]
pub trait KeysetSource<T>: Send + Sync {
    /// Narrows the collection, e.g. to one tenant. `()` for global lists.
    type Scope: Send + Sync;

    /// Return at most `limit` rows ordered `(created_at DESC, id DESC)`,
    /// restricted to `(created_at, id) < after` when `after` is set.
    async fn fetch_after(
        &self,
        scope: &Self::Scope,
        after: Option<&Cursor>,
        limit: i64,
    ) -> Result<Vec<T>, CoreError>;
}

/// Fetch one page from `source`.
///
/// The limit is trusted as already clamped by the caller; only
/// non-positive values are replaced by [`DEFAULT_PAGE_LIMIT`]. A full page
/// always carries a next cursor, so a collection whose size is a multiple
/// of the limit ends with one empty page.
pub async fn list_page<T, S>(
    source: &S,
    scope: &S::Scope,
    limit: i64,
    cursor: Option<&Cursor>,
) -> Result<Page<T>, CoreError>
where
    T: Keyed + Send,
    S: KeysetSource<T> + ?Sized,
{
    let limit = if limit <= 0 { DEFAULT_PAGE_LIMIT } else { limit };

    let items = source.fetch_after(scope, cursor, limit).await?;

    let next_cursor = if items.len() as i64 == limit {
        items.last().map(Keyed::cursor_key)
    } else {
        None
    };

    Ok(Page { items, next_cursor })
}
