//! Repository for the `messages` table.

use chatdesk_core::message::NewMessage;
use chatdesk_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::message::Message;

/// Column list for messages queries.
const COLUMNS: &str = "id, session_id, role, content, tool_name, tool_data, created_at";

/// Provides append and listing operations for chat messages.
pub struct MessageRepo;

impl MessageRepo {
    /// Append a message to a session that is still open.
    ///
    /// The session row is share-locked by the insert, so a concurrent close
    /// either happens entirely before (no row inserted) or after the append.
    /// Returns `None` when the session is missing or closed.
    pub async fn append_to_open_session(
        pool: &PgPool,
        session_id: DbId,
        msg: &NewMessage,
    ) -> Result<Option<Message>, sqlx::Error> {
        let query = format!(
            "INSERT INTO messages (session_id, role, content, tool_name, tool_data)
             SELECT s.id, $2, $3, $4, $5
             FROM (SELECT id FROM sessions WHERE id = $1 AND closed_at IS NULL FOR SHARE) s
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(session_id)
            .bind(msg.role.as_str())
            .bind(&msg.content)
            .bind(&msg.tool_name)
            .bind(&msg.tool_data)
            .fetch_optional(pool)
            .await
    }

    /// List a session's messages newest first, strictly after the given
    /// keyset position.
    pub async fn list_after(
        pool: &PgPool,
        session_id: DbId,
        after: Option<(Timestamp, DbId)>,
        limit: i64,
    ) -> Result<Vec<Message>, sqlx::Error> {
        let (after_ts, after_id) = after.unzip();
        let query = format!(
            "SELECT {COLUMNS} FROM messages
             WHERE session_id = $1
               AND ($2::timestamptz IS NULL OR (created_at, id) < ($2, $3::uuid))
             ORDER BY created_at DESC, id DESC
             LIMIT $4"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(session_id)
            .bind(after_ts)
            .bind(after_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
