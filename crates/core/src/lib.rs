//! Domain logic for the chatdesk backend.
//!
//! Nothing in this crate talks to a database directly. Persistence is
//! reached through the async store traits declared next to the logic that
//! needs them, so the same code runs against Postgres (`chatdesk-db`) and
//! against in-memory fakes in tests.

pub mod clock;
pub mod error;
pub mod message;
pub mod pagination;
pub mod session_close;
pub mod slug;
pub mod store;
pub mod types;
pub mod versioning;
