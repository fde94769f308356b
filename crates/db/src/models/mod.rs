//! Row structs and DTOs.
//!
//! Each submodule contains a `FromRow` struct matching the table and, where
//! the API inserts rows, a create DTO. Rows whose domain shape is owned by
//! `chatdesk-core` convert into the core type instead of being serialized
//! directly.

pub mod job;
pub mod lead;
pub mod message;
pub mod session;
pub mod template;
pub mod template_version;
pub mod tenant;
