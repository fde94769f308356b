//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument and return `sqlx::Error`
//! unchanged. `JobRepo::enqueue` is the exception: it takes a connection so
//! it can join the caller's transaction. Keyset listings take `after` as the `(created_at, id)` of
//! the last row already seen.

pub mod job_repo;
pub mod lead_repo;
pub mod message_repo;
pub mod session_repo;
pub mod template_repo;
pub mod template_version_repo;
pub mod tenant_repo;

pub use job_repo::JobRepo;
pub use lead_repo::LeadRepo;
pub use message_repo::MessageRepo;
pub use session_repo::SessionRepo;
pub use template_repo::TemplateRepo;
pub use template_version_repo::TemplateVersionRepo;
pub use tenant_repo::TenantRepo;
