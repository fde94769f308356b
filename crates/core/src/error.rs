/// Boxed source error from the persistence layer.
pub type StorageSource = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid cursor")]
    InvalidCursor,

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Store failure. Carried through untouched so the caller can
    /// decide about retries.
    #[error("Storage error: {0}")]
    Storage(#[source] StorageSource),
}

impl CoreError {
    /// Shorthand for [`CoreError::NotFound`] with any displayable id.
    pub fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Wrap an infrastructure error without classifying it further.
    pub fn storage<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Storage(Box::new(err))
    }
}
