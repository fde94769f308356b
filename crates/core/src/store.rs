//! Outcome types shared by the store traits.
//!
//! Uniqueness and conditional-update results are part of the contract, not
//! errors: callers branch on them to classify failures. Only genuine
//! infrastructure problems travel as `Err(CoreError::Storage(..))`.

/// Result of an insert guarded by a uniqueness constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertOutcome<T> {
    /// The row was written and is returned as stored.
    Inserted(T),
    /// A unique constraint rejected the row.
    Duplicate,
    /// The parent row the insert hangs off does not exist.
    ParentMissing,
}

/// Result of a conditional (`WHERE ... AND status = ...`) update.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome<T> {
    /// Exactly the targeted row changed; the new state is returned.
    Applied(T),
    /// The predicate matched no row.
    NoRowsMatched,
    /// The update would have broken a unique constraint and was rolled back.
    UniqueViolation,
}
