//! Error types for registry operations.

use thiserror::Error;

/// Result type alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors that can occur during registry operations.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// A module reference (id or name) resolved to no record. Raised by
    /// get/render/plan; `delete_module` reports absence via `Ok(false)`
    /// instead.
    #[error("Module not found: '{0}'")]
    NotFound(String),

    /// The storage-level unique index on module names rejected an insert.
    #[error("Module name already registered: '{0}'")]
    DuplicateName(String),

    #[error("Stored record is invalid: {0}")]
    InvalidRecord(String),

    #[error(transparent)]
    Core(#[from] terramod_core::CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
