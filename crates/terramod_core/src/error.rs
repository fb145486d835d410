//! Error types for the core module model and rendering pipeline.

use thiserror::Error;

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur while building, rendering, or bumping modules.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Rendering was requested without all required inputs. Lists every
    /// missing name so a caller can fix all of them in one round trip.
    #[error("Missing required variables: {}", .names.join(", "))]
    MissingVariables { names: Vec<String> },

    #[error("Invalid HCL template: {}", .errors.join("; "))]
    InvalidTemplate { errors: Vec<String> },

    #[error("Unknown provider '{0}' (valid: aws, gcp, azure, kubernetes, helm, null)")]
    InvalidProvider(String),

    #[error("Invalid version string '{0}', expected major.minor.patch")]
    InvalidVersion(String),

    #[error("Unknown version part '{0}', expected major, minor, or patch")]
    InvalidVersionPart(String),

    #[error("Duplicate variable name '{0}'")]
    DuplicateVariable(String),
}
