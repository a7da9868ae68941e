//! Domain error types
//!
//! This module defines the error taxonomy for carelog. All errors are
//! domain-specific and don't expose third-party types; the embedding
//! request layer is responsible for mapping them to user-facing codes.

use thiserror::Error;

/// Main carelog error type
///
/// `NotFound`, `AlreadyExists` and `InvalidArgument` are the semantic
/// failures an operation can surface; `Storage` and `Configuration` cover
/// infrastructure faults. Failures are scoped to the single requested
/// operation and are never retried by this crate.
#[derive(Debug, Error)]
pub enum CarelogError {
    /// A referenced entity does not exist for the given id, or a
    /// relationship required by the operation is absent
    #[error("Not found: {0}")]
    NotFound(String),

    /// A uniqueness invariant would be violated by the write
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// A caller-supplied value violates a semantic constraint not tied
    /// to entity existence
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Persistence store failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration loading or validation failure
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<std::io::Error> for CarelogError {
    fn from(err: std::io::Error) -> Self {
        CarelogError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for CarelogError {
    fn from(err: serde_json::Error) -> Self {
        CarelogError::Storage(err.to_string())
    }
}

impl From<toml::de::Error> for CarelogError {
    fn from(err: toml::de::Error) -> Self {
        CarelogError::Configuration(format!("TOML parse error: {err}"))
    }
}
