// --- File: crates/lacquer_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type for cross-crate failures.
///
/// This enum provides a common set of error variants that can be used across
/// all crates. Each crate can extend this by implementing
/// From<SpecificError> for LacquerError.
#[derive(Error, Debug)]
pub enum LacquerError {
    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during a storage operation
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Error occurred due to a conflict (e.g., a slot already booked)
    #[error("Conflict: {0}")]
    ConflictError(String),

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
///
/// This trait can be implemented by error types to provide a consistent way
/// to convert errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for LacquerError {
    fn status_code(&self) -> u16 {
        match self {
            LacquerError::ParseError(_) => 400,
            LacquerError::ConfigError(_) => 500,
            LacquerError::ValidationError(_) => 400,
            LacquerError::StorageError(_) => 500,
            LacquerError::ConflictError(_) => 409,
            LacquerError::NotFoundError(_) => 404,
            LacquerError::InternalError(_) => 500,
        }
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> LacquerError {
    LacquerError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> LacquerError {
    LacquerError::ValidationError(message.to_string())
}
