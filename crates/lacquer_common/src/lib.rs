// --- File: crates/lacquer_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod logging; // Logging utilities
pub mod services; // Service abstractions and domain models

// Re-export error types and utilities for easier access
pub use error::{config_error, validation_error, HttpStatusCode, LacquerError};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level};
