//! Common error types for ESR components.

use esr_core::EngineError;
use thiserror::Error;

/// Common error type for ESR operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Engine rejected a table or input
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias using ESR Error.
pub type Result<T> = std::result::Result<T, Error>;
