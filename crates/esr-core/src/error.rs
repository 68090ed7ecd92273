//! Engine error types

use thiserror::Error;

/// Errors raised at the typed boundary of the engine.
///
/// The classification functions themselves are total; these errors only
/// come from turning loosely typed input (strings, integers, config files)
/// into engine types.
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    /// Study type label is not one of the known designs
    #[error("unknown study type: {0}")]
    UnknownStudyType(String),

    /// Evidence level outside 1..=5
    #[error("invalid evidence level {0}: must be between 1 and 5")]
    InvalidEvidenceLevel(i64),

    /// Severity tier name not recognized
    #[error("unknown severity tier: {0}")]
    UnknownSeverityTier(String),

    /// Study type weight outside 0.0..=1.0
    #[error("invalid weight {weight} for study type '{study_type}': must be within 0.0..=1.0")]
    InvalidWeight { study_type: String, weight: f64 },

    /// Recency window shorter than zero days
    #[error("invalid recency window {0}: must not be negative")]
    InvalidRecencyWindow(i64),

    /// Keyword table contains an empty phrase
    #[error("empty phrase in {0} keyword table")]
    EmptyPhrase(String),

    /// Compliance rule pattern failed to compile
    #[error("invalid pattern for compliance rule '{rule}': {message}")]
    InvalidPattern { rule: String, message: String },
}

/// Result type for engine boundary conversions
pub type EngineResult<T> = Result<T, EngineError>;
