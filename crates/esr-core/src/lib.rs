//! ESR Core Engine
//!
//! Pure, synchronous classification kernel for a wellness-coaching platform:
//!
//! - [`evidence`] rates the scientific support behind a recommendation
//!   (evidence level, confidence score, controversy) and vets new sources
//! - [`crisis`] sorts free text into crisis severity tiers and decides on
//!   escalation
//! - [`compliance`] flags language a coach should not use
//! - [`json`] wraps the above as JSON string functions
//!
//! Nothing here performs I/O or reads the environment. All lookup tables
//! are injectable; the free functions below use the built-in ones.
//!
//! # Example
//!
//! ```rust
//! use esr_core::{classify_severity, validate_source, SeverityTier, SourceCandidate};
//!
//! assert_eq!(classify_severity("I'm having a panic attack"), SeverityTier::Medium);
//!
//! let check = validate_source(&SourceCandidate::default());
//! assert!(!check.is_valid);
//! ```

pub mod compliance;
pub mod crisis;
pub mod error;
pub mod evidence;
pub mod json;

pub use compliance::{ComplianceChecker, ComplianceContext, ComplianceReport, ViolationSeverity};
pub use crisis::{
    classify_severity, CrisisAssessment, EscalationDecision, EscalationPolicy, SeverityClassifier,
    SeverityTier,
};
pub use error::{EngineError, EngineResult};
pub use evidence::{
    compute_confidence_score, compute_confidence_score_at, compute_evidence_level,
    detect_controversy, validate_source, Controversy, EvidenceConfig, EvidenceLevel, EvidenceRater,
    EvidenceRating, EvidenceRecommendation, EvidenceSource, SourceCandidate, SourceValidation,
    StudyType,
};
pub use json::{classify_text, rate_evidence, validate_candidate};
