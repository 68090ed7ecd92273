//! Evidence Strength Rating
//!
//! Rates the scientific support behind a coaching recommendation:
//!
//! - **Evidence level**: weighted mean of per-source ratings, 1 (strong) to 5 (anecdotal)
//! - **Confidence score**: 0-100 from the level plus count, peer review and recency
//! - **Controversy**: sources whose own ratings are 3 or more levels apart
//! - **Admission**: completeness checks for new sources
//!
//! Retracted sources never contribute to any aggregate.
//!
//! # Example
//!
//! ```rust
//! use esr_core::evidence::{compute_evidence_level, EvidenceLevel, EvidenceSource, StudyType};
//!
//! let source = EvidenceSource::new("s1", "Sleep hygiene", StudyType::MetaAnalysis, EvidenceLevel::Strong)
//!     .peer_reviewed()
//!     .with_sample_size(5000);
//! assert_eq!(compute_evidence_level(&[source]), EvidenceLevel::Strong);
//! ```

pub mod confidence;
pub mod controversy;
pub mod level;
pub mod rater;
pub mod recommendation;
pub mod stats;
mod types;
pub mod validate;
mod weights;

use chrono::{NaiveDate, Utc};

pub use confidence::ConfidenceScorer;
pub use controversy::{detect_controversy, CONTROVERSY_REASON};
pub use level::LevelAggregator;
pub use rater::{EvidenceRater, EvidenceRating};
pub use recommendation::{EvidenceRecommendation, FormattedEvidence, SourceSummary};
pub use stats::EvidenceStats;
pub use types::{live_sources, Controversy, EvidenceLevel, EvidenceSource, StudyType};
pub use validate::{validate_source, SourceCandidate, SourceValidation};
pub use weights::{EvidenceConfig, StudyTypeWeights, FALLBACK_STUDY_WEIGHT};

/// Aggregate evidence level with the built-in study weights
pub fn compute_evidence_level(sources: &[EvidenceSource]) -> EvidenceLevel {
    LevelAggregator::new(&StudyTypeWeights::default()).aggregate(sources)
}

/// Confidence score relative to the current UTC date
pub fn compute_confidence_score(sources: &[EvidenceSource], level: EvidenceLevel) -> u8 {
    compute_confidence_score_at(sources, level, Utc::now().date_naive())
}

/// Confidence score relative to an explicit date
pub fn compute_confidence_score_at(
    sources: &[EvidenceSource],
    level: EvidenceLevel,
    today: NaiveDate,
) -> u8 {
    ConfidenceScorer::new().score_at(sources, level, today)
}
