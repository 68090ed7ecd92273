//! Evidence rater
//!
//! Runs level aggregation, confidence scoring and controversy detection over
//! one source set.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::confidence::ConfidenceScorer;
use super::controversy::detect_controversy;
use super::level::LevelAggregator;
use super::types::{Controversy, EvidenceLevel, EvidenceSource};
use super::weights::EvidenceConfig;

/// Aggregate rating of a source set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceRating {
    pub evidence_level: EvidenceLevel,
    /// 0 - 100
    pub confidence_score: u8,
    #[serde(flatten)]
    pub controversy: Controversy,
}

/// Rater over a fixed evidence configuration
#[derive(Debug, Clone, Default)]
pub struct EvidenceRater {
    config: EvidenceConfig,
}

impl EvidenceRater {
    pub fn new(config: EvidenceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvidenceConfig {
        &self.config
    }

    pub fn level(&self, sources: &[EvidenceSource]) -> EvidenceLevel {
        LevelAggregator::new(&self.config.study_weights).aggregate(sources)
    }

    pub fn confidence_at(
        &self,
        sources: &[EvidenceSource],
        level: EvidenceLevel,
        today: NaiveDate,
    ) -> u8 {
        self.scorer().score_at(sources, level, today)
    }

    /// Rate a source set relative to `today`
    pub fn rate(&self, sources: &[EvidenceSource], today: NaiveDate) -> EvidenceRating {
        let evidence_level = self.level(sources);
        let confidence_score = self.confidence_at(sources, evidence_level, today);
        let controversy = detect_controversy(sources);

        tracing::debug!(
            sources = sources.len(),
            live = sources.iter().filter(|s| s.is_live()).count(),
            evidence_level = evidence_level.value(),
            confidence_score,
            controversial = controversy.is_controversial,
            "Rated evidence"
        );

        EvidenceRating {
            evidence_level,
            confidence_score,
            controversy,
        }
    }

    fn scorer(&self) -> ConfidenceScorer {
        ConfidenceScorer::new().with_recency_window_days(self.config.recency_window_days)
    }
}
