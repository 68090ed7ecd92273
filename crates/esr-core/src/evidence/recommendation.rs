//! Evidence-backed recommendations and their display form

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::rater::{EvidenceRater, EvidenceRating};
use super::types::{Controversy, EvidenceLevel, EvidenceSource};

/// A coaching claim plus the aggregate rating of its sources.
///
/// The rating fields are derived: they are only written by
/// [`EvidenceRecommendation::recompute`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceRecommendation {
    pub recommendation_text: String,
    pub category: String,
    pub overall_evidence_level: EvidenceLevel,
    pub confidence_score: u8,
    pub is_controversial: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controversy_reason: Option<String>,
    /// Ordered, without duplicates
    pub source_ids: Vec<String>,
}

impl EvidenceRecommendation {
    /// Create a recommendation rated against `sources`
    pub fn new(
        recommendation_text: impl Into<String>,
        category: impl Into<String>,
        sources: &[EvidenceSource],
        rater: &EvidenceRater,
        today: NaiveDate,
    ) -> Self {
        let mut recommendation = Self {
            recommendation_text: recommendation_text.into(),
            category: category.into(),
            overall_evidence_level: EvidenceLevel::Anecdotal,
            confidence_score: 0,
            is_controversial: false,
            controversy_reason: None,
            source_ids: Vec::new(),
        };
        recommendation.recompute(sources, rater, today);
        recommendation
    }

    /// Replace the source set and re-derive every aggregate field.
    /// Idempotent for the same sources and date.
    pub fn recompute(&mut self, sources: &[EvidenceSource], rater: &EvidenceRater, today: NaiveDate) {
        let rating = rater.rate(sources, today);
        self.apply(rating);

        self.source_ids.clear();
        for source in sources {
            if !self.source_ids.contains(&source.id) {
                self.source_ids.push(source.id.clone());
            }
        }
    }

    pub fn rating(&self) -> EvidenceRating {
        EvidenceRating {
            evidence_level: self.overall_evidence_level,
            confidence_score: self.confidence_score,
            controversy: Controversy {
                is_controversial: self.is_controversial,
                reason: self.controversy_reason.clone(),
            },
        }
    }

    fn apply(&mut self, rating: EvidenceRating) {
        self.overall_evidence_level = rating.evidence_level;
        self.confidence_score = rating.confidence_score;
        self.is_controversial = rating.controversy.is_controversial;
        self.controversy_reason = rating.controversy.reason;
    }
}

/// Source summary shown alongside a recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSummary {
    pub id: String,
    pub title: String,
    pub authors: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    pub url: String,
    pub study_type: String,
}

/// Recommendation evidence prepared for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedEvidence {
    pub level: EvidenceLevel,
    pub stars: String,
    pub label: String,
    pub description: String,
    pub confidence_score: u8,
    pub is_controversial: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controversy_reason: Option<String>,
    pub source_count: usize,
    pub sources: Vec<SourceSummary>,
}

impl FormattedEvidence {
    pub fn new(recommendation: &EvidenceRecommendation, sources: &[EvidenceSource]) -> Self {
        let level = recommendation.overall_evidence_level;
        Self {
            level,
            stars: level.stars().to_string(),
            label: level.label().to_string(),
            description: level.description().to_string(),
            confidence_score: recommendation.confidence_score,
            is_controversial: recommendation.is_controversial,
            controversy_reason: recommendation.controversy_reason.clone(),
            source_count: sources.len(),
            sources: sources
                .iter()
                .map(|s| SourceSummary {
                    id: s.id.clone(),
                    title: s.title.clone(),
                    authors: s.authors.clone(),
                    journal: s.journal.clone(),
                    year: s.publication_date.map(|d| d.year()),
                    url: s.url.clone(),
                    study_type: s.study_type.label().to_string(),
                })
                .collect(),
        }
    }
}
