//! Confidence scoring for evidence-backed recommendations
//!
//! Multi-factor score on a 0-100 scale:
//! - Base score keyed by the aggregate evidence level
//! - Source count bonus (+2 per source, +10 max)
//! - Peer review bonus (+5 max, by fraction of reviewed sources)
//! - Recency bonus (+5 max, by fraction of sources inside the recency window)

use chrono::NaiveDate;

use super::types::{live_sources, EvidenceLevel, EvidenceSource};

/// Maximum bonus for the number of sources
const SOURCE_BONUS_CAP: f64 = 10.0;
const SOURCE_BONUS_PER_SOURCE: f64 = 2.0;
const PEER_REVIEW_BONUS: f64 = 5.0;
const RECENCY_BONUS: f64 = 5.0;

/// Confidence scorer with a configurable recency window
pub struct ConfidenceScorer {
    recency_window_days: i64,
}

impl Default for ConfidenceScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfidenceScorer {
    pub fn new() -> Self {
        Self {
            recency_window_days: 5 * 365,
        }
    }

    pub fn with_recency_window_days(mut self, days: i64) -> Self {
        self.recency_window_days = days;
        self
    }

    /// Base score for an evidence level
    pub fn base_score(level: EvidenceLevel) -> f64 {
        match level {
            EvidenceLevel::Strong => 90.0,
            EvidenceLevel::Moderate => 75.0,
            EvidenceLevel::Preliminary => 60.0,
            EvidenceLevel::Emerging => 40.0,
            EvidenceLevel::Anecdotal => 20.0,
        }
    }

    /// Score the non-retracted sources relative to `today`.
    /// No live sources scores zero whatever the level.
    pub fn score_at(&self, sources: &[EvidenceSource], level: EvidenceLevel, today: NaiveDate) -> u8 {
        let live = live_sources(sources);
        if live.is_empty() {
            return 0;
        }

        let total = Self::base_score(level)
            + self.source_bonus(&live)
            + self.peer_review_bonus(&live)
            + self.recency_bonus(&live, today);

        total.round().clamp(0.0, 100.0) as u8
    }

    /// Whether a publication date lies inside the recency window.
    /// Future dates count as recent.
    pub fn is_recent(&self, published: NaiveDate, today: NaiveDate) -> bool {
        (today - published).num_days() <= self.recency_window_days
    }

    fn source_bonus(&self, live: &[&EvidenceSource]) -> f64 {
        (live.len() as f64 * SOURCE_BONUS_PER_SOURCE).min(SOURCE_BONUS_CAP)
    }

    fn peer_review_bonus(&self, live: &[&EvidenceSource]) -> f64 {
        let reviewed = live.iter().filter(|s| s.peer_reviewed).count();
        reviewed as f64 / live.len() as f64 * PEER_REVIEW_BONUS
    }

    /// Undated sources do not count toward the bonus
    fn recency_bonus(&self, live: &[&EvidenceSource], today: NaiveDate) -> f64 {
        let recent = live
            .iter()
            .filter_map(|s| s.publication_date)
            .filter(|date| self.is_recent(*date, today))
            .count();
        recent as f64 / live.len() as f64 * RECENCY_BONUS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evidence::types::StudyType;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn source(level: EvidenceLevel) -> EvidenceSource {
        EvidenceSource::new("s", "title", StudyType::Rct, level)
    }

    #[test]
    fn no_sources_zero_confidence() {
        let scorer = ConfidenceScorer::new();
        assert_eq!(scorer.score_at(&[], EvidenceLevel::Strong, today()), 0);
    }

    #[test]
    fn only_retracted_sources_zero_confidence() {
        let scorer = ConfidenceScorer::new();
        let mut s = source(EvidenceLevel::Strong).peer_reviewed();
        s.retract();
        assert_eq!(scorer.score_at(&[s], EvidenceLevel::Strong, today()), 0);
    }

    #[test]
    fn single_reviewed_undated_strong_source() {
        // 90 base + 2 count + 5 peer review
        let scorer = ConfidenceScorer::new();
        let s = source(EvidenceLevel::Strong).peer_reviewed();
        assert_eq!(scorer.score_at(&[s], EvidenceLevel::Strong, today()), 97);
    }

    #[test]
    fn source_bonus_caps_at_ten() {
        let scorer = ConfidenceScorer::new();
        let sources: Vec<_> = (0..8).map(|_| source(EvidenceLevel::Emerging)).collect();
        // 40 base + 10 count
        assert_eq!(scorer.score_at(&sources, EvidenceLevel::Emerging, today()), 50);
    }

    #[test]
    fn partial_bonuses_round() {
        let scorer = ConfidenceScorer::new();
        let recent = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let sources = vec![
            source(EvidenceLevel::Moderate)
                .peer_reviewed()
                .with_publication_date(recent),
            source(EvidenceLevel::Moderate),
            source(EvidenceLevel::Moderate),
        ];
        // 75 + 6 + 5/3 + 5/3 = 84.33
        assert_eq!(scorer.score_at(&sources, EvidenceLevel::Moderate, today()), 84);
    }

    #[test]
    fn old_sources_earn_no_recency_bonus() {
        let scorer = ConfidenceScorer::new();
        let old = NaiveDate::from_ymd_opt(2010, 1, 1).unwrap();
        let s = source(EvidenceLevel::Preliminary).with_publication_date(old);
        assert_eq!(scorer.score_at(&[s], EvidenceLevel::Preliminary, today()), 62);
    }

    #[test]
    fn clamped_to_one_hundred() {
        let scorer = ConfidenceScorer::new();
        let recent = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let sources: Vec<_> = (0..5)
            .map(|_| {
                source(EvidenceLevel::Strong)
                    .peer_reviewed()
                    .with_publication_date(recent)
            })
            .collect();
        // 90 + 10 + 5 + 5 = 110
        assert_eq!(scorer.score_at(&sources, EvidenceLevel::Strong, today()), 100);
    }

    #[test]
    fn recency_window_edges() {
        let scorer = ConfidenceScorer::new().with_recency_window_days(10);
        let t = today();
        assert!(scorer.is_recent(t - chrono::Duration::days(10), t));
        assert!(!scorer.is_recent(t - chrono::Duration::days(11), t));
        assert!(scorer.is_recent(t + chrono::Duration::days(30), t));
    }
}
