//! Evidence level aggregation
//!
//! Reduces a set of sources to one ordinal level by a weighted mean of the
//! per-source levels. Weights combine:
//! - Study design quality (meta-analysis 1.0 down to expert opinion 0.1)
//! - Peer review (unreviewed sources count 0.7)
//! - Sample size (linear up to 1000 participants, 0.5 when unknown)

use super::types::{live_sources, EvidenceLevel, EvidenceSource};
use super::weights::StudyTypeWeights;

/// Quality factor for sources that were not peer reviewed
pub const UNREVIEWED_FACTOR: f64 = 0.7;

/// Sample size at which the sample factor saturates
pub const FULL_SAMPLE_SIZE: f64 = 1000.0;

/// Sample factor used when the sample size is unknown
pub const UNKNOWN_SAMPLE_FACTOR: f64 = 0.5;

/// Weighted-mean aggregator over a study-type weight table
pub struct LevelAggregator<'a> {
    weights: &'a StudyTypeWeights,
}

impl<'a> LevelAggregator<'a> {
    pub fn new(weights: &'a StudyTypeWeights) -> Self {
        Self { weights }
    }

    /// Aggregate level of the non-retracted sources.
    /// No live sources means anecdotal evidence.
    pub fn aggregate(&self, sources: &[EvidenceSource]) -> EvidenceLevel {
        let live = live_sources(sources);
        if live.is_empty() {
            return EvidenceLevel::Anecdotal;
        }

        // Floating-point sums depend on addition order, so terms are summed
        // in a canonical order regardless of how the sources were listed.
        let mut terms: Vec<(f64, f64)> = live
            .iter()
            .map(|s| (f64::from(s.evidence_level.value()), self.source_weight(s)))
            .collect();
        terms.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));

        let mut total_weight = 0.0_f64;
        let mut weighted_sum = 0.0_f64;
        for &(level, weight) in &terms {
            total_weight += weight;
            weighted_sum += level * weight;
        }

        let mean = if total_weight > 0.0 {
            weighted_sum / total_weight
        } else {
            // Only reachable with a custom table of zero weights
            let sum: f64 = live
                .iter()
                .map(|s| f64::from(s.evidence_level.value()))
                .sum();
            sum / live.len() as f64
        };

        EvidenceLevel::from_mean(snap(mean))
    }

    /// Combined weight of one source in the mean
    pub fn source_weight(&self, source: &EvidenceSource) -> f64 {
        let design = self.weights.weight(source.study_type);
        let quality = if source.peer_reviewed {
            1.0
        } else {
            UNREVIEWED_FACTOR
        };
        design * quality * sample_factor(source.sample_size)
    }
}

/// Round away representation noise so a mean that is exactly on a
/// threshold in real arithmetic compares as exactly on it.
fn snap(mean: f64) -> f64 {
    (mean * MEAN_PRECISION).round() / MEAN_PRECISION
}

const MEAN_PRECISION: f64 = 1e9;

/// A zero sample size is treated as unknown
fn sample_factor(sample_size: Option<u32>) -> f64 {
    match sample_size {
        Some(n) if n > 0 => (f64::from(n) / FULL_SAMPLE_SIZE).min(1.0),
        _ => UNKNOWN_SAMPLE_FACTOR,
    }
}
