//! Evidence statistics across recommendations

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::recommendation::EvidenceRecommendation;
use super::types::EvidenceLevel;

/// Summary of a recommendation catalogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceStats {
    pub total: usize,
    /// Count per evidence level; every level is present
    pub by_level: BTreeMap<EvidenceLevel, usize>,
    pub with_controversy: usize,
    /// Mean confidence score, 0.0 for an empty catalogue
    pub average_confidence: f64,
}

impl EvidenceStats {
    pub fn from_recommendations(recommendations: &[EvidenceRecommendation]) -> Self {
        let mut by_level: BTreeMap<EvidenceLevel, usize> =
            EvidenceLevel::ALL.iter().map(|l| (*l, 0)).collect();
        let mut with_controversy = 0;
        let mut confidence_sum = 0.0;

        for rec in recommendations {
            *by_level.entry(rec.overall_evidence_level).or_default() += 1;
            if rec.is_controversial {
                with_controversy += 1;
            }
            confidence_sum += f64::from(rec.confidence_score);
        }

        let total = recommendations.len();
        let average_confidence = if total == 0 {
            0.0
        } else {
            confidence_sum / total as f64
        };

        Self {
            total,
            by_level,
            with_controversy,
            average_confidence,
        }
    }
}
