//! Study-type weights and evidence configuration

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::types::StudyType;
use crate::error::{EngineError, EngineResult};

/// Weight applied to a study type missing from a custom table
pub const FALLBACK_STUDY_WEIGHT: f64 = 0.1;

/// Quality weight per study design (0.0 - 1.0)
///
/// Serialized as a map keyed by study type label. A table deserialized from
/// configuration may be partial; missing designs weigh
/// [`FALLBACK_STUDY_WEIGHT`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudyTypeWeights(BTreeMap<StudyType, f64>);

impl Default for StudyTypeWeights {
    fn default() -> Self {
        Self(BTreeMap::from([
            (StudyType::MetaAnalysis, 1.0),
            (StudyType::SystematicReview, 0.9),
            (StudyType::Rct, 0.8),
            (StudyType::CohortStudy, 0.6),
            (StudyType::CaseControlStudy, 0.5),
            (StudyType::CrossSectionalStudy, 0.4),
            (StudyType::CaseSeries, 0.3),
            (StudyType::CaseStudy, 0.2),
            (StudyType::ExpertOpinion, 0.1),
        ]))
    }
}

impl StudyTypeWeights {
    /// Table with no entries; every design weighs the fallback
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    pub fn weight(&self, study_type: StudyType) -> f64 {
        self.0
            .get(&study_type)
            .copied()
            .unwrap_or(FALLBACK_STUDY_WEIGHT)
    }

    /// Override one entry, rejecting weights outside 0.0..=1.0
    pub fn with_weight(mut self, study_type: StudyType, weight: f64) -> EngineResult<Self> {
        check_weight(study_type, weight)?;
        self.0.insert(study_type, weight);
        Ok(self)
    }

    pub fn validate(&self) -> EngineResult<()> {
        for (study_type, weight) in &self.0 {
            check_weight(*study_type, *weight)?;
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (StudyType, f64)> + '_ {
        self.0.iter().map(|(t, w)| (*t, *w))
    }
}

fn check_weight(study_type: StudyType, weight: f64) -> EngineResult<()> {
    if !(0.0..=1.0).contains(&weight) {
        return Err(EngineError::InvalidWeight {
            study_type: study_type.to_string(),
            weight,
        });
    }
    Ok(())
}

/// Tunables for evidence rating. All fields fall back to defaults when
/// omitted from configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvidenceConfig {
    /// Quality weight per study design
    pub study_weights: StudyTypeWeights,
    /// Sources published within this many days count as recent (default: 5 * 365)
    pub recency_window_days: i64,
}

impl Default for EvidenceConfig {
    fn default() -> Self {
        Self {
            study_weights: StudyTypeWeights::default(),
            recency_window_days: 5 * 365,
        }
    }
}

impl EvidenceConfig {
    pub fn validate(&self) -> EngineResult<()> {
        if self.recency_window_days < 0 {
            return Err(EngineError::InvalidRecencyWindow(self.recency_window_days));
        }
        self.study_weights.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_spans_meta_analysis_to_expert_opinion() {
        let w = StudyTypeWeights::default();
        assert_eq!(w.weight(StudyType::MetaAnalysis), 1.0);
        assert_eq!(w.weight(StudyType::Rct), 0.8);
        assert_eq!(w.weight(StudyType::ExpertOpinion), 0.1);
        assert_eq!(w.iter().count(), StudyType::ALL.len());
    }

    #[test]
    fn weights_decrease_with_design_strength() {
        let w = StudyTypeWeights::default();
        for pair in StudyType::ALL.windows(2) {
            assert!(w.weight(pair[0]) > w.weight(pair[1]), "{:?}", pair);
        }
    }

    #[test]
    fn missing_entry_uses_fallback() {
        let w = StudyTypeWeights::empty()
            .with_weight(StudyType::Rct, 0.9)
            .unwrap();
        assert_eq!(w.weight(StudyType::Rct), 0.9);
        assert_eq!(w.weight(StudyType::CohortStudy), FALLBACK_STUDY_WEIGHT);
    }

    #[test]
    fn negative_recency_window_rejected() {
        let config = EvidenceConfig {
            recency_window_days: -1,
            ..EvidenceConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(EngineError::InvalidRecencyWindow(-1))
        ));
        let zero = EvidenceConfig {
            recency_window_days: 0,
            ..EvidenceConfig::default()
        };
        assert!(zero.validate().is_ok());
    }

    #[test]
    fn out_of_range_weight_rejected() {
        assert!(StudyTypeWeights::default()
            .with_weight(StudyType::Rct, 1.5)
            .is_err());
        assert!(StudyTypeWeights::default()
            .with_weight(StudyType::Rct, -0.1)
            .is_err());
    }

    #[test]
    fn partial_table_from_json() {
        let w: StudyTypeWeights = serde_json::from_str(r#"{"RCT": 0.7}"#).unwrap();
        assert_eq!(w.weight(StudyType::Rct), 0.7);
        assert_eq!(w.weight(StudyType::MetaAnalysis), FALLBACK_STUDY_WEIGHT);
    }

    #[test]
    fn config_defaults_when_fields_omitted() {
        let c: EvidenceConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(c, EvidenceConfig::default());
        assert_eq!(c.recency_window_days, 1825);
    }
}
