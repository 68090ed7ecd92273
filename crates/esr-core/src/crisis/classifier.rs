//! Keyword severity classifier
//!
//! Tiers are checked from critical down and the first tier with any phrase
//! in the text wins. Matching is plain substring containment over the
//! lowercased input with no negation or context handling, so figurative
//! speech over-detects ("this project is suicide" is critical). Callers
//! that need fewer false positives can enable the protective-factor pass.

use serde::{Deserialize, Serialize};

use super::keywords::{normalize_text, KeywordTables};
use super::protective::ProtectiveFactors;
use super::tier::SeverityTier;

/// Full result of classifying one message
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CrisisAssessment {
    pub tier: SeverityTier,
    /// Phrases of the winning tier found in the text
    pub indicators: Vec<String>,
    /// Protective factors found (empty unless the refinement pass is enabled)
    pub protective_factors: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SeverityClassifier {
    keywords: KeywordTables,
    protective: Option<ProtectiveFactors>,
}

impl Default for SeverityClassifier {
    fn default() -> Self {
        Self::new(KeywordTables::default())
    }
}

impl SeverityClassifier {
    pub fn new(keywords: KeywordTables) -> Self {
        Self {
            keywords: keywords.normalized(),
            protective: None,
        }
    }

    /// Enable the protective-factor pass
    pub fn with_protective_factors(mut self, factors: ProtectiveFactors) -> Self {
        self.protective = Some(factors.normalized());
        self
    }

    pub fn keywords(&self) -> &KeywordTables {
        &self.keywords
    }

    pub fn classify(&self, text: &str) -> SeverityTier {
        self.assess(text).tier
    }

    pub fn assess(&self, text: &str) -> CrisisAssessment {
        let normalized = normalize_text(text);
        if normalized.trim().is_empty() {
            return CrisisAssessment::default();
        }

        let mut assessment = CrisisAssessment::default();
        for tier in SeverityTier::RANKED {
            let hits: Vec<String> = self
                .keywords
                .phrases(tier)
                .iter()
                .filter(|p| !p.is_empty() && normalized.contains(p.as_str()))
                .cloned()
                .collect();
            if !hits.is_empty() {
                assessment.tier = tier;
                assessment.indicators = hits;
                break;
            }
        }

        if let Some(protective) = &self.protective {
            if !assessment.tier.is_none() {
                let found: Vec<String> = protective
                    .present(&normalized)
                    .into_iter()
                    .map(str::to_string)
                    .collect();
                let adjusted = protective.adjust(assessment.tier, !found.is_empty());
                if adjusted != assessment.tier {
                    tracing::debug!(from = %assessment.tier, to = %adjusted, "Protective factors lowered tier");
                }
                assessment.tier = adjusted;
                assessment.protective_factors = found;
            }
        }

        tracing::debug!(
            tier = %assessment.tier,
            indicators = assessment.indicators.len(),
            "Classified message"
        );
        assessment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> SeverityTier {
        SeverityClassifier::default().classify(text)
    }

    #[test]
    fn critical_messages() {
        for msg in [
            "I want to kill myself",
            "I'm thinking about suicide",
            "I want to end my life",
            "I'd be better off dead",
            "There's no reason to live anymore",
        ] {
            assert_eq!(classify(msg), SeverityTier::Critical, "{msg}");
        }
    }

    #[test]
    fn high_messages() {
        for msg in [
            "I want to hurt myself",
            "I've been cutting myself",
            "I can't go on like this",
            "I'm giving up on everything",
            "I feel completely hopeless",
            "I'm worthless and useless",
        ] {
            assert_eq!(classify(msg), SeverityTier::High, "{msg}");
        }
    }

    #[test]
    fn medium_messages() {
        for msg in [
            "I'm so depressed",
            "I'm having an anxiety attack",
            "I think this is a panic attack",
            "Everything is overwhelming",
            "I can't cope with this",
            "I'm breaking down",
        ] {
            assert_eq!(classify(msg), SeverityTier::Medium, "{msg}");
        }
    }

    #[test]
    fn low_messages() {
        for msg in [
            "I'm stressed about work",
            "I'm worried about my exam",
            "Feeling anxious today",
            "I'm a bit sad",
            "I'm upset with my friend",
            "So frustrated right now",
        ] {
            assert_eq!(classify(msg), SeverityTier::Low, "{msg}");
        }
    }

    #[test]
    fn benign_messages() {
        for msg in [
            "I had a good day today",
            "Can you help me with my goals?",
            "I want to be more productive",
            "How can I improve my habits?",
            "",
            "   ",
            "hi",
            "ok",
        ] {
            assert_eq!(classify(msg), SeverityTier::None, "{msg:?}");
        }
    }

    #[test]
    fn case_and_apostrophes_do_not_matter() {
        assert_eq!(classify("I WANT TO KILL MYSELF"), SeverityTier::Critical);
        assert_eq!(classify("I can\u{2019}t cope"), SeverityTier::Medium);
    }

    #[test]
    fn highest_tier_wins() {
        let assessment =
            SeverityClassifier::default().assess("I'm so stressed and depressed and thinking about suicide");
        assert_eq!(assessment.tier, SeverityTier::Critical);
        assert_eq!(assessment.indicators, vec!["suicide"]);
    }

    #[test]
    fn figurative_speech_over_detects() {
        assert_eq!(classify("I'm killing it at work today!"), SeverityTier::High);
        assert_eq!(classify("This project is suicide"), SeverityTier::Critical);
    }

    #[test]
    fn protective_factors_soften_high_and_medium() {
        let classifier = SeverityClassifier::default().with_protective_factors(ProtectiveFactors::default());

        let assessment = classifier.assess("I feel hopeless but talking helps");
        assert_eq!(assessment.tier, SeverityTier::Medium);
        assert_eq!(assessment.protective_factors, vec!["talking helps", "hope"]);

        assert_eq!(classifier.classify("I'm depressed but I have my family"), SeverityTier::Low);
        assert_eq!(classifier.classify("I want to die but I have hope"), SeverityTier::Critical);
        assert_eq!(classifier.classify("Can you help me with my goals?"), SeverityTier::None);
    }

    #[test]
    fn custom_tables() {
        let tables = KeywordTables::empty().with_phrase(SeverityTier::Medium, "Burned Out");
        let classifier = SeverityClassifier::new(tables);
        assert_eq!(classifier.classify("totally burned out"), SeverityTier::Medium);
        assert_eq!(classifier.classify("I want to kill myself"), SeverityTier::None);
    }
}
