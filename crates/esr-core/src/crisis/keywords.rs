//! Keyword tables for severity classification

use serde::{Deserialize, Serialize};

use super::tier::SeverityTier;
use crate::error::{EngineError, EngineResult};

/// Phrase sets, one per non-`none` tier.
///
/// Phrases are matched as lowercase substrings of the whole input, so a
/// phrase also matches inside longer words ("cutting" in "cuttings").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordTables {
    pub critical: Vec<String>,
    pub high: Vec<String>,
    pub medium: Vec<String>,
    pub low: Vec<String>,
}

fn phrases(list: &[&str]) -> Vec<String> {
    list.iter().map(|p| p.to_string()).collect()
}

impl Default for KeywordTables {
    fn default() -> Self {
        Self {
            critical: phrases(&[
                "suicide",
                "suicidal",
                "kill myself",
                "end my life",
                "want to die",
                "wish i was dead",
                "better off dead",
                "no reason to live",
                "don't want to live",
                "end it all",
                "goodbye forever",
                "won't be here tomorrow",
            ]),
            high: phrases(&[
                "hurt myself",
                "harm myself",
                "self-harm",
                "self harm",
                "cutting",
                "overdose",
                "can't go on",
                "giving up",
                "give up on life",
                "hopeless",
                "worthless",
                "no way out",
                "killing",
            ]),
            medium: phrases(&[
                "depressed",
                "depression",
                "anxiety attack",
                "panic attack",
                "overwhelming",
                "overwhelmed",
                "can't cope",
                "breaking down",
                "falling apart",
                "can't take it anymore",
                "nothing matters anymore",
            ]),
            low: phrases(&[
                "stressed",
                "worried",
                "anxious",
                "sad",
                "upset",
                "frustrated",
                "lonely",
                "nobody cares",
                "what's the point",
                "trapped",
            ]),
        }
    }
}

impl KeywordTables {
    /// Tables with no phrases; everything classifies as `none`
    pub fn empty() -> Self {
        Self {
            critical: Vec::new(),
            high: Vec::new(),
            medium: Vec::new(),
            low: Vec::new(),
        }
    }

    pub fn phrases(&self, tier: SeverityTier) -> &[String] {
        match tier {
            SeverityTier::Critical => &self.critical,
            SeverityTier::High => &self.high,
            SeverityTier::Medium => &self.medium,
            SeverityTier::Low => &self.low,
            SeverityTier::None => &[],
        }
    }

    fn phrases_mut(&mut self, tier: SeverityTier) -> Option<&mut Vec<String>> {
        match tier {
            SeverityTier::Critical => Some(&mut self.critical),
            SeverityTier::High => Some(&mut self.high),
            SeverityTier::Medium => Some(&mut self.medium),
            SeverityTier::Low => Some(&mut self.low),
            SeverityTier::None => None,
        }
    }

    /// Add a phrase to a tier. Adding to `none` is a no-op.
    pub fn with_phrase(mut self, tier: SeverityTier, phrase: impl Into<String>) -> Self {
        if let Some(list) = self.phrases_mut(tier) {
            list.push(phrase.into());
        }
        self
    }

    /// Lowercase every phrase and normalize typographic apostrophes
    pub fn normalized(&self) -> Self {
        let norm = |list: &[String]| list.iter().map(|p| normalize_text(p)).collect();
        Self {
            critical: norm(&self.critical),
            high: norm(&self.high),
            medium: norm(&self.medium),
            low: norm(&self.low),
        }
    }

    pub fn validate(&self) -> EngineResult<()> {
        for tier in SeverityTier::RANKED {
            if self.phrases(tier).iter().any(|p| p.trim().is_empty()) {
                return Err(EngineError::EmptyPhrase(tier.to_string()));
            }
        }
        Ok(())
    }
}

/// Lowercase text and map curly apostrophes to ASCII ones
pub fn normalize_text(text: &str) -> String {
    text.to_lowercase().replace(['\u{2019}', '\u{2018}'], "'")
}
