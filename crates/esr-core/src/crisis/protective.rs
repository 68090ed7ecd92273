//! Protective-factor refinement
//!
//! Opt-in second pass over a keyword classification. When the text also
//! mentions a protective factor (support, therapy, reasons to live), a high
//! tier is lowered to medium and a medium tier to low. Critical and low are
//! never changed, so the pass can only soften mid-range matches.

use serde::{Deserialize, Serialize};

use super::keywords::normalize_text;
use super::tier::SeverityTier;

/// Phrases that indicate protective factors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProtectiveFactors(Vec<String>);

impl Default for ProtectiveFactors {
    fn default() -> Self {
        Self(
            [
                "but i won't",
                "but i have",
                "talking helps",
                "getting help",
                "therapy",
                "support",
                "family",
                "friends",
                "reasons to live",
                "hope",
                "future",
                "goals",
            ]
            .iter()
            .map(|p| p.to_string())
            .collect(),
        )
    }
}

impl ProtectiveFactors {
    pub fn new(phrases: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self(phrases.into_iter().map(|p| normalize_text(&p.into())).collect())
    }

    pub fn normalized(&self) -> Self {
        Self(self.0.iter().map(|p| normalize_text(p)).collect())
    }

    /// Factors present in already-normalized text
    pub fn present<'a>(&'a self, normalized: &str) -> Vec<&'a str> {
        self.0
            .iter()
            .filter(|p| !p.is_empty() && normalized.contains(p.as_str()))
            .map(String::as_str)
            .collect()
    }

    /// Lower a tier by one step when any factor is present
    pub fn adjust(&self, tier: SeverityTier, factors_present: bool) -> SeverityTier {
        if !factors_present {
            return tier;
        }
        match tier {
            SeverityTier::High => SeverityTier::Medium,
            SeverityTier::Medium => SeverityTier::Low,
            other => other,
        }
    }
}
