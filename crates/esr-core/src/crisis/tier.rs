//! Severity tiers

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Crisis-risk tier of a piece of text
///
/// Totally ordered: `None < Low < Medium < High < Critical`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum SeverityTier {
    #[default]
    None,
    /// Warning signs
    Low,
    /// Severe distress
    Medium,
    /// Active self-harm risk
    High,
    /// Suicidal ideation, immediate danger
    Critical,
}

impl SeverityTier {
    /// Tiers that carry keyword sets, from most to least severe
    pub const RANKED: [SeverityTier; 4] = [Self::Critical, Self::High, Self::Medium, Self::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    pub fn is_none(&self) -> bool {
        *self == Self::None
    }

    /// Whether this tier reaches `threshold`
    pub fn at_least(&self, threshold: SeverityTier) -> bool {
        *self >= threshold
    }
}

impl fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeverityTier {
    type Err = EngineError;

    fn from_str(s: &str) -> EngineResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            other => Err(EngineError::UnknownSeverityTier(other.to_string())),
        }
    }
}
