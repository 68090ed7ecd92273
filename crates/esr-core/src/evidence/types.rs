//! Evidence types

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Study design of a cited source
///
/// Ordered from the strongest design to the weakest. The wire form is the
/// human label (`"Meta-Analysis"`, `"RCT"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StudyType {
    #[serde(rename = "Meta-Analysis")]
    MetaAnalysis,
    #[serde(rename = "Systematic Review")]
    SystematicReview,
    #[serde(rename = "RCT")]
    Rct,
    #[serde(rename = "Cohort Study")]
    CohortStudy,
    #[serde(rename = "Case-Control Study")]
    CaseControlStudy,
    #[serde(rename = "Cross-Sectional Study")]
    CrossSectionalStudy,
    #[serde(rename = "Case Series")]
    CaseSeries,
    #[serde(rename = "Case Study")]
    CaseStudy,
    #[serde(rename = "Expert Opinion")]
    ExpertOpinion,
}

impl StudyType {
    pub const ALL: [StudyType; 9] = [
        Self::MetaAnalysis,
        Self::SystematicReview,
        Self::Rct,
        Self::CohortStudy,
        Self::CaseControlStudy,
        Self::CrossSectionalStudy,
        Self::CaseSeries,
        Self::CaseStudy,
        Self::ExpertOpinion,
    ];

    /// Human label, identical to the serialized form
    pub fn label(&self) -> &'static str {
        match self {
            Self::MetaAnalysis => "Meta-Analysis",
            Self::SystematicReview => "Systematic Review",
            Self::Rct => "RCT",
            Self::CohortStudy => "Cohort Study",
            Self::CaseControlStudy => "Case-Control Study",
            Self::CrossSectionalStudy => "Cross-Sectional Study",
            Self::CaseSeries => "Case Series",
            Self::CaseStudy => "Case Study",
            Self::ExpertOpinion => "Expert Opinion",
        }
    }
}

impl fmt::Display for StudyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StudyType {
    type Err = EngineError;

    /// Parse a study type label, ignoring case and surrounding whitespace
    fn from_str(s: &str) -> EngineResult<Self> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| EngineError::UnknownStudyType(wanted.to_string()))
    }
}

/// Evidence Strength Rating
///
/// Ordinal scale where 1 is the strongest support and 5 the weakest.
/// Serialized as the bare integer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(try_from = "i64", into = "u8")]
#[repr(u8)]
pub enum EvidenceLevel {
    /// Multiple high-quality RCTs or meta-analyses
    Strong = 1,
    /// Some RCTs, systematic reviews
    Moderate = 2,
    /// Observational studies, small RCTs
    Preliminary = 3,
    /// Case studies, pilot studies
    Emerging = 4,
    /// Expert opinion, anecdotal reports
    #[default]
    Anecdotal = 5,
}

impl EvidenceLevel {
    pub const ALL: [EvidenceLevel; 5] = [
        Self::Strong,
        Self::Moderate,
        Self::Preliminary,
        Self::Emerging,
        Self::Anecdotal,
    ];

    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// Map a continuous mean level back onto the ordinal scale
    pub fn from_mean(mean: f64) -> Self {
        if mean <= 1.5 {
            Self::Strong
        } else if mean <= 2.5 {
            Self::Moderate
        } else if mean <= 3.5 {
            Self::Preliminary
        } else if mean <= 4.5 {
            Self::Emerging
        } else {
            Self::Anecdotal
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Strong => "Strong Evidence",
            Self::Moderate => "Moderate Evidence",
            Self::Preliminary => "Preliminary Evidence",
            Self::Emerging => "Emerging Evidence",
            Self::Anecdotal => "Anecdotal Evidence",
        }
    }

    /// Five stars for strong evidence down to one for anecdotal
    pub fn stars(&self) -> &'static str {
        match self {
            Self::Strong => "⭐⭐⭐⭐⭐",
            Self::Moderate => "⭐⭐⭐⭐",
            Self::Preliminary => "⭐⭐⭐",
            Self::Emerging => "⭐⭐",
            Self::Anecdotal => "⭐",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Strong => "Multiple high-quality randomized controlled trials (RCTs) or meta-analyses with consistent findings. Very high confidence in the recommendation.",
            Self::Moderate => "Some RCTs or systematic reviews with generally consistent findings. Moderate confidence in the recommendation.",
            Self::Preliminary => "Observational studies or small RCTs with promising but not definitive results. Preliminary support for the recommendation.",
            Self::Emerging => "Case studies, pilot studies, or early research. Emerging evidence that requires further validation.",
            Self::Anecdotal => "Expert opinion, clinical experience, or anecdotal reports. Limited scientific evidence.",
        }
    }
}

impl TryFrom<i64> for EvidenceLevel {
    type Error = EngineError;

    fn try_from(value: i64) -> EngineResult<Self> {
        match value {
            1 => Ok(Self::Strong),
            2 => Ok(Self::Moderate),
            3 => Ok(Self::Preliminary),
            4 => Ok(Self::Emerging),
            5 => Ok(Self::Anecdotal),
            other => Err(EngineError::InvalidEvidenceLevel(other)),
        }
    }
}

impl From<EvidenceLevel> for u8 {
    fn from(level: EvidenceLevel) -> Self {
        level.value()
    }
}

impl fmt::Display for EvidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.value())
    }
}

/// A single cited study backing a recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceSource {
    pub id: String,
    pub title: String,
    pub authors: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<NaiveDate>,
    pub study_type: StudyType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_size: Option<u32>,
    #[serde(default)]
    pub peer_reviewed: bool,
    /// Per-source rating supplied by the author of the source record
    pub evidence_level: EvidenceLevel,
    #[serde(default)]
    pub is_retracted: bool,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pmid: Option<String>,
    #[serde(
        rename = "abstract",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub abstract_text: Option<String>,
}

impl EvidenceSource {
    /// Minimal unreviewed source; the remaining attributes are set with the
    /// `with_*` methods.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        study_type: StudyType,
        evidence_level: EvidenceLevel,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            authors: String::new(),
            journal: None,
            publication_date: None,
            study_type,
            sample_size: None,
            peer_reviewed: false,
            evidence_level,
            is_retracted: false,
            url: String::new(),
            doi: None,
            pmid: None,
            abstract_text: None,
        }
    }

    pub fn with_authors(mut self, authors: impl Into<String>) -> Self {
        self.authors = authors.into();
        self
    }

    pub fn with_journal(mut self, journal: impl Into<String>) -> Self {
        self.journal = Some(journal.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_publication_date(mut self, date: NaiveDate) -> Self {
        self.publication_date = Some(date);
        self
    }

    pub fn with_sample_size(mut self, sample_size: u32) -> Self {
        self.sample_size = Some(sample_size);
        self
    }

    pub fn peer_reviewed(mut self) -> Self {
        self.peer_reviewed = true;
        self
    }

    /// Mark the source as disqualified. Retraction is one-way.
    pub fn retract(&mut self) {
        self.is_retracted = true;
    }

    /// Whether the source may contribute to aggregate calculations
    pub fn is_live(&self) -> bool {
        !self.is_retracted
    }
}

/// Borrow the non-retracted sources of a list
pub fn live_sources(sources: &[EvidenceSource]) -> Vec<&EvidenceSource> {
    sources.iter().filter(|s| s.is_live()).collect()
}

/// Outcome of controversy detection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Controversy {
    pub is_controversial: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Controversy {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn flagged(reason: impl Into<String>) -> Self {
        Self {
            is_controversial: true,
            reason: Some(reason.into()),
        }
    }
}
