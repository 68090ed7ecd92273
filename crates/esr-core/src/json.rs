//! String-in, string-out entry points
//!
//! Each function takes a JSON document and returns a JSON document. Parse
//! failures come back as `{"error": "..."}` instead of a Rust error, so the
//! functions can sit behind any FFI or scripting boundary unchanged.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::crisis::{
    CrisisAssessment, EscalationDecision, EscalationPolicy, ProtectiveFactors, SeverityClassifier,
};
use crate::evidence::{
    validate_source, EvidenceConfig, EvidenceRater, EvidenceSource, SourceCandidate,
};

#[derive(Debug, Deserialize)]
pub struct RateInput {
    pub sources: Vec<EvidenceSource>,
    /// Reference date for recency; defaults to the current UTC date
    #[serde(default)]
    pub today: Option<NaiveDate>,
    #[serde(default)]
    pub config: EvidenceConfig,
}

#[derive(Debug, Deserialize)]
pub struct ClassifyInput {
    pub text: String,
    /// Enable the protective-factor pass
    #[serde(default)]
    pub protective_factors: bool,
    #[serde(default)]
    pub escalation: EscalationPolicy,
}

#[derive(Debug, Serialize)]
pub struct ClassifyOutput {
    #[serde(flatten)]
    pub assessment: CrisisAssessment,
    pub escalation: EscalationDecision,
}

fn error_json(context: &str, e: impl std::fmt::Display) -> String {
    serde_json::json!({ "error": format!("{context}: {e}") }).to_string()
}

fn to_json<T: Serialize>(value: &T) -> String {
    match serde_json::to_string(value) {
        Ok(json) => json,
        Err(e) => error_json("serialization failed", e),
    }
}

/// Rate a source set.
///
/// Input: `{"sources": [...], "today": "YYYY-MM-DD"?, "config": {...}?}`
pub fn rate_evidence(input: &str) -> String {
    let parsed: RateInput = match serde_json::from_str(input) {
        Ok(v) => v,
        Err(e) => return error_json("invalid rate input", e),
    };
    if let Err(e) = parsed.config.validate() {
        return error_json("invalid evidence config", e);
    }

    let today = parsed.today.unwrap_or_else(|| Utc::now().date_naive());
    let rating = EvidenceRater::new(parsed.config).rate(&parsed.sources, today);
    to_json(&rating)
}

/// Classify one message and attach the escalation decision.
///
/// Input: `{"text": "...", "protective_factors": bool?, "escalation": {...}?}`
pub fn classify_text(input: &str) -> String {
    let parsed: ClassifyInput = match serde_json::from_str(input) {
        Ok(v) => v,
        Err(e) => return error_json("invalid classify input", e),
    };

    let mut classifier = SeverityClassifier::default();
    if parsed.protective_factors {
        classifier = classifier.with_protective_factors(ProtectiveFactors::default());
    }
    let assessment = classifier.assess(&parsed.text);
    let escalation = parsed.escalation.decide(assessment.tier);

    to_json(&ClassifyOutput {
        assessment,
        escalation,
    })
}

/// Validate a candidate source record
pub fn validate_candidate(input: &str) -> String {
    let candidate: SourceCandidate = match serde_json::from_str(input) {
        Ok(v) => v,
        Err(e) => return error_json("invalid source candidate", e),
    };
    to_json(&validate_source(&candidate))
}
