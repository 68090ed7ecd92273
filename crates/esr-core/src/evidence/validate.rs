//! Admission checks for new evidence sources
//!
//! A candidate arrives loosely typed (every field optional, study type and
//! level raw). Validation separates hard errors, which block admission, from
//! warnings, which flag the source for reviewer attention.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::types::{EvidenceLevel, EvidenceSource, StudyType};

/// Partially filled source record awaiting admission
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceCandidate {
    pub id: Option<String>,
    pub title: Option<String>,
    pub authors: Option<String>,
    pub journal: Option<String>,
    pub publication_date: Option<NaiveDate>,
    pub study_type: Option<String>,
    /// Raw JSON so a negative or fractional count reaches validation
    pub sample_size: Option<Value>,
    pub peer_reviewed: Option<bool>,
    /// Raw JSON so a fractional or quoted level reaches validation
    pub evidence_level: Option<Value>,
    pub is_retracted: Option<bool>,
    pub url: Option<String>,
    pub doi: Option<String>,
    pub pmid: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
}

/// Result of source validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceValidation {
    pub is_valid: bool,
    /// Problems that block admission
    pub errors: Vec<String>,
    /// Problems a reviewer should look at
    pub warnings: Vec<String>,
}

impl SourceValidation {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, error: impl Into<String>) {
        self.is_valid = false;
        self.errors.push(error.into());
    }

    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

/// Whole number carried as a JSON integer or an integral float
fn whole_number(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    value
        .as_f64()
        .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
        .map(|f| f as i64)
}

fn parse_level(value: Option<&Value>) -> Option<EvidenceLevel> {
    value
        .and_then(whole_number)
        .and_then(|n| EvidenceLevel::try_from(n).ok())
}

/// `Ok(None)` when absent, `Err(())` when present but not a count
fn parse_sample_size(value: Option<&Value>) -> Result<Option<u32>, ()> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => whole_number(v)
            .and_then(|n| u32::try_from(n).ok())
            .map(Some)
            .ok_or(()),
    }
}

/// Check a candidate for completeness. Performs no I/O.
pub fn validate_source(candidate: &SourceCandidate) -> SourceValidation {
    let mut result = SourceValidation::valid();

    if is_blank(&candidate.title) {
        result.add_error("title is required");
    }
    if is_blank(&candidate.authors) {
        result.add_error("authors are required");
    }
    if is_blank(&candidate.url) {
        result.add_error("url is required");
    }
    match candidate.study_type.as_deref().map(str::trim) {
        None | Some("") => result.add_error("study type is required"),
        Some(label) => {
            if label.parse::<StudyType>().is_err() {
                result.add_error(format!("study type '{}' is not recognized", label));
            }
        }
    }
    if parse_level(candidate.evidence_level.as_ref()).is_none() {
        result.add_error("evidence level must be between 1 and 5");
    }
    if parse_sample_size(candidate.sample_size.as_ref()).is_err() {
        result.add_error("sample size must be a non-negative whole number");
    }

    if is_blank(&candidate.doi) && is_blank(&candidate.pmid) {
        result.add_warning("no DOI or PMID provided - source may be harder to verify");
    }
    if candidate.publication_date.is_none() {
        result.add_warning("no publication date provided");
    }
    if !candidate.peer_reviewed.unwrap_or(false) {
        result.add_warning("source is not peer-reviewed - evidence quality may be lower");
    }
    if is_blank(&candidate.abstract_text) {
        result.add_warning("no abstract provided");
    }

    result
}

impl SourceCandidate {
    /// Validate and convert into a typed source.
    /// Warnings do not block admission; errors do.
    pub fn admit(self) -> Result<EvidenceSource, SourceValidation> {
        let validation = validate_source(&self);
        if !validation.is_valid {
            return Err(validation);
        }

        let (study_type, evidence_level, sample_size) = match (
            self.study_type.as_deref().map(|t| t.trim().parse::<StudyType>()),
            parse_level(self.evidence_level.as_ref()),
            parse_sample_size(self.sample_size.as_ref()),
        ) {
            (Some(Ok(t)), Some(l), Ok(n)) => (t, l, n),
            _ => return Err(validation),
        };

        Ok(EvidenceSource {
            id: self.id.unwrap_or_default(),
            title: self.title.unwrap_or_default().trim().to_string(),
            authors: self.authors.unwrap_or_default().trim().to_string(),
            journal: self.journal,
            publication_date: self.publication_date,
            study_type,
            sample_size,
            peer_reviewed: self.peer_reviewed.unwrap_or(false),
            evidence_level,
            is_retracted: self.is_retracted.unwrap_or(false),
            url: self.url.unwrap_or_default().trim().to_string(),
            doi: self.doi,
            pmid: self.pmid,
            abstract_text: self.abstract_text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn complete() -> SourceCandidate {
        SourceCandidate {
            id: Some("src-1".to_string()),
            title: Some("Mindfulness and sleep quality".to_string()),
            authors: Some("Ong, Smith".to_string()),
            journal: Some("Sleep".to_string()),
            publication_date: NaiveDate::from_ymd_opt(2021, 5, 1),
            study_type: Some("RCT".to_string()),
            sample_size: Some(json!(240)),
            peer_reviewed: Some(true),
            evidence_level: Some(json!(2)),
            is_retracted: None,
            url: Some("https://doi.org/10.1000/sleep".to_string()),
            doi: Some("10.1000/sleep".to_string()),
            pmid: None,
            abstract_text: Some("We randomized 240 adults".to_string()),
        }
    }

    #[test]
    fn empty_candidate_lists_every_required_field() {
        let result = validate_source(&SourceCandidate::default());
        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec![
                "title is required",
                "authors are required",
                "url is required",
                "study type is required",
                "evidence level must be between 1 and 5",
            ]
        );
        assert_eq!(result.warnings.len(), 4);
    }

    #[test]
    fn complete_candidate_is_clean() {
        let result = validate_source(&complete());
        assert_eq!(result, SourceValidation::valid());
    }

    #[test]
    fn blank_strings_count_as_missing() {
        let candidate = SourceCandidate {
            title: Some("   ".to_string()),
            ..complete()
        };
        let result = validate_source(&candidate);
        assert_eq!(result.errors, vec!["title is required"]);
    }

    #[test]
    fn level_out_of_range() {
        for level in [0, 6, -1] {
            let candidate = SourceCandidate {
                evidence_level: Some(json!(level)),
                ..complete()
            };
            let result = validate_source(&candidate);
            assert_eq!(result.errors, vec!["evidence level must be between 1 and 5"]);
        }
    }

    #[test]
    fn level_must_be_a_whole_number() {
        for level in [json!(2.5), json!("3"), json!(true), json!(null)] {
            let candidate = SourceCandidate {
                evidence_level: Some(level.clone()),
                ..complete()
            };
            let result = validate_source(&candidate);
            assert_eq!(
                result.errors,
                vec!["evidence level must be between 1 and 5"],
                "{level}"
            );
        }
    }

    #[test]
    fn integral_float_level_accepted() {
        let candidate = SourceCandidate {
            evidence_level: Some(json!(3.0)),
            ..complete()
        };
        let source = candidate.admit().unwrap();
        assert_eq!(source.evidence_level, EvidenceLevel::Preliminary);
    }

    #[test]
    fn bad_sample_size_is_an_error() {
        for size in [json!(-5), json!(12.5), json!("many"), json!(u64::MAX)] {
            let candidate = SourceCandidate {
                sample_size: Some(size.clone()),
                ..complete()
            };
            let result = validate_source(&candidate);
            assert!(!result.is_valid);
            assert_eq!(
                result.errors,
                vec!["sample size must be a non-negative whole number"],
                "{size}"
            );
        }
    }

    #[test]
    fn missing_sample_size_is_fine() {
        let candidate = SourceCandidate {
            sample_size: None,
            ..complete()
        };
        assert!(validate_source(&candidate).is_valid);
        assert_eq!(candidate.admit().unwrap().sample_size, None);
    }

    #[test]
    fn malformed_fields_from_json_are_reported_together() {
        let candidate: SourceCandidate = serde_json::from_str(
            r#"{"title": "t", "evidence_level": 2.5, "sample_size": -5}"#,
        )
        .unwrap();
        let result = validate_source(&candidate);
        assert_eq!(
            result.errors,
            vec![
                "authors are required",
                "url is required",
                "study type is required",
                "evidence level must be between 1 and 5",
                "sample size must be a non-negative whole number",
            ]
        );
        assert_eq!(result.warnings.len(), 4);
    }

    #[test]
    fn unknown_study_type_rejected_at_the_boundary() {
        let candidate = SourceCandidate {
            study_type: Some("Podcast".to_string()),
            ..complete()
        };
        let result = validate_source(&candidate);
        assert_eq!(result.errors, vec!["study type 'Podcast' is not recognized"]);
    }

    #[test]
    fn warnings_do_not_block() {
        let candidate = SourceCandidate {
            doi: None,
            publication_date: None,
            peer_reviewed: Some(false),
            abstract_text: None,
            ..complete()
        };
        let result = validate_source(&candidate);
        assert!(result.is_valid);
        assert_eq!(
            result.warnings,
            vec![
                "no DOI or PMID provided - source may be harder to verify",
                "no publication date provided",
                "source is not peer-reviewed - evidence quality may be lower",
                "no abstract provided",
            ]
        );
    }

    #[test]
    fn pmid_alone_satisfies_identifier_warning() {
        let candidate = SourceCandidate {
            doi: None,
            pmid: Some("31234567".to_string()),
            ..complete()
        };
        assert!(validate_source(&candidate).warnings.is_empty());
    }

    #[test]
    fn admit_converts_valid_candidate() {
        let source = complete().admit().unwrap();
        assert_eq!(source.id, "src-1");
        assert_eq!(source.study_type, StudyType::Rct);
        assert_eq!(source.sample_size, Some(240));
        assert_eq!(source.evidence_level, EvidenceLevel::Moderate);
        assert!(source.peer_reviewed);
        assert!(!source.is_retracted);
    }

    #[test]
    fn admit_refuses_invalid_candidate() {
        let err = SourceCandidate::default().admit().unwrap_err();
        assert!(!err.is_valid);
        assert_eq!(err.errors.len(), 5);
    }

    #[test]
    fn candidate_from_empty_json() {
        let candidate: SourceCandidate = serde_json::from_str("{}").unwrap();
        assert_eq!(candidate, SourceCandidate::default());
    }
}
