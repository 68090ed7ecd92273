//! Config loading tests for EngineConfig

use std::io::Write;

use esr::{EngineConfig, Error};
use esr_core::crisis::SeverityTier;
use esr_core::evidence::{EvidenceLevel, EvidenceSource, StudyType};
use pretty_assertions::assert_eq;

/// Helper to write a config file into a temp dir
fn write_config(dir: &tempfile::TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("esr.json");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

#[test]
fn test_empty_config_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "{}");

    let config = EngineConfig::load(&path).unwrap();
    assert_eq!(config, EngineConfig::default());
    assert_eq!(config.classifier().classify("I want to kill myself"), SeverityTier::Critical);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = EngineConfig::load(dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_malformed_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "{ not json");
    assert!(matches!(EngineConfig::load(&path), Err(Error::Serialization(_))));
}

#[test]
fn test_weight_out_of_range() {
    let result = EngineConfig::from_json(r#"{"evidence": {"study_weights": {"RCT": 1.5}}}"#);
    assert!(matches!(result, Err(Error::Engine(_))));
}

#[test]
fn test_negative_recency_window() {
    let result = EngineConfig::from_json(r#"{"evidence": {"recency_window_days": -5}}"#);
    assert!(matches!(
        result,
        Err(Error::Engine(esr_core::EngineError::InvalidRecencyWindow(-5)))
    ));
}

#[test]
fn test_empty_keyword_phrase() {
    let result = EngineConfig::from_json(r#"{"crisis": {"keywords": {"high": [""]}}}"#);
    assert!(matches!(result, Err(Error::Engine(_))));
}

#[test]
fn test_inverted_escalation_thresholds() {
    let result = EngineConfig::from_json(
        r#"{"crisis": {"escalation": {"notify_threshold": "critical", "emergency_threshold": "low"}}}"#,
    );
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_protective_factors_enable_refinement() {
    let config =
        EngineConfig::from_json(r#"{"crisis": {"protective_factors": ["my dog"]}}"#).unwrap();
    let classifier = config.classifier();
    assert_eq!(classifier.classify("I feel hopeless but my dog needs me"), SeverityTier::Medium);
    assert_eq!(
        EngineConfig::default().classifier().classify("I feel hopeless but my dog needs me"),
        SeverityTier::High
    );
}

#[test]
fn test_custom_weights_reach_rater() {
    let config = EngineConfig::from_json(
        r#"{"evidence": {"study_weights": {"Expert Opinion": 1.0, "Meta-Analysis": 0.0}}}"#,
    )
    .unwrap();
    let sources = vec![
        EvidenceSource::new("m", "Meta", StudyType::MetaAnalysis, EvidenceLevel::Strong),
        EvidenceSource::new("e", "Opinion", StudyType::ExpertOpinion, EvidenceLevel::Anecdotal),
    ];
    assert_eq!(config.rater().level(&sources), EvidenceLevel::Anecdotal);
}

#[test]
fn test_extra_compliance_rules() {
    let config = EngineConfig::from_json(
        r#"{"compliance": {"extra_rules": [{
            "category": "banned_words",
            "subcategory": "filler",
            "severity": "info",
            "patterns": ["\\bbasically\\b"],
            "suggestion": "Drop the filler."
        }]}}"#,
    )
    .unwrap();
    let checker = config.compliance_checker().unwrap();
    let report = checker.check(
        "Basically, let's plan the week",
        esr_core::compliance::ComplianceContext::coach(esr_core::compliance::SessionType::Training),
    );
    assert_eq!(report.overall_score, 95);
    assert_eq!(report.violations[0].subcategory, "filler");
}

#[test]
fn test_bad_extra_rule_pattern() {
    let config = EngineConfig::from_json(
        r#"{"compliance": {"extra_rules": [{
            "category": "ethical", "subcategory": "broken", "severity": "info",
            "patterns": ["(unclosed"], "suggestion": ""
        }]}}"#,
    )
    .unwrap();
    assert!(matches!(config.compliance_checker(), Err(Error::Engine(_))));
}
