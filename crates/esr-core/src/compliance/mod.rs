//! Compliance monitoring of coaching speech
//!
//! Scans text for language a wellness coach should not use (diagnoses,
//! legal or financial advice, defensiveness triggers, boundary problems)
//! and for crisis disclosures. Each match deducts from a 100-point score.

mod alert;
mod checker;
mod rules;

pub use alert::{AlertPhase, AlertUrgency, RealTimeAlert};
pub use checker::{
    ComplianceChecker, ComplianceContext, ComplianceReport, ComplianceViolation, PreSpeechVerdict,
    SessionType, APPROVAL_THRESHOLD,
};
pub use rules::{
    builtin_definitions, ComplianceCategory, ComplianceRule, ComplianceRuleSet, RuleDefinition,
    ViolationSeverity,
};
