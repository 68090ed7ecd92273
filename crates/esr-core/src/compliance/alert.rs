//! Coach-facing alerts for individual violations

use serde::{Deserialize, Serialize};

use super::checker::ComplianceViolation;
use super::rules::{ComplianceCategory, ViolationSeverity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertPhase {
    PreSpeech,
    DuringSpeech,
    PostSpeech,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertUrgency {
    Low,
    Medium,
    High,
    Critical,
}

impl From<ViolationSeverity> for AlertUrgency {
    fn from(severity: ViolationSeverity) -> Self {
        match severity {
            ViolationSeverity::Info => Self::Low,
            ViolationSeverity::Warning => Self::Medium,
            ViolationSeverity::Moderate | ViolationSeverity::Severe => Self::High,
            ViolationSeverity::Critical => Self::Critical,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealTimeAlert {
    pub phase: AlertPhase,
    pub urgency: AlertUrgency,
    pub message: String,
    pub alternative_phrase: String,
}

impl RealTimeAlert {
    pub fn for_violation(violation: &ComplianceViolation) -> Self {
        let flagged = &violation.flagged_content;
        let (warning, alternative) = match (violation.subcategory.as_str(), violation.category) {
            ("interrogative_starters", _) => (
                format!("🚫 DO NOT SAY: \"{flagged}\""),
                "✅ INSTEAD SAY: 'Help me understand what led to...' or 'I'm curious about...'".to_string(),
            ),
            ("absolute_statements", _) => (
                format!("🚫 DO NOT SAY: \"{flagged}\""),
                "✅ INSTEAD SAY: 'I've noticed sometimes...' or 'It seems like...'".to_string(),
            ),
            ("dismissive_phrases", _) => (
                format!("🚫 DO NOT SAY: \"{flagged}\""),
                "✅ INSTEAD SAY: 'I can see this is really affecting you. What would help right now?'"
                    .to_string(),
            ),
            ("but_negation", _) => (
                "🚫 DO NOT SAY: \"but\" (it negates what came before)".to_string(),
                "✅ INSTEAD SAY: Replace 'but' with 'and' to honor both perspectives".to_string(),
            ),
            (_, ComplianceCategory::Legal) => (
                format!("🚫 DO NOT SAY: \"{flagged}\" - LEGAL VIOLATION"),
                format!("✅ INSTEAD SAY: {}", violation.suggestion),
            ),
            (_, ComplianceCategory::Crisis) => (
                format!("🚨 CRISIS DETECTED: \"{flagged}\" - IMMEDIATE ACTION REQUIRED"),
                format!("✅ REQUIRED ACTION: {}", violation.suggestion),
            ),
            _ => (
                format!("⚠️ AVOID: \"{flagged}\""),
                format!("✅ BETTER: {}", violation.suggestion),
            ),
        };

        Self {
            phase: AlertPhase::DuringSpeech,
            urgency: violation.severity.into(),
            message: format!("{warning}\n\n{alternative}\n\nReason: {}", violation.reason),
            alternative_phrase: alternative,
        }
    }

    pub fn in_phase(mut self, phase: AlertPhase) -> Self {
        self.phase = phase;
        self
    }
}
