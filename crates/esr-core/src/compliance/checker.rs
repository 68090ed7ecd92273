use serde::{Deserialize, Serialize};

use super::alert::{AlertPhase, RealTimeAlert};
use super::rules::{ComplianceCategory, ComplianceRuleSet, ViolationSeverity};
use crate::error::EngineResult;

/// Minimum score for a proposed response with only minor violations
pub const APPROVAL_THRESHOLD: u32 = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    Training,
    #[default]
    LiveClient,
}

/// Who is speaking and in which kind of session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceContext {
    pub is_coach_speaking: bool,
    #[serde(default)]
    pub session_type: SessionType,
}

impl ComplianceContext {
    pub fn coach(session_type: SessionType) -> Self {
        Self {
            is_coach_speaking: true,
            session_type,
        }
    }

    pub fn client(session_type: SessionType) -> Self {
        Self {
            is_coach_speaking: false,
            session_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceViolation {
    pub category: ComplianceCategory,
    pub subcategory: String,
    pub severity: ViolationSeverity,
    pub flagged_content: String,
    pub reason: String,
    pub suggestion: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub research_basis: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub is_compliant: bool,
    /// 0-100, higher is better
    pub overall_score: u32,
    pub violations: Vec<ComplianceViolation>,
    /// Distinct suggestions in first-seen order
    pub suggestions: Vec<String>,
    pub requires_immediate_action: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coach_guidance: Option<String>,
}

impl ComplianceReport {
    fn from_violations(violations: Vec<ComplianceViolation>, context: ComplianceContext) -> Self {
        let mut suggestions: Vec<String> = Vec::new();
        for v in &violations {
            if !suggestions.contains(&v.suggestion) {
                suggestions.push(v.suggestion.clone());
            }
        }

        let deductions: u32 = violations.iter().map(|v| v.severity.deduction()).sum();
        let requires_immediate_action = violations
            .iter()
            .any(|v| v.severity == ViolationSeverity::Critical);

        let coach_guidance = if context.is_coach_speaking {
            coach_guidance(&violations)
        } else {
            None
        };

        Self {
            is_compliant: violations.is_empty(),
            overall_score: 100u32.saturating_sub(deductions),
            violations,
            suggestions,
            requires_immediate_action,
            coach_guidance,
        }
    }

    pub fn has_severity(&self, severity: ViolationSeverity) -> bool {
        self.violations.iter().any(|v| v.severity == severity)
    }

    pub fn alerts(&self) -> Vec<RealTimeAlert> {
        self.violations.iter().map(RealTimeAlert::for_violation).collect()
    }
}

fn coach_guidance(violations: &[ComplianceViolation]) -> Option<String> {
    let first_with = |severity: ViolationSeverity| violations.iter().find(|v| v.severity == severity);

    if let Some(v) = first_with(ViolationSeverity::Critical) {
        Some(format!("⚠️ CRITICAL: {}", v.suggestion))
    } else if let Some(v) = first_with(ViolationSeverity::Severe) {
        Some(format!("⚡ IMPORTANT: {}", v.suggestion))
    } else {
        violations.first().map(|v| format!("💡 TIP: {}", v.suggestion))
    }
}

/// Outcome of vetting a suggested response before the coach says it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreSpeechVerdict {
    pub approved: bool,
    pub alerts: Vec<RealTimeAlert>,
    pub report: ComplianceReport,
}

#[derive(Debug, Clone)]
pub struct ComplianceChecker {
    rules: ComplianceRuleSet,
}

impl ComplianceChecker {
    pub fn new(rules: ComplianceRuleSet) -> Self {
        Self { rules }
    }

    pub fn builtin() -> EngineResult<Self> {
        Ok(Self::new(ComplianceRuleSet::builtin()?))
    }

    pub fn rules(&self) -> &ComplianceRuleSet {
        &self.rules
    }

    /// Run every rule over `text`. Each pattern that matches contributes one
    /// violation carrying its first match.
    pub fn check(&self, text: &str, context: ComplianceContext) -> ComplianceReport {
        let mut violations = Vec::new();
        for rule in self.rules.rules() {
            for flagged in rule.matches(text) {
                violations.push(ComplianceViolation {
                    category: rule.category,
                    subcategory: rule.subcategory.clone(),
                    severity: rule.severity,
                    flagged_content: flagged.to_string(),
                    reason: rule.reason(),
                    suggestion: rule.suggestion.clone(),
                    research_basis: rule.research_basis.clone(),
                });
            }
        }

        let report = ComplianceReport::from_violations(violations, context);
        tracing::debug!(
            score = report.overall_score,
            violations = report.violations.len(),
            session = ?context.session_type,
            "Compliance check complete"
        );
        if report.requires_immediate_action {
            tracing::warn!("Compliance check found critical content");
        }
        report
    }

    /// Vet a proposed coach response. Anything critical or severe blocks it;
    /// otherwise it passes when the score reaches [`APPROVAL_THRESHOLD`].
    pub fn pre_speech_check(&self, proposed: &str) -> PreSpeechVerdict {
        let report = self.check(proposed, ComplianceContext::coach(SessionType::LiveClient));
        let alerts = report
            .violations
            .iter()
            .map(|v| RealTimeAlert::for_violation(v).in_phase(AlertPhase::PreSpeech))
            .collect();

        let blocked = report.requires_immediate_action || report.has_severity(ViolationSeverity::Severe);
        let approved = !blocked && report.overall_score >= APPROVAL_THRESHOLD;

        PreSpeechVerdict {
            approved,
            alerts,
            report,
        }
    }
}
