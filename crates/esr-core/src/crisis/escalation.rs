//! Escalation policy
//!
//! Turns a severity tier into the decision the caller acts on: whether to
//! alert a human supervisor, whether emergency services should be suggested,
//! and what the assistant should say. Delivery of the alert is the caller's
//! job.

use serde::{Deserialize, Serialize};

use super::tier::SeverityTier;

/// Thresholds for supervisor and emergency escalation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EscalationPolicy {
    /// Tiers at or above this alert a human supervisor (default: medium)
    pub notify_threshold: SeverityTier,
    /// Tiers at or above this warrant emergency resources (default: critical)
    pub emergency_threshold: SeverityTier,
}

impl Default for EscalationPolicy {
    fn default() -> Self {
        Self {
            notify_threshold: SeverityTier::Medium,
            emergency_threshold: SeverityTier::Critical,
        }
    }
}

/// What the caller should do about a classified message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscalationDecision {
    pub tier: SeverityTier,
    pub should_escalate: bool,
    pub should_notify_emergency: bool,
    pub immediate_action: String,
    pub recommended_response: String,
}

impl EscalationPolicy {
    pub fn with_notify_threshold(mut self, tier: SeverityTier) -> Self {
        self.notify_threshold = tier;
        self
    }

    /// `none` never escalates, whatever the thresholds
    pub fn should_escalate(&self, tier: SeverityTier) -> bool {
        !tier.is_none() && tier.at_least(self.notify_threshold)
    }

    pub fn decide(&self, tier: SeverityTier) -> EscalationDecision {
        let should_escalate = self.should_escalate(tier);
        let should_notify_emergency = !tier.is_none() && tier.at_least(self.emergency_threshold);

        if should_notify_emergency {
            tracing::warn!(tier = %tier, "Crisis tier requires emergency escalation");
        }

        EscalationDecision {
            tier,
            should_escalate,
            should_notify_emergency,
            immediate_action: immediate_action(tier).to_string(),
            recommended_response: recommended_response(tier).to_string(),
        }
    }
}

fn immediate_action(tier: SeverityTier) -> &'static str {
    match tier {
        SeverityTier::Critical => "IMMEDIATE INTERVENTION REQUIRED",
        SeverityTier::High => "URGENT - Contact crisis resources",
        SeverityTier::Medium => "Monitor closely and provide resources",
        SeverityTier::Low => "Provide support and monitor",
        SeverityTier::None => "No crisis detected",
    }
}

fn recommended_response(tier: SeverityTier) -> &'static str {
    match tier {
        SeverityTier::Critical => "I'm very concerned about your safety right now. Please call 988 (Suicide & Crisis Lifeline) immediately, or text 'HELLO' to 741741 (Crisis Text Line). If you're in immediate danger, please call 911. You don't have to face this alone - help is available 24/7.",
        SeverityTier::High => "I hear that you're going through an incredibly difficult time. Your safety is the top priority. Please reach out to the 988 Suicide & Crisis Lifeline (call or text 988) or the Crisis Text Line (text 'HELLO' to 741741). These services are free, confidential, and available 24/7. Would you be willing to connect with them now?",
        SeverityTier::Medium => "It sounds like you're carrying a heavy burden right now. I want you to know that support is available. The 988 Suicide & Crisis Lifeline (call or text 988) provides free, confidential support 24/7. Would it help to talk about what's making things feel so difficult?",
        SeverityTier::Low => "I can hear that things are challenging right now. Remember that you don't have to face this alone. If you ever need immediate support, the 988 Suicide & Crisis Lifeline is available 24/7 (call or text 988). Let's work together to find ways to support you through this.",
        SeverityTier::None => "",
    }
}
