//! Engine configuration
//!
//! A single JSON document overrides any of the built-in tables. Every
//! section is optional; missing sections keep the engine defaults.
//! A `study_weights` table replaces the built-in one wholesale, so study
//! types it leaves out weigh the fallback 0.1.
//!
//! ```json
//! {
//!   "evidence": { "recency_window_days": 1095 },
//!   "crisis": { "protective_factors": ["therapy", "my kids"] },
//!   "compliance": { "extra_rules": [] }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use esr_core::compliance::{ComplianceChecker, ComplianceRuleSet, RuleDefinition};
use esr_core::crisis::{EscalationPolicy, KeywordTables, ProtectiveFactors, SeverityClassifier};
use esr_core::evidence::{EvidenceConfig, EvidenceRater};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrisisConfig {
    pub keywords: KeywordTables,
    /// Enables the protective-factor pass when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protective_factors: Option<ProtectiveFactors>,
    pub escalation: EscalationPolicy,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplianceConfig {
    /// Rules appended after the built-in set
    pub extra_rules: Vec<RuleDefinition>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub evidence: EvidenceConfig,
    pub crisis: CrisisConfig,
    pub compliance: ComplianceConfig,
}

impl EngineConfig {
    /// Read and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_json(&content)?;
        info!("Loaded engine config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.evidence.validate()?;
        self.crisis.keywords.validate()?;
        if self.crisis.escalation.emergency_threshold < self.crisis.escalation.notify_threshold {
            return Err(Error::Config(
                "emergency_threshold must not be below notify_threshold".to_string(),
            ));
        }
        Ok(())
    }

    pub fn rater(&self) -> EvidenceRater {
        EvidenceRater::new(self.evidence.clone())
    }

    pub fn classifier(&self) -> SeverityClassifier {
        let classifier = SeverityClassifier::new(self.crisis.keywords.clone());
        match &self.crisis.protective_factors {
            Some(factors) => classifier.with_protective_factors(factors.clone()),
            None => classifier,
        }
    }

    pub fn escalation(&self) -> EscalationPolicy {
        self.crisis.escalation
    }

    /// Built-in compliance rules plus any configured extras
    pub fn compliance_checker(&self) -> Result<ComplianceChecker> {
        let rules = ComplianceRuleSet::builtin()?.extend(&self.compliance.extra_rules)?;
        Ok(ComplianceChecker::new(rules))
    }
}
