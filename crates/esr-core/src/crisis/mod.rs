//! Crisis severity classification
//!
//! Maps free text to one of five tiers with a keyword scan, then to an
//! escalation decision. Classification is deterministic and keeps no state,
//! so one classifier can be shared across threads.
//!
//! ```rust
//! use esr_core::crisis::{classify_severity, SeverityTier};
//!
//! assert_eq!(classify_severity("I'm feeling stressed about work"), SeverityTier::Low);
//! assert_eq!(classify_severity("hi"), SeverityTier::None);
//! ```

mod classifier;
mod escalation;
mod keywords;
mod protective;
mod tier;

use lazy_static::lazy_static;

pub use classifier::{CrisisAssessment, SeverityClassifier};
pub use escalation::{EscalationDecision, EscalationPolicy};
pub use keywords::{normalize_text, KeywordTables};
pub use protective::ProtectiveFactors;
pub use tier::SeverityTier;

lazy_static! {
    static ref DEFAULT_CLASSIFIER: SeverityClassifier = SeverityClassifier::default();
}

/// Classify text with the built-in keyword tables
pub fn classify_severity(text: &str) -> SeverityTier {
    DEFAULT_CLASSIFIER.classify(text)
}
