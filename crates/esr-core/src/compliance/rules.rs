//! Compliance rule tables
//!
//! A rule is a named group of case-insensitive regular expressions with one
//! severity and one suggested rewrite. Rules are declared as [`RuleDefinition`]
//! values (serde-friendly, so deployments can add their own) and compiled
//! into a [`ComplianceRuleSet`].

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceCategory {
    Crisis,
    Legal,
    BannedWords,
    Ethical,
    Interpersonal,
}

impl ComplianceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Crisis => "crisis",
            Self::Legal => "legal",
            Self::BannedWords => "banned_words",
            Self::Ethical => "ethical",
            Self::Interpersonal => "interpersonal",
        }
    }
}

impl fmt::Display for ComplianceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered from least to most serious
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViolationSeverity {
    Info,
    Warning,
    Moderate,
    Severe,
    Critical,
}

impl ViolationSeverity {
    /// Points taken off the 100-point compliance score per violation
    pub fn deduction(&self) -> u32 {
        match self {
            Self::Info => 5,
            Self::Warning => 10,
            Self::Moderate => 20,
            Self::Severe => 35,
            Self::Critical => 50,
        }
    }
}

/// Uncompiled rule declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDefinition {
    pub category: ComplianceCategory,
    pub subcategory: String,
    pub severity: ViolationSeverity,
    pub patterns: Vec<String>,
    pub suggestion: String,
    #[serde(default)]
    pub research_basis: Option<String>,
}

/// Compiled rule
#[derive(Debug, Clone)]
pub struct ComplianceRule {
    pub category: ComplianceCategory,
    pub subcategory: String,
    pub severity: ViolationSeverity,
    pub suggestion: String,
    pub research_basis: Option<String>,
    patterns: Vec<Regex>,
}

impl ComplianceRule {
    pub fn compile(def: &RuleDefinition) -> EngineResult<Self> {
        let patterns = def
            .patterns
            .iter()
            .map(|p| {
                Regex::new(&format!("(?i){p}")).map_err(|e| EngineError::InvalidPattern {
                    rule: def.subcategory.clone(),
                    message: e.to_string(),
                })
            })
            .collect::<EngineResult<Vec<_>>>()?;

        Ok(Self {
            category: def.category,
            subcategory: def.subcategory.clone(),
            severity: def.severity,
            suggestion: def.suggestion.clone(),
            research_basis: def.research_basis.clone(),
            patterns,
        })
    }

    /// First match of each pattern that hits, in pattern order
    pub fn matches<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.patterns
            .iter()
            .filter_map(|re| re.find(text))
            .map(|m| m.as_str())
            .collect()
    }

    /// "Detected boundary violations" for `boundary_violations`
    pub fn reason(&self) -> String {
        format!("Detected {}", self.subcategory.replace('_', " "))
    }
}

#[derive(Debug, Clone, Default)]
pub struct ComplianceRuleSet {
    rules: Vec<ComplianceRule>,
}

lazy_static! {
    static ref BUILTIN_RULES: EngineResult<ComplianceRuleSet> =
        ComplianceRuleSet::compile(&builtin_definitions());
}

impl ComplianceRuleSet {
    pub fn compile(defs: &[RuleDefinition]) -> EngineResult<Self> {
        let rules = defs
            .iter()
            .map(ComplianceRule::compile)
            .collect::<EngineResult<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Built-in rules, compiled once per process
    pub fn builtin() -> EngineResult<Self> {
        BUILTIN_RULES.clone()
    }

    /// Append extra rules after the existing ones
    pub fn extend(mut self, defs: &[RuleDefinition]) -> EngineResult<Self> {
        for def in defs {
            self.rules.push(ComplianceRule::compile(def)?);
        }
        Ok(self)
    }

    pub fn rules(&self) -> &[ComplianceRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn rule(
    category: ComplianceCategory,
    subcategory: &str,
    severity: ViolationSeverity,
    patterns: &[&str],
    suggestion: &str,
    research_basis: &str,
) -> RuleDefinition {
    RuleDefinition {
        category,
        subcategory: subcategory.to_string(),
        severity,
        patterns: patterns.iter().map(|p| p.to_string()).collect(),
        suggestion: suggestion.to_string(),
        research_basis: Some(research_basis.to_string()),
    }
}

/// Built-in rule declarations, crisis first
pub fn builtin_definitions() -> Vec<RuleDefinition> {
    use ComplianceCategory::*;
    use ViolationSeverity::*;

    vec![
        rule(
            Crisis,
            "suicide_risk",
            Critical,
            &[
                r"\b(kill|end)\s+(myself|my life)\b",
                r"\bcommit suicide\b",
                r"\bwant to (die|be dead|not exist)\b",
                r"\b(no point|no reason)\s+(in|to)\s+(living|life|going on)\b",
                r"\beveryone (would be|is)\s+better off without me\b",
                r"\bi('m| am)\s+a burden\b",
                r"\bsaying goodbye\b",
            ],
            "CRISIS DETECTED. Immediately provide crisis resources: 988 (Suicide & Crisis Lifeline), Crisis Text Line (text HOME to 741741). Ask directly about safety.",
            "Crisis intervention practice",
        ),
        rule(
            Crisis,
            "self_harm",
            Critical,
            &[
                r"\b(cut|cutting|burn|burning|hurt|hurting)\s+(myself|my body)\b",
                r"\bself[- ]?harm\b",
                r"\bpunish (myself|my body)\b",
            ],
            "SAFETY CONCERN. Assess immediate risk. Provide crisis resources and consider referral to mental health professional.",
            "Crisis intervention protocols",
        ),
        rule(
            Crisis,
            "harm_to_others",
            Critical,
            &[
                r"\b(kill|hurt|harm)\s+(him|her|them|someone|my)\b",
                r"\bi('m| am)\s+going to\s+(hurt|attack|kill)\b",
                r"\bthey (deserve|need)\s+to (die|be hurt)\b",
            ],
            "SAFETY CONCERN. Duty to warn may apply. Assess seriousness and consult with supervisor or appropriate authorities.",
            "Tarasoff duty to warn",
        ),
        rule(
            Crisis,
            "abuse_disclosure",
            Critical,
            &[
                r"\b(he|she|they)\s+(hit|hits|beat|beats|abuse|abuses)\s+me\b",
                r"\bi('m| am)\s+being\s+(abused|beaten|hurt)\b",
                r"\b(domestic|child)\s+(violence|abuse)\b",
            ],
            "SENSITIVE DISCLOSURE. Validate, assess safety, provide resources (National DV Hotline: 1-800-799-7233). May have mandatory reporting obligations.",
            "Mandatory reporting requirements, trauma-informed care",
        ),
        rule(
            Legal,
            "medical_advice",
            Severe,
            &[
                r"\b(diagnose|diagnosis|prescribed?|medication|medicine|drug|dosage|treatment plan)\b",
                r"\byou (have|might have|could have|probably have)\s+\w+\s*(disorder|disease|condition|syndrome)\b",
                r"\b(take|stop taking|increase|decrease)\s+\w*\s*(medication|medicine|drug|pill)\b",
                r"\byou (are|seem|appear)\s+(depressed|anxious|bipolar|schizophrenic|autistic)\b",
                r"\bthis (is|sounds like|appears to be)\s+\w*\s*(depression|anxiety|PTSD|ADHD|OCD)\b",
            ],
            "I'm not a medical professional. For health concerns, please consult with a healthcare provider. I can help you explore your feelings and coping strategies.",
            "ICF Code of Ethics 4.1: coaches do not diagnose or prescribe",
        ),
        rule(
            Legal,
            "legal_advice",
            Severe,
            &[
                r"\byou should (sue|file a lawsuit|take legal action|contact a lawyer|press charges)\b",
                r"\b(legally|under the law|according to law)\s+you (can|cannot|must|should)\b",
                r"\byour (legal rights|rights under law)\s+(are|include)\b",
                r"\bthis (is|constitutes|could be)\s+(illegal|a crime|fraud|harassment)\b",
            ],
            "I can't provide legal advice. For legal matters, please consult with a qualified attorney. I can help you process the emotions around your situation.",
            "ICF Code of Ethics: coaches operate within their competency",
        ),
        rule(
            Legal,
            "financial_advice",
            Severe,
            &[
                r"\byou should (invest|buy|sell|trade)\s+(stocks|bonds|cryptocurrency|real estate|bitcoin|ETF)\b",
                r"\b(invest in|put your money in|buy|sell)\s+\w+\s*(stock|fund|crypto|coin)\b",
                r"\bthis (stock|investment|crypto)\s+(will|should|might)\s+(go up|increase|double|triple)\b",
                r"\b(financial advice|investment advice)\s*:",
            ],
            "I can't give specific financial advice. For financial planning, please consult a financial advisor. I can help you work through stress related to financial concerns.",
            "ICF Code of Ethics: no advice outside the coach's expertise",
        ),
        rule(
            BannedWords,
            "interrogative_starters",
            Warning,
            &[
                r"^why did(n't)? you\b",
                r"^what (are|were) you (doing|thinking)\b",
                r"^where (have you been|were you)\b",
                r"^when were you going to\b",
                r"^how could you\b",
            ],
            "Rephrase without accusatory tone. Instead of 'Why did you...?' try 'Help me understand what led to...'",
            "Psychology Today: phrases that create defensiveness",
        ),
        rule(
            BannedWords,
            "absolute_statements",
            Warning,
            &[
                r"\byou always\b",
                r"\byou never\b",
                r"\beveryone knows\b",
                r"\bnobody (would|could|does)\b",
                r"\bthat's (wrong|stupid|ridiculous|crazy)\b",
            ],
            "Avoid absolute statements. Replace 'You always...' with 'I've noticed sometimes...'",
            "Gottman Institute: the Four Horsemen",
        ),
        rule(
            BannedWords,
            "dismissive_phrases",
            Moderate,
            &[
                r"\bjust (calm down|relax|chill|get over it)\b",
                r"\bit's not (a big deal|that bad|that serious)\b",
                r"\byou're (overreacting|being dramatic|too sensitive)\b",
                r"\bat least\b.*\b(you|it)\b",
                r"\bother people have it worse\b",
                r"\bjust think positive\b",
            ],
            "Validate feelings first. Replace 'Just calm down' with 'I can see this is really affecting you. What would help right now?'",
            "Nonviolent Communication (Rosenberg)",
        ),
        rule(
            BannedWords,
            "toxic_positivity",
            Warning,
            &[
                r"\beverything happens for a reason\b",
                r"\bjust (be|stay) positive\b",
                r"\blook on the bright side\b",
                r"\bgood vibes only\b",
                r"\bit could be worse\b",
                r"\bstop being (negative|pessimistic)\b",
            ],
            "Acknowledge difficult emotions instead of bypassing them. Try 'This is really hard. I'm here with you.'",
            "Emotional validation research",
        ),
        rule(
            Ethical,
            "outcome_promises",
            Moderate,
            &[
                r"\bi (guarantee|promise)\s+(you will|results|success)\b",
                r"\bthis will (definitely|certainly|absolutely)\s+(work|help|fix)\b",
                r"\b100%\s+(effective|guaranteed|success)\b",
                r"\byou will (definitely|certainly)\s+(achieve|succeed|get)\b",
            ],
            "Avoid guaranteeing outcomes. Coaching supports growth but cannot promise specific results.",
            "ICF Code of Ethics: honest representation of services",
        ),
        rule(
            Ethical,
            "boundary_violations",
            Severe,
            &[
                r"\bwe should (meet|hang out|get together)\s+outside\b",
                r"\bgive me your (personal|private)\s+(number|address|email)\b",
                r"\bdon't tell (anyone|your spouse|your partner)\b",
                r"\bthis is (our|just between us)\s+secret\b",
            ],
            "Maintain professional boundaries. All coaching interactions should remain within the professional context.",
            "ICF Code of Ethics section 3: professional conduct",
        ),
        rule(
            Ethical,
            "scope_creep",
            Severe,
            &[
                r"\blet me (give you|offer)\s+(therapy|counseling|treatment)\b",
                r"\bas (a|your)\s+(therapist|counselor|doctor)\b",
                r"\bi'll (treat|cure|heal)\s+your\b",
            ],
            "Stay within coaching scope. Coaching is not therapy, counseling, or medical treatment.",
            "ICF Code of Ethics: distinguishing coaching from other professions",
        ),
        rule(
            Interpersonal,
            "autonomy_threats",
            Warning,
            &[
                r"\byou (have to|must|need to|are required to)\b",
                r"\bthere's no (other|choice|option)\b",
                r"\byou don't have a choice\b",
                r"\bi'm telling you to\b",
            ],
            "Support autonomy. Offer choices: 'You could try X or Y - what feels right to you?'",
            "Self-Determination Theory: autonomy",
        ),
        rule(
            Interpersonal,
            "but_negation",
            Info,
            &[
                r"\b(yes|i understand|that's true|i hear you),?\s+but\b",
                r"\bi (agree|appreciate that),?\s+but\b",
            ],
            "Replace 'but' with 'and'. 'I understand, AND I wonder if...' preserves both perspectives.",
            "Improv communication: 'yes, and'",
        ),
    ]
}
