//! Dangerous-command scanner.
//!
//! A fixed, ordered rule table evaluated against the whole response text.
//! Every rule is checked (no short-circuit), so a response may carry several
//! warnings; their order follows the table.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use serde::Serialize;

/// Warning severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SafetyLevel {
    Low,
    Medium,
    High,
}

impl SafetyLevel {
    /// Upper-case label used in text output (`[HIGH]`).
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

/// One matched rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SafetyWarning {
    pub level: SafetyLevel,
    pub message: String,
}

struct SafetyRule {
    pattern: &'static str,
    level: SafetyLevel,
    message: &'static str,
}

const SAFETY_RULES: &[SafetyRule] = &[
    SafetyRule {
        // `-rf` cluster, or recursive and force given as separate options
        pattern: r"\brm\s+(?:-\S*\s+)*(?:-[a-z]*(?:r[a-z]*f|f[a-z]*r)[a-z]*\b|(?:-[a-z]*r[a-z]*\b|--recursive\b)\s+(?:-\S*\s+)*(?:-[a-z]*f[a-z]*\b|--force\b)|(?:-[a-z]*f[a-z]*\b|--force\b)\s+(?:-\S*\s+)*(?:-[a-z]*r[a-z]*\b|--recursive\b))",
        level: SafetyLevel::High,
        message: "HIGH RISK: recursive delete (rm -rf).",
    },
    SafetyRule {
        // only invocations with an if=/of= operand
        pattern: r"\bdd\s+[^\n]*\b(?:if|of)=",
        level: SafetyLevel::High,
        message: "HIGH RISK: raw disk write (dd).",
    },
    SafetyRule {
        pattern: r"\bmkfs(?:\.\w+)?\b",
        level: SafetyLevel::High,
        message: "HIGH RISK: filesystem creation (mkfs).",
    },
    SafetyRule {
        pattern: r"\b(?:curl|wget)\b[^\n]*\|\s*(?:sudo\s+)?(?:sh|bash|zsh)\b",
        level: SafetyLevel::High,
        message: "HIGH RISK: piping network data to shell.",
    },
    SafetyRule {
        pattern: r">\s*/etc/",
        level: SafetyLevel::High,
        message: "HIGH RISK: overwriting system files via redirection.",
    },
    SafetyRule {
        pattern: r"\bchmod\s+(?:-\S+\s+)*0?777\b",
        level: SafetyLevel::High,
        message: "HIGH RISK: world-writable permissions (chmod 777).",
    },
    SafetyRule {
        pattern: r"\bchmod\s+(?:-\S+\s+)*(?:-[a-z]*(?-i:R)|--recursive\b)",
        level: SafetyLevel::Medium,
        message: "MEDIUM RISK: recursive permissions change.",
    },
    SafetyRule {
        pattern: r"\bchown\s+(?:-\S+\s+)*(?:-[a-z]*(?-i:R)|--recursive\b)",
        level: SafetyLevel::Medium,
        message: "MEDIUM RISK: recursive ownership change.",
    },
];

static COMPILED_RULES: LazyLock<Vec<(Regex, &'static SafetyRule)>> = LazyLock::new(|| {
    SAFETY_RULES
        .iter()
        .map(|rule| {
            let re = RegexBuilder::new(rule.pattern)
                .case_insensitive(true)
                .build()
                .expect("static safety rule pattern");
            (re, rule)
        })
        .collect()
});

/// Scans text for dangerous command patterns.
pub fn detect_safety(text: &str) -> Vec<SafetyWarning> {
    COMPILED_RULES
        .iter()
        .filter(|(re, _)| re.is_match(text))
        .map(|(_, rule)| SafetyWarning {
            level: rule.level,
            message: rule.message.to_string(),
        })
        .collect()
}

/// True iff any warning is high severity.
pub fn has_high_risk(warnings: &[SafetyWarning]) -> bool {
    warnings.iter().any(|w| w.level == SafetyLevel::High)
}
