//! Injection-detection rule list
//!
//! Rules are tagged with a category and severity so new patterns can be added
//! and tested independently. Order is meaningful: the sanitizer stops at the
//! first match.

use once_cell::sync::Lazy;
use regex::Regex;

/// What a rule is trying to catch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCategory {
    /// Attempts to override or discard prior instructions
    InstructionOverride,
    /// Attempts to reassign the assistant's role
    RoleSwitch,
    /// Attempts to extract the hidden system prompt
    PromptExtraction,
    /// Embedded executable content
    EmbeddedCode,
}

/// Severity recorded when a rule fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RuleSeverity {
    Medium,
    High,
    Critical,
}

/// A single tagged detection rule
#[derive(Debug)]
pub struct InjectionRule {
    /// Stable identifier, used in server-side logs only
    pub name: &'static str,
    pub category: RuleCategory,
    pub severity: RuleSeverity,
    pub pattern: Regex,
}

fn rule(
    name: &'static str,
    category: RuleCategory,
    severity: RuleSeverity,
    pattern: &str,
) -> InjectionRule {
    InjectionRule {
        name,
        category,
        severity,
        // Patterns are compile-time constants; a failure here is a programming error
        pattern: Regex::new(pattern).expect("invalid injection rule pattern"),
    }
}

/// Ordered rule list applied to truncated input, first match wins
pub static INJECTION_RULES: Lazy<Vec<InjectionRule>> = Lazy::new(|| {
    use RuleCategory::*;
    use RuleSeverity::*;

    vec![
        rule(
            "ignore-previous-instructions",
            InstructionOverride,
            High,
            r"(?i)ignore\s+(all\s+|any\s+)?previous\s+instructions",
        ),
        rule(
            "forget-previous-context",
            InstructionOverride,
            High,
            r"(?i)forget\s+(all\s+|any\s+)?previous\s+(context|instructions)",
        ),
        rule(
            "disregard-previous",
            InstructionOverride,
            High,
            r"(?i)disregard\s+(all\s+|any\s+)?previous",
        ),
        rule(
            "override-system",
            InstructionOverride,
            High,
            r"(?i)override\s+(the\s+)?system",
        ),
        rule(
            "you-are-now",
            RoleSwitch,
            High,
            r"(?i)you\s+are\s+now\s+(a|an|the)\b",
        ),
        rule(
            "act-as-different",
            RoleSwitch,
            High,
            r"(?i)act\s+as\s+(a\s+|an\s+)?(different|new)",
        ),
        rule("new-role-label", RoleSwitch, Medium, r"(?i)new\s+role\s*:"),
        rule(
            "system-prompt-label",
            RoleSwitch,
            High,
            r"(?i)system\s+prompt\s*:",
        ),
        rule(
            "repeat-system-prompt",
            PromptExtraction,
            High,
            r"(?i)repeat\s+(the\s+|your\s+)?system\s+prompt",
        ),
        rule(
            "show-instructions",
            PromptExtraction,
            High,
            r"(?i)show\s+me\s+(the\s+|your\s+)?instructions",
        ),
        rule(
            "ask-for-rules",
            PromptExtraction,
            High,
            r"(?i)what\s+(is|are)\s+your\s+(system\s+prompt|rules|instructions)",
        ),
        rule(
            "fenced-script-block",
            EmbeddedCode,
            Critical,
            r"(?i)```\s*(javascript|js|typescript|python|bash|sh|powershell)",
        ),
        rule("script-tag", EmbeddedCode, Critical, r"(?i)<\s*script\b"),
    ]
});

/// HTML-like tags removed on the clean path
pub static TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>").expect("invalid tag pattern"));

/// Runs of 3+ whitespace characters, collapsed to two
pub static WHITESPACE_RUN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s{3,}").expect("invalid whitespace pattern"));
