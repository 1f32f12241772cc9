//! Core InputSanitizer implementation

use super::rules::{INJECTION_RULES, TAG_PATTERN, WHITESPACE_RUN_PATTERN};
use tracing::debug;

/// Longest input forwarded to the model, in characters
pub const MAX_INPUT_CHARS: usize = 2000;

/// Why an input was rejected
///
/// The display strings are deliberately generic: the response never reveals
/// which rule matched, so an attacker cannot probe the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    EmptyInput,
    InjectionDetected,
}

impl std::fmt::Display for BlockReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "empty input"),
            Self::InjectionDetected => write!(f, "message failed security screening"),
        }
    }
}

/// Outcome of a sanitization pass
#[derive(Debug, Clone)]
pub struct SanitizeResult {
    /// Trimmed, truncated, and (on the clean path) tag-stripped text
    pub sanitized_text: String,
    /// Whether the input must not reach the model
    pub blocked: bool,
    /// Reason for the block, if any
    pub reason: Option<BlockReason>,
}

impl SanitizeResult {
    fn clean(sanitized_text: String) -> Self {
        Self {
            sanitized_text,
            blocked: false,
            reason: None,
        }
    }

    fn blocked(sanitized_text: String, reason: BlockReason) -> Self {
        Self {
            sanitized_text,
            blocked: true,
            reason: Some(reason),
        }
    }
}

/// Validates and normalizes raw chat input before it reaches the model
#[derive(Debug, Default)]
pub struct InputSanitizer;

impl InputSanitizer {
    pub fn new() -> Self {
        Self
    }

    /// Run the full pipeline: empty check, trim, truncate, injection rules,
    /// then tag stripping and whitespace collapsing.
    ///
    /// Truncation happens before rule matching, so content past
    /// [`MAX_INPUT_CHARS`] can neither trigger nor smuggle past a rule.
    pub fn sanitize(&self, raw: &str) -> SanitizeResult {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return SanitizeResult::blocked(String::new(), BlockReason::EmptyInput);
        }

        let text: String = if trimmed.chars().count() > MAX_INPUT_CHARS {
            trimmed.chars().take(MAX_INPUT_CHARS).collect()
        } else {
            trimmed.to_string()
        };

        for rule in INJECTION_RULES.iter() {
            if rule.pattern.is_match(&text) {
                debug!(
                    rule = rule.name,
                    category = ?rule.category,
                    severity = ?rule.severity,
                    "Injection rule matched"
                );
                return SanitizeResult::blocked(text, BlockReason::InjectionDetected);
            }
        }

        let stripped = TAG_PATTERN.replace_all(&text, "");
        let collapsed = WHITESPACE_RUN_PATTERN.replace_all(&stripped, "  ");

        SanitizeResult::clean(collapsed.into_owned())
    }
}
