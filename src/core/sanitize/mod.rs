//! Prompt-injection screening for advisor chat input
//!
//! Validation and normalization run in a fixed order: empty check, trim,
//! truncation, injection rules, then tag stripping and whitespace collapsing
//! on the clean path. The rule list is explicit and ordered; the first match
//! wins. Pure, deterministic, no I/O.

mod rules;
mod sanitizer;

#[cfg(test)]
mod tests;

pub use rules::{InjectionRule, RuleCategory, RuleSeverity};
pub use sanitizer::{BlockReason, InputSanitizer, SanitizeResult, MAX_INPUT_CHARS};
