//! Password strength.

use super::text::utf16_len;
use super::{RuleCheck, RuleInput, RuleName, ValidationRule};
use crate::ruleset::RuleValue;

/// Characters that count as symbols for [`SecurityLevel::VeryHigh`].
pub const SYMBOLS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?`~";

/// Required password strength, weakest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum SecurityLevel {
    /// At least 6 characters.
    Low,
    /// At least 6 characters with lower and upper case letters.
    #[default]
    Medium,
    /// At least 8 characters with lower and upper case letters and a digit.
    High,
    /// Like `High`, plus a symbol.
    VeryHigh,
}

impl SecurityLevel {
    /// Read the `security` parameter. Anything unrecognised means `medium`.
    pub fn from_param(value: &RuleValue) -> Self {
        match value {
            RuleValue::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
                "low" => SecurityLevel::Low,
                "high" => SecurityLevel::High,
                "very-high" | "veryhigh" | "very_high" => SecurityLevel::VeryHigh,
                _ => SecurityLevel::Medium,
            },
            _ => SecurityLevel::Medium,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SecurityLevel::Low => "low",
            SecurityLevel::Medium => "medium",
            SecurityLevel::High => "high",
            SecurityLevel::VeryHigh => "very-high",
        }
    }

    pub fn min_length(&self) -> usize {
        match self {
            SecurityLevel::Low | SecurityLevel::Medium => 6,
            SecurityLevel::High | SecurityLevel::VeryHigh => 8,
        }
    }

    pub fn accepts(&self, password: &str) -> bool {
        if utf16_len(password) < self.min_length() {
            return false;
        }
        let has = |pred: fn(&char) -> bool| password.chars().any(|c| pred(&c));
        let cased = has(char::is_ascii_lowercase) && has(char::is_ascii_uppercase);
        match self {
            SecurityLevel::Low => true,
            SecurityLevel::Medium => cased,
            SecurityLevel::High => cased && has(char::is_ascii_digit),
            SecurityLevel::VeryHigh => {
                cased && has(char::is_ascii_digit) && password.chars().any(|c| SYMBOLS.contains(c))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SecurityRule(pub SecurityLevel);

impl ValidationRule for SecurityRule {
    fn rule_name(&self) -> RuleName {
        RuleName::Security
    }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        RuleCheck::from_bool(self.0.accepts(input.value))
    }

    fn message_data(&self) -> Vec<String> {
        vec![self.0.min_length().to_string(), self.0.as_str().to_string()]
    }
}
