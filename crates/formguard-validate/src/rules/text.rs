//! Presence, format, length and regex rules.

use super::{RuleCheck, RuleInput, RuleName, ValidationRule};
use crate::error::ParamError;
use crate::field::FieldKind;
use crate::ruleset::RuleValue;
use regex::Regex;
use std::sync::OnceLock;

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
static URL_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| {
        // RFC 5322 simplified
        Regex::new(
            r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
        ).unwrap()
    })
}

fn url_regex() -> &'static Regex {
    URL_REGEX.get_or_init(|| Regex::new(r"^(https?|ftp)://[^\s/$.?#].[^\s]*$").unwrap())
}

/// Length in UTF-16 code units, the unit browsers use for `maxlength`.
pub fn utf16_len(value: &str) -> usize {
    value.encode_utf16().count()
}

/// The field must have a value, or be checked for checkable controls.
///
/// A radio passes when any radio with the same name is checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequiredRule;

impl ValidationRule for RequiredRule {
    fn rule_name(&self) -> RuleName {
        RuleName::Required
    }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        let passed = match input.field.kind {
            FieldKind::Text => !input.value.is_empty(),
            FieldKind::Checkbox => input.field.checked,
            FieldKind::Radio => input.field.checked || input.form.any_checked(&input.field.name),
        };
        RuleCheck::from_bool(passed)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmailRule;

impl ValidationRule for EmailRule {
    fn rule_name(&self) -> RuleName {
        RuleName::IsEmail
    }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        RuleCheck::from_bool(email_regex().is_match(input.value))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UrlRule;

impl ValidationRule for UrlRule {
    fn rule_name(&self) -> RuleName {
        RuleName::IsUrl
    }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        RuleCheck::from_bool(url_regex().is_match(input.value))
    }
}

/// How `nospaces` treats whitespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NoSpacesMode {
    /// Whitespace fails the rule.
    #[default]
    Reject,
    /// Whitespace is removed from the value and the rule passes.
    AutoDelete,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoSpacesRule(pub NoSpacesMode);

impl NoSpacesRule {
    /// `"autodel"` strips whitespace; any other parameter rejects it.
    pub fn from_param(value: &RuleValue) -> Self {
        match value {
            RuleValue::Text(text) if text.trim().eq_ignore_ascii_case("autodel") => {
                Self(NoSpacesMode::AutoDelete)
            }
            _ => Self(NoSpacesMode::Reject),
        }
    }
}

impl ValidationRule for NoSpacesRule {
    fn rule_name(&self) -> RuleName {
        RuleName::NoSpaces
    }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        let has_spaces = input.value.chars().any(char::is_whitespace);
        match (self.0, has_spaces) {
            (_, false) => RuleCheck::pass(),
            (NoSpacesMode::Reject, true) => RuleCheck::fail(),
            (NoSpacesMode::AutoDelete, true) => RuleCheck::normalized(
                input
                    .value
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .collect::<String>(),
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinLengthRule(pub usize);

impl ValidationRule for MinLengthRule {
    fn rule_name(&self) -> RuleName {
        RuleName::MinLength
    }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        RuleCheck::from_bool(utf16_len(input.value) >= self.0)
    }

    fn message_data(&self) -> Vec<String> {
        vec![self.0.to_string()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxLengthRule(pub usize);

impl ValidationRule for MaxLengthRule {
    fn rule_name(&self) -> RuleName {
        RuleName::MaxLength
    }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        RuleCheck::from_bool(utf16_len(input.value) <= self.0)
    }

    fn message_data(&self) -> Vec<String> {
        vec![self.0.to_string()]
    }
}

/// Inclusive length bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeLengthRule {
    pub min: usize,
    pub max: usize,
}

impl ValidationRule for RangeLengthRule {
    fn rule_name(&self) -> RuleName {
        RuleName::RangeLength
    }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        let len = utf16_len(input.value);
        RuleCheck::from_bool(len >= self.min && len <= self.max)
    }

    fn message_data(&self) -> Vec<String> {
        vec![self.min.to_string(), self.max.to_string()]
    }
}

/// Caller-supplied regex, searched anywhere in the value.
///
/// The pattern is compiled when the rule is built; a pattern that does not
/// compile makes every check fail.
#[derive(Debug, Clone)]
pub struct PatternRule {
    pub pattern: String,
    compiled: Option<Regex>,
}

impl PatternRule {
    pub fn new(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let compiled = match Regex::new(&pattern) {
            Ok(regex) => Some(regex),
            Err(error) => {
                tracing::warn!(%pattern, %error, "invalid pattern, rule will always fail");
                None
            }
        };
        Self { pattern, compiled }
    }

    pub fn is_valid(&self) -> bool {
        self.compiled.is_some()
    }
}

impl PartialEq for PatternRule {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

impl ValidationRule for PatternRule {
    fn rule_name(&self) -> RuleName {
        RuleName::Pattern
    }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        let passed = self
            .compiled
            .as_ref()
            .is_some_and(|regex| regex.is_match(input.value));
        RuleCheck::from_bool(passed)
    }
}

/// The value must end with one of a set of regex fragments.
///
/// Typically used for e-mail domains: `"gmail\.com|example\.org"`.
#[derive(Debug, Clone)]
pub struct DomainsRule {
    pub fragments: Vec<String>,
    compiled: Vec<Regex>,
}

impl DomainsRule {
    pub fn from_param(value: &RuleValue) -> Result<Self, ParamError> {
        let fragments: Vec<String> = match value {
            RuleValue::Text(text) => text
                .split('|')
                .map(str::trim)
                .filter(|fragment| !fragment.is_empty())
                .map(str::to_string)
                .collect(),
            RuleValue::List(_) => value.as_list(),
            _ => Vec::new(),
        };
        if fragments.is_empty() {
            return Err(ParamError::invalid(
                RuleName::Domains,
                "a `|` separated list of domains",
                value.as_text(),
            ));
        }
        Ok(Self::new(fragments))
    }

    pub fn new(fragments: Vec<String>) -> Self {
        let compiled = fragments
            .iter()
            .filter_map(|fragment| match Regex::new(&format!("(?:{fragment})$")) {
                Ok(regex) => Some(regex),
                Err(error) => {
                    tracing::warn!(%fragment, %error, "ignoring invalid domain fragment");
                    None
                }
            })
            .collect();
        Self {
            fragments,
            compiled,
        }
    }
}

impl PartialEq for DomainsRule {
    fn eq(&self, other: &Self) -> bool {
        self.fragments == other.fragments
    }
}

impl ValidationRule for DomainsRule {
    fn rule_name(&self) -> RuleName {
        RuleName::Domains
    }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        RuleCheck::from_bool(self.compiled.iter().any(|regex| regex.is_match(input.value)))
    }
}
