//! Numeric rules.

use super::{RuleCheck, RuleInput, RuleName, ValidationRule};

/// Parse the longest numeric prefix of `value`, the way browsers read
/// numbers out of form inputs.
///
/// Leading whitespace is skipped, trailing garbage ignored. Returns NaN when
/// no number can be read.
///
/// ```rust
/// use formguard_validate::rules::parse_float;
///
/// assert_eq!(parse_float("  12.5kg"), 12.5);
/// assert_eq!(parse_float("-3e2x"), -300.0);
/// assert!(parse_float("kg12").is_nan());
/// ```
pub fn parse_float(value: &str) -> f64 {
    let s = value.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let digits_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut mantissa_digits = end - digits_start;
    if bytes.get(end) == Some(&b'.') {
        let fraction_start = end + 1;
        let mut cursor = fraction_start;
        while bytes.get(cursor).is_some_and(u8::is_ascii_digit) {
            cursor += 1;
        }
        mantissa_digits += cursor - fraction_start;
        if mantissa_digits > 0 {
            end = cursor;
        }
    }
    if mantissa_digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut cursor = end + 1;
        if matches!(bytes.get(cursor), Some(b'+' | b'-')) {
            cursor += 1;
        }
        let exponent_start = cursor;
        while bytes.get(cursor).is_some_and(u8::is_ascii_digit) {
            cursor += 1;
        }
        if cursor > exponent_start {
            end = cursor;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

fn format_bound(bound: f64) -> String {
    bound.to_string()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IsNumberRule;

impl ValidationRule for IsNumberRule {
    fn rule_name(&self) -> RuleName {
        RuleName::IsNumber
    }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        RuleCheck::from_bool(!parse_float(input.value).is_nan())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinRule(pub f64);

impl ValidationRule for MinRule {
    fn rule_name(&self) -> RuleName {
        RuleName::Min
    }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        RuleCheck::from_bool(parse_float(input.value) >= self.0)
    }

    fn message_data(&self) -> Vec<String> {
        vec![format_bound(self.0)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaxRule(pub f64);

impl ValidationRule for MaxRule {
    fn rule_name(&self) -> RuleName {
        RuleName::Max
    }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        RuleCheck::from_bool(parse_float(input.value) <= self.0)
    }

    fn message_data(&self) -> Vec<String> {
        vec![format_bound(self.0)]
    }
}

/// Inclusive numeric bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeRule {
    pub min: f64,
    pub max: f64,
}

impl ValidationRule for RangeRule {
    fn rule_name(&self) -> RuleName {
        RuleName::Range
    }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        let number = parse_float(input.value);
        RuleCheck::from_bool(number >= self.min && number <= self.max)
    }

    fn message_data(&self) -> Vec<String> {
        vec![format_bound(self.min), format_bound(self.max)]
    }
}
