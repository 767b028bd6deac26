//! Phone number rules.

use super::{RuleCheck, RuleInput, RuleName, ValidationRule};
use crate::error::ParamError;
use crate::ruleset::RuleValue;
use regex::{Captures, Regex};
use std::fmt;
use std::sync::OnceLock;

static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();

fn phone_regex() -> &'static Regex {
    PHONE_REGEX.get_or_init(|| {
        Regex::new(r"^(?:(?:\+|00)[0-9]{1,3})?(?:\([0-9]{1,4}\))?[0-9]{7,11}$").unwrap()
    })
}

/// Remove the separators people type inside phone numbers.
pub fn strip_phone(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '.' | '/'))
        .collect()
}

/// Loose international phone number check. Empty values pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhoneNumberRule;

impl ValidationRule for PhoneNumberRule {
    fn rule_name(&self) -> RuleName {
        RuleName::PhoneNumber
    }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        if input.value.is_empty() {
            return RuleCheck::pass();
        }
        let stripped = strip_phone(input.value);
        let digits = stripped.chars().filter(char::is_ascii_digit).count();
        RuleCheck::from_bool(digits >= 8 && phone_regex().is_match(&stripped))
    }
}

/// A country with a known phone numbering plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Country {
    Es,
    Pt,
    Fr,
    It,
    Uk,
    Us,
}

static ES_REGEX: OnceLock<Regex> = OnceLock::new();
static PT_REGEX: OnceLock<Regex> = OnceLock::new();
static FR_REGEX: OnceLock<Regex> = OnceLock::new();
static IT_REGEX: OnceLock<Regex> = OnceLock::new();
static UK_REGEX: OnceLock<Regex> = OnceLock::new();
static US_REGEX: OnceLock<Regex> = OnceLock::new();

impl Country {
    /// Look up a country by its two-letter code. `gb` is read as `uk`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "es" => Some(Country::Es),
            "pt" => Some(Country::Pt),
            "fr" => Some(Country::Fr),
            "it" => Some(Country::It),
            "uk" | "gb" => Some(Country::Uk),
            "us" => Some(Country::Us),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Country::Es => "es",
            Country::Pt => "pt",
            Country::Fr => "fr",
            Country::It => "it",
            Country::Uk => "uk",
            Country::Us => "us",
        }
    }

    fn regex(&self) -> &'static Regex {
        let (cell, pattern) = match self {
            Country::Es => (&ES_REGEX, r"^(?P<intl>\+34|0034)?(?P<national>[6789][0-9]{8})$"),
            Country::Pt => (&PT_REGEX, r"^(?P<intl>\+351|00351)?(?P<national>[29][0-9]{8})$"),
            Country::Fr => (&FR_REGEX, r"^(?:(?P<intl>\+33|0033)|0)(?P<national>[1-9][0-9]{8})$"),
            Country::It => (&IT_REGEX, r"^(?P<intl>\+39|0039)?(?P<national>3[0-9]{8,9}|0[0-9]{5,10})$"),
            Country::Uk => (&UK_REGEX, r"^(?:(?P<intl>\+44|0044)|0)(?P<national>[1-9][0-9]{9})$"),
            Country::Us => (&US_REGEX, r"^(?P<intl>\+1|001)?(?P<national>[2-9][0-9]{2}[2-9][0-9]{6})$"),
        };
        cell.get_or_init(|| Regex::new(pattern).unwrap())
    }

    /// Reformat `number` (already stripped) in this country's grouping, or
    /// `None` if it is not a number of this country.
    ///
    /// ```rust
    /// use formguard_validate::rules::Country;
    ///
    /// assert_eq!(Country::Es.format("912345678").as_deref(), Some("912 34 56 78"));
    /// assert_eq!(Country::Us.format("+12025550123").as_deref(), Some("+1 (202) 555-0123"));
    /// assert_eq!(Country::Fr.format("612345678"), None);
    /// ```
    pub fn format(&self, number: &str) -> Option<String> {
        let captures = self.regex().captures(number)?;
        Some(self.format_captures(&captures))
    }

    fn format_captures(&self, captures: &Captures<'_>) -> String {
        let intl = captures.name("intl").is_some();
        let national = captures.name("national").map_or("", |m| m.as_str());
        let prefixed = |code: &str, grouped: String| {
            if intl {
                format!("+{code} {grouped}")
            } else {
                grouped
            }
        };

        match self {
            Country::Es => {
                let sizes: &[usize] = if national.starts_with('9') {
                    &[3, 2, 2]
                } else {
                    &[3, 3]
                };
                prefixed("34", group_digits(national, sizes))
            }
            Country::Pt => prefixed("351", group_digits(national, &[3, 3])),
            Country::Fr => {
                let grouped = group_digits(national, &[1, 2, 2, 2]);
                if intl {
                    format!("+33 {grouped}")
                } else {
                    format!("0{grouped}")
                }
            }
            Country::It => {
                let sizes: &[usize] = if national.starts_with('3') { &[3, 3] } else { &[2] };
                prefixed("39", group_digits(national, sizes))
            }
            Country::Uk => {
                let grouped = group_digits(national, &[4]);
                if intl {
                    format!("+44 {grouped}")
                } else {
                    format!("0{grouped}")
                }
            }
            Country::Us => {
                let (area, rest) = split_chars(national, 3);
                let (exchange, line) = split_chars(rest, 3);
                prefixed("1", format!("({area}) {exchange}-{line}"))
            }
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Split `digits` into space separated groups of the given sizes. Whatever
/// is left over forms the last group.
fn group_digits(digits: &str, sizes: &[usize]) -> String {
    let mut groups = Vec::with_capacity(sizes.len() + 1);
    let mut rest = digits;
    for &size in sizes {
        if rest.chars().count() <= size {
            break;
        }
        let (head, tail) = split_chars(rest, size);
        groups.push(head);
        rest = tail;
    }
    groups.push(rest);
    groups.join(" ")
}

/// Split after the first `count` characters, or at the end if shorter.
fn split_chars(text: &str, count: usize) -> (&str, &str) {
    let at = text.char_indices().nth(count).map_or(text.len(), |(index, _)| index);
    text.split_at(at)
}

/// The number must belong to one of the listed countries. On success the
/// value is rewritten in that country's grouping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneCountryRule(pub Vec<Country>);

impl PhoneCountryRule {
    /// Read a list of country codes. Unknown codes are skipped.
    pub fn from_param(value: &RuleValue) -> Result<Self, ParamError> {
        let mut countries = Vec::new();
        for code in value.as_list() {
            match Country::from_code(&code) {
                Some(country) if !countries.contains(&country) => countries.push(country),
                Some(_) => {}
                None => tracing::warn!(%code, "ignoring unsupported phone country"),
            }
        }
        if countries.is_empty() {
            return Err(ParamError::invalid(
                RuleName::PhoneCountry,
                "at least one of `es`, `pt`, `fr`, `it`, `uk`, `us`",
                value.as_text(),
            ));
        }
        Ok(Self(countries))
    }
}

impl ValidationRule for PhoneCountryRule {
    fn rule_name(&self) -> RuleName {
        RuleName::PhoneCountry
    }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        if input.value.is_empty() {
            return RuleCheck::pass();
        }
        let stripped: String = strip_phone(input.value)
            .chars()
            .filter(|c| !matches!(c, '(' | ')'))
            .collect();
        self.0
            .iter()
            .find_map(|country| country.format(&stripped))
            .map_or_else(RuleCheck::fail, RuleCheck::normalized)
    }

    fn message_data(&self) -> Vec<String> {
        let codes: Vec<String> = self
            .0
            .iter()
            .map(|country| country.code().to_ascii_uppercase())
            .collect();
        vec![codes.join(", ")]
    }
}
