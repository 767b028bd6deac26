//! Raw rule parameters as a field carries them.

use crate::rules::RuleName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A rule parameter in the shape the field exposes it.
///
/// Mirrors attribute-style configuration: a bare flag (`required`), a number
/// (`minlength=3`), a string (`rangelength="3|10"`, `isdate="dd-mm-aaaa"`) or
/// a list (`phonecountry=["es", "pt"]`). Typed parameters are derived from
/// these when a rule plan is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleValue {
    Flag(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl RuleValue {
    /// Whether the value switches the rule on.
    ///
    /// `false` (as a flag or as the text `"false"`) means the rule is not
    /// applied; anything else, including an empty attribute, enables it.
    pub fn is_enabled(&self) -> bool {
        match self {
            RuleValue::Flag(enabled) => *enabled,
            RuleValue::Text(text) => !text.trim().eq_ignore_ascii_case("false"),
            RuleValue::Number(_) | RuleValue::List(_) => true,
        }
    }

    /// The value as attribute text. Lists are joined with `|`.
    pub fn as_text(&self) -> String {
        match self {
            RuleValue::Flag(flag) => flag.to_string(),
            RuleValue::Number(number) => number.to_string(),
            RuleValue::Text(text) => text.clone(),
            RuleValue::List(items) => items.join("|"),
        }
    }

    /// The value as a list of non-empty, trimmed items.
    ///
    /// Text is split on `|` and `,`.
    pub fn as_list(&self) -> Vec<String> {
        let items: Vec<String> = match self {
            RuleValue::List(items) => items.clone(),
            RuleValue::Text(text) => text.split(['|', ',']).map(str::to_string).collect(),
            other => vec![other.as_text()],
        };
        items
            .into_iter()
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect()
    }
}

impl From<bool> for RuleValue {
    fn from(value: bool) -> Self {
        RuleValue::Flag(value)
    }
}

impl From<f64> for RuleValue {
    fn from(value: f64) -> Self {
        RuleValue::Number(value)
    }
}

impl From<i32> for RuleValue {
    fn from(value: i32) -> Self {
        RuleValue::Number(f64::from(value))
    }
}

impl From<u32> for RuleValue {
    fn from(value: u32) -> Self {
        RuleValue::Number(f64::from(value))
    }
}

impl From<&str> for RuleValue {
    fn from(value: &str) -> Self {
        RuleValue::Text(value.to_string())
    }
}

impl From<String> for RuleValue {
    fn from(value: String) -> Self {
        RuleValue::Text(value)
    }
}

impl From<Vec<String>> for RuleValue {
    fn from(value: Vec<String>) -> Self {
        RuleValue::List(value)
    }
}

impl From<Vec<&str>> for RuleValue {
    fn from(value: Vec<&str>) -> Self {
        RuleValue::List(value.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for RuleValue {
    fn from(value: [&str; N]) -> Self {
        RuleValue::List(value.iter().map(|item| item.to_string()).collect())
    }
}

/// The sparse set of rules configured on a field.
///
/// Keys are kept sorted by rule priority, but evaluation order comes from
/// [`RuleName::ORDER`] regardless of how the set was built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: BTreeMap<RuleName, RuleValue>,
}

impl RuleSet {
    /// Create an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule, builder style.
    pub fn with(mut self, rule: RuleName, value: impl Into<RuleValue>) -> Self {
        self.insert(rule, value);
        self
    }

    /// Add or replace a rule.
    pub fn insert(&mut self, rule: RuleName, value: impl Into<RuleValue>) {
        self.rules.insert(rule, value.into());
    }

    /// Remove a rule.
    pub fn remove(&mut self, rule: RuleName) -> Option<RuleValue> {
        self.rules.remove(&rule)
    }

    /// Get the raw parameter of a rule.
    pub fn get(&self, rule: RuleName) -> Option<&RuleValue> {
        self.rules.get(&rule)
    }

    /// Check whether a rule is configured.
    pub fn contains(&self, rule: RuleName) -> bool {
        self.rules.contains_key(&rule)
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RuleName, &RuleValue)> {
        self.rules.iter().map(|(rule, value)| (*rule, value))
    }
}

impl FromIterator<(RuleName, RuleValue)> for RuleSet {
    fn from_iter<I: IntoIterator<Item = (RuleName, RuleValue)>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}
