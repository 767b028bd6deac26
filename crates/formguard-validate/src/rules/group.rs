//! Rules that look at other controls of the form.

use super::{RuleCheck, RuleInput, RuleName, ValidationRule};

/// The value must equal the current value of another field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EqualToRule(pub String);

impl ValidationRule for EqualToRule {
    fn rule_name(&self) -> RuleName {
        RuleName::EqualTo
    }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        let other = input.form.value_of(&self.0);
        RuleCheck::from_bool(other.as_deref() == Some(input.value))
    }

    fn message_data(&self) -> Vec<String> {
        vec![self.0.clone()]
    }
}

/// At least this many controls of the field's checkgroup must be checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinCheckRule(pub usize);

impl ValidationRule for MinCheckRule {
    fn rule_name(&self) -> RuleName {
        RuleName::MinCheck
    }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        RuleCheck::from_bool(input.form.count_checked(input.field.group()) >= self.0)
    }

    fn message_data(&self) -> Vec<String> {
        vec![self.0.to_string()]
    }
}

/// At most this many controls of the field's checkgroup may be checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxCheckRule(pub usize);

impl ValidationRule for MaxCheckRule {
    fn rule_name(&self) -> RuleName {
        RuleName::MaxCheck
    }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        RuleCheck::from_bool(input.form.count_checked(input.field.group()) <= self.0)
    }

    fn message_data(&self) -> Vec<String> {
        vec![self.0.to_string()]
    }
}
