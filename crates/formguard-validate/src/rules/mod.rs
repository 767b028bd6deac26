//! Validation rules.
//!
//! Every rule name maps to one [`ValidationRule`] implementation. A
//! [`RulePlan`] turns a field's raw parameters into typed rules, in the fixed
//! order of [`RuleName::ORDER`], once per validation run.

mod date;
mod files;
mod group;
mod name;
mod numeric;
mod params;
mod phone;
mod security;
mod text;

pub use date::{age_on, parse_date, DateFormat, DatePreviousRule, DateRule, MaxAgeRule, MinAgeRule, ParsedDate};
pub use files::AllowedRule;
pub use group::{EqualToRule, MaxCheckRule, MinCheckRule};
pub use name::RuleName;
pub use numeric::{parse_float, IsNumberRule, MaxRule, MinRule, RangeRule};
pub use phone::{strip_phone, Country, PhoneCountryRule, PhoneNumberRule};
pub use security::{SecurityLevel, SecurityRule, SYMBOLS};
pub use text::{
    utf16_len, DomainsRule, EmailRule, MaxLengthRule, MinLengthRule, NoSpacesMode, NoSpacesRule,
    PatternRule, RangeLengthRule, RequiredRule, UrlRule,
};

use crate::error::ParamError;
use crate::field::{FieldAdapter, FieldKind};
use crate::form::FormContext;
use crate::ruleset::{RuleSet, RuleValue};
use chrono::NaiveDateTime;
use std::fmt::Debug;

/// What a rule knows about the field it is checking.
///
/// Captured once per field so rules never touch the adapter directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldInfo {
    pub name: String,
    pub kind: FieldKind,
    pub checked: bool,
    pub checkgroup: Option<String>,
    pub files: Option<Vec<String>>,
}

impl FieldInfo {
    pub fn capture<F: FieldAdapter + ?Sized>(field: &F) -> Self {
        Self {
            name: field.name().to_string(),
            kind: field.kind(),
            checked: field.is_checked(),
            checkgroup: field.checkgroup().map(str::to_string),
            files: field.files(),
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// The checkgroup, or the field name when none is set.
    pub fn group(&self) -> &str {
        self.checkgroup.as_deref().unwrap_or(&self.name)
    }
}

/// Input to a single rule check.
#[derive(Clone, Copy)]
pub struct RuleInput<'a> {
    /// The field value as it stands, including earlier normalizations.
    pub value: &'a str,
    pub field: &'a FieldInfo,
    pub form: &'a dyn FormContext,
    /// The engine clock at the start of the run.
    pub now: NaiveDateTime,
}

impl<'a> RuleInput<'a> {
    pub fn new(
        value: &'a str,
        field: &'a FieldInfo,
        form: &'a dyn FormContext,
        now: NaiveDateTime,
    ) -> Self {
        Self {
            value,
            field,
            form,
            now,
        }
    }
}

/// Result of a single rule check.
///
/// A passing check may carry a normalized value, which the engine writes
/// back to the field before the next rule runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleCheck {
    pub passed: bool,
    pub normalized: Option<String>,
}

impl RuleCheck {
    pub fn pass() -> Self {
        Self {
            passed: true,
            normalized: None,
        }
    }

    pub fn fail() -> Self {
        Self {
            passed: false,
            normalized: None,
        }
    }

    pub fn from_bool(passed: bool) -> Self {
        if passed {
            Self::pass()
        } else {
            Self::fail()
        }
    }

    /// A pass that replaces the field value.
    pub fn normalized(value: impl Into<String>) -> Self {
        Self {
            passed: true,
            normalized: Some(value.into()),
        }
    }
}

/// A single named constraint.
///
/// Rules are pure: they read the [`RuleInput`] and report a [`RuleCheck`].
///
/// ```rust
/// use formguard_validate::rules::{FieldInfo, RuleCheck, RuleInput, RuleName, ValidationRule};
/// use formguard_validate::FormSnapshot;
///
/// #[derive(Debug)]
/// struct Uppercase;
///
/// impl ValidationRule for Uppercase {
///     fn rule_name(&self) -> RuleName {
///         RuleName::Pattern
///     }
///
///     fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
///         RuleCheck::normalized(input.value.to_uppercase())
///     }
/// }
///
/// let field = FieldInfo::text("code");
/// let form = FormSnapshot::new();
/// let now = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let check = Uppercase.check(&RuleInput::new("ab", &field, &form, now));
/// assert_eq!(check.normalized.as_deref(), Some("AB"));
/// ```
pub trait ValidationRule: Debug + Send + Sync {
    fn rule_name(&self) -> RuleName;

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck;

    /// Values substituted into `{data0}`, `{data1}`, ... of the message.
    fn message_data(&self) -> Vec<String> {
        Vec::new()
    }
}

/// One entry of a [`RulePlan`].
#[derive(Debug)]
pub struct PlannedRule {
    pub name: RuleName,
    /// The typed rule, or why its parameter was rejected.
    pub rule: Result<Box<dyn ValidationRule>, ParamError>,
}

/// The typed rules of one field, in evaluation order.
#[derive(Debug, Default)]
pub struct RulePlan {
    rules: Vec<PlannedRule>,
}

impl RulePlan {
    /// Resolve the rules configured on a field adapter.
    pub fn resolve<F: FieldAdapter + ?Sized>(field: &F) -> Self {
        Self::build(|rule| field.rule_parameter(rule))
    }

    /// Resolve the rules of a rule set.
    pub fn from_rule_set(rules: &RuleSet) -> Self {
        Self::build(|rule| rules.get(rule).cloned())
    }

    fn build(lookup: impl Fn(RuleName) -> Option<RuleValue>) -> Self {
        let enabled = |rule: RuleName| lookup(rule).filter(RuleValue::is_enabled);

        let rules = RuleName::ORDER
            .iter()
            .copied()
            .filter(|rule| rule.parent().map_or(true, |parent| enabled(parent).is_some()))
            .filter_map(|name| {
                let value = enabled(name)?;
                let rule = compile(name, &value, &enabled);
                Some(PlannedRule { name, rule })
            })
            .collect();

        Self { rules }
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlannedRule> {
        self.rules.iter()
    }

    /// Rule names in evaluation order.
    pub fn names(&self) -> Vec<RuleName> {
        self.rules.iter().map(|planned| planned.name).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }
}

/// Build the typed rule for `name` from its raw parameter.
///
/// `lookup` gives access to sibling parameters: the date rules reuse the
/// `isdate` format.
fn compile(
    name: RuleName,
    value: &RuleValue,
    lookup: &dyn Fn(RuleName) -> Option<RuleValue>,
) -> Result<Box<dyn ValidationRule>, ParamError> {
    let date_format = || match lookup(RuleName::IsDate) {
        Some(format) => DateFormat::from_param(&format),
        None => Ok(DateFormat::default()),
    };

    let rule: Box<dyn ValidationRule> = match name {
        RuleName::Required => Box::new(RequiredRule),
        RuleName::IsEmail => Box::new(EmailRule),
        RuleName::IsUrl => Box::new(UrlRule),
        RuleName::NoSpaces => Box::new(NoSpacesRule::from_param(value)),
        RuleName::MinLength => Box::new(MinLengthRule(params::count(name, value)?)),
        RuleName::MaxLength => Box::new(MaxLengthRule(params::count(name, value)?)),
        RuleName::RangeLength => {
            let (min, max) = params::pair(name, value, params::count)?;
            Box::new(RangeLengthRule { min, max })
        }
        RuleName::IsNumber => Box::new(IsNumberRule),
        RuleName::Min => Box::new(MinRule(params::number(name, value)?)),
        RuleName::Max => Box::new(MaxRule(params::number(name, value)?)),
        RuleName::Range => {
            let (min, max) = params::pair(name, value, params::number)?;
            Box::new(RangeRule { min, max })
        }
        RuleName::Domains => Box::new(DomainsRule::from_param(value)?),
        RuleName::IsDate => Box::new(DateRule(DateFormat::from_param(value)?)),
        RuleName::DatePrevious => Box::new(DatePreviousRule(date_format()?)),
        RuleName::MinAge => Box::new(MinAgeRule {
            min: params::count(name, value)?,
            format: date_format()?,
        }),
        RuleName::MaxAge => Box::new(MaxAgeRule {
            max: params::count(name, value)?,
            format: date_format()?,
        }),
        RuleName::Security => Box::new(SecurityRule(SecurityLevel::from_param(value))),
        RuleName::EqualTo => Box::new(EqualToRule(params::text(name, value)?)),
        RuleName::PhoneNumber => Box::new(PhoneNumberRule),
        RuleName::PhoneCountry => Box::new(PhoneCountryRule::from_param(value)?),
        RuleName::Pattern => Box::new(PatternRule::new(params::text(name, value)?)),
        RuleName::Allowed => Box::new(AllowedRule::from_param(value)?),
        RuleName::MinCheck => Box::new(MinCheckRule(params::count(name, value)?)),
        RuleName::MaxCheck => Box::new(MaxCheckRule(params::count(name, value)?)),
    };
    Ok(rule)
}
