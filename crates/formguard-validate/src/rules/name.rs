//! Rule names and their fixed evaluation order.

use crate::error::ParamError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Name of a validation rule.
///
/// Variants are declared in evaluation priority order, so the derived `Ord`
/// matches [`RuleName::ORDER`]. Serialized as the lowercase attribute name
/// (`"isemail"`, `"phonecountry"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleName {
    Required,
    IsEmail,
    IsUrl,
    NoSpaces,
    MinLength,
    MaxLength,
    RangeLength,
    IsNumber,
    Min,
    Max,
    Range,
    Domains,
    IsDate,
    DatePrevious,
    MinAge,
    MaxAge,
    Security,
    EqualTo,
    PhoneNumber,
    PhoneCountry,
    Pattern,
    Allowed,
    MinCheck,
    MaxCheck,
}

impl RuleName {
    /// Every rule, in the order the engine evaluates them.
    pub const ORDER: [RuleName; 24] = [
        RuleName::Required,
        RuleName::IsEmail,
        RuleName::IsUrl,
        RuleName::NoSpaces,
        RuleName::MinLength,
        RuleName::MaxLength,
        RuleName::RangeLength,
        RuleName::IsNumber,
        RuleName::Min,
        RuleName::Max,
        RuleName::Range,
        RuleName::Domains,
        RuleName::IsDate,
        RuleName::DatePrevious,
        RuleName::MinAge,
        RuleName::MaxAge,
        RuleName::Security,
        RuleName::EqualTo,
        RuleName::PhoneNumber,
        RuleName::PhoneCountry,
        RuleName::Pattern,
        RuleName::Allowed,
        RuleName::MinCheck,
        RuleName::MaxCheck,
    ];

    /// The attribute name of the rule.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleName::Required => "required",
            RuleName::IsEmail => "isemail",
            RuleName::IsUrl => "isurl",
            RuleName::NoSpaces => "nospaces",
            RuleName::MinLength => "minlength",
            RuleName::MaxLength => "maxlength",
            RuleName::RangeLength => "rangelength",
            RuleName::IsNumber => "isnumber",
            RuleName::Min => "min",
            RuleName::Max => "max",
            RuleName::Range => "range",
            RuleName::Domains => "domains",
            RuleName::IsDate => "isdate",
            RuleName::DatePrevious => "dateprevious",
            RuleName::MinAge => "minage",
            RuleName::MaxAge => "maxage",
            RuleName::Security => "security",
            RuleName::EqualTo => "equalto",
            RuleName::PhoneNumber => "phonenumber",
            RuleName::PhoneCountry => "phonecountry",
            RuleName::Pattern => "pattern",
            RuleName::Allowed => "allowed",
            RuleName::MinCheck => "mincheck",
            RuleName::MaxCheck => "maxcheck",
        }
    }

    /// The rule that must also be configured for this one to run.
    ///
    /// `dateprevious`, `minage` and `maxage` piggyback on `isdate` (they reuse
    /// its date format); `phonecountry` refines `phonenumber`.
    pub fn parent(&self) -> Option<RuleName> {
        match self {
            RuleName::DatePrevious | RuleName::MinAge | RuleName::MaxAge => Some(RuleName::IsDate),
            RuleName::PhoneCountry => Some(RuleName::PhoneNumber),
            _ => None,
        }
    }

    /// Position of the rule in [`RuleName::ORDER`].
    pub fn priority(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleName {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        RuleName::ORDER
            .iter()
            .copied()
            .find(|rule| rule.as_str() == wanted)
            .ok_or_else(|| ParamError::UnknownRule(s.to_string()))
    }
}
