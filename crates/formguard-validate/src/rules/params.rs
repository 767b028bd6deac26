//! Typed views of raw rule parameters.

use super::RuleName;
use crate::error::ParamError;
use crate::ruleset::RuleValue;

/// A non-negative whole number, as used by length, age and check bounds.
pub(crate) fn count(rule: RuleName, value: &RuleValue) -> Result<usize, ParamError> {
    let number = number(rule, value)
        .map_err(|_| ParamError::invalid(rule, "a non-negative whole number", value.as_text()))?;
    if number < 0.0 || number.fract() != 0.0 || number > usize::MAX as f64 {
        return Err(ParamError::invalid(
            rule,
            "a non-negative whole number",
            value.as_text(),
        ));
    }
    Ok(number as usize)
}

/// A finite number.
pub(crate) fn number(rule: RuleName, value: &RuleValue) -> Result<f64, ParamError> {
    let parsed = match value {
        RuleValue::Number(number) => Some(*number),
        RuleValue::Text(text) => text.trim().parse::<f64>().ok(),
        RuleValue::List(items) if items.len() == 1 => items[0].trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|number| number.is_finite())
        .ok_or_else(|| ParamError::invalid(rule, "a number", value.as_text()))
}

/// Two bounds written `"min|max"` or as a two-element list.
pub(crate) fn pair<T>(
    rule: RuleName,
    value: &RuleValue,
    parse: fn(RuleName, &RuleValue) -> Result<T, ParamError>,
) -> Result<(T, T), ParamError> {
    let items = match value {
        RuleValue::List(items) => items.clone(),
        RuleValue::Text(text) => text.split('|').map(str::to_string).collect(),
        _ => Vec::new(),
    };
    match items.as_slice() {
        [min, max] => {
            let min = parse(rule, &RuleValue::Text(min.clone()));
            let max = parse(rule, &RuleValue::Text(max.clone()));
            match (min, max) {
                (Ok(min), Ok(max)) => Ok((min, max)),
                _ => Err(ParamError::invalid(rule, "two bounds `min|max`", value.as_text())),
            }
        }
        _ => Err(ParamError::invalid(rule, "two bounds `min|max`", value.as_text())),
    }
}

/// Non-empty text. Bare flags carry no text and are rejected.
pub(crate) fn text(rule: RuleName, value: &RuleValue) -> Result<String, ParamError> {
    match value {
        RuleValue::Flag(_) => Err(ParamError::invalid(rule, "text", value.as_text())),
        other => {
            let text = other.as_text();
            if text.is_empty() {
                Err(ParamError::invalid(rule, "text", text))
            } else {
                Ok(text)
            }
        }
    }
}
