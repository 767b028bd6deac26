//! Validation results and their JSON error format.

use crate::rules::RuleName;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The field a failure is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRef {
    pub name: String,
    /// Position in the validated form, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

impl FieldRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            index: None,
        }
    }

    pub fn at(name: impl Into<String>, index: usize) -> Self {
        Self {
            name: name.into(),
            index: Some(index),
        }
    }
}

/// Result of validating one field.
///
/// A failure is data, not an error: `error` is set, `message` holds the
/// resolved text and `rule` names the first rule that failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub error: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<RuleName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<FieldRef>,
}

impl ValidationOutcome {
    pub fn success() -> Self {
        Self {
            error: false,
            message: String::new(),
            rule: None,
            field: None,
        }
    }

    pub fn failure(field: FieldRef, rule: RuleName, message: impl Into<String>) -> Self {
        Self {
            error: true,
            message: message.into(),
            rule: Some(rule),
            field: Some(field),
        }
    }

    pub fn is_success(&self) -> bool {
        !self.error
    }

    /// `Ok(())` on success, the outcome itself as the error otherwise.
    pub fn into_result(self) -> Result<(), Self> {
        if self.error {
            Err(self)
        } else {
            Ok(())
        }
    }
}

impl fmt::Display for ValidationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.error, self.rule) {
            (false, _) => write!(f, "valid"),
            (true, Some(rule)) => write!(f, "[{}] {}", rule, self.message),
            (true, None) => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ValidationOutcome {}

/// Result of validating a whole form.
///
/// The run stops at the first failing field, so at most one failure is
/// reported. `validated` counts the fields evaluated, including the failing
/// one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormValidationOutcome {
    pub error: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<RuleName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<FieldRef>,
    /// Every field name of the form, in registration order.
    pub fields: Vec<String>,
    pub validated: usize,
}

impl FormValidationOutcome {
    pub(crate) fn from_field(outcome: ValidationOutcome, fields: Vec<String>, validated: usize) -> Self {
        Self {
            error: outcome.error,
            message: outcome.message,
            rule: outcome.rule,
            field: outcome.field,
            fields,
            validated,
        }
    }

    pub fn is_success(&self) -> bool {
        !self.error
    }

    /// The failure as a single-field outcome.
    pub fn outcome(&self) -> ValidationOutcome {
        ValidationOutcome {
            error: self.error,
            message: self.message.clone(),
            rule: self.rule,
            field: self.field.clone(),
        }
    }

    /// The failure in the JSON error format, or `None` on success.
    pub fn to_api_error(&self) -> Option<ApiValidationError> {
        if !self.error {
            return None;
        }
        let field = self.field.as_ref().map_or("", |field| field.name.as_str());
        let code = self.rule.map_or("", |rule| rule.as_str());
        Some(ApiValidationError::field(field, code, self.message.clone()))
    }
}

impl fmt::Display for FormValidationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) if self.error => write!(f, "{}: {}", field.name, self.outcome()),
            _ => write!(f, "{}", self.outcome()),
        }
    }
}

/// A single field failure in the JSON error format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    /// The rule name, e.g. `"required"` or `"isemail"`.
    pub code: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorBody {
    #[serde(rename = "type")]
    error_type: String,
    message: String,
    fields: Vec<FieldError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

/// Validation failure in the error format used by HTTP APIs:
///
/// ```json
/// {
///   "error": {
///     "type": "validation_error",
///     "message": "Validation failed",
///     "fields": [{"field": "email", "code": "isemail", "message": "..."}]
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiValidationError {
    pub fields: Vec<FieldError>,
    pub message: String,
}

impl ApiValidationError {
    pub fn new(fields: Vec<FieldError>) -> Self {
        Self {
            fields,
            message: "Validation failed".to_string(),
        }
    }

    pub fn field(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(vec![FieldError::new(field, code, message)])
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl Serialize for ApiValidationError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        ErrorWrapper {
            error: ErrorBody {
                error_type: "validation_error".to_string(),
                message: self.message.clone(),
                fields: self.fields.clone(),
            },
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ApiValidationError {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let wrapper = ErrorWrapper::deserialize(deserializer)?;
        Ok(Self {
            fields: wrapper.error.fields,
            message: wrapper.error.message,
        })
    }
}

impl fmt::Display for ApiValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.message)?;
        let details: Vec<String> = self
            .fields
            .iter()
            .map(|field| format!("{} ({})", field.field, field.message))
            .collect();
        write!(f, "{}", details.join(", "))
    }
}

impl std::error::Error for ApiValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_has_no_rule() {
        let outcome = ValidationOutcome::success();
        assert!(outcome.is_success());
        assert_eq!(outcome.rule, None);
        assert!(outcome.into_result().is_ok());
    }

    #[test]
    fn failure_display() {
        let outcome = ValidationOutcome::failure(FieldRef::new("email"), RuleName::IsEmail, "Bad email");
        assert_eq!(outcome.to_string(), "[isemail] Bad email");
        assert!(outcome.into_result().is_err());
    }

    #[test]
    fn api_error_json_shape() {
        let outcome = FormValidationOutcome::from_field(
            ValidationOutcome::failure(FieldRef::at("email", 1), RuleName::Required, "Required"),
            vec!["name".to_string(), "email".to_string()],
            2,
        );
        let json = outcome.to_api_error().unwrap().to_json();
        assert_eq!(json["error"]["type"], "validation_error");
        assert_eq!(json["error"]["message"], "Validation failed");
        assert_eq!(json["error"]["fields"][0]["field"], "email");
        assert_eq!(json["error"]["fields"][0]["code"], "required");
        assert_eq!(json["error"]["fields"][0]["message"], "Required");
    }

    #[test]
    fn api_error_deserializes() {
        let json = r#"{"error": {"type": "validation_error", "message": "Validation failed", "fields": [{"field": "a", "code": "min", "message": "too small"}]}}"#;
        let error: ApiValidationError = serde_json::from_str(json).unwrap();
        assert_eq!(error.fields[0].code, "min");
        assert_eq!(error.to_string(), "Validation failed: a (too small)");
    }

    #[test]
    fn successful_form_has_no_api_error() {
        let outcome = FormValidationOutcome::from_field(ValidationOutcome::success(), vec![], 0);
        assert!(outcome.to_api_error().is_none());
    }

    #[test]
    fn outcome_serializes_rule_name() {
        let outcome = ValidationOutcome::failure(FieldRef::new("age"), RuleName::MinAge, "Too young");
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["rule"], "minage");
        assert_eq!(json["field"]["name"], "age");
    }
}
