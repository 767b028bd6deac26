//! Form documents: a form described as JSON.

use crate::engine::ValidationEngine;
use crate::error::SchemaError;
use crate::field::FormField;
use crate::outcome::FormValidationOutcome;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A form as a list of fields, each carrying its value, state and rules.
///
/// ```rust
/// use formguard_validate::{FormDocument, ValidationEngine};
///
/// let mut form = FormDocument::from_json_str(r#"{
///     "fields": [
///         {"name": "user", "value": "a b", "rules": {"nospaces": "autodel", "rangelength": "3|10"}}
///     ]
/// }"#).unwrap();
///
/// let outcome = form.validate(&ValidationEngine::new());
/// assert_eq!(outcome.rule.map(|rule| rule.as_str()), Some("rangelength"));
/// assert_eq!(form.field("user").unwrap().value, "ab");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormDocument {
    pub fields: Vec<FormField>,
}

impl FormDocument {
    pub fn new(fields: Vec<FormField>) -> Self {
        Self { fields }
    }

    /// Parse a document. Unknown rule names are rejected.
    pub fn from_json_str(json: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String, SchemaError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate every field in order, stopping at the first failure.
    ///
    /// Field state (`value`, `error`, `errormsg`, `success`) is updated in
    /// place.
    pub fn validate(&mut self, engine: &ValidationEngine) -> FormValidationOutcome {
        engine.validate_form(&mut self.fields)
    }

    /// The first field named `name`.
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldKind;
    use crate::rules::RuleName;

    const SIGNUP: &str = r#"{
        "fields": [
            {"name": "email", "value": "ana@example.com", "rules": {"required": true, "isemail": true}},
            {"name": "plan", "kind": "radio", "value": "basic", "rules": {"required": true}},
            {"name": "plan", "kind": "radio", "value": "pro", "checked": true},
            {"name": "cv", "files": ["cv.pdf"], "rules": {"allowed": "pdf|docx"}}
        ]
    }"#;

    #[test]
    fn parses_kinds_and_rules() {
        let form = FormDocument::from_json_str(SIGNUP).unwrap();
        assert_eq!(form.len(), 4);
        assert_eq!(form.fields[1].kind, FieldKind::Radio);
        assert!(form.fields[2].checked);
        assert!(form.field("email").unwrap().rules.contains(RuleName::IsEmail));
    }

    #[test]
    fn validates_whole_document() {
        let mut form = FormDocument::from_json_str(SIGNUP).unwrap();
        let outcome = form.validate(&ValidationEngine::new());
        assert!(outcome.is_success(), "{outcome}");
        assert_eq!(outcome.validated, 4);
        assert!(form.fields.iter().all(|field| field.success));
    }

    #[test]
    fn rejects_unknown_rules() {
        let err = FormDocument::from_json_str(r#"{"fields": [{"name": "a", "rules": {"colour": 1}}]}"#)
            .unwrap_err();
        assert!(matches!(err, SchemaError::Json(_)));
    }

    #[test]
    fn serializes_state_back() {
        let mut form = FormDocument::new(vec![FormField::text("name").rule(RuleName::Required, true)]);
        form.validate(&ValidationEngine::new());
        let json: serde_json::Value = serde_json::from_str(&form.to_json_pretty().unwrap()).unwrap();
        assert_eq!(json["fields"][0]["error"], true);
        assert_eq!(json["fields"][0]["errormsg"], "This field is required.");
    }
}
