//! The field adapter contract and the in-memory field.

use crate::rules::RuleName;
use crate::ruleset::{RuleSet, RuleValue};
use serde::{Deserialize, Serialize};

/// What kind of control a field is.
///
/// Only `required`, `mincheck` and `maxcheck` look at this: checkable
/// controls are judged by their checked state rather than their value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Text-like input: text, email, password, textarea, select, file...
    #[default]
    Text,
    Checkbox,
    Radio,
}

impl FieldKind {
    pub fn is_checkable(&self) -> bool {
        matches!(self, FieldKind::Checkbox | FieldKind::Radio)
    }
}

/// The surface the engine needs from a validated input.
///
/// Implement this for whatever object represents an input in the host
/// form. The engine reads the value and rule parameters, writes back a
/// normalized value when a normalizing rule passes, and records the
/// error/success state. It never keeps a reference past the call.
pub trait FieldAdapter {
    /// Field identity, used for message overrides, `equalto` and radio groups.
    fn name(&self) -> &str;

    /// Current value.
    fn value(&self) -> String;

    /// Replace the value. Only called by normalizing rules.
    fn set_value(&mut self, value: String);

    fn kind(&self) -> FieldKind {
        FieldKind::Text
    }

    fn is_checked(&self) -> bool {
        false
    }

    /// Tag linking checkboxes counted together by `mincheck`/`maxcheck`.
    fn checkgroup(&self) -> Option<&str> {
        None
    }

    /// Names of the files selected in a file input.
    ///
    /// `None` means the field has no file list at all; the `allowed` rule
    /// then has nothing to examine and passes.
    fn files(&self) -> Option<Vec<String>> {
        None
    }

    /// The raw parameter of a rule, or `None` when the rule is not configured.
    fn rule_parameter(&self, rule: RuleName) -> Option<RuleValue>;

    fn set_error(&mut self, error: bool);

    fn set_error_message(&mut self, message: String);

    fn set_success(&mut self, success: bool);

    /// Move input focus to this field.
    fn focus(&mut self);
}

impl<T: FieldAdapter + ?Sized> FieldAdapter for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn value(&self) -> String {
        (**self).value()
    }

    fn set_value(&mut self, value: String) {
        (**self).set_value(value)
    }

    fn kind(&self) -> FieldKind {
        (**self).kind()
    }

    fn is_checked(&self) -> bool {
        (**self).is_checked()
    }

    fn checkgroup(&self) -> Option<&str> {
        (**self).checkgroup()
    }

    fn files(&self) -> Option<Vec<String>> {
        (**self).files()
    }

    fn rule_parameter(&self, rule: RuleName) -> Option<RuleValue> {
        (**self).rule_parameter(rule)
    }

    fn set_error(&mut self, error: bool) {
        (**self).set_error(error)
    }

    fn set_error_message(&mut self, message: String) {
        (**self).set_error_message(message)
    }

    fn set_success(&mut self, success: bool) {
        (**self).set_success(success)
    }

    fn focus(&mut self) {
        (**self).focus()
    }
}

impl<T: FieldAdapter + ?Sized> FieldAdapter for &mut T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn value(&self) -> String {
        (**self).value()
    }

    fn set_value(&mut self, value: String) {
        (**self).set_value(value)
    }

    fn kind(&self) -> FieldKind {
        (**self).kind()
    }

    fn is_checked(&self) -> bool {
        (**self).is_checked()
    }

    fn checkgroup(&self) -> Option<&str> {
        (**self).checkgroup()
    }

    fn files(&self) -> Option<Vec<String>> {
        (**self).files()
    }

    fn rule_parameter(&self, rule: RuleName) -> Option<RuleValue> {
        (**self).rule_parameter(rule)
    }

    fn set_error(&mut self, error: bool) {
        (**self).set_error(error)
    }

    fn set_error_message(&mut self, message: String) {
        (**self).set_error_message(message)
    }

    fn set_success(&mut self, success: bool) {
        (**self).set_success(success)
    }

    fn focus(&mut self) {
        (**self).focus()
    }
}

/// A plain in-memory field.
///
/// Useful on the server side, in tests, and as the element type of a
/// [`FormDocument`](crate::FormDocument).
///
/// ```rust
/// use formguard_validate::{FormField, RuleName};
///
/// let field = FormField::text("email")
///     .with_value("ana@example.com")
///     .rule(RuleName::Required, true)
///     .rule(RuleName::IsEmail, true);
/// assert_eq!(field.rules.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub kind: FieldKind,
    #[serde(default)]
    pub checked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkgroup: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,
    #[serde(default)]
    pub rules: RuleSet,
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub errormsg: String,
    #[serde(default)]
    pub success: bool,
    /// How many times the engine requested focus on this field.
    #[serde(skip)]
    pub focus_count: usize,
}

impl FormField {
    /// Create a field of the given kind.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Self::default()
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text)
    }

    pub fn checkbox(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Checkbox)
    }

    pub fn radio(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Radio)
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.checkgroup = Some(group.into());
        self
    }

    pub fn with_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files = Some(files.into_iter().map(Into::into).collect());
        self
    }

    /// Configure a rule.
    pub fn rule(mut self, rule: RuleName, value: impl Into<RuleValue>) -> Self {
        self.rules.insert(rule, value);
        self
    }

    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    /// Whether the engine has focused this field at least once.
    pub fn was_focused(&self) -> bool {
        self.focus_count > 0
    }
}

impl FieldAdapter for FormField {
    fn name(&self) -> &str {
        &self.name
    }

    fn value(&self) -> String {
        self.value.clone()
    }

    fn set_value(&mut self, value: String) {
        self.value = value;
    }

    fn kind(&self) -> FieldKind {
        self.kind
    }

    fn is_checked(&self) -> bool {
        self.checked
    }

    fn checkgroup(&self) -> Option<&str> {
        self.checkgroup.as_deref()
    }

    fn files(&self) -> Option<Vec<String>> {
        self.files.clone()
    }

    fn rule_parameter(&self, rule: RuleName) -> Option<RuleValue> {
        self.rules.get(rule).cloned()
    }

    fn set_error(&mut self, error: bool) {
        self.error = error;
    }

    fn set_error_message(&mut self, message: String) {
        self.errormsg = message;
    }

    fn set_success(&mut self, success: bool) {
        self.success = success;
    }

    fn focus(&mut self) {
        self.focus_count += 1;
    }
}
