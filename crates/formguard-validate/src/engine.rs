//! The validation engine.

use crate::catalog::{LocaleCatalog, MessageCatalog, DEFAULT_LOCALE};
use crate::field::FieldAdapter;
use crate::form::{FormContext, FormSnapshot};
use crate::messages::{MessageOverrides, MessageResolver};
use crate::outcome::{FieldRef, FormValidationOutcome, ValidationOutcome};
use crate::rules::{FieldInfo, RuleInput, RuleName, RulePlan};
use chrono::{Local, NaiveDate, NaiveDateTime};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Where the engine reads "now" from for the date rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    /// Local wall-clock time.
    #[default]
    System,
    /// A fixed moment, for reproducible runs.
    Fixed(NaiveDateTime),
}

impl Clock {
    /// A fixed clock at noon of `date`.
    pub fn on(date: NaiveDate) -> Self {
        Clock::Fixed(date.and_hms_opt(12, 0, 0).expect("noon is a valid time"))
    }

    pub fn now(&self) -> NaiveDateTime {
        match self {
            Clock::System => Local::now().naive_local(),
            Clock::Fixed(now) => *now,
        }
    }
}

/// Runs field rules in their fixed order and records the result on the
/// field.
///
/// The engine is immutable once built and holds no reference to any field
/// between calls, so one instance can be shared across threads.
///
/// ```rust
/// use formguard_validate::{FormField, FormSnapshot, RuleName, ValidationEngine};
///
/// let engine = ValidationEngine::builder().locale("en").build();
/// let mut field = FormField::text("email")
///     .with_value("not-an-email")
///     .rule(RuleName::Required, true)
///     .rule(RuleName::IsEmail, true);
///
/// let outcome = engine.validate_field(&mut field, &FormSnapshot::new());
/// assert_eq!(outcome.rule, Some(RuleName::IsEmail));
/// assert!(field.error);
/// assert_eq!(field.errormsg, "Please enter a valid email address.");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ValidationEngine {
    messages: MessageResolver,
    clock: Clock,
}

/// The form context used while validating a field list.
enum FormState<'a> {
    /// Captured from the fields and kept in step with normalized values.
    Snapshot(FormSnapshot),
    /// Supplied by the caller, read as is.
    External(&'a dyn FormContext),
}

impl FormState<'_> {
    fn context(&self) -> &dyn FormContext {
        match self {
            FormState::Snapshot(snapshot) => snapshot,
            FormState::External(form) => *form,
        }
    }

    fn sync(&mut self, index: usize, value: String) {
        if let FormState::Snapshot(snapshot) = self {
            snapshot.set_value(index, value);
        }
    }
}

impl ValidationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> ValidationEngineBuilder {
        ValidationEngineBuilder::new()
    }

    pub fn locale(&self) -> &str {
        self.messages.locale()
    }

    pub fn resolver(&self) -> &MessageResolver {
        &self.messages
    }

    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Validate a single field against `form`.
    ///
    /// Rules run in [`RuleName::ORDER`]; the first failure sets the field's
    /// error state and message, clears its success flag and focuses it. When
    /// every rule passes the field is marked successful and its message
    /// cleared. A field with no rules always succeeds.
    pub fn validate_field<F: FieldAdapter + ?Sized>(
        &self,
        field: &mut F,
        form: &dyn FormContext,
    ) -> ValidationOutcome {
        self.run_field(field, form, None, self.clock.now())
    }

    /// Validate fields in order, stopping at the first failure.
    ///
    /// The form context is captured from `fields` themselves. Fields after
    /// the failing one are left untouched.
    pub fn validate_form<F: FieldAdapter>(&self, fields: &mut [F]) -> FormValidationOutcome {
        let snapshot = FormSnapshot::capture(fields);
        self.run_form(fields, FormState::Snapshot(snapshot))
    }

    /// Like [`validate_form`](Self::validate_form), against a caller-provided
    /// form context.
    pub fn validate_form_with<F: FieldAdapter>(
        &self,
        fields: &mut [F],
        form: &dyn FormContext,
    ) -> FormValidationOutcome {
        self.run_form(fields, FormState::External(form))
    }

    fn run_form<F: FieldAdapter>(&self, fields: &mut [F], mut state: FormState<'_>) -> FormValidationOutcome {
        let names: Vec<String> = fields.iter().map(|field| field.name().to_string()).collect();
        let now = self.clock.now();

        for (index, field) in fields.iter_mut().enumerate() {
            let outcome = self.run_field(field, state.context(), Some(index), now);
            state.sync(index, field.value());
            if outcome.error {
                debug!(
                    field = %field.name(),
                    index,
                    total = names.len(),
                    "form validation stopped"
                );
                return FormValidationOutcome::from_field(outcome, names, index + 1);
            }
        }

        let validated = names.len();
        FormValidationOutcome::from_field(ValidationOutcome::success(), names, validated)
    }

    fn run_field<F: FieldAdapter + ?Sized>(
        &self,
        field: &mut F,
        form: &dyn FormContext,
        index: Option<usize>,
        now: NaiveDateTime,
    ) -> ValidationOutcome {
        let plan = RulePlan::resolve(&*field);
        let info = FieldInfo::capture(&*field);
        let mut value = field.value();

        for planned in plan.iter() {
            trace!(field = %info.name, rule = %planned.name, "evaluating rule");

            let failure = match &planned.rule {
                Ok(rule) => {
                    let check = rule.check(&RuleInput::new(&value, &info, form, now));
                    if check.passed {
                        if let Some(normalized) = check.normalized {
                            trace!(field = %info.name, rule = %planned.name, %normalized, "value normalized");
                            field.set_value(normalized.clone());
                            value = normalized;
                        }
                        None
                    } else {
                        Some(rule.message_data())
                    }
                }
                Err(error) => {
                    warn!(field = %info.name, rule = %planned.name, %error, "invalid rule parameter, failing closed");
                    Some(Vec::new())
                }
            };

            if let Some(data) = failure {
                return self.fail(field, &info.name, index, planned.name, &data);
            }
        }

        field.set_success(true);
        field.set_error(false);
        field.set_error_message(String::new());
        ValidationOutcome::success()
    }

    fn fail<F: FieldAdapter + ?Sized>(
        &self,
        field: &mut F,
        name: &str,
        index: Option<usize>,
        rule: RuleName,
        data: &[String],
    ) -> ValidationOutcome {
        let message = self.messages.resolve(name, rule, data);
        debug!(field = %name, %rule, %message, "validation failed");

        field.set_error(true);
        field.set_error_message(message.clone());
        field.set_success(false);
        field.focus();

        let field_ref = FieldRef {
            name: name.to_string(),
            index,
        };
        ValidationOutcome::failure(field_ref, rule, message)
    }
}

/// Builder for [`ValidationEngine`].
///
/// ```rust
/// use chrono::NaiveDate;
/// use formguard_validate::{RuleName, ValidationEngine};
///
/// let engine = ValidationEngine::builder()
///     .locale("es")
///     .global_message(RuleName::Required, "Obligatorio")
///     .field_message("email", RuleName::IsEmail, "Correo no válido")
///     .today(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
///     .build();
/// assert_eq!(engine.locale(), "es");
/// ```
#[derive(Default)]
pub struct ValidationEngineBuilder {
    locale: Option<String>,
    overrides: MessageOverrides,
    catalog: LocaleCatalog,
    custom_catalog: Option<Arc<dyn MessageCatalog>>,
    clock: Clock,
}

impl ValidationEngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Locale used for catalog lookups. Defaults to `en`.
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Message for `rule` on every field.
    pub fn global_message(mut self, rule: RuleName, template: impl Into<String>) -> Self {
        self.overrides.set_global(rule, template);
        self
    }

    /// Message for `rule` on the field named `field`.
    pub fn field_message(
        mut self,
        field: impl Into<String>,
        rule: RuleName,
        template: impl Into<String>,
    ) -> Self {
        self.overrides.set_field(field, rule, template);
        self
    }

    /// Replace all overrides at once.
    pub fn overrides(mut self, overrides: MessageOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Replace the built-in catalog.
    pub fn catalog(mut self, catalog: LocaleCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Use any [`MessageCatalog`]. Takes precedence over
    /// [`catalog`](Self::catalog) and [`locale_table`](Self::locale_table).
    pub fn catalog_arc(mut self, catalog: Arc<dyn MessageCatalog>) -> Self {
        self.custom_catalog = Some(catalog);
        self
    }

    /// Add or extend one locale of the catalog.
    pub fn locale_table(
        mut self,
        locale: impl Into<String>,
        templates: impl IntoIterator<Item = (RuleName, String)>,
    ) -> Self {
        self.catalog.insert_locale(locale, templates);
        self
    }

    /// Pin "today" for the date rules.
    pub fn today(mut self, date: NaiveDate) -> Self {
        self.clock = Clock::on(date);
        self
    }

    pub fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn build(self) -> ValidationEngine {
        let catalog = self
            .custom_catalog
            .unwrap_or_else(|| Arc::new(self.catalog));
        let locale = self.locale.unwrap_or_else(|| DEFAULT_LOCALE.to_string());
        ValidationEngine {
            messages: MessageResolver::new(catalog, self.overrides, locale),
            clock: self.clock,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FormField;
    use crate::ruleset::RuleValue;

    fn engine() -> ValidationEngine {
        ValidationEngine::builder()
            .today(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
            .build()
    }

    #[test]
    fn no_rules_succeeds() {
        let mut field = FormField::text("anything").with_value("");
        let outcome = engine().validate_field(&mut field, &FormSnapshot::new());
        assert!(outcome.is_success());
        assert!(field.success);
        assert!(!field.error);
    }

    #[test]
    fn required_reported_before_isemail() {
        let mut field = FormField::text("email")
            .rule(RuleName::IsEmail, true)
            .rule(RuleName::Required, true);
        let outcome = engine().validate_field(&mut field, &FormSnapshot::new());
        assert_eq!(outcome.rule, Some(RuleName::Required));
        assert_eq!(field.errormsg, "This field is required.");
        assert!(field.was_focused());
        assert!(!field.success);
    }

    #[test]
    fn success_clears_previous_error() {
        let mut field = FormField::text("name")
            .with_value("Ana")
            .rule(RuleName::Required, true);
        field.error = true;
        field.errormsg = "old".to_string();

        engine().validate_field(&mut field, &FormSnapshot::new());
        assert!(!field.error);
        assert!(field.success);
        assert_eq!(field.errormsg, "");
    }

    #[test]
    fn normalization_feeds_later_rules() {
        let mut field = FormField::text("code")
            .with_value("a b c")
            .rule(RuleName::NoSpaces, "autodel")
            .rule(RuleName::MaxLength, 3);
        let outcome = engine().validate_field(&mut field, &FormSnapshot::new());
        assert!(outcome.is_success());
        assert_eq!(field.value, "abc");
    }

    #[test]
    fn bad_parameter_fails_closed_with_its_rule() {
        let mut field = FormField::text("name")
            .with_value("hello")
            .rule(RuleName::RangeLength, "three|ten");
        let outcome = engine().validate_field(&mut field, &FormSnapshot::new());
        assert_eq!(outcome.rule, Some(RuleName::RangeLength));
        assert!(field.error);
    }

    #[test]
    fn disabled_rule_is_not_applied() {
        let mut field = FormField::text("name").rule(RuleName::Required, RuleValue::Flag(false));
        assert!(engine().validate_field(&mut field, &FormSnapshot::new()).is_success());
    }

    #[test]
    fn form_stops_at_first_failure() {
        let mut fields = vec![
            FormField::text("name").with_value("Ana").rule(RuleName::Required, true),
            FormField::text("email").rule(RuleName::Required, true),
            FormField::text("city").rule(RuleName::Required, true),
        ];
        let outcome = engine().validate_form(&mut fields);

        assert!(outcome.error);
        assert_eq!(outcome.validated, 2);
        assert_eq!(outcome.fields, vec!["name", "email", "city"]);
        assert_eq!(outcome.field, Some(FieldRef::at("email", 1)));
        assert!(fields[0].success);
        assert!(fields[1].error);
        assert!(!fields[2].error && !fields[2].success && !fields[2].was_focused());
    }

    #[test]
    fn form_sees_normalized_values() {
        let mut fields = vec![
            FormField::text("code")
                .with_value("a b")
                .rule(RuleName::NoSpaces, "autodel"),
            FormField::text("confirm")
                .with_value("ab")
                .rule(RuleName::EqualTo, "code"),
        ];
        assert!(engine().validate_form(&mut fields).is_success());
    }

    #[test]
    fn clock_on_is_noon() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(Clock::on(date).now(), date.and_hms_opt(12, 0, 0).unwrap());
    }

    #[test]
    fn engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ValidationEngine>();
    }
}
