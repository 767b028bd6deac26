//! Message overrides and resolution.

use crate::catalog::{LocaleCatalog, MessageCatalog, DEFAULT_LOCALE};
use crate::rules::RuleName;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Caller-supplied message templates that take precedence over the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageOverrides {
    /// Templates applied to every field.
    #[serde(default)]
    pub global: HashMap<RuleName, String>,
    /// Templates for one field, keyed by field name.
    #[serde(default)]
    pub per_field: HashMap<String, HashMap<RuleName, String>>,
}

impl MessageOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn global(mut self, rule: RuleName, template: impl Into<String>) -> Self {
        self.set_global(rule, template);
        self
    }

    pub fn field(
        mut self,
        field: impl Into<String>,
        rule: RuleName,
        template: impl Into<String>,
    ) -> Self {
        self.set_field(field, rule, template);
        self
    }

    pub fn set_global(&mut self, rule: RuleName, template: impl Into<String>) {
        self.global.insert(rule, template.into());
    }

    pub fn set_field(&mut self, field: impl Into<String>, rule: RuleName, template: impl Into<String>) {
        self.per_field
            .entry(field.into())
            .or_default()
            .insert(rule, template.into());
    }

    /// The override for `rule` on `field`: per-field first, then global.
    pub fn lookup(&self, field: &str, rule: RuleName) -> Option<&str> {
        self.per_field
            .get(field)
            .and_then(|templates| templates.get(&rule))
            .or_else(|| self.global.get(&rule))
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.global.is_empty() && self.per_field.values().all(HashMap::is_empty)
    }
}

/// Replace `{data0}`, `{data1}`, ... with the matching element of `data`.
///
/// Placeholders without a matching element are left as they are. The
/// template is scanned once, so substituted text is never expanded again.
pub fn interpolate(template: &str, data: &[String]) -> String {
    placeholder_regex()
        .replace_all(template, |caps: &Captures<'_>| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|index| data.get(index))
                .map_or_else(|| caps[0].to_string(), Clone::clone)
        })
        .into_owned()
}

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX.get_or_init(|| Regex::new(r"\{data([0-9]+)\}").unwrap())
}

/// Turns a failing rule into the text shown to the user.
///
/// Precedence is strict: per-field override, then global override, then the
/// catalog template for the configured locale, then the catalog template for
/// [`DEFAULT_LOCALE`]. Nothing found resolves to an empty string.
#[derive(Clone)]
pub struct MessageResolver {
    catalog: Arc<dyn MessageCatalog>,
    overrides: MessageOverrides,
    locale: String,
}

impl MessageResolver {
    pub fn new(
        catalog: Arc<dyn MessageCatalog>,
        overrides: MessageOverrides,
        locale: impl Into<String>,
    ) -> Self {
        Self {
            catalog,
            overrides,
            locale: locale.into(),
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn overrides(&self) -> &MessageOverrides {
        &self.overrides
    }

    /// The uninterpolated template for `rule` on `field`.
    pub fn template(&self, field: &str, rule: RuleName) -> Option<&str> {
        self.overrides
            .lookup(field, rule)
            .or_else(|| self.catalog.template(&self.locale, rule))
            .or_else(|| self.catalog.template(DEFAULT_LOCALE, rule))
    }

    /// Resolve and interpolate the message for `rule` on `field`.
    pub fn resolve(&self, field: &str, rule: RuleName, data: &[String]) -> String {
        match self.template(field, rule) {
            Some(template) => interpolate(template, data),
            None => String::new(),
        }
    }
}

impl Default for MessageResolver {
    fn default() -> Self {
        Self::new(
            Arc::new(LocaleCatalog::builtin()),
            MessageOverrides::default(),
            DEFAULT_LOCALE,
        )
    }
}

impl fmt::Debug for MessageResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageResolver")
            .field("locale", &self.locale)
            .field("overrides", &self.overrides)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn substituted_text_is_not_expanded() {
        let values = data(&["{data1}", "png"]);
        assert_eq!(interpolate("Allowed: {data0} / {data1}", &values), "Allowed: {data1} / png");
        assert_eq!(
            interpolate("{data7} {data99999999999999999999}", &values),
            "{data7} {data99999999999999999999}"
        );
    }

    #[test]
    fn interpolates_in_order() {
        let message = interpolate("between {data0} and {data1}, min {data0}", &data(&["3", "10"]));
        assert_eq!(message, "between 3 and 10, min 3");
    }

    #[test]
    fn missing_data_leaves_placeholder() {
        assert_eq!(interpolate("at least {data0}", &[]), "at least {data0}");
    }

    #[test]
    fn per_field_beats_global_beats_locale() {
        let overrides = MessageOverrides::new()
            .global(RuleName::Required, "global")
            .field("email", RuleName::Required, "per field");
        let resolver = MessageResolver::new(Arc::new(LocaleCatalog::builtin()), overrides, "es");

        assert_eq!(resolver.resolve("email", RuleName::Required, &[]), "per field");
        assert_eq!(resolver.resolve("name", RuleName::Required, &[]), "global");
        assert_eq!(
            resolver.resolve("name", RuleName::IsUrl, &[]),
            "Introduce una URL válida."
        );
    }

    #[test]
    fn unknown_locale_falls_back_to_english() {
        let resolver = MessageResolver::new(
            Arc::new(LocaleCatalog::builtin()),
            MessageOverrides::default(),
            "de",
        );
        assert_eq!(
            resolver.resolve("age", RuleName::Min, &data(&["18"])),
            "Please enter a value greater than or equal to 18."
        );
    }

    #[test]
    fn missing_template_is_empty() {
        let resolver = MessageResolver::new(
            Arc::new(LocaleCatalog::empty()),
            MessageOverrides::default(),
            "en",
        );
        assert_eq!(resolver.resolve("x", RuleName::Required, &[]), "");
    }

    #[test]
    fn overrides_deserialize() {
        let json = r#"{"global": {"required": "Needed"}, "per_field": {"email": {"isemail": "Bad email"}}}"#;
        let overrides: MessageOverrides = serde_json::from_str(json).unwrap();
        assert_eq!(overrides.lookup("email", RuleName::IsEmail), Some("Bad email"));
        assert_eq!(overrides.lookup("email", RuleName::Required), Some("Needed"));
        assert!(!overrides.is_empty());
    }
}
