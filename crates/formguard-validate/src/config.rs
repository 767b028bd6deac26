//! Engine configuration.
//!
//! Configuration comes from a JSON file, from `FORMGUARD_`-prefixed
//! environment variables, or both. The engine itself never reads the
//! environment; callers opt in with [`EngineConfig::from_env`] or
//! [`EngineConfig::merge_env`].
//!
//! ```json
//! {
//!   "locale": "es",
//!   "messages": { "required": "Obligatorio" },
//!   "field_messages": { "email": { "isemail": "Correo no válido" } },
//!   "catalogs": { "de": { "required": "Pflichtfeld." } },
//!   "today": "2024-06-15"
//! }
//! ```

use crate::engine::{Clock, ValidationEngine, ValidationEngineBuilder};
use crate::error::ConfigError;
use crate::messages::MessageOverrides;
use crate::rules::RuleName;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Prefix of the environment variables read by [`EngineConfig::from_env`].
pub const ENV_PREFIX: &str = "FORMGUARD_";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Locale for catalog lookups. `en` when unset.
    pub locale: Option<String>,
    /// Global message overrides.
    pub messages: HashMap<RuleName, String>,
    /// Per-field message overrides, keyed by field name.
    pub field_messages: HashMap<String, HashMap<RuleName, String>>,
    /// Extra locale tables, merged over the built-in catalog.
    pub catalogs: HashMap<String, HashMap<RuleName, String>>,
    /// Fixed "today" for the date rules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize)]
struct EnvOverrides {
    locale: Option<String>,
    today: Option<String>,
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        tracing::debug!(path = %path.display(), "loaded engine config");
        Ok(config)
    }

    /// Read `FORMGUARD_LOCALE` and `FORMGUARD_TODAY` from the process
    /// environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().merge_env()
    }

    /// Override `locale` and `today` with the environment variables that are
    /// set.
    pub fn merge_env(self) -> Result<Self, ConfigError> {
        let overrides = envy::prefixed(ENV_PREFIX).from_env::<EnvOverrides>()?;
        self.apply(overrides)
    }

    /// Same as [`merge_env`](Self::merge_env), reading from the given
    /// `(name, value)` pairs instead of the process environment.
    pub fn merge_vars<I>(self, vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let overrides = envy::prefixed(ENV_PREFIX).from_iter::<_, EnvOverrides>(vars)?;
        self.apply(overrides)
    }

    fn apply(mut self, overrides: EnvOverrides) -> Result<Self, ConfigError> {
        if let Some(locale) = overrides.locale.filter(|locale| !locale.trim().is_empty()) {
            self.locale = Some(locale);
        }
        if let Some(today) = overrides.today {
            self.today = Some(parse_today(&today)?);
        }
        Ok(self)
    }

    pub fn overrides(&self) -> MessageOverrides {
        MessageOverrides {
            global: self.messages.clone(),
            per_field: self.field_messages.clone(),
        }
    }

    /// A builder preloaded with this configuration.
    pub fn builder(&self) -> ValidationEngineBuilder {
        let mut builder = ValidationEngine::builder().overrides(self.overrides());
        if let Some(locale) = &self.locale {
            builder = builder.locale(locale.clone());
        }
        for (locale, templates) in &self.catalogs {
            builder = builder.locale_table(
                locale.clone(),
                templates.iter().map(|(rule, text)| (*rule, text.clone())),
            );
        }
        if let Some(today) = self.today {
            builder = builder.clock(Clock::on(today));
        }
        builder
    }

    pub fn to_engine(&self) -> ValidationEngine {
        self.builder().build()
    }

    pub fn into_engine(self) -> ValidationEngine {
        self.to_engine()
    }
}

impl ValidationEngine {
    pub fn from_config(config: &EngineConfig) -> Self {
        config.to_engine()
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_today(value: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| ConfigError::InvalidDate(value.to_string()))
}

/// Load a `.env` file from the current directory or its parents, if any.
pub fn load_dotenv() {
    let _ = dotenvy::dotenv();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn parses_full_json() {
        let config = EngineConfig::from_json_str(
            r#"{
                "locale": "es",
                "messages": {"required": "Obligatorio"},
                "field_messages": {"email": {"isemail": "Correo no válido"}},
                "catalogs": {"de": {"required": "Pflichtfeld."}},
                "today": "2024-06-15"
            }"#,
        )
        .unwrap();
        assert_eq!(config.locale.as_deref(), Some("es"));
        assert_eq!(config.messages[&RuleName::Required], "Obligatorio");
        assert_eq!(config.today, NaiveDate::from_ymd_opt(2024, 6, 15));
    }

    #[test]
    fn empty_json_is_default() {
        assert_eq!(EngineConfig::from_json_str("{}").unwrap(), EngineConfig::default());
    }

    #[test]
    fn unknown_rule_in_messages_is_rejected() {
        let err = EngineConfig::from_json_str(r#"{"messages": {"colour": "x"}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn env_vars_override_locale_and_today() {
        let config = EngineConfig {
            locale: Some("en".to_string()),
            ..EngineConfig::default()
        }
        .merge_vars(vars(&[
            ("FORMGUARD_LOCALE", "fr"),
            ("FORMGUARD_TODAY", "2020-01-31"),
            ("OTHER", "ignored"),
        ]))
        .unwrap();
        assert_eq!(config.locale.as_deref(), Some("fr"));
        assert_eq!(config.today, NaiveDate::from_ymd_opt(2020, 1, 31));
    }

    #[test]
    fn bad_env_date_is_an_error() {
        let err = EngineConfig::default()
            .merge_vars(vars(&[("FORMGUARD_TODAY", "31/01/2020")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDate(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = EngineConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn engine_from_config_uses_everything() {
        let config = EngineConfig::from_json_str(
            r#"{"locale": "de", "catalogs": {"de": {"required": "Pflichtfeld."}}, "today": "2024-06-15"}"#,
        )
        .unwrap();
        let engine = ValidationEngine::from_config(&config);
        assert_eq!(engine.locale(), "de");
        assert_eq!(engine.resolver().resolve("x", RuleName::Required, &[]), "Pflichtfeld.");
        assert_eq!(
            engine.resolver().resolve("x", RuleName::IsUrl, &[]),
            "Please enter a valid URL."
        );
        assert_eq!(engine.clock(), Clock::on(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()));
    }
}
