//! File extension allow-list.

use super::{RuleCheck, RuleInput, RuleName, ValidationRule};
use crate::error::ParamError;
use crate::ruleset::RuleValue;
use std::path::Path;

/// Every selected file must have one of the listed extensions.
///
/// A field without a file list, or with no files selected, passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedRule {
    /// Lowercase extensions without the leading dot.
    pub extensions: Vec<String>,
}

impl AllowedRule {
    pub fn from_param(value: &RuleValue) -> Result<Self, ParamError> {
        let extensions: Vec<String> = value
            .as_list()
            .into_iter()
            .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
        if matches!(value, RuleValue::Flag(_)) || extensions.is_empty() {
            return Err(ParamError::invalid(
                RuleName::Allowed,
                "a list of file extensions",
                value.as_text(),
            ));
        }
        Ok(Self { extensions })
    }

    pub fn allows(&self, file: &str) -> bool {
        Path::new(file)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .is_some_and(|ext| self.extensions.contains(&ext))
    }
}

impl ValidationRule for AllowedRule {
    fn rule_name(&self) -> RuleName {
        RuleName::Allowed
    }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        let passed = match &input.field.files {
            Some(files) => files.iter().all(|file| self.allows(file)),
            None => true,
        };
        RuleCheck::from_bool(passed)
    }

    fn message_data(&self) -> Vec<String> {
        vec![self.extensions.join(", ")]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormSnapshot;
    use crate::rules::FieldInfo;
    use chrono::NaiveDate;

    fn check(rule: &AllowedRule, files: Option<Vec<&str>>) -> bool {
        let mut field = FieldInfo::text("upload");
        field.files = files.map(|files| files.into_iter().map(str::to_string).collect());
        let form = FormSnapshot::new();
        let now = NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        rule.check(&RuleInput::new("", &field, &form, now)).passed
    }

    #[test]
    fn parses_extension_lists() {
        let rule = AllowedRule::from_param(&RuleValue::from(".PDF|png")).unwrap();
        assert_eq!(rule.extensions, vec!["pdf", "png"]);
        assert!(AllowedRule::from_param(&RuleValue::from("")).is_err());
        assert!(AllowedRule::from_param(&RuleValue::Flag(true)).is_err());
    }

    #[test]
    fn every_file_must_match() {
        let rule = AllowedRule::from_param(&RuleValue::from(vec!["pdf", "png"])).unwrap();
        assert!(check(&rule, Some(vec!["cv.PDF", "photo.png"])));
        assert!(!check(&rule, Some(vec!["cv.pdf", "notes.txt"])));
        assert!(!check(&rule, Some(vec!["README"])));
    }

    #[test]
    fn nothing_to_examine_passes() {
        let rule = AllowedRule::from_param(&RuleValue::from("pdf")).unwrap();
        assert!(check(&rule, None));
        assert!(check(&rule, Some(vec![])));
    }
}
