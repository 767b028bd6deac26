//! Date rules: `isdate` and the rules layered on top of it.

use super::{RuleCheck, RuleInput, RuleName, ValidationRule};
use crate::error::ParamError;
use crate::ruleset::RuleValue;
use chrono::{Datelike, NaiveDate};

/// Order of the day, month and year components in a date value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateFormat {
    /// `aaaa-mm-dd`
    #[default]
    YearMonthDay,
    /// `dd-mm-aaaa`
    DayMonthYear,
    /// `mm-dd-aaaa`
    MonthDayYear,
}

impl DateFormat {
    /// Read the `isdate` parameter. A bare flag selects `aaaa-mm-dd`.
    pub fn from_param(value: &RuleValue) -> Result<Self, ParamError> {
        let text = match value {
            RuleValue::Flag(true) => return Ok(Self::default()),
            RuleValue::Text(text) => text.trim().to_ascii_lowercase().replace('/', "-"),
            other => {
                return Err(ParamError::invalid(
                    RuleName::IsDate,
                    "a date format",
                    other.as_text(),
                ))
            }
        };
        match text.as_str() {
            "" | "true" | "aaaa-mm-dd" | "yyyy-mm-dd" | "ymd" => Ok(Self::YearMonthDay),
            "dd-mm-aaaa" | "dd-mm-yyyy" | "dmy" => Ok(Self::DayMonthYear),
            "mm-dd-aaaa" | "mm-dd-yyyy" | "mdy" => Ok(Self::MonthDayYear),
            _ => Err(ParamError::invalid(
                RuleName::IsDate,
                "one of `aaaa-mm-dd`, `dd-mm-aaaa`, `mm-dd-aaaa`",
                text,
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DateFormat::YearMonthDay => "aaaa-mm-dd",
            DateFormat::DayMonthYear => "dd-mm-aaaa",
            DateFormat::MonthDayYear => "mm-dd-aaaa",
        }
    }

    /// Split three components into `(year, month, day)`.
    fn arrange(&self, [a, b, c]: [u32; 3]) -> (u32, u32, u32) {
        match self {
            DateFormat::YearMonthDay => (a, b, c),
            DateFormat::DayMonthYear => (c, b, a),
            DateFormat::MonthDayYear => (c, a, b),
        }
    }
}

/// A date value accepted by [`parse_date`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedDate {
    pub date: NaiveDate,
    /// Hour and minute of the optional time segment. Hour 24 and minute 60
    /// are accepted, so this is not a `NaiveTime`.
    pub time: Option<(u32, u32)>,
}

fn numeric_parts(text: &str, separator: char) -> Option<Vec<u32>> {
    text.split(separator)
        .map(|part| {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                None
            } else {
                part.parse().ok()
            }
        })
        .collect()
}

/// Parse a date value in the given format.
///
/// `/` is read as `-`. An optional `HH:MM[:SS]` segment may follow the date
/// after a space. Years below 100 are rejected.
pub fn parse_date(value: &str, format: DateFormat) -> Option<ParsedDate> {
    let value = value.replace('/', "-");
    let (date_part, time_part) = match value.split_once(' ') {
        Some((date, time)) => (date, Some(time.trim())),
        None => (value.as_str(), None),
    };

    let parts: [u32; 3] = numeric_parts(date_part, '-')?.try_into().ok()?;
    let (year, month, day) = format.arrange(parts);
    if year < 100 {
        return None;
    }
    let date = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)?;

    let time = match time_part.filter(|time| !time.is_empty()) {
        None => None,
        Some(time) => {
            let parts = numeric_parts(time, ':')?;
            match parts.as_slice() {
                [hour, minute] | [hour, minute, _] if *hour <= 24 && *minute <= 60 => {
                    Some((*hour, *minute))
                }
                _ => return None,
            }
        }
    };

    Some(ParsedDate { date, time })
}

/// Age in whole years on `today` for someone born on `birth`.
///
/// ```rust
/// use chrono::NaiveDate;
/// use formguard_validate::rules::age_on;
///
/// let birth = NaiveDate::from_ymd_opt(2006, 6, 16).unwrap();
/// let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
/// assert_eq!(age_on(birth, today), 17);
/// ```
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = (today.year() - 1900) + 1900 - birth.year();
    if today.month() < birth.month() || (today.month() == birth.month() && today.day() < birth.day()) {
        age -= 1;
    }
    if age > 1900 {
        age -= 1900;
    }
    age
}

/// The value must be a real calendar date in the configured format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRule(pub DateFormat);

impl ValidationRule for DateRule {
    fn rule_name(&self) -> RuleName {
        RuleName::IsDate
    }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        RuleCheck::from_bool(parse_date(input.value, self.0).is_some())
    }

    fn message_data(&self) -> Vec<String> {
        vec![self.0.as_str().to_string()]
    }
}

/// The date must lie before the current moment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DatePreviousRule(pub DateFormat);

impl ValidationRule for DatePreviousRule {
    fn rule_name(&self) -> RuleName {
        RuleName::DatePrevious
    }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        let passed = parse_date(input.value, self.0)
            .and_then(|parsed| parsed.date.and_hms_opt(0, 0, 0))
            .is_some_and(|midnight| midnight < input.now);
        RuleCheck::from_bool(passed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinAgeRule {
    pub min: usize,
    pub format: DateFormat,
}

impl ValidationRule for MinAgeRule {
    fn rule_name(&self) -> RuleName {
        RuleName::MinAge
    }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        let passed = parse_date(input.value, self.format).is_some_and(|parsed| {
            i64::from(age_on(parsed.date, input.now.date())) >= self.min as i64
        });
        RuleCheck::from_bool(passed)
    }

    fn message_data(&self) -> Vec<String> {
        vec![self.min.to_string()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxAgeRule {
    pub max: usize,
    pub format: DateFormat,
}

impl ValidationRule for MaxAgeRule {
    fn rule_name(&self) -> RuleName {
        RuleName::MaxAge
    }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        let passed = parse_date(input.value, self.format).is_some_and(|parsed| {
            i64::from(age_on(parsed.date, input.now.date())) <= self.max as i64
        });
        RuleCheck::from_bool(passed)
    }

    fn message_data(&self) -> Vec<String> {
        vec![self.max.to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormSnapshot;
    use crate::rules::FieldInfo;
    use chrono::NaiveDateTime;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn noon() -> NaiveDateTime {
        ymd(2024, 6, 15).and_hms_opt(12, 0, 0).unwrap()
    }

    fn check(rule: &dyn ValidationRule, value: &str) -> bool {
        let field = FieldInfo::text("date");
        let form = FormSnapshot::new();
        rule.check(&RuleInput::new(value, &field, &form, noon())).passed
    }

    #[test]
    fn format_parameters() {
        assert_eq!(DateFormat::from_param(&RuleValue::Flag(true)), Ok(DateFormat::YearMonthDay));
        assert_eq!(DateFormat::from_param(&RuleValue::from("")), Ok(DateFormat::YearMonthDay));
        assert_eq!(
            DateFormat::from_param(&RuleValue::from("DD/MM/AAAA")),
            Ok(DateFormat::DayMonthYear)
        );
        assert_eq!(
            DateFormat::from_param(&RuleValue::from("mm-dd-aaaa")),
            Ok(DateFormat::MonthDayYear)
        );
        assert!(DateFormat::from_param(&RuleValue::from("yyyy.mm.dd")).is_err());
        assert!(DateFormat::from_param(&RuleValue::from(3)).is_err());
    }

    #[test]
    fn rejects_impossible_dates() {
        assert!(parse_date("2023-02-30", DateFormat::YearMonthDay).is_none());
        assert!(parse_date("2023-02-28", DateFormat::YearMonthDay).is_some());
        assert!(parse_date("2024-02-29", DateFormat::YearMonthDay).is_some());
        assert!(parse_date("2023-13-01", DateFormat::YearMonthDay).is_none());
    }

    #[test]
    fn formats_and_separators() {
        let expected = ymd(2023, 4, 5);
        assert_eq!(parse_date("05/04/2023", DateFormat::DayMonthYear).unwrap().date, expected);
        assert_eq!(parse_date("04-05-2023", DateFormat::MonthDayYear).unwrap().date, expected);
        assert!(parse_date("2023-04", DateFormat::YearMonthDay).is_none());
        assert!(parse_date("2023-04-05-01", DateFormat::YearMonthDay).is_none());
        assert!(parse_date("2023-O4-05", DateFormat::YearMonthDay).is_none());
    }

    #[test]
    fn two_digit_years_are_rejected() {
        assert!(parse_date("23-04-05", DateFormat::YearMonthDay).is_none());
        assert!(parse_date("05-04-99", DateFormat::DayMonthYear).is_none());
    }

    #[test]
    fn time_segment_bounds() {
        let parsed = parse_date("2023-04-05 24:60", DateFormat::YearMonthDay).unwrap();
        assert_eq!(parsed.time, Some((24, 60)));
        assert!(parse_date("2023-04-05 10:30:15", DateFormat::YearMonthDay).is_some());
        assert!(parse_date("2023-04-05 25:00", DateFormat::YearMonthDay).is_none());
        assert!(parse_date("2023-04-05 10:61", DateFormat::YearMonthDay).is_none());
        assert!(parse_date("2023-04-05 10", DateFormat::YearMonthDay).is_none());
    }

    #[test]
    fn age_counts_birthdays() {
        let today = ymd(2024, 6, 15);
        assert_eq!(age_on(ymd(2006, 6, 15), today), 18);
        assert_eq!(age_on(ymd(2006, 6, 16), today), 17);
        assert_eq!(age_on(ymd(2006, 7, 1), today), 17);
        assert_eq!(age_on(ymd(1950, 1, 1), today), 74);
    }

    #[test]
    fn date_previous_compares_with_now() {
        let rule = DatePreviousRule(DateFormat::YearMonthDay);
        assert!(check(&rule, "2024-06-14"));
        assert!(check(&rule, "2024-06-15"));
        assert!(!check(&rule, "2024-06-16"));
        assert!(!check(&rule, "not a date"));
    }

    #[test]
    fn min_and_max_age() {
        let min = MinAgeRule {
            min: 18,
            format: DateFormat::DayMonthYear,
        };
        assert!(check(&min, "15-06-2006"));
        assert!(!check(&min, "16-06-2006"));

        let max = MaxAgeRule {
            max: 65,
            format: DateFormat::YearMonthDay,
        };
        assert!(check(&max, "1959-06-15"));
        assert!(!check(&max, "1958-06-15"));
    }
}
