//! End-to-end validation through the public API.

use chrono::NaiveDate;
use formguard_validate::prelude::*;
use formguard_validate::{
    ControlState, FieldRef, LocaleCatalog, MessageCatalog, MessageOverrides, ValidationEngineBuilder,
};
use std::sync::Arc;

fn builder() -> ValidationEngineBuilder {
    ValidationEngine::builder().today(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
}

fn engine() -> ValidationEngine {
    builder().build()
}

fn validate(field: &mut FormField) -> ValidationOutcome {
    engine().validate_field(field, &FormSnapshot::new())
}

#[test]
fn field_without_rules_succeeds() {
    let mut field = FormField::text("notes").with_value("   ");
    let outcome = validate(&mut field);
    assert!(outcome.is_success());
    assert!(field.success);
}

#[test]
fn empty_bad_email_reports_required() {
    let mut field = FormField::text("email")
        .rule(RuleName::Required, true)
        .rule(RuleName::IsEmail, true);
    let outcome = validate(&mut field);
    assert_eq!(outcome.rule, Some(RuleName::Required));
    assert_eq!(outcome.field, Some(FieldRef::new("email")));
}

#[test]
fn message_precedence() {
    let engine = builder()
        .locale("es")
        .global_message(RuleName::Required, "global")
        .field_message("email", RuleName::Required, "per-field")
        .build();

    let mut email = FormField::text("email").rule(RuleName::Required, true);
    let mut name = FormField::text("name").rule(RuleName::Required, true);
    let mut site = FormField::text("site").with_value("nope").rule(RuleName::IsUrl, true);
    let form = FormSnapshot::new();

    assert_eq!(engine.validate_field(&mut email, &form).message, "per-field");
    assert_eq!(engine.validate_field(&mut name, &form).message, "global");
    assert_eq!(engine.validate_field(&mut site, &form).message, "Introduce una URL válida.");
}

#[test]
fn unknown_locale_and_missing_template() {
    let engine = builder().locale("de").build();
    let mut field = FormField::text("name").rule(RuleName::Required, true);
    assert_eq!(
        engine.validate_field(&mut field, &FormSnapshot::new()).message,
        "This field is required."
    );

    let silent = builder().catalog(LocaleCatalog::empty()).build();
    let mut field = FormField::text("name").rule(RuleName::Required, true);
    let outcome = silent.validate_field(&mut field, &FormSnapshot::new());
    assert!(outcome.error);
    assert_eq!(outcome.message, "");
}

#[test]
fn range_length_boundaries() {
    for (value, ok) in [("ab", false), ("abc", true), ("abcdefghij", true), ("abcdefghijk", false)] {
        let mut field = FormField::text("user")
            .with_value(value)
            .rule(RuleName::RangeLength, "3|10");
        assert_eq!(validate(&mut field).is_success(), ok, "{value}");
    }
}

#[test]
fn range_length_message_is_interpolated() {
    let mut field = FormField::text("user").with_value("ab").rule(RuleName::RangeLength, "3|10");
    assert_eq!(
        validate(&mut field).message,
        "Please enter a value between 3 and 10 characters long."
    );
}

#[test]
fn calendar_dates() {
    let mut bad = FormField::text("day").with_value("2023-02-30").rule(RuleName::IsDate, true);
    let mut good = FormField::text("day").with_value("2023-02-28").rule(RuleName::IsDate, true);
    let outcome = validate(&mut bad);
    assert_eq!(outcome.rule, Some(RuleName::IsDate));
    assert_eq!(outcome.message, "Please enter a valid date (aaaa-mm-dd).");
    assert!(validate(&mut good).is_success());
}

#[test]
fn age_rules_need_isdate() {
    let mut without_parent = FormField::text("birth").with_value("garbage").rule(RuleName::MinAge, 18);
    assert!(validate(&mut without_parent).is_success());

    let mut too_young = FormField::text("birth")
        .with_value("16/06/2006")
        .rule(RuleName::IsDate, "dd-mm-aaaa")
        .rule(RuleName::MinAge, 18);
    let outcome = validate(&mut too_young);
    assert_eq!(outcome.rule, Some(RuleName::MinAge));
    assert_eq!(outcome.message, "You must be at least 18 years old.");

    let mut adult = FormField::text("birth")
        .with_value("15/06/2006")
        .rule(RuleName::IsDate, "dd-mm-aaaa")
        .rule(RuleName::MinAge, 18);
    assert!(validate(&mut adult).is_success());
}

#[test]
fn date_previous_uses_the_engine_clock() {
    let mut tomorrow = FormField::text("when")
        .with_value("2024-06-16")
        .rule(RuleName::IsDate, true)
        .rule(RuleName::DatePrevious, true);
    assert_eq!(validate(&mut tomorrow).rule, Some(RuleName::DatePrevious));

    let mut yesterday = tomorrow.clone().with_value("2024-06-14");
    assert!(validate(&mut yesterday).is_success());
}

#[test]
fn very_high_security() {
    let mut weak = FormField::text("password").with_value("Abcdef12").rule(RuleName::Security, "very-high");
    let mut strong = FormField::text("password").with_value("Abcdef1!").rule(RuleName::Security, "very-high");
    let outcome = validate(&mut weak);
    assert_eq!(outcome.rule, Some(RuleName::Security));
    assert_eq!(
        outcome.message,
        "The password must have at least 8 characters and meet the very-high security level."
    );
    assert!(validate(&mut strong).is_success());
}

#[test]
fn equal_to_is_case_sensitive() {
    let mut fields = vec![
        FormField::text("password").with_value("Secret1!"),
        FormField::text("confirm").with_value("secret1!").rule(RuleName::EqualTo, "password"),
    ];
    let outcome = engine().validate_form(&mut fields);
    assert_eq!(outcome.rule, Some(RuleName::EqualTo));

    fields[1].value = "Secret1!".to_string();
    assert!(engine().validate_form(&mut fields).is_success());
}

#[test]
fn spanish_phone_is_reformatted() {
    let mut field = FormField::text("phone")
        .with_value("612345678")
        .rule(RuleName::PhoneNumber, true)
        .rule(RuleName::PhoneCountry, vec!["es"]);
    assert!(validate(&mut field).is_success());
    assert_eq!(field.value, "612 345 678");
}

#[test]
fn phone_country_failure_names_countries() {
    let mut field = FormField::text("phone")
        .with_value("+1 202 555 0123")
        .rule(RuleName::PhoneNumber, true)
        .rule(RuleName::PhoneCountry, "es|pt");
    let outcome = validate(&mut field);
    assert_eq!(outcome.rule, Some(RuleName::PhoneCountry));
    assert_eq!(outcome.message, "Please enter a valid phone number for ES, PT.");
}

#[test]
fn autodel_removes_spaces() {
    let mut field = FormField::text("code").with_value("a b c").rule(RuleName::NoSpaces, "autodel");
    assert!(validate(&mut field).is_success());
    assert_eq!(field.value, "abc");
}

#[test]
fn form_short_circuits() {
    let mut fields = vec![
        FormField::text("first").with_value("ok").rule(RuleName::Required, true),
        FormField::text("second").rule(RuleName::Required, true),
        FormField::text("third").rule(RuleName::Required, true),
    ];
    let outcome = engine().validate_form(&mut fields);

    assert_eq!(outcome.field, Some(FieldRef::at("second", 1)));
    assert_eq!(outcome.validated, 2);
    assert!(fields[1].was_focused());
    assert_eq!(fields[2], FormField::text("third").rule(RuleName::Required, true));
}

#[test]
fn resubmitting_reveals_the_next_error() {
    let mut fields = vec![
        FormField::text("first").with_value("ok").rule(RuleName::Required, true),
        FormField::text("second").rule(RuleName::Required, true),
        FormField::text("third").rule(RuleName::Required, true),
    ];
    let outcome = engine().validate_form(&mut fields);
    assert_eq!(outcome.field, Some(FieldRef::at("second", 1)));
    assert!(!fields[2].error);

    fields[1].value = "fixed".to_string();
    let outcome = engine().validate_form(&mut fields);

    assert_eq!(outcome.field, Some(FieldRef::at("third", 2)));
    assert_eq!(outcome.rule, Some(RuleName::Required));
    assert_eq!(outcome.validated, 3);
    assert!(fields[1].success);
    assert!(!fields[1].error);
    assert_eq!(fields[1].errormsg, "");
    assert!(fields[2].error);
    assert!(fields[2].was_focused());
}

#[test]
fn radio_group_required() {
    let mut fields = vec![
        FormField::radio("plan").with_value("basic").rule(RuleName::Required, true),
        FormField::radio("plan").with_value("pro"),
    ];
    assert_eq!(engine().validate_form(&mut fields).rule, Some(RuleName::Required));

    fields[1].checked = true;
    assert!(engine().validate_form(&mut fields).is_success());
}

#[test]
fn checkbox_group_counts() {
    let mut fields = vec![
        FormField::checkbox("red")
            .in_group("colours")
            .checked(true)
            .rule(RuleName::MinCheck, 2)
            .rule(RuleName::MaxCheck, 2),
        FormField::checkbox("green").in_group("colours").checked(true),
        FormField::checkbox("blue").in_group("colours").checked(true),
    ];
    let outcome = engine().validate_form(&mut fields);
    assert_eq!(outcome.rule, Some(RuleName::MaxCheck));
    assert_eq!(outcome.message, "Please select no more than 2 options.");

    fields[2].checked = false;
    assert!(engine().validate_form(&mut fields).is_success());
}

#[test]
fn external_form_context() {
    let form = FormSnapshot::new().with_control(ControlState {
        name: "password".to_string(),
        value: "hunter2".to_string(),
        kind: FieldKind::Text,
        checked: false,
        checkgroup: None,
    });
    let mut fields = vec![FormField::text("confirm")
        .with_value("hunter2")
        .rule(RuleName::EqualTo, "password")];
    assert!(engine().validate_form_with(&mut fields, &form).is_success());
}

#[test]
fn allowed_extensions() {
    let mut field = FormField::text("cv")
        .with_files(["cv.pdf", "photo.JPG"])
        .rule(RuleName::Allowed, "pdf|jpg");
    assert!(validate(&mut field).is_success());

    let mut field = field.with_files(["virus.exe"]);
    let outcome = validate(&mut field);
    assert_eq!(outcome.message, "Only files of type pdf, jpg are allowed.");
}

#[test]
fn malformed_parameter_fails_closed() {
    let mut field = FormField::text("age").with_value("30").rule(RuleName::Range, "18");
    let outcome = validate(&mut field);
    assert_eq!(outcome.rule, Some(RuleName::Range));
    assert!(field.error);
    assert_eq!(outcome.message, "Please enter a value between {data0} and {data1}.");
}

#[test]
fn custom_catalog_trait_object() {
    struct Shouty;

    impl MessageCatalog for Shouty {
        fn template(&self, _locale: &str, _rule: formguard_validate::RuleName) -> Option<&str> {
            Some("NO")
        }
    }

    let engine = builder()
        .catalog_arc(Arc::new(Shouty))
        .overrides(MessageOverrides::new().field("b", RuleName::Required, "custom"))
        .build();
    let mut a = FormField::text("a").rule(RuleName::Required, true);
    let mut b = FormField::text("b").rule(RuleName::Required, true);
    assert_eq!(engine.validate_field(&mut a, &FormSnapshot::new()).message, "NO");
    assert_eq!(engine.validate_field(&mut b, &FormSnapshot::new()).message, "custom");
}

#[test]
fn api_error_for_failed_form() {
    let mut fields = vec![FormField::text("email").with_value("x").rule(RuleName::IsEmail, true)];
    let outcome = engine().validate_form(&mut fields);
    let json = serde_json::to_value(outcome.to_api_error().unwrap()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "error": {
                "type": "validation_error",
                "message": "Validation failed",
                "fields": [
                    {"field": "email", "code": "isemail", "message": "Please enter a valid email address."}
                ]
            }
        })
    );
}
