//! # formguard
//!
//! Declarative form validation. Each field carries a set of named rules
//! (`required`, `isemail`, `rangelength="3|10"`, ...); the engine runs them
//! in a fixed order, stops at the first failure and writes the outcome back
//! to the field: error flag, localized message, success flag, focus.
//!
//! ## Example
//!
//! ```rust
//! use formguard_validate::prelude::*;
//!
//! let engine = ValidationEngine::builder()
//!     .locale("es")
//!     .field_message("user", RuleName::RangeLength, "Entre {data0} y {data1}")
//!     .build();
//!
//! let mut fields = vec![
//!     FormField::text("user")
//!         .with_value("al")
//!         .rule(RuleName::Required, true)
//!         .rule(RuleName::RangeLength, "3|10"),
//!     FormField::text("email").rule(RuleName::Required, true),
//! ];
//!
//! let outcome = engine.validate_form(&mut fields);
//! assert_eq!(outcome.rule, Some(RuleName::RangeLength));
//! assert_eq!(outcome.message, "Entre 3 y 10");
//! assert_eq!(outcome.validated, 1);
//! assert!(!fields[1].error);
//! ```
//!
//! ## Rules
//!
//! In evaluation order: `required`, `isemail`, `isurl`, `nospaces`,
//! `minlength`, `maxlength`, `rangelength`, `isnumber`, `min`, `max`,
//! `range`, `domains`, `isdate`, `dateprevious`, `minage`, `maxage`,
//! `security`, `equalto`, `phonenumber`, `phonecountry`, `pattern`,
//! `allowed`, `mincheck`, `maxcheck`.
//!
//! `dateprevious`, `minage` and `maxage` only run together with `isdate`;
//! `phonecountry` only runs together with `phonenumber`.
//!
//! ## Error Format
//!
//! [`FormValidationOutcome::to_api_error`] renders a failure as:
//!
//! ```json
//! {
//!   "error": {
//!     "type": "validation_error",
//!     "message": "Validation failed",
//!     "fields": [
//!       {"field": "email", "code": "isemail", "message": "Please enter a valid email address."}
//!     ]
//!   }
//! }
//! ```

pub mod catalog;
pub mod config;
mod engine;
mod error;
mod field;
mod form;
mod messages;
mod outcome;
pub mod rules;
mod ruleset;
mod schema;


pub use catalog::{LocaleCatalog, MessageCatalog, DEFAULT_LOCALE};
pub use config::EngineConfig;
pub use engine::{Clock, ValidationEngine, ValidationEngineBuilder};
pub use error::{ConfigError, ParamError, SchemaError};
pub use field::{FieldAdapter, FieldKind, FormField};
pub use form::{ControlState, FormContext, FormSnapshot};
pub use messages::{interpolate, MessageOverrides, MessageResolver};
pub use outcome::{ApiValidationError, FieldError, FieldRef, FormValidationOutcome, ValidationOutcome};
pub use rules::{RuleName, RulePlan, ValidationRule};
pub use ruleset::{RuleSet, RuleValue};
pub use schema::FormDocument;

/// Prelude module for validation
pub mod prelude {
    pub use crate::config::EngineConfig;
    pub use crate::engine::{Clock, ValidationEngine};
    pub use crate::field::{FieldAdapter, FieldKind, FormField};
    pub use crate::form::{FormContext, FormSnapshot};
    pub use crate::outcome::{FormValidationOutcome, ValidationOutcome};
    pub use crate::rules::RuleName;
    pub use crate::ruleset::{RuleSet, RuleValue};
    pub use crate::schema::FormDocument;
}
