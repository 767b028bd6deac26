//! Check command: validate a form document

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use console::{style, Emoji};
use formguard_validate::config::{load_dotenv, parse_today};
use formguard_validate::{EngineConfig, FormDocument, FormValidationOutcome};
use std::path::PathBuf;
use std::process::ExitCode;

static CHECK: Emoji<'_, '_> = Emoji("✅ ", "+ ");
static ERROR: Emoji<'_, '_> = Emoji("❌ ", "x ");
static SKIP: Emoji<'_, '_> = Emoji("⏭️  ", "- ");

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Form document (JSON)
    pub form: PathBuf,

    /// Engine configuration (JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Locale for messages, e.g. `es` or `pt-BR`
    #[arg(short, long)]
    pub locale: Option<String>,

    /// Date used as "today" by the date rules (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub today: Option<NaiveDate>,

    /// Print the outcome and the updated fields as JSON
    #[arg(long)]
    pub json: bool,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    parse_today(value).map_err(|error| error.to_string())
}

/// Settings are layered: config file, then `FORMGUARD_*` variables, then
/// command line flags.
fn load_config(args: &CheckArgs) -> Result<EngineConfig> {
    load_dotenv();

    let config = match &args.config {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let mut config = config.merge_env().context("reading FORMGUARD_* variables")?;

    if let Some(locale) = &args.locale {
        config.locale = Some(locale.clone());
    }
    if let Some(today) = args.today {
        config.today = Some(today);
    }
    Ok(config)
}

pub fn check(args: CheckArgs) -> Result<ExitCode> {
    let engine = load_config(&args)?.into_engine();
    let mut form = FormDocument::from_file(&args.form)
        .with_context(|| format!("loading form {}", args.form.display()))?;

    tracing::debug!(fields = form.len(), locale = engine.locale(), "validating form");
    let outcome = form.validate(&engine);

    if args.json {
        print_json(&outcome, &form)?;
    } else {
        print_report(&outcome, &form);
    }

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn print_json(outcome: &FormValidationOutcome, form: &FormDocument) -> Result<()> {
    let report = serde_json::json!({
        "outcome": outcome,
        "error": outcome.to_api_error(),
        "fields": form.fields,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn print_report(outcome: &FormValidationOutcome, form: &FormDocument) {
    for (index, field) in form.fields.iter().enumerate() {
        let name = style(&field.name).bold();
        if index >= outcome.validated {
            println!("{}{} {}", SKIP, name, style("not checked").dim());
        } else if field.error {
            let rule = outcome.rule.map(|rule| rule.to_string()).unwrap_or_default();
            println!(
                "{}{} {} {}",
                ERROR,
                name,
                style(format!("[{rule}]")).yellow(),
                field.errormsg
            );
        } else {
            println!("{}{} {}", CHECK, name, style(&field.value).dim());
        }
    }

    println!();
    if outcome.is_success() {
        println!(
            "{}",
            style(format!("{} field(s) valid", outcome.validated)).green()
        );
    } else {
        println!("{}", style("Validation failed").red().bold());
    }
}
