//! Messages command: show the message templates of a locale

use anyhow::Result;
use clap::Args;
use console::style;
use formguard_validate::{RuleName, ValidationEngine, DEFAULT_LOCALE};
use std::process::ExitCode;

#[derive(Args, Debug)]
pub struct MessagesArgs {
    /// Locale to resolve, falling back to `en` per rule
    #[arg(short, long, default_value = DEFAULT_LOCALE)]
    pub locale: String,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn messages(args: MessagesArgs) -> Result<ExitCode> {
    let engine = ValidationEngine::builder().locale(args.locale).build();
    let resolver = engine.resolver();
    let templates: Vec<(RuleName, &str)> = RuleName::ORDER
        .iter()
        .map(|rule| (*rule, resolver.template("", *rule).unwrap_or("")))
        .collect();

    if args.json {
        let entries: Vec<_> = templates
            .iter()
            .map(|(rule, template)| serde_json::json!({ "rule": rule, "template": template }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        println!("{}", style(format!("Messages for `{}`", engine.locale())).bold());
        for (rule, template) in templates {
            println!("{:<14} {}", style(rule).cyan(), template);
        }
    }
    Ok(ExitCode::SUCCESS)
}
