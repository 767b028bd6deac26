//! Rules command: list rules in evaluation order

use anyhow::Result;
use console::style;
use formguard_validate::RuleName;
use std::process::ExitCode;

pub fn list_rules() -> Result<ExitCode> {
    for rule in RuleName::ORDER {
        match rule.parent() {
            Some(parent) => println!(
                "{:>2}. {} {}",
                rule.priority() + 1,
                style(rule).bold(),
                style(format!("(with {parent})")).dim()
            ),
            None => println!("{:>2}. {}", rule.priority() + 1, style(rule).bold()),
        }
    }
    Ok(ExitCode::SUCCESS)
}
