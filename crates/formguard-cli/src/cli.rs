//! CLI argument parsing

use crate::commands::{self, CheckArgs, MessagesArgs};
use clap::{ArgAction, Parser, Subcommand};
use std::process::ExitCode;

/// formguard - validate form documents against their declared rules
#[derive(Parser, Debug)]
#[command(name = "formguard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log more (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a JSON form document
    Check(CheckArgs),

    /// List the rules in evaluation order
    Rules,

    /// Print the message templates of a locale
    Messages(MessagesArgs),
}

impl Cli {
    pub fn verbose(&self) -> u8 {
        self.verbose
    }

    /// Execute the CLI command
    pub fn execute(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Commands::Check(args) => commands::check(args),
            Commands::Rules => commands::list_rules(),
            Commands::Messages(args) => commands::messages(args),
        }
    }
}
