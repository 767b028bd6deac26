//! CLI commands

mod check;
mod messages;
mod rules;

pub use check::{check, CheckArgs};
pub use messages::{messages, MessagesArgs};
pub use rules::list_rules;
