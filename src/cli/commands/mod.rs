pub mod budget;
pub mod config;
pub mod expense;
pub mod period;
pub mod selection;
pub mod system;

use crate::cli::core::CommandError;
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::ledger::ExpenseId;

pub(crate) fn all_definitions() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(expense::definitions());
    commands.extend(selection::definitions());
    commands.extend(period::definitions());
    commands.extend(budget::definitions());
    commands.extend(config::definitions());
    commands.extend(system::definitions());
    commands
}

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    for entry in all_definitions() {
        registry.register(entry);
    }
}

pub(crate) fn usage(text: &str) -> CommandError {
    CommandError::InvalidArguments(format!("usage: {text}"))
}

pub(crate) fn parse_id(arg: &str) -> Result<ExpenseId, CommandError> {
    arg.trim()
        .parse::<ExpenseId>()
        .map_err(|_| CommandError::InvalidArguments(format!("`{arg}` is not an expense id")))
}

/// Quick slots are numbered from 1 in the shell.
pub(crate) fn parse_slot(arg: &str) -> Result<usize, CommandError> {
    match arg.trim().parse::<usize>() {
        Ok(slot) if slot >= 1 => Ok(slot - 1),
        _ => Err(CommandError::InvalidArguments(format!(
            "`{arg}` is not a quick button number"
        ))),
    }
}
