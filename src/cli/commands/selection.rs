use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

use super::{parse_id, usage};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "select",
            "Toggle selection of one or more expenses",
            "select <id> [id...]",
            cmd_select,
        ),
        CommandEntry::new(
            "select-all",
            "Select every expense in the active period, or clear if all are selected",
            "select-all",
            cmd_select_all,
        ),
        CommandEntry::new(
            "clear-selection",
            "Deselect everything",
            "clear-selection",
            cmd_clear_selection,
        ),
        CommandEntry::new(
            "delete-selected",
            "Delete every selected expense",
            "delete-selected",
            cmd_delete_selected,
        ),
    ]
}

fn report_selection(context: &ShellContext) {
    output::info(format!(
        "{} expense(s) selected.",
        context.ledger().selected_ids().len()
    ));
}

fn cmd_select(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return Err(usage("select <id> [id...]"));
    }
    for raw in args {
        let id = parse_id(raw)?;
        if context.ledger().expense(id).is_none() {
            output::warning(format!("No expense with id {id}."));
            continue;
        }
        context.ledger_mut().toggle_selection(id);
    }
    report_selection(context);
    Ok(())
}

fn cmd_select_all(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let ledger = context.ledger_mut();
    let selector = ledger.active_period();
    ledger.toggle_select_all(selector);
    report_selection(context);
    Ok(())
}

fn cmd_clear_selection(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.ledger_mut().clear_selection();
    report_selection(context);
    Ok(())
}

fn cmd_delete_selected(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let count = context.ledger().selected_ids().len();
    if count == 0 {
        output::info("Nothing is selected.");
        return Ok(());
    }
    if !context.confirm(&format!("Delete {count} selected expense(s)?"))? {
        output::info("Operation cancelled.");
        return Ok(());
    }
    let removed = context.ledger_mut().delete_selected()?;
    output::success(format!("Deleted {removed} expense(s)."));
    Ok(())
}
