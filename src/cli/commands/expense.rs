use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::render;
use crate::ledger::{parse_amount, Category, Expense};
use crate::utils::format::format_amount;

use super::{parse_id, parse_slot, usage};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "add",
            "Record an expense in the current period",
            "add <amount> [category] [note...]",
            cmd_add,
        ),
        CommandEntry::new(
            "quick",
            "Record a preset expense, or list the presets",
            "quick [1-4]",
            cmd_quick,
        ),
        CommandEntry::new(
            "quick-set",
            "Change a quick-add preset",
            "quick-set <1-4> <amount> <category>",
            cmd_quick_set,
        ),
        CommandEntry::new(
            "list",
            "List expenses in the active period",
            "list [limit]",
            cmd_list,
        ),
        CommandEntry::new(
            "delete",
            "Delete an expense by id",
            "delete <id>",
            cmd_delete,
        ),
    ]
}

fn report_added(expense: &Expense) {
    output::success(format!(
        "Recorded {} {} -{} (id {}).",
        expense.category.icon(),
        expense.category,
        format_amount(expense.amount),
        expense.id
    ));
}

/// The second word is taken as the category only when it names a known one;
/// otherwise it starts the note and the default category applies.
fn split_category_and_note(rest: &[&str]) -> (Category, String) {
    match rest.split_first() {
        Some((first, tail)) => {
            let candidate = Category::parse(first);
            if candidate.is_known() {
                (candidate, tail.join(" "))
            } else {
                (Category::default(), rest.join(" "))
            }
        }
        None => (Category::default(), String::new()),
    }
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (amount, rest) = args
        .split_first()
        .ok_or_else(|| usage("add <amount> [category] [note...]"))?;
    let amount = parse_amount(amount)?;
    let (category, note) = split_category_and_note(rest);
    let expense = context.ledger_mut().add_expense(category, amount, note)?;
    report_added(&expense);
    Ok(())
}

fn cmd_quick(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(slot) = args.first() else {
        output::section("Quick add");
        for (idx, button) in context.ledger().quick_buttons().iter().enumerate() {
            output::info(format!(
                "  {}. {} {:<14} {}",
                idx + 1,
                button.category.icon(),
                button.category.label(),
                format_amount(button.amount)
            ));
        }
        output::hint(format!("Categories: {}", Category::known_labels()));
        return Ok(());
    };
    let expense = context.ledger_mut().quick_add(parse_slot(slot)?)?;
    report_added(&expense);
    Ok(())
}

fn cmd_quick_set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [slot, amount, category, ..] = args else {
        return Err(usage("quick-set <1-4> <amount> <category>"));
    };
    let slot = parse_slot(slot)?;
    let amount = parse_amount(amount)?;
    let category = Category::parse(category);
    if !category.is_known() {
        output::hint(format!(
            "`{category}` is a custom category. Built-in ones: {}",
            Category::known_labels()
        ));
    }
    context
        .ledger_mut()
        .set_quick_button(slot, amount, category.clone())?;
    output::success(format!(
        "Quick button {} now adds {} {}.",
        slot + 1,
        category,
        format_amount(amount)
    ));
    Ok(())
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let limit = match args.first() {
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|_| usage("list [limit]"))?,
        None => context.config().list_limit,
    };

    let ledger = context.ledger();
    let selector = ledger.active_period();
    let range = ledger.period_range(selector);
    let expenses = ledger.active_period_expenses();

    output::section(format!("{} period: {}", selector.label(), range));
    if expenses.is_empty() {
        output::info("No expenses recorded for this period yet.");
        return Ok(());
    }

    for expense in expenses.iter().take(limit) {
        output::info(render::expense_line(
            expense,
            ledger.is_selected(expense.id),
            ledger.clock(),
        ));
    }
    if expenses.len() > limit {
        output::hint(format!(
            "{} more not shown. Use `list <limit>` to see them.",
            expenses.len() - limit
        ));
    }
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = parse_id(args.first().ok_or_else(|| usage("delete <id>"))?)?;
    let Some(expense) = context.ledger().expense(id) else {
        output::warning(format!("No expense with id {id}."));
        return Ok(());
    };

    let question = format!(
        "Delete {} -{}?",
        expense.category,
        format_amount(expense.amount)
    );
    if !context.confirm(&question)? {
        output::info("Operation cancelled.");
        return Ok(());
    }

    if context.ledger_mut().delete_expense(id)? {
        output::success(format!("Deleted expense {id}."));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_second_word_becomes_note() {
        let (category, note) = split_category_and_note(&["coffee", "beans"]);
        assert_eq!(category, Category::Food);
        assert_eq!(note, "coffee beans");

        let (category, note) = split_category_and_note(&["Transport", "bus"]);
        assert_eq!(category, Category::Transport);
        assert_eq!(note, "bus");
    }
}
