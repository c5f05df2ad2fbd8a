use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::render;
use crate::utils::format::{format_amount, format_percent};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "budget",
            "Show the budget gauge, or set the budget for every period",
            "budget [amount]",
            cmd_budget,
        ),
        CommandEntry::new(
            "summary",
            "Show spending per category for the active period",
            "summary",
            cmd_summary,
        ),
        CommandEntry::new(
            "chart",
            "Draw spending per category as a bar chart",
            "chart",
            cmd_chart,
        ),
    ]
}

fn print_gauge(context: &ShellContext) {
    let ledger = context.ledger();
    let status = ledger.budget_status(ledger.active_period());
    output::section(format!("Budget ({} period)", ledger.active_period()));
    for line in render::budget_gauge(&status) {
        output::info(line);
    }
    if status.is_over_budget() {
        output::warning("Spending is over budget.");
    }
}

fn cmd_budget(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(raw) = args.first() {
        context.ledger_mut().set_budget_input(raw)?;
        output::success(format!(
            "Budget set to {}.",
            format_amount(context.ledger().budget())
        ));
    }
    print_gauge(context);
    Ok(())
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    print_gauge(context);

    let ledger = context.ledger();
    let breakdown = ledger.category_breakdown(ledger.active_period());
    output::section("By category");
    if breakdown.is_empty() {
        output::info("No expenses recorded for this period yet.");
        return Ok(());
    }
    for entry in &breakdown.totals {
        output::info(format!(
            "  {} {:<14} {:>12} {:>5}",
            entry.category.icon(),
            entry.category.label(),
            format_amount(entry.total),
            format_percent(breakdown.percentage(entry.total))
        ));
    }
    output::info(format!(
        "  {:<17} {:>12}",
        "Total",
        format_amount(breakdown.grand_total)
    ));
    Ok(())
}

fn cmd_chart(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let ledger = context.ledger();
    let breakdown = ledger.category_breakdown(ledger.active_period());
    output::section("Spending by category");
    if breakdown.is_empty() {
        output::info("No expenses recorded for this period yet.");
        return Ok(());
    }
    for line in render::category_chart(&breakdown, render::terminal_width()) {
        output::info(line);
    }
    Ok(())
}
