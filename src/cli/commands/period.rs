use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::ledger::{PeriodSelector, MAX_PERIOD_HISTORY_LEN, PERIOD_HISTORY_LEN};
use crate::utils::format::format_amount;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "period",
            "Show or switch the active billing period",
            "period [current|previous]",
            cmd_period,
        ),
        CommandEntry::new(
            "periods",
            "List recent billing periods with their totals",
            "periods [1-120]",
            cmd_periods,
        ),
        CommandEntry::new(
            "day",
            "Show or set the day of the month a period starts on",
            "day [1-31]",
            cmd_day,
        ),
    ]
}

fn cmd_period(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(raw) = args.first() {
        let selector: PeriodSelector = raw.parse()?;
        context.ledger_mut().set_active_period(selector);
    }
    let ledger = context.ledger();
    let selector = ledger.active_period();
    let range = ledger.period_range(selector);
    output::info(format!(
        "Viewing the {} period: {} ({}).",
        selector,
        range,
        range.label()
    ));
    Ok(())
}

fn parse_history_len(raw: &str) -> Result<usize, CommandError> {
    match raw.parse::<usize>() {
        Ok(count) if (1..=MAX_PERIOD_HISTORY_LEN).contains(&count) => Ok(count),
        _ => Err(CommandError::InvalidArguments(format!(
            "period count must be between 1 and {MAX_PERIOD_HISTORY_LEN}, got `{raw}`"
        ))),
    }
}

fn cmd_periods(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let count = match args.first() {
        Some(raw) => parse_history_len(raw)?,
        None => PERIOD_HISTORY_LEN,
    };

    let ledger = context.ledger();
    output::section("Billing periods");
    for range in ledger.recent_periods(count).iter().rev() {
        let expenses = ledger.expenses_in(range);
        let total: f64 = expenses.iter().map(|expense| expense.amount).sum();
        output::info(format!(
            "  {:<28} {:>4} item(s) {:>12}",
            range.label(),
            expenses.len(),
            format_amount(total)
        ));
    }
    Ok(())
}

fn cmd_day(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(raw) = args.first() else {
        output::info(format!(
            "Periods start on day {} of each month.",
            context.ledger().period_start_day()
        ));
        return Ok(());
    };
    let day = raw
        .parse::<u32>()
        .map_err(|_| CommandError::InvalidArguments(format!("`{raw}` is not a day of the month")))?;
    context.ledger_mut().set_period_start_day(day)?;
    output::success(format!("Periods now start on day {day}."));
    Ok(())
}
