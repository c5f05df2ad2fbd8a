use colored::Colorize;

use crate::ledger::{BudgetStatus, CategoryBreakdown, Clock, Expense};
use crate::utils::format::{format_amount, format_percent};

const DEFAULT_WIDTH: usize = 80;
const GAUGE_WIDTH: usize = 30;
const LABEL_WIDTH: usize = 16;

pub fn terminal_width() -> usize {
    crossterm::terminal::size()
        .map(|(cols, _)| cols as usize)
        .ok()
        .filter(|cols| *cols > 0)
        .unwrap_or(DEFAULT_WIDTH)
}

/// One row of the expense list: selection marker, id, local date, category
/// and amount, with the note appended when present.
pub fn expense_line(expense: &Expense, selected: bool, clock: &dyn Clock) -> String {
    let marker = if selected { "[x]" } else { "[ ]" };
    let when = clock.local(expense.timestamp).format("%Y-%m-%d %H:%M");
    let category = format!("{} {}", expense.category.icon(), expense.category.label());
    let amount = format!("-{}", format_amount(expense.amount));
    let mut line = format!(
        "{marker} {id:<14} {when}  {category:<16} {amount:>10}",
        id = expense.id,
    );
    if expense.has_note() {
        line.push_str("  ");
        line.push_str(&expense.note);
    }
    line
}

fn bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Budget progress gauge followed by the spent/remaining figures.
pub fn budget_gauge(status: &BudgetStatus) -> Vec<String> {
    let gauge = bar(status.percent_used / 100.0, GAUGE_WIDTH);
    let gauge = if status.is_over_budget() {
        gauge.bright_red().to_string()
    } else if status.percent_used >= 80.0 {
        gauge.bright_yellow().to_string()
    } else {
        gauge.bright_green().to_string()
    };

    let remaining = if status.is_over_budget() {
        format!("over by {}", format_amount(-status.remaining))
    } else {
        format!("{} left", format_amount(status.remaining))
    };

    vec![
        format!("{gauge} {}", format_percent(status.percent_used)),
        format!(
            "Spent {} of {} ({remaining})",
            format_amount(status.spent),
            format_amount(status.budget)
        ),
    ]
}

/// Horizontal bar per category, scaled to `width` columns.
pub fn category_chart(breakdown: &CategoryBreakdown, width: usize) -> Vec<String> {
    // label, space, bar, space, amount, percentage
    let bar_width = width.saturating_sub(LABEL_WIDTH + 24).clamp(10, 50);
    breakdown
        .totals
        .iter()
        .map(|entry| {
            let share = breakdown.percentage(entry.total);
            let label = format!("{} {}", entry.category.icon(), entry.category.label());
            format!(
                "{label:<LABEL_WIDTH$} {} {:>10} {:>5.1}%",
                bar(share / 100.0, bar_width),
                format_amount(entry.total),
                share
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{aggregate_by_category, Category, FixedClock};
    use chrono::NaiveDate;

    fn clock() -> FixedClock {
        FixedClock::at(
            NaiveDate::from_ymd_opt(2024, 3, 2)
                .unwrap()
                .and_hms_opt(8, 30, 0)
                .unwrap(),
        )
    }

    #[test]
    fn expense_line_shows_marker_and_note() {
        let clock = clock();
        let expense = Expense::new(7, Category::Food, 1250.0, " ramen ", clock.now());
        let line = expense_line(&expense, true, &clock);
        assert!(line.starts_with("[x] 7"));
        assert!(line.contains("2024-03-02 08:30"));
        assert!(line.contains("-1,250"));
        assert!(line.ends_with("ramen"));
    }

    #[test]
    fn bar_is_clamped_to_width() {
        assert_eq!(bar(2.0, 4), "████");
        assert_eq!(bar(0.0, 3), "░░░");
        assert_eq!(bar(0.5, 4), "██░░");
    }

    #[test]
    fn chart_has_row_per_category() {
        let clock = clock();
        let expenses = vec![
            Expense::new(1, Category::Food, 150.0, "", clock.now()),
            Expense::new(2, Category::Transport, 50.0, "", clock.now()),
        ];
        let rows = category_chart(&aggregate_by_category(&expenses), 80);
        assert_eq!(rows.len(), 2);
        assert!(rows[0].ends_with("75.0%"));
        assert!(rows[1].ends_with("25.0%"));
    }
}
