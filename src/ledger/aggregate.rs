use serde::Serialize;

use super::{category::Category, expense::Expense};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: f64,
}

/// Per-category sums over a list of expenses, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub totals: Vec<CategoryTotal>,
    pub grand_total: f64,
}

impl CategoryBreakdown {
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn total_for(&self, category: &Category) -> Option<f64> {
        self.totals
            .iter()
            .find(|entry| &entry.category == category)
            .map(|entry| entry.total)
    }

    /// Share of the grand total, in percent. Zero when nothing was spent.
    pub fn percentage(&self, amount: f64) -> f64 {
        if self.grand_total == 0.0 {
            0.0
        } else {
            amount / self.grand_total * 100.0
        }
    }
}

pub fn aggregate_by_category<'a, I>(expenses: I) -> CategoryBreakdown
where
    I: IntoIterator<Item = &'a Expense>,
{
    let mut breakdown = CategoryBreakdown::default();
    for expense in expenses {
        breakdown.grand_total += expense.amount;
        match breakdown
            .totals
            .iter_mut()
            .find(|entry| entry.category == expense.category)
        {
            Some(entry) => entry.total += expense.amount,
            None => breakdown.totals.push(CategoryTotal {
                category: expense.category.clone(),
                total: expense.amount,
            }),
        }
    }
    breakdown
}

/// Spending against the budget for one period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetStatus {
    pub budget: f64,
    pub spent: f64,
    /// `budget - spent`; negative when overspent.
    pub remaining: f64,
    /// Clamped to 100 even when overspent; check [`BudgetStatus::is_over_budget`].
    pub percent_used: f64,
}

impl BudgetStatus {
    pub fn compute(budget: f64, spent: f64) -> Self {
        let percent_used = if budget > 0.0 {
            (spent / budget * 100.0).min(100.0)
        } else {
            0.0
        };
        Self {
            budget,
            spent,
            remaining: budget - spent,
            percent_used,
        }
    }

    pub fn is_over_budget(&self) -> bool {
        self.remaining < 0.0
    }
}
