use std::{collections::BTreeSet, sync::Arc};

use super::{
    aggregate::{aggregate_by_category, BudgetStatus, CategoryBreakdown},
    category::Category,
    expense::{Expense, ExpenseId, IdGenerator},
    period::{self, PeriodRange, PeriodSelector},
    quick::{self, QuickButton},
    time::{Clock, SystemClock},
};
use crate::{
    errors::{LedgerError, Result},
    storage::{
        read_entry, write_entry, KeyValueStore, BUDGET_KEY, EXPENSES_KEY, PERIOD_DAY_KEY,
        QUICK_BUTTONS_KEY,
    },
};

pub const DEFAULT_BUDGET: f64 = 30_000.0;
pub const DEFAULT_PERIOD_START_DAY: u32 = 25;
pub const PERIOD_HISTORY_LEN: usize = 12;
/// Upper bound on how many periods the shell lists at once.
pub const MAX_PERIOD_HISTORY_LEN: usize = 120;

/// Expense ledger grouped into billing periods that start on a custom day of
/// the month.
///
/// Every mutation writes the affected state through to the backing
/// [`KeyValueStore`] before returning. If that write fails the in-memory
/// change is kept and the storage error is returned.
pub struct PeriodLedger {
    store: Box<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    ids: IdGenerator,
    expenses: Vec<Expense>,
    budget: f64,
    period_start_day: u32,
    active_period: PeriodSelector,
    selected: BTreeSet<ExpenseId>,
    quick_buttons: Vec<QuickButton>,
}

impl PeriodLedger {
    /// Loads persisted state from `store`, falling back to defaults for any
    /// entry that is missing or unreadable.
    pub fn load(store: Box<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        let store_ref = &*store;
        let expenses: Vec<Expense> = read_entry(store_ref, EXPENSES_KEY).unwrap_or_default();
        let budget = read_entry::<f64>(store_ref, BUDGET_KEY)
            .map(normalize_budget)
            .unwrap_or(DEFAULT_BUDGET);
        let period_start_day = read_entry::<u32>(store_ref, PERIOD_DAY_KEY)
            .filter(|day| match period::validate_start_day(*day) {
                Ok(_) => true,
                Err(err) => {
                    tracing::warn!(error = %err, "ignoring stored period start day");
                    false
                }
            })
            .unwrap_or(DEFAULT_PERIOD_START_DAY);
        let quick_buttons = read_entry::<Vec<QuickButton>>(store_ref, QUICK_BUTTONS_KEY)
            .filter(|buttons| quick::is_valid_layout(buttons))
            .unwrap_or_else(quick::default_quick_buttons);

        tracing::debug!(
            expenses = expenses.len(),
            budget,
            period_start_day,
            "ledger loaded"
        );

        Self {
            store,
            clock,
            ids: IdGenerator::seeded(&expenses),
            expenses,
            budget,
            period_start_day,
            active_period: PeriodSelector::Current,
            selected: BTreeSet::new(),
            quick_buttons,
        }
    }

    pub fn with_system_clock(store: Box<dyn KeyValueStore>) -> Self {
        Self::load(store, Arc::new(SystemClock))
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn expense(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    pub fn budget(&self) -> f64 {
        self.budget
    }

    pub fn period_start_day(&self) -> u32 {
        self.period_start_day
    }

    pub fn active_period(&self) -> PeriodSelector {
        self.active_period
    }

    pub fn quick_buttons(&self) -> &[QuickButton] {
        &self.quick_buttons
    }

    pub fn clock(&self) -> &dyn Clock {
        &*self.clock
    }

    // --- periods -------------------------------------------------------

    /// Range of the selected period. A clock reading at the edge of the
    /// representable calendar yields an empty range.
    pub fn period_range(&self, selector: PeriodSelector) -> PeriodRange {
        let today = self.clock.today();
        period::period_for(selector, today, self.period_start_day).unwrap_or_else(|| {
            tracing::warn!(%today, ?selector, "period is outside the supported calendar");
            PeriodRange::empty_at(today, self.period_start_day)
        })
    }

    /// Expenses inside the selected period, newest first.
    pub fn current_period_expenses(&self, selector: PeriodSelector) -> Vec<&Expense> {
        self.expenses_in(&self.period_range(selector))
    }

    pub fn active_period_expenses(&self) -> Vec<&Expense> {
        self.current_period_expenses(self.active_period)
    }

    pub fn expenses_in(&self, range: &PeriodRange) -> Vec<&Expense> {
        self.expenses
            .iter()
            .filter(|expense| range.contains(self.clock.local(expense.timestamp)))
            .collect()
    }

    pub fn recent_periods(&self, count: usize) -> Vec<PeriodRange> {
        period::recent_periods(self.clock.today(), self.period_start_day, count)
    }

    /// Switches the viewed period. The selection is cleared so it never
    /// carries ids from a period that is no longer visible.
    pub fn set_active_period(&mut self, selector: PeriodSelector) {
        if self.active_period != selector {
            self.selected.clear();
        }
        self.active_period = selector;
    }

    // --- aggregates ----------------------------------------------------

    pub fn category_breakdown(&self, selector: PeriodSelector) -> CategoryBreakdown {
        aggregate_by_category(self.current_period_expenses(selector))
    }

    pub fn budget_status(&self, selector: PeriodSelector) -> BudgetStatus {
        let spent: f64 = self
            .current_period_expenses(selector)
            .iter()
            .map(|expense| expense.amount)
            .sum();
        BudgetStatus::compute(self.budget, spent)
    }

    // --- mutations -----------------------------------------------------

    pub fn add_expense(
        &mut self,
        category: Category,
        amount: f64,
        note: impl AsRef<str>,
    ) -> Result<Expense> {
        validate_amount(amount)?;
        let now = self.clock.now();
        let expense = Expense::new(self.ids.next_id(now), category, amount, note, now);
        self.expenses.insert(0, expense.clone());
        tracing::debug!(id = expense.id, amount, category = %expense.category, "expense added");
        self.persist_expenses()?;
        Ok(expense)
    }

    pub fn quick_add(&mut self, slot: usize) -> Result<Expense> {
        let button = self.quick_buttons[quick::check_slot(slot)?].clone();
        self.add_expense(button.category, button.amount, "")
    }

    /// Removes the expense if present. Unknown ids are a no-op.
    pub fn delete_expense(&mut self, id: ExpenseId) -> Result<bool> {
        let before = self.expenses.len();
        self.expenses.retain(|expense| expense.id != id);
        self.selected.remove(&id);
        if self.expenses.len() == before {
            return Ok(false);
        }
        tracing::debug!(id, "expense deleted");
        self.persist_expenses()?;
        Ok(true)
    }

    pub fn delete_selected(&mut self) -> Result<usize> {
        if self.selected.is_empty() {
            return Ok(0);
        }
        let before = self.expenses.len();
        let selected = std::mem::take(&mut self.selected);
        self.expenses
            .retain(|expense| !selected.contains(&expense.id));
        let removed = before - self.expenses.len();
        tracing::debug!(removed, "selected expenses deleted");
        self.persist_expenses()?;
        Ok(removed)
    }

    pub fn set_budget(&mut self, value: f64) -> Result<()> {
        self.budget = normalize_budget(value);
        tracing::debug!(budget = self.budget, "budget updated");
        write_entry(&*self.store, BUDGET_KEY, &self.budget)
    }

    /// Text that does not parse as a number sets the budget to zero.
    pub fn set_budget_input(&mut self, text: &str) -> Result<()> {
        self.set_budget(text.trim().parse::<f64>().unwrap_or(0.0))
    }

    pub fn set_period_start_day(&mut self, day: u32) -> Result<()> {
        self.period_start_day = period::validate_start_day(day)?;
        tracing::debug!(day, "period start day updated");
        write_entry(&*self.store, PERIOD_DAY_KEY, &self.period_start_day)
    }

    pub fn set_quick_button(
        &mut self,
        slot: usize,
        amount: f64,
        category: Category,
    ) -> Result<()> {
        let slot = quick::check_slot(slot)?;
        validate_amount(amount)?;
        self.quick_buttons[slot] = QuickButton::new(amount, category);
        write_entry(&*self.store, QUICK_BUTTONS_KEY, &self.quick_buttons)
    }

    // --- selection -----------------------------------------------------

    pub fn selected_ids(&self) -> &BTreeSet<ExpenseId> {
        &self.selected
    }

    pub fn is_selected(&self, id: ExpenseId) -> bool {
        self.selected.contains(&id)
    }

    /// Flips selection of an existing expense; returns whether it is now
    /// selected. Unknown ids are ignored.
    pub fn toggle_selection(&mut self, id: ExpenseId) -> bool {
        if self.expense(id).is_none() {
            return false;
        }
        if self.selected.remove(&id) {
            false
        } else {
            self.selected.insert(id)
        }
    }

    /// Selects every expense visible in `selector`, or clears the selection
    /// when all of them are already selected.
    pub fn toggle_select_all(&mut self, selector: PeriodSelector) {
        let visible: Vec<ExpenseId> = self
            .current_period_expenses(selector)
            .iter()
            .map(|expense| expense.id)
            .collect();
        if visible.iter().all(|id| self.selected.contains(id)) {
            self.selected.clear();
        } else {
            self.selected.extend(visible);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    fn persist_expenses(&self) -> Result<()> {
        write_entry(&*self.store, EXPENSES_KEY, &self.expenses)
    }
}

/// Parses user-entered amount text, rejecting anything that is not a
/// positive finite number.
pub fn parse_amount(text: &str) -> Result<f64> {
    let amount = text
        .trim()
        .parse::<f64>()
        .map_err(|_| LedgerError::validation(format!("`{}` is not a number", text.trim())))?;
    validate_amount(amount)?;
    Ok(amount)
}

fn validate_amount(amount: f64) -> Result<()> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(LedgerError::validation(
            "amount must be a number greater than 0",
        ))
    }
}

fn normalize_budget(value: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        0.0
    }
}
