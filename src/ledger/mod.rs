//! Expense records, billing periods, aggregation, and the period ledger.

pub mod aggregate;
pub mod category;
pub mod expense;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod period;
pub mod quick;
pub mod time;

pub use aggregate::{aggregate_by_category, BudgetStatus, CategoryBreakdown, CategoryTotal};
pub use category::Category;
pub use expense::{Expense, ExpenseId, IdGenerator};
pub use ledger::{
    parse_amount, PeriodLedger, DEFAULT_BUDGET, DEFAULT_PERIOD_START_DAY, MAX_PERIOD_HISTORY_LEN,
    PERIOD_HISTORY_LEN,
};
pub use period::{compute_period_range, PeriodRange, PeriodSelector};
pub use quick::{default_quick_buttons, QuickButton, QUICK_BUTTON_SLOTS};
pub use time::{Clock, FixedClock, SystemClock};
