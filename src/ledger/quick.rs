use serde::{Deserialize, Serialize};

use super::category::Category;
use crate::errors::LedgerError;

pub const QUICK_BUTTON_SLOTS: usize = 4;

/// Preset amount/category pair for one-tap entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickButton {
    pub amount: f64,
    pub category: Category,
}

impl QuickButton {
    pub fn new(amount: f64, category: Category) -> Self {
        Self {
            amount,
            category: category.canonical(),
        }
    }
}

pub fn default_quick_buttons() -> Vec<QuickButton> {
    vec![
        QuickButton::new(50.0, Category::Food),
        QuickButton::new(100.0, Category::Food),
        QuickButton::new(200.0, Category::Transport),
        QuickButton::new(500.0, Category::Shopping),
    ]
}

/// Accepts a stored button list only when it has the fixed arity and every
/// amount is usable.
pub(crate) fn is_valid_layout(buttons: &[QuickButton]) -> bool {
    buttons.len() == QUICK_BUTTON_SLOTS
        && buttons
            .iter()
            .all(|button| button.amount.is_finite() && button.amount > 0.0)
}

pub(crate) fn check_slot(slot: usize) -> Result<usize, LedgerError> {
    if slot < QUICK_BUTTON_SLOTS {
        Ok(slot)
    } else {
        Err(LedgerError::validation(format!(
            "quick button slot must be between 1 and {QUICK_BUTTON_SLOTS}"
        )))
    }
}
