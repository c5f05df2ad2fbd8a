use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::Category;

pub type ExpenseId = i64;

/// A single logged expense. Records are immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: ExpenseId,
    pub category: Category,
    pub amount: f64,
    #[serde(default)]
    pub note: String,
    #[serde(rename = "date")]
    pub timestamp: DateTime<Utc>,
}

impl Expense {
    pub fn new(
        id: ExpenseId,
        category: Category,
        amount: f64,
        note: impl AsRef<str>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            category: category.canonical(),
            amount,
            note: note.as_ref().trim().to_string(),
            timestamp,
        }
    }

    pub fn has_note(&self) -> bool {
        !self.note.is_empty()
    }
}

/// Issues expense ids that are strictly increasing.
///
/// Ids follow the creation time in milliseconds so they stay compatible with
/// records written by earlier versions, but two records created within the
/// same millisecond still receive distinct ids.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: ExpenseId,
}

impl IdGenerator {
    pub fn seeded<'a>(existing: impl IntoIterator<Item = &'a Expense>) -> Self {
        let last = existing.into_iter().map(|e| e.id).max().unwrap_or(0);
        Self { last }
    }

    pub fn next_id(&mut self, now: DateTime<Utc>) -> ExpenseId {
        let candidate = now.timestamp_millis().max(self.last.saturating_add(1));
        self.last = candidate;
        candidate
    }
}
