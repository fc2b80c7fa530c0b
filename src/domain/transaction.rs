use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Classifies what a transaction moved money into or out of.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TransactionKind {
    Expense,
    Bill,
    Savings,
    Goal,
    ExtraFunds,
}

/// Append-only audit entry for one money-moving event.
///
/// Every mutating operation that changes a total emits exactly one
/// transaction, and deleting a transaction must exactly undo its effect on
/// the referenced entity (and any linked goal). `item_id` points at the bill
/// or expense that produced the entry; savings and extra-funds entries have
/// no entity behind them and carry `None`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub kind: TransactionKind,
    pub category: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<Uuid>,
}

impl Transaction {
    pub fn new(
        kind: TransactionKind,
        category: impl Into<String>,
        amount: f64,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            kind,
            category: category.into(),
            amount,
            note: None,
            item_id: None,
        }
    }

    pub fn with_item(mut self, item_id: Uuid) -> Self {
        self.item_id = Some(item_id);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}
